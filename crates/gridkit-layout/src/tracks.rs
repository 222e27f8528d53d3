//! # Track Sizing
//!
//! Derives the column tracks of a dashboard from the container width.
//!
//! ## Algorithm
//!
//! 1. Take a packing unit (the minimum column width, or the maximum under
//!    [`TrackPacking::AutoFill`]) and count how many units plus gaps fit in the
//!    container. At least one column is always produced; if even one unit does not
//!    fit, that column overflows the container.
//! 2. Spread the leftover width evenly across the columns.
//! 3. Cap every column at the maximum width, if one is set.
//!
//! All columns of a pass have the same width.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{sanitize_container_width, LayoutConfig, ResolvedTrackConfig, TrackPacking};
use crate::LAYOUT_EPSILON;

/// Ordered widths of the column tracks of one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet {
    widths: Vec<f32>,
}

impl ColumnSet {
    /// Create a set of `count` columns of the same width.
    pub fn uniform(count: usize, width: f32) -> Self {
        Self {
            widths: vec![width; count],
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Whether there are no columns. Never true for a computed set.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Column widths in order.
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    /// Width of a single column.
    pub fn column_width(&self) -> f32 {
        self.widths.first().copied().unwrap_or(0.0)
    }

    /// Width of the columns plus the gaps between them.
    pub fn total_width(&self, gap: f32) -> f32 {
        let gaps = self.widths.len().saturating_sub(1) as f32 * gap;
        self.widths.iter().sum::<f32>() + gaps
    }

    /// Offset of every column from the container start.
    pub fn positions(&self, gap: f32) -> Vec<f32> {
        let mut offset = 0.0;
        self.widths
            .iter()
            .map(|width| {
                let position = offset;
                offset += width + gap;
                position
            })
            .collect()
    }

    /// Width covered by `span` columns starting at `column`, including inner gaps.
    pub fn span_width(&self, column: usize, span: usize, gap: f32) -> f32 {
        let end = (column + span).min(self.widths.len());
        let start = column.min(end);
        let widths: f32 = self.widths[start..end].iter().sum();
        widths + (end - start).saturating_sub(1) as f32 * gap
    }

    /// Iterate over the column widths.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.widths.iter().copied()
    }
}

/// Compute the columns for a container width.
///
/// `None` bounds and gap use their defaults (25rem and 1rem at a 16px base unit).
pub fn compute_columns(
    container_width: f32,
    min_column_width: Option<f32>,
    max_column_width: Option<f32>,
    gap: Option<f32>,
) -> ColumnSet {
    let config = LayoutConfig {
        min_column_width,
        max_column_width,
        gap,
        container_width,
        ..LayoutConfig::default()
    };
    compute_columns_with(&config.resolve_tracks(), container_width)
}

/// Compute the columns for a container width from resolved track inputs.
pub fn compute_columns_with(tracks: &ResolvedTrackConfig, container_width: f32) -> ColumnSet {
    let available = sanitize_container_width(container_width);
    let min = tracks.min_column_width;
    let gap = tracks.gap;

    let unit = match (tracks.packing, tracks.max_column_width) {
        (TrackPacking::AutoFill, Some(max)) => max.max(min),
        _ => min,
    };

    let count = fit_column_count(available, unit, gap);
    let gaps = (count - 1) as f32 * gap;

    let width = match tracks.packing {
        TrackPacking::MinimumWidth => {
            let used = count as f32 * unit + gaps;
            let leftover = (available - used).max(0.0);
            let stretched = unit + leftover / count as f32;
            match tracks.max_column_width {
                Some(max) => stretched.min(max),
                None => stretched,
            }
        }
        TrackPacking::AutoFill => {
            let share = ((available - gaps) / count as f32).max(min);
            match tracks.max_column_width {
                Some(max) => share.min(max),
                None => share,
            }
        }
    };

    debug!(
        container_width = available,
        unit,
        gap,
        count,
        width,
        packing = ?tracks.packing,
        "Computed column tracks"
    );

    ColumnSet::uniform(count, width)
}

/// Largest `n >= 1` with `n * unit + (n - 1) * gap <= available`.
fn fit_column_count(available: f32, unit: f32, gap: f32) -> usize {
    let repetition = unit + gap;
    if repetition <= 0.0 || available < unit {
        return 1;
    }

    let fits = |count: usize| {
        count as f32 * unit + (count - 1) as f32 * gap <= available + LAYOUT_EPSILON
    };

    // `available` and `unit` are finite and `unit > 0`, so the estimate is bounded
    // by `available / unit`.
    let mut count = (((available + gap) / repetition).floor() as usize).max(1);

    // Correct for rounding in the division.
    while count > 1 && !fits(count) {
        count -= 1;
    }
    while fits(count + 1) {
        count += 1;
    }

    trace!(available, unit, gap, count, "Column count fitted");
    count
}
