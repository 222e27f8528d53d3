//! Dashboard layout driver.
//!
//! [`DashboardLayout`] owns the configuration and the result of the latest pass.
//! Setters only record the new value and mark the layout dirty; the host batches its
//! mutations (typically once per animation frame) and then calls
//! [`DashboardLayout::layout`], which recomputes everything from scratch and replaces
//! the previous result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{
    sanitize_base_unit, sanitize_container_width, sanitize_gap_setting, sanitize_width_setting,
    LayoutConfig, TrackPacking,
};
use crate::geometry::{compute_geometry, GridGeometry, Rect};
use crate::measure::MeasureItem;
use crate::placement::{place_and_measure, ItemId, LayoutItem, PlacementMatrix, RowHeights};
use crate::tracks::{compute_columns_with, ColumnSet};

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayoutResult {
    /// Sequence number of the pass that produced this result.
    pub pass: u64,
    /// Container width the pass was computed for.
    pub container_width: f32,
    /// Resolved gap between rows and columns.
    pub gap: f32,
    pub columns: ColumnSet,
    pub matrix: PlacementMatrix,
    pub row_heights: RowHeights,
    pub geometry: GridGeometry,
}

impl DashboardLayoutResult {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    /// Item occupying a cell, if any.
    pub fn item_at(&self, row: usize, column: usize) -> Option<ItemId> {
        self.matrix.item_at(row, column)
    }

    /// Rectangle of an item.
    pub fn item_rect(&self, item: ItemId) -> Option<Rect> {
        self.geometry.rect_of(item)
    }
}

/// Run a full layout pass for a configuration.
///
/// Pure: identical inputs give identical results.
pub fn compute_layout<I, M>(config: &LayoutConfig, items: &[I], measure: M) -> DashboardLayoutResult
where
    I: LayoutItem,
    M: MeasureItem<I>,
{
    let tracks = config.resolve_tracks();
    let container_width = config.resolved_container_width();

    let columns = compute_columns_with(&tracks, container_width);
    let (matrix, row_heights) = place_and_measure(items, columns.len(), measure);
    let geometry = compute_geometry(&columns, &row_heights, &matrix, tracks.gap);

    DashboardLayoutResult {
        pass: 0,
        container_width,
        gap: tracks.gap,
        columns,
        matrix,
        row_heights,
        geometry,
    }
}

/// Stateful layout engine for one dashboard container.
#[derive(Debug, Clone, Default)]
pub struct DashboardLayout {
    config: LayoutConfig,
    current: Option<DashboardLayoutResult>,
    passes: u64,
}

impl DashboardLayout {
    /// Create a layout engine. Values in `config` are used as given and resolved per pass.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            current: None,
            passes: 0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.invalidate();
    }

    /// Container width changed (resize observation).
    pub fn set_container_width(&mut self, width: f32) {
        let width = sanitize_container_width(width);
        if width != self.config.container_width {
            debug!(from = self.config.container_width, to = width, "Container resized");
            self.config.container_width = width;
            self.invalidate();
        }
    }

    /// Set the minimum column width, `None` restores the default.
    pub fn set_min_column_width(&mut self, width: Option<f32>) {
        self.config.min_column_width = sanitize_width_setting("min_column_width", width);
        self.invalidate();
    }

    /// Set the maximum column width, `None` removes the bound.
    pub fn set_max_column_width(&mut self, width: Option<f32>) {
        self.config.max_column_width = sanitize_width_setting("max_column_width", width);
        self.invalidate();
    }

    /// Set the gap, `None` restores the default.
    pub fn set_gap(&mut self, gap: Option<f32>) {
        self.config.gap = sanitize_gap_setting(gap);
        self.invalidate();
    }

    /// Set the pixel size of `1rem` used by the defaults.
    pub fn set_base_unit(&mut self, base_unit: f32) {
        self.config.base_unit = sanitize_base_unit(base_unit);
        self.invalidate();
    }

    pub fn set_packing(&mut self, packing: TrackPacking) {
        self.config.packing = packing;
        self.invalidate();
    }

    /// Mark the current result stale, e.g. after items were added, removed,
    /// reordered or changed span.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// Whether a mutation happened since the last pass.
    pub fn is_dirty(&self) -> bool {
        self.current.is_none()
    }

    /// Number of passes run so far.
    pub fn pass_count(&self) -> u64 {
        self.passes
    }

    /// Columns for the current configuration, without placing anything.
    pub fn columns(&self) -> ColumnSet {
        compute_columns_with(
            &self.config.resolve_tracks(),
            self.config.resolved_container_width(),
        )
    }

    /// Run a layout pass over the current item list and keep its result.
    pub fn layout<I, M>(&mut self, items: &[I], measure: M) -> &DashboardLayoutResult
    where
        I: LayoutItem,
        M: MeasureItem<I>,
    {
        self.passes += 1;

        let mut result = compute_layout(&self.config, items, measure);
        result.pass = self.passes;

        debug!(
            pass = result.pass,
            container_width = result.container_width,
            columns = result.column_count(),
            column_width = result.columns.column_width(),
            rows = result.row_count(),
            items = items.len(),
            "Dashboard layout pass"
        );

        self.current.insert(result)
    }

    /// Result of the latest pass, unless a mutation has made it stale.
    pub fn current(&self) -> Option<&DashboardLayoutResult> {
        self.current.as_ref()
    }
}
