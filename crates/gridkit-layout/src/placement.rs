//! # Cell Placement
//!
//! Greedy row-major placement of dashboard items.
//!
//! Items are visited once, in order. Each item takes `min(col_span, column_count)`
//! contiguous columns at the cursor; when the rest of the current row is too narrow
//! the cursor moves to the start of the next row and the skipped cells stay empty.
//! There is no backfilling, so the visual order always matches the input order.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::measure::{sanitize_height, MeasureItem};

/// Stable identifier of a layout item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Something the dashboard can lay out.
///
/// Items belong to the host; the engine only reads their identity and span.
pub trait LayoutItem {
    /// Stable identity of the item.
    fn item_id(&self) -> ItemId;

    /// Requested number of columns. Zero is treated as one.
    fn col_span(&self) -> u32 {
        1
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &T {
    fn item_id(&self) -> ItemId {
        (**self).item_id()
    }

    fn col_span(&self) -> u32 {
        (**self).col_span()
    }
}

/// Plain layout item carrying only an id and a column-span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardItem {
    pub id: ItemId,
    #[serde(default = "default_col_span")]
    pub col_span: u32,
}

fn default_col_span() -> u32 {
    1
}

impl DashboardItem {
    /// Create an item spanning one column.
    pub fn new(id: u64) -> Self {
        Self::with_id(ItemId::new(id))
    }

    pub fn with_id(id: ItemId) -> Self {
        Self { id, col_span: 1 }
    }

    /// Set the requested column-span (clamped to at least one).
    pub fn with_col_span(mut self, col_span: u32) -> Self {
        self.col_span = col_span.max(1);
        self
    }
}

impl LayoutItem for DashboardItem {
    fn item_id(&self) -> ItemId {
        self.id
    }

    fn col_span(&self) -> u32 {
        self.col_span
    }
}

/// Where a single item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub item: ItemId,
    /// Zero-based row.
    pub row: usize,
    /// Zero-based first column.
    pub column: usize,
    /// Effective span, after capping to the column count.
    pub span: usize,
}

impl Placement {
    /// Columns covered by the item.
    pub fn columns(&self) -> Range<usize> {
        self.column..self.column + self.span
    }

    /// Whether the item covers the given cell.
    pub fn covers(&self, row: usize, column: usize) -> bool {
        self.row == row && self.columns().contains(&column)
    }
}

/// Cell-to-item assignment of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementMatrix {
    column_count: usize,
    rows: Vec<Vec<Option<ItemId>>>,
    placements: Vec<Placement>,
}

impl PlacementMatrix {
    /// Create an empty matrix with a fixed column count (at least one).
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count: column_count.max(1),
            rows: Vec::new(),
            placements: Vec::new(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether no item has been placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Item occupying a cell, if any.
    pub fn item_at(&self, row: usize, column: usize) -> Option<ItemId> {
        self.rows.get(row)?.get(column).copied().flatten()
    }

    /// Cells of one row.
    pub fn row(&self, row: usize) -> Option<&[Option<ItemId>]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<ItemId>]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Placements in item input order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement of an item.
    pub fn placement_of(&self, item: ItemId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.item == item)
    }

    /// Placements on a given row.
    pub fn placements_in_row(&self, row: usize) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter().filter(move |p| p.row == row)
    }

    /// Number of columns used on a row.
    pub fn used_columns(&self, row: usize) -> usize {
        self.row(row)
            .map_or(0, |cells| cells.iter().filter(|c| c.is_some()).count())
    }

    fn record(&mut self, placement: Placement) {
        while self.rows.len() <= placement.row {
            self.rows.push(vec![None; self.column_count]);
        }

        let cells = &mut self.rows[placement.row];
        for column in placement.columns() {
            debug_assert!(cells[column].is_none(), "cell already occupied");
            cells[column] = Some(placement.item);
        }

        self.placements.push(placement);
    }
}

/// Per-row heights of one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowHeights {
    heights: Vec<f32>,
}

impl RowHeights {
    pub fn new(heights: Vec<f32>) -> Self {
        Self { heights }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height of a row, zero if it does not exist.
    pub fn height(&self, row: usize) -> f32 {
        self.heights.get(row).copied().unwrap_or(0.0)
    }

    /// Offset of every row from the container top.
    pub fn positions(&self, gap: f32) -> Vec<f32> {
        let mut offset = 0.0;
        self.heights
            .iter()
            .map(|height| {
                let position = offset;
                offset += height + gap;
                position
            })
            .collect()
    }

    /// Height of all rows plus the gaps between them.
    pub fn total_height(&self, gap: f32) -> f32 {
        let gaps = self.heights.len().saturating_sub(1) as f32 * gap;
        self.heights.iter().sum::<f32>() + gaps
    }
}

/// Span actually used for a requested span on a grid of `column_count` columns.
pub(crate) fn effective_span(requested: u32, column_count: usize) -> usize {
    (requested.max(1) as usize).min(column_count.max(1))
}

/// Assign every item to a row and a column range.
pub fn place_items<I: LayoutItem>(items: &[I], column_count: usize) -> PlacementMatrix {
    let mut matrix = PlacementMatrix::new(column_count);
    let column_count = matrix.column_count();
    let (mut row, mut column) = (0usize, 0usize);

    for item in items {
        let span = effective_span(item.col_span(), column_count);

        // Not enough room left on this row, leave the rest of it empty.
        if column + span > column_count {
            row += 1;
            column = 0;
        }

        trace!(item = %item.item_id(), row, column, span, "Placing item");
        matrix.record(Placement {
            item: item.item_id(),
            row,
            column,
            span,
        });

        column += span;
        if column == column_count {
            row += 1;
            column = 0;
        }
    }

    debug!(
        items = items.len(),
        columns = column_count,
        rows = matrix.row_count(),
        "Placed items"
    );

    matrix
}

/// Size every row of a placement to its tallest item.
///
/// `items` must be the slice the matrix was built from.
pub fn measure_rows<I, M>(matrix: &PlacementMatrix, items: &[I], mut measure: M) -> RowHeights
where
    I: LayoutItem,
    M: MeasureItem<I>,
{
    debug_assert_eq!(matrix.placements().len(), items.len());

    let mut heights = vec![0.0f32; matrix.row_count()];
    for (placement, item) in matrix.placements().iter().zip(items) {
        let height = sanitize_height(measure.measure(item));
        let row_height = &mut heights[placement.row];
        *row_height = row_height.max(height);
    }

    RowHeights::new(heights)
}

/// Place items and measure the resulting rows in one go.
pub fn place_and_measure<I, M>(
    items: &[I],
    column_count: usize,
    measure: M,
) -> (PlacementMatrix, RowHeights)
where
    I: LayoutItem,
    M: MeasureItem<I>,
{
    let matrix = place_items(items, column_count);
    let row_heights = measure_rows(&matrix, items, measure);
    (matrix, row_heights)
}
