//! Pixel geometry of a layout pass.

use serde::{Deserialize, Serialize};

use crate::placement::{ItemId, PlacementMatrix, RowHeights};
use crate::tracks::ColumnSet;

/// A rectangle in container coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the two rectangles share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Geometry of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemGeometry {
    pub item: ItemId,
    pub row: usize,
    pub column: usize,
    pub span: usize,
    pub rect: Rect,
}

/// Item rectangles and content size of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    items: Vec<ItemGeometry>,
    content_width: f32,
    content_height: f32,
}

impl GridGeometry {
    /// Item geometries in input order.
    pub fn items(&self) -> &[ItemGeometry] {
        &self.items
    }

    /// Rectangle of an item.
    pub fn rect_of(&self, item: ItemId) -> Option<Rect> {
        self.items.iter().find(|g| g.item == item).map(|g| g.rect)
    }

    /// Width of the columns and gaps, which may exceed the container when it overflows.
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Height of the rows and gaps.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }
}

/// Lay every placed item out in pixels.
///
/// The gap separates both columns and rows. Items stretch to the height of their row.
pub fn compute_geometry(
    columns: &ColumnSet,
    rows: &RowHeights,
    matrix: &PlacementMatrix,
    gap: f32,
) -> GridGeometry {
    let column_positions = columns.positions(gap);
    let row_positions = rows.positions(gap);

    let items = matrix
        .placements()
        .iter()
        .map(|placement| {
            let x = column_positions
                .get(placement.column)
                .copied()
                .unwrap_or(0.0);
            let y = row_positions.get(placement.row).copied().unwrap_or(0.0);
            let width = columns.span_width(placement.column, placement.span, gap);
            let height = rows.height(placement.row);

            ItemGeometry {
                item: placement.item,
                row: placement.row,
                column: placement.column,
                span: placement.span,
                rect: Rect::new(x, y, width, height),
            }
        })
        .collect();

    GridGeometry {
        items,
        content_width: columns.total_width(gap),
        content_height: rows.total_height(gap),
    }
}
