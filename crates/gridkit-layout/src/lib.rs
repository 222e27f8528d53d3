//! # GridKit Layout
//!
//! Responsive grid layout engine for dashboard-style containers.
//!
//! ## Overview
//!
//! A dashboard lays its items out in equal-width columns whose count follows the
//! container width. Every layout pass runs the same pipeline:
//!
//! 1. **Track sizing** ([`tracks`]): pick the column count and column width from the
//!    container width, the column-width bounds and the gap.
//! 2. **Cell placement** ([`placement`]): assign every item, in order, to a row and a
//!    column range, capping column-spans to the available columns.
//! 3. **Row measurement** ([`measure`]): ask the host for each item's natural height and
//!    size every row to its tallest item.
//! 4. **Geometry** ([`geometry`]): turn the above into pixel rectangles.
//!
//! [`DashboardLayout`] owns the configuration and the latest pass and is what hosts
//! normally talk to. The free functions are pure and can be used on their own.
//!
//! ## Example
//!
//! ```
//! use gridkit_layout::{DashboardItem, DashboardLayout, FixedHeight, LayoutConfig};
//!
//! let mut dashboard = DashboardLayout::new(LayoutConfig {
//!     min_column_width: Some(100.0),
//!     gap: Some(0.0),
//!     container_width: 250.0,
//!     ..LayoutConfig::default()
//! });
//!
//! let items = [DashboardItem::new(0), DashboardItem::new(1)];
//! let layout = dashboard.layout(&items, FixedHeight(50.0));
//!
//! assert_eq!(layout.columns.widths(), &[125.0, 125.0]);
//! assert_eq!(layout.row_heights.heights(), &[50.0]);
//! ```

pub mod config;
pub mod dashboard;
pub mod geometry;
pub mod measure;
pub mod placement;
pub mod tracks;

pub use config::{
    LayoutConfig, LayoutConfigBuilder, ResolvedTrackConfig, TrackPacking, DEFAULT_BASE_UNIT,
    DEFAULT_GAP_REM, DEFAULT_MIN_COLUMN_WIDTH_REM,
};
pub use dashboard::{compute_layout, DashboardLayout, DashboardLayoutResult};
pub use geometry::{compute_geometry, GridGeometry, ItemGeometry, Rect};
pub use measure::{CacheStats, CachedMeasure, FixedHeight, HeightCache, MeasureItem};
pub use placement::{
    measure_rows, place_and_measure, place_items, DashboardItem, ItemId, LayoutItem, Placement,
    PlacementMatrix, RowHeights,
};
pub use tracks::{compute_columns, compute_columns_with, ColumnSet};

use thiserror::Error;

/// Errors that can occur while building a layout configuration.
///
/// Layout passes themselves never fail; invalid runtime values are clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid column bounds: minimum {min}px exceeds maximum {max}px")]
    InvalidColumnBounds { min: f32, max: f32 },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Tolerance used when comparing accumulated pixel sizes.
pub(crate) const LAYOUT_EPSILON: f32 = 1e-3;
