//! Integration tests for the dashboard layout engine.
//!
//! ## Test Categories
//!
//! - `dashboard_layout`: columns, placement and geometry for a two-item dashboard
//! - `mutations`: item list changes between passes
//! - `properties`: generated-input invariants

mod properties;
