//! Custom assertions for layout integration tests.

use gridkit_layout::DashboardLayoutResult;

use super::TestDashboard;

/// Assert the cell layout of a dashboard.
///
/// `expected` holds one slice of item ids per row. A row shorter than the column
/// count expects its trailing cells to be empty.
///
/// ```text
/// [
///  [0, 0],
///  [1],
/// ]
/// ```
///
/// is a two-column grid where `item-0` spans the first row and `item-1` sits alone
/// in the first cell of the second row.
#[track_caller]
pub fn assert_layout(dashboard: &mut TestDashboard, expected: &[&[u64]]) {
    let result = dashboard.layout();
    assert_result_layout(&result, expected);
}

/// Same as [`assert_layout`] on an existing result.
#[track_caller]
pub fn assert_result_layout(result: &DashboardLayoutResult, expected: &[&[u64]]) {
    let expected_columns = expected.iter().map(|row| row.len()).max().unwrap_or(0);

    assert_eq!(
        result.row_count(),
        expected.len(),
        "Row count mismatch: expected {}, got {} ({:?})",
        expected.len(),
        result.row_count(),
        result.row_heights
    );
    assert_eq!(
        result.column_count(),
        expected_columns,
        "Column count mismatch: expected {}, got {} ({:?})",
        expected_columns,
        result.column_count(),
        result.columns
    );

    for (row, cells) in expected.iter().enumerate() {
        for column in 0..result.column_count() {
            let actual = result.item_at(row, column).map(|id| id.raw());
            let wanted = cells.get(column).copied();
            assert_eq!(
                actual, wanted,
                "Cell ({row}, {column}): expected {wanted:?}, got {actual:?}"
            );
        }
    }
}

/// Assert that pixel sizes match within a small tolerance.
#[track_caller]
pub fn assert_sizes(actual: &[f32], expected: &[f32]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Size count mismatch: expected {expected:?}, got {actual:?}"
    );
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).abs() < 1e-3,
            "Size mismatch: expected {expected:?}, got {actual:?}"
        );
    }
}

/// Assert that no two item rectangles overlap.
#[track_caller]
pub fn assert_no_overlap(result: &DashboardLayoutResult) {
    let items = result.geometry.items();
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            assert!(
                !a.rect.intersects(&b.rect) || a.rect.height == 0.0 || b.rect.height == 0.0,
                "{} {:?} overlaps {} {:?}",
                a.item,
                a.rect,
                b.item,
                b.rect
            );
        }
    }
}
