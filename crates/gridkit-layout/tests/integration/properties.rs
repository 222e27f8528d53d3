//! Layout invariants over generated inputs.

use std::collections::HashSet;

use gridkit_layout::{
    compute_columns, compute_columns_with, compute_layout, place_items, DashboardItem,
    FixedHeight, ItemId, LayoutConfig, ResolvedTrackConfig, TrackPacking,
};
use proptest::prelude::*;

fn spans() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..8, 0..40)
}

fn packings() -> impl Strategy<Value = TrackPacking> {
    prop_oneof![Just(TrackPacking::MinimumWidth), Just(TrackPacking::AutoFill)]
}

fn items_from(spans: &[u32]) -> Vec<DashboardItem> {
    spans
        .iter()
        .enumerate()
        .map(|(i, span)| DashboardItem {
            id: ItemId::new(i as u64),
            col_span: *span,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_at_least_one_column(
        width in 0.0f32..5000.0,
        min in 1.0f32..800.0,
        gap in 0.0f32..64.0,
    ) {
        let columns = compute_columns(width, Some(min), None, Some(gap));
        prop_assert!(!columns.is_empty());
    }

    #[test]
    fn prop_width_conserved_without_maximum(
        min in 10.0f32..800.0,
        extra in 0.0f32..4000.0,
        gap in 0.0f32..64.0,
    ) {
        let width = min + extra;
        let columns = compute_columns(width, Some(min), None, Some(gap));
        let total = columns.total_width(gap);
        prop_assert!((total - width).abs() <= 1e-3 + width * 1e-4, "{} != {}", total, width);
        prop_assert!(columns.iter().all(|w| w >= min - 1e-3));
    }

    #[test]
    fn prop_bounds_respected(
        width in 0.0f32..5000.0,
        min in 1.0f32..400.0,
        spread in 0.0f32..400.0,
        gap in 0.0f32..64.0,
        packing in packings(),
    ) {
        let max = min + spread;
        let tracks = ResolvedTrackConfig {
            min_column_width: min,
            max_column_width: Some(max),
            gap,
            packing,
        };
        let columns = compute_columns_with(&tracks, width);

        prop_assert!(!columns.is_empty());
        prop_assert!(columns.iter().all(|w| w >= min && w <= max), "{:?}", columns);
        if columns.len() > 1 {
            prop_assert!(columns.total_width(gap) <= width + 1e-3 + width * 1e-4);
        }
    }

    #[test]
    fn prop_auto_fill_without_maximum_fills_width(
        min in 10.0f32..800.0,
        extra in 0.0f32..4000.0,
        gap in 0.0f32..64.0,
    ) {
        let width = min + extra;
        let tracks = ResolvedTrackConfig {
            min_column_width: min,
            max_column_width: None,
            gap,
            packing: TrackPacking::AutoFill,
        };
        let columns = compute_columns_with(&tracks, width);
        let total = columns.total_width(gap);
        prop_assert!((total - width).abs() <= 1e-3 + width * 1e-4, "{} != {}", total, width);
    }

    #[test]
    fn prop_spans_capped(spans in spans(), column_count in 1usize..6) {
        let items = items_from(&spans);
        let matrix = place_items(&items, column_count);

        for (placement, requested) in matrix.placements().iter().zip(&spans) {
            let expected = (*requested).max(1).min(column_count as u32) as usize;
            prop_assert_eq!(placement.span, expected);
        }
    }

    #[test]
    fn prop_items_placed_once_without_overlap(spans in spans(), column_count in 1usize..6) {
        let items = items_from(&spans);
        let matrix = place_items(&items, column_count);

        prop_assert_eq!(matrix.placements().len(), items.len());

        let mut seen = HashSet::new();
        for placement in matrix.placements() {
            prop_assert!(placement.column + placement.span <= column_count);
            for column in placement.columns() {
                prop_assert!(seen.insert((placement.row, column)), "cell used twice");
                prop_assert_eq!(matrix.item_at(placement.row, column), Some(placement.item));
            }
        }

        for row in 0..matrix.row_count() {
            prop_assert!(matrix.used_columns(row) <= column_count);
            prop_assert!(matrix.used_columns(row) > 0, "rows are never empty");
        }
    }

    #[test]
    fn prop_order_preserved(spans in spans(), column_count in 1usize..6) {
        let items = items_from(&spans);
        let matrix = place_items(&items, column_count);

        let cells: Vec<(usize, usize)> = matrix
            .placements()
            .iter()
            .map(|p| (p.row, p.column))
            .collect();
        prop_assert!(cells.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_layout_is_stable(
        spans in spans(),
        width in 0.0f32..3000.0,
        min in 50.0f32..500.0,
        gap in 0.0f32..32.0,
    ) {
        let items = items_from(&spans);
        let config = LayoutConfig {
            min_column_width: Some(min),
            gap: Some(gap),
            container_width: width,
            ..LayoutConfig::default()
        };

        let first = compute_layout(&config, &items, FixedHeight(30.0));
        let second = compute_layout(&config, &items, FixedHeight(30.0));
        prop_assert_eq!(first, second);
    }
}
