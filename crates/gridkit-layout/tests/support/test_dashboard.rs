//! TestDashboard - dashboard layout wrapper for integration tests.

use gridkit_layout::{
    DashboardItem, DashboardLayout, DashboardLayoutResult, ItemId, LayoutConfig, Rect,
    TrackPacking,
};

/// Height given to every item unless a test overrides it.
pub const DEFAULT_ITEM_HEIGHT: f32 = 40.0;

/// A dashboard with `item-0 .. item-n` children.
///
/// Reads always run a fresh layout pass, the way the host would after a frame.
pub struct TestDashboard {
    layout: DashboardLayout,
    items: Vec<DashboardItem>,
    heights: Vec<f32>,
}

impl TestDashboard {
    /// Dashboard with fixed 100px columns, no gap, wide enough for every item on one row.
    pub fn new(item_count: usize) -> Self {
        Self::with_column_width(item_count, 100.0)
    }

    pub fn with_column_width(item_count: usize, column_width: f32) -> Self {
        let config = LayoutConfig {
            min_column_width: Some(column_width),
            max_column_width: Some(column_width),
            gap: Some(0.0),
            container_width: column_width * item_count as f32,
            ..LayoutConfig::default()
        };
        Self::with_config(config, item_count)
    }

    pub fn with_config(config: LayoutConfig, item_count: usize) -> Self {
        super::init_tracing();

        Self {
            layout: DashboardLayout::new(config),
            items: (0..item_count as u64).map(DashboardItem::new).collect(),
            heights: vec![DEFAULT_ITEM_HEIGHT; item_count],
        }
    }

    pub fn set_width(&mut self, width: f32) {
        self.layout.set_container_width(width);
    }

    pub fn set_min_column_width(&mut self, width: Option<f32>) {
        self.layout.set_min_column_width(width);
    }

    pub fn set_max_column_width(&mut self, width: Option<f32>) {
        self.layout.set_max_column_width(width);
    }

    pub fn set_gap(&mut self, gap: Option<f32>) {
        self.layout.set_gap(gap);
    }

    pub fn set_packing(&mut self, packing: TrackPacking) {
        self.layout.set_packing(packing);
    }

    /// Set the column-span of the item at `index` in the current order.
    pub fn set_colspan(&mut self, index: usize, span: u32) {
        self.items[index] = self.items[index].with_col_span(span);
        self.layout.invalidate();
    }

    /// Set the natural height of an item by id.
    pub fn set_height(&mut self, id: u64, height: f32) {
        self.heights[id as usize] = height;
        self.layout.invalidate();
    }

    /// Append a new item and return its id.
    pub fn push_item(&mut self) -> u64 {
        let id = self.heights.len() as u64;
        self.items.push(DashboardItem::new(id));
        self.heights.push(DEFAULT_ITEM_HEIGHT);
        self.layout.invalidate();
        id
    }

    /// Remove an item by id.
    pub fn remove_item(&mut self, id: u64) {
        self.items.retain(|item| item.id.raw() != id);
        self.layout.invalidate();
    }

    /// Move the item at `from` to position `to`.
    pub fn move_item(&mut self, from: usize, to: usize) {
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.layout.invalidate();
    }

    pub fn items(&self) -> &[DashboardItem] {
        &self.items
    }

    pub fn engine(&self) -> &DashboardLayout {
        &self.layout
    }

    /// Run a layout pass and return its result.
    pub fn layout(&mut self) -> DashboardLayoutResult {
        let heights = &self.heights;
        self.layout
            .layout(&self.items, |item: &DashboardItem| {
                heights[item.id.raw() as usize]
            })
            .clone()
    }

    pub fn column_widths(&mut self) -> Vec<f32> {
        self.layout().columns.widths().to_vec()
    }

    pub fn row_heights(&mut self) -> Vec<f32> {
        self.layout().row_heights.heights().to_vec()
    }

    /// Id of the item rendered in a cell.
    pub fn element_at(&mut self, row: usize, column: usize) -> Option<u64> {
        self.layout().item_at(row, column).map(|id| id.raw())
    }

    /// Rectangle of an item by id.
    pub fn rect(&mut self, id: u64) -> Rect {
        self.layout()
            .item_rect(ItemId::new(id))
            .unwrap_or_else(|| panic!("item-{id} has no geometry"))
    }
}
