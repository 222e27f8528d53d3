//! Layout scenarios: an initial dashboard plus a script of layout-affecting events.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gridkit_layout::{
    CacheStats, DashboardItem, DashboardLayout, DashboardLayoutResult, HeightCache, ItemId,
    LayoutConfig, TrackPacking,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Scenario replayed when no file is given.
pub const DEFAULT_SCENARIO: &str = include_str!("../scenarios/dashboard.json");

/// Errors that can occur while loading or replaying a scenario.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Duplicate item: {0}")]
    DuplicateItem(ItemId),

    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

fn default_height() -> f32 {
    40.0
}

/// A dashboard and the events to replay on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: LayoutConfig,
    #[serde(default)]
    pub items: Vec<DashboardItem>,
    /// Natural height of items without an entry in `heights`.
    #[serde(default = "default_height")]
    pub default_height: f32,
    #[serde(default)]
    pub heights: HashMap<ItemId, f32>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let json = std::fs::read_to_string(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The built-in scenario.
    pub fn builtin() -> Result<Self, HarnessError> {
        Self::from_json(DEFAULT_SCENARIO)
    }
}

/// A layout-affecting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Step {
    Resize {
        width: f32,
    },
    SetMinColumnWidth {
        value: Option<f32>,
    },
    SetMaxColumnWidth {
        value: Option<f32>,
    },
    SetGap {
        value: Option<f32>,
    },
    SetPacking {
        packing: TrackPacking,
    },
    SetBaseUnit {
        value: f32,
    },
    /// Replace the whole configuration; the container width is kept when unset.
    SetConfig {
        config: LayoutConfig,
    },
    SetColSpan {
        item: ItemId,
        span: u32,
    },
    SetHeight {
        item: ItemId,
        height: f32,
    },
    AddItem {
        item: DashboardItem,
        #[serde(default)]
        index: Option<usize>,
    },
    RemoveItem {
        item: ItemId,
    },
    MoveItem {
        item: ItemId,
        index: usize,
    },
}

/// Layout after a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Zero for the initial layout, then one per step.
    pub step: usize,
    pub event: Option<Step>,
    pub layout: DashboardLayoutResult,
    /// Height cache activity of this frame's pass.
    pub cache: CacheStats,
}

/// Replays steps against a dashboard, standing in for the host application.
pub struct ScenarioRunner {
    layout: DashboardLayout,
    items: Vec<DashboardItem>,
    heights: HashMap<ItemId, f32>,
    default_height: f32,
    cache: HeightCache,
}

impl ScenarioRunner {
    pub fn new(scenario: &Scenario) -> Result<Self, HarnessError> {
        let mut runner = Self {
            layout: DashboardLayout::new(scenario.config.clone()),
            items: Vec::with_capacity(scenario.items.len()),
            heights: scenario.heights.clone(),
            default_height: scenario.default_height,
            cache: HeightCache::new(),
        };

        for item in &scenario.items {
            runner.insert_item(*item, None)?;
        }

        Ok(runner)
    }

    pub fn items(&self) -> &[DashboardItem] {
        &self.items
    }

    /// Apply one event. The layout is recomputed on the next [`Self::layout`] call.
    pub fn apply(&mut self, step: &Step) -> Result<(), HarnessError> {
        debug!(?step, "Applying step");

        match step {
            Step::Resize { width } => self.layout.set_container_width(*width),
            Step::SetMinColumnWidth { value } => self.layout.set_min_column_width(*value),
            Step::SetMaxColumnWidth { value } => self.layout.set_max_column_width(*value),
            Step::SetGap { value } => self.layout.set_gap(*value),
            Step::SetPacking { packing } => self.layout.set_packing(*packing),
            Step::SetBaseUnit { value } => self.layout.set_base_unit(*value),
            Step::SetConfig { config } => {
                let mut config = config.clone();
                if config.container_width == 0.0 {
                    config.container_width = self.layout.config().container_width;
                }
                self.layout.set_config(config);
            }
            Step::SetColSpan { item, span } => {
                let index = self.index_of(*item)?;
                self.items[index] = self.items[index].with_col_span(*span);
                self.layout.invalidate();
            }
            Step::SetHeight { item, height } => {
                self.index_of(*item)?;
                self.heights.insert(*item, *height);
                self.cache.invalidate(*item);
                self.layout.invalidate();
            }
            Step::AddItem { item, index } => self.insert_item(*item, *index)?,
            Step::RemoveItem { item } => {
                let index = self.index_of(*item)?;
                self.items.remove(index);
                self.cache.invalidate(*item);
                self.layout.invalidate();
            }
            Step::MoveItem { item, index } => {
                let from = self.index_of(*item)?;
                if *index >= self.items.len() {
                    return Err(HarnessError::IndexOutOfRange {
                        index: *index,
                        len: self.items.len(),
                    });
                }
                let moved = self.items.remove(from);
                self.items.insert(*index, moved);
                self.layout.invalidate();
            }
        }

        Ok(())
    }

    /// Run a layout pass over the current items.
    pub fn layout(&mut self) -> DashboardLayoutResult {
        self.cache.reset_stats();
        let heights = &self.heights;
        let default_height = self.default_height;
        let measure = self.cache.measure_with(|item: &DashboardItem| {
            heights.get(&item.id).copied().unwrap_or(default_height)
        });
        self.layout.layout(&self.items, measure).clone()
    }

    /// Cache activity since the last pass started.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn index_of(&self, item: ItemId) -> Result<usize, HarnessError> {
        self.items
            .iter()
            .position(|candidate| candidate.id == item)
            .ok_or(HarnessError::UnknownItem(item))
    }

    fn insert_item(&mut self, item: DashboardItem, index: Option<usize>) -> Result<(), HarnessError> {
        if self.index_of(item.id).is_ok() {
            return Err(HarnessError::DuplicateItem(item.id));
        }

        let item = item.with_col_span(item.col_span);
        match index {
            Some(index) if index > self.items.len() => {
                return Err(HarnessError::IndexOutOfRange {
                    index,
                    len: self.items.len(),
                });
            }
            Some(index) => self.items.insert(index, item),
            None => self.items.push(item),
        }

        self.layout.invalidate();
        Ok(())
    }
}

/// Replay a scenario, returning the initial layout and the layout after every step.
pub fn run_scenario(scenario: &Scenario) -> Result<Vec<Frame>, HarnessError> {
    let mut runner = ScenarioRunner::new(scenario)?;
    let mut frames = Vec::with_capacity(scenario.steps.len() + 1);

    let layout = runner.layout();
    frames.push(Frame {
        step: 0,
        event: None,
        layout,
        cache: runner.cache_stats(),
    });

    for (i, step) in scenario.steps.iter().enumerate() {
        runner.apply(step)?;
        let layout = runner.layout();
        frames.push(Frame {
            step: i + 1,
            event: Some(step.clone()),
            layout,
            cache: runner.cache_stats(),
        });
    }

    let measured: usize = frames.iter().map(|frame| frame.cache.stores).sum();
    let cache_hits: usize = frames.iter().map(|frame| frame.cache.hits).sum();
    info!(
        frames = frames.len(),
        measured,
        cache_hits,
        "Scenario replayed"
    );

    Ok(frames)
}
