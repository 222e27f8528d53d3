//! Layout configuration.
//!
//! Column-width bounds and the gap are optional: an unset (or unusable) value falls
//! back to a default expressed in multiples of the base unit (`1rem`), which is
//! resolved to pixels whenever the configuration is resolved for a pass.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::LayoutError;

/// Pixel size of `1rem` when the host does not provide one.
pub const DEFAULT_BASE_UNIT: f32 = 16.0;

/// Default minimum column width, in base units.
pub const DEFAULT_MIN_COLUMN_WIDTH_REM: f32 = 25.0;

/// Default gap between rows and columns, in base units.
pub const DEFAULT_GAP_REM: f32 = 1.0;

/// How the column count is derived from the column-width bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackPacking {
    /// Count columns using the minimum width, then cap each column at the maximum.
    /// The count is never re-derived from the capped width.
    #[default]
    MinimumWidth,
    /// Count columns using the maximum width when one is set, like
    /// `repeat(auto-fill, minmax(min, max))`, then share the space up to the maximum.
    AutoFill,
}

/// Configuration of a dashboard layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum column width in pixels (`None` = 25rem).
    pub min_column_width: Option<f32>,
    /// Maximum column width in pixels (`None` = unbounded).
    pub max_column_width: Option<f32>,
    /// Gap between rows and columns in pixels (`None` = 1rem).
    pub gap: Option<f32>,
    /// Width of the container in pixels.
    pub container_width: f32,
    /// Pixel size of `1rem`.
    pub base_unit: f32,
    /// Column packing policy.
    pub packing: TrackPacking,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_column_width: None,
            max_column_width: None,
            gap: None,
            container_width: 0.0,
            base_unit: DEFAULT_BASE_UNIT,
            packing: TrackPacking::default(),
        }
    }
}

/// Track sizing inputs with every default resolved to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTrackConfig {
    pub min_column_width: f32,
    /// Always `>= min_column_width` when set.
    pub max_column_width: Option<f32>,
    pub gap: f32,
    pub packing: TrackPacking,
}

impl LayoutConfig {
    /// Start building a validated configuration.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::new()
    }

    /// The base unit, or the default one if the configured value is unusable.
    pub fn resolved_base_unit(&self) -> f32 {
        positive(self.base_unit).unwrap_or(DEFAULT_BASE_UNIT)
    }

    /// Minimum column width in pixels after applying the default.
    pub fn resolved_min_column_width(&self) -> f32 {
        self.min_column_width
            .and_then(positive)
            .unwrap_or(DEFAULT_MIN_COLUMN_WIDTH_REM * self.resolved_base_unit())
    }

    /// Gap in pixels after applying the default. Zero is a valid gap.
    pub fn resolved_gap(&self) -> f32 {
        self.gap
            .and_then(non_negative)
            .unwrap_or(DEFAULT_GAP_REM * self.resolved_base_unit())
    }

    /// Container width in pixels; negative or non-finite widths count as zero.
    pub fn resolved_container_width(&self) -> f32 {
        sanitize_container_width(self.container_width)
    }

    /// Resolve the inputs of the track sizer.
    ///
    /// A maximum below the minimum is raised to the minimum, the way `minmax()`
    /// treats an inverted range.
    pub fn resolve_tracks(&self) -> ResolvedTrackConfig {
        let min_column_width = self.resolved_min_column_width();
        let max_column_width = self.max_column_width.and_then(positive).map(|max| {
            if max < min_column_width {
                warn!(
                    min = min_column_width,
                    max, "Maximum column width below minimum, raising it to the minimum"
                );
            }
            max.max(min_column_width)
        });

        ResolvedTrackConfig {
            min_column_width,
            max_column_width,
            gap: self.resolved_gap(),
            packing: self.packing,
        }
    }
}

/// Builder for a [`LayoutConfig`] that rejects invalid values instead of clamping them.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfigBuilder {
    config: LayoutConfig,
}

impl LayoutConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    /// Set the minimum column width in pixels.
    pub fn min_column_width(mut self, width: f32) -> Self {
        self.config.min_column_width = Some(width);
        self
    }

    /// Set the maximum column width in pixels.
    pub fn max_column_width(mut self, width: f32) -> Self {
        self.config.max_column_width = Some(width);
        self
    }

    /// Set the gap in pixels.
    pub fn gap(mut self, gap: f32) -> Self {
        self.config.gap = Some(gap);
        self
    }

    /// Set the initial container width in pixels.
    pub fn container_width(mut self, width: f32) -> Self {
        self.config.container_width = width;
        self
    }

    /// Set the pixel size of `1rem`.
    pub fn base_unit(mut self, base_unit: f32) -> Self {
        self.config.base_unit = base_unit;
        self
    }

    /// Set the column packing policy.
    pub fn packing(mut self, packing: TrackPacking) -> Self {
        self.config.packing = packing;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<LayoutConfig, LayoutError> {
        let config = self.config;

        require("base_unit", config.base_unit, positive)?;
        require("container_width", config.container_width, non_negative)?;
        if let Some(min) = config.min_column_width {
            require("min_column_width", min, positive)?;
        }
        if let Some(max) = config.max_column_width {
            require("max_column_width", max, positive)?;
        }
        if let Some(gap) = config.gap {
            require("gap", gap, non_negative)?;
        }
        if let (Some(min), Some(max)) = (config.min_column_width, config.max_column_width) {
            if min > max {
                return Err(LayoutError::InvalidColumnBounds { min, max });
            }
        }

        Ok(config)
    }
}

fn require(
    field: &'static str,
    value: f32,
    check: fn(f32) -> Option<f32>,
) -> Result<f32, LayoutError> {
    check(value).ok_or(LayoutError::InvalidValue { field, value })
}

pub(crate) fn positive(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0).then_some(value)
}

pub(crate) fn non_negative(value: f32) -> Option<f32> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

pub(crate) fn sanitize_container_width(width: f32) -> f32 {
    non_negative(width).unwrap_or(0.0)
}

/// Normalise a width setter value, logging when it has to fall back to the default.
pub(crate) fn sanitize_width_setting(field: &'static str, value: Option<f32>) -> Option<f32> {
    match value {
        Some(v) if positive(v).is_none() => {
            warn!(field, value = v, "Ignoring non-positive width, using default");
            None
        }
        other => other,
    }
}

/// Normalise a base unit setter value, logging when it has to fall back to the default.
pub(crate) fn sanitize_base_unit(value: f32) -> f32 {
    positive(value).unwrap_or_else(|| {
        warn!(value, "Ignoring non-positive base unit, using default");
        DEFAULT_BASE_UNIT
    })
}

/// Normalise a gap setter value, logging when it has to fall back to the default.
pub(crate) fn sanitize_gap_setting(value: Option<f32>) -> Option<f32> {
    match value {
        Some(v) if non_negative(v).is_none() => {
            warn!(value = v, "Ignoring negative gap, using default");
            None
        }
        other => other,
    }
}
