//! Tunable constants for a designer session.
//!
//! Everything here is fixed for the lifetime of a session. Hosts may override
//! individual fields by handing a partial JSON/TOML object to serde; missing
//! fields fall back to [`DesignerConfig::default`].

use crate::model::ZoneBounds;
use serde::{Deserialize, Serialize};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Garment canvas size. The zone is centered inside it. Default: 500×500.
    pub canvas: ZoneBounds,

    /// Placement zone size. Default: 250×350.
    pub zone: ZoneBounds,

    /// Largest initial dimension of a freshly uploaded element. Default: **120**.
    pub max_initial_dimension: f32,

    /// Resize floor as a fraction of the original upload width. Default: **0.15**.
    pub min_scale: f32,

    /// Offset applied to both axes of a duplicate. Default: **20**.
    pub duplicate_offset: f32,

    /// Radius of the delete/duplicate/resize handles around a selected element.
    pub handle_radius: f32,

    /// Zone units per physical inch, for the size readout. Default: **10**.
    pub units_per_inch: f32,

    pub palette: PaletteConfig,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            canvas: ZoneBounds::new(500.0, 500.0),
            zone: ZoneBounds::new(250.0, 350.0),
            max_initial_dimension: 120.0,
            min_scale: 0.15,
            duplicate_offset: 20.0,
            handle_radius: 12.0,
            units_per_inch: 10.0,
            palette: PaletteConfig::default(),
        }
    }
}

impl DesignerConfig {
    /// Top-left corner of the zone in canvas coordinates.
    pub fn zone_origin(&self) -> (f32, f32) {
        (
            (self.canvas.width - self.zone.width) / 2.0,
            (self.canvas.height - self.zone.height) / 2.0,
        )
    }
}

/// Dominant-color sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteConfig {
    /// Side of the square grid the image is resampled onto. Default: 50.
    pub grid: u32,
    /// Only every `stride`-th grid sample is counted. Default: 4.
    pub stride: usize,
    /// Channel bucket width. Default: 32.
    pub quantize_step: u8,
    /// Samples with alpha at or below this are ignored. Default: 128.
    pub alpha_threshold: u8,
    /// Number of colors kept. Default: 6.
    pub max_colors: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            grid: 50,
            stride: 4,
            quantize_step: 32,
            alpha_threshold: 128,
            max_colors: 6,
        }
    }
}
