//! Canvas configuration
//!
//! Every field has a default, so an empty YAML/JSON document (or a partial
//! one) yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Explicit page dimensions in CSS pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Settings handed to the host pan/zoom script
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PanSettings {
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_drag: bool,
    /// Zoom factor per wheel step
    pub zoom_scale: f64,
}

impl Default for PanSettings {
    fn default() -> Self {
        Self {
            enable_pan: true,
            enable_zoom: true,
            enable_drag: true,
            zoom_scale: 0.8,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    /// Fraction of the page height used by the canvas
    pub height_fraction: f64,

    /// Edge length of the component marker square, in px
    pub component_size: f64,

    /// Factor applied to GAF coordinates on import (both axes)
    pub import_scale: f64,

    /// Components with this symbol basename are skipped on import
    pub title_block_basename: String,

    pub pan: PanSettings,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            height_fraction: 0.8,
            component_size: 7.0,
            import_scale: 1.0 / 100.0,
            title_block_basename: "title-B.sym".to_string(),
            pan: PanSettings::default(),
        }
    }
}

impl CanvasConfig {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Canvas pixel dimensions for a page: full width, a fraction of the height
    pub fn canvas_size(&self, page: PageSize) -> (f64, f64) {
        (page.width, page.height * self.height_fraction)
    }
}
