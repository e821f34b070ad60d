#![forbid(unsafe_code)]

//! Headless Venn diagram layout and SVG rendering.
//!
//! The pipeline is `Calculation -> VennLayout -> SVG`: [`layout_calculation`] places circles and
//! wrapped region text for a canvas, [`svg::render_layout_svg`] turns the result into markup.

pub mod geometry;
pub mod model;
pub mod svg;
pub mod text;

use crate::geometry::{GeometryConfig, layout_geometry};
use crate::model::{Bounds, RegionLabelLayout, VennLayout};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle, wrap_region_label};
use setviz_core::{Calculation, RegionMap, VennConfig};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_CANVAS_WIDTH: f64 = 1000.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub geometry: GeometryConfig,
    pub label_style: TextStyle,
    pub title_style: TextStyle,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            geometry: GeometryConfig::default(),
            label_style: TextStyle::region_label(),
            title_style: TextStyle::set_title(),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("canvas_width", &self.canvas_width)
            .field("canvas_height", &self.canvas_height)
            .field("geometry", &self.geometry)
            .field("label_style", &self.label_style)
            .field("title_style", &self.title_style)
            .finish_non_exhaustive()
    }
}

impl LayoutOptions {
    /// Reads `canvas.width`, `canvas.height`, `text.fontFamily`, `text.labelFontSize`,
    /// `text.titleFontSize` and `geometry.*` from `config`, keeping defaults for anything unset.
    pub fn from_config(config: &VennConfig) -> Result<Self> {
        let mut options = Self {
            geometry: GeometryConfig::from_venn_config(config)?,
            ..Self::default()
        };
        if let Some(w) = config.get_f64("canvas.width") {
            options.canvas_width = w;
        }
        if let Some(h) = config.get_f64("canvas.height") {
            options.canvas_height = h;
        }
        if let Some(family) = config.get_str("text.fontFamily") {
            options.label_style.font_family = Some(family.to_string());
            options.title_style.font_family = Some(family.to_string());
        }
        if let Some(size) = config.get_f64("text.labelFontSize") {
            options.label_style.font_size = size;
        }
        if let Some(size) = config.get_f64("text.titleFontSize") {
            options.title_style.font_size = size;
        }
        options.validate()?;
        Ok(options)
    }

    pub fn with_canvas_size(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("canvas.width", self.canvas_width),
            ("canvas.height", self.canvas_height),
            ("text.labelFontSize", self.label_style.font_size),
            ("text.titleFontSize", self.title_style.font_size),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be a positive number, got {v}"),
                });
            }
        }
        self.geometry.validate()
    }
}

/// Lays out a finished calculation.
pub fn layout_calculation(calc: &Calculation, options: &LayoutOptions) -> Result<VennLayout> {
    layout_regions(calc.set_count.get(), &calc.regions, options)
}

/// Lays out `regions` as a `set_count`-circle diagram. Counts without a canonical arrangement
/// yield a layout with no circles and no labels.
pub fn layout_regions(
    set_count: usize,
    regions: &RegionMap,
    options: &LayoutOptions,
) -> Result<VennLayout> {
    options.validate()?;

    let geometry = layout_geometry(
        set_count,
        options.canvas_width,
        options.canvas_height,
        &options.geometry,
    );

    let mut labels = Vec::new();
    for (region, elements) in regions.non_empty() {
        let Some(anchor) = geometry.anchor(region) else {
            continue;
        };
        let lines = wrap_region_label(
            elements,
            anchor,
            options.text_measurer.as_ref(),
            &options.label_style,
        );
        labels.push(RegionLabelLayout {
            region,
            anchor,
            element_count: elements.len(),
            lines,
        });
    }

    tracing::debug!(
        set_count,
        circles = geometry.circles.len(),
        labelled_regions = labels.len(),
        "laid out venn diagram"
    );

    Ok(VennLayout {
        set_count,
        bounds: Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: options.canvas_width,
            max_y: options.canvas_height,
        },
        center: geometry.center,
        circles: geometry.circles,
        anchors: geometry.anchors,
        labels,
        title_style: options.title_style.clone(),
        label_style: options.label_style.clone(),
    })
}
