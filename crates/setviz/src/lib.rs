#![forbid(unsafe_code)]

//! `setviz` partitions two or three sets into their Venn regions, evaluates a set operation over
//! them and lays the regions out as a canonical two- or three-circle diagram.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`setviz::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use setviz_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use setviz_render::geometry::{Circle, GeometryConfig, Point, Rgba};
    pub use setviz_render::model::{LabelLine, RegionLabelLayout, VennLayout};
    pub use setviz_render::svg::SvgRenderOptions;
    pub use setviz_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use setviz_render::{LayoutOptions, layout_calculation};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Compute(#[from] setviz_core::Error),
        #[error(transparent)]
        Render(#[from] setviz_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Computes `request` and lays out its diagram.
    pub fn layout_request_sync(
        request: &setviz_core::CalculateRequest,
        layout_options: &LayoutOptions,
    ) -> Result<(setviz_core::Calculation, VennLayout)> {
        let calc = setviz_core::compute(request)?;
        let layout = setviz_render::layout_calculation(&calc, layout_options)?;
        Ok((calc, layout))
    }

    pub fn render_layout_svg(layout: &VennLayout, svg_options: &SvgRenderOptions) -> String {
        setviz_render::svg::render_layout_svg(layout, svg_options)
    }

    /// Computes `request` and renders its diagram to SVG.
    pub fn render_svg_sync(
        request: &setviz_core::CalculateRequest,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let (_, layout) = layout_request_sync(request, layout_options)?;
        Ok(render_layout_svg(&layout, svg_options))
    }

    /// Bundles layout and SVG options for hosts that re-render on every "calculate" action.
    ///
    /// Holds no state derived from previous requests.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub layout_options: LayoutOptions,
        pub svg_options: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn from_config(config: &setviz_core::VennConfig) -> Result<Self> {
            Ok(Self {
                layout_options: LayoutOptions::from_config(config)?,
                svg_options: SvgRenderOptions::default(),
            })
        }

        pub fn with_svg_options(mut self, svg_options: SvgRenderOptions) -> Self {
            self.svg_options = svg_options;
            self
        }

        pub fn layout(
            &self,
            request: &setviz_core::CalculateRequest,
        ) -> Result<(setviz_core::Calculation, VennLayout)> {
            layout_request_sync(request, &self.layout_options)
        }

        pub fn render_svg(&self, request: &setviz_core::CalculateRequest) -> Result<String> {
            render_svg_sync(request, &self.layout_options, &self.svg_options)
        }
    }

}
