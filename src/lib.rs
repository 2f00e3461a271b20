//! Stacked-panel charts for seasonal-trend decompositions
//!
//! A [`DecompositionResult`] is bucketed onto a shared time index
//! ([`align`]), composed into an immutable five-panel [`CompositeFigure`]
//! ([`chart::compose`]) and rasterized to PNG ([`chart::export_png`]).
//! [`render`] runs all three steps.

pub mod align;
pub mod chart;
pub mod decompose;
pub mod error;
pub mod input;

use std::path::{Path, PathBuf};

pub use align::{AlignedChannels, Channel, ChannelSeries, Granularity, align};
pub use chart::{CompositeFigure, ExportSize, Panel, RendererKind, compose};
pub use decompose::{DecompositionResult, decompose_additive};
pub use error::Error;

pub const DEFAULT_TITLE: &str = "Seasonal Decomposition";
pub const DEFAULT_DESTINATION: &str = "stl-decomposition.png";

/// Title, bucketing and output settings for [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub granularity: Granularity,
    pub destination: PathBuf,
    pub size: ExportSize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            granularity: Granularity::default(),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            size: ExportSize::FILE,
        }
    }
}

impl RenderOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn destination(mut self, destination: impl AsRef<Path>) -> Self {
        self.destination = destination.as_ref().to_path_buf();
        self
    }

    pub fn size(mut self, size: ExportSize) -> Self {
        self.size = size;
        self
    }
}

/// Align and compose `result` without exporting it.
pub fn build_figure(
    result: &DecompositionResult,
    options: &RenderOptions,
) -> Result<CompositeFigure, Error> {
    let aligned = align(result, options.granularity)?;
    Ok(compose(&aligned, options.title.as_str())?)
}

/// Write an already composed figure to `options.destination`.
pub fn export_figure(figure: &CompositeFigure, options: &RenderOptions) -> Result<PathBuf, Error> {
    chart::export_png(figure, options.size, &options.destination)?;
    Ok(options.destination.clone())
}

/// Align, compose and export `result` as a PNG. Returns the path written.
pub fn render(result: &DecompositionResult, options: &RenderOptions) -> Result<PathBuf, Error> {
    let figure = build_figure(result, options)?;
    export_figure(&figure, options)
}
