//! Composite figure for a seasonal-trend decomposition
//!
//! [`compose`] turns aligned channels into an immutable [`CompositeFigure`]:
//! five vertically stacked panels that all plot against one shared
//! [`TimeAxis`]. Rendering lives in [`export`], pixel placement in [`layout`].

mod colors;
pub mod export;
pub mod layout;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::align::{AlignedChannels, Channel, ChannelSeries, Granularity};
use crate::error::ComposeError;

pub use export::{build_chart, export_png, render_png};
pub use layout::{PanelFrame, plan};

/// Vertical space between adjacent panels, in pixels
pub const PANEL_GAP: f64 = 10.0;

/// Label of the shared domain axis
pub const DOMAIN_LABEL: &str = "Time";

/// Panel order, range-axis label, renderer and attached channels.
/// Channel order within a panel is render order.
const PANEL_LAYOUT: [(&str, RendererKind, &[Channel]); 5] = [
    ("Series", RendererKind::Line, &[Channel::Series]),
    ("Seasonal", RendererKind::Line, &[Channel::Seasonal]),
    ("Trend", RendererKind::Line, &[Channel::Trend]),
    ("Remainder", RendererKind::Bar, &[Channel::Remainder]),
    (
        "S & T",
        RendererKind::Line,
        &[Channel::Series, Channel::Trend],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// Connected line, no point markers
    Line,
    /// Clustered bars anchored at zero
    Bar,
}

/// A channel attached to a panel. Higher `render_index` draws on top.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub render_index: usize,
    pub series: Arc<ChannelSeries>,
}

/// The domain axis every panel shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    pub min: i64,
    pub max: i64,
}

impl TimeAxis {
    /// Axis covering every bucket. A single bucket is widened by one
    /// granularity step so the extent is never empty.
    fn spanning(buckets: impl Iterator<Item = i64>, granularity: Granularity) -> Option<Self> {
        let (min, max) = buckets.fold(None, |acc, b| match acc {
            None => Some((b, b)),
            Some((lo, hi)) => Some((i64::min(lo, b), i64::max(hi, b))),
        })?;

        let max = if max > min {
            max
        } else {
            granularity
                .next_bucket(min)
                .unwrap_or_else(|_| min.saturating_add(1))
        };
        Some(Self { min, max })
    }

    pub fn label(&self) -> &'static str {
        DOMAIN_LABEL
    }
}

/// One plotting region with its own range axis.
#[derive(Debug, Clone)]
pub struct Panel {
    label: &'static str,
    kind: RendererKind,
    datasets: Vec<Dataset>,
}

impl Panel {
    /// Range-axis label
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn kind(&self) -> RendererKind {
        self.kind
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.datasets.iter().map(|d| d.series.channel()).collect()
    }

    /// Value range across every attached dataset, since overlaid datasets share
    /// one range axis.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.datasets
            .iter()
            .filter_map(|d| d.series.value_bounds())
            .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))
    }
}

/// Panels stacked top to bottom over one [`TimeAxis`]. Never mutated after
/// [`compose`] returns it.
#[derive(Debug, Clone)]
pub struct CompositeFigure {
    title: String,
    domain: TimeAxis,
    panels: Vec<Panel>,
    gap: f64,
    legend: bool,
}

impl CompositeFigure {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The domain axis of every panel
    pub fn domain_axis(&self) -> &TimeAxis {
        &self.domain
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn has_legend(&self) -> bool {
        self.legend
    }
}

/// Build the five-panel figure: Series, Seasonal, Trend, Remainder (bars),
/// then Series and Trend overlaid on one range axis.
pub fn compose(
    aligned: &AlignedChannels,
    title: impl Into<String>,
) -> Result<CompositeFigure, ComposeError> {
    let lookup = |channel: Channel| {
        aligned
            .get(channel)
            .filter(|s| !s.is_empty())
            .cloned()
            .ok_or(ComposeError::MissingChannel(channel))
    };

    let panels = PANEL_LAYOUT
        .iter()
        .map(|&(label, kind, channels)| {
            let datasets = channels
                .iter()
                .enumerate()
                .map(|(render_index, &channel)| {
                    Ok(Dataset {
                        render_index,
                        series: lookup(channel)?,
                    })
                })
                .collect::<Result<Vec<_>, ComposeError>>()?;
            Ok(Panel {
                label,
                kind,
                datasets,
            })
        })
        .collect::<Result<Vec<_>, ComposeError>>()?;

    let buckets = panels
        .iter()
        .flat_map(|p| p.datasets.iter())
        .flat_map(|d| d.series.buckets());
    let domain = TimeAxis::spanning(buckets, aligned.granularity())
        .ok_or(ComposeError::MissingChannel(Channel::Series))?;

    let title = title.into();
    log::debug!(
        "composed '{}' with {} panels over [{}, {}]",
        title,
        panels.len(),
        domain.min,
        domain.max
    );

    Ok(CompositeFigure {
        title,
        domain,
        panels,
        gap: PANEL_GAP,
        legend: false,
    })
}

/// Output raster dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSize {
    pub width: u32,
    pub height: u32,
}

impl ExportSize {
    /// File export default
    pub const FILE: ExportSize = ExportSize {
        width: 800,
        height: 600,
    };

    /// Sizing used when the figure is shown on screen
    pub const DISPLAY: ExportSize = ExportSize {
        width: 1000,
        height: 500,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ExportSize {
    fn default() -> Self {
        Self::FILE
    }
}

impl fmt::Display for ExportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid size '{0}' (expected WIDTHxHEIGHT, 'file' or 'display')")]
pub struct ParseSizeError(String);

impl FromStr for ExportSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSizeError(s.to_string());
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::FILE),
            "display" => Ok(Self::DISPLAY),
            other => {
                let (w, h) = other.split_once('x').ok_or_else(invalid)?;
                let width: u32 = w.trim().parse().map_err(|_| invalid())?;
                let height: u32 = h.trim().parse().map_err(|_| invalid())?;
                if width == 0 || height == 0 {
                    return Err(invalid());
                }
                Ok(Self { width, height })
            }
        }
    }
}
