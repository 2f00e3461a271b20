//! Pixel placement of the stacked panels

use super::{CompositeFigure, ExportSize};

/// Space reserved above the first panel for the title
pub(super) const TITLE_HEIGHT: f64 = 44.0;
/// Space below the last panel for the time tick labels
pub(super) const BOTTOM_MARGIN: f64 = 48.0;
/// Room for range-axis ticks and the rotated range label
pub(super) const LEFT_MARGIN: f64 = 76.0;
pub(super) const RIGHT_MARGIN: f64 = 24.0;

/// Where one panel lands on the canvas, and the domain it plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub index: usize,
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub domain_min: i64,
    pub domain_max: i64,
    /// Only the bottom panel prints time tick labels
    pub show_domain_labels: bool,
}

impl PanelFrame {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Split the canvas height evenly between panels, separated by the figure
/// gap. Every frame carries the figure's one domain extent.
pub fn plan(figure: &CompositeFigure, size: ExportSize) -> Vec<PanelFrame> {
    let count = figure.panels().len();
    if count == 0 {
        return Vec::new();
    }

    let gaps = figure.gap() * (count - 1) as f64;
    let usable = (size.height as f64 - TITLE_HEIGHT - BOTTOM_MARGIN - gaps).max(0.0);
    let height = usable / count as f64;
    let domain = figure.domain_axis();

    (0..count)
        .map(|index| PanelFrame {
            index,
            top: TITLE_HEIGHT + index as f64 * (height + figure.gap()),
            height,
            left: LEFT_MARGIN,
            right: RIGHT_MARGIN,
            domain_min: domain.min,
            domain_max: domain.max,
            show_domain_labels: index + 1 == count,
        })
        .collect()
}
