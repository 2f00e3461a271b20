//! Rasterization of a [`CompositeFigure`] to PNG

use std::io::Write;
use std::path::Path;

use charming::{
    Chart, ImageRenderer,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisType, Color, ItemStyle, LineStyle, NameLocation, SplitLine, Symbol,
        TextStyle,
    },
    renderer::ImageFormat,
    series::{Bar, Line},
};
use tempfile::NamedTempFile;

use super::colors::{COLOR_BACKGROUND, COLOR_DATA, COLOR_GRID, COLOR_TEXT};
use super::layout::{self, PanelFrame};
use super::{CompositeFigure, Dataset, ExportSize, Panel, RendererKind, TimeAxis};
use crate::error::ExportError;

/// First eight bytes of every PNG file
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Translate the figure into a chart description: one grid, x-axis and
/// y-axis per panel, all sharing the panel's index.
pub fn build_chart(figure: &CompositeFigure, size: ExportSize) -> Chart {
    let mut chart = Chart::new()
        .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
        .title(
            Title::new()
                .text(figure.title())
                .left("center")
                .top(10)
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(18)),
        );

    if figure.has_legend() {
        chart = chart.legend(Legend::new().top(10).right(10));
    }

    for (panel, frame) in figure.panels().iter().zip(layout::plan(figure, size)) {
        chart = chart
            .grid(panel_grid(&frame))
            .x_axis(domain_axis(figure.domain_axis(), &frame))
            .y_axis(range_axis(panel, &frame));

        // later series paint over earlier ones
        let mut datasets: Vec<&Dataset> = panel.datasets().iter().collect();
        datasets.sort_by_key(|d| d.render_index);

        for dataset in datasets {
            chart = match panel.kind() {
                RendererKind::Line => chart.series(line_series(dataset, frame.index)),
                RendererKind::Bar => chart.series(bar_series(dataset, frame.index)),
            };
        }
    }

    chart
}

fn panel_grid(frame: &PanelFrame) -> Grid {
    Grid::new()
        .left(frame.left)
        .right(frame.right)
        .top(frame.top)
        .height(frame.height)
}

fn domain_axis(time_axis: &TimeAxis, frame: &PanelFrame) -> Axis {
    let axis = Axis::new()
        .type_(AxisType::Time)
        .grid_index(frame.index as f64)
        .min(frame.domain_min as f64)
        .max(frame.domain_max as f64);

    if frame.show_domain_labels {
        axis.name(time_axis.label())
            .name_location(NameLocation::Middle)
            .name_gap(24)
            .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(12))
            .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(11))
    } else {
        axis.axis_label(AxisLabel::new().show(false))
    }
}

fn range_axis(panel: &Panel, frame: &PanelFrame) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .grid_index(frame.index as f64)
        .scale(true)
        .name(panel.label())
        .name_location(NameLocation::Middle)
        .name_gap(52)
        .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(12))
        .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(10))
        .split_line(SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID)))
}

fn points(dataset: &Dataset) -> Vec<Vec<f64>> {
    dataset
        .series
        .iter()
        .map(|(bucket, value)| vec![bucket as f64, value])
        .collect()
}

fn line_series(dataset: &Dataset, axis_index: usize) -> Line {
    Line::new()
        .name(dataset.series.name())
        .data(points(dataset))
        .symbol(Symbol::None)
        .x_axis_index(axis_index as f64)
        .y_axis_index(axis_index as f64)
        .line_style(LineStyle::new().width(1).color(COLOR_DATA))
        .item_style(ItemStyle::new().color(COLOR_DATA))
}

fn bar_series(dataset: &Dataset, axis_index: usize) -> Bar {
    Bar::new()
        .name(dataset.series.name())
        .data(points(dataset))
        .x_axis_index(axis_index as f64)
        .y_axis_index(axis_index as f64)
        .item_style(ItemStyle::new().color(COLOR_DATA))
}

/// Rasterize the figure to PNG bytes.
pub fn render_png(figure: &CompositeFigure, size: ExportSize) -> Result<Vec<u8>, ExportError> {
    let chart = build_chart(figure, size);
    let mut renderer = ImageRenderer::new(size.width, size.height);
    renderer
        .render_format(ImageFormat::Png, &chart)
        .map_err(|e| ExportError::Render(e.to_string()))
}

/// Rasterize the figure and write it to `path`.
///
/// The PNG goes to a temporary file beside `path` first and is renamed over
/// it once complete, so a failed export never leaves a truncated image.
pub fn export_png(
    figure: &CompositeFigure,
    size: ExportSize,
    path: &Path,
) -> Result<(), ExportError> {
    let bytes = render_png(figure, size)?;
    write_atomically(path, &bytes)?;
    log::info!(
        "wrote {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        size
    );
    Ok(())
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}
