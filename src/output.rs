use colored::*;
use stlplot::{CompositeFigure, Granularity, Panel, RendererKind};

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub(crate) fn get_display_name(filename: &str) -> &str {
    std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}

pub(crate) fn print_file_info(
    display_name: &str,
    rows: usize,
    period: usize,
    granularity: Granularity,
) {
    println!("File: {}", display_name);
    println!("Observations: {}, Period: {}", rows, period);
    println!("Time buckets: {}", granularity);
    println!();
}

pub(crate) fn print_panel_header() {
    println!(
        "{:<3} {:<10} {:<6} {:>7} {:>12} {:>12}",
        "#", "PANEL", "KIND", "POINTS", "MIN", "MAX"
    );
}

pub(crate) fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

pub(crate) fn print_panel_row(index: usize, panel: &Panel) {
    let kind = match panel.kind() {
        RendererKind::Line => "line",
        RendererKind::Bar => "bar",
    };
    let points: usize = panel.datasets().iter().map(|d| d.series.len()).sum();

    let label = format!("{:<10}", panel.label());
    print!(
        "{:<3} {} {:<6} {:>7}",
        index + 1,
        style_label(&label),
        kind,
        points
    );
    match panel.value_bounds() {
        Some((lo, hi)) => println!(" {:>12.3} {:>12.3}", lo, hi),
        None => println!(" {:>12} {:>12}", "-", "-"),
    }
}

pub(crate) fn print_figure(figure: &CompositeFigure) {
    println!("[{}]", figure.title());
    print_panel_header();
    print_separator(55);
    for (i, panel) in figure.panels().iter().enumerate() {
        print_panel_row(i, panel);
    }
    print_separator(55);
    println!();
}

pub(crate) fn print_legend() {
    println!("Series: Observed values");
    println!("Seasonal: Repeating component, one cycle per period");
    println!("Trend: Centered moving average over one period");
    println!("Remainder: Series minus seasonal and trend");
    println!("S & T: Series with its trend overlaid");
}
