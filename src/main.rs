mod output;

use std::path::Path;

use clap::Parser;
use stlplot::error::Error;
use stlplot::input::read_csv;
use stlplot::{
    DEFAULT_DESTINATION, DEFAULT_TITLE, ExportSize, Granularity, RenderOptions, build_figure,
    decompose_additive, export_figure,
};

use output::{
    get_display_name, print_error, print_figure, print_file_info, print_legend, print_warning,
};

#[derive(Parser)]
#[command(
    name = "stlplot",
    version,
    about = "Seasonal-trend decomposition plotter: renders series, seasonal, trend and remainder panels to PNG",
    after_help = "Examples:
  stlplot 24 hourly.csv                                 Decompose with a 24-observation period
  stlplot 60 data.csv -o chart.png                      Write the chart to chart.png
  stlplot 7 daily.csv -g day --title \"Daily load\"       Day buckets, custom title
  stlplot 12 data.csv --size display                    1000x500 output
  stlplot --no-color 12 data.csv                        Disable colored output"
)]
struct Args {
    /// Observations per seasonal cycle
    #[arg(value_name = "PERIOD")]
    period: usize,

    /// CSV file with a header row followed by timestamp_ms,value rows
    #[arg(value_name = "CSV")]
    csv: String,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_DESTINATION, value_name = "PATH")]
    output: String,

    /// Chart title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Time bucket unit (millisecond, second, minute, hour, day, month, year)
    #[arg(short, long, default_value = "minute", value_name = "UNIT")]
    granularity: Granularity,

    /// Image size as WIDTHxHEIGHT, or 'file' (800x600) / 'display' (1000x500)
    #[arg(long, default_value = "file", value_name = "SIZE")]
    size: ExportSize,

    /// Suppress the panel summary (show data only)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn run(args: &Args) -> Result<(), Error> {
    let raw = read_csv(Path::new(&args.csv))?;
    let rows = raw.len();

    if !args.quiet {
        print_file_info(get_display_name(&args.csv), rows, args.period, args.granularity);
    }

    let result = decompose_additive(raw.times, raw.values, args.period)?;
    let options = RenderOptions::default()
        .title(args.title.as_str())
        .granularity(args.granularity)
        .destination(&args.output)
        .size(args.size);

    // same steps as stlplot::render, split so the summary sees the figure
    let figure = build_figure(&result, &options)?;

    let buckets = figure
        .panels()
        .first()
        .and_then(|panel| panel.datasets().first())
        .map_or(rows, |dataset| dataset.series.len());
    if buckets < rows {
        print_warning(&format!(
            "{} observations fell into an occupied {} bucket; later values were kept",
            rows - buckets,
            args.granularity
        ));
    }

    if !args.quiet {
        print_figure(&figure);
        print_legend();
        println!();
    }

    let destination = export_figure(&figure, &options)?;
    eprintln!("Chart saved to: {}", destination.display());

    Ok(())
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }

    if args.period < 2 {
        print_error("Period must be at least 2");
        std::process::exit(1);
    }

    // Validate image output path
    if let Some(parent) = Path::new(&args.output).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        print_error(&format!("Directory does not exist: {}", parent.display()));
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
