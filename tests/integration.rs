//! Integration tests for the stlplot CLI

mod common;

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the stlplot binary
fn stlplot_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("stlplot");
    path
}

/// Run stlplot with the given arguments
fn run_stlplot(args: &[&str]) -> std::process::Output {
    Command::new(stlplot_bin())
        .args(args)
        .output()
        .expect("failed to execute stlplot")
}

/// Run stlplot from inside `dir`
fn run_stlplot_in(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(stlplot_bin())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to execute stlplot")
}

/// Create a minute-spaced seasonal CSV in the given directory
fn create_test_csv(dir: &TempDir, name: &str, rows: usize, period: usize) -> PathBuf {
    let times = common::minute_times(1_704_067_200_000, rows);
    let values = common::generate_seasonal(rows, period, 0.1, 5.0);
    let path = dir.path().join(format!("{}.csv", name));
    common::write_csv(&path, &times, &values).unwrap();
    path
}

// =============================================================================
// Basic functionality tests
// =============================================================================

#[test]
fn test_help_flag() {
    let output = run_stlplot(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Seasonal-trend decomposition plotter"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--granularity"));
    assert!(stdout.contains("--title"));
    assert!(stdout.contains("--size"));
}

#[test]
fn test_version_flag() {
    let output = run_stlplot(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stlplot"));
}

#[test]
fn test_render_chart() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "minutes", 240, 60);
    let image_path = temp_dir.path().join("chart.png");

    let output = run_stlplot(&[
        "60",
        csv_path.to_str().unwrap(),
        "-o",
        image_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Observations: 240, Period: 60"));
    for label in ["Series", "Seasonal", "Trend", "Remainder", "S & T"] {
        assert!(stdout.contains(label), "summary should list {}", label);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Chart saved to:"));

    let bytes = std::fs::read(&image_path).expect("Image file should be created");
    assert!(common::is_png(&bytes), "Output should be a PNG");
}

#[test]
fn test_default_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 120, 12);

    let output = run_stlplot_in(temp_dir.path(), &["-q", "12", csv_path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(temp_dir.path().join("stl-decomposition.png").exists());
}

#[test]
fn test_custom_title_and_size() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 120, 12);
    let image_path = temp_dir.path().join("wide.png");

    let output = run_stlplot(&[
        "12",
        csv_path.to_str().unwrap(),
        "--title",
        "Server load",
        "--size",
        "display",
        "-o",
        image_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[Server load]"));
    assert!(common::is_png(&std::fs::read(&image_path).unwrap()));
}

#[test]
fn test_rendering_twice_is_identical() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 96, 24);
    let image_path = temp_dir.path().join("same.png");
    let args = [
        "-q",
        "24",
        csv_path.to_str().unwrap(),
        "-o",
        image_path.to_str().unwrap(),
    ];

    assert!(run_stlplot(&args).status.success());
    let first = std::fs::read(&image_path).unwrap();
    assert!(run_stlplot(&args).status.success());
    let second = std::fs::read(&image_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_coarse_granularity_warns_about_collisions() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "minutes", 180, 30);
    let image_path = temp_dir.path().join("hourly.png");

    let output = run_stlplot(&[
        "-q",
        "30",
        csv_path.to_str().unwrap(),
        "-g",
        "hour",
        "-o",
        image_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning:"));
    assert!(stderr.contains("177 observations"));
    assert!(image_path.exists());
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_no_arguments_error() {
    let output = run_stlplot(&[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required"));
}

#[test]
fn test_nonexistent_file_error() {
    let output = run_stlplot(&["12", "/nonexistent/path/data.csv"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
    assert!(stderr.contains("/nonexistent/path/data.csv"));
}

#[test]
fn test_malformed_row_error() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("bad.csv");
    std::fs::write(&csv_path, "timestamp,value\n0,1.0\n60000,oops\n").unwrap();

    let output = run_stlplot(&["2", csv_path.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"));
}

#[test]
fn test_period_too_long_error() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "short", 10, 5);
    let image_path = temp_dir.path().join("never.png");

    let output = run_stlplot(&[
        "8",
        csv_path.to_str().unwrap(),
        "-o",
        image_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!image_path.exists(), "No image should be written on failure");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("period must be between 2 and half"));
}

#[test]
fn test_period_below_two_error() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 20, 5);

    let output = run_stlplot(&["1", csv_path.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Period must be at least 2"));
}

#[test]
fn test_unknown_granularity_error() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 20, 5);

    let output = run_stlplot(&["5", csv_path.to_str().unwrap(), "-g", "fortnight"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown granularity"));
}

#[test]
fn test_invalid_size_error() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 20, 5);

    let output = run_stlplot(&["5", csv_path.to_str().unwrap(), "--size", "huge"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid size"));
}

#[test]
fn test_image_invalid_directory_error() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 20, 5);

    let output = run_stlplot(&[
        "5",
        csv_path.to_str().unwrap(),
        "-o",
        "/nonexistent/dir/chart.png",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory does not exist"));
}

// =============================================================================
// Output format tests
// =============================================================================

#[test]
fn test_no_color_option() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 48, 12);
    let image_path = temp_dir.path().join("plain.png");

    let output = run_stlplot(&[
        "--no-color",
        "12",
        csv_path.to_str().unwrap(),
        "-o",
        image_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    // Output should not contain ANSI escape codes
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("\x1b["),
        "Should not contain ANSI escape codes"
    );
}

#[test]
fn test_quiet_mode_reduces_output() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&temp_dir, "data", 48, 12);
    let image_path = temp_dir.path().join("q.png");
    let csv = csv_path.to_str().unwrap();
    let image = image_path.to_str().unwrap();

    let verbose_output = run_stlplot(&["12", csv, "-o", image]);
    let quiet_output = run_stlplot(&["-q", "12", csv, "-o", image]);

    let verbose_stdout = String::from_utf8_lossy(&verbose_output.stdout);
    let quiet_stdout = String::from_utf8_lossy(&quiet_output.stdout);

    assert!(quiet_stdout.len() < verbose_stdout.len());
    assert!(!quiet_stdout.contains("PANEL"));
}
