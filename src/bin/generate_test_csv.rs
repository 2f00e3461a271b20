use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const MS_PER_MINUTE: i64 = 60_000;
/// 2024-01-01T00:00:00Z
const START_MS: i64 = 1_704_067_200_000;

fn write_csv(path: &Path, times: &[i64], values: &[f64]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "timestamp,value")?;
    for (t, v) in times.iter().zip(values) {
        writeln!(writer, "{},{:.6}", t, v)?;
    }

    writer.flush()
}

/// Deterministic noise in [-0.5, 0.5) (xorshift)
fn noise(rows: usize, seed: u64) -> Vec<f64> {
    let mut state = if seed == 0 { 1 } else { seed };
    (0..rows)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state as f64 / u64::MAX as f64) - 0.5
        })
        .collect()
}

fn seasonal_series(rows: usize, period: usize) -> Vec<f64> {
    let jitter = noise(rows, 12345);
    (0..rows)
        .map(|i| {
            let trend = 100.0 + 0.05 * i as f64;
            let season = 10.0 * (2.0 * PI * i as f64 / period as f64).sin();
            trend + season + jitter[i]
        })
        .collect()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <PATH> [ROWS] [PERIOD]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let rows: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1440);
    let period: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(60);

    if period < 2 || rows < period * 2 {
        eprintln!("ROWS must be at least twice PERIOD, and PERIOD at least 2");
        std::process::exit(1);
    }

    let times: Vec<i64> = (0..rows as i64).map(|i| START_MS + i * MS_PER_MINUTE).collect();
    let values = seasonal_series(rows, period);

    if let Err(e) = write_csv(path, &times, &values) {
        eprintln!("Failed to write {}: {}", path.display(), e);
        std::process::exit(1);
    }

    println!("Generated {} ({} rows, period {})", path.display(), rows, period);
}
