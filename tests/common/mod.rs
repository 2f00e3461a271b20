//! Common test utilities

use std::f64::consts::PI;
use std::io::Write;
use std::path::Path;

pub const MS_PER_MINUTE: i64 = 60_000;

/// Minute-spaced timestamps starting at `start_ms`
pub fn minute_times(start_ms: i64, rows: usize) -> Vec<i64> {
    (0..rows as i64).map(|i| start_ms + i * MS_PER_MINUTE).collect()
}

/// Linear trend plus a sine season of the given period
pub fn generate_seasonal(rows: usize, period: usize, slope: f64, amplitude: f64) -> Vec<f64> {
    (0..rows)
        .map(|i| {
            let phase = 2.0 * PI * i as f64 / period as f64;
            50.0 + slope * i as f64 + amplitude * phase.sin()
        })
        .collect()
}

/// Write a `timestamp,value` CSV with a header row
pub fn write_csv(path: &Path, times: &[i64], values: &[f64]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "timestamp,value")?;
    for (t, v) in times.iter().zip(values) {
        writeln!(file, "{},{}", t, v)?;
    }
    Ok(())
}

/// True if `bytes` starts with the PNG signature
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
}
