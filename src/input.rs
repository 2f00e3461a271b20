//! Two-column `timestamp,value` CSV reader for the command-line driver

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::InputError;

/// Raw observations in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSeries {
    pub times: Vec<i64>,
    pub values: Vec<f64>,
}

impl RawSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

pub fn read_csv(path: &Path) -> Result<RawSeries, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(BufReader::new(file)).map_err(|e| match e {
        InputError::Io { source, .. } => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse CSV text. The first line is a header and is skipped; blank lines
/// are ignored. Timestamps are integer epoch milliseconds.
pub fn parse_csv<R: BufRead>(reader: R) -> Result<RawSeries, InputError> {
    let mut series = RawSeries::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| InputError::Io {
            path: Default::default(),
            source,
        })?;
        let line_no = idx + 1;
        if idx == 0 || line.trim().is_empty() {
            continue;
        }

        let (time, value) = parse_row(&line).map_err(|message| InputError::Parse {
            line: line_no,
            message,
        })?;
        series.times.push(time);
        series.values.push(value);
    }

    if series.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(series)
}

fn parse_row(line: &str) -> Result<(i64, f64), String> {
    let mut fields = line.split(',').map(str::trim);
    let time_field = fields.next().unwrap_or_default();
    let value_field = fields
        .next()
        .ok_or_else(|| format!("expected 'timestamp,value', got '{}'", line.trim()))?;

    let time = time_field
        .parse::<i64>()
        .map_err(|_| format!("invalid timestamp '{}'", time_field))?;
    let value = value_field
        .parse::<f64>()
        .map_err(|_| format!("invalid value '{}'", value_field))?;

    Ok((time, value))
}
