// Trace loader: time/power CSV into an ordered sample sequence

use crate::core::compression::decode_trace;
use crate::core::constants::{POWER_COLUMN, TIME_COLUMN};
use crate::core::error::{Result, TwinError};
use crate::core::format::PowerSample;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::cmp::Ordering;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A validated trace: sorted by `time_s`, at least two samples.
#[derive(Debug, Clone)]
pub struct PowerTrace {
    trace_file: String,
    samples: Vec<PowerSample>,
}

impl PowerTrace {
    /// Reads the file once; gzip and zstd traces are decompressed transparently.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path)?;
        let data = decode_trace(&raw)?;

        let trace_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Loading trace {} ({} bytes)", path.display(), data.len());
        Self::from_reader(data.as_slice(), trace_file)
    }

    pub fn from_csv_str(csv: &str, trace_file: impl Into<String>) -> Result<Self> {
        Self::from_reader(csv.as_bytes(), trace_file)
    }

    pub fn from_reader<R: Read>(reader: R, trace_file: impl Into<String>) -> Result<Self> {
        let samples = parse_samples(reader)?;
        Self::from_samples(samples, trace_file)
    }

    /// Sorts (stable) and enforces the two-sample minimum.
    pub fn from_samples(mut samples: Vec<PowerSample>, trace_file: impl Into<String>) -> Result<Self> {
        // -0.0 and 0.0 are the same instant and must keep input order
        samples.sort_by(|a, b| a.time_s.partial_cmp(&b.time_s).unwrap_or(Ordering::Equal));

        if samples.len() < 2 {
            return Err(TwinError::InsufficientSamples {
                found: samples.len(),
            });
        }

        Ok(Self {
            trace_file: trace_file.into(),
            samples,
        })
    }

    pub fn trace_file(&self) -> &str {
        &self.trace_file
    }

    pub fn samples(&self) -> &[PowerSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Last matching column wins when a header name is repeated.
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().collect::<Vec<_>>().iter().rposition(|h| *h == name)
}

fn parse_field(record: &StringRecord, index: usize, column: &'static str) -> Result<f64> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let raw = record.get(index).unwrap_or("");

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TwinError::InvalidValue {
            line,
            column,
            value: raw.to_string(),
        }),
    }
}

/// Parses rows in input order. Header presence is checked before any row is read.
fn parse_samples<R: Read>(reader: R) -> Result<Vec<PowerSample>> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let time_idx = column_index(&headers, TIME_COLUMN);
    let power_idx = column_index(&headers, POWER_COLUMN);

    let (time_idx, power_idx) = match (time_idx, power_idx) {
        (Some(t), Some(p)) => (t, p),
        _ => {
            let missing = [(TIME_COLUMN, time_idx), (POWER_COLUMN, power_idx)]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(TwinError::MissingColumns { missing });
        }
    };

    let mut samples = Vec::new();
    for record in csv.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let time_s = parse_field(&record, time_idx, TIME_COLUMN)?;
        let power_w = parse_field(&record, power_idx, POWER_COLUMN)?;
        samples.push(PowerSample::new(time_s, power_w));
    }

    debug!("Parsed {} samples", samples.len());
    Ok(samples)
}
