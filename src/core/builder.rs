// Assembles a PowerTwin from samples, metadata and provenance

use crate::core::constants::{DIRECT_INPUT_TRACE, TWIN_VERSION};
use crate::core::error::{Result, TwinError};
use crate::core::format::*;
use crate::core::integrator::integrate_energy_kwh;
use crate::core::metadata::Metadata;
use crate::core::reader::PowerTrace;
use crate::core::units::kwh_to_solar;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::debug;

/// Collects artifact identity before building from a sample sequence.
///
/// ```
/// use power_twin::{PowerSample, TwinBuilder};
///
/// let samples = [PowerSample::new(0.0, 80.0), PowerSample::new(0.01, 95.0)];
/// let twin = TwinBuilder::new("open-eda-cpu-v1", "resnet50-inference-01")
///     .build(&samples)
///     .unwrap();
/// assert_eq!(twin.profile.samples, 2);
/// ```
#[derive(Debug, Clone)]
pub struct TwinBuilder {
    chip_id: String,
    workload_id: String,
    trace_file: String,
    metadata: Metadata,
    timestamp_utc: Option<DateTime<Utc>>,
}

impl TwinBuilder {
    pub fn new(chip_id: impl Into<String>, workload_id: impl Into<String>) -> Self {
        Self {
            chip_id: chip_id.into(),
            workload_id: workload_id.into(),
            trace_file: DIRECT_INPUT_TRACE.to_string(),
            metadata: Metadata::new(),
            timestamp_utc: None,
        }
    }

    /// Only the base name of a path is recorded.
    pub fn trace_file(mut self, trace_file: &str) -> Self {
        self.trace_file = Path::new(trace_file)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| trace_file.to_string());
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Pins the creation instant; defaults to the time of `build`.
    pub fn timestamp(mut self, timestamp_utc: DateTime<Utc>) -> Self {
        self.timestamp_utc = Some(timestamp_utc);
        self
    }

    pub fn build_trace(self, trace: &PowerTrace) -> Result<PowerTwin> {
        self.trace_file(trace.trace_file()).build(trace.samples())
    }

    /// Samples are used in the given order; the integrator rejects inversions.
    pub fn build(self, samples: &[PowerSample]) -> Result<PowerTwin> {
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if samples.len() >= 2 => (first, last),
            _ => {
                return Err(TwinError::InsufficientSamples {
                    found: samples.len(),
                })
            }
        };

        let duration_s = (last.time_s - first.time_s).max(0.0);
        let avg_power_w = samples.iter().map(|s| s.power_w).sum::<f64>() / samples.len() as f64;
        let peak_power_w = samples
            .iter()
            .map(|s| s.power_w)
            .fold(f64::NEG_INFINITY, f64::max);

        let total_kwh = integrate_energy_kwh(samples)?;
        let per_second_kwh = if duration_s > 0.0 {
            total_kwh / duration_s
        } else {
            0.0
        };

        debug!(
            "Built twin for {}/{}: {} samples, {} kWh",
            self.chip_id,
            self.workload_id,
            samples.len(),
            total_kwh
        );

        Ok(PowerTwin {
            version: TWIN_VERSION.to_string(),
            chip_id: self.chip_id,
            workload_id: self.workload_id,
            timestamp_utc: self.timestamp_utc.unwrap_or_else(Utc::now),
            units: Units::default(),
            profile: Profile {
                duration_s,
                samples: samples.len(),
                avg_power_w,
                peak_power_w,
            },
            energy: Energy {
                total_kwh,
                per_second_kwh,
            },
            solar_cost: kwh_to_solar(total_kwh),
            source: TraceSource::new(self.trace_file),
            metadata: self.metadata,
        })
    }
}

/// Convenience wrapper for the common path: loaded trace plus parsed metadata.
pub fn build_power_twin(
    chip_id: &str,
    workload_id: &str,
    trace: &PowerTrace,
    metadata: Metadata,
) -> Result<PowerTwin> {
    TwinBuilder::new(chip_id, workload_id)
        .metadata(metadata)
        .build_trace(trace)
}
