// Data structures for the Power Twin artifact

use crate::core::constants::*;
use crate::core::metadata::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observation: seconds since trace start and instantaneous watts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSample {
    pub time_s: f64,
    pub power_w: f64,
}

impl PowerSample {
    pub fn new(time_s: f64, power_w: f64) -> Self {
        Self { time_s, power_w }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Units {
    pub time: String,
    pub power: String,
    pub energy: String,
    pub solar: String,
    pub rays: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            time: UNIT_TIME.to_string(),
            power: UNIT_POWER.to_string(),
            energy: UNIT_ENERGY.to_string(),
            solar: UNIT_SOLAR.to_string(),
            rays: UNIT_RAYS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub duration_s: f64,
    pub samples: usize,
    pub avg_power_w: f64,
    pub peak_power_w: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    pub total_kwh: f64,
    pub per_second_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarCost {
    pub solar: f64,
    pub rays: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSource {
    pub trace_type: String,
    pub trace_file: String,
    pub integration_method: String,
    pub assumptions: Vec<String>,
}

impl TraceSource {
    pub fn new(trace_file: String) -> Self {
        Self {
            trace_type: TRACE_TYPE.to_string(),
            trace_file,
            integration_method: INTEGRATION_METHOD.to_string(),
            assumptions: ASSUMPTIONS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// The assembled artifact. Field order matches the serialized layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerTwin {
    pub version: String,
    pub chip_id: String,
    pub workload_id: String,
    pub timestamp_utc: DateTime<Utc>,
    pub units: Units,
    pub profile: Profile,
    pub energy: Energy,
    pub solar_cost: SolarCost,
    pub source: TraceSource,
    pub metadata: Metadata,
}
