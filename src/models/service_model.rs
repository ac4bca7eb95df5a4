use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub id: String,
    pub version: String,
    pub description: String,
    pub connection: Connection,
    #[serde(default)]
    pub defaults: TwinDefaults,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
}

/// Identity used when a request leaves chip or workload unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinDefaults {
    pub chip_id: String,
    pub workload_id: String,
}

impl Default for TwinDefaults {
    fn default() -> Self {
        Self {
            chip_id: "unknown-chip".to_string(),
            workload_id: "unknown-workload".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub max_trace_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        // 10 MiB, same as the upload cap of the web front end
        Self {
            max_trace_bytes: 10 * 1024 * 1024,
        }
    }
}
