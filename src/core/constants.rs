// Unit system and artifact constants for Power Twin v1

/// 1 Solar = 4,913 kWh
pub const SOLAR_KWH: f64 = 4913.0;

/// 1 Solar = 10,000 Solar Rays
pub const RAYS_PER_SOLAR: f64 = 10000.0;

// Joules per kWh: 1000 W * 3600 s
pub const JOULES_PER_KWH: f64 = 1000.0 * 3600.0;

pub const TWIN_VERSION: &str = "tcs-power-twin-v1";

// Required trace columns
pub const TIME_COLUMN: &str = "time_s";
pub const POWER_COLUMN: &str = "power_w";

pub const TRACE_TYPE: &str = "time_power_csv";
pub const INTEGRATION_METHOD: &str = "left_riemann";

// trace_file recorded for samples submitted without a file
pub const DIRECT_INPUT_TRACE: &str = "api-input";

pub const ASSUMPTIONS: [&str; 2] = [
    "Power value held constant until next timestamp",
    "Timestamps are monotonically increasing",
];

// Unit labels: time, power, energy, solar, rays
pub const UNIT_TIME: &str = "seconds";
pub const UNIT_POWER: &str = "watts";
pub const UNIT_ENERGY: &str = "kWh";
pub const UNIT_SOLAR: &str = "Solar";
pub const UNIT_RAYS: &str = "Solar Rays";

// Compressed trace magic bytes
pub const GZIP_MAGIC: &[u8; 2] = &[0x1f, 0x8b];
pub const ZSTD_MAGIC: &[u8; 4] = &[0x28, 0xb5, 0x2f, 0xfd];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEncoding {
    Plain,
    Gzip,
    Zstd,
}

impl TraceEncoding {
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(GZIP_MAGIC) {
            TraceEncoding::Gzip
        } else if data.starts_with(ZSTD_MAGIC) {
            TraceEncoding::Zstd
        } else {
            TraceEncoding::Plain
        }
    }
}
