// Power Twin library
// Power trace CSV -> normalized Solar energy artifact

pub mod core;

// Re-export main types
pub use crate::core::builder::{build_power_twin, TwinBuilder};
pub use crate::core::error::{ErrorKind, Result, TwinError};
pub use crate::core::format::{PowerSample, PowerTwin, SolarCost};
pub use crate::core::integrator::integrate_energy_kwh;
pub use crate::core::metadata::{classify_value, parse_metadata, MetaValue, Metadata};
pub use crate::core::reader::PowerTrace;
pub use crate::core::units::kwh_to_solar;
