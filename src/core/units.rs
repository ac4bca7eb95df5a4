// kWh to Solar / Solar Rays

use crate::core::constants::{RAYS_PER_SOLAR, SOLAR_KWH};
use crate::core::format::SolarCost;

/// No rounding here; presentation is the serializer's concern.
pub fn kwh_to_solar(energy_kwh: f64) -> SolarCost {
    let solar = energy_kwh / SOLAR_KWH;
    SolarCost {
        solar,
        rays: solar * RAYS_PER_SOLAR,
    }
}
