// Energy integration over an ordered sample sequence

use crate::core::constants::JOULES_PER_KWH;
use crate::core::error::{Result, TwinError};
use crate::core::format::PowerSample;

/// Total energy in joules by left Riemann sum.
///
/// Each sample's power is held until the next timestamp, so the last sample
/// only closes the final interval. Zero-length intervals contribute nothing;
/// a negative interval is rejected rather than silently subtracted.
pub fn integrate_energy_joules(samples: &[PowerSample]) -> Result<f64> {
    if samples.len() < 2 {
        return Err(TwinError::InsufficientSamples {
            found: samples.len(),
        });
    }

    let mut total_joules = 0.0;
    for (index, pair) in samples.windows(2).enumerate() {
        let dt = pair[1].time_s - pair[0].time_s;
        if dt < 0.0 {
            return Err(TwinError::NonMonotonic { index, dt });
        }
        total_joules += pair[0].power_w * dt;
    }

    Ok(total_joules)
}

pub fn integrate_energy_kwh(samples: &[PowerSample]) -> Result<f64> {
    Ok(integrate_energy_joules(samples)? / JOULES_PER_KWH)
}
