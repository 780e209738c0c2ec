//! Airborne dose-response (Wells–Riley).
//!
//! The probability that a susceptible occupant of a shared room is infected
//! during an exposure of `t` hours is
//!
//! ```text
//! P = 1 − exp(−I · q · p · t / Q)
//! ```
//!
//! | Symbol | Meaning                                      | Unit   |
//! |--------|----------------------------------------------|--------|
//! | I      | infectious occupants                         | —      |
//! | q      | quanta produced per infector                 | 1/h    |
//! | p      | pulmonary ventilation rate of the susceptible| m³/h   |
//! | t      | exposure time (one tick)                     | h      |
//! | Q      | room air supply = air changes/h × volume     | m³/h   |

/// Probability of infection for one susceptible occupant.
///
/// Returns 0 when nobody infectious is present or the room has no air
/// supply information (`Q <= 0`).
pub fn wells_riley_probability(
    infected:            usize,
    quanta_per_hour:     f64,
    pulmonary_m3_hour:   f64,
    exposure_hours:      f64,
    room_supply_m3_hour: f64,
) -> f64 {
    if infected == 0 || room_supply_m3_hour <= 0.0 {
        return 0.0;
    }
    let dose = infected as f64 * quanta_per_hour * pulmonary_m3_hour * exposure_hours
        / room_supply_m3_hour;
    (1.0 - (-dose).exp()).clamp(0.0, 1.0)
}

/// The room and breathing constants of one exposure setting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AirborneExposure {
    pub quanta_production_rate:     f64,
    pub pulmonary_ventilation_rate: f64,
    /// Air changes per hour.
    pub room_ventilation_rate:      f64,
    /// Cubic metres.
    pub room_volume:                f64,
}

impl AirborneExposure {
    /// Room air supply `Q` in m³/h.
    #[inline]
    pub fn room_supply(&self) -> f64 {
        self.room_ventilation_rate * self.room_volume
    }

    /// Infection probability for one tick (one hour) shared with
    /// `infected` infectious occupants.
    pub fn hourly_probability(&self, infected: usize) -> f64 {
        wells_riley_probability(
            infected,
            self.quanta_production_rate,
            self.pulmonary_ventilation_rate,
            1.0,
            self.room_supply(),
        )
    }
}
