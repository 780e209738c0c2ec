//! Epidemiological parameters.
//!
//! # JSON format
//!
//! Every field is optional; missing fields take the defaults below.
//!
//! ```json
//! {
//!   "susceptible_count": 2000,
//!   "exposed_count": 5,
//!   "infection_probability": 0.08,
//!   "mean_diagnosis_delay": 45.0
//! }
//! ```
//!
//! Clinical and behavioural constants (work hours, treatment length, quanta
//! production, …) default to values from the literature the model was
//! built on: Beggs et al. (2003) for quanta production and Noakes et al.
//! (2006) for pulmonary ventilation.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dose::AirborneExposure;
use crate::{DiseaseError, DiseaseResult};

/// Tunable parameter id: baseline probability that an exposure progresses.
pub const INFECTION_PROBABILITY: &str = "infection_probability";

/// Tunable parameter id: room air changes per hour.
pub const AVERAGE_ROOM_VENTILATION_RATE: &str = "average_room_ventilation_rate";

/// Every configurable number of the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    // ── Population ────────────────────────────────────────────────────────
    pub susceptible_count: u32,
    pub exposed_count:     u32,

    // ── Population shares ─────────────────────────────────────────────────
    pub immunosuppression_share: f64,
    pub smokers_share:           f64,
    pub alcohol_drinkers_share:  f64,

    // ── Rooms ─────────────────────────────────────────────────────────────
    /// Cubic metres.
    pub average_room_volume:           f64,
    /// Air changes per hour.
    pub average_room_ventilation_rate: f64,

    // ── Disease course ────────────────────────────────────────────────────
    /// Baseline probability that an exposure progresses to disease.
    pub infection_probability:  f64,
    /// Mean of the exponential diagnosis delay, days.
    pub mean_diagnosis_delay:   f64,
    pub treatment_dropout_rate: f64,
    pub min_incubation_days:    f64,
    pub max_incubation_days:    f64,
    pub treatment_duration_hours:    f64,
    pub time_to_full_recovery_hours: f64,
    pub immunodeficiency_fold:  f64,
    pub risk_factor_adjustment: f64,

    // ── Airborne transmission ─────────────────────────────────────────────
    /// Quanta per hour produced by one infectious citizen.
    pub quanta_production_rate:     f64,
    /// Cubic metres per hour inhaled by a susceptible citizen.
    pub pulmonary_ventilation_rate: f64,

    // ── Daily routine ─────────────────────────────────────────────────────
    pub initial_wake_up_hour: u32,
    pub final_wake_up_hour:   u32,
    pub min_work_hours:       u32,
    pub max_work_hours:       u32,

    // ── Calibration targets and hyper-parameters (read-only here) ─────────
    pub incidence_rate_goal: f64,
    pub exposure_rate_goal:  f64,
    pub epsilon:             f64,
    pub learning_rate:       f64,
    pub discount_factor:     f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            susceptible_count: 1_000,
            exposed_count:     10,

            immunosuppression_share: 0.01,
            smokers_share:           0.20,
            alcohol_drinkers_share:  0.10,

            average_room_volume:           45.0,
            average_room_ventilation_rate: 2.0,

            infection_probability:       0.10,
            mean_diagnosis_delay:        60.0,
            treatment_dropout_rate:      0.10,
            min_incubation_days:         14.0,
            max_incubation_days:         84.0,
            treatment_duration_hours:    4_320.0,
            time_to_full_recovery_hours: 17_520.0,
            immunodeficiency_fold:       10.0,
            risk_factor_adjustment:      1.5,

            quanta_production_rate:     1.25,
            pulmonary_ventilation_rate: 0.48,

            initial_wake_up_hour: 5,
            final_wake_up_hour:   8,
            min_work_hours:       9,
            max_work_hours:       11,

            incidence_rate_goal: 0.0,
            exposure_rate_goal:  0.0,
            epsilon:             0.1,
            learning_rate:       0.1,
            discount_factor:     0.9,
        }
    }
}

impl Parameters {
    /// Parse parameters from a JSON string.
    pub fn from_json_str(json: &str) -> DiseaseResult<Self> {
        let params: Parameters = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject values that would make a draw meaningless.
    pub fn validate(&self) -> DiseaseResult<()> {
        let unit = [
            ("immunosuppression_share", self.immunosuppression_share),
            ("smokers_share", self.smokers_share),
            ("alcohol_drinkers_share", self.alcohol_drinkers_share),
            ("infection_probability", self.infection_probability),
            ("treatment_dropout_rate", self.treatment_dropout_rate),
        ];
        for (name, value) in unit {
            check(name, (0.0..=1.0).contains(&value), || format!("{value} is not in [0, 1]"))?;
        }

        let positive = [
            ("average_room_volume", self.average_room_volume),
            ("average_room_ventilation_rate", self.average_room_ventilation_rate),
            ("mean_diagnosis_delay", self.mean_diagnosis_delay),
        ];
        for (name, value) in positive {
            check(name, value > 0.0, || format!("{value} must be > 0"))?;
        }

        let non_negative = [
            ("min_incubation_days", self.min_incubation_days),
            ("treatment_duration_hours", self.treatment_duration_hours),
            ("time_to_full_recovery_hours", self.time_to_full_recovery_hours),
            ("immunodeficiency_fold", self.immunodeficiency_fold),
            ("risk_factor_adjustment", self.risk_factor_adjustment),
            ("quanta_production_rate", self.quanta_production_rate),
            ("pulmonary_ventilation_rate", self.pulmonary_ventilation_rate),
        ];
        for (name, value) in non_negative {
            check(name, value >= 0.0, || format!("{value} must be >= 0"))?;
        }

        check("max_incubation_days", self.max_incubation_days >= self.min_incubation_days, || {
            format!("{} is below min_incubation_days {}", self.max_incubation_days, self.min_incubation_days)
        })?;
        check("final_wake_up_hour", self.final_wake_up_hour >= self.initial_wake_up_hour, || {
            format!("{} is before initial_wake_up_hour {}", self.final_wake_up_hour, self.initial_wake_up_hour)
        })?;
        check("max_work_hours", self.max_work_hours >= self.min_work_hours, || {
            format!("{} is below min_work_hours {}", self.max_work_hours, self.min_work_hours)
        })?;
        check("max_work_hours", self.final_wake_up_hour + self.max_work_hours < 24, || {
            "the latest return home must fall before midnight".to_owned()
        })?;
        Ok(())
    }

    /// Earliest and latest return-home hour implied by the wake window and
    /// working hours.
    pub fn return_home_window(&self) -> (u32, u32) {
        (
            self.initial_wake_up_hour + self.min_work_hours,
            self.final_wake_up_hour + self.max_work_hours,
        )
    }
}

fn check(name: &'static str, ok: bool, reason: impl FnOnce() -> String) -> DiseaseResult<()> {
    if ok {
        Ok(())
    } else {
        Err(DiseaseError::InvalidParameter { name, reason: reason() })
    }
}

/// Load and validate parameters from a JSON file.
pub fn load_parameters_json(path: &Path) -> DiseaseResult<Parameters> {
    let json = std::fs::read_to_string(path)?;
    Parameters::from_json_str(&json)
}

// ── ParameterStore ────────────────────────────────────────────────────────────

/// Read access to [`Parameters`] plus an overlay of tunable values.
///
/// An outer calibration loop adjusts `infection_probability` and
/// `average_room_ventilation_rate` between runs through
/// [`set_parameter_value`](Self::set_parameter_value); everything else is
/// read straight from the base parameters.
#[derive(Clone, Debug)]
pub struct ParameterStore {
    base:    Parameters,
    tunable: HashMap<String, f64>,
}

impl ParameterStore {
    /// Wrap `base`, seeding the tunable overlay from it.
    pub fn new(base: Parameters) -> Self {
        let mut tunable = HashMap::new();
        tunable.insert(INFECTION_PROBABILITY.to_owned(), base.infection_probability);
        tunable.insert(AVERAGE_ROOM_VENTILATION_RATE.to_owned(), base.average_room_ventilation_rate);
        Self { base, tunable }
    }

    /// The untuned parameters.
    pub fn base(&self) -> &Parameters {
        &self.base
    }

    /// Override (or add) a tunable value.
    pub fn set_parameter_value(&mut self, id: &str, value: f64) {
        self.tunable.insert(id.to_owned(), value);
    }

    /// A tunable value by id.
    pub fn parameter_value(&self, id: &str) -> Option<f64> {
        self.tunable.get(id).copied()
    }

    /// Every tunable value, keyed by id.
    pub fn tunable_parameters(&self) -> &HashMap<String, f64> {
        &self.tunable
    }

    pub fn infection_probability(&self) -> f64 {
        self.parameter_value(INFECTION_PROBABILITY)
            .unwrap_or(self.base.infection_probability)
    }

    pub fn average_room_ventilation_rate(&self) -> f64 {
        self.parameter_value(AVERAGE_ROOM_VENTILATION_RATE)
            .unwrap_or(self.base.average_room_ventilation_rate)
    }

    /// Room and breathing constants with the tuned ventilation rate applied.
    pub fn airborne_exposure(&self) -> AirborneExposure {
        AirborneExposure {
            quanta_production_rate:     self.base.quanta_production_rate,
            pulmonary_ventilation_rate: self.base.pulmonary_ventilation_rate,
            room_ventilation_rate:      self.average_room_ventilation_rate(),
            room_volume:                self.base.average_room_volume,
        }
    }
}

impl From<Parameters> for ParameterStore {
    fn from(base: Parameters) -> Self {
        Self::new(base)
    }
}
