//! The stochastic source behind every disease and routine decision.

use log::trace;
use rand::distributions::Distribution;
use rand_distr::Exp;
use tb_core::SimRng;

use crate::params::{ParameterStore, Parameters};
use crate::risk::RiskProfile;
use crate::{DiseaseError, DiseaseResult};

const HOURS_PER_DAY: f64 = 24.0;

// ── StochasticSource ──────────────────────────────────────────────────────────

/// Every random draw the citizen state machine makes.
///
/// All methods are total: they always return a value, never an error.
/// Durations are in days (fractional days allowed); hours are hours of the
/// day in `0..24`.
///
/// The simulation calls these strictly sequentially, so an implementation
/// backed by one RNG stream is reproducible for a given seed and population.
pub trait StochasticSource {
    /// Hour of day at which a citizen leaves home.
    fn wake_up_hour(&mut self) -> u32;

    /// Hour of day at which a citizen comes back from work.
    fn return_home_hour(&mut self) -> u32;

    fn is_immunosuppressed(&mut self) -> bool;
    fn is_smoker(&mut self) -> bool;
    fn drinks_alcohol(&mut self) -> bool;

    /// Progression gate: does this exposure turn into disease?
    fn is_getting_infected(&mut self, risk: RiskProfile) -> bool;

    /// Days from exposure to active disease.
    fn incubation_period_days(&mut self) -> f64;

    fn is_dropping_out_treatment(&mut self) -> bool;

    /// Days from becoming infectious to starting treatment.
    fn days_to_diagnosis(&mut self) -> f64;

    fn treatment_duration_days(&mut self) -> f64;

    /// Days from completing treatment to losing immunity.
    fn days_to_full_recovery(&mut self) -> f64;

    /// Exposure gate for one susceptible citizen sharing a cell with
    /// `infected_count` infectious citizens for one tick.
    fn is_getting_exposed(&mut self, infected_count: usize) -> bool;
}

// ── Randomizer ────────────────────────────────────────────────────────────────

/// Default [`StochasticSource`]: a single [`SimRng`] stream drawing from the
/// distributions configured in a [`ParameterStore`].
///
/// | Draw                | Distribution                                           |
/// |---------------------|--------------------------------------------------------|
/// | wake-up hour        | uniform integer `[initial_wake_up_hour, final_wake_up_hour]` |
/// | return-home hour    | uniform integer over [`Parameters::return_home_window`] |
/// | trait flags         | Bernoulli(share)                                       |
/// | progression         | Bernoulli(`infection_probability × risk multiplier`)   |
/// | incubation          | uniform days `[min_incubation_days, max_incubation_days]` |
/// | diagnosis delay     | exponential, mean `mean_diagnosis_delay` days          |
/// | dropout             | Bernoulli(`treatment_dropout_rate`)                    |
/// | treatment, recovery | constant hours / 24                                    |
/// | exposure            | Bernoulli(Wells–Riley, one-hour exposure)              |
pub struct Randomizer {
    rng:       SimRng,
    params:    ParameterStore,
    diagnosis: Exp<f64>,
}

impl Randomizer {
    /// Validate `params` and seed a fresh stream.
    pub fn new(params: impl Into<ParameterStore>, seed: u64) -> DiseaseResult<Self> {
        Self::with_rng(params, SimRng::new(seed))
    }

    /// Build on an existing stream (e.g. a [`SimRng::child`] for a replicate).
    pub fn with_rng(params: impl Into<ParameterStore>, rng: SimRng) -> DiseaseResult<Self> {
        let params = params.into();
        params.base().validate()?;
        let diagnosis = diagnosis_distribution(params.base())?;
        Ok(Self { rng, params, diagnosis })
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// Mutable access to the tunable overlay between runs.
    pub fn params_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }
}

fn diagnosis_distribution(params: &Parameters) -> DiseaseResult<Exp<f64>> {
    Exp::new(1.0 / params.mean_diagnosis_delay).map_err(|e| DiseaseError::InvalidParameter {
        name:   "mean_diagnosis_delay",
        reason: e.to_string(),
    })
}

impl StochasticSource for Randomizer {
    fn wake_up_hour(&mut self) -> u32 {
        let p = self.params.base();
        self.rng.gen_range(p.initial_wake_up_hour..=p.final_wake_up_hour)
    }

    fn return_home_hour(&mut self) -> u32 {
        let (earliest, latest) = self.params.base().return_home_window();
        self.rng.gen_range(earliest..=latest)
    }

    fn is_immunosuppressed(&mut self) -> bool {
        let share = self.params.base().immunosuppression_share;
        self.rng.gen_bool(share)
    }

    fn is_smoker(&mut self) -> bool {
        let share = self.params.base().smokers_share;
        self.rng.gen_bool(share)
    }

    fn drinks_alcohol(&mut self) -> bool {
        let share = self.params.base().alcohol_drinkers_share;
        self.rng.gen_bool(share)
    }

    fn is_getting_infected(&mut self, risk: RiskProfile) -> bool {
        let base = self.params.base();
        let multiplier = risk.multiplier(base.immunodeficiency_fold, base.risk_factor_adjustment);
        let p = self.params.infection_probability() * multiplier;
        trace!("progression gate p={p:.4} ({risk:?})");
        self.rng.gen_bool(p)
    }

    fn incubation_period_days(&mut self) -> f64 {
        let p = self.params.base();
        self.rng.gen_range(p.min_incubation_days..=p.max_incubation_days)
    }

    fn is_dropping_out_treatment(&mut self) -> bool {
        let rate = self.params.base().treatment_dropout_rate;
        self.rng.gen_bool(rate)
    }

    fn days_to_diagnosis(&mut self) -> f64 {
        self.diagnosis.sample(self.rng.inner())
    }

    fn treatment_duration_days(&mut self) -> f64 {
        self.params.base().treatment_duration_hours / HOURS_PER_DAY
    }

    fn days_to_full_recovery(&mut self) -> f64 {
        self.params.base().time_to_full_recovery_hours / HOURS_PER_DAY
    }

    fn is_getting_exposed(&mut self, infected_count: usize) -> bool {
        if infected_count == 0 {
            return false;
        }
        let p = self.params.airborne_exposure().hourly_probability(infected_count);
        self.rng.gen_bool(p)
    }
}
