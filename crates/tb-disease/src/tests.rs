//! Unit tests for tb-disease.

#[cfg(test)]
mod params {
    use std::io::Write;

    use crate::params::{AVERAGE_ROOM_VENTILATION_RATE, INFECTION_PROBABILITY};
    use crate::{DiseaseError, ParameterStore, Parameters, load_parameters_json};

    #[test]
    fn defaults_are_valid() {
        let p = Parameters::default();
        p.validate().unwrap();
        assert_eq!(p.return_home_window(), (14, 19));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p = Parameters::from_json_str(r#"{ "infection_probability": 0.25, "exposed_count": 3 }"#)
            .unwrap();
        assert_eq!(p.infection_probability, 0.25);
        assert_eq!(p.exposed_count, 3);
        assert_eq!(p.susceptible_count, 1_000);
        assert_eq!(p.mean_diagnosis_delay, 60.0);
    }

    #[test]
    fn share_out_of_range_rejected() {
        let err = Parameters::from_json_str(r#"{ "smokers_share": 1.5 }"#).unwrap_err();
        assert!(matches!(err, DiseaseError::InvalidParameter { name: "smokers_share", .. }));
    }

    #[test]
    fn inverted_wake_window_rejected() {
        let p = Parameters { initial_wake_up_hour: 9, final_wake_up_hour: 6, ..Parameters::default() };
        assert!(matches!(
            p.validate(),
            Err(DiseaseError::InvalidParameter { name: "final_wake_up_hour", .. })
        ));
    }

    #[test]
    fn zero_room_volume_rejected() {
        let p = Parameters { average_room_volume: 0.0, ..Parameters::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = Parameters::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DiseaseError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "mean_diagnosis_delay": 30.0 }}"#).unwrap();
        let p = load_parameters_json(file.path()).unwrap();
        assert_eq!(p.mean_diagnosis_delay, 30.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_parameters_json(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DiseaseError::Io(_)));
    }

    #[test]
    fn store_seeds_tunables_from_base() {
        let store = ParameterStore::new(Parameters::default());
        assert_eq!(store.tunable_parameters().len(), 2);
        assert_eq!(store.parameter_value(INFECTION_PROBABILITY), Some(0.1));
        assert_eq!(store.parameter_value(AVERAGE_ROOM_VENTILATION_RATE), Some(2.0));
    }

    #[test]
    fn overlay_overrides_getters() {
        let mut store = ParameterStore::new(Parameters::default());
        store.set_parameter_value(INFECTION_PROBABILITY, 0.4);
        store.set_parameter_value(AVERAGE_ROOM_VENTILATION_RATE, 6.0);
        assert_eq!(store.infection_probability(), 0.4);
        assert_eq!(store.airborne_exposure().room_ventilation_rate, 6.0);
        // Base parameters are untouched.
        assert_eq!(store.base().infection_probability, 0.1);
    }
}

#[cfg(test)]
mod risk {
    use crate::RiskProfile;

    #[test]
    fn no_factors_is_one() {
        assert_eq!(RiskProfile::default().multiplier(10.0, 1.5), 1.0);
    }

    #[test]
    fn factors_compose() {
        let all = RiskProfile { immunosuppressed: true, smoker: true, drinks_alcohol: true };
        assert!((all.multiplier(10.0, 1.5) - 22.5).abs() < 1e-12);
        let smoker = RiskProfile { smoker: true, ..RiskProfile::default() };
        assert_eq!(smoker.multiplier(10.0, 1.5), 1.5);
    }
}

#[cfg(test)]
mod dose {
    use crate::{AirborneExposure, wells_riley_probability};

    fn default_room() -> AirborneExposure {
        AirborneExposure {
            quanta_production_rate:     1.25,
            pulmonary_ventilation_rate: 0.48,
            room_ventilation_rate:      2.0,
            room_volume:                45.0,
        }
    }

    #[test]
    fn nobody_infectious_is_zero() {
        assert_eq!(default_room().hourly_probability(0), 0.0);
    }

    #[test]
    fn one_infector_matches_formula() {
        let expected = 1.0 - (-(1.25 * 0.48) / 90.0_f64).exp();
        assert!((default_room().hourly_probability(1) - expected).abs() < 1e-12);
    }

    #[test]
    fn more_infectors_raise_risk() {
        let room = default_room();
        assert!(room.hourly_probability(5) > room.hourly_probability(1));
    }

    #[test]
    fn no_air_supply_is_zero() {
        assert_eq!(wells_riley_probability(3, 1.25, 0.48, 1.0, 0.0), 0.0);
    }
}

#[cfg(test)]
mod random {
    use crate::{Parameters, RiskProfile, Randomizer, StochasticSource};

    fn randomizer(params: Parameters, seed: u64) -> Randomizer {
        Randomizer::new(params, seed).unwrap()
    }

    #[test]
    fn hours_stay_in_window() {
        let mut r = randomizer(Parameters::default(), 1);
        for _ in 0..1_000 {
            assert!((5..=8).contains(&r.wake_up_hour()));
            assert!((14..=19).contains(&r.return_home_hour()));
        }
    }

    #[test]
    fn incubation_in_window() {
        let mut r = randomizer(Parameters::default(), 2);
        for _ in 0..1_000 {
            let d = r.incubation_period_days();
            assert!((14.0..=84.0).contains(&d), "got {d}");
        }
    }

    #[test]
    fn constant_durations() {
        let mut r = randomizer(Parameters::default(), 3);
        assert_eq!(r.treatment_duration_days(), 180.0);
        assert_eq!(r.days_to_full_recovery(), 730.0);
    }

    #[test]
    fn diagnosis_delay_mean_near_configured() {
        let mut r = randomizer(Parameters::default(), 4);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| r.days_to_diagnosis()).sum::<f64>() / n as f64;
        assert!((mean - 60.0).abs() < 3.0, "got {mean}");
    }

    #[test]
    fn certain_and_impossible_gates() {
        let always = Parameters {
            infection_probability:  1.0,
            treatment_dropout_rate: 1.0,
            smokers_share:          1.0,
            ..Parameters::default()
        };
        let mut r = randomizer(always, 5);
        assert!(r.is_getting_infected(RiskProfile::default()));
        assert!(r.is_dropping_out_treatment());
        assert!(r.is_smoker());

        let never = Parameters {
            infection_probability:   0.0,
            treatment_dropout_rate:  0.0,
            immunosuppression_share: 0.0,
            ..Parameters::default()
        };
        let mut r = randomizer(never, 5);
        let all = RiskProfile { immunosuppressed: true, smoker: true, drinks_alcohol: true };
        assert!(!r.is_getting_infected(all));
        assert!(!r.is_dropping_out_treatment());
        assert!(!r.is_immunosuppressed());
    }

    #[test]
    fn progression_probability_is_clamped() {
        // 0.2 × 22.5 would exceed 1.
        let p = Parameters { infection_probability: 0.2, ..Parameters::default() };
        let mut r = randomizer(p, 6);
        let all = RiskProfile { immunosuppressed: true, smoker: true, drinks_alcohol: true };
        assert!((0..100).all(|_| r.is_getting_infected(all)));
    }

    #[test]
    fn no_infected_never_exposes() {
        let mut r = randomizer(Parameters::default(), 7);
        assert!((0..1_000).all(|_| !r.is_getting_exposed(0)));
    }

    #[test]
    fn tuned_ventilation_changes_exposure() {
        let mut r = randomizer(Parameters::default(), 8);
        // Near-zero air supply drives the dose-response towards certainty.
        r.params_mut()
            .set_parameter_value(crate::params::AVERAGE_ROOM_VENTILATION_RATE, 1e-6);
        assert!((0..100).all(|_| r.is_getting_exposed(1)));
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = randomizer(Parameters::default(), 42);
        let mut b = randomizer(Parameters::default(), 42);
        for _ in 0..100 {
            assert_eq!(a.wake_up_hour(), b.wake_up_hour());
            assert_eq!(a.days_to_diagnosis(), b.days_to_diagnosis());
        }
    }

    #[test]
    fn invalid_parameters_rejected() {
        let p = Parameters { mean_diagnosis_delay: -1.0, ..Parameters::default() };
        assert!(Randomizer::new(p, 0).is_err());
    }
}
