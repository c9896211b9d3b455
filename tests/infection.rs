use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use stochsim::config::{InfectionParams, TreatmentParams};
use stochsim::infection::{run_with_drug, run_without_drug};
use stochsim::patient::{Patient, TreatedPatient};
use stochsim::virus::{Resistances, Virus};

fn rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

fn resistances(pairs: &[(&str, bool)]) -> Resistances {
    pairs
        .iter()
        .map(|&(drug, flag)| (drug.to_string(), flag))
        .collect()
}

fn params() -> InfectionParams {
    InfectionParams {
        num_viruses: 10,
        max_pop: 100,
        max_birth_prob: 0.3,
        clear_prob: 0.1,
        num_trials: 3,
        time_steps: 20,
        treatment: None,
    }
}

#[test]
fn reproduction_rate_matches_birth_probability() {
    let mut rng = rng(3);
    let virus = Virus::plain(0.6, 0.0);
    let n_draws = 20_000;

    for pop_density in [0.0, 0.5, 1.0] {
        let expected = 0.6 * (1.0 - pop_density);
        let mut n_children = 0;
        for _ in 0..n_draws {
            if virus.reproduce(pop_density, &[], &mut rng).unwrap().is_some() {
                n_children += 1;
            }
        }
        let observed = n_children as f64 / n_draws as f64;
        assert!(
            (observed - expected).abs() < 0.02,
            "density {pop_density}: observed {observed}, expected {expected}"
        );
    }
}

#[test]
fn no_offspring_at_full_density() {
    let mut rng = rng(5);
    let virus = Virus::plain(1.0, 0.0);
    for _ in 0..1000 {
        assert!(virus.reproduce(1.0, &[], &mut rng).unwrap().is_none());
    }
}

#[test]
fn susceptible_virus_never_reproduces_under_drug() {
    let mut rng = rng(7);
    let virus = Virus::resistant(1.0, 0.0, resistances(&[("guttagonol", false)]), 0.0);
    let drugs = vec!["guttagonol".to_string()];
    for _ in 0..1000 {
        assert!(virus.reproduce(0.0, &drugs, &mut rng).unwrap().is_none());
    }
}

#[test]
fn unknown_drug_means_not_resistant() {
    let virus = Virus::resistant(0.5, 0.5, resistances(&[("guttagonol", true)]), 0.0);
    assert!(virus.is_resistant_to("guttagonol"));
    assert!(!virus.is_resistant_to("srinol"));
    assert!(!Virus::plain(0.5, 0.5).is_resistant_to("guttagonol"));
}

#[test]
fn child_resistances_flip_with_certain_mutation() {
    let mut rng = rng(11);
    let parent = Virus::resistant(
        1.0,
        0.0,
        resistances(&[("guttagonol", true), ("srinol", false)]),
        1.0,
    );
    let child = parent.reproduce(0.0, &[], &mut rng).unwrap().unwrap();
    assert!(!child.is_resistant_to("guttagonol"));
    assert!(child.is_resistant_to("srinol"));
}

#[test]
fn child_resistances_are_inherited_without_mutation() {
    let mut rng = rng(13);
    let parent = Virus::resistant(
        1.0,
        0.0,
        resistances(&[("guttagonol", true), ("srinol", false)]),
        0.0,
    );
    let child = parent.reproduce(0.0, &[], &mut rng).unwrap().unwrap();
    assert_eq!(child, parent);
}

#[test]
fn zero_max_pop_is_rejected() {
    let viruses = vec![Virus::plain(0.5, 0.5)];
    assert!(Patient::new(viruses.clone(), 0).is_err());
    assert!(TreatedPatient::new(viruses, 0).is_err());
}

#[test]
fn population_never_shrinks_without_clearance() {
    let mut rng = rng(17);
    let viruses = vec![Virus::plain(0.5, 0.0); 10];
    let mut patient = Patient::new(viruses, 1000).unwrap();

    let mut prev_pop = patient.total_pop();
    for _ in 0..50 {
        let pop = patient.update(&mut rng).unwrap();
        assert!(pop >= prev_pop);
        prev_pop = pop;
    }
}

#[test]
fn certain_clearance_empties_patient_in_one_step() {
    let mut rng = rng(19);
    let viruses = vec![Virus::plain(1.0, 1.0); 50];
    let mut patient = Patient::new(viruses, 100).unwrap();
    assert_eq!(patient.update(&mut rng).unwrap(), 0);
    assert_eq!(patient.total_pop(), 0);
}

#[test]
fn saturated_patient_stays_at_one_particle() {
    let mut rng = rng(23);
    // Density is always 1, so reproduction probability is 0; clearance
    // probability 0 keeps the particle alive.
    let viruses = vec![Virus::plain(1.0, 0.0)];
    let mut patient = Patient::new(viruses, 1).unwrap();
    for _ in 0..100 {
        assert_eq!(patient.update(&mut rng).unwrap(), 1);
    }
}

#[test]
fn prescriptions_are_idempotent_and_ordered() {
    let viruses = vec![Virus::plain(0.5, 0.5)];
    let mut patient = TreatedPatient::new(viruses, 10).unwrap();
    assert!(patient.prescriptions().is_empty());

    patient.add_prescription("guttagonol");
    patient.add_prescription("srinol");
    patient.add_prescription("guttagonol");
    assert_eq!(patient.prescriptions(), ["guttagonol", "srinol"]);
}

#[test]
fn resistant_pop_counts_fully_resistant_particles() {
    let viruses = vec![
        Virus::resistant(0.5, 0.5, resistances(&[("guttagonol", true), ("srinol", true)]), 0.0),
        Virus::resistant(0.5, 0.5, resistances(&[("guttagonol", true)]), 0.0),
        Virus::resistant(0.5, 0.5, resistances(&[("guttagonol", false)]), 0.0),
        Virus::plain(0.5, 0.5),
    ];
    let patient = TreatedPatient::new(viruses, 10).unwrap();

    let gut = vec!["guttagonol".to_string()];
    let both = vec!["guttagonol".to_string(), "srinol".to_string()];
    assert_eq!(patient.resistant_pop(&gut), 2);
    assert_eq!(patient.resistant_pop(&both), 1);
    assert_eq!(patient.resistant_pop(&[]), 4);
}

#[test]
fn drug_blocks_reproduction_in_treated_patient() {
    let mut rng = rng(29);
    let viruses = vec![
        Virus::resistant(1.0, 0.0, resistances(&[("guttagonol", false)]), 0.0);
        10
    ];
    let mut patient = TreatedPatient::new(viruses, 1000).unwrap();
    patient.add_prescription("guttagonol");

    // No clearance and no eligible reproduction: the population is frozen.
    for _ in 0..20 {
        assert_eq!(patient.update(&mut rng).unwrap(), 10);
    }
}

#[test]
fn undrugged_series_has_one_mean_per_step() {
    let mut rng = rng(31);
    let means = run_without_drug(&params(), &mut rng).unwrap();
    assert_eq!(means.len(), 20);
    assert!(means.iter().all(|&mean| mean >= 0.0));
}

#[test]
fn certain_clearance_yields_all_zero_means() {
    let mut rng = rng(37);
    let params = InfectionParams {
        clear_prob: 1.0,
        ..params()
    };
    let means = run_without_drug(&params, &mut rng).unwrap();
    assert!(means.iter().all(|&mean| mean == 0.0));
}

#[test]
fn drugged_series_tracks_total_and_resistant() {
    let mut rng = rng(41);
    let params = InfectionParams {
        max_birth_prob: 0.5,
        clear_prob: 0.2,
        treatment: Some(TreatmentParams {
            drug: "guttagonol".to_string(),
            mut_prob: 0.0,
            resistances: resistances(&[("guttagonol", false)]),
        }),
        ..params()
    };
    let series = run_with_drug(&params, &mut rng).unwrap();
    assert_eq!(series.total.len(), 20);
    assert_eq!(series.resistant.len(), 20);
    // Nothing is resistant and nothing mutates.
    assert!(series.resistant.iter().all(|&mean| mean == 0.0));
    // Once the drug lands every particle stops reproducing and the
    // population decays.
    assert!(series.total[19] < series.total[9]);
}

#[test]
fn drugged_run_requires_a_treatment_section() {
    let mut rng = rng(43);
    assert!(run_with_drug(&params(), &mut rng).is_err());
}

#[test]
fn invalid_infection_parameters_are_rejected() {
    let mut rng = rng(47);
    let bad = InfectionParams {
        max_pop: 0,
        ..params()
    };
    assert!(run_without_drug(&bad, &mut rng).is_err());

    let bad = InfectionParams {
        clear_prob: 1.5,
        ..params()
    };
    assert!(run_without_drug(&bad, &mut rng).is_err());
}
