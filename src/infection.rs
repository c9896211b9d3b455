//! Fixed-horizon trial drivers for the virus population simulation.

use crate::config::{InfectionParams, TreatmentParams};
use crate::patient::{Patient, TreatedPatient};
use crate::stats::TrialSeries;
use crate::virus::Virus;
use anyhow::{Context, Result, bail};
use rand::prelude::*;

/// Per-time-step mean populations from a drugged simulation.
pub struct TreatmentSeries {
    /// Mean total population at each time step.
    pub total: Vec<f64>,
    /// Mean population resistant to the administered drug at each time step.
    pub resistant: Vec<f64>,
}

/// Run `num_trials` untreated patients over the fixed time horizon and
/// return the mean total population at each time step.
///
/// Each trial wraps its own clone of the initial population in a fresh
/// [`Patient`]; particles are never mutated in place, so the template is
/// shared safely.
pub fn run_without_drug(params: &InfectionParams, rng: &mut impl Rng) -> Result<Vec<f64>> {
    params.validate().context("invalid infection parameters")?;

    let template: Vec<_> = (0..params.num_viruses)
        .map(|_| Virus::plain(params.max_birth_prob, params.clear_prob))
        .collect();

    let mut pop_series = TrialSeries::new(params.time_steps);

    for _ in 0..params.num_trials {
        let mut patient = Patient::new(template.clone(), params.max_pop)?;
        for i_step in 0..params.time_steps {
            let pop = patient.update(rng)?;
            pop_series.record(i_step, pop as f64);
        }
    }

    Ok(pop_series.means())
}

/// Run `num_trials` treated patients over the fixed time horizon, starting
/// the configured drug at the midpoint, and return the mean total and mean
/// drug-resistant population at each time step.
pub fn run_with_drug(params: &InfectionParams, rng: &mut impl Rng) -> Result<TreatmentSeries> {
    params.validate().context("invalid infection parameters")?;
    let Some(TreatmentParams {
        drug,
        mut_prob,
        resistances,
    }) = &params.treatment
    else {
        bail!("infection parameters carry no treatment section");
    };

    let template: Vec<_> = (0..params.num_viruses)
        .map(|_| {
            Virus::resistant(
                params.max_birth_prob,
                params.clear_prob,
                resistances.clone(),
                *mut_prob,
            )
        })
        .collect();

    let drug_list = [drug.clone()];
    let untreated_steps = params.time_steps / 2;

    let mut total_series = TrialSeries::new(params.time_steps);
    let mut resistant_series = TrialSeries::new(params.time_steps);

    for _ in 0..params.num_trials {
        let mut patient = TreatedPatient::new(template.clone(), params.max_pop)?;
        for i_step in 0..params.time_steps {
            if i_step == untreated_steps {
                patient.add_prescription(drug);
            }
            let pop = patient.update(rng)?;
            total_series.record(i_step, pop as f64);
            resistant_series.record(i_step, patient.resistant_pop(&drug_list) as f64);
        }
    }

    Ok(TreatmentSeries {
        total: total_series.means(),
        resistant: resistant_series.means(),
    })
}
