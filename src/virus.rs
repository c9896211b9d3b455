//! Virus particles: clearance and density-dependent reproduction.

use anyhow::Result;
use rand::prelude::*;
use rand_distr::Bernoulli;
use std::collections::BTreeMap;

/// Drug-name to resistance-flag mapping carried by resistant particles.
pub type Resistances = BTreeMap<String, bool>;

/// Strain-specific behavior of a virus particle.
#[derive(Debug, Clone, PartialEq)]
pub enum Strain {
    /// No drug interactions.
    Plain,
    /// Carries per-drug resistance flags; offspring flags flip independently
    /// with probability `mut_prob`.
    Resistant {
        resistances: Resistances,
        mut_prob: f64,
    },
}

/// A single virus particle.
///
/// `max_birth_prob` and `clear_prob` are probabilities in `[0, 1]`; particles
/// are never mutated in place, so a population template can be cloned freely
/// across trials.
#[derive(Debug, Clone, PartialEq)]
pub struct Virus {
    max_birth_prob: f64,
    clear_prob: f64,
    strain: Strain,
}

impl Virus {
    pub fn plain(max_birth_prob: f64, clear_prob: f64) -> Self {
        Self {
            max_birth_prob,
            clear_prob,
            strain: Strain::Plain,
        }
    }

    pub fn resistant(
        max_birth_prob: f64,
        clear_prob: f64,
        resistances: Resistances,
        mut_prob: f64,
    ) -> Self {
        Self {
            max_birth_prob,
            clear_prob,
            strain: Strain::Resistant {
                resistances,
                mut_prob,
            },
        }
    }

    pub fn max_birth_prob(&self) -> f64 {
        self.max_birth_prob
    }

    pub fn clear_prob(&self) -> f64 {
        self.clear_prob
    }

    /// Whether this particle is resistant to `drug`.
    ///
    /// Plain particles, and resistant particles with no flag recorded for
    /// `drug`, are not resistant.
    pub fn is_resistant_to(&self, drug: &str) -> bool {
        match &self.strain {
            Strain::Plain => false,
            Strain::Resistant { resistances, .. } => resistances.get(drug).copied().unwrap_or(false),
        }
    }

    /// Whether the particle is cleared from the patient this time step.
    pub fn clears(&self, rng: &mut impl Rng) -> Result<bool> {
        Ok(Bernoulli::new(self.clear_prob)?.sample(rng))
    }

    /// Attempt to reproduce at the given population density.
    ///
    /// Succeeds with probability `max_birth_prob * (1 - pop_density)`;
    /// `Ok(None)` is the expected no-offspring outcome, not an error. A
    /// resistant particle must be resistant to every drug in `active_drugs`
    /// to reproduce at all; its child's resistance flags each flip
    /// independently with probability `mut_prob`.
    pub fn reproduce(
        &self,
        pop_density: f64,
        active_drugs: &[String],
        rng: &mut impl Rng,
    ) -> Result<Option<Virus>> {
        if matches!(self.strain, Strain::Resistant { .. })
            && !active_drugs.iter().all(|drug| self.is_resistant_to(drug))
        {
            return Ok(None);
        }

        // Density can exceed 1 when the population overshoots the cap; the
        // birth probability floors at 0 there.
        let birth_prob = (self.max_birth_prob * (1.0 - pop_density)).clamp(0.0, 1.0);
        if !Bernoulli::new(birth_prob)?.sample(rng) {
            return Ok(None);
        }

        let strain = match &self.strain {
            Strain::Plain => Strain::Plain,
            Strain::Resistant {
                resistances,
                mut_prob,
            } => {
                let flip_dist = Bernoulli::new(*mut_prob)?;
                let child_resistances = resistances
                    .iter()
                    .map(|(drug, &flag)| {
                        let flag = if flip_dist.sample(rng) { !flag } else { flag };
                        (drug.clone(), flag)
                    })
                    .collect();
                Strain::Resistant {
                    resistances: child_resistances,
                    mut_prob: *mut_prob,
                }
            }
        };

        Ok(Some(Virus {
            max_birth_prob: self.max_birth_prob,
            clear_prob: self.clear_prob,
            strain,
        }))
    }
}
