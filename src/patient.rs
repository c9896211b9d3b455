//! Patients hosting a virus population, with and without drug treatment.

use crate::virus::Virus;
use anyhow::{Result, bail};
use rand::prelude::*;

/// An untreated patient hosting a population of virus particles.
pub struct Patient {
    viruses: Vec<Virus>,
    max_pop: usize,
}

impl Patient {
    pub fn new(viruses: Vec<Virus>, max_pop: usize) -> Result<Self> {
        if max_pop == 0 {
            bail!("maximum population must be positive");
        }
        Ok(Self { viruses, max_pop })
    }

    pub fn viruses(&self) -> &[Virus] {
        &self.viruses
    }

    pub fn max_pop(&self) -> usize {
        self.max_pop
    }

    pub fn total_pop(&self) -> usize {
        self.viruses.len()
    }

    /// Advance the population by one time step and return its new size.
    ///
    /// Phases run in strict order: clearance removes particles, the density
    /// is snapshotted once from the survivors, then every survivor attempts
    /// to reproduce at that density. Children are appended only after all
    /// survivors have been evaluated, so a child never reproduces on the
    /// tick it is born.
    pub fn update(&mut self, rng: &mut impl Rng) -> Result<usize> {
        self.update_with_drugs(&[], rng)
    }

    fn update_with_drugs(&mut self, active_drugs: &[String], rng: &mut impl Rng) -> Result<usize> {
        let mut survivors = Vec::with_capacity(self.viruses.len());
        for virus in self.viruses.drain(..) {
            if !virus.clears(rng)? {
                survivors.push(virus);
            }
        }

        let pop_density = survivors.len() as f64 / self.max_pop as f64;

        let mut children = Vec::new();
        for virus in &survivors {
            if let Some(child) = virus.reproduce(pop_density, active_drugs, rng)? {
                children.push(child);
            }
        }
        survivors.append(&mut children);

        self.viruses = survivors;
        Ok(self.viruses.len())
    }
}

/// A patient taking drugs; the virus population can acquire resistance.
pub struct TreatedPatient {
    patient: Patient,
    prescriptions: Vec<String>,
}

impl TreatedPatient {
    pub fn new(viruses: Vec<Virus>, max_pop: usize) -> Result<Self> {
        Ok(Self {
            patient: Patient::new(viruses, max_pop)?,
            prescriptions: Vec::new(),
        })
    }

    pub fn viruses(&self) -> &[Virus] {
        self.patient.viruses()
    }

    pub fn total_pop(&self) -> usize {
        self.patient.total_pop()
    }

    /// Administer a drug; it acts on all subsequent time steps. Prescribing
    /// an already-administered drug has no effect.
    pub fn add_prescription(&mut self, drug: &str) {
        if !self.prescriptions.iter().any(|d| d == drug) {
            self.prescriptions.push(drug.to_string());
        }
    }

    /// Drugs administered so far, in prescription order.
    pub fn prescriptions(&self) -> &[String] {
        &self.prescriptions
    }

    /// Number of particles resistant to every drug in `drugs`.
    pub fn resistant_pop(&self, drugs: &[String]) -> usize {
        self.patient
            .viruses()
            .iter()
            .filter(|virus| drugs.iter().all(|drug| virus.is_resistant_to(drug)))
            .count()
    }

    /// Advance the population by one time step, accounting for the
    /// administered drugs, and return its new size.
    pub fn update(&mut self, rng: &mut impl Rng) -> Result<usize> {
        self.patient.update_with_drugs(&self.prescriptions, rng)
    }
}
