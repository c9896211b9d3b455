//! Simulation parameters, loaded from a TOML file and validated before use.

use crate::robot::Strategy;
use crate::virus::Resistances;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Parameters of the robot cleaning simulation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CleaningParams {
    /// Number of robots in the room.
    pub num_robots: usize,
    /// Robot speed, in tiles per tick.
    pub speed: f64,
    /// Room width, in tiles.
    pub width: usize,
    /// Room height, in tiles.
    pub height: usize,
    /// Fraction of the room that must be cleaned to end a trial.
    pub min_coverage: f64,
    /// Number of independent trials.
    pub num_trials: usize,
    /// Movement strategy shared by all robots.
    pub strategy: Strategy,
}

impl CleaningParams {
    pub fn validate(&self) -> Result<()> {
        check_num(self.num_robots, 1..10_000).context("invalid number of robots")?;
        if self.speed <= 0.0 {
            bail!("speed must be positive, but is {}", self.speed);
        }
        check_num(self.width, 1..10_000).context("invalid room width")?;
        check_num(self.height, 1..10_000).context("invalid room height")?;
        check_num(self.min_coverage, 0.0..=1.0).context("invalid minimum coverage")?;
        check_num(self.num_trials, 1..1_000_000).context("invalid number of trials")?;
        Ok(())
    }
}

/// Drug treatment applied in the drugged virus simulation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TreatmentParams {
    /// Name of the drug administered at the midpoint of the horizon.
    pub drug: String,
    /// Probability of each resistance flag flipping in an offspring.
    pub mut_prob: f64,
    /// Initial per-drug resistance flags of every particle.
    pub resistances: Resistances,
}

/// Parameters of the virus population simulation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct InfectionParams {
    /// Initial number of virus particles per patient.
    pub num_viruses: usize,
    /// Population cap entering the density calculation.
    pub max_pop: usize,
    /// Maximum reproduction probability.
    pub max_birth_prob: f64,
    /// Per-step clearance probability.
    pub clear_prob: f64,
    /// Number of independent patients.
    pub num_trials: usize,
    /// Length of the fixed time horizon.
    #[serde(default = "default_time_steps")]
    pub time_steps: usize,
    /// Treatment section; required for the drugged simulation.
    pub treatment: Option<TreatmentParams>,
}

fn default_time_steps() -> usize {
    300
}

impl InfectionParams {
    pub fn validate(&self) -> Result<()> {
        check_num(self.num_viruses, 1..1_000_000).context("invalid number of viruses")?;
        check_num(self.max_pop, 1..10_000_000).context("invalid maximum population")?;
        check_num(self.max_birth_prob, 0.0..=1.0).context("invalid maximum birth probability")?;
        check_num(self.clear_prob, 0.0..=1.0).context("invalid clearance probability")?;
        check_num(self.num_trials, 1..1_000_000).context("invalid number of trials")?;
        check_num(self.time_steps, 1..1_000_000).context("invalid number of time steps")?;
        if let Some(treatment) = &self.treatment {
            if treatment.drug.is_empty() {
                bail!("drug name must not be empty");
            }
            check_num(treatment.mut_prob, 0.0..=1.0).context("invalid mutation probability")?;
        }
        Ok(())
    }
}

/// Top-level configuration consumed by the binary.
///
/// Either section may be omitted; the corresponding subcommand then fails
/// with a descriptive error.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seed for the random number generator; random when omitted.
    pub seed: Option<u64>,

    pub cleaning: Option<CleaningParams>,
    pub infection: Option<InfectionParams>,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if any
    /// parameter is out of range.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to parse config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(cleaning) = &self.cleaning {
            cleaning.validate().context("invalid [cleaning] section")?;
        }
        if let Some(infection) = &self.infection {
            infection.validate().context("invalid [infection] section")?;
        }
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
