use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use std::path::PathBuf;
use stochsim::{cleaning, config::Config, infection};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the robot cleaning simulation.
    Robots,

    /// Run the virus population simulation.
    Virus,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let config = Config::from_file(&args.config).context("failed to load config")?;
    log::info!("{config:#?}");

    let mut rng = match config.seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::try_from_os_rng()?,
    };

    match args.command {
        Command::Robots => run_robots(&config, &mut rng)?,
        Command::Virus => run_virus(&config, &mut rng)?,
    }

    Ok(())
}

fn run_robots(config: &Config, rng: &mut impl Rng) -> Result<()> {
    let Some(params) = &config.cleaning else {
        bail!("config has no [cleaning] section");
    };

    let mean_steps = cleaning::run_trials(params, rng)?;
    log::info!(
        "{} {:?} robots cleaned {:.0}% of a {}x{} room in {mean_steps:.2} mean steps",
        params.num_robots,
        params.strategy,
        100.0 * params.min_coverage,
        params.width,
        params.height,
    );
    println!("{mean_steps:.6}");

    Ok(())
}

fn run_virus(config: &Config, rng: &mut impl Rng) -> Result<()> {
    let Some(params) = &config.infection else {
        bail!("config has no [infection] section");
    };

    match &params.treatment {
        None => {
            let means = infection::run_without_drug(params, rng)?;
            println!("#step         mean_pop");
            for (i_step, mean) in means.iter().enumerate() {
                println!("{i_step:5} {mean:16.6}");
            }
        }
        Some(treatment) => {
            log::info!(
                "administering {} at step {}",
                treatment.drug,
                params.time_steps / 2
            );
            let series = infection::run_with_drug(params, rng)?;
            println!("#step         mean_pop   mean_resistant");
            for (i_step, (total, resistant)) in
                series.total.iter().zip(series.resistant.iter()).enumerate()
            {
                println!("{i_step:5} {total:16.6} {resistant:16.6}");
            }
        }
    }

    Ok(())
}
