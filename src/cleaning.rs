//! Trial driver for the robot cleaning simulation.

use crate::config::CleaningParams;
use crate::robot::Robot;
use crate::room::Room;
use crate::stats::Accumulator;
use anyhow::{Context, Result};
use rand::prelude::*;

/// Run `num_trials` independent trials and return the mean number of time
/// steps needed to clean `min_coverage` of the room.
///
/// Each trial builds a fresh room and a fresh set of robots; all robots
/// advance once per global tick until the coverage target is met. A trial
/// whose initial robot placement already meets the target counts zero steps.
///
/// An unreachable coverage target makes this loop forever; that is a property
/// of the parameters, not of the implementation.
pub fn run_trials(params: &CleaningParams, rng: &mut impl Rng) -> Result<f64> {
    params.validate().context("invalid cleaning parameters")?;

    let mut steps_acc = Accumulator::new();

    for _ in 0..params.num_trials {
        let mut room = Room::new(params.width, params.height)?;

        let mut robots = Vec::with_capacity(params.num_robots);
        for _ in 0..params.num_robots {
            robots.push(Robot::new(&mut room, params.speed, params.strategy, rng)?);
        }

        let mut n_steps: usize = 0;
        while room.cleaned_fraction() < params.min_coverage {
            n_steps += 1;
            for robot in &mut robots {
                robot.step(&mut room, rng)?;
            }
        }

        steps_acc.add(n_steps as f64);
    }

    log::debug!(
        "per-trial steps: mean {:.2}, std dev {:.2}",
        steps_acc.mean(),
        steps_acc.std_dev()
    );

    Ok(steps_acc.mean())
}

/// Mean cleaning time for each robot count in `robot_counts`, with the other
/// parameters taken from `params`.
///
/// Returns one mean per count, in order, for an external renderer.
pub fn sweep_num_robots(
    params: &CleaningParams,
    robot_counts: &[usize],
    rng: &mut impl Rng,
) -> Result<Vec<f64>> {
    let mut means = Vec::with_capacity(robot_counts.len());
    for &num_robots in robot_counts {
        log::info!("running {num_robots} robots");
        let params = CleaningParams {
            num_robots,
            ..params.clone()
        };
        means.push(run_trials(&params, rng)?);
    }
    Ok(means)
}

/// Mean cleaning time for rooms of different aspect ratios but (roughly)
/// constant area.
///
/// For each width, the height is `total_tiles / width` (integer division).
/// Returns `(aspect_ratio, mean_steps)` pairs, in order.
pub fn sweep_aspect_ratio(
    params: &CleaningParams,
    widths: &[usize],
    total_tiles: usize,
    rng: &mut impl Rng,
) -> Result<Vec<(f64, f64)>> {
    let mut results = Vec::with_capacity(widths.len());
    for &width in widths {
        let height = total_tiles / width;
        log::info!("running a {width}x{height} room");
        let params = CleaningParams {
            width,
            height,
            ..params.clone()
        };
        let aspect_ratio = width as f64 / height as f64;
        results.push((aspect_ratio, run_trials(&params, rng)?));
    }
    Ok(results)
}
