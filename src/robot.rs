//! Cleaning robots and their movement strategies.

use crate::room::{Position, Room};
use anyhow::Result;
use rand::prelude::*;
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

/// Movement policy applied on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Move forward along the current direction; on hitting a wall, spend the
    /// tick redrawing a uniformly random direction instead.
    Standard,
    /// Redraw the direction from the feasible cardinal directions before
    /// every move.
    RandomWalk,
}

/// A robot cleaning a particular room.
///
/// Holds a position, a direction in degrees `[0, 360)`, and a fixed speed.
/// Placed at a random position with a random direction, and cleans the tile
/// it starts on.
pub struct Robot {
    position: Position,
    direction: f64,
    speed: f64,
    strategy: Strategy,
}

impl Robot {
    pub fn new(
        room: &mut Room,
        speed: f64,
        strategy: Strategy,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let position = room.random_position(rng)?;
        let direction = Uniform::new(0.0, 360.0)?.sample(rng);
        room.mark_cleaned(position)?;
        Ok(Self {
            position,
            direction,
            speed,
            strategy,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Set the direction, in degrees.
    pub fn set_direction(&mut self, direction: f64) {
        self.direction = direction;
    }

    /// Advance one time step: move and clean the tile landed on, or adjust
    /// direction if blocked.
    pub fn step(&mut self, room: &mut Room, rng: &mut impl Rng) -> Result<()> {
        match self.strategy {
            Strategy::Standard => self.step_standard(room, rng),
            Strategy::RandomWalk => self.step_random_walk(room, rng),
        }
    }

    fn step_standard(&mut self, room: &mut Room, rng: &mut impl Rng) -> Result<()> {
        let next = self.position.new_position(self.direction, self.speed);
        if room.is_in_room(next) {
            self.position = next;
            room.mark_cleaned(next)?;
        } else {
            // The direction change consumes the tick.
            self.direction = Uniform::new(0.0, 360.0)?.sample(rng);
        }
        Ok(())
    }

    fn step_random_walk(&mut self, room: &mut Room, rng: &mut impl Rng) -> Result<()> {
        let candidates = self.candidate_directions(room);
        // No feasible move: silent no-op for this tick.
        let Some(&direction) = candidates.choose(rng) else {
            return Ok(());
        };
        self.direction = direction;
        let next = self.position.new_position(direction, self.speed);
        // The feasibility pre-check can miss edge rounding; keep the new
        // direction but skip the move in that case.
        if room.is_in_room(next) {
            self.position = next;
            room.mark_cleaned(next)?;
        }
        Ok(())
    }

    /// Cardinal directions a random-walk move may take from the current
    /// state (0 = +y, 90 = +x, 180 = -y, 270 = -x): those that keep the
    /// robot inside the room when moving `speed`, excluding the one
    /// numerically equal to the current stored direction.
    pub fn candidate_directions(&self, room: &Room) -> Vec<f64> {
        let x = self.position.x();
        let y = self.position.y();

        let mut candidates = Vec::with_capacity(4);
        if y < room.height() as f64 - self.speed {
            candidates.push(0.0);
        }
        if x < room.width() as f64 - self.speed {
            candidates.push(90.0);
        }
        if y >= self.speed {
            candidates.push(180.0);
        }
        if x >= self.speed {
            candidates.push(270.0);
        }
        candidates.retain(|&angle| angle != self.direction);
        candidates
    }
}
