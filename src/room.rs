//! Continuous positions and the tiled rectangular room they live in.

use anyhow::{Result, bail};
use rand::prelude::*;
use rand_distr::Uniform;

/// A location in a two-dimensional room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Position reached after one clock tick of travel at `speed` along
    /// `angle` (degrees, 0 = +y, 90 = +x).
    ///
    /// Does not test whether the result fits inside any room.
    pub fn new_position(&self, angle: f64, speed: f64) -> Self {
        let rad = angle.to_radians();
        Self {
            x: self.x + speed * rad.sin(),
            y: self.y + speed * rad.cos(),
        }
    }
}

/// A rectangular region of `width x height` tiles, each clean or dirty.
///
/// All tiles are dirty at creation.
pub struct Room {
    width: usize,
    height: usize,
    cleaned: Vec<bool>,
    n_cleaned: usize,
}

impl Room {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("room dimensions must be positive, got {width}x{height}");
        }
        Ok(Self {
            width,
            height,
            cleaned: vec![false; width * height],
            n_cleaned: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_tiles(&self) -> usize {
        self.width * self.height
    }

    pub fn num_cleaned_tiles(&self) -> usize {
        self.n_cleaned
    }

    pub fn cleaned_fraction(&self) -> f64 {
        self.n_cleaned as f64 / self.num_tiles() as f64
    }

    /// Whether the continuous position lies inside the room
    /// (half-open bounds: `0 <= x < width`, `0 <= y < height`).
    pub fn is_in_room(&self, pos: Position) -> bool {
        pos.x() >= 0.0
            && pos.y() >= 0.0
            && pos.x() < self.width as f64
            && pos.y() < self.height as f64
    }

    /// Whether the tile `(m, n)` has been cleaned.
    ///
    /// # Errors
    /// Fails if `(m, n)` is not a valid tile index.
    pub fn is_tile_cleaned(&self, m: usize, n: usize) -> Result<bool> {
        if m >= self.width || n >= self.height {
            bail!(
                "tile ({m}, {n}) is outside the {}x{} room",
                self.width,
                self.height
            );
        }
        Ok(self.cleaned[m * self.height + n])
    }

    /// Mark the tile under `pos` as cleaned.
    ///
    /// # Errors
    /// Fails if `pos` is outside the room.
    pub fn mark_cleaned(&mut self, pos: Position) -> Result<()> {
        if !self.is_in_room(pos) {
            bail!("cannot clean tile at out-of-room position {pos:?}");
        }
        let m = pos.x() as usize;
        let n = pos.y() as usize;
        let tile = &mut self.cleaned[m * self.height + n];
        if !*tile {
            *tile = true;
            self.n_cleaned += 1;
        }
        Ok(())
    }

    /// Uniformly random continuous position inside the room.
    pub fn random_position(&self, rng: &mut impl Rng) -> Result<Position> {
        let x_dist = Uniform::new(0.0, self.width as f64)?;
        let y_dist = Uniform::new(0.0, self.height as f64)?;
        Ok(Position::new(x_dist.sample(rng), y_dist.sample(rng)))
    }
}
