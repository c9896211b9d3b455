//! Two independent Monte Carlo simulation exercises: autonomous cleaning
//! robots in a bounded rectangular room, and intra-host viral population
//! dynamics under optional drug treatment.
//!
//! The trial drivers in [`cleaning`] and [`infection`] are the API surface:
//! they return plain numeric results (scalars or per-time-step mean series)
//! that a caller renders. Core routines are generic over `rand::Rng` so a
//! deterministic generator can be injected.

pub mod cleaning;
pub mod config;
pub mod infection;
pub mod patient;
pub mod robot;
pub mod room;
pub mod stats;
pub mod virus;
