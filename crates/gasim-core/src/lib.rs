//! Core types and utilities for the gasim artificial-life simulation.

pub mod types;
pub mod config;
pub mod error;
pub mod random;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use random::{random_position, roll, seeded_rng, SimRng};
