//! Genetic model for cell brains.
//!
//! A brain is a 16-state finite-state machine. Each state (gene) maps the four
//! situations a cell can perceive to an action and a next state. Chromosomes are
//! fixed-size tables, so mutation can only rewrite fields, never change length.

pub mod chromosome;
pub mod mutation;
pub mod validation;

pub use chromosome::{Chromosome, Gene, Response, GENE_COUNT};
pub use mutation::{MutationConfig, Mutator};
pub use validation::validate_chromosome;
