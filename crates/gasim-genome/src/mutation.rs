//! Mutation operators for chromosomes.

use crate::chromosome::{random_action, random_state, Chromosome};
use gasim_core::{roll, GeneticsConfig, SimRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Probability that any single action or next-state field is redrawn
    pub rate: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self { rate: 0.03 }
    }
}

impl From<&GeneticsConfig> for MutationConfig {
    fn from(config: &GeneticsConfig) -> Self {
        Self {
            rate: config.mutation_rate,
        }
    }
}

pub struct Mutator {
    config: MutationConfig,
}

impl Mutator {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    /// Mutate a chromosome in place.
    ///
    /// Every (gene, situation) pair gets two independent trials: one redraws the
    /// action, the other redraws the next state. A redraw may land on the old
    /// value. Returns the number of trials that fired.
    pub fn mutate(&self, chromosome: &mut Chromosome, rng: &mut SimRng) -> usize {
        let mut fired = 0;
        for gene in &mut chromosome.genes {
            for response in &mut gene.responses {
                if roll(self.config.rate, rng) {
                    response.action = random_action(rng);
                    fired += 1;
                }
                if roll(self.config.rate, rng) {
                    response.next_state = random_state(rng);
                    fired += 1;
                }
            }
        }

        trace!(fired, rate = self.config.rate, "chromosome mutated");
        fired
    }

    /// Copy a parent chromosome and mutate the copy
    pub fn offspring(&self, parent: &Chromosome, rng: &mut SimRng) -> Chromosome {
        let mut child = parent.clone();
        self.mutate(&mut child, rng);
        child
    }
}
