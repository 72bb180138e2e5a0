//! Validation for chromosomes.

use crate::chromosome::{Chromosome, GENE_COUNT};
use gasim_core::{Error, Result, Situation};

/// Validate that every response points at an existing state
pub fn validate_chromosome(chromosome: &Chromosome) -> Result<()> {
    for (state, gene) in chromosome.genes.iter().enumerate() {
        for situation in Situation::ALL {
            let response = gene.response(situation);
            if usize::from(response.next_state) >= GENE_COUNT {
                return Err(Error::Validation(format!(
                    "gene {} {:?} jumps to state {}, only {} states exist",
                    state, situation, response.next_state, GENE_COUNT
                )));
            }
        }
    }

    Ok(())
}
