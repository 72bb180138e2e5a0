//! Chromosome structure: the finite-state-machine transition table of a cell.

use crate::validation::validate_chromosome;
use gasim_core::{Action, Error, Result, SimRng, Situation};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of genes, and therefore FSM states, in every chromosome
pub const GENE_COUNT: usize = 16;

/// The brain's answer for one (state, situation) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub action: Action,
    pub next_state: u8,
}

impl Response {
    pub fn new(action: Action, next_state: u8) -> Self {
        Self { action, next_state }
    }

    pub fn random(rng: &mut SimRng) -> Self {
        Self {
            action: random_action(rng),
            next_state: random_state(rng),
        }
    }

    /// 6-bit packing used by the colour fingerprint
    fn packed(&self) -> u32 {
        (self.action.index() as u32 * 16 + u32::from(self.next_state) % 16) & 0x3f
    }
}

/// Responses for one state, indexed by situation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub responses: [Response; Situation::COUNT],
}

impl Gene {
    /// A gene giving the same response to every situation
    pub fn uniform(response: Response) -> Self {
        Self {
            responses: [response; Situation::COUNT],
        }
    }

    pub fn response(&self, situation: Situation) -> Response {
        self.responses[situation.index()]
    }

    pub fn set_response(&mut self, situation: Situation, response: Response) {
        self.responses[situation.index()] = response;
    }
}

/// A complete cell genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    pub genes: [Gene; GENE_COUNT],
}

impl Chromosome {
    /// Fully random brain
    pub fn random(rng: &mut SimRng) -> Self {
        let mut genes = [Gene::uniform(Response::new(Action::TurnLeft, 0)); GENE_COUNT];
        for gene in &mut genes {
            for response in &mut gene.responses {
                *response = Response::random(rng);
            }
        }
        Self { genes }
    }

    /// Hand-designed forager.
    ///
    /// States 0..14 walk forward over empty slots and food, advancing one state
    /// per step, and turn left back to state 0 on meeting life or a wall. State 15
    /// keeps eating straight ahead and otherwise turns left back to state 0. The
    /// result walks growing squares until something blocks it.
    pub fn seed() -> Self {
        let turn_back = Response::new(Action::TurnLeft, 0);
        let mut genes = [Gene::uniform(turn_back); GENE_COUNT];

        for (state, gene) in genes.iter_mut().enumerate().take(GENE_COUNT - 1) {
            let advance = Response::new(Action::MoveForward, state as u8 + 1);
            gene.set_response(Situation::Empty, advance);
            gene.set_response(Situation::Food, advance);
        }
        genes[GENE_COUNT - 1].set_response(
            Situation::Food,
            Response::new(Action::MoveForward, GENE_COUNT as u8 - 1),
        );

        Self { genes }
    }

    /// Consult the brain. Panics if `state` is not a valid state index.
    pub fn respond(&self, state: u8, situation: Situation) -> Response {
        self.genes[usize::from(state)].response(situation)
    }

    /// 24-bit visual fingerprint.
    ///
    /// Each gene packs its four responses into a 24-bit word and the words are
    /// XORed together. Identical chromosomes always agree; distinct ones can
    /// collide when gene words cancel.
    pub fn color(&self) -> u32 {
        self.genes.iter().fold(0u32, |value, gene| {
            let series = gene
                .responses
                .iter()
                .fold(0u32, |series, response| (series << 6) | response.packed());
            debug_assert!(series < (1 << 24));
            value ^ series
        })
    }

    /// Number of (gene, situation) fields whose action or next state differ
    pub fn differing_fields(&self, other: &Chromosome) -> usize {
        self.genes
            .iter()
            .zip(other.genes.iter())
            .flat_map(|(a, b)| a.responses.iter().zip(b.responses.iter()))
            .map(|(a, b)| {
                usize::from(a.action != b.action) + usize::from(a.next_state != b.next_state)
            })
            .sum()
    }

    /// Decode a chromosome from JSON and check that every state index is valid
    pub fn from_json(json: &str) -> Result<Self> {
        let chromosome: Chromosome = serde_json::from_str(json)?;
        validate_chromosome(&chromosome)?;
        Ok(chromosome)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

pub(crate) fn random_action(rng: &mut SimRng) -> Action {
    Action::from_index(rng.gen_range(0..Action::COUNT))
}

pub(crate) fn random_state(rng: &mut SimRng) -> u8 {
    rng.gen_range(0..GENE_COUNT as u8)
}
