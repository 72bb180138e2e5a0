//! Entities that occupy board slots.

use gasim_core::{Facing, SimRng};
use gasim_genome::{Chromosome, Mutator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a cell, unique within one world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// A living cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub chromosome: Chromosome,
    pub state: u8,
    pub facing: Facing,
    pub score: i32,
    /// Fingerprint of the chromosome the cell was created with
    pub color: u32,
    pub generation: u32,
    pub age: u64,
    pub offspring: u32,
    pub meals: u32,
}

impl Cell {
    pub fn new(id: CellId, chromosome: Chromosome, facing: Facing, score: i32) -> Self {
        let color = chromosome.color();
        Self {
            id,
            chromosome,
            state: 0,
            facing,
            score,
            color,
            generation: 0,
            age: 0,
            offspring: 0,
            meals: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.score > 0
    }

    /// Build a child by mitosis: mutated copy of the chromosome, facing the
    /// opposite way, fresh score.
    pub fn divide(
        &mut self,
        id: CellId,
        mutator: &Mutator,
        rng: &mut SimRng,
        starting_score: i32,
    ) -> Cell {
        let chromosome = mutator.offspring(&self.chromosome, rng);
        let mut child = Cell::new(id, chromosome, self.facing.reverse(), starting_score);
        child.generation = self.generation + 1;
        self.offspring += 1;
        self.score = starting_score;
        child
    }

    pub fn eat(&mut self, food_score: i32) {
        self.score += food_score;
        self.meals += 1;
    }
}

/// A food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    /// Index of the clump this food belongs to
    pub clump: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Cell(Cell),
    Food(Food),
}

/// Anything that can sit in a slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Tick parity at which this entity was last processed
    pub update_tag: Option<bool>,
    pub kind: EntityKind,
}

impl Entity {
    pub fn cell(cell: Cell) -> Self {
        Self {
            update_tag: None,
            kind: EntityKind::Cell(cell),
        }
    }

    pub fn food(clump: Option<usize>) -> Self {
        Self {
            update_tag: None,
            kind: EntityKind::Food(Food { clump }),
        }
    }

    pub fn with_tag(mut self, tag: Option<bool>) -> Self {
        self.update_tag = tag;
        self
    }

    pub fn as_cell(&self) -> Option<&Cell> {
        match &self.kind {
            EntityKind::Cell(cell) => Some(cell),
            EntityKind::Food(_) => None,
        }
    }

    pub fn as_cell_mut(&mut self) -> Option<&mut Cell> {
        match &mut self.kind {
            EntityKind::Cell(cell) => Some(cell),
            EntityKind::Food(_) => None,
        }
    }

    pub fn as_food(&self) -> Option<&Food> {
        match &self.kind {
            EntityKind::Food(food) => Some(food),
            EntityKind::Cell(_) => None,
        }
    }

    pub fn is_cell(&self) -> bool {
        matches!(self.kind, EntityKind::Cell(_))
    }

    pub fn is_food(&self) -> bool {
        matches!(self.kind, EntityKind::Food(_))
    }
}
