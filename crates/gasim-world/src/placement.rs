//! Empty-slot search and food relocation policy.

use crate::entity::Entity;
use crate::grid::Grid;
use crate::tick::TickReport;
use crate::world::World;
use gasim_core::{random_position, roll, Error, FoodRebirth, FoodSpawn, Position, Result, SimRng};
use rand::Rng;
use tracing::{trace, warn};

/// Shift a position by an independent offset in {-1, 0, 1} on each axis.
/// The zero offset is a legal draw.
pub fn perturb(pos: Position, rng: &mut SimRng) -> Position {
    pos.add(rng.gen_range(-1..=1), rng.gen_range(-1..=1))
}

/// Random walk from `origin` until an empty in-bounds slot turns up.
///
/// Off-board perturbations are discarded and the walk continues from the last
/// in-bounds candidate. Gives up with `ResourceExhausted` after `max_attempts`
/// perturbations. `origin` must be on the board.
pub fn find_nearby_empty(
    grid: &Grid,
    origin: Position,
    max_attempts: usize,
    rng: &mut SimRng,
) -> Result<Position> {
    assert!(grid.contains(origin), "search origin {} is off the board", origin);

    let mut candidate = origin;
    for _ in 0..max_attempts {
        let next = perturb(candidate, rng);
        if !grid.contains(next) {
            continue;
        }
        candidate = next;
        if grid.is_vacant(candidate) {
            return Ok(candidate);
        }
    }

    Err(Error::ResourceExhausted(format!(
        "no empty slot found near {} after {} steps",
        origin, max_attempts
    )))
}

impl World {
    /// Move the food at `from` somewhere else according to the food policy.
    ///
    /// If no empty slot can be found the food is destroyed instead. Either way
    /// `from` is empty afterwards.
    pub(crate) fn relocate_food(&mut self, from: Position, report: &mut TickReport) {
        let clump = self
            .grid
            .get(from)
            .and_then(Entity::as_food)
            .unwrap_or_else(|| panic!("no food to relocate at {}", from))
            .clump;

        let anchor = self.food_anchor(from, clump);
        let attempts = self.config.food.placement_attempts;

        match find_nearby_empty(&self.grid, anchor, attempts, &mut self.rng) {
            Ok(to) => {
                self.grid.move_entity(from, to);
                if let Some(food) = self.grid.get_mut(to) {
                    food.update_tag = Some(self.parity);
                }
                report.food_relocated += 1;
                trace!(from = %from, to = %to, anchor = %anchor, ?clump, "food relocated");
            }
            Err(err) => {
                self.grid.take(from);
                report.food_destroyed += 1;
                warn!(at = %from, anchor = %anchor, error = %err, "food destroyed, board has no room");
            }
        }
    }

    /// Point around which eaten food looks for its new slot
    fn food_anchor(&mut self, from: Position, clump: Option<usize>) -> Position {
        let (width, height) = self.dimensions();
        let spawn = self.config.food.spawn_mode;
        let rebirth = self.config.food.rebirth_mode;
        let drift_chance = self.config.food.clump_drift_chance;

        match (spawn, clump) {
            (FoodSpawn::Clump, Some(clump)) => {
                if roll(drift_chance, &mut self.rng) {
                    let moved = random_position(width, height, &mut self.rng);
                    trace!(clump, from = %self.clumps[clump], to = %moved, "clump drifted");
                    self.clumps[clump] = moved;
                }
                match rebirth {
                    FoodRebirth::Nearby => self.clumps[clump],
                    FoodRebirth::Somewhere => {
                        let other = self.other_clump(clump);
                        self.clumps[other]
                    }
                }
            }
            // Unaffiliated food follows the clump-free rules even in clump mode.
            _ => match rebirth {
                FoodRebirth::Nearby => from,
                FoodRebirth::Somewhere => random_position(width, height, &mut self.rng),
            },
        }
    }

    /// Uniformly chosen clump other than `current`, or `current` if it is the only one
    fn other_clump(&mut self, current: usize) -> usize {
        let count = self.clumps.len();
        if count < 2 {
            return current;
        }
        let pick = self.rng.gen_range(0..count - 1);
        if pick >= current {
            pick + 1
        } else {
            pick
        }
    }
}
