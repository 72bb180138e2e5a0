//! The per-tick update: one row-major pass over every slot.
//!
//! A cell that moves forward lands in a slot the pass has not reached yet. Each
//! entity carries the tag of the last tick that processed it, and the pass skips
//! entities already carrying the current tag, so every entity acts at most once
//! per tick without a second grid buffer.

use crate::entity::Entity;
use crate::world::World;
use gasim_core::{Action, Facing, MovementMode, Position, Situation};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Cells that consulted their brain
    pub actions: u64,
    pub births: u64,
    pub deaths: u64,
    pub meals: u64,
    pub food_relocated: u64,
    pub food_destroyed: u64,
}

impl World {
    /// Run exactly one full scan of the board
    pub fn advance_tick(&mut self) -> TickReport {
        self.parity = !self.parity;
        let mut report = TickReport {
            tick: self.tick + 1,
            ..Default::default()
        };

        for index in 0..self.grid.len() {
            let pos = self.grid.index_to_pos(index);
            self.update_slot(pos, &mut report);
        }

        self.tick += 1;
        debug!(
            tick = report.tick,
            actions = report.actions,
            births = report.births,
            deaths = report.deaths,
            meals = report.meals,
            food_destroyed = report.food_destroyed,
            "tick complete"
        );
        report
    }

    /// Situation a cell at `pos` facing `facing` perceives
    pub fn perceive(&self, pos: Position, facing: Facing) -> Situation {
        let ahead = pos.step(facing, 1);
        if !self.grid.contains(ahead) {
            return Situation::Wall;
        }
        match self.grid.get(ahead) {
            None => Situation::Empty,
            Some(entity) if entity.is_cell() => Situation::Life,
            Some(_) => Situation::Food,
        }
    }

    fn update_slot(&mut self, pos: Position, report: &mut TickReport) {
        let parity = self.parity;
        let Some(entity) = self.grid.get_mut(pos) else {
            return;
        };
        if entity.update_tag == Some(parity) {
            return;
        }
        entity.update_tag = Some(parity);

        let Some(cell) = entity.as_cell() else {
            return;
        };
        let (state, facing) = (cell.state, cell.facing);

        let situation = self.perceive(pos, facing);
        let response = self.grid.expect_cell(pos).chromosome.respond(state, situation);
        report.actions += 1;

        let mut here = pos;
        match response.action {
            Action::TurnLeft => self.grid.expect_cell_mut(pos).facing = facing.turn_left(),
            Action::TurnRight => self.grid.expect_cell_mut(pos).facing = facing.turn_right(),
            Action::MoveForward | Action::MoveBackward => {
                if let Some(dest) = self.try_move(pos, facing, response.action, report) {
                    here = dest;
                }
            }
        }

        let cost = self.config.score.action_costs.cost(response.action);
        let cell = self.grid.expect_cell_mut(here);
        cell.score -= cost;
        cell.state = response.next_state;
        cell.age += 1;

        if cell.score <= 0 {
            let (id, age, generation) = (cell.id, cell.age, cell.generation);
            self.grid.take(here);
            report.deaths += 1;
            debug!(cell = %id, at = %here, age, generation, "cell starved");
        }
    }

    fn step_direction(&self, action: Action) -> i32 {
        match (self.config.movement, action) {
            (MovementMode::LegacyBackward, _) => -1,
            (MovementMode::Directional, Action::MoveBackward) => -1,
            (MovementMode::Directional, _) => 1,
        }
    }

    /// Try to move the cell at `from`. Returns where it ended up, or `None`
    /// when the move was blocked.
    fn try_move(
        &mut self,
        from: Position,
        facing: Facing,
        action: Action,
        report: &mut TickReport,
    ) -> Option<Position> {
        let dest = from.step(facing, self.step_direction(action));
        if !self.grid.contains(dest) {
            return None;
        }

        let occupied_by_cell = self.grid.get(dest).map(Entity::is_cell);
        match occupied_by_cell {
            Some(true) => return None,
            Some(false) => {
                let food_score = self.config.score.food_score;
                self.grid.expect_cell_mut(from).eat(food_score);
                report.meals += 1;
                self.relocate_food(dest, report);
            }
            None => {}
        }

        self.grid.move_entity(from, dest);

        if self.grid.expect_cell(dest).score >= self.config.score.mitosis_threshold {
            let child_id = self.allocate_id();
            let starting_score = self.config.score.starting_score;
            let parent = self.grid.expect_cell_mut(dest);
            let child = parent.divide(child_id, &self.mutator, &mut self.rng, starting_score);
            trace!(
                parent = %parent.id,
                child = %child_id,
                generation = child.generation,
                at = %from,
                "mitosis"
            );
            self.grid
                .place(from, Entity::cell(child).with_tag(Some(self.parity)));
            report.births += 1;
        }

        Some(dest)
    }
}
