//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Action;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Board configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the board
    pub width: i32,
    /// Height of the board
    pub height: i32,
    /// One cell is seeded for every `cell_scarcity` slots
    pub cell_scarcity: usize,
    /// One food item is seeded for every `food_scarcity` slots
    pub food_scarcity: usize,
    /// Number of food clumps
    pub clump_count: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            cell_scarcity: 48,
            food_scarcity: 11,
            clump_count: 30,
        }
    }
}

impl WorldConfig {
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

/// Score cost of each action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCosts {
    pub move_forward: i32,
    pub turn_left: i32,
    pub turn_right: i32,
    pub move_backward: i32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            move_forward: 8,
            turn_left: 3,
            turn_right: 3,
            move_backward: 5,
        }
    }
}

impl ActionCosts {
    pub fn cost(&self, action: Action) -> i32 {
        match action {
            Action::MoveForward => self.move_forward,
            Action::TurnLeft => self.turn_left,
            Action::TurnRight => self.turn_right,
            Action::MoveBackward => self.move_backward,
        }
    }
}

/// Energy score configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Score of every new cell, and of a parent after mitosis
    pub starting_score: i32,
    /// Score gained by eating one food item
    pub food_score: i32,
    /// Score at which a moving cell divides
    pub mitosis_threshold: i32,
    pub action_costs: ActionCosts,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            starting_score: 250,
            food_score: 250,
            mitosis_threshold: 1000,
            action_costs: ActionCosts::default(),
        }
    }
}

/// Where eaten food is anchored before it looks for a new slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodSpawn {
    /// Food is tied to its clump
    Clump,
    /// Food ignores clumps
    Random,
}

/// How far from its anchor eaten food reappears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodRebirth {
    Nearby,
    Somewhere,
}

/// Food placement policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub spawn_mode: FoodSpawn,
    pub rebirth_mode: FoodRebirth,
    /// Chance that a clump jumps to a new random spot when its food is eaten
    pub clump_drift_chance: f64,
    /// Random-walk steps allowed when searching for an empty slot
    pub placement_attempts: usize,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            spawn_mode: FoodSpawn::Clump,
            rebirth_mode: FoodRebirth::Somewhere,
            clump_drift_chance: 0.05,
            placement_attempts: 50_000,
        }
    }
}

/// Brain given to the cells seeded at world creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialBrain {
    /// Hand-designed forager, mutated once per cell
    Seed,
    /// Uniformly random transition table
    Random,
}

/// Mutation and inheritance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Per-field mutation probability (0.0 to 1.0)
    pub mutation_rate: f64,
    pub initial_brain: InitialBrain,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.03,
            initial_brain: InitialBrain::Seed,
        }
    }
}

/// How move actions pick their step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementMode {
    /// MoveForward steps ahead, MoveBackward steps behind
    #[default]
    Directional,
    /// Every move steps behind the cell, reproducing the historical engine bit for bit
    LegacyBackward,
}

/// Full simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of ticks a headless run advances
    pub num_ticks: u64,
    /// Ticks between progress log lines (0 disables them)
    pub log_interval: u64,
    pub world: WorldConfig,
    pub score: ScoreConfig,
    pub food: FoodConfig,
    pub genetics: GeneticsConfig,
    pub movement: MovementMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_ticks: 10_000,
            log_interval: 500,
            world: WorldConfig::default(),
            score: ScoreConfig::default(),
            food: FoodConfig::default(),
            genetics: GeneticsConfig::default(),
            movement: MovementMode::default(),
        }
    }
}

impl SimConfig {
    /// Decode a JSON document, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if world.width <= 0 || world.height <= 0 {
            return Err(Error::Validation(format!(
                "board must be at least 1x1, got {}x{}",
                world.width, world.height
            )));
        }
        if world.width.checked_mul(world.height).is_none() {
            return Err(Error::Validation(format!(
                "board {}x{} has more slots than can be indexed",
                world.width, world.height
            )));
        }
        if world.cell_scarcity == 0 || world.food_scarcity == 0 {
            return Err(Error::Validation(
                "scarcity divisors must be non-zero".to_string(),
            ));
        }
        if world.clump_count == 0 {
            return Err(Error::Validation("clump_count must be non-zero".to_string()));
        }

        // Food placement needs at least one free slot left after seeding.
        let area = world.area();
        let food = area / world.food_scarcity;
        let seeded = area.div_ceil(world.cell_scarcity) + food;
        if food > 0 && seeded >= area {
            return Err(Error::Validation(format!(
                "{} initial entities would fill all {} slots",
                seeded, area
            )));
        }

        if !(0.0..=1.0).contains(&self.genetics.mutation_rate) {
            return Err(Error::Validation(format!(
                "mutation_rate {} outside 0..=1",
                self.genetics.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.food.clump_drift_chance) {
            return Err(Error::Validation(format!(
                "clump_drift_chance {} outside 0..=1",
                self.food.clump_drift_chance
            )));
        }
        if self.food.placement_attempts == 0 {
            return Err(Error::Validation(
                "placement_attempts must be non-zero".to_string(),
            ));
        }
        let costs = &self.score.action_costs;
        if let Some(action) = Action::ALL.into_iter().find(|a| costs.cost(*a) < 0) {
            return Err(Error::Validation(format!(
                "{:?} cost must not be negative, got {}",
                action,
                costs.cost(action)
            )));
        }
        if self.score.food_score < 0 {
            return Err(Error::Validation(format!(
                "food_score must not be negative, got {}",
                self.score.food_score
            )));
        }
        if self.score.starting_score <= 0 {
            return Err(Error::Validation(format!(
                "starting_score must be positive, got {}",
                self.score.starting_score
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = SimConfig::default();
        assert_eq!(config.world.width, 80);
        assert_eq!(config.world.height, 60);
        assert_eq!(config.world.clump_count, 30);
        assert_eq!(config.score.mitosis_threshold, 1000);
        assert_eq!(config.food.spawn_mode, FoodSpawn::Clump);
        assert_eq!(config.food.rebirth_mode, FoodRebirth::Somewhere);
        assert_eq!(config.movement, MovementMode::Directional);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_action_costs() {
        let costs = ActionCosts::default();
        let all: Vec<i32> = Action::ALL.iter().map(|a| costs.cost(*a)).collect();
        assert_eq!(all, vec![8, 3, 3, 5]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(
            r#"{ "seed": 7, "world": { "width": 20, "height": 10 }, "food": { "rebirth_mode": "Nearby" } }"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.world.width, 20);
        assert_eq!(config.world.cell_scarcity, 48);
        assert_eq!(config.food.rebirth_mode, FoodRebirth::Nearby);
        assert_eq!(config.food.spawn_mode, FoodSpawn::Clump);
    }

    #[test]
    fn test_validation_rejects_bad_configs() {
        let mut config = SimConfig::default();
        config.world.width = 0;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = SimConfig::default();
        config.genetics.mutation_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.world.food_scarcity = 1;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.world.clump_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unindexable_board() {
        let mut config = SimConfig::default();
        config.world.width = 70_000;
        config.world.height = 70_000;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_tiny_board_without_food_is_accepted() {
        let mut config = SimConfig::default();
        config.world.width = 1;
        config.world.height = 1;
        assert!(config.validate().is_ok());

        config.world.food_scarcity = 1;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_negative_scores() {
        let mut config = SimConfig::default();
        config.score.action_costs.turn_right = -1;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = SimConfig::default();
        config.score.food_score = -5;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = SimConfig::default();
        config.score.action_costs.move_backward = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
