//! Population statistics and headless runs.

use crate::tick::TickReport;
use crate::world::World;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument};

/// Snapshot of the population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Census {
    pub tick: u64,
    pub cells: usize,
    pub food: usize,
    pub mean_score: f64,
    pub max_score: i32,
    pub max_generation: u32,
    /// Number of distinct chromosome fingerprints alive
    pub distinct_colors: usize,
}

/// Totals accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks_run: u64,
    pub births: u64,
    pub deaths: u64,
    pub meals: u64,
    pub food_relocated: u64,
    pub food_destroyed: u64,
    pub extinct: bool,
    pub final_census: Census,
}

impl RunSummary {
    fn absorb(&mut self, report: &TickReport) {
        self.ticks_run += 1;
        self.births += report.births;
        self.deaths += report.deaths;
        self.meals += report.meals;
        self.food_relocated += report.food_relocated;
        self.food_destroyed += report.food_destroyed;
    }
}

impl World {
    pub fn census(&self) -> Census {
        let mut census = Census {
            tick: self.tick,
            food: self.grid.food_count(),
            ..Default::default()
        };

        let mut colors = HashSet::new();
        let mut total_score: i64 = 0;
        for (_, cell) in self.grid.cells() {
            census.cells += 1;
            total_score += i64::from(cell.score);
            census.max_score = census.max_score.max(cell.score);
            census.max_generation = census.max_generation.max(cell.generation);
            colors.insert(cell.color);
        }

        if census.cells > 0 {
            census.mean_score = total_score as f64 / census.cells as f64;
        }
        census.distinct_colors = colors.len();
        census
    }

    /// Advance up to `num_ticks` ticks, stopping early if every cell has died,
    /// and logging a census every `log_interval` ticks (0 disables it)
    #[instrument(skip(self), fields(seed = self.config.seed))]
    pub fn run(&mut self, num_ticks: u64, log_interval: u64) -> RunSummary {
        let mut summary = RunSummary::default();
        info!("Starting simulation for {} ticks", num_ticks);

        for _ in 0..num_ticks {
            let report = self.advance_tick();
            summary.absorb(&report);

            if log_interval > 0 && report.tick % log_interval == 0 {
                let census = self.census();
                info!(
                    tick = census.tick,
                    cells = census.cells,
                    food = census.food,
                    mean_score = census.mean_score,
                    max_generation = census.max_generation,
                    distinct_colors = census.distinct_colors,
                    births = report.births,
                    deaths = report.deaths,
                    "population snapshot"
                );
            }

            if self.grid.cell_count() == 0 {
                summary.extinct = true;
                info!(tick = report.tick, "population extinct, stopping early");
                break;
            }
        }

        summary.final_census = self.census();
        info!(
            ticks_run = summary.ticks_run,
            births = summary.births,
            deaths = summary.deaths,
            meals = summary.meals,
            food_destroyed = summary.food_destroyed,
            cells = summary.final_census.cells,
            "run complete"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasim_core::{Facing, Position, SimConfig};
    use gasim_genome::Chromosome;

    fn config(seed: u64) -> SimConfig {
        let mut config = SimConfig::default();
        config.world.width = 40;
        config.world.height = 30;
        config.seed = seed;
        config
    }

    #[test]
    fn test_census_counts() {
        let mut world = World::empty(config(0)).unwrap();
        world
            .place_cell(Position::new(1, 1), Chromosome::seed(), Facing::North)
            .unwrap();
        world
            .place_cell(Position::new(5, 1), Chromosome::seed(), Facing::North)
            .unwrap();
        world.cell_at_mut(Position::new(5, 1)).unwrap().score = 750;
        world.place_food(Position::new(3, 3), Some(0)).unwrap();

        let census = world.census();
        assert_eq!(census.cells, 2);
        assert_eq!(census.food, 1);
        assert_eq!(census.max_score, 750);
        assert!((census.mean_score - 500.0).abs() < f64::EPSILON);
        assert_eq!(census.distinct_colors, 1);
    }

    #[test]
    fn test_run_accumulates_reports() {
        let mut world = World::new(config(5)).unwrap();
        let summary = world.run(50, 10);

        assert!(summary.ticks_run <= 50);
        assert_eq!(world.tick(), summary.ticks_run);
        assert_eq!(summary.final_census.tick, summary.ticks_run);
        assert_eq!(summary.extinct, summary.final_census.cells == 0);
    }

    #[test]
    fn test_run_stops_on_extinction() {
        let mut world = World::empty(config(0)).unwrap();
        world
            .place_cell(Position::new(2, 2), Chromosome::seed(), Facing::North)
            .unwrap();
        world.cell_at_mut(Position::new(2, 2)).unwrap().score = 1;

        let summary = world.run(100, 0);
        assert!(summary.extinct);
        assert_eq!(summary.ticks_run, 1);
        assert_eq!(summary.deaths, 1);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let mut a = World::new(config(11)).unwrap();
        let mut b = World::new(config(11)).unwrap();
        assert_eq!(a.run(40, 0), b.run(40, 0));
    }
}
