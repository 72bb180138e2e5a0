//! World construction and the read-only views a renderer consumes.

use crate::entity::{Cell, CellId, Entity, EntityKind};
use crate::grid::Grid;
use crate::placement::find_nearby_empty;
use gasim_core::{
    random_position, seeded_rng, Error, Facing, InitialBrain, Position, Result, SimConfig, SimRng,
};
use gasim_genome::{validate_chromosome, Chromosome, MutationConfig, Mutator};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What a renderer needs to draw one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotView {
    Empty,
    Food,
    Cell { color: u32 },
}

pub struct World {
    pub(crate) grid: Grid,
    pub(crate) clumps: Vec<Position>,
    pub(crate) config: SimConfig,
    pub(crate) mutator: Mutator,
    pub(crate) rng: SimRng,
    /// Tag shared by every entity processed during the current (or last) tick
    pub(crate) parity: bool,
    pub(crate) tick: u64,
    next_cell_id: u64,
}

impl World {
    /// Populated world with the seed chromosome as ancestor
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_ancestor(config, Chromosome::seed())
    }

    /// Populated world whose centre cell carries `ancestor` unmutated
    pub fn with_ancestor(config: SimConfig, ancestor: Chromosome) -> Result<Self> {
        validate_chromosome(&ancestor)?;

        let mut world = Self::bare(config)?;
        world.seed_cells(ancestor);
        world.seed_clumps();
        world.seed_food();

        info!(
            width = world.grid.width,
            height = world.grid.height,
            seed = world.config.seed,
            cells = world.grid.cell_count(),
            food = world.grid.food_count(),
            clumps = world.clumps.len(),
            "world created"
        );
        Ok(world)
    }

    /// Board with clumps placed but no cells or food
    pub fn empty(config: SimConfig) -> Result<Self> {
        let mut world = Self::bare(config)?;
        world.seed_clumps();
        Ok(world)
    }

    fn bare(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let rng = seeded_rng(config.seed);
        let (width, height) = (config.world.width, config.world.height);
        let mutator = Mutator::new(MutationConfig::from(&config.genetics));

        Ok(Self {
            grid: Grid::new(width, height),
            clumps: Vec::new(),
            config,
            mutator,
            rng,
            parity: false,
            tick: 0,
            next_cell_id: 0,
        })
    }

    fn seed_cells(&mut self, ancestor: Chromosome) {
        let scarcity = self.config.world.cell_scarcity;
        let mut facing_counter = 0;

        for index in (0..self.grid.len()).step_by(scarcity) {
            let chromosome = match self.config.genetics.initial_brain {
                InitialBrain::Seed => self.mutator.offspring(&Chromosome::seed(), &mut self.rng),
                InitialBrain::Random => Chromosome::random(&mut self.rng),
            };
            facing_counter += 1;
            let pos = self.grid.index_to_pos(index);
            self.spawn_cell(pos, chromosome, Facing::from_index(facing_counter));
        }

        let centre = Position::new(self.grid.width / 2, self.grid.height / 2);
        self.grid.take(centre);
        self.spawn_cell(centre, ancestor, Facing::North);
    }

    /// Construction consumes the stream as cells, ancestor, clumps, food.
    fn seed_clumps(&mut self) {
        let (width, height) = (self.grid.width, self.grid.height);
        self.clumps = (0..self.config.world.clump_count)
            .map(|_| random_position(width, height, &mut self.rng))
            .collect();
    }

    fn seed_food(&mut self) {
        let count = self.grid.len() / self.config.world.food_scarcity;
        let attempts = self.config.food.placement_attempts;

        for i in 0..count {
            let clump = i % self.clumps.len();
            match find_nearby_empty(&self.grid, self.clumps[clump], attempts, &mut self.rng) {
                Ok(pos) => self.grid.place(pos, Entity::food(Some(clump))),
                Err(err) => warn!(clump, error = %err, "skipping initial food item"),
            }
        }
    }

    pub(crate) fn allocate_id(&mut self) -> CellId {
        let id = CellId(self.next_cell_id);
        self.next_cell_id += 1;
        id
    }

    fn spawn_cell(&mut self, pos: Position, chromosome: Chromosome, facing: Facing) -> CellId {
        let id = self.allocate_id();
        let cell = Cell::new(id, chromosome, facing, self.config.score.starting_score);
        self.grid.place(pos, Entity::cell(cell));
        id
    }

    /// Put a new cell with the starting score into an empty slot
    pub fn place_cell(
        &mut self,
        pos: Position,
        chromosome: Chromosome,
        facing: Facing,
    ) -> Result<CellId> {
        validate_chromosome(&chromosome)?;
        if !self.grid.is_vacant(pos) {
            return Err(Error::InvalidState(format!("slot {} is not vacant", pos)));
        }
        Ok(self.spawn_cell(pos, chromosome, facing))
    }

    /// Put a food item into an empty slot
    pub fn place_food(&mut self, pos: Position, clump: Option<usize>) -> Result<()> {
        if let Some(clump) = clump {
            if clump >= self.clumps.len() {
                return Err(Error::Validation(format!(
                    "clump {} does not exist, world has {}",
                    clump,
                    self.clumps.len()
                )));
            }
        }
        if !self.grid.is_vacant(pos) {
            return Err(Error::InvalidState(format!("slot {} is not vacant", pos)));
        }
        self.grid.place(pos, Entity::food(clump));
        Ok(())
    }

    pub fn dimensions(&self) -> (i32, i32) {
        (self.grid.width, self.grid.height)
    }

    /// What occupies a slot; off-board coordinates read as empty
    pub fn query(&self, x: i32, y: i32) -> SlotView {
        match self.grid.get(Position::new(x, y)).map(|entity| &entity.kind) {
            None => SlotView::Empty,
            Some(EntityKind::Food(_)) => SlotView::Food,
            Some(EntityKind::Cell(cell)) => SlotView::Cell { color: cell.color },
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn clumps(&self) -> &[Position] {
        &self.clumps
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of completed ticks
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Tag of the most recent tick
    pub fn parity(&self) -> bool {
        self.parity
    }

    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.grid.cell(pos)
    }

    /// Mutable access for tooling that stages scenarios
    pub fn cell_at_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.grid.cell_mut(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: i32, height: i32, seed: u64) -> SimConfig {
        let mut config = SimConfig::default();
        config.world.width = width;
        config.world.height = height;
        config.seed = seed;
        config
    }

    #[test]
    fn test_world_creation() {
        let world = World::new(config(80, 60, 42)).unwrap();
        assert_eq!(world.dimensions(), (80, 60));
        assert_eq!(world.clumps().len(), 30);
        // One cell per 48 slots, plus the ancestor in the (otherwise empty) centre.
        assert_eq!(world.grid().cell_count(), 101);
        assert_eq!(world.grid().food_count(), 4800 / 11);
        for clump in world.clumps() {
            assert!(clump.in_bounds(80, 60));
        }
    }

    #[test]
    fn test_ancestor_sits_at_centre() {
        let world = World::new(config(80, 60, 1)).unwrap();
        let ancestor = world.cell_at(Position::new(40, 30)).unwrap();
        assert_eq!(ancestor.chromosome, Chromosome::seed());
        assert_eq!(ancestor.facing, Facing::North);
        assert_eq!(ancestor.color, Chromosome::seed().color());
        assert_eq!(ancestor.score, 250);
    }

    #[test]
    fn test_seeded_cells_follow_scarcity_and_round_robin_facing() {
        let world = World::new(config(48, 4, 3)).unwrap();
        let facings: Vec<Facing> = (0..4)
            .map(|row| world.cell_at(Position::new(0, row)).unwrap().facing)
            .collect();
        assert_eq!(
            facings,
            vec![Facing::East, Facing::South, Facing::West, Facing::North]
        );
    }

    #[test]
    fn test_food_is_affiliated_round_robin() {
        let world = World::new(config(40, 40, 9)).unwrap();
        let mut per_clump = vec![0usize; world.clumps().len()];
        for (_, entity) in world.grid().iter() {
            if let Some(food) = entity.as_food() {
                per_clump[food.clump.unwrap()] += 1;
            }
        }
        let expected = (1600 / 11) / 30;
        assert!(per_clump.iter().all(|&n| n == expected || n == expected + 1));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = World::new(config(30, 20, 77)).unwrap();
        let b = World::new(config(30, 20, 77)).unwrap();
        for y in 0..20 {
            for x in 0..30 {
                assert_eq!(a.query(x, y), b.query(x, y));
            }
        }
    }

    #[test]
    fn test_query() {
        let mut world = World::empty(config(10, 10, 0)).unwrap();
        world.place_food(Position::new(1, 1), None).unwrap();
        world
            .place_cell(Position::new(2, 2), Chromosome::seed(), Facing::South)
            .unwrap();

        assert_eq!(world.query(0, 0), SlotView::Empty);
        assert_eq!(world.query(1, 1), SlotView::Food);
        assert_eq!(
            world.query(2, 2),
            SlotView::Cell {
                color: Chromosome::seed().color()
            }
        );
        assert_eq!(world.query(-3, 50), SlotView::Empty);
    }

    #[test]
    fn test_place_rejects_occupied_and_unknown_clump() {
        let mut world = World::empty(config(10, 10, 0)).unwrap();
        world.place_food(Position::new(1, 1), None).unwrap();
        assert!(matches!(
            world.place_food(Position::new(1, 1), None),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            world.place_food(Position::new(2, 1), Some(99)),
            Err(Error::Validation(_))
        ));
        assert!(world
            .place_cell(Position::new(10, 0), Chromosome::seed(), Facing::North)
            .is_err());
    }

    #[test]
    fn test_clumps_are_drawn_after_cells() {
        let mut config = config(12, 12, 4);
        config.world.clump_count = 3;
        let world = World::new(config.clone()).unwrap();

        // 144 slots at one cell per 48 seed three mutated cells first.
        let mut rng = seeded_rng(4);
        let mutator = Mutator::new(MutationConfig::from(&config.genetics));
        for _ in 0..3 {
            mutator.offspring(&Chromosome::seed(), &mut rng);
        }
        let expected: Vec<Position> = (0..3).map(|_| random_position(12, 12, &mut rng)).collect();
        assert_eq!(world.clumps(), expected.as_slice());
    }

    #[test]
    fn test_oversized_board_is_rejected() {
        let result = World::empty(config(70_000, 70_000, 0));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut bad = config(10, 10, 0);
        bad.world.cell_scarcity = 0;
        assert!(World::new(bad).is_err());
    }
}
