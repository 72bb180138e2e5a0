//! Bounded 2D slot grid.
//!
//! Every slot is either empty or owns exactly one entity. Moving an entity takes
//! it out of one slot and places it into another, so an entity can never be
//! reachable from two slots at once.

use crate::entity::{Cell, Entity};
use gasim_core::Position;

#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    slots: Vec<Option<Entity>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            slots: (0..size).map(|_| None).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    /// Entity at position; `None` for empty slots and off-board positions
    pub fn get(&self, pos: Position) -> Option<&Entity> {
        self.index_of(pos).and_then(|index| self.slots[index].as_ref())
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Entity> {
        self.index_of(pos).and_then(|index| self.slots[index].as_mut())
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.get(pos).and_then(Entity::as_cell)
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.get_mut(pos).and_then(Entity::as_cell_mut)
    }

    /// Cell at position. Panics if the slot holds anything else.
    pub fn expect_cell(&self, pos: Position) -> &Cell {
        self.cell(pos)
            .unwrap_or_else(|| panic!("slot {} lost its cell mid-update", pos))
    }

    pub fn expect_cell_mut(&mut self, pos: Position) -> &mut Cell {
        self.cell_mut(pos)
            .unwrap_or_else(|| panic!("slot {} lost its cell mid-update", pos))
    }

    /// In bounds and unoccupied
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.index_of(pos)
            .map(|index| self.slots[index].is_none())
            .unwrap_or(false)
    }

    /// Put an entity into an empty slot. Panics if the slot is occupied or off the board.
    pub fn place(&mut self, pos: Position, entity: Entity) {
        let index = self.expect_index(pos);
        assert!(
            self.slots[index].is_none(),
            "slot {} is already occupied",
            pos
        );
        self.slots[index] = Some(entity);
    }

    /// Remove and return whatever occupies the slot
    pub fn take(&mut self, pos: Position) -> Option<Entity> {
        self.index_of(pos).and_then(|index| self.slots[index].take())
    }

    /// Transfer the entity at `from` into the empty slot `to`
    pub fn move_entity(&mut self, from: Position, to: Position) {
        let entity = self
            .take(from)
            .unwrap_or_else(|| panic!("no entity to move at {}", from));
        self.place(to, entity);
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(self.pos_to_index(pos))
        } else {
            None
        }
    }

    fn expect_index(&self, pos: Position) -> usize {
        self.index_of(pos)
            .unwrap_or_else(|| panic!("position {} is off the {}x{} board", pos, self.width, self.height))
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Row-major iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.slots.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over occupied slots with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|entity| (self.index_to_pos(i), entity)))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.iter()
            .filter_map(|(pos, entity)| entity.as_cell().map(|cell| (pos, cell)))
    }

    pub fn cell_count(&self) -> usize {
        self.iter().filter(|(_, entity)| entity.is_cell()).count()
    }

    pub fn food_count(&self) -> usize {
        self.iter().filter(|(_, entity)| entity.is_food()).count()
    }

    pub fn vacant_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CellId;
    use gasim_core::Facing;
    use gasim_genome::Chromosome;

    fn test_cell(id: u64) -> Entity {
        Entity::cell(Cell::new(CellId(id), Chromosome::seed(), Facing::North, 100))
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 8);
        assert_eq!(grid.len(), 80);
        assert_eq!(grid.vacant_count(), 80);
    }

    #[test]
    fn test_off_board_reads_as_absent() {
        let grid = Grid::new(10, 10);
        assert!(grid.get(Position::new(-1, 0)).is_none());
        assert!(grid.get(Position::new(10, 10)).is_none());
        assert!(!grid.is_vacant(Position::new(-1, 0)));
        assert!(grid.is_vacant(Position::new(0, 0)));
    }

    #[test]
    fn test_place_take_and_move() {
        let mut grid = Grid::new(4, 4);
        let from = Position::new(1, 1);
        let to = Position::new(2, 1);

        grid.place(from, test_cell(1));
        assert_eq!(grid.cell_count(), 1);

        grid.move_entity(from, to);
        assert!(grid.is_vacant(from));
        assert_eq!(grid.cell(to).map(|c| c.id), Some(CellId(1)));
        assert_eq!(grid.cell_count(), 1);

        let taken = grid.take(to);
        assert!(taken.is_some());
        assert_eq!(grid.vacant_count(), 16);
    }

    #[test]
    fn test_occupied_slot_is_not_vacant() {
        let mut grid = Grid::new(4, 4);
        grid.place(Position::new(0, 0), Entity::food(None));
        assert!(!grid.is_vacant(Position::new(0, 0)));
        assert!(grid.cell(Position::new(0, 0)).is_none());
    }

    #[test]
    fn test_iteration_is_row_major() {
        let mut grid = Grid::new(3, 3);
        grid.place(Position::new(2, 0), Entity::food(None));
        grid.place(Position::new(0, 1), test_cell(1));
        grid.place(Position::new(1, 2), Entity::food(Some(0)));

        let positions: Vec<Position> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(
            positions,
            vec![Position::new(2, 0), Position::new(0, 1), Position::new(1, 2)]
        );
        assert_eq!(grid.food_count(), 2);
        assert_eq!(grid.index_to_pos(5), Position::new(2, 1));
        assert_eq!(grid.positions().count(), 9);
    }
}
