//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move `steps` slots along `facing`; negative steps walk backwards.
    pub fn step(&self, facing: Facing, steps: i32) -> Self {
        let (dx, dy) = facing.to_delta();
        self.add(dx * steps, dy * steps)
    }

    /// Whether the position lies on a `width` x `height` board
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction a cell is pointing in.
///
/// Ordered so that +1 is a right turn and -1 is a left turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Facing for any integer, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Rotate by a signed number of quarter turns
    pub fn turn(self, quarter_turns: i32) -> Self {
        let turned = (self.index() as i32 + quarter_turns).rem_euclid(4);
        Self::ALL[turned as usize]
    }

    pub fn turn_left(self) -> Self {
        self.turn(-1)
    }

    pub fn turn_right(self) -> Self {
        self.turn(1)
    }

    pub fn reverse(self) -> Self {
        self.turn(2)
    }

    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }
}

/// What a cell perceives in the slot directly ahead of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Situation {
    Empty,
    Food,
    Life,
    Wall,
}

impl Situation {
    pub const COUNT: usize = 4;
    pub const ALL: [Situation; 4] = [
        Situation::Empty,
        Situation::Food,
        Situation::Life,
        Situation::Wall,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Action a cell's brain can choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    TurnLeft,
    TurnRight,
    MoveBackward,
}

impl Action {
    pub const COUNT: usize = 4;
    pub const ALL: [Action; 4] = [
        Action::MoveForward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::MoveBackward,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }
}
