//! World simulation engine.
//!
//! This crate implements the bounded 2D grid where cells perceive, act, eat,
//! divide and starve, and where eaten food is reborn somewhere else.

pub mod census;
pub mod entity;
pub mod grid;
pub mod placement;
pub mod tick;
pub mod world;

pub use census::{Census, RunSummary};
pub use entity::{Cell, CellId, Entity, EntityKind, Food};
pub use grid::Grid;
pub use placement::find_nearby_empty;
pub use tick::TickReport;
pub use world::{SlotView, World};
