//! Camp world state and persistence

pub mod camp;
pub mod save;

pub use camp::World;
pub use save::{CampResourceData, GameTimeData, SaveSlot, SurvivorData};
