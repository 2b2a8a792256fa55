pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{GameClock, GameSpeed, GameTimePoint};
pub use config::BalanceConfig;
pub use error::{LifelineError, Result};
pub use types::{ActivityId, IdGenerator, RegionId, ReservedId, SurvivorId};
