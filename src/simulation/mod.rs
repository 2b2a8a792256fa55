//! Time-driven simulation core

pub mod consumption;
pub mod decay;
pub mod effects;
pub mod guidelines;
pub mod lifecycle;
pub mod tick;

pub use decay::decay_by_minutes;
pub use effects::{run_activity_effect, EffectContext, EffectOutcome, EffectRejection};
pub use guidelines::{evaluate_guidelines, insert_guideline_activities, GuidelineDecision};
pub use lifecycle::ActivityBoard;
pub use tick::{run_simulation_tick, SimulationEvent};
