//! Tick system - orchestrates simulation updates
//!
//! Each tick runs, in this fixed order:
//! clock -> needs decay -> pending completions -> guideline injection -> queue auto-execution
//!
//! A paused clock makes the whole tick a no-op.

use crate::actions::catalog::{PendingActivityType, ReservedActivityType};
use crate::core::calendar::GameTimePoint;
use crate::core::types::{ActivityId, ReservedId, SurvivorId};
use crate::rules::guidelines::GuidelineKey;
use crate::simulation::decay::decay_by_minutes;
use crate::simulation::effects::EffectRejection;
use crate::simulation::guidelines::insert_guideline_activities;
use crate::world::camp::World;

/// Events generated during a simulation tick
///
/// These events are returned by `run_simulation_tick` for display in an activity log.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A pending activity reached its end time and its effect was applied
    ActivityCompleted {
        survivor_id: SurvivorId,
        activity_id: ActivityId,
        kind: PendingActivityType,
        at: GameTimePoint,
    },
    /// A standing order (food search) started over
    ActivityRenewed {
        survivor_id: SurvivorId,
        activity_id: ActivityId,
        end_at: GameTimePoint,
    },
    /// A guideline queued an activity
    GuidelineQueued {
        survivor_id: SurvivorId,
        reserved_id: ReservedId,
        kind: ReservedActivityType,
        rule: GuidelineKey,
    },
    /// A guideline's need is full again; the survivor stops acting on it
    PhaseCleared {
        survivor_id: SurvivorId,
        key: GuidelineKey,
    },
    /// A reserved activity ran and left the queue
    ReservedExecuted {
        survivor_id: SurvivorId,
        reserved_id: ReservedId,
        kind: ReservedActivityType,
        at: GameTimePoint,
    },
    /// A reserved activity could not run and stays queued
    ReservedDeferred {
        survivor_id: SurvivorId,
        reserved_id: ReservedId,
        kind: ReservedActivityType,
        reason: EffectRejection,
    },
}

/// Run a single simulation tick
///
/// Returns the events that occurred, in the order they happened.
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    if world.clock.is_paused() {
        return events;
    }

    let elapsed = world.clock.tick();
    decay_by_minutes(
        &mut world.survivors,
        world.board.pending(),
        elapsed,
        &world.config,
    );

    let now = world.clock.now();
    let (board, mut ctx) = world.split();
    board.complete_due_activities(&mut ctx, now, &mut events);
    insert_guideline_activities(board, &ctx, &mut events);
    board.process_reserved_activities(&mut ctx, &mut events);

    if !events.is_empty() {
        tracing::debug!(%now, count = events.len(), "tick events");
    }
    events
}
