//! Guideline evaluation - autonomous activity selection with hysteresis
//!
//! A rule starts firing once its gauge drops to the threshold and keeps
//! firing until the gauge is back at 100, not merely above the threshold.
//! The per-survivor phase latch remembers which rule is in control.

use crate::actions::catalog::ReservedActivityType;
use crate::city::rest::RestPlaceStock;
use crate::city::stockpile::{CampResources, ResourceKey};
use crate::entity::needs::Needs;
use crate::rules::guidelines::{GuidelineKey, GuidelineSettings};
use crate::simulation::effects::EffectContext;
use crate::simulation::lifecycle::ActivityBoard;
use crate::simulation::tick::SimulationEvent;

/// Result of checking one rule for one survivor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleCheck {
    /// Gauge is full
    Satisfied,
    /// Not needy enough and not latched
    Dormant,
    /// Needy, but the resource or place is unavailable
    Blocked,
    Fire(ReservedActivityType),
}

/// How the survivor's phase latch should change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseUpdate {
    Keep,
    Latch(GuidelineKey),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidelineDecision {
    pub activity: Option<ReservedActivityType>,
    pub phase: PhaseUpdate,
}

/// Read-only camp stock the rules check availability against
#[derive(Clone, Copy)]
pub struct Availability<'a> {
    pub resources: &'a CampResources,
    pub rest_places: &'a RestPlaceStock,
}

fn check_rule(
    key: GuidelineKey,
    needs: &Needs,
    phase: Option<GuidelineKey>,
    settings: &GuidelineSettings,
    stock: Availability<'_>,
) -> RuleCheck {
    let need = key.need();
    if needs.is_full(need) {
        return RuleCheck::Satisfied;
    }
    let latched = phase == Some(key);
    if !latched && needs.get(need) > settings.threshold(key) {
        return RuleCheck::Dormant;
    }

    let candidate = match key {
        GuidelineKey::HungerThreshold => match settings.food_resource {
            ResourceKey::WildStrawberry => (stock.resources.get(ResourceKey::WildStrawberry) > 0)
                .then_some(ReservedActivityType::EatWildStrawberry),
            // No activity eats camp crops yet
            _ => None,
        },
        GuidelineKey::ThirstThreshold => (stock.resources.get(ResourceKey::Water) > 0)
            .then_some(ReservedActivityType::DrinkWater),
        GuidelineKey::TirednessThreshold => Some(ReservedActivityType::RestWithSleepingBag),
        GuidelineKey::BoredomThreshold => (stock.rest_places.get(settings.rest_place) > 0)
            .then_some(ReservedActivityType::RestAtPlace),
    };

    match candidate {
        Some(kind) => RuleCheck::Fire(kind),
        None => RuleCheck::Blocked,
    }
}

/// Walk the rules in priority order; the first one that fires wins
pub fn evaluate_guidelines(
    needs: &Needs,
    phase: Option<GuidelineKey>,
    settings: &GuidelineSettings,
    stock: Availability<'_>,
) -> GuidelineDecision {
    for &key in &settings.order {
        match check_rule(key, needs, phase, settings, stock) {
            RuleCheck::Satisfied if phase == Some(key) => {
                return GuidelineDecision {
                    activity: None,
                    phase: PhaseUpdate::Clear,
                };
            }
            RuleCheck::Fire(kind) => {
                return GuidelineDecision {
                    activity: Some(kind),
                    phase: PhaseUpdate::Latch(key),
                };
            }
            RuleCheck::Satisfied | RuleCheck::Dormant | RuleCheck::Blocked => {}
        }
    }

    GuidelineDecision {
        activity: None,
        phase: PhaseUpdate::Keep,
    }
}

/// Evaluate every survivor and queue whatever their guidelines select
///
/// Nothing is queued when the survivor already has the same activity queued,
/// or when the selected rest is already in progress.
pub fn insert_guideline_activities(
    board: &mut ActivityBoard,
    ctx: &EffectContext<'_>,
    events: &mut Vec<SimulationEvent>,
) {
    let stock = Availability {
        resources: &*ctx.resources,
        rest_places: &*ctx.rest_places,
    };

    for survivor in ctx.survivors.iter() {
        let phase = board.satisfying_phase(&survivor.id);
        let decision = evaluate_guidelines(survivor.needs(), phase, ctx.settings, stock);

        let rule = match decision.phase {
            PhaseUpdate::Keep => None,
            PhaseUpdate::Clear => {
                if let Some(key) = board.clear_phase(&survivor.id) {
                    tracing::debug!(survivor = %survivor.id, ?key, "guideline satisfied");
                    events.push(SimulationEvent::PhaseCleared {
                        survivor_id: survivor.id.clone(),
                        key,
                    });
                }
                None
            }
            PhaseUpdate::Latch(key) => {
                if phase != Some(key) {
                    tracing::debug!(survivor = %survivor.id, ?key, "guideline latched");
                }
                board.set_phase(survivor.id.clone(), key);
                Some(key)
            }
        };

        let (Some(kind), Some(rule)) = (decision.activity, rule) else {
            continue;
        };
        let rest_in_progress = kind
            .pending_type()
            .is_some_and(|pending| pending.is_rest() && board.has_pending(&survivor.id, pending));
        // Whole-queue check keeps a latched rule from stacking copies behind other items
        let already_queued = board.reserved_for(&survivor.id).any(|r| r.kind == kind);
        if rest_in_progress || already_queued {
            continue;
        }

        let reserved_id = board.add_reserved(survivor.id.clone(), kind);
        events.push(SimulationEvent::GuidelineQueued {
            survivor_id: survivor.id.clone(),
            reserved_id,
            kind,
            rule,
        });
    }
}
