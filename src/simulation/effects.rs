//! Effect dispatch - applies an activity's effect to the camp state
//!
//! Effects mutate survivors, the ledger, rest-place stock, and the clock, but
//! never the activity queues. They report what happened as an `EffectOutcome`
//! and the lifecycle manager turns that into queue changes.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::actions::catalog::{PendingActivityType, ReservedActivityType};
use crate::city::rest::{RestPlace, RestPlaceStock};
use crate::city::stockpile::{CampResources, ResourceKey};
use crate::core::calendar::{GameClock, GameTimePoint, MINUTES_PER_HOUR};
use crate::core::config::BalanceConfig;
use crate::core::types::SurvivorId;
use crate::entity::needs::{NeedType, NEED_MAX};
use crate::entity::survivor::{Survivor, SurvivorAction};
use crate::entity::tasks::{PendingActivity, RestGear};
use crate::rules::guidelines::GuidelineSettings;
use crate::simulation::consumption::{drink_water, eat_wild_strawberry};

/// Mutable view of everything an effect may touch
pub struct EffectContext<'a> {
    pub survivors: &'a mut [Survivor],
    pub resources: &'a mut CampResources,
    pub rest_places: &'a mut RestPlaceStock,
    pub clock: &'a mut GameClock,
    pub settings: &'a GuidelineSettings,
    pub config: &'a BalanceConfig,
    pub rng: &'a mut ChaCha8Rng,
}

impl EffectContext<'_> {
    pub fn survivor(&self, id: &SurvivorId) -> Option<&Survivor> {
        self.survivors.iter().find(|s| &s.id == id)
    }

    pub fn survivor_mut(&mut self, id: &SurvivorId) -> Option<&mut Survivor> {
        self.survivors.iter_mut().find(|s| &s.id == id)
    }
}

/// Input to an effect
#[derive(Debug, Clone, Copy)]
pub struct EffectPayload<'p> {
    pub kind: ReservedActivityType,
    pub survivor_id: &'p SurvivorId,
    pub now: GameTimePoint,
}

/// What a successful effect did
#[derive(Debug, Clone, PartialEq)]
pub enum EffectOutcome {
    /// Instant change already applied (eat, drink)
    Applied,
    /// Water was found and added to the ledger
    WaterFound(u32),
    /// A timed activity must be registered as pending
    StartPending {
        kind: PendingActivityType,
        end_at: GameTimePoint,
        gear: Option<RestGear>,
    },
    SurvivorDiscovered,
    ResearchProgressed(u32),
}

/// Why an effect could not run; the activity stays queued for retry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectRejection {
    #[error("no {0:?} left in camp")]
    OutOfStock(ResourceKey),

    #[error("rest place {0:?} unavailable")]
    RestPlaceUnavailable(RestPlace),

    #[error("survivor {0} not found")]
    UnknownSurvivor(SurvivorId),
}

/// Result of a pending activity reaching its end time
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// Standing order: start again, ending at `end_at`
    Renew { end_at: GameTimePoint },
    /// One-shot activity done
    Finished { clears_phase: bool },
}

/// Run the effect for one activity type
pub fn run_activity_effect(
    ctx: &mut EffectContext<'_>,
    payload: EffectPayload<'_>,
) -> Result<EffectOutcome, EffectRejection> {
    let EffectPayload {
        kind,
        survivor_id,
        now,
    } = payload;

    match kind {
        ReservedActivityType::EatWildStrawberry => {
            let gain = ctx.config.eat_hunger_gain;
            eat_wild_strawberry(ctx.survivors, ctx.resources, survivor_id, gain)?;
            Ok(EffectOutcome::Applied)
        }
        ReservedActivityType::DrinkWater => {
            let gain = ctx.config.drink_thirst_gain;
            drink_water(ctx.survivors, ctx.resources, survivor_id, gain)?;
            Ok(EffectOutcome::Applied)
        }
        ReservedActivityType::SearchFood => Ok(EffectOutcome::StartPending {
            kind: PendingActivityType::SearchFood,
            end_at: now.add_minutes(ctx.config.food_search_minutes as u64),
            gear: None,
        }),
        ReservedActivityType::SearchWater => {
            ctx.clock.advance_by_minutes(ctx.config.water_search_minutes);
            let (lo, hi) = (
                ctx.config.water_search_min_yield,
                ctx.config.water_search_max_yield,
            );
            let found = ctx.rng.gen_range(lo.min(hi)..=hi.max(lo));
            ctx.resources.add_quantity(ResourceKey::Water, found as i64);
            Ok(EffectOutcome::WaterFound(found))
        }
        ReservedActivityType::SearchSurvivor => {
            ctx.clock
                .advance_by_minutes(ctx.config.survivor_search_minutes);
            Ok(EffectOutcome::SurvivorDiscovered)
        }
        ReservedActivityType::DoResearch => {
            Ok(EffectOutcome::ResearchProgressed(ctx.config.research_gain))
        }
        ReservedActivityType::RestWithSleepingBag => {
            let bag = ctx.settings.sleeping_bag;
            let gain = ctx.config.sleeping_bag_gain(bag);
            start_rest(
                ctx,
                survivor_id,
                now,
                NeedType::Tiredness,
                gain,
                PendingActivityType::RestWithSleepingBag,
                RestGear::SleepingBag(bag),
            )
        }
        ReservedActivityType::RestAtPlace => {
            let place = ctx.settings.rest_place;
            if ctx.survivor(survivor_id).is_none() {
                return Err(EffectRejection::UnknownSurvivor(survivor_id.clone()));
            }
            if !ctx.rest_places.consume(place) {
                return Err(EffectRejection::RestPlaceUnavailable(place));
            }
            let gain = ctx.config.rest_place_gain(place);
            start_rest(
                ctx,
                survivor_id,
                now,
                NeedType::Boredom,
                gain,
                PendingActivityType::RestAtPlace,
                RestGear::Place(place),
            )
        }
    }
}

fn start_rest(
    ctx: &mut EffectContext<'_>,
    survivor_id: &SurvivorId,
    now: GameTimePoint,
    need: NeedType,
    gain_per_hour: f32,
    kind: PendingActivityType,
    gear: RestGear,
) -> Result<EffectOutcome, EffectRejection> {
    let survivor = ctx
        .survivor_mut(survivor_id)
        .ok_or_else(|| EffectRejection::UnknownSurvivor(survivor_id.clone()))?;

    let hours = rest_hours(survivor.gauge(need), gain_per_hour);
    if let Some(action) = kind.survivor_action() {
        survivor.current_action = action;
    }

    Ok(EffectOutcome::StartPending {
        kind,
        end_at: now.add_minutes(hours as u64 * MINUTES_PER_HOUR),
        gear: Some(gear),
    })
}

/// Whole hours needed to refill a gauge at `gain_per_hour`, at least one
pub fn rest_hours(current: f32, gain_per_hour: f32) -> u32 {
    if gain_per_hour <= 0.0 {
        return 1;
    }
    let missing = (NEED_MAX - current).max(0.0);
    ((missing / gain_per_hour).ceil() as u32).max(1)
}

/// Apply the completion effect of a pending activity that is due
pub fn apply_completion(
    ctx: &mut EffectContext<'_>,
    pending: &PendingActivity,
    now: GameTimePoint,
) -> CompletionOutcome {
    match pending.kind.restores_need() {
        None => {
            ctx.resources.add_quantity(
                ResourceKey::WildStrawberry,
                ctx.config.food_search_yield as i64,
            );
            CompletionOutcome::Renew {
                end_at: now.add_minutes(ctx.config.food_search_minutes as u64),
            }
        }
        Some(need) => {
            if let Some(survivor) = ctx.survivor_mut(&pending.survivor_id) {
                survivor.set_gauge(need, NEED_MAX);
                survivor.current_action = SurvivorAction::Waiting;
            }
            CompletionOutcome::Finished { clears_phase: true }
        }
    }
}
