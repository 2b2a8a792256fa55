//! Consumption - survivors eating and drinking from the camp ledger

use crate::city::stockpile::{CampResources, ResourceKey};
use crate::core::types::SurvivorId;
use crate::entity::needs::NeedType;
use crate::entity::survivor::Survivor;
use crate::simulation::effects::EffectRejection;

/// Eat one wild strawberry from the ledger, restoring `gain` hunger
pub fn eat_wild_strawberry(
    survivors: &mut [Survivor],
    resources: &mut CampResources,
    id: &SurvivorId,
    gain: f32,
) -> Result<(), EffectRejection> {
    consume_for_need(survivors, resources, id, ResourceKey::WildStrawberry, NeedType::Hunger, gain)
}

/// Drink one unit of water from the ledger, restoring `gain` thirst
pub fn drink_water(
    survivors: &mut [Survivor],
    resources: &mut CampResources,
    id: &SurvivorId,
    gain: f32,
) -> Result<(), EffectRejection> {
    consume_for_need(survivors, resources, id, ResourceKey::Water, NeedType::Thirst, gain)
}

fn consume_for_need(
    survivors: &mut [Survivor],
    resources: &mut CampResources,
    id: &SurvivorId,
    resource: ResourceKey,
    need: NeedType,
    gain: f32,
) -> Result<(), EffectRejection> {
    let survivor = survivors
        .iter_mut()
        .find(|s| &s.id == id)
        .ok_or_else(|| EffectRejection::UnknownSurvivor(id.clone()))?;

    if !resources.consume_one(resource) {
        return Err(EffectRejection::OutOfStock(resource));
    }
    survivor.satisfy(need, gain);
    tracing::trace!(survivor = %id, ?resource, value = survivor.gauge(need), "consumed");
    Ok(())
}

/// Set one gauge directly; the status is re-derived
pub fn update_survivor_stat(
    survivors: &mut [Survivor],
    id: &SurvivorId,
    need: NeedType,
    value: f32,
) -> bool {
    match survivors.iter_mut().find(|s| &s.id == id) {
        Some(survivor) => {
            survivor.set_gauge(need, value);
            true
        }
        None => false,
    }
}
