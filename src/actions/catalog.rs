//! Activity definitions and catalog

use serde::{Deserialize, Serialize};

use crate::entity::needs::NeedType;
use crate::entity::survivor::SurvivorAction;

/// Activities a survivor can have queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReservedActivityType {
    EatWildStrawberry,
    DrinkWater,
    SearchFood,
    SearchWater,
    SearchSurvivor,
    DoResearch,
    RestWithSleepingBag,
    RestAtPlace,
}

/// Activities that run over game time and complete later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingActivityType {
    SearchFood,
    RestWithSleepingBag,
    RestAtPlace,
}

impl ReservedActivityType {
    pub const ALL: [ReservedActivityType; 8] = [
        ReservedActivityType::EatWildStrawberry,
        ReservedActivityType::DrinkWater,
        ReservedActivityType::SearchFood,
        ReservedActivityType::SearchWater,
        ReservedActivityType::SearchSurvivor,
        ReservedActivityType::DoResearch,
        ReservedActivityType::RestWithSleepingBag,
        ReservedActivityType::RestAtPlace,
    ];

    /// Pending type started by executing this activity, if it runs over time
    pub fn pending_type(&self) -> Option<PendingActivityType> {
        match self {
            ReservedActivityType::SearchFood => Some(PendingActivityType::SearchFood),
            ReservedActivityType::RestWithSleepingBag => {
                Some(PendingActivityType::RestWithSleepingBag)
            }
            ReservedActivityType::RestAtPlace => Some(PendingActivityType::RestAtPlace),
            _ => None,
        }
    }
}

impl PendingActivityType {
    pub fn is_rest(&self) -> bool {
        matches!(
            self,
            PendingActivityType::RestWithSleepingBag | PendingActivityType::RestAtPlace
        )
    }

    /// Need forced to full when this activity completes
    pub fn restores_need(&self) -> Option<NeedType> {
        match self {
            PendingActivityType::SearchFood => None,
            PendingActivityType::RestWithSleepingBag => Some(NeedType::Tiredness),
            PendingActivityType::RestAtPlace => Some(NeedType::Boredom),
        }
    }

    /// What the survivor visibly does while this is in progress
    pub fn survivor_action(&self) -> Option<SurvivorAction> {
        match self {
            PendingActivityType::SearchFood => None,
            PendingActivityType::RestWithSleepingBag => Some(SurvivorAction::Sleeping),
            PendingActivityType::RestAtPlace => Some(SurvivorAction::Resting),
        }
    }
}
