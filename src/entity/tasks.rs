//! Activity records: reserved queue items, pending activities, start records

use serde::{Deserialize, Serialize};

use crate::actions::catalog::{PendingActivityType, ReservedActivityType};
use crate::city::rest::{RestPlace, SleepingBag};
use crate::core::calendar::GameTimePoint;
use crate::core::types::{ActivityId, ReservedId, SurvivorId};

/// Equipment or place a rest activity uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestGear {
    SleepingBag(SleepingBag),
    Place(RestPlace),
}

/// An activity in progress, completing at `end_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingActivity {
    pub id: ActivityId,
    pub survivor_id: SurvivorId,
    #[serde(rename = "type")]
    pub kind: PendingActivityType,
    pub end_at: GameTimePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeping_bag: Option<SleepingBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_place: Option<RestPlace>,
}

impl PendingActivity {
    pub fn new(
        id: ActivityId,
        survivor_id: SurvivorId,
        kind: PendingActivityType,
        end_at: GameTimePoint,
    ) -> Self {
        Self {
            id,
            survivor_id,
            kind,
            end_at,
            sleeping_bag: None,
            rest_place: None,
        }
    }

    pub fn with_gear(mut self, gear: Option<RestGear>) -> Self {
        match gear {
            Some(RestGear::SleepingBag(bag)) => self.sleeping_bag = Some(bag),
            Some(RestGear::Place(place)) => self.rest_place = Some(place),
            None => {}
        }
        self
    }

    /// Due when `end_at` is at or before `now`
    pub fn is_due(&self, now: GameTimePoint) -> bool {
        self.end_at.to_minutes() <= now.to_minutes()
    }

    /// Gear of a rest activity; records saved without gear get the basic kind
    pub fn gear(&self) -> Option<RestGear> {
        match self.kind {
            PendingActivityType::SearchFood => None,
            PendingActivityType::RestWithSleepingBag => Some(RestGear::SleepingBag(
                self.sleeping_bag.unwrap_or_default(),
            )),
            PendingActivityType::RestAtPlace => {
                Some(RestGear::Place(self.rest_place.unwrap_or_default()))
            }
        }
    }
}

/// A queued intent; execution order is the order within the global list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedActivity {
    pub id: ReservedId,
    pub survivor_id: SurvivorId,
    #[serde(rename = "type")]
    pub kind: ReservedActivityType,
}

impl ReservedActivity {
    pub fn new(id: ReservedId, survivor_id: SurvivorId, kind: ReservedActivityType) -> Self {
        Self {
            id,
            survivor_id,
            kind,
        }
    }
}

/// When the current queue head started waiting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStartRecord {
    pub activity_id: ReservedId,
    pub started_at: GameTimePoint,
}

impl ActivityStartRecord {
    /// True once `wait_minutes` have elapsed since `started_at` (inclusive)
    pub fn wait_elapsed(&self, now: GameTimePoint, wait_minutes: u32) -> bool {
        now.to_minutes() >= self.started_at.to_minutes() + wait_minutes as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_due_is_inclusive() {
        let pending = PendingActivity::new(
            ActivityId("activity-1".into()),
            SurvivorId::new("1"),
            PendingActivityType::SearchFood,
            GameTimePoint::new(1, 9, 0),
        );
        assert!(!pending.is_due(GameTimePoint::new(1, 8, 59)));
        assert!(pending.is_due(GameTimePoint::new(1, 9, 0)));
        assert!(pending.is_due(GameTimePoint::new(2, 0, 0)));
    }

    #[test]
    fn test_gear_follows_kind() {
        let pending = PendingActivity::new(
            ActivityId("activity-2".into()),
            SurvivorId::new("1"),
            PendingActivityType::RestAtPlace,
            GameTimePoint::start(),
        )
        .with_gear(Some(RestGear::Place(RestPlace::Hammock)));
        assert_eq!(pending.gear(), Some(RestGear::Place(RestPlace::Hammock)));
        assert_eq!(pending.sleeping_bag, None);
    }

    #[test]
    fn test_wait_elapsed_boundary() {
        let record = ActivityStartRecord {
            activity_id: ReservedId("reserved-1".into()),
            started_at: GameTimePoint::new(1, 8, 0),
        };
        assert!(!record.wait_elapsed(GameTimePoint::new(1, 8, 14), 15));
        assert!(record.wait_elapsed(GameTimePoint::new(1, 8, 15), 15));
    }

    #[test]
    fn test_pending_wire_shape() {
        let pending = PendingActivity::new(
            ActivityId("activity-3".into()),
            SurvivorId::new("2"),
            PendingActivityType::RestWithSleepingBag,
            GameTimePoint::new(1, 10, 30),
        )
        .with_gear(Some(RestGear::SleepingBag(SleepingBag::SleepingBag2)));
        let value = serde_json::to_value(&pending).unwrap();
        assert_eq!(value["type"], "restWithSleepingBag");
        assert_eq!(value["survivorId"], "2");
        assert_eq!(value["endAt"]["hour"], 10);
        assert_eq!(value["sleepingBag"], "sleepingBag2");
        assert!(value.get("restPlace").is_none());
    }
}
