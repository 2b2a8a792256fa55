//! Needs decay over elapsed game time, plus recovery for resting survivors

use crate::core::config::BalanceConfig;
use crate::entity::survivor::Survivor;
use crate::entity::tasks::{PendingActivity, RestGear};

/// Decay every survivor's gauges by `minutes` of game time
///
/// Survivors with a rest activity in progress then recover tiredness or
/// boredom at the hourly rate of their sleeping bag or rest place.
pub fn decay_by_minutes(
    survivors: &mut [Survivor],
    pending: &[PendingActivity],
    minutes: u32,
    config: &BalanceConfig,
) {
    if minutes == 0 {
        return;
    }
    let minutes = minutes as f32;

    for survivor in survivors.iter_mut() {
        survivor.decay(minutes, &config.decay);
    }

    for activity in pending {
        let (Some(need), Some(gear)) = (activity.kind.restores_need(), activity.gear()) else {
            continue;
        };
        let gain_per_hour = match gear {
            RestGear::SleepingBag(bag) => config.sleeping_bag_gain(bag),
            RestGear::Place(place) => config.rest_place_gain(place),
        };
        if let Some(survivor) = survivors.iter_mut().find(|s| s.id == activity.survivor_id) {
            survivor.satisfy(need, gain_per_hour * minutes / 60.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::catalog::PendingActivityType;
    use crate::city::rest::SleepingBag;
    use crate::core::calendar::GameTimePoint;
    use crate::core::types::{ActivityId, SurvivorId};
    use crate::entity::needs::{NeedType, Needs};

    fn survivor(id: &str, tiredness: f32) -> Survivor {
        Survivor::new(SurvivorId::new(id), id, 30, Needs::new(80.0, tiredness, 80.0, 80.0))
    }

    #[test]
    fn test_decay_uses_per_minute_rates() {
        let mut survivors = vec![survivor("1", 80.0)];
        decay_by_minutes(&mut survivors, &[], 10, &BalanceConfig::default());

        let needs = survivors[0].needs();
        assert!((needs.hunger - 79.0).abs() < 1e-4);
        assert!((needs.tiredness - 79.2).abs() < 1e-4);
        assert!((needs.thirst - 78.8).abs() < 1e-4);
        assert!((needs.boredom - 79.4).abs() < 1e-4);
    }

    #[test]
    fn test_resting_survivor_recovers() {
        let mut survivors = vec![survivor("1", 40.0), survivor("2", 40.0)];
        let pending = vec![PendingActivity::new(
            ActivityId("activity-1".into()),
            SurvivorId::new("1"),
            PendingActivityType::RestWithSleepingBag,
            GameTimePoint::new(1, 14, 0),
        )
        .with_gear(Some(RestGear::SleepingBag(SleepingBag::SleepingBag2)))];

        decay_by_minutes(&mut survivors, &pending, 60, &BalanceConfig::default());

        // 40 - 4.8 decay + 15 gain
        assert!((survivors[0].gauge(NeedType::Tiredness) - 50.2).abs() < 1e-4);
        assert!((survivors[1].gauge(NeedType::Tiredness) - 35.2).abs() < 1e-4);
    }

    #[test]
    fn test_zero_minutes_is_noop() {
        let mut survivors = vec![survivor("1", 40.0)];
        let before = survivors.clone();
        decay_by_minutes(&mut survivors, &[], 0, &BalanceConfig::default());
        assert_eq!(survivors, before);
    }
}
