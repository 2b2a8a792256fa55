//! Survivor need gauges and derived status
//!
//! Gauges run from 0 (desperate) to 100 (fully satisfied) and decay toward 0
//! as game time passes.

use serde::{Deserialize, Serialize};

/// Upper bound of every gauge; reaching it counts as fully satisfied
pub const NEED_MAX: f32 = 100.0;

/// Below this a gauge counts as low for status derivation
pub const STATUS_LOW_THRESHOLD: f32 = 30.0;

/// All gauges at or above this make a survivor `Satisfied`
pub const STATUS_HIGH_THRESHOLD: f32 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NeedType {
    Hunger,
    Tiredness,
    Thirst,
    Boredom,
}

impl NeedType {
    pub const ALL: [NeedType; 4] = [
        NeedType::Hunger,
        NeedType::Tiredness,
        NeedType::Thirst,
        NeedType::Boredom,
    ];
}

/// Per game-minute decay for each gauge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayRates {
    pub hunger: f32,
    pub tiredness: f32,
    pub thirst: f32,
    pub boredom: f32,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            hunger: 0.1,
            tiredness: 0.08,
            thirst: 0.12,
            boredom: 0.06,
        }
    }
}

impl DecayRates {
    pub fn rate(&self, need: NeedType) -> f32 {
        match need {
            NeedType::Hunger => self.hunger,
            NeedType::Tiredness => self.tiredness,
            NeedType::Thirst => self.thirst,
            NeedType::Boredom => self.boredom,
        }
    }
}

/// The four gauges of a survivor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    /// 100 = full, 0 = starving
    pub hunger: f32,
    /// 100 = rested, 0 = exhausted
    pub tiredness: f32,
    /// 100 = hydrated, 0 = parched
    pub thirst: f32,
    /// 100 = entertained, 0 = bored stiff
    pub boredom: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            hunger: NEED_MAX,
            tiredness: NEED_MAX,
            thirst: NEED_MAX,
            boredom: NEED_MAX,
        }
    }
}

impl Needs {
    pub fn new(hunger: f32, tiredness: f32, thirst: f32, boredom: f32) -> Self {
        Self {
            hunger: clamp_gauge(hunger),
            tiredness: clamp_gauge(tiredness),
            thirst: clamp_gauge(thirst),
            boredom: clamp_gauge(boredom),
        }
    }

    pub fn get(&self, need: NeedType) -> f32 {
        match need {
            NeedType::Hunger => self.hunger,
            NeedType::Tiredness => self.tiredness,
            NeedType::Thirst => self.thirst,
            NeedType::Boredom => self.boredom,
        }
    }

    /// Set a gauge, clamped into [0, 100]
    pub fn set(&mut self, need: NeedType, value: f32) {
        let value = clamp_gauge(value);
        match need {
            NeedType::Hunger => self.hunger = value,
            NeedType::Tiredness => self.tiredness = value,
            NeedType::Thirst => self.thirst = value,
            NeedType::Boredom => self.boredom = value,
        }
    }

    /// Raise a gauge, capped at 100
    pub fn satisfy(&mut self, need: NeedType, amount: f32) {
        self.set(need, (self.get(need) + amount).min(NEED_MAX));
    }

    /// Decay all gauges by `minutes` of game time, floored at 0
    pub fn decay(&mut self, minutes: f32, rates: &DecayRates) {
        for need in NeedType::ALL {
            let value = (self.get(need) - rates.rate(need) * minutes).max(0.0);
            self.set(need, value);
        }
    }

    pub fn is_full(&self, need: NeedType) -> bool {
        self.get(need) >= NEED_MAX
    }
}

fn clamp_gauge(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, NEED_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurvivorStatus {
    Hungry,
    Bored,
    Tired,
    Stressed,
    Healthy,
    Satisfied,
}

/// Derive a status label from the four gauges
///
/// Precedence: two or more low gauges, then hunger, boredom, tiredness,
/// then all-high, else healthy. Low thirst alone never gets its own label.
pub fn compute_status_from_stats(needs: &Needs) -> SurvivorStatus {
    let low = |v: f32| v < STATUS_LOW_THRESHOLD;
    let low_count = NeedType::ALL.iter().filter(|n| low(needs.get(**n))).count();

    if low_count >= 2 {
        return SurvivorStatus::Stressed;
    }
    if low(needs.hunger) {
        return SurvivorStatus::Hungry;
    }
    if low(needs.boredom) {
        return SurvivorStatus::Bored;
    }
    if low(needs.tiredness) {
        return SurvivorStatus::Tired;
    }
    if NeedType::ALL
        .iter()
        .all(|n| needs.get(*n) >= STATUS_HIGH_THRESHOLD)
    {
        return SurvivorStatus::Satisfied;
    }
    SurvivorStatus::Healthy
}
