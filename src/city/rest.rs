//! Rest equipment: sleeping bags and rest places

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::config::BalanceConfig;

/// Bare ground never runs out
pub const BARE_GROUND_STOCK: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SleepingBag {
    #[default]
    SleepingBag1,
    SleepingBag2,
    SleepingBag3,
}

impl SleepingBag {
    pub const ALL: [SleepingBag; 3] = [
        SleepingBag::SleepingBag1,
        SleepingBag::SleepingBag2,
        SleepingBag::SleepingBag3,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestPlace {
    #[default]
    BareGround,
    Hammock,
    WrestlingMat,
    SoccerField,
}

impl RestPlace {
    pub const ALL: [RestPlace; 4] = [
        RestPlace::BareGround,
        RestPlace::Hammock,
        RestPlace::WrestlingMat,
        RestPlace::SoccerField,
    ];
}

/// Available units of each built rest place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestPlaceStock {
    stock: BTreeMap<RestPlace, u32>,
}

impl Default for RestPlaceStock {
    fn default() -> Self {
        Self::initial(&BalanceConfig::default())
    }
}

impl RestPlaceStock {
    pub fn initial(config: &BalanceConfig) -> Self {
        let stock = RestPlace::ALL
            .iter()
            .map(|place| {
                let units = match place {
                    RestPlace::BareGround => BARE_GROUND_STOCK,
                    other => config.initial_rest_place_stock(*other),
                };
                (*place, units)
            })
            .collect();
        Self { stock }
    }

    pub fn get(&self, place: RestPlace) -> u32 {
        if place == RestPlace::BareGround {
            return BARE_GROUND_STOCK;
        }
        self.stock.get(&place).copied().unwrap_or(0)
    }

    pub fn add(&mut self, place: RestPlace, units: u32) {
        if place == RestPlace::BareGround {
            return;
        }
        let entry = self.stock.entry(place).or_insert(0);
        *entry = entry.saturating_add(units);
    }

    /// Take one unit for a rest; bare ground is never decremented
    pub fn consume(&mut self, place: RestPlace) -> bool {
        if self.get(place) == 0 {
            return false;
        }
        if let Some(units) = self.stock.get_mut(&place) {
            if place != RestPlace::BareGround {
                *units -= 1;
            }
        }
        true
    }
}
