//! Balance configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. The config is owned by the world
//! and passed by reference; there is no global instance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ReservedActivityType;
use crate::city::rest::{RestPlace, SleepingBag};
use crate::core::error::{LifelineError, Result};
use crate::entity::needs::{DecayRates, NEED_MAX};

/// Configuration for the camp simulation
///
/// Every field has a default, so a TOML file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    // === CLOCK ===
    /// Game-minutes that pass per real tick at 1x speed
    ///
    /// At 6 minutes per 100ms tick, one game hour passes in one real second.
    pub minutes_per_tick: u32,

    /// Real-time interval between ticks in milliseconds
    ///
    /// The headless runner sleeps this long between ticks with `--realtime`;
    /// the simulation itself is driven purely by tick count.
    pub tick_interval_ms: u64,

    // === NEEDS ===
    /// Gauge loss per game-minute for each need
    ///
    /// Thirst drains fastest (0.12) and boredom slowest (0.06), so a
    /// survivor at 100 runs dry on water in about 14 game hours.
    pub decay: DecayRates,

    /// Hunger restored by eating one wild strawberry
    pub eat_hunger_gain: f32,

    /// Thirst restored by drinking one unit of water
    pub drink_thirst_gain: f32,

    /// Tiredness restored per game hour while resting in each sleeping bag
    pub sleeping_bag_gain_per_hour: SleepingBagGains,

    /// Boredom restored per game hour while resting at each place
    pub rest_place_gain_per_hour: RestPlaceGains,

    // === ACTIVITIES ===
    /// Commit delay before the head of a survivor's queue auto-executes
    pub queue_wait: QueueWaitMinutes,

    /// Game-minutes one food search takes before it yields
    pub food_search_minutes: u32,

    /// Wild strawberries granted per completed food search
    pub food_search_yield: u32,

    /// Game-minutes a water search jumps the clock forward
    pub water_search_minutes: u32,

    /// Inclusive lower bound of water found per search
    pub water_search_min_yield: u32,

    /// Inclusive upper bound of water found per search
    pub water_search_max_yield: u32,

    /// Game-minutes a survivor search jumps the clock forward
    ///
    /// Six hours: expensive enough that the player only does it deliberately.
    pub survivor_search_minutes: u32,

    /// Research progress granted per research action
    pub research_gain: u32,

    // === CAMP ===
    /// Water in the ledger at game start
    pub initial_water: u32,

    /// Wild strawberries in the ledger at game start
    pub initial_wild_strawberry: u32,

    /// Rest-place stock at game start (bare ground is always available)
    pub initial_rest_places: RestPlaceStockConfig,
}

/// Tiredness gain per hour, keyed by sleeping bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepingBagGains {
    pub sleeping_bag1: f32,
    pub sleeping_bag2: f32,
    pub sleeping_bag3: f32,
}

impl Default for SleepingBagGains {
    fn default() -> Self {
        Self {
            sleeping_bag1: 10.0,
            sleeping_bag2: 15.0,
            sleeping_bag3: 20.0,
        }
    }
}

/// Boredom gain per hour, keyed by rest place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestPlaceGains {
    pub bare_ground: f32,
    pub hammock: f32,
    pub wrestling_mat: f32,
    pub soccer_field: f32,
}

impl Default for RestPlaceGains {
    fn default() -> Self {
        Self {
            bare_ground: 10.0,
            hammock: 15.0,
            wrestling_mat: 20.0,
            soccer_field: 25.0,
        }
    }
}

/// Queue-wait minutes per reserved activity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueWaitMinutes {
    pub eat_wild_strawberry: u32,
    pub drink_water: u32,
    pub search_food: u32,
    pub search_water: u32,
    pub search_survivor: u32,
    pub do_research: u32,
    pub rest_with_sleeping_bag: u32,
    pub rest_at_place: u32,
}

impl Default for QueueWaitMinutes {
    fn default() -> Self {
        Self {
            eat_wild_strawberry: 5,
            drink_water: 5,
            search_food: 10,
            search_water: 10,
            search_survivor: 30,
            do_research: 20,
            rest_with_sleeping_bag: 15,
            rest_at_place: 15,
        }
    }
}

/// Starting stock of the consumable rest places
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestPlaceStockConfig {
    pub hammock: u32,
    pub wrestling_mat: u32,
    pub soccer_field: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            // Clock (6 min per 100ms = 1 game hour per real second)
            minutes_per_tick: 6,
            tick_interval_ms: 100,

            // Needs
            decay: DecayRates::default(),
            eat_hunger_gain: 15.0,
            drink_thirst_gain: 15.0,
            sleeping_bag_gain_per_hour: SleepingBagGains::default(),
            rest_place_gain_per_hour: RestPlaceGains::default(),

            // Activities
            queue_wait: QueueWaitMinutes::default(),
            food_search_minutes: 60,
            food_search_yield: 1,
            water_search_minutes: 60,
            water_search_min_yield: 1,
            water_search_max_yield: 3,
            survivor_search_minutes: 360,
            research_gain: 1,

            // Camp
            initial_water: 10,
            initial_wild_strawberry: 10,
            initial_rest_places: RestPlaceStockConfig::default(),
        }
    }
}

impl BalanceConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BalanceConfig = toml::from_str(content)?;
        config.validate().map_err(LifelineError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a TOML balance file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded balance config");
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.minutes_per_tick == 0 {
            return Err("minutes_per_tick must be at least 1".into());
        }

        let rates = [
            self.decay.hunger,
            self.decay.tiredness,
            self.decay.thirst,
            self.decay.boredom,
        ];
        if rates.iter().any(|r| *r < 0.0 || !r.is_finite()) {
            return Err("Decay rates must be finite and non-negative".into());
        }

        // Rest durations divide the missing gauge by these gains
        for bag in SleepingBag::ALL {
            if self.sleeping_bag_gain(bag) <= 0.0 {
                return Err(format!("sleeping bag gain for {bag:?} must be positive"));
            }
        }
        for place in RestPlace::ALL {
            if self.rest_place_gain(place) <= 0.0 {
                return Err(format!("rest place gain for {place:?} must be positive"));
            }
        }

        if self.eat_hunger_gain > NEED_MAX || self.drink_thirst_gain > NEED_MAX {
            return Err(format!("consumption gains must not exceed {NEED_MAX}"));
        }

        if self.water_search_min_yield > self.water_search_max_yield {
            return Err(format!(
                "water_search_min_yield ({}) should be <= water_search_max_yield ({})",
                self.water_search_min_yield, self.water_search_max_yield
            ));
        }

        Ok(())
    }

    pub fn sleeping_bag_gain(&self, bag: SleepingBag) -> f32 {
        let gains = &self.sleeping_bag_gain_per_hour;
        match bag {
            SleepingBag::SleepingBag1 => gains.sleeping_bag1,
            SleepingBag::SleepingBag2 => gains.sleeping_bag2,
            SleepingBag::SleepingBag3 => gains.sleeping_bag3,
        }
    }

    pub fn rest_place_gain(&self, place: RestPlace) -> f32 {
        let gains = &self.rest_place_gain_per_hour;
        match place {
            RestPlace::BareGround => gains.bare_ground,
            RestPlace::Hammock => gains.hammock,
            RestPlace::WrestlingMat => gains.wrestling_mat,
            RestPlace::SoccerField => gains.soccer_field,
        }
    }

    pub fn queue_wait_minutes(&self, kind: ReservedActivityType) -> u32 {
        let table = &self.queue_wait;
        match kind {
            ReservedActivityType::EatWildStrawberry => table.eat_wild_strawberry,
            ReservedActivityType::DrinkWater => table.drink_water,
            ReservedActivityType::SearchFood => table.search_food,
            ReservedActivityType::SearchWater => table.search_water,
            ReservedActivityType::SearchSurvivor => table.search_survivor,
            ReservedActivityType::DoResearch => table.do_research,
            ReservedActivityType::RestWithSleepingBag => table.rest_with_sleeping_bag,
            ReservedActivityType::RestAtPlace => table.rest_at_place,
        }
    }

    pub fn initial_rest_place_stock(&self, place: RestPlace) -> u32 {
        let stock = &self.initial_rest_places;
        match place {
            RestPlace::BareGround => 0,
            RestPlace::Hammock => stock.hammock,
            RestPlace::WrestlingMat => stock.wrestling_mat,
            RestPlace::SoccerField => stock.soccer_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BalanceConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BalanceConfig::from_toml_str(
            r#"
            minutes_per_tick = 12

            [queue_wait]
            search_survivor = 45

            [decay]
            thirst = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.minutes_per_tick, 12);
        assert_eq!(config.queue_wait_minutes(ReservedActivityType::SearchSurvivor), 45);
        assert_eq!(config.queue_wait_minutes(ReservedActivityType::EatWildStrawberry), 5);
        assert_eq!(config.decay.thirst, 0.2);
        assert_eq!(config.decay.hunger, 0.1);
    }

    #[test]
    fn test_invalid_yield_range_rejected() {
        let err = BalanceConfig::from_toml_str(
            "water_search_min_yield = 5\nwater_search_max_yield = 2\n",
        )
        .unwrap_err();
        assert!(matches!(err, LifelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_rest_gain_rejected() {
        let mut config = BalanceConfig::default();
        config.rest_place_gain_per_hour.hammock = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shipped_balance_file_matches_defaults() {
        let config = BalanceConfig::from_toml_str(include_str!("../../data/balance.toml")).unwrap();
        assert_eq!(config, BalanceConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = BalanceConfig::from_toml_str("minutes_per_tick = \"six\"").unwrap_err();
        assert!(matches!(err, LifelineError::TomlError(_)));
    }
}
