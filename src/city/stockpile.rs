//! Camp resource ledger - camp-wide non-negative resource quantities

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::config::BalanceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKey {
    Wood,
    Stone,
    IronOre,
    Cotton,
    Leather,
    Water,
    WildStrawberry,
    Potato,
    Corn,
    Wheat,
}

impl ResourceKey {
    pub const ALL: [ResourceKey; 10] = [
        ResourceKey::Wood,
        ResourceKey::Stone,
        ResourceKey::IronOre,
        ResourceKey::Cotton,
        ResourceKey::Leather,
        ResourceKey::Water,
        ResourceKey::WildStrawberry,
        ResourceKey::Potato,
        ResourceKey::Corn,
        ResourceKey::Wheat,
    ];

    pub fn is_food(&self) -> bool {
        matches!(
            self,
            ResourceKey::WildStrawberry | ResourceKey::Potato | ResourceKey::Corn | ResourceKey::Wheat
        )
    }

    /// Parse a wire key such as `"ironOre"`
    pub fn from_key(key: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(key.to_owned())).ok()
    }
}

/// Camp-wide resource quantities, every key always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampResources {
    quantities: BTreeMap<ResourceKey, u32>,
}

impl Default for CampResources {
    fn default() -> Self {
        Self {
            quantities: ResourceKey::ALL.iter().map(|k| (*k, 0)).collect(),
        }
    }
}

impl CampResources {
    /// Empty ledger (all zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger seeded with the configured starting water and strawberries
    pub fn initial(config: &BalanceConfig) -> Self {
        let mut ledger = Self::new();
        ledger.set_quantity(ResourceKey::Water, config.initial_water as i64);
        ledger.set_quantity(ResourceKey::WildStrawberry, config.initial_wild_strawberry as i64);
        ledger
    }

    pub fn get(&self, resource: ResourceKey) -> u32 {
        self.quantities.get(&resource).copied().unwrap_or(0)
    }

    /// Apply a signed delta, clamping the result at 0
    pub fn add_quantity(&mut self, resource: ResourceKey, delta: i64) {
        let next = (self.get(resource) as i64).saturating_add(delta);
        self.set_quantity(resource, next);
    }

    /// Set a quantity, clamping negatives to 0
    pub fn set_quantity(&mut self, resource: ResourceKey, value: i64) {
        let clamped = value.clamp(0, u32::MAX as i64) as u32;
        self.quantities.insert(resource, clamped);
    }

    /// Remove one unit if any is available
    pub fn consume_one(&mut self, resource: ResourceKey) -> bool {
        if self.get(resource) == 0 {
            return false;
        }
        self.add_quantity(resource, -1);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKey, u32)> + '_ {
        self.quantities.iter().map(|(k, v)| (*k, *v))
    }
}
