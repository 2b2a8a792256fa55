//! Save slots - the persisted state shape and its lenient loader
//!
//! Loading never fails on bad values: a malformed section falls back to its
//! default and a malformed array element is skipped. Only text that is not
//! JSON at all is an error.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::city::region::{Facility, RegionCamps};
use crate::city::rest::RestPlaceStock;
use crate::city::stockpile::{CampResources, ResourceKey};
use crate::city::tech::TechTree;
use crate::core::calendar::{GameSpeed, GameTimePoint};
use crate::core::error::Result;
use crate::core::types::RegionId;
use crate::entity::survivor::Survivor;
use crate::entity::tasks::{PendingActivity, ReservedActivity};
use crate::world::camp::World;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSlot {
    pub survivor_data: SurvivorData,
    pub region_data: RegionCamps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_time_data: Option<GameTimeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camp_resource_data: Option<CampResourceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_data: Option<TechTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_place_data: Option<RestPlaceStock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivorData {
    /// Absent means "keep the current roster"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survivors: Option<Vec<Survivor>>,
    pub pending_activities: Vec<PendingActivity>,
    pub reserved_activities: Vec<ReservedActivity>,
    pub discovered_survivor_count: u32,
    pub research_progress: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTimeData {
    pub year: u32,
    pub hour: u32,
    pub minute: u32,
    pub is_paused: bool,
    pub speed: GameSpeed,
}

impl Default for GameTimeData {
    fn default() -> Self {
        let start = GameTimePoint::start();
        Self {
            year: start.year,
            hour: start.hour,
            minute: start.minute,
            is_paused: true,
            speed: GameSpeed::X1,
        }
    }
}

impl GameTimeData {
    pub fn time_point(&self) -> GameTimePoint {
        GameTimePoint {
            year: self.year,
            hour: self.hour,
            minute: self.minute,
        }
        .normalized()
    }
}

/// Stored ledger quantities; keys not present keep their initial value on load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampResourceData {
    pub quantities: std::collections::BTreeMap<ResourceKey, u32>,
}

impl SaveSlot {
    /// Parse a save slot from JSON text
    pub fn load_from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Parse a save slot from a JSON file on disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "save slot written");
        Ok(())
    }

    /// Extract every section leniently from an already-parsed document
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let root = value.as_object().unwrap_or(&empty);

        Self {
            survivor_data: parse_survivor_data(root.get("survivorData")),
            region_data: parse_region_data(root.get("regionData")),
            game_time_data: root.get("gameTimeData").and_then(Value::as_object).map(parse_game_time),
            camp_resource_data: root
                .get("campResourceData")
                .and_then(Value::as_object)
                .map(parse_camp_resources),
            tech_data: root.get("techData").and_then(section::<TechTree>),
            rest_place_data: root.get("restPlaceData").and_then(section::<RestPlaceStock>),
        }
    }
}

fn parse_survivor_data(value: Option<&Value>) -> SurvivorData {
    let Some(data) = value.and_then(Value::as_object) else {
        return SurvivorData::default();
    };

    SurvivorData {
        survivors: data
            .get("survivors")
            .filter(|v| v.is_array())
            .map(|v| lenient_array(Some(v), "survivor")),
        pending_activities: lenient_array(data.get("pendingActivities"), "pending activity"),
        reserved_activities: lenient_array(data.get("reservedActivities"), "reserved activity"),
        discovered_survivor_count: count(data.get("discoveredSurvivorCount")),
        research_progress: count(data.get("researchProgress")),
    }
}

fn parse_region_data(value: Option<&Value>) -> RegionCamps {
    let mut camps = RegionCamps::new();
    let Some(data) = value.and_then(Value::as_object) else {
        return camps;
    };

    if let Some(regions) = data.get("regionsWithCamp").and_then(Value::as_array) {
        for region in regions.iter().filter_map(Value::as_str) {
            camps.build_camp(RegionId::new(region));
        }
    }
    if let Some(facilities) = data.get("facilitiesByRegion").and_then(Value::as_object) {
        for (region, installed) in facilities {
            for facility in lenient_array::<Facility>(Some(installed), "facility") {
                camps.install_facility(RegionId::new(region.as_str()), facility);
            }
        }
    }
    camps
}

fn parse_game_time(data: &Map<String, Value>) -> GameTimeData {
    let defaults = GameTimeData::default();
    let field = |key: &str, fallback: u32| -> u32 {
        data.get(key)
            .and_then(Value::as_u64)
            .map(|v| v.min(u32::MAX as u64) as u32)
            .unwrap_or(fallback)
    };

    GameTimeData {
        year: field("year", defaults.year),
        hour: field("hour", defaults.hour),
        minute: field("minute", defaults.minute),
        is_paused: data
            .get("isPaused")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.is_paused),
        speed: data
            .get("speed")
            .and_then(Value::as_u64)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| GameSpeed::try_from(v).ok())
            .unwrap_or(defaults.speed),
    }
}

fn parse_camp_resources(data: &Map<String, Value>) -> CampResourceData {
    let mut parsed = CampResourceData::default();
    let Some(quantities) = data.get("quantities").and_then(Value::as_object) else {
        return parsed;
    };

    for (key, amount) in quantities {
        let Some(resource) = ResourceKey::from_key(key) else {
            tracing::warn!(key = %key, "ignoring unknown resource in save");
            continue;
        };
        let amount = amount
            .as_i64()
            .or_else(|| amount.as_f64().map(|f| f as i64));
        if let Some(amount) = amount {
            parsed
                .quantities
                .insert(resource, amount.clamp(0, u32::MAX as i64) as u32);
        }
    }
    parsed
}

fn count(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_u64)
        .map(|v| v.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

fn section<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(%err, "malformed save section; using defaults");
            None
        }
    }
}

fn lenient_array<T: DeserializeOwned>(value: Option<&Value>, what: &str) -> Vec<T> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    let parsed: Vec<T> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    if parsed.len() < items.len() {
        tracing::warn!(
            skipped = items.len() - parsed.len(),
            what,
            "skipped malformed save entries"
        );
    }
    parsed
}

impl World {
    /// Snapshot the full camp state
    pub fn to_save(&self) -> SaveSlot {
        let now = self.clock.now();
        SaveSlot {
            survivor_data: SurvivorData {
                survivors: Some(self.survivors.clone()),
                pending_activities: self.board.pending().to_vec(),
                reserved_activities: self.board.reserved().to_vec(),
                discovered_survivor_count: self.board.discovered_survivor_count(),
                research_progress: self.board.research_progress(),
            },
            region_data: self.regions.clone(),
            game_time_data: Some(GameTimeData {
                year: now.year,
                hour: now.hour,
                minute: now.minute,
                is_paused: self.clock.is_paused(),
                speed: self.clock.speed(),
            }),
            camp_resource_data: Some(CampResourceData {
                quantities: self.resources.iter().collect(),
            }),
            tech_data: Some(self.tech.clone()),
            rest_place_data: Some(self.rest_places.clone()),
        }
    }

    /// Restore state from a save slot
    ///
    /// Absent sections fall back to fresh-game defaults, except survivors,
    /// which keep the current roster. Queue-wait records and phase latches
    /// always start empty.
    pub fn apply_save(&mut self, slot: SaveSlot) {
        let SaveSlot {
            survivor_data,
            region_data,
            game_time_data,
            camp_resource_data,
            tech_data,
            rest_place_data,
        } = slot;

        if let Some(survivors) = survivor_data.survivors {
            self.survivors = survivors;
        }
        self.board.restore(
            survivor_data.pending_activities,
            survivor_data.reserved_activities,
            survivor_data.discovered_survivor_count,
            survivor_data.research_progress,
        );
        self.regions = region_data;

        let time = game_time_data.unwrap_or_default();
        self.clock
            .restore(time.time_point(), time.is_paused, time.speed);

        let mut resources = CampResources::initial(&self.config);
        if let Some(data) = camp_resource_data {
            for (key, amount) in data.quantities {
                resources.set_quantity(key, amount as i64);
            }
        }
        self.resources = resources;

        self.tech = tech_data.unwrap_or_default();
        self.rest_places = rest_place_data.unwrap_or_else(|| RestPlaceStock::initial(&self.config));

        tracing::info!(
            survivors = self.survivors.len(),
            pending = self.board.pending().len(),
            reserved = self.board.reserved().len(),
            now = %self.clock.now(),
            "save applied"
        );
    }

    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let slot = SaveSlot::load_from_json(json)?;
        self.apply_save(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::survivor::default_roster;

    #[test]
    fn test_empty_document_uses_defaults() {
        let slot = SaveSlot::load_from_json("{}").unwrap();
        assert_eq!(slot, SaveSlot::default());
        assert!(slot.survivor_data.survivors.is_none());
    }

    #[test]
    fn test_non_json_is_error() {
        assert!(SaveSlot::load_from_json("survivors: 8").is_err());
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let slot = SaveSlot::load_from_json(
            r#"{
                "survivorData": {
                    "survivors": "everyone",
                    "pendingActivities": 4,
                    "reservedActivities": [{"id": "reserved-1", "survivorId": "1", "type": "drinkWater"}, {"bogus": true}],
                    "discoveredSurvivorCount": "two"
                },
                "regionData": [],
                "gameTimeData": {"year": 3, "hour": "noon", "speed": 9}
            }"#,
        )
        .unwrap();

        assert!(slot.survivor_data.survivors.is_none());
        assert!(slot.survivor_data.pending_activities.is_empty());
        assert_eq!(slot.survivor_data.reserved_activities.len(), 1);
        assert_eq!(slot.survivor_data.discovered_survivor_count, 0);

        let time = slot.game_time_data.unwrap();
        assert_eq!(time.year, 3);
        assert_eq!(time.hour, 8);
        assert_eq!(time.speed, GameSpeed::X1);
        assert!(time.is_paused);
    }

    #[test]
    fn test_region_data_parses_leniently() {
        let slot = SaveSlot::load_from_json(
            r#"{"regionData": {
                "regionsWithCamp": ["region-2", 5],
                "facilitiesByRegion": {"region-2": ["well", "castle", "well"]}
            }}"#,
        )
        .unwrap();

        let region = RegionId::new("region-2");
        assert!(slot.region_data.has_camp(&region));
        assert_eq!(slot.region_data.facilities(&region), &[Facility::Well]);
    }

    #[test]
    fn test_camp_resources_merge_over_initial() {
        let mut world = World::new();
        world
            .load_json(r#"{"campResourceData": {"quantities": {"wood": 12, "water": -4, "gold": 3}}}"#)
            .unwrap();

        assert_eq!(world.resources.get(ResourceKey::Wood), 12);
        assert_eq!(world.resources.get(ResourceKey::Water), 0);
        assert_eq!(world.resources.get(ResourceKey::WildStrawberry), 10);
    }

    #[test]
    fn test_absent_survivors_keep_current_roster() {
        let mut world = World::new();
        world.survivors.truncate(3);
        world.load_json(r#"{"survivorData": {}}"#).unwrap();
        assert_eq!(world.survivors.len(), 3);

        world
            .load_json(&World::new().to_save().to_json().unwrap())
            .unwrap();
        assert_eq!(world.survivors, default_roster());
    }

    #[test]
    fn test_time_is_normalized_on_load() {
        let mut world = World::new();
        world
            .load_json(r#"{"gameTimeData": {"year": 1, "hour": 23, "minute": 75, "isPaused": false, "speed": 2}}"#)
            .unwrap();
        assert_eq!(world.now(), GameTimePoint::new(2, 0, 15));
        assert!(!world.clock.is_paused());
        assert_eq!(world.clock.speed(), GameSpeed::X2);
    }
}
