//! Behavior guideline settings
//!
//! The external settings document looks like:
//!
//! ```json
//! {
//!   "guidelinesValues": { "hungerThreshold": 30, "foodResource": "wildStrawberry", ... },
//!   "guidelinesOrder": ["hungerThreshold", "tirednessThreshold", "thirstThreshold", "boredomThreshold"]
//! }
//! ```
//!
//! Parsing is lenient: every value falls back to its default on its own.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::city::rest::{RestPlace, SleepingBag};
use crate::city::stockpile::ResourceKey;
use crate::entity::needs::NeedType;

pub const DEFAULT_THRESHOLD: f32 = 30.0;

/// One guideline rule, named after the threshold it watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuidelineKey {
    HungerThreshold,
    TirednessThreshold,
    ThirstThreshold,
    BoredomThreshold,
}

impl GuidelineKey {
    /// Default priority order
    pub const DEFAULT_ORDER: [GuidelineKey; 4] = [
        GuidelineKey::HungerThreshold,
        GuidelineKey::TirednessThreshold,
        GuidelineKey::ThirstThreshold,
        GuidelineKey::BoredomThreshold,
    ];

    pub fn need(&self) -> NeedType {
        match self {
            GuidelineKey::HungerThreshold => NeedType::Hunger,
            GuidelineKey::TirednessThreshold => NeedType::Tiredness,
            GuidelineKey::ThirstThreshold => NeedType::Thirst,
            GuidelineKey::BoredomThreshold => NeedType::Boredom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuidelineKey::HungerThreshold => "hungerThreshold",
            GuidelineKey::TirednessThreshold => "tirednessThreshold",
            GuidelineKey::ThirstThreshold => "thirstThreshold",
            GuidelineKey::BoredomThreshold => "boredomThreshold",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::DEFAULT_ORDER.into_iter().find(|k| k.as_str() == key)
    }
}

/// Thresholds, chosen resource/equipment per rule, and rule priority
#[derive(Debug, Clone, PartialEq)]
pub struct GuidelineSettings {
    pub order: Vec<GuidelineKey>,
    pub hunger_threshold: f32,
    /// Food eaten by the hunger rule; only wild strawberries are edible so far
    pub food_resource: ResourceKey,
    pub tiredness_threshold: f32,
    pub sleeping_bag: SleepingBag,
    pub thirst_threshold: f32,
    pub boredom_threshold: f32,
    pub rest_place: RestPlace,
}

impl Default for GuidelineSettings {
    fn default() -> Self {
        Self {
            order: GuidelineKey::DEFAULT_ORDER.to_vec(),
            hunger_threshold: DEFAULT_THRESHOLD,
            food_resource: ResourceKey::WildStrawberry,
            tiredness_threshold: DEFAULT_THRESHOLD,
            sleeping_bag: SleepingBag::SleepingBag1,
            thirst_threshold: DEFAULT_THRESHOLD,
            boredom_threshold: DEFAULT_THRESHOLD,
            rest_place: RestPlace::BareGround,
        }
    }
}

impl GuidelineSettings {
    pub fn threshold(&self, key: GuidelineKey) -> f32 {
        match key {
            GuidelineKey::HungerThreshold => self.hunger_threshold,
            GuidelineKey::TirednessThreshold => self.tiredness_threshold,
            GuidelineKey::ThirstThreshold => self.thirst_threshold,
            GuidelineKey::BoredomThreshold => self.boredom_threshold,
        }
    }

    /// Merge a settings document over the defaults
    ///
    /// Unknown keys are ignored, wrongly typed values keep their default,
    /// and `guidelinesOrder` is only taken when it is an array.
    pub fn from_value(document: &Value) -> Self {
        let mut settings = Self::default();

        if let Some(values) = document.get("guidelinesValues").and_then(Value::as_object) {
            settings.merge_values(values);
        }

        match document.get("guidelinesOrder") {
            Some(Value::Array(items)) => settings.order = parse_order(items),
            Some(other) => {
                tracing::warn!(value = %other, "guidelinesOrder is not an array; using default order")
            }
            None => {}
        }

        settings
    }

    fn merge_values(&mut self, values: &Map<String, Value>) {
        let number = |key: &str, current: f32| -> f32 {
            values
                .get(key)
                .and_then(Value::as_f64)
                .map(|v| v as f32)
                .unwrap_or(current)
        };
        self.hunger_threshold = number("hungerThreshold", self.hunger_threshold);
        self.tiredness_threshold = number("tirednessThreshold", self.tiredness_threshold);
        self.thirst_threshold = number("thirstThreshold", self.thirst_threshold);
        self.boredom_threshold = number("boredomThreshold", self.boredom_threshold);

        if let Some(food) = parse_enum::<ResourceKey>(values.get("foodResource")) {
            if food.is_food() {
                self.food_resource = food;
            } else {
                tracing::warn!(?food, "foodResource is not a food; keeping default");
            }
        }
        if let Some(bag) = parse_enum::<SleepingBag>(values.get("sleepingBag")) {
            self.sleeping_bag = bag;
        }
        if let Some(place) = parse_enum::<RestPlace>(values.get("restPlace")) {
            self.rest_place = place;
        }
    }

    /// Render back into the external document shape
    pub fn to_value(&self) -> Value {
        json!({
            "guidelinesValues": {
                "hungerThreshold": self.hunger_threshold,
                "foodResource": self.food_resource,
                "tirednessThreshold": self.tiredness_threshold,
                "sleepingBag": self.sleeping_bag,
                "thirstThreshold": self.thirst_threshold,
                "boredomThreshold": self.boredom_threshold,
                "restPlace": self.rest_place,
            },
            "guidelinesOrder": self.order.iter().map(GuidelineKey::as_str).collect::<Vec<_>>(),
        })
    }
}

fn parse_order(items: &[Value]) -> Vec<GuidelineKey> {
    let mut order = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str().and_then(GuidelineKey::from_key) {
            Some(key) if !order.contains(&key) => order.push(key),
            Some(_) => {}
            None => tracing::warn!(value = %item, "dropping unknown guideline key"),
        }
    }
    order
}

fn parse_enum<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}
