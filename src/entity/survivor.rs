//! Survivors - the camp's population

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::types::SurvivorId;
use crate::entity::needs::{
    compute_status_from_stats, DecayRates, NeedType, Needs, SurvivorStatus, NEED_MAX,
};

/// What a survivor is visibly doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurvivorAction {
    Farming,
    Mining,
    Logging,
    Resting,
    Cooking,
    Sleeping,
    Researching,
    #[default]
    Waiting,
}

/// A survivor with four need gauges and a derived status
///
/// Gauges are private: every mutation goes through a method that re-derives
/// `status`, so it can never go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SurvivorRecord")]
pub struct Survivor {
    pub id: SurvivorId,
    pub name: String,
    pub age: u32,
    status: SurvivorStatus,
    pub current_action: SurvivorAction,
    #[serde(flatten)]
    needs: Needs,
}

/// Wire shape of a survivor; any stored status is ignored and re-derived
///
/// Only `id` is required. Missing or mistyped fields fall back to defaults
/// (full gauges, empty name, age 0, waiting) so one bad field never costs
/// the whole survivor.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurvivorRecord {
    id: SurvivorId,
    #[serde(default, deserialize_with = "lenient")]
    name: String,
    #[serde(default, deserialize_with = "lenient")]
    age: u32,
    #[serde(default, deserialize_with = "lenient")]
    current_action: SurvivorAction,
    #[serde(default = "full_gauge", deserialize_with = "lenient_gauge")]
    hunger: f32,
    #[serde(default = "full_gauge", deserialize_with = "lenient_gauge")]
    tiredness: f32,
    #[serde(default = "full_gauge", deserialize_with = "lenient_gauge")]
    thirst: f32,
    #[serde(default = "full_gauge", deserialize_with = "lenient_gauge")]
    boredom: f32,
}

fn full_gauge() -> f32 {
    NEED_MAX
}

fn lenient_gauge<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(|v| v as f32).unwrap_or(NEED_MAX))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl From<SurvivorRecord> for Survivor {
    fn from(record: SurvivorRecord) -> Self {
        let mut survivor = Survivor::new(
            record.id,
            record.name,
            record.age,
            Needs::new(record.hunger, record.tiredness, record.thirst, record.boredom),
        );
        survivor.current_action = record.current_action;
        survivor
    }
}

impl Survivor {
    pub fn new(id: SurvivorId, name: impl Into<String>, age: u32, needs: Needs) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            status: compute_status_from_stats(&needs),
            current_action: SurvivorAction::Waiting,
            needs,
        }
    }

    pub fn status(&self) -> SurvivorStatus {
        self.status
    }

    pub fn needs(&self) -> &Needs {
        &self.needs
    }

    pub fn gauge(&self, need: NeedType) -> f32 {
        self.needs.get(need)
    }

    /// Direct set, clamped into [0, 100]
    pub fn set_gauge(&mut self, need: NeedType, value: f32) {
        self.needs.set(need, value);
        self.refresh_status();
    }

    pub fn satisfy(&mut self, need: NeedType, amount: f32) {
        self.needs.satisfy(need, amount);
        self.refresh_status();
    }

    pub fn decay(&mut self, minutes: f32, rates: &DecayRates) {
        self.needs.decay(minutes, rates);
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status = compute_status_from_stats(&self.needs);
    }
}

/// The eight survivors present at game start
pub fn default_roster() -> Vec<Survivor> {
    let seed: [(&str, &str, u32, [f32; 4]); 8] = [
        ("1", "Kim Minsu", 32, [85.0, 70.0, 90.0, 75.0]),
        ("2", "Lee Seoyeon", 28, [60.0, 55.0, 45.0, 30.0]),
        ("3", "Park Junho", 45, [20.0, 65.0, 50.0, 65.0]),
        ("4", "Choi Jieun", 24, [75.0, 25.0, 80.0, 55.0]),
        ("5", "Jung Hyunwoo", 38, [90.0, 80.0, 85.0, 90.0]),
        ("6", "Han Sohee", 29, [50.0, 15.0, 70.0, 50.0]),
        ("7", "Kang Minjun", 41, [70.0, 60.0, 65.0, 80.0]),
        ("8", "Yoon Sua", 26, [55.0, 50.0, 40.0, 25.0]),
    ];

    seed.into_iter()
        .map(|(id, name, age, [hunger, tiredness, thirst, boredom])| {
            Survivor::new(
                SurvivorId::new(id),
                name,
                age,
                Needs::new(hunger, tiredness, thirst, boredom),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_status_is_derived() {
        let roster = default_roster();
        assert_eq!(roster.len(), 8);

        let status_of = |id: &str| {
            roster
                .iter()
                .find(|s| s.id.as_str() == id)
                .map(|s| s.status())
                .unwrap()
        };
        assert_eq!(status_of("1"), SurvivorStatus::Satisfied);
        assert_eq!(status_of("3"), SurvivorStatus::Hungry);
        assert_eq!(status_of("4"), SurvivorStatus::Tired);
        assert_eq!(status_of("6"), SurvivorStatus::Tired);
        assert_eq!(status_of("8"), SurvivorStatus::Bored);
    }

    #[test]
    fn test_set_gauge_rederives_status() {
        let mut survivor = Survivor::new(SurvivorId::new("x"), "X", 20, Needs::default());
        assert_eq!(survivor.status(), SurvivorStatus::Satisfied);

        survivor.set_gauge(NeedType::Hunger, 10.0);
        assert_eq!(survivor.status(), SurvivorStatus::Hungry);

        survivor.set_gauge(NeedType::Hunger, 250.0);
        assert_eq!(survivor.gauge(NeedType::Hunger), 100.0);
        assert_eq!(survivor.status(), SurvivorStatus::Satisfied);
    }

    #[test]
    fn test_deserialize_ignores_stored_status() {
        let json = r#"{
            "id": "9", "name": "Newcomer", "age": 30,
            "status": "satisfied", "currentAction": "sleeping",
            "hunger": 10, "tiredness": 90, "thirst": 90, "boredom": 90
        }"#;
        let survivor: Survivor = serde_json::from_str(json).unwrap();
        assert_eq!(survivor.status(), SurvivorStatus::Hungry);
        assert_eq!(survivor.current_action, SurvivorAction::Sleeping);
    }

    #[test]
    fn test_missing_and_mistyped_fields_default() {
        let json = r#"{
            "id": "9", "name": 42, "age": "old",
            "currentAction": "juggling",
            "hunger": 10, "tiredness": "x", "thirst": null
        }"#;
        let survivor: Survivor = serde_json::from_str(json).unwrap();
        assert_eq!(survivor.name, "");
        assert_eq!(survivor.age, 0);
        assert_eq!(survivor.current_action, SurvivorAction::Waiting);
        assert_eq!(survivor.gauge(NeedType::Hunger), 10.0);
        assert_eq!(survivor.gauge(NeedType::Tiredness), 100.0);
        assert_eq!(survivor.gauge(NeedType::Thirst), 100.0);
        assert_eq!(survivor.gauge(NeedType::Boredom), 100.0);
        assert_eq!(survivor.status(), SurvivorStatus::Hungry);
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        assert!(serde_json::from_str::<Survivor>(r#"{"name": "Ghost", "hunger": 50}"#).is_err());
    }

    #[test]
    fn test_serializes_flat_camel_case() {
        let survivor = default_roster().remove(0);
        let value = serde_json::to_value(&survivor).unwrap();
        assert_eq!(value["currentAction"], "waiting");
        assert_eq!(value["hunger"], 85.0);
        assert_eq!(value["status"], "satisfied");
    }
}
