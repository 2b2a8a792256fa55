//! Load guideline settings from JSON or TOML files

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::core::error::Result;
use crate::rules::guidelines::GuidelineSettings;

/// Load settings, choosing the format from the file extension
///
/// `.toml` files are parsed as TOML; anything else as JSON. Only unreadable
/// or syntactically broken files are errors; bad values fall back to defaults.
pub fn load_guideline_settings(path: &Path) -> Result<GuidelineSettings> {
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let settings = if is_toml {
        parse_settings_toml(&content)?
    } else {
        parse_settings_json(&content)?
    };
    tracing::info!(path = %path.display(), order = ?settings.order, "loaded guideline settings");
    Ok(settings)
}

pub fn parse_settings_json(content: &str) -> Result<GuidelineSettings> {
    let document: Value = serde_json::from_str(content)?;
    Ok(GuidelineSettings::from_value(&document))
}

pub fn parse_settings_toml(content: &str) -> Result<GuidelineSettings> {
    let document: toml::Value = toml::from_str(content)?;
    let document = serde_json::to_value(document)?;
    Ok(GuidelineSettings::from_value(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::rest::SleepingBag;
    use crate::rules::guidelines::GuidelineKey;

    #[test]
    fn test_parse_toml_settings() {
        let settings = parse_settings_toml(
            r#"
            guidelinesOrder = ["tirednessThreshold", "hungerThreshold"]

            [guidelinesValues]
            tirednessThreshold = 50
            sleepingBag = "sleepingBag3"
            "#,
        )
        .unwrap();

        assert_eq!(settings.tiredness_threshold, 50.0);
        assert_eq!(settings.sleeping_bag, SleepingBag::SleepingBag3);
        assert_eq!(settings.order[0], GuidelineKey::TirednessThreshold);
    }

    #[test]
    fn test_parse_json_settings() {
        let settings =
            parse_settings_json(r#"{"guidelinesValues": {"thirstThreshold": 12.5}}"#).unwrap();
        assert_eq!(settings.thirst_threshold, 12.5);
        assert_eq!(settings.order.len(), 4);
    }

    #[test]
    fn test_broken_json_is_error() {
        assert!(parse_settings_json("{ not json").is_err());
    }
}
