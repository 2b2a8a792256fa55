//! Guideline settings and their loaders

pub mod guidelines;
mod loader;

pub use guidelines::{GuidelineKey, GuidelineSettings};
pub use loader::{load_guideline_settings, parse_settings_json, parse_settings_toml};
