//! Camp layer - resources, rest equipment, regions, and research

pub mod region;
pub mod rest;
pub mod stockpile;
pub mod tech;

pub use region::{region_catalog, Facility, Region, RegionCamps};
pub use rest::{RestPlace, RestPlaceStock, SleepingBag};
pub use stockpile::{CampResources, ResourceKey};
pub use tech::{TechStatus, TechTree};
