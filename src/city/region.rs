//! Regions, camps, and facilities

use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::city::stockpile::ResourceKey;
use crate::core::types::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facility {
    Workshop,
    Farm,
    Storage,
    Well,
    Kitchen,
}

/// A region and the abundance of each natural resource in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub resources: Vec<(ResourceKey, u32)>,
}

impl Region {
    /// Most abundant resource; the first listed wins ties
    pub fn dominant_resource(&self) -> Option<ResourceKey> {
        let mut best: Option<(ResourceKey, u32)> = None;
        for &(key, amount) in &self.resources {
            match best {
                Some((_, top)) if amount <= top => {}
                _ => best = Some((key, amount)),
            }
        }
        best.map(|(key, _)| key)
    }
}

/// All explorable regions
pub fn region_catalog() -> Vec<Region> {
    use ResourceKey::*;

    let table: [(&str, &[(ResourceKey, u32)]); 6] = [
        ("region-1", &[(Wood, 100), (Stone, 50), (IronOre, 20), (Water, 30)]),
        ("region-2", &[(Wood, 60), (Stone, 95), (IronOre, 40), (Cotton, 25)]),
        ("region-3", &[(Stone, 70), (IronOre, 100), (Leather, 35)]),
        ("region-4", &[(Wood, 85), (Cotton, 80), (Leather, 45), (WildStrawberry, 20)]),
        ("region-5", &[(Wood, 90), (Stone, 30), (Water, 50)]),
        ("region-6", &[(Potato, 95), (Corn, 70), (Wheat, 60), (Water, 40)]),
    ];

    table
        .into_iter()
        .map(|(id, resources)| Region {
            id: RegionId::new(id),
            resources: resources.to_vec(),
        })
        .collect()
}

/// Display name parts for a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDisplayInfo {
    pub region_id: RegionId,
    /// Regions are named after their most abundant resource
    pub resource: ResourceKey,
    /// 1-based suffix when several regions share a dominant resource
    pub suffix: Option<usize>,
}

pub fn region_display_infos(regions: &[Region]) -> Vec<RegionDisplayInfo> {
    let dominant: Vec<(RegionId, ResourceKey)> = regions
        .iter()
        .filter_map(|r| r.dominant_resource().map(|key| (r.id.clone(), key)))
        .collect();

    let mut seen: AHashMap<ResourceKey, usize> = AHashMap::new();
    let totals = dominant.iter().fold(AHashMap::new(), |mut acc, (_, key)| {
        *acc.entry(*key).or_insert(0usize) += 1;
        acc
    });

    dominant
        .into_iter()
        .map(|(region_id, resource)| {
            let index = seen.entry(resource).or_insert(0);
            *index += 1;
            let shared = totals.get(&resource).copied().unwrap_or(0) > 1;
            RegionDisplayInfo {
                region_id,
                resource,
                suffix: shared.then_some(*index),
            }
        })
        .collect()
}

/// Which regions have a camp, and what is installed there
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCamps {
    #[serde(default)]
    regions_with_camp: BTreeSet<RegionId>,
    #[serde(default)]
    facilities_by_region: AHashMap<RegionId, Vec<Facility>>,
}

impl RegionCamps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_camp(&self, region: &RegionId) -> bool {
        self.regions_with_camp.contains(region)
    }

    pub fn build_camp(&mut self, region: RegionId) {
        tracing::debug!(%region, "camp built");
        self.regions_with_camp.insert(region);
    }

    /// Install a facility; returns false if it is already there
    pub fn install_facility(&mut self, region: RegionId, facility: Facility) -> bool {
        let installed = self.facilities_by_region.entry(region).or_default();
        if installed.contains(&facility) {
            return false;
        }
        installed.push(facility);
        true
    }

    pub fn facilities(&self, region: &RegionId) -> &[Facility] {
        self.facilities_by_region
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
