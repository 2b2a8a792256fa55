//! Research tree: prerequisites, progress, and unlocks

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Progress at which a technology completes
pub const RESEARCH_COMPLETE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TechStatus {
    Locked,
    Available,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechNode {
    pub id: &'static str,
    pub tier: u8,
    pub title: &'static str,
    pub effect: &'static str,
    pub cost: u32,
    pub prerequisites: &'static [&'static str],
}

pub fn tech_catalog() -> &'static [TechNode] {
    const NODES: &[TechNode] = &[
        TechNode {
            id: "auto-collect-1",
            tier: 1,
            title: "Basic Automation",
            effect: "Workers collect resources automatically",
            cost: 100,
            prerequisites: &[],
        },
        TechNode {
            id: "fast-boots",
            tier: 2,
            title: "Reinforced Leather Boots",
            effect: "Movement speed +50%",
            cost: 300,
            prerequisites: &["auto-collect-1"],
        },
    ];
    NODES
}

fn find_node(id: &str) -> Option<&'static TechNode> {
    tech_catalog().iter().find(|node| node.id == id)
}

/// Completed technologies and per-technology research progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechTree {
    #[serde(default)]
    completed_tech_ids: BTreeSet<String>,
    #[serde(default)]
    research_progress_by_tech: BTreeMap<String, u32>,
}

impl TechTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed, available when every prerequisite is done, else locked
    pub fn status(&self, id: &str) -> TechStatus {
        if self.completed_tech_ids.contains(id) {
            return TechStatus::Completed;
        }
        match find_node(id) {
            Some(node)
                if node
                    .prerequisites
                    .iter()
                    .all(|p| self.completed_tech_ids.contains(*p)) =>
            {
                TechStatus::Available
            }
            _ => TechStatus::Locked,
        }
    }

    pub fn progress(&self, id: &str) -> u32 {
        self.research_progress_by_tech.get(id).copied().unwrap_or(0)
    }

    /// Complete an available technology outright
    pub fn unlock(&mut self, id: &str) -> bool {
        if self.status(id) != TechStatus::Available {
            return false;
        }
        self.complete(id);
        true
    }

    /// Accrue progress on an available technology; completes at 100
    pub fn add_research_progress(&mut self, id: &str, amount: u32) -> bool {
        if self.status(id) != TechStatus::Available {
            return false;
        }
        let next = self.progress(id).saturating_add(amount).min(RESEARCH_COMPLETE);
        if next >= RESEARCH_COMPLETE {
            self.complete(id);
        } else {
            self.research_progress_by_tech.insert(id.to_owned(), next);
        }
        true
    }

    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.completed_tech_ids.iter().map(String::as_str)
    }

    fn complete(&mut self, id: &str) {
        tracing::info!(tech = id, "technology completed");
        self.completed_tech_ids.insert(id.to_owned());
        self.research_progress_by_tech
            .insert(id.to_owned(), RESEARCH_COMPLETE);
    }
}
