//! Core identifier types used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable survivor identifier (`"1"`, `"2"`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurvivorId(pub String);

impl SurvivorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurvivorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a pending (in-progress) activity, `activity-<n>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub String);

/// Identifier of a reserved (queued) activity, `reserved-<n>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservedId(pub String);

/// Region identifier (`region-1` .. `region-6`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ReservedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ACTIVITY_PREFIX: &str = "activity-";
const RESERVED_PREFIX: &str = "reserved-";

/// Monotonic id source for pending and reserved activities
///
/// Counters must be resynced after a load so freshly generated ids never
/// collide with ids restored from a save slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next_activity: u64,
    next_reserved: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next_activity: 1,
            next_reserved: 1,
        }
    }

    pub fn next_activity(&mut self) -> ActivityId {
        let id = ActivityId(format!("{ACTIVITY_PREFIX}{}", self.next_activity));
        self.next_activity += 1;
        id
    }

    pub fn next_reserved(&mut self) -> ReservedId {
        let id = ReservedId(format!("{RESERVED_PREFIX}{}", self.next_reserved));
        self.next_reserved += 1;
        id
    }

    /// Advance both counters past the largest numeric suffix found
    ///
    /// Ids without a parseable suffix are ignored. Counters never move backwards.
    pub fn resync<'a>(
        &mut self,
        activities: impl IntoIterator<Item = &'a ActivityId>,
        reserved: impl IntoIterator<Item = &'a ReservedId>,
    ) {
        if let Some(max) = activities
            .into_iter()
            .filter_map(|id| numeric_suffix(&id.0, ACTIVITY_PREFIX))
            .max()
        {
            self.next_activity = self.next_activity.max(max + 1);
        }
        if let Some(max) = reserved
            .into_iter()
            .filter_map(|id| numeric_suffix(&id.0, RESERVED_PREFIX))
            .max()
        {
            self.next_reserved = self.next_reserved.max(max + 1);
        }
    }
}

fn numeric_suffix(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}
