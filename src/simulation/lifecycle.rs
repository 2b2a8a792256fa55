//! Activity lifecycle - reserved queues, pending activities, and completion
//!
//! ```text
//! RESERVED --(queue wait elapsed, survivor idle)--> executed --(effect ok)--> removed
//! RESERVED --(explicit removal)--> removed
//! PENDING  --(now >= end_at)--> completion effect --> removed (food search renews)
//! PENDING  --(explicit cancel)--> removed (rest cancels clear the phase latch)
//! ```

use ahash::AHashMap;

use crate::actions::catalog::{PendingActivityType, ReservedActivityType};
use crate::core::calendar::GameTimePoint;
use crate::core::types::{ActivityId, IdGenerator, ReservedId, SurvivorId};
use crate::entity::tasks::{ActivityStartRecord, PendingActivity, ReservedActivity, RestGear};
use crate::rules::guidelines::GuidelineKey;
use crate::simulation::effects::{
    apply_completion, run_activity_effect, CompletionOutcome, EffectContext, EffectOutcome,
    EffectPayload, EffectRejection,
};
use crate::simulation::tick::SimulationEvent;

/// All activity state of the camp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityBoard {
    pending: Vec<PendingActivity>,
    reserved: Vec<ReservedActivity>,
    start_records: AHashMap<SurvivorId, ActivityStartRecord>,
    /// Guideline currently being satisfied, per survivor (absent = none)
    phases: AHashMap<SurvivorId, GuidelineKey>,
    ids: IdGenerator,
    discovered_survivor_count: u32,
    research_progress: u32,
}

impl ActivityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // === READ ACCESS ===

    pub fn pending(&self) -> &[PendingActivity] {
        &self.pending
    }

    pub fn reserved(&self) -> &[ReservedActivity] {
        &self.reserved
    }

    /// A survivor's queue in execution order
    pub fn reserved_for<'a>(
        &'a self,
        survivor: &'a SurvivorId,
    ) -> impl Iterator<Item = &'a ReservedActivity> + 'a {
        self.reserved.iter().filter(move |r| &r.survivor_id == survivor)
    }

    pub fn pending_for<'a>(
        &'a self,
        survivor: &'a SurvivorId,
    ) -> impl Iterator<Item = &'a PendingActivity> + 'a {
        self.pending.iter().filter(move |p| &p.survivor_id == survivor)
    }

    /// Busy survivors have at least one pending activity
    pub fn is_busy(&self, survivor: &SurvivorId) -> bool {
        self.pending_for(survivor).next().is_some()
    }

    pub fn has_pending(&self, survivor: &SurvivorId, kind: PendingActivityType) -> bool {
        self.pending_for(survivor).any(|p| p.kind == kind)
    }

    pub fn satisfying_phase(&self, survivor: &SurvivorId) -> Option<GuidelineKey> {
        self.phases.get(survivor).copied()
    }

    pub fn start_record(&self, survivor: &SurvivorId) -> Option<&ActivityStartRecord> {
        self.start_records.get(survivor)
    }

    pub fn discovered_survivor_count(&self) -> u32 {
        self.discovered_survivor_count
    }

    pub fn research_progress(&self) -> u32 {
        self.research_progress
    }

    // === MUTATION ===

    /// Append to the tail of the survivor's queue
    pub fn add_reserved(&mut self, survivor: SurvivorId, kind: ReservedActivityType) -> ReservedId {
        let id = self.ids.next_reserved();
        tracing::debug!(%survivor, reserved = %id, ?kind, "activity reserved");
        self.reserved
            .push(ReservedActivity::new(id.clone(), survivor, kind));
        id
    }

    pub fn remove_reserved(&mut self, id: &ReservedId) -> bool {
        let Some(index) = self.reserved.iter().position(|r| &r.id == id) else {
            return false;
        };
        let removed = self.reserved.remove(index);
        self.drop_start_record_for(&removed.survivor_id, id);
        true
    }

    /// Move an item within one survivor's subsequence
    ///
    /// Other survivors' items keep their global slots. Out-of-range indices
    /// and queues with fewer than two items are left untouched.
    pub fn reorder_reserved(&mut self, survivor: &SurvivorId, from: usize, to: usize) -> bool {
        let slots: Vec<usize> = self
            .reserved
            .iter()
            .enumerate()
            .filter(|(_, r)| &r.survivor_id == survivor)
            .map(|(i, _)| i)
            .collect();
        if slots.len() <= 1 || from >= slots.len() || to >= slots.len() {
            return false;
        }

        let mut items: Vec<ReservedActivity> =
            slots.iter().map(|&i| self.reserved[i].clone()).collect();
        let moved = items.remove(from);
        items.insert(to, moved);
        for (slot, item) in slots.into_iter().zip(items) {
            self.reserved[slot] = item;
        }
        true
    }

    pub fn start_pending(
        &mut self,
        survivor: SurvivorId,
        kind: PendingActivityType,
        end_at: GameTimePoint,
        gear: Option<RestGear>,
    ) -> ActivityId {
        let id = self.ids.next_activity();
        tracing::debug!(%survivor, activity = %id, ?kind, %end_at, "activity started");
        self.pending
            .push(PendingActivity::new(id.clone(), survivor, kind, end_at).with_gear(gear));
        id
    }

    /// Remove a pending activity; cancelling a rest clears the phase latch
    pub fn cancel_pending(&mut self, id: &ActivityId) -> Option<PendingActivity> {
        let index = self.pending.iter().position(|p| &p.id == id)?;
        let removed = self.pending.remove(index);
        if removed.kind.is_rest() {
            self.phases.remove(&removed.survivor_id);
        }
        tracing::debug!(survivor = %removed.survivor_id, activity = %id, "pending activity cancelled");
        Some(removed)
    }

    pub fn set_phase(&mut self, survivor: SurvivorId, key: GuidelineKey) {
        self.phases.insert(survivor, key);
    }

    pub fn clear_phase(&mut self, survivor: &SurvivorId) -> Option<GuidelineKey> {
        self.phases.remove(survivor)
    }

    /// Apply completion effects for every pending activity due at `now`
    pub fn complete_due_activities(
        &mut self,
        ctx: &mut EffectContext<'_>,
        now: GameTimePoint,
        events: &mut Vec<SimulationEvent>,
    ) {
        if !self.pending.iter().any(|p| p.is_due(now)) {
            return;
        }

        let (due, remaining): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.is_due(now));
        self.pending = remaining;

        for activity in due {
            events.push(SimulationEvent::ActivityCompleted {
                survivor_id: activity.survivor_id.clone(),
                activity_id: activity.id.clone(),
                kind: activity.kind,
                at: now,
            });

            match apply_completion(ctx, &activity, now) {
                CompletionOutcome::Renew { end_at } => {
                    let renewed = self.start_pending(
                        activity.survivor_id.clone(),
                        activity.kind,
                        end_at,
                        activity.gear(),
                    );
                    events.push(SimulationEvent::ActivityRenewed {
                        survivor_id: activity.survivor_id,
                        activity_id: renewed,
                        end_at,
                    });
                }
                CompletionOutcome::Finished { clears_phase } => {
                    if clears_phase {
                        if let Some(key) = self.phases.remove(&activity.survivor_id) {
                            events.push(SimulationEvent::PhaseCleared {
                                survivor_id: activity.survivor_id,
                                key,
                            });
                        }
                    }
                }
            }
        }
    }

    /// Run the effect of a reserved activity now, removing it on success
    pub fn execute_reserved_activity(
        &mut self,
        ctx: &mut EffectContext<'_>,
        id: &ReservedId,
        events: &mut Vec<SimulationEvent>,
    ) -> bool {
        let Some(activity) = self.reserved.iter().find(|r| &r.id == id).cloned() else {
            return false;
        };
        let now = ctx.clock.now();

        match self.perform(ctx, &activity.survivor_id, activity.kind, now) {
            Ok(_) => {
                self.reserved.retain(|r| &r.id != id);
                self.drop_start_record_for(&activity.survivor_id, id);
                events.push(SimulationEvent::ReservedExecuted {
                    survivor_id: activity.survivor_id,
                    reserved_id: activity.id,
                    kind: activity.kind,
                    at: now,
                });
                true
            }
            Err(reason) => {
                tracing::debug!(reserved = %id, %reason, "reserved activity deferred");
                events.push(SimulationEvent::ReservedDeferred {
                    survivor_id: activity.survivor_id,
                    reserved_id: activity.id,
                    kind: activity.kind,
                    reason,
                });
                false
            }
        }
    }

    /// Run an activity's effect without a queue entry and record its outcome
    pub fn perform(
        &mut self,
        ctx: &mut EffectContext<'_>,
        survivor: &SurvivorId,
        kind: ReservedActivityType,
        now: GameTimePoint,
    ) -> Result<EffectOutcome, EffectRejection> {
        let payload = EffectPayload {
            kind,
            survivor_id: survivor,
            now,
        };
        let outcome = run_activity_effect(ctx, payload)?;

        match &outcome {
            EffectOutcome::StartPending { kind, end_at, gear } => {
                self.start_pending(survivor.clone(), *kind, *end_at, *gear);
            }
            EffectOutcome::SurvivorDiscovered => {
                self.discovered_survivor_count += 1;
                tracing::info!(
                    total = self.discovered_survivor_count,
                    "survivor discovered"
                );
            }
            EffectOutcome::ResearchProgressed(amount) => {
                self.research_progress += amount;
            }
            EffectOutcome::Applied | EffectOutcome::WaterFound(_) => {}
        }
        Ok(outcome)
    }

    /// Auto-execute each idle survivor's queue head once its queue wait elapses
    pub fn process_reserved_activities(
        &mut self,
        ctx: &mut EffectContext<'_>,
        events: &mut Vec<SimulationEvent>,
    ) {
        let now = ctx.clock.now();

        let mut queued: Vec<SurvivorId> = Vec::new();
        for activity in &self.reserved {
            if !queued.contains(&activity.survivor_id) {
                queued.push(activity.survivor_id.clone());
            }
        }

        for survivor in queued {
            if self.is_busy(&survivor) {
                continue;
            }
            let Some(head) = self.reserved_for(&survivor).next().cloned() else {
                continue;
            };
            let wait = ctx.config.queue_wait_minutes(head.kind);

            match self.start_records.get(&survivor) {
                Some(record) if record.activity_id == head.id => {
                    if !record.wait_elapsed(now, wait) {
                        continue;
                    }
                }
                _ => {
                    tracing::trace!(%survivor, reserved = %head.id, wait, "queue wait started");
                    self.start_records.insert(
                        survivor,
                        ActivityStartRecord {
                            activity_id: head.id,
                            started_at: now,
                        },
                    );
                    continue;
                }
            }

            self.start_records.remove(&survivor);
            self.execute_reserved_activity(ctx, &head.id, events);
        }

        let reserved = &self.reserved;
        self.start_records
            .retain(|survivor, _| reserved.iter().any(|r| &r.survivor_id == survivor));
    }

    // === PERSISTENCE ===

    /// Replace all activity state with restored data
    ///
    /// Start records and phase latches are transient and start empty; id
    /// counters skip past every restored id.
    pub fn restore(
        &mut self,
        pending: Vec<PendingActivity>,
        reserved: Vec<ReservedActivity>,
        discovered_survivor_count: u32,
        research_progress: u32,
    ) {
        self.ids.resync(
            pending.iter().map(|p| &p.id),
            reserved.iter().map(|r| &r.id),
        );
        self.pending = pending;
        self.reserved = reserved;
        self.start_records.clear();
        self.phases.clear();
        self.discovered_survivor_count = discovered_survivor_count;
        self.research_progress = research_progress;
    }

    fn drop_start_record_for(&mut self, survivor: &SurvivorId, id: &ReservedId) {
        if self
            .start_records
            .get(survivor)
            .is_some_and(|record| &record.activity_id == id)
        {
            self.start_records.remove(survivor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(id: &str) -> SurvivorId {
        SurvivorId::new(id)
    }

    #[test]
    fn test_reserved_ids_are_unique() {
        let mut board = ActivityBoard::new();
        let a = board.add_reserved(sid("1"), ReservedActivityType::DrinkWater);
        let b = board.add_reserved(sid("1"), ReservedActivityType::DrinkWater);
        assert_ne!(a, b);
        assert_eq!(board.reserved_for(&sid("1")).count(), 2);
    }

    #[test]
    fn test_reorder_within_survivor_subsequence() {
        let mut board = ActivityBoard::new();
        let a = board.add_reserved(sid("1"), ReservedActivityType::EatWildStrawberry);
        let x = board.add_reserved(sid("2"), ReservedActivityType::DoResearch);
        let b = board.add_reserved(sid("1"), ReservedActivityType::DrinkWater);
        let c = board.add_reserved(sid("1"), ReservedActivityType::SearchFood);

        assert!(board.reorder_reserved(&sid("1"), 2, 0));

        let global: Vec<_> = board.reserved().iter().map(|r| r.id.clone()).collect();
        assert_eq!(global, vec![c, x, a, b]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut board = ActivityBoard::new();
        board.add_reserved(sid("1"), ReservedActivityType::EatWildStrawberry);
        board.add_reserved(sid("1"), ReservedActivityType::DrinkWater);
        let before = board.clone();

        assert!(!board.reorder_reserved(&sid("1"), 0, 5));
        assert!(!board.reorder_reserved(&sid("2"), 0, 1));
        assert_eq!(board, before);
    }

    #[test]
    fn test_reorder_single_item_is_noop() {
        let mut board = ActivityBoard::new();
        board.add_reserved(sid("1"), ReservedActivityType::EatWildStrawberry);
        assert!(!board.reorder_reserved(&sid("1"), 0, 0));
    }

    #[test]
    fn test_cancel_rest_clears_phase() {
        let mut board = ActivityBoard::new();
        let rest = board.start_pending(
            sid("1"),
            PendingActivityType::RestAtPlace,
            GameTimePoint::new(1, 12, 0),
            None,
        );
        board.set_phase(sid("1"), GuidelineKey::BoredomThreshold);
        assert!(board.is_busy(&sid("1")));

        let removed = board.cancel_pending(&rest).unwrap();
        assert_eq!(removed.kind, PendingActivityType::RestAtPlace);
        assert_eq!(board.satisfying_phase(&sid("1")), None);
        assert!(!board.is_busy(&sid("1")));
        assert!(board.cancel_pending(&rest).is_none());
    }

    #[test]
    fn test_cancel_food_search_keeps_phase() {
        let mut board = ActivityBoard::new();
        let search = board.start_pending(
            sid("1"),
            PendingActivityType::SearchFood,
            GameTimePoint::new(1, 9, 0),
            None,
        );
        board.set_phase(sid("1"), GuidelineKey::HungerThreshold);
        board.cancel_pending(&search);
        assert_eq!(board.satisfying_phase(&sid("1")), Some(GuidelineKey::HungerThreshold));
    }

    #[test]
    fn test_restore_resyncs_ids_and_resets_transient_state() {
        let mut board = ActivityBoard::new();
        board.set_phase(sid("1"), GuidelineKey::ThirstThreshold);
        board.restore(
            vec![PendingActivity::new(
                ActivityId("activity-7".into()),
                sid("1"),
                PendingActivityType::SearchFood,
                GameTimePoint::new(1, 9, 0),
            )],
            vec![ReservedActivity::new(
                ReservedId("reserved-12".into()),
                sid("2"),
                ReservedActivityType::DrinkWater,
            )],
            3,
            5,
        );

        assert_eq!(board.satisfying_phase(&sid("1")), None);
        assert_eq!(board.discovered_survivor_count(), 3);
        assert_eq!(board.research_progress(), 5);
        assert_eq!(
            board.add_reserved(sid("1"), ReservedActivityType::DoResearch).0,
            "reserved-13"
        );
        let next = board.start_pending(
            sid("2"),
            PendingActivityType::SearchFood,
            GameTimePoint::new(1, 9, 0),
            None,
        );
        assert_eq!(next.0, "activity-8");
    }
}
