//! Camp world - the injectable state container for one game
//!
//! Everything the simulation touches lives here; tests build isolated
//! instances instead of sharing global state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::actions::catalog::{PendingActivityType, ReservedActivityType};
use crate::city::region::RegionCamps;
use crate::city::rest::RestPlaceStock;
use crate::city::stockpile::CampResources;
use crate::city::tech::TechTree;
use crate::core::calendar::{GameClock, GameSpeed, GameTimePoint};
use crate::core::config::BalanceConfig;
use crate::core::types::{ActivityId, ReservedId, SurvivorId};
use crate::entity::needs::NeedType;
use crate::entity::survivor::{default_roster, Survivor, SurvivorAction};
use crate::rules::guidelines::GuidelineSettings;
use crate::simulation::consumption;
use crate::simulation::effects::{EffectContext, EffectOutcome, EffectRejection};
use crate::simulation::guidelines::insert_guideline_activities;
use crate::simulation::lifecycle::ActivityBoard;
use crate::simulation::tick::SimulationEvent;

/// The game world containing the whole camp state
#[derive(Debug, Clone)]
pub struct World {
    pub config: BalanceConfig,
    pub settings: GuidelineSettings,
    pub clock: GameClock,
    pub survivors: Vec<Survivor>,
    pub resources: CampResources,
    pub rest_places: RestPlaceStock,
    pub board: ActivityBoard,
    pub regions: RegionCamps,
    pub tech: TechTree,
    rng: ChaCha8Rng,
}

impl World {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(BalanceConfig::default(), GuidelineSettings::default(), seed)
    }

    /// Fresh game: default roster, initial ledger, paused clock at year 1 08:00
    pub fn with_config(config: BalanceConfig, settings: GuidelineSettings, seed: u64) -> Self {
        Self {
            clock: GameClock::new(config.minutes_per_tick),
            survivors: default_roster(),
            resources: CampResources::initial(&config),
            rest_places: RestPlaceStock::initial(&config),
            board: ActivityBoard::new(),
            regions: RegionCamps::new(),
            tech: TechTree::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            settings,
        }
    }

    /// Replace the roster (mainly for focused tests)
    pub fn with_survivors(mut self, survivors: Vec<Survivor>) -> Self {
        self.survivors = survivors;
        self
    }

    /// Borrow the activity board alongside everything effects may mutate
    pub fn split(&mut self) -> (&mut ActivityBoard, EffectContext<'_>) {
        let World {
            config,
            settings,
            clock,
            survivors,
            resources,
            rest_places,
            board,
            rng,
            ..
        } = self;

        let ctx = EffectContext {
            survivors: survivors.as_mut_slice(),
            resources,
            rest_places,
            clock,
            settings,
            config,
            rng,
        };
        (board, ctx)
    }

    // === READ ACCESS ===

    pub fn now(&self) -> GameTimePoint {
        self.clock.now()
    }

    pub fn survivor(&self, id: &SurvivorId) -> Option<&Survivor> {
        self.survivors.iter().find(|s| &s.id == id)
    }

    pub fn discovered_survivor_count(&self) -> u32 {
        self.board.discovered_survivor_count()
    }

    pub fn research_progress(&self) -> u32 {
        self.board.research_progress()
    }

    // === CLOCK CONTROLS ===

    pub fn set_speed(&mut self, speed: GameSpeed) {
        self.clock.set_speed(speed);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    pub fn advance_by_minutes(&mut self, minutes: u32) {
        self.clock.advance_by_minutes(minutes);
    }

    pub fn set_settings(&mut self, settings: GuidelineSettings) {
        self.settings = settings;
    }

    // === NEEDS ===

    pub fn eat_wild_strawberry(&mut self, id: &SurvivorId) -> bool {
        let gain = self.config.eat_hunger_gain;
        consumption::eat_wild_strawberry(&mut self.survivors, &mut self.resources, id, gain).is_ok()
    }

    pub fn drink_water(&mut self, id: &SurvivorId) -> bool {
        let gain = self.config.drink_thirst_gain;
        consumption::drink_water(&mut self.survivors, &mut self.resources, id, gain).is_ok()
    }

    pub fn update_survivor_stat(&mut self, id: &SurvivorId, need: NeedType, value: f32) -> bool {
        consumption::update_survivor_stat(&mut self.survivors, id, need, value)
    }

    // === PLAYER ACTIONS ===

    /// Start a self-renewing food search; refused while one is already running
    pub fn start_search_food(&mut self, id: &SurvivorId) -> bool {
        if self.board.has_pending(id, PendingActivityType::SearchFood) {
            return false;
        }
        self.perform(id, ReservedActivityType::SearchFood).is_ok()
    }

    /// Search for water; returns the amount found
    pub fn search_water(&mut self, id: &SurvivorId) -> Option<u32> {
        match self.perform(id, ReservedActivityType::SearchWater) {
            Ok(EffectOutcome::WaterFound(found)) => Some(found),
            _ => None,
        }
    }

    pub fn search_survivor(&mut self, id: &SurvivorId) -> bool {
        self.perform(id, ReservedActivityType::SearchSurvivor).is_ok()
    }

    pub fn do_research(&mut self, id: &SurvivorId) -> bool {
        self.perform(id, ReservedActivityType::DoResearch).is_ok()
    }

    pub fn rest_with_sleeping_bag(&mut self, id: &SurvivorId) -> bool {
        self.perform(id, ReservedActivityType::RestWithSleepingBag).is_ok()
    }

    pub fn rest_at_place(&mut self, id: &SurvivorId) -> bool {
        self.perform(id, ReservedActivityType::RestAtPlace).is_ok()
    }

    fn perform(
        &mut self,
        id: &SurvivorId,
        kind: ReservedActivityType,
    ) -> Result<EffectOutcome, EffectRejection> {
        if self.survivor(id).is_none() {
            return Err(EffectRejection::UnknownSurvivor(id.clone()));
        }
        let now = self.clock.now();
        let (board, mut ctx) = self.split();
        board.perform(&mut ctx, id, kind, now)
    }

    // === ACTIVITY QUEUE ===

    /// Queue an activity at the tail of a survivor's queue
    pub fn add_reserved_activity(
        &mut self,
        id: &SurvivorId,
        kind: ReservedActivityType,
    ) -> Option<ReservedId> {
        self.survivor(id)?;
        Some(self.board.add_reserved(id.clone(), kind))
    }

    pub fn remove_reserved_activity(&mut self, id: &ReservedId) -> bool {
        self.board.remove_reserved(id)
    }

    pub fn reorder_reserved_activities(&mut self, survivor: &SurvivorId, from: usize, to: usize) -> bool {
        self.board.reorder_reserved(survivor, from, to)
    }

    pub fn cancel_pending_activity(&mut self, id: &ActivityId) -> bool {
        let Some(removed) = self.board.cancel_pending(id) else {
            return false;
        };
        if removed.kind.survivor_action().is_some() {
            if let Some(survivor) = self.survivors.iter_mut().find(|s| s.id == removed.survivor_id) {
                survivor.current_action = SurvivorAction::Waiting;
            }
        }
        true
    }

    pub fn execute_reserved_activity(&mut self, id: &ReservedId) -> bool {
        let mut events = Vec::new();
        let (board, mut ctx) = self.split();
        board.execute_reserved_activity(&mut ctx, id, &mut events)
    }

    pub fn complete_due_activities(&mut self, now: GameTimePoint) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        let (board, mut ctx) = self.split();
        board.complete_due_activities(&mut ctx, now, &mut events);
        events
    }

    pub fn insert_guideline_activities(&mut self) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        let (board, ctx) = self.split();
        insert_guideline_activities(board, &ctx, &mut events);
        events
    }

    /// Guideline injection followed by queue auto-execution
    pub fn process_reserved_activities(&mut self) -> Vec<SimulationEvent> {
        let mut events = self.insert_guideline_activities();
        let (board, mut ctx) = self.split();
        board.process_reserved_activities(&mut ctx, &mut events);
        events
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::stockpile::ResourceKey;

    fn sid(id: &str) -> SurvivorId {
        SurvivorId::new(id)
    }

    #[test]
    fn test_new_world_defaults() {
        let world = World::new();
        assert_eq!(world.survivors.len(), 8);
        assert!(world.clock.is_paused());
        assert_eq!(world.now(), GameTimePoint::new(1, 8, 0));
        assert_eq!(world.resources.get(ResourceKey::WildStrawberry), 10);
    }

    #[test]
    fn test_search_food_refused_while_running() {
        let mut world = World::new();
        assert!(world.start_search_food(&sid("1")));
        assert!(!world.start_search_food(&sid("1")));
        assert!(world.start_search_food(&sid("2")));
        assert_eq!(world.board.pending().len(), 2);
    }

    #[test]
    fn test_unknown_survivor_rejected_everywhere() {
        let mut world = World::new();
        let ghost = sid("ghost");
        assert!(!world.eat_wild_strawberry(&ghost));
        assert!(!world.start_search_food(&ghost));
        assert!(world.search_water(&ghost).is_none());
        assert!(world
            .add_reserved_activity(&ghost, ReservedActivityType::DrinkWater)
            .is_none());
        assert_eq!(world.resources.get(ResourceKey::WildStrawberry), 10);
    }

    #[test]
    fn test_research_and_discovery_counters() {
        let mut world = World::new();
        assert!(world.do_research(&sid("7")));
        assert!(world.do_research(&sid("7")));
        assert!(world.search_survivor(&sid("1")));
        assert_eq!(world.research_progress(), 2);
        assert_eq!(world.discovered_survivor_count(), 1);
        assert_eq!(world.now(), GameTimePoint::new(1, 14, 0));
    }

    #[test]
    fn test_cancel_rest_resets_action() {
        let mut world = World::new();
        assert!(world.rest_with_sleeping_bag(&sid("6")));
        assert_eq!(
            world.survivor(&sid("6")).map(|s| s.current_action),
            Some(SurvivorAction::Sleeping)
        );

        let id = world.board.pending()[0].id.clone();
        assert!(world.cancel_pending_activity(&id));
        assert_eq!(
            world.survivor(&sid("6")).map(|s| s.current_action),
            Some(SurvivorAction::Waiting)
        );
        assert!(!world.cancel_pending_activity(&id));
    }

    #[test]
    fn test_execute_failure_keeps_item_queued() {
        let mut world = World::new();
        world.resources.set_quantity(ResourceKey::Water, 0);
        let id = world
            .add_reserved_activity(&sid("2"), ReservedActivityType::DrinkWater)
            .unwrap();

        assert!(!world.execute_reserved_activity(&id));
        assert_eq!(world.board.reserved().len(), 1);

        world.resources.set_quantity(ResourceKey::Water, 1);
        assert!(world.execute_reserved_activity(&id));
        assert!(world.board.reserved().is_empty());
        assert!(!world.execute_reserved_activity(&id));
    }
}
