//! Game clock - year/hour/minute time points and the tick-driven clock
//!
//! Game time advances in two ways:
//! - `GameClock::tick`, once per real-time tick, scaled by speed (no-op while paused)
//! - `GameClock::advance_by_minutes`, an unconditional jump used when an
//!   activity's duration must elapse immediately

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

pub const MINUTES_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: u64 = 24;
pub const MINUTES_PER_YEAR: u64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// A normalized point in game time
///
/// `minute` carries into `hour`, `hour` carries into `year`. Equality,
/// ordering and hashing all go through the linearized minute count, and
/// deserialized points are normalized on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "RawTimePoint")]
pub struct GameTimePoint {
    pub year: u32,
    pub hour: u32,
    pub minute: u32,
}

#[derive(Deserialize)]
struct RawTimePoint {
    #[serde(default)]
    year: u32,
    #[serde(default)]
    hour: u32,
    #[serde(default)]
    minute: u32,
}

impl From<RawTimePoint> for GameTimePoint {
    fn from(raw: RawTimePoint) -> Self {
        GameTimePoint::new(raw.year, raw.hour, raw.minute)
    }
}

impl GameTimePoint {
    pub fn new(year: u32, hour: u32, minute: u32) -> Self {
        Self { year, hour, minute }.normalized()
    }

    /// Year 1, 08:00
    pub fn start() -> Self {
        Self {
            year: 1,
            hour: 8,
            minute: 0,
        }
    }

    /// Total game-minutes since year 0, 00:00
    pub fn to_minutes(&self) -> u64 {
        self.year as u64 * MINUTES_PER_YEAR
            + self.hour as u64 * MINUTES_PER_HOUR
            + self.minute as u64
    }

    pub fn from_minutes(total: u64) -> Self {
        let year = total / MINUTES_PER_YEAR;
        let rest = total % MINUTES_PER_YEAR;
        Self {
            year: year.min(u32::MAX as u64) as u32,
            hour: (rest / MINUTES_PER_HOUR) as u32,
            minute: (rest % MINUTES_PER_HOUR) as u32,
        }
    }

    pub fn add_minutes(&self, minutes: u64) -> Self {
        Self::from_minutes(self.to_minutes().saturating_add(minutes))
    }

    /// Carry overflowing fields and keep the year at 1 or later
    pub fn normalized(&self) -> Self {
        let mut point = Self::from_minutes(self.to_minutes());
        point.year = point.year.max(1);
        point
    }
}

impl Default for GameTimePoint {
    fn default() -> Self {
        Self::start()
    }
}

impl PartialEq for GameTimePoint {
    fn eq(&self, other: &Self) -> bool {
        self.to_minutes() == other.to_minutes()
    }
}

impl Eq for GameTimePoint {}

impl Hash for GameTimePoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_minutes().hash(state);
    }
}

impl Ord for GameTimePoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_minutes().cmp(&other.to_minutes())
    }
}

impl PartialOrd for GameTimePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GameTimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{} {:02}:{:02}", self.year, self.hour, self.minute)
    }
}

/// Clock speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameSpeed {
    #[default]
    X1,
    X2,
    X3,
}

impl GameSpeed {
    pub fn multiplier(&self) -> u32 {
        match self {
            GameSpeed::X1 => 1,
            GameSpeed::X2 => 2,
            GameSpeed::X3 => 3,
        }
    }
}

impl TryFrom<u8> for GameSpeed {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GameSpeed::X1),
            2 => Ok(GameSpeed::X2),
            3 => Ok(GameSpeed::X3),
            other => Err(format!("unsupported game speed {other}, expected 1, 2 or 3")),
        }
    }
}

impl From<GameSpeed> for u8 {
    fn from(speed: GameSpeed) -> Self {
        speed.multiplier() as u8
    }
}

/// The game clock: current time, pause state, and speed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    now: GameTimePoint,
    paused: bool,
    speed: GameSpeed,
    minutes_per_tick: u32,
}

impl GameClock {
    /// A paused 1x clock at year 1, 08:00
    pub fn new(minutes_per_tick: u32) -> Self {
        Self {
            now: GameTimePoint::start(),
            paused: true,
            speed: GameSpeed::X1,
            minutes_per_tick,
        }
    }

    /// Advance by `speed * minutes_per_tick` unless paused
    ///
    /// Returns the number of game-minutes that elapsed.
    pub fn tick(&mut self) -> u32 {
        if self.paused {
            return 0;
        }
        let elapsed = self.speed.multiplier() * self.minutes_per_tick;
        self.now = self.now.add_minutes(elapsed as u64);
        elapsed
    }

    /// Jump forward regardless of pause state
    pub fn advance_by_minutes(&mut self, minutes: u32) {
        self.now = self.now.add_minutes(minutes as u64);
    }

    /// Set speed and resume
    pub fn set_speed(&mut self, speed: GameSpeed) {
        self.speed = speed;
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Replace the full clock state (used when loading a save)
    pub fn restore(&mut self, now: GameTimePoint, paused: bool, speed: GameSpeed) {
        self.now = now.normalized();
        self.paused = paused;
        self.speed = speed;
    }

    pub fn now(&self) -> GameTimePoint {
        self.now
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> GameSpeed {
        self.speed
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(6)
    }
}
