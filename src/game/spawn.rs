//! When, where and what to spawn.

use crate::game::target::{Position, TargetKind};
use rand::seq::SliceRandom;
use rand::Rng;

/// Spawn delay window at the start of a round.
pub const BASE_WINDOW_MS: u64 = 800;
/// The window shrinks by this much per elapsed second.
pub const RAMP_MS_PER_SEC: u64 = 15;
/// No two spawns are ever closer together than this.
pub const MIN_SPAWN_INTERVAL_MS: u64 = 300;
pub const HARMFUL_PROBABILITY: f64 = 0.65;
pub const MIN_LIFETIME_MS: u64 = 800;
pub const LIFETIME_SPAN_MS: u64 = 1_500;

pub const HARMFUL_TEXTS: &[&str] = &[
    "Dorm fee hike",
    "Closed-door meeting",
    "Too many required credits",
    "Unfair exam ban",
    "Ignoring student rights",
    "Broken old equipment",
    "Shuttle always late",
    "Mouldy dorm walls",
    "Overpriced cafeteria",
    "Admin runaround",
    "Course signup crash",
    "Fewer shuttle runs",
    "Mystery admin errors",
    "Crawling Wi-Fi",
];

pub const BENEFICIAL_TEXTS: &[&str] = &[
    "Good deeds",
    "Kind words",
    "Good intentions",
    "Helpful TA",
    "Free course choice",
    "Open budgets",
    "Student self-government",
    "Friendly campus",
    "Dehumidified dorms",
    "Shuttle on time",
    "Public spending",
    "Open dialogue",
    "Speedy repairs",
    "Gender-friendly restrooms",
    "Cheap hearty meals",
    "Working complaint channel",
];

/// Visible play area in pixels. The top strip is reserved for the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
    pub target_size: f64,
    pub top_margin: f64,
}

impl Default for PlayArea {
    fn default() -> Self {
        PlayArea {
            width: 1280.0,
            height: 720.0,
            target_size: 100.0,
            top_margin: 80.0,
        }
    }
}

impl PlayArea {
    pub fn new(width: f64, height: f64) -> Self {
        PlayArea {
            width,
            height,
            ..PlayArea::default()
        }
    }

    /// Top-left corner for a target that stays fully on screen and below the HUD.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let max_x = (self.width - self.target_size).max(0.0);
        let max_y = (self.height - self.target_size - self.top_margin).max(0.0);
        Position {
            x: rng.gen::<f64>() * max_x,
            y: rng.gen::<f64>() * max_y + self.top_margin,
        }
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= 0.0
            && p.x + self.target_size <= self.width.max(self.target_size)
            && p.y >= self.top_margin
            && p.y + self.target_size <= self.height.max(self.top_margin + self.target_size)
    }
}

/// Everything needed to place one target.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub kind: TargetKind,
    pub text: &'static str,
    pub position: Position,
    pub lifetime_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    area: PlayArea,
}

impl SpawnScheduler {
    pub fn new(area: PlayArea) -> Self {
        SpawnScheduler { area }
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    /// Delay until the next spawn, `elapsed_secs` into the round.
    pub fn next_delay_ms<R: Rng + ?Sized>(&self, rng: &mut R, elapsed_secs: u64) -> u64 {
        let window = BASE_WINDOW_MS.saturating_sub(elapsed_secs.saturating_mul(RAMP_MS_PER_SEC));
        let jitter = (rng.gen::<f64>() * window as f64) as u64;
        (jitter + MIN_SPAWN_INTERVAL_MS).max(MIN_SPAWN_INTERVAL_MS)
    }

    pub fn blueprint<R: Rng + ?Sized>(&self, rng: &mut R) -> Blueprint {
        let kind = if rng.gen_bool(HARMFUL_PROBABILITY) {
            TargetKind::Harmful
        } else {
            TargetKind::Beneficial
        };
        let pool = match kind {
            TargetKind::Harmful => HARMFUL_TEXTS,
            TargetKind::Beneficial => BENEFICIAL_TEXTS,
        };
        let text = pool.choose(rng).copied().unwrap_or_default();
        Blueprint {
            kind,
            text,
            position: self.area.random_position(rng),
            lifetime_ms: rng.gen_range(MIN_LIFETIME_MS..MIN_LIFETIME_MS + LIFETIME_SPAN_MS),
        }
    }
}
