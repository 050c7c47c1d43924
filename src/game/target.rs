//! A single target and its one-shot resolution.

use serde::{Deserialize, Serialize};

pub type TargetId = u64;

/// Score for resolving a harmful target.
pub const HARMFUL_REWARD: i64 = 10;
/// Score for resolving a beneficial target. There is no floor on the total.
pub const BENEFICIAL_PENALTY: i64 = -15;
/// How long a resolved or expired target stays on screen before removal.
pub const REMOVAL_DELAY_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Something the player should hit.
    Harmful,
    /// Something the player should leave alone.
    Beneficial,
}

impl TargetKind {
    pub const fn score_delta(self) -> i64 {
        match self {
            TargetKind::Harmful => HARMFUL_REWARD,
            TargetKind::Beneficial => BENEFICIAL_PENALTY,
        }
    }

    pub const fn cue(self) -> Cue {
        match self {
            TargetKind::Harmful => Cue::Hit,
            TargetKind::Beneficial => Cue::Wrong,
        }
    }
}

/// Sound cue the presentation layer plays on resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Hit,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Armed,
    Resolved,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub delta: i64,
    pub cue: Cue,
}

/// Input capability: whatever delivers a pointer, touch or key press calls
/// `resolve`. Only the first call on an armed target yields a resolution.
pub trait Resolve {
    fn resolve(&mut self) -> Option<Resolution>;
}

#[derive(Debug, Clone)]
pub struct Target {
    id: TargetId,
    kind: TargetKind,
    text: &'static str,
    position: Position,
    lifetime_ms: u64,
    state: TargetState,
}

impl Target {
    pub fn new(
        id: TargetId,
        kind: TargetKind,
        text: &'static str,
        position: Position,
        lifetime_ms: u64,
    ) -> Self {
        Target {
            id,
            kind,
            text,
            position,
            lifetime_ms,
            state: TargetState::Armed,
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn lifetime_ms(&self) -> u64 {
        self.lifetime_ms
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == TargetState::Armed
    }

    /// Lifetime elapsed without a hit. Returns `false` if already terminal.
    pub fn expire(&mut self) -> bool {
        if !self.is_armed() {
            return false;
        }
        self.state = TargetState::Expired;
        true
    }
}

impl Resolve for Target {
    fn resolve(&mut self) -> Option<Resolution> {
        if !self.is_armed() {
            return None;
        }
        self.state = TargetState::Resolved;
        Some(Resolution {
            delta: self.kind.score_delta(),
            cue: self.kind.cue(),
        })
    }
}
