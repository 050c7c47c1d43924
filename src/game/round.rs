//! Round state and the controller that drives a timed round.
//!
//! The controller owns the round, the live targets and a [`Timeline`] holding
//! the tick, the next spawn and per-target expiry/removal. The caller feeds it
//! the current time through [`RoundController::advance`] and routes player
//! input to [`RoundController::resolve`].

use std::collections::BTreeMap;

use rand::Rng;

use crate::game::label::player_label;
use crate::game::spawn::{PlayArea, SpawnScheduler};
use crate::game::target::{
    Cue, Resolve, Target, TargetId, TargetKind, REMOVAL_DELAY_MS,
};
use crate::game::timeline::Timeline;

pub const ROUND_DURATION_SECS: u32 = 30;
pub const TICK_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Ended,
}

#[derive(Debug, Clone)]
pub struct Round {
    score: i64,
    time_remaining: u32,
    player_label: String,
    status: RoundStatus,
}

impl Round {
    pub fn new(player_label: String, duration_secs: u32) -> Self {
        Round {
            score: 0,
            time_remaining: duration_secs,
            player_label,
            status: RoundStatus::Active,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn player_label(&self) -> &str {
        &self.player_label
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    /// Ignored once the round has ended.
    fn apply(&mut self, delta: i64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.score += delta;
        true
    }

    /// One second passes. Reaching zero ends the round for good.
    fn tick(&mut self) -> RoundStatus {
        if self.is_active() {
            self.time_remaining = self.time_remaining.saturating_sub(1);
            if self.time_remaining == 0 {
                self.status = RoundStatus::Ended;
            }
        }
        self.status
    }
}

/// What happened, in the order it happened, for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    Started {
        player_label: String,
        time_remaining: u32,
    },
    Spawned {
        id: TargetId,
        kind: TargetKind,
    },
    Resolved {
        id: TargetId,
        cue: Cue,
        score: i64,
    },
    Expired {
        id: TargetId,
    },
    Removed {
        id: TargetId,
    },
    Tick {
        time_remaining: u32,
    },
    Ended {
        player_label: String,
        final_score: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Tick,
    Spawn,
    Expire(TargetId),
    Remove(TargetId),
}

pub struct RoundController<R> {
    rng: R,
    scheduler: SpawnScheduler,
    duration_secs: u32,
    timeline: Timeline<Task>,
    round: Option<Round>,
    targets: BTreeMap<TargetId, Target>,
    next_target_id: TargetId,
    now_ms: u64,
}

impl<R: Rng> RoundController<R> {
    pub fn new(rng: R, area: PlayArea) -> Self {
        RoundController {
            rng,
            scheduler: SpawnScheduler::new(area),
            duration_secs: ROUND_DURATION_SECS,
            timeline: Timeline::new(),
            round: None,
            targets: BTreeMap::new(),
            next_target_id: 0,
            now_ms: 0,
        }
    }

    /// Rounds started after this call last `secs` seconds (at least one).
    pub fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = secs.max(1);
        self
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.round.as_ref().is_some_and(Round::is_active)
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(&id)
    }

    /// Targets still on screen, including resolved/expired ones awaiting removal.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timeline.len()
    }

    /// Starts a fresh round at `now_ms`, discarding whatever came before.
    /// The first target appears immediately.
    pub fn start(&mut self, now_ms: u64) -> Vec<RoundEvent> {
        self.timeline.clear();
        self.targets.clear();
        self.now_ms = now_ms;

        let round = Round::new(player_label(&mut self.rng), self.duration_secs);
        let mut events = vec![RoundEvent::Started {
            player_label: round.player_label().to_string(),
            time_remaining: round.time_remaining(),
        }];
        self.round = Some(round);

        self.timeline.schedule_after(now_ms, TICK_MS, Task::Tick);
        self.spawn(now_ms, &mut events);
        events
    }

    /// Runs every task due at or before `now_ms`. Time never goes backwards.
    pub fn advance(&mut self, now_ms: u64) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        let now_ms = now_ms.max(self.now_ms);
        while let Some((handle, task)) = self.timeline.pop_due(now_ms) {
            self.now_ms = handle.due_ms();
            match task {
                Task::Tick => self.on_tick(&mut events),
                Task::Spawn => self.spawn(self.now_ms, &mut events),
                Task::Expire(id) => self.on_expire(id, &mut events),
                Task::Remove(id) => {
                    if self.targets.remove(&id).is_some() {
                        events.push(RoundEvent::Removed { id });
                    }
                }
            }
        }
        self.now_ms = now_ms;
        events
    }

    /// Player hit target `id` at the time of the last `advance`. Repeated
    /// hits, hits on expired targets and hits after the round ended do nothing.
    pub fn resolve(&mut self, id: TargetId) -> Option<RoundEvent> {
        let round = self.round.as_mut().filter(|r| r.is_active())?;
        let resolution = self.targets.get_mut(&id)?.resolve()?;
        round.apply(resolution.delta);
        let score = round.score();
        self.timeline
            .schedule_after(self.now_ms, REMOVAL_DELAY_MS, Task::Remove(id));
        Some(RoundEvent::Resolved {
            id,
            cue: resolution.cue,
            score,
        })
    }

    fn on_tick(&mut self, events: &mut Vec<RoundEvent>) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let status = round.tick();
        events.push(RoundEvent::Tick {
            time_remaining: round.time_remaining(),
        });
        match status {
            RoundStatus::Active => {
                self.timeline.schedule_after(self.now_ms, TICK_MS, Task::Tick);
            }
            RoundStatus::Ended => self.finish(events),
        }
    }

    /// Cancels all pending work and drops live targets unscored, in one step.
    fn finish(&mut self, events: &mut Vec<RoundEvent>) {
        self.timeline.clear();
        self.targets.clear();

        if let Some(round) = self.round.as_ref() {
            tracing::debug!(
                player_label = round.player_label(),
                final_score = round.score(),
                "round ended"
            );
            events.push(RoundEvent::Ended {
                player_label: round.player_label().to_string(),
                final_score: round.score(),
            });
        }
    }

    fn spawn(&mut self, now_ms: u64, events: &mut Vec<RoundEvent>) {
        let Some(round) = self.round.as_ref().filter(|r| r.is_active()) else {
            return;
        };
        let elapsed_secs = u64::from(self.duration_secs.saturating_sub(round.time_remaining()));

        let blueprint = self.scheduler.blueprint(&mut self.rng);
        let id = self.next_target_id;
        self.next_target_id += 1;
        let target = Target::new(
            id,
            blueprint.kind,
            blueprint.text,
            blueprint.position,
            blueprint.lifetime_ms,
        );
        self.timeline
            .schedule_after(now_ms, target.lifetime_ms(), Task::Expire(id));
        self.targets.insert(id, target);
        events.push(RoundEvent::Spawned {
            id,
            kind: blueprint.kind,
        });

        let delay = self.scheduler.next_delay_ms(&mut self.rng, elapsed_secs);
        self.timeline.schedule_after(now_ms, delay, Task::Spawn);
    }

    fn on_expire(&mut self, id: TargetId, events: &mut Vec<RoundEvent>) {
        let Some(target) = self.targets.get_mut(&id) else {
            return;
        };
        if target.expire() {
            events.push(RoundEvent::Expired { id });
            self.timeline
                .schedule_after(self.now_ms, REMOVAL_DELAY_MS, Task::Remove(id));
        }
    }
}
