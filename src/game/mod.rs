//! Deterministic round core.
//!
//! Nothing in here touches a clock, a screen or a global: callers pass the
//! current time in milliseconds and an RNG, then render the [`RoundEvent`]s
//! they get back and route player input to [`RoundController::resolve`].

pub mod label;
pub mod result;
pub mod round;
pub mod spawn;
pub mod target;
pub mod timeline;

pub use result::{FormError, ResultForm};
pub use round::{Round, RoundController, RoundEvent, RoundStatus};
pub use spawn::{Blueprint, PlayArea, SpawnScheduler};
pub use target::{Cue, Position, Resolution, Resolve, Target, TargetId, TargetKind, TargetState};
pub use timeline::{TaskHandle, Timeline};
