//! Whack-a-mole round logic and the leaderboard service it reports to.
//!
//! [`game`] holds the deterministic round core (spawning, targets, scoring,
//! the result form). Everything else is the HTTP leaderboard: the submission
//! gate, the SQLite store and the admin surface.

pub mod config;
pub mod db;
pub mod error;
pub mod game;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
