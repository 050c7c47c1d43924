pub mod admin;
pub mod leaderboard;
