use serde::{Deserialize, Serialize};

/// Score submission as sent by the result screen. Every field is optional on
/// the wire so that a missing field is reported by the gate, not by the JSON
/// extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreSubmission {
    #[serde(alias = "playerLabel")]
    pub player_name: Option<String>,
    #[serde(alias = "finalScore")]
    pub score: Option<i64>,
    pub rating: Option<i64>,
}

/// A submission that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSubmission {
    pub player_name: String,
    pub score: i64,
    pub rating: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitResult {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub data: Vec<LeaderboardEntry>,
}

/// Full stored row, only exposed through the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardRecord {
    pub id: i64,
    pub player_name: String,
    pub score: i64,
    pub rating: i64,
    pub accepted_at: String,
}
