use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    pub min_score: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted: usize,
}
