use crate::error::AppError;
use crate::models::leaderboard::{AcceptedSubmission, ScoreSubmission};
use ntex::web::types::Query;
use serde::de::DeserializeOwned;

const MAX_PLAYER_NAME_LEN: usize = 32;
const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

pub fn validate_player_name(name: Option<&str>) -> Result<String, AppError> {
    let trimmed = name.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        Err(AppError::Validation("player_name is required".into()))
    } else {
        Ok(trimmed.chars().take(MAX_PLAYER_NAME_LEN).collect())
    }
}

pub fn validate_score(score: Option<i64>) -> Result<i64, AppError> {
    score.ok_or_else(|| AppError::Validation("score is required".into()))
}

/// Zero counts as "no rating given".
pub fn validate_rating(rating: Option<i64>) -> Result<i64, AppError> {
    match rating {
        None | Some(0) => Err(AppError::Validation("rating is required".into())),
        Some(r) if RATING_RANGE.contains(&r) => Ok(r),
        Some(r) => Err(AppError::Validation(format!("rating must be 1-5, got {}", r))),
    }
}

/// The ceiling itself is still an acceptable score.
pub fn validate_score_ceiling(score: i64, ceiling: i64) -> Result<(), AppError> {
    if score > ceiling {
        Err(AppError::AntiCheat(format!(
            "score {} exceeds the maximum achievable score",
            score
        )))
    } else {
        Ok(())
    }
}

/// Decodes a JSON request body; malformed input is a validation error.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("malformed body: {}", e)))
}

/// Decodes a query string; malformed parameters are a validation error.
pub fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T, AppError> {
    Query::<T>::from_query(query)
        .map(Query::into_inner)
        .map_err(|e| AppError::Validation(format!("malformed query: {}", e)))
}

/// Runs every field check, then the anti-cheat ceiling.
pub fn check_submission(req: &ScoreSubmission, ceiling: i64) -> Result<AcceptedSubmission, AppError> {
    let player_name = validate_player_name(req.player_name.as_deref())?;
    let score = validate_score(req.score)?;
    let rating = validate_rating(req.rating)?;
    validate_score_ceiling(score, ceiling)?;
    Ok(AcceptedSubmission {
        player_name,
        score,
        rating,
    })
}
