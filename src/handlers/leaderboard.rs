use crate::error::AppError;
use crate::models::leaderboard::*;
use crate::services::leaderboard as service;
use crate::state::AppState;
use crate::validation;
use ntex::util::Bytes;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn submit_score(
    state: web::types::State<Arc<AppState>>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let req: ScoreSubmission = validation::parse_json_body(&body)?;
    let result = service::submit_score(&state.db, state.score_ceiling, req)?;
    Ok(HttpResponse::Ok().json(&result))
}

pub async fn get_leaderboard(
    state: web::types::State<Arc<AppState>>,
) -> Result<HttpResponse, AppError> {
    let board = service::get_leaderboard(&state.db)?;
    Ok(HttpResponse::Ok().json(&board))
}
