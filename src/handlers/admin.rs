use crate::error::AppError;
use crate::models::admin::*;
use crate::services::admin as service;
use crate::state::AppState;
use crate::validation;
use ntex::web::{self, HttpRequest, HttpResponse};
use std::sync::Arc;

/// Runs before any other parameter is decoded.
fn authorize(state: &AppState, req: &HttpRequest) -> Result<(), AppError> {
    let query: AdminQuery =
        validation::parse_query(req.query_string()).map_err(|_| AppError::Forbidden)?;
    service::authorize(state.admin_secret.as_deref(), query.secret.as_deref())
}

pub async fn list_records(
    state: web::types::State<Arc<AppState>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    authorize(&state, &req)?;
    let records = service::list_records(&state.db)?;
    Ok(HttpResponse::Ok().json(&records))
}

pub async fn delete_record(
    state: web::types::State<Arc<AppState>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    authorize(&state, &req)?;
    let raw_id = req.match_info().query("id");
    let id: i64 = raw_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid record id: {:?}", raw_id)))?;
    let deleted = service::delete_record(&state.db, id)?;
    Ok(HttpResponse::Ok().json(&DeleteResult { deleted }))
}

pub async fn delete_at_or_above(
    state: web::types::State<Arc<AppState>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    authorize(&state, &req)?;
    let query: ThresholdQuery = validation::parse_query(req.query_string())?;
    let min_score = query
        .min_score
        .ok_or_else(|| AppError::Validation("min_score is required".into()))?;
    let deleted = service::delete_at_or_above(&state.db, min_score)?;
    Ok(HttpResponse::Ok().json(&DeleteResult { deleted }))
}

pub async fn purge(
    state: web::types::State<Arc<AppState>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    authorize(&state, &req)?;
    let deleted = service::purge(&state.db)?;
    Ok(HttpResponse::Ok().json(&DeleteResult { deleted }))
}

pub async fn export_store(
    state: web::types::State<Arc<AppState>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    authorize(&state, &req)?;
    let state = Arc::clone(&*state);
    let snapshot = tokio::task::spawn_blocking(move || service::export_snapshot(&state.db))
        .await
        .map_err(|e| AppError::Internal(format!("export task failed: {}", e)))??;
    Ok(HttpResponse::Ok()
        .content_type("application/gzip")
        .header(
            "Content-Disposition",
            "attachment; filename=\"whack-board.db.gz\"",
        )
        .body(snapshot))
}
