use crate::db::Db;
use crate::error::AppError;
use crate::models::leaderboard::LeaderboardRecord;
use flate2::write::GzEncoder;
use flate2::Compression;
use rusqlite::params;
use sha2::{Digest, Sha256};
use std::io::Write;

/// Checks the supplied secret against the configured one. With no secret
/// configured every request is refused.
pub fn authorize(configured: Option<&str>, supplied: Option<&str>) -> Result<(), AppError> {
    let (Some(expected), Some(given)) = (configured, supplied) else {
        tracing::warn!("admin request without secret");
        return Err(AppError::Forbidden);
    };
    // Compare fixed-size digests so the comparison does not depend on the secret's length.
    let expected = Sha256::digest(expected.as_bytes());
    let given = Sha256::digest(given.as_bytes());
    let diff = expected
        .iter()
        .zip(given.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    if diff == 0 {
        Ok(())
    } else {
        tracing::warn!("admin request with wrong secret");
        Err(AppError::Forbidden)
    }
}

pub fn list_records(db: &Db) -> Result<Vec<LeaderboardRecord>, AppError> {
    Ok(db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, player_name, score, rating, accepted_at FROM game_records
             ORDER BY score DESC, id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LeaderboardRecord {
                id: row.get(0)?,
                player_name: row.get(1)?,
                score: row.get(2)?,
                rating: row.get(3)?,
                accepted_at: row.get(4)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    })?)
}

pub fn delete_record(db: &Db, id: i64) -> Result<usize, AppError> {
    let deleted =
        db.with_conn(|conn| conn.execute("DELETE FROM game_records WHERE id = ?1", params![id]))?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Record {} not found", id)));
    }
    tracing::info!(id, "admin deleted record");
    Ok(deleted)
}

pub fn delete_at_or_above(db: &Db, min_score: i64) -> Result<usize, AppError> {
    let deleted = db.with_conn(|conn| {
        conn.execute("DELETE FROM game_records WHERE score >= ?1", params![min_score])
    })?;
    tracing::info!(min_score, deleted, "admin deleted records by threshold");
    Ok(deleted)
}

pub fn purge(db: &Db) -> Result<usize, AppError> {
    let deleted = db.with_conn(|conn| conn.execute("DELETE FROM game_records", []))?;
    tracing::info!(deleted, "admin purged leaderboard");
    Ok(deleted)
}

/// Gzip-compressed copy of the whole store as a standalone SQLite file.
pub fn export_snapshot(db: &Db) -> Result<Vec<u8>, AppError> {
    let raw = db.snapshot()?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    let compressed = encoder.finish()?;
    tracing::info!(bytes = raw.len(), compressed = compressed.len(), "admin exported store");
    Ok(compressed)
}
