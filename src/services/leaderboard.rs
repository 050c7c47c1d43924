use crate::db::Db;
use crate::error::AppError;
use crate::models::leaderboard::*;
use crate::validation;
use chrono::{SecondsFormat, Utc};
use rusqlite::params;

/// Number of entries the public leaderboard shows.
pub const LEADERBOARD_SIZE: i64 = 10;

/// Gate a finished round's score and store it when it passes.
pub fn submit_score(db: &Db, ceiling: i64, req: ScoreSubmission) -> Result<SubmitResult, AppError> {
    let accepted = match validation::check_submission(&req, ceiling) {
        Ok(accepted) => accepted,
        Err(err @ AppError::AntiCheat(_)) => {
            tracing::warn!(
                player_name = req.player_name.as_deref().unwrap_or_default(),
                score = req.score,
                ceiling,
                "submission rejected by anti-cheat"
            );
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    let id = insert_record(db, &accepted)?;
    tracing::info!(
        id,
        player_name = %accepted.player_name,
        score = accepted.score,
        rating = accepted.rating,
        "submission accepted"
    );
    Ok(SubmitResult {
        message: "ok".into(),
        id,
    })
}

/// Appends a record. Content is trusted; id and timestamp are assigned here.
pub fn insert_record(db: &Db, record: &AcceptedSubmission) -> Result<i64, AppError> {
    let accepted_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    Ok(db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO game_records (player_name, score, rating, accepted_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![record.player_name, record.score, record.rating, accepted_at],
        )?;
        Ok(conn.last_insert_rowid())
    })?)
}

/// Highest scores first; equal scores keep insertion order.
pub fn top_n(db: &Db, limit: i64) -> Result<Vec<LeaderboardEntry>, AppError> {
    let limit = limit.max(0);
    Ok(db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT player_name, score FROM game_records
             ORDER BY score DESC, id ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(LeaderboardEntry {
                player_name: row.get(0)?,
                score: row.get(1)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    })?)
}

pub fn get_leaderboard(db: &Db) -> Result<LeaderboardResponse, AppError> {
    Ok(LeaderboardResponse {
        data: top_n(db, LEADERBOARD_SIZE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, score: i64, rating: i64) -> ScoreSubmission {
        ScoreSubmission {
            player_name: Some(name.into()),
            score: Some(score),
            rating: Some(rating),
        }
    }

    fn record_count(db: &Db) -> i64 {
        db.with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM game_records", [], |r| r.get(0)))
            .unwrap()
    }

    #[test]
    fn accepted_submission_is_ranked() {
        let db = Db::open_in_memory().unwrap();
        let result = submit_score(&db, 450, submission("Night Owl#007", 120, 4)).unwrap();
        assert_eq!(result.message, "ok");
        assert!(result.id > 0);

        let board = get_leaderboard(&db).unwrap();
        assert_eq!(board.data.len(), 1);
        assert_eq!(board.data[0].player_name, "Night Owl#007");
        assert_eq!(board.data[0].score, 120);
    }

    #[test]
    fn ids_are_monotonic() {
        let db = Db::open_in_memory().unwrap();
        let first = submit_score(&db, 450, submission("a", 1, 1)).unwrap().id;
        let second = submit_score(&db, 450, submission("b", 1, 1)).unwrap().id;
        assert!(second > first);
    }

    #[test]
    fn anti_cheat_rejection_writes_nothing() {
        let db = Db::open_in_memory().unwrap();
        let err = submit_score(&db, 450, submission("cheater", 999, 5)).unwrap_err();
        assert!(matches!(err, AppError::AntiCheat(_)));
        assert_eq!(record_count(&db), 0);
    }

    #[test]
    fn validation_rejection_writes_nothing() {
        let db = Db::open_in_memory().unwrap();
        let err = submit_score(&db, 450, submission("p", 10, 0)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(record_count(&db), 0);
    }

    #[test]
    fn top_ten_of_fifteen_is_sorted_and_stable() {
        let db = Db::open_in_memory().unwrap();
        // Scores 0,10,20,30,40 three times each; insertion order distinguishes ties.
        for i in 0..15 {
            let score = (i % 5) * 10;
            let name = format!("p{:02}", i);
            insert_record(
                &db,
                &AcceptedSubmission {
                    player_name: name,
                    score,
                    rating: 3,
                },
            )
            .unwrap();
        }

        let top = top_n(&db, 10).unwrap();
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        let names: Vec<&str> = top.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(
            names,
            ["p04", "p09", "p14", "p03", "p08", "p13", "p02", "p07", "p12", "p01"]
        );
    }

    #[test]
    fn negative_scores_rank_below_zero() {
        let db = Db::open_in_memory().unwrap();
        submit_score(&db, 450, submission("low", -30, 2)).unwrap();
        submit_score(&db, 450, submission("zero", 0, 2)).unwrap();
        let top = top_n(&db, 10).unwrap();
        assert_eq!(top[0].player_name, "zero");
        assert_eq!(top[1].score, -30);
    }
}
