use crate::handlers;
use ntex::web;

/// Registers every endpoint. Shared between the server binary and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        // Leaderboard
        .route("/api/leaderboard", web::get().to(handlers::leaderboard::get_leaderboard))
        .route("/api/submit", web::post().to(handlers::leaderboard::submit_score))
        // Admin
        .service(
            web::resource("/api/admin/records")
                .route(web::get().to(handlers::admin::list_records))
                .route(web::delete().to(handlers::admin::delete_at_or_above)),
        )
        .route("/api/admin/records/{id}", web::delete().to(handlers::admin::delete_record))
        .route("/api/admin/purge", web::post().to(handlers::admin::purge))
        .route("/api/admin/export", web::get().to(handlers::admin::export_store));
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::Db;
    use crate::models::admin::DeleteResult;
    use crate::models::leaderboard::{LeaderboardResponse, SubmitResult};
    use crate::state::AppState;
    use flate2::read::GzDecoder;
    use ntex::http::StatusCode;
    use ntex::web::test;
    use std::io::Read;
    use std::sync::Arc;

    fn state() -> Arc<AppState> {
        let config = Config {
            admin_secret: Some("letmein".into()),
            ..Config::default()
        };
        Arc::new(AppState::new(Db::open_in_memory().unwrap(), &config))
    }

    #[ntex::test]
    async fn submit_then_read_leaderboard() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/submit")
            .set_json(&serde_json::json!({ "player_name": "Early Bird#042", "score": 15, "rating": 4 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: SubmitResult = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body.message, "ok");

        let req = test::TestRequest::get().uri("/api/leaderboard").to_request();
        let resp = test::call_service(&app, req).await;
        let board: LeaderboardResponse = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(board.data.len(), 1);
        assert_eq!(board.data[0].score, 15);
    }

    #[ntex::test]
    async fn camel_case_fields_are_accepted() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/submit")
            .set_json(&serde_json::json!({ "playerLabel": "Hero#001", "finalScore": 30, "rating": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[ntex::test]
    async fn rejections_carry_distinct_kinds() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/submit")
            .set_json(&serde_json::json!({ "player_name": "p", "score": 10 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["kind"], "validation");

        let req = test::TestRequest::post()
            .uri("/api/submit")
            .set_json(&serde_json::json!({ "player_name": "p", "score": 999, "rating": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["kind"], "anti_cheat");
    }

    #[ntex::test]
    async fn admin_requires_secret() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;

        for uri in ["/api/admin/records", "/api/admin/records?secret=nope", "/api/admin/export?secret=x"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        }

        let req = test::TestRequest::post().uri("/api/admin/purge").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/admin/records?secret=letmein")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[ntex::test]
    async fn admin_threshold_delete() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;
        for score in [100, 200, 300] {
            let req = test::TestRequest::post()
                .uri("/api/submit")
                .set_json(&serde_json::json!({ "player_name": "p", "score": score, "rating": 2 }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::delete()
            .uri("/api/admin/records?secret=letmein&min_score=200")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: DeleteResult = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body.deleted, 2);

        let req = test::TestRequest::delete()
            .uri("/api/admin/records?secret=letmein")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[ntex::test]
    async fn malformed_submission_is_a_validation_error() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;

        for payload in [
            r#"{"player_name":"p","score":"abc","rating":3}"#,
            r#"{"score":"abc"}"#,
            "definitely not json",
        ] {
            let req = test::TestRequest::post()
                .uri("/api/submit")
                .header("Content-Type", "application/json")
                .set_payload(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value =
                serde_json::from_slice(&test::read_body(resp).await).unwrap();
            assert_eq!(body["kind"], "validation", "payload {}", payload);
        }
    }

    #[ntex::test]
    async fn malformed_admin_parameters_are_validation_errors() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;

        for req in [
            test::TestRequest::delete()
                .uri("/api/admin/records?secret=letmein&min_score=lots")
                .to_request(),
            test::TestRequest::delete()
                .uri("/api/admin/records/abc?secret=letmein")
                .to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value =
                serde_json::from_slice(&test::read_body(resp).await).unwrap();
            assert_eq!(body["kind"], "validation");
        }

        // Without the secret the caller learns nothing about the parameters.
        let req = test::TestRequest::delete()
            .uri("/api/admin/records?min_score=lots")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[ntex::test]
    async fn admin_deletes_one_record_by_id() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/submit")
            .set_json(&serde_json::json!({ "player_name": "p", "score": 40, "rating": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let submitted: SubmitResult = serde_json::from_slice(&test::read_body(resp).await).unwrap();

        let uri = format!("/api/admin/records/{}?secret=letmein", submitted.id);
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: DeleteResult = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body.deleted, 1);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[ntex::test]
    async fn admin_export_returns_gzipped_store() {
        let app = test::init_service(web::App::new().state(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/submit")
            .set_json(&serde_json::json!({ "player_name": "p", "score": 10, "rating": 5 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/admin/export?secret=letmein")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "application/gzip"
        );
        let compressed = test::read_body(resp).await;
        let mut raw = Vec::new();
        GzDecoder::new(&compressed[..]).read_to_end(&mut raw).unwrap();
        assert!(raw.starts_with(b"SQLite format 3\0"));
    }
}
