use ntex::http::StatusCode;
use ntex::web::{HttpResponse, WebResponseError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Rejected by anti-cheat: {0}")]
    AntiCheat(String),
    #[error("Forbidden")]
    Forbidden,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Db(_) | AppError::Io(_) | AppError::Internal(_) => "internal",
            AppError::Validation(_) => "validation",
            AppError::AntiCheat(_) => "anti_cheat",
            AppError::Forbidden => "forbidden",
            AppError::NotFound(_) => "not_found",
        }
    }
}

impl WebResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::AntiCheat(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self, _: &ntex::web::HttpRequest) -> HttpResponse {
        let message = match self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "storage failure");
                "Database error"
            }
            AppError::Io(e) => {
                tracing::error!(error = %e, "i/o failure");
                "Internal error"
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                "Internal error"
            }
            AppError::Validation(msg) | AppError::AntiCheat(msg) | AppError::NotFound(msg) => {
                msg.as_str()
            }
            AppError::Forbidden => "Forbidden",
        };
        HttpResponse::build(self.status_code())
            .json(&serde_json::json!({ "error": message, "kind": self.kind() }))
    }
}
