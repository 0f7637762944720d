use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fonviz_api_types::result::JsonError;
use fonviz_charts::ChartError;
use fonviz_db::DbError;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("Db Error {0}")]
    DbError(#[from] DbError),
    #[error("Chart error {0}")]
    Chart(#[from] ChartError),
    #[error("Chart task failed {0}")]
    Join(#[from] JoinError),
}

impl ApiError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::DbError(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            ApiError::DbError(e) if e.is_division() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.as_status_code();
        // server side details (store paths, driver errors) stay in the log
        let e = if status.is_server_error() {
            error!("error {self}");
            "Internal server error".to_string()
        } else {
            warn!("rejected request {self}");
            format!("{self}")
        };

        (status, Json(JsonError { error_message: e })).into_response()
    }
}
