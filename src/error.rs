use std::error::Error;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::pipeline::AnalysisError;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Error encountered while analysing category")]
    Analysis(#[from] AnalysisError),

    #[error("Category name must not be empty")]
    EmptyCategory,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        error!("{}: {:?}", self, self.source());

        let status = match self {
            RestError::Analysis(AnalysisError::Fetch(_)) => StatusCode::BAD_GATEWAY,
            RestError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::EmptyCategory => StatusCode::BAD_REQUEST,
        };

        let payload = Json(json!({"message": self.to_string()}));

        (status, payload).into_response()
    }
}
