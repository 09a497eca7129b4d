use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::{debug, error};
use thiserror::Error;

/// The error surface of the HTTP layer. Every store outcome that is not a
/// success becomes one of these, and this is the single place statuses are
/// decided: missing targets are 404, everything else is 500. Error detail is
/// logged server-side and never written into the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NotFound(msg) => debug!("{}", msg),
            ApiError::InternalError(msg) => error!("{}", msg),
        }
        HttpResponse::build(self.status_code()).finish()
    }
}
