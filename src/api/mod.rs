//! # API Module
//!
//! HTTP endpoints of the local server. The same router serves the OAuth
//! callback during `plyzer auth` and the dashboard API during `plyzer serve`.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, status and version
//! - [`callback`] - `GET /callback`, completes the authorization code flow
//! - [`analyze`] - `GET /api/analyze?playlist=..&top=..`, JSON analysis
//! - [`export`] - `GET /api/export?playlist=..`, CSV download
//!
//! Failed analyses answer with a JSON body holding the error message, a
//! remediation hint and whether retrying may help. The server keeps serving
//! after any of them.

mod analyze;
mod callback;
mod health;

pub use analyze::{analyze, export};
pub use callback::callback;
pub use health::health;

use axum::{
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::Error;

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::EmptyResult(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::Fetch(_) => StatusCode::BAD_GATEWAY,
            Error::AuthFlow(_) => StatusCode::UNAUTHORIZED,
            Error::AuthConfig(_) | Error::Config { .. } | Error::Export(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "remediation": self.remediation(),
            "retryable": self.is_retryable(),
        }));

        let mut response = (status, body).into_response();
        if let Error::RateLimited { retry_after } = self {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
        }
        response
    }
}
