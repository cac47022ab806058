//! HTTP response handling for errors

use super::types::MonitorError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for MonitorError {
    fn status_code(&self) -> StatusCode {
        match self {
            MonitorError::NotFound(_) => StatusCode::NOT_FOUND,
            MonitorError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MonitorError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            MonitorError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            MonitorError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            MonitorError::BadRequest(_) => ("BAD_REQUEST", self.to_string()),
            MonitorError::HttpClient(_) => {
                ("UPSTREAM_ERROR", "Upstream request failed".to_string())
            }
            MonitorError::Alert(_) => ("ALERT_ERROR", self.to_string()),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
