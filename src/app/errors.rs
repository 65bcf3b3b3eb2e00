use axum::http::StatusCode;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    InternalServerError,
    MalformedBody,
    PayloadTooLarge,
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::InternalServerError => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal server error occurred.".to_string(),
                errors: None,
            },
            Self::MalformedBody => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Malformed request body.".to_string(),
                errors: None,
            },
            Self::PayloadTooLarge => ApiError {
                code: StatusCode::PAYLOAD_TOO_LARGE,
                message: "Request body too large.".to_string(),
                errors: None,
            },
        }
    }
}
