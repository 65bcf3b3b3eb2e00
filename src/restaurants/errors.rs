use axum::http::StatusCode;

use crate::{app::models::api_error::ApiError, validation::violation::Violation};

#[derive(Debug)]
pub enum RestaurantsApiError {
    ValidationFailed(Vec<Violation>),
}

impl RestaurantsApiError {
    pub fn value(self) -> ApiError {
        match self {
            Self::ValidationFailed(violations) => ApiError {
                code: StatusCode::UNPROCESSABLE_ENTITY,
                message: "Restaurant validation failed.".to_string(),
                errors: Some(violations),
            },
        }
    }
}
