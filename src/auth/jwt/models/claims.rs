use axum::{
    headers::{authorization::Bearer, Authorization},
    http::StatusCode,
};
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};

use crate::{app::models::api_error::ApiError, auth::jwt::util::decode_jwt};

/// `id` is the owning-user identifier of every restaurant the bearer writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    /// A missing header is rejected the same way as an invalid token.
    pub fn from_header(
        authorization: Option<Authorization<Bearer>>,
        secret: &str,
    ) -> Result<Self, ApiError> {
        let Some(authorization) = authorization else {
            return Err(ApiError {
                code: StatusCode::UNAUTHORIZED,
                message: "Invalid token.".to_string(),
                errors: None,
            });
        };

        match decode_jwt(authorization.0.token(), secret) {
            Ok(claims) => Ok(claims),
            Err(ErrorKind::ExpiredSignature) => Err(ApiError {
                code: StatusCode::UNAUTHORIZED,
                message: "Token expired".to_string(),
                errors: None,
            }),
            Err(_) => Err(ApiError {
                code: StatusCode::UNAUTHORIZED,
                message: "Invalid token.".to_string(),
                errors: None,
            }),
        }
    }
}
