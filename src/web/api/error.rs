use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::TrackError;

pub enum ApiError {
    Validation(String),
    NotFound,
    Track(TrackError),
}

impl From<TrackError> for ApiError {
    fn from(e: TrackError) -> Self {
        ApiError::Track(e)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "satellite_not_found"),
            ApiError::Track(e) => match e {
                TrackError::InvalidElementFormat { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_element_format")
                }
                TrackError::InvalidTimeWindow(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_time_window")
                }
                TrackError::Propagation { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "propagation_failed")
                }
                TrackError::NoSatellitesPropagated { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "no_satellites_propagated")
                }
                TrackError::NoSatellites => (StatusCode::NOT_FOUND, "no_satellites"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = match self {
            ApiError::Validation(msg) => ErrorResponse::with_message(code, &msg),
            ApiError::NotFound => ErrorResponse::new(code),
            ApiError::Track(e) => {
                log::info!("Request failed: {}", e);
                ErrorResponse::with_message(code, &e.to_string())
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(e: ApiError) -> StatusCode {
        e.into_response().status()
    }

    #[test]
    fn maps_track_errors_to_status_codes() {
        assert_eq!(
            status(
                TrackError::InvalidElementFormat {
                    satellite: "X".into(),
                    lines: 1
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(TrackError::InvalidTimeWindow("zero".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(TrackError::NoSatellitesPropagated { failed: 2 }.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(TrackError::NoSatellites.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(ApiError::NotFound), StatusCode::NOT_FOUND);
    }
}
