use axum::{extract::State, response::IntoResponse};

use crate::web::server::AppState;

use super::templates::IndexTemplate;

const DEFAULT_STEP_MINUTES: f64 = 1.0;

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        satellite_count: state.registry.len(),
        step_minutes: DEFAULT_STEP_MINUTES,
    }
}
