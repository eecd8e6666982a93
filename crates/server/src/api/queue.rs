use axum::{extract::State, Json};
use std::sync::Arc;
use queuedesk_core::QueueStatus;

use super::error::ApiError;
use crate::state::AppState;

/// Every waiting ticket across services, with summary stats.
pub async fn get_queue(State(state): State<Arc<AppState>>) -> Result<Json<QueueStatus>, ApiError> {
    Ok(Json(state.queue().queue_status()?))
}
