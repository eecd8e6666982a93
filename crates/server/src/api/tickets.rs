//! Ticket API handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use queuedesk_core::{QueueError, ServiceId, TicketId, TicketView};

use super::error::ApiError;
use super::MessageResponse;
use crate::state::AppState;

/// Request body for taking a ticket
#[derive(Debug, Deserialize)]
pub struct CreateTicketBody {
    pub service_id: ServiceIdParam,
}

/// A service id sent either as a JSON number or as a numeric string
/// (browsers read it from a `data-` attribute).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ServiceIdParam {
    Number(i64),
    Text(String),
}

impl ServiceIdParam {
    pub fn parse(&self) -> Result<ServiceId, QueueError> {
        match self {
            ServiceIdParam::Number(id) => Ok(ServiceId(*id)),
            ServiceIdParam::Text(raw) => raw.trim().parse().map(ServiceId).map_err(|_| {
                QueueError::InvalidInput(format!("service_id must be an integer, got {raw:?}"))
            }),
        }
    }
}

/// Take a ticket for a service
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTicketBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TicketView>), ApiError> {
    let Json(body) = body?;
    let service_id = body.service_id.parse()?;
    let ticket = state.queue().create_ticket(service_id)?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Get a ticket with its current position
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TicketView>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.queue().ticket_status(TicketId(id))?))
}

/// Cancel a ticket (DELETE endpoint)
pub async fn cancel_ticket(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.queue().cancel_ticket(TicketId(id))?;
    Ok(Json(MessageResponse::new("Ticket cancelled")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<ServiceId, QueueError> {
        let body: CreateTicketBody = serde_json::from_str(body).unwrap();
        body.service_id.parse()
    }

    #[test]
    fn test_service_id_number_or_string() {
        assert_eq!(parse(r#"{"service_id": 3}"#).unwrap(), ServiceId(3));
        assert_eq!(parse(r#"{"service_id": "3"}"#).unwrap(), ServiceId(3));
        assert_eq!(parse(r#"{"service_id": " 12 "}"#).unwrap(), ServiceId(12));
    }

    #[test]
    fn test_service_id_non_numeric_string() {
        let err = parse(r#"{"service_id": "abc"}"#).unwrap_err();
        assert!(matches!(err, QueueError::InvalidInput(_)));
    }

    #[test]
    fn test_service_id_wrong_type_rejected() {
        assert!(serde_json::from_str::<CreateTicketBody>(r#"{"service_id": true}"#).is_err());
        assert!(serde_json::from_str::<CreateTicketBody>(r#"{}"#).is_err());
    }
}
