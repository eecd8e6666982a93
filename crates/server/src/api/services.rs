//! Service catalog and counter API handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use queuedesk_core::{Service, ServiceId, TicketView};

use super::error::ApiError;
use super::middleware::AuthOperator;
use super::MessageResponse;
use crate::state::AppState;

/// Request body for creating a service
#[derive(Debug, Deserialize)]
pub struct CreateServiceBody {
    pub name: String,
}

/// Service as returned by the API
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: ServiceId,
    pub name: String,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
        }
    }
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceResponse>>, ApiError> {
    let services = state.queue().list_services()?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    body: Result<Json<CreateServiceBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    let Json(body) = body?;
    let service = state.queue().create_service(&body.name)?;

    tracing::debug!(operator = %operator, service_id = %service.id, "Service created via API");
    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.queue().delete_service(ServiceId(id))?;

    tracing::debug!(operator = %operator, service_id = id, "Service deleted via API");
    Ok(Json(MessageResponse::new("Service deleted")))
}

/// Call the next waiting ticket; 204 when nobody is waiting.
pub async fn serve_next(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;

    Ok(match state.queue().serve_next(ServiceId(id))? {
        Some(ticket) => {
            tracing::debug!(operator = %operator, ticket_id = %ticket.id, "Ticket called via API");
            Json(ticket).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn list_service_tickets(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<TicketView>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.queue().service_queue(ServiceId(id))?))
}
