//! Ticket API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use triage_core::{
    SeverityBand, StatusFilter, Ticket, TicketError, TicketId, TicketStatus, TicketView,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a ticket.
///
/// Exactly one of `severity` or `price` must be given; a price is mapped to a
/// severity with the catalog rule.
#[derive(Debug, Deserialize)]
pub struct CreateTicketBody {
    /// Product the ticket is raised for
    pub product_name: String,
    /// Explicit severity (1-5)
    pub severity: Option<i64>,
    /// Product price, used when no severity is given
    pub price: Option<f64>,
}

/// Query parameters for listing tickets
#[derive(Debug, Deserialize)]
pub struct ListTicketsParams {
    /// all | actionable | pending | assigned | resolved (default: all)
    pub status: Option<String>,
}

/// Request body for assigning a ticket
#[derive(Debug, Deserialize)]
pub struct AssignTicketBody {
    pub agent: String,
}

/// Response for single-ticket operations
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: TicketId,
    pub product_name: String,
    pub severity: u8,
    pub band: SeverityBand,
    pub status: TicketStatus,
    pub agent: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            product_name: ticket.product_name,
            severity: ticket.severity.value(),
            band: ticket.severity.band(),
            status: ticket.status,
            agent: ticket.agent,
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.updated_at.to_rfc3339(),
        }
    }
}

/// Response for listing tickets, most urgent first
#[derive(Debug, Serialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<TicketView>,
    pub total: usize,
    pub filter: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct TicketErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<TicketErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(TicketErrorResponse {
            error: message.into(),
        }),
    )
}

impl From<TicketError> for TicketErrorResponse {
    fn from(error: TicketError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

fn ticket_error(error: TicketError) -> ApiError {
    let status = match &error {
        TicketError::NotFound(_) => StatusCode::NOT_FOUND,
        TicketError::InvalidTransition { .. } => StatusCode::CONFLICT,
        TicketError::InvalidSeverity(_)
        | TicketError::InvalidAgent
        | TicketError::InvalidPrice(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TicketError::UnknownAgent(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(TicketErrorResponse::from(error)))
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTicketBody>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let triage = state.triage();
    let now = Utc::now();

    let ticket = match (body.severity, body.price) {
        (Some(severity), None) => triage
            .open_ticket(&body.product_name, severity, now)
            .map_err(ticket_error)?,
        (None, Some(price)) => triage
            .create_ticket_for_price(&body.product_name, price, now)
            .map_err(ticket_error)?,
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Exactly one of severity or price must be provided",
            ));
        }
    };

    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<TicketResponse>, ApiError> {
    let id = TicketId(id);
    match state.triage().get(id).map_err(ticket_error)? {
        Some(ticket) => Ok(Json(TicketResponse::from(ticket))),
        None => Err(ticket_error(TicketError::NotFound(id))),
    }
}

/// List tickets ranked at request time
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTicketsParams>,
) -> Result<Json<ListTicketsResponse>, ApiError> {
    let filter = match params.status.as_deref() {
        Some(value) => StatusFilter::parse(value)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => StatusFilter::All,
    };

    let tickets = state
        .triage()
        .list_ranked(Utc::now(), filter)
        .map_err(ticket_error)?;

    Ok(Json(ListTicketsResponse {
        total: tickets.len(),
        filter: filter.as_str().to_string(),
        tickets,
    }))
}

/// Assign a ticket to an agent
pub async fn assign_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<AssignTicketBody>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = state
        .triage()
        .assign_from_roster(TicketId(id), &body.agent, state.agents())
        .map_err(ticket_error)?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Resolve a ticket
pub async fn resolve_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = state
        .triage()
        .resolve(TicketId(id))
        .map_err(ticket_error)?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Delete a ticket (idempotent)
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state
        .triage()
        .delete(TicketId(id))
        .map_err(ticket_error)?;
    Ok(StatusCode::NO_CONTENT)
}
