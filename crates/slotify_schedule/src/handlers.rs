// File: crates/slotify_schedule/src/handlers.rs
use crate::error::ScheduleError;
use crate::service::{CreatedSchedule, ScheduleService};
use crate::validator::CreateAvailabilityRequest;
use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{Json, Redirect},
};
use serde::{Deserialize, Serialize};
use slotify_common::error::HttpStatusCode;
use slotify_common::models::Slot;
use slotify_db::{AvailabilityRepository, HostRepository, SlotRepository};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Host identity, verified by the upstream auth layer and forwarded as a
/// trusted header. Token verification itself is outside this service.
pub struct HostIdentity(pub String);

const HOST_EMAIL_HEADER: &str = "x-host-email";

impl<S> FromRequestParts<S> for HostIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(HOST_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| HostIdentity(value.to_string()))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing host identity".to_string(),
            ))
    }
}

/// Confirmation payload for mutations without a richer result.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConfirmationResponse {
    pub message: String,
    pub code: u16,
}

/// Query parameters Google appends to the booking-completion redirect.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
pub struct BookingCallbackQuery {
    /// Authorization code to exchange for tokens
    pub code: String,
    /// Opaque state round-tripped through the provider; carries the slot id
    pub state: String,
}

fn error_response(err: ScheduleError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

/// Handler to create an availability window with its generated slots.
pub async fn create_schedule_handler<A, S, H>(
    State(service): State<Arc<ScheduleService<A, S, H>>>,
    host: HostIdentity,
    Json(payload): Json<CreateAvailabilityRequest>,
) -> Result<Json<CreatedSchedule>, (StatusCode, String)>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    let created = service
        .create_schedule(&host.0, payload)
        .await
        .map_err(error_response)?;

    Ok(Json(created))
}

/// Handler to delete an unbooked slot.
pub async fn delete_slot_handler<A, S, H>(
    State(service): State<Arc<ScheduleService<A, S, H>>>,
    host: HostIdentity,
    Path(slot_id): Path<String>,
) -> Result<Json<ConfirmationResponse>, (StatusCode, String)>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    service
        .delete_slot(&slot_id, &host.0)
        .await
        .map_err(error_response)?;

    Ok(Json(ConfirmationResponse {
        message: "Slot deleted successfully".to_string(),
        code: 200,
    }))
}

/// Handler to list a host's availabilities as a date -> slots mapping.
pub async fn get_availability_handler<A, S, H>(
    State(service): State<Arc<ScheduleService<A, S, H>>>,
    Path(host_email): Path<String>,
) -> Result<Json<BTreeMap<String, Vec<Slot>>>, (StatusCode, String)>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    let by_date = service
        .get_availabilities(&host_email)
        .await
        .map_err(error_response)?;

    Ok(Json(by_date))
}

/// Handler starting the booking flow: redirect the visitor to the
/// provider's consent screen with the slot id as OAuth state.
pub async fn begin_booking_handler<A, S, H>(
    State(service): State<Arc<ScheduleService<A, S, H>>>,
    Path(slot_id): Path<String>,
) -> Result<Redirect, (StatusCode, String)>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    let url = service.begin_booking(&slot_id).map_err(error_response)?;

    info!("Redirecting booking of slot {} to provider consent", slot_id);
    Ok(Redirect::to(&url))
}

/// Handler for the provider redirect: completes the booking transaction.
pub async fn complete_booking_handler<A, S, H>(
    State(service): State<Arc<ScheduleService<A, S, H>>>,
    Query(query): Query<BookingCallbackQuery>,
) -> Result<Json<Slot>, (StatusCode, String)>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    let slot = service
        .complete_booking(&query.code, &query.state)
        .await
        .map_err(error_response)?;

    Ok(Json(slot))
}

/// Handler returning the host's booked slots across all availabilities.
pub async fn get_booked_slots_handler<A, S, H>(
    State(service): State<Arc<ScheduleService<A, S, H>>>,
    host: HostIdentity,
) -> Result<Json<Vec<Slot>>, (StatusCode, String)>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    let booked = service
        .get_booked_slots(&host.0)
        .await
        .map_err(error_response)?;

    Ok(Json(booked))
}
