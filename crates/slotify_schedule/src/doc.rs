// File: crates/slotify_schedule/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{BookingCallbackQuery, ConfirmationResponse};
use crate::service::CreatedSchedule;
use crate::validator::CreateAvailabilityRequest;
use slotify_common::models::{Availability, AvailabilityStatus, Host, Slot, SlotStatus};

#[utoipa::path(
    post,
    path = "/schedule/create",
    request_body(content = CreateAvailabilityRequest, example = json!({
        "title": "Office hours",
        "date": "2026-09-01",
        "day_start_time": "09:00",
        "day_end_time": "17:00",
        "per_slot_duration": 30
    })),
    responses(
        (status = 200, description = "Availability created with generated slots", body = CreatedSchedule),
        (status = 400, description = "Validation failure", body = String),
        (status = 409, description = "Schedule already exists for the given date", body = String)
    )
)]
fn doc_create_schedule_handler() {}

#[utoipa::path(
    delete,
    path = "/schedule/slot/{slot_id}",
    params(
        ("slot_id" = String, Path, description = "The ID of the slot to delete")
    ),
    responses(
        (status = 200, description = "Slot deleted", body = ConfirmationResponse),
        (status = 404, description = "Unknown slot", body = String),
        (status = 409, description = "Slot is not available to delete", body = String),
        (status = 403, description = "Requesting host does not own the slot", body = String)
    )
)]
fn doc_delete_slot_handler() {}

#[utoipa::path(
    get,
    path = "/schedule/availability/{host_email}",
    params(
        ("host_email" = String, Path, description = "Host email to list availabilities for")
    ),
    responses(
        (status = 200, description = "Mapping of date to slot list"),
        (status = 404, description = "Unknown host", body = String)
    )
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    get,
    path = "/schedule/book/{slot_id}/authenticate",
    params(
        ("slot_id" = String, Path, description = "The slot being booked")
    ),
    responses(
        (status = 303, description = "Redirect to the provider consent screen")
    )
)]
fn doc_begin_booking_handler() {}

#[utoipa::path(
    get,
    path = "/schedule/book/slot",
    params(BookingCallbackQuery),
    responses(
        (status = 200, description = "Booked slot with meeting link", body = Slot),
        (status = 404, description = "Unknown slot", body = String),
        (status = 409, description = "Slot is not available", body = String),
        (status = 502, description = "Calendar provider failure", body = String)
    )
)]
fn doc_complete_booking_handler() {}

#[utoipa::path(
    get,
    path = "/schedule/host/booked-slots",
    responses(
        (status = 200, description = "Booked slots across the host's availabilities", body = [Slot]),
        (status = 404, description = "Unknown host", body = String)
    )
)]
fn doc_get_booked_slots_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_schedule_handler,
        doc_delete_slot_handler,
        doc_get_availability_handler,
        doc_begin_booking_handler,
        doc_complete_booking_handler,
        doc_get_booked_slots_handler
    ),
    components(
        schemas(
            CreateAvailabilityRequest,
            CreatedSchedule,
            ConfirmationResponse,
            Availability,
            AvailabilityStatus,
            Slot,
            SlotStatus,
            Host
        )
    ),
    tags(
        (name = "schedule", description = "Availability and slot booking API")
    ),
    servers(
        (url = "/api", description = "Schedule API server")
    )
)]
pub struct ScheduleApiDoc;
