// --- File: crates/slotify_schedule/src/routes.rs ---

use crate::handlers::{
    begin_booking_handler, complete_booking_handler, create_schedule_handler, delete_slot_handler,
    get_availability_handler, get_booked_slots_handler,
};
use crate::service::ScheduleService;
use axum::{
    routing::{delete, get, post},
    Router,
};
use slotify_db::{AvailabilityRepository, HostRepository, SlotRepository};
use std::sync::Arc;

/// Creates a router containing all routes for the schedule feature.
pub fn routes<A, S, H>(service: Arc<ScheduleService<A, S, H>>) -> Router
where
    A: AvailabilityRepository + 'static,
    S: SlotRepository + 'static,
    H: HostRepository + 'static,
{
    Router::new()
        .route("/schedule/create", post(create_schedule_handler::<A, S, H>))
        .route(
            "/schedule/slot/{slot_id}",
            delete(delete_slot_handler::<A, S, H>),
        )
        .route(
            "/schedule/availability/{host_email}",
            get(get_availability_handler::<A, S, H>),
        )
        .route(
            "/schedule/book/{slot_id}/authenticate",
            get(begin_booking_handler::<A, S, H>),
        )
        .route(
            "/schedule/book/slot",
            get(complete_booking_handler::<A, S, H>),
        )
        .route(
            "/schedule/host/booked-slots",
            get(get_booked_slots_handler::<A, S, H>),
        )
        .with_state(service)
}
