// --- File: crates/slotify_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
#[cfg(test)]
mod auth_test;
pub mod client;

pub use client::{GcalClientError, GoogleCalendarClient};
