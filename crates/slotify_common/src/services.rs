// --- File: crates/slotify_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module defines the calendar capability consumed by the booking
//! orchestrator. The trait decouples the core from the concrete Google
//! Calendar client so the orchestrator can be exercised against a fake
//! implementation returning deterministic event and link values.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for calendar provider operations.
///
/// Models the OAuth2 authorization-code flow plus the two event round trips
/// the booking transaction needs. All calls are one-shot; retries are the
/// caller's decision (the orchestrator never retries).
pub trait CalendarClient: Send + Sync {
    /// Error type returned by calendar operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the authorization URL the visitor is redirected to.
    ///
    /// `state` is carried opaquely through the provider and handed back on
    /// the completion callback.
    fn generate_auth_url(&self, scope: &str, state: &str) -> Result<String, Self::Error>;

    /// Exchange an authorization code for access credentials.
    fn exchange_code(&self, code: &str) -> BoxFuture<'_, OAuthTokens, Self::Error>;

    /// Create a calendar event, requesting a video-conference link.
    fn create_event(
        &self,
        calendar_id: &str,
        tokens: &OAuthTokens,
        draft: EventDraft,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error>;

    /// Patch an existing event (summary, location, attendees).
    fn patch_event(
        &self,
        calendar_id: &str,
        tokens: &OAuthTokens,
        event_id: &str,
        patch: EventPatch,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error>;
}

/// Access credentials obtained from the authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    /// Present when the provider granted offline access
    pub refresh_token: Option<String>,
}

/// Draft of a calendar event to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    /// RFC3339 start of the event
    pub start_time: String,
    /// RFC3339 end of the event
    pub end_time: String,
    /// IANA time zone the event is anchored to
    pub time_zone: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Ask the provider to attach an auto-generated video-conference link
    pub request_conference_link: bool,
}

/// A patch applied to an already-created event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub summary: Option<String>,
    pub location: Option<String>,
    pub attendees: Vec<EventAttendee>,
}

/// One attendee attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttendee {
    pub display_name: Option<String>,
    pub email: String,
    pub organizer: bool,
}

/// Provider view of an event after create/patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub event_id: String,
    /// Joinable video-meeting link, if the provider generated one
    pub hangout_link: Option<String>,
    pub creator_email: Option<String>,
    pub creator_display_name: Option<String>,
    pub status: String,
}
