// --- File: crates/slotify_gcal/src/client.rs ---
//! Google Calendar client implementation.
//!
//! Implements the [`CalendarClient`] capability: authorization URL
//! construction, the code-for-token exchange, and the two event round trips
//! of a booking (insert with a conference-link request, then patch to pin
//! the link and attendees).

use crate::auth::{build_authorization_url, create_calendar_hub, TOKEN_ENDPOINT};
use chrono::{DateTime, Utc};
use google_calendar3::api::{
    ConferenceData, ConferenceSolutionKey, CreateConferenceRequest, Event, EventAttendee,
    EventDateTime,
};
use serde::{Deserialize, Serialize};
use slotify_common::services::{
    BoxFuture, BoxedError, CalendarClient, CreatedEvent, EventDraft, EventPatch, OAuthTokens,
};
use slotify_config::GoogleConfig;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalClientError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Token exchange rejected ({status}): {message}")]
    TokenExchange { status: u16, message: String },
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Failed to encode authorization URL: {0}")]
    UrlEncodeError(#[from] serde_urlencoded::ser::Error),
    #[error("Authenticator setup failed: {0}")]
    AuthSetup(String),
    #[error("Provider response missing field: {0}")]
    MissingField(&'static str),
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

/// Google Calendar client.
pub struct GoogleCalendarClient {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl GoogleCalendarClient {
    /// Create a new Google Calendar client from the OAuth2 registration.
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn exchange_code_inner(&self, code: &str) -> Result<OAuthTokens, GcalClientError> {
        let request = TokenRequest {
            code,
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            redirect_uri: &self.config.redirect_uri,
            grant_type: "authorization_code",
        };

        let response = self.http.post(TOKEN_ENDPOINT).form(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GcalClientError::TokenExchange {
                status: status.as_u16(),
                message,
            });
        }

        let tokens: TokenResponse = response.json().await?;
        Ok(OAuthTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    async fn create_event_inner(
        &self,
        calendar_id: &str,
        tokens: &OAuthTokens,
        draft: EventDraft,
    ) -> Result<CreatedEvent, GcalClientError> {
        let hub = create_calendar_hub(&tokens.access_token)
            .await
            .map_err(|e| GcalClientError::AuthSetup(e.to_string()))?;

        let conference_data = draft.request_conference_link.then(|| ConferenceData {
            create_request: Some(CreateConferenceRequest {
                conference_solution_key: Some(ConferenceSolutionKey {
                    type_: Some("hangoutsMeet".to_string()),
                }),
                request_id: Some(Uuid::new_v4().to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        let event = Event {
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            start: Some(event_date_time(&draft.start_time, &draft.time_zone)?),
            end: Some(event_date_time(&draft.end_time, &draft.time_zone)?),
            conference_data,
            ..Default::default()
        };

        debug!("Inserting calendar event into {}", calendar_id);
        let (_response, created) = hub
            .events()
            .insert(event, calendar_id)
            .conference_data_version(1)
            .send_updates("all")
            .doit()
            .await?;

        created_event_from(created)
    }

    async fn patch_event_inner(
        &self,
        calendar_id: &str,
        tokens: &OAuthTokens,
        event_id: &str,
        patch: EventPatch,
    ) -> Result<CreatedEvent, GcalClientError> {
        let hub = create_calendar_hub(&tokens.access_token)
            .await
            .map_err(|e| GcalClientError::AuthSetup(e.to_string()))?;

        let attendees = patch
            .attendees
            .iter()
            .map(|a| EventAttendee {
                display_name: a.display_name.clone(),
                email: Some(a.email.clone()),
                organizer: Some(a.organizer),
                ..Default::default()
            })
            .collect::<Vec<_>>();

        let event = Event {
            summary: patch.summary.clone(),
            location: patch.location.clone(),
            attendees: (!attendees.is_empty()).then_some(attendees),
            ..Default::default()
        };

        debug!("Patching calendar event {} in {}", event_id, calendar_id);
        let (_response, patched) = hub
            .events()
            .patch(event, calendar_id, event_id)
            .send_updates("all")
            .doit()
            .await?;

        created_event_from(patched)
    }
}

fn event_date_time(rfc3339: &str, time_zone: &str) -> Result<EventDateTime, GcalClientError> {
    let instant = DateTime::parse_from_rfc3339(rfc3339)
        .map_err(|e| GcalClientError::TimeParseError(format!("{rfc3339}: {e}")))?
        .with_timezone(&Utc);

    Ok(EventDateTime {
        date_time: Some(instant),
        time_zone: Some(time_zone.to_string()),
        ..Default::default()
    })
}

fn created_event_from(event: Event) -> Result<CreatedEvent, GcalClientError> {
    let creator = event.creator;
    Ok(CreatedEvent {
        event_id: event.id.ok_or(GcalClientError::MissingField("id"))?,
        hangout_link: event.hangout_link,
        creator_email: creator.as_ref().and_then(|c| c.email.clone()),
        creator_display_name: creator.as_ref().and_then(|c| c.display_name.clone()),
        status: event.status.unwrap_or_else(|| "confirmed".to_string()),
    })
}

impl CalendarClient for GoogleCalendarClient {
    type Error = BoxedError;

    fn generate_auth_url(&self, scope: &str, state: &str) -> Result<String, Self::Error> {
        build_authorization_url(&self.config, scope, state)
            .map_err(|e| BoxedError(Box::new(GcalClientError::UrlEncodeError(e))))
    }

    fn exchange_code(&self, code: &str) -> BoxFuture<'_, OAuthTokens, Self::Error> {
        let code = code.to_string();

        Box::pin(async move {
            self.exchange_code_inner(&code)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn create_event(
        &self,
        calendar_id: &str,
        tokens: &OAuthTokens,
        draft: EventDraft,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let tokens = tokens.clone();

        Box::pin(async move {
            self.create_event_inner(&calendar_id, &tokens, draft)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn patch_event(
        &self,
        calendar_id: &str,
        tokens: &OAuthTokens,
        event_id: &str,
        patch: EventPatch,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let tokens = tokens.clone();
        let event_id = event_id.to_string();

        Box::pin(async move {
            self.patch_event_inner(&calendar_id, &tokens, &event_id, patch)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}
