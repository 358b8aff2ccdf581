// File: crates/slotify_gcal/src/auth.rs
//! OAuth2 plumbing for the booking flow.
//!
//! The visitor authorizes with their own Google account, so every calendar
//! call runs under a short-lived access token obtained from the
//! authorization-code exchange. A fresh `CalendarHub` is built around each
//! token rather than holding one service-account hub for the process.

use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::AccessTokenAuthenticator,
    CalendarHub,
};
use serde::Serialize;
use slotify_config::GoogleConfig;
use std::error::Error;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Google's OAuth2 authorization endpoint.
pub const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's OAuth2 token endpoint.
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

#[derive(Serialize)]
struct AuthUrlQuery<'a> {
    client_id: &'a str,
    redirect_uri: &'a str,
    response_type: &'a str,
    scope: &'a str,
    access_type: &'a str,
    state: &'a str,
}

/// Builds the authorization URL a visitor is redirected to.
///
/// `state` travels opaquely through the provider and comes back on the
/// redirect, which is how the completion callback recovers the slot id.
pub fn build_authorization_url(
    config: &GoogleConfig,
    scope: &str,
    state: &str,
) -> Result<String, serde_urlencoded::ser::Error> {
    let query = AuthUrlQuery {
        client_id: &config.client_id,
        redirect_uri: &config.redirect_uri,
        response_type: "code",
        scope,
        access_type: "offline",
        state,
    };

    Ok(format!(
        "{}?{}",
        AUTH_ENDPOINT,
        serde_urlencoded::to_string(&query)?
    ))
}

/// Builds a calendar hub authenticated with a visitor's access token.
pub async fn create_calendar_hub(
    access_token: &str,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let auth = AccessTokenAuthenticator::builder(access_token.to_string())
        .build()
        .await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    // Create client without specifying body type
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let hub = CalendarHub::new(client, auth);

    Ok(hub)
}
