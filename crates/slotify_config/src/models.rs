// --- File: crates/slotify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via APP_DATABASE__URL or DATABASE_URL
}

// --- Google Calendar Config ---
// Holds the OAuth2 client registration used for the booking flow.
// The client secret is normally supplied via APP_GOOGLE__CLIENT_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI registered with the provider; the booking-completion
    /// endpoint of this service.
    pub redirect_uri: String,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

// --- Schedule Config ---
// Tuning for the schedule core: the single service time zone and the two
// sweep cadences.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleConfig {
    /// IANA zone all wall-clock inputs are resolved in
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_slot_sweep_interval")]
    pub slot_sweep_interval_minutes: u64,
    /// Wall-clock HH:MM (in `time_zone`) at which the daily availability
    /// sweep runs
    #[serde(default = "default_availability_sweep_time")]
    pub availability_sweep_time: String,
}

fn default_time_zone() -> String {
    "Asia/Kolkata".to_string()
}

fn default_slot_sweep_interval() -> u64 {
    15
}

fn default_availability_sweep_time() -> String {
    "23:59".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            slot_sweep_interval_minutes: default_slot_sweep_interval(),
            availability_sweep_time: default_availability_sweep_time(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Missing Google config is a fatal startup condition for the booking
    /// flow, checked once at wiring time rather than per request.
    #[serde(default)]
    pub google: Option<GoogleConfig>,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}
