// --- File: crates/services/slotify_backend/src/app_state.rs ---
use chrono_tz::Tz;
use slotify_common::error::config_error;
use slotify_common::services::{BoxedError, CalendarClient};
use slotify_config::AppConfig;
use slotify_db::{
    AvailabilityRepository, DbClient, HostRepository, SlotRepository, SqlAvailabilityRepository,
    SqlHostRepository, SqlSlotRepository,
};
use slotify_gcal::GoogleCalendarClient;
use slotify_schedule::{ExpirationSweeper, ScheduleService, ScheduleSettings};
use std::error::Error;
use std::sync::Arc;
use tracing::info;

/// The concrete schedule service this binary wires together.
pub type SqlScheduleService =
    ScheduleService<SqlAvailabilityRepository, SqlSlotRepository, SqlHostRepository>;

/// Application state shared across routes and the sweeper.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub schedule_service: Arc<SqlScheduleService>,
    pub sweeper: Arc<ExpirationSweeper<SqlAvailabilityRepository, SqlSlotRepository>>,
}

impl AppState {
    /// Wire repositories, the calendar client and the schedule core.
    ///
    /// Startup is the one place configuration gaps are fatal: a missing
    /// Google section or an unknown time zone aborts here instead of
    /// failing per request later.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let db_client = DbClient::new(&config).await?;

        let availabilities = SqlAvailabilityRepository::new(db_client.clone());
        let slots = SqlSlotRepository::new(db_client.clone());
        let hosts = SqlHostRepository::new(db_client);

        availabilities.init_schema().await?;
        slots.init_schema().await?;
        hosts.init_schema().await?;

        let google = config.google.clone().ok_or_else(|| {
            config_error("Google configuration is missing; the booking flow cannot start")
        })?;
        let time_zone: Tz = config
            .schedule
            .time_zone
            .parse()
            .map_err(|e| config_error(format!("Invalid schedule time zone: {e}")))?;

        let calendar: Arc<dyn CalendarClient<Error = BoxedError>> =
            Arc::new(GoogleCalendarClient::new(google.clone()));

        let schedule_service = Arc::new(ScheduleService::new(
            availabilities.clone(),
            slots.clone(),
            hosts,
            calendar,
            ScheduleSettings {
                time_zone,
                calendar_id: google.calendar_id,
            },
        ));

        let sweeper = Arc::new(ExpirationSweeper::new(availabilities, slots));

        info!("Application state initialized");
        Ok(Self {
            config,
            schedule_service,
            sweeper,
        })
    }
}
