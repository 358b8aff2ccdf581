// --- File: crates/slotify_config/src/lib.rs ---
//! Configuration loading for Slotify.
//!
//! Configuration is layered: `config/default.*` (any format the `config`
//! crate understands), then an optional `config/{RUN_ENV}.*` overlay, then
//! `APP`-prefixed environment variables (`APP_SERVER__PORT`,
//! `APP_GOOGLE__CLIENT_SECRET`, ...). A `.env` file is honored in
//! development via dotenv.

pub mod models;

pub use models::{AppConfig, DatabaseConfig, GoogleConfig, ScheduleConfig, ServerConfig};

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;

static DOTENV: Once = Once::new();

/// Loads `.env` into the process environment exactly once.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        // missing .env is fine; deployments set real env vars
        let _ = dotenv::dotenv();
    });
}

/// Loads the application configuration.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_defaults_apply() {
        let schedule = ScheduleConfig::default();
        assert_eq!(schedule.slot_sweep_interval_minutes, 15);
        assert_eq!(schedule.availability_sweep_time, "23:59");
        assert_eq!(schedule.time_zone, "Asia/Kolkata");
    }

    #[test]
    fn app_config_deserializes_without_optional_sections() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"host": "127.0.0.1", "port": 8086}}"#,
        )
        .unwrap();
        assert!(config.database.is_none());
        assert!(config.google.is_none());
        assert_eq!(config.schedule.slot_sweep_interval_minutes, 15);
    }
}
