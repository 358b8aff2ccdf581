// File: services/slotify_backend/src/main.rs
mod app_state;

use app_state::AppState;
use axum::{routing::get, Router};
use chrono::NaiveTime;
use slotify_config::load_config;
use slotify_schedule::routes as schedule_routes;
use slotify_schedule::{SweeperConfig, SweeperHandles};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

fn spawn_sweeper(state: &AppState) -> SweeperHandles {
    let schedule = &state.config.schedule;

    let availability_sweep_time =
        NaiveTime::parse_from_str(&schedule.availability_sweep_time, "%H:%M")
            .expect("Invalid availability_sweep_time (expected HH:MM)");
    let time_zone = schedule
        .time_zone
        .parse()
        .expect("Invalid schedule time zone");

    state.sweeper.clone().spawn(SweeperConfig {
        slot_sweep_interval: Duration::from_secs(schedule.slot_sweep_interval_minutes * 60),
        time_zone,
        availability_sweep_time,
    })
}

#[tokio::main]
async fn main() {
    slotify_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let state = AppState::new(config.clone())
        .await
        .expect("Failed to initialize application state");

    // Both sweep loops run detached for the lifetime of the process
    let _sweeper_handles = spawn_sweeper(&state);

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Slotify API!" }))
        .merge(schedule_routes::routes(state.schedule_service.clone()));

    #[allow(unused_mut)]
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use slotify_schedule::doc::ScheduleApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Slotify API",
                version = "0.1.0",
                description = "Slotify Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Slotify", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(ScheduleApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
