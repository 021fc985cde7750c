use anyhow::Context;
use storage::Database;
use storage::services::spacing::SpacingPolicy;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use features::{schedule, shows};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        schedule::handlers::generate_draft,
        schedule::handlers::confirm_schedule,
        schedule::handlers::get_schedule,
        shows::handlers::classes_by_date,
    ),
    components(
        schemas(
            storage::dto::schedule::HorseRef,
            storage::dto::schedule::ScheduledRider,
            storage::dto::schedule::ScheduledJudge,
            storage::dto::schedule::ScheduledClass,
            storage::dto::schedule::ScheduledRing,
            storage::dto::schedule::ConfirmScheduleRequest,
            storage::dto::schedule::ConfirmScheduleResponse,
            storage::dto::schedule::DraftRing,
            storage::dto::schedule::SharedEntry,
            storage::dto::schedule::ConflictReport,
            storage::dto::schedule::ScheduleDraft,
            storage::dto::schedule::ScheduleView,
            storage::dto::schedule::ClassesByDate,
            storage::dto::schedule::ClassesByDateResponse,
        )
    ),
    tags(
        (name = "schedule", description = "Schedule generation and confirmation"),
        (name = "shows", description = "Show day views for administrators"),
    )
)]
pub struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting show scheduling API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let spacing = SpacingPolicy {
        min_rest_minutes: config.min_rest_minutes,
    };
    tracing::info!(
        min_rest_minutes = spacing.min_rest_minutes,
        "Rest window between starts"
    );

    let app = routes::create_router(AppState::new(db, spacing));

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
