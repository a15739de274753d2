use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upkeep_api::config::ServerConfig;
use upkeep_api::router::build_app_router;
use upkeep_api::state::AppState;
use upkeep_core::clock::{Clock, SystemClock};
use upkeep_events::{
    EmailConfig, EmailDelivery, PgReminderStore, ReminderConfig, ReminderScanner,
    ReminderScheduler,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "upkeep_api=debug,upkeep_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = upkeep_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    upkeep_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    upkeep_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // --- AMC reminder scheduler ---
    let reminder_cancel = CancellationToken::new();
    let reminder_handle = match EmailConfig::from_env() {
        Some(email_config) => {
            let reminder_config = ReminderConfig::from_env();
            if reminder_config.staff_emails.is_empty() {
                tracing::warn!("REMINDER_STAFF_EMAILS is empty; reminders go to customers only");
            }
            let scanner = ReminderScanner::new(
                PgReminderStore::new(pool.clone()),
                EmailDelivery::new(email_config),
                Arc::clone(&clock),
                reminder_config.staff_emails,
            );
            let scheduler = ReminderScheduler::new(scanner, reminder_config.run_at);
            let cancel = reminder_cancel.clone();
            Some(tokio::spawn(async move {
                scheduler.run(cancel).await;
            }))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; AMC reminder scheduler disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock,
        reminders_enabled: reminder_handle.is_some(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    reminder_cancel.cancel();
    if let Some(handle) = reminder_handle {
        let timeout = Duration::from_secs(config.shutdown_timeout_secs);
        if tokio::time::timeout(timeout, handle).await.is_err() {
            tracing::warn!("AMC reminder scheduler did not stop in time");
        } else {
            tracing::info!("AMC reminder scheduler stopped");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
