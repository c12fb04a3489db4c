use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt::time::LocalTime, EnvFilter};

use crate::{app_state::AppState, domain::search::SearchError};

mod app_state;
mod config;
mod domain;
mod factory;
mod router;
mod routes;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("Failed to read configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Failed to open artifact index: {0}")]
    Index(#[from] SearchError),
    #[error("Failed to create repository client: {0}")]
    Client(#[from] maven_repo::FetchError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_timer(LocalTime::rfc_3339())
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("artifind_api=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let settings = config::read_config()?;

    let index = factory::open_index(&settings.index).await?;
    let repository_client = factory::repository_client(&settings.repository)?;
    let app_state = AppState::new(index.clone(), (&settings.search).into(), repository_client);

    let app = router::create(app_state);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        "Listening on {} with {:?} index",
        listener.local_addr()?,
        settings.index.backend
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    index.close().await;
    tracing::info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
