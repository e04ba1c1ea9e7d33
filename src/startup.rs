//! Application startup and lifecycle management.

use crate::config::PortfolioConfig;
use crate::error::AppError;
use crate::handlers::{
    get_blog, health_check, list_blogs, list_experience, list_projects, root, submit_contact,
};
use crate::services::{Mailer, MockMailer, PortfolioDb, SmtpMailer};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state, constructed once and injected into the router.
#[derive(Clone)]
pub struct AppState {
    pub config: PortfolioConfig,
    pub db: PortfolioDb,
    pub mailer: Arc<dyn Mailer>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration, selecting the SMTP
    /// mailer when enabled and falling back to the mock otherwise.
    pub async fn build(config: PortfolioConfig) -> Result<Self, AppError> {
        let mailer: Arc<dyn Mailer> = if config.smtp.enabled {
            match SmtpMailer::new(config.smtp.clone(), config.contact.clone()) {
                Ok(mailer) => {
                    tracing::info!("SMTP mailer initialized");
                    Arc::new(mailer)
                }
                Err(e) => {
                    tracing::warn!("Failed to initialize SMTP mailer: {}. Using mock.", e);
                    Arc::new(MockMailer::new())
                }
            }
        } else {
            tracing::info!("SMTP disabled, using mock mailer");
            Arc::new(MockMailer::new())
        };

        Self::build_with_mailer(config, mailer).await
    }

    /// Build with an injected mailer. Used by the test suite to observe sends.
    pub async fn build_with_mailer(
        config: PortfolioConfig,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, AppError> {
        let db = PortfolioDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;

        let state = AppState {
            config: config.clone(),
            db,
            mailer,
        };

        // Port 0 binds a random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &PortfolioDb {
        &self.state.db
    }

    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(root))
            .route("/health", get(health_check))
            .route("/projects", get(list_projects))
            .route("/experience", get(list_experience))
            .route("/blogs", get(list_blogs))
            .route("/blogs/:id", get(get_blog))
            .route("/contact", post(submit_contact))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Self::router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
