use portfolio_api::config::{
    ContactConfig, HttpConfig, MongoConfig, PortfolioConfig, SmtpConfig,
};
use portfolio_api::services::{Mailer, MockMailer, PortfolioDb};
use portfolio_api::startup::Application;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mailer: Arc<MockMailer>,
    pub db: PortfolioDb,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // Use random port for testing (port 0)
        let config = PortfolioConfig {
            http: HttpConfig { port: 0 },
            mongodb: MongoConfig {
                uri: std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: format!("portfolio_test_{}", uuid::Uuid::new_v4().simple()),
            },
            smtp: SmtpConfig {
                host: "smtp.test.local".to_string(),
                port: 587,
                user: "test".to_string(),
                password: "test".to_string(),
                from_email: "test@example.com".to_string(),
                enabled: false,
            },
            contact: ContactConfig {
                receiver: "owner@example.com".to_string(),
                from_name: "Portfolio Contact".to_string(),
            },
        };

        let mailer = Arc::new(MockMailer::new());
        let app = Application::build_with_mailer(config, mailer.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let db = app.db().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept requests. The root endpoint never
        // touches the store, so this works without a running MongoDB.
        let client = reqwest::Client::new();
        let root_url = format!("{}/", address);
        for _ in 0..50 {
            if client.get(&root_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            mailer,
            db,
        }
    }
}

/// Listing tests need a live MongoDB; they are skipped unless the environment
/// points at one.
pub fn mongo_available() -> bool {
    std::env::var("TEST_MONGODB_URI").is_ok()
}
