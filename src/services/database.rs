use crate::error::AppError;
use mongodb::{
    bson::{doc, Document},
    Client as MongoClient, Collection, Database,
};

/// Handle to the portfolio document store.
///
/// Built once at startup and cloned into the router state. The driver
/// establishes connections lazily, so a bad URI only surfaces on first use.
#[derive(Clone)]
pub struct PortfolioDb {
    client: MongoClient,
    db: Database,
}

impl PortfolioDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    /// Documents are opaque; no schema is imposed on any collection.
    pub fn projects(&self) -> Collection<Document> {
        self.db.collection("projects")
    }

    pub fn experience(&self) -> Collection<Document> {
        self.db.collection("experience")
    }

    pub fn blogs(&self) -> Collection<Document> {
        self.db.collection("blogs")
    }
}
