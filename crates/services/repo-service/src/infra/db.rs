//! Document store connection management.

use bson::doc;
use mongodb::{Client, Database as MongoDatabase};

/// Store wrapper for connection management
#[derive(Clone)]
pub struct Database {
    database: MongoDatabase,
}

impl Database {
    /// Connect to the document store and verify connectivity.
    pub async fn connect(url: &str, name: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(name);

        // Fail fast on an unreachable store
        database.run_command(doc! { "ping": 1 }).await?;
        tracing::info!("Connected to document store");

        Ok(Self { database })
    }

    /// Get a handle to the underlying database.
    pub fn get_database(&self) -> MongoDatabase {
        self.database.clone()
    }
}
