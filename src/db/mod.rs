use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{config::Config, errors::AppResult};

/// Shared MongoDB handle. Cheap to clone; all repositories borrow it to
/// resolve their collections.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    /// Connects and pings the deployment so a bad connection string fails
    /// at startup instead of on the first reconciliation read.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.app_name = Some("avalia-scores".to_string());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.max_pool_size = Some(10);
        options.min_pool_size = Some(2);
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("Connected to MongoDB database '{}'", config.mongo_db_name);

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
