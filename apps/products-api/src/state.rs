//! State shared across the API surface

use mongodb::{Client, Database};

use crate::config::Config;

/// Handles every route needs: settings plus the Mongo client and the
/// working database derived from it
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    /// Build the state, deriving the working database handle from the
    /// configured database name
    pub fn new(config: Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(&config.mongodb.database);
        Self {
            config,
            mongo_client,
            db,
        }
    }
}
