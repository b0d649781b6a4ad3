//! Shared application state

use std::sync::Arc;

use crate::application::ports::outbound::SessionStorePort;
use crate::application::services::{SessionService, TrackerService};
use crate::domain::catalog::GameCatalog;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::JsonFileStore;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<GameCatalog>,
    pub session_service: SessionService,
    pub tracker_service: TrackerService,
}

impl AppState {
    pub async fn new(config: AppConfig, catalog: GameCatalog) -> Self {
        let catalog = Arc::new(catalog);

        let store: Arc<dyn SessionStorePort> = Arc::new(
            JsonFileStore::open(&config.data_file, catalog.default_game_id().clone()).await,
        );

        let session_service = SessionService::new(catalog.clone(), store.clone());
        let tracker_service = TrackerService::new(catalog.clone(), store);

        Self {
            config,
            catalog,
            session_service,
            tracker_service,
        }
    }
}
