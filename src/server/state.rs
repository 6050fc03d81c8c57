use axum::extract::FromRef;

use crate::catalog::CatalogIndex;
use crate::game::GameService;
use crate::playlist::PlaylistRegistry;
use crate::preview::PreviewLookup;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedGameService = Arc<GameService>;
pub type GuardedCatalog = Arc<CatalogIndex>;
pub type GuardedPlaylists = Arc<PlaylistRegistry>;
pub type GuardedPreviewLookup = Arc<dyn PreviewLookup>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub game_service: GuardedGameService,
}

impl ServerState {
    pub fn new(config: ServerConfig, game_service: GuardedGameService) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            game_service,
        }
    }
}

impl FromRef<ServerState> for GuardedGameService {
    fn from_ref(input: &ServerState) -> Self {
        input.game_service.clone()
    }
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.game_service.catalog().clone()
    }
}

impl FromRef<ServerState> for GuardedPlaylists {
    fn from_ref(input: &ServerState) -> Self {
        input.game_service.playlists().clone()
    }
}

impl FromRef<ServerState> for GuardedPreviewLookup {
    fn from_ref(input: &ServerState) -> Self {
        input.game_service.preview().clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
