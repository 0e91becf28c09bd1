use std::sync::Arc;

use crate::config::server::ServerConfig;
use crate::domain::dealing::{Dealer, ShuffleDealer};
use crate::services::game_flow::GameFlowService;
use crate::services::notify::NotificationSink;
use crate::services::sessions::SessionStore;
use crate::ws::hub::PushHub;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub sessions: Arc<SessionStore>,
    /// Websocket push channels
    pub hub: Arc<PushHub>,
    pub flow: Arc<GameFlowService>,
}

impl AppState {
    /// Production state: shuffled deals (seeded when configured) pushed
    /// through the websocket hub.
    pub fn new(config: ServerConfig) -> Self {
        let dealer: Arc<dyn Dealer> = match config.deal_seed {
            Some(seed) => Arc::new(ShuffleDealer::seeded(seed)),
            None => Arc::new(ShuffleDealer::from_entropy()),
        };
        Self::with_dealer(config, dealer)
    }

    pub fn with_dealer(config: ServerConfig, dealer: Arc<dyn Dealer>) -> Self {
        let hub = Arc::new(PushHub::new());
        let sink: Arc<dyn NotificationSink> = hub.clone();
        Self::build(config, dealer, hub, sink)
    }

    /// Route notifications to `sink` instead of the websocket hub.
    pub fn with_sink(
        config: ServerConfig,
        dealer: Arc<dyn Dealer>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::build(config, dealer, Arc::new(PushHub::new()), sink)
    }

    fn build(
        config: ServerConfig,
        dealer: Arc<dyn Dealer>,
        hub: Arc<PushHub>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new());
        let flow = Arc::new(GameFlowService::new(sessions.clone(), dealer, sink));
        Self {
            config,
            sessions,
            hub,
            flow,
        }
    }
}
