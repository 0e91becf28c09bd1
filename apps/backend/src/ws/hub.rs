use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::state::PlayerId;
use crate::services::notify::NotificationSink;
use crate::ws::protocol::ServerMsg;

/// A message pushed to one connected player.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct HubEvent(pub ServerMsg);

/// Live push channels keyed by player.
#[derive(Default)]
pub struct PushHub {
    connections: DashMap<PlayerId, Recipient<HubEvent>>,
}

impl PushHub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, player: PlayerId, recipient: Recipient<HubEvent>) {
        self.connections.insert(player, recipient);
        debug!(player_id = %player, connections = self.connections.len(), "Push channel registered");
    }

    pub fn unregister(&self, player: PlayerId) {
        self.connections.remove(&player);
        debug!(player_id = %player, connections = self.connections.len(), "Push channel removed");
    }

    pub fn is_connected(&self, player: PlayerId) -> bool {
        self.connections.contains_key(&player)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl NotificationSink for PushHub {
    fn deliver(&self, player: PlayerId, msg: &ServerMsg) -> bool {
        let Some(recipient) = self.connections.get(&player).map(|r| r.value().clone()) else {
            return false;
        };
        recipient.try_send(HubEvent(msg.clone())).is_ok()
    }
}
