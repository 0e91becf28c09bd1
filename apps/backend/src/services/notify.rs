//! Outbound notification plumbing between the service layer and the push
//! transport.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::state::PlayerId;
use crate::ws::protocol::ServerMsg;

/// Per-player push channel. Delivery is best-effort.
pub trait NotificationSink: Send + Sync {
    /// Returns false when the message could not be handed to the player.
    fn deliver(&self, player: PlayerId, msg: &ServerMsg) -> bool;
}

/// Messages prepared while a session is locked, sent after it is released.
#[derive(Debug, Default)]
pub struct Outbox {
    messages: Vec<(PlayerId, ServerMsg)>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, player: PlayerId, msg: ServerMsg) {
        self.messages.push((player, msg));
    }

    pub fn broadcast(&mut self, players: &[PlayerId], msg: &ServerMsg) {
        for player in players {
            self.push(*player, msg.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Deliver everything, returning how many messages were accepted.
    ///
    /// A failed recipient is logged and skipped.
    pub fn flush(self, room_id: i64, sink: &dyn NotificationSink) -> usize {
        let total = self.messages.len();
        let mut delivered = 0;
        for (player, msg) in self.messages {
            if sink.deliver(player, &msg) {
                delivered += 1;
            } else {
                warn!(room_id, player_id = %player, kind = msg.kind(), "Push delivery failed");
            }
        }
        debug!(room_id, delivered, total, "Outbox flushed");
        delivered
    }
}

/// Sink that keeps every message in memory. Used by tests and tools.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(PlayerId, ServerMsg)>>>,
    refuse: Arc<Mutex<Vec<PlayerId>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every delivery to `player` fail.
    pub fn refuse(&self, player: PlayerId) {
        self.refuse.lock().push(player);
    }

    pub fn sent(&self) -> Vec<(PlayerId, ServerMsg)> {
        self.sent.lock().clone()
    }

    pub fn sent_to(&self, player: PlayerId) -> Vec<ServerMsg> {
        self.sent
            .lock()
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, player: PlayerId, msg: &ServerMsg) -> bool {
        if self.refuse.lock().contains(&player) {
            return false;
        }
        self.sent.lock().push((player, msg.clone()));
        true
    }
}
