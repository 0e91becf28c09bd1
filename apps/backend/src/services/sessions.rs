//! Registry of live sessions keyed by room id.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::state::Session;
use crate::errors::domain::{DomainError, NotFoundKind};

/// One room's session behind its own lock. Sessions never share a lock.
pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<i64, SharedSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, room_id: i64) -> SharedSession {
        self.sessions
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())))
            .clone()
    }

    pub fn get(&self, room_id: i64) -> Option<SharedSession> {
        self.sessions.get(&room_id).map(|entry| entry.value().clone())
    }

    pub fn require(&self, room_id: i64) -> Result<SharedSession, DomainError> {
        self.get(room_id).ok_or_else(|| room_not_found(room_id))
    }

    /// Drop the room only while it still maps to `shared`. A room id that has
    /// already been re-created for a new table is left alone.
    pub fn remove_if_same(&self, room_id: i64, shared: &SharedSession) -> bool {
        self.sessions
            .remove_if(&room_id, |_, current| Arc::ptr_eq(current, shared))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

pub fn room_not_found(room_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
}
