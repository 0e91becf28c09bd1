//! Public snapshot API for observing session state without exposing other
//! players' hands.

use serde::Serialize;

use crate::domain::state::{FinishingOrder, HandCount, Phase, PlayerId, Session};
use crate::domain::Card;

/// One player's view of a session. Building it never mutates anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub round_no: u32,
    pub players: Vec<PlayerId>,
    pub turn: Option<PlayerId>,
    pub turn_order: Vec<PlayerId>,
    pub round_results: Vec<FinishingOrder>,
    pub pot: Vec<Vec<Card>>,
    pub last_non_pass: Option<Vec<Card>>,
    pub hand_counts: Vec<HandCount>,
    /// The viewer's own hand; absent for spectators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
    pub exchange_pending: bool,
}

pub fn snapshot(session: &Session, viewer: Option<PlayerId>) -> SessionSnapshot {
    SessionSnapshot {
        phase: session.phase,
        round_no: session.round_no,
        players: session.players.clone(),
        turn: session.turn,
        turn_order: session.turn_order.clone(),
        round_results: session.round_results.clone(),
        pot: session.pot.plays().to_vec(),
        last_non_pass: session.pot.last_non_pass().map(<[Card]>::to_vec),
        hand_counts: session.hand_counts(),
        hand: viewer.and_then(|p| session.hand(p)).map(<[Card]>::to_vec),
        exchange_pending: viewer.is_some_and(|p| session.exchange.has_submitted(p)),
    }
}
