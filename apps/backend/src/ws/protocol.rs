use serde::Serialize;

use crate::domain::pot::ClearReason;
use crate::domain::round::PlayOutcome;
use crate::domain::state::{FinishingOrder, HandCount, PlayerId};
use crate::domain::Card;

/// Reason sent with `game_ended` when a seated player drops.
pub const REASON_PLAYER_DISCONNECTED: &str = "player_disconnected";

/// Public result of one accepted play, broadcast to the whole room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayBroadcast {
    pub round_no: u32,
    pub player_id: PlayerId,
    pub cards: Vec<Card>,
    pub pot: Vec<Vec<Card>>,
    pub pot_cleared: Option<ClearReason>,
    pub next_turn: Option<PlayerId>,
    pub hand_counts: Vec<HandCount>,
    pub last_non_pass: Option<Vec<Card>>,
    pub revolution: bool,
    pub finished: bool,
    /// Set when this play ended the round.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_ended: Option<FinishingOrder>,
}

impl From<&PlayOutcome> for PlayBroadcast {
    fn from(out: &PlayOutcome) -> Self {
        Self {
            round_no: out.round_no,
            player_id: out.player,
            cards: out.cards.clone(),
            pot: out.pot.plays().to_vec(),
            pot_cleared: out.pot_cleared,
            next_turn: out.next_turn,
            hand_counts: out.hand_counts.clone(),
            last_non_pass: out.last_non_pass.clone(),
            revolution: out.revolution,
            finished: out.finished,
            round_ended: out.round_end.as_ref().map(|e| e.finishing_order.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Welcome {
        room_id: i64,
        player_id: PlayerId,
        /// Join position, 0-based.
        seat: usize,
        players: usize,
    },

    RoundStarted {
        round_no: u32,
        hand: Vec<Card>,
        turn_order: Vec<PlayerId>,
        turn: Option<PlayerId>,
        exchange_open: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        partner: Option<PlayerId>,
    },

    PlayMade(PlayBroadcast),

    RoundEnded {
        round_no: u32,
        finishing_order: FinishingOrder,
    },

    ExchangeWaiting {
        partner: PlayerId,
    },

    ExchangeCompleted {
        partner: PlayerId,
        hand: Vec<Card>,
    },

    GameEnded {
        reason: String,
    },

    Announcement {
        message: String,
    },

    Error {
        code: String,
        message: String,
    },
}

impl ServerMsg {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMsg::Welcome { .. } => "welcome",
            ServerMsg::RoundStarted { .. } => "round_started",
            ServerMsg::PlayMade(_) => "play_made",
            ServerMsg::RoundEnded { .. } => "round_ended",
            ServerMsg::ExchangeWaiting { .. } => "exchange_waiting",
            ServerMsg::ExchangeCompleted { .. } => "exchange_completed",
            ServerMsg::GameEnded { .. } => "game_ended",
            ServerMsg::Announcement { .. } => "announcement",
            ServerMsg::Error { .. } => "error",
        }
    }
}
