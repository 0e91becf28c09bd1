use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::exchange::ExchangeBook;
use crate::domain::pot::Pot;
use crate::domain::Card;
use crate::errors::domain::DomainError;

/// Stable player identity assigned by the connection layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Finishing order for one round, position → player.
///
/// `None` marks a reserved slot that has not been resolved yet.
pub type FinishingOrder = Vec<Option<PlayerId>>;

/// Remaining cards held by one player.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct HandCount {
    pub player_id: PlayerId,
    pub cards: usize,
}

/// Overall session progression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fewer than four players have joined.
    AwaitingPlayers,
    /// Cards are dealt and plays are accepted.
    InRound,
    /// The session is over; nothing more is accepted.
    GameEnd,
}

/// Aggregate root for one room's game.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    /// Players in join order; also the deal order.
    pub players: Vec<PlayerId>,
    /// 1-based; incremented on every round end.
    pub round_no: u32,
    /// One finishing order per round, indexed by `round_no - 1`.
    pub round_results: Vec<FinishingOrder>,
    /// Rotation for the current round; shrinks as players finish.
    pub turn_order: Vec<PlayerId>,
    /// Player authorized to submit the next play.
    /// - Some(player) while a round is in progress
    /// - None once the turn order empties, or before the first deal
    pub turn: Option<PlayerId>,
    pub pot: Pot,
    pub hands: HashMap<PlayerId, Vec<Card>>,
    /// Pending exchange submissions, keyed by the giving player.
    pub exchange: ExchangeBook,
    /// Cards swept out of the pot by clears during the current round.
    pub discard: Vec<Card>,
    /// Plays (including passes) accepted since the current round was dealt.
    pub plays_this_round: u32,
    /// Set once the room has been unregistered. A caller that raced the
    /// removal and locked a closed session must look the room up again.
    pub closed: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingPlayers,
            players: Vec::with_capacity(4),
            round_no: 1,
            round_results: Vec::new(),
            turn_order: Vec::new(),
            turn: None,
            pot: Pot::default(),
            hands: HashMap::new(),
            exchange: ExchangeBook::default(),
            discard: Vec::new(),
            plays_this_round: 0,
            closed: false,
        }
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub fn require_player(&self, player: PlayerId) -> Result<(), DomainError> {
        if self.has_player(player) {
            Ok(())
        } else {
            Err(DomainError::unknown_player(format!(
                "Player {player} is not part of this session"
            )))
        }
    }

    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.hands.get(&player).map(Vec::as_slice)
    }

    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    pub fn finishing_order(&self, round_no: u32) -> Option<&FinishingOrder> {
        let idx = usize::try_from(round_no).ok()?.checked_sub(1)?;
        self.round_results.get(idx)
    }

    /// Round 1's finishing order once all four positions are resolved.
    pub fn base_order(&self) -> Option<Vec<PlayerId>> {
        let first = self.round_results.first()?;
        if first.len() != self.players.len() {
            return None;
        }
        first.iter().copied().collect()
    }

    /// The round-1 winner, once known.
    pub fn champion(&self) -> Option<PlayerId> {
        self.round_results.first()?.first().copied().flatten()
    }

    /// Remaining card count per player, in join order.
    pub fn hand_counts(&self) -> Vec<HandCount> {
        self.players
            .iter()
            .map(|p| HandCount {
                player_id: *p,
                cards: self.hands.get(p).map_or(0, Vec::len),
            })
            .collect()
    }

    /// Cards across hands, pot, and discard. 54 whenever a round is dealt.
    pub fn card_total(&self) -> usize {
        self.hands.values().map(Vec::len).sum::<usize>()
            + self.pot.card_count()
            + self.discard.len()
    }
}
