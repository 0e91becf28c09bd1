//! Pot/trick engine: the shared pile of plays since the last clear, and the
//! rules that clear it and pass the turn.

use serde::Serialize;

use crate::domain::cards_logic::{is_joker, is_rank_eight, is_three_of_spades};
use crate::domain::rules::{pass_clear_threshold, REVOLUTION_SIZE};
use crate::domain::state::PlayerId;
use crate::domain::Card;

/// Ordered plays since the pot was last cleared. An empty play is a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Pot {
    plays: Vec<Vec<Card>>,
}

impl Pot {
    pub fn plays(&self) -> &[Vec<Card>] {
        &self.plays
    }

    pub fn push(&mut self, play: Vec<Card>) {
        self.plays.push(play);
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn card_count(&self) -> usize {
        self.plays.iter().map(Vec::len).sum()
    }

    /// Most recent play that is not a pass.
    pub fn last_non_pass(&self) -> Option<&[Card]> {
        self.plays
            .iter()
            .rev()
            .find(|p| !p.is_empty())
            .map(Vec::as_slice)
    }

    /// Length of the longest contiguous run of passes.
    pub fn longest_pass_run(&self) -> usize {
        let mut longest = 0;
        let mut run = 0;
        for play in &self.plays {
            if play.is_empty() {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 0;
            }
        }
        longest
    }

    /// Empty the pot, returning every card that was in it.
    pub fn drain_cards(&mut self) -> Vec<Card> {
        self.plays.drain(..).flatten().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearReason {
    /// The play contained an eight.
    Eight,
    /// A lone three of spades answered a lone joker.
    ThreeOfSpadesOverJoker,
    /// Everyone else passed.
    AllPassed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotDecision {
    pub cleared: Option<ClearReason>,
    /// Cards removed from the pot by a clear.
    pub swept: Vec<Card>,
    pub next_turn: PlayerId,
}

/// True when a play of this size is a revolution.
pub fn is_revolution(play: &[Card]) -> bool {
    play.len() == REVOLUTION_SIZE
}

/// Whether `play` triggers a clear that lets the same player lead again.
///
/// `previous` is the most recent non-pass play already in the pot.
pub fn special_clear(play: &[Card], previous: Option<&[Card]>) -> Option<ClearReason> {
    if play.iter().any(is_rank_eight) {
        return Some(ClearReason::Eight);
    }
    let lone_three_of_spades = matches!(play, [c] if is_three_of_spades(c));
    let after_lone_joker = matches!(previous, Some([c]) if is_joker(c));
    if lone_three_of_spades && after_lone_joker {
        return Some(ClearReason::ThreeOfSpadesOverJoker);
    }
    None
}

/// Player after `player` in rotation, wrapping around.
pub fn next_in_rotation(turn_order: &[PlayerId], player: PlayerId) -> Option<PlayerId> {
    if turn_order.is_empty() {
        return None;
    }
    let idx = turn_order.iter().position(|p| *p == player)?;
    Some(turn_order[(idx + 1) % turn_order.len()])
}

/// Record `player`'s play and apply the clearing rules.
///
/// Only for plays that did not empty the player's hand; finishing plays are
/// resolved by the round state machine instead.
pub fn decide(
    pot: &mut Pot,
    turn_order: &[PlayerId],
    player: PlayerId,
    play: Vec<Card>,
) -> PotDecision {
    let special = special_clear(&play, pot.last_non_pass());
    pot.push(play);

    if let Some(reason) = special {
        return PotDecision {
            cleared: Some(reason),
            swept: pot.drain_cards(),
            next_turn: player,
        };
    }

    let next_turn = next_in_rotation(turn_order, player).unwrap_or(player);

    if pot.longest_pass_run() >= pass_clear_threshold(turn_order.len()) {
        return PotDecision {
            cleared: Some(ClearReason::AllPassed),
            swept: pot.drain_cards(),
            next_turn,
        };
    }

    PotDecision {
        cleared: None,
        swept: Vec::new(),
        next_turn,
    }
}
