//! Exchange coordinator: round-1 finishers trade cards pairwise (1st with 4th,
//! 2nd with 3rd) at the start of rounds 2 and 3.

use std::collections::HashMap;

use crate::domain::play::{check_cards_in_hand, remove_played_cards};
use crate::domain::rules::{exchange_allowed_in_round, partner_index};
use crate::domain::state::{Phase, PlayerId, Session};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Pending submissions keyed by the giving player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeBook {
    pending: HashMap<PlayerId, Vec<Card>>,
}

impl ExchangeBook {
    pub fn get(&self, player: PlayerId) -> Option<&[Card]> {
        self.pending.get(&player).map(Vec::as_slice)
    }

    pub fn has_submitted(&self, player: PlayerId) -> bool {
        self.pending.contains_key(&player)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn record(&mut self, player: PlayerId, cards: Vec<Card>) {
        self.pending.insert(player, cards);
    }

    fn take(&mut self, player: PlayerId) -> Option<Vec<Card>> {
        self.pending.remove(&player)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Recorded; the partner has not submitted yet.
    Waiting { partner: PlayerId },
    /// Both sides submitted and the swap was applied. Hands are post-swap.
    Completed {
        player: PlayerId,
        player_hand: Vec<Card>,
        partner: PlayerId,
        partner_hand: Vec<Card>,
    },
}

/// Partner of `player` given round 1's complete finishing order.
pub fn partner_of(round1: &[PlayerId], player: PlayerId) -> Option<PlayerId> {
    let idx = round1.iter().position(|p| *p == player)?;
    partner_index(idx).and_then(|i| round1.get(i).copied())
}

fn invalid_phase(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidPhase, detail)
}

/// Record `player`'s cards to give and swap once the partner has submitted.
///
/// A re-submission before the partner replaces the earlier one. Rejections
/// leave hands and pending submissions untouched.
pub fn submit_exchange(
    session: &mut Session,
    player: PlayerId,
    cards: Vec<Card>,
) -> Result<ExchangeOutcome, DomainError> {
    session.require_player(player)?;

    if session.phase != Phase::InRound || !exchange_allowed_in_round(session.round_no) {
        return Err(invalid_phase(format!(
            "Exchange is only allowed at the start of rounds 2 and 3 (current round {})",
            session.round_no
        )));
    }

    let Some(round1) = session.base_order() else {
        return Err(invalid_phase("Round 1 results are not complete"));
    };
    let partner = partner_of(&round1, player)
        .ok_or_else(|| invalid_phase(format!("Player {player} has no exchange partner")))?;

    let mut player_hand = session.hand(player).unwrap_or_default().to_vec();
    check_cards_in_hand(&player_hand, &cards)?;

    let Some(partner_cards) = session.exchange.get(partner).map(<[Card]>::to_vec) else {
        session.exchange.record(player, cards);
        return Ok(ExchangeOutcome::Waiting { partner });
    };

    let mut partner_hand = session.hand(partner).unwrap_or_default().to_vec();
    remove_played_cards(&mut player_hand, &cards)?;
    remove_played_cards(&mut partner_hand, &partner_cards)?;
    player_hand.extend(partner_cards);
    partner_hand.extend(cards);
    player_hand.sort();
    partner_hand.sort();

    session.hands.insert(player, player_hand.clone());
    session.hands.insert(partner, partner_hand.clone());
    session.exchange.take(player);
    session.exchange.take(partner);

    Ok(ExchangeOutcome::Completed {
        player,
        player_hand,
        partner,
        partner_hand,
    })
}
