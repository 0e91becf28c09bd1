//! Play validation: every played card must be in the hand, with multiplicity.

use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Check that `play` can be taken out of `hand` without mutating anything.
///
/// An empty play (a pass) is always valid.
pub fn check_cards_in_hand(hand: &[Card], play: &[Card]) -> Result<(), DomainError> {
    let mut scratch = hand.to_vec();
    take_cards(&mut scratch, play)
}

/// Remove each played card from `hand` exactly once.
///
/// On error the hand is left untouched.
pub fn remove_played_cards(hand: &mut Vec<Card>, play: &[Card]) -> Result<(), DomainError> {
    let mut scratch = hand.clone();
    take_cards(&mut scratch, play)?;
    *hand = scratch;
    Ok(())
}

fn take_cards(hand: &mut Vec<Card>, play: &[Card]) -> Result<(), DomainError> {
    for card in play {
        let Some(pos) = hand.iter().position(|c| c == card) else {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("Card {card} not in hand"),
            ));
        };
        hand.remove(pos);
    }
    Ok(())
}
