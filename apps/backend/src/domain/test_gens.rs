// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::dealing::full_deck;
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

/// Any of the 54 cards, jokers included.
pub fn card() -> impl Strategy<Value = Card> {
    prop::sample::select(full_deck())
}

/// A non-joker card whose rank is not eight.
pub fn plain_card() -> impl Strategy<Value = Card> {
    let ranks: Vec<Rank> = Rank::ALL
        .into_iter()
        .filter(|r| *r != Rank::Eight)
        .collect();
    (prop::sample::select(ranks), suit()).prop_map(|(rank, suit)| Card::new(rank, suit))
}

/// Between 1 and 4 distinct cards.
pub fn small_play() -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(full_deck(), 1..=4)
}

/// A sequence of choices used to drive a session: `0` passes, anything else
/// selects a card from the current player's hand.
pub fn play_script(len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), len)
}
