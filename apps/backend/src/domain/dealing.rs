//! Deck service: shuffles the 54-card deck and splits it into four hands.

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::{DECK_SIZE, HAND_SIZES, PLAYERS};
use crate::domain::{Card, JokerColor, Rank, Suit};

/// Generate the full 54-card deck in canonical order (suits, then jokers).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck.push(Card::Joker(JokerColor::Black));
    deck.push(Card::Joker(JokerColor::Red));
    deck
}

/// Shuffle the full deck and deal hands of sizes 14, 13, 14, 13.
///
/// Hands are sorted for convenience.
pub fn deal_hands<R: Rng + ?Sized>(rng: &mut R) -> [Vec<Card>; PLAYERS] {
    let mut deck = full_deck();
    deck.shuffle(rng);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    let mut start = 0;
    for (hand_slot, size) in hands.iter_mut().zip(HAND_SIZES) {
        let mut hand = deck[start..start + size].to_vec();
        hand.sort();
        *hand_slot = hand;
        start += size;
    }
    hands
}

/// Source of freshly shuffled, disjoint hands.
pub trait Dealer: Send + Sync {
    fn deal(&self) -> [Vec<Card>; PLAYERS];
}

/// Production dealer backed by a ChaCha stream.
pub struct ShuffleDealer {
    rng: Mutex<ChaCha20Rng>,
}

impl ShuffleDealer {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_rng(&mut rand::rng())),
        }
    }

    /// Reproducible deals for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl Dealer for ShuffleDealer {
    fn deal(&self) -> [Vec<Card>; PLAYERS] {
        let mut rng = self.rng.lock();
        deal_hands(&mut *rng)
    }
}

/// Dealer that hands out predetermined deals in order, then repeats the last.
pub struct FixedDealer {
    deals: Mutex<Vec<[Vec<Card>; PLAYERS]>>,
}

impl FixedDealer {
    pub fn new(deals: Vec<[Vec<Card>; PLAYERS]>) -> Self {
        Self {
            deals: Mutex::new(deals),
        }
    }
}

impl Dealer for FixedDealer {
    fn deal(&self) -> [Vec<Card>; PLAYERS] {
        let mut deals = self.deals.lock();
        if deals.len() > 1 {
            deals.remove(0)
        } else {
            deals.first().cloned().unwrap_or_default()
        }
    }
}
