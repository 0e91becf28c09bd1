//! Card rule classifier: the three predicates the pot engine's special cases
//! are built on.

use super::cards_types::{Card, Rank, Suit};

pub fn is_joker(card: &Card) -> bool {
    matches!(card, Card::Joker(_))
}

pub fn is_three_of_spades(card: &Card) -> bool {
    matches!(
        card,
        Card::Standard {
            rank: Rank::Three,
            suit: Suit::Spades
        }
    )
}

pub fn is_rank_eight(card: &Card) -> bool {
    matches!(
        card,
        Card::Standard {
            rank: Rank::Eight,
            ..
        }
    )
}

pub fn is_three_of_diamonds(card: &Card) -> bool {
    matches!(
        card,
        Card::Standard {
            rank: Rank::Three,
            suit: Suit::Diamonds
        }
    )
}

// Token-level variants. Malformed tokens classify as false for everything.

pub fn token_is_joker(token: &str) -> bool {
    token.parse::<Card>().is_ok_and(|c| is_joker(&c))
}

pub fn token_is_three_of_spades(token: &str) -> bool {
    token.parse::<Card>().is_ok_and(|c| is_three_of_spades(&c))
}

pub fn token_is_rank_eight(token: &str) -> bool {
    token.parse::<Card>().is_ok_and(|c| is_rank_eight(&c))
}
