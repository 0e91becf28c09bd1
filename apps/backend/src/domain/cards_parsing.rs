//! Card parsing and formatting for the text encoding (e.g., "3D", "10H", "BJ").
//!
//! Encoding: a rank token `2`..`10`, `J`, `Q`, `K`, `A` followed by one suit
//! letter `C`, `D`, `H`, `S`; the jokers are `BJ` and `RJ`. Parsing ignores
//! case and surrounding whitespace and rejects everything else.

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, JokerColor, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn parse_error(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        match token.as_str() {
            "BJ" => return Ok(Card::Joker(JokerColor::Black)),
            "RJ" => return Ok(Card::Joker(JokerColor::Red)),
            _ => {}
        }

        // Every remaining valid token is ASCII, so byte slicing is safe once
        // we know the last char is a single-byte suit letter.
        if token.len() < 2 || !token.is_ascii() {
            return Err(parse_error(s));
        }
        let (rank_str, suit_str) = token.split_at(token.len() - 1);

        let rank = match rank_str {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(parse_error(s)),
        };
        let suit = match suit_str {
            "C" => Suit::Clubs,
            "D" => Suit::Diamonds,
            "H" => Suit::Hearts,
            "S" => Suit::Spades,
            _ => return Err(parse_error(s)),
        };
        Ok(Card::Standard { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Joker(JokerColor::Black) => f.write_str("BJ"),
            Card::Joker(JokerColor::Red) => f.write_str("RJ"),
            Card::Standard { rank, suit } => {
                let rank_str = match rank {
                    Rank::Two => "2",
                    Rank::Three => "3",
                    Rank::Four => "4",
                    Rank::Five => "5",
                    Rank::Six => "6",
                    Rank::Seven => "7",
                    Rank::Eight => "8",
                    Rank::Nine => "9",
                    Rank::Ten => "10",
                    Rank::Jack => "J",
                    Rank::Queen => "Q",
                    Rank::King => "K",
                    Rank::Ace => "A",
                };
                let suit_ch = match suit {
                    Suit::Clubs => 'C',
                    Suit::Diamonds => 'D',
                    Suit::Hearts => 'H',
                    Suit::Spades => 'S',
                };
                write!(f, "{rank_str}{suit_ch}")
            }
        }
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
/// Fails on the first invalid token.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
