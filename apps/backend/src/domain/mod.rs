//! Domain layer: the rules engine. Pure game logic, no I/O.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod exchange;
pub mod play;
pub mod pot;
pub mod round;
pub mod rules;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_pot;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, JokerColor, Rank, Suit};
pub use dealing::{deal_hands, full_deck, Dealer, FixedDealer, ShuffleDealer};
pub use exchange::ExchangeOutcome;
pub use pot::{ClearReason, Pot};
pub use round::{Departure, PlayOutcome, RoundEnd, RoundStart};
pub use snapshot::SessionSnapshot;
pub use state::{FinishingOrder, HandCount, Phase, PlayerId, Session};
