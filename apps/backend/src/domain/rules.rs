pub const PLAYERS: usize = 4;
pub const DECK_SIZE: usize = 54;

/// Hand sizes by join seat. 54 cards do not split evenly.
pub const HAND_SIZES: [usize; PLAYERS] = [14, 13, 14, 13];

/// A play of exactly this many cards is reported as a revolution.
pub const REVOLUTION_SIZE: usize = 4;

/// Rounds in which the round-1 finishers trade cards before play.
pub fn exchange_allowed_in_round(round_no: u32) -> bool {
    matches!(round_no, 2 | 3)
}

/// Number of consecutive passes that empties the pot: everyone but the
/// last player to play has passed.
pub fn pass_clear_threshold(active_players: usize) -> usize {
    active_players.saturating_sub(1).max(1)
}

/// Exchange partner index for a round-1 finishing position
/// (1st with 4th, 2nd with 3rd).
pub fn partner_index(finish_index: usize) -> Option<usize> {
    (finish_index < PLAYERS).then(|| PLAYERS - 1 - finish_index)
}
