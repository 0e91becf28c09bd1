//! Round/session state machine: admission, dealing, plays, finishing order,
//! and the round-2 champion rule.

use crate::domain::cards_logic::is_three_of_diamonds;
use crate::domain::dealing::Dealer;
use crate::domain::play::remove_played_cards;
use crate::domain::pot::{decide, is_revolution, ClearReason, Pot};
use crate::domain::rules::{exchange_allowed_in_round, PLAYERS};
use crate::domain::state::{FinishingOrder, HandCount, Phase, PlayerId, Session};
use crate::domain::Card;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Result of dealing a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStart {
    pub round_no: u32,
    pub turn_order: Vec<PlayerId>,
    pub turn: Option<PlayerId>,
    /// Freshly dealt hands in join order.
    pub hands: Vec<(PlayerId, Vec<Card>)>,
    /// Whether the round-1 finishers may trade before the first play.
    pub exchange_open: bool,
}

/// A completed round's finishing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEnd {
    pub round_no: u32,
    pub finishing_order: FinishingOrder,
}

/// Everything observers need to know about one accepted play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub round_no: u32,
    pub player: PlayerId,
    /// Cards played; empty for a pass.
    pub cards: Vec<Card>,
    /// Pot after the play was settled.
    pub pot: Pot,
    pub pot_cleared: Option<ClearReason>,
    pub next_turn: Option<PlayerId>,
    /// Counts right after the play, before any redeal.
    pub hand_counts: Vec<HandCount>,
    pub last_non_pass: Option<Vec<Card>>,
    pub revolution: bool,
    /// The play emptied the player's hand.
    pub finished: bool,
    pub round_end: Option<RoundEnd>,
    pub next_round: Option<RoundStart>,
}

/// What happened when a player left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    NotSeated,
    /// Left before the first deal.
    LeftLobby { remaining: usize },
    /// Left a started game, which ends it.
    EndedGame,
}

fn invalid_phase(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidPhase, detail)
}

/// Seat a player. Returns true once the table is full.
///
/// Joining twice is a no-op.
pub fn join(session: &mut Session, player: PlayerId) -> Result<bool, DomainError> {
    if session.has_player(player) {
        return Ok(session.players.len() == PLAYERS);
    }
    if session.phase != Phase::AwaitingPlayers {
        return Err(DomainError::conflict(
            ConflictKind::GameInProgress,
            "The game has already started",
        ));
    }
    if session.players.len() >= PLAYERS {
        return Err(DomainError::conflict(
            ConflictKind::RoomFull,
            "The room already has four players",
        ));
    }
    session.players.push(player);
    Ok(session.players.len() == PLAYERS)
}

/// Remove a player. Leaving a started game ends it for everyone.
pub fn leave(session: &mut Session, player: PlayerId) -> Departure {
    if !session.has_player(player) {
        return Departure::NotSeated;
    }
    match session.phase {
        Phase::AwaitingPlayers => {
            session.players.retain(|p| *p != player);
            Departure::LeftLobby {
                remaining: session.players.len(),
            }
        }
        Phase::InRound | Phase::GameEnd => {
            end_game(session);
            Departure::EndedGame
        }
    }
}

pub fn end_game(session: &mut Session) {
    session.phase = Phase::GameEnd;
    session.turn = None;
}

fn rotate_to(order: &mut [PlayerId], leader: Option<PlayerId>) {
    let idx = leader
        .and_then(|l| order.iter().position(|p| *p == l))
        .unwrap_or(0);
    order.rotate_left(idx);
}

fn three_of_diamonds_holder(session: &Session) -> Option<PlayerId> {
    session.players.iter().copied().find(|p| {
        session
            .hand(*p)
            .is_some_and(|h| h.iter().any(is_three_of_diamonds))
    })
}

/// Last resolved entry of the previous round's finishing order.
fn previous_last_finisher(session: &Session) -> Option<PlayerId> {
    let prev = session.round_no.checked_sub(1)?;
    session
        .finishing_order(prev)?
        .iter()
        .rev()
        .find_map(|slot| *slot)
}

/// Deal the current round and compute its turn order.
pub fn start_round(session: &mut Session, dealer: &dyn Dealer) -> Result<RoundStart, DomainError> {
    if session.phase == Phase::GameEnd {
        return Err(invalid_phase("The game has ended"));
    }
    if session.players.len() != PLAYERS {
        return Err(invalid_phase(format!(
            "A round needs four players, {} joined",
            session.players.len()
        )));
    }

    let dealt = dealer.deal();
    session.hands = session.players.iter().copied().zip(dealt).collect();

    let order = if session.round_no == 1 {
        let mut order = session.players.clone();
        rotate_to(&mut order, three_of_diamonds_holder(session));
        order
    } else {
        let mut order = session.base_order().unwrap_or_else(|| session.players.clone());
        rotate_to(&mut order, previous_last_finisher(session));
        order
    };

    session.turn = order.first().copied();
    session.turn_order = order;
    session.pot = Pot::default();
    session.discard.clear();
    session.exchange.clear();
    session.plays_this_round = 0;
    session.phase = Phase::InRound;
    while session.round_results.len() < session.round_no as usize {
        session.round_results.push(FinishingOrder::new());
    }

    Ok(RoundStart {
        round_no: session.round_no,
        turn_order: session.turn_order.clone(),
        turn: session.turn,
        hands: session
            .players
            .iter()
            .map(|p| (*p, session.hand(*p).unwrap_or_default().to_vec()))
            .collect(),
        exchange_open: exchange_allowed_in_round(session.round_no)
            && session.base_order().is_some(),
    })
}

/// Validate and apply one play (an empty `cards` is a pass).
///
/// `declared_hand_size` is the player's own count after the play; a mismatch
/// rejects the command. All checks run before anything is mutated.
pub fn submit_play(
    session: &mut Session,
    dealer: &dyn Dealer,
    player: PlayerId,
    cards: Vec<Card>,
    declared_hand_size: usize,
) -> Result<PlayOutcome, DomainError> {
    if session.phase != Phase::InRound {
        return Err(invalid_phase("No round is in progress"));
    }
    session.require_player(player)?;
    if session.turn != Some(player) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("It is not {player}'s turn"),
        ));
    }

    let mut hand = session.hand(player).unwrap_or_default().to_vec();
    remove_played_cards(&mut hand, &cards)?;
    if hand.len() != declared_hand_size {
        return Err(DomainError::validation(
            ValidationKind::HandSizeMismatch,
            format!(
                "Declared hand size {declared_hand_size} but {} cards remain",
                hand.len()
            ),
        ));
    }

    let finished = !cards.is_empty() && hand.is_empty();
    session.hands.insert(player, hand);
    session.plays_this_round += 1;

    let revolution = is_revolution(&cards);
    let last_non_pass = if cards.is_empty() {
        session.pot.last_non_pass().map(<[Card]>::to_vec)
    } else {
        Some(cards.clone())
    };

    let mut pot_cleared = None;
    if finished {
        session.pot.push(cards.clone());
        finish_player(session, player);
    } else {
        let decision = decide(&mut session.pot, &session.turn_order, player, cards.clone());
        session.discard.extend(decision.swept);
        session.turn = Some(decision.next_turn);
        pot_cleared = decision.cleared;
    }

    let mut outcome = PlayOutcome {
        round_no: session.round_no,
        player,
        cards,
        pot: session.pot.clone(),
        pot_cleared,
        next_turn: session.turn,
        hand_counts: session.hand_counts(),
        last_non_pass,
        revolution,
        finished,
        round_end: None,
        next_round: None,
    };

    if session.turn_order.len() <= 1 {
        let ended = end_round(session);
        let next = start_round(session, dealer)?;
        outcome.next_turn = next.turn;
        outcome.round_end = Some(ended);
        outcome.next_round = Some(next);
    }

    Ok(outcome)
}

/// Put `player` in the first reserved slot, else at the end. No-op if placed.
fn place(results: &mut FinishingOrder, player: PlayerId) {
    if results.contains(&Some(player)) {
        return;
    }
    match results.iter_mut().find(|slot| slot.is_none()) {
        Some(slot) => *slot = Some(player),
        None => results.push(Some(player)),
    }
}

fn current_results(session: &mut Session) -> &mut FinishingOrder {
    let idx = (session.round_no as usize).saturating_sub(1);
    while session.round_results.len() <= idx {
        session.round_results.push(FinishingOrder::new());
    }
    &mut session.round_results[idx]
}

fn sole_remaining(session: &Session) -> Option<PlayerId> {
    match session.turn_order.as_slice() {
        [last] => Some(*last),
        _ => None,
    }
}

fn finish_player(session: &mut Session, player: PlayerId) {
    let pre_idx = session
        .turn_order
        .iter()
        .position(|p| *p == player)
        .unwrap_or(0);
    session.turn_order.retain(|p| *p != player);

    let champion = session.champion();
    let round_no = session.round_no;
    let results = current_results(session);
    let first_finisher = results.iter().all(Option::is_none);

    if let Some(champ) = champion.filter(|c| round_no == 2 && first_finisher && *c != player) {
        *results = vec![Some(player), None, None, Some(champ)];
        session.turn_order.retain(|p| *p != champ);
        session.turn = session.turn_order.first().copied();
        return;
    }

    place(results, player);
    if let Some(last) = sole_remaining(session) {
        place(current_results(session), last);
        session.turn_order.clear();
    }

    session.turn = if session.turn_order.is_empty() {
        None
    } else {
        Some(session.turn_order[pre_idx % session.turn_order.len()])
    };
}

/// Close the current round and open the next results slot.
fn end_round(session: &mut Session) -> RoundEnd {
    if let Some(last) = sole_remaining(session) {
        place(current_results(session), last);
    }
    session.turn_order.clear();
    session.turn = None;

    let ended = RoundEnd {
        round_no: session.round_no,
        finishing_order: current_results(session).clone(),
    };

    let swept = session.pot.drain_cards();
    session.discard.extend(swept);
    session.round_no += 1;
    session.round_results.push(FinishingOrder::new());
    ended
}
