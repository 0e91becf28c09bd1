//! Game flow orchestration service - bridges the pure rules engine with the
//! session store and the push channel.
//!
//! Every mutating call holds the room's session lock for the whole
//! transition and only delivers notifications after the lock is released.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::dealing::Dealer;
use crate::domain::exchange::{self, partner_of, ExchangeOutcome};
use crate::domain::round::{self, Departure, PlayOutcome, RoundStart};
use crate::domain::snapshot::{self, SessionSnapshot};
use crate::domain::state::{Phase, PlayerId, Session};
use crate::domain::Card;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::notify::{NotificationSink, Outbox};
use crate::services::sessions::{room_not_found, SessionStore};
use crate::ws::protocol::{PlayBroadcast, ServerMsg, REASON_PLAYER_DISCONNECTED};

/// Where a player ended up after joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinReceipt {
    pub seat: usize,
    /// This join filled the table and round 1 was dealt.
    pub started: bool,
}

pub struct GameFlowService {
    store: Arc<SessionStore>,
    dealer: Arc<dyn Dealer>,
    sink: Arc<dyn NotificationSink>,
}

impl GameFlowService {
    pub fn new(
        store: Arc<SessionStore>,
        dealer: Arc<dyn Dealer>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            dealer,
            sink,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Run `f` under the room's lock, then deliver whatever it queued.
    fn with_session<T>(
        &self,
        room_id: i64,
        f: impl FnOnce(&mut Session, &mut Outbox) -> Result<T, DomainError>,
    ) -> Result<T, AppError> {
        let shared = self.store.require(room_id)?;
        let mut outbox = Outbox::new();
        let result = {
            let mut session = shared.lock();
            if session.closed {
                return Err(room_not_found(room_id).into());
            }
            f(&mut session, &mut outbox)
        };
        outbox.flush(room_id, self.sink.as_ref());
        result.map_err(AppError::from)
    }

    /// Seat a player, creating the room on first contact. The fourth player
    /// triggers the first deal.
    pub fn join(&self, room_id: i64, player: PlayerId) -> Result<JoinReceipt, AppError> {
        let receipt = loop {
            let shared = self.store.get_or_create(room_id);
            let mut outbox = Outbox::new();
            let attempt = {
                let mut session = shared.lock();
                if session.closed {
                    None
                } else {
                    Some(self.seat(room_id, &mut session, player, &mut outbox))
                }
            };
            // A closed session was unregistered after we fetched it.
            let Some(result) = attempt else {
                debug!(room_id, player_id = %player, "Join raced a room close, retrying");
                continue;
            };
            outbox.flush(room_id, self.sink.as_ref());
            break result.map_err(AppError::from);
        };

        match &receipt {
            Ok(r) => info!(room_id, player_id = %player, seat = r.seat, started = r.started, "Player joined"),
            Err(err) => warn!(room_id, player_id = %player, error = %err, "Join rejected"),
        }
        receipt
    }

    fn seat(
        &self,
        room_id: i64,
        session: &mut Session,
        player: PlayerId,
        outbox: &mut Outbox,
    ) -> Result<JoinReceipt, DomainError> {
        let full = round::join(session, player)?;
        let seat = session
            .players
            .iter()
            .position(|p| *p == player)
            .unwrap_or_default();
        outbox.push(
            player,
            ServerMsg::Welcome {
                room_id,
                player_id: player,
                seat,
                players: session.players.len(),
            },
        );

        let started = full && session.phase == Phase::AwaitingPlayers;
        if started {
            let start = round::start_round(session, self.dealer.as_ref())?;
            queue_round_started(session, &start, outbox);
        }
        Ok(JoinReceipt { seat, started })
    }

    /// Disconnect handling. Leaving a started game ends it for everyone and
    /// drops the room; an emptied lobby is dropped too.
    pub fn leave(&self, room_id: i64, player: PlayerId) -> Departure {
        let Some(shared) = self.store.get(room_id) else {
            return Departure::NotSeated;
        };

        let mut outbox = Outbox::new();
        let departure = {
            let mut session = shared.lock();
            if session.closed {
                return Departure::NotSeated;
            }
            let departure = round::leave(&mut session, player);
            if matches!(
                departure,
                Departure::EndedGame | Departure::LeftLobby { remaining: 0 }
            ) {
                // Unregister while still holding the lock so a concurrent
                // join either sees the closed flag or creates a fresh room.
                session.closed = true;
                self.store.remove_if_same(room_id, &shared);
            }
            if departure == Departure::EndedGame {
                let others: Vec<PlayerId> = session
                    .players
                    .iter()
                    .copied()
                    .filter(|p| *p != player)
                    .collect();
                outbox.broadcast(
                    &others,
                    &ServerMsg::GameEnded {
                        reason: REASON_PLAYER_DISCONNECTED.to_string(),
                    },
                );
            }
            departure
        };

        match departure {
            Departure::EndedGame | Departure::LeftLobby { remaining: 0 } => {
                info!(room_id, player_id = %player, ?departure, "Room closed");
            }
            Departure::LeftLobby { remaining } => {
                info!(room_id, player_id = %player, remaining, "Player left lobby");
            }
            Departure::NotSeated => {
                debug!(room_id, player_id = %player, "Leave for unseated player ignored");
            }
        }

        outbox.flush(room_id, self.sink.as_ref());
        departure
    }

    /// Deal the first round once four players are seated.
    pub fn start_round(&self, room_id: i64) -> Result<RoundStart, AppError> {
        let dealer = self.dealer.clone();
        let start = self.with_session(room_id, |session, outbox| {
            if session.phase != Phase::AwaitingPlayers {
                return Err(DomainError::validation(
                    ValidationKind::InvalidPhase,
                    "Rounds after the first are dealt automatically",
                ));
            }
            let start = round::start_round(session, dealer.as_ref())?;
            queue_round_started(session, &start, outbox);
            Ok(start)
        })?;
        info!(room_id, round_no = start.round_no, "Round started");
        Ok(start)
    }

    pub fn submit_play(
        &self,
        room_id: i64,
        player: PlayerId,
        cards: Vec<Card>,
        declared_hand_size: usize,
    ) -> Result<PlayOutcome, AppError> {
        let dealer = self.dealer.clone();
        let result = self.with_session(room_id, |session, outbox| {
            let out = round::submit_play(
                session,
                dealer.as_ref(),
                player,
                cards,
                declared_hand_size,
            )?;
            let players = session.players.clone();
            outbox.broadcast(&players, &ServerMsg::PlayMade(PlayBroadcast::from(&out)));
            if let Some(ended) = &out.round_end {
                outbox.broadcast(
                    &players,
                    &ServerMsg::RoundEnded {
                        round_no: ended.round_no,
                        finishing_order: ended.finishing_order.clone(),
                    },
                );
            }
            if let Some(next) = &out.next_round {
                queue_round_started(session, next, outbox);
            }
            Ok(out)
        });

        match &result {
            Ok(out) => {
                debug!(
                    room_id,
                    player_id = %player,
                    round_no = out.round_no,
                    cards = out.cards.len(),
                    cleared = ?out.pot_cleared,
                    "Play accepted"
                );
                if let Some(ended) = &out.round_end {
                    info!(room_id, round_no = ended.round_no, "Round ended");
                }
            }
            Err(err) => debug!(room_id, player_id = %player, error = %err, "Play rejected"),
        }
        result
    }

    /// Exchanges close as soon as the first play of the round is made.
    pub fn submit_exchange(
        &self,
        room_id: i64,
        player: PlayerId,
        cards: Vec<Card>,
    ) -> Result<ExchangeOutcome, AppError> {
        let result = self.with_session(room_id, |session, outbox| {
            session.require_player(player)?;
            if session.plays_this_round > 0 {
                return Err(DomainError::validation(
                    ValidationKind::InvalidPhase,
                    "Exchange is closed once play has started",
                ));
            }
            let out = exchange::submit_exchange(session, player, cards)?;
            match &out {
                ExchangeOutcome::Waiting { partner } => {
                    outbox.push(player, ServerMsg::ExchangeWaiting { partner: *partner });
                }
                ExchangeOutcome::Completed {
                    player,
                    player_hand,
                    partner,
                    partner_hand,
                } => {
                    outbox.push(
                        *player,
                        ServerMsg::ExchangeCompleted {
                            partner: *partner,
                            hand: player_hand.clone(),
                        },
                    );
                    outbox.push(
                        *partner,
                        ServerMsg::ExchangeCompleted {
                            partner: *player,
                            hand: partner_hand.clone(),
                        },
                    );
                }
            }
            Ok(out)
        });

        match &result {
            Ok(ExchangeOutcome::Waiting { partner }) => {
                info!(room_id, player_id = %player, partner = %partner, "Exchange waiting")
            }
            Ok(ExchangeOutcome::Completed { partner, .. }) => {
                info!(room_id, player_id = %player, partner = %partner, "Exchange completed")
            }
            Err(err) => debug!(room_id, player_id = %player, error = %err, "Exchange rejected"),
        }
        result
    }

    /// Read-only view; `viewer` must be seated when given.
    pub fn snapshot(
        &self,
        room_id: i64,
        viewer: Option<PlayerId>,
    ) -> Result<SessionSnapshot, AppError> {
        self.with_session(room_id, |session, _| {
            if let Some(p) = viewer {
                session.require_player(p)?;
            }
            Ok(snapshot::snapshot(session, viewer))
        })
    }

    /// Broadcast free text to everyone in the room. Returns the recipient count.
    pub fn announce(&self, room_id: i64, message: String) -> Result<usize, AppError> {
        let recipients = self.with_session(room_id, |session, outbox| {
            outbox.broadcast(&session.players, &ServerMsg::Announcement { message });
            Ok(session.players.len())
        })?;
        info!(room_id, recipients, "Announcement sent");
        Ok(recipients)
    }
}

fn queue_round_started(session: &Session, start: &RoundStart, outbox: &mut Outbox) {
    let base = session.base_order();
    for (player, hand) in &start.hands {
        let partner = if start.exchange_open {
            base.as_deref().and_then(|order| partner_of(order, *player))
        } else {
            None
        };
        outbox.push(
            *player,
            ServerMsg::RoundStarted {
                round_no: start.round_no,
                hand: hand.clone(),
                turn_order: start.turn_order.clone(),
                turn: start.turn,
                exchange_open: start.exchange_open,
                partner,
            },
        );
    }
}
