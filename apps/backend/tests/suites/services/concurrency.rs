use std::sync::Barrier;
use std::thread;

use backend::domain::{Card, ClearReason, ExchangeOutcome, PlayOutcome, PlayerId};
use backend::{AppError, ErrorCode, GameFlowService};

use crate::support::game_setup::{cards, deal, full_deal, Table, ROUND_ONE};

/// Run every submission on its own thread, released together.
fn race_plays(
    flow: &GameFlowService,
    room_id: i64,
    plays: Vec<(PlayerId, Vec<Card>, usize)>,
) -> Vec<(PlayerId, Result<PlayOutcome, AppError>)> {
    let barrier = Barrier::new(plays.len());
    thread::scope(|s| {
        let handles: Vec<_> = plays
            .into_iter()
            .map(|(player, cards, hand_size)| {
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    (player, flow.submit_play(room_id, player, cards, hand_size))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("play thread panicked"))
            .collect()
    })
}

#[test]
fn partners_exchanging_at_once_swap_exactly_once() {
    let table = Table::seat_hands(61, vec![deal(ROUND_ONE), full_deal(&[])]);
    let [p0, _, _, p3] = table.players;
    table.finish_round_one();
    assert_eq!(table.cards_in_hands_and_pot(), 54);

    let give0 = table.hand(p0)[0];
    let give3 = table.hand(p3)[0];
    let flow = table.state.flow.as_ref();
    let barrier = Barrier::new(2);

    let (a, b) = thread::scope(|s| {
        let t0 = s.spawn(|| {
            barrier.wait();
            flow.submit_exchange(61, p0, vec![give0])
        });
        let t3 = s.spawn(|| {
            barrier.wait();
            flow.submit_exchange(61, p3, vec![give3])
        });
        (
            t0.join().expect("exchange thread panicked"),
            t3.join().expect("exchange thread panicked"),
        )
    });

    let outcomes = [a.expect("p0 exchange"), b.expect("p3 exchange")];
    let waiting = outcomes
        .iter()
        .filter(|o| matches!(o, ExchangeOutcome::Waiting { .. }))
        .count();
    let completed = outcomes
        .iter()
        .filter(|o| matches!(o, ExchangeOutcome::Completed { .. }))
        .count();
    assert_eq!((waiting, completed), (1, 1), "one side waits, one side swaps");

    let hand0 = table.hand(p0);
    let hand3 = table.hand(p3);
    assert!(hand0.contains(&give3) && !hand0.contains(&give0));
    assert!(hand3.contains(&give0) && !hand3.contains(&give3));
    assert_eq!(hand0.len(), 14);
    assert_eq!(hand3.len(), 13);
    assert_eq!(table.cards_in_hands_and_pot(), 54, "no card created or lost");
}

#[test]
fn simultaneous_plays_admit_only_the_turn_holder() {
    // p0 leads with the 3♦ and holds an eight, so the turn never leaves p0.
    let table = Table::seat_hands(62, vec![full_deal(&["3D", "8C"])]);
    let [p0, p1, p2, p3] = table.players;

    let mut plays = vec![(p0, cards(&["8C"]), 13)];
    for p in [p1, p2, p3] {
        let hand = table.hand(p);
        plays.push((p, vec![hand[0]], hand.len() - 1));
    }

    let results = race_plays(&table.state.flow, 62, plays);

    let accepted: Vec<&PlayOutcome> = results.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    assert_eq!(accepted.len(), 1, "exactly one play goes through");
    assert_eq!(accepted[0].player, p0);
    assert_eq!(accepted[0].pot_cleared, Some(ClearReason::Eight));

    for (player, result) in &results {
        if let Err(err) = result {
            assert_ne!(*player, p0);
            assert_eq!(err.code(), ErrorCode::OutOfTurn);
        }
    }

    let snap = table.state.flow.snapshot(62, None).expect("snapshot");
    assert_eq!(snap.turn, Some(p0));
    let counts: Vec<usize> = snap.hand_counts.iter().map(|c| c.cards).collect();
    assert_eq!(counts, vec![13, 13, 14, 13]);
}

#[test]
fn duplicate_lead_is_applied_once() {
    let table = Table::seat_hands(63, vec![full_deal(&["3D"])]);
    let [p0, p1, ..] = table.players;

    let plays = (0..4).map(|_| (p0, cards(&["3D"]), 13)).collect();
    let results = race_plays(&table.state.flow, 63, plays);

    let accepted = results.iter().filter(|(_, r)| r.is_ok()).count();
    assert_eq!(accepted, 1);
    for (_, result) in &results {
        if let Err(err) = result {
            assert_eq!(err.code(), ErrorCode::OutOfTurn);
        }
    }

    let snap = table.state.flow.snapshot(63, Some(p0)).expect("snapshot");
    assert_eq!(snap.turn, Some(p1));
    assert_eq!(snap.pot, vec![cards(&["3D"])]);
    assert_eq!(snap.hand.map(|h| h.len()), Some(13));
}

#[test]
fn join_racing_the_last_leave_lands_in_a_live_room() {
    let table = Table::scripted(64);
    let flow = table.state.flow.as_ref();

    for room_id in 1_000..1_200 {
        let leaver = PlayerId::new_v4();
        let joiner = PlayerId::new_v4();
        flow.join(room_id, leaver).expect("seat leaver");

        let barrier = Barrier::new(2);
        let receipt = thread::scope(|s| {
            s.spawn(|| {
                barrier.wait();
                flow.leave(room_id, leaver);
            });
            let join = s.spawn(|| {
                barrier.wait();
                flow.join(room_id, joiner)
            });
            join.join().expect("join thread panicked")
        });
        assert!(receipt.is_ok(), "room {room_id}: join rejected");

        let snap = flow
            .snapshot(room_id, Some(joiner))
            .unwrap_or_else(|e| panic!("room {room_id}: joiner stranded: {e}"));
        assert_eq!(snap.players, vec![joiner], "room {room_id}");
    }
}
