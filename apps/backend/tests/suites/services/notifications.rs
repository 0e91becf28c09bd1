use std::collections::HashSet;
use std::sync::Arc;

use backend::config::ServerConfig;
use backend::domain::{full_deck, Card, PlayerId, ShuffleDealer};
use backend::services::RecordingSink;
use backend::state::app_state::AppState;
use backend::ws::ServerMsg;

use crate::support::game_setup::Table;

#[test]
fn refused_delivery_does_not_fail_the_play() {
    let table = Table::scripted(41);
    let [p0, p1, p2, _] = table.players;
    table.sink.refuse(p2);
    table.sink.clear();

    let out = table.play(p0, &["3D"]);
    assert_eq!(out.next_turn, Some(p1));

    assert!(table.sink.sent_to(p2).is_empty());
    assert_eq!(table.sink.sent_to(p1).len(), 1);
}

#[test]
fn joins_welcome_each_player_and_the_fourth_deals() {
    let sink = RecordingSink::new();
    let state = AppState::with_sink(
        ServerConfig::default(),
        Arc::new(ShuffleDealer::seeded(7)),
        Arc::new(sink.clone()),
    );
    let players = [(); 4].map(|_| PlayerId::new_v4());
    for (seat, p) in players.iter().enumerate() {
        let receipt = state.flow.join(42, *p).expect("join");
        assert_eq!(receipt.seat, seat);
        assert_eq!(receipt.started, seat == 3);
    }

    let mut dealt: Vec<Card> = Vec::new();
    let mut turns = HashSet::new();
    for (seat, p) in players.iter().enumerate() {
        let msgs = sink.sent_to(*p);
        assert_eq!(msgs.len(), 2, "welcome then round_started");
        assert!(matches!(&msgs[0], ServerMsg::Welcome { seat: s, .. } if *s == seat));
        match &msgs[1] {
            ServerMsg::RoundStarted {
                round_no,
                hand,
                turn,
                exchange_open,
                partner,
                ..
            } => {
                assert_eq!(*round_no, 1);
                assert!(!exchange_open);
                assert_eq!(*partner, None);
                dealt.extend(hand.iter().copied());
                turns.insert(*turn);
            }
            other => panic!("expected round_started, got {other:?}"),
        }
    }

    // Every card dealt exactly once, and everyone was told the same leader.
    let unique: HashSet<Card> = dealt.iter().copied().collect();
    assert_eq!(dealt.len(), 54);
    assert_eq!(unique, full_deck().into_iter().collect::<HashSet<_>>());
    assert_eq!(turns.len(), 1);

    let leader = turns.into_iter().next().flatten().expect("leader");
    let snap = state.flow.snapshot(42, Some(leader)).expect("snapshot");
    let three_of_diamonds: Card = "3D".parse().expect("card");
    assert!(snap.hand.expect("hand").contains(&three_of_diamonds));
}
