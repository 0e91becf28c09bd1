use serde_json::json;

use crate::domain::exchange::submit_exchange;
use crate::domain::round::start_round;
use crate::domain::snapshot::snapshot;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{cards, fixed_dealer, seated_session, session_after_round_one};

#[test]
fn snapshot_shows_only_the_viewers_hand() {
    let (mut s, [p0, p1, _p2, _p3]) = seated_session();
    let hands: [&[&str]; 4] = [&["4C"], &["3D", "9C"], &["5C", "6C"], &["7C"]];
    start_round(&mut s, &fixed_dealer(vec![hands])).unwrap();

    let view = snapshot(&s, Some(p0));
    assert_eq!(view.phase, Phase::InRound);
    assert_eq!(view.turn, Some(p1));
    assert_eq!(view.hand, Some(cards(&["4C"])));
    assert_eq!(view.hand_counts.iter().map(|c| c.cards).sum::<usize>(), 6);

    let spectator = serde_json::to_value(snapshot(&s, None)).unwrap();
    assert!(spectator.get("hand").is_none());
    assert_eq!(spectator["phase"], json!("in_round"));
    assert_eq!(spectator["round_no"], json!(1));
}

#[test]
fn repeated_queries_are_identical() {
    let (mut s, [p0, ..]) = session_after_round_one(
        2,
        [&["AS"], &["KS"], &["QS"], &["JS"]],
    );
    submit_exchange(&mut s, p0, cards(&["AS"])).unwrap();

    let first = snapshot(&s, Some(p0));
    let second = snapshot(&s, Some(p0));
    assert_eq!(first, second);
    assert!(first.exchange_pending);
    assert_eq!(s.turn_order(), first.turn_order.as_slice());
}
