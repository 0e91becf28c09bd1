//! Property tests for pot clearing.

use proptest::prelude::*;

use crate::domain::pot::{decide, ClearReason, Pot};
use crate::domain::state::PlayerId;
use crate::domain::{test_gens, test_prelude, Card, Rank};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Any play holding an eight clears and keeps the turn.
    #[test]
    fn prop_eight_always_clears(
        before in prop::collection::vec(test_gens::small_play(), 0..5),
        mut play in test_gens::small_play(),
        eight_suit in test_gens::suit(),
        seat in 0usize..4,
    ) {
        let ids: Vec<PlayerId> = (0..4).map(|_| PlayerId::new_v4()).collect();
        let mut pot = Pot::default();
        for p in before {
            pot.push(p);
        }
        play.push(Card::new(Rank::Eight, eight_suit));

        let d = decide(&mut pot, &ids, ids[seat], play);
        prop_assert_eq!(d.cleared, Some(ClearReason::Eight));
        prop_assert_eq!(d.next_turn, ids[seat]);
        prop_assert!(pot.is_empty());
    }

    /// A lone plain card never clears a pot without passes and always rotates.
    #[test]
    fn prop_plain_single_rotates(
        card in test_gens::plain_card(),
        seat in 0usize..4,
    ) {
        let ids: Vec<PlayerId> = (0..4).map(|_| PlayerId::new_v4()).collect();
        let mut pot = Pot::default();
        let d = decide(&mut pot, &ids, ids[seat], vec![card]);
        prop_assert_eq!(d.cleared, None);
        prop_assert_eq!(d.next_turn, ids[(seat + 1) % 4]);
        prop_assert_eq!(pot.len(), 1);
    }
}
