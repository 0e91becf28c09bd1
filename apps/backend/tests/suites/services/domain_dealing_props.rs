//! Dealing invariants over arbitrary shuffle seeds.

use std::collections::HashSet;

use backend::domain::{full_deck, Card, Dealer, ShuffleDealer};
use proptest::prelude::*;

use crate::common::proptest_prelude::proptest_prelude_config;

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn deal_partitions_the_deck(seed in any::<u64>()) {
        let hands = ShuffleDealer::seeded(seed).deal();

        let sizes: Vec<usize> = hands.iter().map(Vec::len).collect();
        prop_assert_eq!(sizes, vec![14, 13, 14, 13]);

        let mut seen: HashSet<Card> = HashSet::new();
        for hand in &hands {
            for card in hand {
                prop_assert!(seen.insert(*card), "card {} dealt twice", card);
            }
        }
        prop_assert_eq!(seen, full_deck().into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn same_seed_same_deal(seed in any::<u64>()) {
        prop_assert_eq!(
            ShuffleDealer::seeded(seed).deal(),
            ShuffleDealer::seeded(seed).deal()
        );
    }
}
