/*!
 * Block List Property Tests
 * Random operation sequences must preserve the block list invariants
 */

use blocksim::memory::{MemoryManager, Strategy as Fit};
use blocksim::OwnerId;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Allocate { owner: u8, size: usize, strategy: Fit },
    Release { owner: u8 },
    Compact,
}

fn fit() -> impl Strategy<Value = Fit> {
    prop_oneof![
        Just(Fit::First),
        Just(Fit::Best),
        Just(Fit::Worst),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..8, 1usize..200, fit())
            .prop_map(|(owner, size, strategy)| Op::Allocate { owner, size, strategy }),
        3 => (0u8..8).prop_map(|owner| Op::Release { owner }),
        1 => Just(Op::Compact),
    ]
}

fn owner_name(owner: u8) -> String {
    format!("P{}", owner)
}

fn apply(mgr: &mut MemoryManager, op: &Op) {
    match op {
        Op::Allocate {
            owner,
            size,
            strategy,
        } => {
            let id = OwnerId::new(&owner_name(*owner)).unwrap();
            let _ = mgr.allocate(id, *size, *strategy);
        }
        Op::Release { owner } => {
            let _ = mgr.release(&owner_name(*owner));
        }
        Op::Compact => {
            mgr.compact().unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_invariants_hold_after_every_operation(
        total in 1usize..1024,
        ops in prop::collection::vec(op(), 1..64),
    ) {
        let mut mgr = MemoryManager::with_capacity(total);
        for op in &ops {
            apply(&mut mgr, op);
            prop_assert!(
                mgr.blocks().check_invariants().is_ok(),
                "after {:?}: {:?}",
                op,
                mgr.blocks().check_invariants()
            );
            let stats = mgr.stats();
            prop_assert_eq!(stats.used_memory + stats.available_memory, total);
        }
    }

    #[test]
    fn prop_failed_allocation_changes_nothing(
        total in 1usize..512,
        ops in prop::collection::vec(op(), 0..32),
        extra in 1usize..64,
        strategy in fit(),
    ) {
        let mut mgr = MemoryManager::with_capacity(total);
        for op in &ops {
            apply(&mut mgr, op);
        }
        let before = mgr.blocks().clone();
        let too_big = mgr.blocks().largest_free_block() + extra;

        prop_assert!(mgr.allocate(OwnerId::new("Z").unwrap(), too_big, strategy).is_err());
        prop_assert_eq!(mgr.blocks(), &before);
    }

    #[test]
    fn prop_compaction_keeps_owner_order(
        total in 1usize..1024,
        ops in prop::collection::vec(op(), 1..64),
    ) {
        let mut mgr = MemoryManager::with_capacity(total);
        for op in &ops {
            apply(&mut mgr, op);
        }
        let owners_before: Vec<_> = mgr
            .snapshot()
            .into_iter()
            .filter_map(|b| b.owner.map(|o| (o, b.size)))
            .collect();

        mgr.compact().unwrap();

        let after = mgr.snapshot();
        let owners_after: Vec<_> = after
            .iter()
            .filter_map(|b| b.owner.clone().map(|o| (o, b.size)))
            .collect();
        prop_assert_eq!(owners_after, owners_before);
        prop_assert!(after.iter().rev().skip(1).all(|b| b.allocated));
    }
}
