/*!
 * Release Tests
 * Coalescing behaviour and round trips
 */

use blocksim::memory::{MemoryBlock, MemoryError, MemoryManager, ReleasedBlock, Strategy};
use blocksim::OwnerId;
use pretty_assertions::assert_eq;

fn owner(id: &str) -> OwnerId {
    OwnerId::new(id).expect("valid owner id")
}

#[test]
fn test_release_next_to_free_block_yields_one_span() {
    let mut mgr = MemoryManager::with_capacity(100);
    mgr.allocate(owner("A"), 30, Strategy::First).unwrap();
    mgr.allocate(owner("B"), 30, Strategy::First).unwrap();

    let released = mgr.release("B").unwrap();
    assert_eq!(released, ReleasedBlock { address: 30, size: 30 });
    assert_eq!(
        mgr.blocks().as_slice(),
        &[
            MemoryBlock::allocated(0, 30, owner("A")),
            MemoryBlock::free(30, 70),
        ]
    );
}

#[test]
fn test_release_merges_with_left_neighbour_only() {
    let mut mgr = MemoryManager::with_capacity(60);
    for (id, size) in [("A", 20), ("B", 20), ("C", 20)] {
        mgr.allocate(owner(id), size, Strategy::First).unwrap();
    }
    mgr.release("A").unwrap();

    let released = mgr.release("B").unwrap();
    assert_eq!(released, ReleasedBlock { address: 20, size: 20 });
    assert_eq!(
        mgr.blocks().as_slice(),
        &[
            MemoryBlock::free(0, 40),
            MemoryBlock::allocated(40, 20, owner("C")),
        ]
    );
}

#[test]
fn test_round_trip_restores_single_free_block() {
    for strategy in Strategy::ALL {
        let mut mgr = MemoryManager::with_capacity(256);
        let before = mgr.blocks().clone();

        mgr.allocate(owner("P"), 100, strategy).unwrap();
        mgr.release("P").unwrap();

        assert_eq!(mgr.blocks(), &before, "round trip with {}", strategy);
    }
}

#[test]
fn test_round_trip_inside_hole() {
    let mut mgr = MemoryManager::with_capacity(100);
    mgr.allocate(owner("A"), 10, Strategy::First).unwrap();
    mgr.allocate(owner("H"), 40, Strategy::First).unwrap();
    mgr.allocate(owner("B"), 10, Strategy::First).unwrap();
    mgr.release("H").unwrap();
    let before = mgr.blocks().clone();

    mgr.allocate(owner("P"), 25, Strategy::Best).unwrap();
    mgr.release("P").unwrap();

    assert_eq!(mgr.blocks(), &before);
}

#[test]
fn test_release_reports_pre_coalesce_extent() {
    let mut mgr = MemoryManager::with_capacity(90);
    for id in ["A", "B", "C"] {
        mgr.allocate(owner(id), 30, Strategy::First).unwrap();
    }
    mgr.release("A").unwrap();
    mgr.release("C").unwrap();

    let released = mgr.release("B").unwrap();
    assert_eq!(released, ReleasedBlock { address: 30, size: 30 });
    assert_eq!(mgr.blocks().as_slice(), &[MemoryBlock::free(0, 90)]);
}

#[test]
fn test_release_unknown_owner_is_not_found() {
    let mut mgr = MemoryManager::with_capacity(10);
    assert_eq!(
        mgr.release("P9"),
        Err(MemoryError::NotFound("P9".to_string()))
    );
}
