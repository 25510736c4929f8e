/*!
 * Compaction Tests
 */

use blocksim::memory::{MemoryManager, Strategy};
use blocksim::OwnerId;
use pretty_assertions::assert_eq;

fn owner(id: &str) -> OwnerId {
    OwnerId::new(id).expect("valid owner id")
}

fn scattered() -> MemoryManager {
    let mut mgr = MemoryManager::with_capacity(200);
    for (id, size) in [("A", 10), ("B", 25), ("C", 15), ("D", 40), ("E", 5), ("F", 30)] {
        mgr.allocate(owner(id), size, Strategy::First).unwrap();
    }
    for id in ["A", "C", "E"] {
        mgr.release(id).unwrap();
    }
    mgr
}

#[test]
fn test_compaction_preserves_order_and_sizes() {
    let mut mgr = scattered();
    let before: Vec<_> = mgr
        .snapshot()
        .into_iter()
        .filter(|b| b.allocated)
        .map(|b| (b.owner, b.size))
        .collect();
    let allocated_before = mgr.stats().used_memory;

    mgr.compact().unwrap();

    let after = mgr.snapshot();
    let allocated: Vec<_> = after
        .iter()
        .filter(|b| b.allocated)
        .map(|b| (b.owner.clone(), b.size))
        .collect();
    assert_eq!(allocated, before);
    assert_eq!(mgr.stats().used_memory, allocated_before);
}

#[test]
fn test_compaction_leaves_one_trailing_free_block() {
    let mut mgr = scattered();
    mgr.compact().unwrap();

    let after = mgr.snapshot();
    assert_eq!(after[0].address, 0);
    let free: Vec<_> = after.iter().filter(|b| !b.allocated).collect();
    assert_eq!(free.len(), 1);
    assert_eq!(after.last(), free.last().copied());

    let mut cursor = 0;
    for block in &after {
        assert_eq!(block.address, cursor);
        cursor += block.size;
    }
    assert_eq!(cursor, 200);
}

#[test]
fn test_compaction_enables_large_allocation() {
    let mut mgr = scattered();
    // 105 free bytes, largest hole 75
    assert!(mgr.allocate(owner("BIG"), 100, Strategy::First).is_err());

    mgr.compact().unwrap();
    assert!(mgr.allocate(owner("BIG"), 100, Strategy::First).is_ok());
}

#[test]
fn test_compaction_is_idempotent() {
    let mut mgr = scattered();
    mgr.compact().unwrap();
    let once = mgr.snapshot();

    let report = mgr.compact().unwrap();
    assert_eq!(report.moved_blocks, 0);
    assert_eq!(mgr.snapshot(), once);
}
