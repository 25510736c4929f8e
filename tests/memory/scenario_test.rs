/*!
 * End-to-end Scenarios
 * Command sequences checked against their full block layout
 */

use blocksim::memory::{BlockDescriptor, MemoryError, MemoryManager, MemoryPressure};
use blocksim::OwnerId;
use pretty_assertions::assert_eq;

fn layout(mgr: &MemoryManager) -> Vec<(usize, usize, Option<String>)> {
    mgr.snapshot()
        .into_iter()
        .map(|b: BlockDescriptor| (b.address, b.size, b.owner.map(String::from)))
        .collect()
}

fn held(owner: &str) -> Option<String> {
    Some(owner.to_string())
}

#[test]
fn test_request_release_compact_sequence() {
    let mut mgr = MemoryManager::with_capacity(100);

    mgr.request("P1", 20, "F").unwrap();
    mgr.request("P2", 30, "B").unwrap();
    assert_eq!(
        layout(&mgr),
        vec![(0, 20, held("P1")), (20, 30, held("P2")), (50, 50, None)]
    );

    mgr.release("P1").unwrap();
    assert_eq!(
        layout(&mgr),
        vec![(0, 20, None), (20, 30, held("P2")), (50, 50, None)]
    );

    mgr.compact().unwrap();
    assert_eq!(layout(&mgr), vec![(0, 30, held("P2")), (30, 70, None)]);
}

#[test]
fn test_duplicate_owner_releases_lowest_address_first() {
    let mut mgr = MemoryManager::with_capacity(100);
    mgr.request("P1", 10, "F").unwrap();
    mgr.request("P2", 10, "F").unwrap();
    mgr.request("P1", 10, "F").unwrap();
    assert_eq!(mgr.owner_memory("P1"), 20);

    let released = mgr.release("P1").unwrap();
    assert_eq!(released.address, 0);
    assert_eq!(mgr.owner_blocks("P1")[0].address, 20);

    let rest = mgr.release_all("P1").unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(mgr.owner_memory("P1"), 0);
    assert_eq!(
        mgr.release_all("P1"),
        Err(MemoryError::NotFound("P1".to_string()))
    );
}

#[test]
fn test_fill_to_capacity() {
    let mut mgr = MemoryManager::with_capacity(40);
    for i in 0..4 {
        mgr.request(&format!("P{}", i), 10, "W").unwrap();
    }

    let stats = mgr.stats();
    assert_eq!(stats.available_memory, 0);
    assert_eq!(stats.free_blocks, 0);
    assert_eq!(stats.memory_pressure(), MemoryPressure::Critical);
    assert!(matches!(
        mgr.request("P9", 1, "F"),
        Err(MemoryError::OutOfMemory { .. })
    ));

    for i in 0..4 {
        mgr.release(&format!("P{}", i)).unwrap();
    }
    assert_eq!(layout(&mgr), vec![(0, 40, None)]);
}

#[test]
fn test_owner_id_shapes() {
    let mut mgr = MemoryManager::with_capacity(50);
    assert!(mgr.request("123456789", 5, "F").is_ok());
    assert!(mgr.request("1234567890", 5, "F").is_err());
    assert!(OwnerId::new("").is_err());
    assert_eq!(mgr.stats().used_memory, 5);
}
