use super::*;

#[test]
fn test_acquire_allocates_when_empty() {
  let mut pool = ChunkResourcePool::new();
  let (a, reused_a) = pool.acquire();
  let (b, reused_b) = pool.acquire();

  assert!(!reused_a && !reused_b);
  assert_ne!(a, b);
  assert_eq!(pool.live_count(), 2);
  assert_eq!(pool.active_count(), 2);
  assert_eq!(pool.allocations(), 2);
  assert!(pool.get(a).unwrap().active);
}

#[test]
fn test_recycle_then_acquire_reuses() {
  let mut pool = ChunkResourcePool::new();
  let (a, _) = pool.acquire();
  pool.recycle(a).unwrap();

  assert_eq!(pool.free_count(), 1);
  assert_eq!(pool.active_count(), 0);
  assert!(!pool.is_active(a));
  assert!(!pool.get(a).unwrap().active);

  let (b, reused) = pool.acquire();
  assert!(reused);
  assert_eq!(a, b);
  assert_eq!(pool.allocations(), 1, "Reuse must not allocate");
  assert_eq!(pool.free_count(), 0);
  assert!(pool.is_active(b));
}

#[test]
fn test_reuse_is_fifo() {
  let mut pool = ChunkResourcePool::new();
  let (a, _) = pool.acquire();
  let (b, _) = pool.acquire();
  pool.recycle(b).unwrap();
  pool.recycle(a).unwrap();

  assert_eq!(pool.acquire().0, b);
  assert_eq!(pool.acquire().0, a);
}

#[test]
fn test_recycle_twice_is_error() {
  let mut pool = ChunkResourcePool::new();
  let (a, _) = pool.acquire();
  pool.recycle(a).unwrap();

  assert_eq!(pool.recycle(a), Err(PoolError::NotActive(a)));
  assert_eq!(pool.free_count(), 1, "Handle must not be queued twice");
}

#[test]
fn test_destroyed_handle_is_unknown() {
  let mut pool = ChunkResourcePool::new();
  let (a, _) = pool.acquire();
  pool.destroy(a).unwrap();

  assert_eq!(pool.destroy(a), Err(PoolError::UnknownHandle(a)));
  assert_eq!(pool.recycle(a), Err(PoolError::UnknownHandle(a)));
  assert!(pool.get(a).is_none());
  assert_eq!(pool.live_count(), 0);
  assert_eq!(pool.destructions(), 1);
}

#[test]
fn test_destroy_queued_handle_leaves_queue() {
  let mut pool = ChunkResourcePool::new();
  let (a, _) = pool.acquire();
  pool.recycle(a).unwrap();
  pool.destroy(a).unwrap();

  assert_eq!(pool.free_count(), 0);
  let (b, reused) = pool.acquire();
  assert!(!reused, "Destroyed chunk must not be handed out");
  assert_ne!(a, b);
}

#[test]
fn test_destroy_recycled_empties_queue() {
  let mut pool = ChunkResourcePool::new();
  let handles: Vec<_> = (0..4).map(|_| pool.acquire().0).collect();
  for &h in &handles[..3] {
    pool.recycle(h).unwrap();
  }

  assert_eq!(pool.destroy_recycled(), 3);
  assert_eq!(pool.free_count(), 0);
  assert_eq!(pool.live_count(), 1);
  assert!(pool.is_active(handles[3]));
  assert_eq!(pool.destructions(), 3);
}

#[test]
fn test_live_count_changes_only_on_allocate_and_destroy() {
  let mut pool = ChunkResourcePool::new();
  let (a, _) = pool.acquire();
  let (b, _) = pool.acquire();
  assert_eq!(pool.live_count(), 2);

  pool.recycle(a).unwrap();
  assert_eq!(pool.live_count(), 2);
  let _ = pool.acquire();
  assert_eq!(pool.live_count(), 2);

  pool.destroy(b).unwrap();
  assert_eq!(pool.live_count(), 1);
}

#[test]
fn test_destroy_all() {
  let mut pool = ChunkResourcePool::new();
  let (a, _) = pool.acquire();
  let _ = pool.acquire();
  pool.recycle(a).unwrap();

  assert_eq!(pool.destroy_all(), 2);
  assert_eq!(pool.live_count(), 0);
  assert_eq!(pool.free_count(), 0);
  assert_eq!(pool.destructions(), 2);
}
