//! Reusable chunk storage.
//!
//! ```text
//!            acquire (queue empty)
//!   ┌──────────────────────────────────┐
//!   │                                  ▼
//! (new) ──────────────────────────► ACTIVE ─── recycle ───► FREE (queued)
//!                                     ▲                        │
//!                                     └── acquire (reuse) ─────┘
//!
//!   ACTIVE | FREE ─── destroy ───► (gone)
//! ```
//!
//! Every live handle is either active or queued for reuse, never both. Only
//! allocating from an empty queue and destroying change the live count.

use std::collections::{HashMap, VecDeque};

use crate::chunk::Chunk;
use crate::error::PoolError;

/// Opaque handle to a pooled chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkHandle(u64);

impl ChunkHandle {
  /// Get the raw ID value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
  Active,
  Free,
}

#[derive(Debug)]
struct Slot {
  chunk: Chunk,
  state: SlotState,
}

/// Owns chunk storage and recycles it instead of reallocating.
#[derive(Debug, Default)]
pub struct ChunkResourcePool {
  slots: HashMap<ChunkHandle, Slot>,
  recycle_queue: VecDeque<ChunkHandle>,
  next_id: u64,
  allocations: u64,
  destructions: u64,
}

impl ChunkResourcePool {
  pub fn new() -> Self {
    Self::default()
  }

  /// Take a chunk for activation.
  ///
  /// Reuses the oldest recycled chunk if one is queued, otherwise allocates.
  /// Returns the handle and whether it was reused.
  pub fn acquire(&mut self) -> (ChunkHandle, bool) {
    while let Some(handle) = self.recycle_queue.pop_front() {
      if let Some(slot) = self.slots.get_mut(&handle) {
        slot.state = SlotState::Active;
        slot.chunk.active = true;
        return (handle, true);
      }
    }

    let handle = ChunkHandle(self.next_id);
    self.next_id += 1;
    self.allocations += 1;
    self.slots.insert(
      handle,
      Slot {
        chunk: Chunk {
          active: true,
          ..Chunk::default()
        },
        state: SlotState::Active,
      },
    );
    tracing::trace!(handle = handle.0, "allocated chunk");

    (handle, false)
  }

  /// Return an active chunk to the reuse queue.
  pub fn recycle(&mut self, handle: ChunkHandle) -> Result<(), PoolError> {
    let slot = self
      .slots
      .get_mut(&handle)
      .ok_or(PoolError::UnknownHandle(handle))?;

    if slot.state != SlotState::Active {
      return Err(PoolError::NotActive(handle));
    }

    slot.state = SlotState::Free;
    slot.chunk.active = false;
    self.recycle_queue.push_back(handle);
    Ok(())
  }

  /// Release a chunk's storage. Valid for active and queued handles.
  pub fn destroy(&mut self, handle: ChunkHandle) -> Result<(), PoolError> {
    let slot = self
      .slots
      .remove(&handle)
      .ok_or(PoolError::UnknownHandle(handle))?;

    if slot.state == SlotState::Free {
      self.recycle_queue.retain(|&h| h != handle);
    }

    self.destructions += 1;
    Ok(())
  }

  /// Destroy every chunk still waiting in the reuse queue.
  ///
  /// Returns the number destroyed.
  pub fn destroy_recycled(&mut self) -> usize {
    let count = self.recycle_queue.len();
    for handle in self.recycle_queue.drain(..) {
      if self.slots.remove(&handle).is_some() {
        self.destructions += 1;
      }
    }
    count
  }

  /// Destroy every chunk, active or queued.
  ///
  /// Returns the number destroyed.
  pub fn destroy_all(&mut self) -> usize {
    let count = self.slots.len();
    self.slots.clear();
    self.recycle_queue.clear();
    self.destructions += count as u64;
    count
  }

  pub fn get(&self, handle: ChunkHandle) -> Option<&Chunk> {
    self.slots.get(&handle).map(|s| &s.chunk)
  }

  pub fn get_mut(&mut self, handle: ChunkHandle) -> Option<&mut Chunk> {
    self.slots.get_mut(&handle).map(|s| &mut s.chunk)
  }

  pub fn is_active(&self, handle: ChunkHandle) -> bool {
    self
      .slots
      .get(&handle)
      .is_some_and(|s| s.state == SlotState::Active)
  }

  /// Chunks currently allocated (active + queued).
  pub fn live_count(&self) -> usize {
    self.slots.len()
  }

  pub fn active_count(&self) -> usize {
    self.slots.len() - self.recycle_queue.len()
  }

  /// Chunks waiting in the reuse queue.
  pub fn free_count(&self) -> usize {
    self.recycle_queue.len()
  }

  /// Total allocations over the pool's lifetime.
  pub fn allocations(&self) -> u64 {
    self.allocations
  }

  /// Total destructions over the pool's lifetime.
  pub fn destructions(&self) -> u64 {
    self.destructions
  }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
