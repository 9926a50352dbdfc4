use crate::furnace::SLOT_COUNT;

/// Tracks which slots (and the burn/cook counters) have been modified since
/// the last clean point.
///
/// The owning container drains this to schedule persistence write-back
/// instead of receiving a callback per mutation. Call
/// [`mark_clean`](ChangeTracker::mark_clean) after writing state out.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    dirty_slots: [bool; SLOT_COUNT],
    counters_dirty: bool,
    any_dirty: bool,
}

impl ChangeTracker {
    /// Create a new tracker with nothing dirty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a single slot as dirty (contents changed).
    pub fn mark_slot(&mut self, slot_index: usize) {
        self.dirty_slots[slot_index] = true;
        self.any_dirty = true;
    }

    /// Mark the burn/cook counters as dirty.
    pub fn mark_counters(&mut self) {
        self.counters_dirty = true;
        self.any_dirty = true;
    }

    /// Returns `true` if anything has been marked dirty since the last clean.
    pub fn is_dirty(&self) -> bool {
        self.any_dirty
    }

    /// Returns `true` if the given slot has been marked dirty.
    pub fn is_slot_dirty(&self, slot_index: usize) -> bool {
        self.dirty_slots[slot_index]
    }

    /// Returns `true` if the counters have been marked dirty.
    pub fn counters_dirty(&self) -> bool {
        self.counters_dirty
    }

    /// Per-slot dirty flags, indexed by slot.
    pub fn dirty_slots(&self) -> &[bool; SLOT_COUNT] {
        &self.dirty_slots
    }

    /// Reset all dirty flags, marking everything as clean.
    pub fn mark_clean(&mut self) {
        self.dirty_slots = [false; SLOT_COUNT];
        self.counters_dirty = false;
        self.any_dirty = false;
    }
}
