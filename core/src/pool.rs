//! Slot-reuse pooling for transient entries.
//!
//! This module provides [`Pooled<T>`], a slot that preserves allocations
//! when a value is no longer in use, and [`EntryPool<T>`], an append-only
//! arena of such slots addressed by index.
//!
//! A slot is either [`Active`](Pooled::Active) (occupied) or
//! [`Pooled`](Pooled::Pooled) (free). Releasing a slot resets the value but
//! keeps its memory (e.g. `String` capacity), so registering into a free slot
//! does not allocate.
//!
//! # Example
//!
//! ```
//! use overlay_core::pool::{EntryPool, Poolable};
//!
//! #[derive(Debug, Default)]
//! struct Label {
//!     text: String,
//!     timer: f32,
//! }
//!
//! impl Poolable for Label {
//!     fn new_empty() -> Self {
//!         Self::default()
//!     }
//!     fn reset(&mut self) {
//!         self.text.clear();
//!         self.timer = 0.0;
//!     }
//! }
//!
//! let mut pool = EntryPool::<Label>::new();
//! let a = pool.register(|l| l.text.push_str("a"));
//! let b = pool.register(|l| l.text.push_str("b"));
//! assert_eq!((a, b), (0, 1));
//!
//! // Free slot 0; the next registration reuses it instead of appending.
//! pool.release(a);
//! let c = pool.register(|l| l.text.push_str("c"));
//! assert_eq!(c, 0);
//! assert_eq!(pool.len(), 2);
//! ```

/// Trait for types that can be pooled and reused.
///
/// Implementors must be able to create an empty instance and clear their
/// contents while preserving allocated capacity.
pub trait Poolable {
    /// Create a new empty instance for a freshly appended slot.
    fn new_empty() -> Self;

    /// Reset the value to an empty state, preserving allocated capacity.
    ///
    /// Owned references to external objects (callbacks, handles) must be
    /// dropped here so a free slot holds nothing alive.
    fn reset(&mut self);
}

/// A slot that preserves allocations across occupied/free transitions.
#[derive(Debug)]
pub enum Pooled<T: Poolable> {
    /// The slot is occupied and contains valid data.
    Active(T),
    /// The slot is free; the value is cleared but its allocation is kept.
    Pooled(T),
}

impl<T: Poolable> Pooled<T> {
    /// Create a new slot in active state with the given value.
    pub fn new(value: T) -> Self {
        Self::Active(value)
    }

    /// Check if the slot is occupied.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Check if the slot is free.
    pub fn is_pooled(&self) -> bool {
        matches!(self, Self::Pooled(_))
    }

    /// Get a reference to the active value, or `None` if the slot is free.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Active(t) => Some(t),
            Self::Pooled(_) => None,
        }
    }

    /// Get a mutable reference to the active value, or `None` if the slot is free.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Active(t) => Some(t),
            Self::Pooled(_) => None,
        }
    }

    /// Free the slot. Resets the value but preserves its allocation.
    /// No-op if already free.
    pub fn release(&mut self) {
        if matches!(self, Self::Active(_)) {
            let taken = std::mem::replace(self, Self::Pooled(T::new_empty()));
            if let Self::Active(mut t) = taken {
                t.reset();
                *self = Self::Pooled(t);
            }
        }
    }

    /// Occupy the slot and return the value for the caller to fill in.
    ///
    /// If already active, returns the existing value.
    pub fn activate(&mut self) -> &mut T {
        if matches!(self, Self::Pooled(_)) {
            let taken = std::mem::replace(self, Self::Active(T::new_empty()));
            if let Self::Pooled(t) = taken {
                *self = Self::Active(t);
            }
        }
        match self {
            Self::Active(t) => t,
            Self::Pooled(t) => t,
        }
    }

    /// Get a reference to the inner value regardless of state.
    pub fn inner(&self) -> &T {
        match self {
            Self::Active(t) | Self::Pooled(t) => t,
        }
    }
}

impl<T: Poolable> Default for Pooled<T> {
    fn default() -> Self {
        Self::Pooled(T::new_empty())
    }
}

/// Append-only arena of [`Pooled`] slots.
///
/// Registration is a first-fit scan in index order, so it costs O(n) in the
/// pool's current size. The pool never shrinks; a slot index stays valid for
/// the lifetime of the pool.
#[derive(Debug)]
pub struct EntryPool<T: Poolable> {
    slots: Vec<Pooled<T>>,
    active: usize,
}

impl<T: Poolable> EntryPool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            active: 0,
        }
    }

    /// Create an empty pool with room for `capacity` slots before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            active: 0,
        }
    }

    /// Occupy the first free slot (or append one) and fill it with `fill`.
    ///
    /// Returns the slot index.
    pub fn register(&mut self, fill: impl FnOnce(&mut T)) -> usize {
        let index = match self.slots.iter().position(Pooled::is_pooled) {
            Some(index) => index,
            None => {
                self.slots.push(Pooled::default());
                log::debug!(
                    "{} pool grew to {} slots",
                    std::any::type_name::<T>(),
                    self.slots.len()
                );
                self.slots.len() - 1
            }
        };
        fill(self.slots[index].activate());
        self.active += 1;
        index
    }

    /// Free the slot at `index`. No-op if it is already free or out of range.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.is_active() {
                slot.release();
                self.active -= 1;
            }
        }
    }

    /// Free every slot.
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.release();
        }
        self.active = 0;
    }

    /// Visit every occupied slot in index order and free those for which
    /// `pred` returns `true`. Returns the number of freed slots.
    pub fn release_where(&mut self, mut pred: impl FnMut(&mut T) -> bool) -> usize {
        let mut freed = 0;
        for slot in &mut self.slots {
            let release = match slot.get_mut() {
                Some(value) => pred(value),
                None => false,
            };
            if release {
                slot.release();
                freed += 1;
            }
        }
        self.active -= freed;
        freed
    }

    /// Check whether the slot at `index` is occupied.
    pub fn is_occupied(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Pooled::is_active)
    }

    /// Get the occupied value at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Pooled::get)
    }

    /// Get the occupied value at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Pooled::get_mut)
    }

    /// Total number of slots, occupied or free.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the pool has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots.
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Iterate occupied values in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Pooled::get)
    }

    /// Iterate occupied values mutably in index order.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(Pooled::get_mut)
    }
}

impl<T: Poolable> Default for EntryPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
