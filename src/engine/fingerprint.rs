//! Bounded memory of board fingerprints already visited by the search.

use std::collections::HashSet;
use std::hash::Hash;
use std::num::NonZero;

/// Fixed-capacity FIFO queue over a circular buffer.
#[derive(Clone, Debug)]
pub(crate) struct RingQueue<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> RingQueue<T> {
    pub(crate) fn with_capacity(capacity: NonZero<usize>) -> Self {
        Self {
            slots: (0..capacity.get()).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Append `item` at the back. Returns it unchanged if the queue is full.
    pub(crate) fn push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }

        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the oldest item.
    pub(crate) fn shift(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let item = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        item
    }

    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }
}

/// Default number of fingerprints remembered by a [`FingerprintCache`].
pub const DEFAULT_FINGERPRINT_CAPACITY: NonZero<usize> = match NonZero::new(10_000) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// A bounded set of board fingerprints with first-in-first-out eviction.
///
/// Forgetting a fingerprint only means a board may be explored twice, so the bound trades memory for redundant work and
/// never affects correctness.
#[derive(Clone, Debug)]
pub struct FingerprintCache<F> {
    members: HashSet<F>,
    order: RingQueue<F>,
}

impl<F> FingerprintCache<F>
where
    F: Hash + Eq + Clone,
{
    /// An empty cache remembering at most `capacity` fingerprints.
    pub fn with_capacity(capacity: NonZero<usize>) -> Self {
        Self {
            members: HashSet::with_capacity(capacity.get()),
            order: RingQueue::with_capacity(capacity),
        }
    }

    /// Test-and-set: report whether `fingerprint` was already present, inserting it if not.
    ///
    /// When the cache is full, the oldest fingerprint is evicted before the new one is recorded.
    pub fn seen(&mut self, fingerprint: F) -> bool {
        if self.members.contains(&fingerprint) {
            return true;
        }

        if self.order.is_full() {
            if let Some(oldest) = self.order.shift() {
                self.members.remove(&oldest);
            }
        }

        self.members.insert(fingerprint.clone());
        let pushed = self.order.push(fingerprint);
        debug_assert!(pushed.is_ok(), "a slot was freed above");
        false
    }

    /// Number of fingerprints currently remembered.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }
}

impl<F> Default for FingerprintCache<F>
where
    F: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::with_capacity(DEFAULT_FINGERPRINT_CAPACITY)
    }
}
