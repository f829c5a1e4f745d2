use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

use crate::error::Error;
use crate::error::Result;

/// One cell of the probe array.
///
/// A slot starts `Empty`, becomes `Occupied` on insert and turns into a
/// `Tombstone` on removal. Tombstones are never turned back into `Empty`;
/// only a rehash into a fresh array clears them.
#[derive(Clone, Debug)]
pub(crate) enum Slot<T> {
    Empty,
    /// `hash` caches the full hash of `value` so rehashing never calls back
    /// into the hasher and probes can skip `eq` on mismatched hashes.
    Occupied { hash: u64, value: T },
    Tombstone,
}

impl<T> Slot<T> {
    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&T> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn into_entry(self) -> Option<(u64, T)> {
        match self {
            Slot::Occupied { hash, value } => Some((hash, value)),
            _ => None,
        }
    }
}

/// A fixed-capacity, linearly probed array of [`Slot`]s.
///
/// This layer knows nothing about load factors: callers must keep at least
/// one non-occupied slot around or `locate` reports exhaustion for absent
/// keys.
#[derive(Clone, Debug)]
pub(crate) struct BucketArray<T> {
    slots: Box<[Slot<T>]>,
}

impl<T> BucketArray<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn start_index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    #[inline]
    fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }

    /// Probe distance of the entry at `index` from its start slot.
    #[cfg(any(test, feature = "stats"))]
    #[inline]
    pub(crate) fn probe_distance(&self, hash: u64, index: usize) -> usize {
        let start = self.start_index(hash);
        if index >= start {
            index - start
        } else {
            index + self.slots.len() - start
        }
    }

    /// Finds the slot for the value matching `hash` and `eq`.
    ///
    /// Returns the index of the matching occupied slot if the value is
    /// present, otherwise the slot an insert should use: the first
    /// tombstone passed on the way, or the empty slot that ended the probe.
    /// Returns `None` only when the probe wrapped all the way around without
    /// meeting a match, an empty slot or a tombstone.
    ///
    /// A match found after a tombstone is moved back into that tombstone, and
    /// its old slot becomes the tombstone. This shortens later probes for the
    /// same value, and is why lookups need `&mut self`.
    pub(crate) fn locate(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<usize> {
        let start = self.start_index(hash);
        let mut first_tombstone = None;
        let mut index = start;

        loop {
            match &self.slots[index] {
                Slot::Empty => return Some(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Occupied {
                    hash: slot_hash,
                    value,
                } => {
                    if *slot_hash == hash && eq(value) {
                        return Some(match first_tombstone {
                            Some(earlier) => {
                                self.relocate(index, earlier);
                                earlier
                            }
                            None => index,
                        });
                    }
                }
            }

            index = self.next_index(index);
            if index == start {
                return first_tombstone;
            }
        }
    }

    /// Same probe as [`locate`](Self::locate) without relocation. Returns
    /// the matching value only.
    pub(crate) fn peek(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        let start = self.start_index(hash);
        let mut index = start;

        loop {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied {
                    hash: slot_hash,
                    value,
                } => {
                    if *slot_hash == hash && eq(value) {
                        return Some(value);
                    }
                }
            }

            index = self.next_index(index);
            if index == start {
                return None;
            }
        }
    }

    #[inline]
    fn relocate(&mut self, from: usize, to: usize) {
        debug_assert!(matches!(self.slots[to], Slot::Tombstone));
        let slot = mem::replace(&mut self.slots[from], Slot::Tombstone);
        self.slots[to] = slot;
    }

    /// Inserts `value` unless a value matching `eq` is already present.
    ///
    /// Returns the slot index written.
    pub(crate) fn insert_at(
        &mut self,
        hash: u64,
        eq: impl Fn(&T) -> bool,
        value: T,
    ) -> Result<usize> {
        let index = self.locate(hash, eq).ok_or(Error::CapacityExhausted {
            capacity: self.capacity(),
        })?;
        if self.slots[index].is_occupied() {
            return Err(Error::DuplicateKey);
        }

        self.place(index, hash, value);
        Ok(index)
    }

    /// Writes an entry into a slot `locate` returned for an absent value.
    #[inline]
    pub(crate) fn place(&mut self, index: usize, hash: u64, value: T) {
        debug_assert!(!self.slots[index].is_occupied());
        self.slots[index] = Slot::Occupied { hash, value };
    }

    /// Inserts a value known to be absent. Used when rehashing into a fresh
    /// array, where no equality check is needed.
    ///
    /// # Panics
    ///
    /// Panics if every slot is occupied. The resize policy never lets that
    /// happen.
    pub(crate) fn insert_unique(&mut self, hash: u64, value: T) -> usize {
        let start = self.start_index(hash);
        let index = (start..self.slots.len())
            .chain(0..start)
            .find(|&index| !self.slots[index].is_occupied())
            .expect("rehash target has a free slot");

        self.place(index, hash, value);
        index
    }

    /// Removes the value matching `hash` and `eq`, leaving a tombstone.
    pub(crate) fn remove_at(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.locate(hash, eq)?;
        if !self.slots[index].is_occupied() {
            return None;
        }

        self.take(index, Slot::Tombstone).map(|(_, value)| value)
    }

    /// Replaces the slot at `index` with `with`, returning the previous entry
    /// if the slot was occupied.
    #[inline]
    pub(crate) fn take(&mut self, index: usize, with: Slot<T>) -> Option<(u64, T)> {
        mem::replace(&mut self.slots[index], with).into_entry()
    }

    #[inline]
    pub(crate) fn is_occupied(&self, index: usize) -> bool {
        self.slots[index].is_occupied()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots[index].value()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots[index].value_mut()
    }

    /// The value in an occupied slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot at `index` is not occupied.
    #[inline]
    pub(crate) fn value(&self, index: usize) -> &T {
        match &self.slots[index] {
            Slot::Occupied { value, .. } => value,
            _ => panic!("slot {index} is not occupied"),
        }
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> &mut T {
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => value,
            _ => panic!("slot {index} is not occupied"),
        }
    }

    /// Turns an occupied slot into a tombstone and returns its entry.
    #[inline]
    pub(crate) fn take_occupied(&mut self, index: usize) -> (u64, T) {
        match self.take(index, Slot::Tombstone) {
            Some(entry) => entry,
            None => panic!("slot {index} is not occupied"),
        }
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<T>] {
        &mut self.slots
    }

    /// Consumes the array, yielding its live entries in index order.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = (u64, T)> {
        self.slots.into_vec().into_iter().filter_map(Slot::into_entry)
    }

    pub(crate) fn into_slots(self) -> alloc::vec::IntoIter<Slot<T>> {
        self.slots.into_vec().into_iter()
    }
}
