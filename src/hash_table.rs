use alloc::vec::IntoIter as VecIntoIter;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;

use crate::bucket_array::BucketArray;
use crate::bucket_array::Slot;
use crate::config::Config;
use crate::error::Error;
use crate::error::Result;

/// Debug statistics for hash table analysis.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Number of slots in the bucket array
    pub capacity: usize,
    /// Position of `capacity` in the capacity sequence
    pub capacity_index: usize,
    /// Slots left behind by removals
    pub tombstones: usize,
    /// Slots never written since the last resize
    pub empty_slots: usize,
    /// Element count at which the next insert grows the table
    pub grow_at: usize,
    /// Element count at or below which a remove shrinks the table
    pub shrink_at: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Longest distance from any element to its start slot
    pub longest_probe: usize,
    /// Mean distance from an element to its start slot
    pub mean_probe: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Capacity: index {} (grows at {}, shrinks at {})",
            self.capacity_index, self.grow_at, self.shrink_at
        );
        println!(
            "Slots: {} occupied, {} tombstones, {} empty",
            self.populated, self.tombstones, self.empty_slots
        );
        println!(
            "Probe distance: {} longest, {:.02} mean",
            self.longest_probe, self.mean_probe
        );
    }
}

/// Number of probe distances [`ProbeHistogram::print`] shows individually;
/// longer distances share the last row.
#[cfg(any(test, feature = "stats"))]
const HISTOGRAM_ROWS: usize = 16;

/// Counts of elements by distance from their start slot.
///
/// `bins()[d]` is the number of elements found `d` slots past the slot their
/// hash maps to. Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    bins: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Element counts indexed by probe distance.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Total number of elements counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// The longest probe distance of any element, if there are any.
    pub fn longest(&self) -> Option<usize> {
        self.bins.iter().rposition(|&count| count != 0)
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let rows = self
            .bins
            .iter()
            .copied()
            .take(HISTOGRAM_ROWS)
            .collect::<Vec<_>>();
        let tail = self.bins.iter().skip(HISTOGRAM_ROWS).sum::<usize>();

        let max = rows.iter().copied().chain([tail]).max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let full = units / 8;
            let rem = units % 8;
            let mut bar = "█".repeat(full);
            if rem > 0 {
                let ch = match rem {
                    1 => '▏',
                    2 => '▎',
                    3 => '▍',
                    4 => '▌',
                    5 => '▋',
                    6 => '▊',
                    7 => '▉',
                    _ => unreachable!(),
                };
                bar.push(ch);
            }
            bar
        };

        for (i, &count) in rows.iter().enumerate() {
            println!("{:>3} | {} ({})", i, make_bar(count), count);
        }
        if self.bins.len() > HISTOGRAM_ROWS {
            println!("{:>2}+ | {} ({})", HISTOGRAM_ROWS, make_bar(tail), tail);
        }
    }
}

/// An open-addressing hash table with linear probing and tombstones.
///
/// `HashTable<T>` stores values of type `T`. Like a raw table it does not
/// hash anything itself: every operation takes the value's 64-bit hash and
/// an equality predicate, and the caller must keep the two consistent
/// (`eq(a) && eq(b)` implies equal hashes). [`HashMap`](crate::HashMap) wraps
/// this with a `BuildHasher`.
///
/// ## Resizing
///
/// The bucket array is always sized from the configured
/// [`CapacitySequence`](crate::CapacitySequence). An insert that would bring
/// the load factor up to the grow threshold first moves the table to the next
/// capacity, and a remove that brings it down to the shrink threshold moves it
/// back, rehashing every element into a fresh array each time. A fresh array
/// has no tombstones.
///
/// ## Lookups move elements
///
/// [`find`](Self::find) and friends take `&mut self`: when the probe for an
/// element passes a tombstone, the element is moved back into that tombstone
/// so later probes are shorter. The logical content never changes.
/// [`peek`](Self::peek) does the same search through `&self` without moving
/// anything.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use probe_hash::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::new();
/// let hash = hash_id(123);
///
/// table
///     .insert(hash, |p: &Person| p.id == 123, Person {
///         id: 123,
///         name: "Alice".to_string(),
///     })
///     .unwrap();
///
/// let alice = table.find(hash, |p| p.id == 123).unwrap();
/// assert_eq!(alice.name, "Alice");
///
/// let duplicate = table.insert(hash, |p| p.id == 123, Person {
///     id: 123,
///     name: "Bob".to_string(),
/// });
/// assert_eq!(duplicate, Err(probe_hash::Error::DuplicateKey));
/// ```
#[derive(Clone)]
pub struct HashTable<T> {
    buckets: BucketArray<T>,
    config: Config,

    populated: usize,
    cursor: usize,
    grow_at: usize,
    shrink_at: usize,
}

impl<T> Debug for HashTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;
        use alloc::string::ToString;

        if self.is_empty() {
            return f
                .debug_struct("HashTable")
                .field("slots", &"empty")
                .field("populated", &self.populated)
                .field("capacity", &self.capacity())
                .finish();
        }

        f.debug_struct("HashTable")
            .field(
                "slots",
                &self
                    .buckets
                    .slots()
                    .chunks(16)
                    .map(|row| {
                        row.iter()
                            .map(|slot| match slot {
                                Slot::Empty => "..".to_string(),
                                Slot::Tombstone => "xx".to_string(),
                                Slot::Occupied { hash, .. } => format!("{:02x}", *hash as u8),
                            })
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .collect::<Vec<String>>(),
            )
            .field("populated", &self.populated)
            .field("capacity", &self.capacity())
            .field("capacity_index", &self.cursor)
            .finish()
    }
}

impl<T> Default for HashTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HashTable<T> {
    /// Creates an empty table at the floor capacity with the default
    /// [`Config`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::new();
    /// assert_eq!(table.capacity(), 7);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty table at the floor capacity of `config`'s sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::CapacitySequence;
    /// # use probe_hash::Config;
    /// # use probe_hash::HashTable;
    /// #
    /// static CAPACITIES: [usize; 3] = [3, 7, 13];
    ///
    /// let config = Config::new(0.75, 0.25)
    ///     .unwrap()
    ///     .with_capacities(CapacitySequence::new(&CAPACITIES).unwrap());
    /// let table: HashTable<u32> = HashTable::with_config(config);
    /// assert_eq!(table.capacity(), 3);
    /// ```
    pub fn with_config(config: Config) -> Self {
        let floor = config.capacities().floor();
        Self {
            buckets: BucketArray::new(floor),
            config,
            populated: 0,
            cursor: 0,
            grow_at: config.grow_at(floor),
            shrink_at: config.shrink_at(floor),
        }
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns the number of slots in the bucket array.
    ///
    /// This is always an entry of the configured capacity sequence. The
    /// table holds fewer elements than this; see [`Config`].
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    /// Position of [`capacity`](Self::capacity) in the capacity sequence.
    pub fn capacity_index(&self) -> usize {
        self.cursor
    }

    /// `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.populated as f64 / self.capacity() as f64
    }

    /// The resize policy this table was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Inserts `value` unless a value matching `eq` is already present.
    ///
    /// Grows the table first when the new element would bring the load
    /// factor up to the grow threshold.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateKey`] if a matching value is present. The table
    ///   is not resized and `value` is dropped.
    /// - [`Error::CapacityExhausted`] if growth is needed and no larger
    ///   capacity in the sequence can hold the new element. Nothing changes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::Error;
    /// # use probe_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.insert(7, |&v: &u64| v == 7, 7), Ok(()));
    /// assert_eq!(table.insert(7, |&v: &u64| v == 7, 7), Err(Error::DuplicateKey));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, hash: u64, eq: impl Fn(&T) -> bool, value: T) -> Result<()> {
        if self.populated + 1 < self.grow_at {
            self.buckets.insert_at(hash, eq, value)?;
            self.populated += 1;
            return Ok(());
        }

        // Growing must wait until the duplicate check has passed.
        match self.entry(hash, eq) {
            Entry::Occupied(_) => Err(Error::DuplicateKey),
            Entry::Vacant(entry) => entry.insert(value).map(|_| ()),
        }
    }

    /// Gets the entry for the value matching `hash` and `eq`.
    ///
    /// The probe (and any relocation it does) happens here. The table only
    /// grows when a [`VacantEntry`] is actually filled, so looking up a
    /// vacant entry and dropping it never resizes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::Entry;
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    ///
    /// match table.entry(5, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string()).unwrap();
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         entry.get_mut().push('!');
    ///     }
    /// }
    ///
    /// table
    ///     .entry(5, |s: &String| s == "hello")
    ///     .and_modify(|s| s.push('!'));
    /// assert_eq!(table.peek(5, |s| s == "hello!"), Some(&"hello!".to_string()));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Entry<'_, T> {
        match self.buckets.locate(hash, eq) {
            Some(index) if self.buckets.is_occupied(index) => {
                Entry::Occupied(OccupiedEntry { table: self, index })
            }
            slot => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                slot,
            }),
        }
    }

    /// Removes and returns the value matching `hash` and `eq`.
    ///
    /// The slot becomes a tombstone. Shrinks the table afterwards when the
    /// load factor drops to the shrink threshold.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no value matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::Error;
    /// # use probe_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(42, |&n: &u64| n == 42, 42).unwrap();
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Ok(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(42, |&n| n == 42), Err(Error::KeyNotFound));
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Result<T> {
        let value = self
            .buckets
            .remove_at(hash, eq)
            .ok_or(Error::KeyNotFound)?;
        self.removed();

        Ok(value)
    }

    #[inline]
    fn removed(&mut self) {
        self.populated -= 1;
        if self.populated <= self.shrink_at {
            self.shrink();
        }
    }

    /// Finds the value matching `hash` and `eq`.
    ///
    /// May move the value into an earlier tombstone on its probe path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(42, |&n: &u64| n == 42, 42).unwrap();
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(99, |&n| n == 99), None);
    /// ```
    #[inline]
    pub fn find(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        if self.populated == 0 {
            return None;
        }

        let index = self.buckets.locate(hash, eq)?;
        self.buckets.get(index)
    }

    /// Finds the value matching `hash` and `eq`, returning a mutable
    /// reference.
    ///
    /// The caller must not change the value in a way that changes its hash
    /// or equality.
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&mut T> {
        if self.populated == 0 {
            return None;
        }

        let index = self.buckets.locate(hash, eq)?;
        self.buckets.get_mut(index)
    }

    /// Replaces the value matching `hash` and `eq`, returning the old one.
    ///
    /// The new value must hash and compare the same as the old one. Never
    /// resizes.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no value matches.
    pub fn update(&mut self, hash: u64, eq: impl Fn(&T) -> bool, value: T) -> Result<T> {
        let slot = self.find_mut(hash, eq).ok_or(Error::KeyNotFound)?;
        Ok(mem::replace(slot, value))
    }

    /// Finds the value matching `hash` and `eq` without moving anything.
    #[inline]
    pub fn peek(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        if self.populated == 0 {
            return None;
        }

        self.buckets.peek(hash, eq)
    }

    /// Returns `true` if a value matches `hash` and `eq`.
    #[inline]
    pub fn contains(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> bool {
        self.find(hash, eq).is_some()
    }

    /// Calls `f` on every value, in bucket array order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for n in 1..=3u64 {
    ///     table.insert(n, |&v: &u64| v == n, n).unwrap();
    /// }
    ///
    /// let mut sum = 0;
    /// table.for_each(|&n| sum += n);
    /// assert_eq!(sum, 6);
    /// ```
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        for value in self.iter() {
            f(value);
        }
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Values come in bucket array order, which is neither insertion order
    /// nor stable across resizes.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.buckets.slots().iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over mutable references to all values.
    ///
    /// The caller must not change values in a way that changes their hash or
    /// equality.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            remaining: self.populated,
            slots: self.buckets.slots_mut().iter_mut(),
        }
    }

    /// Returns an iterator that removes and yields all values from the
    /// table.
    ///
    /// When the iterator is dropped, even part way through, the table is left
    /// empty at its floor capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1, |&v: &u64| v == 1, 1).unwrap();
    /// table.insert(2, |&v: &u64| v == 2, 2).unwrap();
    ///
    /// let mut values: Vec<u64> = table.drain().collect();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            table: self,
            slot_index: 0,
        }
    }

    /// Removes all elements and returns the table to its floor capacity.
    pub fn clear(&mut self) {
        let floor = self.config.capacities().floor();
        self.resize(0, BucketArray::new(floor));
        self.populated = 0;
    }

    /// Moves the table to the first capacity after the current one that can
    /// hold `required` elements below the grow threshold.
    #[cold]
    fn grow(&mut self, required: usize) -> Result<()> {
        let capacities = self.config.capacities().as_slice();
        let cursor = (self.cursor + 1..capacities.len())
            .find(|&cursor| required < self.config.grow_at(capacities[cursor]))
            .ok_or(Error::CapacityExhausted {
                capacity: self.capacity(),
            })?;

        self.rehash(cursor);
        Ok(())
    }

    /// Moves the table to a smaller capacity while the load factor is at or
    /// below the shrink threshold, stopping at the floor or before a capacity
    /// the current elements would immediately outgrow.
    #[cold]
    fn shrink(&mut self) {
        let capacities = self.config.capacities().as_slice();
        let mut cursor = self.cursor;
        while cursor > 0
            && self.populated <= self.config.shrink_at(capacities[cursor])
            && self.populated < self.config.grow_at(capacities[cursor - 1])
        {
            cursor -= 1;
        }

        if cursor != self.cursor {
            self.rehash(cursor);
        }
    }

    fn rehash(&mut self, cursor: usize) {
        let capacity = self.config.capacities().as_slice()[cursor];
        let old = self.resize(cursor, BucketArray::new(capacity));
        for (hash, value) in old.into_entries() {
            self.buckets.insert_unique(hash, value);
        }
    }

    /// Installs `buckets` as the array for capacity index `cursor`, returning
    /// the previous array.
    fn resize(&mut self, cursor: usize, buckets: BucketArray<T>) -> BucketArray<T> {
        let capacity = buckets.capacity();
        debug_assert_eq!(self.config.capacities().get(cursor), Some(capacity));

        self.cursor = cursor;
        self.grow_at = self.config.grow_at(capacity);
        self.shrink_at = self.config.shrink_at(capacity);
        mem::replace(&mut self.buckets, buckets)
    }

    /// Computes a histogram of probe distances for the current table state.
    ///
    /// The probe distance of an element is how many slots past its start slot
    /// (`hash % capacity`) it sits, wrapping around the end of the array.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mut bins = Vec::new();
        for (index, slot) in self.buckets.slots().iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let distance = self.buckets.probe_distance(*hash, index);
                if bins.len() <= distance {
                    bins.resize(distance + 1, 0);
                }
                bins[distance] += 1;
            }
        }

        ProbeHistogram { bins }
    }

    /// Returns detailed utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let mut tombstones = 0;
        let mut empty_slots = 0;
        for slot in self.buckets.slots() {
            match slot {
                Slot::Empty => empty_slots += 1,
                Slot::Tombstone => tombstones += 1,
                Slot::Occupied { .. } => {}
            }
        }

        let histogram = self.probe_histogram();
        let total_distance = histogram
            .bins()
            .iter()
            .enumerate()
            .map(|(distance, &count)| distance * count)
            .sum::<usize>();

        DebugStats {
            populated: self.populated,
            capacity: self.capacity(),
            capacity_index: self.cursor,
            tombstones,
            empty_slots,
            grow_at: self.grow_at,
            shrink_at: self.shrink_at,
            load_factor: self.load_factor(),
            longest_probe: histogram.longest().unwrap_or(0),
            mean_probe: if self.populated == 0 {
                0.0
            } else {
                total_distance as f64 / self.populated as f64
            },
        }
    }
}

impl<T> IntoIterator for HashTable<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.populated,
            slots: self.buckets.into_slots(),
        }
    }
}

impl<'a, T> IntoIterator for &'a HashTable<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
/// It yields `&T` references in bucket array order.
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, T> {
    slots: core::slice::Iter<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let value = self.slots.by_ref().find_map(Slot::value)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// A mutable iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter_mut`] method on [`HashTable`].
///
/// [`iter_mut`]: HashTable::iter_mut
pub struct IterMut<'a, T> {
    slots: core::slice::IterMut<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let value = self.slots.by_ref().find_map(Slot::value_mut)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<T> {
    slots: VecIntoIter<Slot<T>>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.slots.by_ref().find_map(Slot::into_entry)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
/// It yields owned `T` values and empties the table as it iterates.
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, T> {
    table: &'a mut HashTable<T>,
    slot_index: usize,
}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        for _ in &mut *self {}

        self.table.clear();
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.table.populated == 0 {
            return None;
        }

        while self.slot_index < self.table.buckets.capacity() {
            let index = self.slot_index;
            self.slot_index += 1;

            if let Some((_, value)) = self.table.buckets.take(index, Slot::Tombstone) {
                self.table.populated -= 1;
                return Some(value);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.populated, Some(self.table.populated))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, T> {
    /// A vacant entry - no matching value is in the table
    Vacant(VacantEntry<'a, T>),
    /// An occupied entry - a matching value is in the table
    Occupied(OccupiedEntry<'a, T>),
}

impl<'a, T> Entry<'a, T> {
    /// Returns the existing value, or inserts the result of `default`.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExhausted`] if inserting needs growth the capacity
    /// sequence cannot provide.
    pub fn or_insert_with(self, default: impl FnOnce() -> T) -> Result<&'a mut T> {
        match self {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Calls `f` on the value if the entry is occupied.
    pub fn and_modify(self, f: impl FnOnce(&mut T)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, T> {
    table: &'a mut HashTable<T>,
    hash: u64,
    slot: Option<usize>,
}

impl<'a, T> VacantEntry<'a, T> {
    /// Inserts `value` into the table, growing it first if the new element
    /// would reach the grow threshold.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExhausted`] if growth is needed and no larger
    /// capacity can hold the new element. The table is unchanged.
    pub fn insert(self, value: T) -> Result<&'a mut T> {
        let table = self.table;
        let index = match self.slot {
            Some(index) if table.populated + 1 < table.grow_at => {
                table.buckets.place(index, self.hash, value);
                index
            }
            _ => {
                table.grow(table.populated + 1)?;
                table.buckets.insert_unique(self.hash, value)
            }
        };

        table.populated += 1;
        Ok(table.buckets.value_mut(index))
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, T> {
    table: &'a mut HashTable<T>,
    index: usize,
}

impl<'a, T> OccupiedEntry<'a, T> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &T {
        self.table.buckets.value(self.index)
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut T {
        self.table.buckets.value_mut(self.index)
    }

    /// Converts the entry into a mutable reference bound to the table's
    /// lifetime.
    pub fn into_mut(self) -> &'a mut T {
        self.table.buckets.value_mut(self.index)
    }

    /// Removes the value, leaving a tombstone, and shrinks the table if the
    /// load factor drops to the shrink threshold.
    pub fn remove(self) -> T {
        let (_, value) = self.table.buckets.take_occupied(self.index);
        self.table.removed();
        value
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use core::hash::Hash;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;
    use crate::capacity::CapacitySequence;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        key: u64,
        value: i32,
    }

    fn item(key: u64) -> Item {
        Item {
            key,
            value: key as i32 * 2,
        }
    }

    fn hash_key(state: &HashState, key: u64) -> u64 {
        let mut h = state.build_hasher();
        h.write_u64(key);
        h.finish()
    }

    fn insert(table: &mut HashTable<Item>, state: &HashState, key: u64) -> Result<()> {
        table.insert(hash_key(state, key), |v| v.key == key, item(key))
    }

    fn remove(table: &mut HashTable<Item>, state: &HashState, key: u64) -> Result<Item> {
        table.remove(hash_key(state, key), |v| v.key == key)
    }

    fn find<'a>(table: &'a mut HashTable<Item>, state: &HashState, key: u64) -> Option<&'a Item> {
        table.find(hash_key(state, key), |v| v.key == key)
    }

    /// Checks the occupancy bookkeeping and load factor bounds.
    fn assert_invariants<T>(table: &HashTable<T>) {
        let stats = table.debug_stats();
        assert_eq!(
            stats.populated + stats.tombstones + stats.empty_slots,
            stats.capacity
        );
        assert_eq!(table.iter().count(), table.len());
        assert_eq!(
            table.config().capacities().get(table.capacity_index()),
            Some(table.capacity())
        );

        assert!(
            table.load_factor() < table.config().grow_threshold(),
            "{:#?}",
            table
        );
        if table.capacity_index() > 0 {
            assert!(
                table.load_factor() > table.config().shrink_threshold(),
                "{:#?}",
                table
            );
        }
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..32u64 {
            insert(&mut table, &state, k).unwrap();
            assert_eq!(find(&mut table, &state, k), Some(&item(k)));
            assert_invariants(&table);
        }
        assert_eq!(table.len(), 32);
        for k in 0..32u64 {
            assert_eq!(find(&mut table, &state, k), Some(&item(k)));
        }

        assert!(find(&mut table, &state, 999).is_none());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let k = 42u64;
        let hash = hash_key(&state, k);

        table.insert(hash, |v| v.key == k, Item { key: k, value: 7 }).unwrap();
        assert_eq!(
            table.insert(hash, |v| v.key == k, Item { key: k, value: 11 }),
            Err(Error::DuplicateKey)
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table.find(hash, |v| v.key == k).unwrap().value, 7);
    }

    #[test]
    fn duplicate_insert_does_not_grow() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..3u64 {
            table.insert(k, |&v| v == k, k).unwrap();
        }
        // A fourth element would reach the grow threshold at capacity 7.
        assert_eq!(table.capacity(), 7);
        assert_eq!(table.insert(2, |&v| v == 2, 2), Err(Error::DuplicateKey));
        assert_eq!(table.capacity(), 7);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn find_mut_and_modify() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..5u64 {
            insert(&mut table, &state, k).unwrap();
        }

        for k in 0..5u64 {
            let hash = hash_key(&state, k);
            if let Some(v) = table.find_mut(hash, |v| v.key == k) {
                v.value += 9;
            }
        }
        for k in 0..5u64 {
            let v = find(&mut table, &state, k).unwrap();
            assert_eq!(v.value, k as i32 * 2 + 9);
        }
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn update_replaces_in_place() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..3u64 {
            insert(&mut table, &state, k).unwrap();
        }

        let hash = hash_key(&state, 1);
        let old = table.update(hash, |v| v.key == 1, Item { key: 1, value: 77 });
        assert_eq!(old, Ok(item(1)));
        assert_eq!(find(&mut table, &state, 1).unwrap().value, 77);

        let missing = hash_key(&state, 9);
        assert_eq!(
            table.update(missing, |v| v.key == 9, item(9)),
            Err(Error::KeyNotFound)
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.capacity(), 7);
    }

    #[test]
    fn remove_items() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..8u64 {
            insert(&mut table, &state, k).unwrap();
        }
        assert_eq!(table.len(), 8);
        for k in [0u64, 3, 7] {
            let removed = remove(&mut table, &state, k).unwrap();
            assert_eq!(removed.key, k);
            assert!(!table.contains(hash_key(&state, k), |v| v.key == k));
            assert_invariants(&table);
        }
        assert_eq!(table.len(), 5);

        assert_eq!(remove(&mut table, &state, 1000), Err(Error::KeyNotFound));
        assert_eq!(remove(&mut table, &state, 3), Err(Error::KeyNotFound));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn grows_to_next_capacity_at_threshold() {
        let mut table: HashTable<u64> = HashTable::new();
        assert_eq!(table.capacity(), 7);
        assert_eq!(table.capacity_index(), 0);

        for k in 0..3u64 {
            table.insert(k, |&v| v == k, k).unwrap();
            assert_eq!(table.capacity(), 7);
        }

        // 4 / 7 would reach the 0.5 threshold.
        table.insert(3, |&v| v == 3, 3).unwrap();
        assert_eq!(table.capacity(), 11);
        assert_eq!(table.capacity_index(), 1);
        for k in 0..4u64 {
            assert_eq!(table.find(k, |&v| v == k), Some(&k));
        }
        assert_invariants(&table);
    }

    #[test]
    fn shrinks_back_to_floor() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..100u64 {
            insert(&mut table, &state, k).unwrap();
        }
        let grown = table.capacity_index();
        assert!(grown > 0);

        for k in 0..100u64 {
            remove(&mut table, &state, k).unwrap();
            assert_invariants(&table);
            assert!(table.capacity_index() <= grown);
        }
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 7);
        assert_eq!(table.capacity_index(), 0);
    }

    #[test]
    fn shrink_steps_back_one_capacity() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..9u64 {
            table.insert(k, |&v| v == k, k).unwrap();
        }
        assert_eq!(table.capacity(), 37);

        // Shrink threshold at 37 is 3 elements.
        for k in 0..5u64 {
            table.remove(k, |&v| v == k).unwrap();
            assert_eq!(table.capacity(), 37);
        }
        table.remove(5, |&v| v == 5).unwrap();
        assert_eq!(table.capacity(), 17);
        for k in 6..9u64 {
            assert_eq!(table.find(k, |&v| v == k), Some(&k));
        }
    }

    #[test]
    fn rehash_clears_tombstones() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..3u64 {
            table.insert(k, |&v| v == k, k).unwrap();
        }
        table.remove(1, |&v| v == 1).unwrap();
        table.insert(4, |&v| v == 4, 4).unwrap();
        assert_eq!(table.capacity(), 7);
        assert_eq!(table.debug_stats().tombstones, 1);

        table.insert(5, |&v| v == 5, 5).unwrap();
        assert_eq!(table.capacity(), 11);
        assert_eq!(table.debug_stats().tombstones, 0);
        for k in [0u64, 2, 4, 5] {
            assert_eq!(table.find(k, |&v| v == k), Some(&k));
        }
    }

    #[test]
    fn lookup_relocates_past_tombstone() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..3u64 {
            table.insert(0, |&v| v == k, k).unwrap();
        }
        assert_eq!(table.probe_histogram().bins(), [1, 1, 1]);

        table.remove(0, |&v| v == 0).unwrap();
        assert_eq!(table.peek(0, |&v| v == 2), Some(&2));
        assert_eq!(table.probe_histogram().bins(), [0, 1, 1]);

        assert_eq!(table.find(0, |&v| v == 2), Some(&2));
        assert_eq!(table.probe_histogram().bins(), [1, 1]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.find(0, |&v| v == 1), Some(&1));
    }

    #[test]
    fn capacity_exhausted_with_short_sequence() {
        static CAPACITIES: [usize; 2] = [3, 5];
        let capacities = CapacitySequence::new(&CAPACITIES).unwrap();
        let config = Config::default().with_capacities(capacities);
        let mut table: HashTable<u64> = HashTable::with_config(config);

        table.insert(0, |&v| v == 0, 0).unwrap();
        assert_eq!(table.capacity(), 3);
        table.insert(1, |&v| v == 1, 1).unwrap();
        assert_eq!(table.capacity(), 5);

        // 3 / 5 reaches the grow threshold and there is nothing larger.
        assert_eq!(
            table.insert(2, |&v| v == 2, 2),
            Err(Error::CapacityExhausted { capacity: 5 })
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.capacity(), 5);
        assert!(!table.contains(2, |&v| v == 2));
    }

    #[test]
    fn full_load_threshold_keeps_a_free_slot() {
        let config = Config::new(1.0, 0.0).unwrap();
        let mut table: HashTable<u64> = HashTable::with_config(config);
        for k in 0..6u64 {
            table.insert(k, |&v| v == k, k).unwrap();
        }
        table.remove(0, |&v| v == 0).unwrap();
        table.insert(6, |&v| v == 6, 6).unwrap();
        assert_eq!(table.capacity(), 7);

        let stats = table.debug_stats();
        assert_eq!((stats.empty_slots, stats.tombstones), (0, 1));

        // Misses wrap all the way around and still terminate.
        assert!(table.find(3, |&v| v == 99).is_none());
        assert!(!table.contains(10, |&v| v == 10));

        table.insert(7, |&v| v == 7, 7).unwrap();
        assert_eq!(table.capacity(), 11);
        for k in 1..8u64 {
            assert_eq!(table.find(k, |&v| v == k), Some(&k));
        }
    }

    #[test]
    fn entry_api() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let k = 9u64;
        let hash = hash_key(&state, k);

        match table.entry(hash, |v| v.key == k) {
            Entry::Vacant(entry) => entry.insert(item(k)).unwrap().value += 1,
            Entry::Occupied(_) => panic!("entry should be vacant"),
        }
        assert_eq!(table.find(hash, |v| v.key == k).unwrap().value, 19);

        let value = table
            .entry(hash, |v| v.key == k)
            .or_insert_with(|| item(0))
            .unwrap();
        value.value = 5;
        assert_eq!(table.len(), 1);

        table
            .entry(hash, |v| v.key == k)
            .and_modify(|v| v.value *= 3);
        assert_eq!(table.peek(hash, |v| v.key == k).unwrap().value, 15);

        match table.entry(hash, |v| v.key == k) {
            Entry::Occupied(entry) => assert_eq!(entry.remove(), Item { key: k, value: 15 }),
            Entry::Vacant(_) => panic!("entry should be occupied"),
        }
        assert!(table.is_empty());
        assert_invariants(&table);
    }

    #[test]
    fn vacant_entry_grows_only_on_insert() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..3u64 {
            table.insert(k, |&v| v == k, k).unwrap();
        }

        assert!(matches!(table.entry(3, |&v| v == 3), Entry::Vacant(_)));
        assert_eq!(table.capacity(), 7);

        if let Entry::Vacant(entry) = table.entry(3, |&v| v == 3) {
            assert_eq!(entry.insert(3), Ok(&mut 3));
        }
        assert_eq!(table.capacity(), 11);
        assert_eq!(table.len(), 4);
        assert_invariants(&table);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn insert_many() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..100000u64 {
            insert(&mut table, &state, k).unwrap();
        }

        assert_eq!(table.len(), 100000);
        assert_invariants(&table);
        for k in 0..100000u64 {
            assert_eq!(find(&mut table, &state, k), Some(&item(k)));
        }
        let longest = table.debug_stats().longest_probe;
        assert!(longest < table.capacity());
    }

    #[test]
    fn explicit_collision() {
        let mut table: HashTable<Item> = HashTable::new();
        let hash = 0;
        for k in 0..65u64 {
            table.insert(hash, |v| v.key == k, item(k)).unwrap();
        }

        assert_eq!(table.len(), 65);
        for k in 0..65u64 {
            assert_eq!(table.find(hash, |v| v.key == k), Some(&item(k)));
        }
        for k in (0..65u64).step_by(2) {
            assert_eq!(table.remove(hash, |v| v.key == k), Ok(item(k)));
        }
        for k in (1..65u64).step_by(2) {
            assert_eq!(table.find(hash, |v| v.key == k), Some(&item(k)));
        }
        assert_invariants(&table);
    }

    #[test]
    fn iter_and_drain() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 10..20u64 {
            insert(&mut table, &state, k).unwrap();
        }

        let iter = table.iter();
        assert_eq!(iter.len(), 10);
        let mut keys: Vec<u64> = iter.map(|v| v.key).collect();
        keys.sort();
        assert_eq!(keys, (10..20).collect::<Vec<_>>());

        let mut visited = 0;
        table.for_each(|v| {
            assert_eq!(v.value, v.key as i32 * 2);
            visited += 1;
        });
        assert_eq!(visited, 10);

        let mut drained: Vec<Item> = table.drain().collect();
        drained.sort_by_key(|v| v.key);
        assert_eq!(drained.len(), 10);
        assert_eq!(drained[0], item(10));
        assert!(table.is_empty());
        assert_eq!(table.capacity_index(), 0);
        assert_eq!(table.iter().next(), None);
    }

    #[test]
    fn partial_drain_empties_table() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..50u64 {
            table.insert(k, |&v| v == k, k).unwrap();
        }

        let mut drain = table.drain();
        assert_eq!(drain.len(), 50);
        assert!(drain.next().is_some());
        drop(drain);

        assert!(table.is_empty());
        assert_eq!(table.capacity(), 7);
        table.insert(1, |&v| v == 1, 1).unwrap();
        assert_eq!(table.find(1, |&v| v == 1), Some(&1));
    }

    #[test]
    fn leaked_drain_leaves_entries_reachable() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..3u64 {
            table.insert(0, |&v| v == k, k).unwrap();
        }

        let mut drain = table.drain();
        assert_eq!(drain.next(), Some(0));
        mem::forget(drain);

        assert_eq!(table.len(), 2);
        assert_eq!(table.find(0, |&v| v == 1), Some(&1));
        assert_eq!(table.find(0, |&v| v == 2), Some(&2));
        assert_eq!(table.insert(0, |&v| v == 2, 2), Err(Error::DuplicateKey));
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().filter(|&&v| v == 2).count(), 1);
        assert_invariants(&table);
    }

    #[test]
    fn iter_mut_and_into_iter() {
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..10u64 {
            table.insert(k, |v| v.key == k, item(k)).unwrap();
        }
        for v in table.iter_mut() {
            v.value = -1;
        }
        assert!(table.iter().all(|v| v.value == -1));

        let into_iter = table.into_iter();
        assert_eq!(into_iter.len(), 10);
        let mut keys: Vec<u64> = into_iter.map(|v| v.key).collect();
        keys.sort();
        assert_eq!(keys, (0..10).collect::<Vec<_>>());
    }

    fn hash_string_key(state: &HashState, key: &str) -> u64 {
        let mut h = state.build_hasher();
        key.hash(&mut h);
        h.finish()
    }

    #[test]
    fn string_keys() {
        let state = HashState::default();
        let mut table: HashTable<(String, usize)> = HashTable::new();
        let words = vec!["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];
        for (i, w) in words.iter().enumerate() {
            table
                .insert(hash_string_key(&state, w), |(k, _)| k == w, (w.to_string(), i))
                .unwrap();
        }

        for (i, w) in words.iter().enumerate() {
            let hash = hash_string_key(&state, w);
            assert_eq!(table.find(hash, |(k, _)| k == w).map(|(_, v)| *v), Some(i));
        }

        let hash = hash_string_key(&state, "gamma");
        assert_eq!(
            table.remove(hash, |(k, _)| k == "gamma"),
            Ok(("gamma".to_string(), 2))
        );
        assert!(table.peek(hash, |(k, _)| k == "gamma").is_none());
        assert_eq!(table.len(), words.len() - 1);
    }

    #[test]
    fn clear_resets_to_floor() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..40u64 {
            table.insert(k, |&v| v == k, k).unwrap();
        }
        assert!(table.capacity() > 7);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 7);
        assert!(!table.contains(5, |&v| v == 5));
    }

    #[test]
    fn test_clone() {
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..20u64 {
            table.insert(k, |v| v.key == k, item(k)).unwrap();
        }
        table.remove(3, |v| v.key == 3).unwrap();

        let mut cloned = table.clone();
        assert_eq!(cloned.len(), table.len());
        assert_eq!(cloned.capacity(), table.capacity());
        for k in 0..20u64 {
            assert_eq!(cloned.peek(k, |v| v.key == k), table.peek(k, |v| v.key == k));
        }

        cloned.insert(100, |v| v.key == 100, item(100)).unwrap();
        assert!(table.peek(100, |v| v.key == 100).is_none());
    }

    #[test]
    fn debug_output() {
        let mut table: HashTable<u64> = HashTable::new();
        let empty = alloc::format!("{:?}", table);
        assert!(empty.contains("empty"));

        table.insert(0x2a, |&v| v == 1, 1).unwrap();
        let populated = alloc::format!("{:?}", table);
        assert!(populated.contains("2a"), "{populated}");
    }

    #[test]
    fn histogram_counts_every_element() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..500u64 {
            insert(&mut table, &state, k).unwrap();
        }
        let histogram = table.probe_histogram();
        assert_eq!(histogram.total(), 500);
        assert!(histogram.longest().unwrap() < table.capacity());

        let stats = table.debug_stats();
        assert_eq!(stats.populated, 500);
        assert_eq!(stats.tombstones, 0);
        assert!(stats.mean_probe >= 0.0);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    #[cfg(feature = "std")]
    fn histogram_output() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..5000u64 {
            insert(&mut table, &state, k).unwrap();
        }
        for k in (0..5000u64).step_by(3) {
            remove(&mut table, &state, k).unwrap();
        }
        table.probe_histogram().print();
        table.debug_stats().print();
    }
}
