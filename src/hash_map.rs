use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;

use crate::DefaultHashBuilder;
use crate::config::Config;
use crate::error::Error;
use crate::error::Result;
use crate::hash_table;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A hash map over an open-addressing [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq`, hashed by the builder `S`. Unlike `std::collections::HashMap`
/// the mutating operations are strict: [`insert`](Self::insert) refuses a key
/// that is already present and [`update`](Self::update) /
/// [`remove`](Self::remove) refuse a key that is not, each with an
/// [`Error`]. Insert-or-update is left to the caller:
///
/// ```rust
/// # use probe_hash::HashMap;
/// #
/// let mut scores: HashMap<&str, u32> = HashMap::new();
/// for name in ["ann", "bob", "ann"] {
///     if scores.contains_key(name) {
///         let current = *scores.peek(name).unwrap();
///         scores.update(name, current + 1).unwrap();
///     } else {
///         scores.insert(name, 1).unwrap();
///     }
/// }
/// assert_eq!(scores.peek("ann"), Some(&2));
/// ```
///
/// Lookups through [`get`](Self::get), [`get_mut`](Self::get_mut) and
/// [`contains_key`](Self::contains_key) take `&mut self` because they may
/// move the entry back over a tombstone on its probe path. Use
/// [`peek`](Self::peek) to read through a shared reference.
///
/// # Memory
///
/// One slot per capacity entry, each holding a tag, a cached `u64` hash and
/// the `(K, V)` pair. The load factor stays below the grow threshold, so at
/// the default 0.5 at least half the slots are free.
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.table.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Matches table entries whose key equals `key`.
#[inline]
fn equivalent_key<Q, K, V>(key: &Q) -> impl Fn(&(K, V)) -> bool + '_
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    move |x| key.eq(x.0.borrow())
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<K, V> HashMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map at the floor capacity, using the default hasher
    /// builder and [`Config`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 7);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with the given resize policy and the default
    /// hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::Config;
    /// # use probe_hash::HashMap;
    /// #
    /// let config = Config::new(0.75, 0.2).unwrap();
    /// let map: HashMap<u32, u32> = HashMap::with_config(config);
    /// assert_eq!(map.config().grow_threshold(), 0.75);
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use probe_hash::HashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(SimpleHasher);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(Config::default(), hash_builder)
    }

    /// Creates an empty map with the given resize policy and hasher builder.
    pub fn with_config_and_hasher(config: Config, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_config(config),
            hash_builder,
        }
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// for i in 0..4 {
    ///     map.insert(i, i).unwrap();
    /// }
    /// assert_eq!(map.capacity(), 11);
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Position of [`capacity`](Self::capacity) in the capacity sequence.
    pub fn capacity_index(&self) -> usize {
        self.table.capacity_index()
    }

    /// `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// The resize policy this map was built with.
    pub fn config(&self) -> &Config {
        self.table.config()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements and returns the map to its floor capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Calls `f` on every key-value pair, in table order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("a", 1).unwrap();
    /// map.insert("b", 2).unwrap();
    ///
    /// let mut total = 0;
    /// map.for_each(|_, v| total += v);
    /// assert_eq!(total, 3);
    /// ```
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        self.table.for_each(|(k, v)| f(k, v));
    }

    /// An iterator visiting all key-value pairs in table order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert(1, "one").unwrap();
    /// map.insert(2, "two").unwrap();
    ///
    /// let mut pairs: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(1, "one"), (2, "two")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// An iterator visiting all keys in table order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in table order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// An iterator visiting all values mutably in table order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("a", 1).unwrap();
    /// map.insert("b", 2).unwrap();
    ///
    /// for v in map.values_mut() {
    ///     *v *= 10;
    /// }
    /// assert_eq!(map.peek("b"), Some(&20));
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Removes and yields every key-value pair.
    ///
    /// The map is empty at its floor capacity once the iterator is dropped,
    /// whether or not it was run to the end.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Computes a histogram of probe distances for the current map state.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> hash_table::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Returns detailed utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> hash_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts a key-value pair that is not yet in the map.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateKey`] if the key is present. The stored value is
    ///   left as it was.
    /// - [`Error::CapacityExhausted`] if the map cannot grow any further.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::Error;
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), Ok(()));
    /// assert_eq!(map.insert(37, "b"), Err(Error::DuplicateKey));
    /// assert_eq!(map.peek(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, equivalent_key(&key)) {
            TableEntry::Occupied(_) => Err(Error::DuplicateKey),
            TableEntry::Vacant(entry) => entry.insert((key, value)).map(|_| ()),
        }
    }

    /// Returns a reference to the value for `key`.
    ///
    /// May move the entry back over a tombstone on its probe path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("key".to_string(), 1).unwrap();
    /// assert_eq!(map.get("key"), Some(&1));
    /// assert_eq!(map.get("other"), None);
    /// ```
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, equivalent_key(key))
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find_mut(hash, equivalent_key(key))
            .map(|(_, v)| v)
    }

    /// Returns a reference to the value for `key` without moving anything.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .peek(hash, equivalent_key(key))
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Replaces the value for a present `key`, returning the old value.
    ///
    /// Never resizes.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::Error;
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.update(&1, "b"), Ok("a"));
    /// assert_eq!(map.update(&2, "c"), Err(Error::KeyNotFound));
    /// ```
    pub fn update<Q>(&mut self, key: &Q, value: V) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.get_mut(key).ok_or(Error::KeyNotFound)?;
        Ok(mem::replace(slot, value))
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::Error;
    /// # use probe_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` from the map, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, equivalent_key(key))
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.peek(k).is_some_and(|o| v == o))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    inner: hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the key-value pairs of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// A draining iterator over the key-value pairs of a `HashMap`.
pub struct Drain<'a, K, V> {
    inner: hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}
