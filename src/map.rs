use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

/// A thread-safe map whose keys and values are fixed at compile time
///
/// `SyncMap` can be shared between threads and used without any external
/// locking. Every value going in or out is a `V`, so lookups never need a
/// runtime type check. Values handed back to callers are clones; nothing
/// returns a reference into the shared storage except the scoped closures of
/// [`with`](SyncMap::with) and [`with_mut`](SyncMap::with_mut).
///
/// Cloning a `SyncMap` yields another handle onto the same entries.
///
/// # Examples
///
/// ```
/// use generic_sync_map::SyncMap;
/// use std::sync::Arc;
/// use std::thread;
///
/// let hits = Arc::new(SyncMap::<String, u64>::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let hits = Arc::clone(&hits);
///         thread::spawn(move || hits.set(format!("worker-{}", worker), worker * 10))
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(hits.len(), 4);
/// assert_eq!(hits.get("worker-2"), Some(20));
/// assert_eq!(hits.get("worker-9"), None);
/// ```
#[derive(Debug)]
pub struct SyncMap<K, V>
where
    K: Eq + Hash,
{
    inner: Arc<DashMap<K, V>>,
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates a new, empty map
    pub fn new() -> Self {
        Self::from_dashmap(DashMap::new())
    }

    /// Creates an empty map with room for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_dashmap(DashMap::with_capacity(capacity))
    }

    pub(crate) fn from_dashmap(inner: DashMap<K, V>) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Stores `value` under `key`, replacing whatever was there
    pub fn set(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    /// Returns a copy of the value stored under `key`
    ///
    /// An absent key is an ordinary outcome and yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_sync_map::SyncMap;
    ///
    /// let map = SyncMap::<String, i32>::new();
    /// map.set("answer".to_string(), 42);
    ///
    /// assert_eq!(map.get("answer"), Some(42));
    /// assert_eq!(map.get("question"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    /// Like [`get`](SyncMap::get), but reports a miss as `(V::default(), false)`
    ///
    /// ```
    /// use generic_sync_map::SyncMap;
    ///
    /// let map = SyncMap::<&str, u32>::new();
    /// map.set("retries", 3);
    ///
    /// assert_eq!(map.get_or_zero("retries"), (3, true));
    /// assert_eq!(map.get_or_zero("timeouts"), (0, false));
    /// ```
    pub fn get_or_zero<Q>(&self, key: &Q) -> (V, bool)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        match self.get(key) {
            Some(value) => (value, true),
            None => (V::default(), false),
        }
    }

    /// Removes the entry for `key`. Does nothing if the key is absent.
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key);
    }

    /// Removes the entry for `key` and returns its value, if there was one
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key).map(|(_, value)| value)
    }

    /// Stores `value` under `key` and returns the value it replaced
    pub fn swap(&self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    /// Returns the value already stored under `key`, or stores `value`
    ///
    /// The boolean is `true` when an existing value was loaded and `false`
    /// when `value` was stored. The check and the store happen atomically
    /// with respect to every other operation on `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_sync_map::SyncMap;
    ///
    /// let owners = SyncMap::<u32, &str>::new();
    ///
    /// assert_eq!(owners.get_or_insert(7, "alice"), ("alice", false));
    /// assert_eq!(owners.get_or_insert(7, "bob"), ("alice", true));
    /// ```
    pub fn get_or_insert(&self, key: K, value: V) -> (V, bool)
    where
        V: Clone,
    {
        match self.inner.entry(key) {
            Entry::Occupied(entry) => (entry.get().clone(), true),
            Entry::Vacant(entry) => {
                entry.insert(value.clone());
                (value, false)
            }
        }
    }

    /// Returns true if the map holds an entry for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(key)
    }

    /// Returns the number of entries in the map
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the map contains no entries
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes every entry
    pub fn clear(&self) {
        let dropped = self.inner.len();
        self.inner.clear();
        trace!(dropped, "cleared sync map");
    }

    /// Runs `f` against the value stored under `key` without cloning it
    ///
    /// Returns `None` if the key is absent. The entry's shard stays
    /// read-locked while `f` runs, so `f` must not write to this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_sync_map::SyncMap;
    ///
    /// let map = SyncMap::<&str, Vec<i32>>::new();
    /// map.set("numbers", vec![1, 2, 3]);
    ///
    /// assert_eq!(map.with("numbers", |v| v.len()), Some(3));
    /// assert_eq!(map.with("letters", |v| v.len()), None);
    /// ```
    pub fn with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        self.inner.get(key).map(|entry| f(entry.value()))
    }

    /// Runs `f` with mutable access to the value stored under `key`
    ///
    /// Returns `None` if the key is absent. The update is atomic with
    /// respect to every other operation on `key`; `f` must not touch this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_sync_map::SyncMap;
    ///
    /// let counters = SyncMap::<&str, u64>::new();
    /// counters.set("visits", 0);
    ///
    /// counters.with_mut("visits", |n| *n += 1);
    /// assert_eq!(counters.get("visits"), Some(1));
    /// ```
    pub fn with_mut<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&mut V) -> R,
    {
        self.inner.get_mut(key).map(|mut entry| f(entry.value_mut()))
    }

    /// Returns a copy of every key currently in the map
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Returns a copy of every value currently in the map
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.inner.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Returns a lazy iterator over copies of the map's entries
    ///
    /// The key set is captured when `iter` is called; each value is read when
    /// its key comes up. Entries removed in the meantime are skipped and
    /// entries added in the meantime are not seen. No key is yielded twice,
    /// and the map may be freely modified while iterating.
    pub fn iter(&self) -> Iter<'_, K, V>
    where
        K: Clone,
        V: Clone,
    {
        Iter::new(&self.inner, self.keys())
    }

    /// Calls `visit` for each entry until it returns `false`
    ///
    /// Order is unspecified. The view is weakly consistent, as described for
    /// [`iter`](SyncMap::iter), and `visit` may call back into this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_sync_map::SyncMap;
    ///
    /// let map: SyncMap<u32, u32> = (0..100).map(|i| (i, i * i)).collect();
    ///
    /// let mut seen = 0;
    /// map.range(|_, _| {
    ///     seen += 1;
    ///     seen < 5
    /// });
    /// assert_eq!(seen, 5);
    /// ```
    pub fn range<F>(&self, mut visit: F)
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        for (key, value) in self.iter() {
            if !visit(&key, &value) {
                break;
            }
        }
    }

    /// Like [`range`](SyncMap::range), with a visitor that can fail
    ///
    /// The first error stops the traversal and is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_sync_map::SyncMap;
    ///
    /// let ports = SyncMap::<&str, u32>::new();
    /// ports.set("http", 80);
    /// ports.set("bogus", 70000);
    ///
    /// let checked = ports.try_range(|name, port| {
    ///     if *port > u16::MAX as u32 {
    ///         return Err(format!("{} is out of range", name));
    ///     }
    ///     Ok(true)
    /// });
    /// assert_eq!(checked, Err("bogus is out of range".to_string()));
    /// ```
    pub fn try_range<F, E>(&self, mut visit: F) -> Result<(), E>
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> Result<bool, E>,
    {
        for (key, value) in self.iter() {
            if !visit(&key, &value)? {
                break;
            }
        }
        Ok(())
    }

    /// Copies the map's entries into a new, independent `HashMap`
    ///
    /// Later changes to either side are not visible to the other.
    pub fn to_map(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut snapshot = HashMap::with_capacity(self.len());
        self.range(|key, value| {
            snapshot.insert(key.clone(), value.clone());
            true
        });
        trace!(entries = snapshot.len(), "took sync map snapshot");
        snapshot
    }
}

impl<K, V> Clone for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_dashmap(iter.into_iter().collect())
    }
}

impl<K, V> Extend<(K, V)> for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> From<HashMap<K, V>> for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn from(entries: HashMap<K, V>) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a SyncMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over copies of a [`SyncMap`]'s entries, created by [`SyncMap::iter`]
pub struct Iter<'a, K, V>
where
    K: Eq + Hash,
{
    map: &'a DashMap<K, V>,
    keys: std::vec::IntoIter<K>,
}

impl<'a, K, V> Iter<'a, K, V>
where
    K: Eq + Hash,
{
    fn new(map: &'a DashMap<K, V>, keys: Vec<K>) -> Self {
        Self {
            map,
            keys: keys.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = self.keys.next()?;
            // the shard guard is released before the pair is handed out
            let value = self.map.get(&key).map(|entry| entry.value().clone());
            if let Some(value) = value {
                return Some((key, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.keys.len()))
    }
}

impl<'a, K, V> Debug for Iter<'a, K, V>
where
    K: Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining_keys", &self.keys.as_slice())
            .finish()
    }
}
