// Pattern store: a chained hash map from scheme name to template
//
// Buckets are kept as an explicit array of singly linked chains so that the
// raw layout (bucket index, chain order) stays observable for debugging.

use serde::Serialize;

/// Bucket count of a table created with [`PatternStore::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Ratio of entries to buckets above which the table doubles.
pub const LOAD_FACTOR: f64 = 0.75;

/// String hash: the 31-multiplier polynomial over UTF-16 code units with
/// wrapping 32-bit arithmetic, reduced to a bucket index.
pub fn bucket_index(key: &str, capacity: usize) -> usize {
    let mut hash: i32 = 0;
    for unit in key.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    let capacity = capacity.max(1) as i64;
    (hash as i64 % capacity).unsigned_abs() as usize
}

#[derive(Debug)]
struct Entry {
    key: String,
    value: String,
    next: Option<Box<Entry>>,
}

type Chain = Option<Box<Entry>>;

/// Hash map of scheme name to template, with separate chaining.
///
/// New keys go to the head of their bucket's chain. When the entry count
/// exceeds `capacity * 0.75` the bucket array doubles and every entry is
/// reinserted. Iteration follows bucket order, then chain order; it is
/// neither sorted nor insertion ordered.
#[derive(Debug)]
pub struct PatternStore {
    buckets: Vec<Chain>,
    size: usize,
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternStore {
    /// Create a table with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            size: 0,
        }
    }

    /// Insert or replace. Returns the previous value for `key`, if any.
    pub fn put(&mut self, key: &str, value: &str) -> Option<String> {
        let index = bucket_index(key, self.capacity());

        let mut current = self.buckets[index].as_deref_mut();
        while let Some(entry) = current {
            if entry.key == key {
                return Some(std::mem::replace(&mut entry.value, value.to_string()));
            }
            current = entry.next.as_deref_mut();
        }

        let head = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry {
            key: key.to_string(),
            value: value.to_string(),
            next: head,
        }));
        self.size += 1;

        if self.size as f64 > self.capacity() as f64 * LOAD_FACTOR {
            self.resize(self.capacity() * 2);
        }
        None
    }

    /// Look up the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let index = bucket_index(key, self.capacity());
        let mut current = self.buckets[index].as_deref();
        while let Some(entry) = current {
            if entry.key == key {
                return Some(&entry.value);
            }
            current = entry.next.as_deref();
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = bucket_index(key, self.capacity());
        let mut link = &mut self.buckets[index];
        while link.as_ref().is_some_and(|e| e.key != key) {
            link = &mut link.as_mut()?.next;
        }
        let removed = link.take()?;
        let Entry { value, next, .. } = *removed;
        *link = next;
        self.size -= 1;
        Some(value)
    }

    /// Every `(key, value)` pair in bucket order, chain head first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            current: None,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Current entries per bucket.
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Entries in bucket `index`, head to tail. Empty for an out-of-range index.
    pub fn chain(&self, index: usize) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        let mut current = self.buckets.get(index).and_then(|c| c.as_deref());
        while let Some(entry) = current {
            out.push((entry.key.as_str(), entry.value.as_str()));
            current = entry.next.as_deref();
        }
        out
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        (0..self.capacity())
            .map(|i| self.chain(i).len())
            .max()
            .unwrap_or(0)
    }

    /// Metrics describing the current bucket usage.
    pub fn metrics(&self) -> TableMetrics {
        TableMetrics {
            size: self.size,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            longest_chain: self.longest_chain(),
        }
    }

    /// Rehash every entry into `new_capacity` buckets using the regular
    /// insertion path.
    fn resize(&mut self, new_capacity: usize) {
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.size = 0;
        for mut chain in old {
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                self.put(&entry.key, &entry.value);
            }
        }
    }
}

fn empty_buckets(capacity: usize) -> Vec<Chain> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Bucket-order iterator over a [`PatternStore`].
pub struct Iter<'a> {
    buckets: &'a [Chain],
    bucket: usize,
    current: Option<&'a Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current {
                self.current = entry.next.as_deref();
                return Some((entry.key.as_str(), entry.value.as_str()));
            }
            let chain = self.buckets.get(self.bucket)?;
            self.bucket += 1;
            self.current = chain.as_deref();
        }
    }
}

impl<'a> IntoIterator for &'a PatternStore {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Snapshot of table occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableMetrics {
    pub size: usize,
    pub capacity: usize,
    pub load_factor: f64,
    pub longest_chain: usize,
}
