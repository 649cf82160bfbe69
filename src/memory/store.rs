//! Append-only keyed store
//!
//! Entries live in one arena and are addressed by [`FactId`]; each key maps
//! to the handles of its entries in insertion order.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Stable handle of an entry within one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FactId(pub usize);

impl FactId {
    #[inline]
    pub fn new(value: usize) -> Self {
        FactId(value)
    }

    /// Returns the inner value of the handle.
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Keyed, append-only collection of entries
#[derive(Debug, Clone, Serialize)]
pub struct Store<T> {
    entries: Vec<T>,
    index: IndexMap<String, Vec<FactId>>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: IndexMap::new(),
        }
    }
}

impl<T> Store<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`, indexing it once under each distinct key
    pub fn insert<I, K>(
        &mut self,
        keys: I,
        entry: T,
    ) -> FactId
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let id = FactId(self.entries.len());
        self.entries.push(entry);
        for key in keys {
            let ids = self.index.entry(key.into()).or_default();
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        id
    }

    #[inline]
    pub fn get(
        &self,
        id: FactId,
    ) -> Option<&T> {
        self.entries.get(id.0)
    }

    /// Handles recorded under `key`, oldest first
    pub fn handles(
        &self,
        key: &str,
    ) -> &[FactId] {
        self.index.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Entries recorded under `key`, oldest first
    pub fn lookup<'s>(
        &'s self,
        key: &str,
    ) -> impl Iterator<Item = &'s T> + 's {
        let handles = self.handles(key);
        handles.iter().filter_map(move |id| self.entries.get(id.0))
    }

    /// Number of entries under `key`
    #[inline]
    pub fn count(
        &self,
        key: &str,
    ) -> usize {
        self.handles(key).len()
    }

    /// Keys in first-insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Every entry with its handle
    pub fn iter(&self) -> impl Iterator<Item = (FactId, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (FactId(i), entry))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
