//! A map enforcing a strict one-to-one correspondence between two
//! disjoint domains (e.g. display names and positional indices), usable
//! for lookup in either direction.
//!
//! Both directions live in a single symmetric table: for every inserted
//! pair `(k, v)` the storage holds `k → v` and `v → k`. A single store
//! cannot drift the way two manually-synchronized maps can.
//!
//! Mutation performs multiple logical steps (evict stale pairs, insert
//! both directions) that must appear atomic to the caller; taking
//! `&mut self` serializes access per instance, so no extra locking is
//! needed for the single-owner case.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

/// A bijective map over a single entry domain `T`.
///
/// Callers typically split `T` into two conceptual sides with an enum and
/// partition them back out with [`keys_where`](Self::keys_where).
#[derive(Debug, Clone, Default)]
pub struct BijectiveMap<T> {
    entries: HashMap<T, T>,
}

impl<T> BijectiveMap<T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts the pair `(k, v)`.
    ///
    /// Any existing pair containing `k` and any existing pair containing
    /// `v` is first removed entirely, both directions, so the prior
    /// partners are evicted rather than left dangling. Overwrites are
    /// silent.
    pub fn insert(&mut self, k: T, v: T) {
        if let Some(old_partner) = self.entries.remove(&k) {
            self.entries.remove(&old_partner);
        }
        if let Some(old_partner) = self.entries.remove(&v) {
            self.entries.remove(&old_partner);
        }

        self.entries.insert(k.clone(), v.clone());
        self.entries.insert(v, k);
    }

    /// Returns the partner of `x`.
    pub fn get(&self, x: &T) -> Result<&T> {
        self.entries.get(x).ok_or_else(|| Error::KeyNotFound {
            key: format!("{:?}", x),
        })
    }

    /// Removes `x` and its partner as a pair, returning the partner.
    pub fn remove(&mut self, x: &T) -> Result<T> {
        let partner = self.entries.remove(x).ok_or_else(|| Error::KeyNotFound {
            key: format!("{:?}", x),
        })?;
        // A self-paired entry (k == v) occupies a single slot.
        if partner != *x {
            self.entries.remove(&partner);
        }
        Ok(partner)
    }

    /// Whether `x` participates in any pair.
    pub fn contains(&self, x: &T) -> bool {
        self.entries.contains_key(x)
    }

    /// The number of pairs (raw entry count / 2).
    pub fn len(&self) -> usize {
        self.entries.len() / 2
    }

    /// Whether the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw entry count across both directions. Exposed so callers
    /// can observe the pair/entry invariant directly.
    pub fn raw_len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries on one side of the map, selected by a
    /// caller-supplied domain predicate.
    ///
    /// The two conceptual domains share one storage; this is how callers
    /// separate them again (e.g. "only the name side").
    pub fn keys_where<F>(&self, pred: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.entries.keys().filter(|k| pred(k)).collect()
    }
}
