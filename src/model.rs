//! Reflection-dump loading and the declaration registry.
//!
//! A dump file is the host side of the seam: an ordered description of
//! the types and free functions one module exposes, captured by whatever
//! reflection mechanism the host has. This module deserializes dumps and
//! indexes their declarations by display name and positional index, two
//! domains callers use interchangeably, kept in lockstep by a single
//! [`BijectiveMap`].

use std::path::Path;

use crate::bijective::BijectiveMap;
use crate::error::{Error, Result};
use crate::types::ReflectionDump;

impl ReflectionDump {
    /// Parse a reflection dump from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a reflection dump file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// One side of a registry entry: a declaration's display name or its
/// positional index. Both sides share the bijective storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Name(String),
    Index(usize),
}

/// Which kind of declaration a registry index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Type,
    Function,
}

/// Name ↔ index correspondence for every top-level declaration in a
/// dump: types first, then free functions, in dump order.
///
/// A later declaration reusing an earlier name takes the name over: the
/// stale pair is evicted, so the earlier index stops resolving. This is
/// the bijective-map contract, not a special case.
#[derive(Debug, Clone)]
pub struct Registry {
    slots: BijectiveMap<Slot>,
    type_count: usize,
    total: usize,
}

impl Registry {
    /// Index every declaration of `dump`.
    pub fn from_dump(dump: &ReflectionDump) -> Self {
        let mut slots = BijectiveMap::new();
        let mut index = 0;
        for dumped_type in &dump.types {
            slots.insert(Slot::Name(dumped_type.name.clone()), Slot::Index(index));
            index += 1;
        }
        for function in &dump.functions {
            slots.insert(Slot::Name(function.name.clone()), Slot::Index(index));
            index += 1;
        }
        Self {
            slots,
            type_count: dump.types.len(),
            total: index,
        }
    }

    /// The positional index of the declaration named `name`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        match self.slots.get(&Slot::Name(name.to_string()))? {
            Slot::Index(index) => Ok(*index),
            // A name's partner is always an index by construction.
            Slot::Name(_) => Err(Error::KeyNotFound {
                key: format!("{:?}", name),
            }),
        }
    }

    /// The display name of the declaration at `index`.
    pub fn name_at(&self, index: usize) -> Result<&str> {
        match self.slots.get(&Slot::Index(index))? {
            Slot::Name(name) => Ok(name),
            Slot::Index(_) => Err(Error::KeyNotFound {
                key: format!("{:?}", index),
            }),
        }
    }

    /// The declaration kind at `index` (types precede functions).
    pub fn kind_at(&self, index: usize) -> DeclKind {
        if index < self.type_count {
            DeclKind::Type
        } else {
            DeclKind::Function
        }
    }

    /// Every registered display name, pulled off the name side of the
    /// shared storage. Unordered; use [`name_at`](Self::name_at) over
    /// `0..len()` for dump order.
    pub fn names(&self) -> Vec<&str> {
        self.slots
            .keys_where(|slot| matches!(slot, Slot::Name(_)))
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Name(name) => Some(name.as_str()),
                Slot::Index(_) => None,
            })
            .collect()
    }

    /// The number of indexed declarations, including indices whose name
    /// was later taken over.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether the dump declared nothing.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
