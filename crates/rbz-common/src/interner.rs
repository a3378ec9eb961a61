//! String interning for identifier deduplication.
//!
//! Identifiers and symbol names are interned once and referenced by `Atom`
//! everywhere else, so name comparisons during rewriting and binding are
//! integer comparisons. Two interners are provided:
//!
//! - `Interner` - single-threaded, used inside one pass
//! - `ShardedInterner` - `&self` interning behind sharded locks, shared by
//!   the multi-pass driver across files

use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Handle to an interned string. Copyable, cheap to compare and hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Atom(u32);

impl Atom {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Single-threaded string interner.
#[derive(Debug, Default)]
pub struct Interner {
    map: FxHashMap<Box<str>, Atom>,
    strings: Vec<Box<str>>,
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.map.get(text) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        self.strings.push(Box::from(text));
        self.map.insert(Box::from(text), atom);
        atom
    }

    #[must_use]
    pub fn get(&self, text: &str) -> Option<Atom> {
        self.map.get(text).copied()
    }

    /// Resolve an atom back to its string. Panics on an atom from a
    /// different interner.
    #[must_use]
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Thread-safe interner that interns through `&self`.
///
/// The rewrite driver shares one of these across all per-class invocations
/// (spawned in parallel or not); passes only ever append new names, so the
/// table is effectively append-only.
#[derive(Debug, Default)]
pub struct ShardedInterner {
    map: DashMap<Arc<str>, Atom>,
    strings: RwLock<Vec<Arc<str>>>,
}

impl ShardedInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, text: &str) -> Atom {
        if let Some(atom) = self.map.get(text) {
            return *atom;
        }
        // The write lock covers both the index assignment and the map
        // insert, so an atom never escapes before its string is stored.
        let mut strings = self
            .strings
            .write()
            .expect("interner string table lock poisoned");
        let arc: Arc<str> = Arc::from(text);
        match self.map.entry(arc.clone()) {
            Entry::Occupied(occupied) => *occupied.get(),
            Entry::Vacant(vacant) => {
                let atom = Atom(strings.len() as u32);
                strings.push(arc);
                vacant.insert(atom);
                atom
            }
        }
    }

    #[must_use]
    pub fn get(&self, text: &str) -> Option<Atom> {
        self.map.get(text).map(|atom| *atom)
    }

    /// Resolve an atom back to its string.
    #[must_use]
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        let strings = self
            .strings
            .read()
            .expect("interner string table lock poisoned");
        strings[atom.index()].clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings
            .read()
            .expect("interner string table lock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        let c = interner.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "foo");
        assert_eq!(interner.resolve(c), "bar");
    }

    #[test]
    fn sharded_intern_resolves_through_shared_ref() {
        let interner = ShardedInterner::new();
        let a = interner.intern("token");
        assert_eq!(interner.intern("token"), a);
        assert_eq!(&*interner.resolve(a), "token");
        assert_eq!(interner.get("token"), Some(a));
        assert_eq!(interner.get("missing"), None);
    }
}
