//! Key Dictionary
//!
//! Deduplicating store for [`PaintParamsKey`]s. The precompiler only needs
//! [`PaintKeyDictionary::find_or_create`]; everything else on
//! [`ShaderCodeDictionary`] is for hosts and tests inspecting the result.
//!
//! Dictionaries are shared by every worker of a parallel warm-up pass, so
//! implementations must synchronize internally.

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::builder::PaintParamsKey;

/// Handle to a key stored in a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintParamsKeyId(pub(crate) u32);

impl PaintParamsKeyId {
    /// Raw index into the dictionary's key storage.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Deduplicating key store consumed by the precompiler.
pub trait PaintKeyDictionary: Send + Sync {
    /// Returns the id of `key`, inserting it first if it was not present.
    ///
    /// Must be idempotent: equal keys always map to the same id.
    fn find_or_create(&self, key: &PaintParamsKey) -> PaintParamsKeyId;
}

#[derive(Default)]
struct DictionaryInner {
    keys: Vec<PaintParamsKey>,
    lookup: FxHashMap<PaintParamsKey, PaintParamsKeyId>,
}

/// Thread-safe in-memory [`PaintKeyDictionary`].
#[derive(Default)]
pub struct ShaderCodeDictionary {
    inner: RwLock<DictionaryInner>,
}

impl fmt::Debug for ShaderCodeDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderCodeDictionary")
            .field("len", &self.len())
            .finish()
    }
}

impl ShaderCodeDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn find(&self, key: &PaintParamsKey) -> Option<PaintParamsKeyId> {
        self.inner.read().lookup.get(key).copied()
    }

    #[must_use]
    pub fn lookup(&self, id: PaintParamsKeyId) -> Option<PaintParamsKey> {
        self.inner.read().keys.get(id.index()).cloned()
    }

    /// Snapshot of every stored key, in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<PaintParamsKey> {
        self.inner.read().keys.clone()
    }

    pub fn clear(&mut self) {
        let inner = self.inner.get_mut();
        inner.keys.clear();
        inner.lookup.clear();
    }
}

impl PaintKeyDictionary for ShaderCodeDictionary {
    fn find_or_create(&self, key: &PaintParamsKey) -> PaintParamsKeyId {
        if let Some(&id) = self.inner.read().lookup.get(key) {
            return id;
        }

        let mut inner = self.inner.write();
        // Another worker may have inserted the key between the two locks.
        if let Some(&id) = inner.lookup.get(key) {
            return id;
        }
        let id = PaintParamsKeyId(inner.keys.len() as u32);
        inner.keys.push(key.clone());
        inner.lookup.insert(key.clone(), id);
        log::trace!("New paint key {id:?} ({:032x})", key.fingerprint());
        id
    }
}

// ─── Key Context ──────────────────────────────────────────────────────────────

/// Read-only environment handed to every option node while it emits a key.
#[derive(Clone, Copy)]
pub struct KeyContext<'a> {
    dictionary: &'a dyn PaintKeyDictionary,
}

impl<'a> KeyContext<'a> {
    #[must_use]
    pub fn new(dictionary: &'a dyn PaintKeyDictionary) -> Self {
        Self { dictionary }
    }

    #[inline]
    #[must_use]
    pub fn dictionary(&self) -> &'a dyn PaintKeyDictionary {
        self.dictionary
    }
}

impl fmt::Debug for KeyContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyContext").finish_non_exhaustive()
    }
}
