//! Registry of custom token types.
//!
//! Macros that need token kinds beyond the built-ins register them by name
//! and receive a [`CustomTokenType`] whose id is unique for the lifetime of
//! the process.
//!
//! # Thread Safety
//!
//! Readers take a cheap clone of an immutable snapshot of the name→type map
//! and perform the lookup without holding any lock. Writers serialize on a
//! separate mutex, build a new map from the current snapshot and install it
//! in one store, so a reader never observes a half-updated map.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::token::{CustomTokenType, CUSTOM_TOKEN_OFFSET};

type Snapshot = Arc<FxHashMap<Arc<str>, CustomTokenType>>;

/// Next custom id, shared by every registry so ids never collide.
static NEXT_CUSTOM_ID: AtomicU32 = AtomicU32::new(CUSTOM_TOKEN_OFFSET);

static GLOBAL: Lazy<TokenTypeRegistry> = Lazy::new(TokenTypeRegistry::new);

/// Name → [`CustomTokenType`] registry.
pub struct TokenTypeRegistry {
    snapshot: RwLock<Snapshot>,
    writer: Mutex<()>,
}

impl TokenTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        TokenTypeRegistry {
            snapshot: RwLock::new(Arc::new(FxHashMap::default())),
            writer: Mutex::new(()),
        }
    }

    /// Process-wide default registry.
    pub fn global() -> &'static TokenTypeRegistry {
        &GLOBAL
    }

    /// Current immutable view of the registry.
    #[inline]
    fn load(&self) -> Snapshot {
        Arc::clone(&*self.snapshot.read())
    }

    /// Register `name`, returning its type.
    ///
    /// Registering a name twice returns the type from the first call.
    pub fn register(&self, name: &str) -> CustomTokenType {
        // Fast path: already registered
        if let Some(&kind) = self.load().get(name) {
            return kind;
        }

        let _guard = self.writer.lock();

        // Double-check after acquiring the writer lock
        let current = self.load();
        if let Some(&kind) = current.get(name) {
            return kind;
        }

        let id = NEXT_CUSTOM_ID.fetch_add(1, Ordering::Relaxed);
        let kind = CustomTokenType::from_raw(id);

        let mut next = (*current).clone();
        next.insert(Arc::from(name), kind);
        *self.snapshot.write() = Arc::new(next);
        kind
    }

    /// Look up a registered name.
    pub fn lookup(&self, name: &str) -> Option<CustomTokenType> {
        self.load().get(name).copied()
    }

    /// Reverse lookup of a type's registered name.
    pub fn name_of(&self, kind: CustomTokenType) -> Option<Arc<str>> {
        self.load()
            .iter()
            .find(|(_, &k)| k == kind)
            .map(|(name, _)| Arc::clone(name))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }
}

impl Default for TokenTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenTypeRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
