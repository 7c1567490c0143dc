//! Process-wide string pool.
//!
//! `Pool` wraps an [`Interner`] in a coarse mutex so that compilations
//! running on different threads can share one pool while handle identity
//! still implies content identity. A single global pool is available via
//! `Pool::init_global` / `Pool::global`; misuse (double init, use before
//! init) is reported as a status value rather than asserted, so the CLI
//! can surface it like any other error. Tests construct isolated pools
//! with `Pool::new`.

use std::sync::{Mutex, OnceLock};

use crate::interner::{Interner, Symbol};

/// Status codes for global pool management.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PoolError {
    AlreadyInitialized,
    NotInitialized,
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::AlreadyInitialized => f.write_str("string pool already initialized"),
            PoolError::NotInitialized => f.write_str("string pool not initialized"),
        }
    }
}

impl std::error::Error for PoolError {}

/// A shareable string pool: an interner behind a coarse mutex.
#[derive(Default)]
pub struct Pool {
    inner: Mutex<Interner>,
}

static GLOBAL: OnceLock<Pool> = OnceLock::new();

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize the process-wide pool. Fails if already initialized.
    pub fn init_global() -> Result<&'static Pool, PoolError> {
        let mut fresh = false;
        let pool = GLOBAL.get_or_init(|| {
            fresh = true;
            Pool::new()
        });
        if fresh {
            Ok(pool)
        } else {
            Err(PoolError::AlreadyInitialized)
        }
    }

    /// The process-wide pool. Fails if `init_global` has not run.
    pub fn global() -> Result<&'static Pool, PoolError> {
        GLOBAL.get().ok_or(PoolError::NotInitialized)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Interner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Intern a string (counts as one retain).
    pub fn intern(&self, s: &str) -> Symbol {
        self.lock().intern(s)
    }

    /// Owned copy of the interned sequence. `None` for stale handles.
    pub fn resolve(&self, sym: Symbol) -> Option<String> {
        self.lock().resolve(sym).map(str::to_owned)
    }

    /// Run `f` over the interned sequence without copying it out.
    pub fn with<R>(&self, sym: Symbol, f: impl FnOnce(Option<&str>) -> R) -> R {
        f(self.lock().resolve(sym))
    }

    /// Length in bytes of the interned sequence.
    pub fn length(&self, sym: Symbol) -> Option<usize> {
        self.lock().length(sym)
    }

    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.lock().lookup(s)
    }

    pub fn retain(&self, sym: Symbol) -> bool {
        self.lock().retain(sym)
    }

    pub fn release(&self, sym: Symbol) -> bool {
        self.lock().release(sym)
    }

    pub fn ref_count(&self, sym: Symbol) -> Option<u32> {
        self.lock().ref_count(sym)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
