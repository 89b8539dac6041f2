use crate::{backend::Backend, compile::build};
use lru::LruCache;
use numtree_error::Error;
use numtree_expr::{Expr, ParameterList};
use std::{
    fmt,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

type Entries<B> = LruCache<(Expr, ParameterList), Arc<<B as Backend>::Compiled>>;

/// A bounded memoization table of compiled forms, keyed by tree and parameter order.
///
/// The table holds at most [`CompileCache::capacity`] compiled forms. When it is full, inserting
/// a new one evicts the least recently used entry, so a loop that keeps building new trees does
/// not grow the table without limit.
///
/// A compiled form is a pure function of its key, so any two forms compiled for the same key are
/// interchangeable. Compilation runs outside the lock: two threads that miss on the same key at
/// the same time both compile, and the first one to insert its result wins. Lookups never observe
/// a partially built entry.
pub struct CompileCache<B: Backend> {
    entries: Mutex<Entries<B>>,
}

impl<B: Backend> CompileCache<B> {
    /// The number of compiled forms a cache created with [`CompileCache::new`] holds.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates an empty cache holding up to [`CompileCache::DEFAULT_CAPACITY`] compiled forms.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty cache holding up to `capacity` compiled forms. A capacity of zero is
    /// raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: Mutex::new(LruCache::new(capacity)) }
    }

    /// Locks the table. A panic while the lock was held cannot leave an entry half-inserted, so a
    /// poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Entries<B>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the compiled form of `expr` for the given parameter order, compiling it with
    /// `backend` if it is not cached yet.
    pub fn get_or_compile(
        &self,
        backend: &B,
        expr: &Expr,
        params: &ParameterList,
    ) -> Result<Arc<B::Compiled>, Error> {
        let key = (expr.clone(), params.clone());
        if let Some(compiled) = self.lock().get(&key) {
            tracing::debug!("compile cache hit");
            return Ok(Arc::clone(compiled));
        }

        tracing::debug!("compile cache miss");
        let compiled = Arc::new(build(backend, expr, params)?);
        let mut entries = self.lock();
        Ok(Arc::clone(entries.get_or_insert(key, || compiled)))
    }

    /// Returns the maximum number of compiled forms the cache holds.
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Returns the number of cached compiled forms.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes every cached compiled form.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<B: Backend> Default for CompileCache<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> fmt::Debug for CompileCache<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
