use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// Acquire a read guard, recovering the data if a callback panicked while
/// another guard was held.
pub(crate) fn read_lock<T: ?Sized>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering from poisoning.
pub(crate) fn write_lock<T: ?Sized>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

struct Entry<F: ?Sized> {
    id: usize,
    callback: Arc<F>,
}

/// An ordered set of callbacks, unique by `Arc` identity.
pub(crate) struct Registry<F: ?Sized> {
    next_id: AtomicUsize,
    entries: RwLock<Vec<Entry<F>>>,
}

fn same_callback<F: ?Sized>(a: &Arc<F>, b: &Arc<F>) -> bool {
    // Compare data pointers only; vtable pointers are not unique per type.
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

impl<F: ?Sized + Send + Sync + 'static> Registry<F> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicUsize::new(0),
            entries: RwLock::new(Vec::new()),
        })
    }

    /// Register `callback` unless the same `Arc` is already present.
    ///
    /// Either way the returned handle refers to the registration that now
    /// holds `callback`.
    pub(crate) fn insert(self: &Arc<Self>, callback: Arc<F>) -> Subscription {
        let mut entries = write_lock(&self.entries);
        let id = match entries
            .iter()
            .find(|entry| same_callback(&entry.callback, &callback))
        {
            Some(existing) => existing.id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                entries.push(Entry { id, callback });
                id
            }
        };
        drop(entries);

        let registry: Arc<dyn Release> = self.clone();
        Subscription {
            id,
            registry: Arc::downgrade(&registry),
        }
    }

    /// Remove `callback` if present. Returns whether anything was removed.
    pub(crate) fn remove_callback(&self, callback: &Arc<F>) -> bool {
        let mut entries = write_lock(&self.entries);
        let before = entries.len();
        entries.retain(|entry| !same_callback(&entry.callback, callback));
        entries.len() != before
    }

    /// Clone the current callbacks so they can run without the lock held.
    pub(crate) fn snapshot(&self) -> Vec<Arc<F>> {
        read_lock(&self.entries)
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        read_lock(&self.entries).len()
    }
}

trait Release: Send + Sync {
    fn release(&self, id: usize) -> bool;
    fn contains(&self, id: usize) -> bool;
}

impl<F: ?Sized + Send + Sync> Release for Registry<F> {
    fn release(&self, id: usize) -> bool {
        let mut entries = write_lock(&self.entries);
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    fn contains(&self, id: usize) -> bool {
        read_lock(&self.entries).iter().any(|entry| entry.id == id)
    }
}

/// Handle to a registered listener or middleware.
///
/// Dropping the handle leaves the callback registered. Call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it; doing so more than
/// once is a no-op. The handle does not keep the state container alive.
#[derive(Clone)]
pub struct Subscription {
    id: usize,
    registry: Weak<dyn Release>,
}

impl Subscription {
    /// Remove the callback this handle refers to.
    ///
    /// Returns `true` if this call removed it, `false` if it was already gone.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.release(self.id),
            None => false,
        }
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map_or(false, |registry| registry.contains(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
