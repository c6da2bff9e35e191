//! Subscriber registry keyed by opaque subscription handles

use super::types::PriceSnapshot;
use crate::telemetry;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use uuid::Uuid;

/// Subscription identifier
pub type SubscriptionId = Uuid;

type Callback = Box<dyn Fn(&PriceSnapshot) + Send + Sync>;
type EntryMap = HashMap<SubscriptionId, Arc<Entry>>;

struct Entry {
    callback: Callback,
    active: AtomicBool,
    /// Highest sequence delivered so far (0 = nothing yet). Held across the
    /// callback so deliveries to one subscriber never run concurrently.
    delivered: Mutex<u64>,
}

impl Entry {
    /// Deliver `snapshot` unless the entry is gone or already has something newer
    fn deliver(&self, id: SubscriptionId, sequence: u64, snapshot: &PriceSnapshot) -> bool {
        let mut delivered = self.delivered.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.active.load(Ordering::Acquire) || *delivered >= sequence {
            return false;
        }
        *delivered = sequence;

        if catch_unwind(AssertUnwindSafe(|| (self.callback)(snapshot))).is_err() {
            tracing::error!(subscription = %id, sequence, "Subscriber panicked during delivery");
        }
        true
    }
}

fn lock(entries: &Mutex<EntryMap>) -> MutexGuard<'_, EntryMap> {
    // Entries are inserted and removed whole; a poisoned map is still consistent
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Set of registered snapshot callbacks
#[derive(Default)]
pub struct SubscriptionRegistry {
    entries: Arc<Mutex<EntryMap>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback under a fresh id
    ///
    /// The same closure may be registered any number of times; every call
    /// produces an independent subscription.
    pub fn add<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&PriceSnapshot) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        let entry = Arc::new(Entry {
            callback: Box::new(callback),
            active: AtomicBool::new(true),
            delivered: Mutex::new(0),
        });
        let count = {
            let mut entries = lock(&self.entries);
            entries.insert(id, entry);
            entries.len()
        };
        telemetry::set_subscribers(count);

        tracing::debug!(subscription = %id, "Subscriber added");

        Subscription {
            id,
            entries: Arc::downgrade(&self.entries),
        }
    }

    /// Remove a subscription; false if it was not registered
    pub fn remove(&self, id: SubscriptionId) -> bool {
        remove_entry(&self.entries, id)
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        lock(&self.entries).contains_key(&id)
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver to a single subscriber, returning whether it was called
    pub fn deliver_to(&self, id: SubscriptionId, sequence: u64, snapshot: &PriceSnapshot) -> bool {
        let entry = lock(&self.entries).get(&id).cloned();
        entry.is_some_and(|entry| entry.deliver(id, sequence, snapshot))
    }

    /// Fan `snapshot` out to every subscriber, returning how many were called
    ///
    /// Callbacks run outside the registry lock, so they may subscribe or
    /// unsubscribe freely.
    pub fn notify(&self, sequence: u64, snapshot: &PriceSnapshot) -> usize {
        let entries: Vec<(SubscriptionId, Arc<Entry>)> = lock(&self.entries)
            .iter()
            .map(|(id, entry)| (*id, Arc::clone(entry)))
            .collect();

        entries
            .iter()
            .filter(|(id, entry)| entry.deliver(*id, sequence, snapshot))
            .count()
    }
}

fn remove_entry(entries: &Mutex<EntryMap>, id: SubscriptionId) -> bool {
    let (removed, count) = {
        let mut entries = lock(entries);
        (entries.remove(&id), entries.len())
    };

    match removed {
        Some(entry) => {
            entry.active.store(false, Ordering::Release);
            telemetry::set_subscribers(count);
            tracing::debug!(subscription = %id, "Subscriber removed");
            true
        }
        None => false,
    }
}

/// Revocable registration returned by [`SubscriptionRegistry::add`]
///
/// Dropping the handle does not unsubscribe.
#[derive(Clone)]
pub struct Subscription {
    id: SubscriptionId,
    entries: Weak<Mutex<EntryMap>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stop deliveries to this subscription
    ///
    /// Idempotent: returns true only for the call that removed it.
    pub fn unsubscribe(&self) -> bool {
        self.entries
            .upgrade()
            .is_some_and(|entries| remove_entry(&entries, self.id))
    }

    /// Whether the subscription is still registered
    pub fn is_active(&self) -> bool {
        self.entries
            .upgrade()
            .is_some_and(|entries| lock(&entries).contains_key(&self.id))
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
