//! In-process record store.
//!
//! `InMemoryStore` implements both driven ports over `RwLock`-guarded maps.
//! Records live for the lifetime of the process and are lost on restart.
//! Identity and creation timestamps are assigned here, never by callers.
//!
//! Every record is also indexed by identifier so lookups do not scan. A
//! poisoned lock surfaces as a `Query` error rather than a panic.

mod demo_requests;
mod users;

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mockable::{Clock, DefaultClock};

use crate::domain::ports::DependencyHealth;
use crate::domain::{DemoRequest, DemoRequestId, User, UserId};

/// Insertion-ordered records plus an identifier index.
struct Table<K, V> {
    rows: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, V> Table<K, V>
where
    K: std::hash::Hash + Eq,
{
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).and_then(|position| self.rows.get(*position))
    }

    fn push(&mut self, key: K, row: V) {
        self.index.insert(key, self.rows.len());
        self.rows.push(row);
    }
}

/// Process-local store for demo requests and users.
///
/// # Examples
/// ```
/// use goloyal::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::default();
/// # let _ = store;
/// ```
pub struct InMemoryStore {
    clock: Arc<dyn Clock>,
    demo_requests: RwLock<Table<DemoRequestId, DemoRequest>>,
    users: RwLock<Table<UserId, User>>,
}

impl InMemoryStore {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            demo_requests: RwLock::new(Table::default()),
            users: RwLock::new(Table::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl DependencyHealth for InMemoryStore {
    fn name(&self) -> &'static str {
        "recordStore"
    }

    /// A poisoned table means every later query on it fails.
    fn is_healthy(&self) -> bool {
        !self.demo_requests.is_poisoned() && !self.users.is_poisoned()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, String> {
    lock.read().map_err(|_| String::from("store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, String> {
    lock.write().map_err(|_| String::from("store lock poisoned"))
}
