use crate::entries::EntryStore;
use crate::goals::GoalStore;
use crate::storage::KeyValueStorage;
use crate::theme::ThemeStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Every store, opened over the same key-value storage.
pub struct HealthData {
    pub entries: EntryStore,
    pub goals: GoalStore,
    pub theme: ThemeStore,
}

impl HealthData {
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            entries: EntryStore::open(storage.clone()),
            goals: GoalStore::open(storage.clone()),
            theme: ThemeStore::open(storage),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<Mutex<HealthData>>,
}

impl AppState {
    pub fn new(data: HealthData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }
}
