use crate::models::{DailyRecord, RecordUpdate};
use crate::notify::{Listeners, SubscriptionId};
use crate::storage::{KeyValueStorage, StorageError};
use chrono::{Duration, NaiveDate};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, error};

pub const ENTRIES_KEY: &str = "health-tracker-entries";

/// Per-date health records backed by a full JSON snapshot under
/// [`ENTRIES_KEY`]. Every mutation rewrites the snapshot before returning.
pub struct EntryStore {
    storage: Arc<dyn KeyValueStorage>,
    records: BTreeMap<NaiveDate, DailyRecord>,
    listeners: Listeners<DailyRecord>,
}

impl EntryStore {
    /// Loads the stored snapshot. A missing, unreadable or malformed snapshot
    /// yields an empty store.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let records = load_records(storage.as_ref());
        Self {
            storage,
            records,
            listeners: Listeners::default(),
        }
    }

    pub fn record(&self, date: NaiveDate) -> DailyRecord {
        self.records
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyRecord::placeholder(date))
    }

    /// Merges `update` into the record for `date`, creating it from the
    /// placeholder when absent, and returns the stored result.
    pub fn update_record(&mut self, date: NaiveDate, update: &RecordUpdate) -> DailyRecord {
        let updated = {
            let entry = self
                .records
                .entry(date)
                .or_insert_with(|| DailyRecord::placeholder(date));
            entry.apply(update);
            entry.clone()
        };
        debug!(%date, ?update, "record updated");

        self.persist();
        self.listeners.emit(&updated);
        updated
    }

    /// Exactly `days` records for the consecutive dates ending at `end`,
    /// oldest first. Dates without data are placeholders.
    pub fn window(&self, end: NaiveDate, days: usize) -> Vec<DailyRecord> {
        let mut window = Vec::with_capacity(days);
        for offset in (0..days).rev() {
            let date = end - Duration::days(offset as i64);
            window.push(self.record(date));
        }
        window
    }

    pub fn last_7_days(&self, today: NaiveDate) -> Vec<DailyRecord> {
        self.window(today, 7)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&DailyRecord) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn persist(&self) {
        if let Err(err) = self.write_snapshot() {
            error!("failed to persist entries: {err}");
        }
    }

    fn write_snapshot(&self) -> Result<(), StorageError> {
        let snapshot: Vec<&DailyRecord> = self.records.values().collect();
        let payload = serde_json::to_string_pretty(&snapshot)?;
        self.storage.set(ENTRIES_KEY, &payload)
    }
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("records", &self.records.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

fn load_records(storage: &dyn KeyValueStorage) -> BTreeMap<NaiveDate, DailyRecord> {
    let raw = match storage.get(ENTRIES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeMap::new(),
        Err(err) => {
            error!("failed to read entries: {err}");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str::<Vec<DailyRecord>>(&raw) {
        // Later duplicates of a date win.
        Ok(records) => records
            .into_iter()
            .map(|record| (record.date, record))
            .collect(),
        Err(err) => {
            error!("failed to parse entries: {err}");
            BTreeMap::new()
        }
    }
}
