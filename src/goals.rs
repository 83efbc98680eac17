use crate::models::GoalSet;
use crate::notify::{Listeners, SubscriptionId};
use crate::storage::{KeyValueStorage, StorageError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

pub const GOALS_KEY: &str = "health-tracker-goals";

/// Stored goals as written by any build; fields absent from an older
/// snapshot fall back to the defaults one by one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredGoals {
    steps: Option<f64>,
    water_glasses: Option<f64>,
    sleep_hours: Option<f64>,
    calories: Option<f64>,
    workout_minutes: Option<f64>,
}

impl StoredGoals {
    fn is_complete(&self) -> bool {
        self.steps.is_some()
            && self.water_glasses.is_some()
            && self.sleep_hours.is_some()
            && self.calories.is_some()
            && self.workout_minutes.is_some()
    }

    fn merge_onto(self, defaults: GoalSet) -> GoalSet {
        use crate::models::round_count;
        GoalSet {
            steps: self.steps.map(round_count).unwrap_or(defaults.steps),
            water_glasses: self
                .water_glasses
                .map(round_count)
                .unwrap_or(defaults.water_glasses),
            sleep_hours: self.sleep_hours.unwrap_or(defaults.sleep_hours),
            calories: self.calories.map(round_count).unwrap_or(defaults.calories),
            workout_minutes: self
                .workout_minutes
                .map(round_count)
                .unwrap_or(defaults.workout_minutes),
        }
    }
}

pub struct GoalStore {
    storage: Arc<dyn KeyValueStorage>,
    goals: GoalSet,
    listeners: Listeners<GoalSet>,
}

impl GoalStore {
    /// Loads the active goal set, writing back the merged result when the
    /// stored one was absent, partial or unreadable.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (goals, complete) = load_goals(storage.as_ref());
        let store = Self {
            storage,
            goals,
            listeners: Listeners::default(),
        };
        if !complete {
            info!("initializing goal set");
            store.persist();
        }
        store
    }

    pub fn goals(&self) -> GoalSet {
        self.goals.clone()
    }

    pub fn set_goals(&mut self, goals: GoalSet) {
        info!(?goals, "goal set replaced");
        self.goals = goals;
        self.persist();
        self.listeners.emit(&self.goals);
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&GoalSet) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn persist(&self) {
        if let Err(err) = self.write_snapshot() {
            error!("failed to persist goals: {err}");
        }
    }

    fn write_snapshot(&self) -> Result<(), StorageError> {
        let payload = serde_json::to_string_pretty(&self.goals)?;
        self.storage.set(GOALS_KEY, &payload)
    }
}

impl std::fmt::Debug for GoalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalStore")
            .field("goals", &self.goals)
            .field("listeners", &self.listeners)
            .finish()
    }
}

fn load_goals(storage: &dyn KeyValueStorage) -> (GoalSet, bool) {
    let raw = match storage.get(GOALS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (GoalSet::default(), false),
        Err(err) => {
            error!("failed to read goals: {err}");
            return (GoalSet::default(), false);
        }
    };

    match serde_json::from_str::<StoredGoals>(&raw) {
        Ok(stored) => {
            let complete = stored.is_complete();
            (stored.merge_onto(GoalSet::default()), complete)
        }
        Err(err) => {
            error!("failed to parse goals: {err}");
            (GoalSet::default(), false)
        }
    }
}
