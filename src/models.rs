use crate::input::InputBounds;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One calendar day's measurements, keyed by `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_count")]
    pub steps: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub water_glasses: u32,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub sleep_hours: f64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub calories: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub workout_minutes: u32,
}

impl DailyRecord {
    /// The record reported for a date with nothing logged.
    pub fn placeholder(date: NaiveDate) -> Self {
        Self {
            date,
            steps: 0,
            water_glasses: 0,
            sleep_hours: 0.0,
            weight: None,
            calories: 0,
            workout_minutes: 0,
        }
    }

    pub fn apply(&mut self, update: &RecordUpdate) {
        if let Some(steps) = update.steps {
            self.steps = steps;
        }
        if let Some(water) = update.water_glasses {
            self.water_glasses = water;
        }
        if let Some(sleep) = update.sleep_hours {
            self.sleep_hours = sleep;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(calories) = update.calories {
            self.calories = calories;
        }
        if let Some(minutes) = update.workout_minutes {
            self.workout_minutes = minutes;
        }
    }
}

/// Snapshots written by older builds may carry fractional or null counters.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(round_count).unwrap_or_default())
}

fn lenient_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn round_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Field-wise patch for a [`DailyRecord`]. `None` leaves a field untouched;
/// `weight: Some(None)` clears the logged weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_glasses: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(
        default,
        deserialize_with = "present_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_minutes: Option<u32>,
}

fn present_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

/// Daily targets. Exactly one set is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSet {
    pub steps: u32,
    pub water_glasses: u32,
    pub sleep_hours: f64,
    pub calories: u32,
    pub workout_minutes: u32,
}

impl Default for GoalSet {
    fn default() -> Self {
        Self {
            steps: 10_000,
            water_glasses: 8,
            sleep_hours: 8.0,
            calories: 2_000,
            workout_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Steps,
    WaterGlasses,
    SleepHours,
    Calories,
    WorkoutMinutes,
    Weight,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Steps,
        Metric::WaterGlasses,
        Metric::SleepHours,
        Metric::Calories,
        Metric::WorkoutMinutes,
        Metric::Weight,
    ];

    /// Metrics drawn as weekly trend charts on the dashboard.
    pub const CHARTED: [Metric; 4] = [
        Metric::Steps,
        Metric::WaterGlasses,
        Metric::SleepHours,
        Metric::Calories,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Steps => "Steps",
            Metric::WaterGlasses => "Water",
            Metric::SleepHours => "Sleep",
            Metric::Calories => "Calories",
            Metric::WorkoutMinutes => "Workout",
            Metric::Weight => "Weight",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Metric::Steps => None,
            Metric::WaterGlasses => Some("glasses"),
            Metric::SleepHours => Some("hrs"),
            Metric::Calories => Some("kcal"),
            Metric::WorkoutMinutes => Some("min"),
            Metric::Weight => Some("kg"),
        }
    }

    /// Bounds used when logging today's value.
    pub fn log_bounds(self) -> InputBounds {
        match self {
            Metric::Steps => InputBounds::new(0.0, 100_000.0, 500.0),
            Metric::WaterGlasses => InputBounds::new(0.0, 20.0, 1.0),
            Metric::SleepHours => InputBounds::new(0.0, 24.0, 0.5),
            Metric::Calories => InputBounds::new(0.0, 9_999.0, 50.0),
            Metric::WorkoutMinutes => InputBounds::new(0.0, 300.0, 1.0),
            Metric::Weight => InputBounds::new(0.0, 300.0, 0.1),
        }
    }

    /// Bounds used when editing the goal for this metric. Weight has no goal.
    pub fn goal_bounds(self) -> Option<InputBounds> {
        match self {
            Metric::Steps => Some(InputBounds::new(0.0, 50_000.0, 500.0)),
            Metric::WaterGlasses => Some(InputBounds::new(0.0, 30.0, 1.0)),
            Metric::SleepHours => Some(InputBounds::new(0.0, 12.0, 0.5)),
            Metric::Calories => Some(InputBounds::new(0.0, 5_000.0, 100.0)),
            Metric::WorkoutMinutes => Some(InputBounds::new(0.0, 180.0, 1.0)),
            Metric::Weight => None,
        }
    }

    /// Current value as shown in a number input; an unlogged weight reads 0.
    pub fn value_of(self, record: &DailyRecord) -> f64 {
        match self {
            Metric::Steps => f64::from(record.steps),
            Metric::WaterGlasses => f64::from(record.water_glasses),
            Metric::SleepHours => record.sleep_hours,
            Metric::Calories => f64::from(record.calories),
            Metric::WorkoutMinutes => f64::from(record.workout_minutes),
            Metric::Weight => record.weight.unwrap_or(0.0),
        }
    }

    pub fn goal_of(self, goals: &GoalSet) -> Option<f64> {
        match self {
            Metric::Steps => Some(f64::from(goals.steps)),
            Metric::WaterGlasses => Some(f64::from(goals.water_glasses)),
            Metric::SleepHours => Some(goals.sleep_hours),
            Metric::Calories => Some(f64::from(goals.calories)),
            Metric::WorkoutMinutes => Some(f64::from(goals.workout_minutes)),
            Metric::Weight => None,
        }
    }

    /// Patch setting this metric to a committed input value. A weight of
    /// zero or less means "not logged".
    pub fn update_for(self, value: f64) -> RecordUpdate {
        let mut update = RecordUpdate::default();
        match self {
            Metric::Steps => update.steps = Some(round_count(value)),
            Metric::WaterGlasses => update.water_glasses = Some(round_count(value)),
            Metric::SleepHours => update.sleep_hours = Some(value.max(0.0)),
            Metric::Calories => update.calories = Some(round_count(value)),
            Metric::WorkoutMinutes => update.workout_minutes = Some(round_count(value)),
            Metric::Weight => update.weight = Some((value > 0.0).then_some(value)),
        }
        update
    }

    /// Writes a committed goal value. Returns false for metrics without a goal.
    pub fn set_goal(self, goals: &mut GoalSet, value: f64) -> bool {
        match self {
            Metric::Steps => goals.steps = round_count(value),
            Metric::WaterGlasses => goals.water_glasses = round_count(value),
            Metric::SleepHours => goals.sleep_hours = value.max(0.0),
            Metric::Calories => goals.calories = round_count(value),
            Metric::WorkoutMinutes => goals.workout_minutes = round_count(value),
            Metric::Weight => return false,
        }
        true
    }
}

/// A number that arrives either as JSON number or as raw input text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub fn into_text(self) -> String {
        match self {
            RawNumber::Number(value) => value.to_string(),
            RawNumber::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogRequest {
    pub metric: Metric,
    pub value: RawNumber,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsRequest {
    pub steps: Option<RawNumber>,
    pub water_glasses: Option<RawNumber>,
    pub sleep_hours: Option<RawNumber>,
    pub calories: Option<RawNumber>,
    pub workout_minutes: Option<RawNumber>,
}

impl GoalsRequest {
    pub fn into_fields(self) -> Vec<(Metric, RawNumber)> {
        [
            (Metric::Steps, self.steps),
            (Metric::WaterGlasses, self.water_glasses),
            (Metric::SleepHours, self.sleep_hours),
            (Metric::Calories, self.calories),
            (Metric::WorkoutMinutes, self.workout_minutes),
        ]
        .into_iter()
        .filter_map(|(metric, raw)| raw.map(|raw| (metric, raw)))
        .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub metric: Option<Metric>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: String,
    pub next: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub raw: i64,
    pub bar: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub metric: Metric,
    pub label: String,
    pub value: f64,
    pub unit: Option<String>,
    pub goal: Option<f64>,
    pub progress: Option<Progress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: String,
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub metric: Metric,
    pub label: String,
    pub unit: Option<String>,
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub record: DailyRecord,
    pub goals: GoalSet,
    pub cards: Vec<MetricCard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    pub greeting: String,
    pub cards: Vec<MetricCard>,
    pub trends: Vec<TrendSeries>,
}
