use crate::entries::EntryStore;
use crate::goals::GoalStore;
use crate::models::{
    DailyRecord, DashboardResponse, GoalSet, Metric, MetricCard, Progress, TrendPoint,
    TrendSeries,
};
use chrono::{Local, NaiveDate, Timelike};

/// Percentage of `goal` reached, rounded. Not capped at 100; a non-positive
/// goal counts as no progress.
pub fn percent_of(value: f64, goal: f64) -> i64 {
    if goal <= 0.0 || !goal.is_finite() || !value.is_finite() {
        return 0;
    }
    (value / goal * 100.0).round() as i64
}

/// Width of a progress bar: the raw percentage held to 0..=100.
pub fn bar_width(percent: i64) -> u8 {
    percent.clamp(0, 100) as u8
}

pub fn progress(value: f64, goal: f64) -> Progress {
    let raw = percent_of(value, goal);
    Progress {
        raw,
        bar: bar_width(raw),
    }
}

/// Cards for every goal metric, plus weight when it has been logged.
pub fn metric_cards(record: &DailyRecord, goals: &GoalSet) -> Vec<MetricCard> {
    Metric::ALL
        .into_iter()
        .filter(|metric| *metric != Metric::Weight || record.weight.is_some())
        .map(|metric| {
            let value = metric.value_of(record);
            let goal = metric.goal_of(goals);
            MetricCard {
                metric,
                label: metric.label().to_string(),
                value,
                unit: metric.unit().map(str::to_string),
                goal,
                progress: goal.map(|goal| progress(value, goal)),
            }
        })
        .collect()
}

/// One point per record, in window order, labelled by weekday.
pub fn trend_series(window: &[DailyRecord], metric: Metric) -> TrendSeries {
    let points = window
        .iter()
        .map(|record| TrendPoint {
            day: weekday_label(record.date),
            date: record.date,
            value: metric.value_of(record),
        })
        .collect();

    TrendSeries {
        metric,
        label: metric.label().to_string(),
        unit: metric.unit().map(str::to_string),
        points,
    }
}

pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Morning",
        12..=16 => "Afternoon",
        _ => "Evening",
    }
}

pub fn build_dashboard(entries: &EntryStore, goals: &GoalStore) -> DashboardResponse {
    let now = Local::now();
    build_dashboard_at(now.date_naive(), now.hour(), entries, goals)
}

pub fn build_dashboard_at(
    today: NaiveDate,
    hour: u32,
    entries: &EntryStore,
    goals: &GoalStore,
) -> DashboardResponse {
    let record = entries.record(today);
    let window = entries.last_7_days(today);

    DashboardResponse {
        date: today,
        greeting: greeting(hour).to_string(),
        cards: metric_cards(&record, &goals.goals()),
        trends: Metric::CHARTED
            .into_iter()
            .map(|metric| trend_series(&window, metric))
            .collect(),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
