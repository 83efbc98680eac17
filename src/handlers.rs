use crate::errors::AppError;
use crate::input::BoundedInput;
use crate::models::{
    DashboardResponse, GoalSet, GoalsRequest, LogRequest, Metric, ThemeRequest, ThemeResponse,
    TodayResponse, TrendSeries, WeekQuery,
};
use crate::state::{AppState, HealthData};
use crate::theme::Theme;
use crate::ui::render_index;
use crate::view::{build_dashboard, greeting, metric_cards, today, trend_series};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::{Local, NaiveDate, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim() {
            "increment" => Ok(Direction::Increment),
            "decrement" => Ok(Direction::Decrement),
            other => Err(AppError::InvalidDirection(other.to_string())),
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = today();
    let data = state.data.lock().await;
    Html(render_index(
        date,
        greeting(Local::now().hour()),
        data.theme.theme(),
    ))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let data = state.data.lock().await;
    Json(to_today_response(&data, today()))
}

pub async fn log_today(
    State(state): State<AppState>,
    Json(payload): Json<LogRequest>,
) -> Json<TodayResponse> {
    let date = today();
    let mut data = state.data.lock().await;
    let metric = payload.metric;

    let current = metric.value_of(&data.entries.record(date));
    let mut input = BoundedInput::new(current, metric.log_bounds());
    input.focus();
    input.edit(payload.value.into_text());
    let entries = &mut data.entries;
    input.commit(|value| {
        entries.update_record(date, &metric.update_for(value));
    });

    Json(to_today_response(&data, date))
}

pub async fn step_today(
    State(state): State<AppState>,
    Path((metric, direction)): Path<(Metric, String)>,
) -> Result<Json<TodayResponse>, AppError> {
    let direction = Direction::parse(&direction)?;
    let mut data = state.data.lock().await;
    let date = apply_step(&mut data, metric, direction);
    Ok(Json(to_today_response(&data, date)))
}

pub async fn step_form(
    State(state): State<AppState>,
    Path((metric, direction)): Path<(Metric, String)>,
) -> Result<Redirect, AppError> {
    let direction = Direction::parse(&direction)?;
    let mut data = state.data.lock().await;
    apply_step(&mut data, metric, direction);
    Ok(Redirect::to("/"))
}

fn apply_step(data: &mut HealthData, metric: Metric, direction: Direction) -> NaiveDate {
    let date = today();
    let current = metric.value_of(&data.entries.record(date));
    let mut input = BoundedInput::new(current, metric.log_bounds());
    let entries = &mut data.entries;
    let commit = |value: f64| {
        entries.update_record(date, &metric.update_for(value));
    };
    match direction {
        Direction::Increment => input.increment(commit),
        Direction::Decrement => input.decrement(commit),
    };
    date
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let data = state.data.lock().await;
    Json(build_dashboard(&data.entries, &data.goals))
}

pub async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Json<TrendSeries> {
    let metric = query.metric.unwrap_or(Metric::Steps);
    let data = state.data.lock().await;
    let window = data.entries.last_7_days(today());
    Json(trend_series(&window, metric))
}

pub async fn get_goals(State(state): State<AppState>) -> Json<GoalSet> {
    let data = state.data.lock().await;
    Json(data.goals.goals())
}

/// Each provided field goes through the same commit path as the goal
/// editor's number inputs; omitted fields keep their current target.
pub async fn put_goals(
    State(state): State<AppState>,
    Json(payload): Json<GoalsRequest>,
) -> Json<GoalSet> {
    let mut data = state.data.lock().await;
    let mut draft = data.goals.goals();

    for (metric, raw) in payload.into_fields() {
        let (Some(bounds), Some(current)) = (metric.goal_bounds(), metric.goal_of(&draft)) else {
            continue;
        };
        let mut input = BoundedInput::new(current, bounds);
        input.edit(raw.into_text());
        input.commit(|value| {
            metric.set_goal(&mut draft, value);
        });
    }

    data.goals.set_goals(draft);
    Json(data.goals.goals())
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let data = state.data.lock().await;
    Json(theme_response(data.theme.theme()))
}

pub async fn put_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<ThemeResponse>, AppError> {
    let theme: Theme = payload.theme.parse().map_err(AppError::InvalidTheme)?;
    let mut data = state.data.lock().await;
    data.theme.set_theme(theme);
    Ok(Json(theme_response(theme)))
}

pub async fn cycle_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let mut data = state.data.lock().await;
    let theme = data.theme.cycle();
    Json(theme_response(theme))
}

fn to_today_response(data: &HealthData, date: NaiveDate) -> TodayResponse {
    let record = data.entries.record(date);
    let goals = data.goals.goals();
    TodayResponse {
        date,
        cards: metric_cards(&record, &goals),
        record,
        goals,
    }
}

fn theme_response(theme: Theme) -> ThemeResponse {
    ThemeResponse {
        theme: theme.to_string(),
        next: theme.next().to_string(),
    }
}
