use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Record {
    steps: u32,
    water_glasses: u32,
    sleep_hours: f64,
    weight: Option<f64>,
    workout_minutes: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Goals {
    steps: u32,
    water_glasses: u32,
    sleep_hours: f64,
    calories: u32,
    workout_minutes: u32,
}

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    record: Record,
}

#[derive(Debug, Deserialize)]
struct TrendPoint {
    day: String,
}

#[derive(Debug, Deserialize)]
struct TrendSeries {
    points: Vec<TrendPoint>,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    greeting: String,
    trends: Vec<TrendSeries>,
}

#[derive(Debug, Deserialize)]
struct ThemeResponse {
    theme: String,
    next: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for &pid in pids.iter() {
                unsafe {
                    libc::kill(pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("vital_track_http_{}_{}", std::process::id(), nanos));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_dir: &Path) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_vital_track"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", data_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(&unique_data_dir()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn log_value(client: &Client, base_url: &str, body: serde_json::Value) -> TodayResponse {
    let response = client
        .post(format!("{base_url}/api/today"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_log_clamps_to_field_max() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today = log_value(
        &client,
        &server.base_url,
        serde_json::json!({ "metric": "waterGlasses", "value": "25" }),
    )
    .await;
    assert_eq!(today.record.water_glasses, 20);
    assert!(!today.date.is_empty());

    let today = log_value(
        &client,
        &server.base_url,
        serde_json::json!({ "metric": "sleepHours", "value": "abc" }),
    )
    .await;
    assert_eq!(today.record.sleep_hours, 0.0);
    assert_eq!(today.record.water_glasses, 20);
}

#[tokio::test]
async fn http_step_buttons_move_by_field_step() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    log_value(
        &client,
        &server.base_url,
        serde_json::json!({ "metric": "steps", "value": 5 }),
    )
    .await;

    let today: TodayResponse = client
        .post(format!("{}/api/today/steps/increment", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(today.record.steps, 505);

    let today: TodayResponse = client
        .post(format!("{}/api/today/workoutMinutes/decrement", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(today.record.workout_minutes, 0);
    assert_eq!(today.record.steps, 505);
}

#[tokio::test]
async fn http_unknown_direction_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/today/steps/sideways", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_weight_zero_clears_it() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today = log_value(
        &client,
        &server.base_url,
        serde_json::json!({ "metric": "weight", "value": "72.5" }),
    )
    .await;
    assert_eq!(today.record.weight, Some(72.5));

    let today = log_value(
        &client,
        &server.base_url,
        serde_json::json!({ "metric": "weight", "value": "0" }),
    )
    .await;
    assert_eq!(today.record.weight, None);
}

#[tokio::test]
async fn http_goals_update_clamps_and_keeps_missing_fields() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: Goals = client
        .get(format!("{}/api/goals", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let goals: Goals = client
        .put(format!("{}/api/goals", server.base_url))
        .json(&serde_json::json!({ "steps": "80000", "sleepHours": 7.5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(goals.steps, 50_000);
    assert_eq!(goals.sleep_hours, 7.5);
    assert_eq!(goals.water_glasses, before.water_glasses);
    assert_eq!(goals.calories, before.calories);
    assert_eq!(goals.workout_minutes, before.workout_minutes);
}

#[tokio::test]
async fn http_goal_text_commits_like_the_number_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let goals: Goals = client
        .put(format!("{}/api/goals", server.base_url))
        .json(&serde_json::json!({ "calories": "1800 kcal", "workoutMinutes": "Infinity" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(goals.calories, 1_800);
    assert_eq!(goals.workout_minutes, 0);
}

#[tokio::test]
async fn http_dashboard_has_weekly_trends() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(["Morning", "Afternoon", "Evening"].contains(&dashboard.greeting.as_str()));
    assert_eq!(dashboard.trends.len(), 4);
    for trend in &dashboard.trends {
        assert_eq!(trend.points.len(), 7);
        assert!(trend.points.iter().all(|point| point.day.len() == 3));
    }

    let week: TrendSeries = client
        .get(format!("{}/api/week?metric=calories", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(week.points.len(), 7);
}

#[tokio::test]
async fn http_theme_cycles_and_rejects_unknown() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let set: ThemeResponse = client
        .put(format!("{}/api/theme", server.base_url))
        .json(&serde_json::json!({ "theme": "system" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(set.theme, "system");
    assert_eq!(set.next, "dark");

    let cycled: ThemeResponse = client
        .post(format!("{}/api/theme/cycle", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cycled.theme, "dark");

    let response = client
        .put(format!("{}/api/theme", server.base_url))
        .json(&serde_json::json!({ "theme": "sepia" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_records_survive_restart() {
    let _guard = TEST_LOCK.lock().await;
    let data_dir = unique_data_dir();
    let client = Client::new();

    {
        let server = spawn_server(&data_dir).await;
        log_value(
            &client,
            &server.base_url,
            serde_json::json!({ "metric": "calories", "value": "1850" }),
        )
        .await;
        log_value(
            &client,
            &server.base_url,
            serde_json::json!({ "metric": "sleepHours", "value": "6.5" }),
        )
        .await;
    }

    let server = spawn_server(&data_dir).await;
    let raw: serde_json::Value = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(raw["record"]["calories"], 1850);
    assert_eq!(raw["record"]["sleepHours"], 6.5);
    assert!(raw["record"]["weight"].is_null());
    assert!(data_dir.join("health-tracker-entries.json").exists());
    assert!(data_dir.join("health-tracker-goals.json").exists());

    drop(server);
    let _ = std::fs::remove_dir_all(data_dir);
}
