pub mod app;
pub mod config;
pub mod entries;
pub mod errors;
pub mod goals;
pub mod handlers;
pub mod input;
pub mod models;
pub mod notify;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use entries::EntryStore;
pub use goals::GoalStore;
pub use input::{BoundedInput, InputBounds};
pub use state::{AppState, HealthData};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
