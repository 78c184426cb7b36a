pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod series;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
