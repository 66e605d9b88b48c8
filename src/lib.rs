//! ironlog - Personal strength training tracker
//!
//! Logs sets against a weekly program and derives weekly muscle volume,
//! load progression suggestions and long-term strength trends.

pub mod analytics;
pub mod db;
pub mod error;
pub mod exercises;
pub mod tui;

pub use analytics::Analytics;
pub use db::Database;
pub use error::AnalyticsError;
