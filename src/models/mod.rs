pub mod activity_logs;
pub mod common;
pub mod dashboard;
pub mod evaluations;
pub mod kpis;
pub mod users;

pub use common::{ApiResponse, ErrorCode};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
