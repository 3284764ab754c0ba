use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 仪表盘计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct DashboardStats {
    pub total_teams: i64,
    pub total_employees: i64,
    pub pending_evaluations: i64,
}

// 最近动态
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub title: String,
    pub description: String,
    pub user: String,
}

// 仪表盘响应
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityItem>,
}
