use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 操作类型
pub struct ActivityAction;

impl ActivityAction {
    pub const LOGIN: &'static str = "LOGIN";
    pub const EVALUATION_UPDATED: &'static str = "EVALUATION_UPDATED";
    pub const KPI_GROUP_CREATED: &'static str = "KPI_GROUP_CREATED";
    pub const KPI_GROUP_UPDATED: &'static str = "KPI_GROUP_UPDATED";
    pub const KPI_ITEM_CREATED: &'static str = "KPI_ITEM_CREATED";
    pub const KPI_ITEM_UPDATED: &'static str = "KPI_ITEM_UPDATED";
    pub const USER_CREATED: &'static str = "USER_CREATED";
    pub const USER_DELETED: &'static str = "USER_DELETED";
    pub const USER_UPDATED: &'static str = "USER_UPDATED";
}

// 操作日志（附带操作人姓名）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "activity.ts")]
pub struct ActivityLog {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub action: String,
    pub details: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ActivityLog {
    fn detail(&self, key: &str) -> Option<String> {
        self.details.as_ref()?.get(key).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// 展示用标题
    pub fn title(&self) -> String {
        let name = &self.user_name;
        match self.action.as_str() {
            ActivityAction::LOGIN => format!("{name} Logged In"),
            ActivityAction::EVALUATION_UPDATED => format!("{name} Updated Evaluation"),
            ActivityAction::KPI_GROUP_CREATED => format!("{name} Created KPI Group"),
            ActivityAction::KPI_GROUP_UPDATED => format!("{name} Updated KPI Group"),
            ActivityAction::KPI_ITEM_CREATED => format!("{name} Created KPI Item"),
            ActivityAction::KPI_ITEM_UPDATED => format!("{name} Updated KPI Item"),
            ActivityAction::USER_CREATED => format!("{name} Created User"),
            ActivityAction::USER_DELETED => format!("{name} Deleted User"),
            ActivityAction::USER_UPDATED => format!("{name} Updated User"),
            other => format!("{name} performed {other}"),
        }
    }

    /// 展示用描述，内容取自 details
    pub fn description(&self) -> String {
        match self.action.as_str() {
            ActivityAction::LOGIN => format!(
                "Logged in via {}",
                self.detail("method").unwrap_or_else(|| "email".into())
            ),
            ActivityAction::EVALUATION_UPDATED => format!(
                "Updated evaluation for {}",
                self.detail("employee_name")
                    .unwrap_or_else(|| "employee".into())
            ),
            ActivityAction::KPI_GROUP_CREATED => format!(
                "Created group \"{}\"",
                self.detail("group_name").unwrap_or_default()
            ),
            ActivityAction::KPI_GROUP_UPDATED => format!(
                "Updated group \"{}\"",
                self.detail("group_name").unwrap_or_default()
            ),
            ActivityAction::KPI_ITEM_CREATED => format!(
                "Created item \"{}\"",
                self.detail("item_name").unwrap_or_default()
            ),
            ActivityAction::USER_CREATED => format!(
                "Created user \"{}\"",
                self.detail("user_name").unwrap_or_default()
            ),
            ActivityAction::USER_DELETED => format!(
                "Deleted user ID {}",
                self.detail("target_user_id").unwrap_or_default()
            ),
            _ => String::new(),
        }
    }
}
