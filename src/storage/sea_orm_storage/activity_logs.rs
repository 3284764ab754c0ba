//! 操作日志存储操作

use super::SeaOrmStorage;
use crate::entity::activity_logs::{ActiveModel, Column, Entity as ActivityLogs};
use crate::entity::users::Entity as Users;
use crate::errors::{KpiSystemError, Result};
use crate::models::activity_logs::entities::ActivityLog;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 写入操作日志
    pub async fn create_activity_log_impl(
        &self,
        user_id: i64,
        action: &str,
        details: Option<serde_json::Value>,
    ) -> Result<()> {
        let details = details.map(|v| serde_json::to_string(&v)).transpose()?;

        let model = ActiveModel {
            user_id: Set(user_id),
            action: Set(action.to_string()),
            details: Set(details),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("写入操作日志失败: {e}")))?;

        Ok(())
    }

    /// 最近的操作日志（附带操作人姓名）
    pub async fn list_recent_activity_logs_impl(&self, limit: u64) -> Result<Vec<ActivityLog>> {
        let rows = ActivityLogs::find()
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询操作日志失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(log, user)| ActivityLog {
                id: log.id,
                user_id: log.user_id,
                user_name: user.map(|u| u.name).unwrap_or_else(|| "Unknown".to_string()),
                action: log.action,
                details: log
                    .details
                    .as_deref()
                    .and_then(|raw| serde_json::from_str(raw).ok()),
                created_at: crate::entity::to_datetime(log.created_at),
            })
            .collect())
    }
}
