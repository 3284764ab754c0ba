//! 操作日志服务
//!
//! 写日志是尽力而为的：失败只记录警告，不影响主流程。

use std::sync::Arc;

use tracing::warn;

use crate::errors::Result;
use crate::models::activity_logs::entities::ActivityLog;
use crate::storage::Storage;

pub struct ActivityLogService {
    storage: Arc<dyn Storage>,
}

impl ActivityLogService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn log_activity(&self, user_id: i64, action: &str, details: Option<serde_json::Value>) {
        if let Err(e) = self
            .storage
            .create_activity_log(user_id, action, details)
            .await
        {
            warn!(
                "Failed to record activity {} for user {}: {}",
                action, user_id, e
            );
        }
    }

    pub async fn recent_activity(&self, limit: u64) -> Result<Vec<ActivityLog>> {
        self.storage.list_recent_activity_logs(limit).await
    }
}
