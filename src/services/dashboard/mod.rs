//! 仪表盘服务

pub mod stats;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::dashboard::{entities::DashboardScope, responses::DashboardResponse};
use crate::storage::Storage;

pub struct DashboardService {
    storage: Arc<dyn Storage>,
    recent_activity_limit: u64,
}

impl DashboardService {
    pub fn new(storage: Arc<dyn Storage>, recent_activity_limit: u64) -> Self {
        Self {
            storage,
            recent_activity_limit,
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn get_stats(&self, scope: DashboardScope) -> Result<DashboardResponse> {
        stats::get_stats(self, scope).await
    }
}
