//! KPI 分组与指标项管理

pub mod list;
pub mod manage;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::kpis::{
    entities::{KpiGroup, KpiGroupWithItems, KpiItem},
    requests::{
        CreateKpiGroupRequest, CreateKpiItemRequest, KpiTargetQuery, UpdateKpiGroupRequest,
        UpdateKpiItemRequest,
    },
};
use crate::storage::Storage;

pub struct KpiService {
    storage: Arc<dyn Storage>,
    warn_on_unbalanced_weights: bool,
}

impl KpiService {
    pub fn new(storage: Arc<dyn Storage>, warn_on_unbalanced_weights: bool) -> Self {
        Self {
            storage,
            warn_on_unbalanced_weights,
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn list_for_target(&self, query: KpiTargetQuery) -> Result<Vec<KpiGroupWithItems>> {
        list::list_for_target(self, query).await
    }

    pub async fn create_group(&self, req: CreateKpiGroupRequest) -> Result<KpiGroup> {
        manage::create_group(self, req).await
    }

    pub async fn update_group(&self, group_id: i64, req: UpdateKpiGroupRequest) -> Result<KpiGroup> {
        manage::update_group(self, group_id, req).await
    }

    pub async fn create_item(&self, req: CreateKpiItemRequest) -> Result<KpiItem> {
        manage::create_item(self, req).await
    }

    pub async fn update_item(&self, item_id: i64, req: UpdateKpiItemRequest) -> Result<KpiItem> {
        manage::update_item(self, item_id, req).await
    }
}
