//! KPI 分组与指标项存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::kpi_groups::{
    ActiveModel as GroupActiveModel, Column as GroupColumn, Entity as KpiGroups,
};
use crate::entity::kpi_items::{
    ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as KpiItems,
};
use crate::errors::{KpiSystemError, Result};
use crate::models::kpis::{
    entities::{KpiGroup, KpiGroupWithItems, KpiItem, TargetRole},
    requests::{
        CreateKpiGroupRequest, CreateKpiItemRequest, UpdateKpiGroupRequest, UpdateKpiItemRequest,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建 KPI 分组
    pub async fn create_kpi_group_impl(&self, req: CreateKpiGroupRequest) -> Result<KpiGroup> {
        let now = chrono::Utc::now().timestamp();

        let model = GroupActiveModel {
            name: Set(req.name.trim().to_string()),
            weight: Set(req.weight),
            target_role: Set(req.target_role.to_string()),
            team_id: Set(req.team_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("创建 KPI 分组失败: {e}")))?;

        Ok(result.into_kpi_group())
    }

    /// 通过 ID 获取 KPI 分组
    pub async fn get_kpi_group_by_id_impl(&self, id: i64) -> Result<Option<KpiGroup>> {
        let result = KpiGroups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询 KPI 分组失败: {e}")))?;

        Ok(result.map(|m| m.into_kpi_group()))
    }

    /// 更新 KPI 分组
    pub async fn update_kpi_group_impl(
        &self,
        id: i64,
        update: UpdateKpiGroupRequest,
    ) -> Result<Option<KpiGroup>> {
        // 先检查分组是否存在
        if self.get_kpi_group_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = GroupActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("更新 KPI 分组失败: {e}")))?;

        Ok(Some(result.into_kpi_group()))
    }

    /// 创建 KPI 指标项
    pub async fn create_kpi_item_impl(&self, req: CreateKpiItemRequest) -> Result<KpiItem> {
        let now = chrono::Utc::now().timestamp();

        let model = ItemActiveModel {
            name: Set(req.name.trim().to_string()),
            weight: Set(req.weight),
            kpi_group_id: Set(req.kpi_group_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("创建 KPI 指标项失败: {e}")))?;

        Ok(result.into_kpi_item())
    }

    /// 更新 KPI 指标项
    pub async fn update_kpi_item_impl(
        &self,
        id: i64,
        update: UpdateKpiItemRequest,
    ) -> Result<Option<KpiItem>> {
        let existing = KpiItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询 KPI 指标项失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ItemActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("更新 KPI 指标项失败: {e}")))?;

        Ok(Some(result.into_kpi_item()))
    }

    /// 按目标角色列出分组及指标项
    pub async fn list_kpi_groups_impl(
        &self,
        team_id: Option<i64>,
        target_role: TargetRole,
    ) -> Result<Vec<KpiGroupWithItems>> {
        let mut select =
            KpiGroups::find().filter(GroupColumn::TargetRole.eq(target_role.to_string()));

        if let Some(team_id) = team_id {
            select = select.filter(GroupColumn::TeamId.eq(team_id));
        }

        let groups = select
            .order_by_asc(GroupColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询 KPI 分组失败: {e}")))?;

        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let items = KpiItems::find()
            .filter(ItemColumn::KpiGroupId.is_in(groups.iter().map(|g| g.id)))
            .order_by_asc(ItemColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询 KPI 指标项失败: {e}")))?;

        let mut items_by_group: HashMap<i64, Vec<KpiItem>> = HashMap::new();
        for item in items {
            items_by_group
                .entry(item.kpi_group_id)
                .or_default()
                .push(item.into_kpi_item());
        }

        Ok(groups
            .into_iter()
            .map(|group| {
                let items = items_by_group.remove(&group.id).unwrap_or_default();
                KpiGroupWithItems {
                    group: group.into_kpi_group(),
                    items,
                }
            })
            .collect())
    }

    /// 列出同一范围（目标角色 + 团队）内的分组
    pub async fn list_kpi_groups_in_scope_impl(
        &self,
        team_id: Option<i64>,
        target_role: TargetRole,
    ) -> Result<Vec<KpiGroup>> {
        let team_filter = match team_id {
            Some(team_id) => GroupColumn::TeamId.eq(team_id),
            None => GroupColumn::TeamId.is_null(),
        };

        let groups = KpiGroups::find()
            .filter(GroupColumn::TargetRole.eq(target_role.to_string()))
            .filter(team_filter)
            .order_by_asc(GroupColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询 KPI 分组失败: {e}")))?;

        Ok(groups.into_iter().map(|m| m.into_kpi_group()).collect())
    }
}
