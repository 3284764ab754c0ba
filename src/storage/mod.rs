use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    activity_logs::entities::ActivityLog,
    evaluations::{
        entities::{Evaluation, EvaluationRecord, Period, RecordedItem},
        requests::{GroupCommentInput, ScoreItemInput},
    },
    kpis::{
        entities::{KpiGroup, KpiGroupWithItems, KpiItem, TargetRole},
        requests::{
            CreateKpiGroupRequest, CreateKpiItemRequest, UpdateKpiGroupRequest,
            UpdateKpiItemRequest,
        },
    },
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户与团队（只读）
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 批量获取用户信息
    async fn list_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 列出团队成员
    async fn list_team_members(&self, team_id: i64) -> Result<Vec<User>>;
    // 列出经理管理的团队ID
    async fn list_managed_team_ids(&self, manager_id: i64) -> Result<Vec<i64>>;

    /// KPI 管理方法
    // 创建 KPI 分组
    async fn create_kpi_group(&self, req: CreateKpiGroupRequest) -> Result<KpiGroup>;
    // 通过ID获取 KPI 分组
    async fn get_kpi_group_by_id(&self, id: i64) -> Result<Option<KpiGroup>>;
    // 更新 KPI 分组
    async fn update_kpi_group(
        &self,
        id: i64,
        update: UpdateKpiGroupRequest,
    ) -> Result<Option<KpiGroup>>;
    // 创建 KPI 指标项
    async fn create_kpi_item(&self, req: CreateKpiItemRequest) -> Result<KpiItem>;
    // 更新 KPI 指标项
    async fn update_kpi_item(&self, id: i64, update: UpdateKpiItemRequest)
    -> Result<Option<KpiItem>>;
    // 按目标角色列出分组及其指标项，team_id 为空时不按团队过滤
    async fn list_kpi_groups(
        &self,
        team_id: Option<i64>,
        target_role: TargetRole,
    ) -> Result<Vec<KpiGroupWithItems>>;
    // 列出同一范围内的分组，team_id 为空时只匹配全局分组
    async fn list_kpi_groups_in_scope(
        &self,
        team_id: Option<i64>,
        target_role: TargetRole,
    ) -> Result<Vec<KpiGroup>>;

    /// 评估方法
    // 按 (员工, 季度, 年份) 创建或获取评估，返回值的第二项表示是否新建
    async fn create_or_get_evaluation(
        &self,
        employee_id: i64,
        quarter: &str,
        year: i32,
    ) -> Result<(Evaluation, bool)>;
    // 通过ID获取评估
    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>>;
    // 在一个事务内写入得分、评语并标记为已提交
    async fn submit_evaluation(
        &self,
        evaluation_id: i64,
        items: &[ScoreItemInput],
        comments: &[GroupCommentInput],
    ) -> Result<()>;
    // 获取评估的全部得分（附带指标项与分组信息）
    async fn list_evaluation_items(&self, evaluation_id: i64) -> Result<Vec<RecordedItem>>;
    // 列出评估，employee_ids 为空时不过滤；按创建时间倒序
    async fn list_evaluations(&self, employee_ids: Option<&[i64]>) -> Result<Vec<Evaluation>>;
    // 获取员工的全部评估记录，可按周期过滤；按创建时间正序
    async fn list_evaluation_records(
        &self,
        employee_id: i64,
        periods: Option<&[Period]>,
    ) -> Result<Vec<EvaluationRecord>>;
    // 获取员工最近创建的评估
    async fn get_latest_evaluation(&self, employee_id: i64) -> Result<Option<Evaluation>>;

    /// 仪表盘统计，team_ids 为空时统计全局
    async fn count_teams(&self) -> Result<i64>;
    async fn count_employees(&self, team_ids: Option<&[i64]>) -> Result<i64>;
    async fn count_pending_evaluations(&self, team_ids: Option<&[i64]>) -> Result<i64>;
    // 最近更新的已提交评估及其员工
    async fn list_recent_submitted_evaluations(
        &self,
        team_ids: &[i64],
        limit: u64,
    ) -> Result<Vec<(Evaluation, User)>>;
    // 最新加入的员工
    async fn list_newest_employees(&self, team_ids: &[i64], limit: u64) -> Result<Vec<User>>;

    /// 操作日志
    async fn create_activity_log(
        &self,
        user_id: i64,
        action: &str,
        details: Option<serde_json::Value>,
    ) -> Result<()>;
    async fn list_recent_activity_logs(&self, limit: u64) -> Result<Vec<ActivityLog>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
