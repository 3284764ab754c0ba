//! 仪表盘统计查询

use super::SeaOrmStorage;
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::teams::Entity as Teams;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{KpiSystemError, Result};
use crate::models::evaluations::entities::Evaluation;
use crate::models::users::entities::{User, UserRole};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

impl SeaOrmStorage {
    /// 团队总数
    pub async fn count_teams_impl(&self) -> Result<i64> {
        let count = Teams::find()
            .count(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("统计团队失败: {e}")))?;

        Ok(count as i64)
    }

    /// 员工数（角色为 employee），可限定团队
    pub async fn count_employees_impl(&self, team_ids: Option<&[i64]>) -> Result<i64> {
        let mut select = Users::find().filter(UserColumn::Role.eq(UserRole::EMPLOYEE));

        if let Some(ids) = team_ids {
            select = select.filter(UserColumn::TeamId.is_in(ids.iter().copied()));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("统计员工失败: {e}")))?;

        Ok(count as i64)
    }

    /// 未提交的评估数，可限定为指定团队成员的评估
    pub async fn count_pending_evaluations_impl(&self, team_ids: Option<&[i64]>) -> Result<i64> {
        let mut select = Evaluations::find().filter(EvaluationColumn::IsSubmitted.eq(false));

        if let Some(ids) = team_ids {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::evaluations::Relation::Employee.def(),
                )
                .filter(UserColumn::TeamId.is_in(ids.iter().copied()));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("统计待提交评估失败: {e}")))?;

        Ok(count as i64)
    }

    /// 最近更新的已提交评估（限定团队）
    pub async fn list_recent_submitted_evaluations_impl(
        &self,
        team_ids: &[i64],
        limit: u64,
    ) -> Result<Vec<(Evaluation, User)>> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Evaluations::find()
            .find_also_related(Users)
            .filter(EvaluationColumn::IsSubmitted.eq(true))
            .filter(UserColumn::TeamId.is_in(team_ids.iter().copied()))
            .order_by_desc(EvaluationColumn::UpdatedAt)
            .order_by_desc(EvaluationColumn::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询最近评估失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(evaluation, user)| {
                user.map(|u| (evaluation.into_evaluation(), u.into_user()))
            })
            .collect())
    }

    /// 最新加入的员工（限定团队）
    pub async fn list_newest_employees_impl(
        &self,
        team_ids: &[i64],
        limit: u64,
    ) -> Result<Vec<User>> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(UserColumn::Role.eq(UserRole::EMPLOYEE))
            .filter(UserColumn::TeamId.is_in(team_ids.iter().copied()))
            .order_by_desc(UserColumn::CreatedAt)
            .order_by_desc(UserColumn::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询新成员失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }
}
