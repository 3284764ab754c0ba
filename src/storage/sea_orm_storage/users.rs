//! 用户与团队查询（只读，数据由外部目录服务维护）

use super::SeaOrmStorage;
use crate::entity::teams::{Column as TeamColumn, Entity as Teams};
use crate::entity::users::{Column, Entity as Users};
use crate::errors::{KpiSystemError, Result};
use crate::models::users::entities::User;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量获取用户
    pub async fn list_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 列出团队成员
    pub async fn list_team_members_impl(&self, team_id: i64) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::TeamId.eq(team_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询团队成员失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 列出经理管理的团队 ID
    pub async fn list_managed_team_ids_impl(&self, manager_id: i64) -> Result<Vec<i64>> {
        Teams::find()
            .select_only()
            .column(TeamColumn::Id)
            .filter(TeamColumn::ManagerId.eq(manager_id))
            .order_by_asc(TeamColumn::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("查询管理团队失败: {e}")))
    }
}
