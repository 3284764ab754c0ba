//! 测试数据构造
//!
//! 用户与团队由外部目录服务维护，Storage 不提供写接口，测试里直接写实体。

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::models::kpis::entities::{KpiGroup, KpiItem, TargetRole};
use crate::models::kpis::requests::{CreateKpiGroupRequest, CreateKpiItemRequest};
use crate::models::users::entities::UserRole;
use crate::storage::Storage;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    pub(crate) async fn insert_user(
        &self,
        name: &str,
        role: UserRole,
        team_id: Option<i64>,
    ) -> i64 {
        self.insert_user_at(name, role, team_id, chrono::Utc::now().timestamp())
            .await
    }

    pub(crate) async fn insert_user_at(
        &self,
        name: &str,
        role: UserRole,
        team_id: Option<i64>,
        created_at: i64,
    ) -> i64 {
        let role = match role {
            UserRole::Admin => UserRole::ADMIN,
            UserRole::Manager => UserRole::MANAGER,
            UserRole::Employee => UserRole::EMPLOYEE,
        };
        UserActiveModel {
            name: Set(name.to_string()),
            email: Set(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
            role: Set(role.to_string()),
            team_id: Set(team_id),
            created_at: Set(created_at),
            updated_at: Set(created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert user")
        .id
    }

    pub(crate) async fn insert_team(&self, name: &str, manager_id: Option<i64>) -> i64 {
        let now = chrono::Utc::now().timestamp();
        TeamActiveModel {
            name: Set(name.to_string()),
            manager_id: Set(manager_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert team")
        .id
    }

    pub(crate) async fn assign_team(&self, user_id: i64, team_id: i64) {
        let user = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .expect("query user")
            .expect("user exists");
        let mut active: UserActiveModel = user.into();
        active.team_id = Set(Some(team_id));
        active.update(&self.db).await.expect("assign team");
    }

    /// 直接写入指定创建时间的评估
    pub(crate) async fn insert_evaluation_at(
        &self,
        employee_id: i64,
        quarter: &str,
        year: i32,
        created_at: i64,
    ) -> i64 {
        EvaluationActiveModel {
            employee_id: Set(employee_id),
            quarter: Set(quarter.to_string()),
            year: Set(year),
            is_submitted: Set(false),
            created_at: Set(created_at),
            updated_at: Set(created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert evaluation")
        .id
    }

    pub(crate) async fn kpi_group(
        &self,
        name: &str,
        weight: f64,
        team_id: Option<i64>,
        target_role: TargetRole,
    ) -> KpiGroup {
        self.create_kpi_group(CreateKpiGroupRequest {
            name: name.to_string(),
            weight,
            team_id,
            target_role,
        })
        .await
        .expect("create kpi group")
    }

    pub(crate) async fn kpi_item(&self, name: &str, weight: f64, group_id: i64) -> KpiItem {
        self.create_kpi_item(CreateKpiItemRequest {
            name: name.to_string(),
            weight,
            kpi_group_id: group_id,
        })
        .await
        .expect("create kpi item")
    }
}
