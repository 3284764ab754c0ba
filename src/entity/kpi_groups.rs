//! KPI 分组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "kpi_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub target_role: String,
    pub team_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id"
    )]
    Team,
    #[sea_orm(has_many = "super::kpi_items::Entity")]
    KpiItems,
    #[sea_orm(has_many = "super::evaluation_comments::Entity")]
    EvaluationComments,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::kpi_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KpiItems.def()
    }
}

impl Related<super::evaluation_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationComments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_kpi_group(self) -> crate::models::kpis::entities::KpiGroup {
        use crate::models::kpis::entities::{KpiGroup, TargetRole};

        KpiGroup {
            id: self.id,
            name: self.name,
            weight: self.weight,
            target_role: self
                .target_role
                .parse::<TargetRole>()
                .unwrap_or(TargetRole::Employee),
            team_id: self.team_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
