//! KPI 指标项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "kpi_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub kpi_group_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kpi_groups::Entity",
        from = "Column::KpiGroupId",
        to = "super::kpi_groups::Column::Id"
    )]
    KpiGroup,
    #[sea_orm(has_many = "super::evaluation_items::Entity")]
    EvaluationItems,
}

impl Related<super::kpi_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KpiGroup.def()
    }
}

impl Related<super::evaluation_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_kpi_item(self) -> crate::models::kpis::entities::KpiItem {
        crate::models::kpis::entities::KpiItem {
            id: self.id,
            name: self.name,
            weight: self.weight,
            kpi_group_id: self.kpi_group_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
