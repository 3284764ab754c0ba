//! 评估评语实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_id: i64,
    pub kpi_group_id: i64,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id"
    )]
    Evaluation,
    #[sea_orm(
        belongs_to = "super::kpi_groups::Entity",
        from = "Column::KpiGroupId",
        to = "super::kpi_groups::Column::Id"
    )]
    KpiGroup,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::kpi_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KpiGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
