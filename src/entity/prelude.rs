//! 预导入模块，方便使用

pub use super::activity_logs::{
    ActiveModel as ActivityLogActiveModel, Entity as ActivityLogs, Model as ActivityLogModel,
};
pub use super::evaluation_comments::{
    ActiveModel as EvaluationCommentActiveModel, Entity as EvaluationComments,
    Model as EvaluationCommentModel,
};
pub use super::evaluation_items::{
    ActiveModel as EvaluationItemActiveModel, Entity as EvaluationItems,
    Model as EvaluationItemModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::kpi_groups::{
    ActiveModel as KpiGroupActiveModel, Entity as KpiGroups, Model as KpiGroupModel,
};
pub use super::kpi_items::{
    ActiveModel as KpiItemActiveModel, Entity as KpiItems, Model as KpiItemModel,
};
pub use super::teams::{ActiveModel as TeamActiveModel, Entity as Teams, Model as TeamModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
