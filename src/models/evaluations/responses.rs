use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use super::entities::Evaluation;
use crate::models::users::entities::UserSummary;

// 单个分组的得分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct GroupScore {
    pub score: f64,
    pub weight: f64,
}

// 评分结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct ScoreResult {
    pub final_score: f64,
    pub group_scores: BTreeMap<i64, GroupScore>,
}

// 汇总视图中的指标项（得分为多份评估的平均值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct AggregatedItem {
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

// 汇总视图中的分组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct AggregatedGroup {
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub items: Vec<AggregatedItem>,
    pub comment: String,
}

// 员工评估汇总视图
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct AggregateView {
    /// 最近创建的评估（仅用于展示上下文，不含得分）
    pub evaluation: Evaluation,
    pub groups: Vec<AggregatedGroup>,
    pub final_score: f64,
    pub group_scores: BTreeMap<i64, GroupScore>,
    pub available_periods: Vec<String>,
}

// 评估列表项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct EvaluationListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub evaluation: Evaluation,
    pub employee: UserSummary,
}

// 团队统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct TeamStatsResponse {
    pub overall_score: f64,
    pub member_count: i64,
    pub evaluated_count: i64,
}
