use tracing::debug;

use super::EvaluationService;
use crate::errors::Result;
use crate::models::evaluations::{entities::Period, responses::AggregateView};
use crate::scoring::{available_periods, merge_records};

/// 员工评估汇总视图
///
/// 指定周期时只合并这些周期的评估，否则合并全部历史。
/// 没有匹配的评估时返回 `None`，这是正常的“无数据”结果。
pub async fn get_subject_view(
    service: &EvaluationService,
    subject_id: i64,
    periods: Option<Vec<Period>>,
) -> Result<Option<AggregateView>> {
    let storage = service.storage();

    let records = storage
        .list_evaluation_records(subject_id, periods.as_deref())
        .await?;

    let Some(merged) = merge_records(&records) else {
        debug!(
            "No evaluations for subject {} (periods: {:?})",
            subject_id, periods
        );
        return Ok(None);
    };

    // 可选周期总是基于全部历史，与本次过滤条件无关
    let all_periods = if periods.is_some() {
        let history = storage
            .list_evaluations(Some(std::slice::from_ref(&subject_id)))
            .await?;
        available_periods(&history)
    } else {
        available_periods(records.iter().map(|r| &r.evaluation))
    };

    Ok(Some(AggregateView {
        evaluation: merged.latest,
        groups: merged.groups,
        final_score: merged.score.final_score,
        group_scores: merged.score.group_scores,
        available_periods: all_periods,
    }))
}
