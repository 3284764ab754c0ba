use super::EvaluationService;
use crate::errors::Result;
use crate::models::evaluations::responses::ScoreResult;
use crate::scoring::{ScoredItem, compute_score};

/// 计算单份评估的得分（不舍入）
pub async fn get_score(service: &EvaluationService, evaluation_id: i64) -> Result<ScoreResult> {
    service.require_evaluation(evaluation_id).await?;

    let items = service
        .storage()
        .list_evaluation_items(evaluation_id)
        .await?;
    let scored: Vec<ScoredItem> = items.iter().map(ScoredItem::from).collect();

    Ok(compute_score(&scored))
}
