use tracing::debug;

use super::EvaluationService;
use crate::errors::{KpiSystemError, Result};
use crate::models::evaluations::{entities::Evaluation, requests::CreateEvaluationRequest};

/// 按周期创建评估，已存在则直接返回
pub async fn create_or_get_evaluation(
    service: &EvaluationService,
    req: CreateEvaluationRequest,
) -> Result<Evaluation> {
    req.validate()?;
    let storage = service.storage();

    // 被评估人必须存在
    if storage.get_user_by_id(req.employee_id).await?.is_none() {
        return Err(KpiSystemError::not_found(format!(
            "User {} not found",
            req.employee_id
        )));
    }

    let (evaluation, created) = storage
        .create_or_get_evaluation(req.employee_id, &req.quarter, req.year)
        .await?;

    debug!(
        "Evaluation {} for employee {} {}-{} ({})",
        evaluation.id,
        req.employee_id,
        req.year,
        req.quarter,
        if created { "created" } else { "existing" }
    );

    Ok(evaluation)
}
