use tracing::info;

use super::EvaluationService;
use crate::errors::Result;
use crate::models::evaluations::{requests::SubmitScoresRequest, responses::ScoreResult};

/// 提交评分
///
/// 得分与评语在一个事务内写入，随后基于已提交的数据重新计算得分。
/// 同一份数据重复提交结果不变。
pub async fn submit_scores(
    service: &EvaluationService,
    evaluation_id: i64,
    req: SubmitScoresRequest,
) -> Result<ScoreResult> {
    req.validate()?;

    service
        .storage()
        .submit_evaluation(evaluation_id, &req.items, &req.comments)
        .await?;

    info!(
        "Evaluation {} submitted with {} item(s) and {} comment(s)",
        evaluation_id,
        req.items.len(),
        req.comments.iter().filter(|c| c.has_text()).count()
    );

    service.get_score(evaluation_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KpiSystemError;
    use crate::models::evaluations::requests::{GroupCommentInput, ScoreItemInput};
    use crate::models::kpis::entities::TargetRole;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::sync::Arc;

    struct Setup {
        service: EvaluationService,
        evaluation_id: i64,
        employee_id: i64,
        group_id: i64,
        item_ids: Vec<i64>,
    }

    async fn setup() -> Setup {
        let storage = SeaOrmStorage::in_memory().await;
        let employee_id = storage.insert_user("Ann", UserRole::Employee, None).await;
        let group = storage
            .kpi_group("Delivery", 40.0, None, TargetRole::Employee)
            .await;
        let mut item_ids = Vec::new();
        for name in ["Velocity", "Quality", "Ownership", "Focus"] {
            item_ids.push(storage.kpi_item(name, 10.0, group.id).await.id);
        }
        let evaluation_id = storage
            .insert_evaluation_at(employee_id, "Q1", 2024, 100)
            .await;

        Setup {
            service: EvaluationService::new(Arc::new(storage)),
            evaluation_id,
            employee_id,
            group_id: group.id,
            item_ids,
        }
    }

    fn payload(item_ids: &[i64], scores: &[f64], comments: Vec<GroupCommentInput>) -> SubmitScoresRequest {
        SubmitScoresRequest {
            items: item_ids
                .iter()
                .zip(scores)
                .map(|(id, score)| ScoreItemInput {
                    kpi_item_id: *id,
                    score: *score,
                })
                .collect(),
            comments,
        }
    }

    fn comment(group_id: i64, text: &str) -> GroupCommentInput {
        GroupCommentInput {
            kpi_group_id: group_id,
            comment: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_returns_weighted_score() {
        let s = setup().await;

        let result = s
            .service
            .submit_scores(
                s.evaluation_id,
                payload(&s.item_ids, &[70.0, 80.0, 90.0, 80.0], vec![]),
            )
            .await
            .unwrap();

        assert_eq!(result.group_scores[&s.group_id].score, 80.0);
        assert_eq!(result.final_score, 32.0);
    }

    #[tokio::test]
    async fn test_resubmission_is_idempotent() {
        let s = setup().await;
        let req = payload(
            &s.item_ids,
            &[70.0, 80.0, 90.0, 80.0],
            vec![comment(s.group_id, "steady")],
        );

        let first = s
            .service
            .submit_scores(s.evaluation_id, req.clone())
            .await
            .unwrap();
        let second = s.service.submit_scores(s.evaluation_id, req).await.unwrap();
        assert_eq!(first, second);

        let storage = s.service.storage();
        let items = storage.list_evaluation_items(s.evaluation_id).await.unwrap();
        assert_eq!(items.len(), 4);

        let evaluation = storage
            .get_evaluation_by_id(s.evaluation_id)
            .await
            .unwrap()
            .unwrap();
        assert!(evaluation.is_submitted);

        let records = storage
            .list_evaluation_records(s.employee_id, None)
            .await
            .unwrap();
        assert_eq!(records[0].comments.len(), 1);
        assert_eq!(records[0].comments[0].comment, "steady");
    }

    #[tokio::test]
    async fn test_resubmission_overwrites_scores() {
        let s = setup().await;

        s.service
            .submit_scores(s.evaluation_id, payload(&s.item_ids, &[0.0; 4], vec![]))
            .await
            .unwrap();
        let result = s
            .service
            .submit_scores(s.evaluation_id, payload(&s.item_ids, &[100.0; 4], vec![]))
            .await
            .unwrap();

        assert_eq!(result.final_score, 40.0);
        let items = s
            .service
            .storage()
            .list_evaluation_items(s.evaluation_id)
            .await
            .unwrap();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.score == 100.0));
    }

    #[tokio::test]
    async fn test_blank_comment_never_clears_existing_comment() {
        let s = setup().await;

        s.service
            .submit_scores(
                s.evaluation_id,
                payload(&s.item_ids, &[80.0; 4], vec![comment(s.group_id, "keep me")]),
            )
            .await
            .unwrap();
        s.service
            .submit_scores(
                s.evaluation_id,
                payload(&s.item_ids, &[80.0; 4], vec![comment(s.group_id, "   ")]),
            )
            .await
            .unwrap();
        s.service
            .submit_scores(
                s.evaluation_id,
                payload(&s.item_ids, &[80.0; 4], vec![comment(s.group_id, "")]),
            )
            .await
            .unwrap();

        let view = s
            .service
            .get_subject_view(s.employee_id, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.groups[0].comment, "keep me");
    }

    #[tokio::test]
    async fn test_blank_comment_is_not_stored() {
        let s = setup().await;

        s.service
            .submit_scores(
                s.evaluation_id,
                payload(&s.item_ids, &[80.0; 4], vec![comment(s.group_id, " \t ")]),
            )
            .await
            .unwrap();

        let records = s
            .service
            .storage()
            .list_evaluation_records(s.employee_id, None)
            .await
            .unwrap();
        assert!(records[0].comments.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_rejected_before_writing() {
        let s = setup().await;

        let err = s
            .service
            .submit_scores(
                s.evaluation_id,
                payload(&s.item_ids, &[80.0, 101.0, 80.0, 80.0], vec![]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, KpiSystemError::Validation(_)));

        let evaluation = s
            .service
            .storage()
            .get_evaluation_by_id(s.evaluation_id)
            .await
            .unwrap()
            .unwrap();
        assert!(!evaluation.is_submitted);
    }

    #[tokio::test]
    async fn test_submit_unknown_evaluation_is_not_found() {
        let s = setup().await;

        let err = s
            .service
            .submit_scores(9999, payload(&s.item_ids, &[80.0; 4], vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, KpiSystemError::NotFound(_)));
    }
}
