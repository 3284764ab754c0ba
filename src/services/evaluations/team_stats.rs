use super::EvaluationService;
use crate::errors::Result;
use crate::models::evaluations::responses::TeamStatsResponse;

/// 团队统计
///
/// 每个成员取最近创建的一份评估（不论是否已提交）计算得分，
/// 没有评估的成员计入人数但不参与平均。
pub async fn get_team_stats(service: &EvaluationService, team_id: i64) -> Result<TeamStatsResponse> {
    let storage = service.storage();
    let members = storage.list_team_members(team_id).await?;

    let mut total = 0.0;
    let mut evaluated_count = 0;
    for member in &members {
        if let Some(evaluation) = storage.get_latest_evaluation(member.id).await? {
            total += service.get_score(evaluation.id).await?.final_score;
            evaluated_count += 1;
        }
    }

    Ok(TeamStatsResponse {
        overall_score: if evaluated_count > 0 {
            total / evaluated_count as f64
        } else {
            0.0
        },
        member_count: members.len() as i64,
        evaluated_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::requests::{ScoreItemInput, SubmitScoresRequest};
    use crate::models::kpis::entities::TargetRole;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::sync::Arc;

    fn scores(item_id: i64, score: f64) -> SubmitScoresRequest {
        SubmitScoresRequest {
            items: vec![ScoreItemInput {
                kpi_item_id: item_id,
                score,
            }],
            comments: vec![],
        }
    }

    #[tokio::test]
    async fn test_empty_team_is_zero() {
        let storage = SeaOrmStorage::in_memory().await;
        let team = storage.insert_team("Empty", None).await;
        let service = EvaluationService::new(Arc::new(storage));

        let stats = service.get_team_stats(team).await.unwrap();
        assert_eq!(stats, TeamStatsResponse::default());
    }

    #[tokio::test]
    async fn test_unevaluated_members_are_excluded_from_average() {
        let storage = SeaOrmStorage::in_memory().await;
        let team = storage.insert_team("Platform", None).await;
        let ann = storage.insert_user("Ann", UserRole::Employee, Some(team)).await;
        let bob = storage.insert_user("Bob", UserRole::Employee, Some(team)).await;
        storage.insert_user("Cid", UserRole::Employee, Some(team)).await;
        let group = storage
            .kpi_group("Delivery", 100.0, Some(team), TargetRole::Employee)
            .await;
        let item = storage.kpi_item("Velocity", 10.0, group.id).await;
        let ann_eval = storage.insert_evaluation_at(ann, "Q1", 2024, 100).await;
        let bob_eval = storage.insert_evaluation_at(bob, "Q1", 2024, 100).await;
        let service = EvaluationService::new(Arc::new(storage));

        service.submit_scores(ann_eval, scores(item.id, 90.0)).await.unwrap();
        service.submit_scores(bob_eval, scores(item.id, 70.0)).await.unwrap();

        let stats = service.get_team_stats(team).await.unwrap();
        assert_eq!(stats.member_count, 3);
        assert_eq!(stats.evaluated_count, 2);
        assert_eq!(stats.overall_score, 80.0);
    }

    #[tokio::test]
    async fn test_latest_draft_supersedes_older_submission() {
        let storage = SeaOrmStorage::in_memory().await;
        let team = storage.insert_team("Platform", None).await;
        let ann = storage.insert_user("Ann", UserRole::Employee, Some(team)).await;
        let group = storage
            .kpi_group("Delivery", 100.0, Some(team), TargetRole::Employee)
            .await;
        let item = storage.kpi_item("Velocity", 10.0, group.id).await;
        let submitted = storage.insert_evaluation_at(ann, "Q1", 2024, 100).await;
        storage.insert_evaluation_at(ann, "Q2", 2024, 200).await;
        let service = EvaluationService::new(Arc::new(storage));

        service
            .submit_scores(submitted, scores(item.id, 90.0))
            .await
            .unwrap();

        let stats = service.get_team_stats(team).await.unwrap();
        assert_eq!(stats.evaluated_count, 1);
        assert_eq!(stats.overall_score, 0.0);
    }
}
