use tracing::debug;

use super::DashboardService;
use crate::errors::Result;
use crate::models::dashboard::{
    entities::DashboardScope,
    responses::{ActivityItem, DashboardResponse, DashboardStats},
};

const MANAGER_FEED_PER_SOURCE: u64 = 5;
const MANAGER_FEED_LIMIT: usize = 10;

pub async fn get_stats(service: &DashboardService, scope: DashboardScope) -> Result<DashboardResponse> {
    match scope {
        DashboardScope::Global => global_stats(service).await,
        DashboardScope::Manager(manager_id) => manager_stats(service, manager_id).await,
    }
}

async fn global_stats(service: &DashboardService) -> Result<DashboardResponse> {
    let storage = service.storage();

    let stats = DashboardStats {
        total_teams: storage.count_teams().await?,
        total_employees: storage.count_employees(None).await?,
        pending_evaluations: storage.count_pending_evaluations(None).await?,
    };

    let recent_activity = storage
        .list_recent_activity_logs(service.recent_activity_limit)
        .await?
        .into_iter()
        .map(|log| ActivityItem {
            title: log.title(),
            description: log.description(),
            activity_type: log.action,
            date: log.created_at,
            user: log.user_name,
        })
        .collect();

    Ok(DashboardResponse {
        stats,
        recent_activity,
    })
}

/// 经理只看到自己管理的团队；没有团队时返回全零结果
async fn manager_stats(service: &DashboardService, manager_id: i64) -> Result<DashboardResponse> {
    let storage = service.storage();
    let team_ids = storage.list_managed_team_ids(manager_id).await?;

    if team_ids.is_empty() {
        debug!("Manager {} has no managed teams", manager_id);
        return Ok(DashboardResponse::default());
    }

    let stats = DashboardStats {
        total_teams: team_ids.len() as i64,
        total_employees: storage.count_employees(Some(team_ids.as_slice())).await?,
        pending_evaluations: storage.count_pending_evaluations(Some(team_ids.as_slice())).await?,
    };

    let submitted = storage
        .list_recent_submitted_evaluations(&team_ids, MANAGER_FEED_PER_SOURCE)
        .await?
        .into_iter()
        .map(|(evaluation, employee)| ActivityItem {
            activity_type: "EVALUATION_SUBMITTED".to_string(),
            date: evaluation.updated_at,
            title: "Evaluation Submitted".to_string(),
            description: format!("Evaluation for {} was submitted", employee.name),
            user: employee.name,
        });

    let joined = storage
        .list_newest_employees(&team_ids, MANAGER_FEED_PER_SOURCE)
        .await?
        .into_iter()
        .map(|user| ActivityItem {
            activity_type: "USER_JOINED".to_string(),
            date: user.created_at,
            title: "New Team Member".to_string(),
            description: format!("{} joined as employee", user.name),
            user: user.name,
        });

    let mut recent_activity: Vec<ActivityItem> = submitted.chain(joined).collect();
    recent_activity.sort_by(|a, b| b.date.cmp(&a.date));
    recent_activity.truncate(MANAGER_FEED_LIMIT);

    Ok(DashboardResponse {
        stats,
        recent_activity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity_logs::entities::ActivityAction;
    use crate::models::evaluations::requests::{ScoreItemInput, SubmitScoresRequest};
    use crate::models::kpis::entities::TargetRole;
    use crate::models::users::entities::UserRole;
    use crate::services::EvaluationService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_manager_without_team_gets_zeroes() {
        let storage = SeaOrmStorage::in_memory().await;
        let manager = storage.insert_user("Mia", UserRole::Manager, None).await;
        let other = storage.insert_team("Platform", None).await;
        let ann = storage.insert_user("Ann", UserRole::Employee, Some(other)).await;
        storage.insert_evaluation_at(ann, "Q1", 2024, 100).await;
        let service = DashboardService::new(Arc::new(storage), 20);

        let response = service
            .get_stats(DashboardScope::Manager(manager))
            .await
            .unwrap();
        assert_eq!(response.stats, DashboardStats::default());
        assert!(response.recent_activity.is_empty());
    }

    #[tokio::test]
    async fn test_manager_counts_only_managed_teams() {
        let storage = SeaOrmStorage::in_memory().await;
        let manager = storage.insert_user("Mia", UserRole::Manager, None).await;
        let mine = storage.insert_team("Platform", Some(manager)).await;
        let theirs = storage.insert_team("Growth", None).await;
        let ann = storage
            .insert_user_at("Ann", UserRole::Employee, Some(mine), 1_000)
            .await;
        let bob = storage
            .insert_user_at("Bob", UserRole::Employee, Some(mine), 2_000)
            .await;
        let oz = storage
            .insert_user_at("Oz", UserRole::Employee, Some(theirs), 3_000)
            .await;
        let group = storage
            .kpi_group("Delivery", 100.0, Some(mine), TargetRole::Employee)
            .await;
        let item = storage.kpi_item("Velocity", 10.0, group.id).await;
        let ann_eval = storage.insert_evaluation_at(ann, "Q1", 2024, 100).await;
        storage.insert_evaluation_at(bob, "Q1", 2024, 100).await;
        storage.insert_evaluation_at(oz, "Q1", 2024, 100).await;

        let storage: Arc<dyn Storage> = Arc::new(storage);
        EvaluationService::new(storage.clone())
            .submit_scores(
                ann_eval,
                SubmitScoresRequest {
                    items: vec![ScoreItemInput {
                        kpi_item_id: item.id,
                        score: 75.0,
                    }],
                    comments: vec![],
                },
            )
            .await
            .unwrap();

        let service = DashboardService::new(storage, 20);
        let response = service
            .get_stats(DashboardScope::Manager(manager))
            .await
            .unwrap();

        assert_eq!(
            response.stats,
            DashboardStats {
                total_teams: 1,
                total_employees: 2,
                pending_evaluations: 1,
            }
        );
        assert_eq!(response.recent_activity.len(), 3);
        assert_eq!(response.recent_activity[0].activity_type, "EVALUATION_SUBMITTED");
        assert_eq!(response.recent_activity[0].user, "Ann");
        assert!(
            response
                .recent_activity
                .iter()
                .all(|item| item.user != "Oz")
        );
    }

    #[tokio::test]
    async fn test_global_scope_uses_activity_log() {
        let storage = SeaOrmStorage::in_memory().await;
        let admin = storage.insert_user("Ada", UserRole::Admin, None).await;
        let team = storage.insert_team("Platform", None).await;
        let ann = storage.insert_user("Ann", UserRole::Employee, Some(team)).await;
        storage.insert_user("Mia", UserRole::Manager, None).await;
        storage.insert_evaluation_at(ann, "Q1", 2024, 100).await;
        for _ in 0..3 {
            storage
                .create_activity_log(admin, ActivityAction::LOGIN, None)
                .await
                .unwrap();
        }
        let service = DashboardService::new(Arc::new(storage), 2);

        let response = service.get_stats(DashboardScope::Global).await.unwrap();
        assert_eq!(
            response.stats,
            DashboardStats {
                total_teams: 1,
                total_employees: 1,
                pending_evaluations: 1,
            }
        );
        assert_eq!(response.recent_activity.len(), 2);
        assert_eq!(response.recent_activity[0].title, "Ada Logged In");
        assert_eq!(response.recent_activity[0].activity_type, ActivityAction::LOGIN);
    }
}
