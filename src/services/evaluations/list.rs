use std::collections::{BTreeSet, HashMap};

use super::EvaluationService;
use crate::errors::Result;
use crate::models::evaluations::responses::EvaluationListItem;
use crate::models::users::entities::{CallerContext, UserRole, UserSummary};

/// 按调用方角色列出评估
///
/// 管理员看到全部；经理看到其团队成员和自己的评估；其他角色为空列表。
pub async fn list_evaluations(
    service: &EvaluationService,
    caller: &CallerContext,
) -> Result<Vec<EvaluationListItem>> {
    let storage = service.storage();

    let evaluations = match caller.role {
        UserRole::Admin => storage.list_evaluations(None).await?,
        UserRole::Manager => {
            let mut subject_ids = BTreeSet::from([caller.user_id]);
            for team_id in storage.list_managed_team_ids(caller.user_id).await? {
                for member in storage.list_team_members(team_id).await? {
                    subject_ids.insert(member.id);
                }
            }
            let subject_ids: Vec<i64> = subject_ids.into_iter().collect();
            storage.list_evaluations(Some(subject_ids.as_slice())).await?
        }
        UserRole::Employee => return Ok(Vec::new()),
    };

    let employee_ids: Vec<i64> = evaluations
        .iter()
        .map(|e| e.employee_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let employees: HashMap<i64, UserSummary> = storage
        .list_users_by_ids(&employee_ids)
        .await?
        .iter()
        .map(|user| (user.id, UserSummary::from(user)))
        .collect();

    Ok(evaluations
        .into_iter()
        .filter_map(|evaluation| {
            let employee = employees.get(&evaluation.employee_id)?.clone();
            Some(EvaluationListItem {
                evaluation,
                employee,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_listing_is_scoped_by_role() {
        let storage = SeaOrmStorage::in_memory().await;
        let admin = storage.insert_user("Ada", UserRole::Admin, None).await;
        let manager = storage.insert_user("Mia", UserRole::Manager, None).await;
        let team = storage.insert_team("Platform", Some(manager)).await;
        let other_team = storage.insert_team("Growth", None).await;
        let member = storage.insert_user("Ann", UserRole::Employee, Some(team)).await;
        let outsider = storage
            .insert_user("Oz", UserRole::Employee, Some(other_team))
            .await;

        let member_eval = storage.insert_evaluation_at(member, "Q1", 2024, 100).await;
        let manager_eval = storage.insert_evaluation_at(manager, "Q1", 2024, 200).await;
        storage.insert_evaluation_at(outsider, "Q1", 2024, 300).await;
        let service = EvaluationService::new(Arc::new(storage));

        let all = service
            .list_evaluations(&CallerContext::new(admin, UserRole::Admin))
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].employee.name, "Oz");

        let scoped = service
            .list_evaluations(&CallerContext::new(manager, UserRole::Manager))
            .await
            .unwrap();
        let ids: Vec<i64> = scoped.iter().map(|item| item.evaluation.id).collect();
        assert_eq!(ids, vec![manager_eval, member_eval]);

        let none = service
            .list_evaluations(&CallerContext::new(member, UserRole::Employee))
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
