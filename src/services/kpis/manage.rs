use tracing::{info, warn};

use super::KpiService;
use crate::errors::{KpiSystemError, Result};
use crate::models::kpis::{
    entities::{KpiGroup, KpiItem},
    requests::{
        CreateKpiGroupRequest, CreateKpiItemRequest, UpdateKpiGroupRequest, UpdateKpiItemRequest,
    },
};

const WEIGHT_EPSILON: f64 = 1e-6;

pub(crate) fn is_balanced(total_weight: f64) -> bool {
    (total_weight - 100.0).abs() < WEIGHT_EPSILON
}

/// 权重合计不强制为 100，只在开启配置时输出警告
async fn check_weight_balance(service: &KpiService, group: &KpiGroup) -> Result<()> {
    if !service.warn_on_unbalanced_weights {
        return Ok(());
    }

    let siblings = service
        .storage()
        .list_kpi_groups_in_scope(group.team_id, group.target_role)
        .await?;
    let total: f64 = siblings.iter().map(|g| g.weight).sum();

    if !is_balanced(total) {
        warn!(
            "KPI group weights for {} groups (team {:?}) total {} instead of 100",
            group.target_role, group.team_id, total
        );
    }

    Ok(())
}

pub async fn create_group(service: &KpiService, req: CreateKpiGroupRequest) -> Result<KpiGroup> {
    req.validate()?;

    let group = service.storage().create_kpi_group(req).await?;
    info!("KPI group {} created: {}", group.id, group.name);

    check_weight_balance(service, &group).await?;
    Ok(group)
}

pub async fn update_group(
    service: &KpiService,
    group_id: i64,
    req: UpdateKpiGroupRequest,
) -> Result<KpiGroup> {
    req.validate()?;

    let group = service
        .storage()
        .update_kpi_group(group_id, req)
        .await?
        .ok_or_else(|| KpiSystemError::not_found(format!("KPI group {group_id} not found")))?;

    check_weight_balance(service, &group).await?;
    Ok(group)
}

pub async fn create_item(service: &KpiService, req: CreateKpiItemRequest) -> Result<KpiItem> {
    req.validate()?;

    if service
        .storage()
        .get_kpi_group_by_id(req.kpi_group_id)
        .await?
        .is_none()
    {
        return Err(KpiSystemError::not_found(format!(
            "KPI group {} not found",
            req.kpi_group_id
        )));
    }

    let item = service.storage().create_kpi_item(req).await?;
    info!("KPI item {} created in group {}", item.id, item.kpi_group_id);
    Ok(item)
}

pub async fn update_item(
    service: &KpiService,
    item_id: i64,
    req: UpdateKpiItemRequest,
) -> Result<KpiItem> {
    req.validate()?;

    service
        .storage()
        .update_kpi_item(item_id, req)
        .await?
        .ok_or_else(|| KpiSystemError::not_found(format!("KPI item {item_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::kpis::entities::TargetRole;
    use crate::models::kpis::requests::KpiTargetQuery;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::sync::Arc;

    fn group_request(name: &str, weight: f64, team_id: Option<i64>, role: TargetRole) -> CreateKpiGroupRequest {
        CreateKpiGroupRequest {
            name: name.to_string(),
            weight,
            team_id,
            target_role: role,
        }
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced(100.0));
        assert!(is_balanced(40.0 + 30.0 + 30.0));
        assert!(!is_balanced(90.0));
        assert!(!is_balanced(110.0));
    }

    #[tokio::test]
    async fn test_unbalanced_weights_are_accepted() {
        let storage = SeaOrmStorage::in_memory().await;
        let team = storage.insert_team("Platform", None).await;
        let service = KpiService::new(Arc::new(storage), true);

        service
            .create_group(group_request("Delivery", 70.0, Some(team), TargetRole::Employee))
            .await
            .unwrap();
        service
            .create_group(group_request("Quality", 70.0, Some(team), TargetRole::Employee))
            .await
            .unwrap();

        let groups = service
            .list_for_target(KpiTargetQuery {
                team_id: Some(team),
                role: TargetRole::Employee,
            })
            .await
            .unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[tokio::test]
    async fn test_list_for_target_by_role() {
        let storage = SeaOrmStorage::in_memory().await;
        let team_a = storage.insert_team("A", None).await;
        let team_b = storage.insert_team("B", None).await;
        let service = KpiService::new(Arc::new(storage), false);

        let a = service
            .create_group(group_request("Delivery", 100.0, Some(team_a), TargetRole::Employee))
            .await
            .unwrap();
        service
            .create_group(group_request("Delivery", 100.0, Some(team_b), TargetRole::Employee))
            .await
            .unwrap();
        let leadership = service
            .create_group(group_request("Leadership", 100.0, None, TargetRole::Manager))
            .await
            .unwrap();
        service
            .create_item(CreateKpiItemRequest {
                name: "Hiring".to_string(),
                weight: 50.0,
                kpi_group_id: leadership.id,
            })
            .await
            .unwrap();

        let employee_groups = service
            .list_for_target(KpiTargetQuery {
                team_id: Some(team_a),
                role: TargetRole::Employee,
            })
            .await
            .unwrap();
        assert_eq!(employee_groups.len(), 1);
        assert_eq!(employee_groups[0].group.id, a.id);

        // 经理分组忽略团队
        let manager_groups = service
            .list_for_target(KpiTargetQuery {
                team_id: Some(team_b),
                role: TargetRole::Manager,
            })
            .await
            .unwrap();
        assert_eq!(manager_groups.len(), 1);
        assert_eq!(manager_groups[0].items.len(), 1);
        assert_eq!(manager_groups[0].items[0].name, "Hiring");
    }

    #[tokio::test]
    async fn test_update_and_not_found() {
        let storage = SeaOrmStorage::in_memory().await;
        let service = KpiService::new(Arc::new(storage), true);
        let group = service
            .create_group(group_request("Delivery", 40.0, None, TargetRole::Employee))
            .await
            .unwrap();

        let updated = service
            .update_group(
                group.id,
                UpdateKpiGroupRequest {
                    name: None,
                    weight: Some(60.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.weight, 60.0);
        assert_eq!(updated.name, "Delivery");

        let missing = service
            .update_group(
                999,
                UpdateKpiGroupRequest {
                    name: Some("x".to_string()),
                    weight: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(missing, KpiSystemError::NotFound(_)));

        let orphan = service
            .create_item(CreateKpiItemRequest {
                name: "Velocity".to_string(),
                weight: 10.0,
                kpi_group_id: 999,
            })
            .await
            .unwrap_err();
        assert!(matches!(orphan, KpiSystemError::NotFound(_)));

        let missing_item = service
            .update_item(
                999,
                UpdateKpiItemRequest {
                    name: None,
                    weight: Some(5.0),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(missing_item, KpiSystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_weight_is_rejected() {
        let storage = SeaOrmStorage::in_memory().await;
        let service = KpiService::new(Arc::new(storage), false);

        let err = service
            .create_group(group_request("Delivery", 140.0, None, TargetRole::Employee))
            .await
            .unwrap_err();
        assert!(matches!(err, KpiSystemError::Validation(_)));
    }
}
