use super::KpiService;
use crate::errors::Result;
use crate::models::kpis::{
    entities::{KpiGroupWithItems, TargetRole},
    requests::KpiTargetQuery,
};

/// 列出某类考核对象适用的 KPI 分组
///
/// 经理的分组是全局的；员工的分组按团队划分，未指定团队时返回全部员工分组。
pub async fn list_for_target(
    service: &KpiService,
    query: KpiTargetQuery,
) -> Result<Vec<KpiGroupWithItems>> {
    match query.role {
        TargetRole::Manager => {
            service
                .storage()
                .list_kpi_groups(None, TargetRole::Manager)
                .await
        }
        TargetRole::Employee => {
            service
                .storage()
                .list_kpi_groups(query.team_id, TargetRole::Employee)
                .await
        }
    }
}
