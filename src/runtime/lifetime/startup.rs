use actix_web::web;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{ActivityLogService, DashboardService, EvaluationService, KpiService};

/// 服务器启动所需的共享服务
#[derive(Clone)]
pub struct StartupContext {
    pub evaluations: web::Data<EvaluationService>,
    pub kpis: web::Data<KpiService>,
    pub dashboard: web::Data<DashboardService>,
    pub activity: web::Data<ActivityLogService>,
}

/// 准备服务器启动的上下文
/// 连接数据库、执行迁移，并把存储注入各个服务
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    Ok(StartupContext {
        evaluations: web::Data::new(EvaluationService::new(storage.clone())),
        kpis: web::Data::new(KpiService::new(
            storage.clone(),
            config.scoring.warn_on_unbalanced_weights,
        )),
        dashboard: web::Data::new(DashboardService::new(
            storage.clone(),
            config.scoring.recent_activity_limit,
        )),
        activity: web::Data::new(ActivityLogService::new(storage)),
    })
}
