pub mod dashboard;

pub mod evaluations;

pub mod kpis;

pub use dashboard::configure_dashboard_routes;
pub use evaluations::configure_evaluation_routes;
pub use kpis::configure_kpi_routes;

use actix_web::{HttpRequest, HttpResponse};
use tracing::{debug, error};

use crate::errors::KpiSystemError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::CallerContext;
use crate::models::{ApiResponse, ErrorCode};

// 业务错误映射为 HTTP 响应
pub(crate) fn error_response(err: KpiSystemError) -> HttpResponse {
    if err.is_client_error() {
        debug!("Request rejected: {}", err);
    }
    match err {
        KpiSystemError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
        KpiSystemError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg)),
        KpiSystemError::Forbidden(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        KpiSystemError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        other => {
            error!("{}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ))
        }
    }
}

// 从请求扩展中取出调用方，RequireJWT 之后一般不会缺失
pub(crate) fn require_caller(req: &HttpRequest) -> Result<CallerContext, HttpResponse> {
    RequireJWT::extract_caller(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::web;
    use chrono::Duration;

    use crate::models::users::entities::UserRole;
    use crate::services::{ActivityLogService, DashboardService, EvaluationService, KpiService};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::jwt::JwtUtils;

    pub(crate) struct TestServices {
        pub store: Arc<SeaOrmStorage>,
        pub evaluations: web::Data<EvaluationService>,
        pub kpis: web::Data<KpiService>,
        pub dashboard: web::Data<DashboardService>,
        pub activity: web::Data<ActivityLogService>,
    }

    impl TestServices {
        pub(crate) async fn new() -> Self {
            let store = Arc::new(SeaOrmStorage::in_memory().await);
            let storage: Arc<dyn Storage> = store.clone();
            Self {
                store,
                evaluations: web::Data::new(EvaluationService::new(storage.clone())),
                kpis: web::Data::new(KpiService::new(storage.clone(), false)),
                dashboard: web::Data::new(DashboardService::new(storage.clone(), 20)),
                activity: web::Data::new(ActivityLogService::new(storage)),
            }
        }
    }

    pub(crate) fn bearer(user_id: i64, role: UserRole) -> (&'static str, String) {
        let token = JwtUtils::generate_access_token(user_id, &role.to_string(), Duration::minutes(5))
            .unwrap();
        ("Authorization", format!("Bearer {token}"))
    }
}
