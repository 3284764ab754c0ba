use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{error_response, require_caller};
use crate::middlewares::{self, RequireJWT};
use crate::models::dashboard::entities::DashboardScope;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::DashboardService;

// 仪表盘统计，范围由调用方角色决定
pub async fn get_dashboard_stats(
    req: HttpRequest,
    dashboard: web::Data<DashboardService>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    let Some(scope) = DashboardScope::for_caller(&caller) else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Dashboard is only available to administrators and managers",
        )));
    };

    match dashboard.get_stats(scope).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Dashboard stats retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(get_dashboard_stats))
                    .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestServices, bearer};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_manager_without_teams_gets_empty_stats() {
        let services = TestServices::new().await;
        let manager = services
            .store
            .insert_user("Mia", UserRole::Manager, None)
            .await;
        services
            .store
            .insert_user("Eve", UserRole::Employee, None)
            .await;
        let app = test::init_service(
            App::new()
                .app_data(services.dashboard.clone())
                .configure(configure_dashboard_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .insert_header(bearer(manager, UserRole::Manager))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["stats"]["total_employees"], 0);
        assert_eq!(body["data"]["recent_activity"].as_array().unwrap().len(), 0);

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .insert_header(bearer(manager + 1, UserRole::Employee))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
