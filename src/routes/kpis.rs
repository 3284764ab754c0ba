use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde_json::json;

use super::{error_response, require_caller};
use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::activity_logs::entities::ActivityAction;
use crate::models::kpis::entities::TargetRole;
use crate::models::kpis::requests::{
    CreateKpiGroupRequest, CreateKpiItemRequest, KpiTargetQuery, UpdateKpiGroupRequest,
    UpdateKpiItemRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{ActivityLogService, KpiService};
use crate::utils::SafeIDI64;

// 按考核对象列出 KPI 分组及指标项
pub async fn list_kpi_groups(
    kpis: web::Data<KpiService>,
    query: web::Query<KpiTargetQuery>,
) -> ActixResult<HttpResponse> {
    match kpis.list_for_target(query.into_inner()).await {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            groups,
            "KPI groups retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 团队员工适用的 KPI 分组
pub async fn list_team_kpi_groups(
    kpis: web::Data<KpiService>,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    list_kpi_groups(
        kpis,
        web::Query(KpiTargetQuery {
            team_id: Some(path.0),
            role: TargetRole::Employee,
        }),
    )
    .await
}

// 经理适用的全局 KPI 分组
pub async fn list_manager_kpi_groups(kpis: web::Data<KpiService>) -> ActixResult<HttpResponse> {
    list_kpi_groups(
        kpis,
        web::Query(KpiTargetQuery {
            team_id: None,
            role: TargetRole::Manager,
        }),
    )
    .await
}

// 创建 KPI 分组
pub async fn create_kpi_group(
    req: HttpRequest,
    kpis: web::Data<KpiService>,
    activity: web::Data<ActivityLogService>,
    body: web::Json<CreateKpiGroupRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    match kpis.create_group(body.into_inner()).await {
        Ok(group) => {
            activity
                .log_activity(
                    caller.user_id,
                    ActivityAction::KPI_GROUP_CREATED,
                    Some(json!({ "group_id": group.id, "group_name": group.name })),
                )
                .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                group,
                "KPI group created successfully",
            )))
        }
        Err(e) => Ok(error_response(e)),
    }
}

// 更新 KPI 分组
pub async fn update_kpi_group(
    req: HttpRequest,
    kpis: web::Data<KpiService>,
    activity: web::Data<ActivityLogService>,
    path: SafeIDI64,
    body: web::Json<UpdateKpiGroupRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    match kpis.update_group(path.0, body.into_inner()).await {
        Ok(group) => {
            activity
                .log_activity(
                    caller.user_id,
                    ActivityAction::KPI_GROUP_UPDATED,
                    Some(json!({ "group_id": group.id, "group_name": group.name })),
                )
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                group,
                "KPI group updated successfully",
            )))
        }
        Err(e) => Ok(error_response(e)),
    }
}

// 创建 KPI 指标项
pub async fn create_kpi_item(
    req: HttpRequest,
    kpis: web::Data<KpiService>,
    activity: web::Data<ActivityLogService>,
    body: web::Json<CreateKpiItemRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    match kpis.create_item(body.into_inner()).await {
        Ok(item) => {
            activity
                .log_activity(
                    caller.user_id,
                    ActivityAction::KPI_ITEM_CREATED,
                    Some(json!({ "item_id": item.id, "item_name": item.name })),
                )
                .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                item,
                "KPI item created successfully",
            )))
        }
        Err(e) => Ok(error_response(e)),
    }
}

// 更新 KPI 指标项
pub async fn update_kpi_item(
    req: HttpRequest,
    kpis: web::Data<KpiService>,
    activity: web::Data<ActivityLogService>,
    path: SafeIDI64,
    body: web::Json<UpdateKpiItemRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    match kpis.update_item(path.0, body.into_inner()).await {
        Ok(item) => {
            activity
                .log_activity(
                    caller.user_id,
                    ActivityAction::KPI_ITEM_UPDATED,
                    Some(json!({ "item_id": item.id, "item_name": item.name })),
                )
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                item,
                "KPI item updated successfully",
            )))
        }
        Err(e) => Ok(error_response(e)),
    }
}

// 配置路由
pub fn configure_kpi_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/kpis")
            .wrap(RequireJWT)
            .service(
                web::resource("/groups")
                    // 列出分组 - 所有登录用户
                    .route(web::get().to(list_kpi_groups))
                    // 创建分组 - 仅管理员
                    .route(
                        web::post()
                            .to(create_kpi_group)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .service(
                web::resource("/groups/{id}").route(
                    web::patch()
                        .to(update_kpi_group)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            )
            .service(web::resource("/team/{id}").route(web::get().to(list_team_kpi_groups)))
            .service(web::resource("/managers").route(web::get().to(list_manager_kpi_groups)))
            .service(
                web::resource("/items").route(
                    web::post()
                        .to(create_kpi_item)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            )
            .service(
                web::resource("/items/{id}").route(
                    web::patch()
                        .to(update_kpi_item)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestServices, bearer};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    macro_rules! app {
        ($services:expr) => {
            test::init_service(
                App::new()
                    .app_data($services.kpis.clone())
                    .app_data($services.activity.clone())
                    .configure(configure_kpi_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_only_admin_creates_groups() {
        let services = TestServices::new().await;
        let manager = services
            .store
            .insert_user("Mia", UserRole::Manager, None)
            .await;
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/kpis/groups")
            .insert_header(bearer(manager, UserRole::Manager))
            .set_json(json!({"name": "Delivery", "weight": 60}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_admin_manages_hierarchy() {
        let services = TestServices::new().await;
        let admin = services.store.insert_user("Ada", UserRole::Admin, None).await;
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/kpis/groups")
            .insert_header(bearer(admin, UserRole::Admin))
            .set_json(json!({"name": "Leadership", "weight": 100, "target_role": "manager"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let group_id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/kpis/items")
            .insert_header(bearer(admin, UserRole::Admin))
            .set_json(json!({"name": "Coaching", "weight": 50, "kpi_group_id": group_id}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/v1/kpis/groups/{group_id}"))
            .insert_header(bearer(admin, UserRole::Admin))
            .set_json(json!({"weight": 150}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/v1/kpis/groups?role=manager")
            .insert_header(bearer(admin, UserRole::Admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let groups = body["data"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["items"][0]["name"], "Coaching");

        let req = test::TestRequest::get()
            .uri("/api/v1/kpis/managers")
            .insert_header(bearer(admin, UserRole::Admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/kpis/team/3")
            .insert_header(bearer(admin, UserRole::Admin))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].as_array().unwrap().is_empty());

        let logs = services.activity.recent_activity(10).await.unwrap();
        assert_eq!(logs.len(), 2);
    }

    #[actix_web::test]
    async fn test_update_unknown_item_is_not_found() {
        let services = TestServices::new().await;
        let admin = services.store.insert_user("Ada", UserRole::Admin, None).await;
        let app = app!(services);

        let req = test::TestRequest::patch()
            .uri("/api/v1/kpis/items/77")
            .insert_header(bearer(admin, UserRole::Admin))
            .set_json(json!({"name": "Renamed"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
