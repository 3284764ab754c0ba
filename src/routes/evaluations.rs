use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde_json::json;

use super::{error_response, require_caller};
use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::activity_logs::entities::ActivityAction;
use crate::models::evaluations::requests::{
    CreateEvaluationRequest, SubjectViewParams, SubmitScoresRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{ActivityLogService, EvaluationService};
use crate::utils::SafeIDI64;

// 创建评估（同一周期已存在则直接返回）
pub async fn create_evaluation(
    req: HttpRequest,
    evaluations: web::Data<EvaluationService>,
    body: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    let body = body.into_inner();

    if let Err(e) = body.validate() {
        return Ok(error_response(e));
    }
    if let Err(e) = evaluations
        .authorize_evaluation_write(&caller, body.employee_id)
        .await
    {
        return Ok(error_response(e));
    }

    match evaluations.create_or_get_evaluation(body).await {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluation,
            "Evaluation retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 列出调用方可见的评估
pub async fn list_evaluations(
    req: HttpRequest,
    evaluations: web::Data<EvaluationService>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    match evaluations.list_evaluations(&caller).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Evaluations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 提交评分
pub async fn submit_scores(
    req: HttpRequest,
    evaluations: web::Data<EvaluationService>,
    activity: web::Data<ActivityLogService>,
    path: SafeIDI64,
    body: web::Json<SubmitScoresRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    let (evaluation, subject) = match evaluations.authorize_submission(&caller, path.0).await {
        Ok(pair) => pair,
        Err(e) => return Ok(error_response(e)),
    };

    let score = match evaluations.submit_scores(evaluation.id, body.into_inner()).await {
        Ok(score) => score,
        Err(e) => return Ok(error_response(e)),
    };

    activity
        .log_activity(
            caller.user_id,
            ActivityAction::EVALUATION_UPDATED,
            Some(json!({
                "evaluation_id": evaluation.id,
                "employee_name": subject.name,
            })),
        )
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        score,
        "Evaluation submitted successfully",
    )))
}

// 获取单份评估的得分
pub async fn get_score(
    req: HttpRequest,
    evaluations: web::Data<EvaluationService>,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = evaluations.authorize_score_read(&caller, path.0).await {
        return Ok(error_response(e));
    }

    match evaluations.get_score(path.0).await {
        Ok(score) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            score,
            "Score calculated successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 获取员工的跨周期汇总视图
pub async fn get_subject_view(
    req: HttpRequest,
    evaluations: web::Data<EvaluationService>,
    path: SafeIDI64,
    query: web::Query<SubjectViewParams>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };

    if let Err(e) = evaluations.authorize_subject_read(&caller, path.0) {
        return Ok(error_response(e));
    }
    let periods = match query.parse_periods() {
        Ok(periods) => periods,
        Err(e) => return Ok(error_response(e)),
    };

    match evaluations.get_subject_view(path.0, periods).await {
        Ok(Some(view)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            view,
            "Evaluation retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("No evaluation data"))),
        Err(e) => Ok(error_response(e)),
    }
}

// 团队汇总得分
pub async fn get_team_stats(
    evaluations: web::Data<EvaluationService>,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    match evaluations.get_team_stats(path.0).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Team stats retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    // 创建评估 - 仅管理员和经理（经理不能评估经理，在访问检查中处理）
                    .route(
                        web::post()
                            .to(create_evaluation)
                            .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
                    )
                    // 列出评估 - 仅管理员和经理
                    .route(
                        web::get()
                            .to(list_evaluations)
                            .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
                    ),
            )
            // 员工汇总视图 - 所有登录用户，员工只能看自己
            .service(web::resource("/user/{id}").route(web::get().to(get_subject_view)))
            // 团队统计 - 仅管理员和经理
            .service(
                web::resource("/team/{id}/stats")
                    .route(web::get().to(get_team_stats))
                    .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
            )
            .service(
                web::resource("/{id}/scores").route(
                    web::post()
                        .to(submit_scores)
                        .wrap(middlewares::RequireRole::new_any(UserRole::evaluator_roles())),
                ),
            )
            // 得分 - 所有登录用户，员工只能看自己
            .service(web::resource("/{id}/score").route(web::get().to(get_score))),
    );
}
