//! 评估服务
//!
//! 评分写入、得分计算、跨周期汇总和团队统计。存储通过构造函数注入。

pub mod access;
pub mod create;
pub mod list;
pub mod score;
pub mod submit;
pub mod team_stats;
pub mod view;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::evaluations::{
    entities::{Evaluation, Period},
    requests::{CreateEvaluationRequest, SubmitScoresRequest},
    responses::{AggregateView, EvaluationListItem, ScoreResult, TeamStatsResponse},
};
use crate::models::users::entities::CallerContext;
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Arc<dyn Storage>,
}

impl EvaluationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn create_or_get_evaluation(&self, req: CreateEvaluationRequest) -> Result<Evaluation> {
        create::create_or_get_evaluation(self, req).await
    }

    pub async fn submit_scores(
        &self,
        evaluation_id: i64,
        req: SubmitScoresRequest,
    ) -> Result<ScoreResult> {
        submit::submit_scores(self, evaluation_id, req).await
    }

    pub async fn get_score(&self, evaluation_id: i64) -> Result<ScoreResult> {
        score::get_score(self, evaluation_id).await
    }

    pub async fn list_evaluations(&self, caller: &CallerContext) -> Result<Vec<EvaluationListItem>> {
        list::list_evaluations(self, caller).await
    }

    pub async fn get_subject_view(
        &self,
        subject_id: i64,
        periods: Option<Vec<Period>>,
    ) -> Result<Option<AggregateView>> {
        view::get_subject_view(self, subject_id, periods).await
    }

    pub async fn get_team_stats(&self, team_id: i64) -> Result<TeamStatsResponse> {
        team_stats::get_team_stats(self, team_id).await
    }
}
