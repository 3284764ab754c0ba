//! 访问控制
//!
//! 路由层在调用评估服务之前先做这些检查。

use super::EvaluationService;
use crate::errors::{KpiSystemError, Result};
use crate::models::evaluations::entities::Evaluation;
use crate::models::users::entities::{CallerContext, User, UserRole};

impl EvaluationService {
    /// 校验调用方能否为 `subject_id` 创建或提交评估，返回被评估人
    ///
    /// 经理不能评估其他经理。
    pub async fn authorize_evaluation_write(
        &self,
        caller: &CallerContext,
        subject_id: i64,
    ) -> Result<User> {
        let subject = self
            .storage()
            .get_user_by_id(subject_id)
            .await?
            .ok_or_else(|| KpiSystemError::not_found(format!("User {subject_id} not found")))?;

        if caller.role == UserRole::Manager && subject.role == UserRole::Manager {
            return Err(KpiSystemError::forbidden(
                "Managers cannot evaluate other managers",
            ));
        }

        Ok(subject)
    }

    /// 校验调用方能否提交指定评估，返回评估和被评估人
    pub async fn authorize_submission(
        &self,
        caller: &CallerContext,
        evaluation_id: i64,
    ) -> Result<(Evaluation, User)> {
        let evaluation = self.require_evaluation(evaluation_id).await?;
        let subject = self
            .authorize_evaluation_write(caller, evaluation.employee_id)
            .await?;
        Ok((evaluation, subject))
    }

    /// 员工只能查看自己的汇总视图
    pub fn authorize_subject_read(&self, caller: &CallerContext, subject_id: i64) -> Result<()> {
        if caller.role == UserRole::Employee && caller.user_id != subject_id {
            return Err(KpiSystemError::forbidden(
                "Employees can only view their own evaluations",
            ));
        }
        Ok(())
    }

    /// 员工只能查看自己评估的得分
    pub async fn authorize_score_read(
        &self,
        caller: &CallerContext,
        evaluation_id: i64,
    ) -> Result<Evaluation> {
        let evaluation = self.require_evaluation(evaluation_id).await?;
        self.authorize_subject_read(caller, evaluation.employee_id)?;
        Ok(evaluation)
    }

    pub(crate) async fn require_evaluation(&self, evaluation_id: i64) -> Result<Evaluation> {
        self.storage()
            .get_evaluation_by_id(evaluation_id)
            .await?
            .ok_or_else(|| KpiSystemError::not_found(format!("Evaluation {evaluation_id} not found")))
    }
}
