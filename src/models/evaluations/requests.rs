use serde::Deserialize;
use ts_rs::TS;

use super::entities::Period;
use crate::errors::{KpiSystemError, Result};
use crate::utils::validate::{validate_quarter, validate_score, validate_year};

// 创建（或获取）评估请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct CreateEvaluationRequest {
    #[serde(alias = "user_id")]
    pub employee_id: i64,
    pub quarter: String,
    pub year: i32,
}

impl CreateEvaluationRequest {
    pub fn validate(&self) -> Result<()> {
        if self.employee_id <= 0 {
            return Err(KpiSystemError::validation("employee_id must be positive"));
        }
        validate_quarter(&self.quarter).map_err(KpiSystemError::validation)?;
        validate_year(self.year).map_err(KpiSystemError::validation)?;
        Ok(())
    }
}

// 单项得分
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct ScoreItemInput {
    pub kpi_item_id: i64,
    pub score: f64,
}

// 分组评语
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct GroupCommentInput {
    pub kpi_group_id: i64,
    #[serde(default)]
    pub comment: String,
}

impl GroupCommentInput {
    /// 空白评语不会被保存，也不会覆盖已有评语
    pub fn has_text(&self) -> bool {
        !self.comment.trim().is_empty()
    }
}

// 提交评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct SubmitScoresRequest {
    pub items: Vec<ScoreItemInput>,
    #[serde(default)]
    pub comments: Vec<GroupCommentInput>,
}

impl SubmitScoresRequest {
    pub fn validate(&self) -> Result<()> {
        for item in &self.items {
            validate_score(item.score).map_err(|e| {
                KpiSystemError::validation(format!("kpi item {}: {e}", item.kpi_item_id))
            })?;
        }
        Ok(())
    }
}

// 员工评估视图查询参数，periods 形如 "2024-Q1,2025-Q1"
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct SubjectViewParams {
    pub periods: Option<String>,
}

impl SubjectViewParams {
    /// 未指定或为空时返回 None（即全部历史）
    pub fn parse_periods(&self) -> Result<Option<Vec<Period>>> {
        match self.periods.as_deref() {
            None => Ok(None),
            Some(raw) => {
                let periods = Period::parse_list(raw).map_err(KpiSystemError::validation)?;
                Ok(if periods.is_empty() {
                    None
                } else {
                    Some(periods)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_user_id_alias() {
        let req: CreateEvaluationRequest =
            serde_json::from_str(r#"{"user_id": 7, "quarter": "Q2", "year": 2025}"#).unwrap();
        assert_eq!(req.employee_id, 7);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_quarter() {
        let req: CreateEvaluationRequest =
            serde_json::from_str(r#"{"employee_id": 7, "quarter": "H1", "year": 2025}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_submit_request_score_range() {
        let req: SubmitScoresRequest =
            serde_json::from_str(r#"{"items": [{"kpi_item_id": 1, "score": 101}]}"#).unwrap();
        assert!(req.validate().is_err());
        assert!(req.comments.is_empty());

        let req: SubmitScoresRequest = serde_json::from_str(
            r#"{"items": [{"kpi_item_id": 1, "score": 0}], "comments": [{"kpi_group_id": 1, "comment": "  "}]}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(!req.comments[0].has_text());
    }

    #[test]
    fn test_subject_view_params() {
        let params = SubjectViewParams {
            periods: Some("2024-Q1,2025-Q1".into()),
        };
        assert_eq!(params.parse_periods().unwrap().map(|p| p.len()), Some(2));
        assert!(SubjectViewParams::default().parse_periods().unwrap().is_none());
        let bad = SubjectViewParams {
            periods: Some("Q1-2024".into()),
        };
        assert!(bad.parse_periods().is_err());
    }
}
