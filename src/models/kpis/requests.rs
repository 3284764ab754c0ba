use serde::Deserialize;
use ts_rs::TS;

use super::entities::TargetRole;
use crate::errors::{KpiSystemError, Result};
use crate::utils::validate::{validate_name, validate_weight};

// 创建 KPI 分组请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct CreateKpiGroupRequest {
    pub name: String,
    pub weight: f64,
    pub team_id: Option<i64>,
    #[serde(default)]
    pub target_role: TargetRole,
}

impl CreateKpiGroupRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name).map_err(KpiSystemError::validation)?;
        validate_weight(self.weight).map_err(KpiSystemError::validation)?;
        Ok(())
    }
}

// 更新 KPI 分组请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct UpdateKpiGroupRequest {
    pub name: Option<String>,
    pub weight: Option<f64>,
}

impl UpdateKpiGroupRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name).map_err(KpiSystemError::validation)?;
        }
        if let Some(weight) = self.weight {
            validate_weight(weight).map_err(KpiSystemError::validation)?;
        }
        Ok(())
    }
}

// 创建 KPI 指标项请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct CreateKpiItemRequest {
    pub name: String,
    pub weight: f64,
    pub kpi_group_id: i64,
}

impl CreateKpiItemRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name).map_err(KpiSystemError::validation)?;
        validate_weight(self.weight).map_err(KpiSystemError::validation)?;
        Ok(())
    }
}

// 更新 KPI 指标项请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct UpdateKpiItemRequest {
    pub name: Option<String>,
    pub weight: Option<f64>,
}

impl UpdateKpiItemRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name).map_err(KpiSystemError::validation)?;
        }
        if let Some(weight) = self.weight {
            validate_weight(weight).map_err(KpiSystemError::validation)?;
        }
        Ok(())
    }
}

// 按考核对象查询 KPI 分组
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct KpiTargetQuery {
    pub team_id: Option<i64>,
    #[serde(default)]
    pub role: TargetRole,
}
