use serde::{Deserialize, Serialize};
use ts_rs::TS;

// KPI 分组的考核对象
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "kpi.ts")]
pub enum TargetRole {
    #[default]
    Employee, // 员工（按团队划分）
    Manager, // 经理（全局）
}

impl<'de> Deserialize<'de> for TargetRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<TargetRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考核对象: '{s}'. 支持的对象: employee, manager"
            ))
        })
    }
}

impl std::fmt::Display for TargetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetRole::Employee => write!(f, "employee"),
            TargetRole::Manager => write!(f, "manager"),
        }
    }
}

impl std::str::FromStr for TargetRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "employee" => Ok(TargetRole::Employee),
            "manager" => Ok(TargetRole::Manager),
            _ => Err(format!("Invalid target role: {s}")),
        }
    }
}

// KPI 分组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct KpiGroup {
    pub id: i64,
    pub name: String,
    pub weight: f64, // 在最终得分中所占百分比 (0-100)
    pub target_role: TargetRole,
    pub team_id: Option<i64>, // None 表示全局分组
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// KPI 指标项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct KpiItem {
    pub id: i64,
    pub name: String,
    pub weight: f64, // 组内相对权重
    pub kpi_group_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 带指标项的 KPI 分组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "kpi.ts")]
pub struct KpiGroupWithItems {
    #[serde(flatten)]
    #[ts(flatten)]
    pub group: KpiGroup,
    pub items: Vec<KpiItem>,
}
