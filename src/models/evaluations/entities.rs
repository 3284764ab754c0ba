use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::validate::{validate_quarter, validate_year};

// 评估实体，每个员工每个周期 (quarter, year) 只有一份
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub employee_id: i64,
    pub quarter: String,
    pub year: i32,
    pub is_submitted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Evaluation {
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            quarter: self.quarter.clone(),
        }
    }
}

/// 考核周期，字符串形式为 `{year}-{quarter}`，例如 `2024-Q1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    pub year: i32,
    pub quarter: String,
}

impl Period {
    pub fn new(year: i32, quarter: impl Into<String>) -> Self {
        Self {
            year,
            quarter: quarter.into(),
        }
    }

    /// 解析逗号分隔的周期列表，空字符串视为未指定
    pub fn parse_list(raw: &str) -> Result<Vec<Period>, String> {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.year, self.quarter)
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, quarter) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid period '{s}', expected YEAR-QUARTER"))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("Invalid period year in '{s}'"))?;
        validate_year(year)?;
        validate_quarter(quarter)?;
        Ok(Period::new(year, quarter))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.quarter.cmp(&other.quarter))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// 已记录的单项得分，附带指标项与分组的静态信息
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedItem {
    pub kpi_item_id: i64,
    pub name: String,
    pub weight: f64,
    pub kpi_group_id: i64,
    pub group_name: String,
    pub group_weight: f64,
    pub score: f64,
}

/// 已记录的分组评语
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedComment {
    pub kpi_group_id: i64,
    pub comment: String,
}

/// 一份评估及其全部得分与评语
#[derive(Debug, Clone)]
pub struct EvaluationRecord {
    pub evaluation: Evaluation,
    pub items: Vec<RecordedItem>,
    pub comments: Vec<RecordedComment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_and_display() {
        let period: Period = "2024-Q3".parse().unwrap();
        assert_eq!(period, Period::new(2024, "Q3"));
        assert_eq!(period.to_string(), "2024-Q3");
    }

    #[test]
    fn test_period_parse_rejects_malformed() {
        assert!("2024Q1".parse::<Period>().is_err());
        assert!("abcd-Q1".parse::<Period>().is_err());
        assert!("2024-Q5".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_parse_list() {
        let periods = Period::parse_list("2024-Q1, 2025-Q2,").unwrap();
        assert_eq!(
            periods,
            vec![Period::new(2024, "Q1"), Period::new(2025, "Q2")]
        );
        assert!(Period::parse_list("").unwrap().is_empty());
        assert!(Period::parse_list("2024-Q1,oops").is_err());
    }

    #[test]
    fn test_period_ordering() {
        let mut periods = vec![
            Period::new(2024, "Q2"),
            Period::new(2025, "Q1"),
            Period::new(2024, "Q4"),
        ];
        periods.sort_by(|a, b| b.cmp(a));
        assert_eq!(
            periods,
            vec![
                Period::new(2025, "Q1"),
                Period::new(2024, "Q4"),
                Period::new(2024, "Q2"),
            ]
        );
    }
}
