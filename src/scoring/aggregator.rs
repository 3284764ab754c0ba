use std::collections::BTreeMap;

use crate::models::evaluations::entities::RecordedItem;
use crate::models::evaluations::responses::{GroupScore, ScoreResult};

/// 参与计算的一条得分，带上指标项权重和所属分组权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub score: f64,
    pub item_weight: f64,
    pub group_id: i64,
    pub group_weight: f64,
}

impl From<&RecordedItem> for ScoredItem {
    fn from(item: &RecordedItem) -> Self {
        Self {
            score: item.score,
            item_weight: item.weight,
            group_id: item.kpi_group_id,
            group_weight: item.group_weight,
        }
    }
}

#[derive(Default)]
struct GroupAccumulator {
    weighted_sum: f64,
    total_item_weight: f64,
    group_weight: f64,
}

/// 计算分组得分与最终得分，结果不做舍入。
///
/// 分组得分是组内按指标项权重加权的平均值，指标项权重之和为 0 时记 0 分；
/// 最终得分为各分组 `得分 * 分组权重 / 100` 之和。
/// 没有任何得分的分组不会出现在结果里。
pub fn compute_score(items: &[ScoredItem]) -> ScoreResult {
    let mut groups: BTreeMap<i64, GroupAccumulator> = BTreeMap::new();

    for item in items {
        let acc = groups.entry(item.group_id).or_insert_with(|| GroupAccumulator {
            group_weight: item.group_weight,
            ..Default::default()
        });
        acc.weighted_sum += item.score * item.item_weight;
        acc.total_item_weight += item.item_weight;
    }

    let mut result = ScoreResult::default();
    for (group_id, acc) in groups {
        let score = if acc.total_item_weight > 0.0 {
            acc.weighted_sum / acc.total_item_weight
        } else {
            0.0
        };
        result.final_score += score * acc.group_weight / 100.0;
        result.group_scores.insert(
            group_id,
            GroupScore {
                score,
                weight: acc.group_weight,
            },
        );
    }

    result
}
