use std::collections::{BTreeSet, HashMap};

use super::{ScoredItem, compute_score, round2};
use crate::models::evaluations::entities::{Evaluation, EvaluationRecord, Period};
use crate::models::evaluations::responses::{AggregatedGroup, AggregatedItem, ScoreResult};

/// 多份评估合并后的结果
#[derive(Debug, Clone)]
pub struct MergedView {
    /// 参与合并的评估中最近创建的一份
    pub latest: Evaluation,
    pub groups: Vec<AggregatedGroup>,
    /// 最终得分与分组得分均已舍入到两位小数
    pub score: ScoreResult,
}

struct ItemScores {
    name: String,
    weight: f64,
    scores: Vec<f64>,
}

struct GroupSlot {
    id: i64,
    name: String,
    weight: f64,
    items: Vec<i64>,
}

fn is_newer(candidate: &Evaluation, current: &Evaluation) -> bool {
    (candidate.created_at, candidate.id) > (current.created_at, current.id)
}

/// 合并同一员工的多份评估。
///
/// 同一指标项的多次得分取算术平均（舍入到两位小数），每个分组保留
/// 创建时间最新的评估中的评语，创建时间相同时保留先出现的。
/// 合并后的得分重新走一遍加权汇总。没有评估时返回 `None`。
pub fn merge_records(records: &[EvaluationRecord]) -> Option<MergedView> {
    let mut latest: Option<&Evaluation> = None;
    let mut groups: Vec<GroupSlot> = Vec::new();
    let mut group_index: HashMap<i64, usize> = HashMap::new();
    let mut item_scores: HashMap<i64, ItemScores> = HashMap::new();
    let mut comments: HashMap<i64, (&Evaluation, &str)> = HashMap::new();

    for record in records {
        let evaluation = &record.evaluation;
        if latest.is_none_or(|current| is_newer(evaluation, current)) {
            latest = Some(evaluation);
        }

        for item in &record.items {
            let slot = *group_index.entry(item.kpi_group_id).or_insert_with(|| {
                groups.push(GroupSlot {
                    id: item.kpi_group_id,
                    name: item.group_name.clone(),
                    weight: item.group_weight,
                    items: Vec::new(),
                });
                groups.len() - 1
            });

            let entry = item_scores.entry(item.kpi_item_id).or_insert_with(|| {
                groups[slot].items.push(item.kpi_item_id);
                ItemScores {
                    name: item.name.clone(),
                    weight: item.weight,
                    scores: Vec::new(),
                }
            });
            entry.scores.push(item.score);
        }

        for comment in &record.comments {
            let replace = comments
                .get(&comment.kpi_group_id)
                .is_none_or(|(tracked, _)| evaluation.created_at > tracked.created_at);
            if replace {
                comments.insert(comment.kpi_group_id, (evaluation, comment.comment.as_str()));
            }
        }
    }

    let latest = latest?.clone();

    let mut scored = Vec::new();
    let merged_groups = groups
        .into_iter()
        .map(|group| {
            let items: Vec<AggregatedItem> = group
                .items
                .iter()
                .filter_map(|item_id| {
                    let entry = item_scores.get(item_id)?;
                    let mean = entry.scores.iter().sum::<f64>() / entry.scores.len() as f64;
                    Some(AggregatedItem {
                        id: *item_id,
                        name: entry.name.clone(),
                        weight: entry.weight,
                        score: round2(mean),
                    })
                })
                .collect();

            scored.extend(items.iter().map(|item| ScoredItem {
                score: item.score,
                item_weight: item.weight,
                group_id: group.id,
                group_weight: group.weight,
            }));

            AggregatedGroup {
                id: group.id,
                name: group.name,
                weight: group.weight,
                items,
                comment: comments
                    .get(&group.id)
                    .map(|(_, text)| text.to_string())
                    .unwrap_or_default(),
            }
        })
        .collect();

    let mut score = compute_score(&scored);
    score.final_score = round2(score.final_score);
    for group_score in score.group_scores.values_mut() {
        group_score.score = round2(group_score.score);
    }

    Some(MergedView {
        latest,
        groups: merged_groups,
        score,
    })
}

/// 员工所有评估覆盖的周期，去重后按年份、季度倒序排列
pub fn available_periods<'a>(evaluations: impl IntoIterator<Item = &'a Evaluation>) -> Vec<String> {
    evaluations
        .into_iter()
        .map(Evaluation::period)
        .collect::<BTreeSet<Period>>()
        .into_iter()
        .rev()
        .map(|period| period.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::{RecordedComment, RecordedItem};
    use chrono::{DateTime, Utc};

    fn at(ts: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(ts, 0).unwrap()
    }

    fn evaluation(id: i64, quarter: &str, year: i32, created: i64) -> Evaluation {
        Evaluation {
            id,
            employee_id: 9,
            quarter: quarter.to_string(),
            year,
            is_submitted: true,
            created_at: at(created),
            updated_at: at(created),
        }
    }

    fn recorded(item_id: i64, group_id: i64, score: f64) -> RecordedItem {
        RecordedItem {
            kpi_item_id: item_id,
            name: format!("item-{item_id}"),
            weight: 10.0,
            kpi_group_id: group_id,
            group_name: format!("group-{group_id}"),
            group_weight: 50.0,
            score,
        }
    }

    fn comment(group_id: i64, text: &str) -> RecordedComment {
        RecordedComment {
            kpi_group_id: group_id,
            comment: text.to_string(),
        }
    }

    #[test]
    fn test_no_records_is_none() {
        assert!(merge_records(&[]).is_none());
    }

    #[test]
    fn test_scores_are_averaged_across_periods() {
        let records = vec![
            EvaluationRecord {
                evaluation: evaluation(1, "Q1", 2024, 100),
                items: vec![recorded(11, 1, 70.0)],
                comments: vec![],
            },
            EvaluationRecord {
                evaluation: evaluation(2, "Q2", 2024, 200),
                items: vec![recorded(11, 1, 90.0)],
                comments: vec![],
            },
        ];

        let view = merge_records(&records).unwrap();
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].items.len(), 1);
        assert_eq!(view.groups[0].items[0].score, 80.0);
        assert_eq!(view.score.group_scores[&1].score, 80.0);
        assert_eq!(view.score.final_score, 40.0);
        assert_eq!(view.latest.id, 2);
    }

    #[test]
    fn test_averaged_scores_are_rounded() {
        let records: Vec<EvaluationRecord> = [(1, 70.0), (2, 80.0), (3, 81.0)]
            .into_iter()
            .map(|(id, score)| EvaluationRecord {
                evaluation: evaluation(id, "Q1", 2020 + id as i32, id * 10),
                items: vec![recorded(11, 1, score)],
                comments: vec![],
            })
            .collect();

        let view = merge_records(&records).unwrap();
        assert_eq!(view.groups[0].items[0].score, 77.0);

        let records: Vec<EvaluationRecord> = [(1, 70.0), (2, 70.0), (3, 71.0)]
            .into_iter()
            .map(|(id, score)| EvaluationRecord {
                evaluation: evaluation(id, "Q1", 2020 + id as i32, id * 10),
                items: vec![recorded(11, 1, score)],
                comments: vec![],
            })
            .collect();
        let view = merge_records(&records).unwrap();
        assert_eq!(view.groups[0].items[0].score, 70.33);
    }

    #[test]
    fn test_latest_comment_wins() {
        let records = vec![
            EvaluationRecord {
                evaluation: evaluation(2, "Q2", 2024, 200),
                items: vec![recorded(11, 1, 80.0)],
                comments: vec![comment(1, "B")],
            },
            EvaluationRecord {
                evaluation: evaluation(1, "Q1", 2024, 100),
                items: vec![recorded(11, 1, 80.0)],
                comments: vec![comment(1, "A")],
            },
        ];

        let view = merge_records(&records).unwrap();
        assert_eq!(view.groups[0].comment, "B");
    }

    #[test]
    fn test_comment_tie_keeps_first_seen() {
        let records = vec![
            EvaluationRecord {
                evaluation: evaluation(1, "Q1", 2024, 100),
                items: vec![recorded(11, 1, 80.0)],
                comments: vec![comment(1, "first")],
            },
            EvaluationRecord {
                evaluation: evaluation(2, "Q2", 2024, 100),
                items: vec![recorded(11, 1, 80.0)],
                comments: vec![comment(1, "second")],
            },
        ];

        let view = merge_records(&records).unwrap();
        assert_eq!(view.groups[0].comment, "first");
    }

    #[test]
    fn test_group_without_comment_is_empty_string() {
        let records = vec![EvaluationRecord {
            evaluation: evaluation(1, "Q1", 2024, 100),
            items: vec![recorded(11, 1, 80.0), recorded(21, 2, 60.0)],
            comments: vec![comment(2, "solid")],
        }];

        let view = merge_records(&records).unwrap();
        assert_eq!(view.groups[0].comment, "");
        assert_eq!(view.groups[1].comment, "solid");
    }

    #[test]
    fn test_available_periods_sorted_descending_and_distinct() {
        let evaluations = vec![
            evaluation(1, "Q2", 2023, 1),
            evaluation(2, "Q1", 2024, 2),
            evaluation(3, "Q4", 2023, 3),
            evaluation(4, "Q1", 2024, 4),
        ];

        assert_eq!(
            available_periods(&evaluations),
            vec!["2024-Q1", "2023-Q4", "2023-Q2"]
        );
    }
}
