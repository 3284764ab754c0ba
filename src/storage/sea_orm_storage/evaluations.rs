//! 评估存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::evaluation_comments::{
    ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as EvaluationComments,
};
use crate::entity::evaluation_items::{
    ActiveModel as ScoreActiveModel, Column as ScoreColumn, Entity as EvaluationItems,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::kpi_groups::{Column as GroupColumn, Entity as KpiGroups};
use crate::entity::kpi_items::{Column as ItemColumn, Entity as KpiItems};
use crate::errors::{KpiSystemError, Result};
use crate::models::evaluations::{
    entities::{Evaluation, EvaluationRecord, Period, RecordedComment, RecordedItem},
    requests::{GroupCommentInput, ScoreItemInput},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::debug;

fn db_error(action: &str) -> impl Fn(sea_orm::DbErr) -> KpiSystemError + '_ {
    move |e| KpiSystemError::database_operation(format!("{action}: {e}"))
}

/// 按 (评估, 指标项) 写入得分，存在则覆盖
async fn upsert_score(
    txn: &DatabaseTransaction,
    evaluation_id: i64,
    input: &ScoreItemInput,
    now: i64,
) -> Result<()> {
    KpiItems::find_by_id(input.kpi_item_id)
        .one(txn)
        .await
        .map_err(db_error("查询 KPI 指标项失败"))?
        .ok_or_else(|| {
            KpiSystemError::not_found(format!("KPI item {} not found", input.kpi_item_id))
        })?;

    let existing = EvaluationItems::find()
        .filter(ScoreColumn::EvaluationId.eq(evaluation_id))
        .filter(ScoreColumn::KpiItemId.eq(input.kpi_item_id))
        .one(txn)
        .await
        .map_err(db_error("查询评估得分失败"))?;

    match existing {
        Some(model) => {
            let mut active: ScoreActiveModel = model.into();
            active.score = Set(input.score);
            active.updated_at = Set(now);
            active.update(txn).await.map_err(db_error("更新评估得分失败"))?;
        }
        None => {
            ScoreActiveModel {
                evaluation_id: Set(evaluation_id),
                kpi_item_id: Set(input.kpi_item_id),
                score: Set(input.score),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(db_error("写入评估得分失败"))?;
        }
    }

    Ok(())
}

/// 按 (评估, 分组) 写入评语，存在则覆盖
async fn upsert_comment(
    txn: &DatabaseTransaction,
    evaluation_id: i64,
    input: &GroupCommentInput,
    now: i64,
) -> Result<()> {
    KpiGroups::find_by_id(input.kpi_group_id)
        .one(txn)
        .await
        .map_err(db_error("查询 KPI 分组失败"))?
        .ok_or_else(|| {
            KpiSystemError::not_found(format!("KPI group {} not found", input.kpi_group_id))
        })?;

    let existing = EvaluationComments::find()
        .filter(CommentColumn::EvaluationId.eq(evaluation_id))
        .filter(CommentColumn::KpiGroupId.eq(input.kpi_group_id))
        .one(txn)
        .await
        .map_err(db_error("查询评估评语失败"))?;

    match existing {
        Some(model) => {
            let mut active: CommentActiveModel = model.into();
            active.comment = Set(input.comment.clone());
            active.updated_at = Set(now);
            active.update(txn).await.map_err(db_error("更新评估评语失败"))?;
        }
        None => {
            CommentActiveModel {
                evaluation_id: Set(evaluation_id),
                kpi_group_id: Set(input.kpi_group_id),
                comment: Set(input.comment.clone()),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(db_error("写入评估评语失败"))?;
        }
    }

    Ok(())
}

impl SeaOrmStorage {
    async fn find_evaluation_by_period(
        &self,
        employee_id: i64,
        quarter: &str,
        year: i32,
    ) -> Result<Option<Evaluation>> {
        let result = Evaluations::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .filter(Column::Quarter.eq(quarter))
            .filter(Column::Year.eq(year))
            .one(&self.db)
            .await
            .map_err(db_error("查询评估失败"))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 创建或获取评估
    ///
    /// 并发创建同一周期时，唯一索引冲突的一方重新读取已存在的记录。
    pub async fn create_or_get_evaluation_impl(
        &self,
        employee_id: i64,
        quarter: &str,
        year: i32,
    ) -> Result<(Evaluation, bool)> {
        if let Some(existing) = self
            .find_evaluation_by_period(employee_id, quarter, year)
            .await?
        {
            return Ok((existing, false));
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            employee_id: Set(employee_id),
            quarter: Set(quarter.to_string()),
            year: Set(year),
            is_submitted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok((created.into_evaluation(), true)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(
                    "Concurrent create for employee {} {}-{}, re-reading",
                    employee_id, year, quarter
                );
                self.find_evaluation_by_period(employee_id, quarter, year)
                    .await?
                    .map(|existing| (existing, false))
                    .ok_or_else(|| {
                        KpiSystemError::database_operation(format!("创建评估失败: {e}"))
                    })
            }
            Err(e) => Err(KpiSystemError::database_operation(format!(
                "创建评估失败: {e}"
            ))),
        }
    }

    /// 通过 ID 获取评估
    pub async fn get_evaluation_by_id_impl(&self, id: i64) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询评估失败"))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 提交评估
    ///
    /// 得分、评语和提交标记在同一个事务内写入，任一步失败全部回滚。
    /// 事务内只能使用 `txn`，不能再访问 `self.db`。
    pub async fn submit_evaluation_impl(
        &self,
        evaluation_id: i64,
        items: &[ScoreItemInput],
        comments: &[GroupCommentInput],
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| KpiSystemError::transaction(format!("开启事务失败: {e}")))?;
        let now = chrono::Utc::now().timestamp();

        let evaluation = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(db_error("查询评估失败"))?
            .ok_or_else(|| {
                KpiSystemError::not_found(format!("Evaluation {evaluation_id} not found"))
            })?;

        for item in items {
            upsert_score(&txn, evaluation_id, item, now).await?;
        }

        for comment in comments {
            if !comment.has_text() {
                debug!(
                    "Skipping empty comment for evaluation {} group {}",
                    evaluation_id, comment.kpi_group_id
                );
                continue;
            }
            upsert_comment(&txn, evaluation_id, comment, now).await?;
        }

        let mut active: ActiveModel = evaluation.into();
        active.is_submitted = Set(true);
        active.updated_at = Set(now);
        active
            .update(&txn)
            .await
            .map_err(db_error("更新评估状态失败"))?;

        txn.commit()
            .await
            .map_err(|e| KpiSystemError::transaction(format!("提交事务失败: {e}")))
    }

    /// 批量加载评估得分，附带指标项与分组的静态信息
    async fn load_recorded_items(
        &self,
        evaluation_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<RecordedItem>>> {
        let scores = EvaluationItems::find()
            .filter(ScoreColumn::EvaluationId.is_in(evaluation_ids.iter().copied()))
            .order_by_asc(ScoreColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询评估得分失败"))?;

        if scores.is_empty() {
            return Ok(HashMap::new());
        }

        let items: HashMap<i64, _> = KpiItems::find()
            .filter(ItemColumn::Id.is_in(scores.iter().map(|s| s.kpi_item_id)))
            .all(&self.db)
            .await
            .map_err(db_error("查询 KPI 指标项失败"))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let groups: HashMap<i64, _> = KpiGroups::find()
            .filter(GroupColumn::Id.is_in(items.values().map(|i| i.kpi_group_id)))
            .all(&self.db)
            .await
            .map_err(db_error("查询 KPI 分组失败"))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let mut recorded: HashMap<i64, Vec<RecordedItem>> = HashMap::new();
        for score in scores {
            let Some(item) = items.get(&score.kpi_item_id) else {
                continue;
            };
            let Some(group) = groups.get(&item.kpi_group_id) else {
                continue;
            };
            recorded
                .entry(score.evaluation_id)
                .or_default()
                .push(RecordedItem {
                    kpi_item_id: item.id,
                    name: item.name.clone(),
                    weight: item.weight,
                    kpi_group_id: group.id,
                    group_name: group.name.clone(),
                    group_weight: group.weight,
                    score: score.score,
                });
        }

        Ok(recorded)
    }

    /// 获取单份评估的得分
    pub async fn list_evaluation_items_impl(&self, evaluation_id: i64) -> Result<Vec<RecordedItem>> {
        let mut recorded = self.load_recorded_items(&[evaluation_id]).await?;
        Ok(recorded.remove(&evaluation_id).unwrap_or_default())
    }

    /// 列出评估（最近创建的在前）
    pub async fn list_evaluations_impl(
        &self,
        employee_ids: Option<&[i64]>,
    ) -> Result<Vec<Evaluation>> {
        let mut select = Evaluations::find();

        if let Some(ids) = employee_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::EmployeeId.is_in(ids.iter().copied()));
        }

        let evaluations = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询评估列表失败"))?;

        Ok(evaluations.into_iter().map(|m| m.into_evaluation()).collect())
    }

    /// 获取员工的评估记录（按创建时间正序），可按周期过滤
    pub async fn list_evaluation_records_impl(
        &self,
        employee_id: i64,
        periods: Option<&[Period]>,
    ) -> Result<Vec<EvaluationRecord>> {
        let mut select = Evaluations::find().filter(Column::EmployeeId.eq(employee_id));

        if let Some(periods) = periods {
            let condition = periods.iter().fold(Condition::any(), |cond, period| {
                cond.add(
                    Condition::all()
                        .add(Column::Year.eq(period.year))
                        .add(Column::Quarter.eq(period.quarter.as_str())),
                )
            });
            select = select.filter(condition);
        }

        let evaluations = select
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询评估失败"))?;

        if evaluations.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = evaluations.iter().map(|e| e.id).collect();
        let mut items = self.load_recorded_items(&ids).await?;

        let mut comments: HashMap<i64, Vec<RecordedComment>> = HashMap::new();
        for comment in EvaluationComments::find()
            .filter(CommentColumn::EvaluationId.is_in(ids.iter().copied()))
            .order_by_asc(CommentColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询评估评语失败"))?
        {
            comments
                .entry(comment.evaluation_id)
                .or_default()
                .push(RecordedComment {
                    kpi_group_id: comment.kpi_group_id,
                    comment: comment.comment,
                });
        }

        Ok(evaluations
            .into_iter()
            .map(|model| EvaluationRecord {
                items: items.remove(&model.id).unwrap_or_default(),
                comments: comments.remove(&model.id).unwrap_or_default(),
                evaluation: model.into_evaluation(),
            })
            .collect())
    }

    /// 获取员工最近创建的评估
    pub async fn get_latest_evaluation_impl(&self, employee_id: i64) -> Result<Option<Evaluation>> {
        let result = Evaluations::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error("查询评估失败"))?;

        Ok(result.map(|m| m.into_evaluation()))
    }
}
