//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activity_logs;
mod dashboard;
mod evaluations;
mod kpis;
mod users;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::config::DatabaseConfig;
use crate::errors::{KpiSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按配置连接数据库并执行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接构建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| KpiSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| KpiSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| KpiSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| KpiSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(KpiSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 每个测试独立的内存数据库
    ///
    /// 连接池只保留一个连接，否则每个连接都会看到一份新的空库。
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid in-memory url")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .expect("in-memory sqlite pool");

        Self::from_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
            .await
            .expect("migrations should run")
    }
}

// Storage trait 实现
use crate::models::{
    activity_logs::entities::ActivityLog,
    evaluations::{
        entities::{Evaluation, EvaluationRecord, Period, RecordedItem},
        requests::{GroupCommentInput, ScoreItemInput},
    },
    kpis::{
        entities::{KpiGroup, KpiGroupWithItems, KpiItem, TargetRole},
        requests::{
            CreateKpiGroupRequest, CreateKpiItemRequest, UpdateKpiGroupRequest,
            UpdateKpiItemRequest,
        },
    },
    users::entities::User,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户与团队
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn list_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.list_users_by_ids_impl(ids).await
    }

    async fn list_team_members(&self, team_id: i64) -> Result<Vec<User>> {
        self.list_team_members_impl(team_id).await
    }

    async fn list_managed_team_ids(&self, manager_id: i64) -> Result<Vec<i64>> {
        self.list_managed_team_ids_impl(manager_id).await
    }

    // KPI 模块
    async fn create_kpi_group(&self, req: CreateKpiGroupRequest) -> Result<KpiGroup> {
        self.create_kpi_group_impl(req).await
    }

    async fn get_kpi_group_by_id(&self, id: i64) -> Result<Option<KpiGroup>> {
        self.get_kpi_group_by_id_impl(id).await
    }

    async fn update_kpi_group(
        &self,
        id: i64,
        update: UpdateKpiGroupRequest,
    ) -> Result<Option<KpiGroup>> {
        self.update_kpi_group_impl(id, update).await
    }

    async fn create_kpi_item(&self, req: CreateKpiItemRequest) -> Result<KpiItem> {
        self.create_kpi_item_impl(req).await
    }

    async fn update_kpi_item(
        &self,
        id: i64,
        update: UpdateKpiItemRequest,
    ) -> Result<Option<KpiItem>> {
        self.update_kpi_item_impl(id, update).await
    }

    async fn list_kpi_groups(
        &self,
        team_id: Option<i64>,
        target_role: TargetRole,
    ) -> Result<Vec<KpiGroupWithItems>> {
        self.list_kpi_groups_impl(team_id, target_role).await
    }

    async fn list_kpi_groups_in_scope(
        &self,
        team_id: Option<i64>,
        target_role: TargetRole,
    ) -> Result<Vec<KpiGroup>> {
        self.list_kpi_groups_in_scope_impl(team_id, target_role)
            .await
    }

    // 评估模块
    async fn create_or_get_evaluation(
        &self,
        employee_id: i64,
        quarter: &str,
        year: i32,
    ) -> Result<(Evaluation, bool)> {
        self.create_or_get_evaluation_impl(employee_id, quarter, year)
            .await
    }

    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(id).await
    }

    async fn submit_evaluation(
        &self,
        evaluation_id: i64,
        items: &[ScoreItemInput],
        comments: &[GroupCommentInput],
    ) -> Result<()> {
        self.submit_evaluation_impl(evaluation_id, items, comments)
            .await
    }

    async fn list_evaluation_items(&self, evaluation_id: i64) -> Result<Vec<RecordedItem>> {
        self.list_evaluation_items_impl(evaluation_id).await
    }

    async fn list_evaluations(&self, employee_ids: Option<&[i64]>) -> Result<Vec<Evaluation>> {
        self.list_evaluations_impl(employee_ids).await
    }

    async fn list_evaluation_records(
        &self,
        employee_id: i64,
        periods: Option<&[Period]>,
    ) -> Result<Vec<EvaluationRecord>> {
        self.list_evaluation_records_impl(employee_id, periods)
            .await
    }

    async fn get_latest_evaluation(&self, employee_id: i64) -> Result<Option<Evaluation>> {
        self.get_latest_evaluation_impl(employee_id).await
    }

    // 仪表盘模块
    async fn count_teams(&self) -> Result<i64> {
        self.count_teams_impl().await
    }

    async fn count_employees(&self, team_ids: Option<&[i64]>) -> Result<i64> {
        self.count_employees_impl(team_ids).await
    }

    async fn count_pending_evaluations(&self, team_ids: Option<&[i64]>) -> Result<i64> {
        self.count_pending_evaluations_impl(team_ids).await
    }

    async fn list_recent_submitted_evaluations(
        &self,
        team_ids: &[i64],
        limit: u64,
    ) -> Result<Vec<(Evaluation, User)>> {
        self.list_recent_submitted_evaluations_impl(team_ids, limit)
            .await
    }

    async fn list_newest_employees(&self, team_ids: &[i64], limit: u64) -> Result<Vec<User>> {
        self.list_newest_employees_impl(team_ids, limit).await
    }

    // 操作日志模块
    async fn create_activity_log(
        &self,
        user_id: i64,
        action: &str,
        details: Option<serde_json::Value>,
    ) -> Result<()> {
        self.create_activity_log_impl(user_id, action, details)
            .await
    }

    async fn list_recent_activity_logs(&self, limit: u64) -> Result<Vec<ActivityLog>> {
        self.list_recent_activity_logs_impl(limit).await
    }
}
