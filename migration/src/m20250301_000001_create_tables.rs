use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表（用户目录由外部维护，这里只保存评估需要的字段）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::TeamId).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建团队表
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::ManagerId).big_integer().null())
                    .col(ColumnDef::new(Teams::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Teams::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teams::Table, Teams::ManagerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 KPI 分组表
        manager
            .create_table(
                Table::create()
                    .table(KpiGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KpiGroups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(KpiGroups::Name).string().not_null())
                    .col(ColumnDef::new(KpiGroups::Weight).double().not_null())
                    .col(
                        ColumnDef::new(KpiGroups::TargetRole)
                            .string()
                            .not_null()
                            .default("employee"),
                    )
                    .col(ColumnDef::new(KpiGroups::TeamId).big_integer().null())
                    .col(
                        ColumnDef::new(KpiGroups::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(KpiGroups::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(KpiGroups::Table, KpiGroups::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 KPI 指标项表
        manager
            .create_table(
                Table::create()
                    .table(KpiItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KpiItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(KpiItems::Name).string().not_null())
                    .col(ColumnDef::new(KpiItems::Weight).double().not_null())
                    .col(
                        ColumnDef::new(KpiItems::KpiGroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(KpiItems::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(KpiItems::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(KpiItems::Table, KpiItems::KpiGroupId)
                            .to(KpiGroups::Table, KpiGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Quarter).string().not_null())
                    .col(ColumnDef::new(Evaluations::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Evaluations::IsSubmitted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估得分表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationItems::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationItems::KpiItemId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationItems::Score).double().not_null())
                    .col(
                        ColumnDef::new(EvaluationItems::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationItems::Table, EvaluationItems::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationItems::Table, EvaluationItems::KpiItemId)
                            .to(KpiItems::Table, KpiItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估评语表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationComments::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationComments::KpiGroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(EvaluationComments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationComments::Table, EvaluationComments::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationComments::Table, EvaluationComments::KpiGroupId)
                            .to(KpiGroups::Table, KpiGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建操作日志表
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ActivityLogs::Action).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::Details).text().null())
                    .col(
                        ColumnDef::new(ActivityLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActivityLogs::Table, ActivityLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 唯一约束：每个员工每个周期只有一份评估
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_evaluations_employee_period")
                    .table(Evaluations::Table)
                    .col(Evaluations::EmployeeId)
                    .col(Evaluations::Quarter)
                    .col(Evaluations::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_evaluation_items_evaluation_kpi_item")
                    .table(EvaluationItems::Table)
                    .col(EvaluationItems::EvaluationId)
                    .col(EvaluationItems::KpiItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_evaluation_comments_evaluation_kpi_group")
                    .table(EvaluationComments::Table)
                    .col(EvaluationComments::EvaluationId)
                    .col(EvaluationComments::KpiGroupId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_team_id")
                    .table(Users::Table)
                    .col(Users::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teams_manager_id")
                    .table(Teams::Table)
                    .col(Teams::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_kpi_items_kpi_group_id")
                    .table(KpiItems::Table)
                    .col(KpiItems::KpiGroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_logs_created_at")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(KpiItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(KpiGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    Role,
    TeamId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    Name,
    ManagerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum KpiGroups {
    #[sea_orm(iden = "kpi_groups")]
    Table,
    Id,
    Name,
    Weight,
    TargetRole,
    TeamId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum KpiItems {
    #[sea_orm(iden = "kpi_items")]
    Table,
    Id,
    Name,
    Weight,
    KpiGroupId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    EmployeeId,
    Quarter,
    Year,
    IsSubmitted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationItems {
    #[sea_orm(iden = "evaluation_items")]
    Table,
    Id,
    EvaluationId,
    KpiItemId,
    Score,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationComments {
    #[sea_orm(iden = "evaluation_comments")]
    Table,
    Id,
    EvaluationId,
    KpiGroupId,
    Comment,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    #[sea_orm(iden = "activity_logs")]
    Table,
    Id,
    UserId,
    Action,
    Details,
    CreatedAt,
}
