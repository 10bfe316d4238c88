use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string_null(Users::Name))
                    .to_owned(),
            )
            .await?;

        // Create projects table
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string(Projects::Name))
                    .to_owned(),
            )
            .await?;

        // Create tasks table
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(integer(Tasks::ProjectId))
                    .col(string(Tasks::Title))
                    .col(date_time_null(Tasks::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_project")
                            .from(Tasks::Table, Tasks::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create time_entries table
        manager
            .create_table(
                Table::create()
                    .table(TimeEntries::Table)
                    .if_not_exists()
                    .col(pk_auto(TimeEntries::Id))
                    .col(integer(TimeEntries::TaskId))
                    .col(integer(TimeEntries::UserId))
                    .col(string(TimeEntries::Title))
                    .col(decimal(TimeEntries::TimeSpent).decimal_len(10, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_entry_task")
                            .from(TimeEntries::Table, TimeEntries::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_entry_user")
                            .from(TimeEntries::Table, TimeEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create hourly_rates table
        manager
            .create_table(
                Table::create()
                    .table(HourlyRates::Table)
                    .if_not_exists()
                    .col(pk_auto(HourlyRates::Id))
                    .col(integer(HourlyRates::UserId))
                    .col(integer(HourlyRates::ProjectId))
                    .col(string(HourlyRates::Currency))
                    .col(decimal(HourlyRates::Rate).decimal_len(19, 4))
                    .col(date_time(HourlyRates::EffectiveFrom))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hourly_rate_user")
                            .from(HourlyRates::Table, HourlyRates::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hourly_rate_project")
                            .from(HourlyRates::Table, HourlyRates::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create currency_rates table
        manager
            .create_table(
                Table::create()
                    .table(CurrencyRates::Table)
                    .if_not_exists()
                    .col(pk_auto(CurrencyRates::Id))
                    .col(string(CurrencyRates::Currency).unique_key())
                    .col(decimal(CurrencyRates::Rate).decimal_len(19, 4))
                    .to_owned(),
            )
            .await?;

        // Create budget_lines table
        manager
            .create_table(
                Table::create()
                    .table(BudgetLines::Table)
                    .if_not_exists()
                    .col(pk_auto(BudgetLines::Id))
                    .col(integer(BudgetLines::ProjectId))
                    .col(decimal(BudgetLines::Amount).decimal_len(19, 4))
                    .col(string(BudgetLines::Comment))
                    .col(date(BudgetLines::Date))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budget_line_project")
                            .from(BudgetLines::Table, BudgetLines::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BudgetLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CurrencyRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HourlyRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimeEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Name,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    ProjectId,
    Title,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TimeEntries {
    Table,
    Id,
    TaskId,
    UserId,
    Title,
    TimeSpent,
}

#[derive(DeriveIden)]
enum HourlyRates {
    Table,
    Id,
    UserId,
    ProjectId,
    Currency,
    Rate,
    EffectiveFrom,
}

#[derive(DeriveIden)]
enum CurrencyRates {
    Table,
    Id,
    Currency,
    Rate,
}

#[derive(DeriveIden)]
enum BudgetLines {
    Table,
    Id,
    ProjectId,
    Amount,
    Comment,
    Date,
}
