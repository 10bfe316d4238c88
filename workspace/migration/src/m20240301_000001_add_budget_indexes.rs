use model::entities::prelude::*;
use model::entities::{budget_line, hourly_rate};
use sea_orm_migration::prelude::*;

use crate::entity_iden::EntityIden;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Both read paths scan by project; the series additionally orders
        // by date and the rate lookup by effective_from.
        manager
            .create_index(
                Index::create()
                    .name("idx_budget_lines_project_date")
                    .table(BudgetLine::table())
                    .col(BudgetLine::column(budget_line::Column::ProjectId))
                    .col(BudgetLine::column(budget_line::Column::Date))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hourly_rates_project_effective")
                    .table(HourlyRate::table())
                    .col(HourlyRate::column(hourly_rate::Column::ProjectId))
                    .col(HourlyRate::column(hourly_rate::Column::EffectiveFrom))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_hourly_rates_project_effective")
                    .table(HourlyRate::table())
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_budget_lines_project_date")
                    .table(BudgetLine::table())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
