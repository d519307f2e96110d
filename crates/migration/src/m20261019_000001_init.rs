//! Initial schema of the expense tracker.
//!
//! - `expense_group_statuses`: fixed lookup table (Open, Confirmed, Processed)
//! - `expense_groups`: a titled group of expenses owned by a user
//! - `expenses`: single expenses, removed together with their group

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seed rows of `expense_group_statuses`.
const STATUSES: [(i32, &str); 3] = [(1, "Open"), (2, "Confirmed"), (3, "Processed")];

#[derive(Iden)]
enum ExpenseGroupStatuses {
    Table,
    Id,
    Description,
}

#[derive(Iden)]
enum ExpenseGroups {
    Table,
    Id,
    Title,
    Description,
    ExpenseGroupStatusId,
    UserId,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    AmountMinor,
    Date,
    Description,
    ExpenseGroupId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExpenseGroupStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenseGroupStatuses::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExpenseGroupStatuses::Description)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(ExpenseGroupStatuses::Table).columns([
            ExpenseGroupStatuses::Id,
            ExpenseGroupStatuses::Description,
        ]);
        for (id, description) in STATUSES {
            seed.values([id.into(), description.into()])
                .map_err(|err| DbErr::Migration(err.to_string()))?;
        }
        manager.exec_stmt(seed).await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenseGroups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExpenseGroups::Title).string().not_null())
                    .col(ColumnDef::new(ExpenseGroups::Description).string())
                    .col(
                        ColumnDef::new(ExpenseGroups::ExpenseGroupStatusId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExpenseGroups::UserId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_groups-expense_group_status_id")
                            .from(ExpenseGroups::Table, ExpenseGroups::ExpenseGroupStatusId)
                            .to(ExpenseGroupStatuses::Table, ExpenseGroupStatuses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expense_groups-user_id")
                    .table(ExpenseGroups::Table)
                    .col(ExpenseGroups::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Date).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::Description).string())
                    .col(
                        ColumnDef::new(Expenses::ExpenseGroupId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-expense_group_id")
                            .from(Expenses::Table, Expenses::ExpenseGroupId)
                            .to(ExpenseGroups::Table, ExpenseGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-expense_group_id")
                    .table(Expenses::Table)
                    .col(Expenses::ExpenseGroupId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseGroupStatuses::Table).to_owned())
            .await?;
        Ok(())
    }
}
