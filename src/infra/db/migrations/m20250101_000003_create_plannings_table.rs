//! Migration: Create plannings table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plannings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plannings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plannings::Date).date().not_null())
                    .col(ColumnDef::new(Plannings::Week).integer().not_null())
                    .col(ColumnDef::new(Plannings::Year).integer().not_null())
                    .col(ColumnDef::new(Plannings::Shift).string_len(1).not_null())
                    .col(ColumnDef::new(Plannings::CeId).integer().null())
                    .col(ColumnDef::new(Plannings::SectorId).integer().null())
                    .col(ColumnDef::new(Plannings::EmployeeId).integer().null())
                    .col(ColumnDef::new(Plannings::Status).string().not_null())
                    .col(ColumnDef::new(Plannings::SubstituteId).integer().null())
                    .col(
                        ColumnDef::new(Plannings::IsCeSlot)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Plannings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Plannings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plannings_ce")
                            .from(Plannings::Table, Plannings::CeId)
                            .to(Ces::Table, Ces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plannings_sector")
                            .from(Plannings::Table, Plannings::SectorId)
                            .to(Sectors::Table, Sectors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plannings_employee")
                            .from(Plannings::Table, Plannings::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plannings_substitute")
                            .from(Plannings::Table, Plannings::SubstituteId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_plannings_date", Plannings::Date),
            ("idx_plannings_week", Plannings::Week),
            ("idx_plannings_employee", Plannings::EmployeeId),
            ("idx_plannings_ce", Plannings::CeId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Plannings::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plannings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Plannings {
    Table,
    Id,
    Date,
    Week,
    Year,
    Shift,
    CeId,
    SectorId,
    EmployeeId,
    Status,
    SubstituteId,
    IsCeSlot,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Ces {
    Table,
    Id,
}

#[derive(Iden)]
enum Sectors {
    Table,
    Id,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}
