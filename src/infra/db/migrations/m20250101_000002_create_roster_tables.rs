//! Migration: Create work-cells, sectors, skills, employees, reservists
//! and their skill link tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `id` + `name` table shared by the simple catalog entities
fn named_table<T: IntoIden + Copy + 'static>(table: T, id: T, name: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(name).string().not_null())
        .to_owned()
}

/// Composite-key link table between an owner and a skill, cascading on both sides
fn skill_link_table<O: IntoIden + Copy + 'static>(
    table: O,
    owner_col: O,
    owner_table: O,
    owner_id: O,
    skill_col: O,
    fk_prefix: &str,
) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(owner_col).integer().not_null())
        .col(ColumnDef::new(skill_col).integer().not_null())
        .primary_key(Index::create().col(owner_col).col(skill_col))
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_owner", fk_prefix))
                .from(table, owner_col)
                .to(owner_table, owner_id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_skill", fk_prefix))
                .from(table, skill_col)
                .to(Skills::Table, Skills::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(named_table(Skills::Table, Skills::Id, Skills::Name))
            .await?;
        manager
            .create_table(named_table(Ces::Table, Ces::Id, Ces::Name))
            .await?;
        manager
            .create_table(named_table(Sectors::Table, Sectors::Id, Sectors::Name))
            .await?;
        manager
            .create_table(named_table(
                Reservists::Table,
                Reservists::Id,
                Reservists::Name,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::CeId).integer().null())
                    .col(ColumnDef::new(Employees::SectorId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_ce")
                            .from(Employees::Table, Employees::CeId)
                            .to(Ces::Table, Ces::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_sector")
                            .from(Employees::Table, Employees::SectorId)
                            .to(Sectors::Table, Sectors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_position")
                    .table(Employees::Table)
                    .col(Employees::CeId)
                    .col(Employees::SectorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(skill_link_table(
                Links::EmployeeSkills,
                Links::EmployeeId,
                Links::Employees,
                Links::Id,
                Links::SkillId,
                "employee_skills",
            ))
            .await?;
        manager
            .create_table(skill_link_table(
                Links::SectorRequiredSkills,
                Links::SectorId,
                Links::Sectors,
                Links::Id,
                Links::SkillId,
                "sector_required_skills",
            ))
            .await?;
        manager
            .create_table(skill_link_table(
                Links::ReservistSkills,
                Links::ReservistId,
                Links::Reservists,
                Links::Id,
                Links::SkillId,
                "reservist_skills",
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Links::ReservistSkills,
            Links::SectorRequiredSkills,
            Links::EmployeeSkills,
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reservists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sectors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ces::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum Skills {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone, Copy)]
enum Ces {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone, Copy)]
enum Sectors {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone, Copy)]
enum Reservists {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone, Copy)]
enum Employees {
    Table,
    Id,
    Name,
    CeId,
    SectorId,
}

/// Identifiers for the link tables and the owner tables they point at
#[derive(Iden, Clone, Copy)]
enum Links {
    EmployeeSkills,
    SectorRequiredSkills,
    ReservistSkills,
    Employees,
    Sectors,
    Reservists,
    Id,
    EmployeeId,
    SectorId,
    ReservistId,
    SkillId,
}
