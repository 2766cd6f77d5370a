//! Create reservations table
//!
//! Indexed on (vessel_id, start_date, end_date) and status so overlap
//! scans stay cheap.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_vessels::Vessels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::VesselId).string().not_null())
                    .col(ColumnDef::new(Reservations::StartDate).date().not_null())
                    .col(ColumnDef::new(Reservations::EndDate).date().not_null())
                    .col(ColumnDef::new(Reservations::GuestCount).integer().not_null())
                    .col(ColumnDef::new(Reservations::CabinCount).integer())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Reservations::TotalPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::CustomerName).string().not_null())
                    .col(ColumnDef::new(Reservations::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Reservations::CustomerPhone).string().not_null())
                    .col(ColumnDef::new(Reservations::SpecialRequests).string())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_vessel")
                            .from(Reservations::Table, Reservations::VesselId)
                            .to(Vessels::Table, Vessels::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_vessel_dates")
                    .table(Reservations::Table)
                    .col(Reservations::VesselId)
                    .col(Reservations::StartDate)
                    .col(Reservations::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    VesselId,
    StartDate,
    EndDate,
    GuestCount,
    CabinCount,
    Status,
    TotalPriceCents,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    SpecialRequests,
    CreatedAt,
    UpdatedAt,
}
