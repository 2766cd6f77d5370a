//! Create vessels table
//!
//! Reference data for bookable dahabiyas and fixed packages. Rows are
//! written by the catalog service; the engine treats them as read-only.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vessels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vessels::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vessels::Name).string().not_null())
                    .col(
                        ColumnDef::new(Vessels::PricingModel)
                            .string()
                            .not_null()
                            .default("per_night"),
                    )
                    .col(
                        ColumnDef::new(Vessels::NightlyRateCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Vessels::PackagePriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Vessels::CapacityModel)
                            .string()
                            .not_null()
                            .default("guests"),
                    )
                    .col(ColumnDef::new(Vessels::MaxGuests).integer().not_null())
                    .col(
                        ColumnDef::new(Vessels::CabinCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Vessels::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vessels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vessels {
    Table,
    Id,
    Name,
    PricingModel,
    NightlyRateCents,
    PackagePriceCents,
    CapacityModel,
    MaxGuests,
    CabinCount,
    IsActive,
}
