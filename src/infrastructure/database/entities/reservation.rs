//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub vessel_id: String,

    /// Half-open stay window: end_date is checkout day.
    pub start_date: Date,
    pub end_date: Date,

    pub guest_count: i32,

    #[sea_orm(nullable)]
    pub cabin_count: Option<i32>,

    /// Reservation status: Pending, Confirmed, Cancelled
    pub status: String,

    pub total_price_cents: i64,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,

    #[sea_orm(nullable)]
    pub special_requests: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vessel::Entity",
        from = "Column::VesselId",
        to = "super::vessel::Column::Id"
    )]
    Vessel,
}

impl Related<super::vessel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vessel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
