//! SeaORM implementation of the read-only VesselCatalog

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::{
    CapacityModel, DomainError, DomainResult, PricingModel, Vessel, VesselCatalog,
};
use crate::infrastructure::database::entities::vessel;

pub struct SeaOrmVesselCatalog {
    db: DatabaseConnection,
}

impl SeaOrmVesselCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: vessel::Model) -> DomainResult<Vessel> {
    let pricing = match m.pricing_model.as_str() {
        "per_night" => PricingModel::PerNight {
            nightly_rate_cents: m.nightly_rate_cents,
        },
        "flat_package" => PricingModel::FlatPackage {
            package_price_cents: m.package_price_cents,
        },
        other => {
            return Err(DomainError::Storage(format!(
                "vessel {} has unknown pricing model '{}'",
                m.id, other
            )))
        }
    };

    let max_guests = m.max_guests.max(0) as u32;
    let capacity = match m.capacity_model.as_str() {
        "guests" => CapacityModel::Guests { max_guests },
        "cabins" => CapacityModel::Cabins {
            cabins: m.cabin_count.max(0) as u32,
            max_guests,
        },
        other => {
            return Err(DomainError::Storage(format!(
                "vessel {} has unknown capacity model '{}'",
                m.id, other
            )))
        }
    };

    Ok(Vessel {
        id: m.id,
        name: m.name,
        pricing,
        capacity,
        is_active: m.is_active,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── VesselCatalog impl ──────────────────────────────────────────

#[async_trait]
impl VesselCatalog for SeaOrmVesselCatalog {
    async fn find_by_id(&self, vessel_id: &str) -> DomainResult<Option<Vessel>> {
        let model = vessel::Entity::find_by_id(vessel_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list_active(&self) -> DomainResult<Vec<Vessel>> {
        let models = vessel::Entity::find()
            .filter(vessel::Column::IsActive.eq(true))
            .order_by_asc(vessel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
