//! Vessel DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{CapacityModel, PricingModel, Vessel};

/// Catalog view of a vessel in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct VesselDto {
    pub id: String,
    pub name: String,
    /// "per_night" or "flat_package"
    pub pricing_model: String,
    pub nightly_rate_cents: Option<i64>,
    pub package_price_cents: Option<i64>,
    /// "guests" or "cabins"
    pub capacity_model: String,
    pub max_guests: u32,
    pub cabin_count: Option<u32>,
    pub is_active: bool,
}

impl From<Vessel> for VesselDto {
    fn from(v: Vessel) -> Self {
        let (pricing_model, nightly_rate_cents, package_price_cents) = match v.pricing {
            PricingModel::PerNight { nightly_rate_cents } => {
                ("per_night".to_string(), Some(nightly_rate_cents), None)
            }
            PricingModel::FlatPackage { package_price_cents } => {
                ("flat_package".to_string(), None, Some(package_price_cents))
            }
        };

        let (capacity_model, max_guests, cabin_count) = match v.capacity {
            CapacityModel::Guests { max_guests } => ("guests".to_string(), max_guests, None),
            CapacityModel::Cabins { cabins, max_guests } => {
                ("cabins".to_string(), max_guests, Some(cabins))
            }
        };

        Self {
            id: v.id,
            name: v.name,
            pricing_model,
            nightly_rate_cents,
            package_price_cents,
            capacity_model,
            max_guests,
            cabin_count,
            is_active: v.is_active,
        }
    }
}
