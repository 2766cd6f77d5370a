//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    CustomerContact, DateRange, DomainError, DomainResult, Reservation, ReservationRepository,
    ReservationStatus,
};
use crate::infrastructure::database::entities::reservation;

const ACTIVE_STATUSES: [&str; 2] = ["Pending", "Confirmed"];

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let id = Uuid::parse_str(&m.id)
        .map_err(|e| DomainError::Storage(format!("bad reservation id {}: {}", m.id, e)))?;
    let dates = DateRange::new(m.start_date, m.end_date)
        .map_err(|e| DomainError::Storage(format!("bad date range for {}: {}", m.id, e)))?;

    Ok(Reservation {
        id,
        vessel_id: m.vessel_id,
        dates,
        guest_count: m.guest_count.max(0) as u32,
        cabin_count: m.cabin_count.map(|c| c.max(0) as u32),
        status: ReservationStatus::from_str(&m.status),
        total_price_cents: m.total_price_cents,
        customer: CustomerContact {
            name: m.customer_name,
            email: m.customer_email,
            phone: m.customer_phone,
            special_requests: m.special_requests,
        },
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(r: &Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: Set(r.id.to_string()),
        vessel_id: Set(r.vessel_id.clone()),
        start_date: Set(r.dates.start()),
        end_date: Set(r.dates.end()),
        guest_count: Set(r.guest_count as i32),
        cabin_count: Set(r.cabin_count.map(|c| c as i32)),
        status: Set(r.status.as_str().to_string()),
        total_price_cents: Set(r.total_price_cents),
        customer_name: Set(r.customer.name.clone()),
        customer_email: Set(r.customer.email.clone()),
        customer_phone: Set(r.customer.phone.clone()),
        special_requests: Set(r.customer.special_requests.clone()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn save(&self, r: Reservation) -> DomainResult<()> {
        debug!(reservation_id = %r.id, "Saving reservation");
        domain_to_active(&r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, r: Reservation) -> DomainResult<()> {
        debug!(reservation_id = %r.id, status = %r.status, "Updating reservation");

        let existing = reservation::Entity::find_by_id(r.id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: r.id.to_string(),
            });
        }

        domain_to_active(&r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_active_overlapping(
        &self,
        vessel_id: &str,
        range: &DateRange,
    ) -> DomainResult<Vec<Reservation>> {
        // Half-open overlap pushed into the query: start < range.end
        // AND end > range.start.
        let models = reservation::Entity::find()
            .filter(reservation::Column::VesselId.eq(vessel_id))
            .filter(reservation::Column::Status.is_in(ACTIVE_STATUSES))
            .filter(reservation::Column::StartDate.lt(range.end()))
            .filter(reservation::Column::EndDate.gt(range.start()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_vessel(&self, vessel_id: &str) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::VesselId.eq(vessel_id))
            .order_by_desc(reservation::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_page(
        &self,
        vessel_id: Option<&str>,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Reservation>, u64)> {
        let mut query = reservation::Entity::find();
        if let Some(vessel_id) = vessel_id {
            query = query.filter(reservation::Column::VesselId.eq(vessel_id));
        }

        let paginator = query
            .order_by_desc(reservation::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.max(1) - 1)
            .await
            .map_err(db_err)?;

        let items = models
            .into_iter()
            .map(model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Status.eq("Pending"))
            .filter(reservation::Column::CreatedAt.lt(cutoff))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
