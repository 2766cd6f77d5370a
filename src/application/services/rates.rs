//! Price computation for a stay
//!
//! Pure and deterministic; no storage access. Range validity (at least one
//! night) is guaranteed by [`DateRange`] construction, so pricing itself
//! cannot fail.

use crate::domain::{DateRange, PricingModel, Vessel};

/// Total price for a stay, in integer cents.
///
/// Per-night vessels charge `nightly_rate × nights`; guest count only gates
/// capacity and never multiplies price. Flat packages charge the package
/// price regardless of the range length (the duration is fixed by the
/// package definition).
pub fn compute_price(vessel: &Vessel, range: &DateRange) -> i64 {
    match vessel.pricing {
        PricingModel::PerNight { nightly_rate_cents } => {
            nightly_rate_cents * i64::from(range.nights())
        }
        PricingModel::FlatPackage { package_price_cents } => package_price_cents,
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CapacityModel;
    use chrono::NaiveDate;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    fn per_night_vessel(rate_cents: i64) -> Vessel {
        Vessel {
            id: "dhb-001".into(),
            name: "Nile Pearl".into(),
            pricing: PricingModel::PerNight {
                nightly_rate_cents: rate_cents,
            },
            capacity: CapacityModel::Guests { max_guests: 8 },
            is_active: true,
        }
    }

    fn package_vessel(price_cents: i64) -> Vessel {
        Vessel {
            id: "pkg-001".into(),
            name: "Aswan to Luxor 10 Days".into(),
            pricing: PricingModel::FlatPackage {
                package_price_cents: price_cents,
            },
            capacity: CapacityModel::Guests { max_guests: 16 },
            is_active: true,
        }
    }

    #[test]
    fn per_night_price_is_rate_times_nights() {
        // 7 nights at $200/night = $1400
        let v = per_night_vessel(20_000);
        let r = range((2026, 7, 1), (2026, 7, 8));
        assert_eq!(compute_price(&v, &r), 140_000);
    }

    #[test]
    fn single_night_charges_one_rate() {
        let v = per_night_vessel(30_000);
        let r = range((2026, 7, 1), (2026, 7, 2));
        assert_eq!(compute_price(&v, &r), 30_000);
    }

    #[test]
    fn package_price_ignores_range_length() {
        // $2400 package, whatever the queried range spans
        let v = package_vessel(240_000);
        assert_eq!(compute_price(&v, &range((2026, 7, 1), (2026, 7, 11))), 240_000);
        assert_eq!(compute_price(&v, &range((2026, 7, 1), (2026, 7, 3))), 240_000);
    }

    #[test]
    fn price_is_deterministic() {
        let v = per_night_vessel(20_000);
        let r = range((2026, 7, 1), (2026, 7, 8));
        assert_eq!(compute_price(&v, &r), compute_price(&v, &r));
    }
}
