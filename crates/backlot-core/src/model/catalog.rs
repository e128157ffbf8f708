// ── Catalog domain types ──
//
// Brands, categories, and rental equipment. Converted from wire DTOs in
// `convert`; unknown enum strings from the API map to `Unknown` rather
// than failing the whole page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

// ── Brand ───────────────────────────────────────────────────────────

/// An equipment manufacturer shown in the public catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

// ── Category ────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKind {
    Equipment,
    Article,
    Unknown,
}

/// A catalog grouping, discriminated by the content it organizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub kind: CategoryKind,
}

// ── Equipment ───────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
    Unknown,
}

impl EquipmentStatus {
    /// Whether this unit can currently be booked.
    pub fn is_rentable(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// A rentable unit in the equipment catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: EntityId,
    pub name: String,
    pub brand_id: Option<EntityId>,
    pub category_id: Option<EntityId>,
    pub status: EquipmentStatus,
    pub daily_rate_cents: Option<i64>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_status_round_trips_wire_form() {
        assert_eq!(EquipmentStatus::Available.to_string(), "AVAILABLE");
        assert_eq!(
            "MAINTENANCE".parse::<EquipmentStatus>().ok(),
            Some(EquipmentStatus::Maintenance)
        );
        assert!("SOMETHING_NEW".parse::<EquipmentStatus>().is_err());
    }

    #[test]
    fn only_available_units_are_rentable() {
        assert!(EquipmentStatus::Available.is_rentable());
        assert!(!EquipmentStatus::Rented.is_rentable());
        assert!(!EquipmentStatus::Retired.is_rentable());
    }
}
