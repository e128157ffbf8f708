// ── Staff domain types ──

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A team member shown on the public site and managed from the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: EntityId,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub is_active: bool,
}
