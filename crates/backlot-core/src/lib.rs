// backlot-core: client-side data synchronization layer between
// backlot-api and consumers (CLI, embedding UIs).

pub mod controller;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod notify;
pub mod ops;
pub mod resources;
pub mod store;
pub mod urlstate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::{FetchState, ListController, ListSnapshot};
pub use coordinator::{ChangeEvent, MutationCoordinator, MutationPolicy};
pub use error::CoreError;
pub use notify::{Notify, NullNotify};
pub use ops::ResourceOps;
pub use resources::{ArticleOps, BrandOps, CategoryOps, EquipmentOps, StaffOps};
pub use store::{QueryKey, ResourceCache};
pub use urlstate::{MemoryUrlState, UrlState};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Identity & list machinery
    EntityId, FILTER_ALL, ListParams, Page, PageInfo,
    // Catalog
    Brand, Category, CategoryKind, EquipmentItem, EquipmentStatus,
    // Content
    Article, ArticleStatus,
    // People
    StaffMember,
};
