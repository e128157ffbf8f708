// ── Resource operations port ──
//
// The in-process face of the REST service layer. One implementation per
// resource; the controller and coordinator are generic over this trait,
// so tests substitute an in-memory fake.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::model::{EntityId, ListParams, Page};

/// Network operations for a single resource.
///
/// `list` is the only required operation. The mutating operations
/// default to [`CoreError::Unsupported`], so read-only resources simply
/// omit them.
#[async_trait]
pub trait ResourceOps: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;
    type CreateInput: Send + 'static;
    type UpdateInput: Send + 'static;

    /// Cache namespace for this resource (e.g. `"brands"`).
    fn namespace(&self) -> &'static str;

    /// Extract the stable identity of an item.
    fn identity_of(&self, item: &Self::Item) -> EntityId;

    /// Page size used when the URL does not specify one.
    fn default_limit(&self) -> u32 {
        10
    }

    /// Fetch one page matching the given parameters.
    async fn list(&self, params: &ListParams) -> Result<Page<Self::Item>, CoreError>;

    /// Fetch a single record by id.
    async fn fetch(&self, id: &EntityId) -> Result<Self::Item, CoreError> {
        let _ = id;
        Err(self.unsupported("fetch"))
    }

    async fn create(&self, input: Self::CreateInput) -> Result<Self::Item, CoreError> {
        let _ = input;
        Err(self.unsupported("create"))
    }

    async fn update(
        &self,
        id: &EntityId,
        input: Self::UpdateInput,
    ) -> Result<Self::Item, CoreError> {
        let _ = (id, input);
        Err(self.unsupported("update"))
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let _ = id;
        Err(self.unsupported("delete"))
    }

    #[doc(hidden)]
    fn unsupported(&self, operation: &str) -> CoreError {
        CoreError::Unsupported {
            operation: operation.to_owned(),
            resource: self.namespace().to_owned(),
        }
    }
}
