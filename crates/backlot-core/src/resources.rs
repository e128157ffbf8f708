// ── Resource operations over the Backlot API ──
//
// One `ResourceOps` implementation per catalog resource, each wrapping
// the shared `ApiClient`. These are the production counterparts of the
// in-memory fakes used in tests.

use std::sync::Arc;

use async_trait::async_trait;
use backlot_api::types as wire;
use backlot_api::{ApiClient, ListQuery};

use crate::convert::page_from_envelope;
use crate::error::CoreError;
use crate::model::{
    Article, Brand, Category, EntityId, EquipmentItem, ListParams, Page, StaffMember,
};
use crate::ops::ResourceOps;

/// Translate domain list parameters into the wire query.
fn list_query(params: &ListParams) -> ListQuery {
    let mut query = ListQuery::new(params.page, params.limit).with_search(params.search.clone());
    for (key, value) in &params.filters {
        query = query.with_filter(key.clone(), value.clone());
    }
    query
}

// ── Brands ───────────────────────────────────────────────────────────

pub struct BrandOps {
    client: Arc<ApiClient>,
}

impl BrandOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceOps for BrandOps {
    type Item = Brand;
    type CreateInput = wire::CreateBrandRequest;
    type UpdateInput = wire::UpdateBrandRequest;

    fn namespace(&self) -> &'static str {
        "brands"
    }

    fn identity_of(&self, item: &Brand) -> EntityId {
        item.id.clone()
    }

    async fn list(&self, params: &ListParams) -> Result<Page<Brand>, CoreError> {
        let envelope = self.client.list_brands(&list_query(params)).await?;
        Ok(page_from_envelope(envelope))
    }

    async fn fetch(&self, id: &EntityId) -> Result<Brand, CoreError> {
        Ok(self.client.get_brand(&id.to_string()).await?.into())
    }

    async fn create(&self, input: Self::CreateInput) -> Result<Brand, CoreError> {
        Ok(self.client.create_brand(&input).await?.into())
    }

    async fn update(&self, id: &EntityId, input: Self::UpdateInput) -> Result<Brand, CoreError> {
        Ok(self.client.update_brand(&id.to_string(), &input).await?.into())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        Ok(self.client.delete_brand(&id.to_string()).await?)
    }
}

// ── Categories ───────────────────────────────────────────────────────

pub struct CategoryOps {
    client: Arc<ApiClient>,
}

impl CategoryOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceOps for CategoryOps {
    type Item = Category;
    type CreateInput = wire::CreateCategoryRequest;
    type UpdateInput = wire::UpdateCategoryRequest;

    fn namespace(&self) -> &'static str {
        "categories"
    }

    fn identity_of(&self, item: &Category) -> EntityId {
        item.id.clone()
    }

    // Category pickers show everything on one page.
    fn default_limit(&self) -> u32 {
        24
    }

    async fn list(&self, params: &ListParams) -> Result<Page<Category>, CoreError> {
        let envelope = self.client.list_categories(&list_query(params)).await?;
        Ok(page_from_envelope(envelope))
    }

    async fn fetch(&self, id: &EntityId) -> Result<Category, CoreError> {
        Ok(self.client.get_category(&id.to_string()).await?.into())
    }

    async fn create(&self, input: Self::CreateInput) -> Result<Category, CoreError> {
        Ok(self.client.create_category(&input).await?.into())
    }

    async fn update(&self, id: &EntityId, input: Self::UpdateInput) -> Result<Category, CoreError> {
        Ok(self
            .client
            .update_category(&id.to_string(), &input)
            .await?
            .into())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        Ok(self.client.delete_category(&id.to_string()).await?)
    }
}

// ── Equipment ────────────────────────────────────────────────────────

pub struct EquipmentOps {
    client: Arc<ApiClient>,
}

impl EquipmentOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceOps for EquipmentOps {
    type Item = EquipmentItem;
    type CreateInput = wire::CreateEquipmentRequest;
    type UpdateInput = wire::UpdateEquipmentRequest;

    fn namespace(&self) -> &'static str {
        "equipment"
    }

    fn identity_of(&self, item: &EquipmentItem) -> EntityId {
        item.id.clone()
    }

    // Matches the 3x4 card grid on the rental page.
    fn default_limit(&self) -> u32 {
        12
    }

    async fn list(&self, params: &ListParams) -> Result<Page<EquipmentItem>, CoreError> {
        let envelope = self.client.list_equipment(&list_query(params)).await?;
        Ok(page_from_envelope(envelope))
    }

    async fn fetch(&self, id: &EntityId) -> Result<EquipmentItem, CoreError> {
        Ok(self.client.get_equipment(&id.to_string()).await?.into())
    }

    async fn create(&self, input: Self::CreateInput) -> Result<EquipmentItem, CoreError> {
        Ok(self.client.create_equipment(&input).await?.into())
    }

    async fn update(
        &self,
        id: &EntityId,
        input: Self::UpdateInput,
    ) -> Result<EquipmentItem, CoreError> {
        Ok(self
            .client
            .update_equipment(&id.to_string(), &input)
            .await?
            .into())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        Ok(self.client.delete_equipment(&id.to_string()).await?)
    }
}

// ── Articles ─────────────────────────────────────────────────────────

pub struct ArticleOps {
    client: Arc<ApiClient>,
}

impl ArticleOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceOps for ArticleOps {
    type Item = Article;
    type CreateInput = wire::CreateArticleRequest;
    type UpdateInput = wire::UpdateArticleRequest;

    fn namespace(&self) -> &'static str {
        "articles"
    }

    fn identity_of(&self, item: &Article) -> EntityId {
        item.id.clone()
    }

    async fn list(&self, params: &ListParams) -> Result<Page<Article>, CoreError> {
        let envelope = self.client.list_articles(&list_query(params)).await?;
        Ok(page_from_envelope(envelope))
    }

    async fn fetch(&self, id: &EntityId) -> Result<Article, CoreError> {
        Ok(self.client.get_article(&id.to_string()).await?.into())
    }

    async fn create(&self, input: Self::CreateInput) -> Result<Article, CoreError> {
        Ok(self.client.create_article(&input).await?.into())
    }

    async fn update(&self, id: &EntityId, input: Self::UpdateInput) -> Result<Article, CoreError> {
        Ok(self
            .client
            .update_article(&id.to_string(), &input)
            .await?
            .into())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        Ok(self.client.delete_article(&id.to_string()).await?)
    }
}

// ── Staff ────────────────────────────────────────────────────────────

pub struct StaffOps {
    client: Arc<ApiClient>,
}

impl StaffOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceOps for StaffOps {
    type Item = StaffMember;
    type CreateInput = wire::CreateStaffRequest;
    type UpdateInput = wire::UpdateStaffRequest;

    fn namespace(&self) -> &'static str {
        "staff"
    }

    fn identity_of(&self, item: &StaffMember) -> EntityId {
        item.id.clone()
    }

    fn default_limit(&self) -> u32 {
        20
    }

    async fn list(&self, params: &ListParams) -> Result<Page<StaffMember>, CoreError> {
        let envelope = self.client.list_staff(&list_query(params)).await?;
        Ok(page_from_envelope(envelope))
    }

    async fn fetch(&self, id: &EntityId) -> Result<StaffMember, CoreError> {
        Ok(self.client.get_staff(&id.to_string()).await?.into())
    }

    async fn create(&self, input: Self::CreateInput) -> Result<StaffMember, CoreError> {
        Ok(self.client.create_staff(&input).await?.into())
    }

    async fn update(
        &self,
        id: &EntityId,
        input: Self::UpdateInput,
    ) -> Result<StaffMember, CoreError> {
        Ok(self
            .client
            .update_staff(&id.to_string(), &input)
            .await?
            .into())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        Ok(self.client.delete_staff(&id.to_string()).await?)
    }
}
