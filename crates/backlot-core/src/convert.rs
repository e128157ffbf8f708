// ── Wire-to-domain conversions ──
//
// Everything the API hands back is translated here, in one place.
// Unknown enum strings degrade to `Unknown` variants instead of failing
// the page they arrived in.

use backlot_api::types as wire;

use crate::model::{
    Article, ArticleStatus, Brand, Category, CategoryKind, EntityId, EquipmentItem,
    EquipmentStatus, Page, PageInfo, StaffMember,
};

// ── Envelope ─────────────────────────────────────────────────────────

impl From<wire::PaginationMeta> for PageInfo {
    fn from(meta: wire::PaginationMeta) -> Self {
        Self {
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            has_next_page: meta.has_next_page,
            has_prev_page: meta.has_prev_page,
        }
    }
}

/// Convert a wire list envelope into a domain page.
pub(crate) fn page_from_envelope<R, T: From<R>>(envelope: wire::ListEnvelope<R>) -> Page<T> {
    Page {
        items: envelope.data.into_iter().map(T::from).collect(),
        total: envelope.total,
        pagination: envelope.pagination.map(PageInfo::from),
    }
}

// ── Records ──────────────────────────────────────────────────────────

impl From<wire::BrandResponse> for Brand {
    fn from(raw: wire::BrandResponse) -> Self {
        Self {
            id: EntityId::Num(raw.id),
            name: raw.name,
            slug: raw.slug,
            logo_url: raw.logo_url,
            is_active: raw.is_active,
            created_at: raw.created_at,
        }
    }
}

impl From<wire::CategoryResponse> for Category {
    fn from(raw: wire::CategoryResponse) -> Self {
        Self {
            id: EntityId::Num(raw.id),
            name: raw.name,
            slug: raw.slug,
            kind: raw.kind.parse().unwrap_or(CategoryKind::Unknown),
        }
    }
}

impl From<wire::EquipmentResponse> for EquipmentItem {
    fn from(raw: wire::EquipmentResponse) -> Self {
        Self {
            id: EntityId::Num(raw.id),
            name: raw.name,
            brand_id: raw.brand_id.map(EntityId::Num),
            category_id: raw.category_id.map(EntityId::Num),
            status: raw.status.parse().unwrap_or(EquipmentStatus::Unknown),
            daily_rate_cents: raw.daily_rate_cents,
            is_active: raw.is_active,
            created_at: raw.created_at,
        }
    }
}

impl From<wire::ArticleResponse> for Article {
    fn from(raw: wire::ArticleResponse) -> Self {
        Self {
            id: EntityId::Num(raw.id),
            title: raw.title,
            slug: raw.slug,
            status: raw.status.parse().unwrap_or(ArticleStatus::Unknown),
            locale: raw.locale,
            body: raw.body,
            published_at: raw.published_at,
        }
    }
}

impl From<wire::StaffResponse> for StaffMember {
    fn from(raw: wire::StaffResponse) -> Self {
        Self {
            id: EntityId::Num(raw.id),
            name: raw.name,
            role: raw.role,
            email: raw.email,
            is_active: raw.is_active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_degrades_instead_of_failing() {
        let raw = wire::EquipmentResponse {
            id: 1,
            name: "FX6".into(),
            brand_id: Some(2),
            category_id: None,
            status: "ON_LOAN_TO_MARS".into(),
            daily_rate_cents: None,
            is_active: true,
            created_at: None,
        };

        let item = EquipmentItem::from(raw);
        assert_eq!(item.status, EquipmentStatus::Unknown);
        assert_eq!(item.brand_id, Some(EntityId::Num(2)));
    }

    #[test]
    fn envelope_converts_items_and_meta() {
        let envelope = wire::ListEnvelope {
            data: vec![wire::BrandResponse {
                id: 1,
                name: "Sony".into(),
                slug: "sony".into(),
                logo_url: None,
                is_active: true,
                created_at: None,
            }],
            total: 5,
            pagination: Some(wire::PaginationMeta {
                current_page: 1,
                total_pages: 3,
                has_next_page: true,
                has_prev_page: false,
            }),
        };

        let page: Page<Brand> = page_from_envelope(envelope);
        assert_eq!(page.total, 5);
        assert_eq!(page.items[0].id, EntityId::from(1));
        assert_eq!(page.pagination.unwrap().total_pages, 3);
    }
}
