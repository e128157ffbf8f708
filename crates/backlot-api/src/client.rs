// Hand-crafted async HTTP client for the Backlot content platform API (v1).
//
// Base path: /api/v1/
// Auth: `Authorization: Bearer <token>` header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types;

// ── Error response shape from the API ────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── List query ───────────────────────────────────────────────────────

/// Query parameters accepted by every collection endpoint.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    /// Extra filter parameters, passed through verbatim (e.g. `("isActive", "true")`).
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
            filters: Vec::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let s = search.into();
        if !s.is_empty() {
            self.search = Some(s);
        }
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("limit".to_owned(), self.limit.to_string()),
        ];
        if let Some(ref s) = self.search {
            params.push(("search".to_owned(), s.clone()));
        }
        params.extend(self.filters.iter().cloned());
        params
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Backlot API.
///
/// Uses bearer-token authentication and communicates via JSON REST
/// endpoints under `/api/v1/`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API token and transport config.
    ///
    /// Injects `Authorization: Bearer <token>` as a default header on
    /// every request.
    pub fn from_token(
        base_url: &str,
        token: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let http = transport.build_client(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL with a trailing `/api/` path segment.
    ///
    /// Accepts `https://host`, `https://host/`, or `https://host/api`;
    /// all normalize to `https://host/api/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v1/brands"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/api/`, so joining `v1/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidToken;
        }

        let raw = resp.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::FORBIDDEN {
            return Error::AccessDenied {
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
            };
        }

        match serde_json::from_str::<ErrorEnvelope>(&raw) {
            Ok(ErrorEnvelope { error: Some(err) }) => Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            },
            _ => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Brands ───────────────────────────────────────────────────────

    pub async fn list_brands(
        &self,
        query: &ListQuery,
    ) -> Result<types::ListEnvelope<types::BrandResponse>, Error> {
        self.get_with_params("v1/brands", &query.to_params()).await
    }

    pub async fn get_brand(&self, id: &str) -> Result<types::BrandResponse, Error> {
        self.get(&format!("v1/brands/{id}")).await
    }

    pub async fn create_brand(
        &self,
        body: &types::CreateBrandRequest,
    ) -> Result<types::BrandResponse, Error> {
        self.post("v1/brands", body).await
    }

    pub async fn update_brand(
        &self,
        id: &str,
        body: &types::UpdateBrandRequest,
    ) -> Result<types::BrandResponse, Error> {
        self.put(&format!("v1/brands/{id}"), body).await
    }

    pub async fn delete_brand(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/brands/{id}")).await
    }

    // ── Categories ───────────────────────────────────────────────────

    pub async fn list_categories(
        &self,
        query: &ListQuery,
    ) -> Result<types::ListEnvelope<types::CategoryResponse>, Error> {
        self.get_with_params("v1/categories", &query.to_params())
            .await
    }

    pub async fn get_category(&self, id: &str) -> Result<types::CategoryResponse, Error> {
        self.get(&format!("v1/categories/{id}")).await
    }

    pub async fn create_category(
        &self,
        body: &types::CreateCategoryRequest,
    ) -> Result<types::CategoryResponse, Error> {
        self.post("v1/categories", body).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        body: &types::UpdateCategoryRequest,
    ) -> Result<types::CategoryResponse, Error> {
        self.put(&format!("v1/categories/{id}"), body).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/categories/{id}")).await
    }

    // ── Equipment ────────────────────────────────────────────────────

    pub async fn list_equipment(
        &self,
        query: &ListQuery,
    ) -> Result<types::ListEnvelope<types::EquipmentResponse>, Error> {
        self.get_with_params("v1/equipment", &query.to_params())
            .await
    }

    pub async fn get_equipment(&self, id: &str) -> Result<types::EquipmentResponse, Error> {
        self.get(&format!("v1/equipment/{id}")).await
    }

    pub async fn create_equipment(
        &self,
        body: &types::CreateEquipmentRequest,
    ) -> Result<types::EquipmentResponse, Error> {
        self.post("v1/equipment", body).await
    }

    pub async fn update_equipment(
        &self,
        id: &str,
        body: &types::UpdateEquipmentRequest,
    ) -> Result<types::EquipmentResponse, Error> {
        self.put(&format!("v1/equipment/{id}"), body).await
    }

    pub async fn delete_equipment(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/equipment/{id}")).await
    }

    // ── Articles ─────────────────────────────────────────────────────

    pub async fn list_articles(
        &self,
        query: &ListQuery,
    ) -> Result<types::ListEnvelope<types::ArticleResponse>, Error> {
        self.get_with_params("v1/articles", &query.to_params())
            .await
    }

    pub async fn get_article(&self, id: &str) -> Result<types::ArticleResponse, Error> {
        self.get(&format!("v1/articles/{id}")).await
    }

    pub async fn create_article(
        &self,
        body: &types::CreateArticleRequest,
    ) -> Result<types::ArticleResponse, Error> {
        self.post("v1/articles", body).await
    }

    pub async fn update_article(
        &self,
        id: &str,
        body: &types::UpdateArticleRequest,
    ) -> Result<types::ArticleResponse, Error> {
        self.put(&format!("v1/articles/{id}"), body).await
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/articles/{id}")).await
    }

    // ── Staff ────────────────────────────────────────────────────────

    pub async fn list_staff(
        &self,
        query: &ListQuery,
    ) -> Result<types::ListEnvelope<types::StaffResponse>, Error> {
        self.get_with_params("v1/staff", &query.to_params()).await
    }

    pub async fn get_staff(&self, id: &str) -> Result<types::StaffResponse, Error> {
        self.get(&format!("v1/staff/{id}")).await
    }

    pub async fn create_staff(
        &self,
        body: &types::CreateStaffRequest,
    ) -> Result<types::StaffResponse, Error> {
        self.post("v1/staff", body).await
    }

    pub async fn update_staff(
        &self,
        id: &str,
        body: &types::UpdateStaffRequest,
    ) -> Result<types::StaffResponse, Error> {
        self.put(&format!("v1/staff/{id}"), body).await
    }

    pub async fn delete_staff(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/staff/{id}")).await
    }
}
