use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::info;

use crate::error::{DamError, Result};
use crate::query::FilterSet;
use crate::rest::DamHttpClient;
use crate::types::*;

pub const ASSETS_PATH: &str = "/api/assets/";
pub const USERS_PATH: &str = "/api/users/";
pub const ACTIVITY_LOGS_PATH: &str = "/api/activity/logs/";
pub const LOGIN_PATH: &str = "/api/login/";

impl DamHttpClient {
    // --- Lists ---

    /// GET a list endpoint for `T` and normalize the response shape.
    pub async fn list<T: Resource>(
        &self,
        filters: &FilterSet,
        page: Option<u32>,
        page_size: u32,
    ) -> Result<Listing<T>> {
        let query = filters.to_query(page, Some(page_size));
        let body = self.get_value(T::PATH, &query).await?;
        normalize(body, page.unwrap_or(1), page_size)
    }

    /// GET /api/assets/ - Asset list.
    pub async fn list_assets(
        &self,
        filters: &FilterSet,
        page: Option<u32>,
        page_size: u32,
    ) -> Result<Listing<Asset>> {
        self.list(filters, page, page_size).await
    }

    /// GET /api/users/ - User list.
    pub async fn list_users(
        &self,
        filters: &FilterSet,
        page: Option<u32>,
        page_size: u32,
    ) -> Result<Listing<User>> {
        self.list(filters, page, page_size).await
    }

    /// GET /api/activity/logs/ - Activity log, newest first.
    pub async fn list_activity_logs(
        &self,
        filters: &FilterSet,
        page: Option<u32>,
        page_size: u32,
    ) -> Result<Listing<ActivityLog>> {
        self.list(filters, page, page_size).await
    }

    // --- Auth ---

    /// POST /api/login/ - Check credentials and fetch the caller's role.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.post_json(
            LOGIN_PATH,
            &json!({ "username": username, "password": password }),
        )
        .await
    }

    // --- Users ---

    /// POST /api/users/ - Create a user.
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.post_json(USERS_PATH, user).await
    }

    /// PATCH /api/users/{id}/ - Change a user's role.
    pub async fn update_user_role(&self, user_id: u64, role: Role) -> Result<User> {
        self.patch_json(&format!("{USERS_PATH}{user_id}/"), &json!({ "role": role }))
            .await
    }

    /// DELETE /api/users/{id}/
    pub async fn delete_user(&self, user_id: u64) -> Result<()> {
        self.delete(&format!("{USERS_PATH}{user_id}/")).await
    }

    // --- Assets ---

    /// POST /api/assets/ - Upload a file with its metadata.
    ///
    /// The kind is sniffed from the file name and MIME type. Files over
    /// [`MAX_UPLOAD_BYTES`] and blank names are rejected before sending.
    pub async fn upload_asset(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: Option<&str>,
        meta: &NewAsset,
    ) -> Result<Asset> {
        let size = bytes.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(DamError::Validation(
                "file size cannot exceed 100MB".to_string(),
            ));
        }
        if meta.name.trim().is_empty() {
            return Err(DamError::Validation("asset name is required".to_string()));
        }

        let kind = AssetKind::sniff(file_name, mime);
        let category = if meta.category.trim().is_empty() {
            kind.default_category().to_string()
        } else {
            meta.category.clone()
        };

        let mut part = Part::bytes(bytes).file_name(file_name.to_string());
        if let Some(m) = mime {
            part = part.mime_str(m)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("name", meta.name.clone())
            .text("description", meta.description.clone())
            .text("category", category)
            .text("file_type", kind.code())
            .text("file_size", size.to_string())
            .text("is_public", meta.is_public.to_string())
            .text("keywords", meta.keywords.clone())
            .text("tags", serde_json::to_string(&meta.tags)?);

        info!(file_name, size, kind = kind.code(), "uploading asset");
        self.post_multipart(ASSETS_PATH, form).await
    }

    /// DELETE /api/assets/{id}/
    pub async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        self.delete(&format!("{ASSETS_PATH}{asset_id}/")).await
    }
}
