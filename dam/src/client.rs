use std::path::Path;

use tracing::info;

use crate::config::DamConfig;
use crate::controller::ListController;
use crate::error::Result;
use crate::export::{CsvRecord, ExportOutcome, Exporter};
use crate::query::{FilterSet, ASSET_FILTERS, LOG_FILTERS, USER_FILTERS};
use crate::rest::DamHttpClient;
use crate::session::Session;
use crate::types::*;

/// Main DAM client: the REST client plus per-list controllers and export.
#[derive(Debug, Clone)]
pub struct Dam {
    /// HTTP client, carrying the session.
    pub http_client: DamHttpClient,
    exporter: Exporter,
    page_size: u32,
}

impl Dam {
    /// Create a client with an explicit session.
    pub fn new(config: &DamConfig, session: Session) -> Self {
        Self {
            http_client: DamHttpClient::new(&config.base_url, session),
            exporter: Exporter::new(config.export_page_size),
            page_size: config.page_size.max(1),
        }
    }

    /// Create a client whose session holds the configured token.
    pub fn from_config(config: &DamConfig) -> Self {
        let session = match &config.token {
            Some(t) => Session::with_token(t.clone()),
            None => Session::anonymous(),
        };
        Self::new(config, session)
    }

    pub fn session(&self) -> &Session {
        self.http_client.session()
    }

    /// Log in and record the returned identity on the session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        let login = self.http_client.login(username, password).await?;
        info!(username = %login.username, role = %login.role, "logged in");
        self.http_client.session_mut().apply_login(&login);
        Ok(login)
    }

    // --- List controllers ---

    pub fn asset_list(&self) -> ListController<Asset> {
        ListController::new(ASSET_FILTERS, self.page_size)
    }

    pub fn user_list(&self) -> ListController<User> {
        ListController::new(USER_FILTERS, self.page_size)
    }

    pub fn activity_log(&self) -> ListController<ActivityLog> {
        ListController::new(LOG_FILTERS, self.page_size)
    }

    // --- Export ---

    /// Export everything matching `filters` as a dated CSV file in `dir`.
    pub async fn export<T: Resource + CsvRecord>(
        &self,
        filters: &FilterSet,
        dir: &Path,
    ) -> ExportOutcome {
        self.exporter
            .export_to_dir::<T>(&self.http_client, filters, dir)
            .await
    }

    // --- REST delegates ---

    pub async fn upload_asset(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: Option<&str>,
        meta: &NewAsset,
    ) -> Result<Asset> {
        self.http_client
            .upload_asset(file_name, bytes, mime, meta)
            .await
    }

    pub async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        self.http_client.delete_asset(asset_id).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.http_client.create_user(user).await
    }

    pub async fn update_user_role(&self, user_id: u64, role: Role) -> Result<User> {
        self.http_client.update_user_role(user_id, role).await
    }

    pub async fn delete_user(&self, user_id: u64) -> Result<()> {
        self.http_client.delete_user(user_id).await
    }
}
