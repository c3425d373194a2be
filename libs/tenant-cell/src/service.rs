use std::sync::Arc;

use serde_json::json;
use tracing::info;

use shared_api::ApiClient;
use shared_models::AppError;

use crate::models::{TenantSettings, UpdateTenantSettingsRequest};

#[derive(Clone)]
pub struct TenantService {
    api: Arc<ApiClient>,
}

impl TenantService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_settings(&self, token: &str) -> Result<TenantSettings, AppError> {
        self.api.get_data("/tenant/settings", Some(token)).await
    }

    pub async fn update_settings(
        &self,
        request: UpdateTenantSettingsRequest,
        token: &str,
    ) -> Result<TenantSettings, AppError> {
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        let settings: TenantSettings = self
            .api
            .put_data("/tenant/settings", Some(token), body)
            .await?;
        info!("Tenant settings updated for {}", settings.tenant_id);
        Ok(settings)
    }
}
