use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub tenant: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("MEDAGENDA_API_URL")
                .unwrap_or_else(|_| {
                    warn!("MEDAGENDA_API_URL not set, using empty value");
                    String::new()
                }),
            api_key: env::var("MEDAGENDA_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("MEDAGENDA_API_KEY not set, using empty value");
                    String::new()
                }),
            tenant: env::var("MEDAGENDA_TENANT")
                .unwrap_or_else(|_| {
                    warn!("MEDAGENDA_TENANT not set, using default");
                    "default".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Engine not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
            && !self.api_key.is_empty()
            && !self.tenant.is_empty()
    }
}
