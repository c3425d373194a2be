//! Tenant configuration as data. Which tenant a request belongs to is
//! a header the shared client sends; enforcement lives backend-side.

pub mod models;
pub mod service;

pub use models::{TenantSettings, UpdateTenantSettingsRequest};
pub use service::TenantService;
