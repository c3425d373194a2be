use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub tenant_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub document_id: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: Uuid,
    pub tenant_id: String,
    pub full_name: String,
    pub email: String,
    pub specialty: String,
    pub license_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePatientRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub document_id: String,
    pub birth_date: NaiveDate,
    /// Initial account password; validated client-side, never echoed.
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePatientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSpecialistRequest {
    pub full_name: String,
    pub email: String,
    pub specialty: String,
    pub license_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSpecialistRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] AppError),
}
