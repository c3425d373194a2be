use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_api::ApiClient;

use crate::models::{
    CreatePatientRequest, CreateSpecialistRequest, DirectoryError, Patient, Specialist,
    UpdatePatientRequest, UpdateSpecialistRequest,
};
use crate::validate::{validate_email, validate_name, validate_password};

#[derive(Clone)]
pub struct PatientService {
    api: Arc<ApiClient>,
}

impl PatientService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Patient>, DirectoryError> {
        Ok(self.api.get_data("/patients", Some(token)).await?)
    }

    pub async fn search(&self, name: &str, token: &str) -> Result<Vec<Patient>, DirectoryError> {
        let path = format!("/patients?search={}", urlencoding::encode(name));
        debug!("Searching patients: {}", path);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    pub async fn get(&self, id: Uuid, token: &str) -> Result<Patient, DirectoryError> {
        let path = format!("/patients/{}", id);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    pub async fn create(
        &self,
        request: CreatePatientRequest,
        token: &str,
    ) -> Result<Patient, DirectoryError> {
        validate_name(&request.full_name)?;
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let body = json!({
            "full_name": request.full_name,
            "email": request.email,
            "phone": request.phone,
            "document_id": request.document_id,
            "birth_date": request.birth_date,
            "password": request.password,
        });

        let patient: Patient = self.api.post_data("/patients", Some(token), body).await?;
        info!("Patient {} registered", patient.id);
        Ok(patient)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePatientRequest,
        token: &str,
    ) -> Result<Patient, DirectoryError> {
        if let Some(ref name) = request.full_name {
            validate_name(name)?;
        }
        if let Some(ref email) = request.email {
            validate_email(email)?;
        }

        let path = format!("/patients/{}", id);
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        let patient: Patient = self.api.put_data(&path, Some(token), body).await?;
        info!("Patient {} updated", patient.id);
        Ok(patient)
    }

    pub async fn delete(&self, id: Uuid, token: &str) -> Result<Option<String>, DirectoryError> {
        let path = format!("/patients/{}", id);
        let ack = self.api.delete_empty(&path, Some(token)).await?;
        info!("Patient {} deleted", id);
        Ok(ack)
    }
}

#[derive(Clone)]
pub struct SpecialistService {
    api: Arc<ApiClient>,
}

impl SpecialistService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Specialist>, DirectoryError> {
        Ok(self.api.get_data("/specialists", Some(token)).await?)
    }

    pub async fn search(&self, name: &str, token: &str) -> Result<Vec<Specialist>, DirectoryError> {
        let path = format!("/specialists?search={}", urlencoding::encode(name));
        debug!("Searching specialists: {}", path);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    pub async fn get(&self, id: Uuid, token: &str) -> Result<Specialist, DirectoryError> {
        let path = format!("/specialists/{}", id);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    pub async fn create(
        &self,
        request: CreateSpecialistRequest,
        token: &str,
    ) -> Result<Specialist, DirectoryError> {
        validate_name(&request.full_name)?;
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let body = json!({
            "full_name": request.full_name,
            "email": request.email,
            "specialty": request.specialty,
            "license_number": request.license_number,
            "bio": request.bio,
            "password": request.password,
        });

        let specialist: Specialist = self.api.post_data("/specialists", Some(token), body).await?;
        info!("Specialist {} registered", specialist.id);
        Ok(specialist)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateSpecialistRequest,
        token: &str,
    ) -> Result<Specialist, DirectoryError> {
        if let Some(ref name) = request.full_name {
            validate_name(name)?;
        }
        if let Some(ref email) = request.email {
            validate_email(email)?;
        }

        let path = format!("/specialists/{}", id);
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        let specialist: Specialist = self.api.put_data(&path, Some(token), body).await?;
        info!("Specialist {} updated", specialist.id);
        Ok(specialist)
    }

    pub async fn delete(&self, id: Uuid, token: &str) -> Result<Option<String>, DirectoryError> {
        let path = format!("/specialists/{}", id);
        let ack = self.api.delete_empty(&path, Some(token)).await?;
        info!("Specialist {} deleted", id);
        Ok(ack)
    }
}
