use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::AppError;

use crate::models::{
    Certificate, CreateCertificateRequest, CreateExamRequest, CreateMedicalRecordRequest,
    CreatePrescriptionRequest, Exam, MedicalRecord, Prescription, UpdateExamRequest,
    UpdateMedicalRecordRequest,
};

#[derive(Clone)]
pub struct MedicalRecordService {
    api: Arc<ApiClient>,
}

impl MedicalRecordService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
        token: &str,
    ) -> Result<Vec<MedicalRecord>, AppError> {
        let path = format!("/medical-records?patient_id={}", patient_id);
        self.api.get_data(&path, Some(token)).await
    }

    pub async fn get(&self, id: Uuid, token: &str) -> Result<MedicalRecord, AppError> {
        self.api
            .get_data(&format!("/medical-records/{}", id), Some(token))
            .await
    }

    pub async fn create(
        &self,
        request: CreateMedicalRecordRequest,
        token: &str,
    ) -> Result<MedicalRecord, AppError> {
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        let record: MedicalRecord = self
            .api
            .post_data("/medical-records", Some(token), body)
            .await?;
        info!("Medical record {} created", record.id);
        Ok(record)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMedicalRecordRequest,
        token: &str,
    ) -> Result<MedicalRecord, AppError> {
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        self.api
            .put_data(&format!("/medical-records/{}", id), Some(token), body)
            .await
    }

    pub async fn delete(&self, id: Uuid, token: &str) -> Result<Option<String>, AppError> {
        self.api
            .delete_empty(&format!("/medical-records/{}", id), Some(token))
            .await
    }
}

#[derive(Clone)]
pub struct ExamService {
    api: Arc<ApiClient>,
}

impl ExamService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
        token: &str,
    ) -> Result<Vec<Exam>, AppError> {
        let path = format!("/exams?patient_id={}", patient_id);
        self.api.get_data(&path, Some(token)).await
    }

    pub async fn get(&self, id: Uuid, token: &str) -> Result<Exam, AppError> {
        self.api.get_data(&format!("/exams/{}", id), Some(token)).await
    }

    pub async fn create(&self, request: CreateExamRequest, token: &str) -> Result<Exam, AppError> {
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        let exam: Exam = self.api.post_data("/exams", Some(token), body).await?;
        info!("Exam '{}' requested for patient {}", exam.name, exam.patient_id);
        Ok(exam)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateExamRequest,
        token: &str,
    ) -> Result<Exam, AppError> {
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        self.api
            .put_data(&format!("/exams/{}", id), Some(token), body)
            .await
    }

    pub async fn delete(&self, id: Uuid, token: &str) -> Result<Option<String>, AppError> {
        self.api
            .delete_empty(&format!("/exams/{}", id), Some(token))
            .await
    }
}

#[derive(Clone)]
pub struct PrescriptionService {
    api: Arc<ApiClient>,
}

impl PrescriptionService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
        token: &str,
    ) -> Result<Vec<Prescription>, AppError> {
        let path = format!("/prescriptions?patient_id={}", patient_id);
        self.api.get_data(&path, Some(token)).await
    }

    pub async fn get(&self, id: Uuid, token: &str) -> Result<Prescription, AppError> {
        self.api
            .get_data(&format!("/prescriptions/{}", id), Some(token))
            .await
    }

    pub async fn create(
        &self,
        request: CreatePrescriptionRequest,
        token: &str,
    ) -> Result<Prescription, AppError> {
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        let prescription: Prescription = self
            .api
            .post_data("/prescriptions", Some(token), body)
            .await?;
        info!(
            "Prescription {} issued with {} medication(s)",
            prescription.id,
            prescription.medications.len()
        );
        Ok(prescription)
    }

    pub async fn delete(&self, id: Uuid, token: &str) -> Result<Option<String>, AppError> {
        self.api
            .delete_empty(&format!("/prescriptions/{}", id), Some(token))
            .await
    }
}

#[derive(Clone)]
pub struct CertificateService {
    api: Arc<ApiClient>,
}

impl CertificateService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
        token: &str,
    ) -> Result<Vec<Certificate>, AppError> {
        let path = format!("/certificates?patient_id={}", patient_id);
        self.api.get_data(&path, Some(token)).await
    }

    pub async fn get(&self, id: Uuid, token: &str) -> Result<Certificate, AppError> {
        self.api
            .get_data(&format!("/certificates/{}", id), Some(token))
            .await
    }

    pub async fn create(
        &self,
        request: CreateCertificateRequest,
        token: &str,
    ) -> Result<Certificate, AppError> {
        let body = serde_json::to_value(&request).unwrap_or_else(|_| json!({}));
        let certificate: Certificate = self
            .api
            .post_data("/certificates", Some(token), body)
            .await?;
        info!("Certificate {} issued", certificate.id);
        Ok(certificate)
    }

    pub async fn delete(&self, id: Uuid, token: &str) -> Result<Option<String>, AppError> {
        self.api
            .delete_empty(&format!("/certificates/{}", id), Some(token))
            .await
    }
}
