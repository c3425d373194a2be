use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub tenant_id: String,
    pub date: DateTime<Utc>,
    pub diagnosis: String,
    pub treatment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMedicalRecordRequest {
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub date: DateTime<Utc>,
    pub diagnosis: String,
    pub treatment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateMedicalRecordRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub tenant_id: String,
    pub name: String,
    pub requested_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateExamRequest {
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub name: String,
}

/// Recording a result marks the exam completed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateExamRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub drug: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub tenant_id: String,
    pub issued_at: DateTime<Utc>,
    pub medications: Vec<PrescriptionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePrescriptionRequest {
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub medications: Vec<PrescriptionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub tenant_id: String,
    pub issued_at: DateTime<Utc>,
    pub description: String,
    pub rest_days: u32,
    /// Backend-rendered PDF, when generation has finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCertificateRequest {
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub description: String,
    pub rest_days: u32,
}
