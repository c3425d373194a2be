//! Thin clients for the clinical-document resources: medical records,
//! exams, prescriptions and certificates. All business rules live
//! server-side; these cells validate nothing beyond the envelope.

pub mod models;
pub mod service;

pub use models::{
    Certificate, CreateCertificateRequest, CreateExamRequest, CreateMedicalRecordRequest,
    CreatePrescriptionRequest, Exam, MedicalRecord, Prescription, PrescriptionItem,
    UpdateExamRequest, UpdateMedicalRecordRequest,
};
pub use service::{CertificateService, ExamService, MedicalRecordService, PrescriptionService};
