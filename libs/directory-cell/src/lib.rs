pub mod models;
pub mod service;
pub mod validate;

pub use models::{
    CreatePatientRequest, CreateSpecialistRequest, DirectoryError, Patient, Specialist,
    UpdatePatientRequest, UpdateSpecialistRequest,
};
pub use service::{PatientService, SpecialistService};
