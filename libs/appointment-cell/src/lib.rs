pub mod lifecycle;
pub mod models;
pub mod service;

pub use models::{
    Appointment, AppointmentError, AppointmentQuery, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};
pub use service::AppointmentService;
