use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use scheduling_cell::SchedulingError;
use shared_models::{AppError, AppointmentStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub tenant_id: String,
    /// Calendar day and time-of-day of the visit, as one instant.
    pub date: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub specialist_id: Uuid,
    pub date: DateTime<Utc>,
    pub reason: String,
    /// `Pending`, or `Confirmed` when an administrator books a
    /// confirmed visit directly. Anything else is rejected.
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// List filters, rendered into the query string.
#[derive(Debug, Clone, Default)]
pub struct AppointmentQuery {
    pub specialist_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl AppointmentQuery {
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(id) = self.specialist_id {
            params.push(format!("specialist_id={}", id));
        }
        if let Some(id) = self.patient_id {
            params.push(format!("patient_id={}", id));
        }
        if let Some(status) = self.status {
            params.push(format!("status={}", status));
        }
        if let Some(from) = self.from {
            params.push(format!("from={}", from));
        }
        if let Some(to) = self.to {
            params.push(format!("to={}", to));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Cannot move appointment from '{from}' to '{to}'")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointments cannot be created with status '{0}'")]
    InvalidInitialStatus(AppointmentStatus),

    #[error("Selected slot is no longer available: {reason}")]
    SlotUnavailable { reason: String },

    #[error("A booking request is already in flight")]
    SubmitInFlight,

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    #[error(transparent)]
    Api(#[from] AppError),
}
