use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use scheduling_cell::AvailabilityService;
use shared_api::ApiClient;
use shared_models::AppointmentStatus;

use crate::lifecycle;
use crate::models::{
    Appointment, AppointmentError, AppointmentQuery, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};

/// Booking CRUD. Creates and date-moves re-check availability through
/// the scheduling cell before submitting; successful writes invalidate
/// the shared availability cache for the affected specialist+date.
#[derive(Clone)]
pub struct AppointmentService {
    api: Arc<ApiClient>,
    availability: AvailabilityService,
    creating: Arc<AtomicBool>,
}

/// Clears the in-flight latch when a create finishes, on every path.
struct SubmitGuard(Arc<AtomicBool>);

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AppointmentService {
    pub fn new(api: Arc<ApiClient>, availability: AvailabilityService) -> Self {
        Self {
            api,
            availability,
            creating: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn list(
        &self,
        query: &AppointmentQuery,
        token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!("/appointments{}", query.to_query_string());
        debug!("Listing appointments: {}", path);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    pub async fn get(&self, id: Uuid, token: &str) -> Result<Appointment, AppointmentError> {
        let path = format!("/appointments/{}", id);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    /// Books a new appointment.
    ///
    /// Only one create may be in flight at a time; a second call while
    /// one is pending returns `SubmitInFlight` immediately. This is a
    /// best-effort double-submit debounce, not an idempotency
    /// guarantee. The slot is re-checked against the backend right
    /// before submitting.
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
        token: &str,
    ) -> Result<Appointment, AppointmentError> {
        lifecycle::validate_initial_status(request.status)?;

        if self
            .creating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppointmentError::SubmitInFlight);
        }
        let _guard = SubmitGuard(self.creating.clone());

        self.ensure_slot_free(request.specialist_id, request.date, token)
            .await?;

        let body = json!({
            "patient_id": request.patient_id,
            "specialist_id": request.specialist_id,
            "date": request.date,
            "reason": request.reason,
            "status": request.status,
            "notes": request.notes,
        });

        let created: Appointment = self.api.post_data("/appointments", Some(token), body).await?;
        info!(
            "Appointment {} created for specialist {} at {}",
            created.id, created.specialist_id, created.date
        );

        self.availability
            .cache()
            .invalidate(created.specialist_id, created.date.naive_utc().date());
        Ok(created)
    }

    /// Edits an appointment. Status changes go through the transition
    /// table; moving the date re-checks the target slot first.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAppointmentRequest,
        token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get(id, token).await?;

        if let Some(next) = request.status {
            lifecycle::validate_transition(current.status, next)?;
        }
        if let Some(new_date) = request.date {
            if new_date != current.date {
                self.ensure_slot_free(current.specialist_id, new_date, token)
                    .await?;
            }
        }

        let path = format!("/appointments/{}", id);
        let body = serde_json::to_value(&request)
            .unwrap_or_else(|_| json!({}));
        let updated: Appointment = self.api.put_data(&path, Some(token), body).await?;
        info!("Appointment {} updated", updated.id);

        let cache = self.availability.cache();
        cache.invalidate(current.specialist_id, current.date.naive_utc().date());
        cache.invalidate(updated.specialist_id, updated.date.naive_utc().date());
        Ok(updated)
    }

    /// Transitions the appointment to `cancelada`, freeing its slot.
    pub async fn cancel(&self, id: Uuid, token: &str) -> Result<Appointment, AppointmentError> {
        let current = self.get(id, token).await?;
        lifecycle::validate_transition(current.status, AppointmentStatus::Cancelled)?;

        let path = format!("/appointments/{}", id);
        let body = json!({ "status": AppointmentStatus::Cancelled });
        let cancelled: Appointment = self.api.put_data(&path, Some(token), body).await?;
        info!("Appointment {} cancelled", id);

        self.availability
            .cache()
            .invalidate(current.specialist_id, current.date.naive_utc().date());
        Ok(cancelled)
    }

    /// Removes the appointment entirely. The confirmation dialog is
    /// the caller's responsibility; this is the destructive call.
    pub async fn delete(&self, id: Uuid, token: &str) -> Result<Option<String>, AppointmentError> {
        let current = self.get(id, token).await?;

        let path = format!("/appointments/{}", id);
        let ack = self.api.delete_empty(&path, Some(token)).await?;
        info!("Appointment {} deleted", id);

        self.availability
            .cache()
            .invalidate(current.specialist_id, current.date.naive_utc().date());
        Ok(ack)
    }

    async fn ensure_slot_free(
        &self,
        specialist_id: Uuid,
        date: DateTime<Utc>,
        token: &str,
    ) -> Result<(), AppointmentError> {
        let day = date.naive_utc().date();
        let time = date.naive_utc().time();

        let check = self
            .availability
            .check_availability(specialist_id, day, time, token)
            .await?;

        if !check.available {
            let reason = check
                .reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "slot unavailable".to_string());
            return Err(AppointmentError::SlotUnavailable { reason });
        }
        Ok(())
    }
}
