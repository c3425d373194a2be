use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use futures::try_join;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::AppError;
use shared_utils::time::weekday_index;

use crate::cache::AvailabilityCache;
use crate::models::{
    BookedAppointment, DayAvailability, ScheduleBreak, SchedulingError, SlotCheck, WeeklySchedule,
};
use crate::slots::{compute_day_slots, SLOT_STEP_MINUTES};
use crate::validate::validate_weekly_plan;

/// Fetches a specialist's schedule data and answers availability
/// questions from it. Computed days are served from and stored into
/// the shared `(specialist, date)` cache.
#[derive(Clone)]
pub struct AvailabilityService {
    api: Arc<ApiClient>,
    cache: Arc<AvailabilityCache>,
}

impl AvailabilityService {
    pub fn new(api: Arc<ApiClient>, cache: Arc<AvailabilityCache>) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &Arc<AvailabilityCache> {
        &self.cache
    }

    pub async fn schedule_for(
        &self,
        specialist_id: Uuid,
        token: &str,
    ) -> Result<Vec<WeeklySchedule>, SchedulingError> {
        debug!("Fetching weekly schedule for specialist {}", specialist_id);
        let path = format!("/specialists/{}/schedule", specialist_id);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    pub async fn breaks_for(
        &self,
        specialist_id: Uuid,
        token: &str,
    ) -> Result<Vec<ScheduleBreak>, SchedulingError> {
        debug!("Fetching breaks for specialist {}", specialist_id);
        let path = format!("/specialists/{}/breaks", specialist_id);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    pub async fn booked_for(
        &self,
        specialist_id: Uuid,
        date: NaiveDate,
        token: &str,
    ) -> Result<Vec<BookedAppointment>, SchedulingError> {
        debug!("Fetching appointments for {} on {}", specialist_id, date);
        let path = format!("/appointments?specialist_id={}&date={}", specialist_id, date);
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    /// Computes the bookable slots for one specialist on one date.
    ///
    /// Schedule, breaks and that date's appointments are fetched
    /// concurrently, then the slot rules run locally. A fetch failure
    /// degrades to an empty day carrying `load_error`, so the caller
    /// can tell "nothing available" from "could not load"; degraded
    /// days are not cached.
    pub async fn day_availability(
        &self,
        specialist_id: Uuid,
        date: NaiveDate,
        token: &str,
    ) -> Result<DayAvailability, SchedulingError> {
        if let Some(cached) = self.cache.get(specialist_id, date) {
            debug!("Availability cache hit for {} on {}", specialist_id, date);
            return Ok(cached);
        }

        let fetched = try_join!(
            self.schedule_for(specialist_id, token),
            self.breaks_for(specialist_id, token),
            self.booked_for(specialist_id, date, token),
        );

        let (schedules, breaks, booked) = match fetched {
            Ok(parts) => parts,
            Err(err) => {
                warn!(
                    "Availability load failed for {} on {}: {}",
                    specialist_id, date, err
                );
                return Ok(DayAvailability {
                    specialist_id,
                    date,
                    slots: Vec::new(),
                    reason: None,
                    load_error: Some(err.to_string()),
                });
            }
        };

        let day = weekday_index(date);
        let entry = schedules.iter().find(|s| s.day_of_week == day);
        let day_breaks: Vec<ScheduleBreak> =
            breaks.into_iter().filter(|b| b.day_of_week == day).collect();

        let computed = compute_day_slots(date, entry, &day_breaks, &booked, SLOT_STEP_MINUTES)?;

        let availability = DayAvailability {
            specialist_id,
            date,
            slots: computed.slots,
            reason: computed.reason,
            load_error: None,
        };
        self.cache.store(&availability);
        Ok(availability)
    }

    /// Asks the backend whether one specific date+time is still
    /// bookable. Run right before submitting a booking; the backend's
    /// answer is authoritative over any previously rendered slot list.
    pub async fn check_availability(
        &self,
        specialist_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        token: &str,
    ) -> Result<SlotCheck, SchedulingError> {
        let path = format!(
            "/specialists/{}/availability/check?date={}&time={}",
            specialist_id,
            date,
            time.format("%H:%M")
        );
        Ok(self.api.get_data(&path, Some(token)).await?)
    }

    /// The backend's own slot list for a date, for callers that prefer
    /// it over the locally computed one.
    pub async fn slots_from_backend(
        &self,
        specialist_id: Uuid,
        date: NaiveDate,
        token: &str,
    ) -> Result<Vec<NaiveTime>, SchedulingError> {
        let path = format!("/specialists/{}/slots?date={}", specialist_id, date);
        let raw: Vec<String> = self.api.get_data(&path, Some(token)).await?;
        raw.iter()
            .map(|value| {
                NaiveTime::parse_from_str(value, "%H:%M")
                    .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
                    .map_err(|_| {
                        SchedulingError::Api(AppError::Deserialize(format!(
                            "unparseable slot time '{}'",
                            value
                        )))
                    })
            })
            .collect()
    }

    /// Replaces the specialist's active schedule+breaks set.
    ///
    /// The whole plan is validated first; one conflict rejects the
    /// save before any network I/O. On success every cached day for
    /// the specialist is invalidated.
    pub async fn save_weekly_plan(
        &self,
        specialist_id: Uuid,
        schedules: &[WeeklySchedule],
        breaks: &[ScheduleBreak],
        token: &str,
    ) -> Result<Option<String>, SchedulingError> {
        validate_weekly_plan(schedules, breaks)?;

        let path = format!("/specialists/{}/schedule", specialist_id);
        let body = json!({
            "schedules": schedules,
            "breaks": breaks,
        });

        let ack = self.api.put_ack(&path, Some(token), body).await?;
        info!("Replaced weekly plan for specialist {}", specialist_id);
        self.cache.invalidate_specialist(specialist_id);
        Ok(ack)
    }
}
