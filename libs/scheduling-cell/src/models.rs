use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{AppError, AppointmentStatus};
use shared_utils::time::hhmm;

use crate::validate::PlanConflict;

/// One working interval per weekday per specialist. Absence of an
/// entry, or `is_available = false`, means the specialist does not
/// work that weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub id: Uuid,
    pub specialist_id: Uuid,
    pub tenant_id: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_available: bool,
}

/// Recurring pause inside a weekday's working interval (lunch, ward
/// rounds). Zero or more per weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBreak {
    pub id: Uuid,
    pub specialist_id: Uuid,
    pub tenant_id: String,
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub description: String,
}

/// The projection of an appointment the slot calculator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedAppointment {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub status: AppointmentStatus,
}

/// Why a day came back without any bookable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDayReason {
    /// The specialist has no usable schedule entry for that weekday.
    NoScheduleForDay,
    /// The day has working hours, but breaks and bookings consumed them.
    NoSlotsRemaining,
}

impl fmt::Display for EmptyDayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyDayReason::NoScheduleForDay => f.write_str("no schedule for this day"),
            EmptyDayReason::NoSlotsRemaining => f.write_str("no available slots for this day"),
        }
    }
}

/// Output of the pure slot calculation: bookable start times, sorted
/// ascending. An empty day is not an error; `reason` says which kind
/// of empty it is.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<NaiveTime>,
    pub reason: Option<EmptyDayReason>,
}

/// A day's availability as served to callers. `load_error` marks a
/// degraded result: one of the upstream fetches failed and the day is
/// shown empty, distinct from a genuinely empty day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAvailability {
    pub specialist_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<NaiveTime>,
    pub reason: Option<EmptyDayReason>,
    pub load_error: Option<String>,
}

impl DayAvailability {
    pub fn is_degraded(&self) -> bool {
        self.load_error.is_some()
    }
}

/// Why one specific date+time is not bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotUnavailableReason {
    NoScheduleForDay,
    OutsideWorkingHours,
    WithinBreak,
    AlreadyBooked,
}

impl fmt::Display for SlotUnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotUnavailableReason::NoScheduleForDay => f.write_str("no schedule for this day"),
            SlotUnavailableReason::OutsideWorkingHours => f.write_str("outside working hours"),
            SlotUnavailableReason::WithinBreak => f.write_str("falls within a break"),
            SlotUnavailableReason::AlreadyBooked => f.write_str("already booked"),
        }
    }
}

/// Answer of the submit-time availability check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotCheck {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SlotUnavailableReason>,
}

impl SlotCheck {
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    pub fn unavailable(reason: SlotUnavailableReason) -> Self {
        Self {
            available: false,
            reason: Some(reason),
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Invalid schedule entry: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    Plan(#[from] PlanConflict),

    #[error(transparent)]
    Api(#[from] AppError),
}
