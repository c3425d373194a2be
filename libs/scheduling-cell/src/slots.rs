use chrono::{Duration, NaiveDate, NaiveTime};

use shared_models::AppointmentStatus;

use crate::models::{
    BookedAppointment, DaySlots, EmptyDayReason, ScheduleBreak, SchedulingError, SlotCheck,
    SlotUnavailableReason, WeeklySchedule,
};

/// Quantization step observed across the clinic: appointments start on
/// half-hour boundaries and last one step.
pub const SLOT_STEP_MINUTES: u32 = 30;

/// Derives the bookable start times for one specialist on one date.
///
/// `schedule` is the specialist's entry for that date's weekday, if
/// any. Candidates step from the working start at `step_minutes`; the
/// end boundary is exclusive so a full appointment fits before
/// closing. Candidates inside a break or coinciding with a
/// non-cancelled appointment are dropped. An empty result is not an
/// error; the `reason` field distinguishes "no schedule" from
/// "everything taken".
pub fn compute_day_slots(
    date: NaiveDate,
    schedule: Option<&WeeklySchedule>,
    breaks: &[ScheduleBreak],
    booked: &[BookedAppointment],
    step_minutes: u32,
) -> Result<DaySlots, SchedulingError> {
    let schedule = match usable_schedule(schedule, step_minutes)? {
        Some(s) => s,
        None => {
            return Ok(DaySlots {
                date,
                slots: Vec::new(),
                reason: Some(EmptyDayReason::NoScheduleForDay),
            })
        }
    };

    let step = Duration::minutes(step_minutes as i64);
    let opening = date.and_time(schedule.start_time);
    let closing = date.and_time(schedule.end_time);

    let mut slots = Vec::new();
    let mut cursor = opening;
    while cursor + step <= closing {
        let candidate = cursor.time();
        if !falls_in_break(candidate, schedule.day_of_week, breaks)
            && !is_taken(date, candidate, booked)
        {
            slots.push(candidate);
        }
        cursor += step;
    }
    slots.sort_unstable();

    let reason = if slots.is_empty() {
        Some(EmptyDayReason::NoSlotsRemaining)
    } else {
        None
    };

    Ok(DaySlots { date, slots, reason })
}

/// Re-runs the slot rules for a single date+time. Used right before
/// submitting a booking, so a slot taken since the list was rendered
/// is caught.
pub fn check_slot(
    date: NaiveDate,
    time: NaiveTime,
    schedule: Option<&WeeklySchedule>,
    breaks: &[ScheduleBreak],
    booked: &[BookedAppointment],
    step_minutes: u32,
) -> Result<SlotCheck, SchedulingError> {
    let schedule = match usable_schedule(schedule, step_minutes)? {
        Some(s) => s,
        None => {
            return Ok(SlotCheck::unavailable(
                SlotUnavailableReason::NoScheduleForDay,
            ))
        }
    };

    let step = Duration::minutes(step_minutes as i64);
    let opening = date.and_time(schedule.start_time);
    let closing = date.and_time(schedule.end_time);
    let at = date.and_time(time);

    // Off-grid times count as outside working hours, as does any time
    // whose full appointment would not fit before closing.
    let offset = at - opening;
    let on_grid = offset >= Duration::zero()
        && offset.num_seconds() % (step_minutes as i64 * 60) == 0;
    if !on_grid || at + step > closing {
        return Ok(SlotCheck::unavailable(
            SlotUnavailableReason::OutsideWorkingHours,
        ));
    }

    if falls_in_break(time, schedule.day_of_week, breaks) {
        return Ok(SlotCheck::unavailable(SlotUnavailableReason::WithinBreak));
    }

    if is_taken(date, time, booked) {
        return Ok(SlotCheck::unavailable(SlotUnavailableReason::AlreadyBooked));
    }

    Ok(SlotCheck::available())
}

fn usable_schedule<'a>(
    schedule: Option<&'a WeeklySchedule>,
    step_minutes: u32,
) -> Result<Option<&'a WeeklySchedule>, SchedulingError> {
    if step_minutes == 0 {
        return Err(SchedulingError::InvalidSchedule(
            "slot step must be positive".to_string(),
        ));
    }

    let schedule = match schedule {
        Some(s) => s,
        None => return Ok(None),
    };

    if schedule.day_of_week > 6 {
        return Err(SchedulingError::InvalidSchedule(format!(
            "day_of_week {} is out of range 0-6",
            schedule.day_of_week
        )));
    }
    if schedule.start_time >= schedule.end_time {
        return Err(SchedulingError::InvalidSchedule(format!(
            "working interval {}-{} is empty",
            schedule.start_time.format("%H:%M"),
            schedule.end_time.format("%H:%M")
        )));
    }

    if schedule.is_available {
        Ok(Some(schedule))
    } else {
        Ok(None)
    }
}

fn falls_in_break(candidate: NaiveTime, day_of_week: u8, breaks: &[ScheduleBreak]) -> bool {
    // Break intervals are half-open: a slot starting exactly at the
    // break's end is fine.
    breaks.iter().any(|b| {
        b.day_of_week == day_of_week && b.start_time <= candidate && candidate < b.end_time
    })
}

fn is_taken(date: NaiveDate, candidate: NaiveTime, booked: &[BookedAppointment]) -> bool {
    booked.iter().any(|appointment| {
        appointment.status != AppointmentStatus::Cancelled
            && appointment.date.naive_utc().date() == date
            && appointment.date.naive_utc().time() == candidate
    })
}
