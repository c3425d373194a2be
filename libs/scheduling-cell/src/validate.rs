use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::models::{ScheduleBreak, WeeklySchedule};

/// Returned whole whenever any part of a weekly plan is inconsistent.
/// The message stays generic on purpose; the specifics only go to the
/// logs. Saving is all-or-nothing, so one conflict rejects the set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Schedule and breaks have conflicting hours; nothing was saved")]
pub struct PlanConflict;

/// Validates a complete schedule+breaks set before it replaces the
/// specialist's active plan. Checks, across the whole set: every
/// schedule entry is well-formed with at most one per weekday, every
/// break lies inside its weekday's working interval, and no two breaks
/// on the same weekday overlap.
pub fn validate_weekly_plan(
    schedules: &[WeeklySchedule],
    breaks: &[ScheduleBreak],
) -> Result<(), PlanConflict> {
    let mut by_day: HashMap<u8, &WeeklySchedule> = HashMap::new();

    for entry in schedules {
        if entry.day_of_week > 6 {
            warn!("Plan rejected: day_of_week {} is out of range", entry.day_of_week);
            return Err(PlanConflict);
        }
        if entry.start_time >= entry.end_time {
            warn!(
                "Plan rejected: empty working interval {}-{} on day {}",
                entry.start_time, entry.end_time, entry.day_of_week
            );
            return Err(PlanConflict);
        }
        if by_day.insert(entry.day_of_week, entry).is_some() {
            warn!(
                "Plan rejected: more than one schedule entry for day {}",
                entry.day_of_week
            );
            return Err(PlanConflict);
        }
    }

    for (index, b) in breaks.iter().enumerate() {
        if b.start_time >= b.end_time {
            warn!(
                "Plan rejected: empty break interval {}-{} on day {}",
                b.start_time, b.end_time, b.day_of_week
            );
            return Err(PlanConflict);
        }

        // A break on a day without usable working hours cannot lie
        // inside them.
        let working = match by_day.get(&b.day_of_week).filter(|s| s.is_available) {
            Some(working) => working,
            None => {
                warn!(
                    "Plan rejected: break on day {} which has no working hours",
                    b.day_of_week
                );
                return Err(PlanConflict);
            }
        };

        if b.start_time < working.start_time || b.end_time > working.end_time {
            warn!(
                "Plan rejected: break {}-{} exceeds working interval {}-{} on day {}",
                b.start_time, b.end_time, working.start_time, working.end_time, b.day_of_week
            );
            return Err(PlanConflict);
        }

        for other in &breaks[index + 1..] {
            if other.day_of_week == b.day_of_week
                && b.start_time < other.end_time
                && b.end_time > other.start_time
            {
                warn!("Plan rejected: overlapping breaks on day {}", b.day_of_week);
                return Err(PlanConflict);
            }
        }
    }

    Ok(())
}
