use tracing::{debug, warn};

use shared_models::AppointmentStatus;

use crate::models::AppointmentError;

/// Statuses an appointment may move to from `current`.
///
/// Pending visits get confirmed or cancelled; confirmed visits get
/// completed or cancelled. `Completed` and `Cancelled` are terminal.
pub fn valid_transitions(current: AppointmentStatus) -> &'static [AppointmentStatus] {
    use AppointmentStatus::*;
    match current {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[Completed, Cancelled],
        Completed | Cancelled => &[],
    }
}

/// Rejects illegal status transitions at the point of mutation,
/// before anything is sent to the backend. Writing the current status
/// back unchanged is a no-op and always allowed.
pub fn validate_transition(
    current: AppointmentStatus,
    next: AppointmentStatus,
) -> Result<(), AppointmentError> {
    if current == next {
        return Ok(());
    }

    if valid_transitions(current).contains(&next) {
        debug!("Status transition {} -> {}", current, next);
        Ok(())
    } else {
        warn!("Rejected status transition {} -> {}", current, next);
        Err(AppointmentError::InvalidTransition {
            from: current,
            to: next,
        })
    }
}

/// New appointments enter as `Pending`, or directly as `Confirmed`
/// (create and first transition collapsed into one booking).
pub fn validate_initial_status(status: AppointmentStatus) -> Result<(), AppointmentError> {
    match status {
        AppointmentStatus::Pending | AppointmentStatus::Confirmed => Ok(()),
        other => Err(AppointmentError::InvalidInitialStatus(other)),
    }
}
