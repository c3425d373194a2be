pub mod cache;
pub mod models;
pub mod service;
pub mod slots;
pub mod validate;

pub use cache::AvailabilityCache;
pub use models::{
    BookedAppointment, DayAvailability, DaySlots, EmptyDayReason, ScheduleBreak, SchedulingError,
    SlotCheck, SlotUnavailableReason, WeeklySchedule,
};
pub use service::AvailabilityService;
pub use slots::{check_slot, compute_day_slots, SLOT_STEP_MINUTES};
pub use validate::{validate_weekly_plan, PlanConflict};
