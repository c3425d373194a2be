pub mod test_utils;
pub mod time;

pub use time::{format_hhmm, weekday_index};
