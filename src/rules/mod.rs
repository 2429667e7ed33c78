pub mod rule;
pub mod time_slot;

pub use rule::{AvailabilityRule, AvailabilityRuleType, AvailabilityType};
pub use time_slot::{
    day_of_week, weekday_label, weekdays_in_range, TimeSlotRecord, ALL_WEEKDAYS,
};
