//! Step catalogue and transition logic for the availability-rule wizard.
//!
//! The forward edge is computed from the chosen rule type and the listing's
//! availability type rather than stored as a static table, and is shared by
//! the create and edit flows so the two can never drift apart.

use crate::rules::{AvailabilityRuleType, AvailabilityType};

/// One screen of the availability-rule wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStep {
    /// Name + rule-type selection.
    Initial,
    /// One concrete date.
    SingleDate,
    /// Inclusive from/to dates.
    DateRange,
    /// Year/month recurrence, with inline weekday narrowing for date-only
    /// listings.
    Recurring,
    /// Weekday time slots (day of week + start time + capacity).
    TimeSlots,
    /// Time slots for a pinned date (start time + capacity, no weekday).
    SingleDayTimeSlots,
    /// Optional weekday narrowing for a date-only range.
    Weekdays,
}

/// Display copy for a step. Kept as data, separate from the transition
/// function, so rendering layers can consume it without owning control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
}

pub fn step_info(step: RuleStep) -> StepInfo {
    match step {
        RuleStep::Initial => StepInfo {
            title: "New availability rule",
            subtitle: Some("Name the rule and choose how it repeats."),
        },
        RuleStep::SingleDate => StepInfo {
            title: "Select a date",
            subtitle: None,
        },
        RuleStep::DateRange => StepInfo {
            title: "Select a date range",
            subtitle: None,
        },
        RuleStep::Recurring => StepInfo {
            title: "Set the recurrence",
            subtitle: Some("Leave years or months empty to include every one."),
        },
        RuleStep::TimeSlots => StepInfo {
            title: "Add time slots",
            subtitle: Some("Each slot needs a weekday, a start time, and a capacity."),
        },
        RuleStep::SingleDayTimeSlots => StepInfo {
            title: "Add time slots",
            subtitle: Some("Each slot needs a start time and a capacity."),
        },
        RuleStep::Weekdays => StepInfo {
            title: "Narrow the weekdays",
            subtitle: Some("Leave empty to make every day in the range available."),
        },
    }
}

/// Forward edge of the wizard. `None` means the current step is where the
/// flow submits and closes.
pub fn next_step(
    rule_type: AvailabilityRuleType,
    availability: AvailabilityType,
    step: RuleStep,
) -> Option<RuleStep> {
    match step {
        RuleStep::Initial => Some(match rule_type {
            AvailabilityRuleType::FixedDate => RuleStep::SingleDate,
            AvailabilityRuleType::FixedRange => RuleStep::DateRange,
            AvailabilityRuleType::Recurring => RuleStep::Recurring,
        }),
        RuleStep::SingleDate => match availability {
            AvailabilityType::Datetime => Some(RuleStep::SingleDayTimeSlots),
            AvailabilityType::Date => None,
        },
        RuleStep::DateRange => match availability {
            AvailabilityType::Datetime => Some(RuleStep::TimeSlots),
            AvailabilityType::Date => Some(RuleStep::Weekdays),
        },
        RuleStep::Recurring => match availability {
            AvailabilityType::Datetime => Some(RuleStep::TimeSlots),
            AvailabilityType::Date => None,
        },
        RuleStep::TimeSlots | RuleStep::SingleDayTimeSlots | RuleStep::Weekdays => None,
    }
}

/// Backward edge, recomputed deterministically from the rule type. The
/// machine itself walks its history stack; this exists so the two can be
/// checked against each other.
pub fn prev_step(rule_type: AvailabilityRuleType, step: RuleStep) -> Option<RuleStep> {
    match step {
        RuleStep::Initial => None,
        RuleStep::SingleDate | RuleStep::DateRange | RuleStep::Recurring => Some(RuleStep::Initial),
        RuleStep::SingleDayTimeSlots => Some(RuleStep::SingleDate),
        RuleStep::Weekdays => Some(RuleStep::DateRange),
        RuleStep::TimeSlots => Some(match rule_type {
            AvailabilityRuleType::FixedRange => RuleStep::DateRange,
            _ => RuleStep::Recurring,
        }),
    }
}

/// Whether submitting from this step terminates the flow.
pub fn is_last_step(
    rule_type: AvailabilityRuleType,
    availability: AvailabilityType,
    step: RuleStep,
) -> bool {
    next_step(rule_type, availability, step).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use AvailabilityRuleType::{FixedDate, FixedRange, Recurring};
    use AvailabilityType::{Date, Datetime};

    #[test]
    fn initial_branches_on_rule_type() {
        assert_eq!(
            next_step(FixedDate, Date, RuleStep::Initial),
            Some(RuleStep::SingleDate)
        );
        assert_eq!(
            next_step(FixedRange, Date, RuleStep::Initial),
            Some(RuleStep::DateRange)
        );
        assert_eq!(
            next_step(Recurring, Date, RuleStep::Initial),
            Some(RuleStep::Recurring)
        );
    }

    #[test]
    fn date_only_single_date_submits_directly() {
        assert!(is_last_step(FixedDate, Date, RuleStep::SingleDate));
        assert_eq!(
            next_step(FixedDate, Datetime, RuleStep::SingleDate),
            Some(RuleStep::SingleDayTimeSlots)
        );
    }

    #[test]
    fn date_only_range_narrows_weekdays() {
        assert_eq!(
            next_step(FixedRange, Date, RuleStep::DateRange),
            Some(RuleStep::Weekdays)
        );
        assert_eq!(
            next_step(FixedRange, Datetime, RuleStep::DateRange),
            Some(RuleStep::TimeSlots)
        );
    }

    #[test]
    fn recurring_terminates_or_collects_slots() {
        assert!(is_last_step(Recurring, Date, RuleStep::Recurring));
        assert_eq!(
            next_step(Recurring, Datetime, RuleStep::Recurring),
            Some(RuleStep::TimeSlots)
        );
    }

    #[test]
    fn slot_and_weekday_steps_are_terminal() {
        for availability in [Date, Datetime] {
            assert!(is_last_step(FixedRange, availability, RuleStep::TimeSlots));
            assert!(is_last_step(FixedDate, availability, RuleStep::SingleDayTimeSlots));
            assert!(is_last_step(FixedRange, availability, RuleStep::Weekdays));
        }
    }

    #[test]
    fn prev_step_inverts_every_forward_edge() {
        for rule_type in AvailabilityRuleType::ALL {
            for availability in [Date, Datetime] {
                for step in [
                    RuleStep::Initial,
                    RuleStep::SingleDate,
                    RuleStep::DateRange,
                    RuleStep::Recurring,
                ] {
                    if let Some(next) = next_step(rule_type, availability, step) {
                        assert_eq!(
                            prev_step(rule_type, next),
                            Some(step),
                            "{rule_type:?}/{availability:?}: {step:?} -> {next:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn every_step_has_a_title() {
        for step in [
            RuleStep::Initial,
            RuleStep::SingleDate,
            RuleStep::DateRange,
            RuleStep::Recurring,
            RuleStep::TimeSlots,
            RuleStep::SingleDayTimeSlots,
            RuleStep::Weekdays,
        ] {
            assert!(!step_info(step).title.is_empty());
        }
    }
}
