//! Per-step validation. Each step only inspects its own slice of the draft,
//! and a failed check leaves the machine on the current step with no network
//! activity.

use std::fmt;

use crate::rules::AvailabilityType;

use super::state::WizardState;
use super::steps::RuleStep;

/// The wizard input a validation message is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    Name,
    RuleType,
    StartDate,
    EndDate,
    RecurringYears,
    RecurringMonths,
    Weekdays,
    Slot { index: usize, field: SlotField },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    DayOfWeek,
    StartTime,
    Capacity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldRef,
    pub message: String,
}

/// Validation outcome for one step: field-scoped messages bound to inputs,
/// plus an optional root message for structural failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepErrors {
    pub root: Option<String>,
    pub fields: Vec<FieldError>,
}

impl StepErrors {
    pub fn root_only(message: impl Into<String>) -> Self {
        Self {
            root: Some(message.into()),
            fields: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.fields.is_empty()
    }

    fn push(&mut self, field: FieldRef, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn into_result(self) -> Result<(), StepErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for StepErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(root) = &self.root {
            write!(f, "{root}")?;
            first = false;
        }
        for error in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Gate for a forward transition out of `step`.
pub fn validate_step(state: &WizardState, step: RuleStep) -> Result<(), StepErrors> {
    match step {
        RuleStep::Initial => validate_initial(state),
        RuleStep::SingleDate => validate_single_date(state),
        RuleStep::DateRange => validate_date_range(state),
        RuleStep::Recurring => validate_recurring(state),
        RuleStep::TimeSlots => validate_slots(state, true),
        RuleStep::SingleDayTimeSlots => validate_slots(state, false),
        RuleStep::Weekdays => validate_weekdays(state),
    }
}

fn validate_initial(state: &WizardState) -> Result<(), StepErrors> {
    let mut errors = StepErrors::default();
    if state.name().map_or(true, |name| name.trim().is_empty()) {
        errors.push(FieldRef::Name, "Name is required");
    }
    if state.rule_type().is_none() {
        errors.push(FieldRef::RuleType, "Choose how the rule repeats");
    }
    errors.into_result()
}

fn validate_single_date(state: &WizardState) -> Result<(), StepErrors> {
    let mut errors = StepErrors::default();
    if state.start_date().is_none() {
        errors.push(FieldRef::StartDate, "Select a date");
    }
    errors.into_result()
}

fn validate_date_range(state: &WizardState) -> Result<(), StepErrors> {
    let mut errors = StepErrors::default();
    match (state.start_date(), state.end_date()) {
        (None, None) => {
            errors.push(FieldRef::StartDate, "Select a start date");
            errors.push(FieldRef::EndDate, "Select an end date");
        }
        (None, Some(_)) => errors.push(FieldRef::StartDate, "Select a start date"),
        (Some(_), None) => errors.push(FieldRef::EndDate, "Select an end date"),
        (Some(from), Some(to)) => {
            if from > to {
                errors.push(FieldRef::EndDate, "End date must not be before the start date");
            }
        }
    }
    errors.into_result()
}

fn validate_recurring(state: &WizardState) -> Result<(), StepErrors> {
    let mut errors = StepErrors::default();
    if let Some(month) = state
        .recurring_months()
        .iter()
        .find(|month| !(1..=12).contains(*month))
    {
        errors.push(
            FieldRef::RecurringMonths,
            format!("{month} is not a valid month (use 1-12)"),
        );
    }
    if let Some(year) = state.recurring_years().iter().find(|year| **year < 0) {
        errors.push(
            FieldRef::RecurringYears,
            format!("{year} is not a valid year"),
        );
    }
    if state.availability_type() == AvailabilityType::Date {
        if let Some(day) = state.weekdays().iter().find(|day| **day > 6) {
            errors.push(FieldRef::Weekdays, format!("{day} is not a weekday"));
        }
    }
    errors.into_result()
}

fn validate_weekdays(state: &WizardState) -> Result<(), StepErrors> {
    let mut errors = StepErrors::default();
    if let Some(day) = state.weekdays().iter().find(|day| **day > 6) {
        errors.push(FieldRef::Weekdays, format!("{day} is not a weekday"));
    }
    errors.into_result()
}

fn validate_slots(state: &WizardState, needs_weekday: bool) -> Result<(), StepErrors> {
    let mut errors = StepErrors::default();
    if state.time_slots().is_empty() {
        errors.push(
            FieldRef::Slot {
                index: 0,
                field: SlotField::StartTime,
            },
            "Add at least one time slot",
        );
        return errors.into_result();
    }
    for (index, slot) in state.time_slots().iter().enumerate() {
        if needs_weekday {
            match slot.day_of_week {
                None => errors.push(
                    FieldRef::Slot {
                        index,
                        field: SlotField::DayOfWeek,
                    },
                    "Pick a weekday",
                ),
                Some(day) if day > 6 => errors.push(
                    FieldRef::Slot {
                        index,
                        field: SlotField::DayOfWeek,
                    },
                    format!("{day} is not a weekday"),
                ),
                Some(_) => {}
            }
        }
        if slot.start_time.is_none() {
            errors.push(
                FieldRef::Slot {
                    index,
                    field: SlotField::StartTime,
                },
                "Pick a start time",
            );
        }
        match slot.capacity {
            None => errors.push(
                FieldRef::Slot {
                    index,
                    field: SlotField::Capacity,
                },
                "Capacity is required",
            ),
            Some(0) => errors.push(
                FieldRef::Slot {
                    index,
                    field: SlotField::Capacity,
                },
                "Capacity must be at least 1",
            ),
            Some(_) => {}
        }
    }
    errors.into_result()
}
