//! In-memory draft of one availability rule, plus its dirty-field set.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::rules::{AvailabilityRule, AvailabilityRuleType, AvailabilityType};

use super::slots::{TimeSlotDraft, TimeSlotList};

/// The rule fields an edit can touch. Update payloads carry exactly the
/// fields present in the wizard's dirty set, so the backend never clobbers
/// data the user did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleField {
    Name,
    RuleType,
    StartDate,
    EndDate,
    RecurringYears,
    RecurringMonths,
    TimeSlots,
}

/// Everything the wizard knows about the rule being authored or edited.
///
/// Held entirely in memory for the lifetime of the dialog and discarded on
/// submission or cancellation. Mutation goes through the setters below, which
/// merge into the draft and mark a field dirty only when its value actually
/// changed from what is currently held.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    listing_id: Uuid,
    availability_type: AvailabilityType,
    name: Option<String>,
    rule_type: Option<AvailabilityRuleType>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    recurring_years: Vec<i32>,
    recurring_months: Vec<u32>,
    weekdays: Vec<u8>,
    time_slots: TimeSlotList,
    dirty: BTreeSet<RuleField>,
}

impl WizardState {
    /// Empty draft for the "add rule" flow.
    pub fn create(listing_id: Uuid, availability_type: AvailabilityType) -> Self {
        Self {
            listing_id,
            availability_type,
            name: None,
            rule_type: None,
            start_date: None,
            end_date: None,
            recurring_years: Vec::new(),
            recurring_months: Vec::new(),
            weekdays: Vec::new(),
            time_slots: TimeSlotList::new(),
            dirty: BTreeSet::new(),
        }
    }

    /// Draft seeded from an existing rule for the "edit rule" flow. The dirty
    /// set starts empty; only subsequent edits mark fields.
    pub fn edit(availability_type: AvailabilityType, rule: &AvailabilityRule) -> Self {
        let mut state = Self::create(rule.listing_id, availability_type);
        state.name = Some(rule.name.clone());
        state.rule_type = Some(rule.rule_type);
        state.start_date = rule.start_date;
        state.end_date = rule.end_date;
        state.recurring_years = rule.recurring_years.clone();
        state.recurring_months = rule.recurring_months.clone();
        match availability_type {
            // Date-only rules persist their weekday narrowing as
            // day-of-week-only slot records.
            AvailabilityType::Date => {
                state.weekdays = rule
                    .time_slots
                    .iter()
                    .filter_map(|slot| slot.day_of_week)
                    .collect();
                state.weekdays.sort_unstable();
                state.weekdays.dedup();
            }
            AvailabilityType::Datetime => {
                for slot in &rule.time_slots {
                    state.time_slots.append(TimeSlotDraft {
                        day_of_week: slot.day_of_week,
                        start_time: slot.start_time,
                        capacity: slot.capacity,
                    });
                }
            }
        }
        state
    }

    pub fn listing_id(&self) -> Uuid {
        self.listing_id
    }

    pub fn availability_type(&self) -> AvailabilityType {
        self.availability_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rule_type(&self) -> Option<AvailabilityRuleType> {
        self.rule_type
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn recurring_years(&self) -> &[i32] {
        &self.recurring_years
    }

    pub fn recurring_months(&self) -> &[u32] {
        &self.recurring_months
    }

    pub fn weekdays(&self) -> &[u8] {
        &self.weekdays
    }

    pub fn time_slots(&self) -> &TimeSlotList {
        &self.time_slots
    }

    pub fn dirty(&self) -> &BTreeSet<RuleField> {
        &self.dirty
    }

    pub fn is_dirty(&self, field: RuleField) -> bool {
        self.dirty.contains(&field)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.name.as_deref() != Some(name.as_str()) {
            self.name = Some(name);
            self.dirty.insert(RuleField::Name);
        }
    }

    pub fn set_rule_type(&mut self, rule_type: AvailabilityRuleType) {
        if self.rule_type != Some(rule_type) {
            self.rule_type = Some(rule_type);
            self.dirty.insert(RuleField::RuleType);
        }
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        if self.start_date != Some(date) {
            self.start_date = Some(date);
            self.dirty.insert(RuleField::StartDate);
        }
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        if self.end_date != Some(date) {
            self.end_date = Some(date);
            self.dirty.insert(RuleField::EndDate);
        }
    }

    pub fn set_recurring_years(&mut self, years: Vec<i32>) {
        if self.recurring_years != years {
            self.recurring_years = years;
            self.dirty.insert(RuleField::RecurringYears);
        }
    }

    pub fn set_recurring_months(&mut self, months: Vec<u32>) {
        if self.recurring_months != months {
            self.recurring_months = months;
            self.dirty.insert(RuleField::RecurringMonths);
        }
    }

    /// Weekday narrowing for date-only rules. Empty means every applicable
    /// weekday; the substitution happens at payload assembly, never here.
    pub fn set_weekdays(&mut self, mut weekdays: Vec<u8>) {
        weekdays.sort_unstable();
        weekdays.dedup();
        if self.weekdays != weekdays {
            self.weekdays = weekdays;
            self.dirty.insert(RuleField::TimeSlots);
        }
    }

    pub fn append_slot(&mut self, draft: TimeSlotDraft) -> Uuid {
        self.dirty.insert(RuleField::TimeSlots);
        self.time_slots.append(draft)
    }

    pub fn update_slot(&mut self, index: usize, draft: TimeSlotDraft) -> bool {
        let changed = self.time_slots.update(index, draft);
        if changed {
            self.dirty.insert(RuleField::TimeSlots);
        }
        changed
    }

    pub fn remove_slot(&mut self, index: usize) -> Option<TimeSlotDraft> {
        let removed = self.time_slots.remove(index);
        if removed.is_some() {
            self.dirty.insert(RuleField::TimeSlots);
        }
        removed
    }
}
