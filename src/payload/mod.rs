//! Pure projection of a completed wizard draft into the request bodies the
//! booking backend accepts.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::errors::AvailabilityError;
use crate::rules::{
    weekdays_in_range, AvailabilityRuleType, AvailabilityType, TimeSlotRecord, ALL_WEEKDAYS,
};
use crate::wizard::state::{RuleField, WizardState};

/// Body of `POST /listings/:listingID/availability_rules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRuleInput {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: AvailabilityRuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_years: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_months: Option<Vec<u32>>,
    pub time_slots: Vec<TimeSlotRecord>,
}

/// Body of `PATCH /listings/:listingID/availability_rules/:availabilityRuleID`.
///
/// Presence of a key means "replace this field", so only dirty fields may
/// ever be filled in. Everything else stays off the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRuleUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<AvailabilityRuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_years: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_months: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slots: Option<Vec<TimeSlotRecord>>,
}

impl AvailabilityRuleUpdates {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.rule_type.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.recurring_years.is_none()
            && self.recurring_months.is_none()
            && self.time_slots.is_none()
    }
}

/// Calendar date of a zoned moment as the user saw it on their wall clock.
///
/// The offset is discarded after reading the local components, so a date
/// picked as March 5 serializes as March 5 in every timezone, including
/// negative UTC offsets.
pub fn wall_clock_date<Tz: TimeZone>(moment: &DateTime<Tz>) -> NaiveDate {
    moment.naive_local().date()
}

/// Time-of-day of a zoned moment, independent of its date. Carries only
/// hour/minute/second semantics for the `HH:MM:SS` wire format.
pub fn wall_clock_time<Tz: TimeZone>(moment: &DateTime<Tz>) -> NaiveTime {
    moment.naive_local().time()
}

/// Weekdays a date-only rule resolves to. An empty narrowing selection means
/// "every applicable weekday": the days actually present in a fixed range,
/// or all seven for an unconstrained recurrence. An empty list is never put
/// on the wire, because that would mean "no availability".
fn resolved_weekdays(state: &WizardState, rule_type: AvailabilityRuleType) -> Vec<u8> {
    if !state.weekdays().is_empty() {
        return state.weekdays().to_vec();
    }
    match (rule_type, state.start_date(), state.end_date()) {
        (AvailabilityRuleType::FixedRange, Some(from), Some(to)) => weekdays_in_range(from, to),
        _ => ALL_WEEKDAYS.to_vec(),
    }
}

fn slots_from_drafts(
    state: &WizardState,
    with_weekday: bool,
) -> Result<Vec<TimeSlotRecord>, AvailabilityError> {
    state
        .time_slots()
        .iter()
        .map(|draft| {
            let start_time = draft.start_time.ok_or_else(|| {
                AvailabilityError::Inconsistent("time slot has no start time".into())
            })?;
            let capacity = draft.capacity.ok_or_else(|| {
                AvailabilityError::Inconsistent("time slot has no capacity".into())
            })?;
            let day_of_week = if with_weekday {
                Some(draft.day_of_week.ok_or_else(|| {
                    AvailabilityError::Inconsistent("time slot has no weekday".into())
                })?)
            } else {
                None
            };
            Ok(TimeSlotRecord {
                day_of_week,
                start_time: Some(start_time),
                capacity: Some(capacity),
            })
        })
        .collect()
}

/// Wire time slots for the draft. Date-only listings get synthetic records
/// (the backend needs at least one slot record to represent "available that
/// day"); datetime listings get the drafts collected by the slot steps.
fn assemble_time_slots(
    state: &WizardState,
    rule_type: AvailabilityRuleType,
) -> Result<Vec<TimeSlotRecord>, AvailabilityError> {
    match (state.availability_type(), rule_type) {
        (AvailabilityType::Date, AvailabilityRuleType::FixedDate) => {
            Ok(vec![TimeSlotRecord::default()])
        }
        (AvailabilityType::Date, _) => Ok(resolved_weekdays(state, rule_type)
            .into_iter()
            .map(|day| TimeSlotRecord {
                day_of_week: Some(day),
                ..Default::default()
            })
            .collect()),
        (AvailabilityType::Datetime, AvailabilityRuleType::FixedDate) => {
            slots_from_drafts(state, false)
        }
        (AvailabilityType::Datetime, _) => slots_from_drafts(state, true),
    }
}

fn required_name(state: &WizardState) -> Result<String, AvailabilityError> {
    state
        .name()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AvailabilityError::Inconsistent("rule name missing".into()))
}

fn required_rule_type(state: &WizardState) -> Result<AvailabilityRuleType, AvailabilityError> {
    state
        .rule_type()
        .ok_or_else(|| AvailabilityError::Inconsistent("rule type missing".into()))
}

/// Complete create payload for the draft. Failing here means an earlier step
/// let an invariant through, which the caller surfaces as a root error.
pub fn assemble_create(state: &WizardState) -> Result<AvailabilityRuleInput, AvailabilityError> {
    let name = required_name(state)?;
    let rule_type = required_rule_type(state)?;

    let (start_date, end_date, recurring_years, recurring_months) = match rule_type {
        AvailabilityRuleType::FixedDate => {
            let start = state.start_date().ok_or_else(|| {
                AvailabilityError::Inconsistent("fixed-date rule has no date".into())
            })?;
            (Some(start), None, None, None)
        }
        AvailabilityRuleType::FixedRange => {
            let start = state.start_date().ok_or_else(|| {
                AvailabilityError::Inconsistent("range rule has no start date".into())
            })?;
            let end = state.end_date().ok_or_else(|| {
                AvailabilityError::Inconsistent("range rule has no end date".into())
            })?;
            (Some(start), Some(end), None, None)
        }
        AvailabilityRuleType::Recurring => (
            None,
            None,
            Some(state.recurring_years().to_vec()),
            Some(state.recurring_months().to_vec()),
        ),
    };

    Ok(AvailabilityRuleInput {
        name,
        rule_type,
        start_date,
        end_date,
        recurring_years,
        recurring_months,
        time_slots: assemble_time_slots(state, rule_type)?,
    })
}

/// Sparse update payload: exactly the draft's dirty fields, never more.
pub fn assemble_updates(
    state: &WizardState,
) -> Result<AvailabilityRuleUpdates, AvailabilityError> {
    let mut updates = AvailabilityRuleUpdates::default();
    for field in state.dirty() {
        match field {
            RuleField::Name => updates.name = Some(required_name(state)?),
            RuleField::RuleType => updates.rule_type = Some(required_rule_type(state)?),
            RuleField::StartDate => updates.start_date = state.start_date(),
            RuleField::EndDate => updates.end_date = state.end_date(),
            RuleField::RecurringYears => {
                updates.recurring_years = Some(state.recurring_years().to_vec());
            }
            RuleField::RecurringMonths => {
                updates.recurring_months = Some(state.recurring_months().to_vec());
            }
            RuleField::TimeSlots => {
                let rule_type = required_rule_type(state)?;
                updates.time_slots = Some(assemble_time_slots(state, rule_type)?);
            }
        }
    }
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::TimeSlotDraft;
    use chrono::FixedOffset;
    use serde_json::json;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn wall_clock_date_survives_negative_offsets() {
        // 23:30 on March 5 in UTC-8 is already March 6 in UTC; the user still
        // picked March 5.
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        let moment = tz.with_ymd_and_hms(2025, 3, 5, 23, 30, 0).unwrap();
        assert_eq!(wall_clock_date(&moment), date(2025, 3, 5));
        assert_eq!(moment.naive_utc().date(), date(2025, 3, 6));
    }

    #[test]
    fn wall_clock_date_survives_positive_offsets() {
        let tz = FixedOffset::east_opt(13 * 3600).unwrap();
        let moment = tz.with_ymd_and_hms(2025, 3, 5, 0, 15, 0).unwrap();
        assert_eq!(wall_clock_date(&moment), date(2025, 3, 5));
        assert_eq!(moment.naive_utc().date(), date(2025, 3, 4));
    }

    #[test]
    fn wall_clock_time_keeps_only_the_time_of_day() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let moment = tz.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
        assert_eq!(
            wall_clock_time(&moment),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn fixed_date_on_date_listing_gets_one_synthetic_slot() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Date);
        state.set_name("Open day");
        state.set_rule_type(AvailabilityRuleType::FixedDate);
        state.set_start_date(date(2025, 6, 1));

        let input = assemble_create(&state).unwrap();
        let wire = serde_json::to_value(&input).unwrap();
        assert_eq!(
            wire,
            json!({
                "name": "Open day",
                "type": "fixed_date",
                "start_date": "2025-06-01",
                "time_slots": [{}],
            })
        );
    }

    #[test]
    fn recurring_datetime_scenario_matches_the_wire_contract() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Datetime);
        state.set_name("Morning tour");
        state.set_rule_type(AvailabilityRuleType::Recurring);
        state.set_recurring_years(vec![]);
        state.set_recurring_months(vec![6, 7]);
        state.append_slot(TimeSlotDraft {
            day_of_week: Some(2),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            capacity: Some(4),
        });

        let wire = serde_json::to_value(assemble_create(&state).unwrap()).unwrap();
        assert_eq!(
            wire,
            json!({
                "name": "Morning tour",
                "type": "recurring",
                "recurring_years": [],
                "recurring_months": [6, 7],
                "time_slots": [
                    {"day_of_week": 2, "start_time": "09:00:00", "capacity": 4}
                ],
            })
        );
    }

    #[test]
    fn empty_weekdays_fill_from_the_range() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Date);
        state.set_name("Season");
        state.set_rule_type(AvailabilityRuleType::FixedRange);
        // Monday through Sunday.
        state.set_start_date(date(2025, 6, 2));
        state.set_end_date(date(2025, 6, 8));

        let input = assemble_create(&state).unwrap();
        let days: Vec<_> = input
            .time_slots
            .iter()
            .map(|slot| slot.day_of_week.unwrap())
            .collect();
        assert_eq!(days, ALL_WEEKDAYS.to_vec());
        assert!(input.time_slots.iter().all(|slot| slot.start_time.is_none()));
    }

    #[test]
    fn short_range_fills_only_present_weekdays() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Date);
        state.set_name("Season");
        state.set_rule_type(AvailabilityRuleType::FixedRange);
        // Monday through Wednesday.
        state.set_start_date(date(2025, 6, 2));
        state.set_end_date(date(2025, 6, 4));

        let input = assemble_create(&state).unwrap();
        let days: Vec<_> = input
            .time_slots
            .iter()
            .map(|slot| slot.day_of_week.unwrap())
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn explicit_weekday_narrowing_is_respected() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Date);
        state.set_name("Season");
        state.set_rule_type(AvailabilityRuleType::FixedRange);
        state.set_start_date(date(2025, 6, 2));
        state.set_end_date(date(2025, 6, 8));
        state.set_weekdays(vec![1, 3]);

        let input = assemble_create(&state).unwrap();
        let days: Vec<_> = input
            .time_slots
            .iter()
            .map(|slot| slot.day_of_week.unwrap())
            .collect();
        assert_eq!(days, vec![1, 3]);
    }

    #[test]
    fn unconstrained_recurring_date_rule_gets_all_seven_weekdays() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Date);
        state.set_name("Every day");
        state.set_rule_type(AvailabilityRuleType::Recurring);

        let input = assemble_create(&state).unwrap();
        assert_eq!(input.time_slots.len(), 7);
    }

    #[test]
    fn name_only_edit_produces_a_single_key() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Date);
        state.set_name("Base");
        state.set_rule_type(AvailabilityRuleType::FixedRange);
        state.set_start_date(date(2025, 6, 1));
        state.set_end_date(date(2025, 6, 30));
        // Simulate a loaded rule: forget everything entered so far.
        let rule = crate::rules::AvailabilityRule {
            id: Uuid::new_v4(),
            listing_id: state.listing_id(),
            name: "Base".into(),
            rule_type: AvailabilityRuleType::FixedRange,
            start_date: Some(date(2025, 6, 1)),
            end_date: Some(date(2025, 6, 30)),
            recurring_years: vec![],
            recurring_months: vec![],
            time_slots: vec![],
        };
        let mut loaded = WizardState::edit(AvailabilityType::Date, &rule);
        loaded.set_name("Renamed");

        let updates = assemble_updates(&loaded).unwrap();
        let wire = serde_json::to_value(&updates).unwrap();
        assert_eq!(wire, json!({"name": "Renamed"}));
    }

    #[test]
    fn untouched_edit_serializes_to_an_empty_object() {
        let rule = crate::rules::AvailabilityRule {
            id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            name: "Base".into(),
            rule_type: AvailabilityRuleType::FixedDate,
            start_date: Some(date(2025, 6, 1)),
            end_date: None,
            recurring_years: vec![],
            recurring_months: vec![],
            time_slots: vec![],
        };
        let state = WizardState::edit(AvailabilityType::Date, &rule);
        let updates = assemble_updates(&state).unwrap();
        assert!(updates.is_empty());
        assert_eq!(serde_json::to_string(&updates).unwrap(), "{}");
    }

    #[test]
    fn missing_name_is_an_internal_consistency_error() {
        let mut state = WizardState::create(Uuid::new_v4(), AvailabilityType::Date);
        state.set_rule_type(AvailabilityRuleType::FixedDate);
        state.set_start_date(date(2025, 6, 1));
        let err = assemble_create(&state).unwrap_err();
        assert!(matches!(err, AvailabilityError::Inconsistent(_)));
    }
}
