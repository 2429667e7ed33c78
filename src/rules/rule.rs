use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_slot::TimeSlotRecord;

/// How a listing is booked: whole days, or specific start times within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityType {
    Date,
    Datetime,
}

impl AvailabilityType {
    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityType::Date => "Full day",
            AvailabilityType::Datetime => "Specific start times",
        }
    }
}

/// Shape of an availability rule: one date, a date range, or a recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityRuleType {
    FixedDate,
    FixedRange,
    Recurring,
}

impl AvailabilityRuleType {
    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityRuleType::FixedDate => "Single date",
            AvailabilityRuleType::FixedRange => "Date range",
            AvailabilityRuleType::Recurring => "Recurring",
        }
    }

    pub const ALL: [AvailabilityRuleType; 3] = [
        AvailabilityRuleType::FixedDate,
        AvailabilityRuleType::FixedRange,
        AvailabilityRuleType::Recurring,
    ];
}

/// Durable backend record describing when a listing is bookable.
///
/// The wizard never stores this client-side; it only seeds the edit flow from
/// one and parses one back out of create/update responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: AvailabilityRuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurring_years: Vec<i32>,
    #[serde(default)]
    pub recurring_months: Vec<u32>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlotRecord>,
}
