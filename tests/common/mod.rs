//! Shared support for the integration suites: a recording booking-API mock
//! and collaborator spies.

use availability_core::client::{BookingApi, Notifier, RulesCacheHook, ToastKind};
use availability_core::errors::AvailabilityError;
use availability_core::payload::{AvailabilityRuleInput, AvailabilityRuleUpdates};
use availability_core::rules::{AvailabilityRule, AvailabilityRuleType};
use uuid::Uuid;

#[derive(Default)]
pub struct RecordingApi {
    pub creates: Vec<(Uuid, AvailabilityRuleInput)>,
    pub updates: Vec<(Uuid, Uuid, AvailabilityRuleUpdates)>,
    pub fail_with: Option<(u16, String)>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            fail_with: Some((status, message.into())),
            ..Self::default()
        }
    }

    fn failure(&self) -> Option<AvailabilityError> {
        self.fail_with
            .as_ref()
            .map(|(status, message)| AvailabilityError::Backend {
                status: *status,
                message: message.clone(),
            })
    }
}

impl BookingApi for RecordingApi {
    fn create_rule(
        &mut self,
        listing_id: Uuid,
        input: &AvailabilityRuleInput,
    ) -> Result<AvailabilityRule, AvailabilityError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.creates.push((listing_id, input.clone()));
        Ok(AvailabilityRule {
            id: Uuid::new_v4(),
            listing_id,
            name: input.name.clone(),
            rule_type: input.rule_type,
            start_date: input.start_date,
            end_date: input.end_date,
            recurring_years: input.recurring_years.clone().unwrap_or_default(),
            recurring_months: input.recurring_months.clone().unwrap_or_default(),
            time_slots: input.time_slots.clone(),
        })
    }

    fn update_rule(
        &mut self,
        listing_id: Uuid,
        rule_id: Uuid,
        updates: &AvailabilityRuleUpdates,
    ) -> Result<AvailabilityRule, AvailabilityError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.updates.push((listing_id, rule_id, updates.clone()));
        Ok(AvailabilityRule {
            id: rule_id,
            listing_id,
            name: updates.name.clone().unwrap_or_default(),
            rule_type: updates.rule_type.unwrap_or(AvailabilityRuleType::FixedDate),
            start_date: updates.start_date,
            end_date: updates.end_date,
            recurring_years: updates.recurring_years.clone().unwrap_or_default(),
            recurring_months: updates.recurring_months.clone().unwrap_or_default(),
            time_slots: updates.time_slots.clone().unwrap_or_default(),
        })
    }
}

#[derive(Default)]
pub struct SpyNotifier {
    pub toasts: Vec<(ToastKind, String)>,
}

impl Notifier for SpyNotifier {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        self.toasts.push((kind, message.to_string()));
    }
}

#[derive(Default)]
pub struct SpyCacheHook {
    pub invalidated: Vec<Uuid>,
}

impl RulesCacheHook for SpyCacheHook {
    fn invalidate(&mut self, listing_id: Uuid) {
        self.invalidated.push(listing_id);
    }
}
