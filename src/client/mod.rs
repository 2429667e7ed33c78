//! Seam between the wizard and the booking backend, plus the collaborator
//! hooks the surrounding page would normally provide.

pub mod dry_run;

use uuid::Uuid;

use crate::errors::AvailabilityError;
use crate::payload::{AvailabilityRuleInput, AvailabilityRuleUpdates};
use crate::rules::AvailabilityRule;

pub type Result<T> = std::result::Result<T, AvailabilityError>;

/// Path of the create endpoint for a listing's availability rules.
pub fn create_rule_path(listing_id: Uuid) -> String {
    format!("/listings/{listing_id}/availability_rules")
}

/// Path of the update endpoint for one availability rule.
pub fn update_rule_path(listing_id: Uuid, rule_id: Uuid) -> String {
    format!("/listings/{listing_id}/availability_rules/{rule_id}")
}

/// Abstraction over the booking backend's availability-rule endpoints.
///
/// Create is not idempotent (no client dedup key), so double-submit
/// protection stays on the caller's side of this trait.
pub trait BookingApi {
    fn create_rule(
        &mut self,
        listing_id: Uuid,
        input: &AvailabilityRuleInput,
    ) -> Result<AvailabilityRule>;

    fn update_rule(
        &mut self,
        listing_id: Uuid,
        rule_id: Uuid,
        updates: &AvailabilityRuleUpdates,
    ) -> Result<AvailabilityRule>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Toast/notification sink supplied by the embedding surface.
pub trait Notifier {
    fn notify(&mut self, kind: ToastKind, message: &str);
}

/// Invalidation hook for the cached rule list the surrounding page owns. The
/// wizard only signals completion; it never touches the cache itself.
pub trait RulesCacheHook {
    fn invalidate(&mut self, listing_id: Uuid);
}

/// Completion signal for a successful create or update: success toast first,
/// then cache invalidation for the listing's rule list.
pub fn complete_submission(
    notifier: &mut dyn Notifier,
    cache: &mut dyn RulesCacheHook,
    rule: &AvailabilityRule,
) {
    notifier.notify(ToastKind::Success, "Availability rule saved.");
    cache.invalidate(rule.listing_id);
}

/// Notifier that forwards to tracing; used where no UI sink is wired up.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => tracing::info!("{message}"),
            ToastKind::Error => tracing::warn!("{message}"),
        }
    }
}

pub struct NoopCacheHook;

impl RulesCacheHook for NoopCacheHook {
    fn invalidate(&mut self, _listing_id: Uuid) {}
}
