//! The wizard state machine: one authoring session from first step to
//! submission, shared by the create and edit flows.

use thiserror::Error;
use uuid::Uuid;

use crate::client::BookingApi;
use crate::errors::AvailabilityError;
use crate::payload::{assemble_create, assemble_updates};
use crate::rules::{AvailabilityRule, AvailabilityType};

use super::state::WizardState;
use super::steps::{is_last_step, next_step, RuleStep};
use super::validate::{validate_step, StepErrors};

/// Result of asking the machine to move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Transitioned to the given step.
    Moved(RuleStep),
    /// Current step is terminal; the next action is `submit`.
    ReadyToSubmit,
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{0}")]
    Validation(StepErrors),
    #[error("A submission is already in flight")]
    Busy,
    #[error(transparent)]
    Api(#[from] AvailabilityError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WizardMode {
    Create,
    Edit { rule_id: Uuid },
}

/// Clears the in-flight flag on every exit path out of `submit`.
struct InFlightGuard<'a> {
    flag: &'a mut bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// Drives one availability-rule wizard session.
///
/// Holds the draft state, the current step, the history of forward edges
/// taken (so going back retraces exactly one edge without losing data), and
/// the in-flight flag that gates double submission.
pub struct Wizard {
    state: WizardState,
    step: RuleStep,
    history: Vec<RuleStep>,
    in_flight: bool,
    mode: WizardMode,
}

impl Wizard {
    pub fn create(listing_id: Uuid, availability_type: AvailabilityType) -> Self {
        Self {
            state: WizardState::create(listing_id, availability_type),
            step: RuleStep::Initial,
            history: Vec::new(),
            in_flight: false,
            mode: WizardMode::Create,
        }
    }

    pub fn edit(availability_type: AvailabilityType, rule: &AvailabilityRule) -> Self {
        Self {
            state: WizardState::edit(availability_type, rule),
            step: RuleStep::Initial,
            history: Vec::new(),
            in_flight: false,
            mode: WizardMode::Edit { rule_id: rule.id },
        }
    }

    pub fn step(&self) -> RuleStep {
        self.step
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// The single mutation channel. Step drivers merge their slice into the
    /// shared state through the setters on [`WizardState`], so navigating
    /// back and forth never drops sibling fields.
    pub fn state_mut(&mut self) -> &mut WizardState {
        &mut self.state
    }

    /// Whether submitting from the current step closes the wizard. False
    /// until a rule type has been chosen.
    pub fn is_last_step(&self) -> bool {
        match self.state.rule_type() {
            Some(rule_type) => {
                is_last_step(rule_type, self.state.availability_type(), self.step)
            }
            None => false,
        }
    }

    /// Validates the current step and, if it passes, takes the forward edge.
    /// On failure the machine stays put and reports the step's errors.
    pub fn advance(&mut self) -> Result<Advance, StepErrors> {
        validate_step(&self.state, self.step)?;
        let Some(rule_type) = self.state.rule_type() else {
            // The initial-step validator guarantees this; reaching it from a
            // later step is a logic defect, not a user error.
            return Err(StepErrors::root_only("Something went wrong"));
        };
        match next_step(rule_type, self.state.availability_type(), self.step) {
            Some(next) => {
                tracing::debug!(from = ?self.step, to = ?next, "wizard step forward");
                self.history.push(self.step);
                self.step = next;
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::ReadyToSubmit),
        }
    }

    /// Retraces the most recent forward edge. Previously entered data stays
    /// in the draft untouched. Returns `None` on the first step.
    pub fn retreat(&mut self) -> Option<RuleStep> {
        let prev = self.history.pop()?;
        tracing::debug!(from = ?self.step, to = ?prev, "wizard step back");
        self.step = prev;
        Some(prev)
    }

    /// Assembles the payload for the current mode and sends it through the
    /// booking-API seam. Validation failures never reach the API; a failed
    /// call leaves the wizard on the current step with the in-flight flag
    /// cleared so retry is a manual action.
    pub fn submit<A: BookingApi + ?Sized>(
        &mut self,
        api: &mut A,
    ) -> Result<AvailabilityRule, WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        validate_step(&self.state, self.step).map_err(WizardError::Validation)?;
        if !self.is_last_step() {
            return Err(WizardError::Validation(StepErrors::root_only(
                "This step is not a submission point",
            )));
        }

        self.in_flight = true;
        let _guard = InFlightGuard {
            flag: &mut self.in_flight,
        };

        let listing_id = self.state.listing_id();
        let result = match self.mode {
            WizardMode::Create => {
                let input = assemble_create(&self.state)?;
                tracing::info!(%listing_id, "creating availability rule");
                api.create_rule(listing_id, &input)
            }
            WizardMode::Edit { rule_id } => {
                let updates = assemble_updates(&self.state)?;
                tracing::info!(%listing_id, %rule_id, "updating availability rule");
                api.update_rule(listing_id, rule_id, &updates)
            }
        };
        result.map_err(WizardError::Api)
    }
}
