//! The multi-step availability-rule wizard: draft state, step transitions,
//! per-step validation, and the time-slot editor.

pub mod machine;
pub mod slots;
pub mod state;
pub mod steps;
pub mod validate;

pub use machine::{Advance, Wizard, WizardError};
pub use slots::{TimeSlotDraft, TimeSlotList};
pub use state::{RuleField, WizardState};
pub use steps::{is_last_step, next_step, prev_step, step_info, RuleStep, StepInfo};
pub use validate::{validate_step, FieldError, FieldRef, SlotField, StepErrors};
