//! Interactive driver that walks the wizard machine step by step. All rule
//! semantics live in the library; this module only collects input and
//! renders step copy, errors, and the pre-submission review.

use chrono::{NaiveDate, NaiveTime};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use uuid::Uuid;

use crate::client::{BookingApi, Notifier, RulesCacheHook, ToastKind};
use crate::rules::{
    weekday_label, AvailabilityRule, AvailabilityRuleType, AvailabilityType, ALL_WEEKDAYS,
};
use crate::wizard::{step_info, Advance, RuleStep, StepErrors, TimeSlotDraft, Wizard, WizardError};

use super::{output, CommandError};

const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Notifier that renders toasts through the CLI output helpers.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => output::success(message),
            ToastKind::Error => output::error(message),
        }
    }
}

/// Cache hook that only logs; the CLI has no rule list to refresh.
pub struct LoggingCacheHook;

impl RulesCacheHook for LoggingCacheHook {
    fn invalidate(&mut self, listing_id: Uuid) {
        tracing::debug!(%listing_id, "rule cache invalidated");
    }
}

/// What a step prompt resolved to.
enum StepAction {
    Filled,
    Back,
    Cancel,
}

enum TextEntry<T> {
    Value(T),
    Back,
    Cancel,
}

fn print_step_errors(errors: &StepErrors) {
    if let Some(root) = &errors.root {
        output::error(root);
    }
    for error in &errors.fields {
        output::warning(&error.message);
    }
}

pub struct WizardRunner<'a> {
    api: &'a mut dyn BookingApi,
    notifier: &'a mut dyn Notifier,
    cache: &'a mut dyn RulesCacheHook,
    theme: ColorfulTheme,
}

impl<'a> WizardRunner<'a> {
    pub fn new(
        api: &'a mut dyn BookingApi,
        notifier: &'a mut dyn Notifier,
        cache: &'a mut dyn RulesCacheHook,
    ) -> Self {
        Self {
            api,
            notifier,
            cache,
            theme: ColorfulTheme::default(),
        }
    }

    /// Runs the "add rule" flow. Returns `None` when the user cancelled.
    pub fn run_create(
        &mut self,
        listing_id: Uuid,
        availability_type: AvailabilityType,
    ) -> Result<Option<AvailabilityRule>, CommandError> {
        self.run(Wizard::create(listing_id, availability_type))
    }

    /// Runs the "edit rule" flow seeded from an existing rule.
    pub fn run_edit(
        &mut self,
        availability_type: AvailabilityType,
        rule: &AvailabilityRule,
    ) -> Result<Option<AvailabilityRule>, CommandError> {
        self.run(Wizard::edit(availability_type, rule))
    }

    fn run(&mut self, mut wizard: Wizard) -> Result<Option<AvailabilityRule>, CommandError> {
        loop {
            let info = step_info(wizard.step());
            output::section(info.title);
            if let Some(subtitle) = info.subtitle {
                output::detail(subtitle);
            }

            let action = match wizard.step() {
                RuleStep::Initial => self.prompt_initial(&mut wizard)?,
                RuleStep::SingleDate => self.prompt_single_date(&mut wizard)?,
                RuleStep::DateRange => self.prompt_date_range(&mut wizard)?,
                RuleStep::Recurring => self.prompt_recurring(&mut wizard)?,
                RuleStep::Weekdays => self.prompt_weekdays(&mut wizard)?,
                RuleStep::TimeSlots => self.prompt_slots(&mut wizard, true)?,
                RuleStep::SingleDayTimeSlots => self.prompt_slots(&mut wizard, false)?,
            };

            match action {
                StepAction::Cancel => {
                    output::info("Availability rule discarded.");
                    return Ok(None);
                }
                StepAction::Back => {
                    if wizard.retreat().is_none() {
                        output::warning("Already at the first step.");
                    }
                    continue;
                }
                StepAction::Filled => {}
            }

            match wizard.advance() {
                Err(errors) => print_step_errors(&errors),
                Ok(Advance::Moved(_)) => {}
                Ok(Advance::ReadyToSubmit) => {
                    if !self.confirm_submission(&wizard)? {
                        continue;
                    }
                    match wizard.submit(&mut *self.api) {
                        Ok(rule) => {
                            crate::client::complete_submission(
                                &mut *self.notifier,
                                &mut *self.cache,
                                &rule,
                            );
                            return Ok(Some(rule));
                        }
                        Err(WizardError::Validation(errors)) => print_step_errors(&errors),
                        Err(WizardError::Busy) => {
                            output::warning("A submission is already in flight.");
                        }
                        Err(WizardError::Api(err)) => {
                            self.notifier.notify(ToastKind::Error, &err.to_string());
                        }
                    }
                }
            }
        }
    }

    fn prompt_initial(&mut self, wizard: &mut Wizard) -> Result<StepAction, CommandError> {
        let current = wizard.state().name().map(str::to_owned);
        match self.prompt_text("Rule name", current)? {
            TextEntry::Value(name) => wizard.state_mut().set_name(name),
            TextEntry::Back => return Ok(StepAction::Back),
            TextEntry::Cancel => return Ok(StepAction::Cancel),
        }

        let mut items: Vec<String> = AvailabilityRuleType::ALL
            .iter()
            .map(|rule_type| rule_type.label().to_string())
            .collect();
        items.push("Cancel".into());
        let default = wizard
            .state()
            .rule_type()
            .and_then(|current| {
                AvailabilityRuleType::ALL
                    .iter()
                    .position(|candidate| *candidate == current)
            })
            .unwrap_or(0);
        let picked = Select::with_theme(&self.theme)
            .with_prompt("How does this rule repeat?")
            .items(&items)
            .default(default)
            .interact()
            ?;
        match AvailabilityRuleType::ALL.get(picked) {
            Some(rule_type) => {
                wizard.state_mut().set_rule_type(*rule_type);
                Ok(StepAction::Filled)
            }
            None => Ok(StepAction::Cancel),
        }
    }

    fn prompt_single_date(&mut self, wizard: &mut Wizard) -> Result<StepAction, CommandError> {
        match self.prompt_date("Date", wizard.state().start_date())? {
            TextEntry::Value(date) => {
                wizard.state_mut().set_start_date(date);
                Ok(StepAction::Filled)
            }
            TextEntry::Back => Ok(StepAction::Back),
            TextEntry::Cancel => Ok(StepAction::Cancel),
        }
    }

    fn prompt_date_range(&mut self, wizard: &mut Wizard) -> Result<StepAction, CommandError> {
        match self.prompt_date("From", wizard.state().start_date())? {
            TextEntry::Value(date) => wizard.state_mut().set_start_date(date),
            TextEntry::Back => return Ok(StepAction::Back),
            TextEntry::Cancel => return Ok(StepAction::Cancel),
        }
        match self.prompt_date("To", wizard.state().end_date())? {
            TextEntry::Value(date) => {
                wizard.state_mut().set_end_date(date);
                Ok(StepAction::Filled)
            }
            TextEntry::Back => Ok(StepAction::Back),
            TextEntry::Cancel => Ok(StepAction::Cancel),
        }
    }

    fn prompt_recurring(&mut self, wizard: &mut Wizard) -> Result<StepAction, CommandError> {
        let current_years = wizard
            .state()
            .recurring_years()
            .iter()
            .map(|year| year.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match self.prompt_years(&current_years)? {
            TextEntry::Value(years) => wizard.state_mut().set_recurring_years(years),
            TextEntry::Back => return Ok(StepAction::Back),
            TextEntry::Cancel => return Ok(StepAction::Cancel),
        }

        let defaults: Vec<bool> = (1..=12)
            .map(|month| wizard.state().recurring_months().contains(&month))
            .collect();
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt("Months (leave empty for every month)")
            .items(&MONTH_LABELS)
            .defaults(&defaults)
            .interact()
            ?;
        let months: Vec<u32> = picked.into_iter().map(|index| index as u32 + 1).collect();
        wizard.state_mut().set_recurring_months(months);

        if wizard.state().availability_type() == AvailabilityType::Date {
            let weekdays = self.prompt_weekday_selection(wizard)?;
            wizard.state_mut().set_weekdays(weekdays);
        }
        Ok(StepAction::Filled)
    }

    fn prompt_weekdays(&mut self, wizard: &mut Wizard) -> Result<StepAction, CommandError> {
        let weekdays = self.prompt_weekday_selection(wizard)?;
        wizard.state_mut().set_weekdays(weekdays);
        Ok(StepAction::Filled)
    }

    fn prompt_weekday_selection(
        &mut self,
        wizard: &Wizard,
    ) -> Result<Vec<u8>, CommandError> {
        let labels: Vec<&str> = ALL_WEEKDAYS.iter().map(|day| weekday_label(*day)).collect();
        let defaults: Vec<bool> = ALL_WEEKDAYS
            .iter()
            .map(|day| wizard.state().weekdays().contains(day))
            .collect();
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt("Weekdays (leave empty for every day)")
            .items(&labels)
            .defaults(&defaults)
            .interact()
            ?;
        Ok(picked.into_iter().map(|index| index as u8).collect())
    }

    fn prompt_slots(
        &mut self,
        wizard: &mut Wizard,
        with_weekday: bool,
    ) -> Result<StepAction, CommandError> {
        loop {
            let lines = slot_lines(wizard);
            if lines.is_empty() {
                output::detail("No time slots yet.");
            } else {
                for line in &lines {
                    output::detail(line);
                }
            }

            let mut items = vec!["Add a slot".to_string()];
            if !lines.is_empty() {
                items.push("Edit a slot".into());
                items.push("Remove a slot".into());
                items.push("Continue".into());
            }
            items.push("← Back".into());
            items.push("Cancel".into());
            let picked = Select::with_theme(&self.theme)
                .with_prompt("Time slots")
                .items(&items)
                .default(0)
                .interact()
                ?;

            match items[picked].as_str() {
                "Add a slot" => {
                    if let Some(draft) = self.prompt_new_slot(with_weekday)? {
                        wizard.state_mut().append_slot(draft);
                    }
                }
                "Edit a slot" => {
                    let index = Select::with_theme(&self.theme)
                        .with_prompt("Edit which slot?")
                        .items(&lines)
                        .default(0)
                        .interact()?;
                    if let Some(draft) = self.prompt_new_slot(with_weekday)? {
                        wizard.state_mut().update_slot(index, draft);
                    }
                }
                "Remove a slot" => {
                    let index = Select::with_theme(&self.theme)
                        .with_prompt("Remove which slot?")
                        .items(&lines)
                        .default(0)
                        .interact()
                        ?;
                    wizard.state_mut().remove_slot(index);
                }
                "Continue" => return Ok(StepAction::Filled),
                "← Back" => return Ok(StepAction::Back),
                _ => return Ok(StepAction::Cancel),
            }
        }
    }

    fn prompt_new_slot(
        &mut self,
        with_weekday: bool,
    ) -> Result<Option<TimeSlotDraft>, CommandError> {
        let day_of_week = if with_weekday {
            let labels: Vec<&str> = ALL_WEEKDAYS.iter().map(|day| weekday_label(*day)).collect();
            let picked = Select::with_theme(&self.theme)
                .with_prompt("Weekday")
                .items(&labels)
                .default(0)
                .interact()
                ?;
            Some(picked as u8)
        } else {
            None
        };

        let start_time = match self.prompt_time("Start time")? {
            TextEntry::Value(time) => time,
            _ => return Ok(None),
        };

        let capacity: u32 = Input::with_theme(&self.theme)
            .with_prompt("Capacity")
            .validate_with(|value: &u32| {
                if *value >= 1 {
                    Ok(())
                } else {
                    Err("Capacity must be at least 1")
                }
            })
            .interact_text()
            ?;

        Ok(Some(TimeSlotDraft {
            day_of_week,
            start_time: Some(start_time),
            capacity: Some(capacity),
        }))
    }

    fn prompt_text(
        &mut self,
        label: &str,
        default: Option<String>,
    ) -> Result<TextEntry<String>, CommandError> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(format!(
            "{label} (:back to go back, :cancel to discard)"
        ));
        if let Some(default) = default {
            input = input.default(default);
        }
        let raw = input.interact_text()?;
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(":back") {
            return Ok(TextEntry::Back);
        }
        if trimmed.eq_ignore_ascii_case(":cancel") {
            return Ok(TextEntry::Cancel);
        }
        Ok(TextEntry::Value(trimmed.to_string()))
    }

    fn prompt_date(
        &mut self,
        label: &str,
        default: Option<NaiveDate>,
    ) -> Result<TextEntry<NaiveDate>, CommandError> {
        loop {
            let mut input = Input::<String>::with_theme(&self.theme)
                .with_prompt(format!("{label} (YYYY-MM-DD)"));
            if let Some(default) = default {
                input = input.default(default.to_string());
            }
            let raw = input.interact_text()?;
            match classify_text(raw, |value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
            }) {
                Some(entry) => return Ok(entry),
                None => output::warning("Use YYYY-MM-DD format"),
            }
        }
    }

    fn prompt_time(&mut self, label: &str) -> Result<TextEntry<NaiveTime>, CommandError> {
        loop {
            let raw = Input::<String>::with_theme(&self.theme)
                .with_prompt(format!("{label} (24-hour HH:MM)"))
                .interact_text()
                ?;
            match classify_text(raw, |value| {
                NaiveTime::parse_from_str(value, "%H:%M").ok()
            }) {
                Some(entry) => return Ok(entry),
                None => output::warning("Use 24-hour HH:MM format"),
            }
        }
    }

    fn confirm_submission(&mut self, wizard: &Wizard) -> Result<bool, CommandError> {
        output::section("Review");
        for line in summary_lines(wizard) {
            output::detail(line);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Submit this availability rule?")
            .default(true)
            .interact()?)
    }
}

/// Maps raw text to a parsed entry, honouring the `:back`/`:cancel`
/// commands. `None` means the text failed to parse and should be re-asked.
fn classify_text<T>(raw: String, parse: impl Fn(&str) -> Option<T>) -> Option<TextEntry<T>> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(":back") {
        return Some(TextEntry::Back);
    }
    if trimmed.eq_ignore_ascii_case(":cancel") {
        return Some(TextEntry::Cancel);
    }
    parse(trimmed).map(TextEntry::Value)
}

fn slot_lines(wizard: &Wizard) -> Vec<String> {
    wizard
        .state()
        .time_slots()
        .iter()
        .map(|slot| {
            let mut parts = Vec::new();
            if let Some(day) = slot.day_of_week {
                parts.push(weekday_label(day).to_string());
            }
            if let Some(time) = slot.start_time {
                parts.push(time.format("%H:%M").to_string());
            }
            if let Some(capacity) = slot.capacity {
                parts.push(format!("capacity {capacity}"));
            }
            parts.join(", ")
        })
        .collect()
}

fn summary_lines(wizard: &Wizard) -> Vec<String> {
    let state = wizard.state();
    let mut lines = Vec::new();
    lines.push(format!("Name: {}", state.name().unwrap_or("[unfilled]")));
    if let Some(rule_type) = state.rule_type() {
        lines.push(format!("Repeats: {}", rule_type.label()));
    }
    if let Some(start) = state.start_date() {
        match state.end_date() {
            Some(end) => lines.push(format!("Dates: {start} to {end}")),
            None => lines.push(format!("Date: {start}")),
        }
    }
    if state.rule_type() == Some(AvailabilityRuleType::Recurring) {
        let years = if state.recurring_years().is_empty() {
            "every year".to_string()
        } else {
            state
                .recurring_years()
                .iter()
                .map(|year| year.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let months = if state.recurring_months().is_empty() {
            "every month".to_string()
        } else {
            state
                .recurring_months()
                .iter()
                .map(|month| MONTH_LABELS[(*month as usize).saturating_sub(1)].to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(format!("Years: {years}"));
        lines.push(format!("Months: {months}"));
    }
    if !state.weekdays().is_empty() {
        let days = state
            .weekdays()
            .iter()
            .map(|day| weekday_label(*day).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Weekdays: {days}"));
    }
    for line in slot_lines(wizard) {
        lines.push(format!("Slot: {line}"));
    }
    lines
}

impl<'a> WizardRunner<'a> {
    fn prompt_years(&mut self, current: &str) -> Result<TextEntry<Vec<i32>>, CommandError> {
        loop {
            let mut input = Input::<String>::with_theme(&self.theme)
                .with_prompt("Years, comma separated (leave empty for every year)")
                .allow_empty(true);
            if !current.is_empty() {
                input = input.default(current.to_string());
            }
            let raw = input.interact_text()?;
            match classify_text(raw, parse_year_list) {
                Some(entry) => return Ok(entry),
                None => output::warning("Use whole years, e.g. 2025, 2026"),
            }
        }
    }
}

fn parse_year_list(value: &str) -> Option<Vec<i32>> {
    if value.is_empty() {
        return Some(Vec::new());
    }
    value
        .split(',')
        .map(|part| part.trim().parse::<i32>().ok())
        .collect()
}
