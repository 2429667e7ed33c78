//! Journaling backend used by the CLI: records every request it would have
//! sent as pretty JSON and echoes a synthesized response, so a rule can be
//! previewed end to end without touching the real API.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::payload::{AvailabilityRuleInput, AvailabilityRuleUpdates};
use crate::rules::{AvailabilityRule, AvailabilityRuleType};
use crate::utils::ensure_dir;

use super::{create_rule_path, update_rule_path, BookingApi, Result};

const TMP_SUFFIX: &str = "tmp";

/// One journaled request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub method: String,
    pub path: String,
    pub body: serde_json::Value,
}

pub struct DryRunBackend {
    journal_path: PathBuf,
    entries: Vec<JournalEntry>,
}

impl DryRunBackend {
    pub fn new(journal_path: PathBuf) -> Self {
        Self {
            journal_path,
            entries: Vec::new(),
        }
    }

    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    fn record(&mut self, entry: JournalEntry) -> Result<()> {
        self.entries.push(entry);
        if let Some(parent) = self.journal_path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = tmp_path(&self.journal_path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.journal_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "journal.json".into());
    name.push('.');
    name.push_str(TMP_SUFFIX);
    path.with_file_name(name)
}

impl BookingApi for DryRunBackend {
    fn create_rule(
        &mut self,
        listing_id: Uuid,
        input: &AvailabilityRuleInput,
    ) -> Result<AvailabilityRule> {
        self.record(JournalEntry {
            method: "POST".into(),
            path: create_rule_path(listing_id),
            body: serde_json::to_value(input)?,
        })?;
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
    ) -> Result<AvailabilityRule> {
        self.record(JournalEntry {
            method: "PATCH".into(),
            path: update_rule_path(listing_id, rule_id),
            body: serde_json::to_value(updates)?,
        })?;
        // Best-effort preview: the real backend would merge onto the stored
        // rule, which a dry run does not have.
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
