//! Reconciliation driver
//!
//! One strictly sequential pass over the incoming rows. Per row:
//! START → MATCH → (CONFIRM) → APPLY/SKIP → DONE. The store handle and the
//! confirmation capability are injected, the store is saved exactly once
//! after the last processed row, and a store failure aborts the batch.

use chrono::Datelike;
use tracing::{info, warn};

use csync_common::contact::{ContactCard, ContactId, IncomingRecord};
use csync_common::phone;
use csync_common::store::ContactStore;
use csync_common::Result;

use crate::config::SyncConfig;
use crate::confirm::Confirm;
use crate::ingest::RowSource;
use crate::services::merge::{self, MergePlan};
use crate::services::matcher;

/// Operating mode for the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Apply merges and creates without prompting.
    Automatic,
    /// Require operator confirmation before any create or merge.
    Skeptical,
}

/// Outcome of one processed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Created,
    Updated,
    /// Matched, but the row would change nothing.
    SkippedNoChanges,
    /// Required first name missing.
    SkippedMalformed,
    /// Operator declined the proposed merge.
    MatchDeclined,
    /// Operator declined creating a new contact.
    CreateDeclined,
}

/// Per-outcome counts for the completion summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows_processed: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped_no_changes: usize,
    pub skipped_malformed: usize,
    pub match_declined: usize,
    pub create_declined: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Created => self.created += 1,
            RowOutcome::Updated => self.updated += 1,
            RowOutcome::SkippedNoChanges => self.skipped_no_changes += 1,
            RowOutcome::SkippedMalformed => self.skipped_malformed += 1,
            RowOutcome::MatchDeclined => self.match_declined += 1,
            RowOutcome::CreateDeclined => self.create_declined += 1,
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Contacts updated successfully! {} rows: {} created, {} updated, {} unchanged, {} malformed, {} declined",
            self.rows_processed,
            self.created,
            self.updated,
            self.skipped_no_changes,
            self.skipped_malformed,
            self.match_declined + self.create_declined,
        )
    }
}

/// Drives one batch: resolves identity, plans merges, asks for
/// confirmation in skeptical mode, and applies changes through the store.
pub struct Reconciler<S: ContactStore, C: Confirm> {
    store: S,
    confirm: C,
    mode: Mode,
    limit: Option<usize>,
    config: SyncConfig,
    reference_year: i32,
}

impl<S: ContactStore, C: Confirm> Reconciler<S, C> {
    pub fn new(store: S, confirm: C, mode: Mode, limit: Option<usize>, config: SyncConfig) -> Self {
        Reconciler {
            store,
            confirm,
            mode,
            limit,
            config,
            reference_year: chrono::Local::now().year(),
        }
    }

    /// Pin the reference year used for sentinel-birthday demotion.
    /// Tests use this to stay deterministic across year boundaries.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Hand the store and confirmer back once the batch is done.
    pub fn into_parts(self) -> (S, C) {
        (self.store, self.confirm)
    }

    /// Process rows until the source is exhausted or the limit is reached,
    /// then save the store once. Rows beyond the limit are never read.
    pub fn run(&mut self, rows: &mut impl RowSource) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        loop {
            if let Some(limit) = self.limit {
                if summary.rows_processed >= limit {
                    info!("row limit {} reached", limit);
                    break;
                }
            }
            let Some(record) = rows.next_record()? else {
                break;
            };
            summary.rows_processed += 1;

            let outcome = self.process_row(&record)?;
            summary.record(outcome);
        }

        self.store.save()?;
        Ok(summary)
    }

    /// One row through the state machine. Only store failures are fatal.
    fn process_row(&mut self, record: &IncomingRecord) -> Result<RowOutcome> {
        if record.first_name.trim().is_empty() {
            info!("skipped row with missing first name");
            return Ok(RowOutcome::SkippedMalformed);
        }

        let full_name = record.full_name();

        match self.resolve_identity(record)? {
            Some(matched) => self.merge_into(&matched, record, &full_name),
            None => self.create_new(record, &full_name),
        }
    }

    /// MATCH state: two-pass name matching refined by phone corroboration,
    /// then per-candidate prompting (skeptical) or sole-candidate
    /// auto-selection (automatic).
    fn resolve_identity(&mut self, record: &IncomingRecord) -> Result<Option<ContactCard>> {
        let contacts = self.store.list()?;
        let candidates = matcher::find_candidates_two_pass(
            &contacts,
            &record.first_name,
            &record.last_name,
            self.config.fuzzy_threshold,
        );

        if candidates.is_empty() {
            return Ok(None);
        }

        if let Some(hit) = matcher::corroborate_by_phone(&candidates, &record.phone) {
            return Ok(Some(hit.card.clone()));
        }

        match self.mode {
            Mode::Skeptical => {
                // First confirmed candidate wins; all-no falls through to
                // "no match".
                for candidate in &candidates {
                    let prompt = format!(
                        "Is '{}' the same as '{}'?",
                        record.full_name(),
                        candidate.card.full_name()
                    );
                    if self.confirm.confirm(&prompt) {
                        return Ok(Some(candidate.card.clone()));
                    }
                }
                Ok(None)
            }
            Mode::Automatic => {
                if candidates.len() == 1 {
                    Ok(Some(candidates[0].card.clone()))
                } else {
                    // Never merge into a wrong contact without exact-name or
                    // phone corroboration: ambiguity falls through to create.
                    warn!(
                        "{} ambiguous candidates for '{}', treating as new contact (re-run with --skeptical to merge)",
                        candidates.len(),
                        record.full_name()
                    );
                    Ok(None)
                }
            }
        }
    }

    /// CONFIRM + APPLY for a matched contact.
    fn merge_into(
        &mut self,
        matched: &ContactCard,
        record: &IncomingRecord,
        full_name: &str,
    ) -> Result<RowOutcome> {
        let plan = merge::plan(Some(matched), record, self.reference_year);
        if plan.is_empty() {
            info!("no changes for contact: {}", full_name);
            return Ok(RowOutcome::SkippedNoChanges);
        }

        if self.mode == Mode::Skeptical {
            let prompt = format!(
                "Update contact '{}' with the following changes?\n{}",
                full_name,
                plan.describe().join("\n")
            );
            if !self.confirm.confirm(&prompt) {
                info!("skipped updating contact: {}", full_name);
                return Ok(RowOutcome::MatchDeclined);
            }
        }

        self.apply(matched.id, &plan, record)?;
        info!("updated contact: {}", full_name);
        Ok(RowOutcome::Updated)
    }

    /// CONFIRM + APPLY for a new contact.
    fn create_new(&mut self, record: &IncomingRecord, full_name: &str) -> Result<RowOutcome> {
        if self.mode == Mode::Skeptical {
            let prompt = format!("Create new contact '{}'?", full_name);
            if !self.confirm.confirm(&prompt) {
                info!("skipped creating contact: {}", full_name);
                return Ok(RowOutcome::CreateDeclined);
            }
        }

        let id = self
            .store
            .create(record.first_name.trim(), record.last_name.trim())?;
        let plan = merge::plan(None, record, self.reference_year);
        self.apply(id, &plan, record)?;
        info!("created new contact: {}", full_name);
        Ok(RowOutcome::Created)
    }

    /// Execute a merge plan through the store. Phone goes in storage form,
    /// email as received.
    fn apply(&mut self, id: ContactId, plan: &MergePlan, record: &IncomingRecord) -> Result<()> {
        if plan.add_phone {
            let stored =
                phone::format_for_storage_with(&record.phone, &self.config.default_country_code);
            self.store.append_phone(id, &stored)?;
        }
        if plan.add_email {
            self.store.append_email(id, &record.email)?;
        }
        if let Some(bday) = plan.set_birthday {
            self.store.set_birthday(id, bday)?;
        }
        Ok(())
    }
}
