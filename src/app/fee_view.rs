//! Fee structure view: entry form, list-and-detail table, edit modal,
//! confirmation-gated delete, and the batch fee configuration modal.
//!
//! The view never holds a canonical local copy between mutations — the
//! server list is the single source of truth and every successful mutation
//! triggers a full re-fetch. Refetches are fetch-then-apply-latest: each
//! refresh takes an epoch, and a result from a superseded epoch is
//! discarded so a slow stale fetch can never clobber a newer one.

use super::finish_mutation;
use super::form::{BatchFeeConfig, FeeRuleDraft};
use super::notify::Toasts;
use crate::domain::{Batch, FeeCourse, FeeRule, FeeRuleId, Medium, Region};
use crate::gateway::Gateway;
use crate::http::HttpClient;

const RULE_CREATED: &str = "Fee rule created successfully!";
const RULE_CREATE_FALLBACK: &str = "Error creating fee rule";
const RULE_UPDATED: &str = "Fee rule updated successfully!";
const RULE_UPDATE_FALLBACK: &str = "Error updating fee rule";
const RULE_DELETED: &str = "Deleted successfully!";
const RULE_DELETE_FALLBACK: &str = "Error deleting rule";
const CONFIG_SAVED: &str = "Batch Fee Configuration Saved!";

/// Phase 1 of the delete protocol: a blocking prompt describing the action
/// as irreversible. No network call has happened when this value exists;
/// declining it performs none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    rule_id: FeeRuleId,
}

impl DeleteConfirmation {
    pub fn rule_id(&self) -> &FeeRuleId {
        &self.rule_id
    }

    pub fn title(&self) -> &'static str {
        "Are you sure?"
    }

    pub fn body(&self) -> &'static str {
        "You won't be able to revert this!"
    }

    pub fn confirm_label(&self) -> &'static str {
        "Yes, delete it!"
    }
}

/// One rendered table row.
///
/// The "remarks" column shows the negotiable fee, not the free-text remarks
/// field — a labeling quirk inherited from the original table and kept
/// deliberately.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeRow {
    pub id: FeeRuleId,
    /// Batch display name, falling back to the raw id when the server did
    /// not embed the batch.
    pub fee_structure: String,
    pub region: Region,
    pub course: FeeCourse,
    pub medium: Medium,
    pub monthly_fee: f64,
    pub remarks: f64,
    pub total_classes: u32,
    /// "min - max" student-count range.
    pub students: String,
}

/// The rendered fee structure table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeTable {
    /// "Fee Structure (N)" where N is the row count.
    pub title: String,
    pub rows: Vec<FeeRow>,
}

/// Controller for the fee structure screen.
pub struct FeeStructureView<H: HttpClient> {
    gateway: Gateway<H>,
    batches: Vec<Batch>,
    rules: Vec<FeeRule>,
    /// Draft for the creation form.
    pub draft: FeeRuleDraft,
    /// Immutable snapshot of the rule a modal is scoped to.
    selected: Option<FeeRule>,
    /// Mutable draft the edit modal works on, seeded from the snapshot.
    pub edit_draft: FeeRuleDraft,
    edit_modal_open: bool,
    config_modal_open: bool,
    /// Local-only state for the batch fee configuration modal.
    pub config: BatchFeeConfig,
    toasts: Toasts,
    in_flight: bool,
    refresh_epoch: u64,
}

impl<H: HttpClient> FeeStructureView<H> {
    pub fn new(gateway: Gateway<H>) -> Self {
        FeeStructureView {
            gateway,
            batches: Vec::new(),
            rules: Vec::new(),
            draft: FeeRuleDraft::default(),
            selected: None,
            edit_draft: FeeRuleDraft::default(),
            edit_modal_open: false,
            config_modal_open: false,
            config: BatchFeeConfig::default(),
            toasts: Toasts::new(),
            in_flight: false,
            refresh_epoch: 0,
        }
    }

    /// Initial mount: load batches (for the dropdowns) and the rule list.
    pub async fn init(&mut self) {
        self.refresh_batches().await;
        self.refresh_fee_rules().await;
    }

    // ------------------------------------------------------------------
    // Read paths (fail soft: log and keep whatever was displayed)
    // ------------------------------------------------------------------

    /// Re-fetch the batch list. On failure the prior list stays as-is.
    pub async fn refresh_batches(&mut self) {
        match self.gateway.list_batches().await {
            Ok(batches) => self.batches = batches,
            Err(err) => tracing::error!(error = %err, "error fetching batches"),
        }
    }

    /// Re-fetch the fee rule list, latest-wins. On failure the prior list
    /// stays as-is.
    pub async fn refresh_fee_rules(&mut self) {
        let epoch = self.begin_refresh();
        match self.gateway.list_fee_rules().await {
            Ok(rules) => {
                self.apply_rules(epoch, rules);
            }
            Err(err) => tracing::error!(error = %err, "error fetching fee rules"),
        }
    }

    /// Start a refresh, superseding any refresh still in flight.
    pub fn begin_refresh(&mut self) -> u64 {
        self.refresh_epoch += 1;
        self.refresh_epoch
    }

    /// Apply a fetched list. Returns false (and changes nothing) when the
    /// epoch has been superseded by a newer refresh.
    pub fn apply_rules(&mut self, epoch: u64, rules: Vec<FeeRule>) -> bool {
        if epoch < self.refresh_epoch {
            tracing::debug!(epoch, latest = self.refresh_epoch, "discarding superseded fetch");
            return false;
        }
        self.rules = rules;
        true
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn rules(&self) -> &[FeeRule] {
        &self.rules
    }

    pub fn selected(&self) -> Option<&FeeRule> {
        self.selected.as_ref()
    }

    pub fn is_edit_modal_open(&self) -> bool {
        self.edit_modal_open
    }

    pub fn is_config_modal_open(&self) -> bool {
        self.config_modal_open
    }

    /// Whether a mutation is currently in flight. The triggering control
    /// must stay disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    /// Project the in-memory list into the rendered table.
    pub fn table(&self) -> FeeTable {
        FeeTable {
            title: format!("Fee Structure ({})", self.rules.len()),
            rows: self
                .rules
                .iter()
                .map(|rule| FeeRow {
                    id: rule.id.clone(),
                    fee_structure: match rule.batch.batch_name() {
                        Some(name) => name.to_string(),
                        None => rule.batch.id().to_string(),
                    },
                    region: rule.region,
                    course: rule.course,
                    medium: rule.medium,
                    monthly_fee: rule.monthly_fee,
                    remarks: rule.negotiable_fee,
                    total_classes: rule.total_classes,
                    students: format!(
                        "{} - {}",
                        rule.no_of_students_min, rule.no_of_students_max
                    ),
                })
                .collect(),
        }
    }

    // ------------------------------------------------------------------
    // Creation form
    // ------------------------------------------------------------------

    /// Submit the creation form. Returns true when a rule was created.
    pub async fn submit_new_rule(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        if !self.draft.is_complete() {
            return false;
        }

        let input = match self.draft.to_input() {
            Ok(input) => input,
            Err(err) => {
                self.toasts.error(err.to_string());
                return false;
            }
        };

        self.in_flight = true;
        let result = self.gateway.create_fee_rule(&input).await;
        self.in_flight = false;

        if finish_mutation(&mut self.toasts, result, RULE_CREATED, RULE_CREATE_FALLBACK) {
            self.refresh_fee_rules().await;
            self.draft.reset();
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Row activation and modals
    // ------------------------------------------------------------------

    /// Row activation: snapshot the rule and open the batch fee config
    /// modal. The nested edit/delete actions are separate entry points and
    /// must NOT go through here — that separation is the event-isolation
    /// contract the original row markup enforced with stopPropagation.
    pub fn select_rule(&mut self, id: &FeeRuleId) -> bool {
        match self.rules.iter().find(|r| &r.id == id) {
            Some(rule) => {
                self.selected = Some(rule.clone());
                self.config_modal_open = true;
                true
            }
            None => false,
        }
    }

    /// Open the edit modal: snapshot the rule and seed a fresh draft from
    /// it. The batch field gets the referenced batch's identifier, not its
    /// display name.
    pub fn open_edit(&mut self, id: &FeeRuleId) -> bool {
        match self.rules.iter().find(|r| &r.id == id) {
            Some(rule) => {
                self.selected = Some(rule.clone());
                self.edit_draft = FeeRuleDraft::from_rule(rule);
                self.edit_modal_open = true;
                true
            }
            None => false,
        }
    }

    pub fn close_edit(&mut self) {
        self.edit_modal_open = false;
    }

    pub fn close_config(&mut self) {
        self.config_modal_open = false;
    }

    /// Submit the edit modal. Sends a partial update carrying only the
    /// draft's populated keys; on success the modal closes (visibility is
    /// plain state, no simulated dismiss click) and the list re-fetches.
    /// On failure the modal stays open with the draft intact.
    pub async fn submit_edit(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        let rule_id = match &self.selected {
            Some(rule) => rule.id.clone(),
            None => return false,
        };

        let patch = match self.edit_draft.to_patch() {
            Ok(patch) => patch,
            Err(err) => {
                self.toasts.error(err.to_string());
                return false;
            }
        };

        self.in_flight = true;
        let result = self.gateway.update_fee_rule(&rule_id, &patch).await;
        self.in_flight = false;

        if finish_mutation(&mut self.toasts, result, RULE_UPDATED, RULE_UPDATE_FALLBACK) {
            self.edit_modal_open = false;
            self.refresh_fee_rules().await;
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Confirmation-gated delete
    // ------------------------------------------------------------------

    /// Phase 1: build the irreversibility prompt. No network call happens
    /// here.
    pub fn request_delete(&self, id: &FeeRuleId) -> DeleteConfirmation {
        DeleteConfirmation {
            rule_id: id.clone(),
        }
    }

    /// Phase 2: act on the user's answer. Declining performs no network
    /// call and leaves all state unchanged. Confirming issues the delete
    /// and, on success, exactly one list re-fetch.
    pub async fn resolve_delete(
        &mut self,
        confirmation: DeleteConfirmation,
        confirmed: bool,
    ) -> bool {
        if !confirmed {
            return false;
        }
        if self.in_flight {
            return false;
        }

        self.in_flight = true;
        let result = self.gateway.delete_fee_rule(&confirmation.rule_id).await;
        self.in_flight = false;

        if finish_mutation(&mut self.toasts, result, RULE_DELETED, RULE_DELETE_FALLBACK) {
            self.refresh_fee_rules().await;
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Batch fee configuration modal
    // ------------------------------------------------------------------

    /// Submit the batch fee configuration.
    ///
    /// Intentionally local-only: the original product never wired this form
    /// to an endpoint, and inventing one would be a product decision. The
    /// values stay in [`Self::config`] and a success toast is shown.
    pub fn submit_config(&mut self) -> bool {
        if !self.config.is_complete() {
            return false;
        }
        self.toasts.success(CONFIG_SAVED);
        true
    }
}
