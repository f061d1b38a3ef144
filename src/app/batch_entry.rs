//! Batch entry form component.
//!
//! Collects batch attributes, submits a create request, and resets on
//! success. There is no batch list on this screen, so success only toasts.

use super::finish_mutation;
use super::form::BatchDraft;
use super::notify::Toasts;
use crate::gateway::Gateway;
use crate::http::HttpClient;

const CREATED_MESSAGE: &str = "Batch created successfully!";
const CREATE_FALLBACK: &str = "Error creating batch";

/// Controller for the batch creation form.
pub struct BatchEntryForm<H: HttpClient> {
    gateway: Gateway<H>,
    /// Current field values, updated last-write-wins as the user types.
    pub draft: BatchDraft,
    toasts: Toasts,
    in_flight: bool,
}

impl<H: HttpClient> BatchEntryForm<H> {
    pub fn new(gateway: Gateway<H>) -> Self {
        BatchEntryForm {
            gateway,
            draft: BatchDraft::default(),
            toasts: Toasts::new(),
            in_flight: false,
        }
    }

    /// Whether a submission is currently in flight. The submit control must
    /// stay disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    /// Submit the form. Returns true when a batch was created.
    ///
    /// Incomplete drafts issue no request at all (required-field gating, the
    /// equivalent of the browser blocking submission). Parse failures toast
    /// a validation message, again without a request. On success all fields
    /// clear back to their empty defaults.
    pub async fn submit(&mut self) -> bool {
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
        let result = self.gateway.create_batch(&input).await;
        self.in_flight = false;

        if finish_mutation(&mut self.toasts, result, CREATED_MESSAGE, CREATE_FALLBACK) {
            self.draft.reset();
            true
        } else {
            false
        }
    }
}
