//! Application layer: form controllers, list/detail view state, and the
//! shared mutation-completion protocol.
//!
//! Every mutation in the system finishes the same way: success toasts a
//! message and triggers a full re-fetch of the affected list; failure toasts
//! the server-supplied message or a fallback string and leaves displayed
//! data untouched. That protocol is implemented once here and shared by all
//! four mutations instead of being duplicated per form.

pub mod batch_entry;
pub mod fee_view;
pub mod form;
pub mod notify;

pub use batch_entry::BatchEntryForm;
pub use fee_view::{DeleteConfirmation, FeeRow, FeeStructureView, FeeTable};
pub use form::{BatchDraft, BatchFeeConfig, FeeRuleDraft};
pub use notify::{Toast, ToastKind, Toasts, TOAST_DURATION};

use crate::error::Result;

/// Apply the uniform mutation outcome to a toast queue.
///
/// Returns true when the mutation succeeded, which tells the caller to
/// re-fetch its list. A failed mutation must NOT trigger a re-fetch.
pub(crate) fn finish_mutation<T>(
    toasts: &mut Toasts,
    result: Result<T>,
    success_message: &str,
    error_fallback: &str,
) -> bool {
    match result {
        Ok(_) => {
            toasts.success(success_message);
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "mutation failed");
            let message = err.server_message().unwrap_or(error_fallback).to_string();
            toasts.error(message);
            false
        }
    }
}
