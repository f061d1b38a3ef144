//! Typed admin client for a tutoring batch and fee-structure API.
//!
//! This crate reproduces, as a headless client library, the
//! data-synchronization contract of a staff-facing admin UI: a batch entry
//! form, a fee rule entry form, a list-and-detail table over fee rules, an
//! edit modal with partial-update semantics, and a confirmation-gated
//! delete. The remote server owns all business logic; this side owns form
//! state, the wire contract, and the uniform mutation-completion protocol
//! (success toast + full list re-fetch, error toast + untouched state).

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod http;

// Re-export commonly used types
pub use app::{
    BatchDraft, BatchEntryForm, BatchFeeConfig, DeleteConfirmation, FeeRuleDraft, FeeRow,
    FeeStructureView, FeeTable, Toast, ToastKind, Toasts, TOAST_DURATION,
};
pub use config::GatewayConfig;
pub use domain::{
    Batch, BatchCourse, BatchId, BatchRef, FeeCourse, FeeRule, FeeRuleId, FeeRulePatch, Medium,
    NewBatch, NewFeeRule, Region,
};
pub use error::{FeedeskError, Result};
pub use gateway::Gateway;
pub use http::{ApiRequest, HttpClient, HttpResponse, Method, MockHttpClient, ReqwestHttpClient};
