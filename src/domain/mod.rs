//! Core domain types for the admin client.
//!
//! This module contains pure wire-shaped types with no transport
//! dependencies:
//! - Batches (class groups) and their creation payload
//! - Fee rules, the batch-reference asymmetry, and the partial-update payload

pub mod batch;
pub mod fee;

pub use batch::{Batch, BatchCourse, BatchId, Medium, NewBatch};
pub use fee::{BatchRef, FeeCourse, FeeRule, FeeRuleId, FeeRulePatch, NewFeeRule, Region};
