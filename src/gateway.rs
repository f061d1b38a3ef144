//! Remote data gateway.
//!
//! Single point of contact with the remote API. All six operations share the
//! same status contract: exactly 200 is success; any other status is a
//! rejection carrying the message from a conventional `{"error": "..."}`
//! response body when present. Transport failures surface as network errors.
//!
//! The client never holds a canonical local copy between mutations — callers
//! treat the server list as the single source of truth and re-fetch after
//! every successful mutation.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::{Batch, FeeRule, FeeRuleId, FeeRulePatch, NewBatch, NewFeeRule};
use crate::error::{FeedeskError, Result};
use crate::http::{ApiRequest, HttpClient, HttpResponse};

/// Gateway over the batch/fee-structure API, generic over the HTTP transport.
pub struct Gateway<H: HttpClient> {
    http: Arc<H>,
}

impl<H: HttpClient> Clone for Gateway<H> {
    fn clone(&self) -> Self {
        Gateway {
            http: self.http.clone(),
        }
    }
}

impl<H: HttpClient> Gateway<H> {
    pub fn new(http: Arc<H>) -> Self {
        Gateway { http }
    }

    /// GET `/batches` — all batches.
    #[tracing::instrument(skip(self))]
    pub async fn list_batches(&self) -> Result<Vec<Batch>> {
        self.fetch_json(ApiRequest::get("/batches")).await
    }

    /// POST `/batches` — create a batch, returning the server copy with its
    /// assigned id.
    #[tracing::instrument(skip(self, input), fields(batch_name = %input.batch_name))]
    pub async fn create_batch(&self, input: &NewBatch) -> Result<Batch> {
        let body = serde_json::to_value(input)?;
        self.fetch_json(ApiRequest::post("/batches", body)).await
    }

    /// GET `/fees` — all fee rules, each with its referenced batch embedded.
    #[tracing::instrument(skip(self))]
    pub async fn list_fee_rules(&self) -> Result<Vec<FeeRule>> {
        self.fetch_json(ApiRequest::get("/fees")).await
    }

    /// POST `/fees` — create a fee rule.
    #[tracing::instrument(skip(self, input), fields(batch_id = %input.batch_id))]
    pub async fn create_fee_rule(&self, input: &NewFeeRule) -> Result<FeeRule> {
        let body = serde_json::to_value(input)?;
        self.fetch_json(ApiRequest::post("/fees", body)).await
    }

    /// PATCH `/fees/:id` — partial update; only keys present in the patch
    /// are changed server-side.
    #[tracing::instrument(skip(self, patch), fields(rule_id = %id))]
    pub async fn update_fee_rule(&self, id: &FeeRuleId, patch: &FeeRulePatch) -> Result<FeeRule> {
        let body = serde_json::to_value(patch)?;
        self.fetch_json(ApiRequest::patch(format!("/fees/{}", id), body))
            .await
    }

    /// DELETE `/fees/:id`.
    ///
    /// A 404 counts as failure: the contract treats anything but 200 as a
    /// rejection, so deleting an already-gone rule still toasts an error.
    #[tracing::instrument(skip(self), fields(rule_id = %id))]
    pub async fn delete_fee_rule(&self, id: &FeeRuleId) -> Result<()> {
        let response = self.http.execute(&ApiRequest::delete(format!("/fees/{}", id))).await?;
        Self::accept(response)?;
        Ok(())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.http.execute(&request).await?;
        let response = Self::accept(response)?;
        serde_json::from_str(&response.body).map_err(Into::into)
    }

    fn accept(response: HttpResponse) -> Result<HttpResponse> {
        if response.is_ok() {
            Ok(response)
        } else {
            Err(FeedeskError::Rejected {
                status: response.status,
                message: extract_error_message(&response.body),
            })
        }
    }
}

/// Pull the message out of a conventional `{"error": "..."}` error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
