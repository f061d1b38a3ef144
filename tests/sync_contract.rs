//! Integration tests for the client/server synchronization contract, driven
//! entirely through the mock HTTP client.

use std::sync::Arc;

use feedesk::{
    BatchEntryForm, FeeRuleId, FeeStructureView, Gateway, HttpResponse, MockHttpClient, ToastKind,
};

fn batch_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "batchName": name,
        "numberOfStudents": 25,
        "numberOfClassesPerMonth": 12,
        "course": "Math",
        "medium": "English"
    })
}

fn rule_json(id: &str, monthly_fee: f64) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "batchId": batch_json("batch-1", "Morning Star"),
        "noOfStudentsMin": 5,
        "noOfStudentsMax": 20,
        "region": "North",
        "medium": "English",
        "course": "Maths",
        "monthlyFee": monthly_fee,
        "totalClasses": 12,
        "negotiableFee": 800.0
    })
}

fn gateway(mock: &Arc<MockHttpClient>) -> Gateway<MockHttpClient> {
    Gateway::new(mock.clone())
}

/// Build a view already showing the given rule list, with no recorded calls.
async fn seeded_view(
    mock: &Arc<MockHttpClient>,
    rules: serde_json::Value,
) -> FeeStructureView<MockHttpClient> {
    mock.add_ok("GET /fees", rules);
    let mut view = FeeStructureView::new(gateway(mock));
    view.refresh_fee_rules().await;
    mock.clear_calls();
    view
}

// Property 1: a complete batch draft issues exactly one creation request
// with those exact field values, and success clears the fields.
#[test_log::test(tokio::test)]
async fn batch_submit_posts_exact_values_and_resets() {
    let mock = Arc::new(MockHttpClient::new());
    mock.add_ok("POST /batches", batch_json("batch-9", "Morning Star"));

    let mut form = BatchEntryForm::new(gateway(&mock));
    form.draft.set("batchName", "Morning Star");
    form.draft.set("numberOfStudents", "25");
    form.draft.set("numberOfClassesPerMonth", "12");
    form.draft.set("course", "Math");
    form.draft.set("medium", "English");

    assert!(form.submit().await);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].path, "/batches");
    assert_eq!(
        calls[0].body,
        Some(serde_json::json!({
            "batchName": "Morning Star",
            "numberOfStudents": 25,
            "numberOfClassesPerMonth": 12,
            "course": "Math",
            "medium": "English"
        }))
    );

    // Fields cleared back to empty defaults
    assert_eq!(form.draft, feedesk::BatchDraft::default());
    assert_eq!(form.toasts().latest().unwrap().kind, ToastKind::Success);
    assert_eq!(
        form.toasts().latest().unwrap().message,
        "Batch created successfully!"
    );
}

// Property 2: any empty required field blocks submission before the network.
#[test_log::test(tokio::test)]
async fn incomplete_batch_draft_issues_no_request() {
    let mock = Arc::new(MockHttpClient::new());
    let mut form = BatchEntryForm::new(gateway(&mock));
    form.draft.set("batchName", "Morning Star");
    form.draft.set("numberOfStudents", "25");
    // course, medium, classes left empty

    assert!(!form.submit().await);
    assert_eq!(mock.call_count(), 0);
    assert!(form.toasts().is_empty());
    assert_eq!(form.draft.batch_name, "Morning Star");
}

// Property 3: the table shows one row per fetched rule and a counted title.
#[test_log::test(tokio::test)]
async fn table_renders_rows_and_header_count() {
    let mock = Arc::new(MockHttpClient::new());
    let view = seeded_view(
        &mock,
        serde_json::json!([rule_json("a", 500.0), rule_json("b", 700.0)]),
    )
    .await;

    let table = view.table();
    assert_eq!(table.title, "Fee Structure (2)");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].id, FeeRuleId::from("a"));
    assert_eq!(table.rows[0].monthly_fee, 500.0);
    assert_eq!(table.rows[1].monthly_fee, 700.0);
    assert_eq!(table.rows[0].fee_structure, "Morning Star");
    // The "remarks" column carries the negotiable fee
    assert_eq!(table.rows[0].remarks, 800.0);
    assert_eq!(table.rows[0].students, "5 - 20");
}

// Property 4: edit seeding uses the referenced batch identifier, not the
// display name.
#[test_log::test(tokio::test)]
async fn open_edit_seeds_batch_identifier() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([rule_json("a", 500.0)])).await;

    assert!(view.open_edit(&FeeRuleId::from("a")));
    assert!(view.is_edit_modal_open());
    assert_eq!(view.edit_draft.batch_id, "batch-1");
    assert_ne!(view.edit_draft.batch_id, "Morning Star");
    assert_eq!(view.selected().unwrap().id, FeeRuleId::from("a"));
}

// Property 5 (confirmed): one DELETE for the chosen id, then exactly one
// list re-fetch.
#[test_log::test(tokio::test)]
async fn confirmed_delete_issues_delete_then_single_refetch() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(
        &mock,
        serde_json::json!([rule_json("a", 500.0), rule_json("b", 700.0)]),
    )
    .await;

    mock.add_ok("DELETE /fees/b", serde_json::json!({}));
    mock.add_ok("GET /fees", serde_json::json!([rule_json("a", 500.0)]));

    let confirmation = view.request_delete(&FeeRuleId::from("b"));
    assert_eq!(confirmation.title(), "Are you sure?");
    assert_eq!(confirmation.body(), "You won't be able to revert this!");
    assert_eq!(mock.call_count(), 0); // phase 1 touches nothing

    assert!(view.resolve_delete(confirmation, true).await);

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "DELETE");
    assert_eq!(calls[0].path, "/fees/b");
    assert_eq!(calls[1].method, "GET");
    assert_eq!(calls[1].path, "/fees");
    assert_eq!(view.rules().len(), 1);
}

// Property 5 (declined): no network call, state unchanged.
#[test_log::test(tokio::test)]
async fn declined_delete_issues_no_request() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([rule_json("b", 700.0)])).await;

    let confirmation = view.request_delete(&FeeRuleId::from("b"));
    assert!(!view.resolve_delete(confirmation, false).await);

    assert_eq!(mock.call_count(), 0);
    assert_eq!(view.rules().len(), 1);
    assert!(view.toasts().is_empty());
}

// Property 6: a failed mutation must not trigger a re-fetch and must leave
// displayed data unchanged.
#[test_log::test(tokio::test)]
async fn failed_mutation_skips_refetch_and_keeps_data() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(
        &mock,
        serde_json::json!([rule_json("a", 500.0), rule_json("b", 700.0)]),
    )
    .await;

    mock.add_response(
        "POST /fees",
        Ok(HttpResponse {
            status: 500,
            body: r#"{"error":"database unavailable"}"#.to_string(),
        }),
    );

    view.draft.set("batchId", "batch-1");
    view.draft.set("noOfStudentsMin", "5");
    view.draft.set("noOfStudentsMax", "20");
    view.draft.set("region", "North");
    view.draft.set("medium", "English");
    view.draft.set("course", "Maths");
    view.draft.set("monthlyFee", "1500");
    view.draft.set("totalClasses", "12");
    view.draft.set("negotiableFee", "800");

    assert!(!view.submit_new_rule().await);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1); // the POST only, no GET /fees
    assert_eq!(calls[0].method, "POST");
    assert_eq!(view.rules().len(), 2);

    let toast = view.toasts().latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "database unavailable");
    // The draft is kept so the user can correct and resubmit
    assert_eq!(view.draft.monthly_fee, "1500");
}

// Property 7: an edit with one changed field sends the draft's populated
// keys only, and the list reflects the new value after refresh.
#[test_log::test(tokio::test)]
async fn edit_sends_partial_payload_and_refreshes() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([rule_json("a", 500.0)])).await;

    mock.add_ok("PATCH /fees/a", rule_json("a", 900.0));
    mock.add_ok("GET /fees", serde_json::json!([rule_json("a", 900.0)]));

    assert!(view.open_edit(&FeeRuleId::from("a")));
    view.edit_draft.set("monthlyFee", "900");

    assert!(view.submit_edit().await);

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "PATCH");
    assert_eq!(calls[0].path, "/fees/a");

    let body = calls[0].body.as_ref().unwrap().as_object().unwrap();
    assert_eq!(body["monthlyFee"], serde_json::json!(900.0));
    // The form always carries the seeded fields...
    assert_eq!(body["batchId"], serde_json::json!("batch-1"));
    assert_eq!(body["region"], serde_json::json!("North"));
    // ...but never keys the rule does not populate: not a full replacement
    assert!(!body.contains_key("discount"));
    assert!(!body.contains_key("remarks"));
    assert!(!body.contains_key("_id"));

    assert!(!view.is_edit_modal_open()); // declarative dismissal on success
    assert_eq!(view.rules()[0].monthly_fee, 900.0);
}

// A failed edit keeps the modal open with the draft intact.
#[test_log::test(tokio::test)]
async fn failed_edit_keeps_modal_open() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([rule_json("a", 500.0)])).await;

    mock.add_response(
        "PATCH /fees/a",
        Ok(HttpResponse {
            status: 422,
            body: r#"{"error":"monthlyFee must be positive"}"#.to_string(),
        }),
    );

    view.open_edit(&FeeRuleId::from("a"));
    view.edit_draft.set("monthlyFee", "-5");

    assert!(!view.submit_edit().await);
    assert!(view.is_edit_modal_open());
    assert_eq!(view.edit_draft.monthly_fee, "-5");
    assert_eq!(
        view.toasts().latest().unwrap().message,
        "monthlyFee must be positive"
    );
    assert_eq!(mock.call_count(), 1);
}

// Read-path failures are fail-soft: logged, no toast, stale list kept.
#[test_log::test(tokio::test)]
async fn failed_list_fetch_keeps_stale_data_without_toast() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([rule_json("a", 500.0)])).await;

    // No response configured: the next GET /fees fails
    view.refresh_fee_rules().await;

    assert_eq!(view.rules().len(), 1);
    assert!(view.toasts().is_empty());
}

// A fetch superseded by a newer one must not clobber the newer result.
#[test_log::test(tokio::test)]
async fn stale_refresh_result_is_discarded() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([])).await;

    let stale_epoch = view.begin_refresh();
    let fresh_epoch = view.begin_refresh();

    let fresh: Vec<feedesk::FeeRule> =
        serde_json::from_value(serde_json::json!([rule_json("a", 500.0), rule_json("b", 700.0)]))
            .unwrap();
    let stale: Vec<feedesk::FeeRule> =
        serde_json::from_value(serde_json::json!([rule_json("a", 500.0)])).unwrap();

    assert!(view.apply_rules(fresh_epoch, fresh));
    assert!(!view.apply_rules(stale_epoch, stale));

    assert_eq!(view.rules().len(), 2);
    assert_eq!(view.table().title, "Fee Structure (2)");
}

// Row activation opens the config modal scoped to that rule; the config
// submit is a stub that toasts without any network call.
#[test_log::test(tokio::test)]
async fn row_activation_and_config_stub() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([rule_json("a", 500.0)])).await;

    assert!(view.select_rule(&FeeRuleId::from("a")));
    assert!(view.is_config_modal_open());
    assert!(!view.is_edit_modal_open());
    assert_eq!(view.selected().unwrap().id, FeeRuleId::from("a"));

    view.config.category = "Standard".to_string();
    view.config.fee_amount = "1200".to_string();
    assert!(view.submit_config());

    assert_eq!(mock.call_count(), 0);
    assert_eq!(
        view.toasts().latest().unwrap().message,
        "Batch Fee Configuration Saved!"
    );
}

// An unknown rule id activates nothing.
#[test_log::test(tokio::test)]
async fn selecting_missing_rule_is_a_no_op() {
    let mock = Arc::new(MockHttpClient::new());
    let mut view = seeded_view(&mock, serde_json::json!([rule_json("a", 500.0)])).await;

    assert!(!view.select_rule(&FeeRuleId::from("nope")));
    assert!(!view.open_edit(&FeeRuleId::from("nope")));
    assert!(!view.is_config_modal_open());
    assert!(!view.is_edit_modal_open());
}

// Batch dropdown population: init loads both lists, failing soft on either.
#[test_log::test(tokio::test)]
async fn init_loads_batches_and_rules() {
    let mock = Arc::new(MockHttpClient::new());
    mock.add_ok(
        "GET /batches",
        serde_json::json!([batch_json("batch-1", "Morning Star")]),
    );
    mock.add_ok("GET /fees", serde_json::json!([rule_json("a", 500.0)]));

    let mut view = FeeStructureView::new(gateway(&mock));
    view.init().await;

    assert_eq!(view.batches().len(), 1);
    assert_eq!(view.batches()[0].batch_name, "Morning Star");
    assert_eq!(view.rules().len(), 1);
}
