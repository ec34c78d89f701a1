//! E2E tests: inspections and mandatory question validation.

use serde_json::json;

use super::test_helpers::*;

const MANDATORY_MESSAGE: &str =
    "You must answer at least the first 4 questions (Q1 - Q4) to save this inspection.";

#[actix_rt::test]
async fn test_inspection_without_q4_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let (status, body) = post(
        &app,
        &format!("/api/v1/supports/{}/inspections", support),
        json!({ "answers": answers(&["c", "b", "a1"]) }),
    )
    .await;

    assert_eq!(status, 422);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], MANDATORY_MESSAGE);

    // Nothing was written
    let (_, list) = get(&app, &format!("/api/v1/supports/{}/inspections", support)).await;
    assert_eq!(list["inspections"], json!([]));
}

#[actix_rt::test]
async fn test_inspection_with_gap_in_mandatory_questions_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let (status, body) = post(
        &app,
        &format!("/api/v1/supports/{}/inspections", support),
        json!({ "answers": [
            { "condition": "c" },
            { "comment": "not rated" },
            { "condition": "b" },
            { "condition": "b" },
            { "condition": "a2" }
        ] }),
    )
    .await;
    assert_eq!(status, 422);
    assert_eq!(body["message"], MANDATORY_MESSAGE);
}

#[actix_rt::test]
async fn test_create_inspection_defaults() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let (status, body) = post(
        &app,
        &format!("/api/v1/supports/{}/inspections", support),
        json!({ "answers": answers(&["c", "c", "b", "a1"]) }),
    )
    .await;

    assert_eq!(status, 201, "Create should succeed: {:?}", body);
    assert_eq!(body["inspector"], TEST_USER);
    assert_eq!(body["status"], "pending");
    assert!(body["inspection_date"].is_string());

    let list = body["answers"].as_array().unwrap();
    assert_eq!(list.len(), 9);
    assert_eq!(list[3]["condition"], "a1");
    assert!(list[8]["condition"].is_null());
    assert_eq!(list[8]["images"], json!([]));
}

#[actix_rt::test]
async fn test_inspection_round_trips_answers() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let id = create_inspection(
        &app,
        support,
        json!({ "condition": "b", "comment": "Minor rust", "images": ["att-1"] }),
    )
    .await;

    let (status, body) = get(&app, &format!("/api/v1/inspections/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(body["support_id"].as_i64(), Some(support));
    assert_eq!(body["answers"][0]["condition"], "b");
    assert_eq!(body["answers"][0]["comment"], "Minor rust");
    assert_eq!(body["answers"][0]["images"], json!(["att-1"]));
}

#[actix_rt::test]
async fn test_update_validates_merged_answers() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;
    let id = create_inspection(&app, support, json!({ "condition": "c" })).await;
    let uri = format!("/api/v1/inspections/{}", id);

    // Status-only update keeps the stored answers, which are valid
    let (status, body) = put(&app, &uri, json!({ "status": "issue" })).await;
    assert_eq!(status, 200, "Update should succeed: {:?}", body);
    assert_eq!(body["status"], "issue_found");
    assert_eq!(body["answers"][0]["condition"], "c");

    // Replacing answers with an incomplete set is rejected
    let (status, body) = put(&app, &uri, json!({ "answers": answers(&["a2", "a2"]) })).await;
    assert_eq!(status, 422);
    assert_eq!(body["message"], MANDATORY_MESSAGE);

    // The stored record is untouched
    let (_, body) = get(&app, &uri).await;
    assert_eq!(body["status"], "issue_found");
    assert_eq!(body["answers"][0]["condition"], "c");
    assert_eq!(body["answers"][1]["condition"], "c");

    let (status, body) = put(
        &app,
        &uri,
        json!({ "answers": answers(&["a2", "a2", "a2", "a2", "b"]) }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["answers"][4]["condition"], "b");
}

#[actix_rt::test]
async fn test_update_with_null_clears_inspector() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;
    let id = create_inspection(&app, support, json!({ "condition": "c" })).await;
    let uri = format!("/api/v1/inspections/{}", id);

    let (_, body) = put(&app, &uri, json!({ "status": "reviewed" })).await;
    assert_eq!(body["inspector"], TEST_USER);

    let (status, body) = put(&app, &uri, json!({ "inspector": null })).await;
    assert_eq!(status, 200, "Update should succeed: {:?}", body);
    assert!(body["inspector"].is_null());
    assert_eq!(body["status"], "reviewed");
}

#[actix_rt::test]
async fn test_too_many_answers_is_invalid_input() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let (status, body) = post(
        &app,
        &format!("/api/v1/supports/{}/inspections", support),
        json!({ "answers": answers(&["c"; 10]) }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_delete_inspection() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;
    let id = create_inspection(&app, support, json!({ "condition": "c" })).await;

    let (status, body) = delete(&app, &format!("/api/v1/inspections/{}", id)).await;
    assert_eq!(status, 204);
    assert!(body.is_null());

    let (status, _) = get(&app, &format!("/api/v1/inspections/{}", id)).await;
    assert_eq!(status, 404);

    let (_, support_body) = get(&app, &format!("/api/v1/supports/{}", support)).await;
    assert_eq!(support_body["inspections_count"], 0);
    assert!(support_body["state"].is_null());
}
