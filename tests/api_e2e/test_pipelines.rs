//! E2E tests: pipeline records and cascade delete.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_pipeline_defaults() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post(
        &app,
        "/api/v1/pipelines",
        json!({
            "pipeline_name": "  Line 12  ",
            "location": "North yard",
            "design_temp_c_max": 180.0,
            "insulation": "no"
        }),
    )
    .await;

    assert_eq!(status, 201, "Create should succeed: {:?}", body);
    assert_eq!(body["pipeline_name"], "Line 12");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["engineer"], TEST_USER);
    assert_eq!(body["location"], "North yard");
    assert_eq!(body["design_temp_c_max"], 180.0);
    assert_eq!(body["insulation"], "no");
    assert_eq!(body["images"], json!([]));
    assert_eq!(body["supports_count"], 0);
}

#[actix_rt::test]
async fn test_draft_status_is_stored_as_pending() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let id = create_pipeline(&app, "Line 1", "draft").await;
    let (_, body) = get(&app, &format!("/api/v1/pipelines/{}", id)).await;
    assert_eq!(body["status"], "pending");
}

#[actix_rt::test]
async fn test_blank_name_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post(&app, "/api/v1/pipelines", json!({ "pipeline_name": "   " })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_unknown_status_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post(
        &app,
        "/api/v1/pipelines",
        json!({ "pipeline_name": "Line 1", "status": "paused" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_update_keeps_absent_fields() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (_, created) = post(
        &app,
        "/api/v1/pipelines",
        json!({ "pipeline_name": "Line 3", "area": "Unit 40", "painting": "Epoxy" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = put(
        &app,
        &format!("/api/v1/pipelines/{}", id),
        json!({ "painting": "None", "images": ["att-1", "att-2"] }),
    )
    .await;

    assert_eq!(status, 200, "Update should succeed: {:?}", body);
    assert_eq!(body["pipeline_name"], "Line 3");
    assert_eq!(body["area"], "Unit 40");
    assert_eq!(body["painting"], "None");
    assert_eq!(body["images"], json!(["att-1", "att-2"]));
}

#[actix_rt::test]
async fn test_update_with_null_clears_optional_fields() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (_, created) = post(
        &app,
        "/api/v1/pipelines",
        json!({
            "pipeline_name": "Line 4",
            "location": "A",
            "pipe_thickness": 6.3,
            "insulation": "yes",
            "area": "Unit 40"
        }),
    )
    .await;
    let uri = format!("/api/v1/pipelines/{}", created["id"].as_i64().unwrap());
    assert_eq!(created["engineer"], TEST_USER);

    let (status, body) = put(
        &app,
        &uri,
        json!({ "location": null, "pipe_thickness": null, "insulation": null, "engineer": null }),
    )
    .await;
    assert_eq!(status, 200, "Update should succeed: {:?}", body);
    assert!(body["location"].is_null());
    assert!(body["pipe_thickness"].is_null());
    assert!(body["insulation"].is_null());
    assert!(body["engineer"].is_null());
    assert_eq!(body["area"], "Unit 40");

    // Stored, not just echoed
    let (_, body) = get(&app, &uri).await;
    assert!(body["location"].is_null());
    assert!(body["pipe_thickness"].is_null());
    assert_eq!(body["area"], "Unit 40");
}

#[actix_rt::test]
async fn test_malformed_path_and_query_are_invalid_input() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;

    let (status, body) = get(&app, "/api/v1/pipelines/abc").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let (status, body) = action(
        &app,
        &format!("/api/v1/pipelines/{}/actions/edit_support?active_id=abc", pipeline),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_list_includes_counts_newest_first() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let first = create_pipeline(&app, "Line A", "pending").await;
    let second = create_pipeline(&app, "Line B", "pending").await;
    let support = create_support(&app, first, "S-1").await;
    create_inspection(&app, support, json!({ "condition": "b" })).await;

    let (status, body) = get(&app, "/api/v1/pipelines").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 2);

    let rows = body["pipelines"].as_array().unwrap();
    assert_eq!(rows[0]["id"].as_i64(), Some(second));
    assert_eq!(rows[1]["id"].as_i64(), Some(first));
    assert_eq!(rows[1]["supports_count"], 1);
    assert_eq!(rows[1]["inspections_count"], 1);
    assert_eq!(rows[0]["supports_count"], 0);
}

/// Deleting a pipeline with two supports and two inspections removes all of
/// them and closes the view.
#[actix_rt::test]
async fn test_delete_action_cascades() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let pipeline = create_pipeline(&app, "Line 9", "in_progress").await;
    let s1 = create_support(&app, pipeline, "S-1").await;
    let s2 = create_support(&app, pipeline, "S-2").await;
    let i1 = create_inspection(&app, s1, json!({ "condition": "c" })).await;
    let i2 = create_inspection(&app, s2, json!({ "condition": "a1" })).await;

    let other = create_pipeline(&app, "Line 10", "pending").await;
    let kept_support = create_support(&app, other, "K-1").await;

    let (status, body) = action(&app, &format!("/api/v1/pipelines/{}/actions/delete", pipeline)).await;
    assert_eq!(status, 200, "Delete should succeed: {:?}", body);
    assert_eq!(body, json!({ "type": "close_view" }));

    for uri in [
        format!("/api/v1/pipelines/{}", pipeline),
        format!("/api/v1/supports/{}", s1),
        format!("/api/v1/supports/{}", s2),
        format!("/api/v1/inspections/{}", i1),
        format!("/api/v1/inspections/{}", i2),
    ] {
        let (status, _) = get(&app, &uri).await;
        assert_eq!(status, 404, "{} should be gone", uri);
    }

    let (status, _) = get(&app, &format!("/api/v1/supports/{}", kept_support)).await;
    assert_eq!(status, 200);
}

#[actix_rt::test]
async fn test_delete_endpoint_reports_removed_rows() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let pipeline = create_pipeline(&app, "Line 4", "pending").await;
    let s1 = create_support(&app, pipeline, "S-1").await;
    create_support(&app, pipeline, "S-2").await;
    create_inspection(&app, s1, json!({ "condition": "c" })).await;
    create_inspection(&app, s1, json!({ "condition": "b" })).await;

    let (status, body) = delete(&app, &format!("/api/v1/pipelines/{}", pipeline)).await;
    assert_eq!(status, 200);
    assert_eq!(body["supports_deleted"], 2);
    assert_eq!(body["inspections_deleted"], 2);

    let (status, body) = delete(&app, &format!("/api/v1/pipelines/{}", pipeline)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_status_actions_return_none() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let id = create_pipeline(&app, "Line 5", "pending").await;
    let uri = |name: &str| format!("/api/v1/pipelines/{}/actions/{}", id, name);

    let (status, body) = action(&app, &uri("set_in_progress")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "type": "none" }));
    let (_, p) = get(&app, &format!("/api/v1/pipelines/{}", id)).await;
    assert_eq!(p["status"], "in_progress");

    // Writes are unconditional and repeatable
    action(&app, &uri("set_done")).await;
    action(&app, &uri("set_done")).await;
    let (_, p) = get(&app, &format!("/api/v1/pipelines/{}", id)).await;
    assert_eq!(p["status"], "done");

    action(&app, &uri("reset_draft")).await;
    let (_, p) = get(&app, &format!("/api/v1/pipelines/{}", id)).await;
    assert_eq!(p["status"], "pending");
}
