//! E2E tests: supports and their derived fields.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_support_defaults() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;

    let (status, body) = post(
        &app,
        &format!("/api/v1/pipelines/{}/supports", pipeline),
        json!({ "support_code": "S-01", "pipe_ref": "P-7", "cup_type": "vudlr" }),
    )
    .await;

    assert_eq!(status, 201, "Create should succeed: {:?}", body);
    assert_eq!(body["pipeline_id"].as_i64(), Some(pipeline));
    assert_eq!(body["area_type"], "N/A");
    assert_eq!(body["name"], "S-01 / P-7");
    assert_eq!(body["cup_type"], "vudlr");
    assert!(body["state"].is_null());
}

#[actix_rt::test]
async fn test_support_requires_existing_pipeline() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post(
        &app,
        "/api/v1/pipelines/999/supports",
        json!({ "support_code": "S-01" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Pipeline 999 not found");
}

#[actix_rt::test]
async fn test_invalid_cup_type_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;

    let (status, _) = post(
        &app,
        &format!("/api/v1/pipelines/{}/supports", pipeline),
        json!({ "support_code": "S-01", "cup_type": "zz" }),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_support_without_inspection_has_empty_report_fields() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let (status, body) = get(&app, &format!("/api/v1/supports/{}", support)).await;
    assert_eq!(status, 200);
    assert_eq!(body["inspections_count"], 0);
    assert!(body["last_inspection_id"].is_null());
    assert!(body["state"].is_null());
    assert_eq!(body["question_tag"], "");
    assert_eq!(body["visual_comment"], "");
    assert_eq!(body["visual_recommendation"], "");
    assert_eq!(body["visual_caption"], "");
    assert!(body["visual_image"].is_null());
}

/// Report fields follow Q1 of the inspection with the highest id.
#[actix_rt::test]
async fn test_support_mirrors_last_inspection() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    create_inspection(
        &app,
        support,
        json!({ "condition": "c", "comment": "Old note" }),
    )
    .await;
    let latest = create_inspection(
        &app,
        support,
        json!({
            "condition": "a1",
            "comment": "Shoe displaced",
            "recommendation": "Re-seat support",
            "images": ["att-3", "att-4"]
        }),
    )
    .await;

    let (_, body) = get(&app, &format!("/api/v1/supports/{}", support)).await;
    assert_eq!(body["inspections_count"], 2);
    assert_eq!(body["last_inspection_id"].as_i64(), Some(latest));
    assert_eq!(body["state"], "pending");
    assert_eq!(body["question_tag"], "A1");
    assert_eq!(body["visual_condition"], "A1 - Significant");
    assert_eq!(body["visual_comment"], "Shoe displaced");
    assert_eq!(body["visual_recommendation"], "Re-seat support");
    assert_eq!(body["visual_image"], "att-3");
    assert_eq!(body["visual_caption"], "General Visual");
}

#[actix_rt::test]
async fn test_display_name_updates_with_fields() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let (status, body) = put(
        &app,
        &format!("/api/v1/supports/{}", support),
        json!({ "support_level": "L2", "pipe_ref": "P-7", "area_type": "Offsite" }),
    )
    .await;
    assert_eq!(status, 200, "Update should succeed: {:?}", body);
    assert_eq!(body["name"], "S-01 / L2 / P-7");
    assert_eq!(body["area_type"], "Offsite");
}

#[actix_rt::test]
async fn test_update_with_null_clears_support_fields() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let uri = format!("/api/v1/supports/{}", create_support(&app, pipeline, "S-01").await);

    let (_, body) = put(
        &app,
        &uri,
        json!({ "support_level": "L2", "pipe_ref": "P-7", "cup_type": "fwsd" }),
    )
    .await;
    assert_eq!(body["name"], "S-01 / L2 / P-7");
    assert_eq!(body["cup_type_label"], "FWSD");

    let (status, body) = put(&app, &uri, json!({ "pipe_ref": null, "cup_type": null })).await;
    assert_eq!(status, 200, "Update should succeed: {:?}", body);
    assert_eq!(body["name"], "S-01 / L2");
    assert!(body["cup_type"].is_null());
    assert!(body["cup_type_label"].is_null());
    assert_eq!(body["support_level"], "L2");
}

#[actix_rt::test]
async fn test_pipeline_supports_listed_in_creation_order() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let a = create_support(&app, pipeline, "A").await;
    let b = create_support(&app, pipeline, "B").await;

    let (status, body) = get(&app, &format!("/api/v1/pipelines/{}/supports", pipeline)).await;
    assert_eq!(status, 200);
    let ids: Vec<i64> = body["supports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, b]);
}

#[actix_rt::test]
async fn test_delete_support_removes_inspections() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;
    let inspection = create_inspection(&app, support, json!({ "condition": "b" })).await;

    let (status, body) = delete(&app, &format!("/api/v1/supports/{}", support)).await;
    assert_eq!(status, 200);
    assert_eq!(body["inspections_deleted"], 1);

    let (status, _) = get(&app, &format!("/api/v1/inspections/{}", inspection)).await;
    assert_eq!(status, 404);
    let (_, p) = get(&app, &format!("/api/v1/pipelines/{}", pipeline)).await;
    assert_eq!(p["supports_count"], 0);
}
