//! E2E tests: action dispatch and navigation outcomes.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_add_inspection_prefills_support() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-12").await;

    let (status, body) = action(
        &app,
        &format!("/api/v1/supports/{}/actions/add_inspection", support),
    )
    .await;

    assert_eq!(status, 200, "Action should succeed: {:?}", body);
    assert_eq!(body["type"], "navigate");
    let nav = &body["navigation"];
    assert_eq!(nav["target_entity"], "inspection");
    assert_eq!(nav["mode"], "create");
    assert_eq!(nav["presentation"], "dialog");
    assert_eq!(nav["defaults"]["support_id"].as_i64(), Some(support));
    assert!(nav["target_id"].is_null());
}

#[actix_rt::test]
async fn test_add_support_opens_short_form() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;

    let (status, body) = action(
        &app,
        &format!("/api/v1/pipelines/{}/actions/add_support", pipeline),
    )
    .await;

    assert_eq!(status, 200);
    let nav = &body["navigation"];
    assert_eq!(nav["target_entity"], "support");
    assert_eq!(nav["mode"], "create");
    assert_eq!(nav["view_variant"], "support_create");
    assert_eq!(nav["presentation"], "dialog");
    assert_eq!(nav["defaults"]["pipeline_id"].as_i64(), Some(pipeline));
}

#[actix_rt::test]
async fn test_edit_last_inspection_with_and_without_history() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;
    let uri = format!("/api/v1/supports/{}/actions/edit_last_inspection", support);

    let (_, body) = action(&app, &uri).await;
    let nav = &body["navigation"];
    assert_eq!(nav["mode"], "create");
    assert_eq!(nav["defaults"]["support_id"].as_i64(), Some(support));
    assert_eq!(nav["presentation"], "dialog");

    create_inspection(&app, support, json!({ "condition": "c" })).await;
    let latest = create_inspection(&app, support, json!({ "condition": "b" })).await;

    let (_, body) = action(&app, &uri).await;
    let nav = &body["navigation"];
    assert_eq!(nav["mode"], "edit");
    assert_eq!(nav["target_entity"], "inspection");
    assert_eq!(nav["target_id"].as_i64(), Some(latest));
    assert_eq!(nav["presentation"], "dialog");
}

#[actix_rt::test]
async fn test_view_inspection() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;
    let uri = format!("/api/v1/supports/{}/actions/view_inspection", support);

    let (status, body) = action(&app, &uri).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "type": "none" }));

    let id = create_inspection(&app, support, json!({ "condition": "a2" })).await;
    let (_, body) = action(&app, &uri).await;
    let nav = &body["navigation"];
    assert_eq!(nav["mode"], "view");
    assert_eq!(nav["target_id"].as_i64(), Some(id));
    assert_eq!(nav["view_variant"], "inspection_report");
}

#[actix_rt::test]
async fn test_open_form_and_save_and_open() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;

    let (_, body) = action(
        &app,
        &format!("/api/v1/pipelines/{}/actions/open_form", pipeline),
    )
    .await;
    assert_eq!(body["navigation"]["target_entity"], "pipeline");
    assert_eq!(body["navigation"]["mode"], "edit");
    assert_eq!(body["navigation"]["presentation"], "current");
    assert_eq!(body["navigation"]["target_id"].as_i64(), Some(pipeline));

    let (_, body) = action(
        &app,
        &format!("/api/v1/supports/{}/actions/save_and_open", support),
    )
    .await;
    assert_eq!(body["navigation"]["target_entity"], "support");
    assert_eq!(body["navigation"]["mode"], "edit");
    assert_eq!(body["navigation"]["target_id"].as_i64(), Some(support));
}

#[actix_rt::test]
async fn test_edit_support_uses_active_row() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;
    let support = create_support(&app, pipeline, "S-01").await;
    let base = format!("/api/v1/pipelines/{}/actions/edit_support", pipeline);

    let (_, body) = action(&app, &format!("{}?active_id={}", base, support)).await;
    assert_eq!(body["navigation"]["mode"], "edit");
    assert_eq!(body["navigation"]["target_id"].as_i64(), Some(support));

    let (_, body) = action(&app, &base).await;
    assert_eq!(body["navigation"]["mode"], "create");
    assert_eq!(body["navigation"]["defaults"]["pipeline_id"].as_i64(), Some(pipeline));

    // A support from another pipeline is not reachable
    let other = create_pipeline(&app, "Line 2", "pending").await;
    let foreign = create_support(&app, other, "X-1").await;
    let (status, _) = action(&app, &format!("{}?active_id={}", base, foreign)).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_print_report_returns_report_data() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 7", "in_progress").await;
    let inspected = create_support(&app, pipeline, "S-01").await;
    let bare = create_support(&app, pipeline, "S-02").await;
    create_inspection(
        &app,
        inspected,
        json!({ "condition": "a1", "comment": "Clamp loose", "images": ["att-5"] }),
    )
    .await;

    let (status, body) = action(
        &app,
        &format!("/api/v1/pipelines/{}/actions/print_report", pipeline),
    )
    .await;
    assert_eq!(status, 200, "Action should succeed: {:?}", body);
    assert_eq!(body["type"], "report");

    let report = &body["report"];
    assert_eq!(report["pipeline"]["pipeline_name"], "Line 7");
    assert_eq!(report["pipeline"]["supports_count"], 2);
    assert_eq!(report["pipeline"]["inspections_count"], 1);

    let lines = report["supports"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["support"]["id"].as_i64(), Some(inspected));
    assert_eq!(lines[0]["fields"]["question_tag"], "A1");
    assert_eq!(lines[0]["fields"]["visual_comment"], "Clamp loose");
    assert_eq!(lines[0]["fields"]["visual_image"], "att-5");
    assert_eq!(lines[1]["support"]["id"].as_i64(), Some(bare));
    assert_eq!(lines[1]["fields"]["question_tag"], "");

    let (status, direct) = get(&app, &format!("/api/v1/pipelines/{}/report", pipeline)).await;
    assert_eq!(status, 200);
    assert_eq!(direct["supports"], report["supports"]);
}

#[actix_rt::test]
async fn test_unknown_action_is_invalid_input() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pipeline = create_pipeline(&app, "Line 1", "pending").await;

    let (status, body) = action(
        &app,
        &format!("/api/v1/pipelines/{}/actions/launch", pipeline),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let (status, _) = action(&app, "/api/v1/pipelines/999/actions/set_done").await;
    assert_eq!(status, 404);
}
