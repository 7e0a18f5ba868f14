mod common;

use axum::http::StatusCode;
use common::{
    PRIMARY_TWENTY, SECONDARY_HUNDRED, catalog_id, create_year, id_of, sample_records, send,
    setup_test_app,
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_school_year_defaults_to_draft_and_current() {
    let app = setup_test_app();
    let year = create_year(&app, "2025-2026").await;

    assert_eq!(year["name"], "2025-2026");
    assert_eq!(year["state"], "draft");
    assert_eq!(year["term"], "1");
    assert_eq!(year["current"], true);
    assert_eq!(year["is_locked"], false);
    assert_eq!(year["section_count"], 0);
    assert_eq!(
        year["evaluation_type_preschool"],
        catalog_id(common::PRESCHOOL_OBSERVATION)
    );
}

#[tokio::test]
async fn test_new_year_takes_over_current_flag() {
    let app = setup_test_app();
    let first = create_year(&app, "2024-2025").await;
    let second = create_year(&app, "2025-2026").await;

    let (status, current) = send(&app, "GET", "/api/school-years/current", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["id"], second["id"]);

    let (_, first) = send(
        &app,
        "GET",
        &format!("/api/school-years/{}", id_of(&first)),
        None,
    )
    .await;
    assert_eq!(first["current"], false);
}

#[tokio::test]
async fn test_current_year_is_null_when_store_is_empty() {
    let app = setup_test_app();
    let (status, body) = send(&app, "GET", "/api/school-years/current", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_create_school_year_rejects_empty_name() {
    let app = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/school-years",
        Some(json!({
            "name": "",
            "evaluation_type_secondary": catalog_id(1),
            "evaluation_type_primary": catalog_id(3),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_create_school_year_requires_evaluation_types() {
    let app = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/school-years",
        Some(json!({ "name": "2025-2026" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("evaluation_type_secondary")
    );
}

#[tokio::test]
async fn test_create_school_year_rejects_type_from_other_level() {
    let app = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/school-years",
        Some(json!({
            "name": "2025-2026",
            "evaluation_type_secondary": catalog_id(PRIMARY_TWENTY),
            "evaluation_type_primary": catalog_id(3),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("secondary"));
}

#[tokio::test]
async fn test_get_unknown_school_year_returns_404() {
    let app = setup_test_app();
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/school-years/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "School year not found");
}

#[tokio::test]
async fn test_full_lifecycle_draft_to_finished() {
    let app = setup_test_app();
    let id = id_of(&create_year(&app, "2025-2026").await);

    let (status, year) = send(&app, "POST", &format!("/api/school-years/{id}/start"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(year["state"], "active");
    assert!(year["start_date_real"].is_string());

    let (status, body) =
        send(&app, "POST", &format!("/api/school-years/{id}/finish"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().ends_with("term 1"));

    for expected in ["2", "3"] {
        let (status, year) =
            send(&app, "POST", &format!("/api/school-years/{id}/next-term"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(year["term"], expected);
    }

    let (status, _) = send(&app, "POST", &format!("/api/school-years/{id}/next-term"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, year) = send(&app, "POST", &format!("/api/school-years/{id}/finish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(year["state"], "finished");
    assert_eq!(year["is_locked"], true);
    assert!(year["end_date_real"].is_string());

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}"),
        Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("finished"));
}

#[tokio::test]
async fn test_only_one_year_can_be_active() {
    let app = setup_test_app();
    let first = id_of(&create_year(&app, "2024-2025").await);
    let second = id_of(&create_year(&app, "2025-2026").await);

    let (status, _) = send(&app, "POST", &format!("/api/school-years/{first}/start"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send(&app, "POST", &format!("/api/school-years/{second}/start"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("2024-2025"));

    let (status, _) = send(&app, "POST", &format!("/api/school-years/{first}/start"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_state_and_paginates() {
    let app = setup_test_app();
    let active = id_of(&create_year(&app, "2023-2024").await);
    create_year(&app, "2024-2025").await;
    create_year(&app, "2025-2026").await;
    send(&app, "POST", &format!("/api/school-years/{active}/start"), None).await;

    let (status, body) = send(&app, "GET", "/api/school-years?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["has_more"], true);

    let (_, body) = send(&app, "GET", "/api/school-years?state=draft", None).await;
    assert_eq!(body["meta"]["total"], 2);

    let (_, body) = send(&app, "GET", "/api/school-years?state=active", None).await;
    assert_eq!(body["data"][0]["id"], active.as_str());
}

#[tokio::test]
async fn test_grading_change_blocked_once_evaluations_exist() {
    let app = setup_test_app();
    let id = id_of(&create_year(&app, "2025-2026").await);

    let (status, year) = send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}"),
        Some(json!({ "evaluation_type_secondary": catalog_id(SECONDARY_HUNDRED) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(year["evaluation_type_secondary"], catalog_id(SECONDARY_HUNDRED));

    send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}/records"),
        Some(sample_records()),
    )
    .await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}"),
        Some(json!({ "evaluation_type_secondary": catalog_id(1) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("evaluation mechanism"));

    let (status, year) = send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}"),
        Some(json!({ "name": "2025-2026 (bis)" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(year["name"], "2025-2026 (bis)");
}

#[tokio::test]
async fn test_sync_records_reports_counts() {
    let app = setup_test_app();
    let id = id_of(&create_year(&app, "2025-2026").await);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}/records"),
        Some(sample_records()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["school_year_id"], id.as_str());
    assert_eq!(body["counts"]["sections"], 2);
    assert_eq!(body["counts"]["students"], 4);
    assert_eq!(body["counts"]["professors"], 1);
    assert_eq!(body["counts"]["evaluations"], 1);

    let (_, year) = send(&app, "GET", &format!("/api/school-years/{id}"), None).await;
    assert_eq!(year["student_count"], 4);
}

#[tokio::test]
async fn test_delete_blocked_by_dependents() {
    let app = setup_test_app();
    let id = id_of(&create_year(&app, "2025-2026").await);
    send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}/records"),
        Some(sample_records()),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/api/school-years/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("2 enrolled section(s)")
    );

    send(
        &app,
        "PUT",
        &format!("/api/school-years/{id}/records"),
        Some(json!({})),
    )
    .await;
    let (status, _) = send(&app, "DELETE", &format!("/api/school-years/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/school-years/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_evaluation_types_catalog() {
    let app = setup_test_app();
    let (status, body) = send(&app, "GET", "/api/evaluation-types", None).await;

    assert_eq!(status, StatusCode::OK);
    let types = body.as_array().unwrap();
    assert_eq!(types.len(), 6);
    assert_eq!(types[0]["id"], catalog_id(1));
    assert_eq!(types[0]["scale"], "20");
}
