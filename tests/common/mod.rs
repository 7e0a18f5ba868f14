#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;
use yearbook::router::init_router;
use yearbook::state::AppState;
use yearbook::store::SchoolStore;
use yearbook_config::CorsConfig;

/// Stock catalog ids
pub const SECONDARY_TWENTY: u128 = 1;
pub const SECONDARY_HUNDRED: u128 = 2;
pub const PRIMARY_LITERAL: u128 = 3;
pub const PRIMARY_TWENTY: u128 = 4;
pub const PRESCHOOL_OBSERVATION: u128 = 5;

pub fn catalog_id(id: u128) -> String {
    Uuid::from_u128(id).to_string()
}

/// Router over an empty in-memory store.
pub fn setup_test_app() -> Router {
    let state = AppState::new(SchoolStore::new(), CorsConfig::default());
    init_router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn create_year(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/school-years",
        Some(json!({
            "name": name,
            "evaluation_type_secondary": catalog_id(SECONDARY_TWENTY),
            "evaluation_type_primary": catalog_id(PRIMARY_LITERAL),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

pub fn id_of(body: &Value) -> String {
    body["id"].as_str().unwrap().to_string()
}

pub fn student(kind: &str, section_id: &str, name: &str, average: f64, approved: bool) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "student_id": Uuid::new_v4(),
        "student_name": name,
        "section_id": section_id,
        "type": kind,
        "state": "done",
        "current": true,
        "performance": {
            "total_subjects": 4,
            "subjects_approved": if approved { 4 } else { 1 },
            "subjects_failed": if approved { 0 } else { 3 },
            "average": { "mode": "numeric", "value": average },
            "state": if approved { "approve" } else { "failed" },
        },
    })
}

/// One primary and one secondary section with three active students, a
/// cancelled one, one professor and a scored evaluation.
pub fn sample_records() -> Value {
    let primary = Uuid::new_v4().to_string();
    let secondary = Uuid::new_v4().to_string();
    let professor = Uuid::new_v4().to_string();
    let subject = Uuid::new_v4().to_string();
    let evaluation = Uuid::new_v4().to_string();

    let mut cancelled = student("secondary", &secondary, "Dropped Out", 18.0, true);
    cancelled["state"] = json!("cancel");

    json!({
        "sections": [
            {
                "id": primary,
                "name": "Primary A",
                "type": "primary",
                "professor_ids": [professor],
                "average_stats": {
                    "total_students": 1,
                    "approved_students": 1,
                    "failed_students": 0,
                    "general_average": 14.0,
                },
            },
            {
                "id": secondary,
                "name": "Secondary A",
                "type": "secondary",
                "subject_ids": [subject],
                "professor_ids": [professor],
                "average_stats": {
                    "total_students": 2,
                    "approved_students": 1,
                    "failed_students": 1,
                    "general_average": 11.0,
                },
            },
        ],
        "enrollments": [
            student("primary", &primary, "Ada Primary", 14.0, true),
            student("secondary", &secondary, "Bea Secondary", 16.0, true),
            student("secondary", &secondary, "Cal Secondary", 6.0, false),
            cancelled,
        ],
        "professors": [
            {
                "id": professor,
                "name": "Prof. Ngoy",
                "section_ids": [primary, secondary],
                "subject_ids": [subject],
            }
        ],
        "subjects": [{ "id": subject, "name": "Mathematics" }],
        "evaluations": [
            {
                "id": evaluation,
                "name": "Quiz 1",
                "date": "2025-10-02",
                "state": "all",
                "type": "secondary",
                "professor_id": professor,
                "section_id": secondary,
                "subject_id": subject,
                "score_average": 11.0,
            }
        ],
    })
}
