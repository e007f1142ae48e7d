//! Integration tests for the HTTP endpoints, over the in-memory backend.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use school_core_api::EntityType;
use school_core_service::ServiceConfig;
use serde_json::{json, Value};
use uuid::Uuid;

fn actions(history: &Value) -> Vec<&str> {
    history["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["action"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new();
    let (status, body) = server.anonymous("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_delete_restore_hard_delete_scenario() {
    let server = TestServer::new();
    let s1 = server
        .seed(EntityType::Student, json!({"firstName": "Ada", "lastName": "Lovelace"}))
        .await;
    let s2 = server
        .seed(EntityType::Student, json!({"firstName": "Alan", "lastName": "Turing"}))
        .await;

    for id in [s1.id, s2.id] {
        let (status, body) = server
            .request("DELETE", &format!("/api/admin/entities/student/{id}"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isDeleted"], true);
        assert_eq!(body["deletedBy"]["name"], "Test Admin");
    }

    // Deleted rows disappear from normal reads
    let (status, _) = server
        .request("GET", &format!("/api/admin/entities/student/{}", s1.id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, bin) = server
        .request("GET", "/api/admin/recycle-bin?type=student", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bin["pagination"]["total"], 2);

    let (status, restored) = server
        .request(
            "POST",
            "/api/admin/recycle-bin/restore",
            Some(json!({"type": "student", "ids": [s1.id]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["success"], true);
    assert_eq!(restored["restoredCount"], 1);
    assert_eq!(restored["message"], "Restored 1 of 1");

    let (status, history) = server
        .request(
            "GET",
            &format!("/api/admin/recycle-history?itemId={}&sortBy=timestamp_asc", s1.id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(actions(&history), vec!["deleted", "restored"]);

    let (status, removed) = server
        .request(
            "DELETE",
            "/api/admin/recycle-bin/hard-delete",
            Some(json!({"type": "student", "ids": [s2.id]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["deletedCount"], 1);

    let (status, _) = server
        .request("GET", &format!("/api/admin/entities/student/{}", s2.id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, history) = server
        .request(
            "GET",
            &format!("/api/admin/recycle-history?itemId={}&sortBy=timestamp_asc", s2.id),
            None,
        )
        .await;
    assert_eq!(actions(&history), vec!["deleted", "permanently_deleted"]);
    assert_eq!(history["data"][1]["snapshot"]["isDeleted"], true);

    // A hard-deleted id cannot be restored
    let (_, restored) = server
        .request(
            "POST",
            "/api/admin/recycle-bin/restore",
            Some(json!({"type": "student", "ids": [s2.id]})),
        )
        .await;
    assert_eq!(restored["restoredCount"], 0);
    assert_eq!(restored["failures"][0]["reason"], "NotFound");
}

#[tokio::test]
async fn test_batch_restore_reports_partial_failure() {
    let server = TestServer::new();
    let s3 = server
        .seed_deleted(EntityType::Student, json!({"firstName": "Grace"}))
        .await;
    let s4 = server
        .seed(EntityType::Student, json!({"firstName": "Edsger"}))
        .await;

    let (status, body) = server
        .request(
            "POST",
            "/api/admin/recycle-bin/restore",
            Some(json!({"type": "student", "ids": [s3.id, s4.id]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["restoredCount"], 1);
    assert_eq!(body["requested"], 2);
    assert_eq!(body["failures"].as_array().unwrap().len(), 1);
    assert_eq!(body["failures"][0]["id"], s4.id.to_string());
    assert_eq!(body["failures"][0]["reason"], "NotDeleted");
}

#[tokio::test]
async fn test_writes_require_actor() {
    let server = TestServer::new();
    let row = server.seed(EntityType::Fee, json!({"feeType": "Tuition"})).await;

    let (status, body) = server
        .anonymous("DELETE", &format!("/api/admin/entities/fee/{}", row.id), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, _) = server
        .anonymous(
            "POST",
            "/api/admin/recycle-bin/restore",
            Some(json!({"type": "fee", "ids": [row.id]})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Nothing changed
    let (status, _) = server
        .request("GET", &format!("/api/admin/entities/fee/{}", row.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_type_is_rejected() {
    let server = TestServer::new();

    let (status, body) = server
        .request("GET", "/api/admin/recycle-bin?type=library", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_type");

    let (status, body) = server.request("GET", "/api/admin/recycle-bin", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_type");

    let (status, _) = server
        .request(
            "POST",
            "/api/admin/recycle-bin/restore",
            Some(json!({"type": "library", "ids": [Uuid::new_v4()]})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .request("GET", "/api/admin/entities/library", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_batch_requests() {
    let server = TestServer::with_config(ServiceConfig {
        max_batch_size: 2,
        ..ServiceConfig::default()
    });

    let (status, body) = server
        .request(
            "POST",
            "/api/admin/recycle-bin/restore",
            Some(json!({"type": "student", "ids": []})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, _) = server
        .request(
            "DELETE",
            "/api/admin/recycle-bin/hard-delete",
            Some(json!({"type": "student", "ids": ["a", "b", "c"]})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .request(
            "POST",
            "/api/admin/recycle-bin/restore",
            Some(json!({"ids": [Uuid::new_v4()]})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn test_recycle_bin_pagination() {
    let server = TestServer::new();
    for i in 0..45 {
        server
            .seed_deleted(EntityType::Subject, json!({"name": format!("Subject {i}"), "code": format!("SUB-{i}")}))
            .await;
    }

    let (status, body) = server
        .request("GET", "/api/admin/recycle-bin?type=subject&page=2&limit=20", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 20);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["total"], 45);
    assert_eq!(body["pagination"]["totalPages"], 3);

    let (_, body) = server
        .request("GET", "/api/admin/recycle-bin?type=subject&page=3&limit=20", None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (_, body) = server
        .request("GET", "/api/admin/recycle-bin?type=subject&search=sub-44", None)
        .await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["name"], "Subject 44");
}

#[tokio::test]
async fn test_entity_listing_hides_deleted_rows() {
    let server = TestServer::new();
    server.seed(EntityType::Exam, json!({"name": "Midterm"})).await;
    server.seed_deleted(EntityType::Exam, json!({"name": "Final"})).await;

    let (status, body) = server.request("GET", "/api/admin/entities/exam", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["data"]["name"], "Midterm");

    let (_, body) = server
        .request("GET", "/api/admin/entities/exam?includeDeleted=true", None)
        .await;
    assert_eq!(body["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_soft_delete_of_missing_or_deleted_row() {
    let server = TestServer::new();
    let row = server.seed_deleted(EntityType::Class, json!({"name": "5", "section": "B"})).await;

    let (status, body) = server
        .request("DELETE", &format!("/api/admin/entities/class/{}", row.id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = server
        .request("DELETE", "/api/admin/entities/class/not-a-uuid", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, history) = server
        .request("GET", &format!("/api/admin/recycle-history?itemId={}", row.id), None)
        .await;
    assert_eq!(history["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_history_query_validation() {
    let server = TestServer::new();

    let (status, body) = server
        .request("GET", "/api/admin/recycle-history?action=archived", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, _) = server
        .request(
            "GET",
            "/api/admin/recycle-history?fromDate=2024-05-02&toDate=2024-05-01",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .request("GET", "/api/admin/recycle-history?type=history&itemId=S1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_history_search_by_actor() {
    let server = TestServer::new();
    let row = server.seed(EntityType::Notification, json!({"title": "Closed"})).await;
    server
        .request("DELETE", &format!("/api/admin/entities/notification/{}", row.id), None)
        .await;

    let (_, body) = server
        .request("GET", "/api/admin/recycle-history?search=ADMIN%40SCHOOL", None)
        .await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["performedBy"]["email"], "admin@school.test");

    let (_, body) = server
        .request("GET", "/api/admin/recycle-history?search=nobody", None)
        .await;
    assert_eq!(body["pagination"]["total"], 0);
}
