//! Integration tests for the webhook dispatcher.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use grantlink_bridge::routes::{bridge_router, BridgeState};
use grantlink_bridge::signature::{compute_signature, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use grantlink_core::{DirectoryError, DirectoryResult, OrgDirectory, OrgRole, OrgSnapshot};

const SECRET: &str = "wks_test-secret";

/// Directory double recording writes.
#[derive(Default)]
struct StubDirectory {
    snapshot: OrgSnapshot,
    fail_read_org: bool,
    current_role: Option<OrgRole>,
    writes: Mutex<Vec<(String, String, OrgRole)>>,
}

#[async_trait]
impl OrgDirectory for StubDirectory {
    async fn read_org(&self, _org: &str) -> DirectoryResult<OrgSnapshot> {
        if self.fail_read_org {
            return Err(DirectoryError::Api {
                code: "401".to_string(),
                message: "Bad credentials".to_string(),
            });
        }
        Ok(self.snapshot.clone())
    }

    async fn read_membership(&self, _username: &str, _org: &str) -> DirectoryResult<OrgRole> {
        self.current_role.ok_or_else(|| DirectoryError::Api {
            code: "404".to_string(),
            message: "no membership".to_string(),
        })
    }

    async fn write_membership(
        &self,
        username: &str,
        org: &str,
        role: OrgRole,
    ) -> DirectoryResult<()> {
        self.writes
            .lock()
            .unwrap()
            .push((username.to_string(), org.to_string(), role));
        Ok(())
    }
}

fn test_app(directory: StubDirectory) -> (axum::Router, Arc<StubDirectory>) {
    let directory = Arc::new(directory);
    let state = BridgeState::new(
        directory.clone(),
        "acme",
        SecretString::from(SECRET.to_string()),
    );
    (bridge_router(state), directory)
}

/// Builds a correctly signed webhook request for `body`.
fn signed_request(body: &Value) -> Request<Body> {
    let body = serde_json::to_vec(body).unwrap();
    let timestamp = Utc::now().timestamp().to_string();
    let signature = compute_signature(SECRET, &timestamp, &body);

    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .header(TIMESTAMP_HEADER, timestamp)
        .body(Body::from(body))
        .unwrap()
}

async fn response_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn grant_event_body() -> Value {
    json!({
        "events": [{
            "event": "access/grant",
            "resources": [
                {
                    "kind": "indent.v1.User",
                    "labels": { "github/id": "octocat" }
                },
                {
                    "kind": "github.v1.Organization",
                    "labels": { "github/slug": "acme" }
                }
            ]
        }]
    })
}

#[tokio::test]
async fn test_unsigned_request_is_rejected() {
    let (app, directory) = test_app(StubDirectory::default());

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .body(Body::from(r#"{"kinds":[]}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"invalid auth");
    assert!(directory.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_signature_is_rejected() {
    let (app, _) = test_app(StubDirectory::default());

    let timestamp = Utc::now().timestamp().to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header(SIGNATURE_HEADER, "deadbeef")
        .header(TIMESTAMP_HEADER, timestamp)
        .body(Body::from(r#"{"kinds":[]}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_envelope_is_rejected_after_auth() {
    let (app, _) = test_app(StubDirectory::default());

    let response = app
        .oneshot(signed_request(&json!({ "ping": true })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"unknown request");
}

#[tokio::test]
async fn test_pull_without_org_kind_returns_empty_object() {
    let (app, _) = test_app(StubDirectory::default());

    let response = app
        .oneshot(signed_request(&json!({ "kinds": ["indent.v1.User"] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_body(response).await, json!({}));
}

#[tokio::test]
async fn test_pull_with_org_kind_returns_one_resource() {
    let (app, _) = test_app(StubDirectory {
        snapshot: OrgSnapshot {
            id: 4217,
            name: Some("Acme".to_string()),
            company: None,
            description: Some("tooling".to_string()),
        },
        ..Default::default()
    });

    let response = app
        .oneshot(signed_request(
            &json!({ "kinds": ["github.v1.Organization"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_body(response).await;

    let resources = body["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["id"], "4217");
    assert_eq!(resources[0]["displayName"], "Acme");
    assert_eq!(resources[0]["labels"]["github/company"], "");
    assert_eq!(resources[0]["labels"]["github/description"], "tooling");
}

#[tokio::test]
async fn test_pull_directory_failure_is_a_transport_error() {
    let (app, _) = test_app(StubDirectory {
        fail_read_org: true,
        ..Default::default()
    });

    let response = app
        .oneshot(signed_request(
            &json!({ "kinds": ["github.v1.Organization"] }),
        ))
        .await
        .unwrap();

    // Enumeration failures bypass the status channel entirely.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Bad credentials"));
}

#[tokio::test]
async fn test_grant_apply_returns_empty_status_and_writes() {
    let (app, directory) = test_app(StubDirectory {
        current_role: Some(OrgRole::Member),
        ..Default::default()
    });

    let response = app.oneshot(signed_request(&grant_event_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_body(response).await, json!({ "status": {} }));
    assert_eq!(
        *directory.writes.lock().unwrap(),
        vec![("octocat".to_string(), "acme".to_string(), OrgRole::Admin)]
    );
}

#[tokio::test]
async fn test_failed_precondition_maps_to_500_with_status_body() {
    let (app, directory) = test_app(StubDirectory {
        current_role: Some(OrgRole::Admin),
        ..Default::default()
    });

    let response = app.oneshot(signed_request(&grant_event_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response_body(response).await,
        json!({
            "status": {
                "code": 9,
                "details": { "errorData": "user is already organization admin" }
            }
        })
    );
    assert!(directory.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_access_events_return_200_empty_status() {
    let (app, _) = test_app(StubDirectory::default());

    let body = json!({ "events": [{ "event": "access/request" }] });
    let response = app.oneshot(signed_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_body(response).await, json!({ "status": {} }));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app(StubDirectory::default());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
