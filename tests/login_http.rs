//! HTTP integration tests for login and account administration.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use srots_access::domain::foundation::{Role, Timestamp};
use srots_access::ports::AccountStore;

use common::{TestApp, ADMIN_TOKEN, PASSWORD};

fn login_request(identifier: &str, secret: &str) -> Request<Body> {
    Request::post("/api/auth/login")
        .header("Content-Type", "application/json")
        .header(
            "User-Agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
        )
        .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .body(Body::from(
            json!({ "identifier": identifier, "secret": secret }).to_string(),
        ))
        .unwrap()
}

fn admin_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", ADMIN_TOKEN));
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_returns_session_for_new_subscriber() {
    let app = TestApp::new();
    let student = app.seed("asha", Role::Subscriber).await;

    let response = app
        .router()
        .oneshot(login_request("asha", PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["principalId"], student.id.to_string());
    assert_eq!(json["username"], "asha");
    assert_eq!(json["role"], "SUBSCRIBER");
    assert_eq!(json["accountStatus"], "HOLD");
    assert_eq!(json["premiumActive"], false);
    assert_eq!(json["message"], "Premium required to access job features");
    assert!(json["token"].as_str().is_some());
}

#[tokio::test]
async fn login_accepts_email_in_any_case() {
    let app = TestApp::new();
    app.seed("asha", Role::Subscriber).await;

    let response = app
        .router()
        .oneshot(login_request("ASHA@College.edu", PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_records_device_fingerprint() {
    let app = TestApp::new();
    let student = app.seed("asha", Role::Subscriber).await;

    let response = app
        .router()
        .oneshot(login_request("asha", PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let account = app.store.find_by_id(student.id).await.unwrap().unwrap();
    assert_eq!(
        account.last_device_fingerprint.as_deref(),
        Some("Chrome on Windows")
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::new();
    app.seed("asha", Role::Subscriber).await;

    let wrong = app
        .router()
        .oneshot(login_request("asha", "not-the-password"))
        .await
        .unwrap();
    let unknown = app
        .router()
        .oneshot(login_request("nobody", PASSWORD))
        .await
        .unwrap();

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong).await, json_body(unknown).await);
}

#[tokio::test]
async fn restricted_account_is_forbidden() {
    let app = TestApp::new();
    let student = app.seed("asha", Role::Subscriber).await;
    app.store
        .set_restricted(student.id, true, Timestamp::now())
        .await
        .unwrap();

    let response = app
        .router()
        .oneshot(login_request("asha", PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = json_body(response).await;
    assert_eq!(json["accountStatus"], "RESTRICTED");
    assert!(json["message"].as_str().is_some());
}

#[tokio::test]
async fn login_token_authorizes_premium_routes() {
    let app = TestApp::new();
    app.seed("asha", Role::Subscriber).await;

    let login = app
        .router()
        .oneshot(login_request("asha", PASSWORD))
        .await
        .unwrap();
    let token = json_body(login).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .router()
        .oneshot(
            Request::post("/api/premium/orders")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn premium_routes_without_token_are_unauthorized() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(
            Request::post("/api/premium/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Administration
// =============================================================================

#[tokio::test]
async fn admin_registers_subscriber_on_hold() {
    let app = TestApp::new();
    app.seed_admin().await;

    let response = app
        .router()
        .oneshot(admin_request(
            "POST",
            "/api/admin/accounts",
            Some(json!({
                "username": "meera",
                "email": "meera@college.edu",
                "fullName": "Meera Iyer",
                "role": "SUBSCRIBER",
                "collegeId": "CLG-7",
                "password": "meera-pass",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert!(json["id"].as_str().is_some());

    let login = app
        .router()
        .oneshot(login_request("meera", "meera-pass"))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    assert_eq!(json_body(login).await["accountStatus"], "HOLD");
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = TestApp::new();
    app.seed_admin().await;
    app.seed("asha", Role::Subscriber).await;

    let response = app
        .router()
        .oneshot(admin_request(
            "POST",
            "/api/admin/accounts",
            Some(json!({
                "username": "asha",
                "email": "other@college.edu",
                "fullName": "Other Asha",
                "role": "SUBSCRIBER",
                "password": "pass-1234",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn restriction_toggle_round_trip() {
    let app = TestApp::new();
    app.seed_admin().await;
    let student = app.seed("asha", Role::Subscriber).await;
    let uri = format!("/api/admin/accounts/{}/restriction", student.id);

    let response = app
        .router()
        .oneshot(admin_request("PUT", &uri, Some(json!({ "restricted": true }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["restricted"], true);
    assert_eq!(json["accountStatus"], "RESTRICTED");

    let response = app
        .router()
        .oneshot(admin_request("PUT", &uri, Some(json!({ "restricted": false }))))
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["restricted"], false);
    assert_eq!(json["accountStatus"], "HOLD");
}

#[tokio::test]
async fn renewal_activates_and_counts_in_stats() {
    let app = TestApp::new();
    app.seed_admin().await;
    let asha = app.seed("asha", Role::Subscriber).await;
    app.seed("meera", Role::Subscriber).await;

    let response = app
        .router()
        .oneshot(admin_request(
            "POST",
            &format!("/api/admin/accounts/{}/renew", asha.id),
            Some(json!({ "months": 6 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["premiumActive"], true);
    assert_eq!(json["accountStatus"], "ACTIVE");
    assert!(json["premiumExpiry"].as_str().is_some());

    let response = app
        .router()
        .oneshot(admin_request("GET", "/api/admin/accounts/stats", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = json_body(response).await;
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["expiringIn7Days"], 0);
}

#[tokio::test]
async fn renewal_rejects_out_of_range_months() {
    let app = TestApp::new();
    app.seed_admin().await;
    let asha = app.seed("asha", Role::Subscriber).await;

    let response = app
        .router()
        .oneshot(admin_request(
            "POST",
            &format!("/api/admin/accounts/{}/renew", asha.id),
            Some(json!({ "months": 0 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bulk_renewal_reports_failures_per_item() {
    let app = TestApp::new();
    app.seed_admin().await;
    let asha = app.seed("asha", Role::Subscriber).await;
    let ravi = app.seed("ravi", Role::Staff).await;

    let response = app
        .router()
        .oneshot(admin_request(
            "POST",
            "/api/admin/accounts/renew-bulk",
            Some(json!({
                "updates": [
                    { "accountId": asha.id, "months": 3 },
                    { "accountId": ravi.id, "months": 3 },
                ]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["renewed"], json!([asha.id]));
    assert_eq!(json["failed"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_admin_cannot_administer() {
    let app = TestApp::new();
    let student = app.seed("asha", Role::Subscriber).await;
    let token = app.token_for(&student);

    let response = app
        .router()
        .oneshot(
            Request::get("/api/admin/accounts/stats")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_routes_without_token_are_unauthorized() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(
            Request::get("/api/admin/accounts/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn college_admin_is_confined_to_own_subscribers() {
    let app = TestApp::new();
    let root = app.seed_admin().await;
    let dean = app.seed_in("dean", Role::CollegeAdmin, Some("CLG-1")).await;
    let own = app.seed_in("asha", Role::Subscriber, Some("CLG-1")).await;
    let other = app.seed_in("meera", Role::Subscriber, Some("CLG-2")).await;
    let token = app.token_for(&dean);

    let restrict = |id: String| {
        Request::put(format!("/api/admin/accounts/{}/restriction", id))
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "restricted": true }).to_string()))
            .unwrap()
    };

    let response = app.router().oneshot(restrict(own.id.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.router().oneshot(restrict(other.id.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = app.router().oneshot(restrict(root.id.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let root = app.store.find_by_id(root.id).await.unwrap().unwrap();
    assert!(!root.restricted);

    let response = app
        .router()
        .oneshot(
            Request::get("/api/admin/accounts/stats")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["total"], 1);
}
