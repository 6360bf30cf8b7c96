//! HTTP surface tests
//!
//! Drives the full router with in-memory gateways:
//! - Enquiry submission, listing, and status boundaries
//! - Admin directory, catalog, and assistant routes
//! - Error bodies carry `error` and `code`

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use dirdesk::{
    create_app,
    gateway::{Gateways, MemoryGateway, Operation},
    AppState, Config,
};
use serde_json::{json, Value};
use shared::models::{AnalyticsEvent, Business, Category, Enquiry, EnquiryStatus, User};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    app: Router,
    enquiries: Arc<MemoryGateway<Enquiry>>,
    analytics: Arc<MemoryGateway<AnalyticsEvent>>,
    providers: Arc<MemoryGateway<Business>>,
}

fn provider(name: &str, city: &str, minutes_ago: i64) -> Business {
    Business {
        id: Uuid::new_v4(),
        business_name: name.to_string(),
        city: Some(city.to_string()),
        phone: None,
        is_verified: false,
        created_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
        slug: name.to_lowercase().replace(' ', "-"),
    }
}

fn user(email: &str, name: &str, minutes_ago: i64) -> User {
    User {
        id: Uuid::new_v4(),
        email: Some(email.to_string()),
        name: Some(name.to_string()),
        role: "customer".to_string(),
        city: None,
        created_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
    }
}

fn category(name: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase(),
        icon: None,
        description: None,
    }
}

fn test_app(businesses: Vec<Business>) -> TestApp {
    let enquiries = Arc::new(MemoryGateway::<Enquiry>::new());
    let analytics = Arc::new(MemoryGateway::<AnalyticsEvent>::new());
    let providers = Arc::new(MemoryGateway::with_rows(businesses));
    let gateways = Gateways {
        enquiries: enquiries.clone(),
        analytics: analytics.clone(),
        providers: providers.clone(),
        users: Arc::new(MemoryGateway::with_rows(vec![
            user("asha@example.com", "Asha Rao", 30),
            user("vikram@example.com", "Vikram Singh", 5),
            user("meera@sample.org", "Meera Iyer", 10),
        ])),
        categories: Arc::new(MemoryGateway::with_rows(vec![
            category("Plumbing"),
            category("Electrician"),
            category("AC Repair"),
        ])),
    };

    let state = AppState::new(Config::default(), gateways, None).unwrap();

    TestApp {
        app: create_app(state),
        enquiries,
        analytics,
        providers,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

fn amit_shah(provider_id: Uuid) -> Value {
    json!({
        "provider_id": provider_id.to_string(),
        "customer_name": "Amit Shah",
        "customer_phone": "9876543210",
        "message": "Need AC repair urgently please"
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_storage_backend() {
    let t = test_app(Vec::new());

    let (status, body) = send(&t.app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["database"], "not configured");
}

// ============================================================================
// Enquiries
// ============================================================================

#[tokio::test]
async fn test_submit_enquiry_end_to_end() {
    let t = test_app(Vec::new());
    let provider_id = Uuid::new_v4();

    let (status, body) = send(&t.app, "POST", "/api/v1/enquiries", Some(amit_shah(provider_id))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "success": true }));

    let rows = t.enquiries.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, EnquiryStatus::New);
    let events = t.analytics.rows();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "enquiry_click");

    let (status, body) = send(
        &t.app,
        "GET",
        &format!("/api/v1/providers/{provider_id}/enquiries"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enquiries"][0]["customer_name"], "Amit Shah");
    assert_eq!(body["enquiries"][0]["status"], "new");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_invalid_enquiry_returns_field_errors() {
    let t = test_app(Vec::new());
    let mut input = amit_shah(Uuid::new_v4());
    input["customer_name"] = json!("A");
    input["customer_email"] = json!("not-an-email");

    let (status, body) = send(&t.app, "POST", "/api/v1/enquiries", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"],
        "Name must be at least 2 characters; Please enter a valid email"
    );
    assert_eq!(body["fields"][0]["field"], "customer_name");
    assert_eq!(body["fields"][1]["field"], "customer_email");
    assert_eq!(t.enquiries.calls(Operation::Insert), 0);
}

#[tokio::test]
async fn test_store_failure_on_submit_is_bad_gateway() {
    let t = test_app(Vec::new());
    t.enquiries.fail_next(Operation::Insert, "relation \"enquiries\" does not exist");

    let (status, body) = send(&t.app, "POST", "/api/v1/enquiries", Some(amit_shah(Uuid::new_v4()))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "relation \"enquiries\" does not exist");
    assert_eq!(body["code"], "PERSISTENCE_ERROR");
}

#[tokio::test]
async fn test_list_failure_still_renders() {
    let t = test_app(Vec::new());
    t.enquiries.fail_next(Operation::Select, "connection refused");

    let (status, body) = send(
        &t.app,
        "GET",
        &format!("/api/v1/providers/{}/enquiries", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enquiries"], json!([]));
    assert_eq!(body["error"], "connection refused");
}

#[tokio::test]
async fn test_status_update_boundary() {
    let t = test_app(Vec::new());
    send(&t.app, "POST", "/api/v1/enquiries", Some(amit_shah(Uuid::new_v4()))).await;
    let id = t.enquiries.rows()[0].id;

    let (status, body) = send(
        &t.app,
        "PUT",
        &format!("/api/v1/enquiries/{id}/status"),
        Some(json!({ "status": "contacted" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["revalidate"], json!(["/profile"]));
    assert_eq!(t.enquiries.rows()[0].status, EnquiryStatus::Contacted);

    let (status, _) = send(
        &t.app,
        "PUT",
        &format!("/api/v1/enquiries/{id}/status"),
        Some(json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &t.app,
        "PUT",
        &format!("/api/v1/enquiries/{}/status", Uuid::new_v4()),
        Some(json!({ "status": "closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// ============================================================================
// Admin directory
// ============================================================================

#[tokio::test]
async fn test_admin_directory_flow() {
    let businesses = vec![
        provider("Springfield Movers", "Capital City", 1),
        provider("Kwik Repairs", "Springfield", 2),
        provider("Moe's Plumbing", "Shelbyville", 3),
    ];
    let target = businesses[1].id;
    let t = test_app(businesses);

    let (status, body) = send(&t.app, "POST", "/api/v1/admin/businesses/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total_items"], 3);

    let (status, body) = send(&t.app, "GET", "/api/v1/admin/businesses?q=springfield", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["query"], "springfield");
    assert_eq!(body["pagination"]["page"], 1);

    let (status, body) = send(
        &t.app,
        "POST",
        &format!("/api/v1/admin/businesses/{target}/verification"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Business verified successfully!");
    assert_eq!(body["is_verified"], true);
    assert_eq!(body["business"]["is_verified"], true);

    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/api/v1/admin/businesses/{target}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Business deleted successfully!");
    assert_eq!(t.providers.rows().len(), 2);

    let (_, body) = send(&t.app, "GET", "/api/v1/admin/businesses?q=springfield", None).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_directory_query_does_not_leak_between_requests() {
    let businesses: Vec<Business> = (0..12)
        .map(|i| provider(&format!("Shop {i}"), "Springfield", i))
        .collect();
    let t = test_app(businesses);
    send(&t.app, "POST", "/api/v1/admin/businesses/refresh", None).await;

    let (_, body) = send(&t.app, "GET", "/api/v1/admin/businesses?q=zzz&page=2", None).await;
    assert_eq!(body["query"], "zzz");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));

    let (status, body) = send(&t.app, "GET", "/api/v1/admin/businesses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "");
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(10));
}

#[tokio::test]
async fn test_directory_page_beyond_range_is_clamped() {
    let businesses: Vec<Business> = (0..12)
        .map(|i| provider(&format!("Shop {i}"), "Springfield", i))
        .collect();
    let t = test_app(businesses);
    send(&t.app, "POST", "/api/v1/admin/businesses/refresh", None).await;

    let (status, body) = send(
        &t.app,
        "GET",
        "/api/v1/admin/businesses?page=4294967295",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_failed_toggle_is_reported() {
    let businesses = vec![provider("Kwik Repairs", "Springfield", 2)];
    let target = businesses[0].id;
    let t = test_app(businesses);
    send(&t.app, "POST", "/api/v1/admin/businesses/refresh", None).await;
    t.providers.fail_next(Operation::Update, "network unreachable");

    let (status, body) = send(
        &t.app,
        "POST",
        &format!("/api/v1/admin/businesses/{target}/verification"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to update: network unreachable");

    let (_, body) = send(&t.app, "GET", "/api/v1/admin/businesses", None).await;
    assert_eq!(body["items"][0]["is_verified"], false);
}

// ============================================================================
// Catalog and assistant
// ============================================================================

#[tokio::test]
async fn test_user_catalog_is_newest_first_and_searchable() {
    let t = test_app(Vec::new());

    let (status, body) = send(&t.app, "GET", "/api/v1/admin/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"][0]["name"], "Vikram Singh");

    let (_, body) = send(&t.app, "GET", "/api/v1/admin/users?q=EXAMPLE.com", None).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_category_catalog_is_alphabetical() {
    let t = test_app(Vec::new());

    let (status, body) = send(&t.app, "GET", "/api/v1/admin/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, vec!["AC Repair", "Electrician", "Plumbing"]);

    let (_, body) = send(&t.app, "GET", "/api/v1/admin/categories?q=plumb", None).await;
    assert_eq!(body["total"], 1);

    // Whitespace is part of the query
    let (_, body) = send(&t.app, "GET", "/api/v1/admin/categories?q=%20plumb", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_assistant_without_endpoint_is_unavailable() {
    let t = test_app(Vec::new());

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/v1/admin/assistant",
        Some(json!({ "messages": [{ "role": "user", "content": "How many pending?" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}
