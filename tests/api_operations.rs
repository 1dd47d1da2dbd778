//! Wire-level tests for the per-resource api modules: paths, verbs, query
//! strings and payload shapes.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opticini_studio::api::{admin_tools, compliance, databases, roles, sites};
use opticini_studio::cli::roles::{self as roles_cli, RolesCommand};
use opticini_studio::client::{ApiClient, ApiError, MemoryTokenStore};
use opticini_studio::dashboard;
use opticini_studio::models::compliance::{ControlStatus, Severity};
use opticini_studio::models::database::{
    DatabaseConnectionUpdate, DatabaseEngine, NewDatabaseConnection,
};
use opticini_studio::models::monitor::{AlertType, EndpointUpdate};
use opticini_studio::models::roles::MatrixGrid;
use opticini_studio::models::site::{SiteStatus, SiteUpdate};

fn client(server: &MockServer) -> ApiClient {
    let store = Arc::new(MemoryTokenStore::with_tokens(Some("valid-token"), None));
    ApiClient::new(&server.uri(), store).unwrap()
}

#[tokio::test]
async fn endpoints_are_listed_with_the_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin-tools/endpoints/"))
        .and(header("authorization", "Bearer valid-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "orders",
            "url": "https://api.example.com/orders/",
            "method": "GET",
            "expected_status": 200,
            "is_active": true,
            "last_check": {
                "id": 90,
                "endpoint_id": 1,
                "status_code": 200,
                "response_time_ms": 95.2,
                "success": true,
                "error_message": null,
                "checked_at": "2026-08-30T12:00:00Z"
            }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let endpoints = admin_tools::list_endpoints(&client(&server)).await.unwrap();
    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].last_check.as_ref().unwrap().status_code, Some(200));
}

#[tokio::test]
async fn resolving_an_alert_posts_to_the_resolve_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin-tools/alerts/9/resolve/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "endpoint_id": 2,
            "alert_type": "down",
            "message": "endpoint unreachable",
            "resolved": true,
            "created_at": "2026-08-30T10:00:00Z",
            "check": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let alert = admin_tools::resolve_alert(&client(&server), 9).await.unwrap();
    assert!(alert.resolved);
    assert_eq!(alert.alert_type, AlertType::Down);
}

#[tokio::test]
async fn unresolved_alerts_filter_is_applied_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin-tools/alerts/"))
        .and(query_param("resolved", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = admin_tools::list_alerts(&client(&server), false).await.unwrap();
    assert!(alerts.is_empty());
}

#[tokio::test]
async fn control_filters_become_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/compliance/controls/"))
        .and(query_param("framework", "SOC2"))
        .and(query_param("status", "fail"))
        .and(query_param("severity", "critical"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = compliance::ControlFilter {
        framework: Some("SOC2".into()),
        status: Some(ControlStatus::Fail),
        severity: Some(Severity::Critical),
    };
    compliance::list_controls(&client(&server), &filter).await.unwrap();
}

#[tokio::test]
async fn framework_toggle_patches_the_update_action() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/compliance/frameworks/3/update/"))
        .and(body_json(json!({"enabled": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "code": "ISO27001",
            "name": "ISO 27001",
            "category": "security",
            "enabled": false,
            "compliance_percentage": 81.4,
            "controls_total": 114,
            "controls_passed": 90,
            "controls_failed": 12,
            "controls_partial": 7,
            "controls_not_evaluated": 5,
            "last_audit_at": "2026-06-01T00:00:00Z",
            "next_audit_at": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let framework = compliance::update_framework(
        &client(&server),
        3,
        &opticini_studio::models::compliance::FrameworkUpdate { enabled: false },
    )
    .await
    .unwrap();
    assert!(!framework.enabled);
}

#[tokio::test]
async fn queries_are_posted_to_the_connection_query_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/databases/5/query/"))
        .and(body_json(json!({"query": "select id, name from users limit 2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "columns": ["id", "name"],
            "rows": [[1, "alice"], [2, "bob"]],
            "row_count": 2,
            "duration_ms": 3.7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = databases::run_query(&client(&server), 5, "select id, name from users limit 2")
        .await
        .unwrap();
    assert_eq!(result.row_count, 2);
    assert_eq!(result.columns, vec!["id", "name"]);
}

#[tokio::test]
async fn validation_errors_surface_the_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/databases/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "name already exists"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = NewDatabaseConnection {
        name: "main".into(),
        engine: DatabaseEngine::Postgresql,
        host: "db.internal".into(),
        port: 5432,
        database: "app".into(),
        username: "reader".into(),
        password: "secret".into(),
    };
    let err = databases::create_connection(&client(&server), &payload)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::Api { status: 400, ref message } if message == "name already exists")
    );
}

#[tokio::test]
async fn deleting_an_endpoint_accepts_an_empty_204() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin-tools/endpoints/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    admin_tools::delete_endpoint(&client(&server), 4).await.unwrap();
}

#[tokio::test]
async fn endpoint_update_patches_only_the_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin-tools/endpoints/4/"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "name": "orders",
            "url": "https://api.example.com/orders/",
            "method": "GET",
            "expected_status": 200,
            "is_active": false,
            "last_check": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = EndpointUpdate {
        name: None,
        url: None,
        method: None,
        expected_status: None,
        is_active: Some(false),
    };
    let endpoint = admin_tools::update_endpoint(&client(&server), 4, &payload)
        .await
        .unwrap();
    assert!(!endpoint.is_active);
}

#[tokio::test]
async fn connection_update_puts_to_the_connection_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/databases/5/"))
        .and(body_json(json!({"host": "db2.internal", "password": "rotated"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "main",
            "engine": "postgresql",
            "host": "db2.internal",
            "port": 5432,
            "database": "app",
            "username": "reader"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = DatabaseConnectionUpdate {
        name: None,
        host: Some("db2.internal".into()),
        port: None,
        database: None,
        username: None,
        password: Some("rotated".into()),
    };
    let connection = databases::update_connection(&client(&server), 5, &payload)
        .await
        .unwrap();
    assert_eq!(connection.host, "db2.internal");
}

#[tokio::test]
async fn site_rename_patches_the_site_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/monitor/sites/7/"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "renamed",
            "url": "https://example.com",
            "status": "up",
            "uptime_percentage": 99.95,
            "last_checked_at": "2026-08-30T11:59:00Z",
            "response_time_ms": 182.0,
            "ssl_valid": true,
            "ssl_expires_at": "2026-11-01T00:00:00Z",
            "error_message": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = SiteUpdate {
        name: Some("renamed".into()),
        url: None,
    };
    let site = sites::update_site(&client(&server), 7, &payload).await.unwrap();
    assert_eq!(site.name, "renamed");
}

#[tokio::test]
async fn site_recheck_returns_the_fresh_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/monitor/sites/7/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "marketing",
            "url": "https://example.com",
            "status": "down",
            "uptime_percentage": 98.3,
            "last_checked_at": "2026-08-30T12:05:00Z",
            "response_time_ms": null,
            "ssl_valid": true,
            "ssl_expires_at": "2026-11-01T00:00:00Z",
            "error_message": "503 from origin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let site = sites::check_site(&client(&server), 7).await.unwrap();
    assert_eq!(site.status, SiteStatus::Down);
    assert_eq!(site.error_message.as_deref(), Some("503 from origin"));
}

#[tokio::test]
async fn matrix_update_sends_only_the_diff() {
    let server = MockServer::start().await;
    let matrix_body = json!({
        "items": [
            {"code": "monitoring", "label": "API Monitoring"},
            {"code": "compliance", "label": "Compliance"}
        ],
        "roles": [
            {"role_id": 1, "role_name": "admin", "permissions": ["monitoring", "compliance"]},
            {"role_id": 2, "role_name": "viewer", "permissions": ["monitoring"]}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/api/roles/sidebar-matrix/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&matrix_body))
        .expect(1)
        .mount(&server)
        .await;
    // Only the viewer role changed, so only it appears in the payload.
    Mock::given(method("POST"))
        .and(path("/api/roles/sidebar-matrix/update/"))
        .and(body_json(json!({
            "roles": [{"role_id": 2, "permissions": ["compliance", "monitoring"]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&matrix_body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let matrix = roles::get_sidebar_matrix(&client).await.unwrap();
    let mut grid = MatrixGrid::from_matrix(&matrix);
    grid.set(2, "compliance", true);
    let updates = grid.diff(&matrix);
    roles::update_sidebar_matrix(&client, &updates).await.unwrap();
}

#[tokio::test]
async fn granting_to_an_unknown_role_fails_before_any_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/roles/sidebar-matrix/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"code": "monitoring", "label": "API Monitoring"}],
            "roles": [{"role_id": 1, "role_name": "admin", "permissions": []}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/roles/sidebar-matrix/update/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = roles_cli::run(
        &client(&server),
        RolesCommand::Grant {
            role_id: 99,
            code: "monitoring".into(),
        },
        false,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Config(msg) if msg.contains("unknown role id 99")));
}

#[tokio::test]
async fn apply_batches_grants_and_revokes_into_one_update() {
    let server = MockServer::start().await;
    let matrix_body = json!({
        "items": [
            {"code": "monitoring", "label": "API Monitoring"},
            {"code": "compliance", "label": "Compliance"}
        ],
        "roles": [
            {"role_id": 1, "role_name": "admin", "permissions": ["monitoring", "compliance"]},
            {"role_id": 2, "role_name": "viewer", "permissions": ["monitoring"]}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/api/roles/sidebar-matrix/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&matrix_body))
        .expect(1)
        .mount(&server)
        .await;
    // Both roles changed; one POST carries both diffs.
    Mock::given(method("POST"))
        .and(path("/api/roles/sidebar-matrix/update/"))
        .and(body_json(json!({
            "roles": [
                {"role_id": 1, "permissions": ["compliance"]},
                {"role_id": 2, "permissions": ["compliance", "monitoring"]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&matrix_body))
        .expect(1)
        .mount(&server)
        .await;

    roles_cli::run(
        &client(&server),
        RolesCommand::Apply {
            grants: vec!["2:compliance".into()],
            revokes: vec!["1:monitoring".into()],
        },
        false,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn overview_combines_all_four_parallel_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin-tools/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_endpoints": 2,
            "active_endpoints": 2,
            "healthy_endpoints": 1,
            "failing_endpoints": 1,
            "open_alerts": 1,
            "avg_response_time_ms": 150.0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin-tools/endpoints/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin-tools/checks/"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin-tools/alerts/"))
        .and(query_param("resolved", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "endpoint_id": 2,
            "alert_type": "slow",
            "message": "p95 above threshold",
            "resolved": false,
            "created_at": "2026-08-30T09:00:00Z",
            "check": null
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let overview = dashboard::load_overview(&client(&server)).await.unwrap();
    assert_eq!(overview.stats.total_endpoints, 2);
    assert_eq!(overview.open_alerts.len(), 1);
    assert_eq!(overview.open_alerts[0].alert_type, AlertType::Slow);
}
