//! Integration tests against a mock backend.
//!
//! Each test starts a `wiremock` server, points a client at it, and checks
//! the requests the client sends and how list state reacts to responses.

use dam::query::{ACTION_TYPE, CATEGORY, SEARCH};
use dam::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Dam {
    let config = DamConfig {
        base_url: server.uri(),
        token: Some("secret-token".to_string()),
        page_size: 20,
        export_page_size: 10_000,
    };
    Dam::from_config(&config)
}

fn log_json(id: u64, action: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": "ana",
        "action_type": action,
        "description": format!("entry {id}"),
        "ip_address": null,
        "timestamp": "2024-06-15T12:00:00Z"
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_sends_token_and_active_filters_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activity/logs/"))
        .and(header("Authorization", "Token secret-token"))
        .and(query_param("search", "logo"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([log_json(1, "upload")])))
        .expect(1)
        .mount(&server)
        .await;

    let dam = client(&server);
    let mut logs = dam.activity_log();
    logs.set_filter(SEARCH, "logo");
    logs.set_filter(ACTION_TYPE, "");
    assert!(logs.apply_filters(&dam.http_client).await);
    assert_eq!(logs.state(), &LoadState::Ready);
    assert_eq!(logs.items().len(), 1);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("search=logo"));
    assert!(!query.contains("action_type"));
}

#[tokio::test]
async fn test_bare_array_synthesizes_result_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "ana", "email": "ana@example.com", "role": "Admin"},
            {"id": 2, "username": "bo", "email": "bo@example.com", "role": "Editor"},
            {"id": 3, "username": "cy", "email": "cy@example.com", "role": "Viewer"}
        ])))
        .mount(&server)
        .await;

    let dam = client(&server);
    let mut users = dam.user_list();
    users.fetch(&dam.http_client, 1).await;

    let page = users.result_page().unwrap();
    assert_eq!(page.count, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 1);
}

#[tokio::test]
async fn test_unrecognized_shape_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let dam = client(&server);
    let err = dam
        .http_client
        .list_assets(&FilterSet::new(), Some(1), 20)
        .await
        .unwrap_err();
    assert!(matches!(err, DamError::Contract(_)));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unauthorized_keeps_stale_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activity/logs/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([log_json(1, "login"), log_json(2, "view")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/activity/logs/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let dam = client(&server);
    let mut logs = dam.activity_log();
    logs.fetch(&dam.http_client, 1).await;
    assert_eq!(logs.items().len(), 2);

    logs.fetch(&dam.http_client, 1).await;
    assert!(matches!(logs.state(), LoadState::Error(_)));
    assert!(logs.error_message().unwrap().contains("unauthorized"));
    assert_eq!(logs.items().len(), 2);
}

#[tokio::test]
async fn test_forbidden_maps_to_forbidden_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/assets/9/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let dam = client(&server);
    let err = dam.delete_asset(9).await.unwrap_err();
    assert!(matches!(err, DamError::Forbidden(_)));
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_export_writes_dated_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activity/logs/"))
        .and(query_param("page_size", "10000"))
        .and(query_param("action_type", "view"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [log_json(1, "view"), log_json(2, "view")],
            "count": 2,
            "next": null,
            "previous": null
        })))
        .mount(&server)
        .await;

    let dam = client(&server);
    let dir = tempfile::tempdir().unwrap();
    let filters = FilterSet::new().with(ACTION_TYPE, "view");
    let outcome = dam.export::<ActivityLog>(&filters, dir.path()).await;

    let (path, rows) = match outcome {
        ExportOutcome::Written { path, rows } => (path, rows),
        other => panic!("expected a written export, got {other:?}"),
    };
    assert_eq!(rows, 2);
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    let today = chrono::Utc::now().date_naive();
    assert_eq!(name, format!("activity-logs-{}.csv", today.format("%Y-%m-%d")));

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("\"Timestamp\",\"User\",\"Action\",\"Description\",\"IP Address\""));
    assert!(text.contains("\"N/A\""));

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("page="));
}

#[tokio::test]
async fn test_export_with_no_rows_produces_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dam = client(&server);
    let dir = tempfile::tempdir().unwrap();
    let filters = FilterSet::new().with(CATEGORY, "Videos");
    let outcome = dam.export::<Asset>(&filters, dir.path()).await;

    assert_eq!(outcome, ExportOutcome::Empty);
    assert_eq!(outcome.message(), "No data to export");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_export_failure_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dam = client(&server);
    let dir = tempfile::tempdir().unwrap();
    let outcome = dam.export::<User>(&FilterSet::new(), dir.path()).await;
    assert_eq!(
        outcome,
        ExportOutcome::Failed("request failed with status 500".to_string())
    );
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_updates_session_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": 4,
            "username": "di",
            "role": "Editor"
        })))
        .mount(&server)
        .await;

    let mut dam = client(&server);
    let login = dam.login("di", "pw").await.unwrap();
    assert_eq!(login.role, Role::Editor);
    assert_eq!(dam.session().role, Some(Role::Editor));
    assert_eq!(dam.session().token.as_deref(), Some("secret-token"));
}

#[tokio::test]
async fn test_update_user_role_sends_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "username": "bo", "email": "bo@example.com", "role": "Editor"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dam = client(&server);
    let user = dam.update_user_role(2, Role::Editor).await.unwrap();
    assert_eq!(user.role, Role::Editor);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"role": "Editor"}));
}

#[tokio::test]
async fn test_upload_sends_sniffed_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/assets/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 30, "name": "logo", "file_type": "IMG", "category": "Images"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dam = client(&server);
    let meta = NewAsset {
        name: "logo".to_string(),
        tags: NewAsset::parse_tags("brand, print"),
        is_public: true,
        ..NewAsset::default()
    };
    let asset = dam
        .upload_asset("logo.png", vec![0x89, 0x50, 0x4e, 0x47], Some("image/png"), &meta)
        .await
        .unwrap();
    assert_eq!(asset.file_type, AssetKind::Image);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file_type\"\r\n\r\nIMG"));
    assert!(body.contains("name=\"category\"\r\n\r\nImages"));
    assert!(body.contains(r#"["brand","print"]"#));
}

#[tokio::test]
async fn test_upload_rejects_blank_name_without_request() {
    let server = MockServer::start().await;
    let dam = client(&server);
    let err = dam
        .upload_asset("a.pdf", vec![1], None, &NewAsset::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DamError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
