//! Integration tests for decoding backend JSON into the record types.
//!
//! Fixtures mirror what the REST backend's serializers emit, including the
//! three list envelope shapes.

use dam::types::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

#[test]
fn test_asset_full_record() {
    let json = r#"{
        "id": 12,
        "user": 3,
        "file": "http://127.0.0.1:8000/media/uploads/chair.glb",
        "name": "Chair",
        "description": "Oak chair, low poly",
        "file_type": "3D",
        "file_size": 2048000,
        "tags": ["furniture", "oak"],
        "keywords": "chair seat",
        "category": "3D Models",
        "created_at": "2024-06-15T12:30:45.123456Z",
        "updated_at": "2024-06-16T08:00:00Z",
        "thumbnail": null,
        "is_public": true,
        "preview_url": null,
        "polygon_count": 5120,
        "dimensions": "45x45x90"
    }"#;

    let asset: Asset = serde_json::from_str(json).unwrap();
    assert_eq!(asset.id, 12);
    assert_eq!(asset.file_type, AssetKind::Model3d);
    assert_eq!(asset.file_type.preview(), Preview::ModelViewer);
    assert_eq!(asset.tags, vec!["furniture", "oak"]);
    assert_eq!(asset.file_size, Some(2_048_000));
    assert_eq!(asset.polygon_count, Some(5120));
    assert_eq!(asset.is_public, Some(true));
    assert!(asset.thumbnail.is_none());
    assert_eq!(
        asset.created_at.unwrap().to_rfc3339(),
        "2024-06-15T12:30:45.123456+00:00"
    );

    let serialized = serde_json::to_string(&asset).unwrap();
    let asset2: Asset = serde_json::from_str(&serialized).unwrap();
    assert_eq!(asset2.file_type, AssetKind::Model3d);
    assert_eq!(asset2.category, asset.category);
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[test]
fn test_user_list_bare_array() {
    let body = json!([
        {"id": 1, "username": "ana", "email": "ana@example.com", "role": "Admin"},
        {"id": 2, "username": "bo", "email": "bo@example.com", "role": "Viewer"}
    ]);

    let listing: Listing<User> = normalize(body, 1, 20).unwrap();
    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].role, Role::Admin);
    assert_eq!(listing.page.count, 2);
    assert_eq!(listing.page.total_pages, 1);
    assert_eq!(listing.page.next, None);
}

#[test]
fn test_user_role_decodes_loosely() {
    let body = json!([
        {"id": 1, "username": "ana", "email": "", "role": "admin"},
        {"id": 2, "username": "bo", "email": "", "role": " editor"}
    ]);

    let listing: Listing<User> = normalize(body, 1, 20).unwrap();
    assert_eq!(listing.items[0].role, Role::Admin);
    assert_eq!(listing.items[1].role, Role::Editor);
    assert_eq!(
        serde_json::to_value(&listing.items[1]).unwrap()["role"],
        "Editor"
    );

    let bad = serde_json::from_value::<User>(
        json!({"id": 3, "username": "cy", "email": "", "role": "owner"}),
    );
    assert!(bad.is_err());
}

#[test]
fn test_login_response() {
    let login: LoginResponse =
        serde_json::from_str(r#"{"user_id": 7, "username": "cy", "role": "Editor"}"#).unwrap();
    assert_eq!(login.user_id, 7);
    assert_eq!(login.role, Role::Editor);
    assert!(login.token.is_none());
}

// ---------------------------------------------------------------------------
// ActivityLog
// ---------------------------------------------------------------------------

#[test]
fn test_activity_log_pagination_envelope() {
    let body = json!({
        "results": [
            {
                "id": 100,
                "username": "ana",
                "action_type": "login",
                "description": null,
                "ip_address": "192.168.1.20",
                "timestamp": "2024-06-15T12:30:45+02:00"
            }
        ],
        "pagination": {
            "count": 1,
            "next": null,
            "previous": null,
            "current_page": 1,
            "total_pages": 1
        }
    });

    let listing: Listing<ActivityLog> = normalize(body, 1, 20).unwrap();
    let log = &listing.items[0];
    assert_eq!(log.action_type, "login");
    assert_eq!(log.ip_address.as_deref(), Some("192.168.1.20"));
    assert!(log.description.is_none());
    assert_eq!(log.timestamp.to_rfc3339(), "2024-06-15T10:30:45+00:00");
    assert_eq!(listing.page.total_pages, 1);
}

#[test]
fn test_activity_log_count_envelope() {
    let results: Vec<_> = (1..=20)
        .map(|i| {
            json!({
                "id": i,
                "username": "bo",
                "action_type": "view",
                "timestamp": "2024-06-15T12:00:00Z"
            })
        })
        .collect();
    let body = json!({
        "results": results,
        "count": 47,
        "next": "http://127.0.0.1:8000/api/activity/logs/?page=2",
        "previous": null
    });

    let listing: Listing<ActivityLog> = normalize(body, 1, 20).unwrap();
    assert_eq!(listing.items.len(), 20);
    assert_eq!(listing.page.count, 47);
    assert_eq!(listing.page.total_pages, 3);
    assert_eq!(listing.page.current_page, 1);
    assert!(listing.page.next.is_some());
}
