//! Integration tests for the campus gateway.
//!
//! The router tests run against the in-memory store. The Postgres tests need
//! a `DATABASE_URL` pointing at a database with the `users` and
//! `user_profiles` tables already created.
//! Run them with: cargo test --test integration -- --ignored

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use campus_gateway::api::{create_router, AppState};
use campus_gateway::config::Config;
use campus_gateway::models::{User, UserFields, UserProfile, UserProfileFields};
use campus_gateway::store::{MemoryStore, PgStore, Store};

/// Send one request and return status plus raw body.
async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

/// Error bodies carry `error`; success bodies never do.
fn assert_error_field_matches_status(status: StatusCode, bytes: &[u8]) {
    let has_error = serde_json::from_slice::<Value>(bytes)
        .map(|v| v.get("error").is_some())
        .unwrap_or(false);
    assert_eq!(
        has_error,
        status.is_client_error() || status.is_server_error(),
        "status {} with body {}",
        status,
        String::from_utf8_lossy(bytes)
    );
}

#[tokio::test]
async fn user_lifecycle_over_memory_store() {
    let store = MemoryStore::new();
    let app = create_router(AppState::new(Arc::new(store.clone())));

    let user = json!({
        "id": 42,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "phone_number": "555-0100",
        "hometown": "London",
    });

    let (status, body) = call(&app, Method::POST, "/api/users", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(String::from_utf8(body).unwrap(), "User added with ID: 42");

    let (status, body) = call(&app, Method::GET, "/api/users/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), user);

    let (status, body) = call(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!([user]));

    let (status, _) = call(&app, Method::DELETE, "/api/users/42", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::DELETE, "/api/users/42", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, "/api/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body), json!({ "error": "User not found!" }));
}

#[tokio::test]
async fn profiles_list_in_id_order() {
    let store = MemoryStore::new();
    let app = create_router(AppState::new(Arc::new(store.clone())));

    for id in [30, 10, 20] {
        let body = json!({ "id": id, "user_id": 1, "connections": [id + 1, id - 1] });
        let (status, _) = call(&app, Method::POST, "/api/user_profiles", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call(&app, Method::GET, "/api/user_profiles", None).await;
    assert_eq!(status, StatusCode::OK);

    let profiles: Vec<UserProfile> = serde_json::from_slice(&body).unwrap();
    let ids: Vec<i32> = profiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 20, 30]);
    assert_eq!(profiles[0].fields.connections, Some(vec![11, 9]));
}

#[tokio::test]
async fn every_id_route_rejects_non_numeric_ids() {
    let store = MemoryStore::new();
    let app = create_router(AppState::new(Arc::new(store.clone())));

    for (base, segment) in [
        ("/api/users", "abc"),
        ("/api/users", "%FF"),
        ("/api/user_profiles", "abc"),
        ("/api/user_profiles", "%FF"),
    ] {
        let uri = format!("{}/{}", base, segment);
        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, Some(json!({}))),
            (Method::DELETE, None),
        ] {
            let (status, bytes) = call(&app, method, &uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                as_json(&bytes),
                json!({ "error": "Requested with an invalid ID!" })
            );
        }
    }

    assert_eq!(store.statements(), 0);
}

#[tokio::test]
async fn error_field_only_on_failures() {
    let store = MemoryStore::new();
    store.seed_user(User::new(1, UserFields::default()));
    let app = create_router(AppState::new(Arc::new(store)));

    for (method, uri, body) in [
        (Method::GET, "/api", None),
        (Method::GET, "/api/users", None),
        (Method::GET, "/api/users/1", None),
        (Method::GET, "/api/users/2", None),
        (Method::GET, "/api/users/x", None),
        (Method::PUT, "/api/users/2", Some(json!({}))),
        (Method::POST, "/api/users", Some(json!({ "id": 1 }))),
        (Method::GET, "/api/nowhere", None),
        (Method::PATCH, "/api/users/1", None),
    ] {
        let (status, bytes) = call(&app, method, uri, body).await;
        assert_error_field_matches_status(status, &bytes);
    }
}

/// Build a Postgres store from the environment, if configured.
fn pg_store() -> Option<PgStore> {
    dotenvy::dotenv().ok();
    let config = Config::load().ok()?;
    config.validate().ok()?;
    PgStore::connect_lazy(&config).ok()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_ping() {
    let store = match pg_store() {
        Some(s) => s,
        None => {
            println!("Skipping: DATABASE_URL not set or invalid");
            return;
        }
    };

    let result = store.ping().await;
    assert!(result.is_ok(), "Ping failed: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_user_round_trip() {
    let store = match pg_store() {
        Some(s) => s,
        None => {
            println!("Skipping: DATABASE_URL not set or invalid");
            return;
        }
    };

    let id = 990_001;
    store.delete_user(id).await.unwrap();

    let user = User::new(
        id,
        UserFields {
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            email: Some("a@b.com".into()),
            phone_number: Some("555".into()),
            hometown: Some("X".into()),
        },
    );
    store.insert_user(&user).await.unwrap();
    assert_eq!(store.get_user(id).await.unwrap(), Some(user));

    let changed = UserFields {
        hometown: Some("Y".into()),
        ..Default::default()
    };
    assert_eq!(store.update_user(id, &changed).await.unwrap(), 1);
    assert_eq!(store.get_user(id).await.unwrap().unwrap().fields, changed);

    assert_eq!(store.delete_user(id).await.unwrap(), 1);
    assert_eq!(store.delete_user(id).await.unwrap(), 0);
    assert_eq!(store.update_user(id, &changed).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_profile_round_trip() {
    let store = match pg_store() {
        Some(s) => s,
        None => {
            println!("Skipping: DATABASE_URL not set or invalid");
            return;
        }
    };

    let id = 990_002;
    store.delete_user_profile(id).await.unwrap();

    let profile = UserProfile::new(
        id,
        UserProfileFields {
            user_id: Some(990_001),
            major: Some("History".into()),
            class_of: Some(2027),
            connections: Some(vec![3, 1, 2]),
            ..Default::default()
        },
    );
    store.insert_user_profile(&profile).await.unwrap();
    assert_eq!(store.get_user_profile(id).await.unwrap(), Some(profile));

    // Duplicate primary key surfaces as a store error.
    assert!(store
        .insert_user_profile(&UserProfile::new(id, UserProfileFields::default()))
        .await
        .is_err());

    let ids: Vec<i32> = store
        .list_user_profiles()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(store.delete_user_profile(id).await.unwrap(), 1);
}
