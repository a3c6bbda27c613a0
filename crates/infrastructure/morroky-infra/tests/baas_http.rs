use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use morroky_config::BaasConfig;
use morroky_core::{AuthChange, MerchantFilter, UploadFile};
use morroky_infra::{BaasClient, BaasError};
use serde_json::{json, Value};

#[derive(Default)]
struct Seen {
    queries: Vec<Vec<(String, String)>>,
    bearers: Vec<String>,
    uploads: Vec<String>,
}

type Shared = Arc<Mutex<Seen>>;

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn token(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret1" {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": "tok-123",
                "refresh_token": "r",
                "user": { "id": "user-1", "email": body["email"] }
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })),
        )
    }
}

async fn start_server(seen: Shared) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let merchants_seen = seen.clone();
    let products_seen = seen.clone();
    let upload_seen = seen.clone();

    let app = Router::new()
        .route("/auth/v1/token", post(token))
        .route(
            "/rest/v1/merchants",
            get(move |headers: HeaderMap, Query(q): Query<Vec<(String, String)>>| {
                let seen = merchants_seen.clone();
                async move {
                    let mut s = seen.lock().unwrap();
                    s.queries.push(q);
                    s.bearers.push(bearer(&headers));
                    Json(json!([
                        { "id": "m1", "name": "Bazar", "status": "verified",
                          "location": { "streetId": "omar-khayam" } }
                    ]))
                }
            }),
        )
        .route(
            "/rest/v1/products",
            get(move |Query(q): Query<Vec<(String, String)>>| {
                let seen = products_seen.clone();
                async move {
                    seen.lock().unwrap().queries.push(q);
                    Json(json!([]))
                }
            }),
        )
        .route(
            "/storage/v1/object/image/*path",
            post(move |axum::extract::Path(path): axum::extract::Path<String>| {
                let seen = upload_seen.clone();
                async move {
                    seen.lock().unwrap().uploads.push(path);
                    Json(json!({ "Key": "image/x" }))
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

fn client(addr: SocketAddr) -> BaasClient {
    BaasClient::new(
        reqwest::Client::new(),
        &BaasConfig::new(format!("http://{addr}/"), "anon-key"),
    )
}

#[tokio::test]
async fn sign_in_keeps_session_and_announces_it() {
    let seen = Shared::default();
    let (addr, handle) = start_server(seen.clone()).await;
    let baas = client(addr);
    let mut changes = baas.subscribe_auth();

    let user = baas.sign_in("a@b.ma", "secret1").await.unwrap();
    assert_eq!(user.id, "user-1");
    assert_eq!(baas.session().unwrap().access_token, "tok-123");
    assert_eq!(changes.recv().await.unwrap(), AuthChange::SignedIn(user));

    baas.list_merchants(&MerchantFilter::default()).await.unwrap();
    assert_eq!(seen.lock().unwrap().bearers, vec!["Bearer tok-123".to_string()]);

    handle.abort();
}

#[tokio::test]
async fn rejected_sign_in_surfaces_provider_message() {
    let (addr, handle) = start_server(Shared::default()).await;
    let baas = client(addr);

    let err = baas.sign_in("a@b.ma", "wrong").await.unwrap_err();
    match &err {
        BaasError::Api { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Invalid login credentials");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(baas.session().is_none());

    handle.abort();
}

#[tokio::test]
async fn merchant_filters_become_eq_predicates() {
    let seen = Shared::default();
    let (addr, handle) = start_server(seen.clone()).await;
    let baas = client(addr);

    let filter = MerchantFilter {
        street_id: Some("omar-khayam".into()),
        alley: Some(String::new()),
        ..MerchantFilter::verified()
    };
    let merchants = baas.list_merchants(&filter).await.unwrap();
    assert_eq!(merchants.len(), 1);
    assert_eq!(merchants[0].location.street_id.as_deref(), Some("omar-khayam"));

    let q = seen.lock().unwrap().queries[0].clone();
    assert!(q.contains(&("select".into(), "*".into())));
    assert!(q.contains(&("status".into(), "eq.verified".into())));
    assert!(q.contains(&("location->>streetId".into(), "eq.omar-khayam".into())));
    assert!(!q.iter().any(|(k, _)| k == "location->>alley"));
    // Anonymous requests fall back to the project key.
    assert_eq!(seen.lock().unwrap().bearers, vec!["Bearer anon-key".to_string()]);

    handle.abort();
}

#[tokio::test]
async fn missing_product_is_none_not_error() {
    let seen = Shared::default();
    let (addr, handle) = start_server(seen.clone()).await;
    let baas = client(addr);

    let product = baas.product_by_id(&"p-404".to_string()).await.unwrap();
    assert!(product.is_none());
    let q = seen.lock().unwrap().queries[0].clone();
    assert!(q.contains(&("id".into(), "eq.p-404".into())));
    assert!(q.contains(&("limit".into(), "1".into())));

    handle.abort();
}

#[tokio::test]
async fn upload_returns_public_url_inside_folder() {
    let seen = Shared::default();
    let (addr, handle) = start_server(seen.clone()).await;
    let baas = client(addr);

    let file = UploadFile::new("shop.png", "image/png", vec![0x89, 0x50]);
    let url = baas.upload_image(&file, "logo").await.unwrap();

    let uploaded = seen.lock().unwrap().uploads[0].clone();
    assert!(uploaded.starts_with("logo/"));
    assert!(uploaded.ends_with(".png"));
    assert_eq!(
        url,
        format!("http://{addr}/storage/v1/object/public/image/{uploaded}")
    );

    handle.abort();
}

#[tokio::test]
async fn sign_out_without_session_is_quiet() {
    let (addr, handle) = start_server(Shared::default()).await;
    let baas = client(addr);
    let mut changes = baas.subscribe_auth();

    baas.sign_out().await.unwrap();
    assert!(changes.try_recv().is_err());
    assert_eq!(baas.current_user().await.unwrap(), None);

    handle.abort();
}
