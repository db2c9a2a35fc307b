#![allow(non_snake_case)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use quill_client::{pager, BlogApi, ClientError, Pager, PostQuery};
use quill_types::{LoginRequest, PaginatedResponse, Post, PostDraft};
use serde_json::json;

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<String>>>,
    likes: Arc<Mutex<HashMap<u64, HashSet<String>>>>,
}

impl Backend {
    fn record(&self, entry: String) {
        self.seen.lock().unwrap().push(entry);
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

fn sample_page(page: u32, title: &str) -> PaginatedResponse {
    PaginatedResponse {
        posts: vec![Post {
            id: 1,
            title: title.to_string(),
            ..Post::default()
        }],
        total_posts: 10,
        current_page: page,
        page_size: 9,
        total_pages: 2,
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer good-token")
}

async fn paginated(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<PaginatedResponse> {
    backend.record(format!("list page={} size={}", params["page"], params["size"]));
    let page = params["page"].parse().unwrap_or(1);
    Json(sample_page(page, "listed"))
}

async fn search(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<PaginatedResponse> {
    backend.record(format!("search q={} page={}", params["q"], params["page"]));
    Json(sample_page(1, "found"))
}

async fn single(Path(id): Path<u64>) -> Response {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"code": "NOT_FOUND", "message": "post not found"})),
        )
            .into_response();
    }
    if id == 500 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response();
    }
    Json(json!({
        "id": id,
        "title": "Threat modeling",
        "content": "<p>body</p>",
        "created_at": "2025-04-10T08:00:00Z",
        "updated_at": "2025-04-11T08:00:00Z",
        "like_count": 3
    }))
    .into_response()
}

/// Likes are keyed by client address, taken from `X-Forwarded-For` the way
/// a proxy-aware backend resolves it.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

async fn toggle_like(
    State(backend): State<Backend>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let ip = client_ip(&headers);
    let mut likes = backend.likes.lock().unwrap();
    let likers = likes.entry(id).or_default();
    if !likers.remove(&ip) {
        likers.insert(ip);
    }
    Json(json!({"success": true, "likes": likers.len()}))
}

async fn like_status(
    State(backend): State<Backend>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let ip = client_ip(&headers);
    let likes = backend.likes.lock().unwrap();
    let likers = likes.get(&id).cloned().unwrap_or_default();
    Json(json!({"has_liked": likers.contains(&ip), "likes": likers.len()}))
}

async fn login(Json(body): Json<LoginRequest>) -> Response {
    if body.password != "hunter2" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid credentials"})),
        )
            .into_response();
    }
    Json(json!({"token": "good-token"})).into_response()
}

async fn admin_posts(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([])).into_response()
}

async fn create_post(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    backend.record(format!(
        "create readTime={} isActive={}",
        body["readTime"], body["isActive"]
    ));
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 99,
            "title": body["title"],
            "content": body["content"],
            "created_at": "2025-05-01T00:00:00Z"
        })),
    )
        .into_response()
}

async fn upload(
    State(backend): State<Backend>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let fileName = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap_or_default();
        backend.record(format!("upload field={name} file={fileName} len={}", bytes.len()));
    }
    Json(json!({"url": "/api/uploads/images/cover.png", "filename": "cover.png"})).into_response()
}

async fn spawn_backend() -> (BlogApi, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/posts/paginated", get(paginated))
        .route("/api/posts/search", get(search))
        .route("/api/posts/:id", get(single))
        .route("/api/posts/:id/like", get(like_status).post(toggle_like))
        .route("/api/admin/login", post(login))
        .route("/api/admin/posts", get(admin_posts).post(create_post))
        .route("/api/admin/images/upload", post(upload))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (BlogApi::new(format!("http://{addr}/api/")), backend)
}

#[tokio::test]
async fn list_and_search_hit_their_endpoints() {
    let (api, backend) = spawn_backend().await;

    let listed = api.list_posts(2, 9).await.unwrap();
    assert_eq!(listed.current_page, 2);

    let found = api.search_posts("red team", 1, 9).await.unwrap();
    assert_eq!(found.posts[0].title, "found");

    assert_eq!(
        backend.seen(),
        vec!["list page=2 size=9".to_string(), "search q=red team page=1".to_string()]
    );
}

#[tokio::test]
async fn pager_drives_the_real_client() {
    let (api, backend) = spawn_backend().await;
    let mut pager = Pager::new(9);

    pager.load(&api).await;
    assert_eq!(pager.total_pages(), 2);
    assert!(pager.next_page());
    pager.load(&api).await;
    assert_eq!(pager.page(), 2);

    let query = PostQuery::new("osint", 1, 9);
    let response = pager::fetch(&api, &query).await.unwrap();
    assert_eq!(response.posts[0].title, "found");

    assert_eq!(backend.seen().len(), 3);
}

#[tokio::test]
async fn error_bodies_become_messages() {
    let (api, _) = spawn_backend().await;

    match api.get_post(404).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "post not found");
        }
        other => panic!("expected api error, got {other:?}"),
    }

    match api.get_post(500).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected api error, got {other:?}"),
    }

    let post = api.get_post(7).await.unwrap();
    assert_eq!(post.content, "<p>body</p>");
    assert!(post.updated_at.is_some());
}

#[tokio::test]
async fn unauthorized_is_distinguished() {
    let (api, _) = spawn_backend().await;

    let err = api.admin_posts("stale-token").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(err.is_unauthorized());

    assert!(api.admin_posts("good-token").await.unwrap().is_empty());
}

#[tokio::test]
async fn login_returns_token() {
    let (api, _) = spawn_backend().await;

    let token = api
        .login(&LoginRequest {
            username: "admin".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();
    assert_eq!(token.token, "good-token");

    let rejected = api
        .login(&LoginRequest {
            username: "admin".into(),
            password: "nope".into(),
        })
        .await;
    assert!(matches!(rejected, Err(ClientError::Unauthorized)));
}

#[tokio::test]
async fn admin_create_sends_backend_keys() {
    let (api, backend) = spawn_backend().await;
    let draft = PostDraft {
        title: "New".into(),
        content: "<p>hi</p>".into(),
        read_time: 4,
        is_active: true,
        ..PostDraft::default()
    };

    let created = api.create_post("good-token", &draft).await.unwrap();
    assert_eq!(created.id, 99);
    assert_eq!(backend.seen(), vec!["create readTime=4 isActive=true".to_string()]);
}

#[tokio::test]
async fn like_and_upload_round_trip() {
    let (api, backend) = spawn_backend().await;

    let like = api.toggle_like(41, Some("203.0.113.7")).await.unwrap();
    assert_eq!(like.likes, 1);
    assert!(like.has_liked.is_none());

    let uploaded = api
        .upload_image("good-token", "cover.png", Some("image/png"), vec![1, 2, 3])
        .await
        .unwrap();
    assert_eq!(uploaded.filename, "cover.png");
    assert_eq!(
        backend.seen(),
        vec!["upload field=image file=cover.png len=3".to_string()]
    );
}

#[tokio::test]
async fn each_visitor_likes_on_their_own_behalf() {
    let (api, _) = spawn_backend().await;
    let alice = Some("198.51.100.4");
    let bob = Some("203.0.113.9");

    assert_eq!(api.toggle_like(5, alice).await.unwrap().likes, 1);
    assert_eq!(api.toggle_like(5, bob).await.unwrap().likes, 2);

    let status = api.like_status(5, alice).await.unwrap();
    assert!(status.has_liked);
    assert_eq!(status.likes, 2);

    // an address that never liked sees the total but no like of its own
    let stranger = api.like_status(5, Some("192.0.2.1")).await.unwrap();
    assert!(!stranger.has_liked);
    assert_eq!(stranger.likes, 2);

    // a second click from the same visitor takes the like back
    assert_eq!(api.toggle_like(5, bob).await.unwrap().likes, 1);
    assert!(!api.like_status(5, bob).await.unwrap().has_liked);
}
