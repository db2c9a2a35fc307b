use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use quill_client::{BlogApi, ClientError, SessionGuard, DEFAULT_PAGE_SIZE};
use quill_types::LoginRequest;
use serde::Serialize;
use tracing::{debug, info};

use crate::cookies::{CookiePolicy, CookieStore};
use crate::error::WebError;

#[derive(Clone, Debug)]
pub struct SiteState {
    pub api: BlogApi,
    pub cookies: CookiePolicy,
    pub page_size: u32,
}

impl SiteState {
    pub fn new(api: BlogApi) -> Self {
        Self {
            api,
            cookies: CookiePolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn cookie_store(&self, headers: &HeaderMap) -> CookieStore {
        CookieStore::from_headers(headers, self.cookies.clone())
    }

    /// Bearer token of the request's session, evicting it when stale.
    pub fn session_token(&self, store: &mut CookieStore) -> Result<String, ClientError> {
        SessionGuard::new(store)
            .current_token(Utc::now())
            .ok_or(ClientError::MissingSession)
    }
}

#[derive(Serialize)]
struct OkResponse {
    ok: bool,
}

pub fn session_routes(_state: SiteState) -> Router<SiteState> {
    Router::new()
        .route("/api/v1/session/login", post(handle_login))
        .route("/api/v1/session/logout", post(handle_logout))
}

/// Exchanges credentials for a backend token and stores it in `store`.
pub async fn open_session(
    state: &SiteState,
    store: &mut CookieStore,
    credentials: &LoginRequest,
) -> Result<(), ClientError> {
    let tokenResponse = state.api.login(credentials).await?;
    let expiresAt = SessionGuard::new(store).login(&tokenResponse.token)?;
    info!(
        "admin session opened for {} until {expiresAt}",
        credentials.username
    );
    Ok(())
}

pub fn close_session(store: &mut CookieStore) {
    SessionGuard::new(store).logout();
}

async fn handle_login(
    State(state): State<SiteState>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Response, WebError> {
    let mut store = state.cookie_store(&headers);
    open_session(&state, &mut store, &body).await?;

    let mut response = Json(OkResponse { ok: true }).into_response();
    store.apply(response.headers_mut());
    Ok(response)
}

async fn handle_logout(State(state): State<SiteState>, headers: HeaderMap) -> Response {
    let mut store = state.cookie_store(&headers);
    close_session(&mut store);

    let mut response = Json(OkResponse { ok: true }).into_response();
    store.apply(response.headers_mut());
    response
}

fn is_admin_page(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}

/// Middleware for page routes: admin pages need a live session cookie,
/// everything else passes through.
pub async fn require_admin_session(
    State(state): State<SiteState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !is_admin_page(request.uri().path()) {
        return next.run(request).await;
    }

    let mut store = state.cookie_store(request.headers());
    if state.session_token(&mut store).is_ok() {
        return next.run(request).await;
    }

    debug!("no live session for {}, redirecting to login", request.uri().path());
    let mut response = Redirect::to("/login").into_response();
    store.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_paths_are_gated() {
        assert!(is_admin_page("/admin"));
        assert!(is_admin_page("/admin/posts/new"));
        assert!(!is_admin_page("/administrator"));
        assert!(!is_admin_page("/"));
        assert!(!is_admin_page("/login"));
        assert!(!is_admin_page("/post/3"));
    }
}
