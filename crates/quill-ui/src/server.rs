//! Server-side glue shared by the server functions: site context, the
//! request's cookie store, and mapping backend failures onto responses.

use std::{future::Future, net::SocketAddr};

use axum::extract::ConnectInfo;
use http::{header::SET_COOKIE, HeaderMap};
use leptos::prelude::*;
use leptos_axum::ResponseOptions;
use quill_client::ClientError;
use quill_web::{middleware::session::close_session, visitor_address, CookieStore, SiteState};
use tracing::warn;

pub fn site_state() -> Result<SiteState, ServerFnError> {
    use_context::<SiteState>().ok_or_else(|| ServerFnError::new("site context unavailable"))
}

pub async fn request_headers() -> Result<HeaderMap, ServerFnError> {
    leptos_axum::extract::<HeaderMap>().await
}

pub async fn request_cookies(state: &SiteState) -> Result<CookieStore, ServerFnError> {
    let headers = request_headers().await?;
    Ok(state.cookie_store(&headers))
}

/// Address of the reader behind this request, forwarded to the backend so
/// likes and shares count per visitor rather than per site server.
pub async fn visitor() -> Option<String> {
    let headers = request_headers().await.ok()?;
    let peer = leptos_axum::extract::<ConnectInfo<SocketAddr>>()
        .await
        .ok()
        .map(|ConnectInfo(addr)| addr.ip());
    visitor_address(&headers, peer)
}

/// Copies pending cookie writes onto the server function's response.
pub fn commit(store: &CookieStore) {
    if !store.has_changes() {
        return;
    }
    let Some(responseOptions) = use_context::<ResponseOptions>() else {
        warn!("no response options in scope, cookie changes dropped");
        return;
    };
    for value in store.set_cookie_headers() {
        responseOptions.append_header(SET_COOKIE, value);
    }
}

/// Failure of a public call. Nothing to clear, just report.
pub fn public_failure(err: ClientError) -> ServerFnError {
    warn!("backend call failed: {err}");
    ServerFnError::new(err.to_string())
}

/// Failure of an admin call. A rejected or missing session is dropped and
/// the browser sent back to the login page.
pub fn admin_failure(err: ClientError, store: &mut CookieStore) -> ServerFnError {
    if ends_session(&err) {
        close_session(store);
        commit(store);
        leptos_axum::redirect("/login");
        return ServerFnError::new("Your session has expired, please sign in again");
    }
    warn!("admin call failed: {err}");
    ServerFnError::new(err.to_string())
}

pub fn ends_session(err: &ClientError) -> bool {
    err.is_unauthorized() || matches!(err, ClientError::InvalidToken(_))
}

/// Runs `call` with the request's bearer token.
pub async fn with_admin<T, F, Fut>(call: F) -> Result<T, ServerFnError>
where
    F: FnOnce(SiteState, String) -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let state = site_state()?;
    let mut store = request_cookies(&state).await?;

    let token = match state.session_token(&mut store) {
        Ok(token) => token,
        Err(e) => return Err(admin_failure(e, &mut store)),
    };

    call(state, token)
        .await
        .map_err(|e| admin_failure(e, &mut store))
}

/// Absolute URL of `path` as the visitor reached it.
pub fn absolute_url(headers: &HeaderMap, secure: bool, path: &str) -> String {
    let host = headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = if secure { "https" } else { "http" };
    format!("{scheme}://{host}{path}")
}

#[cfg(test)]
mod tests {
    use quill_web::CookiePolicy;

    use super::*;

    fn signed_in() -> CookieStore {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, "token=abc.def.ghi".parse().unwrap());
        CookieStore::from_headers(
            &headers,
            CookiePolicy {
                secure: false,
                max_age_secs: 3600,
            },
        )
    }

    #[test]
    fn rejected_admin_call_signs_out() {
        let mut store = signed_in();
        let err = admin_failure(ClientError::Unauthorized, &mut store);

        assert_eq!(
            err.to_string(),
            ServerFnError::new("Your session has expired, please sign in again").to_string()
        );
        assert_eq!(
            store.set_cookie_headers(),
            vec![http::HeaderValue::from_static(
                "token=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0"
            )]
        );
    }

    #[test]
    fn other_admin_failures_keep_the_session() {
        let mut store = signed_in();
        let err = admin_failure(
            ClientError::Api {
                status: 500,
                message: "database down".into(),
            },
            &mut store,
        );

        assert!(err.to_string().contains("database down"));
        assert!(!store.has_changes());
        assert!(ends_session(&ClientError::MissingSession));
        assert!(!ends_session(&ClientError::Decode("bad json".into())));
    }

    #[test]
    fn absolute_url_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::HOST, "blog.example".parse().unwrap());
        assert_eq!(
            absolute_url(&headers, true, "/post/4"),
            "https://blog.example/post/4"
        );
        assert_eq!(
            absolute_url(&HeaderMap::new(), false, "/"),
            "http://localhost/"
        );
    }
}
