#![allow(non_snake_case)]

pub mod content;
pub mod cookies;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod visitor;

use axum::Router;

pub use crate::cookies::{CookiePolicy, CookieStore};
pub use crate::error::WebError;
pub use crate::middleware::session::SiteState;
pub use crate::visitor::visitor_address;

/// Session and upload endpoints of the site, with their state applied.
pub fn site_router(state: SiteState) -> Router {
    let apiRoutes = routes::api_routes(state.clone());
    let sessionRoutes = middleware::session::session_routes(state.clone());

    Router::new()
        .merge(apiRoutes)
        .merge(sessionRoutes)
        .with_state(state)
}
