pub mod images;

use axum::Router;

use crate::middleware::session::SiteState;

pub fn api_routes(state: SiteState) -> Router<SiteState> {
    Router::new().merge(images::routes(state))
}
