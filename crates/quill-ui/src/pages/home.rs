use leptos::prelude::*;
use quill_client::Pager;
use quill_types::PaginatedResponse;

use crate::components::pagination::Pagination;
use crate::components::post_card::PostCard;
use crate::components::search_box::SearchBox;

/// One page of the public listing, or of the search results when `query`
/// is not blank. Page size comes from the site configuration.
#[server]
pub async fn fetch_posts(query: String, page: u32) -> Result<PaginatedResponse, ServerFnError> {
    use quill_client::{pager, PostQuery};

    use crate::server::{public_failure, site_state};

    let state = site_state()?;
    let request = PostQuery::new(&query, page.max(1), state.page_size);
    pager::fetch(&state.api, &request)
        .await
        .map_err(public_failure)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let pager = RwSignal::new(Pager::default());
    let loaded = RwSignal::new(false);

    let load = move || {
        let request = pager.try_update(|p| p.begin());
        #[cfg(feature = "hydrate")]
        {
            if let Some(request) = request {
                wasm_bindgen_futures::spawn_local(async move {
                    let result = fetch_posts(request.text().to_string(), request.page())
                        .await
                        .map_err(|e| e.to_string());
                    pager.update(|p| p.apply(result));
                    loaded.set(true);
                });
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    #[cfg(feature = "hydrate")]
    {
        load();
    }

    view! {
        <div class="page-header">
            <h1>"Latest posts"</h1>
            <p class="subtitle">"Notes on security, engineering and the web"</p>
        </div>
        <SearchBox pager=pager on_search=load />
        {move || {
            pager
                .with(|p| p.error().map(str::to_string))
                .map(|e| view! { <div class="error-banner">{e}</div> })
        }}
        {move || {
            pager.with(|p| {
                if p.posts().is_empty() && (p.is_loading() || !loaded.get()) {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading posts..."
                        </div>
                    }
                        .into_any()
                } else if p.posts().is_empty() && p.error().is_none() {
                    let message = if p.query().trim().is_empty() {
                        "No posts yet.".to_string()
                    } else {
                        format!("No posts match \"{}\".", p.query().trim())
                    };
                    view! { <p class="empty-state">{message}</p> }.into_any()
                } else {
                    let posts = p.posts().to_vec();
                    view! {
                        <div class="post-grid">
                            {posts
                                .into_iter()
                                .map(|post| view! { <PostCard post=post /> })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            })
        }}
        <Pagination pager=pager on_change=load />
    }
}
