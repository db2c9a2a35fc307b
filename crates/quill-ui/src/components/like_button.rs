use leptos::prelude::*;
use quill_client::LikeCounter;
use quill_types::LikeResponse;

use crate::components::toast::use_toasts;

/// Toggles the like on the backend and remembers the outcome in the
/// visitor's `liked_post_<id>` cookie.
#[server]
pub async fn toggle_like(post_id: u64) -> Result<LikeResponse, ServerFnError> {
    use quill_client::engagement::{recall_like, remember_like, settle_like};

    use crate::server::{commit, public_failure, request_cookies, site_state, visitor};

    let state = site_state()?;
    let mut store = request_cookies(&state).await?;
    let visitor = visitor().await;

    let toggled = state
        .api
        .toggle_like(post_id, visitor.as_deref())
        .await
        .map_err(public_failure)?;

    // The backend tracks likes per visitor; ask it which side we landed on.
    let status = match state.api.like_status(post_id, visitor.as_deref()).await {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::debug!("like status for post {post_id} unavailable: {e}");
            None
        }
    };
    let response = settle_like(toggled, status, recall_like(&store, post_id));

    remember_like(&mut store, post_id, response.has_liked.unwrap_or(false));
    commit(&store);
    Ok(response)
}

#[component]
pub fn LikeButton(counter: LikeCounter) -> impl IntoView {
    let postId = counter.post_id();
    let counter = RwSignal::new(counter);
    let toasts = use_toasts();

    let onClick = move |_| {
        if counter.try_update(|c| c.toggle()).flatten().is_none() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                match toggle_like(postId).await {
                    Ok(response) => counter.update(|c| c.reconcile(&response)),
                    Err(e) => {
                        counter.update(|c| c.rollback(e.to_string()));
                        if let Some(toasts) = toasts {
                            toasts.error("Error", "Failed to update like status");
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (postId, toasts);
    };

    view! {
        <button
            class=move || {
                if counter.with(|c| c.liked()) { "btn btn-like liked" } else { "btn btn-like" }
            }
            disabled=move || counter.with(|c| c.is_pending())
            on:click=onClick
        >
            <span class="like-icon">"\u{2665}"</span>
            <span>{move || counter.with(|c| c.count())}</span>
        </button>
    }
}
