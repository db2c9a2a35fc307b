use leptos::prelude::*;
use quill_client::{share::SharePlatform, ShareCounter};
use quill_types::ShareResponse;
use serde::{Deserialize, Serialize};

use crate::components::toast::use_toasts;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShareLink {
    pub platform: SharePlatform,
    pub url: String,
}

#[server]
pub async fn record_share(post_id: u64) -> Result<ShareResponse, ServerFnError> {
    use crate::server::{public_failure, site_state, visitor};

    let state = site_state()?;
    let visitor = visitor().await;
    state
        .api
        .share_post(post_id, visitor.as_deref())
        .await
        .map_err(public_failure)
}

#[component]
pub fn ShareMenu(post_id: u64, shares: i64, links: Vec<ShareLink>) -> impl IntoView {
    let open = RwSignal::new(false);
    let counter = RwSignal::new(ShareCounter::new(shares));
    let toasts = use_toasts();

    let onShare = move |platform: SharePlatform| {
        counter.update(|c| c.record());
        open.set(false);
        #[cfg(feature = "hydrate")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                match record_share(post_id).await {
                    Ok(response) => counter.update(|c| c.reconcile(&response)),
                    Err(e) => {
                        counter.update(|c| c.rollback(e.to_string()));
                        if let Some(toasts) = toasts {
                            toasts.error("Error", "Failed to record share");
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (post_id, toasts);
        if platform == SharePlatform::Copy {
            if let Some(toasts) = toasts {
                toasts.info("Link ready", "Copy the address from the field below");
            }
        }
    };

    let pageUrl = links
        .iter()
        .find(|l| l.platform == SharePlatform::Copy)
        .map(|l| l.url.clone())
        .unwrap_or_default();

    view! {
        <div class="share-menu">
            <button class="btn btn-secondary" on:click=move |_| open.update(|o| *o = !*o)>
                {move || format!("Share ({})", counter.with(|c| c.count()))}
            </button>
            <Show when=move || open.get()>
                <ul class="share-options">
                    {links
                        .iter()
                        .filter(|l| l.platform != SharePlatform::Copy)
                        .map(|link| {
                            let platform = link.platform;
                            view! {
                                <li>
                                    <a
                                        href=link.url.clone()
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        on:click=move |_| onShare(platform)
                                    >
                                        {platform.label()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                    <li>
                        <button class="btn btn-ghost" on:click=move |_| onShare(SharePlatform::Copy)>
                            {SharePlatform::Copy.label()}
                        </button>
                    </li>
                </ul>
            </Show>
            <input class="share-url" type="text" readonly prop:value=pageUrl />
        </div>
    }
}
