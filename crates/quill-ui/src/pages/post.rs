use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use quill_client::LikeCounter;
use quill_types::Post;
use serde::{Deserialize, Serialize};

use crate::components::like_button::LikeButton;
use crate::components::post_card::{published_on, PostCard};
use crate::components::share_menu::{ShareLink, ShareMenu};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PostView {
    pub post: Post,
    pub like: LikeCounter,
    pub related: Vec<Post>,
    pub share_links: Vec<ShareLink>,
}

#[server]
pub async fn load_post(id: u64) -> Result<PostView, ServerFnError> {
    use quill_client::share::{share_url, SharePlatform};
    use quill_web::content::clean_html;

    use crate::server::{absolute_url, public_failure, request_headers, site_state};

    let state = site_state()?;
    let headers = request_headers().await?;
    let store = state.cookie_store(&headers);

    let mut post = state.api.get_post(id).await.map_err(public_failure)?;
    post.content = clean_html(&post.content);
    let related = match state.api.related_posts(id).await {
        Ok(related) => related,
        Err(e) => {
            tracing::debug!("related posts for {id} unavailable: {e}");
            Vec::new()
        }
    };

    let pageUrl = absolute_url(&headers, state.cookies.secure, &format!("/post/{id}"));
    let shareLinks = SharePlatform::ALL
        .iter()
        .map(|&platform| ShareLink {
            platform,
            url: share_url(platform, &pageUrl, &post.title),
        })
        .collect();

    Ok(PostView {
        like: LikeCounter::restore(post.id, post.like_count, &store),
        post,
        related,
        share_links: shareLinks,
    })
}

#[component]
pub fn PostPage() -> impl IntoView {
    let params = use_params_map();
    let postId = move || params.with(|p| p.get("id").and_then(|id| id.parse::<u64>().ok()));

    #[allow(unused_variables)]
    let (loaded, setLoaded) = signal(Option::<Result<PostView, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        Effect::new(move |_| {
            let id = postId();
            setLoaded.set(None);
            spawn_local(async move {
                let result = match id {
                    Some(id) => load_post(id).await.map_err(|e| e.to_string()),
                    None => Err("Post not found".to_string()),
                };
                setLoaded.set(Some(result));
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = postId;

    view! {
        {move || match loaded.get() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading post..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => {
                view! {
                    <div class="error-banner">
                        <p>{e}</p>
                        <a href="/">"Back to all posts"</a>
                    </div>
                }
                    .into_any()
            }
            Some(Ok(data)) => view! { <PostBody data=data /> }.into_any(),
        }}
    }
}

#[component]
fn PostBody(data: PostView) -> impl IntoView {
    let PostView {
        post,
        like,
        related,
        share_links,
    } = data;
    let published = published_on(&post);
    let cover = post.cover_image().map(str::to_string);
    let tags = post.tag_list();

    view! {
        <article class="post-detail">
            <a class="back-link" href="/">
                "\u{2190} All posts"
            </a>
            {cover.map(|src| view! { <img class="post-hero" src=src alt="" /> })}
            <h1>{post.title.clone()}</h1>
            <div class="post-meta">
                <span>{published}</span>
                <span>{format!("{} min read", post.read_time)}</span>
                {post.category.clone().map(|c| view! { <span class="post-category">{c}</span> })}
            </div>
            <div class="post-content" inner_html=post.content.clone()></div>
            <ul class="post-tags">
                {tags.into_iter().map(|t| view! { <li class="tag">{t}</li> }).collect_view()}
            </ul>
            <div class="post-actions">
                <LikeButton counter=like />
                <ShareMenu post_id=post.id shares=post.share_count links=share_links />
            </div>
        </article>
        {(!related.is_empty())
            .then(|| {
                view! {
                    <section class="related-posts">
                        <h2>"Related posts"</h2>
                        <div class="post-grid">
                            {related
                                .into_iter()
                                .map(|p| view! { <PostCard post=p /> })
                                .collect_view()}
                        </div>
                    </section>
                }
            })}
    }
}
