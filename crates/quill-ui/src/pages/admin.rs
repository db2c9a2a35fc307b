use leptos::prelude::*;
use quill_types::Post;

use crate::components::post_card::published_on;
use crate::components::toast::use_toasts;

#[server]
pub async fn admin_posts() -> Result<Vec<Post>, ServerFnError> {
    use crate::server::with_admin;

    with_admin(|state, token| async move { state.api.admin_posts(&token).await }).await
}

/// Publishes or hides a post by re-saving it with a flipped flag.
#[server]
pub async fn set_post_active(id: u64, active: bool) -> Result<Post, ServerFnError> {
    use quill_types::PostDraft;

    use crate::server::with_admin;

    with_admin(|state, token| async move {
        let post = state.api.admin_post(&token, id).await?;
        let draft = PostDraft {
            is_active: active,
            ..PostDraft::from(&post)
        };
        state.api.update_post(&token, id, &draft).await
    })
    .await
}

#[server]
pub async fn remove_post(id: u64, permanent: bool) -> Result<String, ServerFnError> {
    use crate::server::with_admin;

    let response = with_admin(|state, token| async move {
        if permanent {
            state.api.delete_post_permanently(&token, id).await
        } else {
            state.api.delete_post(&token, id).await
        }
    })
    .await?;
    tracing::info!("post {id} deleted (permanent: {permanent})");
    Ok(response.message)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PostAction {
    Publish,
    Hide,
    Delete,
    DeletePermanently,
}

impl PostAction {
    /// Question to put to the admin before running the action. Only deletes
    /// ask.
    fn confirmation(self, title: &str) -> Option<String> {
        match self {
            PostAction::Delete => Some(format!(
                "Delete \"{title}\"? Readers will no longer see it."
            )),
            PostAction::DeletePermanently => Some(format!(
                "Permanently delete \"{title}\" with its stats? This cannot be undone."
            )),
            PostAction::Publish | PostAction::Hide => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PendingAction {
    id: u64,
    action: PostAction,
    prompt: String,
}

#[component]
pub fn AdminPage() -> impl IntoView {
    #[allow(unused_variables)]
    let (posts, setPosts) = signal(Option::<Result<Vec<Post>, String>>::None);
    #[allow(unused_variables)]
    let (busy, setBusy) = signal(Option::<u64>::None);
    let pending = RwSignal::new(Option::<PendingAction>::None);
    #[allow(unused_variables)]
    let toasts = use_toasts();

    #[allow(unused_variables)]
    let refresh = move || {
        #[cfg(feature = "hydrate")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = admin_posts().await.map_err(|e| e.to_string());
                setPosts.set(Some(result));
            });
        }
    };

    #[cfg(feature = "hydrate")]
    {
        refresh();
    }

    let runAction = move |id: u64, action: PostAction| {
        #[cfg(feature = "hydrate")]
        {
            setBusy.set(Some(id));
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match action {
                    PostAction::Publish => set_post_active(id, true).await.map(|_| "Post published".to_string()),
                    PostAction::Hide => set_post_active(id, false).await.map(|_| "Post hidden".to_string()),
                    PostAction::Delete => remove_post(id, false).await,
                    PostAction::DeletePermanently => remove_post(id, true).await,
                };
                setBusy.set(None);
                if let Some(toasts) = toasts {
                    match outcome {
                        Ok(message) => toasts.info("Done", message),
                        Err(e) => toasts.error("Error", e.to_string()),
                    }
                }
                refresh();
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, action);
        }
    };

    let request = move |id: u64, title: &str, action: PostAction| match action.confirmation(title) {
        Some(prompt) => pending.set(Some(PendingAction { id, action, prompt })),
        None => runAction(id, action),
    };

    let confirm = move |_: leptos::ev::MouseEvent| {
        if let Some(PendingAction { id, action, .. }) = pending.get_untracked() {
            pending.set(None);
            runAction(id, action);
        }
    };

    view! {
        <div class="page-header">
            <h1>"Posts"</h1>
            <a class="btn btn-primary" href="/admin/posts/new">
                "New post"
            </a>
        </div>
        {move || {
            pending
                .get()
                .map(|p| {
                    view! {
                        <div class="confirm-bar" role="alertdialog">
                            <p>{p.prompt}</p>
                            <button class="btn btn-small btn-danger" on:click=confirm>
                                "Delete"
                            </button>
                            <button class="btn btn-small" on:click=move |_| pending.set(None)>
                                "Cancel"
                            </button>
                        </div>
                    }
                })
        }}
        {move || match posts.get() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading posts..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
            Some(Ok(list)) if list.is_empty() => {
                view! { <p class="empty-state">"No posts yet. Write the first one."</p> }.into_any()
            }
            Some(Ok(list)) => {
                view! {
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Published"</th>
                                <th>"Status"</th>
                                <th>"Likes"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|post| {
                                    let id = post.id;
                                    let title = StoredValue::new(post.title.clone());
                                    let active = post.is_active;
                                    let isBusy = move || busy.get() == Some(id);
                                    let (statusClass, statusLabel) = if active {
                                        ("status status-active", "Active")
                                    } else {
                                        ("status status-hidden", "Hidden")
                                    };
                                    let (toggleAction, toggleLabel) = if active {
                                        (PostAction::Hide, "Hide")
                                    } else {
                                        (PostAction::Publish, "Publish")
                                    };
                                    view! {
                                        <tr>
                                            <td>
                                                <a href=format!("/post/{id}")>{post.title.clone()}</a>
                                            </td>
                                            <td>{published_on(&post)}</td>
                                            <td>
                                                <span class=statusClass>{statusLabel}</span>
                                            </td>
                                            <td>{post.like_count}</td>
                                            <td class="row-actions">
                                                <a class="btn btn-small" href=format!("/admin/posts/edit/{id}")>
                                                    "Edit"
                                                </a>
                                                <a class="btn btn-small" href=format!("/admin/stats/{id}")>
                                                    "Stats"
                                                </a>
                                                <button
                                                    class="btn btn-small"
                                                    disabled=isBusy
                                                    on:click=move |_| title.with_value(|t| request(id, t, toggleAction))
                                                >
                                                    {toggleLabel}
                                                </button>
                                                <button
                                                    class="btn btn-small btn-danger"
                                                    disabled=isBusy
                                                    on:click=move |_| title.with_value(|t| request(id, t, PostAction::Delete))
                                                >
                                                    "Delete"
                                                </button>
                                                <button
                                                    class="btn btn-small btn-danger"
                                                    disabled=isBusy
                                                    on:click=move |_| {
                                                        title.with_value(|t| request(id, t, PostAction::DeletePermanently))
                                                    }
                                                >
                                                    "Delete forever"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletes_ask_first() {
        let prompt = PostAction::DeletePermanently.confirmation("Old post").unwrap();
        assert!(prompt.contains("\"Old post\""));
        assert!(prompt.contains("cannot be undone"));
        assert!(PostAction::Delete.confirmation("Old post").is_some());
    }

    #[test]
    fn visibility_changes_run_straight_away() {
        assert_eq!(PostAction::Publish.confirmation("Draft"), None);
        assert_eq!(PostAction::Hide.confirmation("Draft"), None);
    }
}
