use leptos::prelude::*;
use leptos_router::{components::Redirect, hooks::use_params_map};
use quill_types::{ApiErrorBody, ImageUploadResponse, Post, PostDraft};

use crate::components::toast::use_toasts;

#[server]
pub async fn load_draft(id: u64) -> Result<PostDraft, ServerFnError> {
    use crate::server::with_admin;

    let post = with_admin(|state, token| async move { state.api.admin_post(&token, id).await }).await?;
    Ok(PostDraft::from(&post))
}

/// Creates the post when `id` is empty, updates it otherwise.
#[server]
pub async fn save_post(id: Option<u64>, draft: PostDraft) -> Result<Post, ServerFnError> {
    use crate::server::with_admin;

    if let Some(problem) = draft_problem(&draft) {
        return Err(ServerFnError::new(problem));
    }

    let saved = with_admin(|state, token| async move {
        match id {
            Some(id) => state.api.update_post(&token, id, &draft).await,
            None => state.api.create_post(&token, &draft).await,
        }
    })
    .await?;
    tracing::info!("post {} saved", saved.id);
    Ok(saved)
}

const UPLOAD_ROUTE: &str = "/api/v1/images";

/// Reads the upload route's answer: the stored image on success, a message
/// for the editor otherwise. A 401 means the route already dropped the
/// session cookie.
pub fn upload_outcome(status: u16, body: &str) -> Result<ImageUploadResponse, String> {
    if status == 401 {
        return Err("Your session has expired, please sign in again".to_string());
    }
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.text().map(str::to_string))
            .unwrap_or_else(|| format!("Upload failed ({status})"));
        return Err(message);
    }
    serde_json::from_str::<ImageUploadResponse>(body)
        .map_err(|e| format!("Unexpected upload response: {e}"))
}

/// Posts the picked file to the upload route from the browser.
#[cfg(feature = "hydrate")]
async fn send_image(form: web_sys::FormData) -> Result<ImageUploadResponse, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let jsMessage = |e: wasm_bindgen::JsValue| {
        e.as_string()
            .unwrap_or_else(|| "Upload could not be sent".to_string())
    };

    let window = web_sys::window().ok_or_else(|| "No browser window".to_string())?;
    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);

    let response = JsFuture::from(window.fetch_with_str_and_init(UPLOAD_ROUTE, &init))
        .await
        .map_err(jsMessage)?;
    let response: web_sys::Response = response.dyn_into().map_err(jsMessage)?;
    let body = JsFuture::from(response.text().map_err(jsMessage)?)
        .await
        .map_err(jsMessage)?
        .as_string()
        .unwrap_or_default();

    upload_outcome(response.status(), &body)
}

/// First thing wrong with `draft`, if anything.
pub fn draft_problem(draft: &PostDraft) -> Option<&'static str> {
    if draft.title.trim().is_empty() {
        Some("Title is required")
    } else if draft.content.trim().is_empty() {
        Some("Content is required")
    } else {
        None
    }
}

#[component]
pub fn NewPostPage() -> impl IntoView {
    view! { <PostEditor post_id=None /> }
}

#[component]
pub fn EditPostPage() -> impl IntoView {
    let params = use_params_map();
    let postId = move || params.with(|p| p.get("id").and_then(|id| id.parse::<u64>().ok()));

    view! {
        {move || match postId() {
            Some(id) => view! { <PostEditor post_id=Some(id) /> }.into_any(),
            None => view! { <div class="error-banner">"Unknown post."</div> }.into_any(),
        }}
    }
}

#[component]
fn PostEditor(post_id: Option<u64>) -> impl IntoView {
    let draft = RwSignal::new(PostDraft {
        is_active: true,
        ..PostDraft::default()
    });
    #[allow(unused_variables)]
    let (loading, setLoading) = signal(post_id.is_some());
    #[allow(unused_variables)]
    let (saving, setSaving) = signal(false);
    #[allow(unused_variables)]
    let (saved, setSaved) = signal(false);
    #[allow(unused_variables)]
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let toasts = use_toasts();

    #[cfg(feature = "hydrate")]
    {
        if let Some(id) = post_id {
            wasm_bindgen_futures::spawn_local(async move {
                match load_draft(id).await {
                    Ok(loaded) => draft.set(loaded),
                    Err(e) => setError.set(Some(e.to_string())),
                }
                setLoading.set(false);
            });
        }
    }

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        if let Some(problem) = draft_problem(&current) {
            setError.set(Some(problem.to_string()));
            return;
        }
        setError.set(None);
        #[cfg(feature = "hydrate")]
        {
            setSaving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match save_post(post_id, current).await {
                    Ok(post) => {
                        if let Some(toasts) = toasts {
                            toasts.info("Saved", format!("\"{}\" was saved", post.title));
                        }
                        setSaved.set(true);
                    }
                    Err(e) => setError.set(Some(e.to_string())),
                }
                setSaving.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = current;
    };

    let heading = if post_id.is_some() { "Edit post" } else { "New post" };

    view! {
        <div class="page-header">
            <h1>{heading}</h1>
            <a class="btn btn-secondary" href="/admin">
                "Back to posts"
            </a>
        </div>
        {move || saved.get().then(|| view! { <Redirect path="/admin" /> })}
        {move || error.get().map(|e| view! { <div class="error-banner">{e}</div> })}
        <Show
            when=move || !loading.get()
            fallback=|| {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading post..."
                    </div>
                }
            }
        >
            <form class="editor-form" on:submit=onSubmit>
                <div class="form-group">
                    <label for="title">"Title"</label>
                    <input
                        type="text"
                        id="title"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="description">"Summary"</label>
                    <textarea
                        id="description"
                        rows="3"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="form-group">
                    <label for="content">"Content (HTML)"</label>
                    <textarea
                        id="content"
                        rows="18"
                        prop:value=move || draft.with(|d| d.content.clone())
                        on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="category">"Category"</label>
                        <input
                            type="text"
                            id="category"
                            prop:value=move || draft.with(|d| d.category.clone())
                            on:input=move |ev| draft.update(|d| d.category = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="tags">"Tags (comma separated)"</label>
                        <input
                            type="text"
                            id="tags"
                            prop:value=move || draft.with(|d| d.tags.clone())
                            on:input=move |ev| draft.update(|d| d.tags = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="read-time">"Read time (min)"</label>
                        <input
                            type="number"
                            id="read-time"
                            min="0"
                            prop:value=move || draft.with(|d| d.read_time.to_string())
                            on:input=move |ev| {
                                let minutes = event_target_value(&ev).parse().unwrap_or(0);
                                draft.update(|d| d.read_time = minutes)
                            }
                        />
                    </div>
                </div>
                <div class="form-group">
                    <label for="image-url">"Cover image URL"</label>
                    <input
                        type="text"
                        id="image-url"
                        prop:value=move || draft.with(|d| d.image_url.clone())
                        on:input=move |ev| draft.update(|d| d.image_url = event_target_value(&ev))
                    />
                </div>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.is_active)
                        on:change=move |ev| draft.update(|d| d.is_active = event_target_checked(&ev))
                    />
                    "Visible to readers"
                </label>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save post" }}
                </button>
            </form>
        </Show>
        <ImageUpload draft=draft />
    }
}

/// Uploads a picked file and drops the stored URL into the cover field.
#[component]
fn ImageUpload(draft: RwSignal<PostDraft>) -> impl IntoView {
    #[allow(unused_variables)]
    let (uploading, setUploading) = signal(false);
    #[allow(unused_variables)]
    let (problem, setProblem) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let toasts = use_toasts();

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(form) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlFormElement>().ok())
            else {
                return;
            };
            let Ok(data) = web_sys::FormData::new_with_form(&form) else {
                setProblem.set(Some("Could not read the selected file".to_string()));
                return;
            };
            setProblem.set(None);
            setUploading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match send_image(data).await {
                    Ok(uploaded) => {
                        draft.update(|d| d.image_url = uploaded.url.clone());
                        if let Some(toasts) = toasts {
                            toasts.info("Image uploaded", uploaded.filename);
                        }
                    }
                    Err(message) => setProblem.set(Some(message)),
                }
                setUploading.set(false);
            });
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let _ = draft;

    view! {
        <section class="image-upload">
            <h2>"Upload a cover image"</h2>
            {move || problem.get().map(|p| view! { <div class="error-banner">{p}</div> })}
            <form action=UPLOAD_ROUTE method="post" enctype="multipart/form-data" on:submit=onSubmit>
                <input type="file" name="image" accept="image/*" required />
                <button type="submit" class="btn btn-secondary" disabled=move || uploading.get()>
                    {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafts_need_title_and_content() {
        let mut draft = PostDraft::default();
        assert_eq!(draft_problem(&draft), Some("Title is required"));

        draft.title = "Phishing 101".into();
        assert_eq!(draft_problem(&draft), Some("Content is required"));

        draft.content = "<p>Look at the sender.</p>".into();
        assert_eq!(draft_problem(&draft), None);
    }

    #[test]
    fn upload_answer_becomes_the_cover_url() {
        let uploaded = upload_outcome(
            200,
            r#"{"url": "/api/uploads/images/cover.png", "filename": "cover.png"}"#,
        )
        .unwrap();
        assert_eq!(uploaded.url, "/api/uploads/images/cover.png");
    }

    #[test]
    fn upload_failures_become_messages() {
        assert_eq!(
            upload_outcome(401, r#"{"error": "unauthorized"}"#).unwrap_err(),
            "Your session has expired, please sign in again"
        );
        assert_eq!(
            upload_outcome(400, r#"{"error": "no image field in upload"}"#).unwrap_err(),
            "no image field in upload"
        );
        assert_eq!(upload_outcome(502, "").unwrap_err(), "Upload failed (502)");
    }
}
