use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::toast::use_toasts;

pub const DARK_MODE_KEY: &str = "dark_mode";

/// Dark mode flag shared by the layout and the nav toggle.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub dark: RwSignal<bool>,
}

impl ThemeContext {
    pub fn provide() -> Self {
        let ctx = Self {
            dark: RwSignal::new(true),
        };
        provide_context(ctx);
        ctx
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub dark_mode: bool,
}

#[server]
pub async fn site_session() -> Result<SessionInfo, ServerFnError> {
    use chrono::Utc;
    use quill_client::{KeyValueStore, SessionGuard};

    use crate::server::{commit, request_cookies, site_state};

    let state = site_state()?;
    let mut store = request_cookies(&state).await?;

    let darkMode = store.get(DARK_MODE_KEY).map_or(true, |v| v != "0");
    let authenticated = SessionGuard::new(&mut store).is_authenticated(Utc::now());
    commit(&store);

    Ok(SessionInfo {
        authenticated,
        dark_mode: darkMode,
    })
}

#[server]
pub async fn set_dark_mode(enabled: bool) -> Result<(), ServerFnError> {
    use quill_client::KeyValueStore;

    use crate::server::{commit, request_cookies, site_state};

    let state = site_state()?;
    let mut store = request_cookies(&state).await?;
    store.set(DARK_MODE_KEY, if enabled { "1" } else { "0" });
    commit(&store);
    Ok(())
}

#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use quill_web::middleware::session::close_session;

    use crate::server::{commit, request_cookies, site_state};

    let state = site_state()?;
    let mut store = request_cookies(&state).await?;
    close_session(&mut store);
    commit(&store);
    tracing::info!("admin session closed");

    leptos_axum::redirect("/");
    Ok(())
}

/// Theme to show once the preference write settles: the requested one, or
/// the previous one back when the cookie could not be written.
pub fn settled_theme(requested: bool, saved: &Result<(), ServerFnError>) -> bool {
    match saved {
        Ok(()) => requested,
        Err(_) => !requested,
    }
}

#[component]
pub fn Nav() -> impl IntoView {
    let theme = use_context::<ThemeContext>().unwrap_or_else(ThemeContext::provide);
    let authenticated = RwSignal::new(false);
    let logoutAction = ServerAction::<Logout>::new();
    #[allow(unused_variables)]
    let toasts = use_toasts();

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            if let Ok(session) = site_session().await {
                authenticated.set(session.authenticated);
                theme.dark.set(session.dark_mode);
            }
        });
    }

    let toggleDark = move |_| {
        let enabled = !theme.dark.get_untracked();
        theme.dark.set(enabled);
        #[cfg(feature = "hydrate")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let saved = set_dark_mode(enabled).await;
                theme.dark.set(settled_theme(enabled, &saved));
                if let (Err(_), Some(toasts)) = (saved, toasts) {
                    toasts.error("Error", "Theme preference was not saved");
                }
            });
        }
    };

    view! {
        <nav class="nav-bar">
            <a class="nav-brand" href="/">
                <div class="brand-icon">"Q"</div>
                <span class="brand-text">"Quill"</span>
            </a>
            <ul class="nav-links">
                <li class="nav-item">
                    <a href="/">"Blog"</a>
                </li>
                <li class="nav-item">
                    <a href="/about">"About"</a>
                </li>
                <Show when=move || authenticated.get()>
                    <li class="nav-item">
                        <a href="/admin">"Admin"</a>
                    </li>
                    <li class="nav-item">
                        <a href="/admin/stats">"Stats"</a>
                    </li>
                </Show>
            </ul>
            <div class="nav-actions">
                <button
                    class="btn btn-ghost"
                    title="Toggle dark mode"
                    on:click=toggleDark
                >
                    {move || if theme.dark.get() { "\u{2600}" } else { "\u{263E}" }}
                </button>
                {move || {
                    if authenticated.get() {
                        view! {
                            <ActionForm action=logoutAction>
                                <button type="submit" class="btn btn-secondary">
                                    "Logout"
                                </button>
                            </ActionForm>
                        }
                            .into_any()
                    } else {
                        view! {
                            <a class="btn btn-secondary" href="/login">
                                "Login"
                            </a>
                        }
                            .into_any()
                    }
                }}
            </div>
        </nav>
    }
}

/// Page frame: nav plus themed main area.
#[component]
pub fn Framed(children: Children) -> impl IntoView {
    let theme = use_context::<ThemeContext>().unwrap_or_else(ThemeContext::provide);

    view! {
        <div class=move || if theme.dark.get() { "app-layout dark" } else { "app-layout" }>
            <Nav />
            <main class="main-content">{children()}</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_theme_write_reverts_the_toggle() {
        assert!(settled_theme(true, &Ok(())));
        assert!(!settled_theme(false, &Ok(())));

        let failed: Result<(), ServerFnError> = Err(ServerFnError::new("cookie write failed"));
        assert!(!settled_theme(true, &failed));
        assert!(settled_theme(false, &failed));
    }
}
