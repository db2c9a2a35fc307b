use leptos::prelude::*;

#[server]
async fn login(username: String, password: String) -> Result<(), ServerFnError> {
    use quill_client::ClientError;
    use quill_types::LoginRequest;
    use quill_web::middleware::session::open_session;

    use crate::server::{commit, request_cookies, site_state};

    let state = site_state()?;
    let mut store = request_cookies(&state).await?;

    let credentials = LoginRequest {
        username: username.trim().to_string(),
        password,
    };
    match open_session(&state, &mut store, &credentials).await {
        Ok(()) => {}
        Err(ClientError::Unauthorized) | Err(ClientError::Api { status: 400, .. }) => {
            return Err(ServerFnError::new("Invalid username or password"));
        }
        Err(e) => {
            tracing::warn!("login for {} failed: {e}", credentials.username);
            return Err(ServerFnError::new(e.to_string()));
        }
    }
    commit(&store);

    leptos_axum::redirect("/admin");
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let loginAction = ServerAction::<Login>::new();
    let loginValue = loginAction.value();
    let pending = loginAction.pending();

    let errorMessage = move || {
        loginValue
            .get()
            .and_then(|result| result.err())
            .map(|e| e.to_string())
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"Q"</div>
                    <h1>"Admin sign in"</h1>
                    <p>"Manage posts and read the numbers"</p>
                </div>

                {move || errorMessage().map(|e| view! { <div class="login-error">{e}</div> })}

                <ActionForm action=loginAction>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input type="text" id="username" name="username" autocomplete="username" required />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </ActionForm>
            </div>
        </div>
    }
}
