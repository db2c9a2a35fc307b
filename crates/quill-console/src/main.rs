#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub api: ApiConfig,
        pub site: SiteConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    /// Where the blog backend lives, including its `/api` prefix.
    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ApiConfig {
        pub base_url: String,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct SiteConfig {
        pub page_size: u32,
        pub secure_cookies: bool,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    impl Default for ApiConfig {
        fn default() -> Self {
            Self {
                base_url: "http://localhost:8080/api".into(),
            }
        }
    }

    impl Default for SiteConfig {
        fn default() -> Self {
            Self {
                page_size: quill_client::DEFAULT_PAGE_SIZE,
                secure_cookies: true,
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use std::net::SocketAddr;

    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use quill_client::BlogApi;
    use quill_ui::{shell, App};
    use quill_web::{middleware::session::require_admin_session, CookiePolicy, SiteState};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "quill.example.toml".into())
    } else {
        "quill.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} backend={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.api.base_url
    );

    let siteState = SiteState {
        api: BlogApi::new(appConfig.api.base_url.clone()),
        cookies: CookiePolicy {
            secure: appConfig.site.secure_cookies,
            ..CookiePolicy::default()
        },
        page_size: appConfig.site.page_size.max(1),
    };

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let mut leptosOptions = conf.leptos_options;
    if std::env::var_os("LEPTOS_SITE_ADDR").is_none() {
        let configured = format!("{}:{}", appConfig.server.bind, appConfig.server.port);
        match configured.parse() {
            Ok(addr) => leptosOptions.site_addr = addr,
            Err(e) => tracing::warn!("ignoring bind address {configured}: {e}"),
        }
    }
    let addr = leptosOptions.site_addr;

    let routes = generate_route_list(App);

    let siteRouter = quill_web::site_router(siteState.clone());
    let sessionLayer = axum::middleware::from_fn_with_state(siteState.clone(), require_admin_session);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let siteState = siteState.clone();
                move || {
                    leptos::prelude::provide_context(siteState.clone());
                }
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(siteRouter)
        .layer(sessionLayer)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
