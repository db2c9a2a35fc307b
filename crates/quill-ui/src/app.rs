use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::nav::{Framed, ThemeContext};
use crate::components::toast::ToastProvider;
use crate::pages::about::AboutPage;
use crate::pages::admin::AdminPage;
use crate::pages::editor::{EditPostPage, NewPostPage};
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::post::PostPage;
use crate::pages::stats::{PostStatsPage, StatsPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    ThemeContext::provide();

    view! {
        <Stylesheet id="leptos" href="/pkg/quill-console.css" />
        <Title text="Quill" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <Framed><NotFoundPage /></Framed> }.into_any()>
                    <Route path=StaticSegment("") view=|| view! { <Framed><HomePage /></Framed> } />
                    <Route
                        path=(StaticSegment("post"), ParamSegment("id"))
                        view=|| view! { <Framed><PostPage /></Framed> }
                    />
                    <Route path=StaticSegment("about") view=|| view! { <Framed><AboutPage /></Framed> } />
                    <Route path=StaticSegment("login") view=|| view! { <Framed><LoginPage /></Framed> } />
                    <Route path=StaticSegment("admin") view=|| view! { <Framed><AdminPage /></Framed> } />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("posts"), StaticSegment("new"))
                        view=|| view! { <Framed><NewPostPage /></Framed> }
                    />
                    <Route
                        path=(
                            StaticSegment("admin"),
                            StaticSegment("posts"),
                            StaticSegment("edit"),
                            ParamSegment("id"),
                        )
                        view=|| view! { <Framed><EditPostPage /></Framed> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("stats"))
                        view=|| view! { <Framed><StatsPage /></Framed> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("stats"), ParamSegment("id"))
                        view=|| view! { <Framed><PostStatsPage /></Framed> }
                    />
                </Routes>
            </Router>
        </ToastProvider>
    }
}
