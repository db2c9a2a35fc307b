use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use quill_types::{DailyTraffic, DetailedStats, OverallStats, PostDetailedStats};
use serde::{Deserialize, Serialize};

use crate::components::stat_card::{format_count, StatCard};
use crate::components::traffic_chart::TrafficChart;

/// Days of traffic shown on the dashboard.
pub const TRAFFIC_WINDOW_DAYS: i64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StatsDashboard {
    pub overall: OverallStats,
    pub traffic: Vec<DailyTraffic>,
    pub detailed: DetailedStats,
}

#[server]
pub async fn dashboard_stats() -> Result<StatsDashboard, ServerFnError> {
    use chrono::{Duration, Utc};
    use quill_client::ClientError;

    use crate::server::with_admin;

    with_admin(|state, token| async move {
        let today = Utc::now().date_naive();
        let start = today - Duration::days(TRAFFIC_WINDOW_DAYS - 1);

        let overall = state.api.overall_stats(&token).await?;
        let traffic = state.api.traffic(&token, Some(start), Some(today)).await?;
        let detailed = state.api.detailed_stats(&token).await?;
        Ok::<_, ClientError>(StatsDashboard {
            overall,
            traffic,
            detailed,
        })
    })
    .await
}

#[server]
pub async fn post_stats(id: u64) -> Result<PostDetailedStats, ServerFnError> {
    use crate::server::with_admin;

    with_admin(|state, token| async move { state.api.post_stats(&token, id).await }).await
}

#[component]
pub fn StatsPage() -> impl IntoView {
    #[allow(unused_variables)]
    let (stats, setStats) = signal(Option::<Result<StatsDashboard, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            let result = dashboard_stats().await.map_err(|e| e.to_string());
            setStats.set(Some(result));
        });
    }

    view! {
        <div class="page-header">
            <h1>"Statistics"</h1>
            <p class="subtitle">{format!("Traffic over the last {TRAFFIC_WINDOW_DAYS} days")}</p>
        </div>
        {move || match stats.get() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading statistics..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
            Some(Ok(dashboard)) => {
                let StatsDashboard { overall, traffic, detailed } = dashboard;
                view! {
                    <div class="stat-grid">
                        <StatCard title="Posts" value=overall.total_posts />
                        <StatCard title="Views" value=overall.total_views />
                        <StatCard title="Likes" value=overall.total_likes />
                        <StatCard title="Shares" value=overall.total_shares />
                    </div>
                    <section class="card">
                        <div class="card-title">"Daily views"</div>
                        <TrafficChart points=traffic />
                    </section>
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>"Post"</th>
                                <th>"Views"</th>
                                <th>"Likes"</th>
                                <th>"Shares"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {detailed
                                .post_stats
                                .into_iter()
                                .map(|row| {
                                    view! {
                                        <tr>
                                            <td>
                                                <a href=format!("/admin/stats/{}", row.post_id)>{row.title}</a>
                                            </td>
                                            <td>{format_count(row.views)}</td>
                                            <td>{format_count(row.likes)}</td>
                                            <td>{format_count(row.shares)}</td>
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

#[component]
pub fn PostStatsPage() -> impl IntoView {
    let params = use_params_map();
    #[allow(unused_variables)]
    let postId = move || params.with(|p| p.get("id").and_then(|id| id.parse::<u64>().ok()));
    #[allow(unused_variables)]
    let (stats, setStats) = signal(Option::<Result<PostDetailedStats, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            let result = match postId() {
                Some(id) => post_stats(id).await.map_err(|e| e.to_string()),
                None => Err("Unknown post".to_string()),
            };
            setStats.set(Some(result));
        });
    }

    view! {
        <a class="back-link" href="/admin/stats">
            "\u{2190} All statistics"
        </a>
        {move || match stats.get() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading statistics..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
            Some(Ok(post)) => {
                view! {
                    <div class="page-header">
                        <h1>{post.title.clone()}</h1>
                        <p class="subtitle">
                            {format!(
                                "Published {} \u{b7} {} min read",
                                post.created_at.format("%B %-d, %Y"),
                                post.read_time,
                            )}
                        </p>
                    </div>
                    <div class="stat-grid">
                        <StatCard title="Views" value=post.views />
                        <StatCard title="Likes" value=post.likes />
                        <StatCard title="Shares" value=post.shares />
                    </div>
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>"Month"</th>
                                <th>"Views"</th>
                                <th>"Likes"</th>
                                <th>"Shares"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {post
                                .monthly_stats
                                .into_iter()
                                .map(|month| {
                                    view! {
                                        <tr>
                                            <td>{month.month}</td>
                                            <td>{format_count(month.views)}</td>
                                            <td>{format_count(month.likes)}</td>
                                            <td>{format_count(month.shares)}</td>
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
