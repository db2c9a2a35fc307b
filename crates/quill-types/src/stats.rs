use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct OverallStats {
    #[serde(default)]
    pub total_posts: i64,
    #[serde(default)]
    pub total_views: i64,
    #[serde(default)]
    pub total_likes: i64,
    #[serde(default)]
    pub total_shares: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TotalStats {
    #[serde(default)]
    pub total_views: i64,
    #[serde(default)]
    pub total_likes: i64,
    #[serde(default)]
    pub total_shares: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DetailedStats {
    #[serde(default)]
    pub total_stats: TotalStats,
    #[serde(default)]
    pub post_stats: Vec<PostStatsRow>,
}

/// One row of the admin "all posts" statistics table.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PostStatsRow {
    pub post_id: u64,
    pub title: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub shares: i64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStats {
    pub month: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub shares: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PostDetailedStats {
    pub post_id: u64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub shares: i64,
    #[serde(default)]
    pub monthly_stats: Vec<MonthlyStats>,
}

/// Per-day traffic point; `date` is `YYYY-MM-DD`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyTraffic {
    pub date: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub unique_visitors: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PostCount {
    pub count: i64,
}
