use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as served by the backend. List endpoints omit `content`
/// and `updated_at`, so both default.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default, alias = "shares")]
    pub share_count: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl Post {
    /// Tags are stored comma separated on the backend.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Cover image, treating an empty string the same as no image.
    pub fn cover_image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.is_empty())
    }
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            summary: String::new(),
            content: String::new(),
            image_url: None,
            read_time: 0,
            like_count: 0,
            share_count: 0,
            is_active: false,
            created_at: DateTime::<Utc>::default(),
            updated_at: None,
            category: None,
            tags: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total_posts: i64,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for PaginatedResponse {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            total_posts: 0,
            current_page: 1,
            page_size: 0,
            total_pages: 0,
        }
    }
}

/// Create/update payload for the admin endpoints. The backend binds these
/// with camelCase keys and maps `description` onto the post summary.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            description: post.summary.clone(),
            read_time: post.read_time,
            is_active: post.is_active,
            image_url: post.image_url.clone().unwrap_or_default(),
            category: post.category.clone().unwrap_or_default(),
            tags: post.tags.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageUploadResponse {
    pub url: String,
    #[serde(default)]
    pub filename: String,
}
