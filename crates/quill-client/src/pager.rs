use async_trait::async_trait;
use quill_types::{PaginatedResponse, Post};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Posts per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// One request for a page of posts. A non-empty query goes to the search
/// endpoint, everything else to the plain listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum PostQuery {
    List { page: u32, size: u32 },
    Search { query: String, page: u32, size: u32 },
}

impl PostQuery {
    pub fn new(query: &str, page: u32, size: u32) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            PostQuery::List { page, size }
        } else {
            PostQuery::Search {
                query: trimmed.to_string(),
                page,
                size,
            }
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            PostQuery::List { page, .. } | PostQuery::Search { page, .. } => *page,
        }
    }

    /// Search text, empty for the plain listing.
    pub fn text(&self) -> &str {
        match self {
            PostQuery::List { .. } => "",
            PostQuery::Search { query, .. } => query,
        }
    }
}

#[async_trait]
pub trait PostSource: Send + Sync {
    async fn list_posts(&self, page: u32, size: u32) -> Result<PaginatedResponse, ClientError>;

    async fn search_posts(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Result<PaginatedResponse, ClientError>;
}

pub async fn fetch<S: PostSource + ?Sized>(
    source: &S,
    query: &PostQuery,
) -> Result<PaginatedResponse, ClientError> {
    match query {
        PostQuery::List { page, size } => source.list_posts(*page, *size).await,
        PostQuery::Search { query, page, size } => source.search_posts(query, *page, *size).await,
    }
}

/// State behind a paginated, searchable post list.
#[derive(Clone, Debug, PartialEq)]
pub struct Pager {
    page: u32,
    page_size: u32,
    total_pages: u32,
    total_posts: i64,
    query: String,
    posts: Vec<Post>,
    loading: bool,
    error: Option<String>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(pageSize: u32) -> Self {
        Self {
            page: 1,
            page_size: pageSize.max(1),
            total_pages: 0,
            total_posts: 0,
            query: String::new(),
            posts: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_posts(&self) -> i64 {
        self.total_posts
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// A new query always starts again from the first page.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    /// Moves to `page`. Out of range targets leave the pager untouched.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.go_to(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.go_to(self.page - 1)
    }

    pub fn request(&self) -> PostQuery {
        PostQuery::new(&self.query, self.page, self.page_size)
    }

    /// Marks a fetch as started and returns what to ask for.
    pub fn begin(&mut self) -> PostQuery {
        self.loading = true;
        self.error = None;
        self.request()
    }

    /// Applies the outcome of a fetch. Errors keep whatever was displayed.
    pub fn apply(&mut self, result: Result<PaginatedResponse, String>) {
        self.loading = false;
        match result {
            Ok(response) => {
                self.posts = response.posts;
                self.total_posts = response.total_posts;
                self.total_pages = response.total_pages;
                if response.current_page >= 1 {
                    self.page = response.current_page;
                }
                if response.page_size >= 1 {
                    self.page_size = response.page_size;
                }
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    /// Fetches the current page from `source` and applies it.
    pub async fn load<S: PostSource + ?Sized>(&mut self, source: &S) {
        let query = self.begin();
        let result = fetch(source, &query).await.map_err(|e| e.to_string());
        self.apply(result);
    }
}
