use async_trait::async_trait;
use chrono::NaiveDate;
use quill_types::{
    ApiErrorBody, DailyTraffic, DetailedStats, ImageUploadResponse, LikeResponse, LikeStatus,
    LoginRequest, MessageResponse, OverallStats, PaginatedResponse, Post, PostCount, PostDetailedStats,
    PostDraft, ShareResponse, TokenResponse,
};
use reqwest::{header, multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ClientError;
use crate::pager::PostSource;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Typed client for the blog backend's REST API.
#[derive(Clone, Debug)]
pub struct BlogApi {
    client: Client,
    base_url: String,
}

impl BlogApi {
    pub fn new(baseUrl: impl Into<String>) -> Self {
        Self::with_client(Client::new(), baseUrl)
    }

    pub fn with_client(client: Client, baseUrl: impl Into<String>) -> Self {
        Self {
            client,
            base_url: baseUrl.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    fn admin(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Engagement calls are keyed by client address on the backend, so the
    /// visitor's address rides along as `X-Forwarded-For`.
    fn engagement(&self, method: Method, path: &str, visitor: Option<&str>) -> RequestBuilder {
        let builder = self.request(method, path);
        match visitor {
            Some(addr) => builder.header(FORWARDED_FOR, addr),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = check(builder.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    // Public reading views

    pub async fn list_posts(&self, page: u32, size: u32) -> Result<PaginatedResponse, ClientError> {
        self.send(
            self.request(Method::GET, "/posts/paginated")
                .query(&[("page", page), ("size", size)]),
        )
        .await
    }

    pub async fn search_posts(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Result<PaginatedResponse, ClientError> {
        let page = page.to_string();
        let size = size.to_string();
        self.send(
            self.request(Method::GET, "/posts/search")
                .query(&[("q", query), ("page", page.as_str()), ("size", size.as_str())]),
        )
        .await
    }

    pub async fn get_post(&self, id: u64) -> Result<Post, ClientError> {
        self.send(self.request(Method::GET, &format!("/posts/{id}"))).await
    }

    pub async fn related_posts(&self, id: u64) -> Result<Vec<Post>, ClientError> {
        self.send(self.request(Method::GET, &format!("/posts/{id}/related")))
            .await
    }

    pub async fn like_status(
        &self,
        id: u64,
        visitor: Option<&str>,
    ) -> Result<LikeStatus, ClientError> {
        self.send(self.engagement(Method::GET, &format!("/posts/{id}/like"), visitor))
            .await
    }

    pub async fn toggle_like(
        &self,
        id: u64,
        visitor: Option<&str>,
    ) -> Result<LikeResponse, ClientError> {
        self.send(self.engagement(Method::POST, &format!("/posts/{id}/like"), visitor))
            .await
    }

    pub async fn share_post(
        &self,
        id: u64,
        visitor: Option<&str>,
    ) -> Result<ShareResponse, ClientError> {
        self.send(self.engagement(Method::POST, &format!("/posts/{id}/share"), visitor))
            .await
    }

    // Admin console

    pub async fn login(&self, credentials: &LoginRequest) -> Result<TokenResponse, ClientError> {
        self.send(self.request(Method::POST, "/admin/login").json(credentials))
            .await
    }

    pub async fn admin_posts(&self, token: &str) -> Result<Vec<Post>, ClientError> {
        self.send(self.admin(Method::GET, "/admin/posts", token)).await
    }

    pub async fn admin_post(&self, token: &str, id: u64) -> Result<Post, ClientError> {
        self.send(self.admin(Method::GET, &format!("/admin/posts/{id}"), token))
            .await
    }

    pub async fn create_post(&self, token: &str, draft: &PostDraft) -> Result<Post, ClientError> {
        self.send(self.admin(Method::POST, "/admin/posts", token).json(draft))
            .await
    }

    pub async fn update_post(
        &self,
        token: &str,
        id: u64,
        draft: &PostDraft,
    ) -> Result<Post, ClientError> {
        self.send(
            self.admin(Method::PUT, &format!("/admin/posts/{id}"), token)
                .json(draft),
        )
        .await
    }

    /// Soft delete: the post disappears from public views.
    pub async fn delete_post(&self, token: &str, id: u64) -> Result<MessageResponse, ClientError> {
        self.send(self.admin(Method::DELETE, &format!("/admin/posts/{id}"), token))
            .await
    }

    pub async fn delete_post_permanently(
        &self,
        token: &str,
        id: u64,
    ) -> Result<MessageResponse, ClientError> {
        self.send(self.admin(
            Method::DELETE,
            &format!("/admin/posts/{id}/permanent"),
            token,
        ))
        .await
    }

    pub async fn upload_image(
        &self,
        token: &str,
        filename: &str,
        contentType: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<ImageUploadResponse, ClientError> {
        let mut part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        if let Some(mime) = contentType {
            part = part.mime_str(mime)?;
        }
        let form = multipart::Form::new().part("image", part);

        self.send(
            self.admin(Method::POST, "/admin/images/upload", token)
                .multipart(form),
        )
        .await
    }

    pub async fn overall_stats(&self, token: &str) -> Result<OverallStats, ClientError> {
        self.send(self.admin(Method::GET, "/admin/stats/overall", token))
            .await
    }

    pub async fn traffic(
        &self,
        token: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyTraffic>, ClientError> {
        let mut params = Vec::new();
        if let Some(start) = start {
            params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = end {
            params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        self.send(
            self.admin(Method::GET, "/admin/stats/traffic", token)
                .query(&params),
        )
        .await
    }

    pub async fn detailed_stats(&self, token: &str) -> Result<DetailedStats, ClientError> {
        self.send(self.admin(Method::GET, "/admin/posts/detailed-stats", token))
            .await
    }

    pub async fn post_stats(&self, token: &str, id: u64) -> Result<PostDetailedStats, ClientError> {
        self.send(self.admin(Method::GET, &format!("/admin/posts/stats/{id}"), token))
            .await
    }

    pub async fn post_count(&self, token: &str) -> Result<PostCount, ClientError> {
        self.send(self.admin(Method::GET, "/admin/posts/count", token))
            .await
    }
}

/// Maps non-2xx responses onto `ClientError`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.text().map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    warn!("backend call {url} failed with {status}: {message}");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PostSource for BlogApi {
    async fn list_posts(&self, page: u32, size: u32) -> Result<PaginatedResponse, ClientError> {
        BlogApi::list_posts(self, page, size).await
    }

    async fn search_posts(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Result<PaginatedResponse, ClientError> {
        BlogApi::search_posts(self, query, page, size).await
    }
}
