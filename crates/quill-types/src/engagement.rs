use serde::{Deserialize, Serialize};

/// Answer of `GET /posts/{id}/like`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LikeStatus {
    pub has_liked: bool,
    pub likes: i64,
}

/// Answer of `POST /posts/{id}/like`. Older backends only send the count.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LikeResponse {
    #[serde(default)]
    pub success: bool,
    pub likes: i64,
    #[serde(default)]
    pub has_liked: Option<bool>,
}

impl From<LikeStatus> for LikeResponse {
    fn from(status: LikeStatus) -> Self {
        Self {
            success: true,
            likes: status.likes,
            has_liked: Some(status.has_liked),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ShareResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub shares: Option<i64>,
}
