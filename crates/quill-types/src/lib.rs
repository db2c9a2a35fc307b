pub mod auth;
pub mod engagement;
pub mod post;
pub mod stats;

pub use auth::*;
pub use engagement::*;
pub use post::*;
pub use stats::*;

use serde::{Deserialize, Serialize};

/// Error body returned by the blog backend. Handlers answer either with
/// `{code, message, details}` or with a bare `{error}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The most specific human readable text the body carries.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.is_empty())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
