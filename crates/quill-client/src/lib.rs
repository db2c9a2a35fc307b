#![allow(non_snake_case)]

pub mod debounce;
pub mod engagement;
pub mod error;
pub mod pager;
pub mod share;
pub mod storage;

#[cfg(feature = "remote")]
pub mod api;
#[cfg(feature = "remote")]
pub mod session;

pub use debounce::{DebounceGate, SEARCH_DEBOUNCE};
pub use engagement::{settle_like, LikeCounter, ShareCounter};
pub use error::ClientError;
pub use pager::{Pager, PostQuery, PostSource, DEFAULT_PAGE_SIZE};
pub use storage::{KeyValueStore, MemoryStore};

#[cfg(feature = "remote")]
pub use api::BlogApi;
#[cfg(feature = "remote")]
pub use session::SessionGuard;
