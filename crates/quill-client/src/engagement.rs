use quill_types::{LikeResponse, LikeStatus, ShareResponse};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub fn liked_key(postId: u64) -> String {
    format!("liked_post_{postId}")
}

/// Whether this browser liked `postId` before, as remembered in client storage.
pub fn recall_like<S: KeyValueStore + ?Sized>(store: &S, postId: u64) -> bool {
    store.get(&liked_key(postId)).as_deref() == Some("1")
}

pub fn remember_like<S: KeyValueStore + ?Sized>(store: &mut S, postId: u64, liked: bool) {
    if liked {
        store.set(&liked_key(postId), "1");
    } else {
        store.remove(&liked_key(postId));
    }
}

/// Outcome of a like toggle. The backend's follow-up status wins; without it
/// the toggle's own flag, and failing that the opposite of what this
/// browser remembered.
pub fn settle_like(toggled: LikeResponse, status: Option<LikeStatus>, remembered: bool) -> LikeResponse {
    if let Some(status) = status {
        return LikeResponse::from(status);
    }
    let liked = toggled.has_liked.unwrap_or(!remembered);
    LikeResponse {
        has_liked: Some(liked),
        ..toggled
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct LikeSnapshot {
    count: i64,
    liked: bool,
}

/// Like button state with optimistic updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LikeCounter {
    post_id: u64,
    count: i64,
    liked: bool,
    in_flight: Option<LikeSnapshot>,
    error: Option<String>,
}

impl LikeCounter {
    pub fn new(postId: u64, count: i64, liked: bool) -> Self {
        Self {
            post_id: postId,
            count: count.max(0),
            liked,
            in_flight: None,
            error: None,
        }
    }

    /// Initial state for a page load; the liked flag comes from storage so a
    /// reload shows a prior like without asking the server.
    pub fn restore<S: KeyValueStore + ?Sized>(postId: u64, count: i64, store: &S) -> Self {
        Self::new(postId, count, recall_like(store, postId))
    }

    pub fn post_id(&self) -> u64 {
        self.post_id
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Flips the liked flag and the count right away. Returns the liked state
    /// the server should end up in, or `None` while a toggle is in flight.
    pub fn toggle(&mut self) -> Option<bool> {
        if self.in_flight.is_some() {
            return None;
        }
        self.in_flight = Some(LikeSnapshot {
            count: self.count,
            liked: self.liked,
        });
        self.error = None;

        self.liked = !self.liked;
        self.count = if self.liked {
            self.count + 1
        } else {
            (self.count - 1).max(0)
        };
        Some(self.liked)
    }

    /// Adopts the server's authoritative numbers.
    pub fn reconcile(&mut self, response: &LikeResponse) {
        self.in_flight = None;
        self.count = response.likes.max(0);
        if let Some(hasLiked) = response.has_liked {
            self.liked = hasLiked;
        }
    }

    /// Undoes the optimistic change after a failed call.
    pub fn rollback(&mut self, error: impl Into<String>) {
        if let Some(snapshot) = self.in_flight.take() {
            self.count = snapshot.count;
            self.liked = snapshot.liked;
        }
        self.error = Some(error.into());
    }

    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        remember_like(store, self.post_id, self.liked);
    }
}

/// Share counter. The backend only acknowledges shares, so the optimistic
/// count stands unless a count comes back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareCounter {
    count: i64,
    previous: Option<i64>,
    error: Option<String>,
}

impl ShareCounter {
    pub fn new(count: i64) -> Self {
        Self {
            count: count.max(0),
            previous: None,
            error: None,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn record(&mut self) {
        self.previous.get_or_insert(self.count);
        self.count += 1;
        self.error = None;
    }

    pub fn reconcile(&mut self, response: &ShareResponse) {
        self.previous = None;
        if let Some(shares) = response.shares {
            self.count = shares.max(0);
        }
    }

    pub fn rollback(&mut self, error: impl Into<String>) {
        if let Some(previous) = self.previous.take() {
            self.count = previous;
        }
        self.error = Some(error.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn like_flips_before_response_then_reconciles() {
        let mut counter = LikeCounter::new(7, 10, false);

        assert_eq!(counter.toggle(), Some(true));
        assert!(counter.liked());
        assert_eq!(counter.count(), 11);
        assert!(counter.is_pending());

        counter.reconcile(&LikeResponse {
            success: true,
            likes: 13,
            has_liked: Some(true),
        });
        assert_eq!(counter.count(), 13);
        assert!(counter.liked());
        assert!(!counter.is_pending());
    }

    #[test]
    fn unlike_decrements_and_server_flag_wins() {
        let mut counter = LikeCounter::new(7, 4, true);

        assert_eq!(counter.toggle(), Some(false));
        assert_eq!(counter.count(), 3);

        counter.reconcile(&LikeResponse {
            success: true,
            likes: 4,
            has_liked: Some(true),
        });
        assert!(counter.liked());
        assert_eq!(counter.count(), 4);
    }

    #[test]
    fn count_only_response_keeps_optimistic_flag() {
        let mut counter = LikeCounter::new(1, 0, false);
        counter.toggle();
        counter.reconcile(&LikeResponse {
            success: true,
            likes: 1,
            has_liked: None,
        });
        assert!(counter.liked());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn second_toggle_while_in_flight_is_refused() {
        let mut counter = LikeCounter::new(1, 2, false);
        assert!(counter.toggle().is_some());
        assert_eq!(counter.toggle(), None);
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn rollback_restores_snapshot() {
        let mut counter = LikeCounter::new(1, 2, false);
        counter.toggle();
        counter.rollback("Failed to update like status");

        assert!(!counter.liked());
        assert_eq!(counter.count(), 2);
        assert_eq!(counter.error(), Some("Failed to update like status"));
        assert!(counter.toggle().is_some());
    }

    #[test]
    fn liked_flag_survives_reload_through_storage() {
        let mut store = MemoryStore::new();
        let mut counter = LikeCounter::restore(42, 5, &store);
        assert!(!counter.liked());

        counter.toggle();
        counter.reconcile(&LikeResponse {
            success: true,
            likes: 6,
            has_liked: None,
        });
        counter.persist(&mut store);

        let reloaded = LikeCounter::restore(42, 6, &store);
        assert!(reloaded.liked());
        assert!(!LikeCounter::restore(43, 0, &store).liked());

        remember_like(&mut store, 42, false);
        assert!(store.is_empty());
    }

    #[test]
    fn settled_like_prefers_backend_status() {
        let toggled = LikeResponse {
            success: true,
            likes: 9,
            has_liked: None,
        };
        let settled = settle_like(
            toggled,
            Some(LikeStatus {
                has_liked: false,
                likes: 8,
            }),
            false,
        );
        assert_eq!(settled.likes, 8);
        assert_eq!(settled.has_liked, Some(false));
    }

    #[test]
    fn settled_like_falls_back_to_toggle_then_memory() {
        let flagged = LikeResponse {
            success: true,
            likes: 3,
            has_liked: Some(false),
        };
        assert_eq!(settle_like(flagged, None, false).has_liked, Some(false));

        let countOnly = LikeResponse {
            success: true,
            likes: 3,
            has_liked: None,
        };
        let settled = settle_like(countOnly.clone(), None, false);
        assert_eq!(settled.has_liked, Some(true));
        assert_eq!(settled.likes, 3);

        assert_eq!(settle_like(countOnly, None, true).has_liked, Some(false));
    }

    #[test]
    fn share_counter_starts_from_backend_count() {
        let mut shares = ShareCounter::new(12);
        shares.record();
        assert_eq!(shares.count(), 13);
        assert_eq!(ShareCounter::new(-4).count(), 0);
    }

    #[test]
    fn share_counter_is_optimistic() {
        let mut shares = ShareCounter::new(3);
        shares.record();
        assert_eq!(shares.count(), 4);

        shares.reconcile(&ShareResponse {
            success: true,
            shares: None,
        });
        assert_eq!(shares.count(), 4);

        shares.record();
        shares.rollback("Failed to share content");
        assert_eq!(shares.count(), 4);
        assert_eq!(shares.error(), Some("Failed to share content"));
    }
}
