use crate::wall::Post;

/// Generic user-facing messages; the typed errors behind them are logged,
/// never shown.
const LOAD_FAILED: &str = "Failed to load posts. Please try again.";
const POST_FAILED: &str = "Failed to post. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Outcome of one async operation, delivered back to the store.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Initial fetch resolved with the full history, newest first.
    Loaded(Vec<Post>),
    /// Initial fetch failed.
    LoadFailed,
    /// The live subscription delivered a newly created post.
    Created(Post),
    /// A create request was acknowledged by the service.
    PostAccepted,
    /// A create request failed.
    PostRejected,
}

/// Envelope tying an event to the activation that spawned it. Stale
/// messages are discarded without touching state.
#[derive(Debug, Clone)]
pub struct StoreMessage {
    pub activation: u64,
    pub event: StoreEvent,
}

/// The feed core: one consistent, growing list of posts, merged from the
/// one-shot history fetch and the live append stream.
///
/// The store itself is synchronous. All network work happens in spawned
/// tasks that report back through [`StoreMessage`]; `apply` is the only
/// mutation path after an activation begins.
pub struct FeedStore {
    posts: Vec<Post>,
    status: FeedStatus,
    load_error: Option<String>,
    post_error: Option<String>,
    posting: bool,
    activation: u64,
    active: bool,
    /// Live events that arrived while the current load was still in
    /// flight. They occupy the front of `posts` and must survive the
    /// wholesale replace when the fetch resolves.
    live_during_load: usize,
}

impl FeedStore {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            status: FeedStatus::Idle,
            load_error: None,
            post_error: None,
            posting: false,
            activation: 0,
            active: false,
            live_during_load: 0,
        }
    }

    /// Start a new activation: status goes to Loading, errors clear, and
    /// any still-pending callbacks from earlier activations become stale.
    /// The previously displayed feed is kept until the fetch resolves.
    pub fn begin_initialize(&mut self) -> u64 {
        self.activation += 1;
        self.active = true;
        self.status = FeedStatus::Loading;
        self.load_error = None;
        self.post_error = None;
        self.posting = false;
        self.live_during_load = 0;
        tracing::debug!(activation = self.activation, "feed store initializing");
        self.activation
    }

    /// Gate for a submit: the trimmed body must be non-empty and no other
    /// submission may be in flight. Returns the activation to tag the
    /// create task with, or None when no request should be issued.
    pub fn begin_posting(&mut self, body: &str) -> Option<u64> {
        if body.trim().is_empty() || self.posting || !self.active {
            return None;
        }
        self.posting = true;
        self.post_error = None;
        Some(self.activation)
    }

    /// Mark the activation over. Anything still in flight resolves into a
    /// stale message and is discarded by `apply`.
    pub fn teardown(&mut self) {
        self.active = false;
        tracing::debug!(activation = self.activation, "feed store torn down");
    }

    /// Apply one async outcome. Returns false when the message was stale
    /// and nothing changed.
    pub fn apply(&mut self, msg: StoreMessage) -> bool {
        if !self.active || msg.activation != self.activation {
            tracing::debug!(
                msg_activation = msg.activation,
                current = self.activation,
                "discarding stale store message"
            );
            return false;
        }

        match msg.event {
            StoreEvent::Loaded(fetched) => {
                // Keep live arrivals from this activation at the front;
                // everything behind them is replaced by the fetch result.
                let mut merged: Vec<Post> = self.posts[..self.live_during_load].to_vec();
                merged.extend(fetched);
                self.posts = merged;
                self.live_during_load = 0;
                self.status = FeedStatus::Ready;
                self.load_error = None;
            }
            StoreEvent::LoadFailed => {
                self.status = FeedStatus::Error;
                self.load_error = Some(LOAD_FAILED.to_string());
            }
            StoreEvent::Created(post) => {
                // New posts are always the most recent, so prepending
                // keeps the descending order. No de-duplication against
                // the fetched set: a redelivered id shows up twice.
                self.posts.insert(0, post);
                if self.status == FeedStatus::Loading {
                    self.live_during_load += 1;
                }
            }
            StoreEvent::PostAccepted => {
                self.posting = false;
                self.post_error = None;
            }
            StoreEvent::PostRejected => {
                self.posting = false;
                self.post_error = Some(POST_FAILED.to_string());
            }
        }
        true
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn post_error(&self) -> Option<&str> {
        self.post_error.as_deref()
    }

    pub fn posting(&self) -> bool {
        self.posting
    }

    pub fn clear_post_error(&mut self) {
        self.post_error = None;
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_post(id: &str, minute: u32) -> Post {
        Post {
            id: id.to_string(),
            author: None,
            body: format!("post {}", id),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    fn ids(store: &FeedStore) -> Vec<&str> {
        store.posts().iter().map(|p| p.id.as_str()).collect()
    }

    fn msg(activation: u64, event: StoreEvent) -> StoreMessage {
        StoreMessage { activation, event }
    }

    #[test]
    fn starts_idle_and_empty() {
        let store = FeedStore::new();
        assert_eq!(store.status(), FeedStatus::Idle);
        assert!(store.posts().is_empty());
        assert!(store.load_error().is_none());
        assert!(!store.posting());
    }

    #[test]
    fn initialize_moves_to_loading() {
        let mut store = FeedStore::new();
        let activation = store.begin_initialize();
        assert_eq!(activation, 1);
        assert_eq!(store.status(), FeedStatus::Loading);
        assert!(store.load_error().is_none());
    }

    #[test]
    fn empty_fetch_becomes_ready_with_empty_feed() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        assert!(store.apply(msg(a, StoreEvent::Loaded(Vec::new()))));
        assert_eq!(store.status(), FeedStatus::Ready);
        assert!(store.posts().is_empty());
        assert!(store.load_error().is_none());
    }

    #[test]
    fn fetch_failure_becomes_error_with_empty_feed() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        assert!(store.apply(msg(a, StoreEvent::LoadFailed)));
        assert_eq!(store.status(), FeedStatus::Error);
        assert!(store.posts().is_empty());
        assert_eq!(
            store.load_error(),
            Some("Failed to load posts. Please try again.")
        );
    }

    #[test]
    fn live_event_after_fetch_is_prepended() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.apply(msg(a, StoreEvent::Loaded(vec![make_post("1", 0)])));
        store.apply(msg(a, StoreEvent::Created(make_post("2", 5))));
        assert_eq!(ids(&store), vec!["2", "1"]);
    }

    #[test]
    fn live_events_before_fetch_resolution_are_not_dropped() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.apply(msg(a, StoreEvent::Created(make_post("e1", 10))));
        store.apply(msg(a, StoreEvent::Created(make_post("e2", 11))));
        store.apply(msg(a, StoreEvent::Loaded(vec![make_post("1", 1), make_post("0", 0)])));
        assert_eq!(ids(&store), vec!["e2", "e1", "1", "0"]);
        assert_eq!(store.status(), FeedStatus::Ready);
    }

    #[test]
    fn interleavings_keep_descending_created_at() {
        // Fetch resolves between two live arrivals; the final order must
        // still be newest first when live events are newer than history.
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.apply(msg(a, StoreEvent::Created(make_post("e1", 10))));
        store.apply(msg(a, StoreEvent::Loaded(vec![make_post("1", 1)])));
        store.apply(msg(a, StoreEvent::Created(make_post("e2", 11))));
        assert_eq!(ids(&store), vec!["e2", "e1", "1"]);
        let times: Vec<_> = store.posts().iter().map(|p| p.created_at).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn redelivered_id_is_prepended_without_dedup() {
        // Known gap kept on purpose: the store never checks ids, so a
        // replayed creation event shows up twice.
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.apply(msg(a, StoreEvent::Loaded(vec![make_post("1", 0)])));
        store.apply(msg(a, StoreEvent::Created(make_post("1", 0))));
        assert_eq!(ids(&store), vec!["1", "1"]);
    }

    #[test]
    fn fetch_failure_keeps_previously_displayed_feed() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.apply(msg(a, StoreEvent::Loaded(vec![make_post("1", 0)])));

        let b = store.begin_initialize();
        assert_eq!(store.status(), FeedStatus::Loading);
        store.apply(msg(b, StoreEvent::LoadFailed));
        assert_eq!(store.status(), FeedStatus::Error);
        assert_eq!(ids(&store), vec!["1"]);
    }

    #[test]
    fn reinitialize_replaces_feed_wholesale() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.apply(msg(a, StoreEvent::Loaded(vec![make_post("old", 0)])));

        store.teardown();
        let b = store.begin_initialize();
        store.apply(msg(b, StoreEvent::Loaded(vec![make_post("new", 1)])));
        assert_eq!(ids(&store), vec!["new"]);
        assert_eq!(store.status(), FeedStatus::Ready);
    }

    #[test]
    fn stale_fetch_after_teardown_is_discarded() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.teardown();
        assert!(!store.apply(msg(a, StoreEvent::Loaded(vec![make_post("1", 0)]))));
        assert!(store.posts().is_empty());
        assert_eq!(store.status(), FeedStatus::Loading);
    }

    #[test]
    fn stale_live_event_from_prior_activation_is_discarded() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.teardown();
        let b = store.begin_initialize();
        assert!(!store.apply(msg(a, StoreEvent::Created(make_post("ghost", 9)))));
        assert!(store.posts().is_empty());
        assert!(store.apply(msg(b, StoreEvent::Loaded(Vec::new()))));
        assert!(store.posts().is_empty());
    }

    #[test]
    fn whitespace_body_never_sets_posting() {
        let mut store = FeedStore::new();
        store.begin_initialize();
        assert!(store.begin_posting("   ").is_none());
        assert!(store.begin_posting("").is_none());
        assert!(!store.posting());
    }

    #[test]
    fn posting_flag_blocks_duplicate_submission() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        assert_eq!(store.begin_posting("hello"), Some(a));
        assert!(store.posting());
        assert!(store.begin_posting("hello again").is_none());
    }

    #[test]
    fn accepted_post_clears_posting() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.begin_posting("hello").unwrap();
        store.apply(msg(a, StoreEvent::PostAccepted));
        assert!(!store.posting());
        assert!(store.post_error().is_none());
    }

    #[test]
    fn rejected_post_surfaces_generic_error() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.begin_posting("hello").unwrap();
        store.apply(msg(a, StoreEvent::PostRejected));
        assert!(!store.posting());
        assert_eq!(store.post_error(), Some("Failed to post. Please try again."));
    }

    #[test]
    fn retry_after_rejection_is_allowed() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.begin_posting("hello").unwrap();
        store.apply(msg(a, StoreEvent::PostRejected));
        assert_eq!(store.begin_posting("hello"), Some(a));
        assert!(store.post_error().is_none());
    }

    #[test]
    fn submission_result_after_teardown_is_discarded() {
        let mut store = FeedStore::new();
        let a = store.begin_initialize();
        store.begin_posting("hello").unwrap();
        store.teardown();
        assert!(!store.apply(msg(a, StoreEvent::PostAccepted)));
    }

    #[test]
    fn begin_posting_requires_an_activation() {
        let mut store = FeedStore::new();
        assert!(store.begin_posting("hello").is_none());
    }
}
