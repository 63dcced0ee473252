//! # Editor session: one open document
//!
//! [`EditorSession`] owns everything the document editor does between mount
//! and unmount: the live subscription, the local cached copy, the debounced
//! autosave, the share toggle, deletion, and the periodic "Saved N ago"
//! refresh. It knows nothing about the UI framework; every state change is
//! published to an observer callback as a fresh [`EditorState`], and every
//! async step is handed back as a `'static` future for the caller to spawn.
//!
//! ## Lifecycle
//!
//! 1. [`mount_gate`] turns the auth state and route parameter into either a
//!    document id or a redirect.
//! 2. [`open`](EditorSession::open) subscribes, primes the record with one
//!    `get`, then applies snapshots until the session is torn down.
//! 3. [`run_status_ticker`](EditorSession::run_status_ticker) re-derives the
//!    status line on a fixed interval.
//! 4. [`teardown`](EditorSession::teardown) aborts the subscription, closes
//!    the debouncer and silences the observer. It is idempotent.
//!
//! ## Cache rule
//!
//! The first existing snapshot populates [`EditorState::doc`]. Later snapshots
//! only move the last-known timestamp; title, body and shared flag are
//! changed by local input alone, so in-flight edits are never clobbered.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future;
use futures::stream::{self, AbortHandle, StreamExt};

use crate::config::TypdConfig;
use crate::debounce::Debouncer;
use crate::error::StoreError;
use crate::models::{Account, Document, DocumentPatch, Snapshot, Timestamp};
use crate::repo::DocumentStore;
use crate::route::Destination;
use crate::share::ShareLinks;
use crate::time::{saved_message, sleep, Clock, SystemClock};

/// Decide whether the editor may open: a signed-in account and a non-empty
/// document id are both required.
pub fn mount_gate(account: Option<&Account>, doc_id: Option<&str>) -> Result<String, Destination> {
    if account.is_none() {
        return Err(Destination::Login);
    }
    match doc_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Ok(id.to_string()),
        None => Err(Destination::Documents),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    /// Missing record or failed subscription. Terminal.
    NotFound,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SaveStatus {
    Idle,
    Saving,
    SavedAt(Timestamp),
    Failed,
}

/// Everything the editor view renders.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    pub doc_id: String,
    pub phase: Phase,
    /// Local cached copy, set from the first existing snapshot.
    pub doc: Option<Document>,
    pub last_updated: Option<Timestamp>,
    pub status: SaveStatus,
    pub status_message: String,
    pub show_preview: bool,
    pub show_actions: bool,
    pub confirming_delete: bool,
    pub links: ShareLinks,
}

/// What to draw, after applying the precedence NotFound > Loading > Content.
#[derive(Debug, PartialEq)]
pub enum EditorView<'a> {
    NotFound,
    Loading,
    Content(ContentView<'a>),
}

#[derive(Debug, PartialEq)]
pub struct ContentView<'a> {
    pub doc: &'a Document,
    pub status_message: &'a str,
    pub preview: bool,
    /// Label of the button that opens and closes the actions panel.
    pub actions_label: &'static str,
    /// `None` while the actions panel is closed.
    pub actions: Option<ActionsPanel<'a>>,
    pub confirming_delete: bool,
}

#[derive(Debug, PartialEq)]
pub struct ActionsPanel<'a> {
    pub share_label: &'static str,
    /// Public and social links, only while shared.
    pub links: Option<&'a ShareLinks>,
    /// Delete is hidden while the document is shared.
    pub can_delete: bool,
}

impl EditorState {
    pub fn new(doc_id: &str, share_base: &str) -> Self {
        Self {
            doc_id: doc_id.to_string(),
            phase: Phase::Loading,
            doc: None,
            last_updated: None,
            status: SaveStatus::Idle,
            status_message: String::new(),
            show_preview: false,
            show_actions: false,
            confirming_delete: false,
            links: ShareLinks::new(share_base, doc_id),
        }
    }

    pub fn view(&self) -> EditorView<'_> {
        match (self.phase, &self.doc) {
            (Phase::NotFound, _) => EditorView::NotFound,
            (Phase::Loading, _) | (Phase::Ready, None) => EditorView::Loading,
            (Phase::Ready, Some(doc)) => EditorView::Content(ContentView {
                doc,
                status_message: &self.status_message,
                preview: self.show_preview,
                actions_label: if self.show_actions { "Close" } else { "Actions" },
                actions: self.show_actions.then(|| ActionsPanel {
                    share_label: if doc.shared { "Set to private" } else { "Share" },
                    links: doc.shared.then_some(&self.links),
                    can_delete: !doc.shared,
                }),
                confirming_delete: self.confirming_delete,
            }),
        }
    }
}

/// A mounted editor for one document. Cloning shares the session.
pub struct EditorSession<S, C = SystemClock> {
    inner: Rc<Inner<S, C>>,
}

impl<S, C> Clone for EditorSession<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<S, C> {
    store: S,
    clock: C,
    status_refresh: Duration,
    state: RefCell<EditorState>,
    debouncer: Debouncer,
    writes_in_flight: Cell<u32>,
    last_write_failed: Cell<bool>,
    subscription: RefCell<Option<AbortHandle>>,
    ticker: RefCell<Option<AbortHandle>>,
    torn_down: Cell<bool>,
    observer: Box<dyn Fn(&EditorState)>,
}

impl<S, C> EditorSession<S, C>
where
    S: DocumentStore + 'static,
    C: Clock + 'static,
{
    pub fn new(
        store: S,
        clock: C,
        config: &TypdConfig,
        doc_id: &str,
        observer: impl Fn(&EditorState) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                store,
                clock,
                status_refresh: config.editor.status_refresh(),
                state: RefCell::new(EditorState::new(doc_id, &config.share.base_url)),
                debouncer: Debouncer::new(config.editor.debounce()),
                writes_in_flight: Cell::new(0),
                last_write_failed: Cell::new(false),
                subscription: RefCell::new(None),
                ticker: RefCell::new(None),
                torn_down: Cell::new(false),
                observer: Box::new(observer),
            }),
        }
    }

    pub fn doc_id(&self) -> String {
        self.inner.state.borrow().doc_id.clone()
    }

    pub fn state(&self) -> EditorState {
        self.inner.state.borrow().clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.torn_down.get()
    }

    fn notify(&self) {
        if self.is_torn_down() {
            return;
        }
        let state = self.state();
        (self.inner.observer)(&state);
    }

    fn update(&self, apply: impl FnOnce(&mut EditorState)) {
        if self.is_torn_down() {
            return;
        }
        apply(&mut *self.inner.state.borrow_mut());
        self.notify();
    }

    fn derive_status(&self, state: &mut EditorState) {
        state.status = if self.inner.debouncer.is_pending() || self.inner.writes_in_flight.get() > 0 {
            SaveStatus::Saving
        } else if self.inner.last_write_failed.get() {
            SaveStatus::Failed
        } else {
            match state.last_updated {
                Some(updated) => SaveStatus::SavedAt(updated),
                None => SaveStatus::Idle,
            }
        };
        state.status_message = match state.status {
            SaveStatus::Idle => String::new(),
            SaveStatus::Saving => "Saving...".to_string(),
            SaveStatus::SavedAt(updated) => saved_message(updated, self.inner.clock.now()),
            SaveStatus::Failed => "Could not save changes.".to_string(),
        };
    }

    /// Re-derive the status line, e.g. so "Saved N ago" keeps advancing.
    pub fn refresh_status(&self) {
        if self.is_torn_down() {
            return;
        }
        self.derive_status(&mut *self.inner.state.borrow_mut());
        self.notify();
    }

    /// Subscribe to the document and apply snapshots until teardown.
    ///
    /// The subscription is opened before this returns, so a teardown racing
    /// the first poll still cancels it. A torn-down session opens nothing.
    pub fn open(&self) -> impl Future<Output = ()> + 'static {
        let id = self.doc_id();
        let subscription = if self.is_torn_down() {
            None
        } else {
            let (snapshots, handle) = stream::abortable(self.inner.store.subscribe(&id));
            if let Some(previous) = self.inner.subscription.replace(Some(handle)) {
                previous.abort();
            }
            Some(snapshots)
        };
        let session = self.clone();

        async move {
            let Some(mut snapshots) = subscription else {
                return;
            };
            tracing::debug!("Opened document {id}");
            if let Err(e) = session.inner.store.get(&id).await {
                tracing::warn!("Initial read of {id} failed: {e}");
            }
            while let Some(item) = snapshots.next().await {
                session.apply_snapshot(item);
            }
            tracing::debug!("Subscription to {id} ended");
        }
    }

    /// Apply one item from the subscription.
    pub fn apply_snapshot(&self, item: Result<Snapshot, StoreError>) {
        if self.is_torn_down() {
            return;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if state.phase == Phase::NotFound {
                return;
            }
            match item {
                Err(e) => {
                    tracing::warn!("Subscription to {} failed: {e}", state.doc_id);
                    state.phase = Phase::NotFound;
                }
                Ok(Snapshot { data: None, .. }) => {
                    tracing::debug!("Document {} does not exist", state.doc_id);
                    state.phase = Phase::NotFound;
                }
                Ok(Snapshot { data: Some(data), .. }) => {
                    if state.doc.is_none() {
                        state.doc = Some(Document::from_data(&state.doc_id, &data));
                    }
                    state.last_updated = data.updated.or(state.last_updated);
                    state.phase = Phase::Ready;
                    self.derive_status(&mut state);
                }
            }
        }
        self.notify();
    }

    pub fn edit_title(&self, title: String) -> impl Future<Output = ()> + 'static {
        self.edit(move |doc| doc.title = title)
    }

    pub fn edit_body(&self, body: String) -> impl Future<Output = ()> + 'static {
        self.edit(move |doc| doc.body = body)
    }

    /// Change the cache now, save once input has been quiet for the
    /// debounce window.
    fn edit(&self, apply: impl FnOnce(&mut Document)) -> impl Future<Output = ()> + 'static {
        let fire = if self.is_torn_down() {
            None
        } else {
            let mut state = self.inner.state.borrow_mut();
            match state.doc.as_mut() {
                Some(doc) => {
                    apply(doc);
                    let fire = self.inner.debouncer.trigger();
                    self.derive_status(&mut state);
                    Some(fire)
                }
                None => None,
            }
        };
        if fire.is_some() {
            self.notify();
        }
        let session = self.clone();

        async move {
            if let Some(fire) = fire {
                if fire.await {
                    session.persist().await;
                }
            }
        }
    }

    /// Merge-write the cached title and body.
    async fn persist(&self) {
        if self.is_torn_down() {
            return;
        }
        let (id, patch) = {
            let state = self.inner.state.borrow();
            let Some(doc) = state.doc.as_ref() else {
                return;
            };
            (state.doc_id.clone(), DocumentPatch::content(&doc.title, &doc.body))
        };
        self.begin_write();
        self.finish_write(&id, patch).await;
    }

    fn begin_write(&self) {
        self.inner
            .writes_in_flight
            .set(self.inner.writes_in_flight.get() + 1);
        self.refresh_status();
    }

    async fn finish_write(&self, id: &str, patch: DocumentPatch) {
        let result = self.inner.store.merge_write(id, patch).await;
        self.inner
            .writes_in_flight
            .set(self.inner.writes_in_flight.get().saturating_sub(1));
        match result {
            Ok(()) => {
                self.inner.last_write_failed.set(false);
                tracing::debug!("Saved {id}");
            }
            Err(e) => {
                self.inner.last_write_failed.set(true);
                tracing::error!("Failed to save {id}: {e}");
            }
        }
        self.refresh_status();
    }

    /// Flip the shared flag and write it straight away.
    pub fn toggle_shared(&self) -> impl Future<Output = ()> + 'static {
        let patch = if self.is_torn_down() {
            None
        } else {
            let mut state = self.inner.state.borrow_mut();
            state.doc.as_mut().map(|doc| {
                doc.shared = !doc.shared;
                DocumentPatch::sharing(doc.shared)
            })
        };
        if patch.is_some() {
            self.begin_write();
        }
        let session = self.clone();
        let id = self.doc_id();

        async move {
            if let Some(patch) = patch {
                session.finish_write(&id, patch).await;
            }
        }
    }

    pub fn toggle_preview(&self) {
        self.update(|state| state.show_preview = !state.show_preview);
    }

    pub fn toggle_actions(&self) {
        self.update(|state| state.show_actions = !state.show_actions);
    }

    /// Ask for confirmation before deleting. Ignored while shared.
    pub fn request_delete(&self) {
        self.update(|state| {
            if state.doc.as_ref().is_some_and(|doc| !doc.shared) {
                state.confirming_delete = true;
            }
        });
    }

    pub fn cancel_delete(&self) {
        self.update(|state| state.confirming_delete = false);
    }

    /// Delete after confirmation. Resolves to where to navigate on success.
    ///
    /// If the delete fails, a save that was waiting for the quiet period is
    /// scheduled again and the future resolves once it has run.
    pub fn confirm_delete(&self) -> impl Future<Output = Option<Destination>> + 'static {
        let allowed = !self.is_torn_down() && {
            let state = self.inner.state.borrow();
            state.confirming_delete && state.doc.as_ref().is_some_and(|doc| !doc.shared)
        };
        let save_pending = allowed && self.inner.debouncer.is_pending();
        if allowed {
            // A save firing after the delete would recreate the record.
            self.inner.debouncer.cancel();
        }
        self.update(|state| state.confirming_delete = false);
        let session = self.clone();
        let id = self.doc_id();

        async move {
            if !allowed {
                return None;
            }
            match session.inner.store.delete(&id).await {
                Ok(()) => {
                    tracing::info!("Deleted {id}");
                    Some(Destination::Documents)
                }
                Err(e) => {
                    tracing::error!("Failed to delete {id}: {e}");
                    if save_pending {
                        session.edit(|_| {}).await;
                    }
                    None
                }
            }
        }
    }

    /// Refresh the status line every `status_refresh_secs` until teardown.
    /// A zero interval disables the ticker.
    pub fn run_status_ticker(&self) -> impl Future<Output = ()> + 'static {
        let interval = self.inner.status_refresh;
        let ticks = if self.is_torn_down() || interval.is_zero() {
            None
        } else {
            let session = self.clone();
            let (ticks, handle) = future::abortable(async move {
                loop {
                    sleep(interval).await;
                    if session.is_torn_down() {
                        break;
                    }
                    session.refresh_status();
                }
            });
            if let Some(previous) = self.inner.ticker.replace(Some(handle)) {
                previous.abort();
            }
            Some(ticks)
        };

        async move {
            if let Some(ticks) = ticks {
                let _ = ticks.await;
            }
        }
    }

    /// Release the subscription and timers. Safe to call more than once, and
    /// before [`open`](Self::open) ever ran.
    pub fn teardown(&self) {
        if self.inner.torn_down.replace(true) {
            return;
        }
        self.inner.debouncer.close();
        if let Some(handle) = self.inner.subscription.take() {
            handle.abort();
        }
        if let Some(handle) = self.inner.ticker.take() {
            handle.abort();
        }
        tracing::debug!("Closed editor for {}", self.doc_id());
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as Age, Utc};

    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::DocumentData;

    #[derive(Clone)]
    struct ManualClock(Rc<Cell<Timestamp>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Rc::new(Cell::new(Utc::now())))
        }

        fn advance(&self, age: Age) {
            self.0.set(self.0.get() + age);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            self.0.get()
        }
    }

    type Published = Rc<RefCell<Vec<EditorState>>>;

    fn session(
        store: &MemoryStore,
        clock: &ManualClock,
    ) -> (EditorSession<MemoryStore, ManualClock>, Published) {
        let published: Published = Rc::default();
        let sink = published.clone();
        let session = EditorSession::new(
            store.clone(),
            clock.clone(),
            &TypdConfig::default(),
            "doc1",
            move |state: &EditorState| sink.borrow_mut().push(state.clone()),
        );
        (session, published)
    }

    fn seed(store: &MemoryStore, title: &str, body: &str) {
        store.insert(
            "doc1",
            DocumentData {
                title: Some(title.to_string()),
                body: Some(body.to_string()),
                ..DocumentData::default()
            },
        );
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn account() -> Account {
        Account {
            uid: "u1".to_string(),
            email: "ada@example.com".to_string(),
            email_verified: true,
        }
    }

    #[test]
    fn test_mount_gate() {
        assert_eq!(mount_gate(None, Some("doc1")), Err(Destination::Login));
        assert_eq!(mount_gate(Some(&account()), None), Err(Destination::Documents));
        assert_eq!(mount_gate(Some(&account()), Some("  ")), Err(Destination::Documents));
        assert_eq!(mount_gate(Some(&account()), Some("doc1")), Ok("doc1".to_string()));
    }

    #[test]
    fn test_view_precedence() {
        let mut state = EditorState::new("doc1", "https://typd.org/-/");
        assert_eq!(state.view(), EditorView::Loading);

        state.phase = Phase::Ready;
        assert_eq!(state.view(), EditorView::Loading);

        state.doc = Some(Document {
            id: "doc1".to_string(),
            title: "A".to_string(),
            body: "B".to_string(),
            shared: false,
        });
        assert!(matches!(state.view(), EditorView::Content(_)));

        state.phase = Phase::NotFound;
        assert_eq!(state.view(), EditorView::NotFound);
    }

    #[test]
    fn test_actions_panel() {
        let mut state = EditorState::new("doc1", "https://typd.org/-/");
        state.phase = Phase::Ready;
        state.doc = Some(Document {
            id: "doc1".to_string(),
            title: String::new(),
            body: String::new(),
            shared: false,
        });

        let EditorView::Content(content) = state.view() else {
            panic!("expected content");
        };
        assert!(content.actions.is_none());
        assert_eq!(content.actions_label, "Actions");
        assert!(!content.preview);

        state.show_actions = true;
        let EditorView::Content(content) = state.view() else {
            panic!("expected content");
        };
        assert_eq!(content.actions_label, "Close");
        let actions = content.actions.unwrap();
        assert_eq!(actions.share_label, "Share");
        assert!(actions.links.is_none());
        assert!(actions.can_delete);

        if let Some(doc) = state.doc.as_mut() {
            doc.shared = true;
        }
        let EditorView::Content(content) = state.view() else {
            panic!("expected content");
        };
        let actions = content.actions.unwrap();
        assert_eq!(actions.share_label, "Set to private");
        assert_eq!(actions.links.unwrap().public, "https://typd.org/-/doc1");
        assert!(!actions.can_delete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_snapshot_populates_cache() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let clock = ManualClock::new();
                let (session, _) = session(&store, &clock);

                tokio::task::spawn_local(session.open());
                settle().await;

                let state = session.state();
                assert_eq!(state.phase, Phase::Ready);
                assert_eq!(
                    state.doc,
                    Some(Document {
                        id: "doc1".to_string(),
                        title: "A".to_string(),
                        body: "B".to_string(),
                        shared: false,
                    })
                );
                assert_eq!(state.status, SaveStatus::Idle);
                assert!(matches!(state.view(), EditorView::Content(_)));

                // Once the record carries a timestamp the status reports it.
                store
                    .merge_write(
                        "doc1",
                        DocumentPatch {
                            touch: true,
                            ..DocumentPatch::default()
                        },
                    )
                    .await
                    .unwrap();
                settle().await;
                assert_eq!(session.state().status_message, "Saved a few seconds ago.");
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_document_is_not_found() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                let (session, _) = session(&store, &ManualClock::new());

                tokio::task::spawn_local(session.open());
                settle().await;
                assert_eq!(session.state().view(), EditorView::NotFound);

                // Terminal: a later snapshot does not revive it.
                session.apply_snapshot(Ok(Snapshot {
                    id: "doc1".to_string(),
                    data: Some(DocumentData::default()),
                }));
                assert_eq!(session.state().phase, Phase::NotFound);
                assert!(session.state().doc.is_none());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscription_error_is_not_found() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());

                tokio::task::spawn_local(session.open());
                settle().await;
                assert_eq!(session.state().phase, Phase::Ready);

                store.revoke("doc1");
                settle().await;
                assert_eq!(session.state().view(), EditorView::NotFound);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_writes_once() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "", "");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                tokio::task::spawn_local(session.edit_title("H".to_string()));
                tokio::time::sleep(Duration::from_millis(200)).await;
                tokio::task::spawn_local(session.edit_title("He".to_string()));
                tokio::time::sleep(Duration::from_millis(200)).await;
                tokio::task::spawn_local(session.edit_body("x".to_string()));
                settle().await;

                assert_eq!(session.state().status, SaveStatus::Saving);
                assert_eq!(session.state().status_message, "Saving...");
                assert!(store.writes().is_empty());

                tokio::time::sleep(Duration::from_millis(1500)).await;

                assert_eq!(
                    store.writes(),
                    vec![("doc1".to_string(), DocumentPatch::content("He", "x"))]
                );
                assert!(matches!(session.state().status, SaveStatus::SavedAt(_)));
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_shared_is_not_debounced() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                tokio::task::spawn_local(session.edit_title("T".to_string()));
                session.toggle_shared().await;

                assert_eq!(
                    store.writes(),
                    vec![("doc1".to_string(), DocumentPatch::sharing(true))]
                );
                assert_eq!(session.state().doc.map(|d| d.shared), Some(true));
                // The debounced title save is still pending.
                assert_eq!(session.state().status, SaveStatus::Saving);

                tokio::time::sleep(Duration::from_millis(1500)).await;
                let writes = store.writes();
                assert_eq!(writes.len(), 2);
                assert_eq!(writes[1].1, DocumentPatch::content("T", "B"));
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_snapshots_keep_local_edits() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                tokio::task::spawn_local(session.edit_title("Local".to_string()));
                let remote_time = Utc::now();
                store.insert(
                    "doc1",
                    DocumentData {
                        title: Some("Remote".to_string()),
                        body: Some("Remote body".to_string()),
                        shared: Some(true),
                        updated: Some(remote_time),
                        owner: None,
                    },
                );
                settle().await;

                let state = session.state();
                let doc = state.doc.unwrap();
                assert_eq!(doc.title, "Local");
                assert_eq!(doc.body, "B");
                assert!(!doc.shared);
                assert_eq!(state.last_updated, Some(remote_time));
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_work() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, published) = session(&store, &ManualClock::new());
                let pump = tokio::task::spawn_local(session.open());
                let ticker = tokio::task::spawn_local(session.run_status_ticker());
                settle().await;
                assert_eq!(store.subscriber_count("doc1"), 1);

                let edit = tokio::task::spawn_local(session.edit_body("unsaved".to_string()));
                settle().await;
                let seen = published.borrow().len();

                session.teardown();
                session.teardown();
                settle().await;

                // Subscription, ticker and debounce timer all stop right away.
                assert!(pump.is_finished());
                assert!(ticker.is_finished());
                assert!(edit.is_finished());
                assert_eq!(store.subscriber_count("doc1"), 0);

                tokio::time::sleep(Duration::from_secs(60)).await;
                assert!(store.writes().is_empty());
                assert_eq!(published.borrow().len(), seen);

                // Nothing reopens or edits after teardown.
                session.open().await;
                session.edit_title("late".to_string()).await;
                assert_eq!(store.subscriber_count("doc1"), 0);
                assert!(store.writes().is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_advances_age() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                let clock = ManualClock::new();
                store.insert(
                    "doc1",
                    DocumentData {
                        title: Some("A".to_string()),
                        updated: Some(clock.now()),
                        ..DocumentData::default()
                    },
                );
                let (session, _) = session(&store, &clock);
                tokio::task::spawn_local(session.open());
                tokio::task::spawn_local(session.run_status_ticker());
                settle().await;
                assert_eq!(session.state().status_message, "Saved a few seconds ago.");

                clock.advance(Age::minutes(5));
                tokio::time::sleep(Duration::from_secs(31)).await;
                assert_eq!(session.state().status_message, "Saved 5 minutes ago.");
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_requires_confirmation() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                // Without a request nothing happens.
                assert_eq!(session.confirm_delete().await, None);
                assert!(store.document("doc1").is_some());

                session.request_delete();
                assert!(session.state().confirming_delete);
                session.cancel_delete();
                assert!(!session.state().confirming_delete);

                session.request_delete();
                assert_eq!(session.confirm_delete().await, Some(Destination::Documents));
                assert!(store.document("doc1").is_none());
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_document_cannot_be_deleted() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                session.toggle_shared().await;
                session.request_delete();
                assert!(!session.state().confirming_delete);
                assert_eq!(session.confirm_delete().await, None);
                assert!(store.document("doc1").is_some());
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_drops_pending_save() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                tokio::task::spawn_local(session.edit_title("gone".to_string()));
                session.request_delete();
                assert_eq!(session.confirm_delete().await, Some(Destination::Documents));

                tokio::time::sleep(Duration::from_secs(2)).await;
                assert!(store.document("doc1").is_none());
                assert!(store.writes().is_empty());
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_delete_keeps_pending_save() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                tokio::task::spawn_local(session.edit_body("unsaved draft".to_string()));
                session.request_delete();
                store.set_offline(true);
                let deleted = tokio::task::spawn_local(session.confirm_delete());
                settle().await;

                assert!(store.document("doc1").is_some());
                assert_eq!(session.state().status_message, "Saving...");
                store.set_offline(false);

                tokio::time::sleep(Duration::from_millis(1500)).await;
                assert_eq!(deleted.await.unwrap(), None);
                assert_eq!(
                    store.writes(),
                    vec![("doc1".to_string(), DocumentPatch::content("A", "unsaved draft"))]
                );
                assert_eq!(
                    store.document("doc1").and_then(|d| d.body),
                    Some("unsaved draft".to_string())
                );
                assert!(matches!(session.state().status, SaveStatus::SavedAt(_)));
                session.teardown();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_is_reported() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let store = MemoryStore::new();
                seed(&store, "A", "B");
                let (session, _) = session(&store, &ManualClock::new());
                tokio::task::spawn_local(session.open());
                settle().await;

                store.set_offline(true);
                tokio::task::spawn_local(session.edit_body("draft".to_string()));
                tokio::time::sleep(Duration::from_millis(1500)).await;
                assert_eq!(session.state().status, SaveStatus::Failed);
                assert_eq!(session.state().status_message, "Could not save changes.");

                store.set_offline(false);
                tokio::task::spawn_local(session.edit_body("draft 2".to_string()));
                tokio::time::sleep(Duration::from_millis(1500)).await;
                assert!(matches!(session.state().status, SaveStatus::SavedAt(_)));
                assert_eq!(
                    store.document("doc1").and_then(|d| d.body),
                    Some("draft 2".to_string())
                );
                session.teardown();
            })
            .await;
    }

    #[tokio::test]
    async fn test_preview_and_actions_toggle() {
        let store = MemoryStore::new();
        let (session, published) = session(&store, &ManualClock::new());
        session.toggle_preview();
        session.toggle_actions();
        let state = session.state();
        assert!(state.show_preview);
        assert!(state.show_actions);
        assert_eq!(published.borrow().len(), 2);
    }
}
