//! Windowed feed proxy
//!
//! The proxy owns a [`FeedWindow`] and drives page loads through an injected
//! [`FeedLoader`]. It is driven by a single owner through `&mut self`: loads
//! run on tokio tasks and report back as [`Completion`] messages, which the
//! owner applies with [`FeedProxy::apply`], [`FeedProxy::next_completion`] or
//! [`FeedProxy::poll_completions`]. Every mutation and its notification happen
//! inside those calls, so queries between two of them see one consistent
//! window.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::error::{LoadError, ProxyError};
use super::listener::{ChangeListener, ListenerHandle, ListenerSlot};
use super::loader::{FeedLoader, Page};
use super::query::{Cursor, Direction, FeedQuery};
use super::window::{FeedWindow, Insertion};
use crate::config::WindowConfig;
use crate::types::{FeedItem, ItemId, Lookahead};

/// Outstanding requests, tracked per direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingState {
    pub next: bool,
    pub previous: bool,
}

impl LoadingState {
    #[must_use]
    pub const fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Next => self.next,
            Direction::Previous => self.previous,
        }
    }

    #[must_use]
    pub const fn any(&self) -> bool {
        self.next || self.previous
    }

    fn set(&mut self, direction: Direction, loading: bool) {
        match direction {
            Direction::Next => self.next = loading,
            Direction::Previous => self.previous = loading,
        }
    }
}

/// Outcome of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum LoadRequest {
    /// A fetch task was spawned
    Started,
    /// A request in this direction is still outstanding
    AlreadyLoading,
    /// The server reported no more items in this direction
    Exhausted,
    /// No loader is attached
    NoLoader,
    /// Called outside a tokio runtime
    NoRuntime,
}

impl LoadRequest {
    #[must_use]
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Result of a fetch, delivered back to the owning proxy
///
/// Only the proxy's own fetch tasks create completions, so a direction's
/// loading flag is cleared exactly when its request has finished.
///
/// ```compile_fail
/// use feed_window::feed::{Completion, Page};
/// use feed_window::Direction;
///
/// let forged = Completion::new(Direction::Next, Ok(Page::end()));
/// ```
#[derive(Debug)]
pub struct Completion {
    direction: Direction,
    result: Result<Page, LoadError>,
}

impl Completion {
    #[cfg(test)]
    #[must_use]
    pub(crate) fn new(direction: Direction, result: Result<Page, LoadError>) -> Self {
        Self { direction, result }
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

pub struct FeedProxy {
    window: FeedWindow,
    loading: LoadingState,
    loader: Option<Arc<dyn FeedLoader>>,
    listener: ListenerSlot,
    lookahead: Lookahead,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl FeedProxy {
    /// Idle proxy over an empty window at the top of `query`
    #[must_use]
    pub fn new(query: FeedQuery) -> Self {
        Self::from_window(FeedWindow::new(query))
    }

    /// Idle proxy opening the feed just below `cursor`, see [`FeedWindow::starting_at`]
    #[must_use]
    pub fn starting_at(query: FeedQuery, cursor: Cursor) -> Self {
        Self::from_window(FeedWindow::starting_at(query, cursor))
    }

    /// Idle proxy using the window settings from configuration
    #[must_use]
    pub fn from_config(query: FeedQuery, config: &WindowConfig) -> Self {
        Self::new(query).with_lookahead(config.lookahead)
    }

    pub(crate) fn from_window(window: FeedWindow) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            window,
            loading: LoadingState::default(),
            loader: None,
            listener: ListenerSlot::default(),
            lookahead: Lookahead::DEFAULT,
            completion_tx,
            completion_rx,
        }
    }

    #[must_use]
    pub fn with_lookahead(mut self, lookahead: Lookahead) -> Self {
        self.lookahead = lookahead;
        self
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn FeedLoader>) -> Self {
        self.set_loader(loader);
        self
    }

    #[must_use]
    pub fn query(&self) -> &FeedQuery {
        self.window.query()
    }

    #[must_use]
    pub fn window(&self) -> &FeedWindow {
        &self.window
    }

    #[must_use]
    pub const fn lookahead(&self) -> Lookahead {
        self.lookahead
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.window.len()
    }

    /// Item at `index`; never fetches
    pub fn item_at(&self, index: usize) -> Result<&FeedItem, ProxyError> {
        self.window.get(index).ok_or(ProxyError::IndexOutOfRange {
            index,
            len: self.window.len(),
        })
    }

    pub fn item_id_at(&self, index: usize) -> Result<ItemId, ProxyError> {
        self.item_at(index).map(|item| item.id)
    }

    /// Current index of `item`, `None` when it is not materialized
    #[must_use]
    pub fn position(&self, item: &FeedItem) -> Option<usize> {
        self.window.position(item)
    }

    #[must_use]
    pub fn position_of(&self, item_id: ItemId) -> Option<usize> {
        self.window.position_of(item_id)
    }

    /// Index of `item_id`, or `fallback` when it is not in the window
    #[must_use]
    pub fn position_or(&self, item_id: ItemId, fallback: usize) -> usize {
        self.position_of(item_id).unwrap_or(fallback)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading.any()
    }

    #[must_use]
    pub const fn loading_state(&self) -> LoadingState {
        self.loading
    }

    #[must_use]
    pub fn has_more(&self, direction: Direction) -> bool {
        self.window.has_more(direction)
    }

    /// Register the change listener, detaching any previous one
    pub fn set_on_change_listener<L>(&mut self, listener: L) -> ListenerHandle
    where
        L: ChangeListener + 'static,
    {
        self.listener.replace(Box::new(listener))
    }

    /// Detach the listener if `handle` is still the registered one
    pub fn remove_on_change_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listener.remove(handle)
    }

    /// Replace the loader; requests already in flight still complete
    pub fn set_loader(&mut self, loader: Arc<dyn FeedLoader>) {
        if self.loader.replace(loader).is_some() {
            debug!("Replaced loader for {}", self.window.query());
        }
    }

    pub fn load_next_page(&mut self) -> LoadRequest {
        self.load(Direction::Next)
    }

    pub fn load_previous_page(&mut self) -> LoadRequest {
        self.load(Direction::Previous)
    }

    /// Start a fetch beyond `direction`'s edge
    pub fn load(&mut self, direction: Direction) -> LoadRequest {
        if self.loading.get(direction) {
            return LoadRequest::AlreadyLoading;
        }
        if !self.window.has_more(direction) {
            return LoadRequest::Exhausted;
        }
        let Some(loader) = self.loader.clone() else {
            return LoadRequest::NoLoader;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("Cannot load {} page of {}: no tokio runtime", direction, self.window.query());
            return LoadRequest::NoRuntime;
        };

        let query = self.window.query().clone();
        let cursor = self.window.cursor_for(direction);
        let tx = self.completion_tx.clone();
        self.loading.set(direction, true);
        debug!("Loading {} page of {} from {:?}", direction, query, cursor);

        let fetch_runtime = runtime.clone();
        runtime.spawn(async move {
            let fetch = {
                let query = query.clone();
                fetch_runtime.spawn(async move { loader.fetch(direction, &query, cursor).await })
            };
            // a loader that panics or is aborted still clears the loading flag
            let result = match fetch.await {
                Ok(result) => result,
                Err(join_error) if join_error.is_panic() => {
                    error!("Loader panicked fetching {} page of {}", direction, query);
                    Err(LoadError::Panicked)
                }
                Err(_) => Err(LoadError::Cancelled),
            };
            if tx.send(Completion { direction, result }).is_err() {
                debug!("Discarding {} page of {}: proxy is gone", direction, query);
            }
        });

        LoadRequest::Started
    }

    /// Apply a finished fetch to the window and notify the listener
    ///
    /// On failure the window and its `has_more` flags stay as they were.
    pub fn apply(&mut self, completion: Completion) -> Result<Insertion, LoadError> {
        let Completion { direction, result } = completion;
        self.loading.set(direction, false);

        match result {
            Ok(page) => {
                let insertion = self.window.merge(direction, page);
                debug!(
                    "Merged {} {} items at {} (window now {})",
                    insertion.count,
                    direction,
                    insertion.start,
                    self.window.len()
                );
                if !insertion.is_empty() {
                    self.listener.inserted(insertion.start, insertion.count);
                }
                Ok(insertion)
            }
            Err(error) => {
                self.listener.load_failed(direction, &error);
                Err(error)
            }
        }
    }

    /// Wait for the next outstanding fetch and apply it
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Result<Insertion, LoadError>> {
        if !self.loading.any() {
            return None;
        }
        let completion = self.completion_rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Apply every completion that has already arrived, without waiting
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            let _ = self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Item at `index`, triggering a page load when `index` is near an edge
    ///
    /// Within `lookahead` of the tail loads the next page, within `lookahead`
    /// of the head loads the previous page; a short window can start both.
    /// Nothing is started while any direction is loading.
    pub fn request_item(&mut self, index: usize) -> Result<&FeedItem, ProxyError> {
        if !self.loading.any() {
            let lookahead = self.lookahead.get();
            if index.saturating_add(lookahead) >= self.window.len() {
                let _ = self.load(Direction::Next);
            }
            if index < lookahead {
                let _ = self.load(Direction::Previous);
            }
        }
        self.item_at(index)
    }

    pub(crate) fn log_restored(&self, current_index: usize) {
        info!(
            "Restored {} with {} items at index {}",
            self.window.query(),
            self.window.len(),
            current_index
        );
    }
}

impl std::fmt::Debug for FeedProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedProxy")
            .field("query", self.window.query())
            .field("items", &self.window.len())
            .field("loading", &self.loading)
            .field("has_loader", &self.loader.is_some())
            .field("listener", &self.listener)
            .finish()
    }
}
