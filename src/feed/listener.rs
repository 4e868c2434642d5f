//! Change notification for the owner of a feed window
//!
//! A proxy has at most one listener. Registering a new one detaches the
//! previous one; the returned [`ListenerHandle`] lets a caller detach only if
//! it is still the registered listener.

use tokio::sync::mpsc;
use tracing::{error, warn};

use super::error::{LoadError, ProxyError};
use super::query::Direction;

/// Observer of window mutations
pub trait ChangeListener: Send {
    /// `count` items were inserted starting at `start`
    ///
    /// Every index obtained before this call is stale once it returns.
    fn on_item_range_inserted(&mut self, start: usize, count: usize);

    /// Windows never shrink. Nothing in this crate calls this; an
    /// implementation that reaches it has broken the window contract.
    fn on_item_range_removed(&mut self, start: usize, count: usize) -> Result<(), ProxyError> {
        error!("Item removal at {} (count {}) requested on a feed window", start, count);
        Err(ProxyError::RemovalUnsupported { start, count })
    }

    /// A page load failed; the window is unchanged
    fn on_load_error(&mut self, direction: Direction, error: &LoadError) {
        warn!("Loading {} page failed: {}", direction, error);
    }
}

/// Registration token returned by `set_on_change_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Event forwarded by the channel listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Inserted { start: usize, count: usize },
    LoadFailed { direction: Direction, error: LoadError },
}

/// Forward notifications to a channel, for owners that consume them elsewhere
impl ChangeListener for mpsc::UnboundedSender<ChangeEvent> {
    fn on_item_range_inserted(&mut self, start: usize, count: usize) {
        let _ = self.send(ChangeEvent::Inserted { start, count });
    }

    fn on_load_error(&mut self, direction: Direction, error: &LoadError) {
        let _ = self.send(ChangeEvent::LoadFailed {
            direction,
            error: error.clone(),
        });
    }
}

/// Single listener slot with generation-based handles
#[derive(Default)]
pub(crate) struct ListenerSlot {
    current: Option<(ListenerHandle, Box<dyn ChangeListener>)>,
    generation: u64,
}

impl ListenerSlot {
    pub(crate) fn replace(&mut self, listener: Box<dyn ChangeListener>) -> ListenerHandle {
        self.generation += 1;
        let handle = ListenerHandle(self.generation);
        self.current = Some((handle, listener));
        handle
    }

    pub(crate) fn remove(&mut self, handle: ListenerHandle) -> bool {
        match &self.current {
            Some((current, _)) if *current == handle => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn inserted(&mut self, start: usize, count: usize) {
        if let Some((_, listener)) = &mut self.current {
            listener.on_item_range_inserted(start, count);
        }
    }

    pub(crate) fn load_failed(&mut self, direction: Direction, error: &LoadError) {
        match &mut self.current {
            Some((_, listener)) => listener.on_load_error(direction, error),
            None => warn!("Loading {} page failed: {}", direction, error),
        }
    }
}

impl std::fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("handle", &self.current.as_ref().map(|(handle, _)| *handle))
            .finish()
    }
}
