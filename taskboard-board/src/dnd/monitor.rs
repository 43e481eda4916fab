//! Drop monitor: explicit subscriptions to drop events.
//!
//! A view subscribes when it mounts and keeps the returned [`Subscription`]
//! alive for as long as it wants drop events. Stopping the subscription, or
//! dropping it, detaches the listener; nothing outlives its owner.

use super::event::DropEvent;
use super::resolver::{DropResolver, MoveHandler};
use crate::types::BoardSnapshot;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError, Weak};
use taskboard_config::BoardConfig;
use tracing::{debug, trace};

type Listener = Arc<Mutex<dyn FnMut(&DropEvent) + Send>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Fans drop events out to every active subscription, in subscription order
#[derive(Clone, Default)]
pub struct DropMonitor {
    registry: Arc<Mutex<Registry>>,
}

impl DropMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start delivering drop events to `listener` until the subscription stops
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&DropEvent) + Send + 'static,
    {
        let mut registry = self.lock_registry();
        let id = registry.next_id;
        registry.next_id += 1;
        let listener: Listener = Arc::new(Mutex::new(listener));
        registry.listeners.push((id, listener));
        debug!(subscription = id, "drop monitor subscription started");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every active listener; returns how many were invoked.
    ///
    /// Listeners may subscribe or stop subscriptions while being notified;
    /// such changes apply from the next event. A listener that is already
    /// running (a nested `notify` from inside a callback) is skipped.
    pub fn notify(&self, event: &DropEvent) -> usize {
        let listeners: Vec<(u64, Listener)> = self.lock_registry().listeners.clone();

        let mut invoked = 0;
        for (id, listener) in listeners {
            match listener.try_lock() {
                Ok(mut callback) => {
                    (*callback)(event);
                    invoked += 1;
                }
                Err(TryLockError::Poisoned(poisoned)) => {
                    let mut callback = poisoned.into_inner();
                    (*callback)(event);
                    invoked += 1;
                }
                Err(TryLockError::WouldBlock) => {
                    trace!(subscription = id, "skipping listener already handling an event");
                }
            }
        }
        invoked
    }

    /// Number of active subscriptions
    pub fn listener_count(&self) -> usize {
        self.lock_registry().listeners.len()
    }

    fn lock_registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DropMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropMonitor")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle to an active subscription; dropping it stops the subscription
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately stops it"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the listener is still registered with a live monitor
    pub fn is_active(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .listeners
                .iter()
                .any(|(id, _)| *id == self.id)
        })
    }

    /// Stop receiving events
    pub fn stop(self) {
        // Drop does the work.
    }

    fn unsubscribe(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Removed listeners are dropped after the guard: a listener may own
        // another subscription whose drop locks the registry again.
        let removed: Vec<(u64, Listener)> = {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            let (removed, kept) = std::mem::take(&mut registry.listeners)
                .into_iter()
                .partition(|(id, _)| *id == self.id);
            registry.listeners = kept;
            removed
        };

        if !removed.is_empty() {
            debug!(subscription = self.id, "drop monitor subscription stopped");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Resolves every drop against a shared board and forwards moves to a handler.
///
/// The board is read at event time, so the resolver always sees the latest
/// snapshot the owner has written.
pub struct BoardDropHandler<H> {
    board: Arc<RwLock<BoardSnapshot>>,
    config: BoardConfig,
    handler: H,
}

impl<H: MoveHandler> BoardDropHandler<H> {
    pub fn new(board: Arc<RwLock<BoardSnapshot>>, handler: H) -> Self {
        Self {
            board,
            config: BoardConfig::default(),
            handler,
        }
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve one event; returns whether the handler received a move
    pub fn handle_drop(&mut self, event: &DropEvent) -> bool {
        // Release the read lock before the handler runs so it may write the board.
        let command = {
            let board = self.board.read().unwrap_or_else(PoisonError::into_inner);
            DropResolver::for_board(&board)
                .with_config(&self.config)
                .resolve(event)
        };

        match command {
            Some(command) => {
                self.handler.handle(command);
                true
            }
            None => false,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}

impl<H: MoveHandler + Send + 'static> BoardDropHandler<H> {
    /// Subscribe to `monitor`; the handler lives as long as the subscription
    pub fn attach(mut self, monitor: &DropMonitor) -> Subscription {
        monitor.subscribe(move |event| {
            self.handle_drop(event);
        })
    }
}
