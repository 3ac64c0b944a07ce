//! Signal/slot system for column filters.
//!
//! Filters emit signals when their effective selection changes, and the row
//! filtering layer connects slots (callbacks) to recompute row visibility.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Invocation
//!
//! Filters live on the UI thread and every operation runs to completion before
//! the next one starts, so slots are always invoked directly on the emitting
//! thread, in connection order. The slot list is snapshotted before slots run,
//! which lets a slot connect or disconnect on the same signal.
//!
//! # Example
//!
//! ```
//! use column_filter_core::Signal;
//!
//! let selection_changed = Signal::<()>::new();
//!
//! let conn_id = selection_changed.connect(|_| {
//!     println!("recompute visible rows");
//! });
//!
//! selection_changed.emit(());
//! selection_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type ConnectionTable<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Arc<ConnectionTable<Args>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    ///
    /// The guard only holds a weak reference to the connection table, so it
    /// may safely outlive the signal.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id,
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// Returns the number of slots invoked (0 while blocked).
    #[tracing::instrument(skip_all, target = "column_filter_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return 0;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use column_filter_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args> {
    connections: Weak<ConnectionTable<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The id of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(connections) = self.connections.upgrade() {
            connections.lock().remove(self.id);
        }
    }
}
