//! Listener registry.

use serde::{Deserialize, Serialize};

/// Handle returned by [`ListenerRegistry::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type Callback<E> = Box<dyn FnMut(&E) + Send>;

/// Callbacks for one kind of event, called in registration order.
pub struct ListenerRegistry<E> {
    /// Kept sorted by ID, which is registration order.
    listeners: Vec<(ListenerId, Callback<E>)>,
    next_id: u32,
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> std::fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<E> ListenerRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, returning its handle.
    pub fn register(&mut self, callback: impl FnMut(&E) + Send + 'static) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the handle was not registered.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        match self.listeners.binary_search_by_key(&id, |(lid, _)| *lid) {
            Ok(pos) => {
                self.listeners.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Call every callback with `event`, in registration order.
    pub fn dispatch(&mut self, event: &E) {
        for (_, callback) in &mut self.listeners {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every callback.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
