//! Synchronous event dispatch.
//!
//! A [`ListenerRegistry`] holds callbacks and invokes them in registration
//! order when an event is dispatched. Delivery happens inside `dispatch`;
//! nothing is queued or deferred.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use board_history::board::Color;
//! use board_history::events::ListenerRegistry;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let mut registry = ListenerRegistry::new();
//!
//! let sink = Arc::clone(&seen);
//! let id = registry.register(move |color: &Color| sink.lock().unwrap().push(*color));
//!
//! registry.dispatch(&Color::White);
//! registry.unregister(id);
//! registry.dispatch(&Color::Black);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![Color::White]);
//! ```

mod registry;

pub use registry::{ListenerId, ListenerRegistry};
