//! Listener callbacks which report failures to the caller instead of
//! swallowing them.
//!
//! A listener returns `Ok(true)` to consume an event (or a change) and
//! `Err(_)` if it failed. What happens to a failure is up to whoever
//! dispatches: [`Listeners::dispatch`] propagates it,
//! [`Listeners::dispatch_with`] hands it to a callback, and
//! [`Listeners::dispatch_or_log`] logs it.

#[macro_use]
extern crate log;

mod listener;
mod property;
mod registry;

pub use listener::{EventListener, PropertyChangeListener};
pub use property::Property;
pub use registry::{Listeners, PropertyListeners};
