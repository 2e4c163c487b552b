use anyhow::{Context, Error, Result};

use crate::listener::{EventListener, PropertyChangeListener};

struct Entry<L: ?Sized> {
    name: &'static str,
    listener: Box<L>,
}

fn unregister<L: ?Sized>(entries: &mut Vec<Entry<L>>, name: &str) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.name != name);
    entries.len() < before
}

/// Event listeners, called in the order they were registered.
pub struct Listeners<E> {
    entries: Vec<Entry<dyn EventListener<E>>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Listeners<E> {
        Listeners {
            entries: Vec::new(),
        }
    }

    pub fn register<L>(&mut self, name: &'static str, listener: L)
    where
        L: EventListener<E> + 'static,
    {
        let listener: Box<dyn EventListener<E>> = Box::new(listener);
        self.entries.push(Entry { name, listener });
    }

    pub fn register_fn<F>(&mut self, name: &'static str, callback: F)
    where
        F: FnMut(&E) -> Result<bool> + 'static,
    {
        self.register(name, callback);
    }

    /// Removes all listeners registered as `name`.
    pub fn unregister(&mut self, name: &str) -> bool {
        unregister(&mut self.entries, name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls listeners until one consumes the event. The first failure is
    /// returned and the remaining listeners are not called.
    pub fn dispatch(&mut self, event: &E) -> Result<bool> {
        for entry in &mut self.entries {
            let consumed = entry
                .listener
                .on_event(event)
                .with_context(|| format!("listener \"{}\" failed", entry.name))?;
            if consumed {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Like `dispatch`, but a failed listener is reported to `on_failure`
    /// and treated as not having consumed the event.
    pub fn dispatch_with<F>(&mut self, event: &E, mut on_failure: F) -> bool
    where
        F: FnMut(&str, &Error),
    {
        for entry in &mut self.entries {
            match entry.listener.on_event(event) {
                Ok(true) => return true,
                Ok(false) => {}
                Err(err) => on_failure(entry.name, &err),
            }
        }

        false
    }

    pub fn dispatch_or_log(&mut self, event: &E) -> bool {
        self.dispatch_with(event, |name, err| {
            warn!("listener \"{}\" failed: {:?}", name, err);
        })
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Listeners<E> {
        Listeners::new()
    }
}

/// Property change listeners. Unlike events, a change is delivered to every
/// listener; the result tells whether any of them consumed it.
pub struct PropertyListeners<T> {
    entries: Vec<Entry<dyn PropertyChangeListener<T>>>,
}

impl<T> PropertyListeners<T> {
    pub fn new() -> PropertyListeners<T> {
        PropertyListeners {
            entries: Vec::new(),
        }
    }

    pub fn register<L>(&mut self, name: &'static str, listener: L)
    where
        L: PropertyChangeListener<T> + 'static,
    {
        let listener: Box<dyn PropertyChangeListener<T>> = Box::new(listener);
        self.entries.push(Entry { name, listener });
    }

    pub fn register_fn<F>(&mut self, name: &'static str, callback: F)
    where
        F: FnMut(&T, &T) -> Result<bool> + 'static,
    {
        self.register(name, callback);
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        unregister(&mut self.entries, name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stops at the first failure and returns it.
    pub fn notify(&mut self, old: &T, new: &T) -> Result<bool> {
        let mut consumed = false;
        for entry in &mut self.entries {
            consumed |= entry
                .listener
                .on_change(old, new)
                .with_context(|| format!("property listener \"{}\" failed", entry.name))?;
        }

        Ok(consumed)
    }

    pub fn notify_with<F>(&mut self, old: &T, new: &T, mut on_failure: F) -> bool
    where
        F: FnMut(&str, &Error),
    {
        let mut consumed = false;
        for entry in &mut self.entries {
            match entry.listener.on_change(old, new) {
                Ok(result) => consumed |= result,
                Err(err) => on_failure(entry.name, &err),
            }
        }

        consumed
    }

    pub fn notify_or_log(&mut self, old: &T, new: &T) -> bool {
        self.notify_with(old, new, |name, err| {
            warn!("property listener \"{}\" failed: {:?}", name, err);
        })
    }
}

impl<T> Default for PropertyListeners<T> {
    fn default() -> PropertyListeners<T> {
        PropertyListeners::new()
    }
}
