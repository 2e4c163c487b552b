use anyhow::Result;

use crate::registry::PropertyListeners;

/// A value whose changes are reported to property listeners.
pub struct Property<T> {
    value: T,
    listeners: PropertyListeners<T>,
}

impl<T: PartialEq> Property<T> {
    pub fn new(value: T) -> Property<T> {
        Property {
            value,
            listeners: PropertyListeners::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn listeners_mut(&mut self) -> &mut PropertyListeners<T> {
        &mut self.listeners
    }

    /// Replaces the value and notifies the listeners with the old and the
    /// new value if they differ. The new value is kept even if a listener
    /// fails. Returns `false` if nothing changed.
    pub fn set(&mut self, value: T) -> Result<bool> {
        if self.value == value {
            return Ok(false);
        }

        let old = std::mem::replace(&mut self.value, value);
        self.listeners.notify(&old, &self.value)?;
        Ok(true)
    }

    pub fn set_or_log(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }

        let old = std::mem::replace(&mut self.value, value);
        self.listeners.notify_or_log(&old, &self.value);
        true
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
