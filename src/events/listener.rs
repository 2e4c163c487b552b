use anyhow::Result;

pub trait EventListener<E> {
    /// Returns `true` if the event has been consumed.
    fn on_event(&mut self, event: &E) -> Result<bool>;
}

impl<E, F> EventListener<E> for F
where
    F: FnMut(&E) -> Result<bool>,
{
    fn on_event(&mut self, event: &E) -> Result<bool> {
        self(event)
    }
}

pub trait PropertyChangeListener<T> {
    fn on_change(&mut self, old: &T, new: &T) -> Result<bool>;
}

impl<T, F> PropertyChangeListener<T> for F
where
    F: FnMut(&T, &T) -> Result<bool>,
{
    fn on_change(&mut self, old: &T, new: &T) -> Result<bool> {
        self(old, new)
    }
}
