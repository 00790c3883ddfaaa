//! Observer pattern primitives.
//!
//! An [`Observable`] keeps an ordered list of [`Observer`] handles and
//! notifies them synchronously, in attachment order. Membership is by
//! identity (`Arc::ptr_eq`); attaching the same handle twice registers it
//! twice.

use anyhow::Result;
use std::fmt;
use std::sync::Arc;

/// Something that wants to hear about changes to a subject of type `S`.
pub trait Observer<S: ?Sized>: Send + Sync {
    /// Called after the subject changed. Returning an error aborts the
    /// remaining notifications and surfaces to whoever triggered the change.
    fn update(&self, subject: &S) -> Result<()>;
}

impl<S: ?Sized, F> Observer<S> for F
where
    F: Fn(&S) -> Result<()> + Send + Sync,
{
    fn update(&self, subject: &S) -> Result<()> {
        self(subject)
    }
}

/// Ordered set of attached observers.
pub struct Observable<S: ?Sized> {
    observers: Vec<Arc<dyn Observer<S>>>,
}

impl<S: ?Sized> Observable<S> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Append an observer. Duplicates are not filtered.
    pub fn attach(&mut self, observer: Arc<dyn Observer<S>>) {
        self.observers.push(observer);
    }

    /// Remove the first attached handle pointing at the same observer.
    /// Returns `true` if one was removed.
    pub fn detach(&mut self, observer: &Arc<dyn Observer<S>>) -> bool {
        match self
            .observers
            .iter()
            .position(|attached| Arc::ptr_eq(attached, observer))
        {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every observer with `subject`, in attachment order.
    ///
    /// The list is snapshotted first, so the set notified is the set attached
    /// when the call started. The first failure stops the pass.
    pub fn notify(&self, subject: &S) -> Result<()> {
        let snapshot = self.observers.clone();
        for observer in &snapshot {
            observer.update(subject)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<S: ?Sized> Default for Observable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for Observable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observers.len())
            .finish()
    }
}
