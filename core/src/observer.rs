//! Property-change subscriptions.
//!
//! Observers are called after an entry point has settled, once per changed
//! [`Property`], and receive the settled [`SchemeSnapshot`].

use std::fmt;

use crate::types::{Property, SchemeSnapshot};

/// Receives property-change notifications.
///
/// Implemented for any `FnMut(Property, &SchemeSnapshot)`.
pub trait PropertyObserver {
    /// Called once for each property that changed.
    fn property_changed(&mut self, property: Property, current: &SchemeSnapshot);
}

impl<F> PropertyObserver for F
where
    F: FnMut(Property, &SchemeSnapshot),
{
    fn property_changed(&mut self, property: Property, current: &SchemeSnapshot) {
        self(property, current)
    }
}

/// Handle returned by
/// [`SchemeValidationState::subscribe`](crate::SchemeValidationState::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn PropertyObserver>)>,
}

impl Observers {
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn subscribe(&mut self, observer: Box<dyn PropertyObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, changed: &[Property], current: &SchemeSnapshot) {
        for &property in changed {
            for (_, observer) in &mut self.entries {
                observer.property_changed(property, current);
            }
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
