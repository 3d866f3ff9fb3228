//! Checkout session state
//!
//! The storefront used to scatter selections across browser storage with a
//! one-hour freshness stamp; here the same contract is an explicit store:
//! writes reset the window, stale reads come back empty.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use schedule_core::models::DeliveryAttributes;

/// How long stored selections stay fresh
pub const ATTRIBUTE_TTL: Duration = Duration::from_secs(60 * 60);

/// Read/write access to the customer's delivery selections
pub trait AttributeStore: Send + Sync {
    /// Current attributes, if stored and still fresh
    fn read(&self) -> Option<DeliveryAttributes>;

    /// Persist attributes, resetting the freshness window
    fn write(&self, attributes: DeliveryAttributes);

    /// Drop everything
    fn clear(&self);

    /// Cached result of the active-subscription lookup for `email`
    fn subscription_memo(&self, email: &str) -> Option<bool>;

    fn memoize_subscription(&self, email: &str, active: bool);
}

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// In-memory store; one per checkout session
pub struct MemoryAttributeStore {
    ttl: Duration,
    attributes: Mutex<Option<Entry<DeliveryAttributes>>>,
    subscription: Mutex<Option<Entry<(String, bool)>>>,
}

impl MemoryAttributeStore {
    pub fn new() -> Self {
        Self::with_ttl(ATTRIBUTE_TTL)
    }

    /// Custom freshness window (tests)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            attributes: Mutex::new(None),
            subscription: Mutex::new(None),
        }
    }
}

impl Default for MemoryAttributeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn read(&self) -> Option<DeliveryAttributes> {
        let mut slot = self.attributes.lock();
        match slot.as_ref() {
            Some(entry) if entry.fresh(self.ttl) => Some(entry.value.clone()),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    fn write(&self, attributes: DeliveryAttributes) {
        *self.attributes.lock() = Some(Entry::new(attributes));
    }

    fn clear(&self) {
        *self.attributes.lock() = None;
        *self.subscription.lock() = None;
    }

    fn subscription_memo(&self, email: &str) -> Option<bool> {
        let slot = self.subscription.lock();
        match slot.as_ref() {
            Some(entry) if entry.value.0 == email && entry.fresh(self.ttl) => {
                Some(entry.value.1)
            }
            _ => None,
        }
    }

    fn memoize_subscription(&self, email: &str, active: bool) {
        *self.subscription.lock() = Some(Entry::new((email.to_string(), active)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(location: &str) -> DeliveryAttributes {
        DeliveryAttributes {
            delivery_location: Some(location.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryAttributeStore::new();
        assert!(store.read().is_none());
        store.write(attrs("Newtown, NSW, 2042, SYDNEY"));
        let read = store.read().unwrap();
        assert_eq!(
            read.delivery_location.as_deref(),
            Some("Newtown, NSW, 2042, SYDNEY")
        );
    }

    #[test]
    fn test_stale_entries_are_dropped() {
        let store = MemoryAttributeStore::with_ttl(Duration::ZERO);
        store.write(attrs("Newtown, NSW, 2042, SYDNEY"));
        assert!(store.read().is_none());
        // The stale entry is gone, not just hidden
        assert!(store.attributes.lock().is_none());
    }

    #[test]
    fn test_clear() {
        let store = MemoryAttributeStore::new();
        store.write(attrs("Newtown, NSW, 2042, SYDNEY"));
        store.memoize_subscription("a@example.com", true);
        store.clear();
        assert!(store.read().is_none());
        assert!(store.subscription_memo("a@example.com").is_none());
    }

    #[test]
    fn test_subscription_memo_is_per_email() {
        let store = MemoryAttributeStore::new();
        store.memoize_subscription("a@example.com", true);
        assert_eq!(store.subscription_memo("a@example.com"), Some(true));
        assert_eq!(store.subscription_memo("b@example.com"), None);

        // A new email replaces the memo, as only the latest lookup matters
        store.memoize_subscription("b@example.com", false);
        assert_eq!(store.subscription_memo("b@example.com"), Some(false));
        assert_eq!(store.subscription_memo("a@example.com"), None);
    }
}
