//! Store change events.
//!
//! Every successful cart or wishlist write is followed by a payload-less
//! [`StoreEvent`] on the [`EventBus`]. Listeners do not get a diff; they
//! re-read the whole collection from the store when notified.
//!
//! The bus is a `tokio` broadcast channel:
//! - every subscriber receives every event, in publish order
//! - publishing never blocks and succeeds with zero subscribers
//! - a subscriber that falls more than the channel capacity behind is told it
//!   lagged, which is reported as "changed"

use std::fmt;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, trace, warn};

/// A change signal emitted after a store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    /// The persisted cart changed.
    CartUpdated,
    /// The persisted wishlist changed.
    WishlistUpdated,
}

impl StoreEvent {
    /// Stable signal name, as listened for by storefront UI code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CartUpdated => "cartUpdated",
            Self::WishlistUpdated => "wishlistUpdated",
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Publish/subscribe hub for [`StoreEvent`]s.
///
/// Cloning the bus shares the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Events buffered per subscriber before it is considered lagging.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a bus buffering up to `capacity` events per subscriber.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Broadcast `event` to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it.
    pub fn publish(&self, event: StoreEvent) -> usize {
        if let Ok(receivers) = self.sender.send(event) {
            debug!(%event, receivers, "Published store event");
            receivers
        } else {
            trace!(%event, "Published store event with no subscribers");
            0
        }
    }

    /// Subscribe to every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            filter: None,
        }
    }

    /// Subscribe to one kind of event.
    #[must_use]
    pub fn subscribe_to(&self, event: StoreEvent) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            filter: Some(event),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A listener registration on an [`EventBus`].
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<StoreEvent>,
    filter: Option<StoreEvent>,
}

impl Subscription {
    fn matches(&self, event: StoreEvent) -> bool {
        self.filter.is_none_or(|wanted| wanted == event)
    }

    /// Drain pending events without waiting.
    ///
    /// Returns `true` if at least one matching event (or a lag) was seen.
    pub fn poll_changed(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => changed |= self.matches(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Store event subscriber lagged");
                    changed = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return changed,
            }
        }
    }

    /// Drain pending matching events without waiting, in publish order.
    ///
    /// Lagged gaps are skipped.
    pub fn drain(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.matches(event) => events.push(event),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Store event subscriber lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return events,
            }
        }
    }

    /// Wait for the next matching event.
    ///
    /// Returns `false` once every publisher is gone.
    pub async fn changed(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.matches(event) => return true,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Store event subscriber lagged");
                    return true;
                }
                Err(RecvError::Closed) => return false,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(StoreEvent::CartUpdated.to_string(), "cartUpdated");
        assert_eq!(StoreEvent::WishlistUpdated.name(), "wishlistUpdated");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(StoreEvent::CartUpdated), 0);
    }

    #[test]
    fn test_every_subscriber_sees_every_event_in_order() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(StoreEvent::CartUpdated);
        bus.publish(StoreEvent::WishlistUpdated);

        let expected = vec![StoreEvent::CartUpdated, StoreEvent::WishlistUpdated];
        assert_eq!(first.drain(), expected);
        assert_eq!(second.drain(), expected);
        assert!(first.drain().is_empty());
    }

    #[test]
    fn test_filtered_subscription() {
        let bus = EventBus::default();
        let mut cart = bus.subscribe_to(StoreEvent::CartUpdated);

        bus.publish(StoreEvent::WishlistUpdated);
        assert!(!cart.poll_changed());

        bus.publish(StoreEvent::CartUpdated);
        bus.publish(StoreEvent::CartUpdated);
        assert!(cart.poll_changed());
        assert!(!cart.poll_changed());
    }

    #[test]
    fn test_lag_counts_as_changed() {
        let bus = EventBus::new(1);
        let mut sub = bus.subscribe_to(StoreEvent::WishlistUpdated);
        bus.publish(StoreEvent::CartUpdated);
        bus.publish(StoreEvent::CartUpdated);
        bus.publish(StoreEvent::CartUpdated);
        assert!(sub.poll_changed());
    }

    #[test]
    fn test_dropped_subscription_unsubscribes() {
        let bus = EventBus::default();
        let sub = bus.subscribe();
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_changed_waits_for_matching_event() {
        let bus = EventBus::default();
        let mut sub = bus.subscribe_to(StoreEvent::CartUpdated);

        let publisher = bus.clone();
        let handle = tokio::spawn(async move {
            publisher.publish(StoreEvent::WishlistUpdated);
            publisher.publish(StoreEvent::CartUpdated);
        });

        assert!(sub.changed().await);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_changed_reports_closed_bus() {
        let bus = EventBus::default();
        let mut sub = bus.subscribe();
        drop(bus);
        assert!(!sub.changed().await);
    }
}
