//! # Member change notifications
//!
//! Anything that mutates members (create drawer, update form, delete button, image
//! dropzone) publishes a [`MemberEvent`] once the server has accepted the change.
//! The member list subscribes and re-fetches on every event, so mutation components
//! never need a handle to the list.

use tokio::sync::broadcast;
use tracing::debug;

/// Lagging subscribers skip the oldest events; any event triggers a full re-fetch.
const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberEvent {
    Created,
    Updated(i64),
    Deleted(i64),
    ProfileImageUploaded(i64),
}

impl MemberEvent {
    /// The member concerned, if the event is about an existing one.
    pub fn member_id(&self) -> Option<i64> {
        match self {
            MemberEvent::Created => None,
            MemberEvent::Updated(id)
            | MemberEvent::Deleted(id)
            | MemberEvent::ProfileImageUploaded(id) => Some(*id),
        }
    }
}

/// Broadcast channel between member mutations and the views that display members.
#[derive(Debug, Clone)]
pub struct MemberEvents {
    tx: broadcast::Sender<MemberEvent>,
}

impl Default for MemberEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MemberEvents {
    fn eq(&self, other: &Self) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

impl MemberEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event. Returns how many subscribers will see it.
    pub fn publish(&self, event: MemberEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!("No subscribers for {:?}", event);
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MemberEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events_in_order() {
        let events = MemberEvents::new();
        let mut rx = events.subscribe();

        assert_eq!(events.publish(MemberEvent::Created), 1);
        events.publish(MemberEvent::ProfileImageUploaded(5));

        assert_eq!(rx.recv().await.unwrap(), MemberEvent::Created);
        let event = rx.recv().await.unwrap();
        assert_eq!(event, MemberEvent::ProfileImageUploaded(5));
        assert_eq!(event.member_id(), Some(5));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let events = MemberEvents::new();
        assert_eq!(events.publish(MemberEvent::Deleted(1)), 0);
    }

    #[test]
    fn test_clones_share_channel() {
        let events = MemberEvents::new();
        let other = events.clone();
        let _rx = events.subscribe();

        assert_eq!(other.publish(MemberEvent::Updated(2)), 1);
        assert_eq!(events, other);
        assert_ne!(events, MemberEvents::new());
    }
}
