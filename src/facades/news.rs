//! Single-channel news feed

use crate::registry::{EventRegistry, Handler, PublishReport};

/// News channel: one anonymous channel, subscribers receive every item
#[derive(Debug)]
pub struct NewsChannel<P = String> {
    registry: EventRegistry<P>,
}

impl<P> NewsChannel<P> {
    pub fn new() -> Self {
        Self {
            registry: EventRegistry::new(),
        }
    }

    pub fn subscribe(&self, subscriber: Handler<P>) {
        self.registry.subscribe_default(subscriber);
    }

    pub fn unsubscribe(&self, subscriber: &Handler<P>) -> usize {
        self.registry.unsubscribe_default(subscriber)
    }

    pub fn publish(&self, news: &P) -> PublishReport {
        self.registry.publish_default(news)
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .handler_count(self.registry.default_channel().as_str())
    }

    pub fn registry(&self) -> &EventRegistry<P> {
        &self.registry
    }
}

impl<P> Default for NewsChannel<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_breaking_news_then_unsubscribe() {
        let news: NewsChannel = NewsChannel::new();
        let inbox = Arc::new(Mutex::new(Vec::new()));

        let user = |name: &'static str| {
            let inbox = inbox.clone();
            Handler::new(move |item: &String| {
                inbox.lock().push(format!("{} received: {}", name, item));
            })
        };
        let user1 = user("User1");
        let user2 = user("User2");

        news.subscribe(user1.clone());
        news.subscribe(user2.clone());
        assert_eq!(news.subscriber_count(), 2);

        news.publish(&"Breaking news: Rust is awesome!".to_string());
        assert_eq!(news.unsubscribe(&user1), 1);
        news.publish(&"New edition features are coming!".to_string());

        assert_eq!(
            *inbox.lock(),
            vec![
                "User1 received: Breaking news: Rust is awesome!",
                "User2 received: Breaking news: Rust is awesome!",
                "User2 received: New edition features are coming!",
            ]
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let news: NewsChannel = NewsChannel::default();
        let report = news.publish(&"nobody listens".to_string());
        assert!(report.is_noop());
        assert_eq!(news.subscriber_count(), 0);
    }
}
