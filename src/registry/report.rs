//! Publish outcome

use crate::error::Error;
use crate::registry::ChannelName;

/// A single failed handler invocation
#[derive(Debug)]
pub struct DeliveryFailure {
    /// Position of the handler in the channel snapshot
    pub index: usize,
    /// What went wrong
    pub error: Error,
}

/// Result of fanning a payload out to a channel
#[derive(Debug)]
pub struct PublishReport {
    pub channel: ChannelName,
    /// Handlers that returned successfully
    pub delivered: usize,
    /// Handlers that returned an error or panicked
    pub failures: Vec<DeliveryFailure>,
    /// Fan-out stopped early under the abort policy
    pub aborted: bool,
}

impl PublishReport {
    pub(crate) fn new(channel: ChannelName) -> Self {
        Self {
            channel,
            delivered: 0,
            failures: Vec::new(),
            aborted: false,
        }
    }

    /// Number of handlers invoked, successful or not
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Every invoked handler succeeded and none were skipped
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.aborted
    }

    /// No handler was invoked at all
    pub fn is_noop(&self) -> bool {
        self.attempted() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accessors() {
        let mut report = PublishReport::new(ChannelName::new("news"));
        assert!(report.is_noop());
        assert!(report.is_clean());

        report.delivered = 2;
        report.failures.push(DeliveryFailure {
            index: 1,
            error: Error::HandlerFailed {
                channel: "news".into(),
                reason: "boom".into(),
            },
        });
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_clean());
        assert!(!report.is_noop());
    }
}
