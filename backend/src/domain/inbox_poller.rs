//! Periodic inbox reader.
//!
//! The poller re-fetches the recent page on a fixed interval and whenever
//! [`InboxPoller::refresh`] is called (for example when a client regains
//! focus). Subscribers observe results through a single watch channel.
//! Dropping the poller aborts the task, so an in-flight fetch never publishes
//! after teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

use crate::domain::ports::NotificationInbox;
use crate::domain::{DEFAULT_INBOX_LIMIT, InboxPage, UserId};

/// Interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Poll cadence and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    /// Time between fetches.
    pub interval: Duration,
    /// Page size passed to `list_recent`.
    pub limit: usize,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            limit: DEFAULT_INBOX_LIMIT,
        }
    }
}

/// Background reader for one recipient's inbox.
pub struct InboxPoller {
    task: JoinHandle<()>,
    refresh: Arc<Notify>,
    updates: watch::Receiver<Option<InboxPage>>,
}

impl InboxPoller {
    /// Start polling immediately on the current Tokio runtime.
    pub fn spawn(
        inbox: Arc<dyn NotificationInbox>,
        recipient: UserId,
        settings: PollerSettings,
    ) -> Self {
        let (sender, updates) = watch::channel(None);
        let refresh = Arc::new(Notify::new());
        let task = tokio::spawn(poll_loop(
            inbox,
            recipient,
            settings,
            sender,
            Arc::clone(&refresh),
        ));
        Self {
            task,
            refresh,
            updates,
        }
    }

    /// Receive every published page.
    pub fn subscribe(&self) -> watch::Receiver<Option<InboxPage>> {
        self.updates.clone()
    }

    /// Most recent page, if any fetch has succeeded.
    pub fn latest(&self) -> Option<InboxPage> {
        self.updates.borrow().clone()
    }

    /// Fetch again without waiting for the next tick.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }
}

impl Drop for InboxPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop(
    inbox: Arc<dyn NotificationInbox>,
    recipient: UserId,
    settings: PollerSettings,
    sender: watch::Sender<Option<InboxPage>>,
    refresh: Arc<Notify>,
) {
    let mut ticker = interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = refresh.notified() => ticker.reset(),
        }
        match inbox.list_recent(&recipient, settings.limit).await {
            Ok(page) => {
                if sender.send(Some(page)).is_err() {
                    break;
                }
            }
            Err(error) => warn!(%recipient, %error, "inbox poll failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Timing coverage using Tokio's paused clock.
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::Error;

    #[derive(Default)]
    struct CountingInbox {
        calls: AtomicUsize,
    }

    impl CountingInbox {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NotificationInbox for CountingInbox {
        async fn list_recent(&self, _recipient: &UserId, _limit: usize) -> Result<InboxPage, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(InboxPage::from_page(Vec::new()))
        }

        async fn mark_read(&self, _recipient: &UserId, _id: Uuid) -> Result<(), Error> {
            Ok(())
        }

        async fn mark_all_read(&self, _recipient: &UserId) -> Result<u64, Error> {
            Ok(0)
        }
    }

    fn spawn(inbox: &Arc<CountingInbox>) -> InboxPoller {
        let port: Arc<dyn NotificationInbox> = inbox.clone();
        InboxPoller::spawn(port, UserId::random(), PollerSettings::default())
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn fetches_immediately_then_every_interval() {
        let inbox = Arc::new(CountingInbox::default());
        let poller = spawn(&inbox);
        let mut updates = poller.subscribe();

        updates.changed().await.expect("first page");
        assert_eq!(inbox.calls(), 1);
        assert!(poller.latest().is_some());

        tokio::time::sleep(DEFAULT_POLL_INTERVAL - Duration::from_secs(1)).await;
        assert_eq!(inbox.calls(), 1);

        updates.changed().await.expect("second page");
        assert_eq!(inbox.calls(), 2);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn refresh_fetches_without_waiting() {
        let inbox = Arc::new(CountingInbox::default());
        let poller = spawn(&inbox);
        let mut updates = poller.subscribe();
        updates.changed().await.expect("first page");

        let before = tokio::time::Instant::now();
        poller.refresh();
        updates.changed().await.expect("refreshed page");

        assert_eq!(inbox.calls(), 2);
        assert!(before.elapsed() < DEFAULT_POLL_INTERVAL);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn dropping_the_poller_stops_polling() {
        let inbox = Arc::new(CountingInbox::default());
        let poller = spawn(&inbox);
        let mut updates = poller.subscribe();
        updates.changed().await.expect("first page");

        drop(poller);
        tokio::time::sleep(DEFAULT_POLL_INTERVAL * 4).await;

        assert_eq!(inbox.calls(), 1);
    }
}
