use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One countdown heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

struct LiveTicks {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owner of the periodic countdown task.
///
/// At most one task is live: `install` cancels the previous one before
/// spawning, and dropping the source cancels whatever is running.
#[derive(Default)]
pub struct TickSource {
    live: Option<LiveTicks>,
}

impl TickSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period` and return the receiving end.
    ///
    /// The first tick arrives one full period after installation. Must be
    /// called from within a tokio runtime.
    pub fn install(&mut self, period: Duration) -> mpsc::Receiver<Tick> {
        self.cancel();

        let (sender, receiver) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = interval.tick() => {
                        if sender.send(Tick).await.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("tick source stopped");
        });

        debug!(period_ms = period.as_millis(), "tick source installed");
        self.live = Some(LiveTicks { shutdown, handle });
        receiver
    }

    /// Stop the live task, if any. Pending ticks already queued stay readable.
    pub fn cancel(&mut self) {
        if let Some(live) = self.live.take() {
            live.shutdown.cancel();
            live.handle.abort();
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| !live.shutdown.is_cancelled() && !live.handle.is_finished())
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut source = TickSource::new();
        let started = tokio::time::Instant::now();
        let mut ticks = source.install(Duration::from_secs(1));

        for _ in 0..3 {
            assert_eq!(ticks.recv().await, Some(Tick));
        }
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(source.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn reinstalling_cancels_the_previous_source() {
        let mut source = TickSource::new();
        let mut first = source.install(Duration::from_secs(1));
        let mut second = source.install(Duration::from_secs(1));

        assert_eq!(first.recv().await, None);
        assert_eq!(second.recv().await, Some(Tick));
        assert!(source.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_stop_ticking() {
        let mut source = TickSource::new();
        let mut ticks = source.install(Duration::from_secs(1));
        source.cancel();
        assert!(!source.is_live());
        assert_eq!(ticks.recv().await, None);

        let mut source = TickSource::new();
        let mut ticks = source.install(Duration::from_secs(1));
        drop(source);
        assert_eq!(ticks.recv().await, None);
    }
}
