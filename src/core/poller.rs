/// Timer-driven sample polling
///
/// A background task fetches one sample per tick and hands the outcome to the
/// owning view over a channel. The view is the only writer of its buffer, so
/// the task never touches it directly.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::sample::Sample;
use super::source::{FetchError, SampleSource};

/// Outcome of one tick
#[derive(Debug)]
pub struct PollEvent {
    pub tick: u64,
    pub result: Result<Sample, FetchError>,
}

/// Handle to the polling task; dropping it cancels the task
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Start polling `source` every `period`, first fetch one period from now
    pub fn spawn<S: SampleSource>(source: S, period: Duration) -> (Self, UnboundedReceiver<PollEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(poll_loop(source, period, tx));
        (Self { handle }, rx)
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn poll_loop<S: SampleSource>(source: S, period: Duration, tx: UnboundedSender<PollEvent>) {
    let period = period.max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut tick: u64 = 0;
    loop {
        ticker.tick().await;
        tick += 1;

        let result = source.fetch().await;
        if let Err(ref e) = result {
            tracing::warn!(tick, error = %e, "sample fetch failed");
        }

        // Receiver gone means the view was torn down
        if tx.send(PollEvent { tick, result }).is_err() {
            tracing::debug!(tick, "live view closed, stopping poller");
            break;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::sample::from_epoch_seconds;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Source that replays a fixed script, then keeps failing
    pub(crate) struct ScriptedSource {
        script: Mutex<VecDeque<Result<Sample, FetchError>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        pub(crate) fn new(script: Vec<Result<Sample, FetchError>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Self {
                script: Mutex::new(script.into_iter().collect()),
                calls: Arc::clone(&calls),
            };
            (source, calls)
        }
    }

    impl SampleSource for ScriptedSource {
        async fn fetch(&self) -> Result<Sample, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(FetchError::Decode("script exhausted".to_string())))
        }
    }

    /// Base URL of a localhost port that was just released, so nothing listens on it
    pub(crate) fn closed_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }

    pub(crate) fn ok(t: f64, v: f64) -> Result<Sample, FetchError> {
        Ok(Sample::new(from_epoch_seconds(t), v))
    }

    #[tokio::test]
    async fn test_events_arrive_in_tick_order() {
        let (source, _) = ScriptedSource::new(vec![
            ok(0.0, 10.0),
            Err(FetchError::Decode("boom".to_string())),
            ok(2.0, 30.0),
        ]);
        let (_poller, mut rx) = Poller::spawn(source, Duration::from_millis(5));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.tick, 1);
        assert_eq!(first.result.unwrap().value, Some(10.0));

        let second = rx.recv().await.unwrap();
        assert_eq!(second.tick, 2);
        assert!(matches!(second.result, Err(FetchError::Decode(_))));

        let third = rx.recv().await.unwrap();
        assert_eq!(third.tick, 3);
        assert_eq!(third.result.unwrap().value, Some(30.0));
    }

    #[tokio::test]
    async fn test_poller_stops_when_receiver_dropped() {
        let (source, calls) = ScriptedSource::new(vec![ok(0.0, 1.0), ok(1.0, 2.0)]);
        let (poller, rx) = Poller::spawn(source, Duration::from_millis(5));
        drop(rx);

        tokio::time::timeout(Duration::from_secs(2), async {
            while !poller.is_finished() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("poller should exit once nobody listens");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stop_cancels_task() {
        let (source, calls) = ScriptedSource::new(vec![]);
        let (poller, mut rx) = Poller::spawn(source, Duration::from_millis(50));
        poller.stop();

        // Channel closes without delivering anything
        assert!(rx.recv().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
