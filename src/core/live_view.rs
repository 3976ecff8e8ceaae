/// Live chart session state
///
/// Owns the sample buffer for as long as the chart is shown. Poll results are
/// applied one at a time from the poller's channel; after teardown anything
/// still in flight is discarded.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use super::buffer::SampleBuffer;
use super::poller::{PollEvent, Poller};
use super::resolver::{resolve_at, ZeroValuePolicy};
use super::sample::Sample;
use super::scale::TimeScale;
use super::source::SampleSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub succeeded: u64,
    pub failed: u64,
    pub last_tick: u64,
}

#[derive(Debug)]
pub struct LiveView {
    buffer: SampleBuffer,
    policy: ZeroValuePolicy,
    error: Option<String>,
    stats: PollStats,
    last_update: Option<DateTime<Utc>>,
    poller: Option<Poller>,
    events: Option<UnboundedReceiver<PollEvent>>,
    torn_down: bool,
}

impl LiveView {
    /// View with an empty buffer and no poller attached
    pub fn new(capacity: usize, policy: ZeroValuePolicy) -> Self {
        Self {
            buffer: SampleBuffer::new(capacity),
            policy,
            error: None,
            stats: PollStats::default(),
            last_update: None,
            poller: None,
            events: None,
            torn_down: false,
        }
    }

    /// Mount the view and start polling `source`
    pub fn mount<S: SampleSource>(
        source: S,
        capacity: usize,
        period: Duration,
        policy: ZeroValuePolicy,
    ) -> Self {
        let mut view = Self::new(capacity, policy);
        let (poller, events) = Poller::spawn(source, period);
        view.poller = Some(poller);
        view.events = Some(events);
        view
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn samples(&self) -> &[Sample] {
        self.buffer.current_view()
    }

    /// Message from the most recent failed fetch, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn is_active(&self) -> bool {
        self.events.is_some()
    }

    /// Apply one poll outcome; ignored once the view is torn down
    pub fn apply(&mut self, event: PollEvent) {
        if self.torn_down {
            return;
        }
        self.stats.last_tick = event.tick;

        match event.result {
            Ok(sample) => {
                tracing::debug!(tick = event.tick, value = ?sample.value, "sample appended");
                self.buffer.append(sample);
                self.error = None;
                self.stats.succeeded += 1;
                self.last_update = Some(Utc::now());
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.stats.failed += 1;
            }
        }
    }

    /// Apply every outcome already waiting on the channel; returns how many
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let Some(events) = self.events.as_mut() else {
                return applied;
            };
            match events.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => return applied,
                Err(TryRecvError::Disconnected) => {
                    self.events = None;
                    return applied;
                }
            }
        }
    }

    /// Wait for the next outcome and apply it; `false` once polling has ended
    pub async fn next(&mut self) -> bool {
        let Some(events) = self.events.as_mut() else {
            return false;
        };
        match events.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => {
                self.events = None;
                false
            }
        }
    }

    /// Stop polling and drop anything still in flight
    pub fn teardown(&mut self) {
        self.torn_down = true;
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        if let Some(mut events) = self.events.take() {
            events.close();
        }
    }

    /// Sample to show in the tooltip for a cursor at `position` on `scale`
    pub fn tooltip_at(&self, scale: &TimeScale, position: f64) -> Option<&Sample> {
        resolve_at(self.samples(), scale, position, self.policy)
    }
}

impl Drop for LiveView {
    fn drop(&mut self) {
        self.teardown();
    }
}
