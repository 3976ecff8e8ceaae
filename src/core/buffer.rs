/// Bounded in-memory history of recent samples
///
/// Samples are kept in arrival order. Once the buffer holds `capacity`
/// samples, every append evicts from the head so only the most recent
/// `capacity` samples remain.

use chrono::{DateTime, Utc};

use super::sample::Sample;
use crate::utils::DEFAULT_CAPACITY;

#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
    capacity: usize,
}

impl SampleBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Add a sample at the tail, evicting the oldest samples past capacity
    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);

        if self.samples.len() > self.capacity {
            let excess = self.samples.len() - self.capacity;
            self.samples.drain(0..excess);
        }
    }

    /// Current contents, oldest first
    pub fn current_view(&self) -> &[Sample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// First and last timestamps, if any samples are held
    pub fn time_extent(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// Largest present value (NaN ignored)
    pub fn max_value(&self) -> Option<f64> {
        self.samples
            .iter()
            .filter_map(|s| s.value)
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
