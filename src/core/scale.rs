/// Linear scales between screen cells and data domains
///
/// The chart maps the buffer's timestamp extent onto the plot's columns and
/// the value range onto its rows. Inverting the time scale turns a cursor
/// column back into an instant for the nearest-sample lookup.

use chrono::{DateTime, Utc};

use super::buffer::SampleBuffer;
use super::sample::{epoch_seconds, from_epoch_seconds};

/// Monotonic mapping between a time domain and a horizontal range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self {
            domain: (epoch_seconds(domain.0), epoch_seconds(domain.1)),
            range,
        }
    }

    /// Scale over the buffer's timestamp extent, `None` when the buffer is empty
    pub fn from_buffer(buffer: &SampleBuffer, range: (f64, f64)) -> Option<Self> {
        buffer
            .time_extent()
            .map(|extent| Self::new(extent, range))
    }

    /// Domain bounds in epoch seconds
    pub fn domain_seconds(&self) -> (f64, f64) {
        self.domain
    }

    pub fn apply(&self, t: DateTime<Utc>) -> f64 {
        self.apply_seconds(epoch_seconds(t))
    }

    pub fn apply_seconds(&self, secs: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (secs - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, position: f64) -> DateTime<Utc> {
        from_epoch_seconds(self.invert_seconds(position))
    }

    pub fn invert_seconds(&self, position: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 || d1 == d0 {
            return d0;
        }
        d0 + (position - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Vertical scale: larger values sit higher on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    max: f64,
    top: f64,
    bottom: f64,
}

impl ValueScale {
    /// Domain `[0, max + max / 3]` over rows `top..=bottom`
    pub fn new(max_value: f64, top: f64, bottom: f64) -> Self {
        let max_value = if max_value.is_finite() && max_value > 0.0 {
            max_value
        } else {
            0.0
        };
        let headroom = max_value / 3.0;
        Self {
            max: max_value + headroom,
            top,
            bottom,
        }
    }

    pub fn from_buffer(buffer: &SampleBuffer, top: f64, bottom: f64) -> Self {
        Self::new(buffer.max_value().unwrap_or(0.0), top, bottom)
    }

    /// Upper bound of the value domain
    pub fn domain_max(&self) -> f64 {
        self.max
    }

    pub fn apply(&self, value: f64) -> f64 {
        if self.max == 0.0 {
            return self.bottom;
        }
        self.bottom + (value / self.max) * (self.top - self.bottom)
    }
}
