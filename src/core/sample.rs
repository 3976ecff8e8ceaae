/// Time-stamped samples and their wire format
///
/// The sample endpoint returns one `{ "date": ISO-8601, "close": number }`
/// object per request. `date` becomes the timestamp and `close` the value.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::source::FetchError;

/// One observation: an instant and the value read at that instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
        }
    }

    /// Sample whose value was absent from the payload
    pub fn missing(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    /// Timestamp as fractional seconds since the Unix epoch (chart x coordinate)
    pub fn epoch_seconds(&self) -> f64 {
        epoch_seconds(self.timestamp)
    }
}

/// Payload served by `/api/graph`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDto {
    pub date: String,
    #[serde(default)]
    pub close: Option<f64>,
}

impl SampleDto {
    pub fn from_sample(sample: &Sample) -> Self {
        Self {
            date: sample.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            close: sample.value,
        }
    }
}

impl TryFrom<SampleDto> for Sample {
    type Error = FetchError;

    fn try_from(dto: SampleDto) -> Result<Self, Self::Error> {
        let timestamp = DateTime::parse_from_rfc3339(&dto.date)
            .map_err(|source| FetchError::InvalidDate {
                date: dto.date.clone(),
                source,
            })?
            .with_timezone(&Utc);

        Ok(Self {
            timestamp,
            value: dto.close,
        })
    }
}

pub fn epoch_seconds(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}

pub fn from_epoch_seconds(secs: f64) -> DateTime<Utc> {
    let millis = (secs * 1000.0).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
}
