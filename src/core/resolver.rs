/// Nearest-sample lookup for the chart tooltip
///
/// Given samples in ascending timestamp order and a target instant, pick the
/// sample closest in time. When the target sits exactly halfway between two
/// samples the earlier one wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sample::Sample;
use super::scale::TimeScale;

/// Whether a zero reading produces a tooltip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroValuePolicy {
    /// Zero is treated as "no data" and hides the tooltip
    #[default]
    Suppress,
    /// Zero is a legitimate reading
    Show,
}

impl ZeroValuePolicy {
    pub fn from_show_zero(show_zero_values: bool) -> Self {
        if show_zero_values {
            ZeroValuePolicy::Show
        } else {
            ZeroValuePolicy::Suppress
        }
    }

    fn accepts(&self, value: Option<f64>) -> bool {
        match value {
            None => false,
            Some(v) if v.is_nan() => false,
            Some(v) if v == 0.0 => *self == ZeroValuePolicy::Show,
            Some(_) => true,
        }
    }
}

/// Closest sample to `x0` by timestamp, regardless of its value
///
/// `samples` must be sorted by timestamp.
pub fn nearest_sample(samples: &[Sample], x0: DateTime<Utc>) -> Option<&Sample> {
    let index = samples.partition_point(|s| s.timestamp < x0);

    let before = index.checked_sub(1).and_then(|i| samples.get(i));
    let after = samples.get(index);

    match (before, after) {
        (Some(d0), Some(d1)) => {
            let to_earlier = x0.signed_duration_since(d0.timestamp);
            let to_later = d1.timestamp.signed_duration_since(x0);
            if to_earlier > to_later {
                Some(d1)
            } else {
                Some(d0)
            }
        }
        (Some(d0), None) => Some(d0),
        (None, Some(d1)) => Some(d1),
        (None, None) => None,
    }
}

/// Sample to annotate for a cursor at `x0`, or `None` when no tooltip is shown
pub fn resolve(samples: &[Sample], x0: DateTime<Utc>, policy: ZeroValuePolicy) -> Option<&Sample> {
    nearest_sample(samples, x0).filter(|s| policy.accepts(s.value))
}

/// Resolve a cursor position through the chart's time scale
pub fn resolve_at<'a>(
    samples: &'a [Sample],
    scale: &TimeScale,
    position: f64,
    policy: ZeroValuePolicy,
) -> Option<&'a Sample> {
    resolve(samples, scale.invert(position), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::from_epoch_seconds;

    fn t(secs: f64) -> DateTime<Utc> {
        from_epoch_seconds(secs)
    }

    fn samples(points: &[(f64, f64)]) -> Vec<Sample> {
        points.iter().map(|&(ts, v)| Sample::new(t(ts), v)).collect()
    }

    fn resolved_time(samples: &[Sample], x0: f64) -> Option<f64> {
        resolve(samples, t(x0), ZeroValuePolicy::Suppress).map(|s| s.epoch_seconds())
    }

    #[test]
    fn test_empty_yields_nothing() {
        for x0 in [-10.0, 0.0, 1e9] {
            assert!(nearest_sample(&[], t(x0)).is_none());
            assert!(resolve(&[], t(x0), ZeroValuePolicy::Show).is_none());
        }
    }

    #[test]
    fn test_interior_query_picks_closer_sample() {
        let data = samples(&[(0.0, 10.0), (1.0, 20.0), (2.0, 30.0)]);

        let hit = resolve(&data, t(1.2), ZeroValuePolicy::Suppress).unwrap();
        assert_eq!(hit, &Sample::new(t(1.0), 20.0));

        assert_eq!(resolved_time(&data, 1.8), Some(2.0));
        assert_eq!(resolved_time(&data, 0.3), Some(0.0));
        assert_eq!(resolved_time(&data, 0.7), Some(1.0));
    }

    #[test]
    fn test_equal_distance_prefers_earlier() {
        let data = samples(&[(0.0, 10.0), (1.0, 20.0), (2.0, 30.0)]);
        assert_eq!(resolved_time(&data, 0.5), Some(0.0));
        assert_eq!(resolved_time(&data, 1.5), Some(1.0));
    }

    #[test]
    fn test_exact_hit_returns_that_sample() {
        let data = samples(&[(0.0, 10.0), (1.0, 20.0), (2.0, 30.0)]);
        assert_eq!(resolved_time(&data, 0.0), Some(0.0));
        assert_eq!(resolved_time(&data, 1.0), Some(1.0));
        assert_eq!(resolved_time(&data, 2.0), Some(2.0));
    }

    #[test]
    fn test_boundaries_clamp_to_ends() {
        let data = samples(&[(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)]);
        assert_eq!(resolved_time(&data, -100.0), Some(10.0));
        assert_eq!(resolved_time(&data, 9.999), Some(10.0));
        assert_eq!(resolved_time(&data, 30.001), Some(30.0));
        assert_eq!(resolved_time(&data, 1e6), Some(30.0));
    }

    #[test]
    fn test_single_sample() {
        let data = samples(&[(5.0, 42.0)]);
        assert_eq!(resolved_time(&data, 0.0), Some(5.0));
        assert_eq!(resolved_time(&data, 5.0), Some(5.0));
        assert_eq!(resolved_time(&data, 50.0), Some(5.0));
    }

    #[test]
    fn test_zero_and_missing_values_suppress_tooltip() {
        let data = vec![
            Sample::new(t(0.0), 0.0),
            Sample::missing(t(1.0)),
            Sample::new(t(2.0), f64::NAN),
            Sample::new(t(3.0), 7.5),
        ];

        assert!(resolve(&data, t(0.1), ZeroValuePolicy::Suppress).is_none());
        assert!(resolve(&data, t(1.1), ZeroValuePolicy::Suppress).is_none());
        assert!(resolve(&data, t(2.1), ZeroValuePolicy::Suppress).is_none());
        assert_eq!(
            resolve(&data, t(2.9), ZeroValuePolicy::Suppress).map(|s| s.value),
            Some(Some(7.5))
        );

        // The nearest sample is still found; only the tooltip is withheld
        assert_eq!(nearest_sample(&data, t(1.1)).map(|s| s.epoch_seconds()), Some(1.0));
    }

    #[test]
    fn test_show_policy_keeps_zero_readings() {
        let data = samples(&[(0.0, 0.0), (1.0, 5.0)]);
        let hit = resolve(&data, t(0.2), ZeroValuePolicy::Show).unwrap();
        assert_eq!(hit.value, Some(0.0));

        let missing = vec![Sample::missing(t(0.0))];
        assert!(resolve(&missing, t(0.0), ZeroValuePolicy::Show).is_none());
    }

    #[test]
    fn test_resolve_through_scale() {
        let data = samples(&[(0.0, 10.0), (1.0, 20.0), (2.0, 30.0)]);
        // Columns 0..=20 cover the two seconds of data
        let scale = TimeScale::new((t(0.0), t(2.0)), (0.0, 20.0));

        let hit = resolve_at(&data, &scale, 12.0, ZeroValuePolicy::Suppress).unwrap();
        assert_eq!(hit.value, Some(20.0));

        let hit = resolve_at(&data, &scale, 19.0, ZeroValuePolicy::Suppress).unwrap();
        assert_eq!(hit.value, Some(30.0));
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(ZeroValuePolicy::from_show_zero(true), ZeroValuePolicy::Show);
        assert_eq!(ZeroValuePolicy::from_show_zero(false), ZeroValuePolicy::Suppress);
        assert_eq!(ZeroValuePolicy::default(), ZeroValuePolicy::Suppress);
    }
}
