use std::collections::VecDeque;

use serde::Serialize;

use crate::source::RandomSource;

pub const RISK_SCORE_RANGE: (f64, f64) = (0.0, 100.0);
pub const VOLUME_ANOMALY_RANGE: (f64, f64) = (25.0, 75.0);
pub const COMPLIANCE_HEALTH_RANGE: (f64, f64) = (70.0, 100.0);
pub const GEOPOLITICAL_INDEX_RANGE: (f64, f64) = (30.0, 70.0);

/// Bounded containers reserve at most this many slots up front and grow on demand.
pub const PREALLOC_LIMIT: usize = 64;

/// One synthetic telemetry reading. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    pub timestamp: String,
    pub risk_score: f64,
    pub volume_anomaly: f64,
    pub compliance_health: f64,
    pub geopolitical_index: f64,
}

impl TelemetrySample {
    /// Draws the four fields in declaration order.
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R, timestamp: String) -> Self {
        Self {
            timestamp,
            risk_score: rng.uniform(RISK_SCORE_RANGE.0, RISK_SCORE_RANGE.1),
            volume_anomaly: rng.uniform(VOLUME_ANOMALY_RANGE.0, VOLUME_ANOMALY_RANGE.1),
            compliance_health: rng.uniform(COMPLIANCE_HEALTH_RANGE.0, COMPLIANCE_HEALTH_RANGE.1),
            geopolitical_index: rng.uniform(GEOPOLITICAL_INDEX_RANGE.0, GEOPOLITICAL_INDEX_RANGE.1),
        }
    }

    pub fn in_range(&self) -> bool {
        let within = |v: f64, (lo, hi): (f64, f64)| v >= lo && v < hi;
        within(self.risk_score, RISK_SCORE_RANGE)
            && within(self.volume_anomaly, VOLUME_ANOMALY_RANGE)
            && within(self.compliance_health, COMPLIANCE_HEALTH_RANGE)
            && within(self.geopolitical_index, GEOPOLITICAL_INDEX_RANGE)
    }
}

/// Fixed-capacity FIFO. Oldest entry is evicted on overflow; iteration is
/// oldest first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: VecDeque::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
        }
    }

    /// Appends `item`, returning the evicted entry if the window was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.buf.push_back(item);
        if self.buf.len() > self.capacity {
            self.buf.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }
}

impl<T: Clone> RollingWindow<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.buf.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RngSource, ScriptedSource};

    #[test]
    fn test_window_evicts_oldest() {
        let mut w = RollingWindow::new(3);
        assert_eq!(w.push(1), None);
        assert_eq!(w.push(2), None);
        assert_eq!(w.push(3), None);
        assert_eq!(w.push(4), Some(1));
        assert_eq!(w.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut w = RollingWindow::new(20);
        for i in 0..100 {
            w.push(i);
            assert!(w.len() <= 20);
        }
        assert_eq!(w.iter().next(), Some(&80));
    }

    #[test]
    fn test_zero_capacity_treated_as_one() {
        let mut w = RollingWindow::new(0);
        w.push('a');
        w.push('b');
        assert_eq!(w.to_vec(), vec!['b']);
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut w = RollingWindow::new(usize::MAX);
        for i in 0..100 {
            assert_eq!(w.push(i), None);
        }
        assert_eq!(w.len(), 100);
    }

    #[test]
    fn test_sample_fields_mapped_from_draws() {
        let mut src = ScriptedSource::new(vec![0.5, 0.0, 0.5, 0.25]);
        let s = TelemetrySample::generate(&mut src, "12:00:00".to_string());
        assert_eq!(s.risk_score, 50.0);
        assert_eq!(s.volume_anomaly, 25.0);
        assert_eq!(s.compliance_health, 85.0);
        assert_eq!(s.geopolitical_index, 40.0);
        assert_eq!(src.draws(), 4);
    }

    #[test]
    fn test_generated_samples_in_range() {
        let mut src = RngSource::seeded(11);
        for _ in 0..5_000 {
            let s = TelemetrySample::generate(&mut src, String::new());
            assert!(s.in_range(), "{:?}", s);
        }
    }

    #[test]
    fn test_sample_serializes_camel_case() {
        let s = TelemetrySample {
            timestamp: "09:15:00".to_string(),
            risk_score: 1.0,
            volume_anomaly: 30.0,
            compliance_health: 80.0,
            geopolitical_index: 40.0,
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["riskScore"], 1.0);
        assert_eq!(v["geopoliticalIndex"], 40.0);
    }
}
