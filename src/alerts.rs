use std::collections::VecDeque;

use serde::Serialize;

use crate::source::RandomSource;
use crate::telemetry::PREALLOC_LIMIT;

pub const ALERT_MESSAGE: &str = "Detected anomaly in cross-border transaction patterns";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlertType {
    #[serde(rename = "High Risk Transaction")]
    HighRiskTransaction,
    #[serde(rename = "Regulatory Change")]
    RegulatoryChange,
    #[serde(rename = "Geopolitical Event")]
    GeopoliticalEvent,
    #[serde(rename = "Platform Anomaly")]
    PlatformAnomaly,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [
        AlertType::HighRiskTransaction,
        AlertType::RegulatoryChange,
        AlertType::GeopoliticalEvent,
        AlertType::PlatformAnomaly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HighRiskTransaction => "High Risk Transaction",
            AlertType::RegulatoryChange => "Regulatory Change",
            AlertType::GeopoliticalEvent => "Geopolitical Event",
            AlertType::PlatformAnomaly => "Platform Anomaly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    #[serde(rename = "APAC")]
    Apac,
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "Americas")]
    Americas,
    #[serde(rename = "Middle East")]
    MiddleEast,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Apac, Region::Emea, Region::Americas, Region::MiddleEast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Apac => "APAC",
            Region::Emea => "EMEA",
            Region::Americas => "Americas",
            Region::MiddleEast => "Middle East",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub severity: Severity,
    pub region: Region,
    pub message: String,
    pub timestamp: String,
}

impl Alert {
    /// Draws type, severity and region in that order.
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R, id: u64, timestamp: String) -> Self {
        let kind = AlertType::ALL[rng.pick(AlertType::ALL.len())];
        let severity = Severity::ALL[rng.pick(Severity::ALL.len())];
        let region = Region::ALL[rng.pick(Region::ALL.len())];
        Self {
            id,
            kind,
            severity,
            region,
            message: ALERT_MESSAGE.to_string(),
            timestamp,
        }
    }
}

/// Newest-first alert list bounded to `capacity` entries.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    items: VecDeque<Alert>,
    capacity: usize,
}

impl AlertFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity.saturating_add(1).min(PREALLOC_LIMIT)),
            capacity,
        }
    }

    /// Prepends `alert` and truncates to capacity.
    pub fn push(&mut self, alert: Alert) {
        self.items.push_front(alert);
        self.items.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<Alert> {
        self.items.iter().cloned().collect()
    }
}
