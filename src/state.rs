use anyhow::{bail, Result};
use std::time::Duration;

/// Upper bound for `WINDOW` and `ALERT_CAP`. Every tick clones both collections.
pub const MAX_CAPACITY: usize = 10_000;

/// Runtime knobs. Defaults give the standard two-second dashboard pacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub tick_ms: u64,
    pub window: usize,
    pub alert_capacity: usize,
    pub alert_probability: f64,
    pub seed: Option<u64>,
    pub headless: bool,
    /// Headless only; 0 runs until interrupted.
    pub max_ticks: u64,
    pub redraw_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 2000,
            window: 20,
            alert_capacity: 10,
            alert_probability: 0.1,
            seed: None,
            headless: false,
            max_ticks: 0,
            redraw_ms: 250,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            tick_ms: std::env::var("TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(d.tick_ms),
            window: std::env::var("WINDOW").ok().and_then(|v| v.parse().ok()).unwrap_or(d.window),
            alert_capacity: std::env::var("ALERT_CAP").ok().and_then(|v| v.parse().ok()).unwrap_or(d.alert_capacity),
            alert_probability: std::env::var("ALERT_PROB").ok().and_then(|v| v.parse().ok()).unwrap_or(d.alert_probability),
            seed: std::env::var("SEED").ok().and_then(|v| v.parse().ok()),
            headless: std::env::var("HEADLESS").map(|v| parse_flag(&v)).unwrap_or(d.headless),
            max_ticks: std::env::var("MAX_TICKS").ok().and_then(|v| v.parse().ok()).unwrap_or(d.max_ticks),
            redraw_ms: std::env::var("REDRAW_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(d.redraw_ms),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("TICK_MS must be positive");
        }
        if self.redraw_ms == 0 {
            bail!("REDRAW_MS must be positive");
        }
        if !(1..=MAX_CAPACITY).contains(&self.window) {
            bail!("WINDOW must be within [1, {}], got {}", MAX_CAPACITY, self.window);
        }
        if !(1..=MAX_CAPACITY).contains(&self.alert_capacity) {
            bail!("ALERT_CAP must be within [1, {}], got {}", MAX_CAPACITY, self.alert_capacity);
        }
        if !(0.0..=1.0).contains(&self.alert_probability) {
            bail!("ALERT_PROB must be within [0, 1], got {}", self.alert_probability);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_ms)
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.to_lowercase().as_str(), "1" | "true" | "yes")
}
