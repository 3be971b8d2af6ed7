//! Live-data simulation loop.
//!
//! [`Simulator`] is the pure per-tick state step. [`LiveFeed`] drives it from a
//! tokio interval inside its own task and publishes read-only [`Snapshot`]s.
//! The simulator moves into that task, so once the feed is stopped (or
//! dropped) nothing can mutate the window or the alert list again.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::alerts::{Alert, AlertFeed};
use crate::logging;
use crate::source::RandomSource;
use crate::state::Config;
use crate::telemetry::{RollingWindow, TelemetrySample};

pub const SAMPLE_TIME_FORMAT: &str = "%H:%M:%S";
pub const ALERT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What one tick produced.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub sample: TelemetrySample,
    pub alert: Option<Alert>,
    pub evicted: bool,
}

/// Read-only view published after every tick.
///
/// `telemetry` is oldest first; `alerts` is newest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub ticks: u64,
    pub telemetry: Vec<TelemetrySample>,
    pub alerts: Vec<Alert>,
}

impl Snapshot {
    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.telemetry.last()
    }
}

#[derive(Debug, Clone)]
pub struct Simulator {
    window: RollingWindow<TelemetrySample>,
    alerts: AlertFeed,
    alert_probability: f64,
    ticks: u64,
    last_alert_id: u64,
}

impl Simulator {
    pub fn new(cfg: &Config) -> Self {
        Self::with_limits(cfg.window, cfg.alert_capacity, cfg.alert_probability)
    }

    pub fn with_limits(window: usize, alert_capacity: usize, alert_probability: f64) -> Self {
        Self {
            window: RollingWindow::new(window),
            alerts: AlertFeed::new(alert_capacity),
            alert_probability,
            ticks: 0,
            last_alert_id: 0,
        }
    }

    /// One tick: sample, append, then maybe raise an alert.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R, now: DateTime<Local>) -> TickReport {
        self.ticks += 1;

        let sample = TelemetrySample::generate(rng, now.format(SAMPLE_TIME_FORMAT).to_string());
        let evicted = self.window.push(sample.clone()).is_some();

        let alert = if rng.next_unit() < self.alert_probability {
            let id = self.next_alert_id(now);
            let alert = Alert::generate(rng, id, now.format(ALERT_TIME_FORMAT).to_string());
            self.alerts.push(alert.clone());
            Some(alert)
        } else {
            None
        };

        TickReport {
            tick: self.ticks,
            sample,
            alert,
            evicted,
        }
    }

    // Epoch millis, bumped so ids stay strictly increasing.
    fn next_alert_id(&mut self, now: DateTime<Local>) -> u64 {
        let ms = now.timestamp_millis().max(0) as u64;
        let id = ms.max(self.last_alert_id + 1);
        self.last_alert_id = id;
        id
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn window(&self) -> &RollingWindow<TelemetrySample> {
        &self.window
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ticks: self.ticks,
            telemetry: self.window.to_vec(),
            alerts: self.alerts.to_vec(),
        }
    }
}

/// Handle to a running simulation task.
///
/// Stopping is tied to ownership: `stop` aborts and joins the task, and
/// dropping an unstopped feed aborts it. Either path runs at most once.
#[derive(Debug)]
pub struct LiveFeed {
    handle: Option<JoinHandle<()>>,
    snapshots: watch::Receiver<Snapshot>,
}

impl LiveFeed {
    /// Spawns the tick task. The first tick fires one full `period` after
    /// start. Must be called inside a tokio runtime.
    pub fn start<R>(
        period: Duration,
        mut sim: Simulator,
        mut rng: R,
        reports: Option<mpsc::UnboundedSender<TickReport>>,
    ) -> Self
    where
        R: RandomSource + Send + 'static,
    {
        let (tx, rx) = watch::channel(sim.snapshot());
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let report = sim.tick(&mut rng, Local::now());
                logging::log_tick(&report);
                tx.send_replace(sim.snapshot());
                if let Some(out) = &reports {
                    // Receiver gone just means nobody is listening any more.
                    let _ = out.send(report);
                }
            }
        });
        logging::log_feed_state("started", period.as_millis() as u64);
        Self {
            handle: Some(handle),
            snapshots: rx,
        }
    }

    pub fn from_config<R>(cfg: &Config, rng: R, reports: Option<mpsc::UnboundedSender<TickReport>>) -> Self
    where
        R: RandomSource + Send + 'static,
    {
        Self::start(cfg.tick_interval(), Simulator::new(cfg), rng, reports)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified after each tick. Closes once the feed stops.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Cancels the timer, waits for the task to unwind and returns the final
    /// state.
    pub async fn stop(mut self) -> Result<Snapshot> {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => return Err(anyhow!("simulation task failed: {}", e)),
            }
            logging::log_feed_state("stopped", 0);
        }
        Ok(self.snapshot())
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            logging::log_feed_state("dropped", 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RngSource, ScriptedSource};
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_750_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_tick_without_alert_draws_five_values() {
        let mut sim = Simulator::with_limits(20, 10, 0.1);
        let mut src = ScriptedSource::new(vec![0.5, 0.5, 0.5, 0.5, 0.5]);
        let report = sim.tick(&mut src, at(0));
        assert!(report.alert.is_none());
        assert_eq!(src.draws(), 5);
        assert_eq!(sim.window().len(), 1);
        assert!(sim.alerts().is_empty());
    }

    #[test]
    fn test_gate_below_threshold_raises_alert() {
        let mut sim = Simulator::with_limits(20, 10, 0.1);
        // four fields, gate 0.05, then type/severity/region
        let mut src = ScriptedSource::new(vec![0.1, 0.2, 0.3, 0.4, 0.05, 0.0, 0.0, 0.75]);
        let report = sim.tick(&mut src, at(0));
        let alert = report.alert.expect("alert");
        assert_eq!(alert.region, crate::alerts::Region::MiddleEast);
        assert_eq!(src.draws(), 8);
        assert_eq!(sim.alerts().len(), 1);
    }

    #[test]
    fn test_gate_at_threshold_is_not_an_alert() {
        let mut sim = Simulator::with_limits(20, 10, 0.5);
        let mut src = ScriptedSource::constant(0.5);
        assert!(sim.tick(&mut src, at(0)).alert.is_none());
    }

    #[test]
    fn test_timestamp_formats() {
        let mut sim = Simulator::with_limits(20, 10, 1.0);
        let now = at(0);
        let report = sim.tick(&mut ScriptedSource::constant(0.0), now);
        assert_eq!(report.sample.timestamp, now.format("%H:%M:%S").to_string());
        let alert = report.alert.unwrap();
        assert_eq!(alert.timestamp, now.format("%Y-%m-%d %H:%M:%S").to_string());
        assert_eq!(alert.id, now.timestamp_millis() as u64);
    }

    #[test]
    fn test_alert_ids_strictly_increase_within_same_instant() {
        let mut sim = Simulator::with_limits(20, 10, 1.0);
        let mut src = ScriptedSource::constant(0.0);
        let now = at(5);
        let ids: Vec<u64> = (0..4).map(|_| sim.tick(&mut src, now).alert.unwrap().id).collect();
        assert!(ids.windows(2).all(|w| w[1] > w[0]), "{:?}", ids);
    }

    #[test]
    fn test_snapshot_orders() {
        let mut sim = Simulator::with_limits(3, 2, 1.0);
        let mut src = ScriptedSource::constant(0.0);
        for i in 0..4 {
            sim.tick(&mut src, at(i));
        }
        let snap = sim.snapshot();
        assert_eq!(snap.ticks, 4);
        assert_eq!(snap.telemetry.len(), 3);
        assert_eq!(snap.alerts.len(), 2);
        assert!(snap.alerts[0].id > snap.alerts[1].id);
        assert_eq!(snap.latest().map(|s| s.timestamp.clone()), Some(at(3).format("%H:%M:%S").to_string()));
    }

    #[test]
    fn test_simulator_builds_at_capacity_extremes() {
        let cfg = Config {
            window: crate::state::MAX_CAPACITY,
            alert_capacity: crate::state::MAX_CAPACITY,
            alert_probability: 1.0,
            ..Config::default()
        };
        cfg.validate().unwrap();
        let mut src = ScriptedSource::constant(0.0);
        let mut sim = Simulator::new(&cfg);
        for i in 0..3 {
            sim.tick(&mut src, at(i));
        }
        assert_eq!(sim.window().len(), 3);

        let mut sim = Simulator::with_limits(usize::MAX, usize::MAX, 1.0);
        sim.tick(&mut src, at(0));
        assert_eq!(sim.alerts().len(), 1);
    }

    #[test]
    fn test_zero_probability_never_alerts() {
        let mut sim = Simulator::with_limits(20, 10, 0.0);
        let mut rng = RngSource::seeded(3);
        for i in 0..1_000 {
            assert!(sim.tick(&mut rng, at(i)).alert.is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_ticks_on_period() {
        let feed = LiveFeed::start(
            Duration::from_millis(2000),
            Simulator::with_limits(20, 10, 0.1),
            RngSource::seeded(1),
            None,
        );
        assert_eq!(feed.snapshot().ticks, 0);
        let mut rx = feed.subscribe();
        for _ in 0..3 {
            rx.changed().await.unwrap();
        }
        assert_eq!(rx.borrow().ticks, 3);
        let last = feed.stop().await.unwrap();
        assert_eq!(last.ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_first_period() {
        let feed = LiveFeed::start(
            Duration::from_millis(2000),
            Simulator::with_limits(20, 10, 0.1),
            RngSource::seeded(1),
            None,
        );
        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(feed.snapshot().ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let feed = LiveFeed::start(
            Duration::from_millis(50),
            Simulator::with_limits(20, 10, 0.1),
            RngSource::seeded(1),
            None,
        );
        let mut rx = feed.subscribe();
        rx.changed().await.unwrap();
        drop(feed);
        // Sender lives in the task; it closes once the abort lands.
        while rx.changed().await.is_ok() {}
        let ticks = rx.borrow().ticks;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(rx.borrow().ticks, ticks);
    }
}
