//! Behavioural checks for the simulation loop: window bounds, eviction
//! order, alert list ordering, alert rate and teardown.

use chrono::{DateTime, Local, TimeZone};
use std::time::Duration;

use tradewatch::alerts::AlertType;
use tradewatch::simulation::{LiveFeed, Simulator};
use tradewatch::source::{RngSource, ScriptedSource};
use tradewatch::state::Config;

fn at(tick: i64) -> DateTime<Local> {
    Local.timestamp_opt(1_750_000_000 + 2 * tick, 0).unwrap()
}

fn default_sim() -> Simulator {
    Simulator::new(&Config::default())
}

// Every test that drives the simulator writes run logs; keep them out of the tree.
fn log_to_temp() {
    std::env::set_var("LOG_DIR", std::env::temp_dir().join("tradewatch-test-runs"));
}

// ---------------------------------------------------------------------------
// Window capacity and FIFO eviction
// ---------------------------------------------------------------------------
#[test]
fn window_holds_ticks_2_through_21_after_21_ticks() {
    log_to_temp();
    let mut sim = default_sim();
    // Gate value 0.99 keeps alerts out, so each tick draws exactly five values.
    // The risk score encodes the tick number: 0.01 * tick.
    let mut script = Vec::new();
    for tick in 1..=21 {
        script.extend([tick as f64 / 100.0, 0.5, 0.5, 0.5, 0.99]);
    }
    let mut src = ScriptedSource::new(script);

    for tick in 1..=21 {
        sim.tick(&mut src, at(tick));
    }

    let snap = sim.snapshot();
    assert_eq!(snap.telemetry.len(), 20);
    let ticks: Vec<i64> = snap
        .telemetry
        .iter()
        .map(|s| s.risk_score.round() as i64)
        .collect();
    assert_eq!(ticks, (2..=21).collect::<Vec<_>>());
    assert!(snap.alerts.is_empty());
}

#[test]
fn window_never_exceeds_capacity_and_fields_stay_in_range() {
    log_to_temp();
    let mut sim = default_sim();
    let mut rng = RngSource::seeded(2024);
    for tick in 0..500 {
        let report = sim.tick(&mut rng, at(tick));
        assert!(report.sample.in_range(), "tick {}: {:?}", tick, report.sample);
        assert!(sim.window().len() <= 20);
        assert!(sim.alerts().len() <= 10);
    }
}

#[test]
fn extreme_draws_stay_in_range() {
    log_to_temp();
    let mut sim = default_sim();
    let mut high = ScriptedSource::constant(0.999_999_999_999_999_9);
    let report = sim.tick(&mut high, at(0));
    assert!(report.sample.in_range(), "{:?}", report.sample);

    let mut low = ScriptedSource::constant(0.0);
    let report = sim.tick(&mut low, at(1));
    assert!(report.sample.in_range(), "{:?}", report.sample);
}

// ---------------------------------------------------------------------------
// Alert list ordering and bound
// ---------------------------------------------------------------------------
#[test]
fn twelve_forced_alerts_keep_ten_newest_first() {
    log_to_temp();
    let mut sim = default_sim();
    let mut src = ScriptedSource::constant(0.0);
    let mut raised = Vec::new();
    for tick in 1..=12 {
        let report = sim.tick(&mut src, at(tick));
        raised.push(report.alert.expect("gate forced open").id);
    }

    let held: Vec<u64> = sim.alerts().iter().map(|a| a.id).collect();
    let expected: Vec<u64> = raised.iter().rev().take(10).copied().collect();
    assert_eq!(held, expected);
    assert_eq!(held.len(), 10);
    assert!(sim.alerts().iter().all(|a| a.kind == AlertType::HighRiskTransaction));
}

#[test]
fn newest_alert_always_first() {
    log_to_temp();
    let mut sim = Simulator::with_limits(20, 10, 0.5);
    let mut rng = RngSource::seeded(99);
    for tick in 0..300 {
        if let Some(alert) = sim.tick(&mut rng, at(tick)).alert {
            assert_eq!(sim.alerts().iter().next().map(|a| a.id), Some(alert.id));
        }
    }
}

// ---------------------------------------------------------------------------
// Alert rate converges to the configured probability
// ---------------------------------------------------------------------------
#[test]
fn alert_rate_converges_to_probability() {
    log_to_temp();
    let mut sim = default_sim();
    let mut rng = RngSource::seeded(7);
    let n = 10_000;
    let hits = (0..n)
        .filter(|&t| sim.tick(&mut rng, at(t)).alert.is_some())
        .count();
    let rate = hits as f64 / n as f64;
    // sd = sqrt(0.1 * 0.9 / 10000) = 0.003; allow ~5 sd
    assert!((rate - 0.1).abs() < 0.015, "rate={}", rate);
}

#[test]
fn enum_choices_are_roughly_uniform() {
    log_to_temp();
    let mut sim = Simulator::with_limits(20, 10, 1.0);
    let mut rng = RngSource::seeded(5);
    let mut counts = [0usize; 4];
    for t in 0..8_000 {
        let alert = sim.tick(&mut rng, at(t)).alert.unwrap();
        let idx = AlertType::ALL.iter().position(|k| *k == alert.kind).unwrap();
        counts[idx] += 1;
    }
    for c in counts {
        assert!((1_700..2_300).contains(&c), "{:?}", counts);
    }
}

// ---------------------------------------------------------------------------
// Teardown: no mutation after stop
// ---------------------------------------------------------------------------
#[tokio::test(start_paused = true)]
async fn stopped_feed_never_mutates_again() {
    log_to_temp();
    let cfg = Config {
        tick_ms: 2000,
        ..Config::default()
    };
    let feed = LiveFeed::from_config(&cfg, RngSource::seeded(1), None);
    let mut rx = feed.subscribe();
    for _ in 0..4 {
        rx.changed().await.unwrap();
    }

    let last = feed.stop().await.unwrap();
    assert_eq!(last.ticks, 4);

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(rx.changed().await.is_err(), "feed still publishing after stop");
    let after = rx.borrow().clone();
    assert_eq!(after.ticks, 4);
    assert_eq!(after.telemetry, last.telemetry);
    assert_eq!(after.alerts, last.alerts);
}

#[tokio::test(start_paused = true)]
async fn reports_channel_mirrors_ticks() {
    log_to_temp();
    let (tx, mut reports) = tokio::sync::mpsc::unbounded_channel();
    let feed = LiveFeed::start(
        Duration::from_millis(100),
        Simulator::with_limits(20, 10, 1.0),
        ScriptedSource::constant(0.0),
        Some(tx),
    );
    for expected in 1..=3 {
        let report = reports.recv().await.unwrap();
        assert_eq!(report.tick, expected);
        assert!(report.alert.is_some());
    }
    let last = feed.stop().await.unwrap();
    assert!(last.ticks >= 3);
    // Sender was owned by the aborted task.
    while reports.recv().await.is_some() {}
}
