//! Headless run: same simulation, no terminal UI. Records are echoed to
//! stdout as JSON and a one-line summary per tick goes to stderr.

use anyhow::Result;
use tokio::sync::mpsc;

use crate::logging;
use crate::simulation::{LiveFeed, Snapshot};
use crate::source::RngSource;
use crate::state::Config;

#[derive(Debug, Clone)]
pub struct Outcome {
    pub snapshot: Snapshot,
    /// Ticks reported before the run stopped. `snapshot.ticks` may be ahead.
    pub ticks: u64,
    pub alerts_raised: u64,
}

pub fn print_banner(cfg: &Config) {
    eprintln!("═══════════════════════════════════════════════════════════════");
    eprintln!("        Global Trade Risk Intelligence - Headless Mode");
    eprintln!("═══════════════════════════════════════════════════════════════");
    eprintln!(
        "[headless] tick={}ms window={} alerts={} p={}",
        cfg.tick_ms, cfg.window, cfg.alert_capacity, cfg.alert_probability
    );
    if cfg.max_ticks > 0 {
        eprintln!("[headless] stopping after {} ticks", cfg.max_ticks);
    }
    eprintln!("[headless] press Ctrl+C to stop");
}

/// Runs until `cfg.max_ticks` ticks have been reported or Ctrl+C.
pub async fn run(cfg: &Config) -> Result<Outcome> {
    logging::set_echo(true);
    print_banner(cfg);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let feed = LiveFeed::from_config(cfg, RngSource::from_seed_opt(cfg.seed), Some(tx));
    let mut ticks = 0u64;
    let mut alerts_raised = 0u64;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            report = rx.recv() => {
                let Some(report) = report else { break };
                let s = &report.sample;
                eprintln!(
                    "[tick {}] {} risk={:.1} volume={:.1} compliance={:.1} geo={:.1}{}",
                    report.tick,
                    s.timestamp,
                    s.risk_score,
                    s.volume_anomaly,
                    s.compliance_health,
                    s.geopolitical_index,
                    report
                        .alert
                        .as_ref()
                        .map(|a| format!(" ALERT {} {} {}", a.severity.as_str(), a.kind.as_str(), a.region.as_str()))
                        .unwrap_or_default(),
                );
                ticks = report.tick;
                if report.alert.is_some() {
                    alerts_raised += 1;
                }
                if cfg.max_ticks > 0 && ticks >= cfg.max_ticks {
                    break;
                }
            }
            _ = &mut shutdown => {
                eprintln!("[headless] interrupted");
                break;
            }
        }
    }

    let snapshot = feed.stop().await?;
    Ok(Outcome {
        snapshot,
        ticks,
        alerts_raised,
    })
}
