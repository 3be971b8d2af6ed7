use anyhow::{Context, Result};
use serde_json::json;
use std::time::Instant;

use tradewatch::logging::{self, v_num};
use tradewatch::state::Config;
use tradewatch::{dashboard, headless};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    cfg.validate().context("invalid configuration")?;

    let mode = if cfg.headless { "headless" } else { "dashboard" };
    logging::log_startup(
        mode,
        &[
            ("tick_ms", json!(cfg.tick_ms)),
            ("window", json!(cfg.window)),
            ("alert_capacity", json!(cfg.alert_capacity)),
            ("alert_probability", v_num(cfg.alert_probability)),
            ("seed", json!(cfg.seed)),
        ],
    );

    let started = Instant::now();
    let (snapshot, ticks, alerts_raised) = if cfg.headless {
        let out = headless::run(&cfg).await?;
        (out.snapshot, out.ticks, Some(out.alerts_raised))
    } else {
        let snapshot = dashboard::run(&cfg).await?;
        let ticks = snapshot.ticks;
        (snapshot, ticks, None)
    };

    logging::log_session_summary(
        started.elapsed().as_secs(),
        ticks,
        alerts_raised,
        snapshot.alerts.len(),
    );
    logging::flush();
    if !cfg.headless {
        eprintln!(
            "[tradewatch] {} ticks, run log in {}",
            ticks,
            logging::run_dir().display()
        );
    }
    Ok(())
}
