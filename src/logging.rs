//! Structured run logging.
//!
//! Every record is one JSON object per line, written under
//! `LOG_DIR/RUN_ID/`. Debug/trace records go to `trace.jsonl`, the rest to
//! `events.jsonl`. Records are echoed to stdout only when echo is enabled,
//! because the interactive dashboard owns the terminal.

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::simulation::TickReport;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_LEVEL").as_deref().unwrap_or("info"))
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "warn" => Level::Warn,
            "error" => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

// =============================================================================
// Log Domains
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Telemetry, // Samples appended to the window
    Alert,     // Generated alerts
    Feed,      // Timer lifecycle
    Ui,        // Terminal and navigation
    System,    // Startup, shutdown
    Profile,   // Timing scopes
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Telemetry => "telemetry",
            Domain::Alert => "alert",
            Domain::Feed => "feed",
            Domain::Ui => "ui",
            Domain::System => "system",
            Domain::Profile => "profile",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS: comma-separated list or "all"
        domain_enabled(std::env::var("LOG_DOMAINS").ok().as_deref(), *self)
    }
}

fn domain_enabled(filter: Option<&str>, domain: Domain) -> bool {
    match filter {
        None | Some("all") => true,
        Some(domains) => domains.split(',').any(|d| d.trim() == domain.as_str()),
    }
}

// =============================================================================
// Run context
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static ECHO: AtomicBool = AtomicBool::new(false);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

/// Mirror records to stdout. Off by default.
pub fn set_echo(enabled: bool) {
    ECHO.store(enabled, Ordering::SeqCst);
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    dir: PathBuf,
    events: Option<Mutex<BufWriter<File>>>,
    trace: Option<Mutex<BufWriter<File>>>,
}

impl RunContext {
    fn open(base: PathBuf, run_id: String) -> Self {
        let dir = base.join(&run_id);
        if let Err(err) = create_dir_all(&dir) {
            eprintln!("[log] failed to create run dir: {}", err);
        }

        let _ = std::fs::write(
            dir.join("manifest.json"),
            json!({
                "run_id": run_id,
                "ts": ts_now(),
                "pid": process::id(),
                "log_dir": dir.to_string_lossy(),
                "version": env!("CARGO_PKG_VERSION"),
            })
            .to_string(),
        );

        let open = |name: &str| match File::create(dir.join(name)) {
            Ok(f) => Some(Mutex::new(BufWriter::new(f))),
            Err(err) => {
                eprintln!("[log] failed to create {}: {}", name, err);
                None
            }
        };
        let events = open("events.jsonl");
        let trace = open("trace.jsonl");

        Self {
            run_id,
            dir,
            events,
            trace,
        }
    }
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let base = std::env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log_dir());
        RunContext::open(base, run_id)
    })
}

#[cfg(not(test))]
fn default_log_dir() -> PathBuf {
    PathBuf::from("out/runs")
}

// Unit test runs stay out of the working tree.
#[cfg(test)]
fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("tradewatch-test-runs")
}

pub fn run_id() -> &'static str {
    &ensure_run_context().run_id
}

pub fn run_dir() -> PathBuf {
    ensure_run_context().dir.clone()
}

fn write_line(writer: &Option<Mutex<BufWriter<File>>>, line: &str) {
    if let Some(writer) = writer {
        if let Ok(mut w) = writer.lock() {
            let _ = writeln!(w, "{}", line);
        }
    }
}

/// Flush buffered records. Call before exit.
pub fn flush() {
    let ctx = ensure_run_context();
    for writer in [&ctx.events, &ctx.trace].into_iter().flatten() {
        if let Ok(mut w) = writer.lock() {
            let _ = w.flush();
        }
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    let ctx = ensure_run_context();
    let line = render_record(&ctx.run_id, level, domain, event, fields);
    match level {
        Level::Trace | Level::Debug => write_line(&ctx.trace, &line),
        _ => write_line(&ctx.events, &line),
    }
    if ECHO.load(Ordering::SeqCst) {
        println!("{}", line);
    }
}

fn render_record(
    run_id: &str,
    level: Level,
    domain: Domain,
    event: &str,
    mut fields: Map<String, Value>,
) -> String {
    let msg = fields.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(run_id));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    entry.insert("data".to_string(), Value::Object(fields));
    Value::Object(entry).to_string()
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_tick(report: &TickReport) {
    let s = &report.sample;
    log(
        Level::Debug,
        Domain::Telemetry,
        "sample",
        obj(&[
            ("tick", json!(report.tick)),
            ("time", v_str(&s.timestamp)),
            ("risk_score", v_num(s.risk_score)),
            ("volume_anomaly", v_num(s.volume_anomaly)),
            ("compliance_health", v_num(s.compliance_health)),
            ("geopolitical_index", v_num(s.geopolitical_index)),
            ("evicted", json!(report.evicted)),
        ]),
    );
    agg_increment("tick");

    if let Some(alert) = &report.alert {
        log(
            Level::Warn,
            Domain::Alert,
            "alert",
            obj(&[
                ("msg", v_str(&alert.message)),
                ("id", json!(alert.id)),
                ("type", v_str(alert.kind.as_str())),
                ("severity", v_str(alert.severity.as_str())),
                ("region", v_str(alert.region.as_str())),
                ("timestamp", v_str(&alert.timestamp)),
            ]),
        );
        agg_increment("alert");
    }
    tick_aggregator();
}

pub fn log_feed_state(state: &str, period_ms: u64) {
    log(
        Level::Info,
        Domain::Feed,
        state,
        obj(&[("period_ms", json!(period_ms))]),
    );
}

pub fn log_tab(tab: &str) {
    log(Level::Debug, Domain::Ui, "tab", obj(&[("tab", v_str(tab))]));
}

pub fn log_startup(mode: &str, fields: &[(&str, Value)]) {
    let mut map = obj(fields);
    map.insert("mode".to_string(), v_str(mode));
    log(Level::Info, Domain::System, "startup", map);
}

/// Session summary on shutdown
pub fn log_session_summary(duration_secs: u64, ticks: u64, alerts_raised: Option<u64>, alerts_held: usize) {
    log(
        Level::Info,
        Domain::System,
        "session_summary",
        obj(&[
            ("duration_secs", json!(duration_secs)),
            ("ticks", json!(ticks)),
            ("alerts_raised", json!(alerts_raised)),
            ("alerts_held", json!(alerts_held)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Profiling Scope
// =============================================================================

/// Emits a trace record with elapsed time on drop.
pub struct ProfileScope {
    label: &'static str,
    started: Instant,
}

impl ProfileScope {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            started: Instant::now(),
        }
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        log(
            Level::Trace,
            Domain::Profile,
            "profile",
            obj(&[("label", v_str(self.label)), ("elapsed_ms", v_num(elapsed_ms))]),
        );
    }
}

// =============================================================================
// Aggregator for periodic summaries
// =============================================================================

static AGGREGATOR: OnceLock<Mutex<LogAggregator>> = OnceLock::new();

fn get_aggregator() -> &'static Mutex<LogAggregator> {
    AGGREGATOR.get_or_init(|| Mutex::new(LogAggregator::new()))
}

struct LogAggregator {
    ticks: u64,
    alerts: u64,
    last_flush: Instant,
    flush_interval_secs: u64,
}

impl LogAggregator {
    fn new() -> Self {
        Self {
            ticks: 0,
            alerts: 0,
            last_flush: Instant::now(),
            flush_interval_secs: std::env::var("LOG_FLUSH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    fn increment(&mut self, event: &str) {
        match event {
            "tick" => self.ticks += 1,
            "alert" => self.alerts += 1,
            _ => {}
        }
    }

    fn maybe_flush(&mut self) -> Option<(u64, u64)> {
        if self.last_flush.elapsed().as_secs() >= self.flush_interval_secs {
            let result = (self.ticks, self.alerts);
            self.ticks = 0;
            self.alerts = 0;
            self.last_flush = Instant::now();
            Some(result)
        } else {
            None
        }
    }
}

/// Emit aggregated counts once per flush interval.
pub fn tick_aggregator() {
    if let Ok(mut agg) = get_aggregator().lock() {
        if let Some((ticks, alerts)) = agg.maybe_flush() {
            let rate = if ticks > 0 { alerts as f64 / ticks as f64 } else { 0.0 };
            log(
                Level::Info,
                Domain::System,
                "aggregated_stats",
                obj(&[
                    ("ticks", json!(ticks)),
                    ("alerts", json!(alerts)),
                    ("alert_rate", v_num(rate)),
                ]),
            );
        }
    }
}

pub fn agg_increment(event: &str) {
    if let Ok(mut agg) = get_aggregator().lock() {
        agg.increment(event);
    }
}

// =============================================================================
// Tests
// =============================================================================
