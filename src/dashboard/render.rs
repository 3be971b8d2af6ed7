//! Frame rendering. Pure functions of app state, snapshot and clock.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType, List, ListItem,
        Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame,
};

use super::{App, Tab};
use crate::alerts::{Alert, Severity};
use crate::catalog::{
    self, ConfidenceBand, InsightKind, RiskBand, ServiceHealth, AI_INSIGHTS, COUNTRY_RISK, FOOTER_STATS,
    FRAMEWORK_SCORES, GEOPOLITICAL_EVENTS, KEY_METRICS, MODEL_ARCHITECTURE, MODEL_PERFORMANCE, PERFORMANCE_KPIS,
    PLATFORM_METRICS, REGULATORY_TIMELINE, SECURITY_METRICS, SYSTEM_STATUS,
};
use crate::simulation::Snapshot;

pub const TITLE: &str = "Global Trade Risk Intelligence";
pub const SUBTITLE: &str = "AI-Powered Cross-Border Platform Monitoring";
pub const EMPTY_ALERTS: &str = "Monitoring for alerts... System operational";
pub const COPYRIGHT: &str = "© 2025 Global Trade Risk Intelligence Platform • Built for Cross-Border Resilience";

const ACCENT: Color = Color::Magenta;

pub fn draw(f: &mut Frame, app: &App, snap: &Snapshot, now: DateTime<Local>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(3), // tabs
            Constraint::Min(10),   // content
            Constraint::Length(4), // footer
        ])
        .split(f.area());

    draw_header(f, chunks[0], snap, now);
    draw_tabs(f, chunks[1], app.tab);
    match app.tab {
        Tab::Overview => draw_overview(f, chunks[2], snap),
        Tab::CrossBorder => draw_cross_border(f, chunks[2]),
        Tab::Integrity => draw_integrity(f, chunks[2]),
        Tab::Regulatory => draw_regulatory(f, chunks[2]),
        Tab::AiInsights => draw_ai_insights(f, chunks[2]),
    }
    draw_footer(f, chunks[3]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
}

fn band_color(band: RiskBand) -> Color {
    match band {
        RiskBand::Low => Color::Green,
        RiskBand::Medium => Color::Yellow,
        RiskBand::High => Color::Red,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::High => Color::LightRed,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Blue,
    }
}

fn heading() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

// ============================================================================
// Frame chrome
// ============================================================================

fn draw_header(f: &mut Frame, area: Rect, snap: &Snapshot, now: DateTime<Local>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(ACCENT))),
    ])
    .block(Block::default().borders(Borders::TOP | Borders::BOTTOM | Borders::LEFT).border_style(Style::default().fg(ACCENT)));

    let right = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled("Live", Style::default().fg(Color::Green)),
            Span::raw(format!("   ticks: {}", snap.ticks)),
            Span::raw(
                snap.latest()
                    .map(|s| format!("   risk: {:.1}", s.risk_score))
                    .unwrap_or_default(),
            ),
        ]),
        Line::from(format!("Last Updated: {}", now.format("%H:%M:%S"))),
    ])
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::TOP | Borders::BOTTOM | Borders::RIGHT).border_style(Style::default().fg(ACCENT)));

    f.render_widget(left, cols[0]);
    f.render_widget(right, cols[1]);
}

fn draw_tabs(f: &mut Frame, area: Rect, selected: Tab) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| format!("[{}] {}", i + 1, t.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)))
        .select(selected.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let p = Paragraph::new(vec![
        Line::from(COPYRIGHT),
        Line::from(FOOTER_STATS.join("   ")).style(Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    f.render_widget(p, area);
}

// ============================================================================
// Overview
// ============================================================================

fn draw_overview(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    let card_colors = [Color::Red, Color::Green, Color::Blue, Color::Magenta];
    for ((card, rect), color) in KEY_METRICS.iter().zip(cards.iter()).zip(card_colors) {
        draw_metric_card(f, *rect, card, color);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    draw_signal_chart(f, body[0], snap);
    draw_alert_stream(f, body[1], &snap.alerts);
}

fn draw_metric_card(f: &mut Frame, area: Rect, card: &catalog::MetricCard, color: Color) {
    let (arrow, change_color) = if card.change > 0.0 {
        ("↗", Color::Green)
    } else {
        ("↘", Color::Red)
    };
    let p = Paragraph::new(vec![
        Line::from(Span::styled(
            card.value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} {}%", arrow, card.change.abs()),
            Style::default().fg(change_color),
        )),
    ])
    .block(
        Block::default()
            .title(format!(" {} ", card.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(p, area);
}

fn draw_signal_chart(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let block = panel("Real-Time Risk Signals");
    if snap.telemetry.is_empty() {
        let p = Paragraph::new("Waiting for first sample...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let series = |pick: fn(&crate::telemetry::TelemetrySample) -> f64| -> Vec<(f64, f64)> {
        snap.telemetry
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, pick(s)))
            .collect()
    };
    let risk = series(|s| s.risk_score);
    let compliance = series(|s| s.compliance_health);
    let geo = series(|s| s.geopolitical_index);

    let datasets = vec![
        Dataset::default()
            .name("Risk Score")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&risk),
        Dataset::default()
            .name("Compliance Health")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&compliance),
        Dataset::default()
            .name("Geopolitical Index")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&geo),
    ];

    let first = snap.telemetry.first().map(|s| s.timestamp.clone()).unwrap_or_default();
    let last = snap.telemetry.last().map(|s| s.timestamp.clone()).unwrap_or_default();
    let x_max = (snap.telemetry.len().saturating_sub(1) as f64).max(1.0);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![Line::from(first), Line::from(last)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 100.0])
                .labels(vec![Line::from("0"), Line::from("50"), Line::from("100")]),
        );
    f.render_widget(chart, area);
}

pub fn alert_item(alert: &Alert) -> ListItem<'static> {
    let color = severity_color(alert.severity);
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("[{}] ", alert.severity.as_str().to_uppercase()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(alert.kind.as_str(), Style::default().fg(color)),
            Span::raw(format!("  {}", alert.region.as_str())),
        ]),
        Line::from(Span::raw(format!("  {}", alert.message))),
        Line::from(Span::styled(
            format!("  {}", alert.timestamp),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn draw_alert_stream(f: &mut Frame, area: Rect, alerts: &[Alert]) {
    let block = panel("Live Alert Stream");
    if alerts.is_empty() {
        let p = Paragraph::new(EMPTY_ALERTS)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(p, area);
        return;
    }
    let items: Vec<ListItem> = alerts.iter().map(alert_item).collect();
    f.render_widget(List::new(items).block(block), area);
}

// ============================================================================
// Cross-border
// ============================================================================

fn draw_cross_border(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let points: Vec<(f64, f64)> = COUNTRY_RISK
        .iter()
        .map(|c| (c.volume as f64, c.risk_score as f64))
        .collect();
    let chart = Chart::new(vec![Dataset::default()
        .name("Countries")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::LightMagenta))
        .data(&points)])
    .block(panel("Cross-Border Trade Risk Matrix"))
    .x_axis(
        Axis::default()
            .title("Volume")
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, 3500.0])
            .labels(vec![Line::from("0"), Line::from("1750"), Line::from("3500")]),
    )
    .y_axis(
        Axis::default()
            .title("Risk Score")
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, 100.0])
            .labels(vec![Line::from("0"), Line::from("50"), Line::from("100")]),
    );
    f.render_widget(chart, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let header = Row::new(vec!["#", "Country", "Volume", "Compliance", "Risk"])
        .style(heading())
        .bottom_margin(1);
    let ranking: Vec<Row> = COUNTRY_RISK
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(c.country),
                Cell::from(format!("${}M", c.volume)),
                Cell::from(format!("{}%", c.compliance)),
                Cell::from(format!("Risk: {}", c.risk_score)).style(Style::default().fg(band_color(c.band()))),
            ])
        })
        .collect();
    let table = Table::new(
        ranking,
        [
            Constraint::Length(3),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(panel("Country Risk Ranking"));
    f.render_widget(table, cols[0]);

    let palette = [Color::Blue, Color::Cyan, Color::Yellow, Color::LightRed, Color::Magenta];
    let bars: Vec<Bar> = catalog::volume_shares()
        .into_iter()
        .zip(COUNTRY_RISK.iter())
        .enumerate()
        .map(|(i, ((country, share), c))| {
            Bar::default()
                .label(Line::from(country))
                .value(c.volume as u64)
                .text_value(format!("{:.1}%", share))
                .style(Style::default().fg(palette[i % palette.len()]))
        })
        .collect();
    let chart = BarChart::default()
        .block(panel("Trade Volume Distribution"))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, cols[1]);
}

// ============================================================================
// Platform integrity
// ============================================================================

fn draw_integrity(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let latency: Vec<(f64, f64)> = PLATFORM_METRICS
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.api_latency as f64))
        .collect();
    let throughput: Vec<(f64, f64)> = PLATFORM_METRICS
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.throughput as f64))
        .collect();
    let time_labels: Vec<Line> = PLATFORM_METRICS.iter().step_by(2).map(|m| Line::from(m.time)).collect();
    let x_max = (PLATFORM_METRICS.len() - 1) as f64;

    let latency_chart = Chart::new(vec![Dataset::default()
        .name("API Latency (ms)")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightBlue))
        .data(&latency)])
    .block(panel("Platform Health Monitoring"))
    .x_axis(Axis::default().bounds([0.0, x_max]).labels(time_labels.clone()))
    .y_axis(
        Axis::default()
            .bounds([0.0, 80.0])
            .labels(vec![Line::from("0"), Line::from("40"), Line::from("80")]),
    );
    f.render_widget(latency_chart, top[0]);

    let throughput_chart = Chart::new(vec![Dataset::default()
        .name("Throughput (req/s)")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightGreen))
        .data(&throughput)])
    .block(panel("Throughput"))
    .x_axis(Axis::default().bounds([0.0, x_max]).labels(time_labels))
    .y_axis(
        Axis::default()
            .bounds([0.0, 3500.0])
            .labels(vec![Line::from("0"), Line::from("1750"), Line::from("3500")]),
    );
    f.render_widget(throughput_chart, top[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);

    let status: Vec<ListItem> = SYSTEM_STATUS
        .iter()
        .map(|(name, health)| {
            let color = match health {
                ServiceHealth::Degraded => Color::Yellow,
                ServiceHealth::Healthy | ServiceHealth::Optimal => Color::Green,
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<18}", name)),
                Span::styled(health.as_str(), Style::default().fg(color)),
            ]))
        })
        .collect();
    f.render_widget(List::new(status).block(panel("System Status")), bottom[0]);

    draw_security_metrics(f, bottom[1]);

    let kpis: Vec<Line> = PERFORMANCE_KPIS
        .iter()
        .zip([Color::Green, Color::Blue, Color::Magenta])
        .flat_map(|((value, label), color)| {
            [
                Line::from(Span::styled(*value, Style::default().fg(color).add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(*label, Style::default().fg(Color::Gray))),
            ]
        })
        .collect();
    let p = Paragraph::new(kpis)
        .alignment(Alignment::Center)
        .block(panel("Performance KPIs"));
    f.render_widget(p, bottom[2]);
}

fn draw_security_metrics(f: &mut Frame, area: Rect) {
    let block = panel("Security Metrics");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 3])
        .split(inner);
    let colors = [Color::Green, Color::Blue, Color::Magenta];
    for ((metric, slot), color) in SECURITY_METRICS.iter().zip(slots.iter()).zip(colors) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(*slot);
        let label = Paragraph::new(Line::from(vec![
            Span::raw(format!("{:<22}", metric.name)),
            Span::styled(metric.value, Style::default().fg(Color::White)),
        ]));
        f.render_widget(label, parts[0]);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
            .ratio((metric.fill / 100.0).clamp(0.0, 1.0))
            .label("");
        f.render_widget(gauge, parts[1]);
    }
}

// ============================================================================
// Regulatory
// ============================================================================

fn line_series<'a>(name: &'static str, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn draw_regulatory(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let series = |pick: fn(&catalog::RegulatoryPoint) -> u32| -> Vec<(f64, f64)> {
        REGULATORY_TIMELINE
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, pick(p) as f64))
            .collect()
    };
    let mifid = series(|p| p.mifid);
    let basel = series(|p| p.basel);
    let gdpr = series(|p| p.gdpr);
    let pci = series(|p| p.pci);

    let first = REGULATORY_TIMELINE.first().map(|p| p.date).unwrap_or_default();
    let last = REGULATORY_TIMELINE.last().map(|p| p.date).unwrap_or_default();
    let chart = Chart::new(vec![
        line_series("MiFID II Compliance", Color::LightBlue, &mifid),
        line_series("Basel III", Color::LightGreen, &basel),
        line_series("GDPR", Color::Yellow, &gdpr),
        line_series("PCI DSS", Color::LightRed, &pci),
    ])
    .block(panel("Regulatory Compliance Timeline"))
    .x_axis(
        Axis::default()
            .bounds([0.0, (REGULATORY_TIMELINE.len() - 1) as f64])
            .labels(vec![Line::from(first), Line::from(last)]),
    )
    .y_axis(
        Axis::default()
            .bounds([80.0, 100.0])
            .labels(vec![Line::from("80"), Line::from("90"), Line::from("100")]),
    );
    f.render_widget(chart, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let header = Row::new(vec!["Event", "Region", "Impact", "Probability"])
        .style(heading())
        .bottom_margin(1);
    let events: Vec<Row> = GEOPOLITICAL_EVENTS
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.event),
                Cell::from(e.region),
                Cell::from(format!("{}%", e.impact)).style(Style::default().fg(band_color(e.band()))),
                Cell::from(format!("{}%", e.probability)),
            ])
        })
        .collect();
    let table = Table::new(
        events,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(panel("Geopolitical Risk Events"));
    f.render_widget(table, cols[0]);

    let mut chart = BarChart::default()
        .block(panel("Compliance Score by Framework"))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .max(100);
    for fw in FRAMEWORK_SCORES.iter() {
        let bars = [
            Bar::default()
                .value(fw.score)
                .style(Style::default().fg(Color::LightBlue)),
            Bar::default()
                .value(fw.target)
                .style(Style::default().fg(Color::LightGreen)),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(fw.framework)).bars(&bars));
    }
    f.render_widget(chart, cols[1]);
}

// ============================================================================
// AI insights
// ============================================================================

fn insight_color(kind: InsightKind) -> Color {
    match kind {
        InsightKind::Predictive => Color::Blue,
        InsightKind::Anomaly => Color::Red,
        InsightKind::Optimization => Color::Green,
        InsightKind::Risk => Color::Yellow,
    }
}

fn draw_ai_insights(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(6), Constraint::Length(5)])
        .split(area);

    let grid = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let mut cells = Vec::with_capacity(4);
    for row in grid.iter() {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        cells.extend(halves.iter().copied());
    }
    for (insight, cell) in AI_INSIGHTS.iter().zip(cells) {
        draw_insight_card(f, cell, insight);
    }

    let perf = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for (((value, label, note), rect), color) in MODEL_PERFORMANCE
        .iter()
        .zip(perf.iter())
        .zip([Color::Green, Color::Blue, Color::Magenta])
    {
        let p = Paragraph::new(vec![
            Line::from(Span::styled(*value, Style::default().fg(color).add_modifier(Modifier::BOLD))),
            Line::from(*label),
            Line::from(Span::styled(*note, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(panel("ML Model Performance"));
        f.render_widget(p, *rect);
    }

    let arch = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[2]);
    for ((stage, technique), rect) in MODEL_ARCHITECTURE.iter().zip(arch.iter()) {
        let p = Paragraph::new(vec![
            Line::from(Span::styled(*stage, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(*technique, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .block(panel("AI Model Architecture"));
        f.render_widget(p, *rect);
    }
}

fn draw_insight_card(f: &mut Frame, area: Rect, insight: &catalog::AiInsight) {
    let color = insight_color(insight.kind);
    let block = Block::default()
        .title(format!(" {} Analysis ", insight.kind.as_str()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Confidence: "),
            Span::styled(format!("{}%", insight.confidence), Style::default().fg(Color::LightBlue)),
            Span::raw("  Timeframe: "),
            Span::styled(insight.timeframe, Style::default().fg(Color::LightMagenta)),
        ]),
        Line::from(insight.insight),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(text, parts[0]);

    let bar_color = match insight.band() {
        ConfidenceBand::Strong => Color::Green,
        ConfidenceBand::Moderate => Color::Yellow,
        ConfidenceBand::Weak => Color::Red,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(bar_color).bg(Color::DarkGray))
        .percent(insight.confidence.min(100) as u16);
    f.render_widget(gauge, parts[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertType, Region, ALERT_MESSAGE};
    use crate::telemetry::TelemetrySample;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buf: &Buffer) -> String {
        let width = buf.area.width as usize;
        buf.content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(tab: Tab, snap: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(200, 60)).unwrap();
        let app = App { tab, should_quit: false };
        let now = Local.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();
        terminal.draw(|f| draw(f, &app, snap, now)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn busy_snapshot() -> Snapshot {
        let telemetry = (0..5)
            .map(|i| TelemetrySample {
                timestamp: format!("09:29:5{}", i),
                risk_score: 40.0 + i as f64,
                volume_anomaly: 50.0,
                compliance_health: 90.0,
                geopolitical_index: 45.0,
            })
            .collect();
        let alerts = vec![Alert {
            id: 2,
            kind: AlertType::HighRiskTransaction,
            severity: Severity::Critical,
            region: Region::Apac,
            message: ALERT_MESSAGE.to_string(),
            timestamp: "2025-07-01 09:29:54".to_string(),
        }];
        Snapshot {
            ticks: 5,
            telemetry,
            alerts,
        }
    }

    #[test]
    fn test_header_and_footer_on_every_tab() {
        for tab in Tab::ALL {
            let text = render(tab, &Snapshot::default());
            assert!(text.contains(TITLE), "{:?}", tab);
            assert!(text.contains("Last Updated: 09:30:00"));
            assert!(text.contains("Coverage: 195 Countries"));
            assert!(text.contains(tab.label()));
        }
    }

    #[test]
    fn test_overview_empty_state() {
        let text = render(Tab::Overview, &Snapshot::default());
        assert!(text.contains("Monitoring for alerts"));
        assert!(text.contains("Global Risk Score"));
        assert!(text.contains("Waiting for first sample"));
    }

    #[test]
    fn test_overview_with_alerts() {
        let text = render(Tab::Overview, &busy_snapshot());
        assert!(text.contains("[CRITICAL]"));
        assert!(text.contains("High Risk Transaction"));
        assert!(text.contains("APAC"));
        assert!(text.contains("ticks: 5"));
        assert!(text.contains("risk: 44.0"));
        assert!(!text.contains("Monitoring for alerts"));
        assert!(text.contains("Real-Time Risk Signals"));
    }

    #[test]
    fn test_cross_border_lists_countries() {
        let text = render(Tab::CrossBorder, &Snapshot::default());
        for c in COUNTRY_RISK.iter() {
            assert!(text.contains(c.country), "missing {}", c.country);
        }
        assert!(text.contains("Risk: 85"));
        assert!(text.contains("Trade Volume Distribution"));
    }

    #[test]
    fn test_integrity_panels() {
        let text = render(Tab::Integrity, &Snapshot::default());
        assert!(text.contains("System Status"));
        assert!(text.contains("Degraded"));
        assert!(text.contains("AES-256"));
        assert!(text.contains("Req/sec Peak"));
    }

    #[test]
    fn test_regulatory_panels() {
        let text = render(Tab::Regulatory, &Snapshot::default());
        assert!(text.contains("Regulatory Compliance Timeline"));
        assert!(text.contains("Sanctions Updated"));
        assert!(text.contains("Compliance Score by Framework"));
    }

    #[test]
    fn test_ai_insight_cards() {
        let text = render(Tab::AiInsights, &Snapshot::default());
        assert!(text.contains("Predictive Analysis"));
        assert!(text.contains("Confidence: 74%"));
        assert!(text.contains("Risk Prediction Accuracy"));
        assert!(text.contains("Alert Generation"));
    }

    #[test]
    fn test_severity_colors_distinct() {
        let colors: Vec<Color> = Severity::ALL.iter().map(|s| severity_color(*s)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
