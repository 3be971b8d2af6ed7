//! Terminal dashboard.
//!
//! Navigation state lives in [`App`]; everything drawn is a function of the
//! app, the latest simulation [`Snapshot`] and the static catalog.

pub mod render;
pub mod terminal;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;

use crate::logging::{self, ProfileScope};
use crate::simulation::{LiveFeed, Snapshot};
use crate::source::RngSource;
use crate::state::Config;
use terminal::TerminalGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    CrossBorder,
    Integrity,
    Regulatory,
    AiInsights,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::CrossBorder,
        Tab::Integrity,
        Tab::Regulatory,
        Tab::AiInsights,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::CrossBorder => "cross-border",
            Tab::Integrity => "integrity",
            Tab::Regulatory => "regulatory",
            Tab::AiInsights => "ai-insights",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Risk Overview",
            Tab::CrossBorder => "Cross-Border Signals",
            Tab::Integrity => "Platform Integrity",
            Tab::Regulatory => "Regulatory Intelligence",
            Tab::AiInsights => "AI Insights",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct App {
    pub tab: Tab,
    pub should_quit: bool,
}

impl App {
    /// Applies a key press. Returns true if the selected tab changed.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let before = self.tab;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::from_index(c as usize - '1' as usize) {
                    self.tab = tab;
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.tab = self.tab.previous(),
            _ => {}
        }
        self.tab != before
    }
}

/// Runs the interactive dashboard until the user quits. The simulation
/// starts with the view and is stopped before the terminal is restored.
pub async fn run(cfg: &Config) -> Result<Snapshot> {
    let mut term = TerminalGuard::enter().context("entering terminal UI")?;
    let feed = LiveFeed::from_config(cfg, RngSource::from_seed_opt(cfg.seed), None);
    let mut updates = feed.subscribe();
    let mut events = EventStream::new();
    let mut redraw = tokio::time::interval(cfg.redraw_interval());
    let mut app = App::default();
    let mut feed_open = true;

    loop {
        let snap = updates.borrow().clone();
        {
            let _scope = ProfileScope::new("draw");
            term.draw(|f| render::draw(f, &app, &snap, Local::now()))?;
        }

        tokio::select! {
            _ = redraw.tick() => {}
            changed = updates.changed(), if feed_open => {
                if changed.is_err() {
                    feed_open = false;
                }
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    if app.on_key(key) {
                        logging::log_tab(app.tab.id());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("reading terminal events"),
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    let last = feed.stop().await?;
    term.restore()?;
    Ok(last)
}
