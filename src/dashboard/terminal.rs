use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode + alternate screen, restored on drop.
pub struct TerminalGuard {
    terminal: TuiTerminal,
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let setup = || -> Result<TuiTerminal> {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, Hide)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        };
        match setup() {
            Ok(terminal) => Ok(Self {
                terminal,
                active: true,
            }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
                let _ = disable_raw_mode();
                Err(e.context("creating terminal"))
            }
        }
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).context("drawing frame")?;
        Ok(())
    }

    /// Leaves the alternate screen. Safe to call more than once.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let raw = disable_raw_mode().context("disabling raw mode");
        let screen = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
            .context("leaving alternate screen");
        first_error([raw, screen])
    }
}

/// Every step has already run; keep the earliest failure.
fn first_error<I>(results: I) -> Result<()>
where
    I: IntoIterator<Item = Result<()>>,
{
    results.into_iter().fold(Ok(()), |acc, r| acc.and(r))
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            eprintln!("[ui] failed to restore terminal: {}", e);
        }
    }
}
