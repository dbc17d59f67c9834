pub mod state;
pub mod todo_form;
pub mod todo_row;


pub use state::{AppSignal, AppState, Focus};
pub use todo_form::{SubmitEvent, TodoForm};
pub use todo_row::{RowButton, RowCallbacks, TodoRow};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// What a component did with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    /// Handled, nothing changed on screen.
    Consumed,
    /// Handled and the screen needs a redraw.
    ConsumedRender,
    /// Not handled; the owner decides.
    Propagate,
}

/// Holds the terminal in raw mode on the alternate screen. Dropping it
/// restores the terminal, including while unwinding from a panic.
struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            out,
            raw_mode: true,
        };
        execute!(guard.out, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                log::error!("Failed to disable raw mode: {e}");
            }
        }
        if let Err(e) = execute!(self.out, Show, LeaveAlternateScreen) {
            log::error!("Failed to leave alternate screen: {e}");
        }
        let _ = self.out.flush();
    }
}

pub fn run_tui(mut state: AppState) -> Result<()> {
    let mut terminal = TerminalGuard::enter(io::stdout())?;
    let result = run_app(&mut terminal.out, &mut state);
    drop(terminal);

    log::info!("TUI closed: {state}");
    result
}

fn run_app<W: Write>(out: &mut W, state: &mut AppState) -> Result<()> {
    let (width, height) = terminal::size()?;
    state.render(out, width, height)?;

    while !state.should_quit {
        match event::read()? {
            Event::Key(key) => {
                if state.handle_key(key) == EventPropagation::ConsumedRender {
                    let (width, height) = terminal::size()?;
                    state.render(out, width, height)?;
                }
            }
            Event::Resize(width, height) => state.render(out, width, height)?,
            _ => {}
        }
    }

    Ok(())
}
