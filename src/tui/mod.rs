//! # TUI Adapter
//!
//! The ratatui-specific layer behind `operadoras browse`. Handles terminal
//! I/O, renders the listing, and translates keyboard events into
//! `core::Action` values for the `Store`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Keys
//!
//! ```text
//! Browse mode                          Search mode
//!   → / PgDn / n   next page             type      edit the term
//!   ← / PgUp / p   previous page         Enter     search from page 1
//!   ↑ / ↓          move selection        Esc       cancel
//!   / or s         search
//!   r              retry current page
//!   q / Esc        quit                Ctrl+C quits from either mode
//! ```
//!
//! ## Redraw Strategy
//!
//! While a fetch is in flight the loop redraws every ~80ms to animate the
//! spinner. Otherwise it sleeps up to 500ms and only redraws on input or
//! when a completion lands.

mod event;
mod ui;

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use log::{debug, info};
use ratatui::widgets::TableState;

use crate::core::{Action, State, Store};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Page through the listing.
    Browse,
    /// Editing the search term.
    Search,
}

/// TUI-specific presentation state (not part of the store)
pub struct TuiState {
    pub input_mode: InputMode,
    pub search_input: String,
    pub table: TableState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::Browse,
            search_input: String::new(),
            table: TableState::default().with_selected(Some(0)),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the event loop should do after one input event.
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    None,
    Quit,
    Dispatch(Action),
}

/// Maps one event to an outcome, updating presentation state on the way.
/// Store state is read-only here; changes go out as `Outcome::Dispatch`.
fn handle_event(tui: &mut TuiState, state: &State, event: TuiEvent) -> Outcome {
    if event == TuiEvent::ForceQuit {
        return Outcome::Quit;
    }

    match tui.input_mode {
        InputMode::Browse => match event {
            TuiEvent::InputChar('q') | TuiEvent::Escape => Outcome::Quit,
            TuiEvent::InputChar('n') | TuiEvent::PageNext => {
                tui.table.select(Some(0));
                Outcome::Dispatch(Action::NextPage)
            }
            TuiEvent::InputChar('p') | TuiEvent::PagePrev => {
                tui.table.select(Some(0));
                Outcome::Dispatch(Action::PrevPage)
            }
            TuiEvent::InputChar('r') if !state.loading => Outcome::Dispatch(Action::Retry),
            TuiEvent::InputChar('/') | TuiEvent::InputChar('s') => {
                tui.input_mode = InputMode::Search;
                tui.search_input = state.search_query.clone();
                Outcome::None
            }
            TuiEvent::CursorUp => {
                tui.table.select_previous();
                Outcome::None
            }
            TuiEvent::CursorDown => {
                let last = state.operadoras.len().saturating_sub(1);
                let next = tui.table.selected().map_or(0, |i| (i + 1).min(last));
                tui.table.select(Some(next));
                Outcome::None
            }
            _ => Outcome::None,
        },
        InputMode::Search => match event {
            TuiEvent::InputChar(c) => {
                tui.search_input.push(c);
                Outcome::None
            }
            TuiEvent::Backspace => {
                tui.search_input.pop();
                Outcome::None
            }
            TuiEvent::Submit => {
                tui.input_mode = InputMode::Browse;
                tui.table.select(Some(0));
                let search = std::mem::take(&mut tui.search_input).trim().to_string();
                Outcome::Dispatch(Action::FetchOperadoras { page: 1, search })
            }
            TuiEvent::Escape => {
                tui.input_mode = InputMode::Browse;
                tui.search_input.clear();
                Outcome::None
            }
            _ => Outcome::None,
        },
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Runs the interactive listing until the user quits. The caller kicks off
/// the first fetch; completions are applied as they arrive.
///
/// Input polling blocks this thread, so requests need a multi-threaded
/// runtime to make progress.
pub fn run(store: &mut Store) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| event_loop(&mut terminal, store));
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, store: &mut Store) -> io::Result<()> {
    info!("Browse TUI started");
    let mut tui = TuiState::new();
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = store.state().loading || store.state().estatisticas_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, store.state(), &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };

        // Process first event + drain ALL pending events before next draw
        let mut next = poll_event_timeout(timeout)?;
        while let Some(event) = next {
            needs_redraw = true;
            match handle_event(&mut tui, store.state(), event) {
                Outcome::Quit => {
                    info!("Browse TUI closed");
                    return Ok(());
                }
                Outcome::Dispatch(action) => store.dispatch(action),
                Outcome::None => {}
            }
            next = poll_event_immediate()?;
        }

        let applied = store.drain_completions();
        if applied > 0 {
            debug!("Applied {applied} completion(s)");
            needs_redraw = true;
        }
    }
}
