//! Terminal lifecycle for the interactive UI: raw mode, the alternate
//! screen, and the poll/draw loop.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::Result;
use crate::service::TaskService;
use crate::storage::TaskStorage;

use super::controller::{KeyOutcome, UiController};
use super::view;

const EVENT_POLL_MS: u64 = 120;

/// Run the interactive UI against `service` until the user quits.
pub fn run<S: TaskStorage>(service: &mut TaskService<S>) -> Result<()> {
    let mut ui = UiController::new(service);
    run_terminal(service, &mut ui)
}

fn run_terminal<S: TaskStorage>(
    service: &mut TaskService<S>,
    ui: &mut UiController,
) -> Result<()> {
    let mut terminal = setup_terminal()?;

    let result = run_loop(&mut terminal, service, ui);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    unwind_on_error(enter_alternate_screen())
}

fn enter_alternate_screen() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restore the terminal if setup failed after raw mode was enabled.
fn unwind_on_error<T>(result: io::Result<T>) -> Result<T> {
    result.map_err(|err| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        err.into()
    })
}

fn run_loop<S: TaskStorage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: &mut TaskService<S>,
    ui: &mut UiController,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, ui))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if ui.handle_key(service, key) == KeyOutcome::Quit {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}
