//! Provides a RAII guard for safe terminal lifecycle management.
//!
//! Creating the guard puts the terminal into raw mode on the alternate
//! screen with mouse capture (for wheel scrolling); dropping it, on normal
//! exit or during a panic unwind, puts everything back.
use std::io::{Result as IoResult, Stdout, stdout};
use std::panic::{set_hook, take_hook};

use crossterm::ExecutableCommand;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use log::error;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// RAII wrapper for terminal state.
pub struct TerminalGuard;

impl TerminalGuard
{
    /// Creates a `TerminalGuard` for TUI setup.
    ///
    /// Enters raw mode, switches to the alternate screen buffer and captures
    /// the mouse.
    ///
    /// # Errors
    ///
    /// On failure to enter raw mode, switch screens or capture the mouse.
    pub fn new() -> IoResult<Self>
    {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard
{
    /// Restores the terminal state.
    fn drop(&mut self)
    {
        restore_terminal();
    }
}

/// Undoes everything [`TerminalGuard::new`] set up, logging failures.
fn restore_terminal()
{
    // Terminal will be borked when failure, at least leave a trace
    if let Err(err) = stdout().execute(DisableMouseCapture)
    {
        error!("Failed to release the mouse: {err}");
    }

    if let Err(err) = disable_raw_mode()
    {
        error!("Failed to disable raw mode: {err}");
    }

    if let Err(err) = stdout().execute(LeaveAlternateScreen)
    {
        error!("Failed to leave alternate screen: {err}");
    }
}

/// Initialize the terminal
///
/// # Errors
///
/// Returns an error if the terminal size cannot be queried.
pub fn init_tui() -> IoResult<Terminal<CrosstermBackend<Stdout>>>
{
    // Terminal modes are handled by TerminalGuard
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Installs a panic hook that restores the terminal before the default
/// hook prints the panic message.
pub fn init_panic_hook()
{
    let original_hook = take_hook();
    set_hook(Box::new(move |panic_info| {
        restore_terminal();

        error!("Application panicked: {panic_info}");

        original_hook(panic_info);
    }));
}
