//! User Interface module for folio.
//!
//! Contains the terminal front end: application state and rendering, event
//! polling, terminal setup and teardown, logging, and the navigation menu.
mod app;
mod event;
mod guard;
pub mod logging;
mod nav_panel;
mod palette;
mod presenter;

pub use app::{App, AppMode};
pub use event::{Event, EventHandler};
pub use guard::{TerminalGuard, init_panic_hook, init_tui};
pub use nav_panel::{NavEntry, NavPanel};
pub use palette::Palette;
pub use presenter::Presenter;
