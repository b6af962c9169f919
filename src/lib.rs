//! folio Library
//!
//! A terminal browser for blog and catalog card listings: search over the
//! cards, category filtering and pagination, with a persisted light/dark
//! theme.
//!
//! # Modules
//!
//! - `card`: card records and date parsing
//! - `source`: the card source the controller reads from and writes effects to
//! - `catalog`: loading cards and controls from TOML or an HTML listing page
//! - `view`: pure derivation of the visible set, ordering and page window
//! - `controller`: the view controller, sole owner of the view state
//! - `effects`: presentation effects and scroll tracking
//! - `theme`: the persisted theme preference
//! - `forms`: newsletter and contact form stubs
//! - `surface`: which controls a page offers
//! - `ui`: terminal user interface components and event handling
pub mod card;
pub mod catalog;
pub mod controller;
pub mod effects;
pub mod forms;
pub mod source;
pub mod surface;
pub mod theme;
pub mod ui;
pub mod view;

pub use card::{Card, CardId};
pub use catalog::Catalog;
pub use controller::{FilterBar, Listing, ListingMode, ViewController};
pub use source::{CardDeck, CardSource};
pub use theme::{Theme, ThemeStore};
pub use ui::logging;
pub use ui::{App, AppMode, Event, EventHandler};
pub use ui::{TerminalGuard, init_panic_hook, init_tui};
pub use view::{Filter, ViewState};
