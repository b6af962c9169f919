//! Navigation menu
//!
//! The collapsible menu listing the page's sections: every category the
//! catalog names, plus the newsletter and contact forms when the page has
//! them.
//!
//! Tracks the currently selected entry.
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use textwrap::wrap;

use super::palette::Palette;
use crate::surface::Controls;

/// Marker drawn in front of the selected entry.
const NAV_HIGHLIGHT_SYMBOL: &str = "> ";

/// A destination in the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEntry
{
    /// Every card
    AllPosts,
    /// A category card
    Category(String),
    /// The newsletter signup form
    Newsletter,
    /// The contact form
    Contact,
}

impl NavEntry
{
    /// Text shown in the menu.
    #[must_use]
    pub fn label(&self) -> String
    {
        match self
        {
            Self::AllPosts => String::from("All posts"),
            Self::Category(name) => capitalize(name),
            Self::Newsletter => String::from("Newsletter"),
            Self::Contact => String::from("Contact"),
        }
    }
}

/// Panel that displays and manages the navigation menu.
#[derive(Debug, Default)]
pub struct NavPanel
{
    /// Menu entries in display order
    entries: Vec<NavEntry>,
    /// Current selection state
    state: ListState,
}

impl NavPanel
{
    /// Creates the menu for a page's categories and controls.
    ///
    /// Every category the catalog names gets an entry, whether it came from
    /// category cards or from the cards themselves; form entries appear only
    /// when the page has the form.
    ///
    /// # Arguments
    ///
    /// * `categories` - Category names offered by the catalog
    /// * `controls` - Controls present on the page
    #[must_use]
    pub fn new(categories: &[String], controls: Controls) -> Self
    {
        let mut entries = vec![NavEntry::AllPosts];

        entries.extend(
            categories
                .iter()
                .map(|name| NavEntry::Category(name.clone())),
        );

        if controls.contains(Controls::NEWSLETTER)
        {
            entries.push(NavEntry::Newsletter);
        }

        if controls.contains(Controls::CONTACT)
        {
            entries.push(NavEntry::Contact);
        }

        let mut state = ListState::default();
        state.select(Some(0));

        Self { entries, state }
    }

    /// Returns the menu entries.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry]
    {
        &self.entries
    }

    /// Renders the menu to the specified area.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area within the frame to render the panel
    /// * `palette` - Colours of the active theme
    pub fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette)
    {
        // 2 for the border
        let wrap_width = (area.width as usize).saturating_sub(NAV_HIGHLIGHT_SYMBOL.len() + 2);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let label = entry.label();
                let wrapped = wrap(&label, wrap_width.max(1))
                    .into_iter()
                    .map(|line| Line::raw(line.into_owned()))
                    .collect::<Vec<Line>>();

                ListItem::new(wrapped)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(palette.muted)
                    .title("Menu")
                    .title_alignment(Alignment::Left)
                    .title_style(palette.base.add_modifier(Modifier::BOLD)),
            )
            .style(palette.base)
            .highlight_style(Style::new().patch(palette.accent).add_modifier(Modifier::BOLD))
            .highlight_symbol(NAV_HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(list, area, &mut self.state);
    }

    /// Moves the selection to the next entry, stopping at the last one.
    pub fn next(&mut self)
    {
        if let Some(index) = self.state.selected()
        {
            let last = self.entries.len().saturating_sub(1);
            self.state.select(Some(index.saturating_add(1).min(last)));
        }
    }

    /// Moves the selection to the previous entry.
    pub fn previous(&mut self)
    {
        if let Some(index) = self.state.selected()
        {
            self.state.select(Some(index.saturating_sub(1)));
        }
    }

    /// Returns the selected entry.
    #[must_use]
    pub fn selected(&self) -> Option<&NavEntry>
    {
        self.state
            .selected()
            .and_then(|index| self.entries.get(index))
    }
}

/// Upper-cases the first letter of a category name.
fn capitalize(name: &str) -> String
{
    let mut chars = name.chars();

    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars)
            .collect()
    })
}
