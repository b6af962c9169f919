//! Application module for folio.
//!
//! Holds the UI state around the [`ViewController`]: input modes, the
//! navigation menu, forms, theme and scroll position. Every listing change
//! goes through the controller; this module only forwards input to it and
//! draws the result.
use log::{debug, error};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use textwrap::wrap;

use super::nav_panel::{NavEntry, NavPanel};
use super::palette::Palette;
use super::presenter::Presenter;
use crate::catalog::Catalog;
use crate::controller::{FilterBar, ListingMode, ViewController};
use crate::effects::ScrollTracker;
use crate::forms::{ContactField, ContactForm, NewsletterForm, Submission};
use crate::source::CardDeck;
use crate::surface::Controls;
use crate::theme::{Theme, ThemeStore};
use crate::view::{PageItem, Pager};

/// Listing rows scrolled before back-to-top is offered.
const BACK_TO_TOP_ROWS: usize = 15;

/// Application mode that determines the current UI state.
///
/// Controls what is displayed and how user input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode
{
    /// Browsing the listing - default state
    Normal,
    /// Help overlay is displayed
    Help,
    /// Typing a search term
    Search,
    /// Typing a page number to jump to
    GoTo,
    /// Navigation menu has focus
    Menu,
    /// Newsletter form is open
    Newsletter,
    /// Contact form is open
    Contact,
}

/// Main application state.
pub struct App
{
    /// Filtering, search and paging over the catalog's cards
    pub controller: ViewController<CardDeck, Presenter>,
    /// Catalog name shown in the header
    pub title: String,
    /// Controls the page offers
    pub controls: Controls,
    /// Active colour theme
    pub theme: Theme,
    /// Where the theme is persisted
    theme_store: ThemeStore,
    /// Current application mode
    pub mode: AppMode,
    /// Search input text
    pub search_text: String,
    /// Page number being typed in go-to mode
    pub goto_text: String,
    /// Navigation menu
    pub nav_panel: NavPanel,
    /// Whether the navigation menu is open
    pub show_menu: bool,
    /// Newsletter signup form
    pub newsletter: NewsletterForm,
    /// Contact form
    pub contact: ContactForm,
    /// Last acknowledgement or notice
    pub status: Option<String>,
    /// Listing scroll position, in rows
    pub scroll: usize,
    /// Header and back-to-top tracking
    pub tracker: ScrollTracker,
    /// Flag indicating if the application should exit
    pub should_quit: bool,
}

impl App
{
    /// Creates the application for a loaded catalog.
    ///
    /// The stored theme is applied immediately and the controller performs
    /// its initial load, so the first frame is already sorted and paged.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The cards and controls of the page
    /// * `theme_store` - Where the theme preference lives
    #[must_use]
    pub fn new(catalog: Catalog, theme_store: ThemeStore) -> Self
    {
        let theme = theme_store.get();
        let nav_panel = NavPanel::new(&catalog.categories, catalog.controls);
        let controller = ViewController::new(
            CardDeck::new(catalog.cards),
            FilterBar::new(catalog.filters),
            Presenter::default(),
        );

        debug!("Starting with the {theme} theme");

        Self {
            controller,
            title: catalog.title,
            controls: catalog.controls,
            theme,
            theme_store,
            mode: AppMode::Normal,
            search_text: String::new(),
            goto_text: String::new(),
            nav_panel,
            show_menu: false,
            newsletter: NewsletterForm::default(),
            contact: ContactForm::default(),
            status: None,
            scroll: 0,
            tracker: ScrollTracker::with_threshold(BACK_TO_TOP_ROWS),
            should_quit: false,
        }
    }

    /// Whether the page offers `control`; logs when it does not.
    fn offers(&self, control: Controls) -> bool
    {
        let present = self.controls.contains(control);

        if !present
        {
            debug!("Ignoring input for absent control {control:?}");
        }

        present
    }

    /// Renders the application UI to the provided frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the UI to
    pub fn render(&mut self, frame: &mut Frame)
    {
        let palette = Palette::for_theme(self.theme);
        let area = frame.area();

        frame.render_widget(Block::default().style(palette.base), area);

        let (menu_area, main_area) = if self.show_menu
        {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
                .split(area);
            (Some(chunks[0]), chunks[1])
        }
        else
        {
            (None, area)
        };

        if let Some(menu_area) = menu_area
        {
            self.nav_panel.render(frame, menu_area, &palette);
        }

        let listing = self.controller.listing();
        let pager = listing.pager().filter(|pager| !pager.is_hidden());

        let header_height = if self.tracker.header().is_shown() { 3 } else { 0 };
        let pager_height = u16::from(pager.is_some());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(3),
                Constraint::Length(pager_height),
                Constraint::Length(1),
            ])
            .split(main_area);

        if header_height > 0
        {
            self.render_header(frame, rows[0], &palette);
        }

        self.render_listing(frame, rows[1], &palette);

        if let Some(pager) = pager
        {
            frame.render_widget(pager_line(pager, &palette), rows[2]);
        }

        self.render_status(frame, rows[3], &palette);

        match self.mode
        {
            AppMode::Help => Self::render_help(frame, &palette),
            AppMode::Search => render_prompt(frame, "Search", &format!("/{}", self.search_text), &palette),
            AppMode::GoTo => render_prompt(frame, "Go to page", &format!(":{}", self.goto_text), &palette),
            AppMode::Newsletter => self.render_newsletter(frame, &palette),
            AppMode::Contact => self.render_contact(frame, &palette),
            AppMode::Normal | AppMode::Menu =>
            {}
        }
    }

    /// Renders the title, theme marker and filter buttons.
    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette)
    {
        let marker = match self.theme
        {
            Theme::Light => "☀ light",
            Theme::Dark => "☾ dark",
        };

        let mut title_line = vec![Span::styled(self.title.clone(), palette.accent)];
        if self.controls.contains(Controls::THEME_TOGGLE)
        {
            title_line.push(Span::styled(format!("  {marker}"), palette.muted));
        }

        let mut lines = vec![Line::from(title_line)];

        if self.controls.contains(Controls::FILTERS)
        {
            let filters = self.controller.filters();
            let buttons: Vec<Span> = filters
                .values()
                .iter()
                .enumerate()
                .flat_map(|(index, value)| {
                    let style = if filters.active() == Some(index)
                    {
                        palette.accent.add_modifier(Modifier::REVERSED)
                    }
                    else
                    {
                        palette.base
                    };
                    [Span::styled(format!(" {value} "), style), Span::raw(" ")]
                })
                .collect();
            lines.push(Line::from(buttons));
        }

        let header = Paragraph::new(lines)
            .style(palette.base)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(palette.muted),
            );

        frame.render_widget(header, area);
    }

    /// Renders the cards of the listing, or the no-results placeholder.
    fn render_listing(&self, frame: &mut Frame, area: Rect, palette: &Palette)
    {
        let listing = self.controller.listing();

        let title = match &listing.mode
        {
            ListingMode::Paged(pager) if pager.is_hidden() => String::from("No posts"),
            ListingMode::Paged(pager) =>
            {
                format!("Page {} of {} - Press ? for help", pager.current_page, pager.total_pages)
            }
            ListingMode::Search { term } =>
            {
                format!("Search \"{term}\" - {} results", listing.cards.len())
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.muted)
            .title(title);

        if let Some(term) = &listing.no_results
        {
            let text = Text::from(vec![
                Line::from(""),
                Line::styled(format!("No results found for \"{term}\""), palette.accent),
                Line::styled("Try searching with different keywords", palette.muted),
            ]);
            let placeholder = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(palette.base)
                .block(block);

            frame.render_widget(placeholder, area);
            return;
        }

        // 2 for the borders
        let width = (area.width as usize).saturating_sub(2).max(1);
        let presenter = self.controller.effects();

        let mut lines = Vec::new();
        for card in &listing.cards
        {
            let title_style = if presenter.is_entering(card.id)
            {
                palette.muted
            }
            else
            {
                palette.base.add_modifier(Modifier::BOLD)
            };

            lines.push(Line::styled(card.title.clone(), title_style));
            lines.push(Line::styled(
                format!("{} · {}", card.date_label(), card.category),
                palette.muted.add_modifier(Modifier::ITALIC),
            ));
            lines.extend(
                wrap(&card.excerpt, width)
                    .into_iter()
                    .map(|line| Line::raw(line.into_owned())),
            );
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(Text::from(lines))
            .style(palette.base)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(self.scroll).unwrap_or(u16::MAX), 0));

        frame.render_widget(paragraph, area);
    }

    /// Renders the status line: acknowledgements and the back-to-top hint.
    fn render_status(&self, frame: &mut Frame, area: Rect, palette: &Palette)
    {
        let mut spans = Vec::new();

        if let Some(status) = &self.status
        {
            spans.push(Span::styled(status.clone(), palette.accent));
        }

        if self.controls.contains(Controls::BACK_TO_TOP) && self.tracker.back_to_top_visible()
        {
            spans.push(Span::styled("  ↑ Home: back to top", palette.muted));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base), area);
    }

    /// Renders the help overlay with keyboard shortcuts.
    fn render_help(frame: &mut Frame, palette: &Palette)
    {
        let area = centered_rect(60, 70, frame.area());

        frame.render_widget(Clear, area);

        let text = Text::from(vec![
            Line::from("folio Help:"),
            Line::from(""),
            Line::from("h/l or ←/→: Previous/next page"),
            Line::from("1-9 or :: Go to page"),
            Line::from("Tab/Shift-Tab: Next/previous filter"),
            Line::from("/: Search (empty search clears it)"),
            Line::from("m: Toggle menu"),
            Line::from("t: Toggle theme"),
            Line::from("j/k or wheel: Scroll"),
            Line::from("Home: Back to top"),
            Line::from("n: Newsletter  c: Contact"),
            Line::from("q: Quit"),
            Line::from("?: Toggle help"),
        ]);

        let help_box = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help"),
            )
            .style(palette.base)
            .wrap(Wrap { trim: true });

        frame.render_widget(help_box, area);
    }

    /// Renders the newsletter form.
    fn render_newsletter(&self, frame: &mut Frame, palette: &Palette)
    {
        let area = centered_rect(50, 20, frame.area());

        frame.render_widget(Clear, area);

        let text = Text::from(vec![
            Line::from("Subscribe to new posts (Enter to submit, Esc to close)"),
            Line::from(""),
            Line::styled(format!("Email: {}", self.newsletter.email), palette.accent),
        ]);

        let form = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Newsletter"),
            )
            .style(palette.base);

        frame.render_widget(form, area);
    }

    /// Renders the contact form with the focused field highlighted.
    fn render_contact(&self, frame: &mut Frame, palette: &Palette)
    {
        let area = centered_rect(60, 40, frame.area());

        frame.render_widget(Clear, area);

        let mut lines = vec![
            Line::from("Tab: next field  Enter: send  Esc: close"),
            Line::from(""),
        ];

        let mut field = ContactField::Name;
        loop
        {
            let style = if field == self.contact.focus
            {
                palette.accent
            }
            else
            {
                palette.base
            };
            lines.push(Line::styled(
                format!("{}: {}", field.label(), self.contact.field(field)),
                style,
            ));

            field = field.next();
            if field == ContactField::Name
            {
                break;
            }
        }

        let form = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Contact"),
            )
            .style(palette.base)
            .wrap(Wrap { trim: false });

        frame.render_widget(form, area);
    }

    /// Scrolls the listing up by the specified amount.
    pub fn scroll_up(&mut self, amount: usize)
    {
        self.scroll = self.scroll.saturating_sub(amount);
        self.tracker.update(self.scroll);
    }

    /// Scrolls the listing down by the specified amount.
    pub fn scroll_down(&mut self, amount: usize)
    {
        // The max scroll position will be handled by ratatui
        self.scroll = self.scroll.saturating_add(amount);
        self.tracker.update(self.scroll);
    }

    /// Jumps back to the top of the listing, if the page has the control.
    pub fn back_to_top(&mut self)
    {
        if self.offers(Controls::BACK_TO_TOP) && self.tracker.back_to_top_visible()
        {
            self.reset_scroll();
        }
    }

    /// Advances animations by one tick.
    pub fn on_tick(&mut self)
    {
        self.controller.effects_mut().tick();
    }

    /// Toggles the help overlay.
    pub fn toggle_help(&mut self)
    {
        self.mode = if self.mode == AppMode::Help
        {
            AppMode::Normal
        }
        else
        {
            AppMode::Help
        };
    }

    /// Switches between light and dark, persisting the choice.
    ///
    /// A failure to persist keeps the new theme for this session.
    pub fn toggle_theme(&mut self)
    {
        if !self.offers(Controls::THEME_TOGGLE)
        {
            return;
        }

        self.theme = match self.theme_store.toggle()
        {
            Ok(theme) => theme,
            Err(err) =>
            {
                error!("Could not persist theme: {err:#}");
                self.theme.toggled()
            }
        };
    }

    /// Opens or closes the navigation menu.
    pub fn toggle_menu(&mut self)
    {
        if !self.offers(Controls::NAV_MENU)
        {
            return;
        }

        self.show_menu = !self.show_menu;
        self.mode = if self.show_menu { AppMode::Menu } else { AppMode::Normal };
    }

    /// Moves the menu selection down.
    pub fn menu_next(&mut self)
    {
        self.nav_panel.next();
    }

    /// Moves the menu selection up.
    pub fn menu_previous(&mut self)
    {
        self.nav_panel.previous();
    }

    /// Follows the selected menu entry and closes the menu.
    pub fn menu_select(&mut self)
    {
        let Some(entry) = self.nav_panel.selected().cloned()
        else
        {
            return;
        };

        self.show_menu = false;
        self.mode = AppMode::Normal;

        match entry
        {
            NavEntry::AllPosts => self.controller.select_category("all"),
            NavEntry::Category(name) => self.controller.select_category(&name),
            NavEntry::Newsletter => self.open_newsletter(),
            NavEntry::Contact => self.open_contact(),
        }

        self.follow_scroll_request();
    }

    /// Enters search mode, keeping the previous term for editing.
    pub fn enter_search_mode(&mut self)
    {
        if self.offers(Controls::SEARCH)
        {
            self.mode = AppMode::Search;
        }
    }

    /// Exits search input and returns to normal mode.
    pub fn exit_search_mode(&mut self)
    {
        self.mode = AppMode::Normal;
    }

    /// Adds a character to the search text.
    pub fn add_search_char(&mut self, ch: char)
    {
        self.search_text.push(ch);
    }

    /// Removes the last character from the search text.
    pub fn remove_search_char(&mut self)
    {
        self.search_text.pop();
    }

    /// Submits the search text; an empty term clears the search.
    pub fn perform_search(&mut self)
    {
        self.controller.search(&self.search_text);
        self.reset_scroll();
    }

    /// Activates the next filter button.
    pub fn next_filter(&mut self)
    {
        self.cycle_filter(true);
    }

    /// Activates the previous filter button.
    pub fn prev_filter(&mut self)
    {
        self.cycle_filter(false);
    }

    /// Moves the filter highlight one button forward or back, wrapping.
    fn cycle_filter(&mut self, forward: bool)
    {
        if !self.offers(Controls::FILTERS)
        {
            return;
        }

        let count = self.controller.filters().values().len();
        if count == 0
        {
            return;
        }

        let index = match (self.controller.filters().active(), forward)
        {
            (None, _) => 0,
            (Some(active), true) => (active + 1) % count,
            (Some(active), false) => (active + count - 1) % count,
        };

        self.controller.press_filter(index);
        self.reset_scroll();
    }

    /// Goes to the next page.
    pub fn next_page(&mut self)
    {
        if self.offers(Controls::PAGINATION)
        {
            self.controller.next_page();
            self.follow_scroll_request();
        }
    }

    /// Goes to the previous page.
    pub fn prev_page(&mut self)
    {
        if self.offers(Controls::PAGINATION)
        {
            self.controller.prev_page();
            self.follow_scroll_request();
        }
    }

    /// Goes to page `number`.
    pub fn go_to_page(&mut self, number: usize)
    {
        if self.offers(Controls::PAGINATION)
        {
            self.controller.go_to_page(number);
            self.follow_scroll_request();
        }
    }

    /// Starts typing a page number.
    pub fn enter_goto_mode(&mut self)
    {
        if self.offers(Controls::PAGINATION)
        {
            self.goto_text.clear();
            self.mode = AppMode::GoTo;
        }
    }

    /// Adds a digit to the page number being typed; other characters are
    /// ignored.
    pub fn add_goto_char(&mut self, ch: char)
    {
        if ch.is_ascii_digit()
        {
            self.goto_text.push(ch);
        }
    }

    /// Removes the last digit typed.
    pub fn remove_goto_char(&mut self)
    {
        self.goto_text.pop();
    }

    /// Jumps to the typed page number and leaves go-to mode.
    pub fn confirm_goto(&mut self)
    {
        self.mode = AppMode::Normal;

        if let Ok(number) = self.goto_text.parse::<usize>()
        {
            self.go_to_page(number);
        }

        self.goto_text.clear();
    }

    /// Opens the newsletter form.
    pub fn open_newsletter(&mut self)
    {
        if self.offers(Controls::NEWSLETTER)
        {
            self.mode = AppMode::Newsletter;
        }
    }

    /// Opens the contact form.
    pub fn open_contact(&mut self)
    {
        if self.offers(Controls::CONTACT)
        {
            self.mode = AppMode::Contact;
        }
    }

    /// Closes any open form, keeping what was typed.
    pub fn close_form(&mut self)
    {
        self.mode = AppMode::Normal;
    }

    /// Types into the open form.
    pub fn form_input(&mut self, ch: char)
    {
        match self.mode
        {
            AppMode::Newsletter => self.newsletter.email.push(ch),
            AppMode::Contact => self.contact.push(ch),
            _ =>
            {}
        }
    }

    /// Deletes the last character of the open form's field.
    pub fn form_backspace(&mut self)
    {
        match self.mode
        {
            AppMode::Newsletter =>
            {
                self.newsletter.email.pop();
            }
            AppMode::Contact => self.contact.pop(),
            _ =>
            {}
        }
    }

    /// Submits the open form; an accepted submission closes it.
    pub fn submit_form(&mut self)
    {
        let outcome = match self.mode
        {
            AppMode::Newsletter => self.newsletter.submit(),
            AppMode::Contact => self.contact.submit(),
            _ => return,
        };

        if matches!(outcome, Submission::Accepted(_))
        {
            self.mode = AppMode::Normal;
        }

        self.status = Some(outcome.message().to_string());
    }

    /// Scrolls to the top if the controller asked for the listing to be
    /// brought into view.
    fn follow_scroll_request(&mut self)
    {
        if self
            .controller
            .effects_mut()
            .take_scroll_request()
        {
            self.reset_scroll();
        }
    }

    /// Moves the listing back to its first row.
    fn reset_scroll(&mut self)
    {
        self.scroll = 0;
        self.tracker.update(0);
    }
}

/// Builds the prev / page numbers / next line.
fn pager_line(pager: &Pager, palette: &Palette) -> Paragraph<'static>
{
    let arrow = |label: &'static str, enabled: bool| {
        let style = if enabled
        {
            palette.base
        }
        else
        {
            palette.muted.add_modifier(Modifier::DIM)
        };
        Span::styled(label, style)
    };

    let mut spans = vec![arrow("‹ Prev ", pager.has_prev())];

    for item in &pager.items
    {
        let span = match *item
        {
            PageItem::Page {
                number,
                active: true,
            } => Span::styled(
                format!(" {number} "),
                palette.accent.add_modifier(Modifier::REVERSED),
            ),
            PageItem::Page { number, .. } => Span::styled(format!(" {number} "), palette.base),
            PageItem::Ellipsis => Span::styled(" … ", palette.muted),
        };
        spans.push(span);
    }

    spans.push(arrow(" Next ›", pager.has_next()));

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .style(palette.base)
}

/// Renders a one-line input box at the bottom of the screen.
fn render_prompt(frame: &mut Frame, title: &str, text: &str, palette: &Palette)
{
    let screen = frame.area();
    let area = Rect::new(
        screen.width / 4,
        screen.height.saturating_sub(3),
        screen.width / 2,
        screen.height.min(3),
    );

    frame.render_widget(Clear, area);

    let prompt = Paragraph::new(Text::from(text.to_string()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .style(Style::default()),
        )
        .style(palette.base);

    frame.render_widget(prompt, area);
}

/// Creates a centered rectangle inside the given area.
///
/// # Arguments
///
/// * `percent_x` - Width of the rectangle as a percentage of the parent area
/// * `percent_y` - Height of the rectangle as a percentage of the parent area
/// * `area` - Parent rectangle
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect
{
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests
{
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    use super::*;
    use crate::card::{Card, CardId};
    use crate::effects::HeaderState;

    fn catalog(count: usize, controls: Controls) -> Catalog
    {
        let cards = (0..count)
            .map(|index| {
                Card::new(
                    CardId(index),
                    format!("Post {index}"),
                    "Some words about it",
                    if index % 2 == 0 { "tech" } else { "life" },
                    &format!("2024-01-{:02}", index + 1),
                )
            })
            .collect();

        Catalog {
            title: String::from("Test blog"),
            cards,
            filters: vec![
                String::from("all"),
                String::from("tech"),
                String::from("life"),
            ],
            categories: vec![String::from("tech"), String::from("life")],
            controls,
        }
    }

    fn app(count: usize, controls: Controls) -> (App, TempDir)
    {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(catalog(count, controls), ThemeStore::in_dir(dir.path()));
        (app, dir)
    }

    fn screen(app: &mut App) -> String
    {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn first_frame_shows_newest_page()
    {
        let (mut app, _dir) = app(14, Controls::all());
        let rendered = screen(&mut app);

        assert!(rendered.contains("Post 13"));
        assert!(!rendered.contains("Post 7 "));
        assert!(rendered.contains("Page 1 of 3"));
    }

    #[test]
    fn theme_toggle_persists()
    {
        let (mut app, dir) = app(1, Controls::all());

        app.toggle_theme();

        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(ThemeStore::in_dir(dir.path()).get(), Theme::Dark);

        app.toggle_theme();

        assert_eq!(app.theme, Theme::Light);
        assert_eq!(ThemeStore::in_dir(dir.path()).get(), Theme::Light);
    }

    #[test]
    fn absent_controls_ignore_input()
    {
        let (mut app, _dir) = app(14, Controls::SEARCH);

        app.toggle_theme();
        app.next_page();
        app.toggle_menu();
        app.open_newsletter();

        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.controller.state().current_page, 1);
        assert!(!app.show_menu);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn filter_cycling_wraps()
    {
        let (mut app, _dir) = app(4, Controls::all());

        app.prev_filter();
        assert_eq!(app.controller.filters().active(), Some(2));

        app.next_filter();
        assert_eq!(app.controller.filters().active(), Some(0));
    }

    #[test]
    fn menu_category_filters_and_closes()
    {
        let (mut app, _dir) = app(14, Controls::all());

        app.toggle_menu();
        app.menu_next();
        app.scroll_down(20);
        app.menu_select();

        assert!(!app.show_menu);
        assert_eq!(app.scroll, 0);
        assert_eq!(app.controller.filters().active(), Some(1));
        assert_eq!(app.controller.listing().cards.len(), 6);
        assert!(
            app.controller
                .listing()
                .cards
                .iter()
                .all(|card| card.category == "tech")
        );
    }

    #[test]
    fn menu_offers_card_categories_without_category_cards()
    {
        let page = r#"<html><body>
  <button id="menuToggle"></button>
  <article class="blog-card" data-category="life" data-date="2024-01-01">
    <h3 class="blog-title">New year</h3>
  </article>
</body></html>"#;
        let catalog = crate::catalog::html::parse_page(page);
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(catalog, ThemeStore::in_dir(dir.path()));

        assert_eq!(
            app.nav_panel.entries(),
            &[
                NavEntry::AllPosts,
                NavEntry::Category(String::from("life")),
            ]
        );

        app.toggle_menu();
        app.menu_next();
        app.menu_select();

        assert_eq!(
            app.controller.state().active_filter,
            crate::view::Filter::from_value("life")
        );
    }

    #[test]
    fn goto_accepts_digits_only()
    {
        let (mut app, _dir) = app(14, Controls::all());

        app.enter_goto_mode();
        app.add_goto_char('x');
        app.add_goto_char('3');
        app.confirm_goto();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.controller.state().current_page, 3);
    }

    #[test]
    fn search_without_results_shows_placeholder()
    {
        let (mut app, _dir) = app(3, Controls::all());

        app.enter_search_mode();
        for ch in "zzz".chars()
        {
            app.add_search_char(ch);
        }
        app.perform_search();
        app.exit_search_mode();

        let rendered = screen(&mut app);
        assert!(rendered.contains("No results found for \"zzz\""));
    }

    #[test]
    fn newsletter_submission_acknowledges()
    {
        let (mut app, _dir) = app(1, Controls::all());

        app.open_newsletter();
        for ch in "me@example.com".chars()
        {
            app.form_input(ch);
        }
        app.submit_form();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(
            app.status.as_deref(),
            Some("Thank you for subscribing with email: me@example.com")
        );
    }

    #[test]
    fn back_to_top_needs_distance()
    {
        let (mut app, _dir) = app(14, Controls::all());

        app.scroll_down(5);
        app.back_to_top();
        assert_eq!(app.scroll, 5);

        app.scroll_down(20);
        assert_eq!(app.tracker.header(), HeaderState::Hidden);
        app.back_to_top();
        assert_eq!(app.scroll, 0);
    }
}
