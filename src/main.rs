use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, crate_version};
use crossterm::event::{KeyCode, KeyModifiers};
use folio::{App, AppMode, Catalog, Event, EventHandler, ThemeStore};
use folio::{TerminalGuard, init_panic_hook, init_tui, logging};
use log::{error, info};
use ratatui::Terminal;
use ratatui::backend::Backend as RatatuiBackend;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()>
{
    init_panic_hook();

    let theme_store = ThemeStore::new()?;

    let matches = Command::new("folio")
        .version(crate_version!())
        .about("A terminal browser for blog and catalog card listings")
        // Inform about where the theme preference lives
        .after_help(format!(
            "The light/dark theme choice is remembered between runs.\nIt is stored in the \
             following directory: {}",
            theme_store.config_dir().display()
        ))
        .arg(
            Arg::new("catalog")
                .help("Catalog to open: a .toml catalog or an exported .html listing page")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("reset-theme")
                .long("reset-theme")
                .help("Forget the stored theme preference")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clear-log")
                .long("clear-log")
                .help("Remove the log file")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("clear-log")
    {
        logging::clear_log_file()?;
        println!("Log file removed");
        return Ok(());
    }

    logging::init_logging()?;

    if matches.get_flag("reset-theme")
    {
        theme_store.clear()?;
        info!("Theme preference cleared");
        println!("Theme preference cleared");
        return Ok(());
    }

    let Some(path) = matches.get_one::<PathBuf>("catalog")
    else
    {
        error!("No catalog provided");
        return Err(anyhow::anyhow!("No catalog provided, see --help"));
    };

    let catalog = Catalog::load(path).context("Could not open the catalog")?;
    info!("Opened {} with {} cards", path.display(), catalog.cards.len());

    let app = App::new(catalog, theme_store);

    // Use RAII to ensure terminal cleanup happens
    let _terminal_guard = TerminalGuard::new()?;
    let mut terminal = init_tui()?;

    // Ticks drive the fade-in of freshly shown cards
    let event_handler = EventHandler::new(Duration::from_millis(250));

    run_app(&mut terminal, app, &event_handler)
}

/// Run the main loop
///
/// # Arguments
///
/// * `terminal` - The terminal to draw to
/// * `app` - The app to run
/// * `event_handler` - The event handler to handle events
///
/// # Errors
///
/// Returns an error if the terminal fails to draw to the screen.
fn run_app<T: RatatuiBackend>(
    terminal: &mut Terminal<T>,
    mut app: App,
    event_handler: &EventHandler,
) -> Result<()>
where
    T::Error: Send + Sync + 'static,
{
    loop
    {
        terminal.draw(|frame| app.render(frame))?;

        let key = match event_handler.next()?
        {
            Event::Key(key) => key,
            Event::Tick =>
            {
                app.on_tick();
                continue;
            }
            Event::ScrollDown =>
            {
                app.scroll_down(3);
                continue;
            }
            Event::ScrollUp =>
            {
                app.scroll_up(3);
                continue;
            }
            Event::Resize(..) => continue,
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
        {
            break;
        }

        match (app.mode, key.code)
        {
            // Quit with 'q' in normal mode
            (AppMode::Normal, KeyCode::Char('q')) =>
            {
                app.should_quit = true;
            }

            // Help toggle with '?'
            (AppMode::Normal | AppMode::Help, KeyCode::Char('?')) |
            (AppMode::Help, KeyCode::Esc) =>
            {
                app.toggle_help();
            }

            (AppMode::Normal, KeyCode::Char('t')) =>
            {
                app.toggle_theme();
            }

            // Navigation menu
            (AppMode::Normal | AppMode::Menu, KeyCode::Char('m')) |
            (AppMode::Menu, KeyCode::Esc) =>
            {
                app.toggle_menu();
            }
            (AppMode::Menu, KeyCode::Char('j') | KeyCode::Down) =>
            {
                app.menu_next();
            }
            (AppMode::Menu, KeyCode::Char('k') | KeyCode::Up) =>
            {
                app.menu_previous();
            }
            (AppMode::Menu, KeyCode::Enter) =>
            {
                app.menu_select();
            }

            // Filter buttons
            (AppMode::Normal, KeyCode::Tab) =>
            {
                app.next_filter();
            }
            (AppMode::Normal, KeyCode::BackTab) =>
            {
                app.prev_filter();
            }

            // Pagination
            (AppMode::Normal, KeyCode::Char('l') | KeyCode::Right) =>
            {
                app.next_page();
            }
            (AppMode::Normal, KeyCode::Char('h') | KeyCode::Left) =>
            {
                app.prev_page();
            }
            (AppMode::Normal, KeyCode::Char(digit @ '1'..='9')) =>
            {
                if let Some(number) = digit.to_digit(10)
                {
                    app.go_to_page(number as usize);
                }
            }
            (AppMode::Normal, KeyCode::Char(':')) =>
            {
                app.enter_goto_mode();
            }
            (AppMode::GoTo, KeyCode::Enter) =>
            {
                app.confirm_goto();
            }
            (AppMode::GoTo, KeyCode::Esc) =>
            {
                app.mode = AppMode::Normal;
            }
            (AppMode::GoTo, KeyCode::Backspace) =>
            {
                app.remove_goto_char();
            }
            (AppMode::GoTo, KeyCode::Char(ch)) =>
            {
                app.add_goto_char(ch);
            }

            // Scrolling
            (AppMode::Normal, KeyCode::Char('j') | KeyCode::Down) =>
            {
                app.scroll_down(1);
            }
            (AppMode::Normal, KeyCode::Char('k') | KeyCode::Up) =>
            {
                app.scroll_up(1);
            }
            // 2 for borders
            (AppMode::Normal, KeyCode::PageDown) =>
            {
                app.scroll_down(
                    terminal
                        .size()?
                        .height
                        .saturating_sub(2)
                        .into(),
                );
            }
            (AppMode::Normal, KeyCode::PageUp) =>
            {
                app.scroll_up(
                    terminal
                        .size()?
                        .height
                        .saturating_sub(2)
                        .into(),
                );
            }
            (AppMode::Normal, KeyCode::Home) =>
            {
                app.back_to_top();
            }

            // Search handling
            (AppMode::Normal, KeyCode::Char('/')) =>
            {
                app.enter_search_mode();
            }
            (AppMode::Search, KeyCode::Enter) =>
            {
                app.perform_search();
                app.exit_search_mode();
            }
            (AppMode::Search, KeyCode::Esc) =>
            {
                app.exit_search_mode();
            }
            (AppMode::Search, KeyCode::Backspace) =>
            {
                app.remove_search_char();
            }
            (AppMode::Search, KeyCode::Char(ch)) =>
            {
                app.add_search_char(ch);
            }

            // Forms
            (AppMode::Normal, KeyCode::Char('n')) =>
            {
                app.open_newsletter();
            }
            (AppMode::Normal, KeyCode::Char('c')) =>
            {
                app.open_contact();
            }
            (AppMode::Newsletter | AppMode::Contact, KeyCode::Enter) =>
            {
                app.submit_form();
            }
            (AppMode::Newsletter | AppMode::Contact, KeyCode::Esc) =>
            {
                app.close_form();
            }
            (AppMode::Newsletter | AppMode::Contact, KeyCode::Backspace) =>
            {
                app.form_backspace();
            }
            (AppMode::Contact, KeyCode::Tab) =>
            {
                app.contact.focus_next();
            }
            (AppMode::Newsletter | AppMode::Contact, KeyCode::Char(ch)) =>
            {
                app.form_input(ch);
            }

            _ =>
            {} // Ignore other key combinations
        }

        if app.should_quit
        {
            break;
        }
    }

    Ok(())
}
