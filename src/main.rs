mod app;
mod event;
mod ui;

use cubedrill::{config, deck, session, store};

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen};
use config::Config;
use deck::Category;
use deck::solutions::SolutionMap;
use event::{AppEvent, EventHandler};
use store::json_store::{self, JsonStore};
use ui::components::card::CardView;
use ui::components::stats_view::StatsView;
use ui::components::toggle_list::ToggleList;
use ui::layout::{AppLayout, pack_hint_lines};

const TRAINER_HINTS: &[&str] = &[
    "[Space] Next",
    "[s] Solution",
    "[Tab/1/2] Category",
    "[j/k] Move",
    "[Enter/x] Toggle",
    "[a] Enable all",
    "[t] Stats",
    "[q] Quit",
];

#[derive(Parser)]
#[command(name = "cubedrill", version, about = "Flashcard trainer for last-layer algorithms")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Category to start in (OLL or PLL)")]
    category: Option<Category>,

    #[arg(short, long, help = "JSON file with solutions, replacing the bundled set")]
    solutions: Option<PathBuf>,

    #[arg(long, help = "Write debug logs to the data directory")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::default()
    });
    if let Some(category) = cli.category {
        config.start_category = category;
    }
    if let Some(ref theme) = cli.theme {
        config.theme = theme.clone();
    }

    let solutions_path = cli.solutions.or_else(|| config.solutions_path());
    let solutions = SolutionMap::load(solutions_path.as_deref());

    let store = match JsonStore::new() {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, progress will not be saved");
            None
        }
    };

    let theme = ui::theme::Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(
            theme = %config.theme,
            available = ?ui::theme::Theme::available_themes(),
            "unknown theme, using default"
        );
        ui::theme::Theme::default()
    });
    let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));

    let mut app = App::new(config, solutions, store, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save() {
        tracing::error!(error = %e, "failed to save profile");
        eprintln!("Warning: could not save progress: {e}");
    }

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to `cubedrill.log` in the data directory; the terminal belongs to
/// the UI. `RUST_LOG` overrides the default filter.
fn init_logging(debug: bool) {
    let directives = if debug { "warn,cubedrill=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let dir = json_store::data_dir();
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("cubedrill.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Trainer => handle_trainer_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
    }
}

fn handle_trainer_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(' ') => app.next_card(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.reveal_solution(),
        KeyCode::Tab | KeyCode::BackTab => app.cycle_category(),
        KeyCode::Char('1') => app.switch_category(Category::Oll),
        KeyCode::Char('2') => app.switch_category(Category::Pll),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Enter | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('a') => app.enable_all(),
        KeyCode::Char('t') => app.go_to_stats(),
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('t') => app.go_to_trainer(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Trainer => render_trainer(frame, app),
        AppScreen::Stats => render_stats(frame, app),
    }
}

fn render_trainer(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let hints = pack_hint_lines(TRAINER_HINTS, area.width as usize);
    let app_layout = AppLayout::new(area, hints.len() as u16);

    let category = app.category();
    let pool = app.trainer.deck().pool(category);
    let mut header_spans = vec![
        Span::styled(
            " cubedrill ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {category} "),
            Style::default()
                .fg(colors.accent())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let mut info = String::new();
    if !app_layout.tier.show_sidebar() {
        // No toggle list on screen, so the header carries the cursor row
        if let Some(item) = app.selected_item() {
            let mark = if pool.is_enabled(&item) { "x" } else { " " };
            info.push_str(&format!("| > {} [{mark}] ", item.base_name()));
        }
        info.push_str(&format!(
            "| {}/{} enabled ",
            pool.enabled_count(),
            pool.items().len()
        ));
    }
    info.push_str(&format!("| {} dealt", app.session_cards));
    if app.profile.streak_days > 1 {
        info.push_str(&format!(" | {} day streak", app.profile.streak_days));
    }
    header_spans.push(Span::styled(
        info,
        Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
    ));
    let header = Paragraph::new(Line::from(header_spans))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let card = CardView::new(
        category,
        app.trainer.current(),
        app.trainer.solution(),
        app.theme,
    );
    frame.render_widget(card, app_layout.main);

    if let Some(sidebar) = app_layout.sidebar {
        let list = ToggleList::new(pool, app.toggle_cursor, app.trainer.current(), app.theme);
        frame.render_widget(list, sidebar);
    }

    let footer_lines: Vec<Line> = hints
        .into_iter()
        .map(|hint| {
            Line::from(Span::styled(
                hint,
                Style::default().fg(colors.text_dim()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), app_layout.footer);
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let centered = ui::layout::centered_rect(80, 80, area);
    let stats = StatsView::new(
        &app.profile,
        app.trainer.deck(),
        app.session_cards,
        app.theme,
    );
    frame.render_widget(stats, centered);
}
