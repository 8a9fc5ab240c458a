mod app;
mod config;
mod engine;
mod event;
mod session;
mod ui;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen, SETTINGS_FIELDS};
use config::Config;
use engine::algorithm::Algorithm;
use event::{AppEvent, EventHandler};
use ui::components::bar_chart::BarChart;
use ui::components::stats_sidebar::StatsSidebar;
use ui::layout::{AppLayout, pack_hint_lines, split_hints};

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "sortviz", version, about = "Terminal sorting algorithm visualizer")]
struct Cli {
    #[arg(short, long, help = "Sorting algorithm (bubble, selection, insertion)")]
    algorithm: Option<Algorithm>,

    #[arg(short, long, help = "Delay between comparisons in milliseconds")]
    speed: Option<u64>,

    #[arg(short = 'n', long, help = "Number of random values to sort")]
    size: Option<usize>,

    #[arg(long, help = "Random values are drawn from [10, MAX_VALUE + 10)")]
    max_value: Option<u32>,

    #[arg(long, value_delimiter = ',', help = "Sort these values instead of random ones")]
    values: Option<Vec<u32>>,

    #[arg(long, help = "Seed for reproducible arrays")]
    seed: Option<u64>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Interface language (en, id)")]
    locale: Option<String>,

    #[arg(long, help = "Run headless, printing every step as a JSON line")]
    trace: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(algorithm) = self.algorithm {
            config.set_algorithm(algorithm);
        }
        if let Some(speed) = self.speed {
            config.speed_ms = speed;
        }
        if let Some(size) = self.size {
            config.array_size = size;
        }
        if let Some(max_value) = self.max_value {
            config.max_value = max_value;
        }
        if let Some(ref theme) = self.theme {
            config.theme = theme.clone();
        }
        if let Some(ref locale) = self.locale {
            config.locale = locale.clone();
        }
        config.normalize();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, !cli.trace)?;

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(%err, "config unreadable, using defaults");
        Config::default()
    });
    cli.apply_to(&mut config);

    let mut app = App::new(config, cli.seed);
    if let Some(values) = cli.values.clone() {
        app.load_values(values);
    }

    if cli.trace {
        return run_trace(&mut app);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(16));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    info!("sortviz exited");
    Ok(())
}

/// Log to a file in TUI mode (the terminal is in raw mode), stderr otherwise.
fn setup_logging(verbose: bool, to_file: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if to_file {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sortviz");
        fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("sortviz.log"))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

/// Headless mode: one JSON object per emitted update, paced like the UI.
fn run_trace(app: &mut App) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    app.start();
    if !app.is_running() {
        warn!("nothing to sort");
        return Ok(());
    }

    loop {
        for update in app.controller.poll(Instant::now()) {
            serde_json::to_writer(&mut out, &update)?;
            writeln!(out)?;
        }
        out.flush()?;

        let Some(due) = app.controller.next_due() else {
            break;
        };
        let wait = due.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        app.on_tick(Instant::now());
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Visualizer => handle_visualizer_key(app, key),
        AppScreen::AlgorithmSelect => handle_menu_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_visualizer_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char(' ') => app.start(),
        KeyCode::Char('g') => app.new_array(),
        KeyCode::Char('x') => app.reset(),
        KeyCode::Char('c') => app.stop(),
        KeyCode::Char(ch @ '1'..='3') => {
            if let Some(algorithm) = Algorithm::from_index(ch as usize - '1' as usize) {
                app.choose_algorithm(algorithm);
            }
        }
        KeyCode::Char('a') => app.open_algorithm_menu(),
        KeyCode::Tab | KeyCode::Right => app.choose_algorithm(app.controller.algorithm().next()),
        KeyCode::BackTab | KeyCode::Left => {
            app.choose_algorithm(app.controller.algorithm().prev())
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.change_speed(false),
        KeyCode::Char('-') => app.change_speed(true),
        KeyCode::Char('s') => app.go_to_settings(),
        _ => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_visualizer(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.confirm_algorithm_menu(),
        KeyCode::Char(ch @ '1'..='3') => {
            app.menu.selected = ch as usize - '1' as usize;
            app.confirm_algorithm_menu();
        }
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.leave_settings(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_FIELDS {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Visualizer => render_visualizer(frame, app),
        AppScreen::AlgorithmSelect => render_menu(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, text: &str, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(&split_hints(text), area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_dim()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_visualizer(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let run = app.controller.run();
    let algorithm = app.controller.algorithm();

    let footer_text = t!("footer.visualizer");
    let footer_lines = pack_hint_lines(&split_hints(&footer_text), area.width as usize).len();
    let app_layout = AppLayout::new(area, footer_lines as u16);

    let header_info = if app_layout.tier.show_sidebar() && !run.is_running() {
        format!(" {} · {} ", t!("ui.title"), t!("ui.intro"))
    } else if app_layout.tier.show_sidebar() {
        format!(" {} ", t!("ui.title"))
    } else {
        format!(
            " {} | {} | {}: {} | {}: {} ",
            algorithm.title(),
            run.status.label(),
            t!("ui.comparisons"),
            run.comparisons,
            t!("ui.swaps"),
            run.swaps,
        )
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " sortviz ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let show_description = app_layout.tier.show_description(area.height);
    let mut constraints = vec![Constraint::Min(4)];
    if show_description {
        constraints.push(Constraint::Length(5));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let title = match app.last_step {
        Some(step) if run.is_running() => format!("{} · {}", algorithm.title(), step.label()),
        _ => algorithm.title().to_string(),
    };
    frame.render_widget(BarChart::new(run, title, app.theme), main_layout[0]);

    if show_description {
        let block = Block::bordered()
            .title(format!(" {} ", algorithm.title()))
            .border_style(Style::default().fg(colors.border()));
        let description = Paragraph::new(algorithm.description())
            .style(Style::default().fg(colors.fg()))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(description, main_layout[1]);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = StatsSidebar::new(&app.controller, &app.history, app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }

    render_footer(frame, app, &footer_text, app_layout.footer);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let menu_area = ui::layout::centered_rect(60, 80, layout[0]);
    frame.render_widget(&app.menu, menu_area);

    render_footer(frame, app, &t!("footer.menu"), layout[1]);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(format!(" {} ", t!("settings.title")))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (t!("settings.speed").to_string(), format!("{}", app.config.speed_ms)),
        (t!("settings.size").to_string(), format!("{}", app.config.array_size)),
        (t!("settings.theme").to_string(), app.config.theme.clone()),
        (t!("settings.locale").to_string(), app.config.locale.clone()),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        format!("  {}", t!("settings.hint")),
        Style::default().fg(colors.text_dim()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() });
        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.text_dim()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!("  {}", t!("footer.settings")),
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
