use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use ipl_dashboard::cascade::{NO_PLAYER_TEXT, PlayerDetailView, StatCard};
use ipl_dashboard::config::{Config, load_env_files};
use ipl_dashboard::dashboard::Dashboard;
use ipl_dashboard::export::export_tables;
use ipl_dashboard::state::{AppState, ChartTab, Focus, chart_title};

/// Terminal dashboard for an IPL season.
#[derive(Parser, Debug)]
#[command(name = "ipl_dashboard", version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Workbook written by the `e` key
    #[arg(long, env = "IPL_EXPORT_PATH", default_value = "ipl_dashboard.xlsx")]
    export: PathBuf,

    /// Write tracing output to this file (stderr is owned by the UI)
    #[arg(long, env = "IPL_LOG_FILE")]
    log_file: Option<PathBuf>,
}

struct App {
    state: AppState,
    export_path: PathBuf,
    should_quit: bool,
}

impl App {
    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.state.toggle_focus(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('c') | KeyCode::Right => self.state.cycle_chart_next(),
            KeyCode::Char('C') | KeyCode::Left => self.state.cycle_chart_prev(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn export(&mut self) {
        match export_tables(&self.export_path, &self.state.dashboard) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} sheets ({} rows) to {}",
                report.sheets,
                report.rows,
                self.export_path.display()
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn main() -> Result<()> {
    load_env_files();
    let cli = Cli::parse();
    cli.config.validate()?;

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("unable to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    // Load before touching the terminal so data errors print normally.
    let dashboard = Dashboard::load(
        &cli.config.matches,
        &cli.config.players,
        cli.config.top_limit,
    )
    .context("unable to load IPL datasets")?;

    let mut app = App {
        state: AppState::new(dashboard),
        export_path: cli.export,
        should_quit: false,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| ui(f, &app.state))?;

        if event::poll(tick_rate)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30),
            Constraint::Min(40),
            Constraint::Percentage(40),
        ])
        .split(chunks[1]);

    render_selectors(frame, columns[0], state);
    render_player_board(frame, columns[1], state);
    render_chart(frame, columns[2], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "Tab Focus | j/k/↑/↓ Move | c/C/←/→ Chart | e Export | ? Help | q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    format!(
        "CRICKET DASHBOARD | {} | Chart: {}",
        state.dashboard.selection_state().selected_team,
        chart_title(state.chart)
    )
}

fn render_selectors(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let teams = state.dashboard.team_list();
    let team_lines = list_text(teams, Some(state.team_cursor));
    let teams_widget = Paragraph::new(team_lines).block(
        Block::default()
            .title("Teams")
            .borders(Borders::ALL)
            .border_style(focus_style(state.focus == Focus::Teams)),
    );
    frame.render_widget(teams_widget, rows[0]);

    let players = state.dashboard.current_player_list();
    let player_lines = if players.is_empty() {
        "No players for this team".to_string()
    } else {
        list_text(players, state.player_cursor())
    };
    let players_widget = Paragraph::new(player_lines).block(
        Block::default()
            .title("Players")
            .borders(Borders::ALL)
            .border_style(focus_style(state.focus == Focus::Players)),
    );
    frame.render_widget(players_widget, rows[1]);
}

fn list_text(items: &[String], cursor: Option<usize>) -> String {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let prefix = if Some(idx) == cursor { "> " } else { "  " };
            format!("{prefix}{item}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_player_board(frame: &mut Frame, area: Rect, state: &AppState) {
    let detail = state.dashboard.current_player_detail();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

    let url = Paragraph::new(detail.profile_text().to_string())
        .block(Block::default().title("Profile").borders(Borders::ALL));
    frame.render_widget(url, rows[0]);

    let PlayerDetailView::Player(detail) = detail else {
        let empty = Paragraph::new(NO_PLAYER_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Performance").borders(Borders::ALL));
        let board = Rect {
            height: rows[1].height + rows[2].height,
            ..rows[1]
        };
        frame.render_widget(empty, board);
        return;
    };

    let mut cells = Vec::with_capacity(4);
    for row in [rows[1], rows[2]] {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row);
        cells.push(halves[0]);
        cells.push(halves[1]);
    }
    for (card, cell) in detail.cards.iter().zip(cells) {
        frame.render_widget(card_widget(card), cell);
    }
}

fn card_widget(card: &StatCard) -> Paragraph<'static> {
    let text = card
        .lines
        .iter()
        .map(|l| format!("{}: {}", l.label, l.value))
        .collect::<Vec<_>>()
        .join("\n");
    Paragraph::new(text).block(Block::default().title(card.title).borders(Borders::ALL))
}

fn render_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = state.chart_rows();
    let block = Block::default()
        .title(chart_title(state.chart))
        .borders(Borders::ALL);
    if rows.is_empty() {
        let empty = Paragraph::new("Nothing to chart")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let suffix = if matches!(state.chart, ChartTab::WinPercentage | ChartTab::TossWinCorrelation) {
        "%"
    } else {
        ""
    };
    let bars: Vec<Bar> = rows
        .iter()
        .map(|r| {
            Bar::default()
                .value(u64::from(r.value))
                .label(Line::from(r.label.clone()))
                .text_value(format!("{}{suffix}", r.value))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0);
    frame.render_widget(chart, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Cricket Dashboard - Help",
        "",
        "  Tab          Switch between team and player lists",
        "  j/k or ↑/↓   Move selection (updates the cascade)",
        "  c / →        Next chart",
        "  C / ←        Previous chart",
        "  e            Export all tables to a workbook",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
