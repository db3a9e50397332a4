//! Ratatui-based terminal UI.
//!
//! The dashboard ranks the signs of the stored players through the model,
//! then renders the leaderboard next to a per-sign rating chart.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use crate::app::pipeline::{BoardOutput, rank_players};
use crate::domain::{BoardConfig, PlayerRecord};
use crate::error::AppError;
use crate::rating::{ChatModel, DeepInfraClient, RankingSource};
use crate::report::fmt_rating;

mod plotters_chart;

use plotters_chart::SignRatingChart;

/// Start the TUI.
pub fn run(config: BoardConfig) -> Result<(), AppError> {
    // Load and check credentials before touching the terminal so errors print normally.
    let players = crate::app::load_stored_players(&config.db_path)?;
    let model = DeepInfraClient::from_env()?;
    let model_name = model.model().to_string();

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, players, Box::new(model), model_name);
    app.rerank();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: BoardConfig,
    players: Vec<PlayerRecord>,
    model: Box<dyn ChatModel>,
    model_name: String,
    board: Option<BoardOutput>,
    offset: usize,
    rounds: u32,
    status: String,
}

impl App {
    fn new(config: BoardConfig, players: Vec<PlayerRecord>, model: Box<dyn ChatModel>, model_name: String) -> Self {
        Self {
            config,
            players,
            model,
            model_name,
            board: None,
            offset: 0,
            rounds: 0,
            status: "Ranking signs...".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the dashboard should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down => {
                let last = self.row_count().saturating_sub(1);
                self.offset = (self.offset + 1).min(last);
            }
            KeyCode::PageUp => self.offset = self.offset.saturating_sub(10),
            KeyCode::PageDown => {
                let last = self.row_count().saturating_sub(1);
                self.offset = (self.offset + 10).min(last);
            }
            KeyCode::Home => self.offset = 0,
            KeyCode::Char('r') => self.rerank(),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    fn row_count(&self) -> usize {
        self.board.as_ref().map(|b| b.rows.len()).unwrap_or(0)
    }

    /// Ask the model again and rebuild the leaderboard; export when configured.
    fn rerank(&mut self) {
        let board = rank_players(self.model.as_ref(), &self.players);
        self.rounds += 1;
        self.offset = 0;
        self.status = match &board.ranking.source {
            RankingSource::Fallback(reason) => format!("Fallback order: {reason}"),
            RankingSource::ModelWithoutOrder => "Model reply had no order; alphabetical order used.".to_string(),
            RankingSource::Empty => "No known signs to rank.".to_string(),
            RankingSource::Model => format!("Ranked {} signs.", board.ranking.ratings.len()),
        };
        self.board = Some(board);
        if self.config.export.is_some() {
            self.export();
        }
    }

    fn export(&mut self) {
        let (Some(path), Some(board)) = (&self.config.export, &self.board) else {
            self.status = "Export disabled (--no-export).".to_string();
            return;
        };
        match crate::io::write_leaderboard_json(path, &board.rows) {
            Ok(()) => {
                log::info!("Saved: {}", path.display());
                self.status = format!("{} | saved {}", self.status, path.display());
            }
            Err(err) => self.status = format!("Export failed: {err}"),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("horo", Style::default().fg(Color::Cyan)),
            Span::raw(" | cricket horoscope leaderboard"),
        ]));

        let rated = self.board.as_ref().map(|b| b.ranking.ratings.len()).unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!(
                "db: {} | players: {} | rated signs: {rated} | model: {} | round {}",
                self.config.db_path.display(),
                self.players.len(),
                self.model_name,
                self.rounds,
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.draw_table(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Leaderboard").borders(Borders::ALL);
        let Some(board) = &self.board else {
            let msg = Paragraph::new("Waiting for ranking...")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let header = Row::new(["Player", "Team", "DOB", "Zodiac", "Rating"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let rows = board.rows.iter().skip(self.offset).map(|r| {
            let rating_style = if r.rating.is_some() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                Cell::from(r.player.clone()),
                Cell::from(r.team.clone()),
                Cell::from(r.dob.format("%d/%m/%y").to_string()),
                Cell::from(r.zodiac.label()),
                Cell::from(fmt_rating(r.rating)).style(rating_style),
            ])
        });

        let widths = [
            Constraint::Min(18),
            Constraint::Min(12),
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(6),
        ];
        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Rating by sign").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let bars = self.board.as_ref().map(chart_bars).unwrap_or_default();
        if bars.is_empty() {
            let msg = Paragraph::new("No rated signs.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let y_max = bars.iter().map(|(_, r)| *r).max().unwrap_or(1);
        frame.render_widget(SignRatingChart { bars: &bars, y_max }, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ scroll  r re-rank  e export  q quit";
        let status_color = match self.board.as_ref().map(|b| &b.ranking.source) {
            Some(RankingSource::Model) => Color::Green,
            _ => Color::Yellow,
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(status_color)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Rated signs, highest first, with three-letter labels for the x axis.
fn chart_bars(board: &BoardOutput) -> Vec<(String, u32)> {
    board
        .ranking
        .ratings
        .ranked()
        .into_iter()
        .map(|(sign, rating)| (sign.label().chars().take(3).collect(), rating))
        .collect()
}
