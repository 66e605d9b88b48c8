//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};
use std::time::Duration;

use crate::analytics::{Analytics, VolumeZone, WeekSummary};
use crate::db::Database;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// App state for TUI
pub struct App<'a> {
    db: &'a Database,
    planned: u32,
    summary: Option<WeekSummary>,
    should_quit: bool,
}

fn zone_color(zone: VolumeZone) -> Color {
    match zone {
        VolumeZone::Red => Color::Red,
        VolumeZone::Yellow => Color::Yellow,
        VolumeZone::Green => Color::Green,
        VolumeZone::Amber => Color::LightRed,
        VolumeZone::Orange => Color::Magenta,
    }
}

impl<'a> App<'a> {
    pub fn new(db: &'a Database, planned: u32) -> Result<Self> {
        let mut app = Self {
            db,
            planned,
            summary: None,
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    fn refresh(&mut self) -> Result<()> {
        self.summary = Analytics::new(self.db).week_summary(Utc::now(), self.planned)?;
        Ok(())
    }

    /// Run the dashboard until `q`; the terminal is restored even when drawing fails
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_key()?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header_text = match &self.summary {
            Some(s) => format!(
                "ironlog - Week {} ({} - {})\n{} | Sessions {}/{}",
                s.window.week_number + 1,
                s.window.start.format("%b %d"),
                s.window.end.format("%b %d"),
                s.phase.title,
                s.adherence.completed,
                s.adherence.planned,
            ),
            None => "ironlog\nComplete a workout to start week 1".to_string(),
        };
        let header = Paragraph::new(header_text)
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Volume table
        let rows: Vec<Row> = self
            .summary
            .iter()
            .flat_map(|s| s.volume.iter())
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.display_name),
                    Cell::from(format!("{:.1}", r.effective_sets)),
                    Cell::from(r.zone.label()).style(Style::default().fg(zone_color(r.zone))),
                    Cell::from(format!(
                        "{}-{} / {}-{}",
                        r.thresholds.mev_low,
                        r.thresholds.optimal_low,
                        r.thresholds.optimal_high,
                        r.thresholds.mrv_high
                    )),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Length(14),
                Constraint::Min(20),
            ],
        )
        .header(
            Row::new(vec!["Muscle", "Sets", "Zone", "MEV-Opt / Opt-MRV"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Weekly volume"));

        frame.render_widget(table, chunks[1]);

        // Footer
        let footer = Paragraph::new("q: quit | r: refresh")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_key(&mut self) -> Result<()> {
        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('r') => self.refresh()?,
                _ => {}
            }
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_summary() {
        let db = Database::open_in_memory().unwrap();
        let app = App::new(&db, 3).unwrap();
        assert!(app.summary.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_zone_colors_distinct() {
        let zones = [
            VolumeZone::Red,
            VolumeZone::Yellow,
            VolumeZone::Green,
            VolumeZone::Amber,
            VolumeZone::Orange,
        ];
        for (i, a) in zones.iter().enumerate() {
            for b in &zones[i + 1..] {
                assert_ne!(zone_color(*a), zone_color(*b));
            }
        }
    }
}
