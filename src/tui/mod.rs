//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
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

use crate::model::Workout;
use crate::store::{SortKey, WorkoutStore};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App {
    store: WorkoutStore,
    workouts: Vec<Workout>,
    should_quit: bool,
}

impl App {
    pub fn new(store: WorkoutStore) -> Self {
        let workouts = store.filter("", SortKey::Date);
        Self {
            store,
            workouts,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new(format!(
            "liftlog - Workout Tracker ({} workouts)",
            self.store.len()
        ))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Workout table, most recent first
        let rows: Vec<Row> = self
            .workouts
            .iter()
            .map(|w| {
                let exercises = w
                    .sets
                    .iter()
                    .map(|s| s.exercise.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Row::new(vec![
                    Cell::from(w.date.clone()),
                    Cell::from(w.name.clone()),
                    Cell::from(w.sets.len().to_string()),
                    Cell::from(if w.video_uri.is_some() { "yes" } else { "" }),
                    Cell::from(exercises),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(20),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Min(20),
            ],
        )
        .header(
            Row::new(vec!["Date", "Name", "Sets", "Video", "Exercises"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Workouts"));

        frame.render_widget(table, chunks[1]);

        // Footer
        let footer = Paragraph::new("q: quit | r: refresh")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('r') => {
                            self.store.reload();
                            self.workouts = self.store.filter("", SortKey::Date);
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
