use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::events::Events;
use crate::config::Config;
use crate::indicator;
use crate::service::{Command, ServiceHandle};
use crate::stopwatch::TimerSnapshot;
use crate::time_format::TimeFormat;
use crate::TimerDisplay;

use std::error::Error;
use std::io::{stdout, Stdout, Write};

use async_trait::async_trait;
use log::debug;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

const INPUT_POLL_RATE: u64 = 50;

// control state derived solely from the snapshot flags
pub struct Controls {
    pub start_label: &'static str,
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub stop_enabled: bool,
    pub status: &'static str,
}

impl Controls {
    pub fn from_snapshot(snapshot: &TimerSnapshot) -> Self {
        Self {
            start_label: if snapshot.paused { "resume" } else { "start" },
            start_enabled: !(snapshot.running && !snapshot.paused),
            pause_enabled: snapshot.running && !snapshot.paused,
            stop_enabled: snapshot.running || snapshot.paused,
            status: if snapshot.paused {
                "paused"
            } else if snapshot.running {
                "running"
            } else {
                "stopped"
            },
        }
    }
}

pub struct App {
    service: ServiceHandle,
    updates: broadcast::Receiver<TimerSnapshot>,
    snapshot: TimerSnapshot,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: Events,
    visible: bool,
    confirm_exit: bool,
    background: [u8; 3],
    foreground: [u8; 3],
}

impl App {
    pub fn new(service: &ServiceHandle, config: &Config) -> Result<Self, Box<dyn Error>> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        Ok(Self {
            service: service.clone(),
            updates: service.subscribe(),
            snapshot: TimerSnapshot::default(),
            terminal,
            events: Events::new(INPUT_POLL_RATE),
            visible: !config.start_hidden,
            confirm_exit: false,
            background: config.indicator_background,
            foreground: config.indicator_foreground,
        })
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.confirm_exit {
            if key == KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE) {
                return true;
            }
            self.confirm_exit = false;
            return false;
        }

        if key == KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)
            || key == KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        {
            self.confirm_exit = true;
        }
        if key == KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE) {
            self.service.send(Command::Start);
        }
        if key == KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE) {
            self.service.send(Command::Pause);
        }
        if key == KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE) {
            self.service.send(Command::Stop);
        }
        if key == KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE) {
            // the timer does not care whether anyone is watching
            self.visible = !self.visible;
        }
        false
    }

    fn draw(&mut self) -> Result<(), Box<dyn Error>> {
        let snapshot = self.snapshot;
        let controls = Controls::from_snapshot(&snapshot);
        let time = TimeFormat::default().format_elapsed(snapshot.elapsed_ms);
        let icon = indicator::icon(&snapshot, self.background, self.foreground);
        let tooltip = indicator::tooltip(&snapshot);
        let visible = self.visible;
        let confirm_exit = self.confirm_exit;

        self.terminal.draw(|f| {
            let area = f.size();
            // nothing to render into, skip this update instead of failing it
            if area.height < 3 || area.width < 20 {
                return;
            }

            if !visible {
                let style = Style::default()
                    .fg(rgb(icon.foreground))
                    .bg(rgb(icon.background));
                let lines = vec![
                    Spans::from(Span::styled(format!(" {} ", icon.text), style)),
                    Spans::from(tooltip.as_str()),
                ];
                let tray = Paragraph::new(lines).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("traywatch (hidden, h to show)"),
                );
                f.render_widget(tray, area);
                return;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(1),
                    ]
                    .as_ref(),
                )
                .split(area);

            let clock = Paragraph::new(time.as_str())
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("traywatch"));
            f.render_widget(clock, chunks[0]);

            let buttons = Spans::from(vec![
                button(controls.start_label, controls.start_enabled),
                Span::raw("  "),
                button("pause", controls.pause_enabled),
                Span::raw("  "),
                button("stop", controls.stop_enabled),
            ]);
            f.render_widget(
                Paragraph::new(vec![buttons]).alignment(Alignment::Center),
                chunks[1],
            );

            let status = if confirm_exit {
                "quit? press q again to confirm".to_string()
            } else {
                format!("stopwatch {}", controls.status)
            };
            f.render_widget(
                Paragraph::new(status.as_str()).alignment(Alignment::Center),
                chunks[2],
            );

            let hints = Paragraph::new("space start/resume  p pause  r stop  h hide  q quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(hints, chunks[3]);
        })?;
        Ok(())
    }

    fn quit(&mut self) -> Result<(), Box<dyn Error>> {
        disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

#[async_trait]
impl TimerDisplay for App {
    async fn run(&mut self) -> Result<bool, Box<dyn Error>> {
        tokio::select! {
            snapshot = self.updates.recv() => match snapshot {
                Ok(snapshot) => self.snapshot = snapshot,
                Err(RecvError::Lagged(missed)) => debug!("skipped {} stale snapshots", missed),
                Err(RecvError::Closed) => {
                    self.quit()?;
                    return Ok(true);
                }
            },
            key = self.events.next() => {
                if let Some(key) = key {
                    if self.handle_key(key) {
                        self.quit()?;
                        return Ok(true);
                    }
                }
            }
        }

        self.draw()?;
        Ok(false)
    }
}

fn button(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("[ {} ]", label), style)
}

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(color[0], color[1], color[2])
}
