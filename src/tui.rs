use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{debug, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::render::{BoardLayout, FrameRenderer};
use crate::session::{Difficulty, GameSession};

/// What one input event asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Click { x: u16, y: u16 },
    SelectDifficulty(Difficulty),
    CycleDifficulty,
    Quit,
}

impl Command {
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('1') => Some(Command::SelectDifficulty(Difficulty::Easy)),
                KeyCode::Char('2') => Some(Command::SelectDifficulty(Difficulty::Medium)),
                KeyCode::Char('3') => Some(Command::SelectDifficulty(Difficulty::Hard)),
                KeyCode::Tab => Some(Command::CycleDifficulty),
                KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Command::Quit)
                }
                _ => None,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                Some(Command::Click {
                    x: mouse.column,
                    y: mouse.row,
                })
            }
            _ => None,
        }
    }
}

/// The terminal while the game owns it. Dropping it hands the terminal back.
pub(crate) struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Screen {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("terminal taken over");
        Ok(Self { terminal })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        ) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = self.terminal.show_cursor() {
            warn!("Failed to show cursor: {}", e);
        }
        debug!("terminal restored");
    }
}

/// Applies one command. Returns false once the player wants out.
fn apply(session: &mut GameSession, layout: &BoardLayout, command: Command, now: Instant) -> bool {
    match command {
        Command::Click { x, y } => session.click(layout.cell_at(x, y), now),
        Command::SelectDifficulty(difficulty) => session.select_difficulty(difficulty),
        Command::CycleDifficulty => session.cycle_difficulty(),
        Command::Quit => return false,
    }
    true
}

/// Draw a frame, take whatever input arrived, let the AI move if it's due. Repeat until quit.
pub(crate) fn run(
    screen: &mut Screen,
    session: &mut GameSession,
    layout: BoardLayout,
    frame_interval: Duration,
) -> Result<()> {
    loop {
        screen.terminal.draw(|frame| {
            let mut renderer = FrameRenderer::new(frame, layout);
            session.render(&mut renderer);
        })?;

        let mut timeout = frame_interval;
        while event::poll(timeout)? {
            if let Some(command) = Command::from_event(&event::read()?) {
                debug!("input: {:?} while {:?}", command, session.state());
                if !apply(session, &layout, command, Instant::now()) {
                    return Ok(());
                }
            }
            timeout = Duration::ZERO;
        }

        session.tick(Instant::now())?;
    }
}
