use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::session::Difficulty;
use crate::tic_tac_toe::Mark;

const BACKGROUND: Color = Color::Rgb(185, 105, 200);
const STROKE: Color = Color::White;

const X_GLYPH: [&str; 3] = ["\\   /", "  X  ", "/   \\"];
const O_GLYPH: [&str; 3] = ["╭───╮", "│   │", "╰───╯"];

/// What the game asks of whoever draws it.
pub(crate) trait Renderer {
    fn draw_grid(&mut self);

    fn draw_mark(&mut self, row: usize, col: usize, mark: Mark);

    /// Covers the board with `message` and a restart hint.
    fn draw_result(&mut self, message: &str);

    fn draw_difficulty(&mut self, difficulty: Difficulty);
}

/// Where the board sits on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoardLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            origin_x: 2,
            origin_y: 1,
            cell_width: 13,
            cell_height: 5,
        }
    }
}

impl BoardLayout {
    /// Board cell under a screen position. Anything right of or below the
    /// board still divides out to a row or column past 2; the board refuses those.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let dx = x.checked_sub(self.origin_x)?;
        let dy = y.checked_sub(self.origin_y)?;
        Some((
            usize::from(dy / self.cell_height),
            usize::from(dx / self.cell_width),
        ))
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.origin_x + self.cell_width * col as u16,
            self.origin_y + self.cell_height * row as u16,
            self.cell_width,
            self.cell_height,
        )
    }

    pub fn board_rect(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.cell_width * 3,
            self.cell_height * 3,
        )
    }
}

/// Draws into one ratatui frame.
pub(crate) struct FrameRenderer<'a, 'f> {
    frame: &'a mut Frame<'f>,
    layout: BoardLayout,
}

impl<'a, 'f> FrameRenderer<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>, layout: BoardLayout) -> Self {
        Self { frame, layout }
    }

    // Rendering past the buffer edge panics, so a small terminal gets a cropped board.
    fn clip(&self, rect: Rect) -> Rect {
        rect.intersection(self.frame.area())
    }
}

impl Renderer for FrameRenderer<'_, '_> {
    fn draw_grid(&mut self) {
        let style = Style::default().bg(BACKGROUND).fg(STROKE);
        let board = self.clip(self.layout.board_rect());
        self.frame.render_widget(Block::default().style(style), board);
        for row in 0..3 {
            for col in 0..3 {
                let cell = self.clip(self.layout.cell_rect(row, col));
                self.frame
                    .render_widget(Block::default().borders(Borders::ALL).style(style), cell);
            }
        }
    }

    fn draw_mark(&mut self, row: usize, col: usize, mark: Mark) {
        let glyph = match mark {
            Mark::X => X_GLYPH,
            Mark::O => O_GLYPH,
            Mark::Empty => return,
        };
        let cell = self.layout.cell_rect(row, col);
        let inner = Rect::new(cell.x + 1, cell.y + 1, cell.width - 2, cell.height - 2);
        let paragraph = Paragraph::new(glyph.iter().map(|line| Line::from(*line)).collect::<Vec<_>>())
            .style(
                Style::default()
                    .bg(BACKGROUND)
                    .fg(STROKE)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        let inner = self.clip(inner);
        self.frame.render_widget(paragraph, inner);
    }

    fn draw_result(&mut self, message: &str) {
        let board = self.clip(self.layout.board_rect());
        let lines = vec![
            Line::from(""),
            Line::from(""),
            Line::from(""),
            Line::from(""),
            Line::from(message.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from("Click anywhere to restart"),
        ];
        self.frame.render_widget(Clear, board);
        self.frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().bg(Color::White).fg(Color::Black))
                .alignment(Alignment::Center),
            board,
        );
    }

    fn draw_difficulty(&mut self, difficulty: Difficulty) {
        let board = self.layout.board_rect();
        let label = Rect::new(board.x, board.y + board.height, board.width.max(60), 2);
        let lines = vec![
            Line::from(format!("Difficulty: {}", difficulty)),
            Line::from("1/2/3 pick level, Tab cycles, q quits")
                .style(Style::default().fg(Color::DarkGray)),
        ];
        let label = self.clip(label);
        self.frame.render_widget(Paragraph::new(lines), label);
    }
}
