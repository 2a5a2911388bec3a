use std::fmt;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use log::{debug, info};

use crate::minimax::Minimax;
use crate::render::Renderer;
use crate::tic_tac_toe::{Board, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Player {
    Human,
    Ai,
}

impl Player {
    pub fn mark(self) -> Mark {
        match self {
            Player::Human => Mark::X,
            Player::Ai => Mark::O,
        }
    }

    pub fn with_mark(mark: Mark) -> Option<Self> {
        [Player::Human, Player::Ai]
            .into_iter()
            .find(|player| player.mark() == mark)
    }
}

/// The player to move is always first; a move that doesn't end the game swaps the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TurnOrder([Player; 2]);

impl TurnOrder {
    pub fn new() -> Self {
        Self([Player::Human, Player::Ai])
    }

    pub fn active(&self) -> Player {
        self.0[0]
    }

    pub fn swap(&mut self) {
        self.0.reverse();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Plies the AI looks ahead before treating the position as even.
    pub fn depth_limit(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// One level up, stopping at Hard.
    pub fn escalated(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    /// One level up, wrapping from Hard back to Easy.
    pub fn cycled(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameOutcome {
    Ongoing,
    Win(Player),
    Draw,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameOutcome::Ongoing => Ok(()),
            GameOutcome::Win(player) => write!(f, "{} wins!", player.mark()),
            GameOutcome::Draw => write!(f, "It's a draw!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    AwaitingHumanMove,
    /// The AI has its turn but won't commit before `deadline`.
    AwaitingAiMove { deadline: Instant },
    GameOver,
}

/// One human against the minimax AI. Owns the board and the turn order;
/// the outcome is always read back off the board.
pub(crate) struct GameSession {
    board: Board,
    turn_order: TurnOrder,
    difficulty: Difficulty,
    state: SessionState,
    engine: Minimax<Board>,
    ai_delay: Duration,
}

impl GameSession {
    pub fn new(difficulty: Difficulty, ai_delay: Duration) -> Self {
        info!("new game at {} difficulty", difficulty);
        Self {
            board: Board::new(),
            turn_order: TurnOrder::new(),
            difficulty,
            state: SessionState::AwaitingHumanMove,
            engine: Minimax::new(Player::Ai.mark()),
            ai_delay,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.board.winner().and_then(Player::with_mark) {
            Some(player) => GameOutcome::Win(player),
            None if self.board.is_full() => GameOutcome::Draw,
            None => GameOutcome::Ongoing,
        }
    }

    /// A click on `target`, or off the board when `None`. Starts a new game
    /// when the last one is over; otherwise places the human's mark if the
    /// cell is free and in range.
    pub fn click(&mut self, target: Option<(usize, usize)>, now: Instant) {
        match self.state {
            SessionState::GameOver => self.reset(),
            SessionState::AwaitingAiMove { .. } => {
                debug!("ignoring click on {:?} while the AI is thinking", target);
            }
            SessionState::AwaitingHumanMove => {
                let Some((row, col)) = target else {
                    debug!("ignoring click off the board");
                    return;
                };
                let mark = self.turn_order.active().mark();
                if let Err(err) = self.board.place(row, col, mark) {
                    debug!("ignoring click: {}", err);
                    return;
                }
                debug!("human placed {} at ({}, {})", mark, row, col);
                self.advance(now);
            }
        }
    }

    /// Lets the AI move once its deadline has passed. Called once per loop iteration.
    pub fn tick(&mut self, now: Instant) -> anyhow::Result<()> {
        let SessionState::AwaitingAiMove { deadline } = self.state else {
            return Ok(());
        };
        if now < deadline {
            return Ok(());
        }

        let mark = Player::Ai.mark();
        let (score, action) =
            self.engine
                .best_move(&self.board, mark, self.difficulty.depth_limit())?;
        info!("AI evaluated move: {:?} (score {})", action, score);
        if let Some((row, col)) = action {
            self.board.place(row, col, mark)?;
        }
        self.advance(now);
        Ok(())
    }

    /// Switches level and starts over right away, dropping any pending AI turn.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        info!("difficulty set to {}", difficulty);
        self.difficulty = difficulty;
        self.start_fresh();
    }

    pub fn cycle_difficulty(&mut self) {
        self.select_difficulty(self.difficulty.cycled());
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        renderer.draw_grid();
        for (row, col) in self.board.cells_where(|mark| mark != Mark::Empty) {
            if let Some(mark) = self.board.get(row, col) {
                renderer.draw_mark(row, col, mark);
            }
        }
        renderer.draw_difficulty(self.difficulty);
        if self.state == SessionState::GameOver {
            renderer.draw_result(&self.outcome().to_string());
        }
    }

    fn advance(&mut self, now: Instant) {
        match self.outcome() {
            GameOutcome::Ongoing => {
                self.turn_order.swap();
                self.state = match self.turn_order.active() {
                    Player::Ai => SessionState::AwaitingAiMove {
                        deadline: now + self.ai_delay,
                    },
                    Player::Human => SessionState::AwaitingHumanMove,
                };
            }
            outcome => {
                info!("game over: {}", outcome);
                self.state = SessionState::GameOver;
            }
        }
    }

    fn reset(&mut self) {
        if self.outcome() == GameOutcome::Win(Player::Human) {
            self.difficulty = self.difficulty.escalated();
            info!("human won, difficulty raised to {}", self.difficulty);
        }
        self.start_fresh();
    }

    fn start_fresh(&mut self) {
        self.board = Board::new();
        self.turn_order = TurnOrder::new();
        self.state = SessionState::AwaitingHumanMove;
        info!("new game at {} difficulty", self.difficulty);
    }
}
