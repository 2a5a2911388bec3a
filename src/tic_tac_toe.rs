use std::fmt;

use derive_more::{Display, Error};

use crate::game::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            Mark::Empty => ".",
            Mark::X => "X",
            Mark::O => "O",
        };
        write!(f, "{}", symbol)
    }
}

/// Rejected placement. The session swallows these; they never reach the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub(crate) enum IllegalMove {
    #[display("cell ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },
    #[display("cell ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Board {
    spots: [[Mark; 3]; 3],
}

impl Board {
    pub fn new() -> Self {
        Self {
            spots: [[Mark::Empty; 3]; 3],
        }
    }

    #[cfg(test)]
    pub fn from_rows(spots: [[Mark; 3]; 3]) -> Self {
        Self { spots }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.spots.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Puts `mark` into an empty, in-range cell. A cell never goes back to
    /// empty; only a fresh board does that.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), IllegalMove> {
        match self.get(row, col) {
            None => Err(IllegalMove::OutOfRange { row, col }),
            Some(Mark::Empty) => {
                self.spots[row][col] = mark;
                Ok(())
            }
            Some(_) => Err(IllegalMove::Occupied { row, col }),
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells_where(|mark| mark == Mark::Empty).next().is_none()
    }

    /// Row-major walk over the cells whose mark satisfies `predicate`.
    pub fn cells_where<P>(&self, predicate: P) -> impl Iterator<Item = (usize, usize)> + '_
    where
        P: Fn(Mark) -> bool + 'static,
    {
        (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .filter(move |&(row, col)| predicate(self.spots[row][col]))
    }

    pub fn winner(&self) -> Option<Mark> {
        winner(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks rows, then columns, then both diagonals for three equal
/// non-empty marks. A legal board has at most one such line, so the
/// order never changes the answer.
pub(crate) fn winner(board: &Board) -> Option<Mark> {
    let spots = &board.spots;

    // Check rows
    for row in 0..3 {
        let mark = spots[row][0];
        if mark != Mark::Empty && spots[row][1] == mark && spots[row][2] == mark {
            return Some(mark);
        }
    }

    // Check columns
    for col in 0..3 {
        let mark = spots[0][col];
        if mark != Mark::Empty && spots[1][col] == mark && spots[2][col] == mark {
            return Some(mark);
        }
    }

    // Check diagonals
    let center = spots[1][1];
    if center != Mark::Empty {
        if spots[0][0] == center && spots[2][2] == center {
            return Some(center);
        }
        if spots[0][2] == center && spots[2][0] == center {
            return Some(center);
        }
    }

    None
}

impl Game for Board {
    type Action = (usize, usize);
    type Player = Mark;

    fn step(&mut self, action: Self::Action, player: Self::Player) -> anyhow::Result<()> {
        let (row, col) = action;
        self.place(row, col, player)?;
        Ok(())
    }

    fn get_available_moves(&self) -> Vec<Self::Action> {
        self.cells_where(|mark| mark == Mark::Empty).collect()
    }

    fn opponent(player: Self::Player) -> Self::Player {
        player.opponent()
    }

    fn done(&self) -> bool {
        self.is_full()
    }

    fn check_winner(&self) -> Option<Self::Player> {
        winner(self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.spots {
            for spot in row {
                write!(f, "{} ", spot)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    use super::Mark::{Empty as E, O, X};

    const LINES: [[(usize, usize); 3]; 8] = [
        [(0, 0), (0, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2)],
        [(2, 0), (2, 1), (2, 2)],
        [(0, 0), (1, 0), (2, 0)],
        [(0, 1), (1, 1), (2, 1)],
        [(0, 2), (1, 2), (2, 2)],
        [(0, 0), (1, 1), (2, 2)],
        [(0, 2), (1, 1), (2, 0)],
    ];

    fn uniform_lines(board: &Board) -> Vec<Mark> {
        LINES
            .iter()
            .filter_map(|line| {
                let marks: Vec<Mark> = line.iter().map(|&(r, c)| board.spots[r][c]).collect();
                (marks[0] != Mark::Empty && marks.iter().all(|&m| m == marks[0])).then(|| marks[0])
            })
            .collect()
    }

    #[test]
    fn test_new() {
        let board = Board::new();
        assert_eq!(board.spots, [[Mark::Empty; 3]; 3]);
        assert!(!board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_place() {
        let mut board = Board::new();
        assert!(board.place(0, 0, X).is_ok());
        assert_eq!(board.get(0, 0), Some(X));

        assert_eq!(board.place(0, 0, O), Err(IllegalMove::Occupied { row: 0, col: 0 }));
        assert_eq!(board.get(0, 0), Some(X));

        assert_eq!(board.place(3, 1, O), Err(IllegalMove::OutOfRange { row: 3, col: 1 }));
        assert_eq!(board.place(1, 7, O), Err(IllegalMove::OutOfRange { row: 1, col: 7 }));

        assert!(board.place(2, 2, O).is_ok());
        assert_eq!(board.get(2, 2), Some(O));
    }

    #[test]
    fn test_illegal_move_message() {
        let err = IllegalMove::Occupied { row: 1, col: 2 };
        assert_eq!(err.to_string(), "cell (1, 2) is already taken");
    }

    #[test]
    fn test_cells_where_is_row_major_and_restartable() {
        let board = Board::from_rows([[X, E, O], [E, X, E], [O, E, E]]);
        let empty: Vec<_> = board.cells_where(|m| m == Mark::Empty).collect();
        assert_eq!(empty, vec![(0, 1), (1, 0), (1, 2), (2, 1), (2, 2)]);

        let xs: Vec<_> = board.cells_where(|m| m == Mark::X).collect();
        assert_eq!(xs, vec![(0, 0), (1, 1)]);
        assert_eq!(board.cells_where(|m| m == Mark::X).count(), 2);
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::from_rows([[X, O, X], [X, O, O], [O, X, E]]);
        assert!(!board.is_full());
        board.place(2, 2, X).unwrap();
        assert!(board.is_full());
    }

    #[test]
    fn test_check_winner() {
        let board = Board::from_rows([[X, E, E], [E, X, E], [E, E, X]]);
        assert_eq!(winner(&board), Some(X));

        let board = Board::from_rows([[E, E, O], [E, O, E], [O, E, E]]);
        assert_eq!(winner(&board), Some(O));

        let board = Board::from_rows([[E, O, E], [X, O, E], [X, O, X]]);
        assert_eq!(winner(&board), Some(O));

        let board = Board::from_rows([[X, O, E], [E, X, O], [O, E, E]]);
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_top_row_wins_regardless_of_rest() {
        for rest in [[O, O, E], [E, E, E], [O, X, O]] {
            let board = Board::from_rows([[X, X, X], rest, [O, E, O]]);
            assert_eq!(board.winner(), Some(X));
        }
    }

    #[test]
    fn test_full_board_without_line_is_no_winner() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, X]]);
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_winner_matches_line_scan_on_random_boards() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let mut spots = [[Mark::Empty; 3]; 3];
            for row in spots.iter_mut() {
                for spot in row.iter_mut() {
                    *spot = [E, X, O][rng.gen_range(0..3)];
                }
            }
            let board = Board::from_rows(spots);
            let lines = uniform_lines(&board);
            match board.winner() {
                Some(mark) => assert!(lines.contains(&mark), "{}", board),
                None => assert!(lines.is_empty(), "{}", board),
            }
        }
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows([[X, E, E], [E, O, E], [E, E, E]]);
        assert_eq!(board.to_string(), "X . . \n. O . \n. . . \n");
    }
}
