use std::fmt;

use tracing::{debug, info, trace};

use crate::board::{Board, Mark, SIZE};
use crate::{Error, Input};

/// Text shown in place of the winner while the game is still being played.
pub const NO_WINNER: &str = "none yet!";

/// The whole state of one game.
///
/// Fields are private: the only way to change a `GameState` is through
/// [`apply_move`](GameState::apply_move) and [`reset`](GameState::reset),
/// which keep `winner` set exactly when the game is over and freeze the
/// board once somebody has won.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Mark,
    game_over: bool,
    winner: Option<Mark>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            game_over: false,
            winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose mark the next accepted move places.
    ///
    /// This still flips on the winning move, so after a win it names the
    /// player who lost.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Says why a move at `(row, col)` would be ignored, if it would be.
    pub fn check_move(&self, row: usize, col: usize) -> Result<(), Error> {
        if self.game_over {
            return Err(Error::GameOver);
        }
        if !Board::in_bounds(row, col) {
            return Err(Error::OutOfBounds { row, col });
        }
        if !self.board.is_valid_move(row, col) {
            return Err(Error::Occupied { row, col });
        }
        Ok(())
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// Illegal moves (game over, occupied square, off the board) are ignored
    /// and leave the state untouched. Returns whether the move was accepted.
    pub fn apply_move(&mut self, row: usize, col: usize) -> bool {
        if let Err(reason) = self.check_move(row, col) {
            debug!(row, col, %reason, "ignoring move");
            return false;
        }

        let mark = self.turn;
        self.board = self.board.mark(row, col, mark);
        trace!(row, col, %mark, "placed mark");

        if let Some(winner) = self.board.get_winner() {
            info!(%winner, "game over");
            self.game_over = true;
            self.winner = Some(winner);
        }
        self.turn = self.turn.swap();
        true
    }

    /// Value-returning form of [`apply_move`](GameState::apply_move).
    pub fn with_move(&self, row: usize, col: usize) -> GameState {
        let mut next = *self;
        next.apply_move(row, col);
        next
    }

    pub fn reset(&mut self) {
        info!("resetting board");
        *self = GameState::new();
    }

    /// Successor state for one input event.
    pub fn step(&self, input: Input) -> GameState {
        match input {
            Input::Click { row, col } => self.with_move(row, col),
            Input::Reset => GameState::new(),
        }
    }

    pub fn view(&self) -> GameView {
        GameView {
            squares: self.board.display_squares(),
            winner: self.winner.map_or(NO_WINNER, |mark| mark.symbol()),
            game_over: if self.game_over { "true" } else { "false" },
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only, display-ready snapshot of a [`GameState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameView {
    /// Marks by row then column; empty squares are `""`.
    pub squares: [[&'static str; SIZE]; SIZE],
    pub winner: &'static str,
    pub game_over: &'static str,
}

impl fmt::Display for GameView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Winning Player: {}", self.winner)?;
        writeln!(f, "Game over?: {}", self.game_over)?;
        writeln!(f)?;
        for row in self.squares {
            let cells: Vec<String> = row.iter().map(|s| format!("[{:^1}]", s)).collect();
            writeln!(f, "{}", cells.join(""))?;
        }
        Ok(())
    }
}
