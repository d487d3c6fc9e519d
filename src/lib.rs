use std::{num::ParseIntError, str::FromStr};

use sodium::{Cell, CellLoop, SodiumCtx, Stream};
use thiserror::Error;

mod board;
mod game;
pub mod setup;

pub use board::{Board, Mark, SIZE};
pub use game::{GameState, GameView, NO_WINNER};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid move: square ({row}, {col}) is already taken!")]
    Occupied { row: usize, col: usize },

    #[error("invalid square: ({row}, {col}) is off the board!")]
    OutOfBounds { row: usize, col: usize },

    #[error("the game is over, reset the board to play again!")]
    GameOver,

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("invalid input: {0:?}, expected \"<row> <col>\" or \"reset\"")]
    InvalidInput(String),
}

/// The two things a player can do to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Click { row: usize, col: usize },
    Reset,
}

impl FromStr for Input {
    type Err = Error;

    /// Parses `"<row> <col>"` (space or comma separated, 0-based) or
    /// `"reset"`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("reset") || line.eq_ignore_ascii_case("r") {
            return Ok(Input::Reset);
        }

        let parts: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        match parts.as_slice() {
            [row, col] => {
                let row = row.parse::<usize>().map_err(Error::InvalidInteger)?;
                let col = col.parse::<usize>().map_err(Error::InvalidInteger)?;
                Ok(Input::Click { row, col })
            }
            _ => Err(Error::InvalidInput(line.to_string())),
        }
    }
}

/// A game wired up as an FRP network over a stream of [`Input`]s.
pub struct TicTacToe {
    pub state: Cell<GameState>,
    pub moves: Stream<(usize, usize, Mark)>,
    pub winner: Stream<Mark>,
    pub resets: Stream<()>,
    pub ignored: Stream<Error>,
}

impl TicTacToe {
    pub fn new(ctx: &SodiumCtx, input: &Stream<Input>) -> TicTacToe {
        ctx.transaction(|| {
            let state_cell_loop: CellLoop<GameState> = ctx.new_cell_loop();
            let state_cell_fwd = state_cell_loop.cell();

            let state_stream =
                input.snapshot(&state_cell_fwd, |input: &Input, state: &GameState| {
                    state.step(*input)
                });
            let state_cell = state_stream.hold(GameState::new());
            state_cell_loop.loop_(&state_cell);

            let (moves, ignored) = input
                .snapshot(&state_cell_fwd, |input: &Input, state: &GameState| {
                    click_outcome(input, state)
                })
                .filter_option()
                .split_res();

            let winner = input
                .snapshot(&state_cell_fwd, |input: &Input, state: &GameState| {
                    if state.is_game_over() {
                        None
                    } else {
                        state.step(*input).winner()
                    }
                })
                .filter_option();

            let resets = input
                .filter(|input: &Input| matches!(input, Input::Reset))
                .map(|_: &Input| ());

            TicTacToe {
                state: state_cell,
                moves,
                winner,
                resets,
                ignored,
            }
        })
    }
}

fn click_outcome(input: &Input, state: &GameState) -> Option<Result<(usize, usize, Mark), Error>> {
    match *input {
        Input::Click { row, col } => Some(
            state
                .check_move(row, col)
                .map(|()| (row, col, state.turn())),
        ),
        Input::Reset => None,
    }
}
