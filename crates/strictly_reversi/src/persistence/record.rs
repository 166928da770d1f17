//! Text codec for saved games.

use super::error::PersistenceError;
use crate::board::Board;
use crate::modes::PlayerModes;
use crate::types::{CellState, Coordinate, Disk, HEIGHT, PlayerMode, WIDTH};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Turn symbol written when neither side can move.
pub const GAME_OVER_SYMBOL: char = '*';

/// Decoded save: turn, modes and board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    turn: Option<Disk>,
    modes: PlayerModes,
    board: Board,
}

impl GameRecord {
    /// Creates a record.
    pub fn new(turn: Option<Disk>, modes: PlayerModes, board: Board) -> Self {
        Self { turn, modes, board }
    }

    /// Side to move, `None` when the game is over.
    pub fn turn(&self) -> Option<Disk> {
        self.turn
    }

    /// Player modes.
    pub fn modes(&self) -> &PlayerModes {
        &self.modes
    }

    /// Board contents.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Splits into `(turn, modes, board)`.
    pub fn into_parts(self) -> (Option<Disk>, PlayerModes, Board) {
        (self.turn, self.modes, self.board)
    }

    /// Encodes as text. Every line, including the last, ends with `\n`.
    pub fn encode(&self) -> String {
        let mut output = String::with_capacity(3 + 1 + HEIGHT * (WIDTH + 1));
        output.push(self.turn.map(Disk::symbol).unwrap_or(GAME_OVER_SYMBOL));
        for (_, mode) in self.modes.iter() {
            output.push(mode.digit());
        }
        output.push('\n');
        output.push_str(&self.board.to_string());
        output
    }

    /// Decodes text written by [`GameRecord::encode`].
    ///
    /// The whole input is validated before a record is produced, so a
    /// failure never yields partial state.
    #[instrument(skip(input), fields(len = input.len()))]
    pub fn decode(input: &str) -> Result<Self, PersistenceError> {
        let mut lines = input.lines();

        let header = lines
            .next()
            .ok_or_else(|| PersistenceError::malformed(1, "missing header line"))?;
        let (turn, modes) = decode_header(header)?;

        let mut board = Board::empty();
        let mut rows = 0;
        for (y, line) in lines.enumerate() {
            let line_no = y + 2;
            if y >= HEIGHT {
                return Err(PersistenceError::malformed(
                    line_no,
                    format!("expected {} board rows, found more", HEIGHT),
                ));
            }
            decode_row(&mut board, y, line, line_no)?;
            rows += 1;
        }

        if rows != HEIGHT {
            return Err(PersistenceError::malformed(
                rows + 2,
                format!("expected {} board rows, found {}", HEIGHT, rows),
            ));
        }

        debug!(?turn, "Record decoded");
        Ok(Self { turn, modes, board })
    }
}

fn decode_header(header: &str) -> Result<(Option<Disk>, PlayerModes), PersistenceError> {
    let mut chars = header.chars();

    let turn = match chars.next() {
        Some(GAME_OVER_SYMBOL) => None,
        Some(symbol) => Some(Disk::from_symbol(symbol).ok_or_else(|| {
            PersistenceError::malformed(1, format!("unknown turn symbol {:?}", symbol))
        })?),
        None => return Err(PersistenceError::malformed(1, "empty header line")),
    };

    let mut digits = [PlayerMode::Manual; 2];
    for (side, slot) in Disk::sides().zip(digits.iter_mut()) {
        let digit = chars.next().ok_or_else(|| {
            PersistenceError::malformed(1, format!("missing mode digit for {}", side))
        })?;
        *slot = PlayerMode::from_digit(digit).ok_or_else(|| {
            PersistenceError::malformed(1, format!("unknown mode digit {:?} for {}", digit, side))
        })?;
    }

    if chars.next().is_some() {
        return Err(PersistenceError::malformed(1, "trailing characters in header"));
    }

    let [dark, light] = digits;
    Ok((turn, PlayerModes::new(dark, light)))
}

fn decode_row(board: &mut Board, y: usize, line: &str, line_no: usize) -> Result<(), PersistenceError> {
    let mut width = 0;
    for (x, symbol) in line.chars().enumerate() {
        let coordinate = Coordinate::new(x, y).ok_or_else(|| {
            PersistenceError::malformed(line_no, format!("expected {} cells, found more", WIDTH))
        })?;
        let cell = CellState::from_symbol(symbol).ok_or_else(|| {
            PersistenceError::malformed(line_no, format!("unknown cell symbol {:?}", symbol))
        })?;
        board.set_disk(coordinate, cell);
        width += 1;
    }
    if width != WIDTH {
        return Err(PersistenceError::malformed(
            line_no,
            format!("expected {} cells, found {}", WIDTH, width),
        ));
    }
    Ok(())
}
