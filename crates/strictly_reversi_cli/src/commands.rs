//! Console commands typed during a game.

use derive_more::{Display, Error};
use std::str::FromStr;
use strictly_reversi::{Coordinate, Disk, PlayerMode};
use tracing::instrument;

/// One line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a disk for the side to move.
    Place(Coordinate),
    /// Change who controls a side.
    Mode(Disk, PlayerMode),
    /// Abandon the game and start over.
    Reset,
    /// Print the board again.
    Board,
    /// Print the command list.
    Help,
    /// Leave the game. It stays saved.
    Quit,
}

/// Unparseable console input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// Nothing was typed.
    #[display("empty input")]
    Empty,
    /// `mode` needs a side and a mode.
    #[display("usage: mode <dark|light> <manual|auto>")]
    ModeUsage,
    /// The input is neither a command nor a cell.
    #[display("unrecognised input '{}' (type 'help')", _0)]
    Unrecognised(#[error(not(source))] String),
}

/// Command list printed by `help`.
pub const HELP: &str = "\
Commands:
  d3 | 3 2                     place a disk (column letter + row, or x y)
  mode <dark|light> <manual|auto>
  board                        print the board
  reset                        start a new game
  quit                         leave (the game stays saved)";

fn parse_side(s: &str) -> Option<Disk> {
    match s.to_ascii_lowercase().as_str() {
        "dark" | "x" | "black" => Some(Disk::Dark),
        "light" | "o" | "white" => Some(Disk::Light),
        _ => None,
    }
}

impl FromStr for Command {
    type Err = CommandError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(CommandError::Empty),
            [word] if word.eq_ignore_ascii_case("reset") => Ok(Command::Reset),
            [word] if word.eq_ignore_ascii_case("board") => Ok(Command::Board),
            [word] if word.eq_ignore_ascii_case("help") || *word == "?" => Ok(Command::Help),
            [word] if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") => {
                Ok(Command::Quit)
            }
            [word, rest @ ..] if word.eq_ignore_ascii_case("mode") => match rest {
                [side, mode] => {
                    let side = parse_side(side).ok_or(CommandError::ModeUsage)?;
                    let mode = PlayerMode::from_str(mode).map_err(|_| CommandError::ModeUsage)?;
                    Ok(Command::Mode(side, mode))
                }
                _ => Err(CommandError::ModeUsage),
            },
            _ => Coordinate::from_label_or_numbers(line)
                .map(Command::Place)
                .ok_or_else(|| CommandError::Unrecognised(line.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    #[test]
    fn test_parse_cells() {
        assert_eq!("d3".parse::<Command>(), Ok(Command::Place(at(3, 2))));
        assert_eq!("  D3 ".parse::<Command>(), Ok(Command::Place(at(3, 2))));
        assert_eq!("3 2".parse::<Command>(), Ok(Command::Place(at(3, 2))));
        assert_eq!("h8".parse::<Command>(), Ok(Command::Place(at(7, 7))));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("BOARD".parse::<Command>(), Ok(Command::Board));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            "mode light auto".parse::<Command>(),
            Ok(Command::Mode(Disk::Light, PlayerMode::Automated))
        );
        assert_eq!(
            "mode x manual".parse::<Command>(),
            Ok(Command::Mode(Disk::Dark, PlayerMode::Manual))
        );
        assert_eq!("mode light".parse::<Command>(), Err(CommandError::ModeUsage));
        assert_eq!("mode grey auto".parse::<Command>(), Err(CommandError::ModeUsage));
    }

    #[test]
    fn test_parse_rejects_off_board_and_noise() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert!(matches!("i1".parse::<Command>(), Err(CommandError::Unrecognised(_))));
        assert!(matches!("8 0".parse::<Command>(), Err(CommandError::Unrecognised(_))));
        assert!(matches!("hello".parse::<Command>(), Err(CommandError::Unrecognised(_))));
    }
}
