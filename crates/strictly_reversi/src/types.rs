//! Core domain types for reversi.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Board width in cells.
pub const WIDTH: usize = 8;

/// Board height in cells.
pub const HEIGHT: usize = 8;

/// A disk colour, and therefore a side of the game.
///
/// Iteration order (see [`Disk::sides`]) is dark before light.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Disk {
    /// Dark disk (moves first).
    #[display("Dark")]
    Dark,
    /// Light disk.
    #[display("Light")]
    Light,
}

impl Disk {
    /// Returns the opposite colour.
    pub fn flipped(self) -> Self {
        match self {
            Disk::Dark => Disk::Light,
            Disk::Light => Disk::Dark,
        }
    }

    /// Both sides, dark first.
    pub fn sides() -> impl Iterator<Item = Disk> {
        Disk::iter()
    }

    /// Slot index of this side in side-indexed storage.
    pub fn index(self) -> usize {
        match self {
            Disk::Dark => 0,
            Disk::Light => 1,
        }
    }

    /// Persisted symbol.
    pub fn symbol(self) -> char {
        match self {
            Disk::Dark => 'x',
            Disk::Light => 'o',
        }
    }

    /// Parses a persisted disk symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'x' => Some(Disk::Dark),
            'o' => Some(Disk::Light),
            _ => None,
        }
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// No disk.
    #[default]
    Empty,
    /// Cell holds a disk.
    Occupied(Disk),
}

impl CellState {
    /// Returns the disk in this cell, if any.
    pub fn disk(self) -> Option<Disk> {
        match self {
            CellState::Empty => None,
            CellState::Occupied(disk) => Some(disk),
        }
    }

    /// Persisted symbol.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '-',
            CellState::Occupied(disk) => disk.symbol(),
        }
    }

    /// Parses a persisted cell symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(CellState::Empty),
            other => Disk::from_symbol(other).map(CellState::Occupied),
        }
    }
}

impl From<Disk> for CellState {
    fn from(disk: Disk) -> Self {
        CellState::Occupied(disk)
    }
}

/// An in-bounds cell coordinate. Origin is the top-left corner,
/// `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    x: usize,
    y: usize,
}

impl Coordinate {
    /// Creates a coordinate, returning `None` outside the 8×8 grid.
    pub fn new(x: usize, y: usize) -> Option<Self> {
        (x < WIDTH && y < HEIGHT).then_some(Self { x, y })
    }

    /// Creates a coordinate from signed components, used while scanning
    /// past the edge.
    pub fn from_signed(x: isize, y: isize) -> Option<Self> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        Self::new(x, y)
    }

    /// Column.
    pub fn x(self) -> usize {
        self.x
    }

    /// Row.
    pub fn y(self) -> usize {
        self.y
    }

    /// Human label, column letter then 1-based row (`(3, 2)` is `d3`).
    pub fn label(self) -> String {
        let column = (b'a' + self.x as u8) as char;
        format!("{}{}", column, self.y + 1)
    }

    /// Parses a label (`d3`) or a pair of numbers (`3 2`, `3,2`).
    #[instrument]
    pub fn from_label_or_numbers(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        let numbers: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();
        if let [x, y] = numbers.as_slice() {
            return Self::new(x.parse().ok()?, y.parse().ok()?);
        }

        let mut chars = s.chars();
        let column = chars.next()?;
        if !column.is_ascii_lowercase() {
            return None;
        }
        let row: usize = chars.as_str().parse().ok()?;
        let x = (column as u8 - b'a') as usize;
        Self::new(x, row.checked_sub(1)?)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Who controls a side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum PlayerMode {
    /// Moves come from external input.
    #[default]
    #[display("manual")]
    #[strum(serialize = "manual", serialize = "human")]
    Manual,
    /// Moves are chosen by the executor after a delay.
    #[display("automated")]
    #[strum(serialize = "automated", serialize = "auto", serialize = "computer")]
    Automated,
}

impl PlayerMode {
    /// Persisted digit.
    pub fn digit(self) -> char {
        match self {
            PlayerMode::Manual => '0',
            PlayerMode::Automated => '1',
        }
    }

    /// Parses a persisted digit.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(PlayerMode::Manual),
            '1' => Some(PlayerMode::Automated),
            _ => None,
        }
    }
}

/// Fixed two-slot storage indexed by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideMap<T>([T; 2]);

impl<T> SideMap<T> {
    /// Creates a map from the dark and light values.
    pub fn new(dark: T, light: T) -> Self {
        Self([dark, light])
    }

    /// Iterates `(side, value)` pairs, dark first.
    pub fn iter(&self) -> impl Iterator<Item = (Disk, &T)> {
        Disk::sides().zip(self.0.iter())
    }

    /// Iterates values mutably, dark first.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }
}

impl<T> Index<Disk> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Disk) -> &T {
        &self.0[side.index()]
    }
}

impl<T> IndexMut<Disk> for SideMap<T> {
    fn index_mut(&mut self, side: Disk) -> &mut T {
        &mut self.0[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_flipped() {
        assert_eq!(Disk::Dark.flipped(), Disk::Light);
        assert_eq!(Disk::Light.flipped(), Disk::Dark);
    }

    #[test]
    fn test_sides_dark_first() {
        let sides: Vec<_> = Disk::sides().collect();
        assert_eq!(sides, vec![Disk::Dark, Disk::Light]);
    }

    #[test]
    fn test_cell_symbols() {
        for cell in [
            CellState::Empty,
            CellState::Occupied(Disk::Dark),
            CellState::Occupied(Disk::Light),
        ] {
            assert_eq!(CellState::from_symbol(cell.symbol()), Some(cell));
        }
        assert_eq!(CellState::from_symbol('*'), None);
        assert_eq!(Disk::from_symbol('-'), None);
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(7, 7).is_some());
        assert!(Coordinate::new(8, 0).is_none());
        assert!(Coordinate::new(0, 8).is_none());
        assert!(Coordinate::from_signed(-1, 3).is_none());
    }

    #[test]
    fn test_coordinate_labels() {
        let c = Coordinate::new(3, 2).unwrap();
        assert_eq!(c.label(), "d3");
        assert_eq!(Coordinate::from_label_or_numbers("d3"), Some(c));
        assert_eq!(Coordinate::from_label_or_numbers("D3"), Some(c));
        assert_eq!(Coordinate::from_label_or_numbers("3 2"), Some(c));
        assert_eq!(Coordinate::from_label_or_numbers("3,2"), Some(c));
        assert_eq!(Coordinate::from_label_or_numbers("i1"), None);
        assert_eq!(Coordinate::from_label_or_numbers("a0"), None);
        assert_eq!(Coordinate::from_label_or_numbers("a9"), None);
        assert_eq!(Coordinate::from_label_or_numbers(""), None);
    }

    #[test]
    fn test_player_mode_parse() {
        assert_eq!("auto".parse::<PlayerMode>().ok(), Some(PlayerMode::Automated));
        assert_eq!("Manual".parse::<PlayerMode>().ok(), Some(PlayerMode::Manual));
        assert_eq!(PlayerMode::from_digit('1'), Some(PlayerMode::Automated));
        assert_eq!(PlayerMode::from_digit('2'), None);
    }

    #[test]
    fn test_side_map_indexing() {
        let mut map = SideMap::new(1, 2);
        map[Disk::Light] += 10;
        assert_eq!(map[Disk::Dark], 1);
        assert_eq!(map[Disk::Light], 12);
    }
}
