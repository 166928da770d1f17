//! Strictly Reversi - rules engine and turn management for Reversi
//!
//! # Architecture
//!
//! - **Board**: 8x8 grid of cells, standard starting position
//! - **Rules**: flip computation and legal move enumeration
//! - **Turn**: side to move, forced passes, game end and winner
//! - **Executor**: applies placements (optionally animated), advances
//!   turns, schedules automated players and persists after every change
//! - **Persistence**: flat nine-line text save format
//!
//! Coordinates have their origin at the top-left corner: `x` is the
//! column, `y` the row, and `y` grows downwards.
//!
//! # Example
//!
//! ```
//! use strictly_reversi::{Board, Coordinate, Disk, Placement, legal_moves};
//!
//! let mut board = Board::new();
//! let moves = legal_moves(&board, Disk::Dark);
//! assert_eq!(moves.len(), 4);
//!
//! let d3 = Coordinate::new(3, 2).unwrap();
//! let placement = Placement::compute(&board, Disk::Dark, d3).unwrap();
//! placement.apply(&mut board);
//! assert_eq!(board.count_disks(Disk::Dark), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod cancel;
mod collaborators;
mod executor;
mod game;
mod modes;
mod turn;
mod types;

// Public modules
pub mod contracts;
pub mod invariants;
pub mod persistence;
pub mod rules;

// Crate-level exports - Core types
pub use types::{CellState, Coordinate, Disk, HEIGHT, PlayerMode, SideMap, WIDTH};

// Crate-level exports - Board and rules
pub use board::Board;
pub use rules::{Direction, can_place, flipped_coordinates, has_legal_move, legal_moves};

// Crate-level exports - Game state
pub use game::Game;
pub use modes::PlayerModes;
pub use turn::{GameStatus, TurnAdvance, TurnController};

// Crate-level exports - Placements
pub use action::{Placement, PlacementError};

// Crate-level exports - Execution
pub use cancel::CancellationToken;
pub use collaborators::{AnimationDriver, InstantAnimation, Notifier};
pub use executor::{
    AnimationStatus, DEFAULT_AUTOMATED_DELAY, DueMove, ExecutorCanceller, ExecutorSettings,
    PlacementReport, TurnExecutor,
};

// Crate-level exports - Persistence
pub use persistence::{GameRecord, GameStore, MemoryStore, PersistenceError, PersistenceErrorKind, SaveFile};
