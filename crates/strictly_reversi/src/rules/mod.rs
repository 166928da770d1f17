//! Move rules for reversi.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are separated from
//! board storage so contracts and the executor can compose them.

pub mod flips;
pub mod legal;

pub use flips::{Direction, flipped_coordinates};
pub use legal::{can_place, has_legal_move, legal_moves};
