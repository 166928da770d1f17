//! Save format and storage.
//!
//! A save is one flat text record:
//!
//! ```text
//! x01          turn symbol, dark mode digit, light mode digit
//! --------     eight board rows, top to bottom
//! ...
//! ```
//!
//! Turn symbols are `x` (dark), `o` (light) and `*` when the game is over.
//! Cells are `x`, `o` and `-`. Mode digits are `0` (manual) and `1`
//! (automated).

mod error;
mod record;
mod store;

pub use error::{PersistenceError, PersistenceErrorKind};
pub use record::{GAME_OVER_SYMBOL, GameRecord};
pub use store::{GameStore, MemoryStore, SaveFile};
