//! Interfaces the executor consumes from the surrounding UI.
//!
//! The core never renders. It writes logical cell state, then asks these
//! collaborators to show it.

use crate::board::Board;
use crate::types::{Coordinate, Disk};

/// Plays one visual disk flip at a time.
#[async_trait::async_trait]
pub trait AnimationDriver: Send {
    /// Shows `disk` appearing at `coordinate`.
    ///
    /// Returns `false` if the animation did not finish; the executor then
    /// applies the remaining steps without animation.
    async fn flip(&mut self, coordinate: Coordinate, disk: Disk) -> bool;
}

/// One-way notifications to the UI.
///
/// Implementations are shared with cleanup actions of cancellation tokens,
/// so methods take `&self`.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// The board changed without animation.
    fn board_changed(&self, board: &Board);

    /// The side to move changed; `None` means the game is over.
    fn turn_changed(&self, turn: Option<Disk>);

    /// Disk counts changed.
    fn counts_changed(&self, dark: usize, light: usize);

    /// Start or stop the "thinking" indicator for an automated side.
    fn busy(&self, side: Disk, busy: bool);

    /// `side` has no legal move and must pass.
    ///
    /// Returning is the acknowledgement: the executor then continues turn
    /// advancement.
    async fn pass(&self, side: Disk);
}

/// Animation driver that finishes every step instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantAnimation;

#[async_trait::async_trait]
impl AnimationDriver for InstantAnimation {
    async fn flip(&mut self, _coordinate: Coordinate, _disk: Disk) -> bool {
        true
    }
}
