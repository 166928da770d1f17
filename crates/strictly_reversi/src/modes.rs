//! Per-side control mode registry.

use crate::types::{Disk, PlayerMode, SideMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which sides are played manually and which are automated.
///
/// Defaults to manual for both. Changing a mode through the
/// [`TurnExecutor`](crate::TurnExecutor) may also schedule or cancel an
/// automated move; this type only stores the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerModes {
    modes: SideMap<PlayerMode>,
}

impl PlayerModes {
    /// Creates a registry with explicit modes.
    pub fn new(dark: PlayerMode, light: PlayerMode) -> Self {
        Self {
            modes: SideMap::new(dark, light),
        }
    }

    /// Mode of `side`.
    pub fn get(&self, side: Disk) -> PlayerMode {
        self.modes[side]
    }

    /// Sets the mode of `side`.
    #[instrument(skip(self))]
    pub fn set(&mut self, side: Disk, mode: PlayerMode) {
        debug!(previous = %self.modes[side], "Player mode set");
        self.modes[side] = mode;
    }

    /// `(side, mode)` pairs, dark first.
    pub fn iter(&self) -> impl Iterator<Item = (Disk, PlayerMode)> + '_ {
        self.modes.iter().map(|(side, mode)| (side, *mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manual() {
        let modes = PlayerModes::default();
        assert_eq!(modes.get(Disk::Dark), PlayerMode::Manual);
        assert_eq!(modes.get(Disk::Light), PlayerMode::Manual);
    }

    #[test]
    fn test_set_only_touches_one_side() {
        let mut modes = PlayerModes::default();
        modes.set(Disk::Light, PlayerMode::Automated);
        assert_eq!(modes.get(Disk::Dark), PlayerMode::Manual);
        assert_eq!(modes.get(Disk::Light), PlayerMode::Automated);
        let collected: Vec<_> = modes.iter().collect();
        assert_eq!(
            collected,
            vec![(Disk::Dark, PlayerMode::Manual), (Disk::Light, PlayerMode::Automated)]
        );
    }
}
