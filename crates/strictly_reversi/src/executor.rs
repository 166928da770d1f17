//! Turn orchestration: waiting for players, automated moves, animated
//! placements and turn advancement.
//!
//! All game state is mutated through `&mut TurnExecutor`, on one task.
//! Automated-move timers run as spawned tasks that only sleep, watch their
//! token and post a [`DueMove`] back to the executor's queue; the move is
//! applied when the owner hands it to [`TurnExecutor::play_due`].

use crate::action::{Placement, PlacementError};
use crate::cancel::CancellationToken;
use crate::collaborators::{AnimationDriver, Notifier};
use crate::contracts::{Contract, PlacementContract, SidesTurn, assert_invariants};
use crate::game::Game;
use crate::invariants::{InvariantSet, ReversiInvariants, describe};
use crate::persistence::{GameRecord, GameStore, PersistenceError};
use crate::rules::legal_moves;
use crate::turn::TurnAdvance;
use crate::types::{Coordinate, Disk, PlayerMode, SideMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Default pause before an automated side moves.
pub const DEFAULT_AUTOMATED_DELAY: Duration = Duration::from_secs(2);

/// Executor tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorSettings {
    /// Pause before an automated move is played, so it is visible.
    pub automated_delay: Duration,
    /// Whether placements go through the animation driver.
    pub animate: bool,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            automated_delay: DEFAULT_AUTOMATED_DELAY,
            animate: true,
        }
    }
}

/// How the cells of a placement reached the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationStatus {
    /// Applied at once, no animation requested.
    Immediate,
    /// Every step animated.
    Completed,
    /// The driver stopped early; remaining steps were applied at once.
    Interrupted,
    /// The animation token was cancelled. Steps already applied stay, the
    /// rest were dropped, nothing was saved and the turn must not advance.
    Cancelled,
}

/// Outcome of a placement.
#[derive(Debug, Clone)]
pub struct PlacementReport {
    /// The placement that was applied.
    pub placement: Placement,
    /// How it was applied.
    pub status: AnimationStatus,
    /// Save failure, if any. Play continues regardless.
    pub save_error: Option<PersistenceError>,
}

impl PlacementReport {
    /// True unless the placement was cancelled part-way.
    pub fn is_complete(&self) -> bool {
        self.status != AnimationStatus::Cancelled
    }
}

/// An automated move whose delay has elapsed.
#[derive(Debug)]
pub struct DueMove {
    side: Disk,
    coordinate: Coordinate,
    token: CancellationToken,
}

impl DueMove {
    /// Side that moves.
    pub fn side(&self) -> Disk {
        self.side
    }

    /// Chosen cell.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// At most one animation token, at most one automated token per side.
#[derive(Debug, Default)]
struct TokenSlots {
    animation: Option<CancellationToken>,
    automated: SideMap<Option<CancellationToken>>,
}

impl TokenSlots {
    fn cancel_all(&mut self) {
        if let Some(token) = self.animation.take() {
            debug!("Cancelling animation");
            token.cancel();
        }
        for slot in self.automated.values_mut() {
            if let Some(token) = slot.take() {
                debug!("Cancelling automated move");
                token.cancel();
            }
        }
    }
}

fn lock(slots: &Mutex<TokenSlots>) -> MutexGuard<'_, TokenSlots> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle that cancels the executor's pending work from another task, for
/// example a reset arriving while a placement is being animated.
#[derive(Debug, Clone)]
pub struct ExecutorCanceller {
    slots: Arc<Mutex<TokenSlots>>,
}

impl ExecutorCanceller {
    /// Cancels the running animation and every pending automated move.
    /// Safe to call when nothing is pending.
    #[instrument(skip(self))]
    pub fn cancel_all(&self) {
        lock(&self.slots).cancel_all();
    }
}

/// Drives a game: validates and applies placements, advances turns,
/// schedules automated moves and persists after every change.
pub struct TurnExecutor<A, N, S> {
    game: Game,
    animation: A,
    notifier: Arc<N>,
    store: S,
    settings: ExecutorSettings,
    rng: StdRng,
    slots: Arc<Mutex<TokenSlots>>,
    due_tx: mpsc::UnboundedSender<DueMove>,
    due_rx: mpsc::UnboundedReceiver<DueMove>,
}

impl<A, N, S> TurnExecutor<A, N, S>
where
    A: AnimationDriver,
    N: Notifier,
    S: GameStore,
{
    /// Creates an executor holding a fresh game. Call [`start`](Self::start)
    /// or [`new_game`](Self::new_game) before play.
    pub fn new(animation: A, notifier: N, store: S, settings: ExecutorSettings) -> Self {
        let (due_tx, due_rx) = mpsc::unbounded_channel();
        Self {
            game: Game::new(),
            animation,
            notifier: Arc::new(notifier),
            store,
            settings,
            rng: StdRng::from_os_rng(),
            slots: Arc::new(Mutex::new(TokenSlots::default())),
            due_tx,
            due_rx,
        }
    }

    /// Replaces the random source used by automated players.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the settings.
    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// Returns the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a handle that can cancel pending work from another task.
    pub fn canceller(&self) -> ExecutorCanceller {
        ExecutorCanceller {
            slots: Arc::clone(&self.slots),
        }
    }

    /// True while an animated placement is running.
    pub fn is_animating(&self) -> bool {
        lock(&self.slots).animation.is_some()
    }

    /// True while an automated move for `side` is waiting for its delay.
    pub fn has_pending_move(&self, side: Disk) -> bool {
        lock(&self.slots).automated[side].is_some()
    }

    /// Restores the saved game, or starts a new one if loading fails,
    /// then waits for the side to move.
    ///
    /// Returns true if the saved game was restored.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        let loaded = self.store.load().and_then(|record| self.restore(record));
        match loaded {
            Ok(()) => {
                info!(status = %self.game.status(), "Saved game restored");
                true
            }
            Err(e) => {
                info!(error = %e, "No usable saved game, starting new game");
                self.new_game();
                false
            }
        }
    }

    /// Replaces the live game with a decoded record.
    ///
    /// The record must describe a game at rest (see
    /// [`ReversiInvariants`]); otherwise it is rejected as malformed and the
    /// live game is untouched.
    #[instrument(skip(self, record), fields(turn = ?record.turn()))]
    pub fn restore(&mut self, record: GameRecord) -> Result<(), PersistenceError> {
        let restored = Game::from_record(record);
        if let Err(violations) = ReversiInvariants::check_all(&restored) {
            return Err(PersistenceError::malformed(
                1,
                format!("inconsistent game: {}", describe(&violations)),
            ));
        }

        self.cancel_all();
        self.game = restored;
        self.notify_all();
        self.wait_for_player();
        Ok(())
    }

    /// Cancels pending work and starts over: standard position, dark to
    /// move, both sides manual.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.cancel_all();
        self.game.reset();
        self.notify_all();
        self.save();
        self.wait_for_player();
    }

    /// Cancels the running animation and every pending automated move.
    #[instrument(skip(self))]
    pub fn cancel_all(&mut self) {
        lock(&self.slots).cancel_all();
    }

    /// Assigns a control mode to `side`.
    ///
    /// Any pending automated move for the side is cancelled. If the side is
    /// now automated, it is its turn and nothing is animating, an automated
    /// move is scheduled straight away.
    #[instrument(skip(self))]
    pub fn set_player_mode(&mut self, side: Disk, mode: PlayerMode) {
        let pending = lock(&self.slots).automated[side].take();
        if let Some(token) = pending {
            debug!("Cancelling pending automated move");
            token.cancel();
        }

        self.game.modes_mut().set(side, mode);
        self.save();

        if mode == PlayerMode::Automated
            && self.game.current_side() == Some(side)
            && !self.is_animating()
        {
            self.schedule_automated_move(side);
        }
    }

    /// Hands control to whoever plays the side to move: nothing for a
    /// manual side, an automated move for an automated one.
    #[instrument(skip(self))]
    pub fn wait_for_player(&mut self) {
        let Some(side) = self.game.current_side() else {
            return;
        };
        match self.game.modes().get(side) {
            PlayerMode::Manual => debug!(?side, "Waiting for manual input"),
            PlayerMode::Automated => self.schedule_automated_move(side),
        }
    }

    /// Picks a random legal move for `side` and arms its timer.
    ///
    /// # Panics
    ///
    /// If `side` has no legal move. Callers only schedule for the side to
    /// move, which always has one at rest.
    #[instrument(skip(self))]
    pub fn schedule_automated_move(&mut self, side: Disk) {
        let moves = legal_moves(self.game.board(), side);
        assert!(!moves.is_empty(), "No legal moves for {} to schedule", side);
        let coordinate = moves[self.rng.random_range(0..moves.len())];

        self.notifier.busy(side, true);
        let notifier = Arc::clone(&self.notifier);
        let token = CancellationToken::with_cleanup(move || notifier.busy(side, false));

        // A token still in the slot belongs to a superseded schedule; its
        // move is ignored when it comes due.
        lock(&self.slots).automated[side] = Some(token.clone());

        let delay = self.settings.automated_delay;
        let due_tx = self.due_tx.clone();
        info!(%coordinate, ?delay, "Automated move scheduled");
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if token.is_cancelled() {
                        return;
                    }
                    if due_tx.send(DueMove { side, coordinate, token }).is_err() {
                        debug!("Executor dropped before automated move came due");
                    }
                }
                _ = token.cancelled() => {
                    debug!(?side, "Automated move cancelled before its delay");
                }
            }
        });
    }

    /// Waits for the next automated move to come due.
    pub async fn next_due(&mut self) -> Option<DueMove> {
        self.due_rx.recv().await
    }

    /// Plays an automated move that came due, then advances the turn.
    ///
    /// Returns `Ok(None)` if the move was cancelled or superseded after its
    /// timer fired.
    #[instrument(skip(self, due), fields(side = ?due.side, coordinate = %due.coordinate))]
    pub async fn play_due(&mut self, due: DueMove) -> Result<Option<PlacementReport>, PlacementError> {
        let current = {
            let mut slots = lock(&self.slots);
            let slot = &mut slots.automated[due.side];
            let current = slot
                .as_ref()
                .is_some_and(|token| token.same_as(&due.token) && !token.is_cancelled());
            if current {
                *slot = None;
            }
            current
        };
        if !current {
            debug!("Ignoring stale automated move");
            return Ok(None);
        }
        self.notifier.busy(due.side, false);

        SidesTurn::check(due.side, &self.game)?;
        let report = self
            .place_disk(due.side, due.coordinate, self.settings.animate)
            .await?;
        if report.is_complete() {
            self.advance_turn().await;
        }
        Ok(Some(report))
    }

    /// Manual input: places a disk for the side to move, then advances the
    /// turn.
    ///
    /// Rejected without state change when the game is over, the side to
    /// move is automated, an animation is running or the cell is illegal.
    #[instrument(skip(self))]
    pub async fn play(&mut self, coordinate: Coordinate) -> Result<PlacementReport, PlacementError> {
        let side = self.game.current_side().ok_or(PlacementError::GameOver)?;
        if self.game.modes().get(side) == PlayerMode::Automated {
            return Err(PlacementError::AutomatedSide(side));
        }
        if self.is_animating() {
            return Err(PlacementError::AnimationInProgress);
        }

        let report = self.place_disk(side, coordinate, self.settings.animate).await?;
        if report.is_complete() {
            self.advance_turn().await;
        }
        Ok(report)
    }

    /// Places `disk` at `coordinate`, optionally animated, then saves.
    ///
    /// Does not advance the turn; callers follow up with
    /// [`advance_turn`](Self::advance_turn) unless the report says the
    /// placement was cancelled.
    ///
    /// # Panics
    ///
    /// If an animated placement is requested while another one is running.
    #[instrument(skip(self))]
    pub async fn place_disk(
        &mut self,
        disk: Disk,
        coordinate: Coordinate,
        animated: bool,
    ) -> Result<PlacementReport, PlacementError> {
        let placement = Placement::compute(self.game.board(), disk, coordinate)?;
        PlacementContract::pre(self.game.board(), &placement)?;
        #[cfg(debug_assertions)]
        let before = self.game.board().clone();

        let status = if animated {
            self.animate(&placement).await
        } else {
            placement.apply(self.game.board_mut());
            self.notifier.board_changed(self.game.board());
            AnimationStatus::Immediate
        };

        if status == AnimationStatus::Cancelled {
            info!(%placement, "Placement cancelled mid-animation");
            return Ok(PlacementReport {
                placement,
                status,
                save_error: None,
            });
        }

        #[cfg(debug_assertions)]
        PlacementContract::post(&before, self.game.board(), &placement)?;

        let (dark, light) = self.game.counts();
        self.notifier.counts_changed(dark, light);
        let save_error = self.save();
        info!(%placement, ?status, dark, light, "Disk placed");

        Ok(PlacementReport {
            placement,
            status,
            save_error,
        })
    }

    /// Applies the placement one cell at a time through the animation
    /// driver, checking the animation token between steps.
    async fn animate(&mut self, placement: &Placement) -> AnimationStatus {
        let token = CancellationToken::new();
        {
            let mut slots = lock(&self.slots);
            assert!(
                slots.animation.is_none(),
                "Animated placement started while another is running"
            );
            slots.animation = Some(token.clone());
        }

        let disk = placement.disk();
        let steps: Vec<Coordinate> = placement.steps().collect();
        let mut status = AnimationStatus::Completed;

        for (i, coordinate) in steps.iter().enumerate() {
            if token.is_cancelled() {
                status = AnimationStatus::Cancelled;
                break;
            }
            self.game.board_mut().set_disk(*coordinate, disk);
            let finished = self.animation.flip(*coordinate, disk).await;
            if token.is_cancelled() {
                status = AnimationStatus::Cancelled;
                break;
            }
            if !finished {
                debug!(step = i, "Animation interrupted, applying remaining steps");
                for rest in &steps[i..] {
                    self.game.board_mut().set_disk(*rest, disk);
                }
                self.notifier.board_changed(self.game.board());
                status = AnimationStatus::Interrupted;
                break;
            }
        }

        let mut slots = lock(&self.slots);
        if slots.animation.as_ref().is_some_and(|t| t.same_as(&token)) {
            slots.animation = None;
        }
        status
    }

    /// Advances the turn after a completed placement.
    ///
    /// A forced pass is announced through [`Notifier::pass`]; once it is
    /// acknowledged the turn goes back to the side that just moved. The
    /// resulting state is saved and the next player is awaited.
    #[instrument(skip(self))]
    pub async fn advance_turn(&mut self) -> TurnAdvance {
        let advance = loop {
            let advance = self.game.advance_turn();
            self.notifier.turn_changed(self.game.current_side());
            match advance {
                TurnAdvance::Pass(side) => {
                    self.notifier.pass(side).await;
                }
                TurnAdvance::Turn(_) | TurnAdvance::GameOver => break advance,
            }
        };

        if advance == TurnAdvance::GameOver {
            info!(status = %self.game.status(), "Game finished");
        }

        self.save();
        assert_invariants(&self.game);
        self.wait_for_player();
        advance
    }

    fn notify_all(&self) {
        let (dark, light) = self.game.counts();
        self.notifier.board_changed(self.game.board());
        self.notifier.turn_changed(self.game.current_side());
        self.notifier.counts_changed(dark, light);
    }

    /// Best-effort save: failures are logged and returned, never raised.
    fn save(&mut self) -> Option<PersistenceError> {
        match self.store.save(&self.game.to_record()) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Failed to save game");
                Some(e)
            }
        }
    }
}

impl<A, N, S> std::fmt::Debug for TurnExecutor<A, N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnExecutor")
            .field("game", &self.game)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
