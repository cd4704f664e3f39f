//! Engine module - the fixed-step simulation
//!
//! One call to [`Engine::step`] advances the game by exactly one frame:
//!
//! 1. spawn a new piece once the entry delay has elapsed
//! 2. apply shifting, rotation and drop requests from the input state
//! 3. apply gravity, landing and locking
//! 4. clear completed rows
//!
//! There is no explicit state machine. The engine keeps the counters the rules
//! need (lock, entry, line-cleared flag) and [`Engine::phase`] derives a
//! coarse phase from them for consumers.

use std::sync::Arc;

use log::{debug, info, trace};

use crate::input::{InputState, KeySink};
use crate::piece::Piece;
use crate::position::Position;
use crate::rng::{PieceSource, Randomizer};
use crate::rotation::RotationTable;
use crate::snapshot::{ActiveSnapshot, Snapshot};
use crate::types::{GameAttributes, KeyKind, PieceKind, GRAVITY_20G, GRAVITY_SOFT_DROP};
use crate::well::Well;

/// Outcome of a step.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// A new piece could not be placed. Terminal: further steps do nothing.
    GameOver,
}

/// Coarse view of what the engine is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No active piece; waiting out the entry delay.
    Entry,
    Falling,
    /// The active piece rests on the stack or floor and is counting down to lock.
    Grounded,
    GameOver,
}

/// What happened during the most recent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    pub spawned: Option<PieceKind>,
    pub locked: bool,
    pub lines_cleared: usize,
}

/// Spawn location for a well: the top row, with the 4-wide mask centered.
pub fn spawn_position(well: &Well) -> Position {
    Position::new(well.height() as i32 - 1, well.width() as i32 / 2 - 2)
}

/// The game simulation.
///
/// Generic over where pieces come from; the default is the seeded 7-bag
/// [`Randomizer`].
#[derive(Debug, Clone)]
pub struct Engine<S = Randomizer> {
    well: Well,
    table: Arc<RotationTable>,
    active: Option<Piece>,
    attrs: GameAttributes,
    input: InputState,
    source: S,

    lock_counter: u32,
    entry_counter: u32,
    /// Set when rows are cleared; cleared by the next spawn.
    line_was_cleared: bool,
    soft_dropping: bool,
    /// One-shot sonic drop latch, consumed by the next gravity pass.
    hard_dropping: bool,
    game_over: bool,

    lines_cleared: u64,
    frame: u64,
    last_tick: TickEvents,
}

impl Engine<Randomizer> {
    /// A standard 10x22 game with a seeded 7-bag randomizer.
    pub fn new(table: Arc<RotationTable>, attrs: GameAttributes, seed: u64) -> Self {
        Self::with_parts(Well::standard(), table, attrs, Randomizer::from_seed(seed))
    }
}

impl<S: PieceSource> Engine<S> {
    /// Build an engine from explicit parts. The first piece spawns immediately;
    /// if it does not fit the engine starts in game over.
    pub fn with_parts(
        well: Well,
        table: Arc<RotationTable>,
        attrs: GameAttributes,
        source: S,
    ) -> Self {
        let mut engine = Self {
            well,
            table,
            active: None,
            attrs,
            input: InputState::new(),
            source,
            lock_counter: 0,
            entry_counter: 0,
            line_was_cleared: false,
            soft_dropping: false,
            hard_dropping: false,
            game_over: false,
            lines_cleared: 0,
            frame: 0,
            last_tick: TickEvents::default(),
        };
        engine.spawn_piece();
        engine
    }

    /// Advance one frame.
    pub fn step(&mut self) -> Status {
        if self.game_over {
            return Status::GameOver;
        }
        self.frame += 1;
        self.last_tick = TickEvents::default();

        if !self.try_spawn() {
            return Status::GameOver;
        }
        self.process_input();
        self.process_gravity();
        self.process_cleared_lines();
        Status::Running
    }

    /// Count down the entry delay and spawn when it has elapsed.
    ///
    /// Returns false if the spawn ended the game.
    fn try_spawn(&mut self) -> bool {
        if self.active.is_some() {
            return true;
        }
        self.entry_counter += 1;
        if self.entry_counter < self.attrs.entry_delay(self.line_was_cleared) {
            return true;
        }
        self.spawn_piece()
    }

    fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_piece();
        let piece = Piece::new(kind, spawn_position(&self.well), Arc::clone(&self.table));
        self.entry_counter = 0;
        self.line_was_cleared = false;

        if self.well.collides_piece(&piece) {
            info!(
                "game over: {kind:?} cannot spawn (frame {}, {} lines)",
                self.frame, self.lines_cleared
            );
            self.game_over = true;
            return false;
        }
        debug!("spawned {kind:?} at {:?}", piece.position());
        self.last_tick.spawned = Some(kind);
        self.active = Some(piece);
        true
    }

    /// A shift fires on the first frame of a press, then every frame once the
    /// key has been held longer than DAS.
    fn shift_fires(&self, key: KeyKind) -> bool {
        self.input.is_just_pressed(key)
            || (self.input.is_held(key)
                && i64::from(self.input.frames_held(key)) > i64::from(self.attrs.das))
    }

    fn process_input(&mut self) {
        if self.active.is_some() {
            if self.shift_fires(KeyKind::MoveLeft) {
                self.try_move(0, -1);
            } else if self.shift_fires(KeyKind::MoveRight) {
                self.try_move(0, 1);
            }

            if self.input.is_just_pressed(KeyKind::RotateCw) {
                self.try_rotate(true);
            } else if self.input.is_just_pressed(KeyKind::RotateCcw) {
                self.try_rotate(false);
            }

            if self.input.is_just_pressed(KeyKind::SonicDrop) {
                self.hard_dropping = true;
            }
        }

        self.soft_dropping = self.input.is_held(KeyKind::SoftDrop);
        self.input.step();
    }

    fn try_move(&mut self, drow: i32, dcol: i32) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        let candidate = piece.position().offset(drow, dcol);
        if self.well.collides(piece.layout(), candidate) {
            trace!("move to {candidate:?} rejected");
        } else {
            piece.move_to(candidate);
        }
    }

    fn try_rotate(&mut self, clockwise: bool) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        piece.rotate(clockwise);
        if self.well.collides_piece(piece) {
            piece.rotate(!clockwise);
            trace!("rotation (clockwise: {clockwise}) rejected at {:?}", piece.position());
        }
    }

    fn process_gravity(&mut self) {
        let rate = if self.hard_dropping {
            self.hard_dropping = false;
            GRAVITY_20G
        } else if self.soft_dropping {
            GRAVITY_SOFT_DROP
        } else {
            self.attrs.gravity
        };

        let Some(piece) = self.active.as_ref() else {
            return;
        };
        let current = piece.position();
        let mut resting = current;
        let mut blocked_in_place = false;
        for next in current.path_from_gravity(rate) {
            if self.well.collides(piece.layout(), next) {
                blocked_in_place = resting == current;
                break;
            }
            resting = next;
        }

        if blocked_in_place {
            if self.soft_dropping || self.lock_counter >= self.attrs.lock_delay {
                self.lock_active_piece();
            } else {
                self.lock_counter += 1;
            }
        } else if resting != current {
            self.lock_counter = 0;
            if let Some(piece) = self.active.as_mut() {
                piece.move_to(resting);
            }
        }
    }

    fn lock_active_piece(&mut self) {
        if let Some(piece) = self.active.take() {
            self.well.add_to_well(&piece);
            self.lock_counter = 0;
            self.last_tick.locked = true;
            debug!("locked {:?} at {:?}", piece.kind(), piece.position());
        }
    }

    fn process_cleared_lines(&mut self) {
        let rows = self.well.completed_rows();
        if rows.is_empty() {
            return;
        }
        self.well.delete_rows(&rows);
        self.line_was_cleared = true;
        self.lines_cleared += rows.len() as u64;
        self.last_tick.lines_cleared = rows.len();
        debug!("cleared rows {rows:?} (total {})", self.lines_cleared);
    }
}

impl<S> Engine<S> {
    pub fn well(&self) -> &Well {
        &self.well
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn attributes(&self) -> &GameAttributes {
        &self.attrs
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Total rows cleared since the game started.
    pub fn lines_cleared(&self) -> u64 {
        self.lines_cleared
    }

    /// Number of steps taken (steps after game over are not counted).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_tick(&self) -> TickEvents {
        self.last_tick
    }

    pub fn lock_counter(&self) -> u32 {
        self.lock_counter
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            return Phase::GameOver;
        }
        match &self.active {
            None => Phase::Entry,
            Some(piece) => {
                if self.well.collides(piece.layout(), piece.position().offset(-1, 0)) {
                    Phase::Grounded
                } else {
                    Phase::Falling
                }
            }
        }
    }

    pub fn key_down(&mut self, key: KeyKind) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: KeyKind) {
        self.input.key_up(key);
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut snap = Snapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out`, reusing its cell buffer.
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.width = self.well.width();
        out.height = self.well.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.well.cells());
        out.active = self.active.as_ref().map(|piece| ActiveSnapshot {
            kind: piece.kind(),
            orientation: piece.orientation(),
            position: piece.position(),
            mask: *piece.layout(),
        });
        out.game_over = self.game_over;
        out.lines_cleared = self.lines_cleared;
        out.frame = self.frame;
    }
}

impl<S> KeySink for Engine<S> {
    fn key_down(&mut self, key: KeyKind) {
        Engine::key_down(self, key);
    }

    fn key_up(&mut self, key: KeyKind) {
        Engine::key_up(self, key);
    }
}
