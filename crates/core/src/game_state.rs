//! Game state module - the session state machine
//!
//! Ties together the board, the piece catalog, the bag randomizer and the
//! scoring rules. Time only advances through [`GameState::tick`]; every other
//! entry point is a discrete command. Each mutating call returns the events it
//! produced.

use tracing::{debug, info, trace, warn};

use crate::autoshift::{AutoShift, HorizontalDirection};
use crate::board::Board;
use crate::config::GameConfig;
use crate::events::{emit, Events, GameEvent};
use crate::pieces::{self, base_matrix, spawn_x, Matrix};
use crate::rng::PieceQueue;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, drop_interval_ms};
use crate::snapshot::{GameSnapshot, TimersSnapshot};
use crate::types::{
    GameAction, GameOverCause, PieceKind, Rotation, RotationDirection, Status, BOARD_WIDTH,
};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Base orientation, horizontally centered, top row at 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = base_matrix(kind);
        Self {
            kind,
            rotation: Rotation::North,
            matrix,
            x: spawn_x(&matrix, BOARD_WIDTH),
            y: 0,
        }
    }

    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(&self.matrix, self.x, self.y)
    }

    /// Occupied cells in board coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether any occupied cell sits above row 0.
    pub fn is_above_field(&self) -> bool {
        self.cells().any(|(_, y)| y < 0)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    piece_queue: PieceQueue,
    config: GameConfig,
    autoshift: AutoShift,
    /// Monotonic count of spawned pieces in the current session.
    piece_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    status: Status,
    game_over_cause: Option<GameOverCause>,
    soft_drop: bool,
    drop_timer_ms: f64,
    lock_timer_ms: f64,
    is_locking: bool,
}

impl GameState {
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        Self {
            board: Board::new(),
            active: None,
            piece_queue: PieceQueue::new(seed),
            config,
            autoshift: AutoShift::new(config.das_ms, config.arr_ms),
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            status: Status::Idle,
            game_over_cause: None,
            soft_drop: false,
            drop_timer_ms: 0.0,
            lock_timer_ms: 0.0,
            is_locking: false,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Preview of the piece the next spawn will draw. `None` before the first
    /// `start`.
    pub fn next_piece(&self) -> Option<PieceKind> {
        (self.status != Status::Idle).then(|| self.piece_queue.peek())
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop
    }

    pub fn is_locking(&self) -> bool {
        self.is_locking
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(Into::into);
        out.ghost_y = self.ghost_y();
        out.next = self.next_piece();
        out.status = self.status;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.soft_drop = self.soft_drop;
        out.timers = TimersSnapshot {
            drop_ms: self.drop_timer_ms,
            lock_ms: self.lock_timer_ms,
            is_locking: self.is_locking,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Row the active piece would land on after a hard drop.
    pub fn ghost_y(&self) -> Option<i8> {
        self.active
            .map(|piece| self.board.ghost_row(&piece.matrix, piece.x, piece.y))
    }

    /// Current gravity interval: the soft-drop interval while held, otherwise
    /// the level table entry.
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.config.soft_drop_interval_ms
        } else {
            drop_interval_ms(self.level)
        }
    }

    /// Whether the active piece could shift by (dx, dy).
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.active.is_some_and(|piece| {
            self.board
                .is_valid_position(&piece.matrix, piece.x + dx, piece.y + dy)
        })
    }

    /// Begin a fresh session from any status.
    pub fn start(&mut self) -> Events {
        let mut events = Events::new();
        self.start_into(&mut events);
        events
    }

    pub fn pause(&mut self) -> Events {
        let mut events = Events::new();
        if self.status == Status::Playing {
            self.set_status(Status::Paused, &mut events);
        }
        events
    }

    /// Back to `Playing`. Gravity restarts its interval; the lock and
    /// auto-repeat counters carry over.
    pub fn resume(&mut self) -> Events {
        let mut events = Events::new();
        if self.status == Status::Paused {
            self.drop_timer_ms = 0.0;
            self.set_status(Status::Playing, &mut events);
        }
        events
    }

    /// Advance the simulation by `delta_ms` milliseconds.
    ///
    /// Order within one tick: auto-repeat shifts, gravity, lock delay.
    /// Negative or non-finite deltas are rejected without touching state.
    pub fn tick(&mut self, delta_ms: f64) -> Events {
        let mut events = Events::new();
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            warn!(delta_ms, "rejecting tick with invalid delta");
            return events;
        }
        if self.status != Status::Playing || self.active.is_none() {
            return events;
        }

        let repeats = self.autoshift.update(delta_ms);
        let dx = self.autoshift.direction().dx();
        for _ in 0..repeats {
            if !self.try_move(dx, 0, &mut events) {
                break;
            }
        }

        self.drop_timer_ms += delta_ms;
        if self.drop_timer_ms >= f64::from(self.drop_interval_ms()) {
            self.drop_timer_ms = 0.0;
            if self.try_move(0, 1, &mut events) {
                if self.soft_drop {
                    self.score = self
                        .score
                        .saturating_add(calculate_drop_score(1, false));
                }
                self.is_locking = false;
                self.lock_timer_ms = 0.0;
            } else if !self.is_locking {
                trace!("piece grounded, lock delay started");
                self.is_locking = true;
                self.lock_timer_ms = 0.0;
            }
        }

        if self.is_locking {
            self.lock_timer_ms += delta_ms;
            if self.lock_timer_ms >= f64::from(self.config.lock_delay_ms) {
                let grounded = !self.can_move(0, 1);
                self.is_locking = false;
                self.lock_timer_ms = 0.0;
                if grounded {
                    self.lock_piece(&mut events);
                }
            }
        }

        events
    }

    /// Apply one discrete command.
    ///
    /// Piece commands are ignored unless `Playing`. Key releases are also
    /// honored while paused so a hold does not outlive the pause.
    pub fn apply_action(&mut self, action: GameAction) -> Events {
        let mut events = Events::new();
        match action {
            GameAction::Start => self.start_into(&mut events),
            GameAction::Pause => events = self.pause(),
            GameAction::Resume => events = self.resume(),
            GameAction::ReleaseLeft | GameAction::ReleaseRight | GameAction::SoftDropOff
                if matches!(self.status, Status::Playing | Status::Paused) =>
            {
                match action {
                    GameAction::ReleaseLeft => self.autoshift.release(HorizontalDirection::Left),
                    GameAction::ReleaseRight => {
                        self.autoshift.release(HorizontalDirection::Right)
                    }
                    _ => self.soft_drop = false,
                }
            }
            _ if self.status != Status::Playing || self.active.is_none() => {}
            GameAction::MoveLeft => {
                self.autoshift.press(HorizontalDirection::Left);
                self.try_move(-1, 0, &mut events);
            }
            GameAction::MoveRight => {
                self.autoshift.press(HorizontalDirection::Right);
                self.try_move(1, 0, &mut events);
            }
            GameAction::RotateCw => {
                self.try_rotate(RotationDirection::Clockwise, &mut events);
            }
            GameAction::RotateCcw => {
                self.try_rotate(RotationDirection::CounterClockwise, &mut events);
            }
            GameAction::SoftDropOn => self.soft_drop = true,
            GameAction::HardDrop => self.hard_drop(&mut events),
            GameAction::ReleaseLeft | GameAction::ReleaseRight | GameAction::SoftDropOff => {}
        }
        events
    }

    fn start_into(&mut self, events: &mut Events) {
        self.board.reset();
        self.piece_queue.clear();
        self.autoshift.reset();
        self.active = None;
        self.piece_id = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.game_over_cause = None;
        self.soft_drop = false;
        self.drop_timer_ms = 0.0;
        self.lock_timer_ms = 0.0;
        self.is_locking = false;

        info!(
            seed = self.piece_queue.seed(),
            rng_state = self.piece_queue.rng_state(),
            "session started"
        );
        self.set_status(Status::Playing, events);
        self.spawn_next(events);
    }

    fn set_status(&mut self, to: Status, events: &mut Events) {
        let from = self.status;
        if from == to {
            return;
        }
        self.status = to;
        info!(from = from.as_str(), to = to.as_str(), "status changed");
        emit(events, GameEvent::StatusChanged { from, to });
    }

    fn end_game(&mut self, cause: GameOverCause, events: &mut Events) {
        self.game_over_cause = Some(cause);
        self.soft_drop = false;
        self.autoshift.reset();
        info!(?cause, score = self.score, lines = self.lines, "game over");
        self.set_status(Status::GameOver, events);
        emit(events, GameEvent::GameOver { cause });
    }

    /// Draw the previewed piece and place it.
    ///
    /// A spawn position that collides ends the game with `BlockOut`.
    pub(crate) fn spawn_next(&mut self, events: &mut Events) {
        let kind = self.piece_queue.draw();

        let piece = Tetromino::spawn(kind);
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.is_locking = false;
        self.lock_timer_ms = 0.0;
        debug!(kind = kind.as_str(), x = piece.x, "spawned");
        emit(events, GameEvent::Spawned { kind });

        if !piece.is_valid(&self.board) {
            self.end_game(GameOverCause::BlockOut, events);
        }
    }

    /// Shift the active piece. A horizontal shift during lock delay restarts
    /// the lock timer.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8, events: &mut Events) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };
        if !self
            .board
            .is_valid_position(&piece.matrix, piece.x + dx, piece.y + dy)
        {
            return false;
        }
        piece.x += dx;
        piece.y += dy;
        self.active = Some(piece);

        if dx != 0 {
            if self.is_locking {
                self.lock_timer_ms = 0.0;
            }
            emit(events, GameEvent::Moved { dx });
        }
        true
    }

    pub(crate) fn try_rotate(&mut self, direction: RotationDirection, events: &mut Events) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let board = &self.board;
        let Some(result) = pieces::try_rotate(
            piece.kind,
            &piece.matrix,
            piece.rotation,
            piece.x,
            piece.y,
            direction,
            |m, x, y| board.is_valid_position(m, x, y),
        ) else {
            trace!(kind = piece.kind.as_str(), ?direction, "rotation rejected");
            return false;
        };

        self.active = Some(Tetromino {
            rotation: result.rotation,
            matrix: result.matrix,
            x: piece.x + result.offset.0,
            y: piece.y + result.offset.1,
            ..piece
        });
        if self.is_locking {
            self.lock_timer_ms = 0.0;
        }
        emit(
            events,
            GameEvent::Rotated {
                kicked: result.offset != (0, 0),
            },
        );
        true
    }

    pub(crate) fn hard_drop(&mut self, events: &mut Events) {
        let Some(mut piece) = self.active else {
            return;
        };
        let landing = self.board.ghost_row(&piece.matrix, piece.x, piece.y);
        let rows = (landing - piece.y).max(0) as u32;
        piece.y = landing;
        self.active = Some(piece);
        self.score = self
            .score
            .saturating_add(calculate_drop_score(rows, true));
        self.is_locking = false;
        self.lock_timer_ms = 0.0;
        emit(events, GameEvent::HardDropped { rows });
        self.lock_piece(events);
    }

    /// Fix the active piece, clear rows, score, and spawn the successor.
    pub(crate) fn lock_piece(&mut self, events: &mut Events) {
        let Some(piece) = self.active else {
            return;
        };
        if piece.is_above_field() {
            self.end_game(GameOverCause::LockOut, events);
            return;
        }

        self.board.lock(&piece.matrix, piece.x, piece.y, piece.kind);
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "locked");
        emit(events, GameEvent::Locked { kind: piece.kind });

        if !self.board.full_rows().is_empty() {
            let cleared = self.board.clear_rows();
            let points = calculate_line_score(cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared as u32);
            debug!(cleared, points, lines = self.lines, "lines cleared");
            emit(
                events,
                GameEvent::LinesCleared {
                    count: cleared as u32,
                    points,
                },
            );

            let level = calculate_level(self.lines);
            if level > self.level {
                self.level = level;
                debug!(level, "level up");
                emit(events, GameEvent::LevelUp { level });
            }
        }

        self.spawn_next(events);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
