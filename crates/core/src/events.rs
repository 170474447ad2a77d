//! Notifications returned from every mutating call.
//!
//! Presentation layers route these to sound or animation. The simulation never
//! reads them back.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{GameOverCause, PieceKind, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    StatusChanged { from: Status, to: Status },
    Spawned { kind: PieceKind },
    /// Successful one-column shift, manual or auto-repeat.
    Moved { dx: i8 },
    Rotated { kicked: bool },
    HardDropped { rows: u32 },
    Locked { kind: PieceKind },
    LinesCleared { count: u32, points: u32 },
    LevelUp { level: u32 },
    GameOver { cause: GameOverCause },
}

/// Fixed-capacity event list; overflow is dropped rather than allocated.
pub type Events = ArrayVec<GameEvent, 32>;

#[inline]
pub(crate) fn emit(events: &mut Events, event: GameEvent) {
    let _ = events.try_push(event);
}
