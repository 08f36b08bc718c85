//! Normalized input events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a single-pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            position: Point::new(x, y),
        }
    }
}

/// Keys the board reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Delete,
}

/// What an interactive target did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseResult {
    /// Not handled; offer the event to the next candidate.
    Unused,
    /// Handled, and the target now owns the gesture.
    Captured,
    /// Handled as the final event; the target gives up ownership.
    Released,
}

impl MouseResult {
    pub fn is_used(self) -> bool {
        self != MouseResult::Unused
    }
}
