//! # Pointer input
//! Turns press/move/release gestures over the rendered board into move
//! attempts on a [`crate::session::GameSession`].

pub mod drag;

pub use drag::{BoardRect, DragController, DraggedPiece, DropOutcome};
