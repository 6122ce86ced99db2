//! # Retrace
//! A two-player chess session with a navigable move history.
//!
//! Moves are validated by a rules engine, recorded in a move log, and every
//! past position can be revisited without losing the moves played after it.
//! The displayed board and the rules engine state are both rebuilt from the
//! log, which is the single source of truth.
//!
//! It is usable as both a library to embed into a user interface and a
//! standalone binary to play in a terminal.

pub mod engine;
pub mod game;
pub mod input;
pub mod protocol;
pub mod session;
