//! # Rules engine boundary
//! The move history never decides legality on its own. It talks to a
//! [`RulesEngine`] through a [`RulesAdapter`], which owns the engine's internal
//! state and translates between board cells and the engine's move notation.
//!
//! Engine notation is long algebraic, `<from><to>[promotion]` (`e2e4`,
//! `e7e8q`), with files `a`-`h` and rank 1 at row 7 of the board.

use thiserror::Error;

use crate::game::{
    board::Board,
    colour::Colour,
    moves::Special,
    piece::{Piece, PieceKind},
    square::Cell,
};

pub mod adapter;
pub mod standard;

pub use adapter::RulesAdapter;
pub use standard::StandardRules;

/// Legal (from, to) pairs for the side to move. Promotions to different
/// pieces collapse into a single pair.
pub type LegalMoves = heapless::Vec<(Cell, Cell), 256>;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum IllegalReason {
    #[error("malformed move notation")]
    Malformed,
    #[error("not a legal move in this position")]
    Rejected,
}

/// The engine refused a move. Its internal state is unchanged.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
#[error("Illegal move {notation}: {reason}")]
pub struct IllegalMoveError {
    pub notation: String,
    pub reason: IllegalReason,
}
impl IllegalMoveError {
    pub fn malformed(notation: &str) -> Self {
        Self {
            notation: notation.to_string(),
            reason: IllegalReason::Malformed,
        }
    }

    pub fn rejected(notation: &str) -> Self {
        Self {
            notation: notation.to_string(),
            reason: IllegalReason::Rejected,
        }
    }
}

/// What the engine reports back after accepting a move.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct EngineMoveRecord {
    pub notation: String,
    pub from: Cell,
    pub to: Cell,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: Special,
}

/// State of the game in the engine's current position.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Colour },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}
impl GameStatus {
    /// Checks if no more moves can be played.
    #[inline]
    pub const fn is_game_over(self) -> bool {
        !matches!(self, Self::Ongoing | Self::Check)
    }
}
impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Check => write!(f, "check"),
            Self::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Self::Stalemate => write!(f, "stalemate"),
            Self::InsufficientMaterial => write!(f, "draw by insufficient material"),
            Self::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
            Self::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
        }
    }
}

/// Capability required from a chess rules engine.
///
/// Implementors own a single mutable position. Only [`RulesEngine::apply_move`],
/// [`RulesEngine::undo_last`] and [`RulesEngine::reset`] may change it.
pub trait RulesEngine {
    /// Plays a move given in engine notation. On failure, nothing changes.
    fn apply_move(&mut self, notation: &str) -> Result<EngineMoveRecord, IllegalMoveError>;

    /// Reverts the last successful [`RulesEngine::apply_move`]. Returns `false`
    /// if there was nothing to revert.
    fn undo_last(&mut self) -> bool;

    /// Goes back to the standard initial position.
    fn reset(&mut self);

    /// Every legal move for the side to move.
    fn legal_moves(&self) -> LegalMoves;

    /// Checks if a move would be accepted, without playing it.
    fn is_legal(&self, notation: &str) -> bool;

    fn status(&self) -> GameStatus;

    #[inline]
    fn is_game_over(&self) -> bool {
        self.status().is_game_over()
    }

    /// Side to move in the engine's position.
    fn turn(&self) -> Colour;

    /// The engine's own view of piece placement.
    fn placement(&self) -> Board;
}

/// Splits engine notation into its cells and optional promotion.
pub fn parse_notation(notation: &str) -> Result<(Cell, Cell, Option<PieceKind>), IllegalMoveError> {
    let notation = notation.trim();
    let malformed = || IllegalMoveError::malformed(notation);
    if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
        return Err(malformed());
    }
    let from: Cell = notation[0..2].parse().map_err(|_| malformed())?;
    let to: Cell = notation[2..4].parse().map_err(|_| malformed())?;
    let promotion = match notation[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_char(c) {
            Some(kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)) => {
                Some(kind)
            }
            _ => return Err(malformed()),
        },
    };
    Ok((from, to, promotion))
}
