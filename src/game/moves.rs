//! # Recorded moves
//! A [`Move`] is what the move log stores once the rules engine accepted it.

use super::{
    piece::{Piece, PieceKind},
    square::Cell,
};

/// Side effects of a move beyond lifting `piece` from `from` and dropping it
/// on `to`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Special {
    #[default]
    Normal,
    /// The king moved two cells; the rook jumps from `rook_from` to `rook_to`.
    Castle { rook_from: Cell, rook_to: Cell },
    /// The captured pawn sat on `captured_at`, not on the target cell.
    EnPassant { captured_at: Cell },
    /// The pawn is replaced by a piece of this kind on arrival.
    Promotion(PieceKind),
}

/// A move as recorded in the history log. Immutable once recorded.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: Special,
}
impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// The piece standing on the target cell once the move is played.
    #[inline]
    pub fn landing_piece(&self) -> Piece {
        match self.special {
            Special::Promotion(kind) => (kind, self.piece.1),
            _ => self.piece,
        }
    }
}
