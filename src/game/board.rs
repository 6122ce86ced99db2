//! # Board geometry
//! The 8x8 grid of pieces that gets rendered. A [`Board`] is never
//! authoritative: it is always derived by replaying the move log from
//! [`Board::initial`].

use super::{
    colour::Colour,
    moves::{Move, Special},
    piece::{piece_char, Piece, PieceKind},
    square::{Cell, BOARD_SIZE},
};

/// Shade of a cell when drawn.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum CellShade {
    Light,
    Dark,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}
impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard starting layout, black on rows 0 and 1.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.cells[0][col] = Some((kind, Colour::Black));
            board.cells[1][col] = Some((PieceKind::Pawn, Colour::Black));
            board.cells[6][col] = Some((PieceKind::Pawn, Colour::White));
            board.cells[7][col] = Some((kind, Colour::White));
        }
        board
    }

    /// Returns the piece on a given cell if any.
    #[inline]
    pub fn piece_on(&self, cell: Cell) -> Option<Piece> {
        self.cells[cell.row() as usize][cell.col() as usize]
    }

    /// Places (or removes, with `None`) a piece on a cell.
    #[inline]
    pub fn set(&mut self, cell: Cell, piece: Option<Piece>) {
        self.cells[cell.row() as usize][cell.col() as usize] = piece
    }

    /// Rows of the board, row 0 first.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    /// Applies the placement part of a recorded move. No legality checks are
    /// made: the move is assumed to have been accepted by the rules engine.
    pub fn apply(&mut self, mv: &Move) {
        self.set(mv.from, None);
        match mv.special {
            Special::Normal | Special::Promotion(_) => {}
            Special::Castle { rook_from, rook_to } => {
                let rook = self.piece_on(rook_from);
                self.set(rook_from, None);
                self.set(rook_to, rook);
            }
            Special::EnPassant { captured_at } => self.set(captured_at, None),
        }
        self.set(mv.to, Some(mv.landing_piece()));
    }

    /// Replays a sequence of moves from the initial layout.
    pub fn replay<'a>(moves: impl IntoIterator<Item = &'a Move>) -> Self {
        let mut board = Self::initial();
        for mv in moves {
            board.apply(mv);
        }
        board
    }

    /// Renders the board as text, rank 8 at the top from white's perspective
    /// and rank 1 at the top from black's.
    pub fn render(&self, perspective: Colour) -> String {
        let order: Vec<u8> = if perspective.is_white() {
            (0..BOARD_SIZE).collect()
        } else {
            (0..BOARD_SIZE).rev().collect()
        };
        let mut out = String::new();
        for &row in &order {
            for (i, cell) in order.iter().filter_map(|&col| Cell::new(row, col)).enumerate() {
                if i == 0 {
                    out.push(cell.rank_char());
                    out.push(' ');
                }
                out.push(self.piece_on(cell).map_or('.', piece_char));
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  ");
        for cell in order.iter().filter_map(|&col| Cell::new(0, col)) {
            out.push(cell.file_char());
            out.push(' ');
        }
        out.push('\n');
        out
    }
}
impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(Colour::White))
    }
}

/// Shade of a cell for a given perspective. The board is mirrored for white
/// so that a1 ends up in the bottom-left corner.
pub fn cell_color(cell: Cell, perspective: Colour) -> CellShade {
    let last = BOARD_SIZE - 1;
    let (row, col) = if perspective.is_white() {
        (last - cell.row(), cell.col())
    } else {
        (cell.row(), last - cell.col())
    };
    if (row + col) % 2 == 1 {
        CellShade::Light
    } else {
        CellShade::Dark
    }
}
