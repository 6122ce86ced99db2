//! Standard chess rules, backed by [`shakmaty`].

use shakmaty::{
    zobrist::{Zobrist64, ZobristHash},
    Chess, Color, EnPassantMode, File, Move as EngineMove, Position, Rank, Role, Square,
};

use super::{parse_notation, EngineMoveRecord, GameStatus, IllegalMoveError, LegalMoves, RulesEngine};
use crate::game::{
    board::Board,
    colour::Colour,
    moves::Special,
    piece::{Piece, PieceKind},
    square::Cell,
};

/// A standard chess position with an undo stack.
///
/// Position hashes of every position reached since the last reset are kept to
/// detect threefold repetitions.
#[derive(Clone, Debug)]
pub struct StandardRules {
    position: Chess,
    undo: Vec<Chess>,
    hashes: Vec<Zobrist64>,
}
impl Default for StandardRules {
    fn default() -> Self {
        Self::new()
    }
}
impl StandardRules {
    pub fn new() -> Self {
        let position = Chess::default();
        let hashes = vec![hash(&position)];
        Self {
            position,
            undo: Vec::new(),
            hashes,
        }
    }

    /// Number of moves that can currently be undone.
    #[inline]
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    /// Finds the legal move going from one cell to another. Castling is
    /// expressed as the king moving two cells.
    fn find_move(&self, from: Cell, to: Cell, promotion: Option<PieceKind>) -> Option<EngineMove> {
        let from = square(from);
        let to = square(to);
        let promotion = promotion.map(role);
        self.position
            .legal_moves()
            .into_iter()
            .find(|m| endpoints(m) == Some((from, to)) && m.promotion() == promotion)
    }

    fn record(&self, notation: &str, mv: &EngineMove) -> Option<EngineMoveRecord> {
        let turn = self.position.turn();
        let (from, to) = endpoints(mv)?;
        let opponent = |role: Role| (piece_kind(role), colour(turn.other()));
        let (captured, special) = match *mv {
            EngineMove::Normal {
                capture, promotion, ..
            } => (
                capture.map(opponent),
                promotion.map_or(Special::Normal, |p| Special::Promotion(piece_kind(p))),
            ),
            EngineMove::EnPassant { from, to } => (
                Some(opponent(Role::Pawn)),
                Special::EnPassant {
                    captured_at: cell(Square::from_coords(to.file(), from.rank())),
                },
            ),
            EngineMove::Castle { king, rook } => {
                let rook_to = if rook.file() > king.file() {
                    File::F
                } else {
                    File::D
                };
                (
                    None,
                    Special::Castle {
                        rook_from: cell(rook),
                        rook_to: cell(Square::from_coords(rook_to, king.rank())),
                    },
                )
            }
            EngineMove::Put { .. } => return None,
        };
        Some(EngineMoveRecord {
            notation: notation.to_string(),
            from: cell(from),
            to: cell(to),
            piece: (piece_kind(mv.role()), colour(turn)),
            captured,
            special,
        })
    }
}
impl RulesEngine for StandardRules {
    fn apply_move(&mut self, notation: &str) -> Result<EngineMoveRecord, IllegalMoveError> {
        let (from, to, promotion) = parse_notation(notation)?;
        let mv = self
            .find_move(from, to, promotion)
            .ok_or_else(|| IllegalMoveError::rejected(notation))?;
        let record = self
            .record(notation, &mv)
            .ok_or_else(|| IllegalMoveError::rejected(notation))?;

        let mut next = self.position.clone();
        next.play_unchecked(&mv);
        self.hashes.push(hash(&next));
        self.undo.push(std::mem::replace(&mut self.position, next));
        Ok(record)
    }

    fn undo_last(&mut self) -> bool {
        match self.undo.pop() {
            Some(previous) => {
                self.position = previous;
                self.hashes.pop();
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn legal_moves(&self) -> LegalMoves {
        let mut moves = LegalMoves::new();
        for (from, to) in self.position.legal_moves().iter().filter_map(endpoints) {
            let pair = (cell(from), cell(to));
            if moves.contains(&pair) {
                continue;
            }
            if moves.push(pair).is_err() {
                log::warn!("Legal move list is full, dropping the remaining moves");
                break;
            }
        }
        moves
    }

    fn is_legal(&self, notation: &str) -> bool {
        parse_notation(notation)
            .ok()
            .and_then(|(from, to, promotion)| self.find_move(from, to, promotion))
            .is_some()
    }

    fn status(&self) -> GameStatus {
        let position = &self.position;
        if position.is_checkmate() {
            GameStatus::Checkmate {
                winner: colour(position.turn().other()),
            }
        } else if position.is_stalemate() {
            GameStatus::Stalemate
        } else if position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if position.halfmoves() >= 100 {
            GameStatus::FiftyMoveRule
        } else if self.repetitions() >= 3 {
            GameStatus::ThreefoldRepetition
        } else if position.is_check() {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }

    fn turn(&self) -> Colour {
        colour(self.position.turn())
    }

    fn placement(&self) -> Board {
        let mut board = Board::empty();
        for c in Cell::iter() {
            let piece = self
                .position
                .board()
                .piece_at(square(c))
                .map(|p| -> Piece { (piece_kind(p.role), colour(p.color)) });
            board.set(c, piece);
        }
        board
    }
}
impl StandardRules {
    /// Number of times the current position was reached.
    fn repetitions(&self) -> usize {
        match self.hashes.last() {
            Some(current) => self.hashes.iter().filter(|&h| h == current).count(),
            None => 0,
        }
    }
}

#[inline]
fn hash(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

/// Origin and destination of a move as a user would drag it.
fn endpoints(mv: &EngineMove) -> Option<(Square, Square)> {
    match *mv {
        EngineMove::Normal { from, to, .. } | EngineMove::EnPassant { from, to } => Some((from, to)),
        EngineMove::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            Some((king, Square::from_coords(file, king.rank())))
        }
        EngineMove::Put { .. } => None,
    }
}

#[inline]
fn square(cell: Cell) -> Square {
    Square::from_coords(
        File::new(u32::from(cell.col())),
        Rank::new(u32::from(cell.rank_index())),
    )
}

#[inline]
fn cell(square: Square) -> Cell {
    // Squares always map onto the 8x8 board.
    Cell::from_file_rank(square.file() as u8, square.rank() as u8)
        .unwrap_or_else(|| unreachable!("square {square} is off the board"))
}

#[inline]
fn colour(color: Color) -> Colour {
    match color {
        Color::White => Colour::White,
        Color::Black => Colour::Black,
    }
}

#[inline]
fn piece_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

#[inline]
fn role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}
