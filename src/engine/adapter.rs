//! # Rules adapter
//! Sole bridge between the move history and a [`RulesEngine`]. Converts board
//! cells to engine notation and back, and logs every engine call.

use super::{EngineMoveRecord, GameStatus, IllegalMoveError, LegalMoves, RulesEngine};
use crate::game::{board::Board, colour::Colour, piece::PieceKind, square::Cell};

#[derive(Clone, Debug, Default)]
pub struct RulesAdapter<E: RulesEngine> {
    engine: E,
}
impl<E: RulesEngine> RulesAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Engine notation for a move between two cells: `e2e4`.
    pub fn to_engine_notation(from: Cell, to: Cell) -> String {
        format!("{from}{to}")
    }

    /// Engine notation with a promotion suffix: `e7e8q`.
    pub fn to_engine_notation_with_promotion(
        from: Cell,
        to: Cell,
        promotion: Option<PieceKind>,
    ) -> String {
        match promotion {
            Some(kind) => format!("{from}{to}{kind}"),
            None => Self::to_engine_notation(from, to),
        }
    }

    /// Plays a move given in engine notation.
    pub fn apply_move(&mut self, notation: &str) -> Result<EngineMoveRecord, IllegalMoveError> {
        log::debug!("Applying {notation}");
        let result = self.engine.apply_move(notation);
        if let Err(e) = &result {
            log::debug!("Engine refused the move: {e}");
        }
        result
    }

    /// Plays a move between two cells. A pawn reaching the last rank without
    /// an explicit promotion becomes a queen.
    pub fn play(
        &mut self,
        from: Cell,
        to: Cell,
        promotion: Option<PieceKind>,
    ) -> Result<EngineMoveRecord, IllegalMoveError> {
        let notation = self.resolve(from, to, promotion);
        self.apply_move(&notation)
    }

    /// Reverts the last accepted move.
    pub fn undo_last(&mut self) -> bool {
        log::debug!("Undoing last engine move");
        self.engine.undo_last()
    }

    /// Resets the engine to the initial position.
    pub fn reset(&mut self) {
        log::debug!("Resetting engine");
        self.engine.reset()
    }

    pub fn legal_moves(&self) -> LegalMoves {
        self.engine.legal_moves()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn turn(&self) -> Colour {
        self.engine.turn()
    }

    pub fn placement(&self) -> Board {
        self.engine.placement()
    }

    /// Checks if moving from `from` to `to` would be accepted. Never changes
    /// the engine state.
    pub fn is_legal(&self, from: Cell, to: Cell) -> bool {
        self.engine.is_legal(&self.resolve(from, to, None))
    }

    /// Read access to the wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn resolve(&self, from: Cell, to: Cell, promotion: Option<PieceKind>) -> String {
        if promotion.is_some() {
            return Self::to_engine_notation_with_promotion(from, to, promotion);
        }
        let plain = Self::to_engine_notation(from, to);
        if self.engine.is_legal(&plain) {
            return plain;
        }
        let queen = Self::to_engine_notation_with_promotion(from, to, Some(PieceKind::Queen));
        if self.engine.is_legal(&queen) {
            queen
        } else {
            plain
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::StandardRules;

    fn cell(s: &str) -> Cell {
        s.parse().unwrap()
    }

    #[test]
    fn notation_follows_engine_ranks() {
        let from = Cell::new(6, 4).unwrap();
        let to = Cell::new(4, 4).unwrap();
        assert_eq!(RulesAdapter::<StandardRules>::to_engine_notation(from, to), "e2e4");
        assert_eq!(
            RulesAdapter::<StandardRules>::to_engine_notation_with_promotion(
                Cell::new(1, 0).unwrap(),
                Cell::new(0, 0).unwrap(),
                Some(PieceKind::Knight)
            ),
            "a7a8n"
        );
    }

    #[test]
    fn is_legal_is_idempotent() {
        let mut adapter = RulesAdapter::new(StandardRules::new());
        adapter.play(cell("e2"), cell("e4"), None).unwrap();
        let before = adapter.placement();
        for _ in 0..5 {
            assert!(adapter.is_legal(cell("e7"), cell("e5")));
            assert!(!adapter.is_legal(cell("e7"), cell("e4")));
            assert!(!adapter.is_legal(cell("d2"), cell("d4")));
        }
        assert_eq!(adapter.placement(), before);
        assert_eq!(adapter.turn(), Colour::Black);
        assert_eq!(adapter.engine().depth(), 1);
    }

    #[test]
    fn legal_moves_are_board_cells() {
        let adapter = RulesAdapter::new(StandardRules::new());
        let moves = adapter.legal_moves();
        assert!(moves.contains(&(cell("g1"), cell("f3"))));
        assert!(moves.contains(&(cell("e2"), cell("e4"))));
        assert!(!moves.contains(&(cell("e2"), cell("e5"))));
        for (from, _) in moves.iter() {
            assert!(from.row() >= 6);
        }
    }

    #[test]
    fn reset_goes_back_to_start() {
        let mut adapter = RulesAdapter::new(StandardRules::new());
        adapter.play(cell("d2"), cell("d4"), None).unwrap();
        adapter.reset();
        assert_eq!(adapter.placement(), Board::initial());
        assert_eq!(adapter.turn(), Colour::White);
        assert!(!adapter.undo_last());
    }
}
