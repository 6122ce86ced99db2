//! # Game session
//! The move history state machine. The move log is the only source of truth:
//! the displayed [`Board`] and the rules engine state are both recomputed from
//! it by full replay whenever the cursor jumps around.
//!
//! A session is either *live* (new moves may be played) or *viewing history*
//! (read-only inspection of a past position). Navigating never discards moves;
//! only a new move played from a cursor behind the end of the log truncates
//! the moves after it.

use thiserror::Error;

use crate::{
    engine::{
        GameStatus, IllegalMoveError, LegalMoves, RulesAdapter, RulesEngine, StandardRules,
        parse_notation,
    },
    game::{
        board::Board,
        colour::Colour,
        moves::{Move, Special},
        notation::{notate, notation_pairs},
        piece::{Piece, PieceKind},
        square::Cell,
    },
};

/// Why a move attempt did not change anything.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum MoveRejection {
    #[error("Moves cannot be played while viewing history")]
    ViewingHistory,
    #[error("It is {turn}'s turn, cannot move a {piece} piece")]
    WrongTurn { piece: Colour, turn: Colour },
    #[error("There is no piece on {0}")]
    NoPieceAt(Cell),
    #[error("The piece on {0} is not the one being moved")]
    PieceMismatch(Cell),
    #[error(transparent)]
    Illegal(#[from] IllegalMoveError),
}

/// The move log and the rules engine no longer agree. This is a bug, never a
/// user error.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum HistoryError {
    #[error("Replaying move {index} ({notation}) failed: {source}")]
    Diverged {
        index: usize,
        notation: String,
        #[source]
        source: IllegalMoveError,
    },
    #[error("Displayed board and rules engine disagree at move index {index}")]
    BoardMismatch { index: isize },
}

/// A game and its move log.
///
/// After a [`HistoryError`], the session stays in viewing mode and rejects
/// every move. It should be discarded.
#[derive(Clone, Debug)]
pub struct GameSession<E: RulesEngine = StandardRules> {
    rules: RulesAdapter<E>,
    moves: Vec<Move>,
    // Index of the last move applied to the displayed position, `None` for
    // the initial position.
    cursor: Option<usize>,
    viewing: bool,
}
impl Default for GameSession<StandardRules> {
    fn default() -> Self {
        Self::new()
    }
}
impl GameSession<StandardRules> {
    /// A new game using standard chess rules.
    pub fn new() -> Self {
        Self::with_engine(StandardRules::new())
    }
}
impl<E: RulesEngine> GameSession<E> {
    /// A new game backed by the given engine, which is reset first.
    pub fn with_engine(engine: E) -> Self {
        let mut rules = RulesAdapter::new(engine);
        rules.reset();
        Self {
            rules,
            moves: Vec::new(),
            cursor: None,
            viewing: false,
        }
    }

    /// Clears the history and starts over from the initial position.
    pub fn new_game(&mut self) {
        log::info!("Starting a new game");
        self.rules.reset();
        self.moves.clear();
        self.cursor = None;
        self.viewing = false;
    }

    /// Tries to move `piece` from `from` to `to`. Pawns reaching the last
    /// rank become queens.
    ///
    /// On error, nothing changed.
    pub fn attempt_move(&mut self, from: Cell, to: Cell, piece: Piece) -> Result<Move, MoveRejection> {
        self.attempt_move_with_promotion(from, to, piece, None)
    }

    /// Same as [`GameSession::attempt_move`], with an explicit promotion choice.
    pub fn attempt_move_with_promotion(
        &mut self,
        from: Cell,
        to: Cell,
        piece: Piece,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveRejection> {
        if let Err(rejection) = self.check_movable(from, piece) {
            log::warn!("Rejected {from}{to}: {rejection}");
            return Err(rejection);
        }

        let board = self.current_position();
        let record = self.rules.play(from, to, promotion).inspect_err(|e| {
            log::warn!("Rejected {from}{to}: {e}");
        })?;
        let mv = Move {
            from: record.from,
            to: record.to,
            piece: record.piece,
            // En passant is the only capture where the target cell is empty.
            captured: board.piece_on(record.to).or(record.captured),
            special: record.special,
        };

        let kept = self.played();
        if kept < self.moves.len() {
            log::info!(
                "Discarding {} moves after index {}",
                self.moves.len() - kept,
                self.current_move_index()
            );
            self.moves.truncate(kept);
        }
        self.moves.push(mv);
        self.cursor = Some(self.moves.len() - 1);
        self.viewing = false;
        log::info!("Played {} ({})", notate(&mv), record.notation);
        Ok(mv)
    }

    /// Plays a move written in engine notation (`e2e4`, `e7e8n`), moving
    /// whatever piece stands on the origin cell.
    pub fn play_notation(&mut self, notation: &str) -> Result<Move, MoveRejection> {
        let (from, to, promotion) = parse_notation(notation)?;
        let piece = self
            .current_position()
            .piece_on(from)
            .ok_or(MoveRejection::NoPieceAt(from))?;
        self.attempt_move_with_promotion(from, to, piece, promotion)
    }

    /// Displays the position after move `index` (`-1` for the initial
    /// position) and enters viewing mode. Indices outside of the log are
    /// ignored.
    pub fn view_position(&mut self, index: isize) -> Result<(), HistoryError> {
        if index < -1 || index >= self.moves.len() as isize {
            log::debug!("Ignoring view of out of range index {index}");
            return Ok(());
        }
        let cursor = usize::try_from(index).ok();
        if let Err(e) = self.replay_engine(cursor) {
            // The engine is left partially replayed, no move may be played on
            // top of it.
            self.viewing = true;
            return Err(e);
        }
        self.cursor = cursor;
        self.viewing = true;
        log::info!("Viewing position at move index {index}");
        Ok(())
    }

    /// Jumps back to the latest move and leaves viewing mode.
    pub fn return_to_current(&mut self) -> Result<(), HistoryError> {
        self.view_position(self.moves.len() as isize - 1)?;
        self.viewing = false;
        Ok(())
    }

    /// Leaves viewing mode without moving the cursor, so that the next move is
    /// played from the displayed position. Moves after the cursor are only
    /// discarded once that move is accepted.
    pub fn branch_here(&mut self) {
        if self.viewing {
            log::info!("Resuming play from move index {}", self.current_move_index());
            self.viewing = false;
        }
    }

    /// Views the position one move earlier.
    pub fn step_back(&mut self) -> Result<(), HistoryError> {
        self.view_position(self.current_move_index() - 1)
    }

    /// Views the position one move later. Reaching the end of the log does not
    /// leave viewing mode.
    pub fn step_forward(&mut self) -> Result<(), HistoryError> {
        self.view_position(self.current_move_index() + 1)
    }

    /// The board at the cursor, rebuilt from the move log.
    pub fn current_position(&self) -> Board {
        Board::replay(&self.moves[..self.played()])
    }

    /// Legal moves for the side to move. Empty while viewing history or once
    /// the game is over.
    pub fn legal_moves(&self) -> LegalMoves {
        if self.viewing || self.rules.is_game_over() {
            return LegalMoves::new();
        }
        self.rules.legal_moves()
    }

    /// Checks if a move would be accepted by the rules engine from the
    /// displayed position. Never changes any state.
    pub fn is_legal(&self, from: Cell, to: Cell) -> bool {
        self.rules.is_legal(from, to)
    }

    /// Game over in the engine's current position. While viewing history,
    /// that is the viewed position, not the latest one.
    pub fn is_game_over(&self) -> bool {
        self.rules.is_game_over()
    }

    /// Game over at the displayed position.
    pub fn is_game_over_at_cursor(&self) -> bool {
        self.rules.is_game_over()
    }

    /// Game over in the live game, `None` while viewing history.
    pub fn is_live_game_over(&self) -> Option<bool> {
        (!self.viewing).then(|| self.rules.is_game_over())
    }

    pub fn status(&self) -> GameStatus {
        self.rules.status()
    }

    /// Checks if a piece may be picked up: it must belong to the side to move,
    /// and the session must be live.
    pub fn can_move_piece(&self, piece: Option<Piece>) -> bool {
        match piece {
            Some((_, colour)) => colour == self.current_turn() && !self.viewing,
            None => false,
        }
    }

    /// The move that led to the displayed position.
    pub fn last_move(&self) -> Option<&Move> {
        self.cursor.map(|c| &self.moves[c])
    }

    /// The full move log, including moves after the cursor.
    pub fn move_history(&self) -> &[Move] {
        &self.moves
    }

    /// Move list grouped by full move number.
    pub fn notation_pairs(&self) -> Vec<(usize, String, Option<String>)> {
        notation_pairs(&self.moves)
    }

    /// Side to move at the displayed position.
    pub fn current_turn(&self) -> Colour {
        Colour::to_move_after(self.played())
    }

    pub fn is_white_turn(&self) -> bool {
        self.current_turn().is_white()
    }

    /// Index of the last displayed move, `-1` at the initial position.
    pub fn current_move_index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn is_viewing_history(&self) -> bool {
        self.viewing
    }

    /// Checks that the displayed board and the side to move agree with the
    /// rules engine.
    pub fn verify_consistency(&self) -> Result<(), HistoryError> {
        if self.current_position() != self.rules.placement()
            || self.current_turn() != self.rules.turn()
        {
            return Err(HistoryError::BoardMismatch {
                index: self.current_move_index(),
            });
        }
        Ok(())
    }

    /// Read access to the rules adapter.
    pub fn rules(&self) -> &RulesAdapter<E> {
        &self.rules
    }

    /// Number of moves applied to reach the displayed position.
    #[inline]
    fn played(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    fn check_movable(&self, from: Cell, piece: Piece) -> Result<(), MoveRejection> {
        if self.viewing {
            return Err(MoveRejection::ViewingHistory);
        }
        let turn = self.current_turn();
        if piece.1 != turn {
            return Err(MoveRejection::WrongTurn {
                piece: piece.1,
                turn,
            });
        }
        match self.current_position().piece_on(from) {
            None => Err(MoveRejection::NoPieceAt(from)),
            Some(on_board) if on_board != piece => Err(MoveRejection::PieceMismatch(from)),
            Some(_) => Ok(()),
        }
    }

    /// Resets the engine and replays the log up to and including `cursor`.
    fn replay_engine(&mut self, cursor: Option<usize>) -> Result<(), HistoryError> {
        self.rules.reset();
        let end = cursor.map_or(0, |c| c + 1);
        for (index, mv) in self.moves[..end].iter().enumerate() {
            let promotion = match mv.special {
                Special::Promotion(kind) => Some(kind),
                _ => None,
            };
            let notation = RulesAdapter::<E>::to_engine_notation_with_promotion(mv.from, mv.to, promotion);
            if let Err(source) = self.rules.apply_move(&notation) {
                log::error!("Move log diverged from the rules engine at index {index}: {source}");
                return Err(HistoryError::Diverged {
                    index,
                    notation,
                    source,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cell(s: &str) -> Cell {
        s.parse().unwrap()
    }

    fn play(session: &mut GameSession, moves: &[&str]) {
        for m in moves {
            session.play_notation(m).unwrap();
        }
    }

    #[test]
    fn starts_live_at_initial_position() {
        let session = GameSession::new();
        assert_eq!(session.current_move_index(), -1);
        assert!(!session.is_viewing_history());
        assert!(session.is_white_turn());
        assert_eq!(session.current_position(), Board::initial());
        assert_eq!(session.last_move(), None);
        assert_eq!(session.legal_moves().len(), 20);
    }

    #[test]
    fn accepted_move_is_recorded() {
        let mut session = GameSession::new();
        let mv = session
            .attempt_move(cell("e2"), cell("e4"), (PieceKind::Pawn, Colour::White))
            .unwrap();
        assert_eq!(notate(&mv), "e2e4");
        assert_eq!(session.move_history(), &[mv]);
        assert_eq!(session.last_move(), Some(&mv));
        assert_eq!(session.current_move_index(), 0);
        assert!(!session.is_white_turn());
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut session = GameSession::new();
        play(&mut session, &["e2e4"]);
        let before = session.move_history().to_vec();

        let white_pawn = (PieceKind::Pawn, Colour::White);
        let black_pawn = (PieceKind::Pawn, Colour::Black);
        assert!(matches!(
            session.attempt_move(cell("d2"), cell("d4"), white_pawn),
            Err(MoveRejection::WrongTurn { .. })
        ));
        assert_eq!(
            session.attempt_move(cell("e5"), cell("e4"), black_pawn),
            Err(MoveRejection::NoPieceAt(cell("e5")))
        );
        assert_eq!(
            session.attempt_move(cell("b8"), cell("c6"), black_pawn),
            Err(MoveRejection::PieceMismatch(cell("b8")))
        );
        assert!(matches!(
            session.attempt_move(cell("e7"), cell("e4"), black_pawn),
            Err(MoveRejection::Illegal(_))
        ));

        assert_eq!(session.move_history(), &before[..]);
        assert_eq!(session.current_move_index(), 0);
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn captures_are_recorded() {
        let mut session = GameSession::new();
        play(&mut session, &["e2e4", "d7d5"]);
        let mv = session.play_notation("e4d5").unwrap();
        assert_eq!(mv.captured, Some((PieceKind::Pawn, Colour::Black)));
        assert_eq!(notate(&mv), "e4xd5");
    }

    #[test]
    fn viewing_keeps_future_moves() {
        let mut session = GameSession::new();
        play(&mut session, &["e2e4", "e7e5", "g1f3"]);
        let log = session.move_history().to_vec();

        session.view_position(0).unwrap();
        assert!(session.is_viewing_history());
        assert_eq!(session.current_move_index(), 0);
        assert!(!session.is_white_turn());
        assert_eq!(session.move_history(), &log[..]);
        assert_eq!(session.current_position(), Board::replay(&log[..1]));
        assert!(session.legal_moves().is_empty());
        assert_eq!(session.is_live_game_over(), None);
        assert!(session.verify_consistency().is_ok());

        session.view_position(-1).unwrap();
        assert_eq!(session.current_position(), Board::initial());
        assert!(session.is_white_turn());
        assert!(session.verify_consistency().is_ok());

        session.return_to_current().unwrap();
        assert!(!session.is_viewing_history());
        assert_eq!(session.current_move_index(), 2);
        assert_eq!(session.is_live_game_over(), Some(false));
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn out_of_range_view_is_ignored() {
        let mut session = GameSession::new();
        play(&mut session, &["e2e4", "e7e5"]);
        for index in [-2, 2, 100, isize::MIN, isize::MAX] {
            session.view_position(index).unwrap();
            assert!(!session.is_viewing_history());
            assert_eq!(session.current_move_index(), 1);
        }
    }

    #[test]
    fn step_through_history() {
        let mut session = GameSession::new();
        play(&mut session, &["d2d4", "d7d5"]);
        session.step_back().unwrap();
        assert_eq!(session.current_move_index(), 0);
        session.step_back().unwrap();
        assert_eq!(session.current_move_index(), -1);
        session.step_back().unwrap();
        assert_eq!(session.current_move_index(), -1);
        session.step_forward().unwrap();
        session.step_forward().unwrap();
        session.step_forward().unwrap();
        assert_eq!(session.current_move_index(), 1);
        assert!(session.is_viewing_history());
    }

    #[test]
    fn branching_truncates_on_next_move() {
        let mut session = GameSession::new();
        play(&mut session, &["e2e4", "e7e5", "g1f3"]);
        let first = session.move_history()[0];

        session.view_position(0).unwrap();
        session.branch_here();
        assert!(!session.is_viewing_history());
        assert_eq!(session.move_history().len(), 3);

        let replacement = session.play_notation("c7c5").unwrap();
        assert_eq!(session.move_history(), &[first, replacement]);
        assert_eq!(session.current_move_index(), 1);
        assert!(session.is_white_turn());
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn can_move_piece_rules() {
        let mut session = GameSession::new();
        assert!(!session.can_move_piece(None));
        assert!(session.can_move_piece(Some((PieceKind::Knight, Colour::White))));
        assert!(!session.can_move_piece(Some((PieceKind::Knight, Colour::Black))));
        play(&mut session, &["e2e4"]);
        assert!(session.can_move_piece(Some((PieceKind::Knight, Colour::Black))));
        session.view_position(0).unwrap();
        assert!(!session.can_move_piece(Some((PieceKind::Knight, Colour::Black))));
    }

    #[test]
    fn checkmate_ends_the_game() {
        let mut session = GameSession::new();
        play(&mut session, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(session.is_game_over());
        assert!(session.legal_moves().is_empty());
        assert_eq!(
            session.status(),
            GameStatus::Checkmate {
                winner: Colour::Black
            }
        );

        // The viewed position decides, not the live game.
        session.view_position(2).unwrap();
        assert!(!session.is_game_over());
        assert!(!session.is_game_over_at_cursor());
        session.return_to_current().unwrap();
        assert_eq!(session.is_live_game_over(), Some(true));
    }

    #[test]
    fn special_moves_replay_like_the_engine() {
        let mut session = GameSession::new();
        play(
            &mut session,
            &[
                "e2e4", "d7d5", "e4e5", "f7f5", "e5f6", "g8f6", "g1f3", "b8c6", "f1c4", "c8g4",
                "e1g1", "d8d6", "b2b3", "e8c8",
            ],
        );
        assert!(session.verify_consistency().is_ok());
        let board = session.current_position();
        assert_eq!(board.piece_on(cell("g1")), Some((PieceKind::King, Colour::White)));
        assert_eq!(board.piece_on(cell("f1")), Some((PieceKind::Rook, Colour::White)));
        assert_eq!(board.piece_on(cell("c8")), Some((PieceKind::King, Colour::Black)));
        assert_eq!(board.piece_on(cell("d8")), Some((PieceKind::Rook, Colour::Black)));
        assert_eq!(board.piece_on(cell("f5")), None);

        session.view_position(4).unwrap();
        assert!(session.verify_consistency().is_ok());
        session.return_to_current().unwrap();
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn pawns_promote_to_queens_by_default() {
        let mut session = GameSession::new();
        play(
            &mut session,
            &["h2h4", "g7g5", "h4g5", "h7h6", "g5h6", "f8g7", "h6h7", "e7e6"],
        );
        let mv = session
            .attempt_move(cell("h7"), cell("g8"), (PieceKind::Pawn, Colour::White))
            .unwrap();
        assert_eq!(mv.special, Special::Promotion(PieceKind::Queen));
        assert_eq!(
            session.current_position().piece_on(cell("g8")),
            Some((PieceKind::Queen, Colour::White))
        );

        session.view_position(7).unwrap();
        session.branch_here();
        let mv = session.play_notation("h7g8n").unwrap();
        assert_eq!(mv.special, Special::Promotion(PieceKind::Knight));
        session.view_position(8).unwrap();
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn new_game_resets_everything() {
        let mut session = GameSession::new();
        play(&mut session, &["e2e4", "e7e5"]);
        session.view_position(0).unwrap();
        session.new_game();
        assert!(session.move_history().is_empty());
        assert_eq!(session.current_move_index(), -1);
        assert!(!session.is_viewing_history());
        assert!(session.is_white_turn());
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn stalemate_ends_the_game() {
        let mut session = GameSession::new();
        play(
            &mut session,
            &[
                "e2e3", "a7a5", "d1h5", "a8a6", "h5a5", "h7h5", "h2h4", "a6h6", "a5c7", "f7f6",
                "c7d7", "e8f7", "d7b7", "d8d3", "b7b8", "d3h7", "b8c8", "f7g6", "c8e6",
            ],
        );
        assert_eq!(session.status(), GameStatus::Stalemate);
        assert!(session.is_game_over());
        assert_eq!(session.is_live_game_over(), Some(true));
        assert!(session.legal_moves().is_empty());
        assert!(!session.is_white_turn());
        assert!(session.verify_consistency().is_ok());
    }

    #[test]
    fn fifty_move_rule_ends_the_game() {
        let mut session = GameSession::new();
        for _ in 0..25 {
            play(&mut session, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        }
        assert_eq!(session.move_history().len(), 100);
        assert_eq!(session.status(), GameStatus::FiftyMoveRule);
        assert!(session.is_game_over());
        assert!(session.legal_moves().is_empty());

        session.view_position(2).unwrap();
        assert!(!session.is_game_over_at_cursor());
        assert_eq!(session.is_live_game_over(), None);
    }
}
