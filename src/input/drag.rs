use crate::{
    engine::RulesEngine,
    game::{board::Board, moves::Move, piece::Piece, square::Cell},
    session::{GameSession, MoveRejection},
};

/// Screen position of the board's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardRect {
    pub left: f32,
    pub top: f32,
}

/// A piece being dragged and the last known pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DraggedPiece {
    pub piece: Piece,
    pub from: Cell,
    pub x: f32,
    pub y: f32,
}

/// What happened when a gesture ended.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// No drag was in progress.
    NoDrag,
    /// The board was not on screen; nothing was attempted.
    Cancelled,
    /// The pointer was released outside of the board.
    OffBoard,
    Moved(Move),
    Rejected(MoveRejection),
}

/// Tracks a single drag gesture at a time, for mouse and touch alike.
#[derive(Clone, Debug)]
pub struct DragController {
    cell_size: f32,
    dragging: Option<DraggedPiece>,
}
impl DragController {
    /// A controller for a board drawn with square cells of `cell_size` pixels.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            dragging: None,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The drag in progress, if any.
    #[inline]
    pub fn dragging(&self) -> Option<&DraggedPiece> {
        self.dragging.as_ref()
    }

    /// Starts dragging the piece on `cell`. Pressing an empty cell does
    /// nothing and returns `false`.
    pub fn on_gesture_start(&mut self, board: &Board, cell: Cell, x: f32, y: f32) -> bool {
        let Some(piece) = board.piece_on(cell) else {
            return false;
        };
        log::debug!("Picked up {:?} on {cell}", piece);
        self.dragging = Some(DraggedPiece {
            piece,
            from: cell,
            x,
            y,
        });
        true
    }

    /// Follows the pointer.
    pub fn on_gesture_move(&mut self, x: f32, y: f32) {
        if let Some(dragged) = self.dragging.as_mut() {
            dragged.x = x;
            dragged.y = y;
        }
    }

    /// Drops the piece at the given pointer position. `board` is `None` when
    /// the board is not on screen anymore, which silently cancels the drag.
    pub fn on_gesture_end<E: RulesEngine>(
        &mut self,
        x: f32,
        y: f32,
        board: Option<BoardRect>,
        session: &mut GameSession<E>,
    ) -> DropOutcome {
        let Some(dragged) = self.dragging.take() else {
            return DropOutcome::NoDrag;
        };
        let Some(rect) = board else {
            log::debug!("Board unavailable, cancelling drag from {}", dragged.from);
            return DropOutcome::Cancelled;
        };
        let Some(to) = self.cell_at(rect, x, y) else {
            log::debug!("Dropped outside of the board at ({x}, {y})");
            return DropOutcome::OffBoard;
        };
        match session.attempt_move(dragged.from, to, dragged.piece) {
            Ok(mv) => DropOutcome::Moved(mv),
            Err(rejection) => DropOutcome::Rejected(rejection),
        }
    }

    /// Drops the piece where the pointer was last seen. Touch releases carry
    /// no position of their own.
    pub fn on_touch_end<E: RulesEngine>(
        &mut self,
        board: Option<BoardRect>,
        session: &mut GameSession<E>,
    ) -> DropOutcome {
        let Some(DraggedPiece { x, y, .. }) = self.dragging else {
            return DropOutcome::NoDrag;
        };
        self.on_gesture_end(x, y, board, session)
    }

    /// Abandons the drag in progress.
    pub fn cancel(&mut self) {
        self.dragging = None;
    }

    /// Cell under a pointer position.
    pub fn cell_at(&self, rect: BoardRect, x: f32, y: f32) -> Option<Cell> {
        if self.cell_size <= 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let col = ((x - rect.left) / self.cell_size).floor() as i64;
        let row = ((y - rect.top) / self.cell_size).floor() as i64;
        Cell::from_signed(row, col)
    }
}
