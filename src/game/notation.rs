//! # Move notation
//! Long-form algebraic notation for the move list: piece symbol, origin,
//! an `x` on captures, then target (`Ng1f3`, `e2e4`, `Bf3xb7`).
//!
//! Pawns get no symbol. The origin cell is always written out, so moves are
//! never disambiguated the way SAN does it.

use super::moves::Move;

/// Formats a recorded move.
pub fn notate(mv: &Move) -> String {
    let (kind, _) = mv.piece;
    let capture = if mv.is_capture() { "x" } else { "" };
    format!(
        "{}{}{}{}",
        kind.notation_symbol(),
        mv.from,
        capture,
        mv.to
    )
}

/// Groups moves by full move number: `(number, white move, black move)`.
pub fn notation_pairs(moves: &[Move]) -> Vec<(usize, String, Option<String>)> {
    moves
        .chunks(2)
        .enumerate()
        .map(|(i, chunk)| {
            let white = chunk.first().map(notate).unwrap_or_default();
            let black = chunk.get(1).map(notate);
            (i + 1, white, black)
        })
        .collect()
}
