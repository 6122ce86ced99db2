//! # Chess values
//! Everything the move history is made of: colours, pieces, cells, boards,
//! recorded moves and their notation.

pub mod board;
pub mod colour;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod square;
