//! Core value types for chess.
//!
//! This crate provides the fundamental types shared by the rules engine
//! and its front ends:
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for resolved moves and [`MoveRequest`] for move input
//! - FEN field parsing

mod color;
mod fen;
mod mov;
mod notation;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenRecord};
pub use mov::{CastleSide, Move, MoveFlag};
pub use notation::{MoveRequest, NotationError};
pub use piece::{
    Movement, Piece, PieceKind, BISHOP_DIRECTIONS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
pub use square::{File, Rank, Square, SquareError};
