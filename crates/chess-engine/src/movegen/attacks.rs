//! Square attack detection.
//!
//! Attacks follow the same movement table as move generation, with two
//! differences: pawns attack only their forward diagonals (whether or not
//! anything stands there), and castling never attacks anything.

use crate::Board;
use chess_core::{Color, Movement, Piece, Square};

/// Returns true if `piece` attacks `target` on this board.
pub fn attacks_square(board: &Board, piece: Piece, target: Square) -> bool {
    let from = piece.square;
    match piece.kind.movement() {
        Movement::Pawn => {
            let dir = piece.color.pawn_direction();
            from.offset(-1, dir) == Some(target) || from.offset(1, dir) == Some(target)
        }
        Movement::Step(offsets) => offsets
            .iter()
            .any(|&(df, dr)| from.offset(df, dr) == Some(target)),
        Movement::Slide(directions) => directions.iter().any(|&(df, dr)| {
            let mut current = from;
            while let Some(next) = current.offset(df, dr) {
                if next == target {
                    return true;
                }
                if !board.is_empty(next) {
                    return false;
                }
                current = next;
            }
            false
        }),
    }
}

/// Returns true if any piece of `by_color` attacks `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|piece| attacks_square(board, piece, sq))
}

/// Returns true if the king of `king_color` is attacked.
///
/// A board without that king is never in check.
pub fn is_king_attacked(board: &Board, king_color: Color) -> bool {
    board
        .king_square(king_color)
        .is_some_and(|sq| is_square_attacked(board, sq, king_color.opposite()))
}

/// The enemy pieces currently attacking `color`'s king.
pub fn checkers(board: &Board, color: Color) -> Vec<Piece> {
    let Some(king) = board.king_square(color) else {
        return Vec::new();
    };
    board
        .pieces_of(color.opposite())
        .filter(|piece| attacks_square(board, *piece, king))
        .collect()
}
