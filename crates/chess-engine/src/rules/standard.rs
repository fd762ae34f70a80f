//! Standard chess rules implementation.

use super::RuleSet;
use crate::movegen::{is_king_attacked, pseudo_legal_moves};
use crate::Board;
use chess_core::{Color, Move};

/// Standard chess rules (FIDE), without the draw claims.
///
/// - Standard piece movement, castling, en passant and promotion
/// - Legality by playing each candidate on a scratch copy of the board
/// - Check, checkmate and stalemate detection
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl StandardChess {
    /// Plays `mv` on a scratch copy and reports whether the mover's king
    /// is safe afterwards, along with whether the opponent is now in check.
    fn try_on_copy(board: &Board, mv: &Move) -> Option<bool> {
        let us = mv.color();
        let mut scratch = board.clone();
        scratch.apply(mv);
        if is_king_attacked(&scratch, us) {
            None
        } else {
            Some(is_king_attacked(&scratch, us.opposite()))
        }
    }
}

impl RuleSet for StandardChess {
    fn initial_board(&self) -> Board {
        Board::startpos()
    }

    fn legal_moves(&self, board: &Board) -> Vec<Move> {
        pseudo_legal_moves(board, board.side_to_move())
            .into_iter()
            .filter_map(|mv| Self::try_on_copy(board, &mv).map(|check| mv.with_check(check)))
            .collect()
    }

    fn is_in_check(&self, board: &Board, color: Color) -> bool {
        is_king_attacked(board, color)
    }
}
