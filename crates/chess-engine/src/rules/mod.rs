//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait. The game engine is
//! rule-agnostic: it asks the active rule set for the starting board, the
//! legal moves and the verdict on a position, and only applies the moves
//! it is handed.

mod standard;

pub use standard::StandardChess;

use crate::Board;
use chess_core::{Color, Move};
use std::fmt;

/// Status of the side to move, as judged from the board alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Legal moves exist and the king is safe.
    Ongoing,
    /// Legal moves exist but the king is attacked.
    Check,
    /// The king is attacked and there is no legal reply.
    Checkmate,
    /// The king is safe but there is no legal move.
    Stalemate,
}

impl Verdict {
    /// Returns true if the game cannot continue from this position.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Verdict::Checkmate | Verdict::Stalemate)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Ongoing => "ongoing",
            Verdict::Check => "check",
            Verdict::Checkmate => "checkmate",
            Verdict::Stalemate => "stalemate",
        };
        f.write_str(s)
    }
}

/// Trait for the rules a game is played under.
///
/// # Example
///
/// ```
/// use chess_engine::rules::{RuleSet, Verdict};
/// use chess_engine::StandardChess;
///
/// let board = StandardChess.initial_board();
/// assert_eq!(StandardChess.legal_moves(&board).len(), 20);
/// assert_eq!(StandardChess.verdict(&board), Verdict::Ongoing);
/// ```
pub trait RuleSet {
    /// Returns the board a new game starts from.
    fn initial_board(&self) -> Board;

    /// Generates all legal moves for the side to move.
    ///
    /// The order is deterministic for a given board. Each move has its
    /// check flag set when it attacks the opposing king.
    fn legal_moves(&self, board: &Board) -> Vec<Move>;

    /// Returns true if `color`'s king is attacked.
    fn is_in_check(&self, board: &Board, color: Color) -> bool;

    /// Returns true if `mv` is one of the legal moves on this board.
    fn is_legal(&self, board: &Board, mv: &Move) -> bool {
        self.legal_moves(board).iter().any(|legal| {
            legal.from() == mv.from() && legal.to() == mv.to() && legal.flag() == mv.flag()
        })
    }

    /// Judges the position for the side to move.
    fn verdict(&self, board: &Board) -> Verdict {
        let in_check = self.is_in_check(board, board.side_to_move());
        let has_moves = !self.legal_moves(board).is_empty();
        match (in_check, has_moves) {
            (true, true) => Verdict::Check,
            (true, false) => Verdict::Checkmate,
            (false, true) => Verdict::Ongoing,
            (false, false) => Verdict::Stalemate,
        }
    }
}
