//! Pseudo-legal move generation.
//!
//! Moves produced here obey each piece's movement rule but may still leave
//! the mover's own king attacked; [`crate::rules`] filters them down to
//! legal moves. Castling candidates are the exception: their king-safety
//! preconditions are checked here, since they depend on the king's path.

mod attacks;
pub mod perft;

use crate::Board;
use chess_core::{CastleSide, Color, File, Move, MoveFlag, Movement, Piece, PieceKind, Square};

pub use attacks::{attacks_square, checkers, is_king_attacked, is_square_attacked};

/// Generates pseudo-legal moves for every piece of `color`, castling included.
///
/// Order is deterministic: pieces from a1 to h8, then castling.
pub fn pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for piece in board.pieces_of(color) {
        piece_moves(board, piece, &mut moves);
    }
    castling_moves(board, color, &mut moves);
    moves
}

/// Generates the non-castling pseudo-legal moves of a single piece.
pub fn piece_moves(board: &Board, piece: Piece, moves: &mut Vec<Move>) {
    match piece.kind.movement() {
        Movement::Pawn => pawn_moves(board, piece, moves),
        Movement::Step(offsets) => step_moves(board, piece, offsets, moves),
        Movement::Slide(directions) => slide_moves(board, piece, directions, moves),
    }
}

fn step_moves(board: &Board, piece: Piece, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(df, dr) in offsets {
        let Some(to) = piece.square.offset(df, dr) else {
            continue;
        };
        match board.piece_at(to) {
            None => moves.push(Move::new(piece, to, MoveFlag::Normal, None)),
            Some(target) if target.color != piece.color => {
                moves.push(Move::new(piece, to, MoveFlag::Normal, Some(target)))
            }
            Some(_) => {}
        }
    }
}

fn slide_moves(board: &Board, piece: Piece, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(df, dr) in directions {
        let mut current = piece.square;
        while let Some(to) = current.offset(df, dr) {
            match board.piece_at(to) {
                None => moves.push(Move::new(piece, to, MoveFlag::Normal, None)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::new(piece, to, MoveFlag::Normal, Some(target)));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn pawn_moves(board: &Board, piece: Piece, moves: &mut Vec<Move>) {
    let us = piece.color;
    let dir = us.pawn_direction();
    let from = piece.square;

    // Pushes
    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            push_pawn_move(piece, one, None, moves);
            if from.rank() == us.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.is_empty(two) {
                        moves.push(Move::new(piece, two, MoveFlag::DoublePush, None));
                    }
                }
            }
        }
    }

    // Captures, en passant included
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != us => push_pawn_move(piece, to, Some(target), moves),
            Some(_) => {}
            None if board.en_passant() == Some(to) => {
                let victim = board
                    .piece_at(Square::new(to.file(), from.rank()))
                    .filter(|p| p.kind == PieceKind::Pawn && p.color != us);
                if victim.is_some() {
                    moves.push(Move::new(piece, to, MoveFlag::EnPassant, victim));
                }
            }
            None => {}
        }
    }
}

/// Pushes a pawn move, expanding it into one move per promotion kind when
/// it reaches the last rank.
fn push_pawn_move(piece: Piece, to: Square, captured: Option<Piece>, moves: &mut Vec<Move>) {
    if to.rank() == piece.color.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            if let Some(flag) = MoveFlag::promote_to(kind) {
                moves.push(Move::new(piece, to, flag, captured));
            }
        }
    } else {
        moves.push(Move::new(piece, to, MoveFlag::Normal, captured));
    }
}

/// Generates castling moves whose preconditions all hold.
///
/// The right must still be held, the king and rook must stand on their
/// home squares, every square between them must be empty, and neither the
/// king's square nor any square it crosses or lands on may be attacked.
pub fn castling_moves(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let rank = color.back_rank();
    let king_home = Square::new(File::E, rank);
    let Some(king) = board
        .piece_at(king_home)
        .filter(|p| p.kind == PieceKind::King && p.color == color)
    else {
        return;
    };
    let them = color.opposite();

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !board.castling().has(color, side) {
            continue;
        }
        let rook_home = side.rook_squares(color).0;
        let rook_ready = board
            .piece_at(rook_home)
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color);
        if !rook_ready {
            continue;
        }
        let path_clear = side
            .between_files()
            .iter()
            .all(|&file| board.is_empty(Square::new(file, rank)));
        if !path_clear || is_square_attacked(board, king_home, them) {
            continue;
        }
        let path_safe = side
            .king_path_files()
            .iter()
            .all(|&file| !is_square_attacked(board, Square::new(file, rank), them));
        if path_safe {
            moves.push(Move::new(
                king,
                side.king_target(color),
                MoveFlag::castle(side),
                None,
            ));
        }
    }
}
