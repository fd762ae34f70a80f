//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use crate::rules::{RuleSet, StandardChess};
use crate::Board;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = StandardChess.legal_moves(board);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut next = board.clone();
        next.apply(m);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let moves = StandardChess.legal_moves(board);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut next = board.clone();
        next.apply(m);
        let nodes = if depth > 1 { perft(&next, depth - 1) } else { 1 };
        results.push((m.to_coordinate(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Board::startpos(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Board::startpos(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Board::startpos(), 3), 8902);
    }

    // Slow without optimizations
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Board::startpos(), 4), 197281);
    }

    // Kiwipete - a position with lots of special moves
    #[test]
    fn perft_kiwipete_depth_1() {
        let board = Board::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&board, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let board = Board::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&board, 2), 2039);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        let board = Board::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&board, 3), 97862);
    }

    // Position 3: Check evasion, en passant, promotion
    #[test]
    fn perft_position3() {
        let board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&board, 1), 14);
        assert_eq!(perft(&board, 2), 191);
        assert_eq!(perft(&board, 3), 2812);
    }

    // Position 4: Lots of promotions and captures
    #[test]
    fn perft_position4() {
        let board =
            Board::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
                .unwrap();
        assert_eq!(perft(&board, 1), 6);
        assert_eq!(perft(&board, 2), 264);
        assert_eq!(perft(&board, 3), 9467);
    }

    // Position 5
    #[test]
    fn perft_position5() {
        let board =
            Board::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1").unwrap();
        assert_eq!(perft(&board, 1), 44);
        assert_eq!(perft(&board, 2), 1486);
    }

    #[test]
    fn perft_divide_works() {
        let results = perft_divide(&Board::startpos(), 2);
        assert_eq!(results.len(), 20);
        assert_eq!(results[0].0, "a2a3");
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
    }
}
