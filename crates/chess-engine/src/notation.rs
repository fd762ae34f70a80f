//! Resolving move requests and rendering algebraic notation.
//!
//! Input is always coordinate notation or a castling token (see
//! [`MoveRequest`]); algebraic notation such as `Nbd2` or `exd6` is only
//! produced, for logs and display.

use chess_core::{Move, MoveRequest, PieceKind};

/// Finds the legal move a request refers to.
///
/// A coordinate request onto the last rank without a promotion suffix
/// promotes to a queen. A suffix on a move that does not promote matches
/// nothing.
pub fn resolve(legal: &[Move], request: &MoveRequest) -> Option<Move> {
    match *request {
        MoveRequest::Castle(side) => legal
            .iter()
            .find(|m| m.castle_side() == Some(side))
            .copied(),
        MoveRequest::Coordinate {
            from,
            to,
            promotion,
        } => legal
            .iter()
            .filter(|m| m.from() == from && m.to() == to)
            .find(|m| match m.promotion() {
                Some(kind) => kind == promotion.unwrap_or(PieceKind::Queen),
                None => promotion.is_none(),
            })
            .copied(),
    }
}

/// Renders a resolved move in standard algebraic notation.
///
/// `legal` must be the legal moves of the position the move was played
/// from; it is used to decide how much of the origin square to show when
/// two pieces of the same kind can reach the destination. Check and mate
/// suffixes come from the move's own flags.
pub fn move_to_algebraic(mv: &Move, legal: &[Move]) -> String {
    let mut san = String::with_capacity(8);

    if let Some(side) = mv.castle_side() {
        san.push_str(side.token());
    } else {
        let piece = mv.piece();
        let from = mv.from();

        if piece.kind == PieceKind::Pawn {
            if mv.is_capture() {
                san.push(from.file().to_char());
            }
        } else {
            san.push(piece.kind.letter());
            san.push_str(&disambiguation(mv, legal));
        }

        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&mv.to().to_algebraic());

        if let Some(kind) = mv.promotion() {
            san.push('=');
            san.push(kind.letter());
        }
    }

    if mv.is_checkmate() {
        san.push('#');
    } else if mv.gives_check() {
        san.push('+');
    }
    san
}

fn disambiguation(mv: &Move, legal: &[Move]) -> String {
    let from = mv.from();
    let rivals: Vec<&Move> = legal
        .iter()
        .filter(|o| o.to() == mv.to() && o.piece().kind == mv.piece().kind && o.from() != from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|o| o.from().file() != from.file()) {
        return from.file().to_char().to_string();
    }
    if rivals.iter().all(|o| o.from().rank() != from.rank()) {
        return from.rank().to_char().to_string();
    }
    from.to_algebraic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleSet, StandardChess};
    use crate::Board;
    use chess_core::{CastleSide, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn san_of(fen: &str, text: &str) -> String {
        let board = Board::from_fen(fen).unwrap();
        let legal = StandardChess.legal_moves(&board);
        let request = MoveRequest::parse(text).unwrap();
        let mv = resolve(&legal, &request).unwrap();
        move_to_algebraic(&mv, &legal)
    }

    #[test]
    fn resolve_coordinate_move() {
        let board = Board::startpos();
        let legal = StandardChess.legal_moves(&board);
        let mv = resolve(&legal, &MoveRequest::parse("g1f3").unwrap()).unwrap();
        assert_eq!(mv.piece().kind, PieceKind::Knight);
        assert_eq!(mv.to(), sq("f3"));

        assert!(resolve(&legal, &MoveRequest::parse("e2e5").unwrap()).is_none());
        assert!(resolve(&legal, &MoveRequest::parse("e3e4").unwrap()).is_none());
    }

    #[test]
    fn resolve_promotion_defaults_to_queen() {
        let board = Board::from_fen("7k/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let legal = StandardChess.legal_moves(&board);

        let queen = resolve(&legal, &MoveRequest::parse("a7a8").unwrap()).unwrap();
        assert_eq!(queen.promotion(), Some(PieceKind::Queen));

        let knight = resolve(&legal, &MoveRequest::parse("a7a8n").unwrap()).unwrap();
        assert_eq!(knight.promotion(), Some(PieceKind::Knight));
    }

    #[test]
    fn resolve_rejects_suffix_on_plain_move() {
        let board = Board::startpos();
        let legal = StandardChess.legal_moves(&board);
        assert!(resolve(&legal, &MoveRequest::parse("e2e4q").unwrap()).is_none());
    }

    #[test]
    fn resolve_castling_token() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let legal = StandardChess.legal_moves(&board);
        let mv = resolve(&legal, &MoveRequest::Castle(CastleSide::Queenside)).unwrap();
        assert_eq!(mv.to(), Square::C1);

        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        let legal = StandardChess.legal_moves(&board);
        assert!(resolve(&legal, &MoveRequest::Castle(CastleSide::Kingside)).is_none());
    }

    #[test]
    fn algebraic_basic_moves() {
        let start = Board::startpos().to_fen();
        assert_eq!(san_of(&start, "e2e4"), "e4");
        assert_eq!(san_of(&start, "g1f3"), "Nf3");
    }

    #[test]
    fn algebraic_captures() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
        assert_eq!(san_of(fen, "e4d5"), "exd5");
        assert_eq!(san_of(fen, "f1b5"), "Bb5+");

        let fen = "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3";
        assert_eq!(san_of(fen, "f5e6"), "fxe6");
    }

    #[test]
    fn algebraic_castling() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(san_of(fen, "O-O"), "O-O");
        assert_eq!(san_of(fen, "O-O-O"), "O-O-O");
    }

    #[test]
    fn algebraic_promotion() {
        assert_eq!(san_of("7k/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8"), "a8=Q+");
        assert_eq!(san_of("7k/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8n"), "a8=N");
    }

    #[test]
    fn algebraic_disambiguation() {
        // knights on b1 and f1 can both reach d2
        let fen = "4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1";
        assert_eq!(san_of(fen, "b1d2"), "Nbd2");

        // rooks on a1 and a5 share a file
        let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
        assert_eq!(san_of(fen, "a1a3"), "R1a3");

        // with three queens on d4's lines the full square is needed
        let fen = "6k1/8/8/8/Q6Q/8/8/Q3K3 w - - 0 1";
        assert_eq!(san_of(fen, "a4d4"), "Qa4d4");
        assert_eq!(san_of(fen, "h4e4"), "Qhe4");
    }

    #[test]
    fn algebraic_mate_suffix() {
        let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
        let board = Board::from_fen(fen).unwrap();
        let legal = StandardChess.legal_moves(&board);
        let mv = resolve(&legal, &MoveRequest::parse("a1a8").unwrap())
            .unwrap()
            .with_checkmate(true);
        assert_eq!(move_to_algebraic(&mv, &legal), "Ra8#");
    }
}
