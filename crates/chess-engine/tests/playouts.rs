//! Random playouts checked against the rules' own invariants.

use chess_core::{Color, MoveFlag, PieceKind};
use chess_engine::{is_king_attacked, Board, RuleSet, StandardChess};
use proptest::prelude::*;
use proptest::sample::Index;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn legal_moves_never_expose_the_king(choices in prop::collection::vec(any::<Index>(), 0..60)) {
        let mut board = Board::startpos();

        for choice in choices {
            let legal = StandardChess.legal_moves(&board);
            let verdict = StandardChess.verdict(&board);
            if legal.is_empty() {
                prop_assert!(verdict.is_terminal());
                break;
            }
            prop_assert!(!verdict.is_terminal());

            let mover = board.side_to_move();
            let before = board.to_fen();
            for mv in &legal {
                let mut next = board.clone();
                next.make_move(*mv);
                prop_assert!(!is_king_attacked(&next, mover), "{} exposes the king", mv);
                prop_assert_eq!(mv.gives_check(), is_king_attacked(&next, mover.opposite()));
                prop_assert_eq!(next.side_to_move(), mover.opposite());
            }
            prop_assert_eq!(board.to_fen(), before);

            let mv = *choice.get(&legal);
            board.make_move(mv);
        }
    }

    #[test]
    fn rights_and_en_passant_follow_the_last_move(choices in prop::collection::vec(any::<Index>(), 0..60)) {
        let mut board = Board::startpos();
        let mut rights = board.castling().raw();

        for choice in choices {
            let legal = StandardChess.legal_moves(&board);
            if legal.is_empty() {
                break;
            }
            board.make_move(*choice.get(&legal));

            // castling rights only ever shrink
            let now = board.castling().raw();
            prop_assert_eq!(now & !rights, 0);
            rights = now;

            let double_push = board
                .last_move()
                .is_some_and(|m| m.flag() == MoveFlag::DoublePush);
            prop_assert_eq!(board.en_passant().is_some(), double_push);
        }

        for color in Color::BOTH {
            let kings = board
                .pieces_of(color)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            prop_assert_eq!(kings, 1);
        }
    }
}
