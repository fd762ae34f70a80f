//! Rules of play, driven through the public game API.

use chess_core::{Color, FenError, PieceKind, Square};
use chess_engine::{GameEngine, GameError, GameState, PlayerId};

struct Table {
    game: GameEngine,
    white: PlayerId,
    black: PlayerId,
}

impl Table {
    fn new() -> Self {
        Self::seat(GameEngine::new("integration"))
    }

    fn from_fen(fen: &str) -> Self {
        Self::seat(GameEngine::from_fen("integration", fen).expect("valid FEN"))
    }

    fn seat(mut game: GameEngine) -> Self {
        let white = PlayerId::new("white").expect("valid id");
        let black = PlayerId::new("black").expect("valid id");
        game.add_player(white.clone(), Color::White)
            .expect("white seat is free");
        game.add_player(black.clone(), Color::Black)
            .expect("black seat is free");
        Table { game, white, black }
    }

    fn to_move(&self) -> &PlayerId {
        match self.game.side_to_move() {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn play(&mut self, text: &str) -> Result<chess_core::Move, GameError> {
        let player = self.to_move().clone();
        self.game.make_move(&player, text)
    }

    fn play_all(&mut self, moves: &[&str]) {
        for text in moves {
            self.play(text)
                .unwrap_or_else(|e| panic!("move {} failed: {}", text, e));
        }
    }
}

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).expect("valid square")
}

#[test]
fn test_twenty_moves_for_each_side() {
    let table = Table::new();
    let opening = table.game.legal_moves(&table.white);
    assert_eq!(opening.len(), 20);

    let pawn_moves = opening
        .iter()
        .filter(|m| m.piece().kind == PieceKind::Pawn)
        .count();
    assert_eq!(pawn_moves, 16);

    for first in &opening {
        let mut table = Table::new();
        table.play(&first.to_coordinate()).expect("opening move is legal");
        assert_eq!(
            table.game.legal_moves(&table.black).len(),
            20,
            "after {}",
            first
        );
    }
}

#[test]
fn test_snapshot_restores_fen() {
    let mut table = Table::new();
    table.play_all(&["e2e4", "d7d5", "e4e5", "f7f5"]);

    let before = table.game.fen();
    for mv in table.game.legal_moves(&table.white) {
        let snapshot = table.game.clone();
        table.play(&mv.to_coordinate()).expect("listed move is playable");
        assert_ne!(table.game.fen(), before);
        table.game = snapshot;
        assert_eq!(table.game.fen(), before);
    }
}

#[test]
fn test_pinned_piece_stays_on_its_line() {
    // the c3 knight shields the e1 king from the b4 bishop
    let table = Table::from_fen("rnbqk1nr/pppp1ppp/8/4p3/1b6/2NP4/PPP1PPPP/R1BQKBNR w KQkq - 1 3");
    assert!(table
        .game
        .legal_moves_from(&table.white, sq("c3"))
        .is_empty());
    assert_eq!(table.game.legal_moves_from(&table.white, sq("g1")).len(), 2);
}

#[test]
fn test_kingside_castling() {
    let mut table = Table::new();
    table.play_all(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"]);

    let castle = table.play("O-O").expect("castling is legal");
    assert!(castle.is_castling());

    let board = table.game.board();
    assert_eq!(board.piece_at(Square::G1).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(board.piece_at(Square::F1).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(board.is_empty(Square::E1));
    assert!(board.is_empty(Square::H1));
    assert!(table.game.fen().contains(" b kq "));
}

#[test]
fn test_castling_refused_in_check() {
    let mut table = Table::from_fen("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(table.game.is_in_check(&table.white));
    assert_eq!(
        table.play("O-O"),
        Err(GameError::IllegalMove("O-O".to_string()))
    );
}

#[test]
fn test_castling_refused_through_attacked_squares() {
    // bishop on g2 covers f1
    let mut table = Table::from_fen("4k3/8/8/8/8/8/6b1/4K2R w K - 0 1");
    assert!(matches!(table.play("O-O"), Err(GameError::IllegalMove(_))));

    // knight on h3 covers g1
    let mut table = Table::from_fen("4k3/8/8/8/8/7n/8/4K2R w K - 0 1");
    assert!(matches!(table.play("e1g1"), Err(GameError::IllegalMove(_))));
}

#[test]
fn test_en_passant_window() {
    let mut table = Table::new();
    table.play_all(&["e2e4", "a7a6", "e4e5", "d7d5"]);

    let capture = table.play("e5d6").expect("en passant is legal");
    assert!(capture.is_en_passant());
    assert_eq!(capture.captured().map(|p| p.square), Some(sq("d5")));
    assert!(table.game.board().is_empty(sq("d5")));
    assert_eq!(table.game.san_moves().last().map(String::as_str), Some("exd6"));

    let mut late = Table::new();
    late.play_all(&["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "a6a5"]);
    assert_eq!(
        late.play("e5d6"),
        Err(GameError::IllegalMove("e5d6".to_string()))
    );
}

#[test]
fn test_scholars_mate() {
    let mut table = Table::new();
    table.play_all(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"]);

    let mate = table.play("h5f7").expect("mating move is legal");
    assert!(mate.is_checkmate());
    assert_eq!(table.game.state(), GameState::Checkmate);
    assert_eq!(table.game.winner(), Some(&table.white));
    assert_eq!(table.game.san_moves().last().map(String::as_str), Some("Qxf7#"));
    assert!(table.game.legal_moves(&table.black).is_empty());
}

#[test]
fn test_resignation_ignores_the_board() {
    let mut table = Table::new();
    table.play_all(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5"]);
    let black = table.black.clone();
    table.game.resign(&black).expect("resigning is allowed");
    assert_eq!(table.game.state(), GameState::Resignation);
    assert_eq!(table.game.winner(), Some(&table.white));
}

#[test]
fn test_draw_by_agreement() {
    let mut table = Table::new();
    let white = table.white.clone();
    let black = table.black.clone();

    assert_eq!(table.game.accept_draw(&black), Err(GameError::NoDrawOffer));
    assert_eq!(table.game.state(), GameState::InProgress);

    table.game.offer_draw(&white).expect("offer is allowed");
    table.game.accept_draw(&black).expect("offer is pending");
    assert_eq!(table.game.state(), GameState::Draw);
    assert_eq!(table.game.winner(), None);
    assert!(matches!(
        table.play("e2e4"),
        Err(GameError::GameNotInProgress(GameState::Draw))
    ));
}

#[test]
fn test_game_log() {
    let mut table = Table::new();
    table.play_all(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
    let log = table.game.log();
    assert_eq!(log[0], "white joins as White");
    assert!(log.contains(&"4. Qxf7#".to_string()));
    assert_eq!(
        log.last().map(String::as_str),
        Some("Game over: checkmate, white wins")
    );
}

#[test]
fn test_fen_games_must_be_playable() {
    for fen in [
        "8/8/8/8/8/8/8/q7 w - - 0 1",
        "4k3/8/8/8/8/8/4R3/4K3 w - - 0 1",
    ] {
        assert!(matches!(
            GameEngine::from_fen("integration", fen),
            Err(FenError::IllegalPosition(_))
        ));
    }
}

#[test]
fn test_huge_move_counters() {
    let mut table = Table::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 4294967295 1");
    assert_eq!(table.game.state(), GameState::InProgress);
    table.play("h1h2").expect("rook move is legal");
    assert!(table.game.fen().ends_with(" 4294967295 1"));
}
