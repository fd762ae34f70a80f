//! The 8x8 board: piece placement plus the state that rules depend on.

use std::fmt;
use std::sync::Arc;

use chess_core::{
    CastleSide, Color, FenError, FenRecord, File, Move, MoveFlag, Piece, PieceKind, Rank, Square,
};

use crate::movegen::is_king_attacked;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` may still castle towards `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Revokes one right. Rights are never granted back.
    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Revokes both rights of a color.
    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::Kingside);
        self.revoke(color, CastleSide::Queenside);
    }

    /// Revokes any right tied to a rook starting on `sq`.
    fn revoke_corner(&mut self, sq: Square) {
        for color in Color::BOTH {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if side.rook_squares(color).0 == sq {
                    self.revoke(color, side);
                }
            }
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// FEN castling field (`KQkq`, or `-` when none remain).
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        let mut out = String::with_capacity(4);
        for (color, side, c) in [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ] {
            if self.has(color, side) {
                out.push(c);
            }
        }
        out
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chess board.
///
/// Each square holds at most one piece, and every stored piece records the
/// square it stands on. Cloning is cheap: the placement is a flat array and
/// the move history is shared until one of the copies records a new move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Arc<Vec<Move>>,
}

impl Board {
    /// Creates a board with no pieces, White to move and no castling rights.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Arc::new(Vec::new()),
        }
    }

    /// Creates the standard 32-piece starting position.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            for color in Color::BOTH {
                board.place(Square::new(file, color.back_rank()), kind, color);
                board.place(Square::new(file, color.pawn_rank()), PieceKind::Pawn, color);
            }
        }
        board.castling = CastlingRights::ALL;
        board
    }

    /// Creates a board from a FEN string.
    ///
    /// Castling rights whose king or rook is not on its starting square are
    /// dropped, as is an en passant target with no capturable pawn behind it.
    /// Each side must have exactly one king, and the side that just moved
    /// must not be left in check.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let record = FenRecord::parse(fen)?;
        let mut board = Board::empty();

        for piece in &record.pieces {
            board.place(piece.square, piece.kind, piece.color);
        }
        board.side_to_move = record.active_color;

        for color in Color::BOTH {
            let kings = board
                .pieces_of(color)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenError::IllegalPosition(format!(
                    "{} has {} kings",
                    color, kings
                )));
            }
        }
        if is_king_attacked(&board, record.active_color.opposite()) {
            return Err(FenError::IllegalPosition(format!(
                "{} is in check but not to move",
                record.active_color.opposite()
            )));
        }

        for (color, side) in record.castling {
            let king_home = Square::new(File::E, color.back_rank());
            let rook_home = side.rook_squares(color).0;
            if board.holds(king_home, PieceKind::King, color)
                && board.holds(rook_home, PieceKind::Rook, color)
            {
                board.castling.0 |= CastlingRights::flag(color, side);
            }
        }

        board.en_passant = record.en_passant.filter(|target| {
            let mover = record.active_color.opposite();
            target
                .offset(0, mover.pawn_direction())
                .is_some_and(|sq| board.holds(sq, PieceKind::Pawn, mover))
        });
        board.halfmove_clock = record.halfmove_clock;
        board.fullmove_number = record.fullmove_number;

        Ok(board)
    }

    /// Puts a piece on `sq`, returning whatever stood there before.
    ///
    /// This is a raw structural edit; no chess rule is checked.
    pub fn place(&mut self, sq: Square, kind: PieceKind, color: Color) -> Option<Piece> {
        self.squares[sq.index() as usize].replace(Piece::new(kind, color, sq))
    }

    /// Clears `sq`, returning the piece that stood there.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    /// Moves the piece on `from` to `to`, returning any piece it displaced.
    ///
    /// Does nothing when `from` is empty. No chess rule is checked.
    pub fn move_piece_raw(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.remove(from)?;
        piece.square = to;
        self.squares[to.index() as usize].replace(piece)
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index() as usize].is_none()
    }

    /// All pieces on the board, from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().copied()
    }

    /// The pieces of one color, from a1 to h8.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// The square of `color`'s king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    fn holds(&self, sq: Square, kind: PieceKind, color: Color) -> bool {
        self.piece_at(sq)
            .is_some_and(|p| p.kind == kind && p.color == color)
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// En passant target square, set only right after a double pawn push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Fullmove number (starts at 1, increments after Black's move).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves played on this board, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The most recent move, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Plays a resolved move and appends it to the history.
    ///
    /// The move must have been produced for this board by the move
    /// generator; legality is not re-checked here.
    pub fn make_move(&mut self, mv: Move) {
        self.apply(&mv);
        Arc::make_mut(&mut self.history).push(mv);
    }

    /// Plays a move without recording it.
    ///
    /// Used on scratch copies when testing candidate moves, so the shared
    /// history is never copied.
    pub(crate) fn apply(&mut self, mv: &Move) {
        let us = mv.color();
        let from = mv.from();
        let to = mv.to();

        if let Some(captured) = mv.captured() {
            self.remove(captured.square);
        }
        self.move_piece_raw(from, to);
        if let Some(kind) = mv.promotion() {
            self.place(to, kind, us);
        }
        if let Some(side) = mv.castle_side() {
            let (rook_from, rook_to) = side.rook_squares(us);
            self.move_piece_raw(rook_from, rook_to);
        }

        if mv.piece().kind == PieceKind::King {
            self.castling.revoke_all(us);
        }
        self.castling.revoke_corner(from);
        self.castling.revoke_corner(to);

        self.en_passant = match mv.flag() {
            MoveFlag::DoublePush => from.offset(0, us.pawn_direction()),
            _ => None,
        };

        if mv.piece().kind == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = us.opposite();
    }

    /// Converts the board to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in Rank::ALL.into_iter().rev() {
            let mut empty_count = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::R1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.side_to_move.fen_char());
        fen.push(' ');
        fen.push_str(&self.castling.to_fen());
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }
        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{} ", rank)?;
            for file in File::ALL {
                let c = self
                    .piece_at(Square::new(file, rank))
                    .map_or('.', |p| p.fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in File::ALL {
            write!(f, " {}", file)?;
        }
        writeln!(f)
    }
}
