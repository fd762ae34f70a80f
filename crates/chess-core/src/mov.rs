//! Move representation.
//!
//! A [`Move`] describes a transition that has already been resolved
//! against a board: it carries a snapshot of the moving piece, the piece
//! it captures (if any), and flags for the special rules involved.

use crate::{Color, File, Piece, PieceKind, Square};
use std::fmt;

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Square the king lands on.
    pub const fn king_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => File::G,
            CastleSide::Queenside => File::C,
        };
        Square::new(file, color.back_rank())
    }

    /// The rook's start and landing squares.
    pub const fn rook_squares(self, color: Color) -> (Square, Square) {
        let rank = color.back_rank();
        match self {
            CastleSide::Kingside => (Square::new(File::H, rank), Square::new(File::F, rank)),
            CastleSide::Queenside => (Square::new(File::A, rank), Square::new(File::D, rank)),
        }
    }

    /// Files strictly between the king and the rook, which must be empty.
    pub fn between_files(self) -> &'static [File] {
        match self {
            CastleSide::Kingside => &[File::F, File::G],
            CastleSide::Queenside => &[File::B, File::C, File::D],
        }
    }

    /// Files the king passes through or lands on, which must not be attacked.
    pub fn king_path_files(self) -> &'static [File] {
        match self {
            CastleSide::Kingside => &[File::F, File::G],
            CastleSide::Queenside => &[File::D, File::C],
        }
    }

    /// Castling token (`O-O` or `O-O-O`).
    pub const fn token(self) -> &'static str {
        match self {
            CastleSide::Kingside => "O-O",
            CastleSide::Queenside => "O-O-O",
        }
    }
}

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Pawn double push from starting rank.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// The promotion flag for a kind, if that kind is a legal promotion.
    pub const fn promote_to(kind: PieceKind) -> Option<MoveFlag> {
        match kind {
            PieceKind::Knight => Some(MoveFlag::PromoteKnight),
            PieceKind::Bishop => Some(MoveFlag::PromoteBishop),
            PieceKind::Rook => Some(MoveFlag::PromoteRook),
            PieceKind::Queen => Some(MoveFlag::PromoteQueen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// The castling flag for a side.
    pub const fn castle(side: CastleSide) -> MoveFlag {
        match side {
            CastleSide::Kingside => MoveFlag::CastleKingside,
            CastleSide::Queenside => MoveFlag::CastleQueenside,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns the castling side if this is a castling move.
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveFlag::CastleKingside => Some(CastleSide::Kingside),
            MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A resolved chess move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Piece,
    to: Square,
    flag: MoveFlag,
    captured: Option<Piece>,
    check: bool,
    checkmate: bool,
}

impl Move {
    /// Creates a move of `piece` (standing on its recorded square) to `to`.
    #[inline]
    pub const fn new(piece: Piece, to: Square, flag: MoveFlag, captured: Option<Piece>) -> Self {
        Move {
            piece,
            to,
            flag,
            captured,
            check: false,
            checkmate: false,
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(&self) -> Square {
        self.piece.square
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Snapshot of the moving piece, as it stood before the move.
    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The side making the move.
    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(&self) -> MoveFlag {
        self.flag
    }

    /// The captured piece, with the square it was taken on.
    ///
    /// For en passant this square differs from [`to`](Move::to).
    #[inline]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.flag.promotion_piece()
    }

    #[inline]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        self.flag.castle_side()
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flag.is_castling()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.flag, MoveFlag::EnPassant)
    }

    /// True when the move leaves the opponent's king attacked.
    #[inline]
    pub const fn gives_check(&self) -> bool {
        self.check
    }

    /// True when the move ends the game by checkmate.
    #[inline]
    pub const fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Returns a copy with the check flag set as given.
    #[inline]
    pub const fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Returns a copy marked as checkmate (which implies check).
    #[inline]
    pub const fn with_checkmate(mut self, checkmate: bool) -> Self {
        self.checkmate = checkmate;
        if checkmate {
            self.check = true;
        }
        self
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(&self) -> String {
        let promo = match self.flag {
            MoveFlag::PromoteKnight => "n",
            MoveFlag::PromoteBishop => "b",
            MoveFlag::PromoteRook => "r",
            MoveFlag::PromoteQueen => "q",
            _ => "",
        };
        format!("{}{}{}", self.from(), self.to, promo)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
