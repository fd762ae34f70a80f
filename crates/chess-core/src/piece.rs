//! Piece kinds, their movement rules, and placed pieces.

use crate::{Color, Square};

/// Orthogonal ray directions as (file delta, rank delta).
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Diagonal ray directions as (file delta, rank delta).
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// All eight ray directions; the queen slides along these and the king steps along them.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Knight jumps as (file delta, rank delta).
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// How a piece kind moves across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Pushes forward, captures diagonally; depends on color and occupancy.
    Pawn,
    /// Jumps to each offset once.
    Step(&'static [(i8, i8)]),
    /// Repeats each direction until blocked or off the board.
    Slide(&'static [(i8, i8)]),
}

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the index of this kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The movement rule for this kind.
    pub fn movement(self) -> Movement {
        match self {
            PieceKind::Pawn => Movement::Pawn,
            PieceKind::Knight => Movement::Step(&KNIGHT_OFFSETS),
            PieceKind::Bishop => Movement::Slide(&BISHOP_DIRECTIONS),
            PieceKind::Rook => Movement::Slide(&ROOK_DIRECTIONS),
            PieceKind::Queen => Movement::Slide(&QUEEN_DIRECTIONS),
            PieceKind::King => Movement::Step(&QUEEN_DIRECTIONS),
        }
    }

    /// Upper-case letter used in algebraic notation (`P` for pawns).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Returns the FEN character for this kind with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = self.letter();
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a FEN character into a kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Parses a lower-case promotion suffix (`q`, `r`, `b`, `n`).
    pub const fn from_promotion_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// Returns true for bishops, rooks and queens.
    #[inline]
    pub fn is_slider(self) -> bool {
        matches!(self.movement(), Movement::Slide(_))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece standing on a square.
///
/// The square is the piece's own record of where it stands; the board
/// keeps it in sync whenever the piece is placed or moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
        }
    }

    /// The FEN character for this piece.
    #[inline]
    pub const fn fen_char(self) -> char {
        self.kind.to_fen_char(self.color)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.square)
    }
}
