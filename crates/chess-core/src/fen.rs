//! FEN (Forsyth-Edwards Notation) field parsing and validation.

use crate::{CastleSide, Color, Piece, PieceKind, Rank, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("illegal position: {0}")]
    IllegalPosition(String),
}

/// The fields of a FEN string, parsed into typed values.
///
/// The engine is responsible for turning this record into a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    /// Placed pieces, in FEN reading order (rank 8 to 1, file a to h).
    pub pieces: Vec<Piece>,
    /// Side to move.
    pub active_color: Color,
    /// Castling rights that are still available.
    pub castling: Vec<(Color, CastleSide)>,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Halfmove clock (plies since the last capture or pawn move).
    pub halfmove_clock: u32,
    /// Fullmove number.
    pub fullmove_number: u32,
}

impl FenRecord {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    ///
    /// The two move counters may be omitted, in which case they default
    /// to `0 1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 && parts.len() != 4 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let pieces = Self::parse_piece_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        let (halfmove_clock, fullmove_number) = if parts.len() == 6 {
            let halfmove = parts[4]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
            let fullmove = parts[5]
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;
            (halfmove, fullmove)
        } else {
            (0, 1)
        };

        Ok(FenRecord {
            pieces,
            active_color,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<Vec<Piece>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::with_capacity(32);
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank_number = 8 - i as i32;
            let mut file_count = 0i32;
            for c in rank_text.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file_count += run as i32;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    file_count += 1;
                    let square = Square::from_coords(file_count, rank_number).map_err(|_| {
                        FenError::InvalidPiecePlacement(format!(
                            "rank {} overflows 8 files",
                            rank_number
                        ))
                    })?;
                    pieces.push(Piece::new(kind, color, square));
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, rank_number
                    )));
                }
            }
            if file_count != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank_number, file_count
                )));
            }
        }

        Ok(pieces)
    }

    fn parse_castling(castling: &str) -> Result<Vec<(Color, CastleSide)>, FenError> {
        if castling == "-" {
            return Ok(Vec::new());
        }

        let mut rights = Vec::with_capacity(4);
        for c in castling.chars() {
            let right = match c {
                'K' => (Color::White, CastleSide::Kingside),
                'Q' => (Color::White, CastleSide::Queenside),
                'k' => (Color::Black, CastleSide::Kingside),
                'q' => (Color::Black, CastleSide::Queenside),
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if rights.contains(&right) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate '{}'",
                    c
                )));
            }
            rights.push(right);
        }

        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            Some(sq) if sq.rank() == Rank::R3 || sq.rank() == Rank::R6 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}
