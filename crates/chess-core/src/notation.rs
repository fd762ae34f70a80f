//! Move input grammar.
//!
//! Players submit moves as coordinate pairs (`e2e4`, `e7e8q`) or as
//! castling tokens (`O-O`, `O-O-O`). Parsing only checks the shape of the
//! text; whether the move is playable is decided against a board later.

use crate::{CastleSide, PieceKind, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing move text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move text")]
    Empty,

    #[error("expected <from><to>[q|r|b|n] or a castling token, got '{0}'")]
    InvalidFormat(String),

    #[error("invalid square in '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),
}

/// A parsed, not yet validated, move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveRequest {
    /// Move whatever stands on `from` to `to`.
    Coordinate {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    /// Castle to the given wing.
    Castle(CastleSide),
}

impl MoveRequest {
    /// Parses coordinate notation or a castling token.
    ///
    /// Trailing check markers (`+`, `#`) are ignored, and castling accepts
    /// both the letter `O` and the digit `0`.
    pub fn parse(text: &str) -> Result<Self, NotationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NotationError::Empty);
        }
        let text = text.trim_end_matches(['+', '#']);

        match text {
            "O-O" | "0-0" => return Ok(MoveRequest::Castle(CastleSide::Kingside)),
            "O-O-O" | "0-0-0" => return Ok(MoveRequest::Castle(CastleSide::Queenside)),
            _ => {}
        }

        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(NotationError::InvalidFormat(text.to_string()));
        }

        let from = Square::from_algebraic(&text[0..2])
            .ok_or_else(|| NotationError::InvalidSquare(text.to_string()))?;
        let to = Square::from_algebraic(&text[2..4])
            .ok_or_else(|| NotationError::InvalidSquare(text.to_string()))?;
        let promotion = match text[4..].chars().next() {
            Some(c) => Some(
                PieceKind::from_promotion_char(c).ok_or(NotationError::InvalidPromotion(c))?,
            ),
            None => None,
        };

        Ok(MoveRequest::Coordinate {
            from,
            to,
            promotion,
        })
    }
}

impl FromStr for MoveRequest {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveRequest::parse(s)
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRequest::Coordinate {
                from,
                to,
                promotion,
            } => {
                write!(f, "{}{}", from, to)?;
                if let Some(kind) = promotion {
                    write!(f, "{}", kind.letter().to_ascii_lowercase())?;
                }
                Ok(())
            }
            MoveRequest::Castle(side) => write!(f, "{}", side.token()),
        }
    }
}
