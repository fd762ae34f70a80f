//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - mailbox board with castling rights, en passant and history
//! - [`movegen`] - pseudo-legal move generation and attack detection
//! - [`RuleSet`] - legality, check, checkmate and stalemate
//! - [`notation`] - resolving move requests and algebraic rendering
//! - [`GameEngine`] - turn-based game sessions between two players
//!
//! # Example
//!
//! ```
//! use chess_engine::{Board, GameEngine, GameState, PlayerId, RuleSet, StandardChess};
//! use chess_core::Color;
//!
//! // Querying the rules directly
//! let board = Board::startpos();
//! println!("Legal moves from the start: {}", StandardChess.legal_moves(&board).len());
//!
//! // Playing a game
//! let white = PlayerId::new("white").unwrap();
//! let black = PlayerId::new("black").unwrap();
//! let mut game = GameEngine::new("example");
//! game.add_player(white.clone(), Color::White).unwrap();
//! game.add_player(black.clone(), Color::Black).unwrap();
//! game.make_move(&white, "e2e4").unwrap();
//! game.make_move(&black, "e7e5").unwrap();
//! assert_eq!(game.state(), GameState::InProgress);
//! println!("Position after 1.e4 e5: {}", game.fen());
//! ```

mod board;
mod game;
pub mod movegen;
pub mod notation;
pub mod rules;

pub use board::{Board, CastlingRights};
pub use game::{GameEngine, GameError, GameState, PlayerId};
pub use movegen::{is_king_attacked, is_square_attacked, pseudo_legal_moves};
pub use rules::{RuleSet, StandardChess, Verdict};
