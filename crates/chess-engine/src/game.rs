//! Turn-based game sessions.
//!
//! A [`GameEngine`] owns the board for one game and is its only writer. It
//! binds players to colors, resolves their move text against the legal
//! moves, applies the result and moves the session through its
//! [`GameState`]s. Every gameplay failure is reported as a [`GameError`]
//! and leaves the session untouched.

use crate::notation::{move_to_algebraic, resolve};
use crate::rules::{RuleSet, StandardChess, Verdict};
use crate::Board;
use chess_core::{Color, FenError, Move, MoveRequest, NotationError, Square};
use std::fmt;
use thiserror::Error;

/// Identifier of a player taking part in a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates an identifier, rejecting empty or blank names.
    pub fn new(id: impl Into<String>) -> Result<Self, GameError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(GameError::InvalidPlayerId);
        }
        Ok(PlayerId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a game session.
///
/// A session only ever moves forward: from `WaitingForPlayers` to
/// `InProgress`, and from there to one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    WaitingForPlayers,
    InProgress,
    Checkmate,
    Stalemate,
    Draw,
    Resignation,
    Timeout,
    Abandoned,
}

impl GameState {
    /// Returns true once the game has ended.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameState::WaitingForPlayers | GameState::InProgress)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameState::WaitingForPlayers => "waiting for players",
            GameState::InProgress => "in progress",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
            GameState::Draw => "draw",
            GameState::Resignation => "resignation",
            GameState::Timeout => "timeout",
            GameState::Abandoned => "abandoned",
        };
        f.write_str(s)
    }
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("it is not your turn")]
    NotYourTurn,

    #[error("game is not in progress ({0})")]
    GameNotInProgress(GameState),

    #[error("game has already started")]
    GameAlreadyStarted,

    #[error("unparseable move: {0}")]
    UnparseableNotation(#[from] NotationError),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("{0} is already taken")]
    DuplicateColorBinding(Color),

    #[error("player {0} is already seated")]
    DuplicatePlayer(PlayerId),

    #[error("player {0} is not part of this game")]
    UnknownPlayer(PlayerId),

    #[error("no draw offer to respond to")]
    NoDrawOffer,

    #[error("player id must not be empty")]
    InvalidPlayerId,
}

/// A single game between two players.
///
/// # Example
///
/// ```
/// use chess_engine::{GameEngine, GameState, PlayerId};
/// use chess_core::Color;
///
/// let alice = PlayerId::new("alice").unwrap();
/// let bob = PlayerId::new("bob").unwrap();
///
/// let mut game = GameEngine::new("demo");
/// game.add_player(alice.clone(), Color::White).unwrap();
/// game.add_player(bob.clone(), Color::Black).unwrap();
/// assert_eq!(game.state(), GameState::InProgress);
///
/// game.make_move(&alice, "e2e4").unwrap();
/// assert!(game.make_move(&alice, "d2d4").is_err());
/// game.make_move(&bob, "e7e5").unwrap();
/// assert_eq!(game.san_moves(), ["e4", "e5"]);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine<R: RuleSet = StandardChess> {
    id: String,
    rules: R,
    board: Board,
    players: [Option<PlayerId>; 2],
    state: GameState,
    winner: Option<Color>,
    san: Vec<String>,
    log: Vec<String>,
    draw_offer: Option<Color>,
}

impl GameEngine<StandardChess> {
    /// Creates a standard game waiting for its players.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_rules(id, StandardChess)
    }

    /// Creates a standard game that starts from the given position.
    pub fn from_fen(id: impl Into<String>, fen: &str) -> Result<Self, FenError> {
        let board = Board::from_fen(fen)?;
        Ok(Self::from_board(id, StandardChess, board))
    }
}

impl<R: RuleSet> GameEngine<R> {
    /// Creates a game under the given rules, from their initial board.
    pub fn with_rules(id: impl Into<String>, rules: R) -> Self {
        let board = rules.initial_board();
        Self::from_board(id, rules, board)
    }

    fn from_board(id: impl Into<String>, rules: R, board: Board) -> Self {
        GameEngine {
            id: id.into(),
            rules,
            board,
            players: [None, None],
            state: GameState::WaitingForPlayers,
            winner: None,
            san: Vec::new(),
            log: Vec::new(),
            draw_offer: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read-only view of the current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// FEN of the current position.
    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// The player seated on `color`, if any.
    pub fn player(&self, color: Color) -> Option<&PlayerId> {
        self.players[color.index()].as_ref()
    }

    /// The color `player` is seated on, if they are part of this game.
    pub fn color_of(&self, player: &PlayerId) -> Option<Color> {
        Color::BOTH
            .into_iter()
            .find(|c| self.players[c.index()].as_ref() == Some(player))
    }

    /// The winning player, once the game has been decided.
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.and_then(|c| self.player(c))
    }

    pub fn winner_color(&self) -> Option<Color> {
        self.winner
    }

    /// The side with a pending draw offer, if any.
    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    /// Human-readable events, in order.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Moves played so far, with their check and checkmate flags.
    pub fn moves(&self) -> &[Move] {
        self.board.history()
    }

    /// Moves played so far, in algebraic notation.
    pub fn san_moves(&self) -> &[String] {
        &self.san
    }

    /// Judges the current position for the side to move.
    pub fn verdict(&self) -> Verdict {
        self.rules.verdict(&self.board)
    }

    /// Seats a player on a color. The game starts once both are seated.
    pub fn add_player(&mut self, player: PlayerId, color: Color) -> Result<(), GameError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.players[color.index()].is_some() {
            return Err(GameError::DuplicateColorBinding(color));
        }
        if self.color_of(&player).is_some() {
            return Err(GameError::DuplicatePlayer(player));
        }

        tracing::info!("Game {}: {} joined as {}", self.id, player, color);
        self.log.push(format!("{} joins as {}", player, color));
        self.players[color.index()] = Some(player);

        if self.players.iter().all(Option::is_some) {
            self.start();
        }
        Ok(())
    }

    fn start(&mut self) {
        self.state = GameState::InProgress;
        tracing::info!("Game {} started", self.id);
        self.log.push("Game started".to_string());

        // A position handed in through FEN may already be decided.
        let mated = self.board.side_to_move();
        match self.rules.verdict(&self.board) {
            Verdict::Checkmate => self.finish(GameState::Checkmate, Some(mated.opposite())),
            Verdict::Stalemate => self.finish(GameState::Stalemate, None),
            Verdict::Ongoing | Verdict::Check => {}
        }
    }

    fn finish(&mut self, state: GameState, winner: Option<Color>) {
        self.state = state;
        self.winner = winner;
        self.draw_offer = None;

        let entry = match self.winner() {
            Some(player) => format!("Game over: {}, {} wins", state, player),
            None => format!("Game over: {}", state),
        };
        tracing::info!("Game {} finished: {}", self.id, entry);
        self.log.push(entry);
    }

    fn require_in_progress(&self) -> Result<(), GameError> {
        match self.state {
            GameState::InProgress => Ok(()),
            state => Err(GameError::GameNotInProgress(state)),
        }
    }

    fn seat_of(&self, player: &PlayerId) -> Result<Color, GameError> {
        self.color_of(player)
            .ok_or_else(|| GameError::UnknownPlayer(player.clone()))
    }

    /// Plays `text` (coordinate notation or a castling token) for `player`.
    ///
    /// On success the applied move is returned with its check and
    /// checkmate flags set. On failure nothing changes.
    pub fn make_move(&mut self, player: &PlayerId, text: &str) -> Result<Move, GameError> {
        self.require_in_progress()?;
        let color = self.seat_of(player)?;
        if color != self.board.side_to_move() {
            return Err(GameError::NotYourTurn);
        }
        let request = MoveRequest::parse(text)?;

        let legal = self.rules.legal_moves(&self.board);
        let Some(mv) = resolve(&legal, &request) else {
            tracing::debug!("Game {}: rejected {} from {}", self.id, text, player);
            return Err(GameError::IllegalMove(text.trim().to_string()));
        };

        let mut next = self.board.clone();
        next.apply(&mv);
        let verdict = self.rules.verdict(&next);
        let mv = mv.with_checkmate(verdict == Verdict::Checkmate);

        let san = move_to_algebraic(&mv, &legal);
        let entry = match color {
            Color::White => format!("{}. {}", self.board.fullmove_number(), san),
            Color::Black => format!("{}... {}", self.board.fullmove_number(), san),
        };

        self.board.make_move(mv);
        tracing::debug!("Game {}: {} ({})", self.id, entry, self.board.to_fen());
        self.log.push(entry);
        self.san.push(san);

        if self.draw_offer == Some(color.opposite()) {
            self.draw_offer = None;
            self.log.push(format!("{} lets the draw offer lapse", color));
        }

        match verdict {
            Verdict::Checkmate => self.finish(GameState::Checkmate, Some(color)),
            Verdict::Stalemate => self.finish(GameState::Stalemate, None),
            Verdict::Ongoing | Verdict::Check => {}
        }
        Ok(mv)
    }

    /// Legal moves for `player`.
    ///
    /// Empty when it is not their turn, they are not seated here, or the
    /// game is not in progress.
    pub fn legal_moves(&self, player: &PlayerId) -> Vec<Move> {
        if self.state != GameState::InProgress
            || self.color_of(player) != Some(self.board.side_to_move())
        {
            return Vec::new();
        }
        self.rules.legal_moves(&self.board)
    }

    /// Legal moves for `player` starting from `from`.
    pub fn legal_moves_from(&self, player: &PlayerId, from: Square) -> Vec<Move> {
        let mut moves = self.legal_moves(player);
        moves.retain(|m| m.from() == from);
        moves
    }

    /// Returns true if `player`'s king is attacked.
    pub fn is_in_check(&self, player: &PlayerId) -> bool {
        self.color_of(player)
            .is_some_and(|color| self.rules.is_in_check(&self.board, color))
    }

    /// Offers a draw to the opponent. The offer stands until it is
    /// accepted, declined, or the opponent moves.
    pub fn offer_draw(&mut self, player: &PlayerId) -> Result<(), GameError> {
        self.require_in_progress()?;
        let color = self.seat_of(player)?;
        self.draw_offer = Some(color);
        tracing::debug!("Game {}: {} offers a draw", self.id, player);
        self.log.push(format!("{} offers a draw", color));
        Ok(())
    }

    /// Accepts the opponent's pending draw offer, ending the game.
    pub fn accept_draw(&mut self, player: &PlayerId) -> Result<(), GameError> {
        self.require_in_progress()?;
        let color = self.seat_of(player)?;
        if self.draw_offer != Some(color.opposite()) {
            return Err(GameError::NoDrawOffer);
        }
        self.log.push(format!("{} accepts the draw", color));
        self.finish(GameState::Draw, None);
        Ok(())
    }

    /// Declines the opponent's pending draw offer.
    pub fn decline_draw(&mut self, player: &PlayerId) -> Result<(), GameError> {
        self.require_in_progress()?;
        let color = self.seat_of(player)?;
        if self.draw_offer != Some(color.opposite()) {
            return Err(GameError::NoDrawOffer);
        }
        self.draw_offer = None;
        self.log.push(format!("{} declines the draw", color));
        Ok(())
    }

    /// Resigns on behalf of `player`; the opponent wins.
    pub fn resign(&mut self, player: &PlayerId) -> Result<(), GameError> {
        self.require_in_progress()?;
        let color = self.seat_of(player)?;
        self.log.push(format!("{} resigns", color));
        self.finish(GameState::Resignation, Some(color.opposite()));
        Ok(())
    }

    /// Records that `color` ran out of time; the opponent wins.
    ///
    /// Clocks are kept by the caller.
    pub fn timeout(&mut self, color: Color) -> Result<(), GameError> {
        self.require_in_progress()?;
        self.log.push(format!("{} ran out of time", color));
        self.finish(GameState::Timeout, Some(color.opposite()));
        Ok(())
    }

    /// Abandons a game that has not ended yet. Nobody wins.
    pub fn abandon(&mut self) -> Result<(), GameError> {
        if self.state.is_terminal() {
            return Err(GameError::GameNotInProgress(self.state));
        }
        self.finish(GameState::Abandoned, None);
        Ok(())
    }
}
