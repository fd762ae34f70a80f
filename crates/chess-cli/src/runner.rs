//! Plays a script against the engine and summarizes the result.

use crate::config::{Finish, ScriptConfig};
use chess_core::{Color, FenError};
use chess_engine::{GameEngine, GameError, GameState, PlayerId};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while playing a script.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("invalid starting position: {0}")]
    Fen(#[from] FenError),

    #[error("invalid player: {0}")]
    Player(GameError),

    #[error("move {ply} ({text}) rejected: {source}")]
    Move {
        ply: usize,
        text: String,
        source: GameError,
    },

    #[error("could not finish the game: {0}")]
    Finish(GameError),
}

/// Outcome of a scripted game.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub game_id: String,
    pub white: String,
    pub black: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub moves: Vec<String>,
    pub fen: String,
    pub log: Vec<String>,
}

impl GameSummary {
    fn from_game(game: &GameEngine) -> Self {
        let name = |color| game.player(color).map(|p| p.to_string()).unwrap_or_default();
        GameSummary {
            game_id: game.id().to_string(),
            white: name(Color::White),
            black: name(Color::Black),
            state: game.state().to_string(),
            winner: game.winner().map(|p| p.to_string()),
            moves: game.san_moves().to_vec(),
            fen: game.fen(),
            log: game.log().to_vec(),
        }
    }
}

/// Plays every scripted move, then the finishing action if the game is
/// still running. Returns the finished engine along with its summary.
pub fn play_script(script: &ScriptConfig) -> Result<(GameEngine, GameSummary), RunError> {
    let mut game = match &script.fen {
        Some(fen) => GameEngine::from_fen(script.game_id.clone(), fen)?,
        None => GameEngine::new(script.game_id.clone()),
    };

    let white = PlayerId::new(script.white.clone()).map_err(RunError::Player)?;
    let black = PlayerId::new(script.black.clone()).map_err(RunError::Player)?;
    game.add_player(white.clone(), Color::White)
        .map_err(RunError::Player)?;
    game.add_player(black.clone(), Color::Black)
        .map_err(RunError::Player)?;

    for (index, text) in script.moves.iter().enumerate() {
        let player = match game.side_to_move() {
            Color::White => &white,
            Color::Black => &black,
        };
        let mv = game
            .make_move(player, text)
            .map_err(|source| RunError::Move {
                ply: index + 1,
                text: text.clone(),
                source,
            })?;
        tracing::debug!("Played {} for {}", mv, player);
    }

    if let Some(finish) = &script.finish {
        if game.state() == GameState::InProgress {
            finish_game(&mut game, finish, &white, &black).map_err(RunError::Finish)?;
        } else {
            tracing::info!(
                "Game {} already over ({}), skipping scripted finish",
                game.id(),
                game.state()
            );
        }
    }

    let summary = GameSummary::from_game(&game);
    Ok((game, summary))
}

fn finish_game(
    game: &mut GameEngine,
    finish: &Finish,
    white: &PlayerId,
    black: &PlayerId,
) -> Result<(), GameError> {
    let seat = |color: Color| match color {
        Color::White => white,
        Color::Black => black,
    };
    match finish {
        Finish::Resign { by } => game.resign(seat((*by).into())),
        Finish::Draw => {
            let offerer = game.side_to_move();
            game.offer_draw(seat(offerer))?;
            game.accept_draw(seat(offerer.opposite()))
        }
        Finish::Timeout { side } => game.timeout((*side).into()),
        Finish::Abandon => game.abandon(),
    }
}
