//! Game script loading.
//!
//! A script names the game and its players, optionally a starting FEN, the
//! moves to play in coordinate notation, and how the game should end if the
//! moves themselves do not finish it.

use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a script.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the script file from disk.
    #[error("Failed to read script file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the script as valid TOML.
    #[error("Failed to parse script: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A side of the board, as written in scripts.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// How to end the game once the scripted moves are played.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Finish {
    /// `by` resigns.
    Resign { by: Side },
    /// The side to move offers a draw and the other side accepts.
    Draw,
    /// `side` runs out of time.
    Timeout { side: Side },
    /// The game is abandoned.
    Abandon,
}

/// A scripted game.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Identifier used in logs. Defaults to "local".
    #[serde(default = "default_game_id")]
    pub game_id: String,
    /// Name of the white player. Defaults to "white".
    #[serde(default = "default_white")]
    pub white: String,
    /// Name of the black player. Defaults to "black".
    #[serde(default = "default_black")]
    pub black: String,
    /// Starting position; the standard setup when absent.
    #[serde(default)]
    pub fen: Option<String>,
    /// Moves in coordinate notation or castling tokens.
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub finish: Option<Finish>,
}

fn default_game_id() -> String {
    "local".to_string()
}

fn default_white() -> String {
    "white".to_string()
}

fn default_black() -> String {
    "black".to_string()
}

impl Default for ScriptConfig {
    fn default() -> Self {
        ScriptConfig {
            game_id: default_game_id(),
            white: default_white(),
            black: default_black(),
            fen: None,
            moves: Vec::new(),
            finish: None,
        }
    }
}

impl ScriptConfig {
    /// Loads a script from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it is not a valid script.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_script() {
        let toml_content = r#"
game_id = "scholars"
white = "alice"
black = "bob"
moves = ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]
"#;

        let config: ScriptConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.game_id, "scholars");
        assert_eq!(config.white, "alice");
        assert_eq!(config.black, "bob");
        assert_eq!(config.moves.len(), 7);
        assert_eq!(config.fen, None);
        assert_eq!(config.finish, None);
    }

    #[test]
    fn test_parse_script_with_missing_optional_fields() {
        let config: ScriptConfig = toml::from_str("").unwrap();
        assert_eq!(config, ScriptConfig::default());
        assert_eq!(config.game_id, "local");
        assert!(config.moves.is_empty());
    }

    #[test]
    fn test_parse_finish_actions() {
        let config: ScriptConfig = toml::from_str(
            r#"
moves = ["e2e4"]

[finish]
action = "resign"
by = "black"
"#,
        )
        .unwrap();
        assert_eq!(config.finish, Some(Finish::Resign { by: Side::Black }));

        let config: ScriptConfig = toml::from_str("finish = { action = \"draw\" }").unwrap();
        assert_eq!(config.finish, Some(Finish::Draw));

        let config: ScriptConfig =
            toml::from_str("finish = { action = \"timeout\", side = \"white\" }").unwrap();
        assert_eq!(config.finish, Some(Finish::Timeout { side: Side::White }));
        assert_eq!(Color::from(Side::White), Color::White);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result: Result<ScriptConfig, _> = toml::from_str("moves = [e2e4");
        assert!(result.is_err());

        let result: Result<ScriptConfig, _> =
            toml::from_str("finish = { action = \"flag\" }");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScriptConfig::load(Path::new("/nonexistent/script.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
        assert!(err.to_string().starts_with("Failed to read script file"));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join("chess_cli_script_test.toml");
        std::fs::write(&path, "white = \"carol\"\nmoves = [\"d2d4\"]\n").unwrap();

        let config = ScriptConfig::load(&path).unwrap();
        assert_eq!(config.white, "carol");
        assert_eq!(config.moves, vec!["d2d4"]);

        std::fs::write(&path, "moves = 3").unwrap();
        assert!(matches!(
            ScriptConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
        std::fs::remove_file(&path).ok();
    }
}
