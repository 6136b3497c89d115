//! Draw-rule configuration for a game session.
//!
//! Options can be set programmatically or from textual name/value pairs, the
//! way an engine protocol's `setoption` works.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};

/// Draw thresholds. Fields are private so every value goes through the
/// same checks: repetition limit at least 2, fifty-move limit at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    repetition_limit: u8,
    fifty_move_halfmoves: u16,
    detect_insufficient_material: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            repetition_limit: REPETITION_LIMIT,
            fifty_move_halfmoves: FIFTY_MOVE_HALFMOVES,
            detect_insufficient_material: true,
        }
    }
}

impl SessionConfig {
    pub fn new(
        repetition_limit: u8,
        fifty_move_halfmoves: u16,
        detect_insufficient_material: bool,
    ) -> ChessResult<Self> {
        Ok(Self::default()
            .with_repetition_limit(repetition_limit)?
            .with_fifty_move_halfmoves(fifty_move_halfmoves)?
            .with_insufficient_material(detect_insufficient_material))
    }

    /// Occurrences of one position that end the game in a draw.
    pub fn with_repetition_limit(mut self, limit: u8) -> ChessResult<Self> {
        if limit < 2 {
            return Err(invalid_value("RepetitionLimit", limit));
        }
        self.repetition_limit = limit;
        Ok(self)
    }

    /// Half-moves without pawn move or capture that end the game in a draw.
    pub fn with_fifty_move_halfmoves(mut self, halfmoves: u16) -> ChessResult<Self> {
        if halfmoves == 0 {
            return Err(invalid_value("FiftyMoveHalfmoves", halfmoves));
        }
        self.fifty_move_halfmoves = halfmoves;
        Ok(self)
    }

    #[must_use]
    pub fn with_insufficient_material(mut self, detect: bool) -> Self {
        self.detect_insufficient_material = detect;
        self
    }

    pub fn repetition_limit(&self) -> u8 {
        self.repetition_limit
    }

    pub fn fifty_move_halfmoves(&self) -> u16 {
        self.fifty_move_halfmoves
    }

    pub fn detect_insufficient_material(&self) -> bool {
        self.detect_insufficient_material
    }

    /// Set an option by name (case-insensitive). Leaves `self` unchanged on error.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessError::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        let value = value.trim();

        *self = match name.to_ascii_lowercase().as_str() {
            "repetitionlimit" => self
                .with_repetition_limit(value.parse().map_err(|_| invalid())?)
                .map_err(|_| invalid())?,
            "fiftymovehalfmoves" => self
                .with_fifty_move_halfmoves(value.parse().map_err(|_| invalid())?)
                .map_err(|_| invalid())?,
            "insufficientmaterial" => {
                self.with_insufficient_material(parse_bool(value).ok_or_else(invalid)?)
            }
            _ => return Err(ChessError::UnknownOption(name.to_owned())),
        };
        Ok(())
    }

    pub fn get_option(&self, name: &str) -> ChessResult<String> {
        match name.to_ascii_lowercase().as_str() {
            "repetitionlimit" => Ok(self.repetition_limit.to_string()),
            "fiftymovehalfmoves" => Ok(self.fifty_move_halfmoves.to_string()),
            "insufficientmaterial" => Ok(self.detect_insufficient_material.to_string()),
            _ => Err(ChessError::UnknownOption(name.to_owned())),
        }
    }
}

fn invalid_value(name: &str, value: impl ToString) -> ChessError {
    ChessError::InvalidOptionValue {
        name: name.to_owned(),
        value: value.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::SessionConfig;
    use crate::chess_errors::ChessError;

    #[test]
    fn defaults_follow_standard_rules() {
        let config = SessionConfig::default();
        assert_eq!(config.repetition_limit(), 3);
        assert_eq!(config.fifty_move_halfmoves(), 100);
        assert!(config.detect_insufficient_material());
    }

    #[test]
    fn constructor_rejects_limits_that_end_every_game() {
        assert!(matches!(
            SessionConfig::new(0, 100, true),
            Err(ChessError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            SessionConfig::new(1, 100, true),
            Err(ChessError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            SessionConfig::new(3, 0, true),
            Err(ChessError::InvalidOptionValue { .. })
        ));

        let config = SessionConfig::new(2, 1, false).expect("smallest accepted limits");
        assert_eq!(config.repetition_limit(), 2);
        assert_eq!(config.fifty_move_halfmoves(), 1);
        assert!(!config.detect_insufficient_material());
    }

    #[test]
    fn options_parse_by_name() {
        let mut config = SessionConfig::default();
        config.set_option("RepetitionLimit", "5").expect("valid option");
        config.set_option("fiftymovehalfmoves", "150").expect("valid option");
        config.set_option("InsufficientMaterial", "off").expect("valid option");

        assert_eq!(config.repetition_limit(), 5);
        assert_eq!(config.fifty_move_halfmoves(), 150);
        assert!(!config.detect_insufficient_material());
        assert_eq!(config.get_option("RepetitionLimit").expect("known option"), "5");
    }

    #[test]
    fn bad_values_leave_config_untouched() {
        let mut config = SessionConfig::default();
        assert!(matches!(
            config.set_option("RepetitionLimit", "1"),
            Err(ChessError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            config.set_option("FiftyMoveHalfmoves", "lots"),
            Err(ChessError::InvalidOptionValue { .. })
        ));
        assert_eq!(
            config.set_option("Hash", "64"),
            Err(ChessError::UnknownOption("Hash".to_owned()))
        );
        assert_eq!(config, SessionConfig::default());
    }
}
