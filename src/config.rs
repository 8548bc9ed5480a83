//! Board configuration.
//!
//! [`BoardConfig`] is fully typed and every field has a default. Hosts that
//! configure the board from loosely-typed data (a JSON document, a settings
//! file) go through [`BoardConfig::from_json`], which validates each field on
//! its own and falls back to that field's default when the value is unusable.
//! Every rejected field yields one [`BoardError::InvalidConfiguration`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde_json::Value;

use crate::codec;
use crate::consts::{
    DEFAULT_APPEAR_SPEED_MS, DEFAULT_DRAG_THROTTLE_RATE_MS, DEFAULT_MOVE_SPEED_MS, DEFAULT_PIECE_THEME,
    DEFAULT_SNAPBACK_SPEED_MS, DEFAULT_SNAP_SPEED_MS, DEFAULT_TRASH_SPEED_MS, FAST_SPEED_MS, SLOW_SPEED_MS,
};
use crate::drag::OffBoardPolicy;
use crate::error::BoardError;
use crate::geometry::Orientation;
use crate::piece::PieceCode;
use crate::position::Position;

/// Animation duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Fast,
    Slow,
    Millis(u32),
}

impl Speed {
    #[must_use]
    pub fn millis(self) -> u32 {
        match self {
            Self::Fast => FAST_SPEED_MS,
            Self::Slow => SLOW_SPEED_MS,
            Self::Millis(ms) => ms,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s == "fast" => Some(Self::Fast),
            Value::String(s) if s == "slow" => Some(Self::Slow),
            Value::Number(n) => match n.as_u64().map(u32::try_from) {
                Some(Ok(ms)) => Some(Self::Millis(ms)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// How a piece code becomes a drawable resource.
#[derive(Debug, Clone)]
pub enum PieceTheme {
    /// `{piece}` is replaced by the piece code, e.g. `"img/{piece}.png"`.
    Template(String),
    Custom(fn(PieceCode) -> String),
}

impl PieceTheme {
    #[must_use]
    pub fn resolve(&self, piece: PieceCode) -> String {
        match self {
            Self::Template(template) => template.replace("{piece}", &piece.to_string()),
            Self::Custom(f) => f(piece),
        }
    }
}

impl Default for PieceTheme {
    fn default() -> Self {
        Self::Template(DEFAULT_PIECE_THEME.to_owned())
    }
}

/// Initial position.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PositionSetting {
    #[default]
    Empty,
    Start,
    Diagram(String),
    Position(Position),
}

impl PositionSetting {
    /// The position this setting describes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidFormat`] for an undecodable diagram.
    pub fn resolve(&self) -> Result<Position, BoardError> {
        match self {
            Self::Empty => Ok(Position::empty()),
            Self::Start => Ok(Position::start()),
            Self::Diagram(d) => codec::decode(d),
            Self::Position(p) => Ok(p.clone()),
        }
    }
}

/// Where invalid input gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidInputPolicy {
    /// Emit a `tracing` warning.
    #[default]
    Console,
    /// Hand a formatted message to [`crate::host::BoardHost::show_alert`].
    Alert,
    /// Hand the error to [`crate::host::BoardHost::on_invalid_input`].
    Callback,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub draggable: bool,
    pub position: PositionSetting,
    pub orientation: Orientation,
    pub show_notation: bool,
    pub piece_theme: PieceTheme,
    pub spare_pieces: bool,
    pub move_speed: Speed,
    pub snapback_speed: Speed,
    pub snap_speed: Speed,
    pub trash_speed: Speed,
    pub appear_speed: Speed,
    /// Minimum milliseconds between handled pointer moves during a drag.
    pub drag_throttle_rate: u64,
    pub drop_off_board: OffBoardPolicy,
    pub invalid_input: InvalidInputPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            draggable: false,
            position: PositionSetting::Empty,
            orientation: Orientation::White,
            show_notation: true,
            piece_theme: PieceTheme::default(),
            spare_pieces: false,
            move_speed: Speed::Millis(DEFAULT_MOVE_SPEED_MS),
            snapback_speed: Speed::Millis(DEFAULT_SNAPBACK_SPEED_MS),
            snap_speed: Speed::Millis(DEFAULT_SNAP_SPEED_MS),
            trash_speed: Speed::Millis(DEFAULT_TRASH_SPEED_MS),
            appear_speed: Speed::Millis(DEFAULT_APPEAR_SPEED_MS),
            drag_throttle_rate: DEFAULT_DRAG_THROTTLE_RATE_MS,
            drop_off_board: OffBoardPolicy::Snapback,
            invalid_input: InvalidInputPolicy::Console,
        }
    }
}

/// A validated configuration plus the fields that fell back to defaults.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub config: BoardConfig,
    pub issues: Vec<BoardError>,
}

impl BoardConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// Recognised keys use the camelCase names hosts already know
    /// (`draggable`, `moveSpeed`, `dropOffBoard`, ...). Unknown keys are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Fails only if `json` is not a JSON object. Bad field values are
    /// defaulted and listed in [`ValidatedConfig::issues`].
    pub fn from_json(json: &str) -> Result<ValidatedConfig, BoardError> {
        let value: Value = serde_json::from_str(json).map_err(|e| BoardError::InvalidConfiguration {
            field: "config",
            reason: format!("not valid JSON: {e}"),
        })?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed JSON value. See [`BoardConfig::from_json`].
    ///
    /// # Errors
    ///
    /// Fails only if `value` is not a JSON object.
    pub fn from_value(value: &Value) -> Result<ValidatedConfig, BoardError> {
        let Some(map) = value.as_object() else {
            return Err(BoardError::InvalidConfiguration {
                field: "config",
                reason: "expected a JSON object".to_owned(),
            });
        };

        let mut config = Self::default();
        let mut issues = Vec::new();

        for (key, value) in map {
            let outcome = match key.as_str() {
                "draggable" => bool_field("draggable", value).map(|v| config.draggable = v),
                "showNotation" => bool_field("showNotation", value).map(|v| config.show_notation = v),
                "sparePieces" => bool_field("sparePieces", value).map(|v| config.spare_pieces = v),
                "position" => position_field(value).map(|v| config.position = v),
                "orientation" => orientation_field(value).map(|v| config.orientation = v),
                "pieceTheme" => piece_theme_field(value).map(|v| config.piece_theme = v),
                "moveSpeed" => speed_field("moveSpeed", value).map(|v| config.move_speed = v),
                "snapbackSpeed" => speed_field("snapbackSpeed", value).map(|v| config.snapback_speed = v),
                "snapSpeed" => speed_field("snapSpeed", value).map(|v| config.snap_speed = v),
                "trashSpeed" => speed_field("trashSpeed", value).map(|v| config.trash_speed = v),
                "appearSpeed" => speed_field("appearSpeed", value).map(|v| config.appear_speed = v),
                "dragThrottleRate" => throttle_field(value).map(|v| config.drag_throttle_rate = v),
                "dropOffBoard" => drop_off_board_field(value).map(|v| config.drop_off_board = v),
                "onInvalidInput" | "showErrors" => invalid_input_field(value).map(|v| config.invalid_input = v),
                other => {
                    tracing::debug!(key = other, "ignoring unknown config key");
                    Ok(())
                }
            };
            if let Err(e) = outcome {
                issues.push(e);
            }
        }

        Ok(ValidatedConfig { config, issues })
    }
}

// =============================================================
// Field validators
// =============================================================

fn reject(field: &'static str, reason: impl Into<String>) -> BoardError {
    BoardError::InvalidConfiguration { field, reason: reason.into() }
}

fn bool_field(field: &'static str, value: &Value) -> Result<bool, BoardError> {
    value.as_bool().ok_or_else(|| reject(field, format!("expected a boolean, got {value}")))
}

fn speed_field(field: &'static str, value: &Value) -> Result<Speed, BoardError> {
    Speed::from_value(value)
        .ok_or_else(|| reject(field, format!("expected \"fast\", \"slow\" or a non-negative integer, got {value}")))
}

fn throttle_field(value: &Value) -> Result<u64, BoardError> {
    value
        .as_u64()
        .filter(|rate| *rate >= 1)
        .ok_or_else(|| reject("dragThrottleRate", format!("expected a positive integer, got {value}")))
}

fn orientation_field(value: &Value) -> Result<Orientation, BoardError> {
    let s = value
        .as_str()
        .ok_or_else(|| reject("orientation", format!("expected a string, got {value}")))?;
    s.parse()
}

fn drop_off_board_field(value: &Value) -> Result<OffBoardPolicy, BoardError> {
    match value.as_str() {
        Some("snapback") => Ok(OffBoardPolicy::Snapback),
        Some("trash") => Ok(OffBoardPolicy::Trash),
        _ => Err(reject("dropOffBoard", format!("expected \"snapback\" or \"trash\", got {value}"))),
    }
}

fn invalid_input_field(value: &Value) -> Result<InvalidInputPolicy, BoardError> {
    match value {
        Value::String(s) if s == "console" => Ok(InvalidInputPolicy::Console),
        Value::String(s) if s == "alert" => Ok(InvalidInputPolicy::Alert),
        Value::String(s) if s == "callback" => Ok(InvalidInputPolicy::Callback),
        Value::String(s) if s == "disabled" => Ok(InvalidInputPolicy::Disabled),
        Value::Bool(false) => Ok(InvalidInputPolicy::Disabled),
        _ => Err(reject(
            "onInvalidInput",
            format!("expected \"console\", \"alert\", \"callback\" or \"disabled\", got {value}"),
        )),
    }
}

fn piece_theme_field(value: &Value) -> Result<PieceTheme, BoardError> {
    value
        .as_str()
        .map(|s| PieceTheme::Template(s.to_owned()))
        .ok_or_else(|| reject("pieceTheme", format!("expected a template string, got {value}")))
}

fn position_field(value: &Value) -> Result<PositionSetting, BoardError> {
    match value {
        Value::String(s) if s.eq_ignore_ascii_case("start") => Ok(PositionSetting::Start),
        Value::String(s) => match codec::decode(s) {
            Ok(_) => Ok(PositionSetting::Diagram(s.clone())),
            Err(e) => Err(reject("position", e.to_string())),
        },
        Value::Object(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (square, piece) in map {
                let Some(piece) = piece.as_str() else {
                    return Err(reject("position", format!("piece on {square} is not a string")));
                };
                pairs.push((square.as_str(), piece));
            }
            Position::from_pairs(pairs)
                .map(PositionSetting::Position)
                .map_err(|e| reject("position", e.to_string()))
        }
        _ => Err(reject("position", format!("expected \"start\", a diagram or a position object, got {value}"))),
    }
}
