//! Wire protocol.
//!
//! Messages are JSON objects. Requests carry a `command` tag, server
//! notifications carry an `event` tag:
//!
//! ```text
//! out  {"command":"join","name":"Alice"}
//! out  {"command":"move","row":1,"column":2}
//! out  {"command":"leave"}
//! in   {"event":"joined","player":"X","opponent":"Bob"}
//! in   {"event":"join_failed","message":"Game is full"}
//! in   {"event":"moved","player":"O","row":1,"column":2,"game_over":false}
//! in   {"event":"endgame","end_state":"X-won","winning_location":1}
//! in   {"event":"error","message":"Not your turn"}
//! ```
//!
//! Incoming messages are decoded into a closed set of variants. Anything that
//! does not match a known shape is a [`ProtocolError`].

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::board::BOARD_SIZE;
use super::win::WinDescriptor;

/// Player symbol, assigned by the server on join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Moves first.
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }
}

/// Outcome of a game as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndState {
    #[serde(rename = "X-won")]
    XWon,
    #[serde(rename = "O-won")]
    OWon,
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "abandoned")]
    Abandoned,
}

impl EndState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XWon => "X-won",
            Self::OWon => "O-won",
            Self::Draw => "draw",
            Self::Abandoned => "abandoned",
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Self::XWon => Some(Player::X),
            Self::OWon => Some(Player::O),
            Self::Draw | Self::Abandoned => None,
        }
    }

    /// Translate into the local player's perspective.
    ///
    /// Returns `None` when the state names a winner but the local player is
    /// unknown.
    pub fn localize(&self, local: Option<Player>) -> Option<GameResult> {
        match (self.winner(), local) {
            (Some(winner), Some(me)) if winner == me => Some(GameResult::Won),
            (Some(_), Some(_)) => Some(GameResult::Lost),
            (Some(_), None) => None,
            (None, _) => match self {
                Self::Draw => Some(GameResult::Draw),
                _ => Some(GameResult::Abandoned),
            },
        }
    }
}

/// Outcome of a game from this device's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GameResult {
    #[display("You won")]
    Won,
    #[display("You lost")]
    Lost,
    #[display("Draw")]
    Draw,
    #[display("Game abandoned")]
    Abandoned,
}

/// Decode failures for incoming messages.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProtocolError {
    #[display("Malformed message: {message}")]
    Json { message: String },
    #[display("Unknown winning location {code}")]
    UnknownLocation { code: u32 },
    #[display("Move ({row}, {column}) is off the board")]
    CoordinateOutOfRange { row: usize, column: usize },
    #[display("Winning line {line:?} is outside a {size}x{size} board")]
    LineOutOfRange { line: WinDescriptor, size: usize },
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

/// Requests sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Join { name: String },
    Move { row: usize, column: usize },
    Leave,
}

impl ClientMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Move { .. } => "move",
            Self::Leave => "leave",
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Join { name } => serde_json::json!({
                "command": "join",
                "name": name
            }),
            Self::Move { row, column } => serde_json::json!({
                "command": "move",
                "row": row,
                "column": column
            }),
            Self::Leave => serde_json::json!({"command": "leave"}),
        }
    }
}

/// Raw shapes accepted on the wire, before range checks.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum WireEvent {
    Joined {
        player: Player,
        opponent: String,
    },
    JoinFailed {
        message: String,
    },
    Moved {
        player: Player,
        row: usize,
        column: usize,
        game_over: bool,
    },
    Endgame {
        end_state: EndState,
        winning_location: u32,
    },
    Error {
        message: String,
    },
}

/// Notifications received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    JoinSuccess {
        player: Player,
        opponent: String,
    },
    JoinFailure {
        reason: String,
    },
    Move {
        player: Player,
        row: usize,
        column: usize,
        is_final: bool,
    },
    GameEnded {
        end_state: EndState,
        win: WinDescriptor,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    /// Decode a JSON message.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ProtocolError> {
        let wire = WireEvent::deserialize(value)?;
        Self::from_wire(wire)
    }

    /// Decode a JSON message from text.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let wire: WireEvent = serde_json::from_str(text)?;
        Self::from_wire(wire)
    }

    fn from_wire(wire: WireEvent) -> Result<Self, ProtocolError> {
        Ok(match wire {
            WireEvent::Joined { player, opponent } => Self::JoinSuccess { player, opponent },
            WireEvent::JoinFailed { message } => Self::JoinFailure { reason: message },
            WireEvent::Moved {
                player,
                row,
                column,
                game_over,
            } => {
                if row >= BOARD_SIZE || column >= BOARD_SIZE {
                    return Err(ProtocolError::CoordinateOutOfRange { row, column });
                }
                Self::Move {
                    player,
                    row,
                    column,
                    is_final: game_over,
                }
            }
            WireEvent::Endgame {
                end_state,
                winning_location,
            } => Self::GameEnded {
                end_state,
                win: WinDescriptor::from_location_code(winning_location, BOARD_SIZE)?,
            },
            WireEvent::Error { message } => Self::Error { message },
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinSuccess { .. } => "joined",
            Self::JoinFailure { .. } => "join_failed",
            Self::Move { .. } => "moved",
            Self::GameEnded { .. } => "endgame",
            Self::Error { .. } => "error",
        }
    }

    /// Encode as the server would send it.
    ///
    /// Fails only for a winning line that has no location code.
    pub fn to_value(&self) -> Result<serde_json::Value, ProtocolError> {
        Ok(match self {
            Self::JoinSuccess { player, opponent } => serde_json::json!({
                "event": "joined",
                "player": player.as_str(),
                "opponent": opponent
            }),
            Self::JoinFailure { reason } => serde_json::json!({
                "event": "join_failed",
                "message": reason
            }),
            Self::Move {
                player,
                row,
                column,
                is_final,
            } => serde_json::json!({
                "event": "moved",
                "player": player.as_str(),
                "row": row,
                "column": column,
                "game_over": is_final
            }),
            Self::GameEnded { end_state, win } => serde_json::json!({
                "event": "endgame",
                "end_state": end_state.as_str(),
                "winning_location": win.to_location_code(BOARD_SIZE)?
            }),
            Self::Error { message } => serde_json::json!({
                "event": "error",
                "message": message
            }),
        })
    }
}
