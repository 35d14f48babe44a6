//! Session state for remote-controlled tic-tac-toe.
//!
//! This module provides the core types:
//!
//! - `board` - The grid of marks (owned by the consumer)
//! - `win` - Win detection and the winning-location code
//! - `protocol` - Wire messages to and from the game server
//! - `channel` - The message channel seam
//! - `event` - Events raised to the consumer
//! - `session` - The session state machine
//! - `controller` - Board and turn tracking on the consumer side
//! - `shared` - Mutex-guarded session handle
//! - `config` - Session tunables
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  join / move / leave   ┌──────────────────┐
//! │  UI / view   │ ─────────────────────▶ │   GameSession    │
//! │              │                        │                  │
//! │ BoardController ◀── SessionEvent ──── │ Idle → Joining → │
//! │   owns Board │                        │ Active → Ended   │
//! └──────────────┘                        └───────┬──────────┘
//!                                            ▲    │ ClientMessage
//!                              ServerMessage │    ▼
//!                                         ┌─────────────────┐
//!                                         │ MessageChannel  │ ◀──▶ game device
//!                                         └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use tictactoe_session::state::{
//!     BoardController, GameSession, RecordingChannel, SessionState,
//! };
//!
//! let mut session = GameSession::new(RecordingChannel::new(), BoardController::new());
//! session.join("Alice").unwrap();
//! session.handle_text(r#"{"event":"joined","player":"X","opponent":"Bob"}"#);
//!
//! assert_eq!(session.state(), SessionState::Active);
//! assert!(session.sink().is_players_turn());
//! ```

pub mod board;
pub mod channel;
pub mod config;
pub mod controller;
pub mod event;
pub mod protocol;
pub mod session;
pub mod shared;
pub mod win;

// Re-export commonly used types
pub use board::{Board, BoardError, Mark, BOARD_SIZE};
pub use channel::{ChannelError, MessageChannel, RecordingChannel};
pub use config::{SessionConfig, DEFAULT_MAX_NAME_LEN};
pub use controller::BoardController;
pub use event::{ErrorKind, EventSink, FnSink, SessionEvent};
pub use protocol::{ClientMessage, EndState, GameResult, Player, ProtocolError, ServerMessage};
pub use session::{GameSession, SessionError, SessionState};
pub use shared::SharedSession;
pub use win::{detect_win, winner, WinDescriptor, WinKind};
