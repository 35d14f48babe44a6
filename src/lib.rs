//! Tic-Tac-Toe Session Library
//!
//! This crate provides the client side of a two-player tic-tac-toe game hosted
//! on a remote device.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Session State Machine** - Joins a game, sends moves, interprets server
//!   notifications and reports them as typed events.
//!
//! - **Wire Protocol** - JSON requests and notifications, decoded into a closed
//!   set of variants at the channel boundary.
//!
//! - **Board and Win Detection** - The grid of marks and the winning-line scan,
//!   including the server's winning-location code.
//!
//! - **Board Controller** - Consumer-side board and turn tracking fed by events.
//!
//! # Design Principles
//!
//! 1. **State machines validate transitions** - Requests in the wrong state are
//!    rejected locally; out-of-place messages are reported, never applied.
//!
//! 2. **Fail soft on input** - Malformed messages become error events and leave
//!    the session untouched.
//!
//! 3. **No networking** - The channel is a trait; this crate never opens sockets.
//!
//! 4. **Serialization-ready** - Messages and events convert to JSON.
//!
//! # Example
//!
//! ```rust
//! use tictactoe_session::{
//!     GameResult, GameSession, RecordingChannel, SessionEvent, WinDescriptor,
//! };
//!
//! let mut session = GameSession::new(RecordingChannel::new(), Vec::new());
//!
//! session.join("Alice").unwrap();
//! session.handle_text(r#"{"event":"joined","player":"X","opponent":"Bob"}"#);
//! session.make_move(0, 0).unwrap();
//! session.handle_text(r#"{"event":"endgame","end_state":"X-won","winning_location":1}"#);
//!
//! assert_eq!(
//!     session.sink().last(),
//!     Some(&SessionEvent::GameEnded {
//!         result: GameResult::Won,
//!         win: WinDescriptor::Row(0),
//!     })
//! );
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
