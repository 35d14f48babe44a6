//! Game session state machine.
//!
//! One [`GameSession`] drives one match from this device. It turns local
//! intents into requests, interprets server notifications and reports them
//! as [`SessionEvent`]s. The board itself is never touched here.
//!
//! # State Diagram
//!
//! ```text
//!            join (sent)            joined
//! ┌──────┐ ───────────▶ ┌─────────┐ ───────▶ ┌────────┐
//! │ Idle │              │ Joining │          │ Active │
//! └──────┘ ◀─────────── └────┬────┘          └───┬────┘
//!     │     join_failed /    │ endgame           │ endgame
//!     │     timeout          ▼                   ▼
//!     │                 ┌─────────────────────────────┐
//!     └────────────────▶│            Ended            │
//!          detach       └─────────────────────────────┘
//! ```
//!
//! Detaching the channel ends the session from any state. An ended session
//! refuses every request with [`SessionError::SessionClosed`].

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use derive_more::Display;
use tracing::{debug, info, instrument, warn};

use super::board::{BoardError, BOARD_SIZE};
use super::channel::{ChannelError, MessageChannel};
use super::config::SessionConfig;
use super::event::{ErrorKind, EventSink, SessionEvent};
use super::protocol::{ClientMessage, Player, ProtocolError, ServerMessage};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No join attempted, or the last one failed
    #[default]
    Idle,
    /// Join request sent, waiting for the server
    Joining,
    /// Playing
    Active,
    /// Game over or channel gone
    Ended,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Joining => "joining",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request was rejected locally.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    #[display("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    #[display("Session has ended")]
    SessionClosed,
    #[display("Display name is empty")]
    EmptyName,
    #[display("Channel unavailable: {reason}")]
    ChannelUnavailable { reason: String },
    #[display("{_0}")]
    Board(BoardError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ChannelError> for SessionError {
    fn from(err: ChannelError) -> Self {
        Self::ChannelUnavailable {
            reason: err.to_string(),
        }
    }
}

impl From<BoardError> for SessionError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

const DETACHED_MESSAGE: &str = "Lost connection to the game";
const JOIN_TIMEOUT_MESSAGE: &str = "Timed out waiting to join the game";

/// Protocol state machine for one match.
pub struct GameSession<C, E> {
    state: SessionState,
    player: Option<Player>,
    opponent: Option<String>,
    channel: C,
    sink: E,
    config: SessionConfig,
    /// When the pending join request went out
    join_sent_at: Option<Instant>,
    joined_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl<C: MessageChannel, E: EventSink> GameSession<C, E> {
    /// Create an idle session over an attached channel.
    pub fn new(channel: C, sink: E) -> Self {
        Self::with_config(channel, sink, SessionConfig::default())
    }

    pub fn with_config(channel: C, sink: E, config: SessionConfig) -> Self {
        Self {
            state: SessionState::Idle,
            player: None,
            opponent: None,
            channel,
            sink,
            config,
            join_sent_at: None,
            joined_at: None,
            ended_at: None,
        }
    }

    // Accessors

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Symbol assigned by the server, once joined.
    pub fn player(&self) -> Option<Player> {
        self.player
    }

    pub fn opponent(&self) -> Option<&str> {
        self.opponent.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn joined_at(&self) -> Option<DateTime<Utc>> {
        self.joined_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    pub fn into_parts(self) -> (C, E) {
        (self.channel, self.sink)
    }

    // Outgoing requests

    /// Ask the server to join a game under `display_name`.
    ///
    /// `Ok` only means the channel took the request; the answer arrives later
    /// as a `joined` or `join_failed` message. A name that trims to nothing is
    /// refused with [`SessionError::EmptyName`].
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn join(&mut self, display_name: &str) -> Result<(), SessionError> {
        self.require("join", &[SessionState::Idle])?;

        let name = self.config.normalize_name(display_name);
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        self.send(ClientMessage::Join { name })?;

        self.state = SessionState::Joining;
        self.join_sent_at = Some(Instant::now());
        info!("Join requested");
        Ok(())
    }

    /// Ask the server to place this player's mark.
    ///
    /// Turn order is the consumer's concern; the server rejects out-of-turn
    /// moves with an error message.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn make_move(&mut self, row: usize, column: usize) -> Result<(), SessionError> {
        self.require("make a move", &[SessionState::Active])?;

        if row >= BOARD_SIZE || column >= BOARD_SIZE {
            return Err(BoardError::OutOfRange {
                row,
                column,
                size: BOARD_SIZE,
            }
            .into());
        }

        self.send(ClientMessage::Move { row, column })
    }

    /// Leave the game, forfeiting it if in progress.
    ///
    /// The session ends when the server answers with `endgame`, or when the
    /// channel detaches.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn leave_game(&mut self) -> Result<(), SessionError> {
        self.require("leave", &[SessionState::Joining, SessionState::Active])?;
        self.send(ClientMessage::Leave)
    }

    fn require(
        &self,
        operation: &'static str,
        allowed: &[SessionState],
    ) -> Result<(), SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::SessionClosed);
        }
        if !allowed.contains(&self.state) {
            return Err(SessionError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    fn send(&mut self, message: ClientMessage) -> Result<(), SessionError> {
        if !self.channel.is_ready() {
            warn!(kind = message.kind(), "Channel not ready, request dropped");
            return Err(ChannelError::NotAttached.into());
        }
        debug!(kind = message.kind(), "Sending request");
        self.channel.send(message.to_value()).map_err(|err| {
            warn!(kind = message.kind(), error = %err, "Send refused");
            SessionError::from(err)
        })
    }

    // Incoming messages

    /// Interpret one message delivered by the channel.
    ///
    /// Never fails: undecodable or out-of-place messages are reported as
    /// [`ErrorKind::Malformed`] events and leave the state alone.
    #[instrument(skip_all, fields(state = %self.state))]
    pub fn handle_message(&mut self, message: &serde_json::Value) {
        if self.ignore_when_ended() {
            return;
        }
        match ServerMessage::from_value(message) {
            Ok(msg) => self.apply(msg),
            Err(err) => self.malformed(err),
        }
    }

    /// Same as [`handle_message`](Self::handle_message) for a text payload.
    #[instrument(skip_all, fields(state = %self.state))]
    pub fn handle_text(&mut self, text: &str) {
        if self.ignore_when_ended() {
            return;
        }
        match ServerMessage::parse(text) {
            Ok(msg) => self.apply(msg),
            Err(err) => self.malformed(err),
        }
    }

    fn ignore_when_ended(&self) -> bool {
        if self.state.is_terminal() {
            debug!("Session ended, ignoring message");
            return true;
        }
        false
    }

    fn apply(&mut self, message: ServerMessage) {
        use ServerMessage::*;
        use SessionState::*;

        debug!(kind = message.kind(), "Received message");

        match (self.state, message) {
            (Joining, JoinSuccess { player, opponent }) => {
                self.state = Active;
                self.player = Some(player);
                self.opponent = Some(opponent.clone());
                self.joined_at = Some(Utc::now());
                self.join_sent_at = None;
                info!(%player, %opponent, "Joined game");
                self.sink
                    .emit(SessionEvent::JoinedAsPlayer { player, opponent });
            }

            (Joining, JoinFailure { reason }) => {
                self.state = Idle;
                self.join_sent_at = None;
                info!(%reason, "Join rejected");
                self.sink.emit(SessionEvent::JoinFailed { reason });
            }

            (Active, Move {
                player,
                row,
                column,
                is_final,
            }) => {
                if is_final {
                    debug!("Final move, waiting for endgame");
                }
                self.sink.emit(SessionEvent::MoveMade {
                    player,
                    row,
                    column,
                    is_final,
                });
            }

            (Joining | Active, GameEnded { end_state, win }) => {
                let Some(result) = end_state.localize(self.player) else {
                    self.report_malformed(format!(
                        "Game ended as {} before a player was assigned",
                        end_state.as_str()
                    ));
                    return;
                };
                self.state = Ended;
                self.ended_at = Some(Utc::now());
                self.join_sent_at = None;
                info!(%result, "Game ended");
                self.sink.emit(SessionEvent::GameEnded { result, win });
            }

            (_, Error { message }) => {
                warn!(%message, "Server error");
                self.sink.emit(SessionEvent::error(ErrorKind::Server, message));
            }

            (state, message) => {
                self.report_malformed(format!(
                    "Unexpected {} message while {}",
                    message.kind(),
                    state
                ));
            }
        }
    }

    fn malformed(&mut self, err: ProtocolError) {
        self.report_malformed(err.to_string());
    }

    fn report_malformed(&mut self, message: String) {
        warn!(%message, "Ignoring message");
        self.sink
            .emit(SessionEvent::error(ErrorKind::Malformed, message));
    }

    // Channel lifecycle

    /// The channel became usable.
    pub fn on_attached(&mut self) {
        info!(state = %self.state, "Channel attached");
    }

    /// The channel went away. Ends the session; repeated calls do nothing.
    pub fn on_detached(&mut self) {
        if self.state.is_terminal() {
            debug!("Already ended, ignoring detach");
            return;
        }
        info!(state = %self.state, "Channel detached, ending session");
        self.state = SessionState::Ended;
        self.ended_at = Some(Utc::now());
        self.join_sent_at = None;
        self.sink
            .emit(SessionEvent::error(ErrorKind::Detached, DETACHED_MESSAGE));
    }

    /// The channel reported a non-fatal error.
    pub fn on_channel_error(&mut self, message: &str) {
        if self.state.is_terminal() {
            return;
        }
        warn!(%message, "Channel error");
        self.sink
            .emit(SessionEvent::error(ErrorKind::Channel, message));
    }

    // Timeout

    /// Give up on a pending join if the configured timeout has passed.
    ///
    /// Returns true if the join was abandoned.
    pub fn check_join_timeout(&mut self) -> bool {
        self.check_join_timeout_at(Instant::now())
    }

    pub fn check_join_timeout_at(&mut self, now: Instant) -> bool {
        let (Some(timeout), Some(sent_at)) = (self.config.join_timeout(), self.join_sent_at) else {
            return false;
        };
        if self.state != SessionState::Joining || now.saturating_duration_since(sent_at) < timeout
        {
            return false;
        }

        info!(?timeout, "Join timed out");
        self.state = SessionState::Idle;
        self.join_sent_at = None;
        self.sink.emit(SessionEvent::JoinFailed {
            reason: JOIN_TIMEOUT_MESSAGE.to_string(),
        });
        true
    }
}

impl<C, E> fmt::Debug for GameSession<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("player", &self.player)
            .field("opponent", &self.opponent)
            .field("joined_at", &self.joined_at)
            .field("ended_at", &self.ended_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::channel::RecordingChannel;
    use crate::state::protocol::{EndState, GameResult};
    use crate::state::win::WinDescriptor;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    type TestSession = GameSession<RecordingChannel, Vec<SessionEvent>>;

    fn make_session() -> TestSession {
        GameSession::new(RecordingChannel::new(), Vec::new())
    }

    fn joined_as(player: Player) -> TestSession {
        let mut session = make_session();
        session.join("Alice").unwrap();
        session.handle_message(
            &ServerMessage::JoinSuccess {
                player,
                opponent: "Bob".to_string(),
            }
            .to_value()
            .unwrap(),
        );
        session.channel_mut().take_sent();
        session.sink_mut().clear();
        session
    }

    fn endgame(end_state: EndState, location: u32) -> serde_json::Value {
        json!({"event": "endgame", "end_state": end_state.as_str(), "winning_location": location})
    }

    #[test]
    fn test_initial_state() {
        let session = make_session();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.player(), None);
        assert!(session.channel().sent().is_empty());
    }

    #[test]
    fn test_join_sends_request() {
        let mut session = make_session();

        session.join("Alice").unwrap();

        assert_eq!(session.state(), SessionState::Joining);
        assert_eq!(
            session.channel().sent(),
            &[json!({"command": "join", "name": "Alice"})]
        );
        assert!(session.sink().is_empty());
    }

    #[test]
    fn test_join_with_channel_down_stays_idle() {
        let mut session = GameSession::new(RecordingChannel::detached(), Vec::new());

        let result = session.join("Alice");

        assert!(matches!(
            result,
            Err(SessionError::ChannelUnavailable { .. })
        ));
        assert_eq!(session.state(), SessionState::Idle);

        // Retry succeeds once the channel is back.
        session.channel_mut().set_attached(true);
        session.join("Alice").unwrap();
        assert_eq!(session.state(), SessionState::Joining);
    }

    #[test]
    fn test_join_success() {
        let mut session = make_session();
        session.join("Alice").unwrap();

        session.handle_message(&json!({"event": "joined", "player": "O", "opponent": "Bob"}));

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.player(), Some(Player::O));
        assert_eq!(session.opponent(), Some("Bob"));
        assert!(session.joined_at().is_some());
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::JoinedAsPlayer {
                player: Player::O,
                opponent: "Bob".to_string()
            }]
        );
    }

    #[test]
    fn test_join_failure_returns_to_idle() {
        let mut session = make_session();
        session.join("Alice").unwrap();

        session.handle_text(r#"{"event":"join_failed","message":"Game is full"}"#);

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::JoinFailed {
                reason: "Game is full".to_string()
            }]
        );
        assert!(session.join("Alice").is_ok());
    }

    #[test]
    fn test_join_rejected_when_active_or_ended() {
        let mut session = joined_as(Player::X);

        assert_eq!(
            session.join("Alice"),
            Err(SessionError::InvalidState {
                operation: "join",
                state: SessionState::Active
            })
        );
        assert!(session.channel().sent().is_empty());

        session.handle_message(&endgame(EndState::Draw, 0));
        assert_eq!(session.join("Alice"), Err(SessionError::SessionClosed));
        assert!(session.channel().sent().is_empty());
    }

    #[test]
    fn test_join_twice_while_joining() {
        let mut session = make_session();
        session.join("Alice").unwrap();
        assert!(matches!(
            session.join("Alice"),
            Err(SessionError::InvalidState { .. })
        ));
        assert_eq!(session.channel().sent().len(), 1);
    }

    #[test]
    fn test_make_move() {
        let mut session = joined_as(Player::X);

        session.make_move(1, 2).unwrap();

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(
            session.channel().sent(),
            &[json!({"command": "move", "row": 1, "column": 2})]
        );
    }

    #[test]
    fn test_make_move_checks() {
        let mut session = make_session();
        assert!(matches!(
            session.make_move(0, 0),
            Err(SessionError::InvalidState { .. })
        ));

        let mut session = joined_as(Player::X);
        assert_eq!(
            session.make_move(0, 3),
            Err(SessionError::Board(BoardError::OutOfRange {
                row: 0,
                column: 3,
                size: 3
            }))
        );
        assert!(session.channel().sent().is_empty());
    }

    #[test]
    fn test_move_notification() {
        let mut session = joined_as(Player::X);

        session.handle_message(&json!({
            "event": "moved", "player": "O", "row": 2, "column": 1, "game_over": true
        }));

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::MoveMade {
                player: Player::O,
                row: 2,
                column: 1,
                is_final: true
            }]
        );
    }

    #[test]
    fn test_game_ended_localized() {
        let mut session = joined_as(Player::X);
        session.handle_message(&endgame(EndState::XWon, 1));
        assert_eq!(session.state(), SessionState::Ended);
        assert!(session.ended_at().is_some());
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::GameEnded {
                result: GameResult::Won,
                win: WinDescriptor::Row(0)
            }]
        );

        let mut session = joined_as(Player::O);
        session.handle_message(&endgame(EndState::XWon, 1));
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::GameEnded {
                result: GameResult::Lost,
                win: WinDescriptor::Row(0)
            }]
        );
    }

    #[test]
    fn test_game_ended_draw_and_abandoned() {
        let mut session = joined_as(Player::O);
        session.handle_message(&endgame(EndState::Draw, 0));
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::GameEnded {
                result: GameResult::Draw,
                win: WinDescriptor::None
            }]
        );

        // Opponent left before the join was confirmed.
        let mut session = make_session();
        session.join("Alice").unwrap();
        session.handle_message(&endgame(EndState::Abandoned, 0));
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::GameEnded {
                result: GameResult::Abandoned,
                win: WinDescriptor::None
            }]
        );
    }

    #[test]
    fn test_winner_before_join_is_malformed() {
        let mut session = make_session();
        session.join("Alice").unwrap();

        session.handle_message(&endgame(EndState::OWon, 8));

        assert_eq!(session.state(), SessionState::Joining);
        assert_eq!(session.sink().len(), 1);
        assert!(matches!(
            session.sink()[0],
            SessionEvent::Error {
                kind: ErrorKind::Malformed,
                ..
            }
        ));
    }

    #[test]
    fn test_server_error_keeps_state() {
        let mut session = joined_as(Player::X);

        session.handle_message(&json!({"event": "error", "message": "Not your turn"}));

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::error(ErrorKind::Server, "Not your turn")]
        );
    }

    #[test]
    fn test_malformed_move_leaves_state() {
        let mut session = joined_as(Player::X);

        session.handle_message(&json!({
            "event": "moved", "player": "O", "column": 1, "game_over": false
        }));

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.sink().len(), 1);
        assert!(matches!(
            session.sink()[0],
            SessionEvent::Error {
                kind: ErrorKind::Malformed,
                ..
            }
        ));
    }

    #[test]
    fn test_garbage_text() {
        let mut session = joined_as(Player::X);
        session.handle_text("{{{");
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.sink().len(), 1);
    }

    #[test]
    fn test_move_while_joining_is_malformed() {
        let mut session = make_session();
        session.join("Alice").unwrap();

        session.handle_message(&json!({
            "event": "moved", "player": "X", "row": 0, "column": 0, "game_over": false
        }));

        assert_eq!(session.state(), SessionState::Joining);
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::error(
                ErrorKind::Malformed,
                "Unexpected moved message while joining"
            )]
        );
    }

    #[test]
    fn test_leave_game() {
        let mut session = make_session();
        assert!(matches!(
            session.leave_game(),
            Err(SessionError::InvalidState { .. })
        ));

        session.join("Alice").unwrap();
        session.leave_game().unwrap();
        assert_eq!(session.state(), SessionState::Joining);

        let mut session = joined_as(Player::O);
        session.leave_game().unwrap();
        assert_eq!(session.channel().sent(), &[json!({"command": "leave"})]);
        // Still active until the server confirms.
        assert_eq!(session.state(), SessionState::Active);

        session.handle_message(&endgame(EndState::Abandoned, 0));
        assert_eq!(session.leave_game(), Err(SessionError::SessionClosed));
    }

    #[test]
    fn test_detach_from_every_live_state() {
        let idle = make_session();
        let mut joining = make_session();
        joining.join("Alice").unwrap();
        let active = joined_as(Player::X);

        for mut session in [idle, joining, active] {
            session.sink_mut().clear();
            session.on_detached();

            assert_eq!(session.state(), SessionState::Ended);
            assert_eq!(
                session.sink(),
                &vec![SessionEvent::error(ErrorKind::Detached, DETACHED_MESSAGE)]
            );
            assert_eq!(session.make_move(0, 0), Err(SessionError::SessionClosed));
        }
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut session = joined_as(Player::X);
        session.on_detached();
        session.on_detached();
        assert_eq!(session.sink().len(), 1);

        // Nothing is reported after the end.
        session.handle_message(&json!({"event": "error", "message": "late"}));
        session.on_channel_error("late");
        assert_eq!(session.sink().len(), 1);
    }

    #[test]
    fn test_channel_error() {
        let mut session = joined_as(Player::X);
        session.on_attached();
        session.on_channel_error("socket hiccup");
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::error(ErrorKind::Channel, "socket hiccup")]
        );
    }

    #[test]
    fn test_join_timeout() {
        let config = SessionConfig::new().with_join_timeout(Duration::from_secs(10));
        let mut session = GameSession::with_config(RecordingChannel::new(), Vec::new(), config);
        session.join("Alice").unwrap();

        let start = Instant::now();
        assert!(!session.check_join_timeout_at(start));
        assert_eq!(session.state(), SessionState::Joining);

        assert!(session.check_join_timeout_at(start + Duration::from_secs(11)));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(
            session.sink(),
            &vec![SessionEvent::JoinFailed {
                reason: JOIN_TIMEOUT_MESSAGE.to_string()
            }]
        );

        // A late confirmation is no longer expected.
        session.handle_message(&json!({"event": "joined", "player": "X", "opponent": "Bob"}));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_join_timeout_disabled_by_default() {
        let mut session = make_session();
        session.join("Alice").unwrap();
        assert!(!session.check_join_timeout_at(Instant::now() + Duration::from_secs(3600)));
        assert_eq!(session.state(), SessionState::Joining);
    }

    #[test]
    fn test_name_is_normalized() {
        let config = SessionConfig::new().with_max_name_len(3);
        let mut session = GameSession::with_config(RecordingChannel::new(), Vec::new(), config);
        session.join("  Alice ").unwrap();
        assert_eq!(session.channel().sent()[0]["name"], json!("Ali"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut session = make_session();
        assert_eq!(session.join("   "), Err(SessionError::EmptyName));
        assert_eq!(session.join(""), Err(SessionError::EmptyName));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.channel().sent().is_empty());
        assert!(session.sink().is_empty());

        session.join(" Bo ").unwrap();
        assert_eq!(session.channel().sent()[0]["name"], json!("Bo"));
    }

    #[test]
    fn test_error_display() {
        let err = SessionError::InvalidState {
            operation: "make a move",
            state: SessionState::Joining,
        };
        assert_eq!(err.to_string(), "Cannot make a move while joining");
        assert_eq!(SessionError::SessionClosed.to_string(), "Session has ended");
    }
}
