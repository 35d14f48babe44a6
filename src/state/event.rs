//! Session events.
//!
//! Everything the session learns from the server reaches the consumer as a
//! [`SessionEvent`] pushed into an [`EventSink`].

use std::sync::mpsc;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::protocol::{GameResult, Player};
use super::win::WinDescriptor;

/// Where a reported error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Incoming message could not be decoded or arrived out of place.
    #[display("malformed")]
    Malformed,
    /// Error text sent by the server.
    #[display("server")]
    Server,
    /// Lifecycle error raised by the channel.
    #[display("channel")]
    Channel,
    /// Channel went away; the session is over.
    #[display("detached")]
    Detached,
}

/// Notification raised by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    JoinedAsPlayer {
        player: Player,
        opponent: String,
    },
    JoinFailed {
        reason: String,
    },
    MoveMade {
        player: Player,
        row: usize,
        column: usize,
        is_final: bool,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
    GameEnded {
        result: GameResult,
        win: WinDescriptor,
    },
}

impl SessionEvent {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Encode for a JSON consumer, e.g. a UI bridge.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Receiver of session events.
pub trait EventSink {
    fn emit(&mut self, event: SessionEvent);
}

impl EventSink for Vec<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

/// Forwards events to another thread. A hung-up receiver drops them.
impl EventSink for mpsc::Sender<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        if self.send(event).is_err() {
            tracing::debug!("Event receiver dropped");
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: SessionEvent) {
        (**self).emit(event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(SessionEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: SessionEvent) {
        (self.0)(event);
    }
}

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnSink")
    }
}
