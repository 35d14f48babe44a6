//! Thread-safe session handle.
//!
//! A UI thread issues requests while a channel thread delivers messages.
//! [`SharedSession`] puts one mutex around the session so each call runs to
//! completion before the next one sees the state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::channel::MessageChannel;
use super::event::EventSink;
use super::protocol::Player;
use super::session::{GameSession, SessionError, SessionState};

/// Cloneable handle to a session shared between threads.
pub struct SharedSession<C, E> {
    inner: Arc<Mutex<GameSession<C, E>>>,
}

impl<C, E> Clone for SharedSession<C, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: MessageChannel, E: EventSink> SharedSession<C, E> {
    pub fn new(session: GameSession<C, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session. A panic in another holder leaves the state it last
    /// assigned, so the poison flag is ignored.
    pub fn lock(&self) -> MutexGuard<'_, GameSession<C, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    pub fn player(&self) -> Option<Player> {
        self.lock().player()
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.lock().ended_at()
    }

    pub fn join(&self, display_name: &str) -> Result<(), SessionError> {
        self.lock().join(display_name)
    }

    pub fn make_move(&self, row: usize, column: usize) -> Result<(), SessionError> {
        self.lock().make_move(row, column)
    }

    pub fn leave_game(&self) -> Result<(), SessionError> {
        self.lock().leave_game()
    }

    pub fn handle_message(&self, message: &serde_json::Value) {
        self.lock().handle_message(message);
    }

    pub fn handle_text(&self, text: &str) {
        self.lock().handle_text(text);
    }

    pub fn on_detached(&self) {
        self.lock().on_detached();
    }

    pub fn on_channel_error(&self, message: &str) {
        self.lock().on_channel_error(message);
    }

    pub fn check_join_timeout(&self) -> bool {
        self.lock().check_join_timeout()
    }
}
