//! Consumer-side board tracking.
//!
//! [`BoardController`] is what a rendering layer keeps next to its view: the
//! board, whose turn it is and how the game ended. It is fed the events a
//! [`GameSession`](super::session::GameSession) emits and has no link back
//! to the session.

use tracing::{debug, warn};

use super::board::{Board, Mark};
use super::event::{EventSink, SessionEvent};
use super::protocol::{GameResult, Player};
use super::win::{detect_win, WinDescriptor};

/// Board and turn state for one device's view of a match.
#[derive(Debug, Clone, Default)]
pub struct BoardController {
    board: Board,
    player: Option<Player>,
    opponent: Option<String>,
    /// Player expected to move next; `None` once no more moves are possible
    to_move: Option<Player>,
    result: Option<GameResult>,
    winning_line: WinDescriptor,
    /// Events seen, for views that replay the log
    history: Vec<SessionEvent>,
}

impl BoardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Option<Player> {
        self.player
    }

    pub fn opponent(&self) -> Option<&str> {
        self.opponent.as_deref()
    }

    /// Player expected to move next.
    pub fn to_move(&self) -> Option<Player> {
        self.to_move
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Line reported by the server at game end.
    pub fn winning_line(&self) -> WinDescriptor {
        self.winning_line
    }

    /// Line found on the local board.
    pub fn local_win_line(&self) -> WinDescriptor {
        detect_win(&self.board)
    }

    pub fn history(&self) -> &[SessionEvent] {
        &self.history
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Whether this device may move now.
    pub fn is_players_turn(&self) -> bool {
        self.player.is_some() && self.to_move == self.player
    }

    /// Whether a tap on this square should become a move request.
    pub fn can_play_at(&self, row: usize, column: usize) -> bool {
        self.is_players_turn() && self.board.is_empty_at(row, column)
    }

    /// Forget everything, e.g. before a rematch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Update from one session event.
    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::JoinedAsPlayer { player, opponent } => {
                self.board.clear();
                self.player = Some(*player);
                self.opponent = Some(opponent.clone());
                self.to_move = Some(Player::X);
                self.result = None;
                self.winning_line = WinDescriptor::None;
            }

            SessionEvent::MoveMade {
                player,
                row,
                column,
                is_final,
            } => {
                if let Err(err) = self.board.set_mark(*row, *column, Mark::from(*player)) {
                    warn!(error = %err, "Dropping move");
                    return;
                }
                self.to_move = if *is_final {
                    None
                } else {
                    Some(player.opponent())
                };
            }

            SessionEvent::GameEnded { result, win } => {
                self.to_move = None;
                self.result = Some(*result);
                self.winning_line = *win;
                let local = self.local_win_line();
                if local != *win {
                    debug!(?local, reported = ?win, "Local board disagrees with reported line");
                }
            }

            SessionEvent::JoinFailed { .. } | SessionEvent::Error { .. } => {}
        }
        self.history.push(event.clone());
    }
}

impl EventSink for BoardController {
    fn emit(&mut self, event: SessionEvent) {
        self.apply(&event);
    }
}
