//! Message channel seam.
//!
//! The session talks to the remote game through a [`MessageChannel`]. Finding
//! the device and opening the channel happen elsewhere; by the time a session
//! is created the channel is expected to be attached.

use derive_more::Display;

/// Why a send was refused locally.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ChannelError {
    #[display("Channel is not attached")]
    NotAttached,
    #[display("Channel refused message: {reason}")]
    Refused { reason: String },
}

impl std::error::Error for ChannelError {}

/// Bidirectional message stream to the remote game.
///
/// Incoming traffic is not pulled through this trait; the owner of the
/// channel delivers each message to the session as it arrives.
pub trait MessageChannel {
    /// Whether the channel can currently accept a message.
    fn is_ready(&self) -> bool;

    /// Hand one message to the transport. Must not block on a reply.
    fn send(&mut self, message: serde_json::Value) -> Result<(), ChannelError>;
}

impl<C: MessageChannel + ?Sized> MessageChannel for Box<C> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn send(&mut self, message: serde_json::Value) -> Result<(), ChannelError> {
        (**self).send(message)
    }
}

/// In-memory channel that records everything sent through it.
///
/// Useful for driving a session without a device.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    sent: Vec<serde_json::Value>,
    detached: bool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that refuses every send.
    pub fn detached() -> Self {
        Self {
            sent: Vec::new(),
            detached: true,
        }
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.detached = !attached;
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> &[serde_json::Value] {
        &self.sent
    }

    pub fn take_sent(&mut self) -> Vec<serde_json::Value> {
        std::mem::take(&mut self.sent)
    }
}

impl MessageChannel for RecordingChannel {
    fn is_ready(&self) -> bool {
        !self.detached
    }

    fn send(&mut self, message: serde_json::Value) -> Result<(), ChannelError> {
        if self.detached {
            return Err(ChannelError::NotAttached);
        }
        self.sent.push(message);
        Ok(())
    }
}
