//! Realtime tuning configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Realtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Capacity of each connection's outbound queue. A connection whose
    /// queue is full misses broadcasts instead of stalling the dispatcher.
    #[serde(default = "default_send_buffer")]
    pub send_buffer: usize,

    /// When true, a sender whose frame was dropped receives an error frame
    /// on its own connection. Off by default: the wire contract treats bad
    /// frames as silently dropped.
    #[serde(default)]
    pub nack_on_error: bool,
}

impl RealtimeConfig {
    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.send_buffer == 0 {
            return Err(ValidationError::InvalidSendBuffer);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            send_buffer: default_send_buffer(),
            nack_on_error: false,
        }
    }
}

fn default_send_buffer() -> usize {
    64
}
