use thiserror::Error;

/// Failures talking to the song service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Save refused locally, the store was never contacted
    #[error("the list needs at least {minimum} songs before saving (has {size})")]
    BelowMinimumSize { size: usize, minimum: usize },

    /// Search refused locally, the store was never contacted
    #[error("invalid search: {reason}")]
    InvalidSearch { reason: String },

    #[error("request failed: {message}")]
    Transport { message: String },

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode service response: {message}")]
    Decode { message: String },
}

impl SyncError {
    /// True for failures that happened on the wire (as opposed to local refusals)
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            SyncError::Transport { .. } | SyncError::Status { .. } | SyncError::Decode { .. }
        )
    }
}
