mod messages;
mod seat;
mod snapshot;
mod variant;

pub use messages::{ClientMessage, ServerMessage};
pub use seat::{Seat, Winner};
pub use snapshot::{GRID_GAME_CELLS, Phase, Player, Snapshot};
pub use variant::GameVariant;

/// Application close code the server uses when the room's validity window has elapsed.
pub const ROOM_EXPIRED_CLOSE_CODE: u16 = 4000;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message has no 'type' discriminant")]
    MissingType,
    #[error("malformed '{kind}' payload: {reason}")]
    MalformedPayload { kind: String, reason: String },
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl ProtocolError {
    /// Snapshot problems are shown on the board; everything else is only logged.
    pub fn affects_snapshot(&self) -> bool {
        match self {
            ProtocolError::MalformedSnapshot(_) => true,
            ProtocolError::MalformedPayload { kind, .. } => ServerMessage::carries_snapshot(kind),
            _ => false,
        }
    }
}
