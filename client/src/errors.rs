use common::protocol::ProtocolError;
use thiserror::Error;

/// Why a user intent was not sent. Every variant is surfaced as a transient
/// notice; none of them is retried or queued.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("not connected to the room")]
    NotConnected,
    #[error("the game is over")]
    GameFinished,
    #[error("it is not your turn")]
    NotLocalTurn,
    #[error("you are watching this game")]
    NoSeat,
    #[error("could not encode message: {0}")]
    Encode(#[from] ProtocolError),
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("unsupported url scheme '{0}', expected http, https, ws or wss")]
    UnsupportedScheme(String),
}
