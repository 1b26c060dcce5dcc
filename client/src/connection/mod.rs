mod backoff;
mod endpoint;
pub mod transport;

pub use backoff::Backoff;
pub use endpoint::room_endpoint;

use common::log;
use common::protocol::{ClientMessage, ROOM_EXPIRED_CLOSE_CODE};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use crate::errors::IntentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    ClosedNormal,
    ClosedExpired,
    ClosedError,
}

impl ConnectionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionState::ClosedNormal | ConnectionState::ClosedExpired)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::ClosedNormal => "closed",
            ConnectionState::ClosedExpired => "expired",
            ConnectionState::ClosedError => "closed with error",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CloseReason {
    /// Local, intentional shutdown.
    Requested,
    Remote { code: Option<u16>, reason: String },
    TransportError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Reconnect { delay: Duration },
    Expired,
    Stopped,
}

/// Write side of the live transport. Frames are queued to the socket task.
#[derive(Debug, Clone)]
pub struct TransportHandle {
    outbound: mpsc::UnboundedSender<String>,
}

impl TransportHandle {
    pub fn new(outbound: mpsc::UnboundedSender<String>) -> Self {
        Self { outbound }
    }

    fn send_text(&self, text: String) -> bool {
        self.outbound.send(text).is_ok()
    }
}

/// Lifecycle of the single logical room connection. The transport is replaced
/// on every reconnect while the manager itself lives as long as the session.
pub struct ConnectionManager {
    endpoint: Url,
    state: ConnectionState,
    backoff: Backoff,
    expired_close_code: u16,
    transport: Option<TransportHandle>,
}

impl ConnectionManager {
    pub fn new(endpoint: Url, backoff: Backoff) -> Self {
        Self {
            endpoint,
            state: ConnectionState::Disconnected,
            backoff,
            expired_close_code: ROOM_EXPIRED_CLOSE_CODE,
            transport: None,
        }
    }

    pub fn with_expired_close_code(mut self, code: u16) -> Self {
        self.expired_close_code = code;
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns the url to dial, or `None` once the session reached a terminal state.
    pub fn begin_connect(&mut self) -> Option<Url> {
        if self.state.is_terminal() {
            return None;
        }
        self.transport = None;
        self.state = ConnectionState::Connecting;
        log!("Connecting to {}", self.endpoint);
        Some(self.endpoint.clone())
    }

    /// The transport is open: reset the backoff and announce ourselves.
    pub fn on_open(&mut self, transport: TransportHandle) -> Result<(), IntentError> {
        self.state = ConnectionState::Connected;
        self.backoff.reset();
        self.transport = Some(transport);
        log!("Connected to {}", self.endpoint);
        self.send(&ClientMessage::JoinGame)
    }

    pub fn on_close(&mut self, reason: CloseReason) -> CloseOutcome {
        self.transport = None;

        match self.state {
            ConnectionState::ClosedExpired => return CloseOutcome::Expired,
            ConnectionState::ClosedNormal => return CloseOutcome::Stopped,
            _ => {}
        }

        match reason {
            CloseReason::Requested => {
                self.state = ConnectionState::ClosedNormal;
                log!("Connection closed by client");
                CloseOutcome::Stopped
            }
            CloseReason::Remote { code: Some(code), .. } if code == self.expired_close_code => {
                self.state = ConnectionState::ClosedExpired;
                log!("Room expired (close code {}), not reconnecting", code);
                CloseOutcome::Expired
            }
            other => {
                self.state = ConnectionState::ClosedError;
                let delay = self.backoff.next_delay();
                log!("Connection lost ({:?}), reconnecting in {} ms", other, delay.as_millis());
                CloseOutcome::Reconnect { delay }
            }
        }
    }

    /// Queues one frame on the live transport. Never blocks and never retries.
    pub fn send(&self, message: &ClientMessage) -> Result<(), IntentError> {
        if self.state != ConnectionState::Connected {
            return Err(IntentError::NotConnected);
        }
        let Some(transport) = &self.transport else {
            return Err(IntentError::NotConnected);
        };
        let text = message.to_json()?;
        log!("Sending {}: {}", message.kind(), text);
        if transport.send_text(text) {
            Ok(())
        } else {
            Err(IntentError::NotConnected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConnectionManager {
        let url = Url::parse("ws://localhost:8000/ws/game/ROOM1/").unwrap();
        ConnectionManager::new(url, Backoff::default())
    }

    fn open(manager: &mut ConnectionManager) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        manager.begin_connect().unwrap();
        manager.on_open(TransportHandle::new(tx)).unwrap();
        rx
    }

    fn drop_connection(manager: &mut ConnectionManager) -> CloseOutcome {
        manager.on_close(CloseReason::Remote {
            code: Some(1006),
            reason: String::new(),
        })
    }

    #[test]
    fn test_open_sends_join_first() {
        let mut manager = manager();
        let mut rx = open(&mut manager);
        assert_eq!(manager.state(), ConnectionState::Connected);
        let frame = rx.try_recv().unwrap();
        assert_eq!(frame, r#"{"type":"join_game"}"#);
    }

    #[test]
    fn test_failed_attempts_back_off_until_success() {
        let mut manager = manager();
        let mut delays = Vec::new();
        for _ in 0..3 {
            manager.begin_connect().unwrap();
            match manager.on_close(CloseReason::TransportError("refused".to_string())) {
                CloseOutcome::Reconnect { delay } => delays.push(delay.as_millis()),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(delays, vec![2000, 3000, 4500]);

        let _rx = open(&mut manager);
        assert_eq!(
            drop_connection(&mut manager),
            CloseOutcome::Reconnect { delay: Duration::from_millis(2000) }
        );
    }

    #[test]
    fn test_expiry_code_is_terminal() {
        let mut manager = manager();
        let _rx = open(&mut manager);
        let outcome = manager.on_close(CloseReason::Remote {
            code: Some(4000),
            reason: "room expired".to_string(),
        });
        assert_eq!(outcome, CloseOutcome::Expired);
        assert_eq!(manager.state(), ConnectionState::ClosedExpired);
        assert!(manager.begin_connect().is_none());
        assert_eq!(drop_connection(&mut manager), CloseOutcome::Expired);
    }

    #[test]
    fn test_local_shutdown_is_normal_close() {
        let mut manager = manager();
        let _rx = open(&mut manager);
        assert_eq!(manager.on_close(CloseReason::Requested), CloseOutcome::Stopped);
        assert_eq!(manager.state(), ConnectionState::ClosedNormal);
        assert!(manager.begin_connect().is_none());
    }

    #[test]
    fn test_send_while_disconnected_is_dropped() {
        let mut manager = manager();
        assert!(matches!(
            manager.send(&ClientMessage::ResetGame),
            Err(IntentError::NotConnected)
        ));

        let mut rx = open(&mut manager);
        rx.try_recv().unwrap();
        drop_connection(&mut manager);
        assert!(matches!(
            manager.send(&ClientMessage::ResetGame),
            Err(IntentError::NotConnected)
        ));
        assert!(rx.try_recv().is_err());
    }
}
