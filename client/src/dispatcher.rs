use common::protocol::{GameVariant, ProtocolError, Seat, ServerMessage, Snapshot};
use common::{log, log_warn};

/// Routing decision for one inbound frame.
#[derive(Debug)]
pub enum Dispatch {
    Snapshot {
        snapshot: Snapshot,
        assigned_seat: Option<Seat>,
    },
    Chat {
        sender: String,
        message: String,
        is_sticker: bool,
    },
    ServerError(String),
    Ignored,
    Rejected(ProtocolError),
}

pub struct SnapshotDispatcher {
    variant: GameVariant,
}

impl SnapshotDispatcher {
    pub fn new(variant: GameVariant) -> Self {
        Self { variant }
    }

    pub fn dispatch(&self, raw: &str) -> Dispatch {
        let message = match ServerMessage::parse(raw) {
            Ok(message) => message,
            Err(e) => {
                log_warn!("Dropping inbound frame: {}", e);
                return Dispatch::Rejected(e);
            }
        };

        match message {
            ServerMessage::GameStart { side, game_state } => self.snapshot(game_state, Some(side)),
            ServerMessage::GameUpdate { game_state } => self.snapshot(game_state, None),
            ServerMessage::ChatMessage {
                message,
                sender,
                is_sticker,
            } => Dispatch::Chat {
                sender,
                message,
                is_sticker,
            },
            ServerMessage::Error { message } => {
                log_warn!("Server error: {}", message);
                Dispatch::ServerError(message)
            }
            ServerMessage::Unknown => {
                log!("Ignoring message with unknown type");
                Dispatch::Ignored
            }
        }
    }

    fn snapshot(&self, snapshot: Snapshot, assigned_seat: Option<Seat>) -> Dispatch {
        match snapshot.validate(self.variant) {
            Ok(()) => Dispatch::Snapshot {
                snapshot,
                assigned_seat,
            },
            Err(e) => {
                log_warn!("Dropping snapshot: {}", e);
                Dispatch::Rejected(e)
            }
        }
    }
}
