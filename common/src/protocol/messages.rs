use serde::{Deserialize, Serialize};

use super::{ProtocolError, Seat, Snapshot};

/// Intents sent to the server. Every frame is a JSON object tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinGame,
    RollDice {
        player: Seat,
    },
    MakeMove {
        index: u32,
        player: Seat,
    },
    ChatMessage {
        message: String,
        sender: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_sticker: Option<bool>,
    },
    ResetGame,
}

impl ClientMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::JoinGame => "join_game",
            ClientMessage::RollDice { .. } => "roll_dice",
            ClientMessage::MakeMove { .. } => "make_move",
            ClientMessage::ChatMessage { .. } => "chat_message",
            ClientMessage::ResetGame => "reset_game",
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameStart {
        side: Seat,
        game_state: Snapshot,
    },
    GameUpdate {
        game_state: Snapshot,
    },
    ChatMessage {
        message: String,
        #[serde(default)]
        sender: String,
        #[serde(default)]
        is_sticker: bool,
    },
    Error {
        message: String,
    },
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    pub fn carries_snapshot(kind: &str) -> bool {
        matches!(kind, "game_start" | "game_update")
    }

    /// Parses one text frame. The discriminant is read first so a broken payload can
    /// be reported against the message kind it claimed to be.
    pub fn parse(raw: &str) -> Result<ServerMessage, ProtocolError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or(ProtocolError::MissingType)?
            .to_string();

        serde_json::from_value(value).map_err(|e| ProtocolError::MalformedPayload {
            kind,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_frames_match_wire_names() {
        let join = ClientMessage::JoinGame.to_json().unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(&join).unwrap(), json!({"type": "join_game"}));

        let mv = ClientMessage::MakeMove { index: 4, player: Seat::X }.to_json().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&mv).unwrap(),
            json!({"type": "make_move", "index": 4, "player": "X"})
        );

        let roll = ClientMessage::RollDice { player: Seat::Green }.to_json().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&roll).unwrap(),
            json!({"type": "roll_dice", "player": "GREEN"})
        );
    }

    #[test]
    fn test_chat_omits_sticker_flag_when_unset() {
        let chat = ClientMessage::ChatMessage {
            message: "gg".to_string(),
            sender: "Ann".to_string(),
            is_sticker: None,
        };
        let value: serde_json::Value = serde_json::from_str(&chat.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"type": "chat_message", "message": "gg", "sender": "Ann"}));
    }

    #[test]
    fn test_parse_game_start() {
        let raw = r#"{"type": "game_start", "side": "RED", "game_state": {"players": {}, "turn": "RED"}}"#;
        match ServerMessage::parse(raw).unwrap() {
            ServerMessage::GameStart { side, game_state } => {
                assert_eq!(side, Seat::Red);
                assert_eq!(game_state.turn, Some(Seat::Red));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_discriminant_is_not_an_error() {
        let parsed = ServerMessage::parse(r#"{"type": "confetti", "amount": 3}"#).unwrap();
        assert_eq!(parsed, ServerMessage::Unknown);
    }

    #[test]
    fn test_broken_snapshot_reports_its_kind() {
        let err = ServerMessage::parse(r#"{"type": "game_update", "game_state": {"players": 5}}"#).unwrap_err();
        assert!(err.affects_snapshot());
        assert!(matches!(err, ProtocolError::MalformedPayload { ref kind, .. } if kind == "game_update"));
    }

    #[test]
    fn test_missing_type_and_invalid_json() {
        assert!(matches!(ServerMessage::parse(r#"{"message": "hi"}"#), Err(ProtocolError::MissingType)));
        assert!(matches!(ServerMessage::parse("not json"), Err(ProtocolError::Json(_))));
        assert!(!ServerMessage::parse("[1,2").unwrap_err().affects_snapshot());
    }
}
