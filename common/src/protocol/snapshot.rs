use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::{GameVariant, ProtocolError, Seat, Winner};
use crate::board::track::MAX_TRACK_LENGTH;
use crate::board::{PIECES_PER_PLAYER, Topology};
use crate::movability::MAX_ROLL;

pub const GRID_GAME_CELLS: usize = 9;

/// Turn sub-phase as sent by the server. Spellings vary between server versions, so
/// the wire string is normalised before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    AwaitingRoll,
    AwaitingMove,
    AutoPass,
    Finished,
    Other,
}

impl From<String> for Phase {
    fn from(raw: String) -> Self {
        let normalised = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalised.as_str() {
            "awaiting_roll" | "roll" => Phase::AwaitingRoll,
            "awaiting_move" | "move" => Phase::AwaitingMove,
            "auto_pass" | "autopass" | "pass" => Phase::AutoPass,
            "finished" | "game_over" => Phase::Finished,
            _ => Phase::Other,
        }
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::AwaitingRoll => "awaiting_roll",
            Phase::AwaitingMove => "awaiting_move",
            Phase::AutoPass => "auto_pass",
            Phase::Finished => "finished",
            Phase::Other => "other",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub side: Option<Seat>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: u32,
    #[serde(default, alias = "finished_count", deserialize_with = "null_as_default")]
    pub finished: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pieces: Vec<i32>,
    #[serde(default)]
    pub position: Option<u32>,
}

impl Player {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Unknown Player",
        }
    }

    /// Race-track progress; older servers only report it through `score`.
    pub fn track_position(&self) -> u32 {
        self.position.unwrap_or(self.score)
    }
}

/// One complete, self-contained state broadcast. Carries no delta information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: BTreeMap<String, Player>,
    #[serde(default, deserialize_with = "grid_board")]
    pub board: Option<Vec<Option<Seat>>>,
    #[serde(default)]
    pub turn: Option<Seat>,
    #[serde(default)]
    pub phase: Option<Phase>,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub winner_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub game_over: bool,
    #[serde(default, alias = "dice_value")]
    pub last_roll: Option<u8>,
    #[serde(default, alias = "seats")]
    pub max_players: Option<u8>,
    #[serde(default)]
    pub track_length: Option<u32>,
}

impl Snapshot {
    /// Players keyed by their side; a player without a `side` field is keyed by its map key.
    pub fn seated_players(&self) -> impl Iterator<Item = (Seat, &Player)> {
        self.players
            .iter()
            .map(|(key, player)| (player.side.unwrap_or_else(|| Seat::parse(key)), player))
    }

    pub fn player_for(&self, seat: Seat) -> Option<&Player> {
        self.seated_players()
            .find(|(player_seat, _)| *player_seat == seat)
            .map(|(_, player)| player)
    }

    /// `dice_value: 0` is how the server says "not rolled yet".
    pub fn roll(&self) -> Option<u8> {
        self.last_roll.filter(|value| (1..=MAX_ROLL).contains(value))
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.game_over
    }

    pub fn winner_label(&self) -> Option<String> {
        match self.winner? {
            Winner::Draw => Some("Draw".to_string()),
            Winner::Seat(seat) => Some(
                self.winner_name
                    .clone()
                    .or_else(|| self.player_for(seat).map(|p| p.display_name().to_string()))
                    .unwrap_or_else(|| seat.to_string()),
            ),
        }
    }

    pub fn topology(&self) -> Topology {
        let wide_table = self.max_players.is_some_and(|count| count > 4);
        let star_seat = self.seated_players().any(|(seat, _)| seat.is_star_only());
        if wide_table || star_seat { Topology::Star8 } else { Topology::Cross4 }
    }

    /// Structural checks the renderer relies on. Rule legality is not checked here.
    pub fn validate(&self, variant: GameVariant) -> Result<(), ProtocolError> {
        if let Some(roll) = self.last_roll
            && roll > MAX_ROLL
        {
            return Err(ProtocolError::MalformedSnapshot(format!("roll value {} out of range", roll)));
        }

        match variant {
            GameVariant::TicTacToe => {
                if let Some(board) = &self.board
                    && board.len() != GRID_GAME_CELLS
                {
                    return Err(ProtocolError::MalformedSnapshot(format!(
                        "grid board has {} cells, expected {}",
                        board.len(),
                        GRID_GAME_CELLS
                    )));
                }
            }
            GameVariant::Ludo => {
                for (seat, player) in self.seated_players() {
                    if seat.is_observer() || player.pieces.is_empty() {
                        continue;
                    }
                    if player.pieces.len() != PIECES_PER_PLAYER {
                        return Err(ProtocolError::MalformedSnapshot(format!(
                            "{} has {} pieces, expected {}",
                            seat,
                            player.pieces.len(),
                            PIECES_PER_PLAYER
                        )));
                    }
                }
            }
            GameVariant::RaceTrack => {
                match self.track_length {
                    Some(0) => {
                        return Err(ProtocolError::MalformedSnapshot("track length is zero".to_string()));
                    }
                    Some(length) if length > MAX_TRACK_LENGTH => {
                        return Err(ProtocolError::MalformedSnapshot(format!(
                            "track length {} exceeds {}",
                            length, MAX_TRACK_LENGTH
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The racing game reuses the `board` key for an object; only a list is a grid board.
fn grid_board<'de, D>(deserializer: D) -> Result<Option<Vec<Option<Seat>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
