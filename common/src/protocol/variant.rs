use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVariant {
    TicTacToe,
    Ludo,
    RaceTrack,
}

impl GameVariant {
    pub fn label(&self) -> &'static str {
        match self {
            GameVariant::TicTacToe => "Tic Tac Toe",
            GameVariant::Ludo => "Ludo",
            GameVariant::RaceTrack => "Race Track",
        }
    }

    pub fn uses_dice(&self) -> bool {
        matches!(self, GameVariant::Ludo | GameVariant::RaceTrack)
    }
}

impl FromStr for GameVariant {
    type Err = String;

    /// Accepts both CLI spellings (`tic-tac-toe`) and room type names (`TIC_TAC_TOE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalised.as_str() {
            "tic_tac_toe" | "tictactoe" | "grid" => Ok(GameVariant::TicTacToe),
            "ludo" => Ok(GameVariant::Ludo),
            "race_track" | "racetrack" | "race" | "snakes_and_ladders" => Ok(GameVariant::RaceTrack),
            _ => Err(format!("unknown game '{}', expected tic-tac-toe, ludo or race-track", s)),
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
