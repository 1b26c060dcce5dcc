use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant's fixed side for one round. Unknown side names decode as
/// [`Seat::Observer`] so a newer server cannot break an older client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Seat {
    X,
    O,
    Red,
    Green,
    Yellow,
    Blue,
    Orange,
    Purple,
    Teal,
    Pink,
    Observer,
}

impl Seat {
    pub const GRID_SEATS: [Seat; 2] = [Seat::X, Seat::O];
    pub const CROSS_SEATS: [Seat; 4] = [Seat::Red, Seat::Green, Seat::Yellow, Seat::Blue];
    pub const STAR_SEATS: [Seat; 8] = [
        Seat::Red,
        Seat::Orange,
        Seat::Green,
        Seat::Teal,
        Seat::Yellow,
        Seat::Purple,
        Seat::Blue,
        Seat::Pink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Seat::X => "X",
            Seat::O => "O",
            Seat::Red => "RED",
            Seat::Green => "GREEN",
            Seat::Yellow => "YELLOW",
            Seat::Blue => "BLUE",
            Seat::Orange => "ORANGE",
            Seat::Purple => "PURPLE",
            Seat::Teal => "TEAL",
            Seat::Pink => "PINK",
            Seat::Observer => "SPECTATOR",
        }
    }

    pub fn parse(raw: &str) -> Seat {
        match raw.trim().to_ascii_uppercase().as_str() {
            "X" => Seat::X,
            "O" => Seat::O,
            "RED" => Seat::Red,
            "GREEN" => Seat::Green,
            "YELLOW" => Seat::Yellow,
            "BLUE" => Seat::Blue,
            "ORANGE" => Seat::Orange,
            "PURPLE" => Seat::Purple,
            "TEAL" | "CYAN" => Seat::Teal,
            "PINK" => Seat::Pink,
            _ => Seat::Observer,
        }
    }

    pub fn is_observer(&self) -> bool {
        matches!(self, Seat::Observer)
    }

    /// Only meaningful on the eight-seat board.
    pub fn is_star_only(&self) -> bool {
        matches!(self, Seat::Orange | Seat::Purple | Seat::Teal | Seat::Pink)
    }
}

impl From<String> for Seat {
    fn from(raw: String) -> Self {
        Seat::parse(&raw)
    }
}

impl From<Seat> for String {
    fn from(seat: Seat) -> Self {
        seat.as_str().to_string()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Winner {
    Seat(Seat),
    Draw,
}

impl From<String> for Winner {
    fn from(raw: String) -> Self {
        if raw.trim().eq_ignore_ascii_case("draw") {
            Winner::Draw
        } else {
            Winner::Seat(Seat::parse(&raw))
        }
    }
}

impl From<Winner> for String {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::Seat(seat) => seat.as_str().to_string(),
            Winner::Draw => "Draw".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_parsing_is_case_insensitive_and_lenient() {
        assert_eq!(Seat::parse("red"), Seat::Red);
        assert_eq!(Seat::parse("X"), Seat::X);
        assert_eq!(Seat::parse("SPECTATOR"), Seat::Observer);
        assert_eq!(Seat::parse("MAUVE"), Seat::Observer);
    }

    #[test]
    fn test_seat_json_uses_upper_case_names() {
        let json = serde_json::to_string(&Seat::Yellow).unwrap();
        assert_eq!(json, "\"YELLOW\"");
        let seat: Seat = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(seat, Seat::Blue);
    }

    #[test]
    fn test_winner_accepts_draw_spellings() {
        let draw: Winner = serde_json::from_str("\"DRAW\"").unwrap();
        assert_eq!(draw, Winner::Draw);
        let draw: Winner = serde_json::from_str("\"Draw\"").unwrap();
        assert_eq!(draw, Winner::Draw);
        let seat: Winner = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(seat, Winner::Seat(Seat::O));
    }
}
