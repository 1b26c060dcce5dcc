use std::fmt;
use std::str::FromStr;

pub const ROOM_CODE_MIN_LEN: usize = 4;
pub const ROOM_CODE_MAX_LEN: usize = 8;

/// Room code as embedded in the room page; always stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let code = raw.trim().to_ascii_uppercase();
        if code.len() < ROOM_CODE_MIN_LEN || code.len() > ROOM_CODE_MAX_LEN {
            return Err(format!(
                "room code must be {}-{} characters, got '{}'",
                ROOM_CODE_MIN_LEN, ROOM_CODE_MAX_LEN, raw
            ));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!("room code must be alphanumeric, got '{}'", raw));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_code_is_upper_cased() {
        let code = RoomCode::parse(" ab12cd ").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn test_room_code_rejects_bad_input() {
        assert!(RoomCode::parse("abc").is_err());
        assert!(RoomCode::parse("ABCDEFGHI").is_err());
        assert!(RoomCode::parse("AB-12C").is_err());
    }
}
