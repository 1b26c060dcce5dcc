use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Lucky", "Bold", "Sneaky", "Rolling", "Patient", "Daring", "Crafty", "Steady",
    "Jolly", "Swift", "Quiet", "Clever",
];

const NOUNS: &[&str] = &[
    "Pawn", "Dice", "Knight", "Token", "Rook", "Meeple", "Runner", "Marker",
    "Racer", "Counter",
];

/// Display name used when neither the CLI nor the config provide one.
pub fn generate_player_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{} {}", adjective, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_name_has_two_words() {
        let name = generate_player_name();
        let parts: Vec<&str> = name.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));
    }
}
