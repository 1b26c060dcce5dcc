use common::board::Topology;
use common::movability::is_movable_on;
use common::protocol::{GameVariant, Phase, Seat, Snapshot, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    AwaitingRoll,
    AwaitingMove,
    AutoPass,
    Finished,
}

/// Who acts and what they are waiting to do, projected from the latest snapshot.
#[derive(Debug, Clone)]
pub struct TurnTracker {
    variant: GameVariant,
    acting: Option<Seat>,
    phase: TurnPhase,
    winner: Option<Winner>,
    winner_label: Option<String>,
    roll: Option<u8>,
}

impl TurnTracker {
    pub fn new(variant: GameVariant) -> Self {
        Self {
            variant,
            acting: None,
            phase: TurnPhase::default(),
            winner: None,
            winner_label: None,
            roll: None,
        }
    }

    pub fn observe(&mut self, snapshot: &Snapshot) {
        self.acting = snapshot.turn.filter(|seat| !seat.is_observer());
        self.winner = snapshot.winner;
        self.winner_label = snapshot.winner_label();
        self.roll = snapshot.roll();
        self.phase = if snapshot.is_finished() {
            TurnPhase::Finished
        } else {
            match snapshot.phase {
                Some(Phase::AwaitingRoll) => TurnPhase::AwaitingRoll,
                Some(Phase::AwaitingMove) => TurnPhase::AwaitingMove,
                Some(Phase::AutoPass) => TurnPhase::AutoPass,
                Some(Phase::Finished) => TurnPhase::Finished,
                Some(Phase::Other) | None => self.implied_phase(),
            }
        };
    }

    /// Servers that send no phase: placing a mark is the move in the grid game,
    /// dice games start every turn with a roll.
    fn implied_phase(&self) -> TurnPhase {
        match self.variant {
            GameVariant::TicTacToe => TurnPhase::AwaitingMove,
            GameVariant::Ludo | GameVariant::RaceTrack => TurnPhase::AwaitingRoll,
        }
    }

    pub fn acting_seat(&self) -> Option<Seat> {
        self.acting
    }

    #[cfg(test)]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn roll(&self) -> Option<u8> {
        self.roll
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::Finished
    }

    pub fn is_local_turn(&self, local: Option<Seat>) -> bool {
        match (local, self.acting) {
            (Some(local), Some(acting)) => !local.is_observer() && local == acting && !self.is_finished(),
            _ => false,
        }
    }

    pub fn can_roll(&self, local: Option<Seat>) -> bool {
        self.variant.uses_dice() && self.phase == TurnPhase::AwaitingRoll && self.is_local_turn(local)
    }

    pub fn can_place(&self, local: Option<Seat>) -> bool {
        self.variant == GameVariant::TicTacToe && self.phase == TurnPhase::AwaitingMove && self.is_local_turn(local)
    }

    /// Advisory only; the server re-checks every move.
    pub fn piece_interactive(&self, owner: Seat, position: i32, local: Option<Seat>, topology: Topology) -> bool {
        if Some(owner) != local || !self.is_local_turn(local) || self.phase != TurnPhase::AwaitingMove {
            return false;
        }
        self.roll.is_some_and(|roll| is_movable_on(topology, position, roll))
    }

    pub fn status_text(&self, local: Option<Seat>) -> String {
        if self.is_finished() {
            return match (self.winner, &self.winner_label) {
                (Some(Winner::Draw), _) => "Game Over! It's a Draw!".to_string(),
                (_, Some(label)) => format!("Game Over! Winner: {}", label),
                _ => "Game Over!".to_string(),
            };
        }

        let Some(acting) = self.acting else {
            return "Waiting for players...".to_string();
        };

        if !self.is_local_turn(local) {
            return format!("Turn: {}", acting);
        }
        match (self.variant, self.phase) {
            (GameVariant::TicTacToe, _) => format!("Turn: {} (you)", acting),
            (_, TurnPhase::AwaitingRoll) => format!("Turn: {} (you), roll the dice", acting),
            (_, TurnPhase::AwaitingMove) => format!("Turn: {} (you), move a piece", acting),
            (_, TurnPhase::AutoPass) => format!("Turn: {} (you), no legal move", acting),
            (_, TurnPhase::Finished) => format!("Turn: {}", acting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(json: &str) -> Snapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_explicit_phase_is_used() {
        let mut tracker = TurnTracker::new(GameVariant::Ludo);
        tracker.observe(&snapshot(r#"{"turn": "RED", "phase": "awaiting move", "last_roll": 6}"#));
        assert_eq!(tracker.phase(), TurnPhase::AwaitingMove);
        assert_eq!(tracker.acting_seat(), Some(Seat::Red));
        assert_eq!(tracker.roll(), Some(6));
        assert!(tracker.is_local_turn(Some(Seat::Red)));
        assert!(!tracker.is_local_turn(Some(Seat::Blue)));
        assert!(!tracker.can_roll(Some(Seat::Red)));
    }

    #[test]
    fn test_missing_phase_depends_on_variant() {
        let mut dice = TurnTracker::new(GameVariant::Ludo);
        dice.observe(&snapshot(r#"{"turn": "GREEN", "dice_value": 0}"#));
        assert_eq!(dice.phase(), TurnPhase::AwaitingRoll);
        assert!(dice.can_roll(Some(Seat::Green)));

        let mut grid = TurnTracker::new(GameVariant::TicTacToe);
        grid.observe(&snapshot(r#"{"turn": "X", "board": [null,null,null,null,null,null,null,null,null]}"#));
        assert_eq!(grid.phase(), TurnPhase::AwaitingMove);
        assert!(grid.can_place(Some(Seat::X)));
        assert!(!grid.can_place(Some(Seat::O)));
        assert!(!grid.can_roll(Some(Seat::X)));
    }

    #[test]
    fn test_winner_finishes_the_game() {
        let mut tracker = TurnTracker::new(GameVariant::Ludo);
        tracker.observe(&snapshot(r#"{"turn": "RED", "phase": "awaiting roll", "winner": "RED", "winner_name": "Ann"}"#));
        assert!(tracker.is_finished());
        assert!(!tracker.is_local_turn(Some(Seat::Red)));
        assert!(!tracker.can_roll(Some(Seat::Red)));
        assert_eq!(tracker.status_text(Some(Seat::Red)), "Game Over! Winner: Ann");
    }

    #[test]
    fn test_status_text() {
        let mut tracker = TurnTracker::new(GameVariant::TicTacToe);
        tracker.observe(&snapshot(r#"{"turn": "O"}"#));
        assert_eq!(tracker.status_text(Some(Seat::X)), "Turn: O");
        assert_eq!(tracker.status_text(Some(Seat::O)), "Turn: O (you)");

        tracker.observe(&snapshot(r#"{"turn": "O", "winner": "Draw"}"#));
        assert_eq!(tracker.status_text(Some(Seat::O)), "Game Over! It's a Draw!");

        tracker.observe(&snapshot(r#"{"players": {}}"#));
        assert_eq!(tracker.status_text(None), "Waiting for players...");
    }

    #[test]
    fn test_observer_never_acts() {
        let mut tracker = TurnTracker::new(GameVariant::Ludo);
        tracker.observe(&snapshot(r#"{"turn": "SPECTATOR", "phase": "awaiting roll"}"#));
        assert_eq!(tracker.acting_seat(), None);
        assert!(!tracker.can_roll(Some(Seat::Observer)));
    }
}
