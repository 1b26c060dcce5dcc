//! Advisory move prediction. The server re-validates every move; this only decides
//! which pieces the client highlights.

use crate::board::{BASE_POSITION, Topology, cross};

pub const ENTRY_ROLL: u8 = 6;
pub const MAX_ROLL: u8 = 6;

/// Prediction for the four-seat board, where 57 is the finish.
pub fn is_movable(position: i32, roll: u8) -> bool {
    is_movable_within(position, roll, cross::FINISH_POSITION)
}

pub fn is_movable_on(topology: Topology, position: i32, roll: u8) -> bool {
    is_movable_within(position, roll, topology.finish_position())
}

pub fn is_movable_within(position: i32, roll: u8, finish: i32) -> bool {
    if roll == 0 || roll > MAX_ROLL {
        return false;
    }
    if position == BASE_POSITION {
        return roll == ENTRY_ROLL;
    }
    if position < 0 || position >= finish {
        return false;
    }
    position + roll as i32 <= finish
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_piece_needs_entry_roll() {
        assert!(is_movable(-1, 6));
        for roll in 1..=5 {
            assert!(!is_movable(-1, roll));
        }
    }

    #[test]
    fn test_finished_piece_never_moves() {
        for roll in 0..=6 {
            assert!(!is_movable(57, roll));
        }
    }

    #[test]
    fn test_overshoot_is_rejected() {
        assert!(!is_movable(52, 6));
        assert!(is_movable(52, 5));
        assert!(is_movable(0, 6));
        assert!(is_movable(51, 6));
    }

    #[test]
    fn test_no_roll_means_nothing_moves() {
        assert!(!is_movable(10, 0));
        assert!(!is_movable(-1, 0));
        assert!(!is_movable(10, 7));
    }

    #[test]
    fn test_star_board_uses_its_own_finish() {
        let finish = Topology::Star8.finish_position();
        assert!(is_movable_on(Topology::Star8, 60, 6));
        assert!(is_movable_on(Topology::Star8, finish - 1, 1));
        assert!(!is_movable_on(Topology::Star8, finish - 1, 2));
        assert!(!is_movable_on(Topology::Star8, finish, 1));
    }
}
