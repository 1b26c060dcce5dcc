use common::board::Topology;
use common::protocol::{GameVariant, Seat, Snapshot};
use common::{RoomCode, log, log_warn};

/// Everything the client knows about the room it joined. Outlives any single
/// transport; dropped on shutdown or expiry.
pub struct Session {
    room: RoomCode,
    variant: GameVariant,
    player_name: String,
    local_seat: Option<Seat>,
    topology: Topology,
    last_snapshot: Option<Snapshot>,
}

impl Session {
    pub fn new(room: RoomCode, variant: GameVariant, player_name: String) -> Self {
        Self {
            room,
            variant,
            player_name,
            local_seat: None,
            topology: Topology::Cross4,
            last_snapshot: None,
        }
    }

    pub fn room(&self) -> &RoomCode {
        &self.room
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn local_seat(&self) -> Option<Seat> {
        self.local_seat
    }

    /// Seat the local user plays, `None` for observers and before the first `game_start`.
    pub fn playing_seat(&self) -> Option<Seat> {
        self.local_seat.filter(|seat| !seat.is_observer())
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// The first assignment wins; later `game_start` frames (rejoins) cannot move us.
    pub fn assign_seat(&mut self, seat: Seat) {
        match self.local_seat {
            None => {
                log!("Assigned seat {} in room {}", seat, self.room);
                self.local_seat = Some(seat);
            }
            Some(current) if current != seat => {
                log_warn!("Ignoring seat {} for room {}, already seated as {}", seat, self.room, current);
            }
            Some(_) => {}
        }
    }

    pub fn accept_snapshot(&mut self, snapshot: Snapshot) {
        if self.variant == GameVariant::Ludo {
            let topology = snapshot.topology();
            if topology != self.topology {
                log!("Board topology is now {:?}", topology);
                self.topology = topology;
            }
        }
        self.last_snapshot = Some(snapshot);
    }
}
