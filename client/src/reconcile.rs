//! Diffs each incoming snapshot against the entities already on screen.
//!
//! Entities are addressed by a stable key (a seat's piece, a grid cell, a race
//! token). A key that survives from one snapshot to the next keeps its
//! [`InstanceId`], so the presentation layer can animate it instead of
//! replacing it.

use common::board::{GridCoord, PIECES_PER_PLAYER, Topology, map_to_grid, track::{DEFAULT_TRACK_LENGTH, track_to_grid}};
use common::log_warn;
use common::protocol::{GRID_GAME_CELLS, GameVariant, Seat, Snapshot};
use std::collections::BTreeMap;

use crate::tracker::TurnTracker;

const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKey {
    Piece { seat: Seat, index: u8 },
    Cell { row: u8, col: u8 },
    Token { seat: Seat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewEntity {
    pub key: EntityKey,
    pub instance: InstanceId,
    pub owner: Seat,
    pub coord: GridCoord,
    /// Raw track value (piece position, race square or grid index).
    pub position: i32,
    pub interactive: bool,
}

impl ViewEntity {
    fn apply(&mut self, required: &RequiredEntity) -> bool {
        let changed = self.owner != required.owner
            || self.coord != required.coord
            || self.position != required.position
            || self.interactive != required.interactive;
        self.owner = required.owner;
        self.coord = required.coord;
        self.position = required.position;
        self.interactive = required.interactive;
        changed
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RequiredEntity {
    key: EntityKey,
    owner: Seat,
    coord: GridCoord,
    position: i32,
    interactive: bool,
}

/// Inputs beyond the snapshot that decide coordinates and interactivity.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileContext<'a> {
    pub variant: GameVariant,
    pub topology: Topology,
    pub local_seat: Option<Seat>,
    pub tracker: &'a TurnTracker,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub created: Vec<EntityKey>,
    pub updated: Vec<EntityKey>,
    pub removed: Vec<EntityKey>,
    pub unchanged: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    entities: BTreeMap<EntityKey, ViewEntity>,
    next_instance: u64,
}

impl EntitySet {
    #[cfg(test)]
    pub fn get(&self, key: &EntityKey) -> Option<&ViewEntity> {
        self.entities.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewEntity> {
        self.entities.values()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn allocate(&mut self) -> InstanceId {
        self.next_instance += 1;
        InstanceId(self.next_instance)
    }
}

/// Consumes the previous set and returns the next one: matching keys are moved
/// across and updated in place, new keys are created, the rest are dropped.
pub fn reconcile(mut previous: EntitySet, snapshot: &Snapshot, context: &ReconcileContext) -> (EntitySet, ReconcileReport) {
    let mut next = EntitySet {
        entities: BTreeMap::new(),
        next_instance: previous.next_instance,
    };
    let mut report = ReconcileReport::default();

    for required in required_entities(snapshot, context) {
        if next.entities.contains_key(&required.key) {
            log_warn!("Duplicate entity {:?} in snapshot, keeping the first", required.key);
            continue;
        }
        let entity = match previous.entities.remove(&required.key) {
            Some(mut entity) => {
                if entity.apply(&required) {
                    report.updated.push(required.key);
                } else {
                    report.unchanged += 1;
                }
                entity
            }
            None => {
                report.created.push(required.key);
                ViewEntity {
                    key: required.key,
                    instance: next.allocate(),
                    owner: required.owner,
                    coord: required.coord,
                    position: required.position,
                    interactive: required.interactive,
                }
            }
        };
        next.entities.insert(required.key, entity);
    }

    report.removed = previous.entities.into_keys().collect();
    (next, report)
}

fn required_entities(snapshot: &Snapshot, context: &ReconcileContext) -> Vec<RequiredEntity> {
    match context.variant {
        GameVariant::TicTacToe => grid_entities(snapshot),
        GameVariant::Ludo => piece_entities(snapshot, context),
        GameVariant::RaceTrack => token_entities(snapshot),
    }
}

fn grid_entities(snapshot: &Snapshot) -> Vec<RequiredEntity> {
    let Some(board) = &snapshot.board else {
        return Vec::new();
    };
    board
        .iter()
        .take(GRID_GAME_CELLS)
        .enumerate()
        .filter_map(|(index, mark)| {
            let owner = mark.filter(|seat| !seat.is_observer())?;
            let row = (index / GRID_COLUMNS) as u8;
            let col = (index % GRID_COLUMNS) as u8;
            Some(RequiredEntity {
                key: EntityKey::Cell { row, col },
                owner,
                coord: GridCoord::new(row, col),
                position: index as i32,
                interactive: false,
            })
        })
        .collect()
}

fn piece_entities(snapshot: &Snapshot, context: &ReconcileContext) -> Vec<RequiredEntity> {
    let mut required = Vec::new();
    for (seat, player) in snapshot.seated_players() {
        if seat.is_observer() {
            continue;
        }
        if context.topology.seat_index(seat).is_none() {
            log_warn!("Seat {} has no place on the {:?} board", seat, context.topology);
            continue;
        }
        for (index, &position) in player.pieces.iter().take(PIECES_PER_PLAYER).enumerate() {
            let coord = map_to_grid(position, seat, index, context.topology).unwrap_or_else(|| context.topology.center());
            required.push(RequiredEntity {
                key: EntityKey::Piece {
                    seat,
                    index: index as u8,
                },
                owner: seat,
                coord,
                position,
                interactive: context
                    .tracker
                    .piece_interactive(seat, position, context.local_seat, context.topology),
            });
        }
    }
    required
}

fn token_entities(snapshot: &Snapshot) -> Vec<RequiredEntity> {
    let length = snapshot.track_length.unwrap_or(DEFAULT_TRACK_LENGTH);
    snapshot
        .seated_players()
        .filter(|(seat, _)| !seat.is_observer())
        .map(|(seat, player)| {
            let position = player.track_position();
            RequiredEntity {
                key: EntityKey::Token { seat },
                owner: seat,
                coord: track_to_grid(position, length),
                position: position as i32,
                interactive: false,
            }
        })
        .collect()
}

/// Owns the rendered entity set between snapshots.
#[derive(Debug, Default)]
pub struct ReconciliationEngine {
    entities: EntitySet,
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(&self) -> &EntitySet {
        &self.entities
    }

    pub fn apply(&mut self, snapshot: &Snapshot, context: &ReconcileContext) -> ReconcileReport {
        let previous = std::mem::take(&mut self.entities);
        let (next, report) = reconcile(previous, snapshot, context);
        self.entities = next;
        report
    }
}
