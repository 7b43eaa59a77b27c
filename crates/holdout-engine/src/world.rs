//! The world state: every mutable list the simulation owns, in one
//! struct, owned by the tick cycle.
//!
//! Nothing captures these lists in closures or shares them behind locks;
//! the clock owns the state between ticks, components borrow it for the
//! duration of a call, and the only concurrent phase (oracle fan-out)
//! borrows it immutably.

use holdout_agents::Roster;
use holdout_types::{Hostile, HostileId, Position, ProposalId};
use holdout_world::{LocationSet, MapBounds};

use crate::clock::WorldClock;

/// The complete mutable simulation state.
#[derive(Debug)]
pub struct WorldState {
    /// The world clock.
    pub clock: WorldClock,
    /// All living agents, in application order.
    pub roster: Roster,
    /// All named locations.
    pub locations: LocationSet,
    /// All live hostiles. Defeated entries are filtered at end of tick.
    pub hostiles: Vec<Hostile>,
    /// The rectangular playfield.
    pub bounds: MapBounds,
    /// The active oracle provider selector (persisted in snapshots).
    pub provider: String,
    /// Next hostile id to issue.
    next_hostile_id: HostileId,
    /// Next proposal id to issue.
    next_proposal_id: ProposalId,
    /// Ticks since the last hostile spawn.
    pub spawn_counter: u64,
    /// Spawn when `spawn_counter` reaches this; re-rolled after each spawn.
    pub next_spawn_at: u64,
}

impl WorldState {
    /// Create a world with no agents or hostiles.
    pub fn new(clock: WorldClock, locations: LocationSet, bounds: MapBounds) -> Self {
        Self {
            clock,
            roster: Roster::new(),
            locations,
            hostiles: Vec::new(),
            bounds,
            provider: String::new(),
            next_hostile_id: HostileId::new(1),
            next_proposal_id: ProposalId::new(1),
            spawn_counter: 0,
            next_spawn_at: 10,
        }
    }

    /// Issue the next proposal id.
    pub const fn issue_proposal_id(&mut self) -> ProposalId {
        let id = self.next_proposal_id;
        self.next_proposal_id = self.next_proposal_id.next();
        id
    }

    /// Issue the next hostile id.
    pub const fn issue_hostile_id(&mut self) -> HostileId {
        let id = self.next_hostile_id;
        self.next_hostile_id = self.next_hostile_id.next();
        id
    }

    /// Advance the hostile id counter past an adopted id (snapshot
    /// restore).
    pub const fn adopt_hostile_id(&mut self, id: HostileId) {
        if id.into_inner() >= self.next_hostile_id.into_inner() {
            self.next_hostile_id = id.next();
        }
    }

    /// Look up a hostile by id.
    pub fn hostile(&self, id: HostileId) -> Option<&Hostile> {
        self.hostiles.iter().find(|h| h.id == id)
    }

    /// Look up a hostile mutably by id.
    pub fn hostile_mut(&mut self, id: HostileId) -> Option<&mut Hostile> {
        self.hostiles.iter_mut().find(|h| h.id == id)
    }

    /// The live hostile nearest to a position.
    pub fn nearest_live_hostile(&self, position: Position) -> Option<&Hostile> {
        self.hostiles
            .iter()
            .filter(|h| !h.is_defeated())
            .min_by(|a, b| {
                let da = position.distance_to(a.position);
                let db = position.distance_to(b.position);
                da.partial_cmp(&db).unwrap_or(core::cmp::Ordering::Equal)
            })
    }

    /// The base location's remaining health, if a base exists.
    pub fn base_health(&self) -> Option<f64> {
        self.locations.base().and_then(|b| b.health)
    }
}
