//! The location store: name-keyed lookup over an insertion-ordered list,
//! plus the scavenge draw.

use holdout_types::{AgentId, Location, LocationKind, Position, ResourceSpec};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::WorldError;

/// Extension constructors for [`Location`], used by world seeding and tests.
pub trait LocationExt: Sized {
    /// Create a location with an empty resource table and no owner.
    fn new(name: impl Into<String>, kind: LocationKind, position: Position, width: f64, height: f64) -> Self;
    /// Assign an owning agent (private property).
    #[must_use]
    fn with_owner(self, owner: AgentId) -> Self;
    /// Append a scavengeable resource row.
    #[must_use]
    fn with_resource(self, item: impl Into<String>, spawn_chance: f64, max_quantity: u32) -> Self;
    /// Give the location structure health (base locations only).
    #[must_use]
    fn with_health(self, health: f64) -> Self;
}

impl LocationExt for Location {
    fn new(name: impl Into<String>, kind: LocationKind, position: Position, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            position,
            width,
            height,
            kind,
            owner: None,
            resources: Vec::new(),
            health: None,
        }
    }

    fn with_owner(mut self, owner: AgentId) -> Self {
        self.owner = Some(owner);
        self
    }

    fn with_resource(mut self, item: impl Into<String>, spawn_chance: f64, max_quantity: u32) -> Self {
        self.resources.push(ResourceSpec {
            item: item.into(),
            spawn_chance,
            max_quantity,
        });
        self
    }

    fn with_health(mut self, health: f64) -> Self {
        self.health = Some(health);
        self
    }
}

/// Run one scavenge attempt against a location's resource table.
///
/// Rows are evaluated in insertion order; the first row whose probability
/// draw succeeds grants a uniform quantity in `1..=max_quantity` and ends
/// the attempt -- at most one item kind per scavenge. Returns `None` when
/// nothing is found or the location stocks nothing.
pub fn scavenge(location: &Location, rng: &mut impl Rng) -> Option<(String, u32)> {
    for row in &location.resources {
        if rng.random::<f64>() < row.spawn_chance {
            let quantity = if row.max_quantity <= 1 {
                1
            } else {
                rng.random_range(1..=row.max_quantity)
            };
            return Some((row.item.clone(), quantity));
        }
    }
    None
}

/// Name-keyed store over an insertion-ordered location list.
///
/// Insertion order is preserved because it is observable: scavenge tables
/// and the joint-action destination search both walk locations in the
/// order the world was seeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSet {
    locations: Vec<Location>,
    index: BTreeMap<String, usize>,
}

impl LocationSet {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            locations: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Add a location, rejecting duplicate names.
    pub fn insert(&mut self, location: Location) -> Result<(), WorldError> {
        if self.index.contains_key(&location.name) {
            warn!(name = %location.name, "rejected duplicate location name");
            return Err(WorldError::DuplicateLocation {
                name: location.name,
            });
        }
        self.index
            .insert(location.name.clone(), self.locations.len());
        self.locations.push(location);
        Ok(())
    }

    /// Look up a location by name.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.index
            .get(name)
            .and_then(|&idx| self.locations.get(idx))
    }

    /// Look up a location mutably by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Location> {
        let idx = self.index.get(name).copied()?;
        self.locations.get_mut(idx)
    }

    /// Whether a location with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate locations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// The base location, if one was seeded.
    pub fn base(&self) -> Option<&Location> {
        self.locations
            .iter()
            .find(|l| l.kind == LocationKind::Base)
    }

    /// The base location, mutably.
    pub fn base_mut(&mut self) -> Option<&mut Location> {
        self.locations
            .iter_mut()
            .find(|l| l.kind == LocationKind::Base)
    }

    /// Number of locations.
    pub const fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the store is empty.
    pub const fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
