//! Map bounds and spawn geometry.

use holdout_types::Position;
use rand::Rng;

/// The rectangular playfield. Locations sit inside it; hostiles spawn
/// on its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    /// Map width in units.
    pub width: f64,
    /// Map height in units.
    pub height: f64,
}

impl MapBounds {
    /// Construct bounds from width and height.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pick a random point along one of the four map edges.
    ///
    /// Used for hostile spawns so new threats always approach from the
    /// outside rather than materializing among the agents.
    pub fn random_edge_position(self, rng: &mut impl Rng) -> Position {
        let edge: u8 = rng.random_range(0..4);
        match edge {
            // Top edge
            0 => Position::new(rng.random_range(0.0..=self.width), 0.0),
            // Bottom edge
            1 => Position::new(rng.random_range(0.0..=self.width), self.height),
            // Left edge
            2 => Position::new(0.0, rng.random_range(0.0..=self.height)),
            // Right edge (the only remaining case)
            _ => Position::new(self.width, rng.random_range(0.0..=self.height)),
        }
    }

    /// Whether a position lies inside (or on the border of) the map.
    pub const fn contains(self, position: Position) -> bool {
        position.x >= 0.0
            && position.x <= self.width
            && position.y >= 0.0
            && position.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn edge_positions_are_on_the_border() {
        let bounds = MapBounds::new(500.0, 400.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = bounds.random_edge_position(&mut rng);
            assert!(bounds.contains(p));
            let on_vertical = p.x.abs() < f64::EPSILON || (p.x - bounds.width).abs() < f64::EPSILON;
            let on_horizontal =
                p.y.abs() < f64::EPSILON || (p.y - bounds.height).abs() < f64::EPSILON;
            assert!(on_vertical || on_horizontal, "spawn not on an edge: {p:?}");
        }
    }

    #[test]
    fn contains_rejects_outside_points() {
        let bounds = MapBounds::new(500.0, 400.0);
        assert!(bounds.contains(Position::new(250.0, 200.0)));
        assert!(!bounds.contains(Position::new(-1.0, 200.0)));
        assert!(!bounds.contains(Position::new(250.0, 400.5)));
    }
}
