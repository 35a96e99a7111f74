//! Compass direction used for room facings, aisle headings, and cell facing.
//!
//! Grid convention: `North=0 (-y), East=1 (+x), South=2 (+y), West=3 (-x)`,
//! with `inverse(d) = (d+2) & 3`.

use crate::math::IVec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn from_index(index: u8) -> Self {
        match index & 3 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// `inverse(d) = (d+2) & 3`.
    pub fn inverse(self) -> Self {
        Self::from_index((self.index() + 2) & 3)
    }

    pub fn rotate(self, steps: u8) -> Self {
        Self::from_index((self.index() + steps) & 3)
    }

    pub fn is_north_south(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Unit step in grid coordinates: `(x east, y south, z up)`.
    pub fn vector(self) -> IVec3 {
        match self {
            Direction::North => IVec3::new(0, -1, 0),
            Direction::East => IVec3::new(1, 0, 0),
            Direction::South => IVec3::new(0, 1, 0),
            Direction::West => IVec3::new(-1, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_matches_arithmetic() {
        assert_eq!(Direction::North.inverse(), Direction::South);
        assert_eq!(Direction::East.inverse(), Direction::West);
        assert_eq!(Direction::South.inverse(), Direction::North);
        assert_eq!(Direction::West.inverse(), Direction::East);
    }

    #[test]
    fn vectors_match_axis_convention() {
        assert_eq!(Direction::North.vector(), IVec3::new(0, -1, 0));
        assert_eq!(Direction::East.vector(), IVec3::new(1, 0, 0));
        assert_eq!(Direction::South.vector(), IVec3::new(0, 1, 0));
        assert_eq!(Direction::West.vector(), IVec3::new(-1, 0, 0));
    }

    #[test]
    fn is_north_south_groups_correctly() {
        assert!(Direction::North.is_north_south());
        assert!(Direction::South.is_north_south());
        assert!(!Direction::East.is_north_south());
        assert!(!Direction::West.is_north_south());
    }
}
