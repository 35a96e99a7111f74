//! Corridor graph edge connecting two rooms.

use crate::identifier::{Identifier, Kind};
use crate::point::{Point, RoomIndex};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Aisle {
    pub identifier: Identifier,
    pub points: [Point; 2],
    pub locked: bool,
    pub unique_locked: bool,
}

impl Aisle {
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            identifier: Identifier::new(Kind::Aisle),
            points: [p0, p1],
            locked: false,
            unique_locked: false,
        }
    }

    pub fn length(&self) -> f32 {
        self.points[0].distance(&self.points[1])
    }

    pub fn rooms(&self) -> (Option<RoomIndex>, Option<RoomIndex>) {
        (self.points[0].owner_room, self.points[1].owner_room)
    }

    /// Unordered endpoint match.
    pub fn connects(&self, a: RoomIndex, b: RoomIndex) -> bool {
        let (r0, r1) = self.rooms();
        (r0 == Some(a) && r1 == Some(b)) || (r0 == Some(b) && r1 == Some(a))
    }

    pub fn opposite(&self, room: RoomIndex) -> Option<RoomIndex> {
        let (r0, r1) = self.rooms();
        if r0 == Some(room) {
            r1
        } else if r1 == Some(room) {
            r0
        } else {
            None
        }
    }

    pub fn set_lock(&mut self, locked: bool) {
        self.locked = locked;
        if !locked {
            self.unique_locked = false;
        }
    }

    pub fn set_unique_lock(&mut self, unique_locked: bool) {
        self.unique_locked = unique_locked;
        if unique_locked {
            self.locked = true;
        }
    }
}

impl PartialEq for Aisle {
    fn eq(&self, other: &Self) -> bool {
        let (a0, a1) = self.rooms();
        let (b0, b1) = other.rooms();
        (a0 == b0 && a1 == b1) || (a0 == b1 && a1 == b0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn aisle(a: RoomIndex, b: RoomIndex) -> Aisle {
        Aisle::new(Point::new(Vec3::ZERO, a), Point::new(Vec3::new(1.0, 0.0, 0.0), b))
    }

    #[test]
    fn equality_is_unordered() {
        assert_eq!(aisle(0, 1), aisle(1, 0));
        assert_ne!(aisle(0, 1), aisle(0, 2));
    }

    #[test]
    fn unique_lock_implies_lock() {
        let mut a = aisle(0, 1);
        a.set_unique_lock(true);
        assert!(a.locked);
        a.set_lock(false);
        assert!(!a.unique_locked);
    }

    #[test]
    fn opposite_endpoint() {
        let a = aisle(3, 9);
        assert_eq!(a.opposite(3), Some(9));
        assert_eq!(a.opposite(9), Some(3));
        assert_eq!(a.opposite(1), None);
    }
}
