//! Rectangular rooms.

use crate::identifier::{Identifier, Kind};
use crate::math::{IVec3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Parts {
    Unidentified,
    Hall,
    /// Leaf room in the MST.
    Hanare,
    Start,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Item {
    Empty,
    Key,
    UniqueKey,
}

/// Sentinel for "not yet reached" during depth-from-start propagation.
pub const DEPTH_INFINITY: u8 = u8::MAX;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Room {
    pub identifier: Identifier,
    pub position: IVec3,
    /// `(width, depth, height)`.
    pub size: (u32, u32, u32),
    pub parts: Parts,
    pub item: Item,
    pub depth_from_start: u8,
    pub branch_id: u8,
}

impl Room {
    pub fn new(position: IVec3, size: (u32, u32, u32)) -> Self {
        Self {
            identifier: Identifier::new(Kind::Room),
            position,
            size,
            parts: Parts::Unidentified,
            item: Item::Empty,
            depth_from_start: DEPTH_INFINITY,
            branch_id: 0,
        }
    }

    pub fn left(&self) -> i32 {
        self.position.x
    }

    pub fn right(&self) -> i32 {
        self.position.x + self.size.0 as i32
    }

    pub fn top(&self) -> i32 {
        self.position.y
    }

    pub fn bottom(&self) -> i32 {
        self.position.y + self.size.1 as i32
    }

    pub fn background(&self) -> i32 {
        self.position.z
    }

    pub fn foreground(&self) -> i32 {
        self.position.z + self.size.2 as i32
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            self.position.x as f32 + self.size.0 as f32 / 2.0,
            self.position.y as f32 + self.size.1 as f32 / 2.0,
            self.position.z as f32 + self.size.2 as f32 / 2.0,
        )
    }

    /// Room center projected to the floor (`z = background`), used as the
    /// graph vertex position.
    pub fn ground_center(&self) -> Vec3 {
        Vec3::new(
            self.position.x as f32 + self.size.0 as f32 / 2.0,
            self.position.y as f32 + self.size.1 as f32 / 2.0,
            self.position.z as f32,
        )
    }

    /// Whether `self`, expanded by `h_margin`/`v_margin` on its min corner
    /// only, intersects `other` expanded the same way.
    pub fn intersects(&self, other: &Room, h_margin: i32, v_margin: i32) -> bool {
        let (a_left, a_top, a_back) = (self.left() - h_margin, self.top() - h_margin, self.background() - v_margin);
        let (a_right, a_bottom, a_front) = (self.right(), self.bottom(), self.foreground());

        let (b_left, b_top, b_back) = (other.left() - h_margin, other.top() - h_margin, other.background() - v_margin);
        let (b_right, b_bottom, b_front) = (other.right(), other.bottom(), other.foreground());

        !(a_right <= b_left
            || b_right <= a_left
            || a_bottom <= b_top
            || b_bottom <= a_top
            || a_front <= b_back
            || b_front <= a_back)
    }

    pub fn contains_xy(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_half_open() {
        let room = Room::new(IVec3::new(0, 0, 0), (4, 3, 2));
        assert_eq!(room.left(), 0);
        assert_eq!(room.right(), 4);
        assert_eq!(room.top(), 0);
        assert_eq!(room.bottom(), 3);
        assert_eq!(room.background(), 0);
        assert_eq!(room.foreground(), 2);
    }

    #[test]
    fn margin_inflation_detects_near_miss() {
        let a = Room::new(IVec3::new(0, 0, 0), (4, 4, 2));
        let b = Room::new(IVec3::new(4, 0, 0), (4, 4, 2));
        assert!(!a.intersects(&b, 0, 0));
        assert!(a.intersects(&b, 1, 0));
    }

    #[test]
    fn non_overlapping_with_gap_is_fine() {
        let a = Room::new(IVec3::new(0, 0, 0), (4, 4, 2));
        let b = Room::new(IVec3::new(10, 10, 0), (4, 4, 2));
        assert!(!a.intersects(&b, 2, 1));
    }
}
