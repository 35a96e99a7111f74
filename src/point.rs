//! Graph vertex: a real-valued position plus a weak back-reference to its
//! owning room.
//!
//! The owning room is stored as an arena index rather than a shared pointer,
//! so there is no real ownership cycle: `Room`s live in the `Generator`'s
//! room arena, and a `Point` merely names one by index.

use crate::math::Vec3;

pub type RoomIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub position: Vec3,
    pub owner_room: Option<RoomIndex>,
}

impl Point {
    pub fn new(position: Vec3, owner_room: RoomIndex) -> Self {
        Self {
            position,
            owner_room: Some(owner_room),
        }
    }

    pub fn detached(position: Vec3) -> Self {
        Self {
            position,
            owner_room: None,
        }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        self.position.distance(other.position)
    }
}
