//! Minimal vector types used by room placement, the graph, and the voxel
//! lattice. Grounded on `original_source/.../Core/Math/{Vector,Point}.h`;
//! the host game engine's math library is out of scope, so this crate
//! carries its own tiny value types instead of pulling in a full
//! linear-algebra dependency.

/// Integer grid coordinate `(x east, y south, z up)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: IVec3 = IVec3 { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    pub fn sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    pub fn scale(self, k: i32) -> IVec3 {
        IVec3::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    pub fn manhattan_distance(self, other: IVec3) -> i64 {
        (self.x - other.x).unsigned_abs() as i64
            + (self.y - other.y).unsigned_abs() as i64
            + (self.z - other.z).unsigned_abs() as i64
    }
}

/// Real-valued 3D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        self.sub(other).length()
    }

    pub fn distance_squared(self, other: Vec3) -> f32 {
        let d = self.sub(other);
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    pub fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x.round() as i32, self.y.round() as i32, self.z.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ivec3_arithmetic() {
        let a = IVec3::new(1, 2, 3);
        let b = IVec3::new(4, -1, 0);
        assert_eq!(a.add(b), IVec3::new(5, 1, 3));
        assert_eq!(a.sub(b), IVec3::new(-3, 3, 3));
    }

    #[test]
    fn vec3_distance() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 4.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }
}
