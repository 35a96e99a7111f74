//! Stage 4 (canonicalization) and stage 5 (pruning).

use crate::room::Room;

/// World extents in grid units, `(width, depth, height)`.
pub type Extents = (u32, u32, u32);

/// Translate every room so the overall AABB's min corner sits at the
/// origin, returning the resulting world extents.
pub fn canonicalize(rooms: &mut [Room]) -> Extents {
    if rooms.is_empty() {
        return (0, 0, 0);
    }

    let min_x = rooms.iter().map(Room::left).min().unwrap();
    let min_y = rooms.iter().map(Room::top).min().unwrap();
    let min_z = rooms.iter().map(Room::background).min().unwrap();

    for room in rooms.iter_mut() {
        room.position.x -= min_x;
        room.position.y -= min_y;
        room.position.z -= min_z;
    }

    let max_x = rooms.iter().map(Room::right).max().unwrap();
    let max_y = rooms.iter().map(Room::bottom).max().unwrap();
    let max_z = rooms.iter().map(Room::foreground).max().unwrap();

    (max_x as u32, max_y as u32, max_z as u32)
}

/// Drop rooms whose inflated bounds escape `[0, extents)` or that still
/// overlap another surviving room.
pub fn prune(rooms: Vec<Room>, extents: Extents, h_margin: i32, v_margin: i32) -> Vec<Room> {
    let (width, depth, height) = extents;

    let fits = |room: &Room| -> bool {
        room.left() - h_margin >= 0
            && room.top() - h_margin >= 0
            && room.background() - v_margin >= 0
            && room.right() <= width as i32
            && room.bottom() <= depth as i32
            && room.foreground() <= height as i32
    };

    let mut kept: Vec<Room> = Vec::with_capacity(rooms.len());
    for room in rooms.into_iter() {
        if !fits(&room) {
            continue;
        }
        if kept.iter().any(|other| room.intersects(other, h_margin, v_margin)) {
            continue;
        }
        kept.push(room);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::IVec3;

    #[test]
    fn canonicalization_anchors_at_origin() {
        let mut rooms = vec![
            Room::new(IVec3::new(-5, 3, -2), (4, 4, 2)),
            Room::new(IVec3::new(10, -4, 1), (4, 4, 2)),
        ];
        canonicalize(&mut rooms);
        assert_eq!(rooms.iter().map(Room::left).min().unwrap(), 0);
        assert_eq!(rooms.iter().map(Room::top).min().unwrap(), 0);
        assert_eq!(rooms.iter().map(Room::background).min().unwrap(), 0);
    }

    #[test]
    fn pruning_drops_overlaps_and_out_of_bounds() {
        let rooms = vec![
            Room::new(IVec3::new(0, 0, 0), (4, 4, 2)),
            Room::new(IVec3::new(1, 1, 0), (4, 4, 2)), // overlaps first
            Room::new(IVec3::new(100, 100, 0), (4, 4, 2)), // out of bounds
        ];
        let kept = prune(rooms, (20, 20, 4), 0, 0);
        assert_eq!(kept.len(), 1);
    }
}
