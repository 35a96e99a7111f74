//! Stage 3: iterative relaxation to remove room overlaps.

use crate::error::GenerationError;
use crate::random::Random;
use crate::room::Room;

const MAX_PASSES: usize = 10;

/// Push overlapping rooms apart. Rooms that still overlap after relaxation
/// are dropped; if overlap remains even after dropping them, the stage
/// fails.
pub fn separate_rooms(
    mut rooms: Vec<Room>,
    h_margin: i32,
    v_margin: i32,
    rng: &mut Random,
) -> Result<Vec<Room>, GenerationError> {
    for _pass in 0..MAX_PASSES {
        let order = ascending_distance_order(&rooms);
        let mut moved_any = false;

        for &a_index in &order {
            for b_index in 0..rooms.len() {
                if b_index == a_index {
                    continue;
                }
                if !rooms[a_index].intersects(&rooms[b_index], h_margin, v_margin) {
                    continue;
                }
                push_apart(&mut rooms, a_index, b_index, h_margin, rng);
                moved_any = true;
            }
        }

        if !moved_any {
            return Ok(rooms);
        }
    }

    let mut kept: Vec<Room> = Vec::with_capacity(rooms.len());
    for room in rooms.into_iter() {
        if kept.iter().all(|other| !room.intersects(other, h_margin, v_margin)) {
            kept.push(room);
        }
    }

    if kept.iter().enumerate().any(|(i, room)| {
        kept.iter()
            .enumerate()
            .any(|(j, other)| i != j && room.intersects(other, h_margin, v_margin))
    }) {
        return Err(GenerationError::SeparateRoomsFailed);
    }

    Ok(kept)
}

fn ascending_distance_order(rooms: &[Room]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rooms.len()).collect();
    order.sort_by(|&a, &b| {
        let da = squared_distance_to_origin(&rooms[a]);
        let db = squared_distance_to_origin(&rooms[b]);
        da.partial_cmp(&db).unwrap()
    });
    order
}

fn squared_distance_to_origin(room: &Room) -> f32 {
    let c = room.center();
    c.x * c.x + c.y * c.y
}

/// Push `rooms[b_index]` away from `rooms[a_index]` along the nearest
/// axis-aligned escape plane. The push stays in the horizontal plane; only
/// the two rooms' `(x, y)` extents define the four candidate planes.
fn push_apart(rooms: &mut [Room], a_index: usize, b_index: usize, h_margin: i32, rng: &mut Random) {
    let a_center = rooms[a_index].center();
    let b_center = rooms[b_index].center();

    let mut dx = b_center.x - a_center.x;
    let mut dy = b_center.y - a_center.y;

    if dx == 0.0 && dy == 0.0 {
        let angle = rng.range_f32(std::f32::consts::TAU);
        dx = angle.cos();
        dy = angle.sin();
    }

    let a_half_w = rooms[a_index].size.0 as f32 / 2.0;
    let a_half_d = rooms[a_index].size.1 as f32 / 2.0;
    let b_half_w = rooms[b_index].size.0 as f32 / 2.0;
    let b_half_d = rooms[b_index].size.1 as f32 / 2.0;

    let plane_x = a_half_w + b_half_w + h_margin as f32;
    let plane_y = a_half_d + b_half_d + h_margin as f32;

    let mut best_t = f32::INFINITY;
    if dx != 0.0 {
        best_t = best_t.min(plane_x / dx.abs());
    }
    if dy != 0.0 {
        best_t = best_t.min(plane_y / dy.abs());
    }
    if !best_t.is_finite() {
        return;
    }

    let new_x = a_center.x + dx.signum() * best_t - b_half_w;
    let new_y = a_center.y + dy.signum() * best_t - b_half_d;

    rooms[b_index].position.x = new_x.floor() as i32;
    rooms[b_index].position.y = new_y.floor() as i32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::IVec3;

    #[test]
    fn overlapping_rooms_end_up_separated() {
        let rooms = vec![
            Room::new(IVec3::new(0, 0, 0), (4, 4, 2)),
            Room::new(IVec3::new(1, 1, 0), (4, 4, 2)),
            Room::new(IVec3::new(2, 0, 0), (4, 4, 2)),
        ];
        let (mut rng, _) = Random::new(1);
        let rooms = separate_rooms(rooms, 1, 1, &mut rng).expect("should separate");

        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                assert!(!rooms[i].intersects(&rooms[j], 1, 1), "{i} and {j} still overlap");
            }
        }
    }

    #[test]
    fn already_separated_rooms_are_untouched_in_position() {
        let rooms = vec![
            Room::new(IVec3::new(0, 0, 0), (4, 4, 2)),
            Room::new(IVec3::new(100, 100, 0), (4, 4, 2)),
        ];
        let before = rooms.clone();
        let (mut rng, _) = Random::new(9);
        let rooms = separate_rooms(rooms, 1, 1, &mut rng).unwrap();
        assert_eq!(rooms[0].position, before[0].position);
        assert_eq!(rooms[1].position, before[1].position);
    }

    #[test]
    fn dense_cluster_still_converges() {
        let mut rooms = Vec::new();
        let (mut rng, _) = Random::new(77);
        for i in 0..12 {
            rooms.push(Room::new(IVec3::new((i % 4) * 2, (i / 4) * 2, 0), (5, 5, 2)));
        }
        let rooms = separate_rooms(rooms, 1, 1, &mut rng).expect("should eventually separate or prune");
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                assert!(!rooms[i].intersects(&rooms[j], 1, 1));
            }
        }
    }
}
