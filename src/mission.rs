//! Stage 7: mission graph — lock placement and key distribution.
//!
//! Grounded on `original_source/.../Core/MissionGraph/MissionGraph.cpp`.
//! The original recurses from the goal room toward the start; this crate
//! drives the same walk from an explicit work stack so arbitrarily deep
//! mission chains never grow the call stack.

use crate::aisle::Aisle;
use crate::drawlots::draw_lots;
use crate::random::Random;
use crate::room::{Item, Parts, Room};

/// First unlocked aisle incident to `room_index` whose opposite endpoint's
/// depth is strictly shallower than `current_depth`.
fn select_aisle(rooms: &[Room], aisles: &[Aisle], room_index: usize, current_depth: u8) -> Option<usize> {
    aisles.iter().position(|aisle| {
        if aisle.locked {
            return false;
        }
        match aisle.opposite(room_index) {
            Some(opposite) => rooms[opposite].depth_from_start < current_depth,
            None => false,
        }
    })
}

/// Every room reachable from `start` by walking only unlocked aisles,
/// `start` included.
fn reachable_rooms(aisles: &[Aisle], room_count: usize, start: usize) -> Vec<usize> {
    let mut adjacency = vec![Vec::new(); room_count];
    for aisle in aisles {
        if aisle.locked {
            continue;
        }
        if let (Some(a), Some(b)) = aisle.rooms() {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
    }

    let mut visited = vec![false; room_count];
    let mut order = Vec::new();
    let mut stack = vec![start];
    visited[start] = true;
    while let Some(node) = stack.pop() {
        order.push(node);
        for &next in &adjacency[node] {
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }
    order
}

fn rooms_at_depth(rooms: &[Room], depth: u8) -> Vec<usize> {
    rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| room.depth_from_start == depth)
        .map(|(i, _)| i)
        .collect()
}

/// Place locks and keys working backward from the goal room. `rooms` and
/// `aisles` are mutated in place: aisles gain `locked`/`unique_locked`
/// flags, rooms gain a placed `item`.
pub fn generate_mission(rooms: &mut [Room], aisles: &mut [Aisle], goal: usize, rng: &mut Random) {
    let room_count = rooms.len();
    let half_room_count = (room_count / 2) as i64;

    let mut work: Vec<(usize, u8)> = vec![(goal, 0)];

    while let Some((room_index, count)) = work.pop() {
        let current_depth = rooms[room_index].depth_from_start;
        let current_branch = rooms[room_index].branch_id;

        let aisle_index = match select_aisle(rooms, aisles, room_index, current_depth) {
            Some(i) => i,
            None => continue,
        };

        if count == 0 {
            aisles[aisle_index].set_unique_lock(true);
        } else {
            aisles[aisle_index].set_lock(true);
        }

        let opposite = match aisles[aisle_index].opposite(room_index) {
            Some(o) => o,
            None => continue,
        };

        let key_rooms = reachable_rooms(aisles, room_count, opposite);
        if key_rooms.is_empty() {
            if count == 0 {
                aisles[aisle_index].set_unique_lock(false);
            } else {
                aisles[aisle_index].set_lock(false);
            }
            continue;
        }

        let chosen = draw_lots(rng, &key_rooms, |&idx| {
            let delta = (current_branch as i64 - rooms[idx].branch_id as i64).abs();
            let addition = if rooms[idx].parts == Parts::Hanare { half_room_count } else { 0 };
            delta + rooms[idx].depth_from_start as i64 + addition
        });

        match chosen {
            Some(pos) => {
                let key_room = key_rooms[pos];
                rooms[key_room].item = if count == 0 { Item::UniqueKey } else { Item::Key };
            }
            None => {
                if count == 0 {
                    aisles[aisle_index].set_unique_lock(false);
                } else {
                    aisles[aisle_index].set_lock(false);
                }
                continue;
            }
        }

        if current_depth >= 3 {
            let candidates = rooms_at_depth(rooms, current_depth - 2);
            if !candidates.is_empty() {
                let pick = candidates[rng.index(candidates.len())];
                work.push((pick, count + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::IVec3;
    use crate::point::Point;

    fn make_room(depth: u8, branch: u8) -> Room {
        let mut room = Room::new(IVec3::new(0, 0, 0), (4, 4, 2));
        room.depth_from_start = depth;
        room.branch_id = branch;
        room
    }

    fn make_aisle(a: usize, b: usize) -> Aisle {
        Aisle::new(Point::new(crate::math::Vec3::ZERO, a), Point::new(crate::math::Vec3::new(1.0, 0.0, 0.0), b))
    }

    #[test]
    fn locks_one_aisle_toward_start_and_places_unique_key() {
        let mut rooms = vec![make_room(0, 0), make_room(1, 0), make_room(2, 0)];
        let mut aisles = vec![make_aisle(0, 1), make_aisle(1, 2)];
        let (mut rng, _) = Random::new(1);

        generate_mission(&mut rooms, &mut aisles, 2, &mut rng);

        assert!(aisles.iter().any(|a| a.unique_locked || a.locked));
        assert!(rooms.iter().any(|r| r.item != Item::Empty));
    }

    #[test]
    fn isolated_goal_room_places_no_lock() {
        let mut rooms = vec![make_room(0, 0)];
        let mut aisles: Vec<Aisle> = vec![];
        let (mut rng, _) = Random::new(2);
        generate_mission(&mut rooms, &mut aisles, 0, &mut rng);
        assert!(rooms.iter().all(|r| r.item == Item::Empty));
    }

    #[test]
    fn deep_chain_recurses_toward_shallower_rooms() {
        // a 5-room line: 0-1-2-3-4, depth_from_start = index.
        let mut rooms: Vec<Room> = (0..5).map(|i| make_room(i as u8, 0)).collect();
        let mut aisles = vec![make_aisle(0, 1), make_aisle(1, 2), make_aisle(2, 3), make_aisle(3, 4)];
        let (mut rng, _) = Random::new(3);
        generate_mission(&mut rooms, &mut aisles, 4, &mut rng);

        let locked_count = aisles.iter().filter(|a| a.locked || a.unique_locked).count();
        assert!(locked_count >= 1);
    }
}
