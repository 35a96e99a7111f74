//! Stage 9: paint rooms into the voxel grid, then route every aisle across
//! it with A*.
//!
//! Grounded on `original_source/.../Core/Voxelization/RoomStructureGenerator.cpp`
//! (room painting) and `PathFinder.cpp` (routing order, gate search).

use crate::aisle::Aisle;
use crate::direction::Direction;
use crate::error::GenerationError;
use crate::math::{IVec3, Vec3};
use crate::pathfinder::{find_route, PathStep, StepKind};
use crate::room::Room;
use crate::voxel::{Cell, CellType, Props, Voxel};

/// Phase A: fill every room's footprint with a Deck floor layer and Empty
/// space above it, tagged with the room's identifier.
pub fn paint_rooms(rooms: &[Room], extents: (u32, u32, u32)) -> Voxel {
    let mut voxel = Voxel::new(extents.0, extents.1, extents.2);
    for room in rooms {
        for x in room.left()..room.right() {
            for y in room.top()..room.bottom() {
                voxel.set(
                    x,
                    y,
                    room.background(),
                    Cell {
                        cell_type: CellType::Deck,
                        identifier: room.identifier.get(),
                        ..Default::default()
                    },
                );
                for z in (room.background() + 1)..room.foreground() {
                    voxel.set(
                        x,
                        y,
                        z,
                        Cell {
                            cell_type: CellType::Empty,
                            identifier: room.identifier.get(),
                            ..Default::default()
                        },
                    );
                }
            }
        }
    }
    voxel
}

/// Find a boundary Deck cell of `room` that faces an Empty neighbor,
/// closest to `target`. Returns the cell and the outward-facing direction.
fn find_gate(voxel: &Voxel, room: &Room, target: Vec3) -> Option<(IVec3, Direction)> {
    let z = room.background();
    let mut best: Option<(IVec3, Direction)> = None;
    let mut best_dist = f32::MAX;

    for x in room.left()..room.right() {
        for y in room.top()..room.bottom() {
            let on_boundary = x == room.left() || x == room.right() - 1 || y == room.top() || y == room.bottom() - 1;
            if !on_boundary {
                continue;
            }
            for dir in Direction::ALL {
                let step = dir.vector();
                let nx = x + step.x;
                let ny = y + step.y;
                if room.contains_xy(nx, ny) {
                    continue; // still inside the room, not an outward face
                }
                if voxel.get(nx, ny, z).cell_type != CellType::Empty {
                    continue;
                }
                let pos = IVec3::new(x, y, z);
                let dist = pos.to_vec3().distance(target);
                if dist < best_dist {
                    best_dist = dist;
                    best = Some((pos, dir));
                }
            }
        }
    }
    best
}

fn props_for(aisle: &Aisle) -> Props {
    if aisle.unique_locked {
        Props::UniqueLock
    } else if aisle.locked {
        Props::Lock
    } else {
        Props::None
    }
}

/// Paint a routed aisle into the grid. When `merge_rooms` is set, room walls
/// are merged at aisle junctions, so the endpoints keep their natural
/// aisle-motif cell type instead of becoming a distinct `Gate` cell.
fn paint_route(voxel: &mut Voxel, steps: &[PathStep], aisle: &Aisle, merge_rooms: bool) {
    for (i, step) in steps.iter().enumerate() {
        let cell_type = match step.kind {
            StepKind::Gate => CellType::Gate,
            StepKind::Aisle => CellType::Aisle,
            StepKind::UpSpace => CellType::UpSpace,
            StepKind::DownSpace => CellType::DownSpace,
            StepKind::Stairwell => CellType::Stairwell,
            StepKind::Slope => CellType::Slope,
        };
        let is_endpoint = i == 0 || i == steps.len() - 1;
        let cell_type = if is_endpoint && !merge_rooms { CellType::Gate } else { cell_type };
        let props = if i == 0 { props_for(aisle) } else { Props::None };
        let is_catwalk = matches!(step.kind, StepKind::Slope | StepKind::Stairwell);

        voxel.set(
            step.position.x,
            step.position.y,
            step.position.z,
            Cell {
                cell_type,
                direction: step.direction,
                identifier: aisle.identifier.get(),
                props,
                is_catwalk,
                ..Default::default()
            },
        );
    }
}

/// Phase B: route every aisle across the painted grid in ascending-length
/// order, painting the committed path into the grid on success.
pub fn route_aisles(
    voxel: &mut Voxel,
    rooms: &[Room],
    aisles: &mut [Aisle],
    merge_rooms: bool,
    generate_slope_in_room: bool,
) -> Result<(), GenerationError> {
    let mut order: Vec<usize> = (0..aisles.len()).collect();
    order.sort_by(|&a, &b| aisles[a].length().partial_cmp(&aisles[b].length()).unwrap());

    for aisle_index in order {
        let (room_a, room_b) = aisles[aisle_index].rooms();
        let (room_a, room_b) = match (room_a, room_b) {
            (Some(a), Some(b)) => (a, b),
            _ => continue, // a detached endpoint carries no room to route between
        };

        let depth_a = rooms[room_a].depth_from_start;
        let depth_b = rooms[room_b].depth_from_start;
        let (start_room, goal_room) = if depth_a >= depth_b { (room_a, room_b) } else { (room_b, room_a) };

        let target = rooms[goal_room].ground_center();
        let (gate_pos, gate_dir) = match find_gate(voxel, &rooms[start_room], target) {
            Some(g) => g,
            None => {
                return Err(GenerationError::GateSearchFailed { aisle_index, endpoint: 0 });
            }
        };

        let steps = find_route(voxel, gate_pos, gate_dir, &rooms[goal_room], generate_slope_in_room)?
            .ok_or(GenerationError::RouteSearchFailed { aisle_index })?;

        paint_route(voxel, &steps, &aisles[aisle_index], merge_rooms);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::IVec3;

    #[test]
    fn paints_deck_floor_and_empty_above() {
        let room = Room::new(IVec3::new(0, 0, 0), (3, 3, 2));
        let voxel = paint_rooms(&[room.clone()], (10, 10, 4));
        assert_eq!(voxel.get(1, 1, 0).cell_type, CellType::Deck);
        assert_eq!(voxel.get(1, 1, 1).cell_type, CellType::Empty);
        assert_eq!(voxel.get(1, 1, 0).identifier, room.identifier.get());
    }

    #[test]
    fn gate_search_finds_a_boundary_cell_facing_empty_space() {
        let room = Room::new(IVec3::new(2, 2, 0), (3, 3, 2));
        let mut voxel = paint_rooms(&[room.clone()], (20, 20, 4));
        // carve out empty space to the east of the room
        for y in 2..5 {
            voxel.set(5, y, 0, Cell { cell_type: CellType::Empty, ..Default::default() });
        }
        let gate = find_gate(&voxel, &room, Vec3::new(15.0, 3.0, 0.0));
        assert!(gate.is_some());
        let (pos, dir) = gate.unwrap();
        assert_eq!(dir, Direction::East);
        assert_eq!(pos.x, 4);
    }
}
