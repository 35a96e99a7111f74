//! Stage 10: per-cell mesh-generation predicates used by the external mesh
//! spawner.
//!
//! Grounded on `original_source/.../Core/Voxelization/Grid.cpp`
//! (`CanBuildFloor`/`CanBuildSlope`/`CanBuildRoof`/`CanBuildGate`/`CanBuildWall`).
//! `IsKindOf*`/`CanMergeAisle` bodies were not present in the retrieved
//! source, so their groupings ([`Cell::is_kind_of_room`] and friends) are
//! inferred from the enum's doc comments and naming; see DESIGN.md.

use crate::direction::Direction;
use crate::voxel::Cell;

pub fn can_build_floor(cell: &Cell, check_no_mesh_generation: bool) -> bool {
    if check_no_mesh_generation && cell.no_floor_mesh {
        return false;
    }
    cell.is_kind_of_room_without_gate() || cell.is_kind_of_gate() || cell.is_kind_of_aisle()
}

pub fn can_build_slope(cell: &Cell) -> bool {
    cell.is_kind_of_slope()
}

pub fn can_build_roof(cell: &Cell, upper: &Cell, check_no_mesh_generation: bool) -> bool {
    if check_no_mesh_generation && cell.no_roof_mesh {
        return false;
    }
    if cell.is_kind_of_spatial() {
        return false;
    }
    if cell.is_kind_of_aisle() {
        return cell.identifier != upper.identifier;
    }
    upper.identifier != cell.identifier
}

pub fn can_build_gate(cell: &Cell, neighbor: &Cell, direction: Direction, merge_rooms: bool) -> bool {
    if !cell.is_kind_of_gate() {
        return false;
    }

    if neighbor.is_kind_of_gate() {
        return !merge_rooms
            && cell.identifier != neighbor.identifier
            && cell.direction == neighbor.direction
            && cell.direction.inverse() == direction;
    }

    if neighbor.is_kind_of_slope() {
        if cell.identifier == neighbor.identifier {
            return false;
        }
        return cell.direction.is_north_south() == neighbor.direction.is_north_south()
            && cell.direction.is_north_south() == direction.is_north_south();
    }

    if neighbor.is_kind_of_aisle() {
        return cell.identifier != neighbor.identifier && cell.direction.is_north_south() == direction.is_north_south();
    }

    false
}

pub fn can_build_wall(cell: &Cell, neighbor: &Cell, direction: Direction, merge_rooms: bool) -> bool {
    let dir_bit = 1u8 << direction.index();
    if cell.no_wall_mesh & dir_bit != 0 {
        return false;
    }

    if cell.is_kind_of_room_without_gate() {
        return wall_from_room(cell, neighbor, direction, merge_rooms);
    }
    if cell.is_kind_of_gate() {
        return wall_from_gate(cell, neighbor, direction);
    }
    if cell.is_kind_of_aisle() {
        return wall_from_aisle(cell, neighbor, direction);
    }
    if cell.is_kind_of_slope() {
        return wall_from_slope(cell, neighbor, direction);
    }
    false
}

fn wall_from_room(cell: &Cell, neighbor: &Cell, direction: Direction, merge_rooms: bool) -> bool {
    if !merge_rooms && neighbor.is_kind_of_room_without_gate() {
        return cell.identifier != neighbor.identifier;
    }
    if neighbor.is_kind_of_gate() {
        return neighbor.identifier != cell.identifier && neighbor.direction.is_north_south() != direction.is_north_south();
    }
    if cell.identifier == neighbor.identifier {
        return false;
    }
    neighbor.is_kind_of_aisle() || neighbor.is_kind_of_slope() || neighbor.is_kind_of_spatial()
}

fn wall_from_gate(cell: &Cell, neighbor: &Cell, direction: Direction) -> bool {
    if neighbor.is_kind_of_room() || neighbor.is_kind_of_aisle() || neighbor.is_kind_of_slope() {
        return cell.identifier != neighbor.identifier && cell.direction.is_north_south() != direction.is_north_south();
    }
    neighbor.is_kind_of_spatial()
}

fn wall_from_aisle(cell: &Cell, neighbor: &Cell, direction: Direction) -> bool {
    if neighbor.is_kind_of_room_without_gate() {
        return cell.identifier != neighbor.identifier;
    }
    if neighbor.is_kind_of_gate() {
        return neighbor.direction.is_north_south() != direction.is_north_south();
    }
    if neighbor.is_kind_of_slope() {
        if neighbor.can_merge_aisle() && cell.can_merge_aisle() && neighbor.direction.is_north_south() == direction.is_north_south() {
            return matches!(neighbor.cell_type, crate::voxel::CellType::DownSpace | crate::voxel::CellType::Stairwell);
        }
        return neighbor.identifier != cell.identifier;
    }
    if neighbor.is_kind_of_aisle() {
        if neighbor.can_merge_aisle() && cell.can_merge_aisle() {
            return false;
        }
        return neighbor.identifier != cell.identifier;
    }
    neighbor.is_kind_of_spatial()
}

fn wall_from_slope(cell: &Cell, neighbor: &Cell, direction: Direction) -> bool {
    if neighbor.is_kind_of_room_without_gate() {
        if cell.identifier == neighbor.identifier {
            return false;
        }
        return true; // a slope never has a room flush against its face
    }
    if neighbor.is_kind_of_gate() {
        if cell.identifier == neighbor.identifier {
            return false;
        }
        return neighbor.direction.is_north_south() != direction.is_north_south();
    }
    if neighbor.is_kind_of_aisle() {
        if cell.identifier == neighbor.identifier {
            return false;
        }
        if neighbor.can_merge_aisle() && cell.can_merge_aisle() && cell.cell_type != crate::voxel::CellType::Stairwell && cell.direction.is_north_south() == direction.is_north_south() {
            return false;
        }
        return neighbor.identifier != cell.identifier;
    }
    if neighbor.is_kind_of_slope() {
        if neighbor.can_merge_aisle() && cell.can_merge_aisle() {
            if cell.direction.is_north_south() != direction.is_north_south() {
                if neighbor.direction != cell.direction {
                    return true;
                }
                return neighbor.cell_type != cell.cell_type;
            }
            return neighbor.direction.is_north_south() != cell.direction.is_north_south();
        }
        return neighbor.identifier != cell.identifier;
    }
    neighbor.is_kind_of_spatial()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::CellType;

    fn room(identifier: u16) -> Cell {
        Cell { cell_type: CellType::Deck, identifier, ..Default::default() }
    }

    #[test]
    fn floor_builds_on_deck_gate_and_aisle_only() {
        assert!(can_build_floor(&room(1), false));
        assert!(can_build_floor(&Cell { cell_type: CellType::Gate, ..Default::default() }, false));
        assert!(can_build_floor(&Cell { cell_type: CellType::Aisle, ..Default::default() }, false));
        assert!(!can_build_floor(&Cell { cell_type: CellType::Empty, ..Default::default() }, false));
    }

    #[test]
    fn two_different_rooms_get_a_wall_between_them() {
        let a = room(1);
        let b = room(2);
        assert!(can_build_wall(&a, &b, Direction::East, false));
    }

    #[test]
    fn merged_rooms_skip_the_shared_wall() {
        let a = room(1);
        let b = room(2);
        assert!(!can_build_wall(&a, &b, Direction::East, true));
    }

    #[test]
    fn same_room_identifier_has_no_internal_wall() {
        let a = room(5);
        let b = room(5);
        assert!(!can_build_wall(&a, &b, Direction::North, false));
    }

    #[test]
    fn room_against_out_of_bounds_always_walls() {
        let a = room(1);
        let oob = Cell { cell_type: CellType::OutOfBounds, ..Default::default() };
        assert!(can_build_wall(&a, &oob, Direction::South, false));
    }
}
