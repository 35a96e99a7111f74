//! Stage 9 phase B: A* aisle routing over the voxel grid, including stair
//! transitions between floors.
//!
//! Grounded on `original_source/.../Core/PathGeneration/PathFinder.cpp`: an
//! open/closed node map keyed by grid position expands the cheapest
//! pending node first, four horizontal neighbors plus two stair motifs.
//! The original keeps its open list as a linear-scan hash map; this crate
//! uses a binary heap for the same cheapest-first expansion with
//! logarithmic pops instead — a decided implementation simplification
//! (no cross-run bit-for-bit tie-break parity is claimed either way, see
//! the determinism note in the crate's top-level docs).

use crate::direction::Direction;
use crate::error::GenerationError;
use crate::math::IVec3;
use crate::room::Room;
use crate::voxel::{CellType, Voxel};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Gate,
    Aisle,
    UpSpace,
    DownSpace,
    Stairwell,
    Slope,
}

#[derive(Debug, Clone, Copy)]
pub struct PathStep {
    pub position: IVec3,
    pub kind: StepKind,
    pub direction: Direction,
}

type NodeKey = (IVec3, Direction);

struct Parent {
    key: Option<NodeKey>,
    kind: StepKind,
    /// Extra cells consumed by a stair motif, painted alongside `position`.
    extra_cells: Vec<(IVec3, StepKind, Direction)>,
}

fn heuristic(pos: IVec3, goal: IVec3) -> u32 {
    let dx = (pos.x - goal.x).unsigned_abs();
    let dy = (pos.y - goal.y).unsigned_abs();
    let dz = (pos.z - goal.z).unsigned_abs();
    dx + dy + 2 * dz
}

fn is_walkable_empty(voxel: &Voxel, pos: IVec3) -> bool {
    voxel.get(pos.x, pos.y, pos.z).cell_type == CellType::Empty
}

/// Whether `pos` (entered while facing `entering_direction`) satisfies the
/// routing goal condition for `goal_room`: inside its horizontal footprint
/// at the room's floor level, a Deck cell, with no wall suppression toward
/// the entering direction.
fn is_goal(voxel: &Voxel, goal_room: &Room, pos: IVec3, entering_direction: Direction) -> bool {
    if pos.z != goal_room.background() {
        return false;
    }
    if !goal_room.contains_xy(pos.x, pos.y) {
        return false;
    }
    let cell = voxel.get(pos.x, pos.y, pos.z);
    if cell.cell_type != CellType::Deck {
        return false;
    }
    let bit = 1u8 << entering_direction.index();
    cell.no_wall_mesh & bit == 0
}

/// Search from `start` (already facing `start_direction`, standing on a
/// gate cell) to any cell satisfying the goal condition against
/// `goal_room`. Returns the committed path, start to goal inclusive, or
/// `Ok(None)` if no path exists.
pub fn find_route(
    voxel: &Voxel,
    start: IVec3,
    start_direction: Direction,
    goal_room: &Room,
    generate_slope_in_room: bool,
) -> Result<Option<Vec<PathStep>>, GenerationError> {
    let goal_reference = IVec3::new(
        goal_room.left() + goal_room.size.0 as i32 / 2,
        goal_room.top() + goal_room.size.1 as i32 / 2,
        goal_room.background(),
    );

    // The A* goal reference is derived straight from `goal_room`'s own
    // bounds; if it ever lands outside them the caller handed us a room
    // whose footprint doesn't match its own accessors.
    if !goal_room.contains_xy(goal_reference.x, goal_reference.y) || goal_reference.z != goal_room.background() {
        return Err(GenerationError::GoalPointIsOutsideGoalRange);
    }

    let start_key: NodeKey = (start, start_direction);
    let mut best_cost: HashMap<NodeKey, u32> = HashMap::new();
    let mut parents: HashMap<NodeKey, Parent> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(u32, u64, NodeKey)>> = BinaryHeap::new();

    best_cost.insert(start_key, 0);
    parents.insert(
        start_key,
        Parent {
            key: None,
            kind: StepKind::Gate,
            extra_cells: Vec::new(),
        },
    );
    heap.push(Reverse((heuristic(start, goal_reference), 0, start_key)));

    let mut sequence: u64 = 1;

    while let Some(Reverse((_, _, (pos, facing)))) = heap.pop() {
        let current_cost = best_cost[&(pos, facing)];

        if is_goal(voxel, goal_room, pos, facing) {
            return Ok(Some(reconstruct(&parents, (pos, facing))));
        }

        for dir in Direction::ALL {
            let step = dir.vector();
            let next_pos = IVec3::new(pos.x + step.x, pos.y + step.y, pos.z);
            let reachable = is_walkable_empty(voxel, next_pos) || is_goal(voxel, goal_room, next_pos, dir);
            if !reachable {
                continue;
            }
            let move_cost = if dir == facing { 1 } else { 2 };
            relax(
                &mut best_cost,
                &mut parents,
                &mut heap,
                &mut sequence,
                (pos, facing),
                (next_pos, dir),
                current_cost + move_cost,
                StepKind::Aisle,
                Vec::new(),
                goal_reference,
            );
        }

        // Up-stairs: (up, forward, up+forward), all Empty. `Slope` is the
        // diagonal cell itself; with `generate_slope_in_room` the discrete
        // vertical riser is dropped in favor of a longer, rider-less ramp.
        let forward = facing.vector();
        let up = IVec3::new(pos.x, pos.y, pos.z + 1);
        let up_forward = IVec3::new(pos.x + forward.x, pos.y + forward.y, pos.z + 1);
        let forward_cell = IVec3::new(pos.x + forward.x, pos.y + forward.y, pos.z);
        if is_walkable_empty(voxel, up) && is_walkable_empty(voxel, forward_cell) && is_walkable_empty(voxel, up_forward) {
            let extra_cells = if generate_slope_in_room {
                vec![(forward_cell, StepKind::UpSpace, facing)]
            } else {
                vec![(up, StepKind::Stairwell, facing), (forward_cell, StepKind::UpSpace, facing)]
            };
            relax(
                &mut best_cost,
                &mut parents,
                &mut heap,
                &mut sequence,
                (pos, facing),
                (up_forward, facing),
                current_cost + 3,
                StepKind::Slope,
                extra_cells,
                goal_reference,
            );
        }

        // Down-stairs: (down, forward, down+forward), all Empty.
        let down = IVec3::new(pos.x, pos.y, pos.z - 1);
        let down_forward = IVec3::new(pos.x + forward.x, pos.y + forward.y, pos.z - 1);
        if is_walkable_empty(voxel, down) && is_walkable_empty(voxel, forward_cell) && is_walkable_empty(voxel, down_forward) {
            let extra_cells = if generate_slope_in_room {
                vec![(forward_cell, StepKind::DownSpace, facing)]
            } else {
                vec![(down, StepKind::Stairwell, facing), (forward_cell, StepKind::DownSpace, facing)]
            };
            relax(
                &mut best_cost,
                &mut parents,
                &mut heap,
                &mut sequence,
                (pos, facing),
                (down_forward, facing),
                current_cost + 3,
                StepKind::Slope,
                extra_cells,
                goal_reference,
            );
        }
    }

    Ok(None)
}

#[allow(clippy::too_many_arguments)]
fn relax(
    best_cost: &mut HashMap<NodeKey, u32>,
    parents: &mut HashMap<NodeKey, Parent>,
    heap: &mut BinaryHeap<Reverse<(u32, u64, NodeKey)>>,
    sequence: &mut u64,
    from: NodeKey,
    to: NodeKey,
    new_cost: u32,
    kind: StepKind,
    extra_cells: Vec<(IVec3, StepKind, Direction)>,
    goal_reference: IVec3,
) {
    let improved = match best_cost.get(&to) {
        Some(&existing) => new_cost < existing,
        None => true,
    };
    if !improved {
        return;
    }
    best_cost.insert(to, new_cost);
    parents.insert(
        to,
        Parent {
            key: Some(from),
            kind,
            extra_cells,
        },
    );
    let priority = new_cost + heuristic(to.0, goal_reference);
    *sequence += 1;
    heap.push(Reverse((priority, *sequence, to)));
}

fn reconstruct(parents: &HashMap<NodeKey, Parent>, goal_key: NodeKey) -> Vec<PathStep> {
    let mut steps = Vec::new();
    let mut current = Some(goal_key);
    while let Some(key) = current {
        let parent = &parents[&key];
        for &(pos, kind, dir) in parent.extra_cells.iter().rev() {
            steps.push(PathStep { position: pos, kind, direction: dir });
        }
        steps.push(PathStep {
            position: key.0,
            kind: parent.kind,
            direction: key.1,
        });
        current = parent.key;
    }
    steps.reverse();
    steps
}
