//! Top-level pipeline driver: rooms in, a locked-and-keyed voxel dungeon out.
//!
//! Grounded on `original_source/.../Core/DungeonGenerator.cpp`'s top-level
//! `Generate` method, which runs the same stage sequence and retries the
//! whole pipeline with a fresh seed when a stage reports a recoverable
//! failure.

use crate::aisle::Aisle;
use crate::canonical::{canonicalize, prune, Extents};
use crate::delaunay::delaunay_edges;
use crate::error::{GenerationError, LastError};
use crate::math::Vec3;
use crate::mission::generate_mission;
use crate::mst::build_mst;
use crate::params::GeneratorParams;
use crate::perlin::PerlinNoise;
use crate::placement::place_rooms;
use crate::point::Point;
use crate::random::Random;
use crate::room::{Parts, Room};
use crate::semantics::compute_semantics;
use crate::separation::separate_rooms;
use crate::voxel::Voxel;
use crate::voxelization::{paint_rooms, route_aisles};
use std::collections::HashSet;

const MAX_ATTEMPTS: u32 = 3;

pub struct GeneratorOutput {
    pub rooms: Vec<Room>,
    pub aisles: Vec<Aisle>,
    pub voxel: Voxel,
    pub extents: Extents,
    pub start: usize,
    pub goal: usize,
    pub leaves: Vec<usize>,
    pub effective_seed: u32,
    pub crc32: u32,
}

/// Drives the full dungeon-generation pipeline for a fixed set of
/// [`GeneratorParams`], retrying with a reseeded run on recoverable stage
/// failures.
pub struct Generator {
    params: GeneratorParams,
    effective_seed: u32,
    last_error: LastError,
}

impl Generator {
    pub fn new(params: GeneratorParams) -> Self {
        Self {
            params,
            effective_seed: 0,
            last_error: LastError::Success,
        }
    }

    pub fn effective_seed(&self) -> u32 {
        self.effective_seed
    }

    pub fn last_error(&self) -> LastError {
        self.last_error
    }

    /// Run the pipeline, retrying up to `MAX_ATTEMPTS` times on a retryable
    /// [`GenerationError`]. Returns the last error once attempts are spent.
    pub fn generate(&mut self) -> Result<GeneratorOutput, GenerationError> {
        let mut seed = self.params.seed;
        let mut last_err: Option<GenerationError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            match self.try_generate(seed) {
                Ok((output, recovered)) => {
                    self.effective_seed = output.effective_seed;
                    self.last_error = recovered;
                    return Ok(output);
                }
                Err(err) => {
                    self.last_error = err.to_last_error();
                    log::warn!("dungeon generation attempt {attempt} failed: {err}");
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    seed = reseed(seed, attempt);
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.expect("loop runs at least once"))
    }

    fn try_generate(&self, seed: u32) -> Result<(GeneratorOutput, LastError), GenerationError> {
        let (mut rng, effective_seed) = Random::new(seed);
        let perlin = PerlinNoise::new(&mut rng);

        let h_margin = self.params.horizontal_room_margin as i32;
        let v_margin = self.params.vertical_room_margin as i32;

        let candidates = place_rooms(&self.params, &mut rng, &perlin);
        let separated = separate_rooms(candidates, h_margin, v_margin, &mut rng)?;

        let mut rooms = separated;
        let extents = canonicalize(&mut rooms);
        let mut rooms = prune(rooms, extents, h_margin, v_margin);
        let extents = canonicalize(&mut rooms);

        if rooms.is_empty() {
            return Err(GenerationError::SeparateRoomsFailed);
        }

        let positions: Vec<Vec3> = rooms.iter().map(Room::ground_center).collect();

        let edges = delaunay_edges(&positions);
        let mut recovered = LastError::Success;
        if edges.is_empty() && rooms.len() > 1 {
            // Non-fatal: log and continue best-effort with no tree edges
            // rather than aborting the whole attempt. `compute_semantics`
            // degrades gracefully (every room but the start one is simply
            // unreached), matching the "continue best-effort" recovery.
            let err = GenerationError::TriangulationFailed { room_count: rooms.len() };
            log::warn!("{err}, continuing best-effort");
            recovered = err.to_last_error();
        }

        let mst_edges = build_mst(edges, rooms.len(), self.params.aisle_complexity, &mut rng);

        let semantics = compute_semantics(&positions, &mst_edges).ok_or(GenerationError::SeparateRoomsFailed)?;

        for (i, room) in rooms.iter_mut().enumerate() {
            room.depth_from_start = semantics.depth_from_start[i];
            room.branch_id = semantics.branch_id[i];
        }

        let leaf_set: HashSet<usize> = semantics.leaves.iter().copied().collect();
        for (i, room) in rooms.iter_mut().enumerate() {
            room.parts = if i == semantics.start {
                Parts::Start
            } else if i == semantics.goal {
                Parts::Goal
            } else if leaf_set.contains(&i) {
                Parts::Hanare
            } else {
                Parts::Hall
            };
        }

        let mut aisles: Vec<Aisle> = mst_edges
            .iter()
            .map(|edge| Aisle::new(Point::new(positions[edge.a], edge.a), Point::new(positions[edge.b], edge.b)))
            .collect();

        if let Some(size) = self.params.start_room_size {
            rooms[semantics.start].size = size;
        }
        if let Some(size) = self.params.goal_room_size {
            rooms[semantics.goal].size = size;
        }

        // Merging room walls at junctions removes the distinct Gate cell and,
        // per the reference engine, also forgoes a lock/key mission overlay.
        if self.params.use_mission_graph && !self.params.merge_rooms {
            generate_mission(&mut rooms, &mut aisles, semantics.goal, &mut rng);
        }

        let voxel_extents = (extents.0 + 2, extents.1 + 2, extents.2 + 2);
        let mut voxel = paint_rooms(&rooms, voxel_extents);
        route_aisles(
            &mut voxel,
            &rooms,
            &mut aisles,
            self.params.merge_rooms,
            self.params.generate_slope_in_room,
        )?;

        let crc32 = checksum(&voxel);

        Ok((
            GeneratorOutput {
                rooms,
                aisles,
                voxel,
                extents,
                start: semantics.start,
                goal: semantics.goal,
                leaves: semantics.leaves,
                effective_seed,
                crc32,
            },
            recovered,
        ))
    }
}

fn reseed(seed: u32, attempt: u32) -> u32 {
    let next = seed.wrapping_add(0x9E37_79B9).wrapping_add(attempt + 1);
    if next == 0 {
        1
    } else {
        next
    }
}

fn checksum(voxel: &Voxel) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for cell in voxel.cells() {
        hasher.update(&[cell.cell_type as u8, cell.direction as u8, cell.props as u8]);
        hasher.update(&cell.identifier.to_le_bytes());
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params(seed: u32) -> GeneratorParams {
        GeneratorParams {
            seed,
            num_candidate_rooms: 10,
            num_candidate_floors: 1,
            flat: true,
            ..Default::default()
        }
    }

    #[test]
    fn same_seed_produces_the_same_checksum() {
        let mut a = Generator::new(small_params(42));
        let mut b = Generator::new(small_params(42));
        let out_a = a.generate();
        let out_b = b.generate();

        match (out_a, out_b) {
            (Ok(a), Ok(b)) => assert_eq!(a.crc32, b.crc32),
            (Err(ea), Err(eb)) => assert_eq!(ea, eb),
            _ => panic!("same seed produced diverging outcomes"),
        }
    }

    #[test]
    fn successful_generation_reports_success_as_last_error() {
        let mut generator = Generator::new(small_params(7));
        if generator.generate().is_ok() {
            assert_eq!(generator.last_error(), LastError::Success);
        }
    }
}
