//! Deterministic procedural dungeon generation: scatter rooms, connect them
//! with a minimum spanning tree, lock a mission graph over the result, and
//! voxelize the whole thing into a typed grid ready for mesh spawning.
//!
//! Every stage draws from a single seeded [`random::Random`] stream, so two
//! [`generator::Generator`]s built with the same [`params::GeneratorParams`]
//! (and the same `seed`) produce byte-identical [`generator::GeneratorOutput::crc32`]
//! checksums. The only caveat: [`pathfinder`] resolves tie-break order with
//! a binary heap rather than the reference engine's linear-scan open list,
//! so this crate does not claim cross-language bit-for-bit parity — only
//! run-to-run determinism within itself.

pub mod aisle;
pub mod canonical;
pub mod cellrules;
pub mod delaunay;
pub mod direction;
pub mod drawlots;
pub mod error;
pub mod generator;
pub mod identifier;
pub mod math;
pub mod mission;
pub mod mst;
pub mod params;
pub mod pathfinder;
pub mod perlin;
pub mod placement;
pub mod point;
pub mod random;
pub mod room;
pub mod semantics;
pub mod separation;
pub mod voxel;
pub mod voxelization;

pub use error::{GenerationError, LastError};
pub use generator::{Generator, GeneratorOutput};
pub use params::{GeneratorParams, SizeRange};
pub use voxel::{Cell, CellType, Props, Voxel};
