//! Stage 9's backing store: a dense voxel grid of typed cells.
//!
//! Grounded on `original_source/.../Core/Voxelization/Grid.{h,cpp}`: each
//! cell carries a [`CellType`], a facing [`Direction`], an owning
//! room/aisle [`Identifier`], and a small lock [`Props`] flag.

use crate::direction::Direction;
use crate::identifier::Identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum CellType {
    Floor,
    Deck,
    Gate,
    Aisle,
    Slope,
    Stairwell,
    DownSpace,
    UpSpace,
    Empty,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Props {
    None,
    Lock,
    UniqueLock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    pub direction: Direction,
    pub identifier: u16,
    pub props: Props,
    /// Bit `i` set suppresses wall mesh generation toward `Direction::from_index(i)`.
    pub no_wall_mesh: u8,
    pub no_floor_mesh: bool,
    pub no_roof_mesh: bool,
    /// Set on the raised cells of a floor-transition motif (a mezzanine
    /// walkway standing above a room's own deck level).
    pub is_catwalk: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            cell_type: CellType::Empty,
            direction: Direction::North,
            identifier: crate::identifier::INVALID,
            props: Props::None,
            no_wall_mesh: 0,
            no_floor_mesh: false,
            no_roof_mesh: false,
            is_catwalk: false,
        }
    }
}

impl Cell {
    pub fn with_type(cell_type: CellType, identifier: Identifier) -> Self {
        Self {
            cell_type,
            identifier: identifier.get(),
            ..Default::default()
        }
    }

    pub fn is_kind_of_room(&self) -> bool {
        matches!(self.cell_type, CellType::Floor | CellType::Deck | CellType::Gate)
    }

    pub fn is_kind_of_room_without_gate(&self) -> bool {
        matches!(self.cell_type, CellType::Floor | CellType::Deck)
    }

    pub fn is_kind_of_gate(&self) -> bool {
        self.cell_type == CellType::Gate
    }

    pub fn is_kind_of_aisle(&self) -> bool {
        matches!(
            self.cell_type,
            CellType::Aisle | CellType::Stairwell | CellType::DownSpace | CellType::UpSpace
        )
    }

    pub fn is_kind_of_slope(&self) -> bool {
        self.cell_type == CellType::Slope
    }

    pub fn is_kind_of_spatial(&self) -> bool {
        matches!(self.cell_type, CellType::Empty | CellType::OutOfBounds)
    }

    /// Whether this cell's horizontal extent participates in aisle merging
    /// (two abutting mergeable aisle cells facing the same way omit their
    /// shared wall).
    pub fn can_merge_aisle(&self) -> bool {
        self.is_kind_of_aisle()
    }
}

/// Dense `(width, depth, height)` voxel lattice, linearized as
/// `z*width*depth + y*width + x`. Out-of-bounds reads return an
/// `OutOfBounds` sentinel cell rather than panicking, matching the
/// reference grid's "infinite void" read semantics.
#[derive(Debug, Clone)]
pub struct Voxel {
    width: i32,
    depth: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Voxel {
    pub fn new(width: u32, depth: u32, height: u32) -> Self {
        let (width, depth, height) = (width as i32, depth as i32, height as i32);
        Self {
            width,
            depth,
            height,
            cells: vec![Cell::default(); (width * depth * height).max(0) as usize],
        }
    }

    pub fn dimensions(&self) -> (i32, i32, i32) {
        (self.width, self.depth, self.height)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && y >= 0 && z >= 0 && x < self.width && y < self.depth && z < self.height
    }

    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        (z * self.width * self.depth + y * self.width + x) as usize
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> Cell {
        if !self.in_bounds(x, y, z) {
            return Cell {
                cell_type: CellType::OutOfBounds,
                ..Default::default()
            };
        }
        self.cells[self.index(x, y, z)]
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, cell: Cell) {
        if !self.in_bounds(x, y, z) {
            return;
        }
        let idx = self.index(x, y, z);
        self.cells[idx] = cell;
    }
}
