//! Generator parameter record.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    pub fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "SizeRange min must be <= max");
        Self { min, max }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GeneratorParams {
    /// `0` means "use the wall clock"; the effective seed actually used is
    /// reported back via `Generator::effective_seed`.
    pub seed: u32,

    pub horizontal_grid_size: f32,
    pub vertical_grid_size: f32,

    pub num_candidate_rooms: u8,
    pub num_candidate_floors: u8,

    pub room_width: SizeRange,
    pub room_depth: SizeRange,
    pub room_height: SizeRange,

    pub horizontal_room_margin: u8,
    pub vertical_room_margin: u8,

    pub merge_rooms: bool,
    /// Forces a single floor (disables vertical spread).
    pub flat: bool,
    pub use_mission_graph: bool,
    /// 0..=10.
    pub aisle_complexity: u8,
    pub generate_slope_in_room: bool,

    /// Optional fixed `(width, depth, height)` for the start room.
    pub start_room_size: Option<(u32, u32, u32)>,
    /// Optional fixed `(width, depth, height)` for the goal room.
    pub goal_room_size: Option<(u32, u32, u32)>,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            seed: 0,
            horizontal_grid_size: 400.0,
            vertical_grid_size: 400.0,
            num_candidate_rooms: 20,
            num_candidate_floors: 3,
            room_width: SizeRange::new(3, 8),
            room_depth: SizeRange::new(3, 8),
            room_height: SizeRange::new(2, 3),
            horizontal_room_margin: 1,
            vertical_room_margin: 1,
            merge_rooms: false,
            flat: false,
            use_mission_graph: true,
            aisle_complexity: 0,
            generate_slope_in_room: false,
            start_room_size: None,
            goal_room_size: None,
        }
    }
}

impl GeneratorParams {
    pub fn num_candidate_floors_effective(&self) -> u8 {
        if self.flat {
            1
        } else {
            self.num_candidate_floors.max(1)
        }
    }
}
