//! Stage 2: scatter candidate rooms in a disk with Perlin-biased vertical
//! placement.

use crate::math::IVec3;
use crate::params::GeneratorParams;
use crate::perlin::PerlinNoise;
use crate::random::Random;
use crate::room::Room;

pub fn place_rooms(params: &GeneratorParams, rng: &mut Random, perlin: &PerlinNoise) -> Vec<Room> {
    let n = params.num_candidate_rooms as u32;
    let floors = params.num_candidate_floors_effective() as u32;

    let min_side = params.room_width.min.min(params.room_depth.min) as f32;
    let range = (n.max(1) as f32).sqrt() * (min_side + params.horizontal_room_margin as f32);

    let mut rooms = Vec::with_capacity(n as usize);
    for _ in 0..n {
        let angle = rng.range_f32(std::f32::consts::TAU);
        let distance = rng.range_f32(range);
        let noise = perlin.vertical_bias(angle.sin(), angle.cos(), 0.0);

        let mut z = ((floors.max(1) - 1) as f32 * noise).round() as i32;
        if params.horizontal_room_margin == 0 {
            z = 0;
        }

        let position = IVec3::new(
            angle.sin().mul_add(distance, 0.0).round() as i32,
            angle.cos().mul_add(distance, 0.0).round() as i32,
            z,
        );

        let w = rng.range_i32(params.room_width.min as i32, params.room_width.max as i32 + 1) as u32;
        let d = rng.range_i32(params.room_depth.min as i32, params.room_depth.max as i32 + 1) as u32;
        let h = rng.range_i32(params.room_height.min as i32, params.room_height.max as i32 + 1) as u32;

        rooms.push(Room::new(position, (w.max(1), d.max(1), h.max(1))));
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_requested_count() {
        let params = GeneratorParams {
            num_candidate_rooms: 15,
            ..Default::default()
        };
        let (mut rng, _) = Random::new(7);
        let perlin = PerlinNoise::new(&mut rng);
        let rooms = place_rooms(&params, &mut rng, &perlin);
        assert_eq!(rooms.len(), 15);
    }

    #[test]
    fn deterministic_for_same_seed() {
        let params = GeneratorParams::default();
        let (mut rng_a, _) = Random::new(123);
        let perlin_a = PerlinNoise::new(&mut rng_a);
        let rooms_a = place_rooms(&params, &mut rng_a, &perlin_a);

        let (mut rng_b, _) = Random::new(123);
        let perlin_b = PerlinNoise::new(&mut rng_b);
        let rooms_b = place_rooms(&params, &mut rng_b, &perlin_b);

        for (a, b) in rooms_a.iter().zip(rooms_b.iter()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.size, b.size);
        }
    }

    #[test]
    fn zero_horizontal_margin_clamps_z() {
        let params = GeneratorParams {
            horizontal_room_margin: 0,
            num_candidate_floors: 5,
            ..Default::default()
        };
        let (mut rng, _) = Random::new(4);
        let perlin = PerlinNoise::new(&mut rng);
        let rooms = place_rooms(&params, &mut rng, &perlin);
        assert!(rooms.iter().all(|r| r.position.z == 0));
    }
}
