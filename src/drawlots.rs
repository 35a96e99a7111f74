//! Weighted random selection ("draw lots").
//!
//! Used by separation tie-breaks and the mission graph's key-room lottery.
//! Each candidate's weight is floored at 1 so a zero-weight candidate is
//! still eligible; an integer is drawn in `[0, total)` and the candidates
//! are scanned linearly until the running sum exceeds it.

use crate::random::Random;

/// Draw one index from `items` with probability proportional to
/// `max(1, weight(item))`. Returns `None` for an empty slice.
pub fn draw_lots<T>(rng: &mut Random, items: &[T], weight: impl Fn(&T) -> i64) -> Option<usize> {
    if items.is_empty() {
        return None;
    }

    let weights: Vec<u64> = items.iter().map(|item| weight(item).max(1) as u64).collect();
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return Some(0);
    }

    let mut draw = rng.next_u32_below(total.min(u32::MAX as u64) as u32) as u64;
    for (index, w) in weights.iter().enumerate() {
        if draw < *w {
            return Some(index);
        }
        draw -= *w;
    }
    Some(weights.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_returns_none() {
        let (mut rng, _) = Random::new(1);
        let items: Vec<u32> = vec![];
        assert_eq!(draw_lots(&mut rng, &items, |_| 1), None);
    }

    #[test]
    fn single_item_always_chosen() {
        let (mut rng, _) = Random::new(1);
        let items = vec![42];
        assert_eq!(draw_lots(&mut rng, &items, |_| 5), Some(0));
    }

    #[test]
    fn heavier_weight_drawn_more_often() {
        let (mut rng, _) = Random::new(3);
        let items = vec![0u32, 1];
        let mut counts = [0usize; 2];
        for _ in 0..2000 {
            let idx = draw_lots(&mut rng, &items, |i| if *i == 0 { 1 } else { 20 }).unwrap();
            counts[idx] += 1;
        }
        assert!(counts[1] > counts[0] * 5);
    }
}
