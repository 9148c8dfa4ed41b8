use rand::{seq::SliceRandom, Rng};

use crate::{
    models::Letter,
    utils::letters::{LETTER_DISTRIBUTION, TOTAL_TILES},
};

/// The shared pool of undrawn tiles, kept in shuffled order
#[derive(Debug, Clone)]
pub struct TileBag(pub(crate) Vec<Letter>);

impl TileBag {
    /// Fill the bag from the letter distribution and shuffle it
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut tiles = Vec::with_capacity(TOTAL_TILES);
        for (ch, count) in LETTER_DISTRIBUTION.iter() {
            if let Some(letter) = Letter::new(*ch) {
                tiles.extend(std::iter::repeat_n(letter, *count as usize));
            }
        }
        tiles.shuffle(rng);
        Self(tiles)
    }

    /// Take the next tile, or `None` once the bag runs dry
    pub fn draw(&mut self) -> Option<Letter> {
        self.0.pop()
    }

    /// Put a tile back and reshuffle, so it is not simply the next draw
    pub fn return_tile(&mut self, letter: Letter, rng: &mut impl Rng) {
        self.0.push(letter);
        self.0.shuffle(rng);
    }

    pub fn remaining(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top `rack` up to `rack_size` tiles; stops quietly when the bag is empty
    pub fn replenish(&mut self, rack: &mut Vec<Letter>, rack_size: usize) {
        while rack.len() < rack_size {
            match self.draw() {
                Some(letter) => rack.push(letter),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn count_of(bag: &TileBag, ch: char) -> usize {
        bag.0.iter().filter(|l| l.as_char() == ch).count()
    }

    #[test]
    fn test_new_bag_holds_full_distribution() {
        let mut rng = StdRng::seed_from_u64(1);
        let bag = TileBag::new(&mut rng);
        assert_eq!(bag.remaining(), 100);
        assert_eq!(count_of(&bag, 'A'), 9);
        assert_eq!(count_of(&bag, 'E'), 13);
        assert_eq!(count_of(&bag, 'Z'), 1);
    }

    #[test]
    fn test_draw_until_empty() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut bag = TileBag::new(&mut rng);
        let mut drawn = 0;
        while bag.draw().is_some() {
            drawn += 1;
        }
        assert_eq!(drawn, 100);
        assert!(bag.is_empty());
        assert!(bag.draw().is_none());
    }

    #[test]
    fn test_return_tile_grows_bag() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bag = TileBag::new(&mut rng);
        let letter = bag.draw().unwrap();
        assert_eq!(bag.remaining(), 99);

        bag.return_tile(letter, &mut rng);
        assert_eq!(bag.remaining(), 100);
    }

    #[test]
    fn test_returned_tile_is_shuffled_in() {
        let z = Letter::new('Z').unwrap();
        let mut next_draws = Vec::new();

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut bag = TileBag::new(&mut rng);
            // The only Z comes out, then goes back
            let at = bag.0.iter().position(|l| *l == z).unwrap();
            bag.0.remove(at);
            let order_before = bag.0.clone();

            bag.return_tile(z, &mut rng);
            assert_eq!(count_of(&bag, 'Z'), 1);
            let without_z: Vec<Letter> = bag.0.iter().copied().filter(|l| *l != z).collect();
            assert_ne!(without_z, order_before, "seed {seed}: bag order unchanged");

            next_draws.push(bag.draw().unwrap());
        }

        assert!(
            next_draws.iter().any(|l| *l != z),
            "returned tile came straight back every time"
        );
    }

    #[test]
    fn test_replenish_stops_when_bag_runs_out() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut bag = TileBag::new(&mut rng);
        while bag.remaining() > 3 {
            bag.draw();
        }

        let mut rack = Vec::new();
        bag.replenish(&mut rack, 7);
        assert_eq!(rack.len(), 3);
        assert!(bag.is_empty());
    }
}
