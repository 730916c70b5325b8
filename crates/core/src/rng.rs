use rand::{rngs::StdRng, RngCore, SeedableRng};

/// Source of randomness for pattern choice and card sampling.
///
/// Any [`RngCore`] qualifies, so callers can swap the seeded generator for a
/// scripted sequence and assert exact outcomes. Shuffles go through
/// `rand::seq::SliceRandom` on the same source.
pub trait RandomSource: RngCore {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.next_u64() % len as u64) as usize)
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {}

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for RngState {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u64>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source that always answers zero, i.e. always the first candidate.
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    #[test]
    fn seeded_state_is_reproducible() {
        let mut a = RngState::from_seed(42);
        let mut b = RngState::from_seed(42);
        let left: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let right: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_eq!(left, right);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn sequence_wraps_and_picks_modulo() {
        let mut rng = SequenceRng::new(vec![1, 7]);
        assert_eq!(rng.pick_index(3), Some(1));
        assert_eq!(rng.pick_index(3), Some(1));
        assert_eq!(rng.pick_index(3), Some(1));
        assert_eq!(rng.pick_index(0), None);
    }

    #[test]
    fn slice_shuffle_runs_on_both_sources() {
        let mut items: Vec<u32> = (0..20).collect();
        items.shuffle(&mut RngState::from_seed(9));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());

        let mut scripted: Vec<u32> = (0..5).collect();
        scripted.shuffle(&mut SequenceRng::zeros());
        scripted.sort_unstable();
        assert_eq!(scripted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn same_seed_shuffles_identically() {
        let mut left: Vec<u32> = (0..12).collect();
        let mut right = left.clone();
        left.shuffle(&mut RngState::from_seed(77));
        right.shuffle(&mut RngState::from_seed(77));
        assert_eq!(left, right);
    }
}
