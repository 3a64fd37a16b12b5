use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The random choices the generator needs.
///
/// The generator never owns a source of entropy; callers pass one in, which
/// lets tests use a seeded or scripted implementation.
pub trait RandomSource {
    fn boolean(&mut self) -> bool;

    /// A uniform integer in `min..=max`. Callers guarantee `min <= max`.
    fn integer(&mut self, min: u32, max: u32) -> u32;

    /// A uniform printable ASCII character.
    fn character(&mut self) -> char;

    /// A uniform element of `items`, or `None` if it is empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        let last = u32::try_from(items.len()).ok()?.checked_sub(1)?;
        items.get(self.integer(0, last) as usize)
    }
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn boolean(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn integer(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }

    fn character(&mut self) -> char {
        char::from(self.rng.gen_range(0x20u8..=0x7E))
    }
}
