//! Deterministic pseudo-random source shared by packing and simulation

/// Linear congruential generator with the classic Numerical Recipes constants.
///
/// Each packing run and each simulation owns its own instance seeded with 1, so
/// identical inputs always produce identical layouts.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

const MUL: u64 = 1_664_525;
const INC: u64 = 1_013_904_223;
const MODULUS: u64 = 1 << 32;

impl Lcg {
    pub fn new() -> Self {
        Self { state: 1 }
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state = (MUL * self.state + INC) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Tiny non-zero offset used to separate coincident points
    pub fn jiggle(&mut self) -> f64 {
        (self.next_f64() - 0.5) * 1e-6
    }

    /// Fisher-Yates shuffle driven by this generator
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut m = items.len();
        while m > 0 {
            let i = (self.next_f64() * m as f64) as usize;
            m -= 1;
            items.swap(m, i);
        }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}
