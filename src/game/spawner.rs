//! Random piece selection.

use super::matrix::Matrix;
use super::piece::Tetromino;

/// Uniform picker over the seven tetrominoes backed by xorshift32.
/// Not crypto secure; only needs to be cheap and reproducible per seed.
#[derive(Clone, Debug)]
pub struct Randomizer {
    state: u32,
    seed: u32,
}

impl Randomizer {
    pub fn with_seed(seed: u32) -> Self {
        // xorshift has a fixed point at zero
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state, seed }
    }

    /// Seeds from the browser crypto source when the `rng` feature is on,
    /// otherwise from the high-resolution clock.
    pub fn from_entropy() -> Self {
        Self::with_seed(entropy_seed())
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform index in `0..len`.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        // Widening multiply avoids modulo bias toward small indices.
        ((self.next_u32() as u64 * len as u64) >> 32) as usize
    }

    pub fn next_tetromino(&mut self) -> Tetromino {
        Tetromino::ALL[self.next_index(Tetromino::ALL.len())]
    }

    /// A deep copy of a randomly chosen template.
    pub fn next_matrix(&mut self) -> Matrix {
        self.next_tetromino().matrix()
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> u32 {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf),
        Err(err) => {
            log::warn!("getrandom failed ({err}); seeding from clock");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> u32 {
    clock_seed()
}

fn clock_seed() -> u32 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    ((now * 1000.0) as u64 as u32).wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
}
