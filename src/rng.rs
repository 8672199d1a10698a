use serde::{Deserialize, Serialize};

const MULTIPLIER: u32 = 1664525;
const INCREMENT: u32 = 1013904223;
const MODULUS: f64 = 4294967296.0;

/// 32-bit linear congruential stream.
///
/// Output is part of the galaxy format: a seed and a configuration must always
/// produce the same galaxy, so the constants and derived draws here can not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}
impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the stream and return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        f64::from(self.state) / MODULUS
    }

    /// Integer in `[min, max]` inclusive.
    ///
    /// An empty range (`max < min`) still advances the stream and returns `min`.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let draw = self.next_f64();
        if max <= min {
            return min;
        }
        let span = f64::from(max - min) + 1.0;
        min + (draw * span).floor() as u32
    }

    /// Float in `[min, max)`.
    pub fn float(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform pick from a non-empty slice.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = (self.next_f64() * items.len() as f64).floor() as usize;
        items.get(index.min(items.len() - 1))
    }
}
