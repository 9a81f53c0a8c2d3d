//! Scripted random source for unit tests.
//!
//! Each `next_u64` yields the next scripted value encoded so that
//! `rng.random::<f64>()` (53-bit mantissa path) returns the smallest
//! 53-bit value `>= v`. A scripted threshold therefore never replays as a
//! draw below it.

use rand::RngCore;

pub struct ScriptedRng {
    draws: Vec<f64>,
    repeat: bool,
    consumed: usize,
}

impl ScriptedRng {
    /// Yields `draws` in order, then panics.
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.to_vec(),
            repeat: false,
            consumed: 0,
        }
    }

    /// Yields `value` forever.
    pub fn repeat(value: f64) -> Self {
        Self {
            draws: vec![value],
            repeat: true,
            consumed: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn encode(value: f64) -> u64 {
        assert!((0.0..1.0).contains(&value), "draw {value} outside [0, 1)");
        ((value * (1u64 << 53) as f64).ceil() as u64) << 11
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = if self.repeat {
            self.draws[0]
        } else {
            match self.draws.get(self.consumed) {
                Some(&v) => v,
                None => panic!("scripted rng exhausted after {} draws", self.consumed),
            }
        };
        self.consumed += 1;
        Self::encode(value)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_replayed_draw_not_below_script() {
        let script = [0.0, 0.01, 0.1, 0.3, 0.45, 0.68, 0.5, 0.999];
        let mut rng = ScriptedRng::new(&script);
        for &v in &script {
            let r: f64 = rng.random();
            assert!(r >= v, "scripted {v} replayed as {r}");
            assert!(r - v < 1e-15);
        }
        assert_eq!(rng.consumed(), script.len());
    }
}
