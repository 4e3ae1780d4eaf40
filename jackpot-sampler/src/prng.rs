//! Générateur mulberry32 : 32 bits d'état, reproductible d'une plateforme à l'autre.

use rand::{RngCore, SeedableRng};

const INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Flottant dans [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// Flottant uniforme dans [0, 1) à partir de 32 bits, quel que soit le générateur.
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    rng.next_u32() as f64 / TWO_POW_32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        let mut rng = Mulberry32::new(2044);
        let values: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(values, vec![727_201_934, 1_221_179_156, 823_913_678, 1_123_691_311]);

        let mut rng = Mulberry32::new(0);
        let values: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(values, vec![1_144_304_738, 1_416_247, 958_946_056, 627_933_444]);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        for seed in [0u32, 1, 2033, 2044, u32::MAX] {
            let mut a = Mulberry32::new(seed);
            let mut b = Mulberry32::new(seed);
            for _ in 0..1000 {
                assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
            }
        }
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = Mulberry32::new(7);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x), "hors de [0,1) : {x}");
        }
    }

    #[test]
    fn test_next_f64_matches_unit_f64() {
        let mut a = Mulberry32::new(2033);
        let mut b = Mulberry32::new(2033);
        assert_eq!(a.next_f64(), unit_f64(&mut b));
        assert!((a.next_f64() - 480_276_031.0 / TWO_POW_32).abs() < 1e-15);
    }

    #[test]
    fn test_seedable_matches_new() {
        let mut a = Mulberry32::from_seed(2044u32.to_le_bytes());
        let mut b = Mulberry32::seed_from_u64(2044);
        let mut c = Mulberry32::new(2044);
        let x = c.next_u32();
        assert_eq!(a.next_u32(), x);
        assert_eq!(b.next_u32(), x);
    }

    #[test]
    fn test_fill_bytes_uses_stream() {
        let mut a = Mulberry32::new(2044);
        let mut bytes = [0u8; 6];
        a.fill_bytes(&mut bytes);
        assert_eq!(&bytes[..4], &727_201_934u32.to_le_bytes());
        assert_eq!(&bytes[4..], &1_221_179_156u32.to_le_bytes()[..2]);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Mulberry32::new(2033);
        let mut b = Mulberry32::new(2034);
        let sa: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let sb: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(sa, sb);
    }
}
