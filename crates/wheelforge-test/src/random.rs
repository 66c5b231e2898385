//! Seeded random fixtures.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wheelforge_core::{Family, Letter, Track, Wheel, ALPHABET_LEN};

/// Six fully filled wheels of `period` with random families, phases and
/// non-zero residues, in track order.
///
/// Non-zero residues keep the wheels clear of the Option-A rule.
pub fn random_wheels(seed: u64, period: usize) -> Vec<Wheel> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Track::all()
        .map(|track| {
            let family = Family::PRIORITY[rng.random_range(0..Family::PRIORITY.len())];
            let phase = rng.random_range(0..period);
            let mut wheel = Wheel::create(track, family, period, phase).unwrap();
            for slot in 0..period {
                let residue = rng.random_range(1..ALPHABET_LEN);
                wheel.set_residue(slot, residue, slot).unwrap();
            }
            wheel
        })
        .collect()
}

/// `len` random letters.
pub fn random_plaintext(seed: u64, len: usize) -> Vec<Letter> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| Letter::from_index(rng.random_range(0..ALPHABET_LEN)))
        .collect()
}
