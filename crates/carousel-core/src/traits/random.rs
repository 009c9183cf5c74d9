// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Randomness source for index selection and the fresh-item coin flip.
//!
//! Kept behind a trait so tests can script every draw deterministically.

use rand::Rng;

/// Supplies uniform integers for index selection and a fair coin.
pub trait RandomSource: Send + Sync {
    /// Uniformly pick an index in `0..upper`. `upper` is always >= 1.
    fn pick(&self, upper: usize) -> usize;

    /// A fair coin flip.
    fn coin(&self) -> bool;
}

/// Production randomness backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn pick(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }

    fn coin(&self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}
