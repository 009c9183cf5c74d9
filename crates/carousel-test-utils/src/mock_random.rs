// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted randomness source for deterministic selection tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use carousel_core::RandomSource;

/// A `RandomSource` that replays scripted values and records every call.
///
/// `pick` returns scripted indices (defaulting to 0 when the script runs
/// dry) and records each call's upper bound, letting tests assert the exact
/// window size handed to the random pick. `coin` replays scripted flips,
/// defaulting to `false`.
pub struct ScriptedRandom {
    picks: Mutex<VecDeque<usize>>,
    coins: Mutex<VecDeque<bool>>,
    pick_uppers: Mutex<Vec<usize>>,
}

impl ScriptedRandom {
    /// Create a source with empty scripts (picks 0, coins false).
    pub fn new() -> Self {
        Self {
            picks: Mutex::new(VecDeque::new()),
            coins: Mutex::new(VecDeque::new()),
            pick_uppers: Mutex::new(Vec::new()),
        }
    }

    /// Queue index picks to replay in order.
    pub fn script_picks(&self, picks: impl IntoIterator<Item = usize>) {
        self.picks.lock().unwrap().extend(picks);
    }

    /// Queue coin flips to replay in order.
    pub fn script_coins(&self, coins: impl IntoIterator<Item = bool>) {
        self.coins.lock().unwrap().extend(coins);
    }

    /// Upper bounds observed by every `pick` call, in order.
    pub fn observed_uppers(&self) -> Vec<usize> {
        self.pick_uppers.lock().unwrap().clone()
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&self, upper: usize) -> usize {
        self.pick_uppers.lock().unwrap().push(upper);
        let scripted = self.picks.lock().unwrap().pop_front().unwrap_or(0);
        // Clamp so a stale script can never index out of bounds.
        scripted.min(upper.saturating_sub(1))
    }

    fn coin(&self) -> bool {
        self.coins.lock().unwrap().pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_scripted_values_and_records_uppers() {
        let random = ScriptedRandom::new();
        random.script_picks([1, 5]);
        random.script_coins([true]);

        assert_eq!(random.pick(2), 1);
        // 5 is clamped into the bound.
        assert_eq!(random.pick(3), 2);
        // Script exhausted: defaults to 0.
        assert_eq!(random.pick(4), 0);

        assert!(random.coin());
        assert!(!random.coin());

        assert_eq!(random.observed_uppers(), vec![2, 3, 4]);
    }
}
