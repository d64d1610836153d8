use cai539_db::models::{DrawRecord, POOL_SIZE};

use super::{top_numbers, Analyzer};

/// Numéros les plus souvent impliqués dans une suite (n, n+1) d'un même tirage.
pub struct ConsecutiveRun {
    top: usize,
}

impl ConsecutiveRun {
    pub fn new(top: usize) -> Self {
        Self { top }
    }

    pub fn run_counts(window: &[DrawRecord]) -> Vec<u32> {
        let mut counts = vec![0u32; POOL_SIZE as usize + 1];
        for record in window {
            let sorted = record.sorted_numbers();
            for pair in sorted.windows(2) {
                if pair[1] == pair[0] + 1 {
                    for &n in pair {
                        if let Some(c) = counts.get_mut(n as usize) {
                            *c += 1;
                        }
                    }
                }
            }
        }
        counts
    }
}

impl Analyzer for ConsecutiveRun {
    fn name(&self) -> &str {
        "ConsecutiveRun"
    }

    fn description(&self) -> &str {
        "Numéros les plus présents dans des suites consécutives"
    }

    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8> {
        top_numbers(&Self::run_counts(window), self.top)
    }
}
