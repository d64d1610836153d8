use std::collections::BTreeSet;

use cai539_db::models::DrawRecord;

use super::{count_by, top_k, Analyzer};

pub struct TailDigit {
    digits: usize,
    limit: usize,
}

impl TailDigit {
    pub fn new(digits: usize, limit: usize) -> Self {
        Self { digits, limit }
    }

    pub fn top_tails(&self, window: &[DrawRecord]) -> Vec<u8> {
        let tails = count_by(window.iter().flat_map(|r| r.numbers.iter().map(|n| n % 10)));
        top_k(tails, self.digits)
    }
}

impl Analyzer for TailDigit {
    fn name(&self) -> &str {
        "TailDigit"
    }

    fn description(&self) -> &str {
        "Numéros partageant les chiffres des unités les plus fréquents"
    }

    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8> {
        let tails = self.top_tails(window);
        let seen: BTreeSet<u8> = window.iter().flat_map(|r| r.numbers).collect();

        seen.into_iter()
            .filter(|n| tails.contains(&(n % 10)))
            .take(self.limit)
            .collect()
    }
}
