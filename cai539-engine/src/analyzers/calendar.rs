use cai539_db::models::DrawRecord;

use super::{count_by, number_frequencies, top_k, top_numbers, Analyzer};

pub struct CalendarMonth {
    top: usize,
}

impl CalendarMonth {
    pub fn new(top: usize) -> Self {
        Self { top }
    }

    pub fn dominant_month(window: &[DrawRecord]) -> Option<u32> {
        top_k(count_by(window.iter().map(|r| r.month())), 1).into_iter().next()
    }
}

impl Analyzer for CalendarMonth {
    fn name(&self) -> &str {
        "CalendarMonth"
    }

    fn description(&self) -> &str {
        "Numéros les plus fréquents du mois calendaire le plus représenté"
    }

    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8> {
        let Some(month) = Self::dominant_month(window) else {
            return Vec::new();
        };
        let freq = number_frequencies(window.iter().filter(|r| r.month() == month));
        let mut numbers = top_numbers(&freq, self.top);
        numbers.sort_unstable();
        numbers
    }
}
