use std::collections::{BTreeSet, HashMap};

use cai539_db::models::DrawRecord;

use super::Analyzer;

/// Numéros revenus après au moins `min_gap` tirages d'absence.
pub struct GapFill {
    min_gap: usize,
    limit: usize,
}

impl GapFill {
    pub fn new(min_gap: usize, limit: usize) -> Self {
        Self { min_gap, limit }
    }

    /// Parcours du plus ancien au plus récent ; un numéro n'est signalé qu'une fois.
    pub fn flagged(&self, window: &[DrawRecord]) -> BTreeSet<u8> {
        let mut last_seen: HashMap<u8, usize> = HashMap::new();
        let mut flagged = BTreeSet::new();

        for (i, record) in window.iter().rev().enumerate() {
            for &n in &record.numbers {
                if let Some(prev) = last_seen.insert(n, i) {
                    if i - prev >= self.min_gap {
                        flagged.insert(n);
                    }
                }
            }
        }

        flagged
    }
}

impl Analyzer for GapFill {
    fn name(&self) -> &str {
        "GapFill"
    }

    fn description(&self) -> &str {
        "Numéros réapparus après un trou de plusieurs tirages"
    }

    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8> {
        self.flagged(window).into_iter().take(self.limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(numbers: [u8; 5]) -> DrawRecord {
        DrawRecord {
            period: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            numbers,
            lunar_month: None,
        }
    }

    #[test]
    fn test_every_draw_never_flagged() {
        let window: Vec<DrawRecord> = (0..6).map(|i| record([9, 10 + i, 20 + i, 30, 1 + i])).collect();
        let flagged = GapFill::new(2, 2).flagged(&window);
        assert!(!flagged.contains(&9));
        assert!(!flagged.contains(&30));
    }

    #[test]
    fn test_gap_of_two_flagged() {
        // Le plus récent en premier : 25 apparaît dans le plus ancien et le plus récent
        let window = vec![
            record([25, 2, 3, 4, 5]),
            record([11, 12, 13, 14, 15]),
            record([25, 22, 23, 24, 21]),
        ];
        let flagged = GapFill::new(2, 2).flagged(&window);
        assert_eq!(flagged.into_iter().collect::<Vec<_>>(), vec![25]);
    }

    #[test]
    fn test_gap_below_minimum_ignored() {
        let window = vec![
            record([25, 2, 3, 4, 5]),
            record([25, 12, 13, 14, 15]),
        ];
        assert!(GapFill::new(2, 2).candidates(&window).is_empty());
    }

    #[test]
    fn test_candidates_ascending_truncated() {
        let window = vec![
            record([30, 20, 10, 4, 5]),
            record([11, 12, 13, 14, 15]),
            record([10, 20, 30, 24, 21]),
        ];
        assert_eq!(GapFill::new(2, 2).candidates(&window), vec![10, 20]);
    }

    #[test]
    fn test_empty_window() {
        assert!(GapFill::new(2, 2).candidates(&[]).is_empty());
    }
}
