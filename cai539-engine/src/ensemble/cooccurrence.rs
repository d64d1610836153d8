use std::collections::BTreeMap;

use cai539_db::models::DrawRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrongPair {
    /// Toujours `pair.0 < pair.1`.
    pub pair: (u8, u8),
    pub count: u32,
}

pub fn pair_counts(main_numbers: &[u8], window: &[DrawRecord]) -> BTreeMap<(u8, u8), u32> {
    let mut candidates = main_numbers.to_vec();
    candidates.sort_unstable();
    candidates.dedup();

    let mut counts = BTreeMap::new();
    for record in window {
        let present: Vec<u8> = candidates
            .iter()
            .copied()
            .filter(|&n| record.contains(n))
            .collect();

        for (i, &a) in present.iter().enumerate() {
            for &b in &present[i + 1..] {
                *counts.entry((a, b)).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Paire la plus souvent sortie ensemble ; à égalité, la plus petite paire.
pub fn strongest_pair(main_numbers: &[u8], window: &[DrawRecord]) -> Option<StrongPair> {
    pair_counts(main_numbers, window)
        .into_iter()
        .fold(None, |best: Option<StrongPair>, (pair, count)| match best {
            Some(b) if b.count >= count => Some(b),
            _ => Some(StrongPair { pair, count }),
        })
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
    fn test_pair_always_together() {
        let window: Vec<DrawRecord> = (0..10).map(|i| record([30, 4, 10 + i, 20 + i, 1])).collect();
        let main = vec![4, 8, 15, 30, 35, 36];
        let best = strongest_pair(&main, &window).unwrap();
        assert_eq!(best.pair, (4, 30));
        assert_eq!(best.count, 10);
    }

    #[test]
    fn test_tie_takes_smallest_pair() {
        let window = vec![
            record([5, 9, 1, 2, 4]),
            record([3, 9, 1, 2, 4]),
        ];
        let best = strongest_pair(&[3, 5, 9], &window).unwrap();
        assert_eq!(best, StrongPair { pair: (3, 9), count: 1 });
    }

    #[test]
    fn test_no_pair_found() {
        let window = vec![record([5, 6, 7, 8, 10]), record([9, 11, 12, 13, 14])];
        assert_eq!(strongest_pair(&[5, 9], &window), None);
        assert_eq!(strongest_pair(&[5, 9], &[]), None);
        assert_eq!(strongest_pair(&[], &window), None);
    }

    #[test]
    fn test_pair_counts() {
        let window = vec![
            record([1, 2, 3, 4, 5]),
            record([1, 2, 6, 7, 8]),
        ];
        let counts = pair_counts(&[1, 2, 3], &window);
        assert_eq!(counts.get(&(1, 2)), Some(&2));
        assert_eq!(counts.get(&(1, 3)), Some(&1));
        assert_eq!(counts.get(&(2, 3)), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_pair_counts_unsorted_main_numbers() {
        let window = vec![record([3, 8, 1, 20, 21])];
        let counts = pair_counts(&[3, 1, 1], &window);
        assert_eq!(counts, BTreeMap::from([((1, 3), 1)]));
    }
}
