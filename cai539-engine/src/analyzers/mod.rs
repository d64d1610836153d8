pub mod calendar;
pub mod column;
pub mod consecutive;
pub mod diagonal;
pub mod gap_fill;
pub mod tail;
pub mod zone;

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use cai539_db::models::{DrawRecord, POOL_SIZE};

use crate::config::EngineConfig;

pub trait Analyzer: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// window[0] = tirage le plus récent. Fenêtre vide => aucun candidat.
    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8>;
}

/// Fréquence de chaque numéro dans la fenêtre (index = numéro, 0 inutilisé).
pub fn number_frequencies<'a>(window: impl IntoIterator<Item = &'a DrawRecord>) -> Vec<u32> {
    let mut counts = vec![0u32; POOL_SIZE as usize + 1];
    for record in window {
        for &n in &record.numbers {
            if let Some(c) = counts.get_mut(n as usize) {
                *c += 1;
            }
        }
    }
    counts
}

/// Les `k` clés les plus fréquentes : compte décroissant puis clé croissante, comptes nuls ignorés.
pub fn top_k<K: Ord + Copy>(counts: impl IntoIterator<Item = (K, u32)>, k: usize) -> Vec<K> {
    let mut ranked: Vec<(K, u32)> = counts.into_iter().filter(|&(_, c)| c > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(k).map(|(key, _)| key).collect()
}

/// Variante de `top_k` sur une table indexée par numéro.
pub fn top_numbers(frequencies: &[u32], k: usize) -> Vec<u8> {
    top_k(
        frequencies
            .iter()
            .enumerate()
            .skip(1)
            .map(|(n, &c)| (n as u8, c)),
        k,
    )
}

pub fn count_by<K: Ord>(keys: impl IntoIterator<Item = K>) -> BTreeMap<K, u32> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

pub fn all_analyzers(config: &EngineConfig) -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(zone::ZoneDistribution::new(
            config.zones.clone(),
            config.zones_picked,
            config.numbers_per_zone,
        )),
        Box::new(tail::TailDigit::new(config.tail_digits, config.tail_limit)),
        Box::new(column::ColumnRepetition::new(config.columns)),
        Box::new(gap_fill::GapFill::new(config.gap_min, config.gap_limit)),
        Box::new(diagonal::DiagonalPattern::new(
            config.diagonal_window,
            config.diagonal_max_offset,
            config.diagonal_limit,
        )),
        Box::new(calendar::CalendarMonth::new(config.calendar_top)),
        Box::new(consecutive::ConsecutiveRun::new(config.consecutive_top)),
    ]
}

pub fn make_test_draws(n: usize) -> Vec<DrawRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..n)
        .map(|i| {
            let base = (i % 7) as u8;
            DrawRecord {
                period: format!("{:03}", n - i),
                date: start + Duration::days(7 * (n - i) as i64),
                numbers: [
                    base * 5 + 1,
                    base * 5 + 3,
                    base * 5 + 4,
                    base * 5 + 7,
                    36 + base % 4,
                ],
                lunar_month: Some((i % 12) as u8 + 1),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cai539_db::models::validate_numbers;

    #[test]
    fn test_make_test_draws_valid() {
        let draws = make_test_draws(50);
        for d in &draws {
            assert!(validate_numbers(&d.numbers).is_ok(), "{:?}", d.numbers);
        }
        assert!(draws[0].date > draws[1].date);
    }

    #[test]
    fn test_top_k_tie_break_ascending() {
        let counts = vec![(9u8, 3), (4, 3), (7, 5), (1, 0), (2, 1)];
        assert_eq!(top_k(counts.clone(), 3), vec![7, 4, 9]);
        assert_eq!(top_k(counts, 10), vec![7, 4, 9, 2]);
    }

    #[test]
    fn test_number_frequencies() {
        let draws = make_test_draws(2);
        let freq = number_frequencies(&draws);
        assert_eq!(freq.len(), 40);
        assert_eq!(freq.iter().sum::<u32>(), 10);
        assert_eq!(freq[1], 1);
        assert_eq!(freq[36], 1);
        assert_eq!(freq[37], 1);
        assert_eq!(freq[39], 0);
    }

    #[test]
    fn test_all_analyzers_empty_window() {
        let analyzers = all_analyzers(&EngineConfig::default());
        assert_eq!(analyzers.len(), 7);
        for analyzer in &analyzers {
            assert!(analyzer.candidates(&[]).is_empty(), "{} non vide", analyzer.name());
        }
    }

    #[test]
    fn test_all_analyzers_in_range() {
        let analyzers = all_analyzers(&EngineConfig::default());
        let draws = make_test_draws(60);
        for analyzer in &analyzers {
            for n in analyzer.candidates(&draws) {
                assert!((1..=POOL_SIZE).contains(&n), "{} : {}", analyzer.name(), n);
            }
        }
    }
}
