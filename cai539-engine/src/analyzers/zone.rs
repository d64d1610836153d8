use cai539_db::models::DrawRecord;

use super::{number_frequencies, top_k, Analyzer};
use crate::config::Zone;

/// Cinq zones contiguës ; on garde les meilleurs numéros des zones les plus chargées.
pub struct ZoneDistribution {
    zones: Vec<Zone>,
    zones_picked: usize,
    per_zone: usize,
}

impl ZoneDistribution {
    pub fn new(zones: Vec<Zone>, zones_picked: usize, per_zone: usize) -> Self {
        Self { zones, zones_picked, per_zone }
    }

    pub fn zone_scores(&self, window: &[DrawRecord]) -> Vec<u32> {
        let freq = number_frequencies(window);
        self.zones
            .iter()
            .map(|zone| zone.numbers().map(|n| freq.get(n as usize).copied().unwrap_or(0)).sum::<u32>())
            .collect()
    }
}

impl Analyzer for ZoneDistribution {
    fn name(&self) -> &str {
        "ZoneDistribution"
    }

    fn description(&self) -> &str {
        "Meilleurs numéros des zones les plus fréquentes"
    }

    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8> {
        let freq = number_frequencies(window);
        let scores = self.zone_scores(window);
        let best_zones = top_k(scores.iter().copied().enumerate(), self.zones_picked);

        best_zones
            .into_iter()
            .flat_map(|i| {
                let zone = self.zones[i];
                top_k(zone.numbers().map(|n| (n, freq.get(n as usize).copied().unwrap_or(0))), self.per_zone)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::make_test_draws;
    use crate::config::default_zones;
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
    fn test_zone_scores_sum_to_total() {
        let analyzer = ZoneDistribution::new(default_zones(), 2, 2);
        let draws = make_test_draws(40);
        let scores = analyzer.zone_scores(&draws);
        assert_eq!(scores.len(), 5);
        assert_eq!(scores.iter().sum::<u32>(), 40 * 5);
    }

    #[test]
    fn test_picks_two_best_zones() {
        let analyzer = ZoneDistribution::new(default_zones(), 2, 2);
        let window = vec![
            record([1, 2, 3, 33, 34]),
            record([1, 2, 4, 33, 35]),
            record([1, 5, 17, 33, 36]),
        ];
        // Zone 1-8 : 8 occurrences, zone 33-39 : 6, zone 17-24 : 1
        assert_eq!(analyzer.candidates(&window), vec![1, 2, 33, 34]);
    }

    #[test]
    fn test_zero_score_zones_skipped() {
        let analyzer = ZoneDistribution::new(default_zones(), 2, 2);
        let window = vec![record([1, 2, 3, 4, 5])];
        assert_eq!(analyzer.candidates(&window), vec![1, 2]);
    }

    #[test]
    fn test_empty_window() {
        let analyzer = ZoneDistribution::new(default_zones(), 2, 2);
        assert!(analyzer.candidates(&[]).is_empty());
    }
}
