use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use cai539_db::models::DrawRecord;
use cai539_db::repository::DrawRepository;

use crate::analyzers::{all_analyzers, Analyzer};
use crate::config::EngineConfig;
use crate::ensemble::cooccurrence::{strongest_pair, StrongPair};
use crate::ensemble::filter::{HotColdFilter, Temperature};
use crate::ensemble::{aggregate, rank, AnalyzerOutput, CandidateScore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResult {
    /// Numéros principaux, distincts, en ordre croissant.
    pub main_numbers: Vec<u8>,
    pub strong_pair: Option<StrongPair>,
}

/// Résultat complet d'une exécution, avec les étapes intermédiaires pour l'affichage.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub window_size: usize,
    pub expected: f64,
    pub analyzer_outputs: Vec<AnalyzerOutput>,
    pub pool: CandidateScore,
    pub hot: Vec<u8>,
    pub cold: Vec<u8>,
    pub survivors: BTreeSet<u8>,
    pub result: RecommendationResult,
}

pub struct Engine {
    config: EngineConfig,
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let analyzers = all_analyzers(&config);
        Self { config, analyzers }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyzers(&self) -> &[Box<dyn Analyzer>] {
        &self.analyzers
    }

    /// Sélectionne la fenêtre pour la date cible puis exécute le pipeline.
    pub fn recommend(&self, repo: &DrawRepository, as_of: NaiveDate) -> PipelineRun {
        let window = repo.window(as_of, self.config.weekday_filter, self.config.window_size);
        log::info!(
            "Fenêtre pour le {} : {} tirages (filtre jour de semaine : {})",
            as_of,
            window.len(),
            self.config.weekday_filter
        );
        self.run(&window)
    }

    /// window[0] = tirage le plus récent.
    pub fn run(&self, window: &[DrawRecord]) -> PipelineRun {
        let analyzer_outputs: Vec<AnalyzerOutput> = self
            .analyzers
            .iter()
            .map(|analyzer| {
                let candidates = analyzer.candidates(window);
                log::debug!("{} -> {:?}", analyzer.name(), candidates);
                AnalyzerOutput { name: analyzer.name().to_string(), candidates }
            })
            .collect();

        let pool = aggregate(&analyzer_outputs);
        let filter = HotColdFilter::new(window, self.config.hot_multiplier, self.config.cold_multiplier);
        let survivors = filter.retain_neutral(&pool);
        let main_numbers = rank(&pool, &survivors, self.config.top_n);
        let strong_pair = strongest_pair(&main_numbers, window);

        log::info!(
            "{} candidats distincts, {} neutres, {} retenus",
            pool.len(),
            survivors.len(),
            main_numbers.len()
        );

        PipelineRun {
            window_size: window.len(),
            expected: filter.expected(),
            analyzer_outputs,
            pool,
            hot: filter.classified(Temperature::Hot),
            cold: filter.classified(Temperature::Cold),
            survivors,
            result: RecommendationResult { main_numbers, strong_pair },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::make_test_draws;
    use cai539_db::models::POOL_SIZE;
    use chrono::{Duration, NaiveDate};

    fn record(period: usize, date: NaiveDate, numbers: [u8; 5]) -> DrawRecord {
        DrawRecord {
            period: format!("{:03}", period),
            date,
            numbers,
            lunar_month: None,
        }
    }

    #[test]
    fn test_empty_window() {
        let engine = Engine::new(EngineConfig::default());
        let run = engine.run(&[]);
        assert!(run.result.main_numbers.is_empty());
        assert_eq!(run.result.strong_pair, None);
        assert!(run.pool.is_empty());
        assert_eq!(run.analyzer_outputs.len(), 7);
    }

    #[test]
    fn test_main_numbers_invariants() {
        let engine = Engine::new(EngineConfig::default());
        for n in [1, 5, 13, 39, 80, 200] {
            let draws = make_test_draws(n);
            let main = engine.run(&draws).result.main_numbers;
            assert!(main.len() <= 6);
            assert!(main.windows(2).all(|w| w[0] < w[1]), "{:?}", main);
            assert!(main.iter().all(|&x| (1..=POOL_SIZE).contains(&x)));
        }
    }

    #[test]
    fn test_idempotent() {
        let engine = Engine::new(EngineConfig::default());
        let draws = make_test_draws(120);
        let first = engine.run(&draws).result;
        let second = engine.run(&draws).result;
        assert_eq!(first, second);
    }

    #[test]
    fn test_main_numbers_are_neutral_candidates() {
        let engine = Engine::new(EngineConfig::default());
        let draws = make_test_draws(90);
        let run = engine.run(&draws);
        for n in &run.result.main_numbers {
            assert!(run.survivors.contains(n));
            assert!(run.pool.contains_key(n));
            assert!(!run.hot.contains(n));
            assert!(!run.cold.contains(n));
        }
    }

    #[test]
    fn test_number_seven_in_every_draw() {
        // 5 tirages contenant tous 7 en première colonne, aucune autre répétition
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let window: Vec<DrawRecord> = (0..5u8)
            .map(|i| {
                let k = i * 4;
                record(
                    5 - i as usize,
                    start - Duration::days(7 * i as i64),
                    [7, 10 + k, 11 + k, 12 + k, 13 + k],
                )
            })
            .collect();
        let engine = Engine::new(EngineConfig::default());
        let run = engine.run(&window);

        let output = |name: &str| {
            run.analyzer_outputs
                .iter()
                .find(|o| o.name == name)
                .map(|o| o.candidates.clone())
                .unwrap()
        };
        assert!(output("TailDigit").contains(&7));
        assert!(output("ColumnRepetition").contains(&7));
        // expected = 25/39 : 7 sort 5 fois, il est chaud et donc écarté
        assert!(run.hot.contains(&7));
        assert!(!run.result.main_numbers.contains(&7));
    }

    #[test]
    fn test_number_seven_kept_when_not_hot() {
        // Seuil chaud relevé : 7 redevient neutre et domine le classement
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let window: Vec<DrawRecord> = (0..5u8)
            .map(|i| {
                let k = i * 4;
                record(
                    5 - i as usize,
                    start - Duration::days(7 * i as i64),
                    [7, 10 + k, 11 + k, 12 + k, 13 + k],
                )
            })
            .collect();
        let config = EngineConfig {
            hot_multiplier: 10.0,
            cold_multiplier: 0.01,
            ..EngineConfig::default()
        };
        let run = Engine::new(config).run(&window);
        assert!(run.result.main_numbers.contains(&7));
    }

    #[test]
    fn test_recommend_uses_weekday_window() {
        // Tirages quotidiens sur 8 semaines
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let draws: Vec<DrawRecord> = (0..56)
            .map(|i| {
                let b = (i % 7) as u8;
                record(i, start + Duration::days(i as i64), [b * 5 + 1, b * 5 + 2, b * 5 + 3, b * 5 + 4, b * 5 + 5])
            })
            .collect();
        let repo = DrawRepository::new(draws);
        let engine = Engine::new(EngineConfig::default());

        let as_of = start + Duration::days(56);
        let run = engine.recommend(&repo, as_of);
        assert_eq!(run.window_size, 8);
        // Tous les tirages de ce jour contiennent 1..=5 : chaque numéro sorti est chaud
        assert_eq!(run.hot, vec![1, 2, 3, 4, 5]);
    }
}
