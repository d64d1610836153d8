use std::collections::BTreeSet;

use cai539_db::models::{DrawRecord, PICK_COUNT, POOL_SIZE};
use serde::Serialize;

use super::CandidateScore;
use crate::analyzers::number_frequencies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Temperature {
    Hot,
    Cold,
    Neutral,
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Temperature::Hot => write!(f, "CHAUD"),
            Temperature::Cold => write!(f, "FROID"),
            Temperature::Neutral => write!(f, "-"),
        }
    }
}

/// Écarte les numéros trop ou trop peu sortis par rapport à un tirage uniforme 5/39.
pub struct HotColdFilter {
    frequencies: Vec<u32>,
    window_len: usize,
    hot_multiplier: f64,
    cold_multiplier: f64,
}

impl HotColdFilter {
    pub fn new(window: &[DrawRecord], hot_multiplier: f64, cold_multiplier: f64) -> Self {
        Self {
            frequencies: number_frequencies(window),
            window_len: window.len(),
            hot_multiplier,
            cold_multiplier,
        }
    }

    /// Fréquence attendue d'un numéro : `len * 5 / 39`. Affichage uniquement.
    pub fn expected(&self) -> f64 {
        self.drawn_slots() / POOL_SIZE as f64
    }

    fn drawn_slots(&self) -> f64 {
        (self.window_len * PICK_COUNT) as f64
    }

    pub fn frequency(&self, number: u8) -> u32 {
        self.frequencies.get(number as usize).copied().unwrap_or(0)
    }

    /// Bornes incluses côté neutre : `expected * froid <= f <= expected * chaud`.
    ///
    /// Comparaison sur `f * 39` contre `len * 5 * multiplicateur`, sans division : les
    /// bornes entières restent exactes.
    pub fn classify(&self, number: u8) -> Temperature {
        let scaled = self.frequency(number) as f64 * POOL_SIZE as f64;
        let slots = self.drawn_slots();
        if scaled > slots * self.hot_multiplier {
            Temperature::Hot
        } else if scaled < slots * self.cold_multiplier {
            Temperature::Cold
        } else {
            Temperature::Neutral
        }
    }

    pub fn retain_neutral(&self, pool: &CandidateScore) -> BTreeSet<u8> {
        pool.keys()
            .copied()
            .filter(|&n| self.classify(n) == Temperature::Neutral)
            .collect()
    }

    pub fn classified(&self, temperature: Temperature) -> Vec<u8> {
        (1..=POOL_SIZE).filter(|&n| self.classify(n) == temperature).collect()
    }
}
