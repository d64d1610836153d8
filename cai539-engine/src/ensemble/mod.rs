pub mod cooccurrence;
pub mod filter;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analyzers::top_k;

/// Numéro -> nombre d'analyseurs l'ayant proposé (avec répétitions).
pub type CandidateScore = BTreeMap<u8, u32>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerOutput {
    pub name: String,
    pub candidates: Vec<u8>,
}

/// Fusionne les sorties sans dédoublonner : un numéro proposé par plusieurs
/// analyseurs (ou deux fois par le même) compte autant de fois.
pub fn aggregate(outputs: &[AnalyzerOutput]) -> CandidateScore {
    let mut pool = CandidateScore::new();
    for output in outputs {
        for &n in &output.candidates {
            *pool.entry(n).or_insert(0) += 1;
        }
    }
    pool
}

/// Les `top_n` survivants les plus proposés, renvoyés en ordre croissant.
pub fn rank(pool: &CandidateScore, survivors: &BTreeSet<u8>, top_n: usize) -> Vec<u8> {
    let counts = pool
        .iter()
        .filter(|(n, _)| survivors.contains(*n))
        .map(|(&n, &c)| (n, c));
    let mut main = top_k(counts, top_n);
    main.sort_unstable();
    main
}
