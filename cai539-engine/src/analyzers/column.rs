use cai539_db::models::{DrawRecord, PICK_COUNT};

use super::{count_by, top_k, Analyzer};

/// Valeur dominante de chaque colonne de tirage (position 1, 2, ...).
pub struct ColumnRepetition {
    columns: usize,
}

impl ColumnRepetition {
    pub fn new(columns: usize) -> Self {
        Self { columns: columns.min(PICK_COUNT) }
    }

    pub fn column_mode(window: &[DrawRecord], column: usize) -> Option<u8> {
        let counts = count_by(window.iter().filter_map(|r| r.numbers.get(column).copied()));
        top_k(counts, 1).into_iter().next()
    }
}

impl Analyzer for ColumnRepetition {
    fn name(&self) -> &str {
        "ColumnRepetition"
    }

    fn description(&self) -> &str {
        "Valeur la plus répétée dans chacune des premières colonnes"
    }

    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8> {
        (0..self.columns)
            .filter_map(|col| Self::column_mode(window, col))
            .collect()
    }
}
