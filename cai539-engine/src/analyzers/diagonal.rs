use std::collections::BTreeMap;

use cai539_db::models::{DrawRecord, PICK_COUNT};

use super::{top_k, Analyzer};

/// Lignes diagonales sur la grille des derniers tirages (lignes = tirages, colonnes = positions).
pub struct DiagonalPattern {
    rows: usize,
    max_offset: usize,
    limit: usize,
    description: String,
}

impl DiagonalPattern {
    pub fn new(rows: usize, max_offset: usize, limit: usize) -> Self {
        let description = format!("Valeurs traversées par les diagonales des {} derniers tirages", rows);
        Self { rows, max_offset, limit, description }
    }

    /// Nombre de passages de chaque valeur sur l'ensemble des diagonales.
    ///
    /// Pour un décalage `d` et une ligne de départ `s`, le parcours commence à la ligne
    /// `s + |d|` et descend d'une ligne par colonne : de gauche à droite si `d >= 0`,
    /// de droite à gauche sinon. Les diagonales tronquées par le bas de la grille comptent.
    pub fn visits(&self, window: &[DrawRecord]) -> BTreeMap<u8, u32> {
        let grid = &window[..self.rows.min(window.len())];
        let max = self.max_offset as isize;
        let mut visits = BTreeMap::new();

        for offset in -max..=max {
            let forward = offset >= 0;
            for start in 0..grid.len() {
                let first = start + offset.unsigned_abs();
                for j in 0..PICK_COUNT {
                    let Some(record) = grid.get(first + j) else {
                        break;
                    };
                    let col = if forward { j } else { PICK_COUNT - 1 - j };
                    *visits.entry(record.numbers[col]).or_insert(0) += 1;
                }
            }
        }

        visits
    }
}

impl Analyzer for DiagonalPattern {
    fn name(&self) -> &str {
        "DiagonalPattern"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn candidates(&self, window: &[DrawRecord]) -> Vec<u8> {
        top_k(self.visits(window), self.limit)
    }
}
