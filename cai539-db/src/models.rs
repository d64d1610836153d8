use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Numéros tirés de 1 à 39.
pub const POOL_SIZE: u8 = 39;
/// 5 numéros par tirage.
pub const PICK_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub period: String,
    pub date: NaiveDate,
    /// Ordre de tirage (colonnes 獎號1..5), pas forcément trié.
    pub numbers: [u8; PICK_COUNT],
    pub lunar_month: Option<u8>,
}

impl DrawRecord {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    pub fn sorted_numbers(&self) -> [u8; PICK_COUNT] {
        let mut sorted = self.numbers;
        sorted.sort_unstable();
        sorted
    }
}

pub fn validate_numbers(numbers: &[u8; PICK_COUNT]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("Numéro {} hors limites (1-{})", n, POOL_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    Ok(())
}

pub fn validate_lunar_month(month: Option<u8>) -> Result<()> {
    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            bail!("Mois lunaire {} hors limites (1-12)", m);
        }
    }
    Ok(())
}
