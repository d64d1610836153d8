use std::path::Path;

use anyhow::{bail, Context, Result};
use chinese_lunisolar_calendar::LunisolarDate;
use chrono::NaiveDate;

use crate::models::validate_lunar_month;

/// Un mois lunaire ne dépasse jamais 30 jours.
const MAX_LUNAR_MONTH_DAYS: i64 = 30;

/// Conversion date grégorienne -> mois lunaire. L'absence de valeur n'est pas une erreur :
/// le tirage est simplement exclu des regroupements par mois lunaire.
pub trait LunarCalendar {
    fn lunar_month(&self, date: NaiveDate) -> Option<u8>;
}

pub struct NoLunarCalendar;

impl LunarCalendar for NoLunarCalendar {
    fn lunar_month(&self, _date: NaiveDate) -> Option<u8> {
        None
    }
}

/// Calendrier luni-solaire chinois (農曆), couvert de 1901 à 2100. Un mois
/// intercalaire (閏月) compte comme le mois qu'il répète ; hors plage : `None`.
pub struct ChineseLunisolar;

impl LunarCalendar for ChineseLunisolar {
    fn lunar_month(&self, date: NaiveDate) -> Option<u8> {
        LunisolarDate::from_date(date)
            .ok()
            .map(|d| d.to_lunar_month().to_u8())
    }
}

/// Table des débuts de mois lunaires, une ligne `start_date,month` par mois.
#[derive(Debug, Clone)]
pub struct LunarMonthTable {
    boundaries: Vec<(NaiveDate, u8)>,
}

impl LunarMonthTable {
    pub fn new(mut boundaries: Vec<(NaiveDate, u8)>) -> Result<Self> {
        for &(_, month) in &boundaries {
            validate_lunar_month(Some(month))?;
        }
        boundaries.sort_by_key(|&(date, _)| date);
        for pair in boundaries.windows(2) {
            if pair[0].0 == pair[1].0 {
                bail!("Début de mois lunaire en double : {}", pair[0].0);
            }
        }
        Ok(Self { boundaries })
    }

    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

        let mut boundaries = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Erreur lecture ligne {}", line + 2))?;
            let (Some(raw_date), Some(raw_month)) = (record.get(0), record.get(1)) else {
                bail!("Ligne {} incomplète dans {:?}", line + 2, path);
            };
            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
                .with_context(|| format!("Date invalide '{}' (ligne {})", raw_date, line + 2))?;
            let month = raw_month
                .parse::<u8>()
                .with_context(|| format!("Mois invalide '{}' (ligne {})", raw_month, line + 2))?;
            boundaries.push((date, month));
        }

        let table = Self::new(boundaries)?;
        if table.is_empty() {
            bail!("Table lunaire vide : {:?}", path);
        }
        log::info!("Table lunaire chargée : {} mois", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}

impl LunarCalendar for LunarMonthTable {
    fn lunar_month(&self, date: NaiveDate) -> Option<u8> {
        let idx = self.boundaries.partition_point(|&(start, _)| start <= date);
        if idx == 0 {
            return None;
        }
        let (start, month) = self.boundaries[idx - 1];
        // Au-delà de la dernière borne, on ne sait pas où finit le mois
        if idx == self.boundaries.len() && (date - start).num_days() >= MAX_LUNAR_MONTH_DAYS {
            return None;
        }
        Some(month)
    }
}
