use anyhow::{bail, Context, Result};
use cai539_db::rusqlite::Connection;
use chrono::NaiveDate;
use std::path::Path;

use cai539_db::db::insert_draw;
use cai539_db::lunar::LunarCalendar;
use cai539_db::models::{validate_numbers, DrawRecord, PICK_COUNT};

/// Position des colonnes utiles dans le fichier source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub period: usize,
    pub date: usize,
    pub numbers: [usize; PICK_COUNT],
}

fn normalize_header(h: &str) -> String {
    h.trim().trim_start_matches('\u{feff}').to_lowercase()
}

impl ColumnMap {
    /// En-têtes officiels (期別, 開獎日期, 獎號1..5) ou équivalents anglais (period, date, n1..n5).
    pub fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();

        let period = names
            .iter()
            .position(|h| h.contains("期別") || h == "period");
        let date = names
            .iter()
            .position(|h| h.contains("開獎日期") || h == "date");
        let numbers: Vec<usize> = names
            .iter()
            .enumerate()
            .filter(|(_, h)| h.contains("獎號") || is_english_number_header(h))
            .map(|(i, _)| i)
            .collect();

        let (Some(period), Some(date)) = (period, date) else {
            bail!("Colonnes période/date introuvables dans l'en-tête : {:?}", names);
        };
        if numbers.len() < PICK_COUNT {
            bail!("{} colonnes de numéros trouvées, {} attendues", numbers.len(), PICK_COUNT);
        }

        Ok(Self {
            period,
            date,
            numbers: [numbers[0], numbers[1], numbers[2], numbers[3], numbers[4]],
        })
    }
}

fn is_english_number_header(h: &str) -> bool {
    h.strip_prefix('n')
        .and_then(|rest| rest.parse::<usize>().ok())
        .is_some_and(|i| (1..=PICK_COUNT).contains(&i))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let day = raw.split_whitespace().next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(day, "%Y-%m-%d"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    lunar: &dyn LunarCalendar,
) -> Result<DrawRecord> {
    let get = |idx: usize| {
        record
            .get(idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let period = get(columns.period)?.to_string();
    let date = parse_date(get(columns.date)?)?;

    let mut numbers = [0u8; PICK_COUNT];
    for (slot, &idx) in numbers.iter_mut().zip(&columns.numbers) {
        *slot = get_u8(idx)?;
    }
    validate_numbers(&numbers)?;

    Ok(DrawRecord {
        period,
        date,
        numbers,
        lunar_month: lunar.lunar_month(date),
    })
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

impl ImportResult {
    pub fn merge(&mut self, other: &ImportResult) {
        self.total_records += other.total_records;
        self.inserted += other.inserted;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

pub fn import_csv(conn: &Connection, path: &Path, lunar: &dyn LunarCalendar) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let headers = reader
        .headers()
        .with_context(|| format!("En-tête illisible dans {:?}", path))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)
        .with_context(|| format!("Fichier {:?} ignoré", path))?;

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult::default();

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => {
                match parse_record(&record, &columns, lunar) {
                    Ok(draw) => {
                        match insert_draw(&tx, &draw) {
                            Ok(true) => result.inserted += 1,
                            Ok(false) => result.skipped += 1,
                            Err(e) => {
                                log::warn!("Erreur insertion tirage {}: {}", result.total_records, e);
                                result.errors += 1;
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!("Erreur parsing ligne {}: {:#}", result.total_records, e);
                        result.errors += 1;
                    }
                }
            }
            Err(e) => {
                log::warn!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    log::info!("{:?} : {} insérés, {} doublons, {} erreurs", path, result.inserted, result.skipped, result.errors);
    Ok(result)
}
