use std::collections::HashSet;

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use rusqlite::Connection;

use crate::db::fetch_all_draws;
use crate::models::DrawRecord;

/// Historique des tirages, trié du plus récent au plus ancien, sans doublon de période.
/// Lecture seule une fois chargé ; `reload` remplace tout le contenu.
#[derive(Debug, Clone, Default)]
pub struct DrawRepository {
    records: Vec<DrawRecord>,
}

impl DrawRepository {
    pub fn new(records: Vec<DrawRecord>) -> Self {
        Self { records: normalize(records) }
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        let records = fetch_all_draws(conn)?;
        log::info!("{} tirages chargés depuis la base", records.len());
        Ok(Self::new(records))
    }

    pub fn reload(&mut self, records: Vec<DrawRecord>) {
        self.records = normalize(records);
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self, n: usize) -> &[DrawRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn by_weekday(&self, weekday: Weekday) -> Vec<DrawRecord> {
        self.records
            .iter()
            .filter(|r| r.weekday() == weekday)
            .cloned()
            .collect()
    }

    /// Fenêtre d'analyse pour une date cible : tirages strictement antérieurs à `as_of`,
    /// éventuellement restreints au même jour de semaine, les `size` plus récents.
    pub fn window(&self, as_of: NaiveDate, weekday_filter: bool, size: usize) -> Vec<DrawRecord> {
        let weekday = as_of.weekday();
        self.records
            .iter()
            .filter(|r| r.date < as_of)
            .filter(|r| !weekday_filter || r.weekday() == weekday)
            .take(size)
            .cloned()
            .collect()
    }
}

fn normalize(mut records: Vec<DrawRecord>) -> Vec<DrawRecord> {
    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.period.cmp(&a.period)));
    let mut seen = HashSet::new();
    records.retain(|r| seen.insert(r.period.clone()));
    records
}
